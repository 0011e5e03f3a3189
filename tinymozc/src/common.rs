//! 共通の定数
//!
//! 文頭・文末ノードおよび未知語ノードに割り当てる文脈IDとコストを定義します。

/// BOS/EOSノードの文脈ID。
pub const BOS_EOS_CONNECTION_ID: u16 = 0;

/// 未知語ノードの文脈ID。
///
/// Mozcの`id.def`におけるサ変接続の名詞に相当します。
pub const UNKNOWN_CONNECTION_ID: u16 = 1837;

/// 未知語ノードの出現コスト。
///
/// 辞書に候補がある限り選ばれないよう、十分に大きな値を用います。
pub const UNKNOWN_WORD_COST: i16 = 32767;
