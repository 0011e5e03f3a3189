//! 単語のパラメータ情報
//!
//! このモジュールは、単語の文脈IDと出現コストを管理します。

/// 単語のパラメータ（文脈IDとコスト）
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct WordParam {
    /// 左文脈ID。左側に接続する単語との接続コストの計算に用いられます。
    pub left_id: u16,
    /// 右文脈ID。右側に接続する単語との接続コストの計算に用いられます。
    pub right_id: u16,
    /// 出現コスト
    pub word_cost: i16,
}

impl WordParam {
    /// 新しい単語パラメータを作成します。
    #[inline(always)]
    pub const fn new(left_id: u16, right_id: u16, word_cost: i16) -> Self {
        Self {
            left_id,
            right_id,
            word_cost,
        }
    }
}
