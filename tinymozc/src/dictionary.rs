//! 変換のための辞書モジュール。
//!
//! 変換器は辞書に対して「入力文字列の先頭に一致する読みを持つ単語をすべて返す」
//! という操作だけを要求します。この契約を[`Dictionary`]トレイトとして定義し、
//! その実装としてテキスト形式の辞書を線形探索する[`SystemDictionary`]を提供します。
//!
//! # 辞書のフォーマット
//!
//! 読み、左文脈ID、右文脈ID、出現コスト、表記がタブ区切りで格納されています。
//!
//! ```text
//! うつくしいにほんご	2460	1847	4848	美しい日本語
//! ```
mod param;
mod system;

pub use crate::dictionary::param::WordParam;
pub use crate::dictionary::system::{DictionaryEntry, SystemDictionary};

/// 前方一致検索の結果
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct LexMatch<'a> {
    /// 一致した読み。検索した入力文字列の空でない接頭辞です。
    pub reading: &'a str,
    /// 変換後の表記
    pub surface: &'a str,
    /// 単語パラメータ
    pub param: WordParam,
}

impl<'a> LexMatch<'a> {
    /// 新しい検索結果を作成します。
    #[inline(always)]
    pub const fn new(reading: &'a str, surface: &'a str, param: WordParam) -> Self {
        Self {
            reading,
            surface,
            param,
        }
    }
}

/// 変換器が利用する辞書の契約
///
/// 実装は入力の関数として純粋でなければならず、返す読みはすべて
/// `input`の空でない接頭辞でなければなりません。順序は問いません。
pub trait Dictionary {
    /// 入力文字列の先頭に一致する読みを持つ単語をすべて返します。
    ///
    /// # 引数
    ///
    /// * `input` - 検索する入力文字列（変換対象の、ある位置から末尾までの部分）
    fn lookup_prefix<'a>(&'a self, input: &'a str) -> impl Iterator<Item = LexMatch<'a>> + 'a;
}
