//! 入力テキストの内部表現を提供するモジュール
//!
//! ラティスの位置は文字単位で数えるため、入力文字列を文字に分割し、
//! 文字位置からバイト位置へのマッピングを保持します。

use std::ops::Range;

/// 入力テキストの内部表現を保持する構造体
///
/// # フィールド
///
/// * `input` - 元の入力文字列
/// * `chars` - 入力文字列を文字単位に分割した配列
/// * `c2b` - 文字位置からバイト位置へのマッピング配列（長さは文字数+1）
#[derive(Clone, Debug)]
pub struct Sentence {
    input: String,
    chars: Vec<char>,
    c2b: Vec<usize>,
}

impl Default for Sentence {
    fn default() -> Self {
        Self {
            input: String::new(),
            chars: vec![],
            c2b: vec![0],
        }
    }
}

impl Sentence {
    /// 新しい空の `Sentence` インスタンスを生成します
    pub fn new() -> Self {
        Self::default()
    }

    /// 入力文字列を設定し、文字配列とバイト位置のマッピングを計算します
    ///
    /// # 引数
    ///
    /// * `input` - 設定する入力文字列
    pub fn set_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.input.clear();
        self.chars.clear();
        self.c2b.clear();
        self.input.push_str(input.as_ref());
        for (bi, ch) in self.input.char_indices() {
            self.chars.push(ch);
            self.c2b.push(bi);
        }
        self.c2b.push(self.input.len());
    }

    /// 元の入力文字列への参照を返します
    #[inline(always)]
    pub fn raw(&self) -> &str {
        &self.input
    }

    /// 文字数を返します
    #[inline(always)]
    pub fn len_char(&self) -> usize {
        self.chars.len()
    }

    /// 指定された文字位置に対応するバイト位置を返します
    #[inline(always)]
    pub fn byte_position(&self, pos_char: usize) -> usize {
        self.c2b[pos_char]
    }

    /// 文字位置の範囲に対応する部分文字列を返します
    #[inline(always)]
    pub fn substr(&self, range_char: Range<usize>) -> &str {
        &self.input[self.byte_position(range_char.start)..self.byte_position(range_char.end)]
    }

    /// 指定された文字位置から末尾までの部分文字列を返します
    #[inline(always)]
    pub fn suffix(&self, pos_char: usize) -> &str {
        &self.input[self.byte_position(pos_char)..]
    }
}
