//! 変換結果のトークン
//!
//! トークンは最良経路上のノードへの軽量な参照であり、読み、表記、位置情報、
//! 文脈IDやコストへのアクセスを提供します。

use std::ops::Range;

use crate::converter::lattice::{Lattice, Node, NodeId, NodeKind};

/// 変換結果のトークン
///
/// 実際のデータは[`Worker`](crate::converter::worker::Worker)のラティスが保持しており、
/// トークンはワーカーが次の変換を行うまでの間のみ有効です。
pub struct Token<'w> {
    lattice: &'w Lattice,
    id: NodeId,
}

impl<'w> Token<'w> {
    #[inline(always)]
    pub(crate) const fn new(lattice: &'w Lattice, id: NodeId) -> Self {
        Self { lattice, id }
    }

    #[inline(always)]
    fn node(&self) -> &'w Node {
        self.lattice.node(self.id)
    }

    /// トークンの文字単位の位置範囲を返します。
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        self.node().range_char()
    }

    /// トークンのバイト単位の位置範囲を返します。
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        let range = self.range_char();
        self.lattice.byte_position(range.start)..self.lattice.byte_position(range.end)
    }

    /// トークンが消費した入力の部分文字列（読み）を返します。
    #[inline(always)]
    pub fn key(&self) -> &'w str {
        &self.lattice.input()[self.range_byte()]
    }

    /// 変換後の表記を返します。
    #[inline(always)]
    pub fn value(&self) -> &'w str {
        self.node().value()
    }

    /// 左文脈IDを返します。
    #[inline(always)]
    pub fn left_id(&self) -> u16 {
        self.node().param().left_id
    }

    /// 右文脈IDを返します。
    #[inline(always)]
    pub fn right_id(&self) -> u16 {
        self.node().param().right_id
    }

    /// 単語の出現コストを返します。
    #[inline(always)]
    pub fn word_cost(&self) -> i16 {
        self.node().param().word_cost
    }

    /// 文頭からこのトークンまでの累積コストを返します。
    #[inline(always)]
    pub fn total_cost(&self) -> i32 {
        // 最良経路上のノードはすべて前向き計算で到達済みです。
        self.lattice.path(self.id).cost.unwrap_or(i32::MAX)
    }

    /// 辞書に候補がなく、入力の1文字をそのまま出力したトークンかどうかを判定します。
    #[inline(always)]
    pub fn is_unknown(&self) -> bool {
        self.node().kind() == NodeKind::Unknown
    }
}

impl std::fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("key", &self.key())
            .field("value", &self.value())
            .field("range_char", &self.range_char())
            .field("range_byte", &self.range_byte())
            .field("left_id", &self.left_id())
            .field("right_id", &self.right_id())
            .field("word_cost", &self.word_cost())
            .field("total_cost", &self.total_cost())
            .field("is_unknown", &self.is_unknown())
            .finish()
    }
}

/// 変換結果のトークンのイテレータ
pub struct TokenIter<'w> {
    lattice: &'w Lattice,
    ids: std::slice::Iter<'w, NodeId>,
}

impl<'w> TokenIter<'w> {
    #[inline(always)]
    pub(crate) fn new(lattice: &'w Lattice, ids: &'w [NodeId]) -> Self {
        Self {
            lattice,
            ids: ids.iter(),
        }
    }
}

impl<'w> Iterator for TokenIter<'w> {
    type Item = Token<'w>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| Token::new(self.lattice, id))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for TokenIter<'_> {}

#[cfg(test)]
mod tests {
    use crate::dictionary::WordParam;

    use super::*;

    #[test]
    fn test_token_of_word_node() {
        let mut lattice = Lattice::new("とうきょうへ");
        let id = lattice.insert(0, "とうきょう", "東京", WordParam::new(3, 4, 500));
        let token = Token::new(&lattice, id);

        assert_eq!(token.key(), "とうきょう");
        assert_eq!(token.value(), "東京");
        assert_eq!(token.range_char(), 0..5);
        assert_eq!(token.range_byte(), 0..15);
        assert_eq!(token.left_id(), 3);
        assert_eq!(token.right_id(), 4);
        assert_eq!(token.word_cost(), 500);
        assert!(!token.is_unknown());
    }

    #[test]
    fn test_token_of_unknown_node() {
        let lattice = Lattice::new("とうきょうへ");
        let unk = lattice.begin_nodes(5).next().unwrap().id();
        let token = Token::new(&lattice, unk);

        assert_eq!(token.key(), "へ");
        assert_eq!(token.value(), "へ");
        assert_eq!(token.range_byte(), 15..18);
        assert!(token.is_unknown());
    }
}
