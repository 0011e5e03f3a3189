//! ラティス（単語グラフ）構造の実装モジュール。
//!
//! 入力文字列に対するすべての変換候補を保持します。変換とは、BOS（文頭）と
//! EOS（文末）をつなぐ経路のうち、単語の出現コストと文脈IDの接続コストの和が
//! 最小となるものを見つける作業であり、そのために必要な情報をここに集めます。
//!
//! ノードはすべてラティスが所有する単一のアリーナに格納され、ノード間のリンクは
//! アリーナ内のインデックス([`NodeId`])で表現されます。
//!
//! ```text
//! position:    | 0 | 1 | 2 | 3 | 4 |
//! begin_index: | 0 | 1 | 2 | 3 | 4 |  -> 各位置から始まるノードのリスト（begin_nextで連結）
//! end_index:   | 0 | 1 | 2 | 3 | 4 |  -> 各位置で終わるノードのリスト（end_nextで連結）
//! ```
//!
//! 処理を簡単にするため、いくつかの番兵を持ちます。
//!
//!  - 文頭・文末: BOS, EOSという単一のノード
//!  - 各入力文字: コストが非常に大きく長さが1の未知語ノード。読みと表記が同一なので無変換に対応する。
//!
//! 未知語ノードにより、辞書に候補がない入力でも常に経路が存在することが保証されます。
use std::ops::Range;

use crate::common::{BOS_EOS_CONNECTION_ID, UNKNOWN_CONNECTION_ID, UNKNOWN_WORD_COST};
use crate::connector::ConnectorCost;
use crate::dictionary::WordParam;
use crate::errors::Result;
use crate::sentence::Sentence;

/// ラティス内のノードの識別子。
///
/// ノードを所有するラティスのアリーナ内でのインデックスです。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// アリーナ内でのインデックスを返します。
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// 番兵ノードの種類。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sentinel {
    /// 文頭（BOS）
    Begin,
    /// 文末（EOS）
    End,
}

/// ノードの種類。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// BOS/EOSの番兵ノード。出力には現れません。
    Sentinel(Sentinel),
    /// 1文字を無変換で出力する未知語ノード。
    Unknown,
    /// 辞書から得られた単語ノード。
    Word,
}

/// ラティス内のノード。
///
/// 各ノードは入力の文字位置`[start, end)`を占める単語の候補を表します。
/// ここに含まれるのは挿入時に決まる情報のみで、ビタビアルゴリズムが
/// 書き込む経路情報は[`PathState`]として別に保持されます。
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    start: usize,
    end: usize,
    value: String,
    param: WordParam,
    /// 開始位置を共有する次のノード
    begin_next: Option<NodeId>,
    /// 終了位置を共有する次のノード
    end_next: Option<NodeId>,
}

impl Node {
    /// ノードの識別子を返します。
    #[inline(always)]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// ノードの種類を返します。
    #[inline(always)]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// ノードが占める文字位置の範囲を返します。
    #[inline(always)]
    pub const fn range_char(&self) -> Range<usize> {
        self.start..self.end
    }

    /// 変換後の表記を返します。
    ///
    /// BOS/EOSの場合はデバッグ用の文字列を返します。
    #[inline(always)]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// 単語パラメータを返します。
    #[inline(always)]
    pub const fn param(&self) -> WordParam {
        self.param
    }

    /// 出力に現れないノード（BOS/EOS）かどうかを判定します。
    #[inline(always)]
    pub const fn is_invisible(&self) -> bool {
        match self.kind {
            NodeKind::Sentinel(_) => true,
            NodeKind::Unknown | NodeKind::Word => false,
        }
    }
}

/// ビタビアルゴリズムによって書き込まれるノードの経路情報。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathState {
    /// BOSからこのノードの右端までの最小コスト（出現コストを含む）
    pub cost: Option<i32>,
    /// 最小コストの経路における直前のノード
    pub prev: Option<NodeId>,
    /// 最良経路における直後のノード。バックトレースでのみ設定されます。
    pub next: Option<NodeId>,
}

/// 変換候補を保持するラティス。
///
/// 1回の変換につき1つのインスタンスを使用し、[`Lattice::reset`]で再利用できます。
/// 経路情報を直接書き換えるため、並行する変換の間で共有してはいけません。
#[derive(Clone)]
pub struct Lattice {
    sent: Sentence,
    nodes: Vec<Node>,
    paths: Vec<PathState>,
    begin_index: Vec<Option<NodeId>>,
    end_index: Vec<Option<NodeId>>,
    bos: NodeId,
    eos: NodeId,
    unk_param: WordParam,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new("")
    }
}

impl Lattice {
    /// 入力文字列から新しいラティスを作成します。
    ///
    /// 未知語ノードには既定の文脈IDとコストを用います。
    ///
    /// # 引数
    ///
    /// * `input` - 変換する入力文字列
    pub fn new<S>(input: S) -> Self
    where
        S: AsRef<str>,
    {
        Self::with_unknown_param(
            input,
            WordParam::new(UNKNOWN_CONNECTION_ID, UNKNOWN_CONNECTION_ID, UNKNOWN_WORD_COST),
        )
    }

    /// 未知語ノードのパラメータを指定してラティスを作成します。
    ///
    /// # 引数
    ///
    /// * `input` - 変換する入力文字列
    /// * `unk_param` - 未知語ノードの文脈IDとコスト
    pub fn with_unknown_param<S>(input: S, unk_param: WordParam) -> Self
    where
        S: AsRef<str>,
    {
        let mut lattice = Self {
            sent: Sentence::new(),
            nodes: vec![],
            paths: vec![],
            begin_index: vec![],
            end_index: vec![],
            bos: NodeId(0),
            eos: NodeId(0),
            unk_param,
        };
        lattice.reset(input);
        lattice
    }

    /// ラティスをリセットし、新しい入力の処理を準備します。
    ///
    /// 確保済みのメモリは再利用されます。BOSとEOSの経路コストは0で初期化されます。
    pub fn reset<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.sent.set_sentence(input);
        let len_char = self.len_char();

        self.nodes.clear();
        self.paths.clear();
        self.begin_index.clear();
        self.begin_index.resize(len_char + 1, None);
        self.end_index.clear();
        self.end_index.resize(len_char + 1, None);

        self.bos = self.push_node(
            NodeKind::Sentinel(Sentinel::Begin),
            0..0,
            "BOS".to_string(),
            WordParam::new(BOS_EOS_CONNECTION_ID, BOS_EOS_CONNECTION_ID, 0),
        );
        self.end_index[0] = Some(self.bos);
        self.paths[self.bos.0].cost = Some(0);

        for pos in 0..len_char {
            let value = self.sent.substr(pos..pos + 1).to_string();
            let unk = self.push_node(NodeKind::Unknown, pos..pos + 1, value, self.unk_param);
            debug_assert_eq!(unk, Self::unknown_node(pos));
            self.begin_index[pos] = Some(unk);
            self.end_index[pos + 1] = Some(unk);
        }

        self.eos = self.push_node(
            NodeKind::Sentinel(Sentinel::End),
            len_char..len_char,
            "EOS".to_string(),
            WordParam::new(BOS_EOS_CONNECTION_ID, BOS_EOS_CONNECTION_ID, 0),
        );
        self.begin_index[len_char] = Some(self.eos);
        self.paths[self.eos.0].cost = Some(0);
    }

    fn push_node(
        &mut self,
        kind: NodeKind,
        range_char: Range<usize>,
        value: String,
        param: WordParam,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            kind,
            start: range_char.start,
            end: range_char.end,
            value,
            param,
            begin_next: None,
            end_next: None,
        });
        self.paths.push(PathState::default());
        id
    }

    /// 入力文字列を返します。
    #[inline(always)]
    pub fn input(&self) -> &str {
        self.sent.raw()
    }

    /// 入力の文字数を返します。
    #[inline(always)]
    pub fn len_char(&self) -> usize {
        self.sent.len_char()
    }

    /// ラティス内のノード数（BOS/EOSを含む）を返します。
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// BOSノードの識別子を返します。
    #[inline(always)]
    pub const fn bos(&self) -> NodeId {
        self.bos
    }

    /// EOSノードの識別子を返します。
    #[inline(always)]
    pub const fn eos(&self) -> NodeId {
        self.eos
    }

    /// 識別子に対応するノードを返します。
    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// ノードの経路情報を返します。
    #[inline(always)]
    pub fn path(&self, id: NodeId) -> PathState {
        self.paths[id.0]
    }

    /// ノードが消費する入力の部分文字列（読み）を返します。
    ///
    /// BOS/EOSの場合は`None`を返します。
    pub fn key(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id);
        if node.is_invisible() {
            None
        } else {
            Some(self.sent.substr(node.range_char()))
        }
    }

    /// 指定位置から始まる部分文字列を返します。
    #[inline(always)]
    pub(crate) fn suffix(&self, pos_char: usize) -> &str {
        self.sent.suffix(pos_char)
    }

    /// 文字位置からバイト位置に変換します。
    #[inline(always)]
    pub(crate) fn byte_position(&self, pos_char: usize) -> usize {
        self.sent.byte_position(pos_char)
    }

    /// ラティスに新しい単語ノードを挿入します。
    ///
    /// ノードは`begin_index[start]`と`begin_index[start + 読みの文字数]`の各リストの
    /// 先頭ノード（未知語ノード）の直後に連結されるため、同じ位置のノードは
    /// 未知語ノード、後から挿入されたノードの順に並びます。
    ///
    /// # 引数
    ///
    /// * `start` - ノードの開始位置（文字単位）
    /// * `key` - 読み。入力の`start`以降の接頭辞でなければなりません。
    /// * `value` - 表記
    /// * `param` - 単語パラメータ
    ///
    /// # パニック
    ///
    /// 読みが空の場合や、ノードが入力の末尾を超える場合にパニックします。
    pub fn insert<V>(&mut self, start: usize, key: &str, value: V, param: WordParam) -> NodeId
    where
        V: Into<String>,
    {
        let len = key.chars().count();
        let end = start + len;
        assert!(len != 0, "the key of a node must not be empty");
        assert!(
            end <= self.len_char(),
            "a node [{start}, {end}) exceeds the input length {}",
            self.len_char()
        );
        debug_assert!(self.suffix(start).starts_with(key));

        let id = self.push_node(NodeKind::Word, start..end, value.into(), param);

        let begin_head = Self::unknown_node(start);
        self.nodes[id.0].begin_next = self.nodes[begin_head.0].begin_next;
        self.nodes[begin_head.0].begin_next = Some(id);

        let end_head = Self::unknown_node(end - 1);
        self.nodes[id.0].end_next = self.nodes[end_head.0].end_next;
        self.nodes[end_head.0].end_next = Some(id);

        id
    }

    /// 位置`pos`の未知語ノード。BOSの直後に位置順で格納されています。
    #[inline(always)]
    const fn unknown_node(pos: usize) -> NodeId {
        NodeId(pos + 1)
    }

    /// 指定位置から始まるノードのイテレータを返します。
    ///
    /// 入力の末尾の位置ではEOSのみを返します。
    pub fn begin_nodes(&self, position: usize) -> NodeIter<'_> {
        NodeIter {
            lattice: self,
            next: self.begin_index.get(position).copied().flatten(),
            link: Link::Begin,
        }
    }

    /// 指定位置で終わるノードのイテレータを返します。
    ///
    /// 位置0ではBOSのみを返します。
    pub fn end_nodes(&self, position: usize) -> NodeIter<'_> {
        NodeIter {
            lattice: self,
            next: self.end_index.get(position).copied().flatten(),
            link: Link::End,
        }
    }

    /// 各ノードへ到達する最小コストを前向きに計算します。
    ///
    /// 位置の昇順に処理するため、あるノードの左側の候補はすべて確定済みです。
    ///
    /// # エラー
    ///
    /// 文脈IDが接続コスト行列の範囲外の場合にエラーを返します。
    pub fn compute_min_costs<C>(&mut self, connector: &C) -> Result<()>
    where
        C: ConnectorCost,
    {
        for position in 0..=self.len_char() {
            let mut cursor = self.begin_index[position];
            while let Some(right) = cursor {
                let right_node = &self.nodes[right.0];
                let param = right_node.param;
                cursor = right_node.begin_next;

                if let Some((min_node, min_cost)) =
                    self.search_min_node(position, param.left_id, connector)?
                {
                    let state = &mut self.paths[right.0];
                    state.prev = Some(min_node);
                    state.cost = Some(min_cost.saturating_add(i32::from(param.word_cost)));
                }
            }
        }
        Ok(())
    }

    fn search_min_node<C>(
        &self,
        position: usize,
        left_id: u16,
        connector: &C,
    ) -> Result<Option<(NodeId, i32)>>
    where
        C: ConnectorCost,
    {
        let mut min = None;
        for left_node in self.end_nodes(position) {
            let Some(left_cost) = self.paths[left_node.id.0].cost else {
                continue;
            };
            let conn_cost = connector.cost(left_node.param.right_id, left_id)?;
            let new_cost = left_cost.saturating_add(conn_cost);
            // コストが等しい場合は終了位置のリストで先に現れるノードを優先します。
            if min.is_none_or(|(_, min_cost)| new_cost < min_cost) {
                min = Some((left_node.id, new_cost));
            }
        }
        debug_assert!(min.is_some());
        Ok(min)
    }

    /// EOSから最小コストの経路を逆にたどり、各ノードに直後のノードを設定します。
    ///
    /// # 戻り値
    ///
    /// BOSまでたどり着けた場合は`true`
    pub fn backtrace(&mut self) -> bool {
        let mut node = self.eos;
        while let Some(prev) = self.paths[node.0].prev {
            self.paths[prev.0].next = Some(node);
            node = prev;
        }
        node == self.bos
    }

    /// 最良経路上のノードを先頭から順に返します。
    ///
    /// BOS/EOSは含まれません。変換が実行されていない場合は空になります。
    pub fn best_path(&self) -> BestPath<'_> {
        BestPath {
            lattice: self,
            next: self.paths[self.bos.0].next,
        }
    }
}

impl std::fmt::Debug for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lattice {{ input: {:?}, begin_nodes: [", self.input())?;
        for i in 0..=self.len_char() {
            let values: Vec<_> = self.begin_nodes(i).map(Node::value).collect();
            writeln!(f, "{i} => {values:?}")?;
        }
        writeln!(f, "]}}")
    }
}

#[derive(Clone, Copy)]
enum Link {
    Begin,
    End,
}

/// 同じ位置を共有するノードのリストをたどるイテレータ。
#[derive(Clone)]
pub struct NodeIter<'a> {
    lattice: &'a Lattice,
    next: Option<NodeId>,
    link: Link,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.lattice.node(self.next?);
        self.next = match self.link {
            Link::Begin => node.begin_next,
            Link::End => node.end_next,
        };
        Some(node)
    }
}

/// 最良経路上のノードをたどるイテレータ。
#[derive(Clone)]
pub struct BestPath<'a> {
    lattice: &'a Lattice,
    next: Option<NodeId>,
}

impl<'a> Iterator for BestPath<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.lattice.node(self.next?);
        if node.is_invisible() {
            self.next = None;
            return None;
        }
        self.next = self.lattice.paths[node.id.0].next;
        Some(node)
    }
}
