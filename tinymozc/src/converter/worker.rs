//! 変換処理のためのルーチンを提供するモジュール。
//!
//! ワーカーはラティスを保持し、再利用することで不要なメモリアロケーションを避けます。
use crate::connector::ConnectorCost;
use crate::converter::Converter;
use crate::converter::lattice::{Lattice, NodeId};
use crate::dictionary::Dictionary;
use crate::errors::Result;
use crate::token::{Token, TokenIter};

/// 変換処理のためのルーチンを提供する構造体。
///
/// # 例
///
/// ```
/// use tinymozc::{ConnectionCostTable, Converter, DictionaryEntry, SystemDictionary, WordParam};
///
/// let dict = SystemDictionary::from_entries([
///     DictionaryEntry::new("にほん", WordParam::new(1, 1, 100), "日本"),
/// ]);
/// let matrix = ConnectionCostTable::new(2, vec![0, 0, 0, 0])?;
/// let converter = Converter::new(dict, matrix).unknown_word_param(WordParam::new(1, 1, 1000));
///
/// let mut worker = converter.new_worker();
/// worker.reset_sentence("にほんへ");
/// worker.convert()?;
///
/// let values: Vec<_> = worker.values().collect();
/// assert_eq!(values, ["日本", "へ"]);
/// assert!(worker.token(1).is_unknown());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Worker<D, C> {
    converter: Converter<D, C>,
    input: String,
    lattice: Lattice,
    top_nodes: Vec<NodeId>,
    /// ラティスが単語ノードまたは経路情報を含むかどうか
    dirty: bool,
    /// 直近の変換が成功したかどうか
    converted: bool,
}

impl<D, C> Worker<D, C>
where
    D: Dictionary,
    C: ConnectorCost,
{
    pub(crate) fn new(converter: Converter<D, C>) -> Self {
        let lattice = Lattice::with_unknown_param("", converter.unk_param());
        Self {
            converter,
            input: String::new(),
            lattice,
            top_nodes: vec![],
            dirty: false,
            converted: false,
        }
    }

    /// 変換する入力文をリセットします。
    ///
    /// 以前の変換結果は破棄されます。
    ///
    /// # 引数
    ///
    /// * `input` - 変換する読み
    pub fn reset_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.input.clear();
        self.input.push_str(input.as_ref());
        self.lattice.reset(&self.input);
        self.top_nodes.clear();
        self.dirty = false;
        self.converted = false;
    }

    /// 設定された入力文を変換します。
    ///
    /// 結果は内部に保存され、[`Worker::token`]や[`Worker::token_iter`]で参照できます。
    /// 空の入力に対しては何も出力しません。
    ///
    /// # エラー
    ///
    /// 文脈IDが接続コスト行列の範囲外の場合にエラーを返します。
    /// このとき変換結果は空になります。
    pub fn convert(&mut self) -> Result<()> {
        // 同じ文に対する前回の変換で追加された単語ノードを破棄します。
        if self.dirty {
            self.lattice.reset(&self.input);
        }
        self.top_nodes.clear();
        self.converted = false;
        self.dirty = true;
        self.converter.build_lattice(&self.input, &mut self.lattice)?;
        let reached = self.lattice.backtrace();
        debug_assert!(reached);
        self.top_nodes
            .extend(self.lattice.best_path().map(|node| node.id()));
        self.converted = true;
        Ok(())
    }

    /// 変換結果のトークン数を返します。
    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.top_nodes.len()
    }

    /// `i`番目のトークンを返します。
    ///
    /// # パニック
    ///
    /// `i`がトークン数以上の場合にパニックします。
    #[inline(always)]
    pub fn token(&self, i: usize) -> Token<'_> {
        Token::new(&self.lattice, self.top_nodes[i])
    }

    /// 変換結果のトークンのイテレータを返します。
    #[inline(always)]
    pub fn token_iter(&self) -> TokenIter<'_> {
        TokenIter::new(&self.lattice, &self.top_nodes)
    }

    /// 変換後の表記を順に返します。
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.top_nodes
            .iter()
            .map(|&id| self.lattice.node(id).value())
    }

    /// BOSからEOSまでの最小コストを返します。
    ///
    /// 変換が実行されていない場合や、直近の変換が失敗した場合は`None`を返します。
    #[inline(always)]
    pub fn total_cost(&self) -> Option<i32> {
        if self.converted {
            self.lattice.path(self.lattice.eos()).cost
        } else {
            None
        }
    }

    /// 直近の変換で構築されたラティスへの参照を返します。
    #[inline(always)]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
}
