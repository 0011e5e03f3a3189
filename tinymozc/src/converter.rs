//! ビタビアルゴリズムに基づくかな漢字変換器。
//!
//! 入力された読みに対して辞書を引いてラティスを構築し、接続コストと単語コストの和が
//! 最小となる経路を求めて、変換後の表記の列を出力します。
//!
//! # 主要な構造体
//!
//! - [`Converter`]: 辞書と接続コスト行列を保持する変換器
//! - [`Worker`]: 変換器のワーカー。ラティスを再利用しながら実際の変換を行う
//!
//! # 例
//!
//! ```
//! use tinymozc::{ConnectionCostTable, Converter, DictionaryEntry, SystemDictionary, WordParam};
//!
//! let dict = SystemDictionary::from_entries([
//!     DictionaryEntry::new("しぜん", WordParam::new(1, 1, 100), "自然"),
//!     DictionaryEntry::new("げんご", WordParam::new(1, 1, 100), "言語"),
//! ]);
//! let matrix = ConnectionCostTable::new(2, vec![0, 10, 10, 0])?;
//! let converter = Converter::new(dict, matrix).unknown_word_param(WordParam::new(0, 0, 10000));
//!
//! assert_eq!(converter.convert("しぜんげんご")?, vec!["自然", "言語"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod lattice;
pub mod worker;

use std::sync::Arc;

use crate::common::{UNKNOWN_CONNECTION_ID, UNKNOWN_WORD_COST};
use crate::connector::ConnectorCost;
use crate::converter::lattice::Lattice;
use crate::converter::worker::Worker;
use crate::dictionary::{Dictionary, WordParam};
use crate::errors::Result;

/// かな漢字変換を行う変換器。
///
/// 辞書と接続コスト行列は[`Arc`]で共有されるため、クローンは軽量です。
/// 各[`Worker`]が独立したラティスを持つので、複数のワーカーを別々のスレッドで
/// 同時に動かすことができます。
///
/// # 型パラメータ
///
/// * `D` - 前方一致検索を提供する辞書
/// * `C` - 接続コストを提供するコネクター
pub struct Converter<D, C> {
    dict: Arc<D>,
    connector: Arc<C>,
    unk_param: WordParam,
}

impl<D, C> Clone for Converter<D, C> {
    fn clone(&self) -> Self {
        Self {
            dict: Arc::clone(&self.dict),
            connector: Arc::clone(&self.connector),
            unk_param: self.unk_param,
        }
    }
}

impl<D, C> Converter<D, C>
where
    D: Dictionary,
    C: ConnectorCost,
{
    /// 新しい変換器を作成します。
    ///
    /// 複数の変換器で辞書を共有する場合は[`Converter::from_shared`]を使用してください。
    ///
    /// # 引数
    ///
    /// * `dict` - 変換に使用する辞書
    /// * `connector` - 接続コスト行列
    pub fn new(dict: D, connector: C) -> Self {
        Self::from_shared(Arc::new(dict), Arc::new(connector))
    }

    /// 共有された辞書と接続コスト行列から新しい変換器を作成します。
    pub fn from_shared(dict: Arc<D>, connector: Arc<C>) -> Self {
        Self {
            dict,
            connector,
            unk_param: WordParam::new(UNKNOWN_CONNECTION_ID, UNKNOWN_CONNECTION_ID, UNKNOWN_WORD_COST),
        }
    }

    /// 未知語ノードの文脈IDとコストを指定します。
    ///
    /// デフォルトでは文脈IDは[`UNKNOWN_CONNECTION_ID`]、コストは[`UNKNOWN_WORD_COST`]です。
    /// 文脈IDは接続コスト行列の範囲内でなければなりません。
    pub fn unknown_word_param(mut self, param: WordParam) -> Self {
        self.unk_param = param;
        self
    }

    /// 辞書への参照を返します。
    #[inline(always)]
    pub fn dictionary(&self) -> &D {
        &self.dict
    }

    /// 接続コスト行列への参照を返します。
    #[inline(always)]
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// 新しいワーカーを作成します。
    pub fn new_worker(&self) -> Worker<D, C> {
        Worker::new(self.clone())
    }

    /// 入力文字列を変換し、最小コストの経路上の表記を順に返します。
    ///
    /// 繰り返し変換する場合は[`Converter::new_worker`]でワーカーを作成して
    /// 再利用するほうが効率的です。
    ///
    /// # 引数
    ///
    /// * `input` - 変換する読み
    ///
    /// # エラー
    ///
    /// 辞書または未知語の文脈IDが接続コスト行列の範囲外の場合、
    /// [`MozcError::ContextIdOutOfRange`](crate::errors::MozcError::ContextIdOutOfRange)を返します。
    pub fn convert<S>(&self, input: S) -> Result<Vec<String>>
    where
        S: AsRef<str>,
    {
        let mut worker = self.new_worker();
        worker.reset_sentence(input);
        worker.convert()?;
        Ok(worker.values().map(str::to_string).collect())
    }

    #[inline(always)]
    pub(crate) const fn unk_param(&self) -> WordParam {
        self.unk_param
    }

    /// 入力の各位置で辞書を引き、ラティスに単語ノードを追加した後、
    /// 各ノードの最小コストを計算します。
    ///
    /// `lattice`は`input`でリセット済みでなければなりません。
    pub(crate) fn build_lattice(&self, input: &str, lattice: &mut Lattice) -> Result<()> {
        debug_assert_eq!(input, lattice.input());

        for pos in 0..lattice.len_char() {
            let suffix = &input[lattice.byte_position(pos)..];
            for m in self.dict.lookup_prefix(suffix) {
                lattice.insert(pos, m.reading, m.surface, m.param);
            }
        }
        log::debug!(
            "Built a lattice with {} nodes for {} characters",
            lattice.num_nodes(),
            lattice.len_char()
        );

        lattice.compute_min_costs(self.connector.as_ref())
    }
}
