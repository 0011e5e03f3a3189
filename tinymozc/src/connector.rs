//! 接続コスト計算のためのコネクター
//!
//! このモジュールは、品詞（文脈ID）間の接続コストを保持する正方行列と、
//! それを利用するためのトレイトを提供します。
//!
//! # フォーマット
//!
//! 接続コスト行列はzlibで圧縮されたテキストとして保存されます。展開後の内容は
//! 1行に1つの10進整数を並べたもので、先頭の値が行列の大きさ`size`、
//! 続く`size * size`個の値が右文脈IDを行、左文脈IDを列とする行優先の行列です。
//!
//! ```text
//! 2652
//! 0
//! 5765
//! 4872
//! ...
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::errors::{MozcError, Result};

const FORMAT_NAME: &str = "connection";

/// コネクターのビュー機能を提供するトレイト
pub trait ConnectorView {
    /// 左文脈IDの最大数を返します。
    fn num_left(&self) -> usize;

    /// 右文脈IDの最大数を返します。
    fn num_right(&self) -> usize;
}

/// 接続コスト計算機能を提供するトレイト
pub trait ConnectorCost: ConnectorView {
    /// 接続行列の値を取得します。
    ///
    /// # 引数
    ///
    /// * `right_id` - 左側ノードの右文脈ID
    /// * `left_id` - 右側ノードの左文脈ID
    ///
    /// # エラー
    ///
    /// いずれかのIDが範囲外の場合、[`MozcError::ContextIdOutOfRange`]を返します。
    fn cost(&self, right_id: u16, left_id: u16) -> Result<i32>;
}

/// 接続コストの正方行列
///
/// 一度読み込んだ後は変更されないため、複数の変換処理から同時に参照できます。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionCostTable {
    /// 接続コストデータの平坦化された配列
    data: Vec<i16>,
    /// 文脈IDの数
    size: usize,
}

impl ConnectionCostTable {
    /// 行列の大きさとコストの配列から新しいインスタンスを作成します。
    ///
    /// # 引数
    ///
    /// * `size` - 文脈IDの数
    /// * `data` - 右文脈IDを行とする行優先の`size * size`個のコスト
    ///
    /// # エラー
    ///
    /// 大きさが不正な場合、要素数が一致しない場合、負のコストを含む場合に
    /// [`MozcError::InvalidFormat`]を返します。
    pub fn new(size: usize, data: Vec<i16>) -> Result<Self> {
        if size == 0 || size > usize::from(u16::MAX) + 1 {
            return Err(MozcError::invalid_format(
                FORMAT_NAME,
                format!("matrix size must be in 1..=65536, got {size}"),
            ));
        }
        if data.len() != size * size {
            return Err(MozcError::invalid_format(
                FORMAT_NAME,
                format!(
                    "expected {} costs for a {size}x{size} matrix, got {}",
                    size * size,
                    data.len()
                ),
            ));
        }
        if let Some(pos) = data.iter().position(|&c| c < 0) {
            return Err(MozcError::invalid_format(
                FORMAT_NAME,
                format!("negative cost {} at index {pos}", data[pos]),
            ));
        }
        Ok(Self { data, size })
    }

    /// 圧縮されたバイト列から行列を読み込みます。
    ///
    /// # エラー
    ///
    /// 展開またはパースに失敗した場合、[`MozcError::InvalidFormat`]を返します。
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }

    /// zlibで圧縮されたストリームから行列を読み込みます。
    ///
    /// # 引数
    ///
    /// * `rdr` - 圧縮された行列のリーダー
    ///
    /// # エラー
    ///
    /// 展開またはパースに失敗した場合、zlibストリームの後にデータが続く場合に
    /// [`MozcError::InvalidFormat`]を返します。
    /// 読み込み自体が失敗した場合は[`MozcError::StdIo`]を返します。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut payload = vec![];
        let mut decoder = ZlibDecoder::new(BufReader::new(rdr));
        decoder.read_to_end(&mut payload).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => {
                MozcError::invalid_format(FORMAT_NAME, format!("failed to inflate: {e}"))
            }
            _ => MozcError::from(e),
        })?;

        // ファイルは単一のzlibストリームのみで構成されます。
        if !decoder.into_inner().fill_buf()?.is_empty() {
            return Err(MozcError::invalid_format(
                FORMAT_NAME,
                "trailing data after the zlib stream",
            ));
        }
        Self::parse(&payload)
    }

    /// 圧縮されていないテキスト形式の行列を読み込みます。
    ///
    /// Mozcの`connection_single_column.txt`と同じ形式です。
    pub fn from_text_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut payload = vec![];
        rdr.read_to_end(&mut payload)?;
        Self::parse(&payload)
    }

    /// 圧縮された行列ファイルを読み込みます。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let table = Self::from_reader(BufReader::new(File::open(path)?))?;
        log::info!(
            "Loaded a {0}x{0} connection matrix from {1}",
            table.size,
            path.display()
        );
        Ok(table)
    }

    fn parse(payload: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(payload).map_err(|e| {
            MozcError::invalid_format(FORMAT_NAME, format!("payload is not UTF-8: {e}"))
        })?;
        let mut tokens = text.split_ascii_whitespace();

        let size_token = tokens
            .next()
            .ok_or_else(|| MozcError::invalid_format(FORMAT_NAME, "empty payload"))?;
        let size: usize = size_token.parse().map_err(|_| {
            MozcError::invalid_format(FORMAT_NAME, format!("invalid matrix size {size_token:?}"))
        })?;

        // 壊れた`size`で巨大な領域を確保しないよう、ペイロード長で上限を設けます。
        let mut data = Vec::with_capacity(size.saturating_mul(size).min(text.len() / 2));
        for token in tokens {
            let cost: i16 = token.parse().map_err(|_| {
                MozcError::invalid_format(FORMAT_NAME, format!("invalid cost {token:?}"))
            })?;
            data.push(cost);
        }

        Self::new(size, data)
    }

    /// 行列をzlibで圧縮して書き出します。
    ///
    /// 出力は[`ConnectionCostTable::from_reader`]で読み込める形式です。
    ///
    /// # 引数
    ///
    /// * `wtr` - 書き込み先
    pub fn write<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        let mut encoder = ZlibEncoder::new(wtr, Compression::best());
        writeln!(encoder, "{}", self.size)?;
        for cost in &self.data {
            writeln!(encoder, "{cost}")?;
        }
        encoder.finish()?;
        Ok(())
    }

    /// 文脈IDの数を返します。
    #[inline(always)]
    pub const fn size(&self) -> usize {
        self.size
    }
}

impl ConnectorView for ConnectionCostTable {
    #[inline(always)]
    fn num_left(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn num_right(&self) -> usize {
        self.size
    }
}

impl ConnectorCost for ConnectionCostTable {
    #[inline(always)]
    fn cost(&self, right_id: u16, left_id: u16) -> Result<i32> {
        let (right, left) = (usize::from(right_id), usize::from(left_id));
        if right >= self.size || left >= self.size {
            return Err(MozcError::context_id_out_of_range(
                right_id, left_id, self.size,
            ));
        }
        Ok(i32::from(self.data[right * self.size + left]))
    }
}
