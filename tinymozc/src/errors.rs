//! エラー型の定義
//!
//! このモジュールは、tinymozcで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt;

/// tinymozc専用のResult型
///
/// エラー型としてデフォルトで[`MozcError`]を使用します。
pub type Result<T, E = MozcError> = std::result::Result<T, E>;

/// tinymozcのエラー型
///
/// 変換エンジンで発生する可能性のあるすべてのエラーを表現します。
#[derive(Debug, thiserror::Error)]
pub enum MozcError {
    /// 無効なフォーマットエラー
    ///
    /// 接続コスト行列や辞書ファイルが解釈できない場合に発生します。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 文脈IDの範囲外エラー
    ///
    /// 辞書の文脈IDが接続コスト行列の範囲に収まらない場合に発生します。
    /// 辞書と行列の文法が一致していないことを示します。
    #[error(transparent)]
    ContextIdOutOfRange(ContextIdError),

    /// 整数パースエラー
    #[error(transparent)]
    ParseInt(std::num::ParseIntError),

    /// UTF-8エンコーディングエラー
    #[error(transparent)]
    Utf8(std::str::Utf8Error),

    /// 標準I/Oエラー
    #[error(transparent)]
    StdIo(#[from] std::io::Error),
}

impl MozcError {
    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 文脈IDの範囲外エラーを生成します
    ///
    /// # 引数
    ///
    /// * `right_id` - 左側ノードの右文脈ID
    /// * `left_id` - 右側ノードの左文脈ID
    /// * `num_ids` - 接続コスト行列が扱える文脈IDの数
    pub(crate) const fn context_id_out_of_range(right_id: u16, left_id: u16, num_ids: usize) -> Self {
        Self::ContextIdOutOfRange(ContextIdError {
            right_id,
            left_id,
            num_ids,
        })
    }
}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 文脈IDが接続コスト行列の範囲外の場合に使用されるエラー
#[derive(Debug)]
pub struct ContextIdError {
    pub(crate) right_id: u16,
    pub(crate) left_id: u16,
    pub(crate) num_ids: usize,
}

impl ContextIdError {
    /// 参照された右文脈IDを返します。
    pub const fn right_id(&self) -> u16 {
        self.right_id
    }

    /// 参照された左文脈IDを返します。
    pub const fn left_id(&self) -> u16 {
        self.left_id
    }

    /// 接続コスト行列が扱える文脈IDの数を返します。
    pub const fn num_ids(&self) -> usize {
        self.num_ids
    }
}

impl fmt::Display for ContextIdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ContextIdError: (right_id={}, left_id={}) is out of range for {} context ids",
            self.right_id, self.left_id, self.num_ids
        )
    }
}

impl Error for ContextIdError {}

impl From<std::num::ParseIntError> for MozcError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::ParseInt(error)
    }
}

impl From<std::str::Utf8Error> for MozcError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::Utf8(error)
    }
}
