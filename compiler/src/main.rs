//! tinymozc 辞書コンパイラのメインエントリーポイント
//!
//! 変換エンジンが読み込む接続コスト行列とシステム辞書を生成するための
//! サブコマンドを提供します。

mod dict;
mod matrix;

use clap::Parser;
use thiserror::Error;

use crate::{dict::DictError, matrix::MatrixError};

/// コマンドライン引数の構造体
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// テキスト形式の接続コスト行列をzlibで圧縮します
    Matrix(matrix::Args),

    /// 分割されたテキスト辞書を結合し、Zstandardで圧縮します
    Dict(dict::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
#[derive(Debug, Error)]
pub enum CompileError {
    /// 行列のビルド中のエラー
    #[error(transparent)]
    MatrixError(#[from] MatrixError),
    /// 辞書のビルド中のエラー
    #[error(transparent)]
    DictError(#[from] DictError),
}

fn main() -> Result<(), CompileError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Matrix(args) => Ok(matrix::run(args)?),
        Command::Dict(args) => Ok(dict::run(args)?),
    }
}
