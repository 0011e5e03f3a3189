//! 接続コスト行列のビルドモジュール
//!
//! Mozcの`connection_single_column.txt`（1行に1つの整数を並べたテキスト）を読み込み、
//! 変換エンジンが読み込むzlib圧縮形式に変換します。

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use tinymozc::errors::MozcError;
use tinymozc::ConnectionCostTable;

use clap::Parser;

/// 行列ビルドコマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "matrix",
    about = "A program to compress the connection cost matrix."
)]
pub struct Args {
    /// Connection cost matrix in text (connection_single_column.txt).
    #[clap(short = 'i', long)]
    matrix_in: PathBuf,

    /// File to which the compressed matrix is output (connection.deflate).
    #[clap(short = 'o', long)]
    matrix_out: PathBuf,
}

/// 行列のビルド中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 行列の読み込みまたは書き出しのエラー
    #[error("Matrix compilation failed: {0}")]
    Mozc(#[from] MozcError),
}

/// テキスト形式の行列を読み込み、圧縮して書き出す
///
/// # エラー
///
/// 入力ファイルが不正な場合や書き込みに失敗した場合にエラーを返します。
pub fn run(args: Args) -> Result<(), MatrixError> {
    eprintln!("Loading the matrix...");
    let rdr = BufReader::new(File::open(&args.matrix_in)?);
    let matrix = ConnectionCostTable::from_text_reader(rdr)?;
    eprintln!("Loaded a {0}x{0} matrix", matrix.size());

    eprintln!("Writing the compressed matrix...");
    let mut wtr = BufWriter::new(File::create(&args.matrix_out)?);
    matrix.write(&mut wtr)?;
    wtr.flush()?;
    eprintln!("Wrote {}", args.matrix_out.display());

    Ok(())
}
