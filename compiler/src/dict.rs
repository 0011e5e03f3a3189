//! システム辞書のビルドモジュール
//!
//! 分割されたテキスト辞書（`dictionary00.txt`から`dictionary09.txt`など）を1つに結合し、
//! Zstandardで圧縮して出力します。接続コスト行列が指定された場合は、
//! 辞書の文脈IDが行列の範囲に収まっているかを検証します。

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use tinymozc::errors::MozcError;
use tinymozc::{ConnectionCostTable, SystemDictionary};

use clap::Parser;

/// 辞書ビルドコマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "dict",
    about = "A program to merge and compress the system dictionary."
)]
pub struct Args {
    /// Dictionary files in TSV. Can be repeated.
    #[clap(short = 'i', long, required = true)]
    dictionary_in: Vec<PathBuf>,

    /// File to which the merged dictionary is output (in zstd).
    #[clap(short = 'o', long)]
    dictionary_out: PathBuf,

    /// Compressed connection cost matrix to verify context ids against.
    #[clap(short = 'm', long)]
    matrix_in: Option<PathBuf>,
}

/// 辞書のビルド中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// 辞書と行列の文脈IDが一致しない
    #[error("The dictionary has context ids out of the {0}x{0} matrix")]
    ContextIdMismatch(usize),

    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書の読み込みエラー
    #[error("Dictionary compilation failed: {0}")]
    Mozc(#[from] MozcError),
}

/// 辞書を結合して圧縮する
///
/// # エラー
///
/// 入力ファイルが不正な場合、文脈IDが行列の範囲外の場合、
/// 書き込みに失敗した場合にエラーを返します。
pub fn run(args: Args) -> Result<(), DictError> {
    eprintln!("Loading the dictionary...");
    let mut dict = SystemDictionary::default();
    for path in &args.dictionary_in {
        dict.extend(SystemDictionary::from_path(path)?);
    }
    eprintln!("Loaded {} entries", dict.len());

    if let Some(matrix_in) = &args.matrix_in {
        let matrix = ConnectionCostTable::from_path(matrix_in)?;
        if !dict.verify(&matrix) {
            return Err(DictError::ContextIdMismatch(matrix.size()));
        }
    }

    eprintln!("Writing the merged dictionary...");
    let wtr = BufWriter::new(File::create(&args.dictionary_out)?);
    let mut encoder = zstd::Encoder::new(wtr, 19)?;
    for e in dict.entries() {
        writeln!(
            encoder,
            "{}\t{}\t{}\t{}\t{}",
            e.reading, e.param.left_id, e.param.right_id, e.param.word_cost, e.surface
        )?;
    }
    encoder.finish()?.flush()?;
    eprintln!("Wrote {}", args.dictionary_out.display());

    Ok(())
}
