//! かな漢字変換を実行するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだ読みを1行ずつ変換し、
//! 指定された出力形式（plain、wakati、detail）で結果を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use tinymozc::common::{UNKNOWN_CONNECTION_ID, UNKNOWN_WORD_COST};
use tinymozc::{ConnectionCostTable, Converter, SystemDictionary, WordParam};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Plain,
    Wakati,
    Detail,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "plain" => Ok(Self::Plain),
            "wakati" => Ok(Self::Wakati),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "convert", about = "Converts kana into kanji")]
struct Args {
    /// System dictionary files in TSV (zstd if the extension is .zst). Can be repeated.
    #[clap(short = 'd', long, required = true)]
    dictionary: Vec<PathBuf>,

    /// Connection cost matrix compressed with zlib.
    #[clap(short = 'c', long)]
    connection: PathBuf,

    /// Output mode. Choices are plain, wakati, and detail.
    #[clap(short = 'O', long, default_value = "plain")]
    output_mode: OutputMode,

    /// Context id of unknown nodes.
    #[clap(long, default_value_t = UNKNOWN_CONNECTION_ID)]
    unk_id: u16,

    /// Word cost of unknown nodes.
    #[clap(long, default_value_t = UNKNOWN_WORD_COST)]
    unk_cost: i16,
}

/// メイン関数
///
/// 辞書と接続コスト行列をロードし、標準入力から読み込んだ読みを変換して、
/// 指定された形式で結果を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let mut dict = SystemDictionary::default();
    for path in &args.dictionary {
        dict.extend(SystemDictionary::from_path(path)?);
    }
    let matrix = ConnectionCostTable::from_path(&args.connection)?;
    if !dict.verify(&matrix) {
        eprintln!(
            "Warning: the dictionary has context ids out of the {0}x{0} matrix.",
            matrix.size()
        );
    }

    let converter = Converter::new(dict, matrix).unknown_word_param(WordParam::new(
        args.unk_id,
        args.unk_id,
        args.unk_cost,
    ));
    let mut worker = converter.new_worker();

    eprintln!("Ready to convert");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        worker.reset_sentence(line);
        worker.convert()?;
        match args.output_mode {
            OutputMode::Plain => {
                for value in worker.values() {
                    out.write_all(value.as_bytes())?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Wakati => {
                for (i, value) in worker.values().enumerate() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(value.as_bytes())?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Detail => {
                for t in worker.token_iter() {
                    writeln!(
                        &mut out,
                        "{}\t{}\tunknown={}\tleft_id={}\tright_id={}\tword_cost={}\ttotal_cost={}",
                        t.key(),
                        t.value(),
                        t.is_unknown(),
                        t.left_id(),
                        t.right_id(),
                        t.word_cost(),
                        t.total_cost(),
                    )?;
                }
                out.write_all(b"EOS\n")?;
            }
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
