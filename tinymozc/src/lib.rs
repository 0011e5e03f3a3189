//! # tinymozc
//!
//! tinymozcは、ビタビアルゴリズムに基づく最小構成のかな漢字変換エンジンです。
//!
//! ## 概要
//!
//! 入力された読み（ひらがな列）に対して、辞書から前方一致で得られる単語候補を
//! ラティスに並べ、単語の出現コストと文脈ID間の接続コストの和が最小となる経路を
//! 選ぶことで変換結果を求めます。辞書に候補がない文字は、非常に大きなコストを持つ
//! 未知語ノードとしてそのまま出力されます。
//!
//! ## 主な機能
//!
//! - **接続コスト行列**: zlibで圧縮されたMozc形式の行列の読み書き
//! - **システム辞書**: タブ区切りのテキスト辞書（Zstandard圧縮にも対応）
//! - **ラティスとビタビ探索**: アリーナ上に構築されるラティスと最小コスト経路の探索
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tinymozc::{ConnectionCostTable, Converter, SystemDictionary};
//!
//! let dictionary_txt = "ろっぽんぎ\t1\t1\t10\t六本木
//! ひるず\t2\t2\t10\tヒルズ
//! ろっぽ\t1\t1\t20\t六本";
//! let matrix_txt = "3\n100\n0\n100\n100\n100\n0\n0\n100\n100";
//!
//! let dict = SystemDictionary::from_reader(dictionary_txt.as_bytes())?;
//! let matrix = ConnectionCostTable::from_text_reader(matrix_txt.as_bytes())?;
//! let converter = Converter::new(dict, matrix)
//!     .unknown_word_param(tinymozc::WordParam::new(0, 0, 10000));
//!
//! let mut worker = converter.new_worker();
//! worker.reset_sentence("ろっぽんぎひるず");
//! worker.convert()?;
//! assert_eq!(worker.num_tokens(), 2);
//!
//! let t0 = worker.token(0);
//! assert_eq!(t0.key(), "ろっぽんぎ");
//! assert_eq!(t0.value(), "六本木");
//! assert_eq!(t0.range_char(), 0..5);
//!
//! let t1 = worker.token(1);
//! assert_eq!(t1.value(), "ヒルズ");
//! assert_eq!(t1.range_byte(), 15..24);
//! assert_eq!(worker.total_cost(), Some(20));
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("`target_pointer_width` must be 32 or 64");

/// 共通の定数
pub mod common;

/// 接続コスト行列
pub mod connector;

/// ラティスとビタビ探索による変換器
pub mod converter;

/// 辞書の契約と実装
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// 文の内部表現
mod sentence;

/// トークン型の定義
pub mod token;

#[cfg(test)]
mod tests;

// Re-exports
pub use connector::{ConnectionCostTable, ConnectorCost, ConnectorView};
pub use converter::Converter;
pub use converter::worker::Worker;
pub use dictionary::{Dictionary, DictionaryEntry, LexMatch, SystemDictionary, WordParam};
pub use errors::{MozcError, Result};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
