//! tinymozcのテストモジュール群
//!
//! 接続コスト行列、辞書、変換器の動作を、リソースファイルを用いて検証します。

mod converter;
mod dictionary;
