//! テキスト形式のシステム辞書
//!
//! 辞書の全エントリをメモリ上に保持し、前方一致検索を線形探索で行います。
//! Mozcの辞書は`dictionary00.txt`から`dictionary09.txt`に分割されているため、
//! 複数のファイルを[`SystemDictionary::extend`]で結合できます。

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv_core::ReadFieldResult;

use crate::connector::ConnectorView;
use crate::dictionary::{Dictionary, LexMatch, WordParam};
use crate::errors::{MozcError, Result};

const FORMAT_NAME: &str = "dictionary";

/// 辞書のエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// 読み
    pub reading: String,
    /// 単語パラメータ
    pub param: WordParam,
    /// 表記
    pub surface: String,
}

impl DictionaryEntry {
    /// 新しいエントリを作成します。
    pub fn new<R, S>(reading: R, param: WordParam, surface: S) -> Self
    where
        R: Into<String>,
        S: Into<String>,
    {
        Self {
            reading: reading.into(),
            param,
            surface: surface.into(),
        }
    }

    #[inline(always)]
    fn as_match(&self) -> LexMatch<'_> {
        LexMatch::new(&self.reading, &self.surface, self.param)
    }
}

/// 線形探索によるシステム辞書
#[derive(Debug, Default, Clone)]
pub struct SystemDictionary {
    entries: Vec<DictionaryEntry>,
}

impl SystemDictionary {
    /// エントリのリストから新しいインスタンスを構築します。
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DictionaryEntry>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// タブ区切りの辞書ファイルから新しいインスタンスを構築します。
    ///
    /// # 引数
    ///
    /// * `rdr` - 辞書ファイルのリーダー
    ///
    /// # エラー
    ///
    /// ファイルフォーマットが不正な場合にエラーを返します。
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;
        let text = std::str::from_utf8(&buf)?;

        Ok(Self {
            entries: Self::parse_tsv(text)?,
        })
    }

    /// Zstandardで圧縮された辞書ファイルから新しいインスタンスを構築します。
    pub fn from_zstd<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        Self::from_reader(zstd::Decoder::new(rdr)?)
    }

    /// ファイルパスから辞書を読み込みます。
    ///
    /// 拡張子が`zst`の場合はZstandardで圧縮されたファイルとして扱います。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let rdr = BufReader::new(File::open(path)?);
        let dict = if path.extension().is_some_and(|ext| ext == "zst") {
            Self::from_zstd(rdr)?
        } else {
            Self::from_reader(rdr)?
        };
        log::info!(
            "Loaded {} dictionary entries from {}",
            dict.len(),
            path.display()
        );
        Ok(dict)
    }

    /// 別の辞書のエントリを末尾に追加します。
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// すべてのエントリを返します。
    #[inline(always)]
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// エントリ数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// エントリが空かどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 文脈IDがコネクターで有効かどうかをチェックします。
    ///
    /// 辞書と接続コスト行列の文法が一致しているかを事前に確認するために使用します。
    ///
    /// # 戻り値
    ///
    /// すべてのIDが有効な場合は `true`
    pub fn verify<C>(&self, conn: &C) -> bool
    where
        C: ConnectorView,
    {
        self.entries.iter().all(|e| {
            usize::from(e.param.left_id) < conn.num_left()
                && usize::from(e.param.right_id) < conn.num_right()
        })
    }

    fn parse_tsv(text: &str) -> Result<Vec<DictionaryEntry>> {
        let mut entries = vec![];
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields = parse_tsv_row(line)?;
            if fields.len() < 5 {
                let msg = format!(
                    "A row of the dictionary must have five items, line {}: {:?}",
                    i + 1,
                    line
                );
                return Err(MozcError::invalid_format(FORMAT_NAME, msg));
            }
            if fields[0].is_empty() {
                log::warn!("Skipped an empty reading, line {}: {:?}", i + 1, line);
                continue;
            }
            let param = WordParam::new(fields[1].parse()?, fields[2].parse()?, fields[3].parse()?);
            entries.push(DictionaryEntry::new(
                fields[0].as_str(),
                param,
                fields[4].as_str(),
            ));
        }
        Ok(entries)
    }
}

impl Dictionary for SystemDictionary {
    fn lookup_prefix<'a>(&'a self, input: &'a str) -> impl Iterator<Item = LexMatch<'a>> + 'a {
        self.entries
            .iter()
            .filter(move |e| !e.reading.is_empty() && input.starts_with(e.reading.as_str()))
            .map(DictionaryEntry::as_match)
    }
}

/// タブ区切りの行を解析してフィールドのベクターに分割する
fn parse_tsv_row(row: &str) -> Result<Vec<String>> {
    let mut fields = vec![];
    let mut rdr = csv_core::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .build();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let end = match result {
            ReadFieldResult::InputEmpty => true,
            ReadFieldResult::Field { record_end } => record_end,
            ReadFieldResult::OutputFull => {
                return Err(MozcError::invalid_format(FORMAT_NAME, "Field too large"));
            }
            ReadFieldResult::End => break,
        };
        fields.push(std::str::from_utf8(&output[..nout])?.to_string());
        if end {
            break;
        }
        bytes = &bytes[nin..];
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_row() {
        assert_eq!(
            parse_tsv_row("もんだい\t1\t2\t3\t問題").unwrap(),
            vec!["もんだい", "1", "2", "3", "問題"]
        );
    }

    #[test]
    fn test_parse_tsv_row_keeps_quotes() {
        assert_eq!(
            parse_tsv_row("いんよう\t1\t2\t3\t\"引用\"").unwrap(),
            vec!["いんよう", "1", "2", "3", "\"引用\""]
        );
    }

    #[test]
    fn test_from_reader() {
        let data = "しぜん\t10\t20\t300\t自然\nげんご\t11\t21\t400\t言語\n";
        let dict = SystemDictionary::from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            dict.entries(),
            &[
                DictionaryEntry::new("しぜん", WordParam::new(10, 20, 300), "自然"),
                DictionaryEntry::new("げんご", WordParam::new(11, 21, 400), "言語"),
            ]
        );
    }

    #[test]
    fn test_from_reader_skips_blank_lines() {
        let data = "\nしぜん\t10\t20\t300\t自然\r\n\n";
        let dict = SystemDictionary::from_reader(data.as_bytes()).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.entries()[0].surface, "自然");
    }

    #[test]
    fn test_from_reader_empty_reading() {
        let data = "しぜん\t10\t20\t300\t自然\n\t11\t21\t400\t言語";
        let dict = SystemDictionary::from_reader(data.as_bytes()).unwrap();
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_from_reader_few_cols() {
        let data = "しぜん\t10\t20";
        let result = SystemDictionary::from_reader(data.as_bytes());
        assert!(matches!(result, Err(MozcError::InvalidFormat(_))));
    }

    #[test]
    fn test_from_reader_invalid_left_id() {
        let data = "しぜん\t-2\t20\t300\t自然";
        let result = SystemDictionary::from_reader(data.as_bytes());
        assert!(matches!(result, Err(MozcError::ParseInt(_))));
    }

    #[test]
    fn test_from_reader_invalid_cost() {
        let data = "しぜん\t10\t20\tコスト\t自然";
        let result = SystemDictionary::from_reader(data.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_prefix() {
        let dict = SystemDictionary::from_entries([
            DictionaryEntry::new("は", WordParam::new(1, 1, 10), "歯"),
            DictionaryEntry::new("はいしゃ", WordParam::new(2, 2, 20), "歯医者"),
            DictionaryEntry::new("いしゃ", WordParam::new(3, 3, 30), "医者"),
        ]);
        let surfaces: Vec<_> = dict.lookup_prefix("はいしゃ").map(|m| m.surface).collect();
        assert_eq!(surfaces, vec!["歯", "歯医者"]);
        assert_eq!(dict.lookup_prefix("しゃ").count(), 0);
    }

    #[test]
    fn test_extend() {
        let mut dict = SystemDictionary::from_entries([DictionaryEntry::new(
            "は",
            WordParam::new(1, 1, 10),
            "歯",
        )]);
        dict.extend(SystemDictionary::from_entries([DictionaryEntry::new(
            "は",
            WordParam::new(1, 1, 20),
            "葉",
        )]));
        let surfaces: Vec<_> = dict.lookup_prefix("は").map(|m| m.surface).collect();
        assert_eq!(surfaces, vec!["歯", "葉"]);
    }
}
