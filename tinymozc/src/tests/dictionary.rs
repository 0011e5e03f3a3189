use std::io::Write;

use crate::connector::{ConnectionCostTable, ConnectorView};
use crate::dictionary::*;
use crate::errors::MozcError;

const DICTIONARY_TXT: &str = include_str!("./resources/dictionary.txt");

/// 任意の数の文脈IDを受け付けるコネクター
struct IdRange(usize);

impl ConnectorView for IdRange {
    fn num_left(&self) -> usize {
        self.0
    }

    fn num_right(&self) -> usize {
        self.0
    }
}

fn load() -> SystemDictionary {
    SystemDictionary::from_reader(DICTIONARY_TXT.as_bytes()).unwrap()
}

#[test]
fn test_load() {
    let dict = load();
    assert_eq!(dict.len(), 22);
    assert_eq!(
        dict.entries()[0],
        DictionaryEntry::new("あい", WordParam::new(1851, 1851, 4582), "愛")
    );
}

#[test]
fn test_lookup_prefix() {
    let dict = load();
    let matches: Vec<_> = dict.lookup_prefix("もんだいてんが").collect();
    assert_eq!(matches.len(), 3);
    assert!(matches.iter().all(|m| "もんだいてんが".starts_with(m.reading)));

    let longest = matches
        .iter()
        .max_by_key(|m| m.surface.chars().count())
        .unwrap();
    assert_eq!(longest.surface, "問題点");
    assert_eq!(longest.reading, "もんだいてん");
    assert_eq!(longest.param, WordParam::new(1938, 2121, 3000));
}

#[test]
fn test_lookup_prefix_single_char() {
    let dict = load();
    let mut surfaces: Vec<_> = dict.lookup_prefix("き").map(|m| m.surface).collect();
    surfaces.sort_unstable();
    assert_eq!(surfaces, vec!["期", "木", "機", "気", "黄"]);
}

#[test]
fn test_lookup_prefix_no_match() {
    let dict = load();
    assert_eq!(dict.lookup_prefix("ぬ").count(), 0);
    assert_eq!(dict.lookup_prefix("").count(), 0);
}

#[test]
fn test_lookup_is_pure() {
    let dict = load();
    let first: Vec<_> = dict.lookup_prefix("にほんご").collect();
    let second: Vec<_> = dict.lookup_prefix("にほんご").collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_verify() {
    let dict = load();
    assert!(dict.verify(&IdRange(2122)));
    assert!(!dict.verify(&IdRange(2121)));

    let matrix = ConnectionCostTable::new(2, vec![0; 4]).unwrap();
    assert!(!dict.verify(&matrix));
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DICTIONARY_TXT.as_bytes()).unwrap();
    file.flush().unwrap();

    let dict = SystemDictionary::from_path(file.path()).unwrap();
    assert_eq!(dict.entries(), load().entries());
}

#[test]
fn test_from_path_zstd() {
    let mut file = tempfile::Builder::new()
        .suffix(".txt.zst")
        .tempfile()
        .unwrap();
    let compressed = zstd::encode_all(DICTIONARY_TXT.as_bytes(), 3).unwrap();
    file.write_all(&compressed).unwrap();
    file.flush().unwrap();

    let dict = SystemDictionary::from_path(file.path()).unwrap();
    assert_eq!(dict.entries(), load().entries());
}

#[test]
fn test_split_dictionaries() {
    let (head, tail) = DICTIONARY_TXT.split_at(DICTIONARY_TXT.find("もん").unwrap());
    let mut dict = SystemDictionary::from_reader(head.as_bytes()).unwrap();
    dict.extend(SystemDictionary::from_reader(tail.as_bytes()).unwrap());
    assert_eq!(dict.entries(), load().entries());
}

#[test]
fn test_invalid_utf8() {
    let result = SystemDictionary::from_reader(&b"\xff\xfe\t1\t1\t1\tx"[..]);
    assert!(matches!(result, Err(MozcError::Utf8(_))));
}
