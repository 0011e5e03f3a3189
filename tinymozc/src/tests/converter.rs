use crate::connector::{ConnectionCostTable, ConnectorCost, ConnectorView};
use crate::converter::Converter;
use crate::converter::lattice::Lattice;
use crate::dictionary::*;
use crate::errors::{MozcError, Result};

const DICTIONARY_TXT: &str = include_str!("./resources/dictionary.txt");

/// (0, 1), (1, 2), (2, 0)の接続のみコストが0で、それ以外は100となるコネクター
struct CyclicConnector;

impl ConnectorView for CyclicConnector {
    fn num_left(&self) -> usize {
        usize::from(u16::MAX) + 1
    }

    fn num_right(&self) -> usize {
        usize::from(u16::MAX) + 1
    }
}

impl ConnectorCost for CyclicConnector {
    fn cost(&self, right_id: u16, left_id: u16) -> Result<i32> {
        Ok(match (right_id, left_id) {
            (0, 1) | (1, 2) | (2, 0) => 0,
            _ => 100,
        })
    }
}

/// 文脈IDから決まる擬似的なコストを返すコネクター
struct HashedConnector;

impl ConnectorView for HashedConnector {
    fn num_left(&self) -> usize {
        usize::from(u16::MAX) + 1
    }

    fn num_right(&self) -> usize {
        usize::from(u16::MAX) + 1
    }
}

impl ConnectorCost for HashedConnector {
    fn cost(&self, right_id: u16, left_id: u16) -> Result<i32> {
        Ok((i32::from(right_id) * 7 + i32::from(left_id) * 13) % 50)
    }
}

fn roppongi_dict() -> SystemDictionary {
    SystemDictionary::from_entries([
        DictionaryEntry::new("ろっぽんぎ", WordParam::new(1, 1, 10), "六本木"),
        DictionaryEntry::new("ひるず", WordParam::new(2, 2, 10), "ヒルズ"),
        DictionaryEntry::new("ろっぽ", WordParam::new(3, 3, 20), "六本"),
    ])
}

fn resource_dict() -> SystemDictionary {
    SystemDictionary::from_reader(DICTIONARY_TXT.as_bytes()).unwrap()
}

#[test]
fn test_convert_single_word() {
    let converter = Converter::new(roppongi_dict(), CyclicConnector);
    let mut worker = converter.new_worker();
    worker.reset_sentence("ろっぽんぎ");
    worker.convert().unwrap();

    assert_eq!(worker.values().collect::<Vec<_>>(), ["六本木"]);
    assert_eq!(worker.total_cost(), Some(110));
}

#[test]
fn test_convert_two_words() {
    let converter = Converter::new(roppongi_dict(), CyclicConnector);
    assert_eq!(
        converter.convert("ろっぽんぎひるず").unwrap(),
        vec!["六本木", "ヒルズ"]
    );

    let mut worker = converter.new_worker();
    worker.reset_sentence("ろっぽんぎひるず");
    worker.convert().unwrap();
    assert_eq!(worker.total_cost(), Some(20));
}

#[test]
fn test_convert_with_cost_table() {
    let dict = SystemDictionary::from_entries([
        DictionaryEntry::new("ろっぽんぎ", WordParam::new(1, 1, 10), "六本木"),
        DictionaryEntry::new("ひるず", WordParam::new(2, 2, 10), "ヒルズ"),
        DictionaryEntry::new("ろっぽ", WordParam::new(1, 1, 20), "六本"),
    ]);
    let matrix = ConnectionCostTable::new(3, vec![100, 0, 100, 100, 100, 0, 0, 100, 100]).unwrap();
    let converter =
        Converter::new(dict, matrix).unknown_word_param(WordParam::new(0, 0, 10000));

    assert_eq!(converter.convert("ろっぽんぎ").unwrap(), vec!["六本木"]);
    assert_eq!(
        converter.convert("ろっぽんぎひるず").unwrap(),
        vec!["六本木", "ヒルズ"]
    );
}

#[test]
fn test_unknown_id_out_of_range() {
    let matrix = ConnectionCostTable::new(3, vec![0; 9]).unwrap();
    let converter = Converter::new(roppongi_dict(), matrix);

    let result = converter.convert("ろっぽんぎ");
    match result {
        Err(MozcError::ContextIdOutOfRange(e)) => assert_eq!(e.num_ids(), 3),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_word_id_out_of_range() {
    let matrix = ConnectionCostTable::new(3, vec![0; 9]).unwrap();
    let converter = Converter::new(roppongi_dict(), matrix)
        .unknown_word_param(WordParam::new(0, 0, 10000));

    // ろっぽの文脈IDは3で範囲外
    let result = converter.convert("ろっぽんぎ");
    assert!(matches!(result, Err(MozcError::ContextIdOutOfRange(_))));
}

#[test]
fn test_empty_input() {
    let matrix = ConnectionCostTable::new(3, vec![5; 9]).unwrap();
    // 空の入力では未知語の文脈IDは参照されない
    let converter = Converter::new(roppongi_dict(), matrix);
    assert!(converter.convert("").unwrap().is_empty());

    let mut worker = converter.new_worker();
    worker.reset_sentence("");
    worker.convert().unwrap();
    assert_eq!(worker.num_tokens(), 0);
    assert_eq!(worker.total_cost(), Some(5));
}

#[test]
fn test_total_cost_before_convert() {
    let converter = Converter::new(roppongi_dict(), CyclicConnector);
    let mut worker = converter.new_worker();
    assert_eq!(worker.total_cost(), None);

    worker.reset_sentence("ろっぽんぎ");
    assert_eq!(worker.total_cost(), None);
    assert_eq!(worker.lattice().path(worker.lattice().eos()).cost, Some(0));

    worker.convert().unwrap();
    assert_eq!(worker.total_cost(), Some(110));

    worker.reset_sentence("ひるず");
    assert_eq!(worker.total_cost(), None);
    assert_eq!(worker.num_tokens(), 0);
}

#[test]
fn test_convert_reuses_fresh_lattice() {
    let converter = Converter::new(roppongi_dict(), CyclicConnector);
    let mut worker = converter.new_worker();
    worker.reset_sentence("ろっぽんぎ");
    // 未知語5個とBOS/EOS
    assert_eq!(worker.lattice().num_nodes(), 7);

    worker.convert().unwrap();
    // ろっぽんぎ、ろっぽの2語が追加される
    assert_eq!(worker.lattice().num_nodes(), 9);
    worker.convert().unwrap();
    assert_eq!(worker.lattice().num_nodes(), 9);
    assert_eq!(worker.values().collect::<Vec<_>>(), ["六本木"]);
}

#[test]
fn test_retry_after_failed_convert() {
    let matrix = ConnectionCostTable::new(3, vec![0; 9]).unwrap();
    let converter = Converter::new(roppongi_dict(), matrix);
    let mut worker = converter.new_worker();
    worker.reset_sentence("ろっぽんぎ");

    assert!(worker.convert().is_err());
    let num_nodes = worker.lattice().num_nodes();
    assert_eq!(worker.total_cost(), None);
    assert_eq!(worker.num_tokens(), 0);

    assert!(worker.convert().is_err());
    assert_eq!(worker.lattice().num_nodes(), num_nodes);
    assert_eq!(worker.total_cost(), None);
}

#[test]
fn test_empty_dictionary_covers_every_char() {
    let converter = Converter::new(SystemDictionary::default(), CyclicConnector);
    let input = "がっこうへいく";

    let mut worker = converter.new_worker();
    worker.reset_sentence(input);
    worker.convert().unwrap();

    assert_eq!(worker.num_tokens(), input.chars().count());
    for (token, ch) in worker.token_iter().zip(input.chars()) {
        assert!(token.is_unknown());
        assert_eq!(token.value(), ch.to_string());
        assert_eq!(token.key(), ch.to_string());
    }
}

#[test]
fn test_sentinels_are_not_emitted() {
    let converter = Converter::new(SystemDictionary::default(), CyclicConnector);
    assert_eq!(converter.convert("EOS").unwrap(), vec!["E", "O", "S"]);

    let converter = Converter::new(resource_dict(), HashedConnector);
    let mut worker = converter.new_worker();
    worker.reset_sentence("にほんごをはなす");
    worker.convert().unwrap();
    assert!(worker.values().all(|v| v != "BOS" && v != "EOS"));
    assert!(worker.token_iter().all(|t| !t.key().is_empty()));
    assert_eq!(worker.token_iter().len(), worker.num_tokens());
}

#[test]
fn test_deterministic() {
    let converter = Converter::new(resource_dict(), HashedConnector);
    let inputs = ["にほんごをはなす", "もんだいてんが", "きしゃがきしゃ", "がっこうこうこう"];

    let mut worker = converter.new_worker();
    for input in inputs {
        let expected = converter.convert(input).unwrap();
        for _ in 0..3 {
            worker.reset_sentence(input);
            worker.convert().unwrap();
            assert_eq!(worker.values().collect::<Vec<_>>(), expected);
        }
        // 同じ文を続けて変換してもノードは重複しない
        let num_nodes = worker.lattice().num_nodes();
        worker.convert().unwrap();
        assert_eq!(worker.lattice().num_nodes(), num_nodes);
        assert_eq!(worker.values().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn test_resource_dictionary() {
    struct ZeroConnector;

    impl ConnectorView for ZeroConnector {
        fn num_left(&self) -> usize {
            usize::from(u16::MAX) + 1
        }

        fn num_right(&self) -> usize {
            usize::from(u16::MAX) + 1
        }
    }

    impl ConnectorCost for ZeroConnector {
        fn cost(&self, _right_id: u16, _left_id: u16) -> Result<i32> {
            Ok(0)
        }
    }

    let converter = Converter::new(resource_dict(), ZeroConnector);
    assert_eq!(
        converter.convert("もんだいてんが").unwrap(),
        vec!["問題点", "が"]
    );
    assert_eq!(
        converter.convert("にほんごをはなす").unwrap(),
        vec!["日本語", "を", "話す"]
    );
}

#[test]
fn test_tokens_cover_input() {
    let converter = Converter::new(resource_dict(), HashedConnector);
    let input = "きしゃがもんだいてんをはなす";

    let mut worker = converter.new_worker();
    worker.reset_sentence(input);
    worker.convert().unwrap();

    let mut pos_char = 0;
    let mut pos_byte = 0;
    let mut keys = String::new();
    for token in worker.token_iter() {
        assert_eq!(token.range_char().start, pos_char);
        assert_eq!(token.range_byte().start, pos_byte);
        assert_eq!(token.key(), &input[token.range_byte()]);
        pos_char = token.range_char().end;
        pos_byte = token.range_byte().end;
        keys.push_str(token.key());
    }
    assert_eq!(pos_char, input.chars().count());
    assert_eq!(keys, input);

    // 合計コストにはEOSへの接続コストも含まれる
    let last = worker.token(worker.num_tokens() - 1);
    let eos_cost = HashedConnector.cost(last.right_id(), 0).unwrap();
    assert_eq!(worker.total_cost(), Some(last.total_cost() + eos_cost));
}

/// 位置`pos`から文末までのすべての経路を列挙して最小コストを求める
fn brute_force_min<C>(lattice: &Lattice, connector: &C, pos: usize, right_id: u16) -> i32
where
    C: ConnectorCost,
{
    lattice
        .begin_nodes(pos)
        .map(|node| {
            let param = node.param();
            let conn = connector.cost(right_id, param.left_id).unwrap();
            let cost = conn + i32::from(param.word_cost);
            if node.id() == lattice.eos() {
                cost
            } else {
                cost + brute_force_min(lattice, connector, node.range_char().end, param.right_id)
            }
        })
        .min()
        .unwrap()
}

#[test]
fn test_min_cost_equals_brute_force() {
    let converter = Converter::new(resource_dict(), HashedConnector)
        .unknown_word_param(WordParam::new(3, 5, 8000));
    let inputs = [
        "あい",
        "がっこうがこうこう",
        "きしゃのきしゃ",
        "もんだいてんがにほんご",
        "ぬ",
    ];

    let mut worker = converter.new_worker();
    for input in inputs {
        worker.reset_sentence(input);
        worker.convert().unwrap();

        let expected = brute_force_min(worker.lattice(), &HashedConnector, 0, 0);
        assert_eq!(worker.total_cost(), Some(expected), "{input}");

        let path_cost: i32 = worker.token_iter().map(|t| i32::from(t.word_cost())).sum::<i32>()
            + worker
                .token_iter()
                .scan(0, |prev, t| {
                    let c = HashedConnector.cost(*prev, t.left_id()).unwrap();
                    *prev = t.right_id();
                    Some(c)
                })
                .sum::<i32>()
            + HashedConnector
                .cost(worker.token_iter().last().map_or(0, |t| t.right_id()), 0)
                .unwrap();
        assert_eq!(path_cost, expected, "{input}");
    }
}

#[test]
fn test_shared_converter_across_threads() {
    let converter = Converter::new(resource_dict(), HashedConnector);
    let expected = converter.convert("にほんごをはなす").unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            let converter = converter.clone();
            let expected = &expected;
            s.spawn(move || {
                assert_eq!(&converter.convert("にほんごをはなす").unwrap(), expected);
            });
        }
    });
}
