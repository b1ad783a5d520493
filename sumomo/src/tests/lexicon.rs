use crate::dictionary::lexicon::{LexMatch, Lexicon, WordParam};
use crate::dictionary::word_idx::WordIdx;
use crate::dictionary::{LexType, WordSource};

const LEX_CSV: &str = include_str!("./resources/lex.csv");

#[test]
fn test_common_prefix_iterator_1() {
    let lexicon = Lexicon::from_reader(LEX_CSV.as_bytes(), LexType::System).unwrap();
    let input: Vec<_> = "東京都に行く".chars().collect();
    let mut it = lexicon.common_prefix_iterator(&input);
    // 東
    assert_eq!(
        it.next(),
        Some(LexMatch::new(
            WordIdx::new(LexType::System, 9),
            WordParam::new(1, 1, 7000),
            1
        ))
    );
    // 東京
    assert_eq!(
        it.next(),
        Some(LexMatch::new(
            WordIdx::new(LexType::System, 10),
            WordParam::new(5, 5, 3003),
            2
        ))
    );
    // 東京都
    assert_eq!(
        it.next(),
        Some(LexMatch::new(
            WordIdx::new(LexType::System, 11),
            WordParam::new(5, 5, 6500),
            3
        ))
    );
    assert_eq!(it.next(), None);
}

#[test]
fn test_common_prefix_iterator_homographs() {
    let lexicon = Lexicon::from_reader(LEX_CSV.as_bytes(), LexType::System).unwrap();
    let input: Vec<_> = "ものの".chars().collect();
    let matches: Vec<_> = lexicon
        .common_prefix_iterator(&input)
        .map(|m| (m.word_idx().word_id, m.end_char()))
        .collect();
    // も (particle), も (noun), もの
    assert_eq!(matches, vec![(2, 1), (3, 1), (4, 2)]);
}

#[test]
fn test_common_prefix_iterator_none() {
    let lexicon = Lexicon::from_reader(LEX_CSV.as_bytes(), LexType::System).unwrap();
    let mut it = lexicon.common_prefix_iterator(&['X']);
    assert_eq!(it.next(), None);
}

#[test]
fn test_exact_match() {
    let lexicon = Lexicon::from_reader(LEX_CSV.as_bytes(), LexType::System).unwrap();
    let ids: Vec<_> = lexicon.exact_match("の").map(|w| w.word_id).collect();
    assert_eq!(ids, vec![5, 6]);
    let ids: Vec<_> = lexicon.exact_match("東京都").map(|w| w.word_id).collect();
    assert_eq!(ids, vec![11]);
    assert_eq!(lexicon.exact_match("東京都に").count(), 0);
}

#[test]
fn test_get_word_feature() {
    let lexicon = Lexicon::from_reader(LEX_CSV.as_bytes(), LexType::System).unwrap();
    let feature = lexicon.word_feature(WordIdx::new(LexType::System, 0));
    assert_eq!(feature, "名詞,一般,*,*,*,*,すもも,スモモ,スモモ");
    let feature = lexicon.word_feature(WordIdx::new(LexType::System, 15));
    assert_eq!(
        feature,
        "動詞,自立,*,*,五段・カ行促音便,基本形,行く,イク,イク"
    );
}
