use std::collections::HashMap;

use tsz_core::lang::keywords;
use tsz_core::lang::operators;
use tsz_core::lang::punctuation;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(keywords::as_str(info.id), info.canonical);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn operators_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, operators::OperatorId> = HashMap::new();

    for info in operators::OPERATORS {
        assert_eq!(operators::from_str(info.spelling), Some(info.id));
        if let Some(prev) = seen.insert(info.spelling, info.id) {
            panic!("duplicate operator spelling {:?}: {:?} and {:?}", info.spelling, prev, info.id);
        }
    }
}

#[test]
fn word_operators_are_reserved_keywords() {
    for info in operators::OPERATORS.iter().filter(|o| o.is_keyword_spelling) {
        let kw = keywords::reserved_from_str(info.spelling)
            .unwrap_or_else(|| panic!("word operator {:?} is not a reserved keyword", info.spelling));
        assert_eq!(keywords::as_str(kw), info.spelling);
    }
}

#[test]
fn loose_equality_is_not_an_operator() {
    assert_eq!(operators::from_str("=="), None);
    assert_eq!(operators::from_str("!="), None);
}

#[test]
fn punctuation_does_not_shadow_operators() {
    for p in punctuation::PUNCTUATION {
        assert_eq!(punctuation::from_str(p.canonical), Some(p.id));
        assert!(
            operators::from_str(p.canonical).is_none(),
            "punctuation {:?} also registered as operator",
            p.canonical
        );
    }
}
