use crate::{
    Error, LearnedRules, MatchResult, NoPrompt, Options, RuleLearner, RuleOrigin, RuleSet, TerminalPrompter, classify,
    load_rules, match_merchant, run,
};
use std::io::Cursor;

fn rules(text: &str) -> RuleSet {
    load_rules(text, &Options::default()).unwrap()
}

#[test]
fn longest_match_wins() {
    let set = rules("A, foo\nB, foobar");

    let res = classify("foobar store", &set);

    let MatchResult::Resolved { category, length, .. } = res else { panic!("expected a match") };
    assert_eq!(category, "B");
    assert_eq!(length, 6);
}

#[test]
fn equal_lengths_go_to_the_first_rule() {
    let set = rules("A, .*\nB, .*");

    for merchant in ["", "x", "SOME MERCHANT", "ééé"] {
        for _ in 0..3 {
            assert_eq!(classify(merchant, &set).category(), Some("A"), "merchant {merchant:?}");
        }
    }
}

#[test]
fn tie_break_is_by_rule_not_by_category_position() {
    // Category "B" appears first in the file, but its tying pattern comes later.
    let set = rules("B, zzz\nA, shop\nB, SHOP");

    let res = classify("shop SHOP", &set);

    let MatchResult::Resolved { category, index, .. } = res else { panic!("expected a match") };
    assert_eq!(category, "A");
    assert_eq!(index, 1);
}

#[test]
fn no_match_is_unresolved_and_learns_exact_rule() {
    let set = rules("A, ^xyz$");

    assert_eq!(classify("abc", &set), MatchResult::Unresolved);

    let report = run(&set, Cursor::new("d,abc,,1\n"), std::io::sink(), &Options::default(), NoPrompt).unwrap();
    assert_eq!(report.learned.len(), 1);
    assert_eq!(report.learned[0].category, "interactive");
    assert_eq!(report.learned[0].pattern, "^abc$");
}

#[test]
fn learned_rule_matches_only_its_merchant() {
    let mut learned = LearnedRules::new();
    learned.push(RuleLearner::default().learn("A+B (Co.)")).unwrap();
    let empty = RuleSet::default();

    assert!(match_merchant("A+B (Co.)", &empty, &learned).is_resolved());
    for other in ["A B (Co)", "AB (Co.)", "A+B (Co.)!", "xA+B (Co.)", "a+b (co.)", ""] {
        assert_eq!(match_merchant(other, &empty, &learned), MatchResult::Unresolved, "{other:?}");
    }
}

#[test]
fn matching_is_repeatable() {
    let set = rules("food, CAFE|DELI\nfuel, \\bBP\\b\nmisc, .");
    let learned = LearnedRules::new();

    for merchant in ["CAFE", "BP 24", "other", ""] {
        let first = match_merchant(merchant, &set, &learned);
        let second = match_merchant(merchant, &set, &learned);
        assert_eq!(first, second);
    }
}

#[test]
fn duplicate_unmatched_merchants_learn_one_rule() {
    let set = rules("food, CAFE");
    let input = Cursor::new("d1,BOOKS,,1\nd2,BOOKS,,2\n");
    let mut out = Vec::new();

    let report = run(&set, input, &mut out, &Options::default(), NoPrompt).unwrap();

    assert_eq!(report.learned.len(), 1);
    assert_eq!(report.metrics.resolved_learned, 1);
    assert_eq!(String::from_utf8(out).unwrap(), "d1,BOOKS,,1\nd2,BOOKS,interactive,2\n");

    let mut learned = LearnedRules::new();
    for rule in &report.learned {
        learned.push(rule.clone()).unwrap();
    }
    let res = match_merchant("BOOKS", &set, &learned);
    assert!(matches!(res, MatchResult::Resolved { ref category, origin: RuleOrigin::Learned, .. } if category == "interactive"));
}

#[test]
fn three_field_rule_fails_before_any_transaction() {
    let err = load_rules("food, CAFE\nfuel, BP, extra\n", &Options::default()).unwrap_err();

    assert!(matches!(err, Error::MalformedRule { line: 2, .. }));
}

#[test]
fn prefilter_agrees_with_exhaustive_scan() {
    let text = "food, CAFE\nfood, CAFE NERO\nfuel, \\bBP\\b\nbig, [A-Z]+ [A-Z]+\nany, .*\nempty, ^$";
    let set = rules(text);

    for merchant in ["CAFE NERO", "BP CONNECT", "bp", "", "x", "CAFE", "ONE TWO THREE"] {
        let expected = exhaustive(merchant, &set);
        assert_eq!(classify(merchant, &set), expected, "merchant {merchant:?}");
    }
}

/// Reference resolution without the prefilter.
fn exhaustive(text: &str, set: &RuleSet) -> MatchResult {
    let mut best: Option<(usize, usize)> = None;
    for (index, rule) in set.iter().enumerate() {
        if let Some(m) = rule.regex.find(text) {
            let length = m.as_str().chars().count();
            if best.is_none_or(|(_, l)| length > l) {
                best = Some((index, length));
            }
        }
    }
    match best {
        Some((index, length)) => {
            let m = set.get(index).and_then(|r| r.regex.find(text)).unwrap();
            MatchResult::Resolved {
                category: set.get(index).unwrap().category().to_string(),
                length,
                span: crate::Span { start: m.start(), end: m.end() },
                origin: RuleOrigin::Loaded,
                index,
            }
        }
        None => MatchResult::Unresolved,
    }
}

#[test]
fn learned_rules_round_trip_through_the_loader() {
    let set = rules("food, CAFE");
    let input = Cursor::new("d,SHOP #42 (A+B),,1\nd,ACME,,2\n");

    let report = run(&set, input, std::io::sink(), &Options::default(), NoPrompt).unwrap();
    let reloaded = load_rules(&report.learned_rows().join("\n"), &Options::default()).unwrap();

    let patterns: Vec<&str> = reloaded.iter().map(|r| r.pattern()).collect();
    let learned: Vec<&str> = report.learned.iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, learned);
    assert_eq!(classify("SHOP #42 (A+B)", &reloaded).category(), Some("interactive"));
    assert_eq!(classify("SHOP #42 (A B)", &reloaded), MatchResult::Unresolved);
}

#[test]
fn a_borrowed_prompter_is_reusable_across_runs() {
    let set = rules("food, CAFE");
    let mut prompter = TerminalPrompter::new(Cursor::new("1\n1\n"), std::io::sink());

    for merchant in ["A", "B"] {
        let input = Cursor::new(format!("d,{merchant},,1\n"));
        let report = run(&set, input, std::io::sink(), &Options::default(), &mut prompter).unwrap();
        assert_eq!(report.learned.len(), 1);
    }
}

#[test]
fn configured_sentinel_and_history_label_are_used() {
    let options = Options {
        sentinel_category: "review".to_string(),
        include_history: true,
        empty_history_label: "none".to_string(),
        ..Options::default()
    };
    let set = load_rules("food, CAFE", &options).unwrap();
    let mut out = Vec::new();

    let report = run(&set, Cursor::new("d,CAFE,,1\nd,X,,2\n"), &mut out, &options, NoPrompt).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "d,CAFE,food,1,none\nd,X,,2\n");
    assert_eq!(report.learned_rows(), ["review, ^X$ # added interactively".to_string()]);
}
