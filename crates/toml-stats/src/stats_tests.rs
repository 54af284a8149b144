use super::*;

const SRC: &str = "\
title = \"x\"
[a]
n = 1
f = 1.5
d = 1979-05-27
arr = [1, [true, false], { k = 'v' }]
[b]
odd = ???
[ a ]
again = true
";

#[test]
fn counts_every_value() {
    let doc = Document::new(SRC).unwrap();
    let report = walk(&doc, false);
    let stats = &report.stats;
    assert_eq!(stats.tables, 4);
    assert_eq!(stats.keys, 8);
    assert_eq!(stats.count(Kind::String), 2);
    assert_eq!(stats.count(Kind::Integer), 2);
    assert_eq!(stats.count(Kind::Float), 1);
    assert_eq!(stats.count(Kind::Date), 1);
    assert_eq!(stats.count(Kind::Array), 2);
    assert_eq!(stats.count(Kind::InlineTable), 1);
    assert_eq!(stats.count(Kind::Unknown), 1);
    assert_eq!(stats.bools(), 3);
    assert!(report.values.is_empty());
}

#[test]
fn warnings_for_unknowns_and_duplicates() {
    let doc = Document::new(SRC).unwrap();
    let report = walk(&doc, false);
    let codes: Vec<_> = report.diags.iter().map(|d| d.code.as_deref()).collect();
    assert_eq!(codes, [Some("unknown-value"), Some("duplicate-table")]);
    assert!(!report.has_errors());
}

#[test]
fn value_paths() {
    let doc = Document::new(SRC).unwrap();
    let report = walk(&doc, true);
    assert_eq!(
        report.values,
        [
            "title = \"x\"",
            "a.n = 1",
            "a.f = 1.5",
            "a.d = 1979-05-27",
            "a.arr[0] = 1",
            "a.arr[1][0] = true",
            "a.arr[1][1] = false",
            "a.arr[2].k = \"v\"",
            "a.again = true",
        ]
    );
}

#[test]
fn array_tables_are_not_duplicates() {
    let doc = Document::new("[[p]]\nx = 1\n[[p]]\nx = 2\n").unwrap();
    let report = walk(&doc, false);
    assert_eq!(report.stats.tables, 2);
    assert!(report.diags.is_empty());
}

#[test]
fn decode_failures_are_errors() {
    let doc = Document::new("a = [1 2, 3]\nb = \"\\x\"\n[c\n").unwrap();
    let report = walk(&doc, false);
    let codes: Vec<_> = report.diags.iter().map(|d| d.code.as_deref()).collect();
    assert_eq!(
        codes,
        [Some("invalid-number"), Some("invalid-escape"), Some("wanted")]
    );
    assert!(report.has_errors());
    assert_eq!(report.stats.keys, 2);
}

#[test]
fn summary_layout() {
    let doc = Document::new("a = 1\n").unwrap();
    let text = walk(&doc, false).stats.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "   1 table(s)");
    assert_eq!(lines[3], "   1 integer(s)");
}
