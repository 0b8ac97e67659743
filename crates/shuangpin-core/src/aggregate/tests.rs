use std::fs;
use std::io::Cursor;
use std::path::Path;

use proptest::prelude::*;

use super::*;

const SAMPLE: &str = "\
# kMandarin sample
U+4E2D: zhōng,zhòng  # 中

U+91CD: zhòng,chóng  # 重
U+00FF: wài  # ÿ
U+4E36: ü  # 丶
U+6211: wǒ  # 我
";

fn aggregate(text: &str) -> (CharTable, FileStats) {
    let mut agg = Aggregator::new(InitialTable::standard());
    let stats = agg
        .add_reader(Path::new("sample.txt"), Cursor::new(text.as_bytes()))
        .unwrap();
    (agg.finish(), stats)
}

#[test]
fn glyph_lands_under_each_of_its_initials() {
    let initials = InitialTable::standard();
    let (table, _) = aggregate(SAMPLE);
    assert_eq!(table.initials_for(initials, "中"), vec!["zh"]);
    assert_eq!(table.initials_for(initials, "重"), vec!["ch", "zh"]);
    assert_eq!(table.initials_for(initials, "我"), vec!["w"]);
}

#[test]
fn out_of_range_and_initial_less_records_are_dropped() {
    let initials = InitialTable::standard();
    let (table, stats) = aggregate(SAMPLE);
    assert!(table.initials_for(initials, "ÿ").is_empty());
    assert!(table.initials_for(initials, "丶").is_empty());
    assert!(!table.contains("w", "ÿ"));
    assert_eq!(
        stats,
        FileStats {
            lines: 7,
            skipped: 2,
            out_of_repertoire: 1,
            no_initials: 1,
            records: 3,
        }
    );
}

#[test]
fn insertion_order_follows_source_order() {
    let (table, _) = aggregate(SAMPLE);
    assert_eq!(table.get("zh").unwrap().concat(), "中重");
}

#[test]
fn parse_error_reports_line_number() {
    let mut agg = Aggregator::new(InitialTable::standard());
    let text = "U+4E2D: zhōng  # 中\n4E2D: zhōng  # 中\n";
    let err = agg
        .add_reader(Path::new("bad.txt"), Cursor::new(text.as_bytes()))
        .unwrap_err();
    match err {
        AggregateError::Parse { line, source, .. } => {
            assert_eq!(line, 2);
            assert!(matches!(source, ParseError::MissingCodePointPrefix(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("a.txt");
    fs::write(&present, SAMPLE).unwrap();
    let missing = dir.path().join("missing.txt");

    let mut agg = Aggregator::new(InitialTable::standard());
    let err = agg.add_files(&[present, missing.clone()]).unwrap_err();
    match err {
        AggregateError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn same_record_in_two_files_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, SAMPLE).unwrap();
    fs::write(&b, "U+4E2D: zhōng  # 中\n").unwrap();

    let mut agg = Aggregator::new(InitialTable::standard());
    let stats = agg.add_files(&[&a, &b, &a]).unwrap();
    assert_eq!(stats.len(), 3);
    let table = agg.finish();
    assert_eq!(table.chars("zh").len(), 2);
    assert_eq!(table.total(), 4);
}

fn arb_line() -> impl Strategy<Value = String> {
    let glyphs = prop::sample::select(vec![
        (0x4E2Du32, "中"),
        (0x91CD, "重"),
        (0x6211, "我"),
        (0x4E00, "一"),
        (0x00FF, "ÿ"),
    ]);
    let prons = prop::collection::vec(
        prop::sample::select(vec!["zhōng", "chóng", "wǒ", "yī", "ān", "ü", "shì"]),
        1..4,
    );
    (glyphs, prons).prop_map(|((cp, glyph), prons)| {
        format!("U+{cp:04X}: {}  # {glyph}", prons.join(","))
    })
}

proptest! {
    #[test]
    fn aggregating_twice_matches_once(lines in prop::collection::vec(arb_line(), 0..20)) {
        let text = lines.join("\n");
        let initials = InitialTable::standard();

        let mut once = Aggregator::new(initials);
        once.add_reader(Path::new("once"), Cursor::new(text.as_bytes())).unwrap();
        let once = once.finish();

        let mut twice = Aggregator::new(initials);
        twice.add_reader(Path::new("twice"), Cursor::new(text.as_bytes())).unwrap();
        twice.add_reader(Path::new("twice"), Cursor::new(text.as_bytes())).unwrap();
        let twice = twice.finish();

        for (_, initial) in initials.keys() {
            prop_assert_eq!(once.chars(initial), twice.chars(initial));
        }
    }

    #[test]
    fn out_of_range_glyph_never_aggregated(lines in prop::collection::vec(arb_line(), 0..20)) {
        let text = lines.join("\n");
        let initials = InitialTable::standard();
        let mut agg = Aggregator::new(initials);
        agg.add_reader(Path::new("p"), Cursor::new(text.as_bytes())).unwrap();
        prop_assert!(agg.table().initials_for(initials, "ÿ").is_empty());
    }
}
