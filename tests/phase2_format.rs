//! Phase 2 tests: dump export, import and CSV loading.

use std::io::Cursor;

use plausible_reasoning::format::{read_csv, DumpReader, DumpWriter};
use plausible_reasoning::graph::KnowledgeStore;
use plausible_reasoning::types::{CertaintyVector, ConditionalType, HprError, SourceType};

// ==================== Helper ====================

fn cv(certainty: f32) -> CertaintyVector {
    CertaintyVector::with_certainty(certainty)
}

fn sample_store() -> KnowledgeStore {
    let mut store = KnowledgeStore::new();
    store
        .add_triple("sparrow", "ISA", "bird", cv(0.9).dominance(1.0))
        .unwrap();
    store.add_triple("bird", "ISA", "animal", cv(0.8)).unwrap();
    store.add_triple("lemon", "SIM", "lime", cv(0.7)).unwrap();
    let snow = store.add_triple("snow", "color", "white", cv(0.95)).unwrap();
    let winter = store.add_concept("winter", SourceType::Unknown).unwrap();
    let cx_time = store.vocab().cx_time;
    store.add_context(snow, cx_time, winter, cv(0.6)).unwrap();
    store
        .add_implication(("ANY", "ISA", "bird"), ("ANY", "fly", "yes"), cv(0.9))
        .unwrap();
    store
}

fn import(text: &str) -> (KnowledgeStore, Result<usize, HprError>) {
    let mut store = KnowledgeStore::new();
    let result = DumpReader::new()
        .read_from(&mut store, Cursor::new(text), "test")
        .map(|r| r.loaded);
    (store, result)
}

// ==================== Export ====================

#[test]
fn test_export_header_and_rows() {
    let store = sample_store();
    let mut out = Vec::new();
    let rows = DumpWriter::new().write_to(&store, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("# Human Plausible Reasoning"));
    assert!(text.contains("sparrow\tISA\tbird\t"));
    assert!(text.contains("ISA(ANY)={bird}\tIMP\tfly(ANY)={YES}"));
    assert!(text.contains("*("));
    let data_lines = text.lines().filter(|l| !l.starts_with('#')).count();
    assert_eq!(data_lines, rows);
}

#[test]
fn test_export_without_header() {
    let store = sample_store();
    let mut out = Vec::new();
    DumpWriter::new()
        .without_header()
        .write_to(&store, &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.starts_with('#'));
    assert!(text.starts_with('1'));
}

// ==================== Round trip ====================

#[test]
fn test_round_trip_through_file() {
    let store = sample_store();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.txt");
    DumpWriter::new().write_to_file(&store, &path).unwrap();

    let mut loaded = KnowledgeStore::new();
    let report = DumpReader::new().read_from_file(&mut loaded, &path).unwrap();
    assert!(report.loaded > 0);

    let before = store.statistics();
    let after = loaded.statistics();
    assert_eq!(before.relations, after.relations);
    assert_eq!(before.descriptor_types, after.descriptor_types);
    assert_eq!(after.loaded_kbs.len(), 1);

    // Certainty blocks survive.
    let sparrow = loaded.find_concept("sparrow").unwrap();
    let isa = loaded.vocab().isa;
    let link = &loaded.targets(sparrow, isa)[0];
    assert!((link.certainty.certainty - 0.9).abs() < 1e-4);
    assert!((link.certainty.dominance - 1.0).abs() < 1e-4);

    // Contexts are re-attached to their statement.
    let snow = loaded.find_concept("snow").unwrap();
    let color = loaded.find_concept("color").unwrap();
    let cx_time = loaded.vocab().cx_time;
    let with_cx = loaded.targets_of(snow, color, ConditionalType::NotConditional, &[cx_time]);
    assert_eq!(loaded.name(with_cx[0].contexts[0].node), "winter");

    // Rules come back as rules.
    let fly = loaded.find_concept("fly").unwrap();
    assert_eq!(loaded.statements_of(fly, |c| c.is_consequent()).len(), 1);
}

#[test]
fn test_round_trip_name_with_tab() {
    let mut store = KnowledgeStore::new();
    store.add_triple("new\tyork", "ISA", "city", cv(0.9)).unwrap();
    let mut out = Vec::new();
    DumpWriter::new().write_to(&store, &mut out).unwrap();

    let (loaded, result) = import(&String::from_utf8(out).unwrap());
    assert_eq!(result.unwrap(), 1);
    let city = loaded.find_concept("new york").unwrap();
    let isa = loaded.vocab().isa;
    assert_eq!(loaded.name(loaded.targets(city, isa)[0].node), "city");
}

#[test]
fn test_round_trip_rule_keeps_name_markers() {
    let mut store = KnowledgeStore::new();
    store
        .add_implication(
            ("ANY", "ISA", "w˸bird"),
            ("ANY", "fly", "\"over the\nsea\""),
            cv(0.9),
        )
        .unwrap();
    let mut out = Vec::new();
    DumpWriter::new()
        .without_header()
        .write_to(&store, &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("ISA(ANY)={w˸bird}\tIMP\tfly(ANY)={\"over the¶sea\"}"));

    let (loaded, result) = import(&text);
    assert_eq!(result.unwrap(), 1);
    let bird = loaded.find_concept("bird").unwrap();
    assert_eq!(loaded.get(bird).unwrap().source(), SourceType::WordNet);
    let sea = loaded.find_concept("over the sea").unwrap();
    assert!(loaded.get(sea).unwrap().is_descriptive());
    let fly = loaded.find_concept("fly").unwrap();
    assert_eq!(loaded.statements_of(fly, |c| c.is_consequent()).len(), 1);
}

#[test]
fn test_export_is_stable_after_reimport() {
    let store = sample_store();
    let mut first = Vec::new();
    DumpWriter::new()
        .without_header()
        .write_to(&store, &mut first)
        .unwrap();

    let mut loaded = KnowledgeStore::new();
    DumpReader::new()
        .read_from(&mut loaded, Cursor::new(first.clone()), "first")
        .unwrap();
    let mut second = Vec::new();
    DumpWriter::new()
        .without_header()
        .write_to(&loaded, &mut second)
        .unwrap();

    let mut a: Vec<String> = String::from_utf8(first)
        .unwrap()
        .lines()
        .map(|l| l.split_once('\t').map(|(_, r)| r.to_string()).unwrap_or_default())
        .collect();
    let mut b: Vec<String> = String::from_utf8(second)
        .unwrap()
        .lines()
        .map(|l| l.split_once('\t').map(|(_, r)| r.to_string()).unwrap_or_default())
        .collect();
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

// ==================== Import ====================

#[test]
fn test_import_skips_comments_and_blank_lines() {
    let text = concat!(
        "# header\r\n\r\n",
        "1\tapple\tcolor\tred\t[γ = 0.80000]\r\n\n",
        "2\tapple\ttaste\tsweet\r\n",
    );
    let (store, result) = import(text);
    assert_eq!(result.unwrap(), 2);
    let apple = store.find_concept("apple").unwrap();
    let color = store.find_concept("color").unwrap();
    let link = &store.targets(apple, color)[0];
    assert!((link.certainty.certainty - 0.8).abs() < 1e-6);
    let taste = store.find_concept("taste").unwrap();
    assert!(store.targets(apple, taste)[0].certainty.is_unspecified());
}

#[test]
fn test_import_bad_column_count_keeps_earlier_rows() {
    let text = "1\tapple\tcolor\tred\n2\tpear\tcolor\n3\tplum\tcolor\tpurple\n";
    let (store, result) = import(text);
    match result {
        Err(HprError::ImportFormat { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected an import format error, got {other:?}"),
    }
    assert!(store.find_concept("apple").is_some());
    assert!(store.find_concept("plum").is_none());
    assert_eq!(store.statistics().relations, 1);
}

#[test]
fn test_import_bad_row_number() {
    let (_, result) = import("x\tapple\tcolor\tred\n");
    assert!(matches!(result, Err(HprError::ImportFormat { line: 1, .. })));
}

#[test]
fn test_import_reflexive_ignored() {
    let mut store = KnowledgeStore::new();
    let report = DumpReader::new()
        .read_from(
            &mut store,
            Cursor::new("1\tapple\tSIM\tapple\n2\tapple\tcolor\tred\n"),
            "test",
        )
        .unwrap();
    assert_eq!(report.loaded, 1);
    assert_eq!(report.reflexive_ignored, 1);
}

#[test]
fn test_import_excluded_relations() {
    let mut store = KnowledgeStore::new();
    let report = DumpReader::new()
        .exclude(["GLOSS"])
        .read_from(
            &mut store,
            Cursor::new("1\tapple\tGLOSS\t\"a fruit\"\n2\tapple\tcolor\tred\n"),
            "test",
        )
        .unwrap();
    assert_eq!(report.loaded, 1);
    assert_eq!(report.excluded_ignored, 1);
    assert!(store.find_concept("a fruit").is_none());
}

#[test]
fn test_import_ignore_bidirectional() {
    let mut store = KnowledgeStore::new();
    store.set_ignore_bidirectional_on_import(true);
    let report = DumpReader::new()
        .read_from(
            &mut store,
            Cursor::new("1\tcat\tnear\tdog\n2\tdog\tnear\tcat\n"),
            "test",
        )
        .unwrap();
    assert_eq!(report.loaded, 1);
    assert_eq!(report.bidirectional_ignored, 1);
}

#[test]
fn test_import_statement_reference() {
    let text = "1\tsnow\tcolor\twhite\n2\t*(1)\tCX:TIME\twinter\n";
    let (store, result) = import(text);
    assert_eq!(result.unwrap(), 2);
    let snow = store.find_concept("snow").unwrap();
    let color = store.find_concept("color").unwrap();
    let statement = store.targets(snow, color)[0].statement;
    let cx = store.targets(statement, store.vocab().cx_time);
    assert_eq!(store.name(cx[0].node), "winter");
}

// ==================== CSV ====================

#[test]
fn test_read_csv() {
    let mut store = KnowledgeStore::new();
    let loaded = read_csv(
        &mut store,
        Cursor::new("apple,color,red\r\n\r\npear,color,green\n"),
    )
    .unwrap();
    assert_eq!(loaded, 2);
    assert_eq!(store.statistics().relations, 2);
}

#[test]
fn test_read_csv_short_row() {
    let mut store = KnowledgeStore::new();
    let err = read_csv(&mut store, Cursor::new("apple,color,red\npear,color\n")).unwrap_err();
    assert!(matches!(err, HprError::ImportFormat { line: 2, .. }));
    assert_eq!(store.statistics().relations, 1);
}
