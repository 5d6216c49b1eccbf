//! Phase 4 tests: CLI integration and end-to-end flows.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use plausible_reasoning::engine::{Inference, Question, Reasoner, ReasonerConfig};
use plausible_reasoning::format::{DumpReader, DumpWriter};
use plausible_reasoning::graph::KnowledgeStore;
use plausible_reasoning::types::{CertaintyVector, SourceType};

// ==================== CLI Helpers ====================

/// Locate the `hpr` binary built alongside test binaries.
fn hpr_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove "deps"
    path.push("hpr");
    path
}

/// Run the `hpr` CLI with the given arguments and return the output.
fn run_hpr(args: &[&str]) -> Output {
    Command::new(hpr_bin())
        .args(args)
        .output()
        .expect("Failed to run hpr")
}

/// Helper: assert that the CLI ran successfully (exit code 0).
fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "hpr failed with status {:?}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn cv(certainty: f32) -> CertaintyVector {
    CertaintyVector::with_certainty(certainty)
}

/// Write a small bird and word knowledge base to `dir/kb.txt`.
fn write_kb(dir: &Path) -> PathBuf {
    let mut store = KnowledgeStore::new();
    store
        .add_triple("sparrow", "ISA", "bird", cv(0.9).dominance(1.0))
        .unwrap();
    store.add_triple("bird", "habitat", "tree", cv(0.8)).unwrap();
    store.add_triple("robin", "ISA", "bird", cv(0.9)).unwrap();
    store.add_triple("robin", "color", "red", cv(0.9)).unwrap();
    store.add_triple("sparrow", "color", "brown", cv(0.9)).unwrap();
    store.add_triple("hot#a1", "SYN", "§hot", cv(0.9)).unwrap();
    store.add_triple("warm#a1", "SYN", "§hot", cv(0.9)).unwrap();
    store.add_triple("hot#a1", "DIS", "cold#a1", cv(0.9)).unwrap();

    let path = dir.join("kb.txt");
    DumpWriter::new().write_to_file(&store, &path).unwrap();
    path
}

// ==================== CLI Tests ====================

#[test]
fn test_cli_import() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());
    let output = run_hpr(&["import", kb.to_str().unwrap()]);
    assert_success(&output);
    assert!(stdout_str(&output).contains("Loaded"));
}

#[test]
fn test_cli_stats_json() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());
    let output = run_hpr(&["--format", "json", "stats", kb.to_str().unwrap()]);
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_str(&stdout_str(&output)).unwrap();
    // The DIS row is mirrored on import.
    assert_eq!(value["relations"], 9);
    assert_eq!(value["loaded_kbs"].as_array().unwrap().len(), 1);
}

#[test]
fn test_cli_ask_text() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());
    let output = run_hpr(&["ask", kb.to_str().unwrap(), "habitat(sparrow)={?}"]);
    assert_success(&output);
    let text = stdout_str(&output);
    assert!(text.contains("1) tree"), "unexpected output: {text}");
    assert!(text.contains("sparrow ISA bird"));
}

#[test]
fn test_cli_ask_json() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());
    let output = run_hpr(&[
        "--format",
        "json",
        "ask",
        kb.to_str().unwrap(),
        "color(robin)={?}",
        "--answers",
        "1",
    ]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout_str(&output)).unwrap();
    let answers = value["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["name"], "red");
}

#[test]
fn test_cli_ask_unknown_concept() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());
    let output = run_hpr(&["ask", kb.to_str().unwrap(), "habitat(penguin)={?}"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_bad_dump_exit_code() {
    let dir = TempDir::new().unwrap();
    let kb = dir.path().join("bad.txt");
    std::fs::write(&kb, "1\tapple\tcolor\n").unwrap();
    let output = run_hpr(&["stats", kb.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Bad line 1"));
}

#[test]
fn test_cli_dump_unknown_concept_exit_code() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());
    let output = run_hpr(&["dump", kb.to_str().unwrap(), "penguin"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_cli_compare() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());
    let output = run_hpr(&["compare", kb.to_str().unwrap(), "sparrow", "robin"]);
    assert_success(&output);
    let text = stdout_str(&output);
    assert!(text.contains("Both 'sparrow' & 'robin' are bird(s)"));
    assert!(text.contains("color('sparrow')={brown} whereas color('robin')={red}"));
}

#[test]
fn test_cli_synonyms_and_antonyms() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());

    let output = run_hpr(&["synonyms", kb.to_str().unwrap(), "hot"]);
    assert_success(&output);
    assert!(stdout_str(&output).contains("warm#a1"));

    let output = run_hpr(&["antonyms", kb.to_str().unwrap(), "hot", "--pos", "a"]);
    assert_success(&output);
    assert!(stdout_str(&output).contains("cold#a1"));
}

#[test]
fn test_cli_csv_and_export() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("facts.csv");
    std::fs::write(&csv, "apple,color,red\npear,color,green\napple,ISA,fruit\n").unwrap();
    let kb = dir.path().join("kb.txt");

    let output = run_hpr(&["csv", csv.to_str().unwrap(), kb.to_str().unwrap()]);
    assert_success(&output);
    assert!(stdout_str(&output).contains("Loaded 3 triples"));

    let copy = dir.path().join("copy.txt");
    let output = run_hpr(&["export", kb.to_str().unwrap(), copy.to_str().unwrap()]);
    assert_success(&output);

    let mut store = KnowledgeStore::new();
    DumpReader::new().read_from_file(&mut store, &copy).unwrap();
    assert_eq!(store.statistics().relations, 3);
}

#[test]
fn test_cli_config_init_then_ask() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());
    let config = dir.path().join("hpr.toml");

    let output = run_hpr(&["config-init", config.to_str().unwrap()]);
    assert_success(&output);
    assert_eq!(
        ReasonerConfig::load(&config).unwrap(),
        ReasonerConfig::default()
    );

    let output = run_hpr(&[
        "ask",
        kb.to_str().unwrap(),
        "habitat(sparrow)={?}",
        "--config",
        config.to_str().unwrap(),
        "--enable",
        "ABDUCTION,CAUSALITY",
    ]);
    assert_success(&output);
    assert!(stdout_str(&output).contains("tree"));
}

#[test]
fn test_cli_invalid_inference_name() {
    let dir = TempDir::new().unwrap();
    let kb = write_kb(dir.path());
    let output = run_hpr(&[
        "ask",
        kb.to_str().unwrap(),
        "habitat(sparrow)={?}",
        "--enable",
        "TELEPATHY",
    ]);
    assert_eq!(output.status.code(), Some(1));
}

// ==================== End-to-end ====================

#[test]
fn test_config_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    let mut config = ReasonerConfig::only(&[Inference::Agen, Inference::Dimp]);
    config.max_depth = 4;
    config.save(&path).unwrap();

    let loaded = ReasonerConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.is_enabled(Inference::Agen));
    assert!(!loaded.is_enabled(Inference::Asim));
}

#[test]
fn test_import_then_reason() {
    let text = "\
# Human Plausible Reasoning knowledge base export file
1\tsparrow\tISA\tbird\t[γ = 0.90000 , δ = 1.00000]
2\tbird\thabitat\ttree\t[γ = 0.80000]
";
    let mut store = KnowledgeStore::new();
    DumpReader::new()
        .read_from(&mut store, std::io::Cursor::new(text), "inline")
        .unwrap();

    let question = Question::parse(&store, "habitat(sparrow)={?}").unwrap();
    let mut reasoner = Reasoner::with_config(&store, ReasonerConfig::only(&[Inference::Agen]));
    let set = reasoner.answer(&question).unwrap();
    let first = set.first().unwrap();
    assert_eq!(first.name, "tree");
    assert!((first.value() - 0.72).abs() < 1e-4);
}

#[test]
fn test_random_hierarchy_terminates() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut store = KnowledgeStore::new();
    let count = 60;
    for i in 0..count {
        let parent = rng.gen_range(0..count);
        if parent != i {
            store
                .add_triple(
                    &format!("c{i}"),
                    "ISA",
                    &format!("c{parent}"),
                    cv(rng.gen_range(0.1..1.0)),
                )
                .unwrap();
        }
        if rng.gen_bool(0.3) {
            let similar = rng.gen_range(0..count);
            if similar != i {
                store
                    .add_triple(&format!("c{i}"), "SIM", &format!("c{similar}"), cv(0.5))
                    .unwrap();
            }
        }
        if rng.gen_bool(0.2) {
            store
                .add_triple(&format!("c{i}"), "color", "blue", cv(0.7))
                .unwrap();
        }
    }
    store.add_concept("color", SourceType::Unknown).unwrap();
    store.add_concept("blue", SourceType::Unknown).unwrap();

    let config = ReasonerConfig {
        max_calls: 20_000,
        ..ReasonerConfig::default()
    };
    for i in 0..5 {
        let Some(arg) = store.find_concept(&format!("c{i}")) else {
            continue;
        };
        let color = store.find_concept("color").unwrap();
        let mut reasoner = Reasoner::with_config(&store, config.clone());
        let set = reasoner.answer(&Question::ask(color, Some(arg), None)).unwrap();
        assert!(set.len() <= config.max_answers);
        assert!(set.stats.budget_exhausted || set.stats.total_calls <= config.max_calls);
    }
}
