//! CLI command implementations.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::engine::{Inference, Question, Reasoner, ReasonerConfig};
use crate::format::{read_csv, DumpReader, DumpWriter, ImportReport};
use crate::graph::KnowledgeStore;
use crate::types::{HprError, HprResult, NodeId, Pos};

/// Options of the `ask` command.
#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    pub depth: Option<u32>,
    pub answers: Option<usize>,
    pub config: Option<std::path::PathBuf>,
    /// Operators to switch on in addition to the configured ones.
    pub enable: Vec<Inference>,
}

/// Load a dump file into a fresh store.
pub fn load_store(
    path: &Path,
    exclude: &[String],
    ignore_bidirectional: bool,
) -> HprResult<(KnowledgeStore, ImportReport)> {
    let mut store = KnowledgeStore::new();
    store.set_ignore_bidirectional_on_import(ignore_bidirectional);
    let report = DumpReader::new()
        .exclude(exclude.iter().cloned())
        .read_from_file(&mut store, path)?;
    Ok((store, report))
}

fn concept(store: &KnowledgeStore, name: &str) -> HprResult<NodeId> {
    store
        .find_concept(name)
        .ok_or_else(|| HprError::NodeNotFound(name.to_string()))
}

fn print_json(value: &impl serde::Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

/// Import a dump and report what was loaded.
pub fn cmd_import(
    path: &Path,
    exclude: &[String],
    ignore_bidirectional: bool,
    json: bool,
) -> HprResult<()> {
    let (store, report) = load_store(path, exclude, ignore_bidirectional)?;
    let stats = store.statistics();

    if json {
        print_json(&serde_json::json!({
            "file": path.display().to_string(),
            "report": report,
            "statistics": stats,
        }));
    } else {
        println!("Loaded {} relations from {}", report.loaded, path.display());
        println!("  Reflexive ignored: {}", report.reflexive_ignored);
        println!("  Excluded ignored: {}", report.excluded_ignored);
        println!("  Bidirectional ignored: {}", report.bidirectional_ignored);
        println!("{stats}");
    }
    Ok(())
}

/// Load a dump and write it back out.
pub fn cmd_export(path: &Path, out: &Path, json: bool) -> HprResult<()> {
    let (store, _) = load_store(path, &[], false)?;
    let written = DumpWriter::new().write_to_file(&store, out)?;

    if json {
        print_json(&serde_json::json!({
            "file": out.display().to_string(),
            "relations": written,
        }));
    } else {
        println!("Exported {} relations to {}", written, out.display());
    }
    Ok(())
}

/// Summary counts of a dump.
pub fn cmd_stats(path: &Path, json: bool) -> HprResult<()> {
    let (store, _) = load_store(path, &[], false)?;
    let stats = store.statistics();
    if json {
        print_json(&stats);
    } else {
        println!("File: {}", path.display());
        println!("{stats}");
        for kb in &stats.loaded_kbs {
            println!("  {kb}");
        }
    }
    Ok(())
}

/// Print the relations of one concept.
pub fn cmd_dump(path: &Path, name: &str, max_relations: usize, json: bool) -> HprResult<()> {
    let (store, _) = load_store(path, &[], false)?;
    let node = concept(&store, name)?;
    let text = store.concept_dump(node, max_relations);
    if json {
        print_json(&serde_json::json!({"concept": name, "dump": text}));
    } else {
        println!("{text}");
    }
    Ok(())
}

/// Answer a `DESC(ARG)={REF}` question.
pub fn cmd_ask(path: &Path, question: &str, options: &AskOptions, json: bool) -> HprResult<()> {
    let (store, _) = load_store(path, &[], false)?;
    let mut config = match &options.config {
        Some(file) => ReasonerConfig::load(file)?,
        None => ReasonerConfig::default(),
    };
    for op in &options.enable {
        config.enable(*op);
    }

    let question = Question::parse(&store, question)?;
    let mut reasoner = Reasoner::with_config(&store, config);
    if let Some(depth) = options.depth {
        reasoner.set_max_depth(depth);
    }
    if let Some(cap) = options.answers {
        reasoner.set_answer_cap(cap);
    }

    let set = reasoner.answer(&question)?;
    if json {
        print_json(&set);
    } else {
        println!("{set}");
    }
    Ok(())
}

/// Compare two concepts.
pub fn cmd_compare(path: &Path, a: &str, b: &str, json: bool) -> HprResult<()> {
    let (store, _) = load_store(path, &[], false)?;
    let (a, b) = (concept(&store, a)?, concept(&store, b)?);
    let reasoner = Reasoner::new(&store);
    let comparison = reasoner.compare(a, b);
    if json {
        print_json(&comparison);
    } else {
        println!("{}", comparison.render(true, true));
    }
    Ok(())
}

/// Synonyms of every sense of a word.
pub fn cmd_synonyms(path: &Path, word: &str, json: bool) -> HprResult<()> {
    let (store, _) = load_store(path, &[], false)?;
    let mut reasoner = Reasoner::new(&store);
    let names: Vec<&str> = reasoner
        .synonyms_merged(word, Pos::Any)
        .into_iter()
        .map(|n| store.name(n))
        .collect();

    if json {
        print_json(&serde_json::json!({"word": word, "synonyms": names}));
    } else if names.is_empty() {
        println!("No synonyms of {word}");
    } else {
        println!("Synonyms of {word}:");
        for name in names {
            println!("  {name}");
        }
    }
    Ok(())
}

/// Antonym groups of a word, one per sense.
pub fn cmd_antonyms(path: &Path, word: &str, pos: Pos, json: bool) -> HprResult<()> {
    let (store, _) = load_store(path, &[], false)?;
    let mut reasoner = Reasoner::new(&store);
    let groups: Vec<Vec<&str>> = reasoner
        .find_antonyms(word, pos)
        .into_iter()
        .map(|group| group.iter().map(|n| store.name(n.node)).collect())
        .collect();

    if json {
        print_json(&serde_json::json!({"word": word, "antonyms": groups}));
    } else if groups.is_empty() {
        println!("No antonyms of {word}");
    } else {
        for (i, group) in groups.iter().enumerate() {
            println!("{}) {}", i + 1, group.join(", "));
        }
    }
    Ok(())
}

/// Build a dump from comma separated triples.
pub fn cmd_csv(csv: &Path, out: &Path, json: bool) -> HprResult<()> {
    let mut store = KnowledgeStore::new();
    let loaded = read_csv(&mut store, BufReader::new(File::open(csv)?))?;
    let written = DumpWriter::new().write_to_file(&store, out)?;

    if json {
        print_json(&serde_json::json!({
            "loaded": loaded,
            "written": written,
            "file": out.display().to_string(),
        }));
    } else {
        println!(
            "Loaded {} triples, wrote {} relations to {}",
            loaded,
            written,
            out.display()
        );
    }
    Ok(())
}

/// Write the default reasoner configuration.
pub fn cmd_config_init(path: &Path) -> HprResult<()> {
    ReasonerConfig::default().save(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
