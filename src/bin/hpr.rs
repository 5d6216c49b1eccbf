//! CLI entry point for the `hpr` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use plausible_reasoning::cli::commands::{self, AskOptions};
use plausible_reasoning::engine::Inference;
use plausible_reasoning::types::{HprError, Pos};

#[derive(Parser)]
#[command(
    name = "hpr",
    about = "Plausible reasoning over a semantic knowledge store"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dump file and print what was loaded
    Import {
        /// Path to the dump file
        file: PathBuf,
        /// Comma-separated relation names to skip
        #[arg(long)]
        exclude: Option<String>,
        /// Skip rows whose reverse statement is already present
        #[arg(long)]
        ignore_bidirectional: bool,
    },
    /// Load a dump file and write it back out
    Export {
        /// Path to the dump file
        file: PathBuf,
        /// Output dump file
        out: PathBuf,
    },
    /// Summary counts of a dump file
    Stats {
        /// Path to the dump file
        file: PathBuf,
    },
    /// Print the relations of one concept
    Dump {
        /// Path to the dump file
        file: PathBuf,
        /// Concept name
        concept: String,
        /// Maximum relations listed per direction
        #[arg(long, default_value = "10")]
        max_relations: usize,
    },
    /// Ask a question such as "color(apple)={?}"
    Ask {
        /// Path to the dump file
        file: PathBuf,
        /// Question text: DESC(ARG)={REF}, with ? for the unknown slot
        question: String,
        /// Maximum reasoning depth
        #[arg(long)]
        depth: Option<u32>,
        /// Maximum answers returned
        #[arg(long)]
        answers: Option<usize>,
        /// Reasoner configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Comma-separated operators to enable, e.g. ABDUCTION,CAUSALITY
        #[arg(long)]
        enable: Option<String>,
    },
    /// Similarities and differences of two concepts
    Compare {
        /// Path to the dump file
        file: PathBuf,
        /// First concept
        a: String,
        /// Second concept
        b: String,
    },
    /// Synonyms of a word
    Synonyms {
        /// Path to the dump file
        file: PathBuf,
        /// Word (lemma)
        word: String,
    },
    /// Antonyms of a word
    Antonyms {
        /// Path to the dump file
        file: PathBuf,
        /// Word (lemma)
        word: String,
        /// Part of speech: n, v, a, s or r
        #[arg(long)]
        pos: Option<char>,
    },
    /// Build a dump file from comma separated triples
    Csv {
        /// Input file with argument,relation,referent rows
        csv: PathBuf,
        /// Output dump file
        out: PathBuf,
    },
    /// Write the default reasoner configuration
    ConfigInit {
        /// Path of the TOML file to create
        path: PathBuf,
    },
}

fn split_list(list: Option<String>) -> Vec<String> {
    list.map(|s| {
        s.split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Import {
            file,
            exclude,
            ignore_bidirectional,
        } => commands::cmd_import(&file, &split_list(exclude), ignore_bidirectional, json),
        Commands::Export { file, out } => commands::cmd_export(&file, &out, json),
        Commands::Stats { file } => commands::cmd_stats(&file, json),
        Commands::Dump {
            file,
            concept,
            max_relations,
        } => commands::cmd_dump(&file, &concept, max_relations, json),
        Commands::Ask {
            file,
            question,
            depth,
            answers,
            config,
            enable,
        } => {
            let mut ops = Vec::new();
            for name in split_list(enable) {
                match Inference::from_name(&name) {
                    Some(op) => ops.push(op),
                    None => {
                        eprintln!("Invalid inference: {}", name);
                        process::exit(1);
                    }
                }
            }
            let options = AskOptions {
                depth,
                answers,
                config,
                enable: ops,
            };
            commands::cmd_ask(&file, &question, &options, json)
        }
        Commands::Compare { file, a, b } => commands::cmd_compare(&file, &a, &b, json),
        Commands::Synonyms { file, word } => commands::cmd_synonyms(&file, &word, json),
        Commands::Antonyms { file, word, pos } => {
            let pos = pos.map(Pos::from_tag).unwrap_or(Pos::Any);
            commands::cmd_antonyms(&file, &word, pos, json)
        }
        Commands::Csv { csv, out } => commands::cmd_csv(&csv, &out, json),
        Commands::ConfigInit { path } => commands::cmd_config_init(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            HprError::ImportFormat { .. } => 2,
            e if e.is_structural() => 3,
            _ => 1,
        };
        process::exit(code);
    }
}
