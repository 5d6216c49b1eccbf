//! Writes knowledge stores as tab-delimited dump text.

use std::io::Write;
use std::path::Path;

use crate::graph::KnowledgeStore;
use crate::types::{
    now_stamp, ConditionalType, HprResult, NodeId, LINE_BREAK_MARKER, SOURCE_MARKER,
};

/// Writer for dump files.
///
/// Each line is `row<TAB>argument<TAB>relation<TAB>referent<TAB>certainty`.
/// Statements about statements follow the statement they refer to, with the
/// argument written as `*(row)`. Implication rules are written as
/// `rel(arg)={ref}<TAB>IMP<TAB>rel(arg)={ref}`.
pub struct DumpWriter {
    header: bool,
}

impl DumpWriter {
    /// Create a writer that emits the comment header.
    pub fn new() -> Self {
        Self { header: true }
    }

    /// Skip the comment header.
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    /// Write a store to a dump file. Returns the number of rows written.
    pub fn write_to_file(&self, store: &KnowledgeStore, path: &Path) -> HprResult<usize> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        let rows = self.write_to(store, &mut writer)?;
        writer.flush()?;
        log::info!("exported {} rows to {}", rows, path.display());
        Ok(rows)
    }

    /// Write a store to any writer. Returns the number of rows written.
    pub fn write_to(&self, store: &KnowledgeStore, writer: &mut impl Write) -> HprResult<usize> {
        if self.header {
            write_header(store, writer)?;
        }

        let mut concepts: Vec<(String, NodeId)> = store
            .iter()
            .filter(|(_, n)| !n.name().starts_with('*'))
            .map(|(id, n)| (n.name().to_lowercase(), id))
            .collect();
        concepts.sort();

        let mut row = 0;
        for (_, id) in concepts {
            row = write_node(store, writer, id, row, None)?;
        }
        Ok(row)
    }
}

impl Default for DumpWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_header(store: &KnowledgeStore, writer: &mut impl Write) -> HprResult<()> {
    let stats = store.statistics();
    let lines = [
        "Human Plausible Reasoning knowledge base export file".to_string(),
        format!("Exported at {}", now_stamp()),
        "Triples are separated with a TAB, certainty parameters follow.".to_string(),
        "Relations about relations start with a star (*) and follow the relation they refer to."
            .to_string(),
        format!(
            "A name may start with a source letter and '{}' (U+02F8, not a colon).",
            SOURCE_MARKER
        ),
        format!("'{}' encodes a line break inside a name.", LINE_BREAK_MARKER),
        format!(
            "Concepts: {}, relations: {}, descriptor types: {}",
            stats.total_concepts, stats.relations, stats.descriptor_types
        ),
        "-".repeat(90),
    ];
    for line in lines {
        write!(writer, "# {}\r\n", line)?;
    }
    Ok(())
}

/// Write the out-links of one node; `statement_row` is set for statements.
fn write_node(
    store: &KnowledgeStore,
    writer: &mut impl Write,
    node: NodeId,
    mut row: usize,
    statement_row: Option<usize>,
) -> HprResult<usize> {
    let Some(n) = store.get(node) else {
        return Ok(row);
    };
    let argument = match statement_row {
        Some(r) => format!("*({})", r),
        None => export_name(store, node),
    };
    let imp = store.vocab().imp;

    for link in n.out_edges().iter() {
        let Some(data) = store.statement(link.statement) else {
            continue;
        };
        if data.conditional == ConditionalType::NotConditional {
            row += 1;
            write!(
                writer,
                "{}\t{}\t{}\t{}\t{}\r\n",
                row,
                argument,
                export_name(store, link.statement),
                export_name(store, link.other),
                data.certainty
            )?;
            row = write_node(store, writer, link.statement, row, Some(row))?;
        } else if data.conditional.is_antecedent() {
            for rule in store.targets(link.statement, imp) {
                row += 1;
                write!(
                    writer,
                    "{}\t{}\t{}\t{}\t{}\r\n",
                    row,
                    rule_text(store, link.statement),
                    export_name(store, imp),
                    rule_text(store, rule.node),
                    rule.certainty
                )?;
            }
        }
    }
    Ok(row)
}

/// Name as written in dumps: line breaks encoded, quotes for descriptive
/// nodes, source prefix. Statements are written as their relation type.
pub fn export_name(store: &KnowledgeStore, node: NodeId) -> String {
    let Some(n) = store.get(node) else {
        return String::new();
    };
    let base = match n.as_statement() {
        Some(data) => store.name(data.relation_type),
        None => n.name(),
    };
    let marker = LINE_BREAK_MARKER.to_string();
    let mut name = base
        .replace("\r\n", &marker)
        .replace('\n', &marker)
        .replace('\r', &marker)
        .replace('\t', " ");
    if n.is_descriptive() {
        name = format!("\"{}\"", name);
    }
    match n.source().prefix() {
        Some(p) => format!("{}{}{}", p, SOURCE_MARKER, name),
        None => name,
    }
}

/// `relation(argument)={referent}` of a rule statement, names in dump form.
fn rule_text(store: &KnowledgeStore, statement: NodeId) -> String {
    match store.statement(statement) {
        Some(d) => format!(
            "{}({})={{{}}}",
            export_name(store, d.relation_type),
            export_name(store, d.argument),
            export_name(store, d.referent)
        ),
        None => export_name(store, statement),
    }
}
