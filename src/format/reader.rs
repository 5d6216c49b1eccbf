//! Reads dump text and CSV triples into a knowledge store.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use serde::Serialize;

use crate::graph::names;
use crate::graph::KnowledgeStore;
use crate::types::{
    CertaintyVector, HprError, HprResult, NodeId, SourceType, LINE_BREAK_MARKER,
};

/// Counts reported by an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub loaded: usize,
    pub reflexive_ignored: usize,
    pub excluded_ignored: usize,
    pub bidirectional_ignored: usize,
}

/// Reader for dump files.
///
/// A malformed line stops the import with [`HprError::ImportFormat`]; rows
/// read before it stay in the store.
pub struct DumpReader {
    excluded: Vec<String>,
}

impl DumpReader {
    /// Create a reader that imports every relation.
    pub fn new() -> Self {
        Self {
            excluded: Vec::new(),
        }
    }

    /// Skip rows whose relation has one of these names.
    pub fn exclude<S: Into<String>>(mut self, relations: impl IntoIterator<Item = S>) -> Self {
        self.excluded.extend(relations.into_iter().map(Into::into));
        self
    }

    /// Import a dump file.
    pub fn read_from_file(
        &self,
        store: &mut KnowledgeStore,
        path: &Path,
    ) -> HprResult<ImportReport> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        self.read_from(store, reader, &path.display().to_string())
    }

    /// Import dump text from any buffered reader.
    pub fn read_from(
        &self,
        store: &mut KnowledgeStore,
        reader: impl BufRead,
        name: &str,
    ) -> HprResult<ImportReport> {
        log::info!("loading knowledge base dump '{}'", name);

        let excluded: HashSet<NodeId> = self
            .excluded
            .iter()
            .filter_map(|r| store.find_concept(r))
            .collect();
        let ignore_bidirectional = store.ignore_bidirectional_on_import();
        let imp_name = store.name(store.vocab().imp).to_string();

        let mut report = ImportReport::default();
        let mut statements: HashMap<usize, NodeId> = HashMap::new();
        let mut added: HashSet<(String, String, String)> = HashSet::new();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            let bad = |message: &str| HprError::ImportFormat {
                line: line_no,
                message: message.to_string(),
            };

            let (row, rest) = line.split_once('\t').ok_or_else(|| bad("missing row number"))?;
            let row: usize = row.trim().parse().map_err(|_| bad("bad row number"))?;
            let columns: Vec<&str> = rest.split('\t').collect();
            if columns.len() != 3 && columns.len() != 4 {
                return Err(bad(&format!("expected 3 or 4 columns, found {}", columns.len())));
            }

            let source = decode(columns[0]);
            let relation = decode(columns[1]);
            let target = decode(columns[2]);

            if let Some(rel) = store.find_concept(&names::prospective_name(&relation)?) {
                if excluded.contains(&rel) {
                    report.excluded_ignored += 1;
                    continue;
                }
            }

            let certainty = match columns.get(3) {
                Some(text) => {
                    CertaintyVector::parse(text).ok_or_else(|| bad("bad certainty block"))?
                }
                None => CertaintyVector::new(),
            };

            let statement = if relation.eq_ignore_ascii_case(&imp_name)
                && source.contains('=')
                && target.contains('=')
            {
                let antecedent = split_statement(&source).ok_or_else(|| bad("bad antecedent"))?;
                let consequent = split_statement(&target).ok_or_else(|| bad("bad consequent"))?;
                store.add_implication(antecedent, consequent, certainty)?
            } else if source.starts_with('*') {
                let referred = source
                    .trim_start_matches('*')
                    .trim_start_matches('(')
                    .trim_end_matches(')');
                let referred: usize = referred.parse().map_err(|_| bad("bad statement reference"))?;
                // A reference to a skipped (e.g. reflexive) row is dropped too.
                let Some(&about) = statements.get(&referred) else {
                    continue;
                };
                let value = store.add_concept(&target, SourceType::Unknown)?;
                let rel = store.add_concept(&relation, SourceType::Unknown)?;
                store.relate(about, rel, value, certainty)?
            } else {
                if source == target {
                    report.reflexive_ignored += 1;
                    continue;
                }
                if ignore_bidirectional
                    && added.contains(&(target.clone(), relation.clone(), source.clone()))
                {
                    report.bidirectional_ignored += 1;
                    continue;
                }
                let statement = store.add_triple(&source, &relation, &target, certainty)?;
                added.insert((source, relation, target));
                statement
            };

            report.loaded += 1;
            statements.insert(row, statement);
        }

        store.add_loaded_kb(format!("Memory Dump: {}", name))?;
        log::info!(
            "loaded relations: {}, reflexive ignored: {}, excluded ignored: {}, \
             bi-directional ignored: {}",
            report.loaded,
            report.reflexive_ignored,
            report.excluded_ignored,
            report.bidirectional_ignored
        );
        Ok(report)
    }
}

impl Default for DumpReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load comma separated `argument,relation,referent` rows.
///
/// Returns the number of relations added.
pub fn read_csv(store: &mut KnowledgeStore, reader: impl BufRead) -> HprResult<usize> {
    let mut loaded = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 3 {
            return Err(HprError::ImportFormat {
                line: index + 1,
                message: "number of columns is less than 3".to_string(),
            });
        }
        store.add_triple(parts[0], parts[1], parts[2], CertaintyVector::new())?;
        loaded += 1;
    }
    log::info!("loaded {} relations from csv", loaded);
    Ok(loaded)
}

/// Decode a dump column: `¶` back to a line break.
fn decode(column: &str) -> String {
    column.replace(LINE_BREAK_MARKER, "\r\n")
}

/// Split `rel(arg)={ref}` into `(arg, rel, ref)`.
fn split_statement(text: &str) -> Option<(&str, &str, &str)> {
    let open = text.find('(')?;
    let relation = &text[..open];
    let rest = &text[open + 1..];
    let close = rest.find(")={")?;
    let argument = &rest[..close];
    let referent = rest[close + 3..].strip_suffix('}')?;
    Some((argument, relation, referent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_statement() {
        assert_eq!(
            split_statement("ISA(ANY)={bird}"),
            Some(("ANY", "ISA", "bird"))
        );
        assert_eq!(
            split_statement("can fly(x (1))={yes}"),
            Some(("x (1)", "can fly", "yes"))
        );
        assert_eq!(split_statement("no statement"), None);
    }

    #[test]
    fn test_decode_line_break() {
        assert_eq!(decode("a¶b"), "a\r\nb");
    }
}
