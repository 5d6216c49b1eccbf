//! Two-concept comparison over inherited relations.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::NodeId;

use super::reasoner::Reasoner;

/// Similarities and differences of two concepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: String,
    pub second: String,
    /// Nearest shared ISA ancestor; one of the two when one is a kind of the other.
    pub common_parent: Option<String>,
    /// `rel(both 'a' & 'b')={x}` lines.
    pub similarities: Vec<String>,
    /// `rel('a')={x} whereas rel('b')={y}` lines.
    pub differences: Vec<String>,
}

impl Comparison {
    /// Text form with the requested sections.
    pub fn render(&self, similarities: bool, differences: bool) -> String {
        let mut lines: Vec<String> = Vec::new();
        if similarities {
            lines.push("Similarity:".to_string());
            match &self.common_parent {
                Some(p) if *p == self.first => {
                    lines.push(format!("{} ISA {}", self.second, self.first))
                }
                Some(p) if *p == self.second => {
                    lines.push(format!("{} ISA {}", self.first, self.second))
                }
                Some(p) => lines.push(format!(
                    "Both '{}' & '{}' are {}(s)",
                    self.first, self.second, p
                )),
                None => {}
            }
            lines.extend(self.similarities.iter().cloned());
        }
        if differences {
            lines.push("Difference:".to_string());
            lines.extend(self.differences.iter().cloned());
        }
        lines.join("\n")
    }
}

impl<'a> Reasoner<'a> {
    /// Compare two concepts by the relations each has or inherits below their
    /// common parent.
    ///
    /// For every relation type the nearest statement wins. Shared types with
    /// the same referent are similarities; with different referents they are
    /// differences.
    pub fn compare(&self, a: NodeId, b: NodeId) -> Comparison {
        let store = self.store;
        let depth = self.config.max_depth;
        let common = if store.has_ancestor(b, a) {
            Some(a)
        } else {
            store.common_parent(a, b, depth)
        };

        let first = self.inherited_relations(a, common);
        let second = self.inherited_relations(b, common);

        let (name_a, name_b) = (store.name(a), store.name(b));
        let mut similarities = Vec::new();
        let mut differences = Vec::new();
        for (relation, x) in &first {
            let Some((_, y)) = second.iter().find(|(r, _)| r == relation) else {
                continue;
            };
            let rel = store.name(*relation);
            if x == y {
                similarities.push(format!(
                    "{rel}(both '{name_a}' & '{name_b}')={{{}}}",
                    store.name(*x)
                ));
            } else {
                differences.push(format!(
                    "{rel}('{name_a}')={{{}}} whereas {rel}('{name_b}')={{{}}}",
                    store.name(*x),
                    store.name(*y)
                ));
            }
        }

        log::debug!(
            "compared {name_a} and {name_b}: {} similarities, {} differences",
            similarities.len(),
            differences.len()
        );
        Comparison {
            first: name_a.to_string(),
            second: name_b.to_string(),
            common_parent: common.map(|p| store.name(p).to_string()),
            similarities,
            differences,
        }
    }

    /// `(relation type, referent)` pairs of `node` and its ancestors below `stop`.
    fn inherited_relations(&self, node: NodeId, stop: Option<NodeId>) -> Vec<(NodeId, NodeId)> {
        let store = self.store;
        let vocab = store.vocab();
        let mut relations: Vec<(NodeId, NodeId)> = Vec::new();
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut level = vec![node];

        for _ in 0..=self.config.max_depth {
            let mut next = Vec::new();
            for current in level {
                if Some(current) == stop || !visited.insert(current) {
                    continue;
                }
                for link in store.targets(current, vocab.any) {
                    let Some(data) = store.statement(link.statement) else {
                        continue;
                    };
                    let relation = data.relation_type;
                    if relation == vocab.isa || relation == vocab.instance {
                        continue;
                    }
                    if seen.insert(relation) {
                        relations.push((relation, link.node));
                    }
                }
                next.extend(store.find_all_parents(current, 1));
            }
            if next.is_empty() {
                break;
            }
            level = next;
        }
        relations
    }
}
