//! Human-readable listings of store content.

use std::fmt::Write;

use crate::types::{ConditionalType, NodeId, Pos};

use super::KnowledgeStore;

const SENSE_POS: [Pos; 5] = [
    Pos::Noun,
    Pos::Verb,
    Pos::Adjective,
    Pos::SatelliteAdjective,
    Pos::Adverb,
];

impl KnowledgeStore {
    /// Everything known about a concept: metadata, relations and word senses.
    ///
    /// At most `max_relations` outgoing and incoming relations are listed.
    pub fn concept_dump(&self, node: NodeId, max_relations: usize) -> String {
        let Some(n) = self.get(node) else {
            return String::new();
        };
        let mut out = String::new();

        let _ = writeln!(out, "Node: {}", n.name());
        let _ = writeln!(out, "Id: {}", n.id());
        let _ = writeln!(out, "Source: {}", n.source());
        let _ = writeln!(out, "Concept type: {}", n.concept_type().name());
        let _ = writeln!(out, "POS: {}", n.pos().name());
        let _ = writeln!(out, "Dynamic: {}", n.is_dynamic());
        let _ = writeln!(out, "In/Out degree: {}/{}", n.in_degree(), n.out_degree());
        let _ = writeln!(out, "Instances as relation: {}", n.instance_count);
        let _ = writeln!(out, "---------- Relations ----------");

        for (i, link) in n.out_edges.iter().take(max_relations).enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, self.relation_line(link.statement));
        }
        for (i, link) in n.in_edges.iter().take(max_relations).enumerate() {
            let _ = writeln!(out, "<{}. {}", i + 1, self.relation_line(link.statement));
        }
        let total = n.out_degree() + n.in_degree();
        if total > 2 * max_relations {
            let _ = writeln!(
                out,
                "Only the first {} relations in each direction are shown.",
                max_relations
            );
        }

        let _ = writeln!(out, "---------- Lexical knowledge ----------");
        for pos in SENSE_POS {
            let Some(tag) = pos.tag() else { continue };
            let mut lines = Vec::new();
            let mut i = 1;
            while let Some(sense) = self.find_concept(&format!("{}#{}{}", n.name(), tag, i)) {
                lines.push(self.sense_line(sense));
                i += 1;
            }
            if !lines.is_empty() {
                let _ = writeln!(out, "{}:", pos.name());
                for line in lines {
                    let _ = writeln!(out, "  {}", line);
                }
            }
        }
        out
    }

    /// Descriptor types with their instance counts, one per line.
    pub fn descriptors_text(&self) -> String {
        let mut out = String::new();
        for (i, d) in self.descriptors().into_iter().enumerate() {
            let count = self.get(d).map(|n| n.instance_count).unwrap_or(0);
            let _ = writeln!(out, "{}.\t{}\t{}", i + 1, self.name(d), count);
        }
        out
    }

    fn relation_line(&self, statement: NodeId) -> String {
        let Some(data) = self.statement(statement) else {
            return self.name(statement).to_string();
        };
        let mut line = format!(
            "{}\t{}\t{}",
            self.name(data.argument),
            self.name(data.relation_type),
            self.name(data.referent)
        );
        let cv = data.certainty.to_string();
        if !cv.is_empty() {
            line.push('\t');
            line.push_str(&cv);
        }
        if data.conditional != ConditionalType::NotConditional {
            let _ = write!(line, "\t({})", data.conditional.name());
        }
        line
    }

    fn sense_line(&self, sense: NodeId) -> String {
        let vocab = self.vocab();
        let (synset, gloss, example) = match self.synset_of(sense) {
            Some(s) => (
                self.name(s).to_string(),
                self.first_target(s, vocab.gloss)
                    .map(|g| self.name(g).to_string())
                    .unwrap_or_else(|| "Unavailable!".to_string()),
                self.first_target(s, vocab.example)
                    .map(|e| self.name(e).to_string())
                    .unwrap_or_default(),
            ),
            None => (
                "Unavailable!".to_string(),
                "Unavailable!".to_string(),
                String::new(),
            ),
        };
        format!("{}\tSYN\t{}\t{} : {}", self.name(sense), synset, gloss, example)
    }
}
