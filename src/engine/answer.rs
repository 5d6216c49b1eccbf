//! Answers and their derivation traces.

use std::fmt;

use serde::Serialize;

use crate::graph::{KnowledgeStore, Neighbor};
use crate::types::{CertaintyVector, NodeId};

use super::compare::Comparison;
use super::history::Inference;

/// A slot in a trace line to be filled once the enclosing inference concludes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// The conclusion of `inference` at the given depth.
    Conclusion { inference: Inference, depth: u32 },
    /// The ISA link that licensed an implication rule at the given depth.
    KindOf { depth: u32 },
}

/// One line of a derivation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceLine {
    pub text: String,
    /// Certainty block of the statement used.
    pub params: String,
    /// Source and references of the statement used, if known.
    pub reference: String,
    #[serde(skip)]
    pub placeholder: Option<Placeholder>,
}

impl TraceLine {
    pub fn new(
        text: impl Into<String>,
        params: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            params: params.into(),
            reference: reference.into(),
            placeholder: None,
        }
    }

    /// An empty line reserved for a later conclusion.
    pub fn pending(placeholder: Placeholder) -> Self {
        Self {
            text: String::new(),
            params: String::new(),
            reference: String::new(),
            placeholder: Some(placeholder),
        }
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)?;
        if !self.params.is_empty() {
            write!(f, " {}", self.params)?;
        }
        if !self.reference.is_empty() {
            write!(f, " ({})", self.reference)?;
        }
        Ok(())
    }
}

/// One derivation chain supporting an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Justification {
    pub lines: Vec<TraceLine>,
}

impl Justification {
    fn fill(&mut self, placeholder: Placeholder, text: &str, params: &str) {
        for line in &mut self.lines {
            if line.placeholder == Some(placeholder) {
                line.text = text.to_string();
                line.params = params.to_string();
                line.placeholder = None;
            }
        }
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines.iter().filter(|l| l.placeholder.is_none()) {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

/// A candidate answer with its certainty and the derivations behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub node: NodeId,
    pub name: String,
    pub certainty: CertaintyVector,
    /// The answer holds in the negative (derived through dissimilarity).
    pub negative: bool,
    /// The statement the answer was read from, for direct hits.
    pub statement: Option<NodeId>,
    /// Unverified conditions the answer depends on.
    pub conditions: Vec<String>,
    pub justifications: Vec<Justification>,
}

impl Answer {
    pub fn new(store: &KnowledgeStore, node: NodeId, certainty: CertaintyVector) -> Self {
        Self {
            node,
            name: store.name(node).to_string(),
            certainty,
            negative: false,
            statement: None,
            conditions: Vec::new(),
            justifications: Vec::new(),
        }
    }

    pub fn from_neighbor(store: &KnowledgeStore, neighbor: &Neighbor) -> Self {
        let mut answer = Self::new(store, neighbor.node, neighbor.certainty);
        answer.statement = Some(neighbor.statement);
        answer
    }

    /// The γ dimension.
    pub fn value(&self) -> f32 {
        self.certainty.certainty
    }

    pub fn set_value(&mut self, certainty: f32) {
        self.certainty.certainty = certainty;
    }

    /// Point the answer at another node, keeping certainty and trace.
    pub fn retarget(&mut self, store: &KnowledgeStore, node: NodeId) {
        self.node = node;
        self.name = store.name(node).to_string();
    }

    pub(crate) fn add_justification(&mut self, lines: &[TraceLine]) {
        self.justifications.push(Justification {
            lines: lines.to_vec(),
        });
    }

    /// Fill the pending conclusion of `inference` at `depth` in every justification.
    pub(crate) fn conclude(&mut self, inference: Inference, depth: u32, statement: &str) {
        let params = self.certainty.to_string();
        for j in &mut self.justifications {
            j.fill(
                Placeholder::Conclusion { inference, depth },
                statement,
                &params,
            );
        }
    }

    pub(crate) fn fill_placeholder(&mut self, placeholder: Placeholder, text: &str) {
        for j in &mut self.justifications {
            j.fill(placeholder, text, "");
        }
    }

    /// Justifications of `other` this answer does not already carry.
    pub(crate) fn new_justifications_from(&self, other: &Answer) -> Vec<Justification> {
        other
            .justifications
            .iter()
            .filter(|j| !self.justifications.contains(j))
            .cloned()
            .collect()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "¬")?;
        }
        write!(f, "{} [γ = {:.5}]", self.name, self.value())
    }
}

/// Why a query produced no answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EmptyReason {
    /// The question is malformed.
    InvalidQuestion(String),
    /// Nothing could be found or derived.
    NotFound,
    /// The step budget ran out before anything was derived.
    BudgetExhausted,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuestion(why) => write!(f, "question not understood: {why}"),
            Self::NotFound => write!(f, "no answer found"),
            Self::BudgetExhausted => write!(f, "reasoning step budget exhausted"),
        }
    }
}

/// Counters of one `answer` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReasoningStats {
    pub total_calls: u64,
    pub backtracks: u64,
    pub elapsed_ms: u64,
    pub budget_exhausted: bool,
}

/// The result of one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerSet {
    pub question: String,
    pub answers: Vec<Answer>,
    pub empty_reason: Option<EmptyReason>,
    /// Free text produced by knowledge dump and comparison questions.
    pub structured_text: Option<String>,
    pub comparison: Option<Comparison>,
    pub stats: ReasoningStats,
}

impl AnswerSet {
    pub(crate) fn empty(question: String, reason: EmptyReason) -> Self {
        Self {
            question,
            answers: Vec::new(),
            empty_reason: Some(reason),
            structured_text: None,
            comparison: None,
            stats: ReasoningStats::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn first(&self) -> Option<&Answer> {
        self.answers.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> + '_ {
        self.answers.iter()
    }

    /// Answer names in rank order.
    pub fn names(&self) -> Vec<&str> {
        self.answers.iter().map(|a| a.name.as_str()).collect()
    }

    /// The answer for a given node, if present.
    pub fn find(&self, node: NodeId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.node == node)
    }
}

impl fmt::Display for AnswerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.question)?;
        if let Some(text) = &self.structured_text {
            writeln!(f, "{text}")?;
        }
        if self.answers.is_empty() && self.structured_text.is_none() {
            if let Some(reason) = &self.empty_reason {
                writeln!(f, "  ({reason})")?;
            }
        }
        for (i, answer) in self.answers.iter().enumerate() {
            writeln!(f, "{}) {}", i + 1, answer)?;
            for condition in &answer.conditions {
                writeln!(f, "  IF {condition}")?;
            }
            for j in &answer.justifications {
                write!(f, "{j}")?;
            }
        }
        write!(
            f,
            "calls: {}, backtracks: {}, {} ms",
            self.stats.total_calls, self.stats.backtracks, self.stats.elapsed_ms
        )
    }
}
