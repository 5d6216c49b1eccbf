//! Plausible questions: `DESCRIPTOR(ARGUMENT)={REFERENT}` with unknown slots.

use crate::graph::KnowledgeStore;
use crate::types::{HprError, HprResult, NodeId, DEFAULT_CERTAINTY};

/// How a time or location context takes part in a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextSlot {
    /// The context plays no role.
    #[default]
    Ignore,
    /// Ask for the context value of the matching statement.
    Find,
    /// Require the matching statement to carry this context value.
    Check(NodeId),
}

/// Whether the descriptor names a property or an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationKind {
    #[default]
    Property,
    Verb,
}

/// A question as posed by a caller.
///
/// Leaving both `argument` and `referent` empty, or the descriptor, makes
/// the question invalid; `answer` reports that as an empty result.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub descriptor: Option<NodeId>,
    pub argument: Option<NodeId>,
    pub referent: Option<NodeId>,
    /// Second argument of compare, similarity and difference questions.
    pub second_argument: Option<NodeId>,
    pub multi_argument: bool,
    /// Ask whether the statement does not hold.
    pub negated: bool,
    pub time: ContextSlot,
    pub location: ContextSlot,
    pub kind: RelationKind,
    /// Prior certainty of the question itself.
    pub certainty: f32,
}

impl Question {
    /// A question about `descriptor` with both slots unknown.
    pub fn new(descriptor: NodeId) -> Self {
        Self {
            descriptor: Some(descriptor),
            argument: None,
            referent: None,
            second_argument: None,
            multi_argument: false,
            negated: false,
            time: ContextSlot::Ignore,
            location: ContextSlot::Ignore,
            kind: RelationKind::Property,
            certainty: DEFAULT_CERTAINTY,
        }
    }

    /// `descriptor(argument)={referent}`, `None` marking the unknown slot.
    pub fn ask(descriptor: NodeId, argument: Option<NodeId>, referent: Option<NodeId>) -> Self {
        Self {
            argument,
            referent,
            ..Self::new(descriptor)
        }
    }

    /// `descriptor(first, second)` for compare-style questions.
    pub fn compare(descriptor: NodeId, first: NodeId, second: NodeId) -> Self {
        Self {
            argument: Some(first),
            second_argument: Some(second),
            multi_argument: true,
            ..Self::new(descriptor)
        }
    }

    pub fn argument(mut self, argument: NodeId) -> Self {
        self.argument = Some(argument);
        self
    }

    pub fn referent(mut self, referent: NodeId) -> Self {
        self.referent = Some(referent);
        self
    }

    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    pub fn time(mut self, slot: ContextSlot) -> Self {
        self.time = slot;
        self
    }

    pub fn location(mut self, slot: ContextSlot) -> Self {
        self.location = slot;
        self
    }

    pub fn verb(mut self) -> Self {
        self.kind = RelationKind::Verb;
        self
    }

    /// Parse `DESC(ARG)={REF}`, with `?` (or nothing) for the unknown slot.
    ///
    /// `DESC(A, B)` builds a multi-argument question and a leading `!` negates.
    /// Every named concept must exist in `store`.
    pub fn parse(store: &KnowledgeStore, text: &str) -> HprResult<Self> {
        let mut rest = text.trim();
        let negated = match rest.strip_prefix('!') {
            Some(r) => {
                rest = r.trim_start();
                true
            }
            None => false,
        };

        let open = rest
            .find('(')
            .ok_or_else(|| HprError::InvalidQuestion(format!("missing '(' in '{text}'")))?;
        let close = rest
            .rfind(')')
            .filter(|c| *c > open)
            .ok_or_else(|| HprError::InvalidQuestion(format!("missing ')' in '{text}'")))?;

        let descriptor = lookup(store, &rest[..open])?
            .ok_or_else(|| HprError::InvalidQuestion(format!("no descriptor in '{text}'")))?;
        let inner = &rest[open + 1..close];
        let tail = rest[close + 1..].trim();

        let mut question = Self::new(descriptor);
        question.negated = negated;

        if let Some((first, second)) = inner.split_once(',') {
            let first = lookup(store, first)?;
            let second = lookup(store, second)?;
            question.argument = first;
            question.second_argument = second;
            question.multi_argument = true;
            return Ok(question);
        }
        question.argument = lookup(store, inner)?;

        if !tail.is_empty() {
            let body = tail
                .strip_prefix('=')
                .map(str::trim)
                .and_then(|t| t.strip_prefix('{'))
                .and_then(|t| t.strip_suffix('}'))
                .ok_or_else(|| {
                    HprError::InvalidQuestion(format!("expected '={{...}}' in '{text}'"))
                })?;
            question.referent = lookup(store, body)?;
        }
        Ok(question)
    }

    /// Text form with concept names from `store`.
    pub fn text(&self, store: &KnowledgeStore) -> String {
        let name = |slot: Option<NodeId>| slot.map(|n| store.name(n)).unwrap_or("?");
        let mut out = String::new();
        if self.negated {
            out.push('!');
        }
        if self.multi_argument {
            out.push_str(&format!(
                "{}({}, {})",
                name(self.descriptor),
                name(self.argument),
                name(self.second_argument)
            ));
        } else {
            out.push_str(&format!(
                "{}({})={{{}}}",
                name(self.descriptor),
                name(self.argument),
                name(self.referent)
            ));
        }
        out
    }
}

fn lookup(store: &KnowledgeStore, raw: &str) -> HprResult<Option<NodeId>> {
    let name = raw.trim();
    if name.is_empty() || name == "?" {
        return Ok(None);
    }
    store
        .find_concept(name)
        .map(Some)
        .ok_or_else(|| HprError::InvalidQuestion(format!("unknown concept '{name}'")))
}

/// The working form of a question inside the reasoner.
///
/// The descriptor is always bound; operators rewrite slots and recurse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Goal {
    pub descriptor: NodeId,
    pub argument: Option<NodeId>,
    pub referent: Option<NodeId>,
    pub time: ContextSlot,
    pub location: ContextSlot,
    pub kind: RelationKind,
    pub certainty: f32,
}

impl Goal {
    pub fn from_question(q: &Question) -> Option<Self> {
        Some(Self {
            descriptor: q.descriptor?,
            argument: q.argument,
            referent: q.referent,
            time: q.time,
            location: q.location,
            kind: q.kind,
            certainty: q.certainty,
        })
    }

    pub fn new(descriptor: NodeId, argument: Option<NodeId>, referent: Option<NodeId>) -> Self {
        Self {
            descriptor,
            argument,
            referent,
            time: ContextSlot::Ignore,
            location: ContextSlot::Ignore,
            kind: RelationKind::Property,
            certainty: DEFAULT_CERTAINTY,
        }
    }

    pub fn with_descriptor(mut self, descriptor: NodeId) -> Self {
        self.descriptor = descriptor;
        self
    }

    pub fn with_argument(mut self, argument: Option<NodeId>) -> Self {
        self.argument = argument;
        self
    }

    pub fn with_referent(mut self, referent: Option<NodeId>) -> Self {
        self.referent = referent;
        self
    }

    pub fn has_context(&self) -> bool {
        self.time != ContextSlot::Ignore || self.location != ContextSlot::Ignore
    }

    pub fn text(&self, store: &KnowledgeStore) -> String {
        let name = |slot: Option<NodeId>| slot.map(|n| store.name(n)).unwrap_or("?");
        format!(
            "{}({})={{{}}}",
            store.name(self.descriptor),
            name(self.argument),
            name(self.referent)
        )
    }

    /// The statement this goal concludes with `answer` filled into the open slot.
    pub fn conclusion(&self, store: &KnowledgeStore, answer: NodeId, negative: bool) -> String {
        let name = |slot: Option<NodeId>| slot.map(|n| store.name(n)).unwrap_or("?");
        let (arg, refr) = match (self.argument, self.referent) {
            (None, _) => (store.name(answer), name(self.referent)),
            (_, None) => (name(self.argument), store.name(answer)),
            _ => (name(self.argument), name(self.referent)),
        };
        let neg = if negative { "¬" } else { "" };
        format!("{neg}{}({arg})={{{refr}}}", store.name(self.descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CertaintyVector, SourceType};

    fn store() -> KnowledgeStore {
        let mut s = KnowledgeStore::new();
        s.add_triple("sparrow", "ISA", "bird", CertaintyVector::new())
            .unwrap();
        s.add_concept("color", SourceType::Unknown).unwrap();
        s
    }

    #[test]
    fn parse_find_referent() {
        let s = store();
        let q = Question::parse(&s, "ISA(sparrow)={?}").unwrap();
        assert_eq!(q.descriptor, Some(s.vocab().isa));
        assert_eq!(q.argument, s.find_concept("sparrow"));
        assert_eq!(q.referent, None);
        assert_eq!(q.text(&s), "ISA(sparrow)={?}");
    }

    #[test]
    fn parse_yes_no_and_negation() {
        let s = store();
        let q = Question::parse(&s, "!ISA(sparrow)={bird}").unwrap();
        assert!(q.negated);
        assert_eq!(q.referent, s.find_concept("bird"));
    }

    #[test]
    fn parse_multi_argument() {
        let s = store();
        let q = Question::parse(&s, "COMPARE(sparrow, bird)").unwrap();
        assert!(q.multi_argument);
        assert_eq!(q.second_argument, s.find_concept("bird"));
    }

    #[test]
    fn parse_rejects_unknown_and_malformed() {
        let s = store();
        assert!(matches!(
            Question::parse(&s, "ISA(penguin)={?}"),
            Err(HprError::InvalidQuestion(_))
        ));
        assert!(Question::parse(&s, "ISA sparrow").is_err());
        assert!(Question::parse(&s, "ISA(sparrow)=bird").is_err());
    }
}
