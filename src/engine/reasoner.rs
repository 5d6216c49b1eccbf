//! The reasoner: guarded recursive recall with an operator fan-out.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Instant;

use crate::graph::KnowledgeStore;
use crate::types::{ConditionalType, HprError, HprResult, NodeId, SourceType};

use super::answer::{Answer, AnswerSet, EmptyReason, Placeholder, ReasoningStats, TraceLine};
use super::config::ReasonerConfig;
use super::hierarchical::{Direction, Focus};
use super::history::{HistoryKey, Inference, ReasoningHistory};
use super::question::{ContextSlot, Goal, Question};

/// Operator order when the referent is asked for.
const FIND_REFERENT: &[Inference] = &[
    Inference::Agen,
    Inference::Aspec,
    Inference::Asim,
    Inference::Adis,
    Inference::Asyn,
    Inference::Dgen,
    Inference::Dspec,
    Inference::Dsim,
    Inference::Ddis,
    Inference::Dsyn,
    Inference::Ddep,
    Inference::Dimp,
    Inference::Depa,
    Inference::Abduction,
    Inference::Causality,
    Inference::Attribute,
    Inference::Inverse,
    Inference::Ambiguation,
    Inference::Disambiguation,
];

/// Operator order when the argument is asked for.
const FIND_ARGUMENT: &[Inference] = &[
    Inference::Rgen,
    Inference::Rspec,
    Inference::Rsim,
    Inference::Rdis,
    Inference::Rsyn,
    Inference::Dgen,
    Inference::Dspec,
    Inference::Dsim,
    Inference::Ddis,
    Inference::Dsyn,
    Inference::Ddep,
    Inference::Dimp,
    Inference::Abduction,
    Inference::Causality,
    Inference::Attribute,
    Inference::Inverse,
    Inference::Ambiguation,
    Inference::Disambiguation,
];

/// Operator order for yes/no questions.
const VERIFY: &[Inference] = &[
    Inference::Dgen,
    Inference::Agen,
    Inference::Rgen,
    Inference::Aspec,
    Inference::Rspec,
    Inference::Dspec,
    Inference::Asim,
    Inference::Rsim,
    Inference::Dsim,
    Inference::Adis,
    Inference::Rdis,
    Inference::Ddis,
    Inference::Asyn,
    Inference::Dsyn,
    Inference::Rsyn,
    Inference::Ddep,
    Inference::Dimp,
    Inference::Depa,
    Inference::Abduction,
    Inference::Causality,
    Inference::Attribute,
    Inference::Inverse,
    Inference::Ambiguation,
    Inference::Disambiguation,
];

/// Answers questions over a shared, read-only knowledge store.
///
/// One reasoner serves one question at a time: depth, history and caches
/// are per-query state. Run one reasoner per concurrent query.
pub struct Reasoner<'a> {
    pub(super) store: &'a KnowledgeStore,
    pub(super) config: ReasonerConfig,
    pub(super) depth: u32,
    total_calls: u64,
    backtracks: u64,
    budget_exhausted: bool,
    pub(super) history: ReasoningHistory,
    /// `lemma#p` -> senses.
    pub(super) sense_cache: HashMap<String, Vec<NodeId>>,
    /// (relation type, consequent side?) -> rule statements.
    pub(super) statement_cache: HashMap<(NodeId, bool), Vec<NodeId>>,
}

impl<'a> Reasoner<'a> {
    pub fn new(store: &'a KnowledgeStore) -> Self {
        Self::with_config(store, ReasonerConfig::default())
    }

    pub fn with_config(store: &'a KnowledgeStore, config: ReasonerConfig) -> Self {
        let history = ReasoningHistory::new(config.max_trace_lines);
        Self {
            store,
            config,
            depth: 0,
            total_calls: 0,
            backtracks: 0,
            budget_exhausted: false,
            history,
            sense_cache: HashMap::new(),
            statement_cache: HashMap::new(),
        }
    }

    pub fn store(&self) -> &'a KnowledgeStore {
        self.store
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ReasonerConfig {
        &mut self.config
    }

    pub fn set_max_depth(&mut self, depth: u32) {
        self.config.max_depth = depth;
    }

    pub fn set_answer_cap(&mut self, cap: usize) {
        self.config.max_answers = cap;
    }

    // ==================== Entry point ====================

    /// Answer a question.
    ///
    /// Malformed questions and questions with no derivable answer come back
    /// as an empty set carrying the reason. Errors are reserved for broken
    /// internal bookkeeping.
    pub fn answer(&mut self, question: &Question) -> HprResult<AnswerSet> {
        let started = Instant::now();
        let text = question.text(self.store);
        self.reset();

        if let Err(why) = self.validate(question) {
            log::info!("{text}: not understood ({why})");
            return Ok(AnswerSet::empty(text, EmptyReason::InvalidQuestion(why)));
        }

        let mut set = AnswerSet::empty(text, EmptyReason::NotFound);
        let vocab = self.store.vocab();
        let descriptor = question.descriptor.unwrap_or(vocab.any);

        if question.multi_argument {
            if let (Some(a), Some(b)) = (question.argument, question.second_argument) {
                let (similarities, differences) = if descriptor == vocab.similarity {
                    (true, false)
                } else if descriptor == vocab.difference {
                    (false, true)
                } else {
                    (true, true)
                };
                let comparison = self.compare(a, b);
                set.structured_text = Some(comparison.render(similarities, differences));
                set.comparison = Some(comparison);
            }
        } else if descriptor == vocab.knowledge_dump && question.argument.is_some() {
            if let Some(arg) = question.argument {
                set.structured_text = Some(self.store.concept_dump(arg, 10));
            }
        } else if let Some(goal) = Goal::from_question(question) {
            let mut answers = self.recall(&goal, None)?;
            self.settle_polarity(&mut answers, question.negated);
            set.answers = answers;
        }

        set.stats = ReasoningStats {
            total_calls: self.total_calls,
            backtracks: self.backtracks,
            elapsed_ms: started.elapsed().as_millis() as u64,
            budget_exhausted: self.budget_exhausted,
        };
        set.empty_reason = if !set.answers.is_empty() || set.structured_text.is_some() {
            None
        } else if self.budget_exhausted {
            Some(EmptyReason::BudgetExhausted)
        } else {
            Some(EmptyReason::NotFound)
        };

        log::info!(
            "{}: {} answer(s), {} calls, {} backtracks",
            set.question,
            set.answers.len(),
            self.total_calls,
            self.backtracks
        );
        Ok(set)
    }

    fn reset(&mut self) {
        self.depth = 0;
        self.total_calls = 0;
        self.backtracks = 0;
        self.budget_exhausted = false;
        self.history = ReasoningHistory::new(self.config.max_trace_lines);
        self.sense_cache.clear();
        self.statement_cache.clear();
    }

    fn validate(&self, q: &Question) -> Result<(), String> {
        let Some(descriptor) = q.descriptor else {
            return Err("no descriptor".to_string());
        };
        for slot in [Some(descriptor), q.argument, q.referent, q.second_argument]
            .into_iter()
            .flatten()
        {
            if self.store.get(slot).is_none() {
                return Err(format!("node {slot} does not exist"));
            }
        }
        if q.multi_argument {
            if q.argument.is_none() || q.second_argument.is_none() {
                return Err("multi-argument questions need both arguments".to_string());
            }
        } else if q.argument.is_none() && q.referent.is_none() {
            return Err("argument and referent are both unknown".to_string());
        }
        Ok(())
    }

    /// Turn negative YES/NO answers into their opposite and apply question negation.
    fn settle_polarity(&self, answers: &mut [Answer], negated: bool) {
        let vocab = self.store.vocab();
        let opposite = |n: NodeId| {
            if n == vocab.yes {
                Some(vocab.no)
            } else if n == vocab.no {
                Some(vocab.yes)
            } else {
                None
            }
        };
        for answer in answers.iter_mut() {
            let Some(flipped) = opposite(answer.node) else {
                continue;
            };
            if answer.negative != negated {
                answer.retarget(self.store, flipped);
            }
            answer.negative = false;
        }
    }

    // ==================== Frames ====================

    /// Open an inference frame; `None` means backtrack.
    pub(super) fn enter(&mut self, inference: Inference, goal: &Goal) -> Option<HistoryKey> {
        self.depth += 1;
        self.total_calls += 1;

        if self.depth > self.config.max_depth {
            log::trace!("{} {}: BACKTRACK", self.depth, inference);
            self.backtracks += 1;
            self.depth -= 1;
            return None;
        }
        if self.total_calls > self.config.max_calls {
            if !self.budget_exhausted {
                log::debug!("step budget of {} calls exhausted", self.config.max_calls);
            }
            self.budget_exhausted = true;
            self.depth -= 1;
            return None;
        }

        let key = HistoryKey::new(
            inference,
            Some(goal.descriptor),
            goal.argument,
            goal.referent,
        );
        if self.history.contains(&key) {
            log::trace!("{} {}: recurrent question", self.depth, inference);
            self.depth -= 1;
            return None;
        }
        log::trace!("{} {} {}", self.depth, inference, goal.text(self.store));
        self.history.push(key);
        Some(key)
    }

    /// Close the frame opened by [`Reasoner::enter`].
    pub(super) fn leave(&mut self, key: HistoryKey) -> HprResult<()> {
        self.depth = self.depth.saturating_sub(1);
        self.history.pop(key)
    }

    /// Reserve the conclusion line of `inference` at the current depth.
    pub(super) fn push_conclusion(&mut self, inference: Inference) {
        self.history.push_line(TraceLine::pending(Placeholder::Conclusion {
            inference,
            depth: self.depth,
        }));
    }

    // ==================== Recall ====================

    /// Answer a goal directly from the store, then through the enabled operators.
    ///
    /// `excluded` is never returned as a direct answer.
    pub(crate) fn recall(
        &mut self,
        goal: &Goal,
        excluded: Option<NodeId>,
    ) -> HprResult<Vec<Answer>> {
        let Some(key) = self.enter(Inference::Recall, goal) else {
            return Ok(Vec::new());
        };

        let mut answers = self.direct_lookup(goal, excluded);

        if self.depth >= self.config.max_depth {
            self.backtracks += 1;
            let answers = self.combine_evidences(answers);
            self.leave(key)?;
            return Ok(answers);
        }
        if answers.len() >= self.config.max_answers {
            let answers = self.combine_evidences(answers);
            self.leave(key)?;
            return Ok(answers);
        }

        let plan = match (goal.argument, goal.referent) {
            (Some(_), None) => FIND_REFERENT,
            (None, Some(_)) => FIND_ARGUMENT,
            _ => VERIFY,
        };
        for op in plan {
            if self.config.is_enabled(*op) {
                let found = self.apply(*op, goal)?;
                answers.extend(found);
            }
        }

        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }

    fn apply(&mut self, op: Inference, goal: &Goal) -> HprResult<Vec<Answer>> {
        use Direction::*;
        use Focus::*;

        match op {
            // TDEP runs inside DEPA, DIMP and CAUSALITY, never on its own.
            Inference::Recall | Inference::Tdep => Err(HprError::InvariantViolation(format!(
                "{} is not a fan-out operator",
                op
            ))),
            Inference::Agen => self.hierarchical(goal, Argument, Up),
            Inference::Aspec => self.hierarchical(goal, Argument, Down),
            Inference::Asim => self.hierarchical(goal, Argument, Sideway),
            Inference::Adis => self.hierarchical(goal, Argument, Askance),
            Inference::Rgen => self.hierarchical(goal, Referent, Up),
            Inference::Rspec => self.hierarchical(goal, Referent, Down),
            Inference::Rsim => self.hierarchical(goal, Referent, Sideway),
            Inference::Rdis => self.hierarchical(goal, Referent, Askance),
            Inference::Dgen => self.hierarchical(goal, Descriptor, Up),
            Inference::Dspec => self.hierarchical(goal, Descriptor, Down),
            Inference::Dsim => self.hierarchical(goal, Descriptor, Sideway),
            Inference::Ddis => self.hierarchical(goal, Descriptor, Askance),
            Inference::Asyn => self.synonymy(goal, Argument),
            Inference::Rsyn => self.synonymy(goal, Referent),
            Inference::Dsyn => self.synonymy(goal, Descriptor),
            Inference::Ddep => self.ddep(goal),
            Inference::Depa => self.depa(goal),
            Inference::Dimp => self.dimp(goal),
            Inference::Inverse => self.inverse(goal),
            Inference::Ambiguation => self.ambiguation(goal),
            Inference::Disambiguation => self.disambiguation(goal),
            Inference::Abduction => self.abduction(goal),
            Inference::Causality => self.causality(goal),
            Inference::Attribute => self.attribute(goal),
        }
    }

    fn direct_lookup(&mut self, goal: &Goal, excluded: Option<NodeId>) -> Vec<Answer> {
        let store = self.store;
        let vocab = store.vocab();
        let mut hits: Vec<(Answer, String)> = Vec::new();

        match (goal.argument, goal.referent) {
            (Some(arg), None) => {
                for n in store.targets(arg, goal.descriptor) {
                    if Some(n.node) == excluded {
                        continue;
                    }
                    let text = store.statement_text(n.statement);
                    hits.push((Answer::from_neighbor(store, &n), text));
                }
            }
            (None, Some(referent)) => {
                for n in store.sources(referent, goal.descriptor) {
                    if Some(n.node) == excluded {
                        continue;
                    }
                    let text = store.statement_text(n.statement);
                    hits.push((Answer::from_neighbor(store, &n), text));
                }
            }
            (Some(arg), Some(referent)) if goal.has_context() => {
                hits = self.recall_contexts(goal, arg, referent);
            }
            (Some(arg), Some(referent)) => {
                for n in store.targets(arg, goal.descriptor) {
                    if n.node != referent {
                        continue;
                    }
                    let mut yes = Answer::new(store, vocab.yes, n.certainty);
                    yes.statement = Some(n.statement);
                    hits.push((yes, store.statement_text(n.statement)));
                }
            }
            (None, None) => {}
        }

        let mut answers = Vec::with_capacity(hits.len());
        for (mut answer, text) in hits {
            let reference = self.compose_reference(answer.statement);
            self.history
                .push_line(TraceLine::new(text, answer.certainty.to_string(), reference));
            answer.add_justification(self.history.lines());
            self.history.pop_lines(1);
            answers.push(answer);
        }
        answers
    }

    /// Time and location context questions.
    fn recall_contexts(
        &self,
        goal: &Goal,
        arg: NodeId,
        referent: NodeId,
    ) -> Vec<(Answer, String)> {
        let store = self.store;
        let vocab = store.vocab();
        let (cx, slot) = if goal.time != ContextSlot::Ignore {
            (vocab.cx_time, goal.time)
        } else {
            (vocab.cx_location, goal.location)
        };

        let statements = if referent == vocab.any {
            store.targets(arg, goal.descriptor)
        } else if arg == vocab.any {
            store.sources(referent, goal.descriptor)
        } else {
            store
                .targets(arg, goal.descriptor)
                .into_iter()
                .filter(|n| n.node == referent)
                .collect()
        };

        let mut hits = Vec::new();
        for statement in statements {
            for value in store.targets(statement.statement, cx) {
                let text = format!(
                    "{} {}={{{}}}",
                    store.statement_text(statement.statement),
                    store.name(cx),
                    store.name(value.node)
                );
                match slot {
                    ContextSlot::Find => {
                        let mut answer = Answer::from_neighbor(store, &value);
                        answer.set_value(value.certainty.certainty * statement.certainty.certainty);
                        hits.push((answer, text));
                    }
                    ContextSlot::Check(wanted) if wanted == value.node => {
                        let mut yes = Answer::new(store, vocab.yes, value.certainty);
                        yes.statement = Some(value.statement);
                        hits.push((yes, text));
                    }
                    _ => {}
                }
            }
        }
        hits
    }

    // ==================== Evidence ====================

    /// Merge candidate answers.
    ///
    /// Repeats of the same node and polarity combine as `a + b - ab` when
    /// they bring new derivations. Positive and negative evidence for one
    /// node fold into a signed net. The result is sorted by certainty, then
    /// by longer name, and cut to the answer cap.
    pub(super) fn combine_evidences(&self, answers: Vec<Answer>) -> Vec<Answer> {
        let mut distinct: Vec<Answer> = Vec::new();
        for answer in answers {
            match distinct
                .iter_mut()
                .find(|d| d.node == answer.node && d.negative == answer.negative)
            {
                Some(existing) => {
                    let fresh = existing.new_justifications_from(&answer);
                    if fresh.is_empty() {
                        continue;
                    }
                    let (a, b) = (existing.value(), answer.value());
                    existing.set_value(a + b - a * b);
                    existing.justifications.extend(fresh);
                    existing.conditions.extend(answer.conditions);
                }
                None => distinct.push(answer),
            }
        }

        let mut folded: Vec<Answer> = Vec::new();
        for answer in distinct {
            match folded.iter_mut().find(|f| f.node == answer.node) {
                Some(existing) => {
                    let net = signed(existing) + signed(&answer);
                    let negative = net < 0.0;
                    existing.set_value(net.abs());
                    if negative != existing.negative {
                        existing.negative = negative;
                        existing.justifications = answer.justifications;
                        existing.conditions = answer.conditions;
                    }
                }
                None => folded.push(answer),
            }
        }

        folded.sort_by(|a, b| {
            b.value()
                .partial_cmp(&a.value())
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.name.chars().count().cmp(&a.name.chars().count()))
        });
        folded.truncate(self.config.max_answers);
        folded
    }

    // ==================== Helpers ====================

    pub(super) fn is_yes(&self, answer: &Answer) -> bool {
        answer.node == self.store.vocab().yes && !answer.negative
    }

    /// Source and REF targets of a statement, for trace lines.
    pub(super) fn compose_reference(&self, statement: Option<NodeId>) -> String {
        let Some(statement) = statement else {
            return String::new();
        };
        let store = self.store;
        let source = store
            .get(statement)
            .map(|n| n.source())
            .unwrap_or(SourceType::Unknown);
        if source == SourceType::Unknown {
            return String::new();
        }
        let mut out = format!("SOURCE = {}", source.name());
        let refs = store.targets(statement, store.vocab().reference);
        if !refs.is_empty() {
            let names: Vec<&str> = refs.iter().map(|r| store.name(r.node)).collect();
            out.push_str(&format!(", REFERENCES = {{{}}}", names.join(", ")));
        }
        out
    }

    /// Rule statements of `relation` on the consequent side (or the antecedent side).
    pub(super) fn rule_statements(&mut self, relation: NodeId, consequent: bool) -> Vec<NodeId> {
        if let Some(cached) = self.statement_cache.get(&(relation, consequent)) {
            return cached.clone();
        }
        let found = self.store.statements_of(relation, |c: ConditionalType| {
            if consequent {
                c.is_consequent()
            } else {
                c.is_antecedent()
            }
        });
        self.statement_cache
            .insert((relation, consequent), found.clone());
        found
    }
}

fn signed(answer: &Answer) -> f32 {
    if answer.negative {
        -answer.value()
    } else {
        answer.value()
    }
}
