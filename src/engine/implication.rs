//! Derivation from implication rules (DIMP) and the kind-of test.

use std::collections::HashSet;

use crate::graph::Neighbor;
use crate::types::{CertaintyVector, ConditionalType, HprResult, NodeId, DEFAULT_CERTAINTY};

use super::answer::{Answer, Placeholder, TraceLine};
use super::hierarchical::Direction;
use super::history::Inference;
use super::question::Goal;
use super::reasoner::Reasoner;

impl<'a> Reasoner<'a> {
    /// Answer from `IF ... THEN descriptor(x)={y}` rules and from descriptors
    /// that imply the asked one.
    pub(super) fn dimp(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let Some(key) = self.enter(Inference::Dimp, goal) else {
            return Ok(Vec::new());
        };
        let mut answers = self.dimp_full(goal)?;
        answers.extend(self.dimp_partial(goal)?);
        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }

    fn dimp_full(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let store = self.store;
        let imp = store.vocab().imp;
        let mut answers = Vec::new();

        for consequent in self.rule_statements(goal.descriptor, true) {
            let Some(cons) = store.statement(consequent) else {
                continue;
            };
            let (cons_arg, cons_ref) = (cons.argument, cons.referent);
            if let Some(referent) = goal.referent {
                if referent != cons_ref {
                    continue;
                }
            }
            let kind = match goal.argument {
                Some(argument) => match self.kind_of(argument, cons_arg) {
                    Some(kind) => Some(kind),
                    None => continue,
                },
                None => None,
            };

            let rules = store.sources_of(consequent, imp, ConditionalType::NotConditional, &[]);
            for rule in rules {
                let Some(ante) = store.statement(rule.node) else {
                    continue;
                };
                let reference = self.compose_reference(Some(rule.statement));
                self.history.push_line(TraceLine::new(
                    format!(
                        "*IF* {} *THEN* {}",
                        store.statement_text(rule.node),
                        store.statement_text(consequent)
                    ),
                    rule.certainty.to_string(),
                    reference,
                ));
                let depth = self.depth;
                self.history
                    .push_line(TraceLine::pending(Placeholder::KindOf { depth }));
                self.push_conclusion(Inference::Dimp);

                let sub = goal
                    .with_descriptor(ante.relation_type)
                    .with_referent(Some(ante.referent));
                let found = self.recall(&sub, None)?;
                self.history.pop_lines(3);

                for mut answer in found {
                    let (isa_text, kind) = match (goal.argument, kind) {
                        (None, _) => {
                            if answer.negative {
                                continue;
                            }
                            let Some(kind) = self.kind_of(answer.node, cons_arg) else {
                                continue;
                            };
                            (kind_text(self, answer.node, cons_arg, &kind), kind)
                        }
                        (Some(argument), Some(kind)) => {
                            if !self.is_yes(&answer) {
                                continue;
                            }
                            if goal.referent.is_none() {
                                answer.retarget(store, cons_ref);
                            }
                            (kind_text(self, argument, cons_arg, &kind), kind)
                        }
                        (Some(_), None) => continue,
                    };

                    answer.fill_placeholder(Placeholder::KindOf { depth }, &isa_text);
                    let c = &rule.certainty;
                    answer.set_value(
                        c.certainty * c.conditional_likelihood * kind.certainty * answer.value(),
                    );
                    let conclusion = goal.conclusion(store, answer.node, answer.negative);
                    answer.conclude(Inference::Dimp, depth, &conclusion);
                    answers.push(answer);
                }
            }
        }
        Ok(answers)
    }

    /// Descriptors `P` with `P IMP descriptor` stand in for the descriptor.
    fn dimp_partial(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let store = self.store;
        let imp = store.vocab().imp;
        let mut partials: Vec<Neighbor> = store.sources(goal.descriptor, imp);
        if partials.is_empty() {
            return Ok(Vec::new());
        }
        if self.config.is_enabled(Inference::Tdep) {
            partials.extend(self.tdep_relation(goal.descriptor, imp, None)?);
        }

        let mut answers = Vec::new();
        for partial in partials {
            let reference = self.compose_reference(Some(partial.statement));
            self.history.push_line(TraceLine::new(
                format!(
                    "{} IMPLIES {}",
                    store.name(partial.node),
                    store.name(goal.descriptor)
                ),
                partial.certainty.to_string(),
                reference,
            ));
            self.push_conclusion(Inference::Dimp);
            let found = self.recall(&goal.with_descriptor(partial.node), None)?;
            self.history.pop_lines(2);

            for mut answer in found {
                let c = &partial.certainty;
                answer.set_value(c.certainty * c.conditional_likelihood * answer.value());
                let conclusion = goal.conclusion(store, answer.node, answer.negative);
                answer.conclude(Inference::Dimp, self.depth, &conclusion);
                answers.push(answer);
            }
        }
        Ok(answers)
    }

    /// Whether `child` is a kind of `parent`, with the certainty of the link.
    ///
    /// Any node is fully a kind of the ANY wildcard. Otherwise the ISA and
    /// INSTANCE parents are searched depth first; the first path found wins
    /// and its certainties multiply.
    pub fn kind_of(&self, child: NodeId, parent: NodeId) -> Option<CertaintyVector> {
        if parent == self.store.vocab().any {
            return Some(CertaintyVector::uniform(1.0));
        }
        if child == parent {
            return Some(CertaintyVector::with_certainty(DEFAULT_CERTAINTY));
        }

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![(child, CertaintyVector::uniform(1.0))];
        while let Some((node, acc)) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            for up in self.hierarchical_neighbors(node, Direction::Up) {
                let chained = CertaintyVector {
                    certainty: acc.certainty * up.certainty.certainty,
                    dominance: acc.dominance * up.certainty.dominance,
                    ..up.certainty
                };
                if up.node == parent {
                    return Some(chained);
                }
                stack.push((up.node, chained));
            }
        }
        None
    }
}

fn kind_text(r: &Reasoner<'_>, child: NodeId, parent: NodeId, kind: &CertaintyVector) -> String {
    format!(
        "{} ISA {} : {}",
        r.store.name(child),
        r.store.name(parent),
        kind
    )
}
