//! Abduction, causality and attribute inferences. Disabled by default.

use crate::types::{ConditionalType, HprResult, Pos};

use super::answer::{Answer, TraceLine};
use super::history::Inference;
use super::question::Goal;
use super::reasoner::Reasoner;

impl<'a> Reasoner<'a> {
    /// From `IF A THEN C` and an observed `C`, conclude `A` with reduced certainty.
    pub(super) fn abduction(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let Some(argument) = goal.argument else {
            return Ok(Vec::new());
        };
        let Some(key) = self.enter(Inference::Abduction, goal) else {
            return Ok(Vec::new());
        };
        let store = self.store;
        let imp = store.vocab().imp;
        let mut answers = Vec::new();

        for antecedent in self.rule_statements(goal.descriptor, false) {
            let Some(ante) = store.statement(antecedent) else {
                continue;
            };
            if let Some(referent) = goal.referent {
                if referent != ante.referent {
                    continue;
                }
            }
            let Some(kind) = self.kind_of(argument, ante.argument) else {
                continue;
            };

            let rules = store.targets_of(antecedent, imp, ConditionalType::NotConditional, &[]);
            for rule in rules {
                let Some(cons) = store.statement(rule.node) else {
                    continue;
                };
                let reference = self.compose_reference(Some(rule.statement));
                self.history.push_line(TraceLine::new(
                    format!(
                        "*IF* {} *THEN* {} (ABDUCTION)",
                        store.statement_text(antecedent),
                        store.statement_text(rule.node)
                    ),
                    rule.certainty.to_string(),
                    reference,
                ));
                self.push_conclusion(Inference::Abduction);
                let observed = Goal::new(cons.relation_type, Some(argument), Some(cons.referent));
                let found = self.recall(&observed, None)?;
                self.history.pop_lines(2);

                for mut answer in found {
                    if !self.is_yes(&answer) {
                        continue;
                    }
                    if goal.referent.is_none() {
                        answer.retarget(store, ante.referent);
                    }
                    let c = &rule.certainty;
                    answer.set_value(
                        self.config.abduction_degradation
                            * c.certainty
                            * c.conditional_likelihood
                            * kind.certainty
                            * answer.value(),
                    );
                    let conclusion = goal.conclusion(store, answer.node, answer.negative);
                    answer.conclude(Inference::Abduction, self.depth, &conclusion);
                    answers.push(answer);
                }
            }
        }

        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }

    /// Descriptors that cause the asked one stand in for it.
    pub(super) fn causality(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let Some(key) = self.enter(Inference::Causality, goal) else {
            return Ok(Vec::new());
        };
        let store = self.store;
        let causes = store.vocab().causes;
        let mut links = store.sources(goal.descriptor, causes);
        if !links.is_empty() && self.config.is_enabled(Inference::Tdep) {
            links.extend(self.tdep_relation(goal.descriptor, causes, None)?);
        }

        let mut answers = Vec::new();
        for cause in links {
            let reference = self.compose_reference(Some(cause.statement));
            self.history.push_line(TraceLine::new(
                format!(
                    "{} CAUSES {}",
                    store.name(cause.node),
                    store.name(goal.descriptor)
                ),
                cause.certainty.to_string(),
                reference,
            ));
            self.push_conclusion(Inference::Causality);
            let found = self.recall(&goal.with_descriptor(cause.node), None)?;
            self.history.pop_lines(2);

            for mut answer in found {
                let c = &cause.certainty;
                answer.set_value(c.certainty * c.conditional_likelihood * answer.value());
                let conclusion = goal.conclusion(store, answer.node, answer.negative);
                answer.conclude(Inference::Causality, self.depth, &conclusion);
                answers.push(answer);
            }
        }

        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }

    /// Move between `IS(x)={adjective}` and the attribute the adjective values.
    ///
    /// `IS(x)={tall}` with `ATTRIBUTE(tall)={height}` becomes `height(x)={?}`;
    /// `height(x)={?}` is answered by whichever adjective of height `x` IS.
    pub(super) fn attribute(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let Some(key) = self.enter(Inference::Attribute, goal) else {
            return Ok(Vec::new());
        };
        let store = self.store;
        let vocab = store.vocab();
        let descriptor_pos = store.get(goal.descriptor).map(|n| n.pos());
        let referent_pos = goal.referent.and_then(|r| store.get(r)).map(|n| n.pos());
        let mut answers = Vec::new();

        if goal.descriptor == vocab.is
            && matches!(
                referent_pos,
                Some(Pos::Adjective) | Some(Pos::SatelliteAdjective)
            )
        {
            if let Some(referent) = goal.referent {
                for attr in store.targets(referent, vocab.attribute) {
                    self.history.push_line(TraceLine::new(
                        format!(
                            "{} ATTRIBUTE {}",
                            store.name(referent),
                            store.name(attr.node)
                        ),
                        attr.certainty.to_string(),
                        self.compose_reference(Some(attr.statement)),
                    ));
                    self.push_conclusion(Inference::Attribute);
                    let found = self.recall(&goal.with_descriptor(attr.node), None)?;
                    self.history.pop_lines(2);

                    for mut answer in found {
                        answer.set_value(attr.certainty.certainty * answer.value());
                        let conclusion = goal.conclusion(store, answer.node, answer.negative);
                        answer.conclude(Inference::Attribute, self.depth, &conclusion);
                        answers.push(answer);
                    }
                }
            }
        } else if descriptor_pos == Some(Pos::Noun) {
            let attrs = store.sources(goal.descriptor, vocab.attribute);
            for attr in attrs {
                if let Some(referent) = goal.referent {
                    if referent != attr.node {
                        continue;
                    }
                }
                self.history.push_line(TraceLine::new(
                    format!(
                        "{} ATTRIBUTE {}",
                        store.name(attr.node),
                        store.name(goal.descriptor)
                    ),
                    attr.certainty.to_string(),
                    self.compose_reference(Some(attr.statement)),
                ));
                self.push_conclusion(Inference::Attribute);
                let sub = goal
                    .with_descriptor(vocab.is)
                    .with_referent(Some(attr.node));
                let found = self.recall(&sub, None)?;
                self.history.pop_lines(2);

                let taken = if goal.referent.is_none() { 1 } else { found.len() };
                for mut answer in found.into_iter().take(taken) {
                    if goal.referent.is_none() {
                        if !self.is_yes(&answer) {
                            continue;
                        }
                        answer.retarget(store, attr.node);
                    }
                    answer.set_value(attr.certainty.certainty * answer.value());
                    let conclusion = goal.conclusion(store, answer.node, answer.negative);
                    answer.conclude(Inference::Attribute, self.depth, &conclusion);
                    answers.push(answer);
                }
            }
        }

        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }
}
