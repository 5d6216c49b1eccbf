//! Descriptor inverse, ambiguation and disambiguation.

use crate::graph::names;
use crate::types::{HprResult, Pos, DEFAULT_CERTAINTY, SENSE_MARKER};

use super::answer::{Answer, TraceLine};
use super::hierarchical::Focus;
use super::history::Inference;
use super::question::{Goal, RelationKind};
use super::reasoner::Reasoner;

/// A rewritten goal and the trace line explaining the rewrite.
struct Variant {
    goal: Goal,
    line: String,
    certainty: f32,
}

impl<'a> Reasoner<'a> {
    /// Ask the inverse relation with argument and referent swapped.
    pub(super) fn inverse(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let Some(key) = self.enter(Inference::Inverse, goal) else {
            return Ok(Vec::new());
        };
        let store = self.store;
        let inverses = store.targets(goal.descriptor, store.vocab().inverse);

        let mut answers = Vec::new();
        for inverse in inverses {
            let reference = self.compose_reference(Some(inverse.statement));
            self.history.push_line(TraceLine::new(
                format!(
                    "{} INVERSE {}",
                    store.name(goal.descriptor),
                    store.name(inverse.node)
                ),
                inverse.certainty.to_string(),
                reference,
            ));
            self.push_conclusion(Inference::Inverse);
            let sub = Goal {
                descriptor: inverse.node,
                argument: goal.referent,
                referent: goal.argument,
                ..*goal
            };
            let found = self.recall(&sub, None)?;
            self.history.pop_lines(2);

            for mut answer in found {
                answer.set_value(inverse.certainty.certainty * answer.value());
                let conclusion = goal.conclusion(store, answer.node, answer.negative);
                answer.conclude(Inference::Inverse, self.depth, &conclusion);
                answers.push(answer);
            }
        }

        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }

    /// Drop the sense suffix of whichever slots carry one.
    pub(super) fn ambiguation(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let Some(key) = self.enter(Inference::Ambiguation, goal) else {
            return Ok(Vec::new());
        };
        let store = self.store;

        let mut variants = Vec::new();
        for focus in [Focus::Descriptor, Focus::Argument, Focus::Referent] {
            let Some(node) = focus.slot(goal) else {
                continue;
            };
            let Some(lemma) = names::lemma_of(store.name(node)) else {
                continue;
            };
            if let Some(general) = store.find_concept(lemma) {
                variants.push(Variant {
                    goal: focus.replace(goal, general),
                    line: format!(
                        "{} AMBIGUATES TO {}",
                        store.name(node),
                        store.name(general)
                    ),
                    certainty: DEFAULT_CERTAINTY,
                });
            }
        }

        let answers = self.try_variants(goal, Inference::Ambiguation, variants)?;
        self.leave(key)?;
        Ok(answers)
    }

    /// Try every sense of whichever slots carry no sense suffix.
    pub(super) fn disambiguation(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let Some(key) = self.enter(Inference::Disambiguation, goal) else {
            return Ok(Vec::new());
        };
        let store = self.store;
        let vocab = store.vocab();

        let descriptor_pos = match goal.kind {
            RelationKind::Property => Pos::Noun,
            RelationKind::Verb => Pos::Verb,
        };
        let referent_pos = if goal.descriptor == vocab.is {
            Pos::Adjective
        } else {
            Pos::Noun
        };

        let mut variants = Vec::new();
        for (focus, pos) in [
            (Focus::Descriptor, descriptor_pos),
            (Focus::Argument, Pos::Any),
            (Focus::Referent, referent_pos),
        ] {
            let Some(node) = focus.slot(goal) else {
                continue;
            };
            let name = store.name(node);
            if name.contains(SENSE_MARKER) {
                continue;
            }
            for sense in self.senses_from_lemma(name, pos) {
                let mut sub = focus.replace(goal, sense);
                sub.certainty = DEFAULT_CERTAINTY;
                variants.push(Variant {
                    goal: sub,
                    line: format!("{} DISAMBIGUATES TO {}", name, store.name(sense)),
                    certainty: DEFAULT_CERTAINTY,
                });
            }
        }

        let answers = self.try_variants(goal, Inference::Disambiguation, variants)?;
        self.leave(key)?;
        Ok(answers)
    }

    fn try_variants(
        &mut self,
        goal: &Goal,
        inference: Inference,
        variants: Vec<Variant>,
    ) -> HprResult<Vec<Answer>> {
        let store = self.store;
        let mut answers = Vec::new();
        for variant in variants {
            self.history.push_line(TraceLine::new(
                variant.line,
                format!("[γ = {:.5}]", variant.certainty),
                "",
            ));
            self.push_conclusion(inference);
            let found = self.recall(&variant.goal, None)?;
            self.history.pop_lines(2);

            for mut answer in found {
                answer.set_value(variant.certainty * answer.value());
                let conclusion = goal.conclusion(store, answer.node, answer.negative);
                answer.conclude(inference, self.depth, &conclusion);
                answers.push(answer);
            }
        }
        Ok(self.combine_evidences(answers))
    }
}
