//! Synonymy: replace a sense by the other members of its synset.

use crate::types::{HprResult, LexicalType};

use super::answer::{Answer, TraceLine};
use super::hierarchical::Focus;
use super::history::Inference;
use super::question::Goal;
use super::reasoner::Reasoner;

impl<'a> Reasoner<'a> {
    pub(super) fn synonymy(&mut self, goal: &Goal, focus: Focus) -> HprResult<Vec<Answer>> {
        let Some(active) = focus.slot(goal) else {
            return Ok(Vec::new());
        };
        let inference = match focus {
            Focus::Argument => Inference::Asyn,
            Focus::Referent => Inference::Rsyn,
            Focus::Descriptor => Inference::Dsyn,
        };
        let Some(key) = self.enter(inference, goal) else {
            return Ok(Vec::new());
        };

        let store = self.store;
        let syn = store.vocab().syn;
        let is_sense = store
            .get(active)
            .map(|n| n.lexical_type() == LexicalType::Sense)
            .unwrap_or(false);

        let mut members = Vec::new();
        if is_sense {
            if let Some(synset) = store.targets(active, syn).into_iter().next() {
                members.extend(
                    store
                        .sources(synset.node, syn)
                        .into_iter()
                        .filter(|m| m.node != active),
                );
                members.push(synset);
            }
        }

        let mut answers = Vec::new();
        for member in members {
            let reference = self.compose_reference(Some(member.statement));
            self.history.push_line(TraceLine::new(
                format!("{} SYN {}", store.name(active), store.name(member.node)),
                member.certainty.to_string(),
                reference,
            ));
            self.push_conclusion(inference);
            let found = self.recall(&focus.replace(goal, member.node), None)?;
            self.history.pop_lines(2);

            for mut answer in found {
                answer.set_value(member.certainty.certainty * answer.value());
                let conclusion = goal.conclusion(store, answer.node, answer.negative);
                answer.conclude(inference, self.depth, &conclusion);
                answers.push(answer);
            }
        }

        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }
}
