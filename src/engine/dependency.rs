//! Dependency inferences: marked dependency, transitive dependency and analogy.

use crate::graph::Neighbor;
use crate::types::{CertaintyVector, HprResult, NodeId};

use super::answer::{Answer, Placeholder, TraceLine};
use super::history::Inference;
use super::question::Goal;
use super::reasoner::Reasoner;

/// Sign of a dependency between two descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyType {
    /// DEP+: the dependent grows with the impressor.
    Positive,
    /// DEP-: the dependent shrinks as the impressor grows.
    Negative,
    /// DEP without a sign.
    Unmarked,
}

impl DependencyType {
    /// Sign of a two-step chain.
    pub fn chain(self, next: Self) -> Self {
        use DependencyType::*;
        match (self, next) {
            (Positive, Positive) | (Negative, Negative) => Positive,
            (Positive, Negative) | (Negative, Positive) => Negative,
            _ => Unmarked,
        }
    }
}

/// An impressor of some descriptor.
#[derive(Debug, Clone)]
pub(super) struct Dependency {
    pub link: Neighbor,
    pub kind: DependencyType,
}

impl<'a> Reasoner<'a> {
    /// Impressors of `node` over the dependency relations of the given kinds.
    pub(super) fn dependency_sources(
        &self,
        node: NodeId,
        kinds: &[DependencyType],
    ) -> Vec<Dependency> {
        let v = self.store.vocab();
        let mut out = Vec::new();
        for kind in kinds {
            let relation = match kind {
                DependencyType::Positive => v.dep_positive,
                DependencyType::Negative => v.dep_negative,
                DependencyType::Unmarked => v.dep,
            };
            out.extend(
                self.store
                    .sources(node, relation)
                    .into_iter()
                    .map(|link| Dependency { link, kind: *kind }),
            );
        }
        out
    }

    // ==================== DDEP ====================

    /// Derive from impressors marked DEP+ or DEP- on the descriptor.
    pub(super) fn ddep(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let Some(key) = self.enter(Inference::Ddep, goal) else {
            return Ok(Vec::new());
        };
        let mut answers = self.ddep_marked(goal, DependencyType::Positive)?;
        answers.extend(self.ddep_marked(goal, DependencyType::Negative)?);
        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }

    fn ddep_marked(&mut self, goal: &Goal, kind: DependencyType) -> HprResult<Vec<Answer>> {
        let store = self.store;
        let arrow = if kind == DependencyType::Positive {
            "(+)->"
        } else {
            "(-)->"
        };
        let impressors = self.dependency_sources(goal.descriptor, &[kind]);

        let mut answers = Vec::new();
        for impressor in impressors {
            let link = &impressor.link;
            let reference = self.compose_reference(Some(link.statement));
            self.history.push_line(TraceLine::new(
                format!(
                    "{} {} {}",
                    store.name(link.node),
                    arrow,
                    store.name(goal.descriptor)
                ),
                link.certainty.to_string(),
                reference,
            ));
            self.push_conclusion(Inference::Ddep);

            let mut found = Vec::new();
            match goal.referent {
                None => {
                    let sub = goal.with_descriptor(link.node);
                    for mut answer in self.recall(&sub, None)? {
                        if kind == DependencyType::Negative {
                            let Some(antonym) = store.antonym_of(answer.node) else {
                                continue;
                            };
                            answer.retarget(store, antonym);
                        }
                        found.push(answer);
                    }
                }
                Some(referent) => {
                    let altered = if kind == DependencyType::Negative {
                        store.antonym_of(referent)
                    } else {
                        Some(referent)
                    };
                    if let Some(altered) = altered {
                        let sub = goal
                            .with_descriptor(link.node)
                            .with_referent(Some(altered));
                        found = self.recall(&sub, None)?;
                    }
                }
            }
            self.history.pop_lines(2);

            for mut answer in found {
                let c = &link.certainty;
                answer.set_value(c.certainty * c.conditional_likelihood * answer.value());
                let conclusion = goal.conclusion(store, answer.node, answer.negative);
                answer.conclude(Inference::Ddep, self.depth, &conclusion);
                answers.push(answer);
            }
        }
        Ok(self.combine_evidences(answers))
    }

    // ==================== TDEP ====================

    /// Two-hop impressors of `descriptor` with combined sign and certainty.
    pub(super) fn tdep(
        &mut self,
        descriptor: NodeId,
        kinds: &[DependencyType],
    ) -> HprResult<Vec<Dependency>> {
        let goal = Goal::new(descriptor, None, None);
        let Some(key) = self.enter(Inference::Tdep, &goal) else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        for first in self.dependency_sources(descriptor, kinds) {
            for second in self.dependency_sources(first.link.node, kinds) {
                if second.link.node == descriptor {
                    continue;
                }
                let certainty = chain_certainty(&first.link.certainty, &second.link.certainty);
                out.push(Dependency {
                    link: Neighbor {
                        certainty,
                        ..second.link
                    },
                    kind: first.kind.chain(second.kind),
                });
            }
        }

        self.leave(key)?;
        Ok(out)
    }

    /// Transitive sources of `descriptor` over `relation`, skipping `starting`.
    pub(super) fn tdep_relation(
        &mut self,
        descriptor: NodeId,
        relation: NodeId,
        starting: Option<NodeId>,
    ) -> HprResult<Vec<Neighbor>> {
        let goal = Goal::new(descriptor, None, None);
        let Some(key) = self.enter(Inference::Tdep, &goal) else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        for first in self.store.sources(descriptor, relation) {
            if Some(first.node) == starting {
                continue;
            }
            let second_level = self.store.sources(first.node, relation);
            if second_level.is_empty() {
                continue;
            }
            for second in second_level {
                if second.node == descriptor {
                    continue;
                }
                out.push(Neighbor {
                    certainty: chain_certainty(&first.certainty, &second.certainty),
                    ..second
                });
            }
            for nested in self.tdep_relation(first.node, relation, Some(descriptor))? {
                out.push(Neighbor {
                    certainty: chain_certainty(&first.certainty, &nested.certainty),
                    ..nested
                });
            }
        }

        self.leave(key)?;
        Ok(out)
    }

    // ==================== DEPA ====================

    /// Dependency-based analogy.
    ///
    /// For `D(a)={?}` with an impressor `I` of `D`: find `I(a)={v}`, another
    /// argument `b` with `I(b)={v}`, then transfer `D(b)={r}` to `a`.
    pub(super) fn depa(&mut self, goal: &Goal) -> HprResult<Vec<Answer>> {
        let Some(argument) = goal.argument else {
            return Ok(Vec::new());
        };
        let Some(key) = self.enter(Inference::Depa, goal) else {
            return Ok(Vec::new());
        };

        let all = [
            DependencyType::Positive,
            DependencyType::Negative,
            DependencyType::Unmarked,
        ];
        let mut impressors = self.dependency_sources(goal.descriptor, &all);
        if impressors.is_empty() {
            self.leave(key)?;
            return Ok(Vec::new());
        }
        if self.config.is_enabled(Inference::Tdep) {
            impressors.extend(self.tdep(goal.descriptor, &all)?);
        }

        let mut answers = self.analogy(goal, argument, &impressors)?;
        if let Some(referent) = goal.referent {
            answers = self.adjust_yes_no(answers, referent);
        }

        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }

    fn analogy(
        &mut self,
        goal: &Goal,
        argument: NodeId,
        impressors: &[Dependency],
    ) -> HprResult<Vec<Answer>> {
        let store = self.store;
        let mut answers = Vec::new();

        for impressor in impressors {
            let imp = impressor.link.node;
            let primaries = self.recall(&goal.with_descriptor(imp).with_referent(None), None)?;

            for primary in primaries {
                let probe = Goal::new(imp, None, Some(primary.node));
                let seconds = self.recall(&probe, Some(argument))?;

                for second in seconds {
                    if second.node == argument || second.negative {
                        continue;
                    }
                    let reference = self.compose_reference(Some(impressor.link.statement));
                    self.history.push_line(TraceLine::new(
                        format!(
                            "{} -- DEPX --> {}",
                            store.name(imp),
                            store.name(goal.descriptor)
                        ),
                        impressor.link.certainty.to_string(),
                        reference,
                    ));
                    self.history.push_line(TraceLine::new(
                        format!(
                            "{}({})={{{}}}",
                            store.name(imp),
                            store.name(argument),
                            primary.name
                        ),
                        primary.certainty.to_string(),
                        self.compose_reference(primary.statement),
                    ));
                    self.history.push_line(TraceLine::new(
                        format!("{}({})={{{}}}", store.name(imp), second.name, primary.name),
                        second.certainty.to_string(),
                        self.compose_reference(second.statement),
                    ));
                    self.history.push_line(TraceLine::pending(Placeholder::Conclusion {
                        inference: Inference::Depa,
                        depth: self.depth,
                    }));

                    let transfer = goal.with_argument(Some(second.node)).with_referent(None);
                    let found = self.recall(&transfer, None)?;
                    self.history.pop_lines(4);

                    for mut answer in found {
                        let c = &impressor.link.certainty;
                        answer.set_value(
                            primary.value()
                                * second.value()
                                * answer.value()
                                * c.certainty
                                * c.conditional_likelihood,
                        );
                        let conclusion = goal.conclusion(store, answer.node, answer.negative);
                        answer.conclude(Inference::Depa, self.depth, &conclusion);
                        answers.push(answer);
                    }
                }
            }
        }
        Ok(answers)
    }

    /// Turn answers naming `referent` into YES answers.
    pub(super) fn adjust_yes_no(&self, answers: Vec<Answer>, referent: NodeId) -> Vec<Answer> {
        let yes = self.store.vocab().yes;
        answers
            .into_iter()
            .filter(|a| a.node == referent)
            .map(|mut a| {
                a.retarget(self.store, yes);
                a
            })
            .collect()
    }
}

/// γ and α of a two-link chain; the other dimensions stay unspecified.
fn chain_certainty(first: &CertaintyVector, second: &CertaintyVector) -> CertaintyVector {
    CertaintyVector {
        certainty: first.certainty * second.certainty,
        conditional_likelihood: first.conditional_likelihood * second.conditional_likelihood,
        ..CertaintyVector::new()
    }
}
