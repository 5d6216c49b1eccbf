//! Generalization, specialization, similarity and dissimilarity transforms.

use crate::graph::Neighbor;
use crate::types::{ConditionalType, HprResult, NodeId};

use super::answer::{Answer, TraceLine};
use super::history::Inference;
use super::question::Goal;
use super::reasoner::Reasoner;

/// The question slot an operator rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Argument,
    Referent,
    Descriptor,
}

/// Which hierarchical neighbors replace the focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// ISA and INSTANCE parents.
    Up,
    /// ISA and INSTANCE children.
    Down,
    /// SIM neighbors.
    Sideway,
    /// DIS neighbors.
    Askance,
}

impl Focus {
    pub(super) fn slot(self, goal: &Goal) -> Option<NodeId> {
        match self {
            Focus::Argument => goal.argument,
            Focus::Referent => goal.referent,
            Focus::Descriptor => Some(goal.descriptor),
        }
    }

    pub(super) fn replace(self, goal: &Goal, node: NodeId) -> Goal {
        match self {
            Focus::Argument => goal.with_argument(Some(node)),
            Focus::Referent => goal.with_referent(Some(node)),
            Focus::Descriptor => goal.with_descriptor(node),
        }
    }
}

fn inference_for(focus: Focus, direction: Direction) -> Inference {
    use Direction::*;
    match (focus, direction) {
        (Focus::Argument, Up) => Inference::Agen,
        (Focus::Argument, Down) => Inference::Aspec,
        (Focus::Argument, Sideway) => Inference::Asim,
        (Focus::Argument, Askance) => Inference::Adis,
        (Focus::Referent, Up) => Inference::Rgen,
        (Focus::Referent, Down) => Inference::Rspec,
        (Focus::Referent, Sideway) => Inference::Rsim,
        (Focus::Referent, Askance) => Inference::Rdis,
        (Focus::Descriptor, Up) => Inference::Dgen,
        (Focus::Descriptor, Down) => Inference::Dspec,
        (Focus::Descriptor, Sideway) => Inference::Dsim,
        (Focus::Descriptor, Askance) => Inference::Ddis,
    }
}

/// The most relevant context of a hierarchical link.
struct ContextChoice {
    /// Dependency intensity scaling the inference.
    intensity: f32,
    /// "D DEPENDS ON ..." text.
    text: String,
    verified: bool,
}

impl<'a> Reasoner<'a> {
    /// Substitute each hierarchical neighbor of the focus and recurse.
    pub(super) fn hierarchical(
        &mut self,
        goal: &Goal,
        focus: Focus,
        direction: Direction,
    ) -> HprResult<Vec<Answer>> {
        let Some(active) = focus.slot(goal) else {
            return Ok(Vec::new());
        };
        let inference = inference_for(focus, direction);
        let Some(key) = self.enter(inference, goal) else {
            return Ok(Vec::new());
        };

        let store = self.store;
        let neighbors = self.hierarchical_neighbors(active, direction);
        let sideways = matches!(direction, Direction::Sideway | Direction::Askance);
        let mut answers = Vec::new();

        for neighbor in neighbors {
            let link = match direction {
                Direction::Up => {
                    format!("{} ISA {}", store.name(active), store.name(neighbor.node))
                }
                Direction::Down => {
                    format!("{} ISA {}", store.name(neighbor.node), store.name(active))
                }
                Direction::Sideway => {
                    format!("{} SIM {}", store.name(active), store.name(neighbor.node))
                }
                Direction::Askance => {
                    format!("{} DIS {}", store.name(active), store.name(neighbor.node))
                }
            };

            let choice = if neighbor.contexts.is_empty() {
                None
            } else {
                Some(self.most_relevant_context(&neighbor.contexts, goal.descriptor)?)
            };
            let intensity = choice.as_ref().map(|c| c.intensity).unwrap_or(1.0);

            let reference = self.compose_reference(Some(neighbor.statement));
            self.history.push_line(TraceLine::new(
                link,
                neighbor.certainty.to_string(),
                reference,
            ));
            let mut pushed = 2;
            if let Some(c) = &choice {
                self.history.push_line(TraceLine::new(
                    c.text.clone(),
                    format!("[γ = {:.2}]", c.intensity),
                    "",
                ));
                pushed += 1;
            }
            self.push_conclusion(inference);

            let sub = focus.replace(goal, neighbor.node);
            let found = self.recall(&sub, None)?;
            self.history.pop_lines(pushed);

            for mut answer in found {
                // A neighbor's SIM/DIS link back to the focus is not an answer.
                if sideways && answer.node == active {
                    continue;
                }
                let value = self.hierarchical_certainty(
                    inference,
                    direction,
                    &neighbor,
                    answer.value(),
                    intensity,
                );
                answer.set_value(value);
                if direction == Direction::Askance {
                    answer.negative = true;
                }
                let conclusion = goal.conclusion(store, answer.node, answer.negative);
                answer.conclude(inference, self.depth, &conclusion);
                if let Some(c) = &choice {
                    if !c.verified {
                        answer.conditions.push(c.text.clone());
                    }
                }
                answers.push(answer);
            }
        }

        let answers = self.combine_evidences(answers);
        self.leave(key)?;
        Ok(answers)
    }

    /// Direct neighbors of `node` in the given direction, with their contexts.
    pub(super) fn hierarchical_neighbors(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> Vec<Neighbor> {
        let store = self.store;
        let v = store.vocab();
        let contexts = [v.cx, v.cx_domain];
        let plain = ConditionalType::NotConditional;
        match direction {
            Direction::Up => {
                let mut out = store.targets_of(node, v.isa, plain, &contexts);
                out.extend(store.targets(node, v.instance));
                out
            }
            Direction::Down => {
                let mut out = store.sources_of(node, v.isa, plain, &contexts);
                out.extend(store.sources(node, v.instance));
                out
            }
            Direction::Sideway => store.sources_of(node, v.sim, plain, &contexts),
            Direction::Askance => store.sources_of(node, v.dis, plain, &contexts),
        }
    }

    fn hierarchical_certainty(
        &self,
        inference: Inference,
        direction: Direction,
        link: &Neighbor,
        answer: f32,
        intensity: f32,
    ) -> f32 {
        let c = &link.certainty;
        match direction {
            Direction::Up | Direction::Down => {
                let turned_over = inference
                    .turnover()
                    .map(|opposite| self.history.contains_kind(opposite))
                    .unwrap_or(false);
                let penalty = if turned_over {
                    self.config.gen_spec_degradation
                } else {
                    1.0
                };
                penalty * c.certainty * c.dominance * answer * intensity
            }
            Direction::Sideway => c.certainty * c.similarity * answer * intensity,
            Direction::Askance => c.certainty * (1.0 - c.similarity) * answer * intensity,
        }
    }

    /// Pick the context whose dependency with `descriptor` is strongest.
    fn most_relevant_context(
        &mut self,
        contexts: &[Neighbor],
        descriptor: NodeId,
    ) -> HprResult<ContextChoice> {
        let store = self.store;
        let mut elite: Option<(NodeId, f32)> = None;
        let mut unverified: Vec<&str> = Vec::new();

        for context in contexts {
            let intensity = self.dependency_intensity(context.node, descriptor)?;
            if intensity < self.config.min_dependency_intensity {
                unverified.push(store.name(context.node));
                continue;
            }
            match elite {
                Some((_, best)) if best >= intensity => {}
                _ => elite = Some((context.node, intensity)),
            }
        }

        Ok(match elite {
            Some((node, intensity)) => ContextChoice {
                intensity,
                text: format!("{} DEPENDS ON {}", store.name(descriptor), store.name(node)),
                verified: true,
            },
            None => ContextChoice {
                intensity: self.config.unverified_context_intensity,
                text: format!(
                    "{} DEPENDS ON {} (UNVERIFIED CONDITION)",
                    store.name(descriptor),
                    unverified.join(" OR ")
                ),
                verified: false,
            },
        })
    }

    /// How strongly `dependent` depends on `impressor`.
    ///
    /// 1 for the same node, otherwise the certainty of the first YES among
    /// DEP, DEP+, DEP- (impressor)={dependent} and ISA(dependent)={impressor}.
    pub(super) fn dependency_intensity(
        &mut self,
        impressor: NodeId,
        dependent: NodeId,
    ) -> HprResult<f32> {
        if impressor == dependent {
            return Ok(1.0);
        }
        let v = self.store.vocab();
        let mut probes: Vec<Goal> = v
            .dependencies()
            .iter()
            .map(|rel| Goal::new(*rel, Some(impressor), Some(dependent)))
            .collect();
        probes.push(Goal::new(v.isa, Some(dependent), Some(impressor)));

        for probe in probes {
            let found = self.recall(&probe, None)?;
            if let Some(first) = found.first() {
                if self.is_yes(first) {
                    return Ok(first.value());
                }
            }
        }
        Ok(0.0)
    }
}
