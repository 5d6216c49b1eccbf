//! The reasoning engine: questions, inference operators and answers.

pub mod answer;
pub mod compare;
pub mod config;
pub mod dependency;
pub mod dormant;
pub mod hierarchical;
pub mod history;
pub mod implication;
pub mod lexicon;
pub mod question;
pub mod reasoner;
pub mod synonymy;
pub mod transform;

pub use answer::{Answer, AnswerSet, EmptyReason, Justification, ReasoningStats, TraceLine};
pub use compare::Comparison;
pub use config::ReasonerConfig;
pub use dependency::DependencyType;
pub use hierarchical::{Direction, Focus};
pub use history::{HistoryKey, Inference, ReasoningHistory};
pub use question::{ContextSlot, Question, RelationKind};
pub use reasoner::Reasoner;
