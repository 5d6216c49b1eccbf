//! Plausible reasoning over a semantic knowledge store.
//!
//! Concepts and statements live in a [`KnowledgeStore`]: a graph whose
//! statements (`descriptor(argument)={referent}`) are themselves nodes and
//! carry a nine-dimensional [`CertaintyVector`]. A [`Reasoner`] answers
//! [`Question`]s by direct recall and, failing that, by recursively applying
//! plausible inferences (generalization, similarity, dependency,
//! implication, ...) with certainty attenuated along each derivation.

pub mod cli;
pub mod engine;
pub mod format;
pub mod graph;
pub mod index;
pub mod types;

// Re-export commonly used types at the crate root
pub use engine::{
    Answer, AnswerSet, Comparison, EmptyReason, Inference, Question, Reasoner, ReasonerConfig,
};
pub use format::{read_csv, DumpReader, DumpWriter, ImportReport};
pub use graph::{KnowledgeStore, Neighbor, StatementData, Statistics, StoreMode};
pub use types::{
    CertaintyVector, ConditionalType, CoreVocabulary, HprError, HprResult, LexicalType, NodeId,
    Pos, SourceType, DEFAULT_CERTAINTY,
};
