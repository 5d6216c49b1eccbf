//! The semantic graph: nodes, edge chains and the knowledge store.

pub mod edge_chain;
pub mod inspect;
pub mod knowledge_store;
pub mod names;
pub mod neighbors;
pub mod node;
pub mod traversal;

pub use edge_chain::{ChainLink, EdgeChain};
pub use knowledge_store::{KnowledgeStore, MatchType, NameHandling, Statistics, StoreMode};
pub use neighbors::Neighbor;
pub use node::{ConceptNode, NodeKind, StatementData};
