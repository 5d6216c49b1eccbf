//! Error types for the plausible reasoning library.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur in the plausible reasoning library.
///
/// A concept or relation that cannot be found is not an error: lookups
/// return `Option` or an empty collection instead.
#[derive(Error, Debug)]
pub enum HprError {
    /// Concept names must not be empty.
    #[error("The concept name can't be empty")]
    EmptyName,

    /// A relation endpoint is a lexical-only node.
    #[error("Lexical node '{name}' can't take part in a relation")]
    LexicalEndpoint { name: String },

    /// A mutation was attempted while the store is locked.
    #[error("The knowledge store is locked against modification")]
    StoreLocked,

    /// Another concept already carries the requested name.
    #[error("A concept named '{name}' already exists")]
    DuplicateName { name: String },

    /// The single-character source prefix of a name is not recognised.
    #[error("Bad resource descriptor '{prefix}' in concept name")]
    UnknownSourcePrefix { prefix: char },

    /// A node referenced by a mutation does not exist (or was deleted).
    #[error("Node {0} not found")]
    NodeNotFound(String),

    /// A malformed line in a dump or CSV file.
    #[error("Bad line {line} in knowledge base: {message}")]
    ImportFormat { line: usize, message: String },

    /// Internal bookkeeping went out of order.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A question could not be built from the given text or nodes.
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    /// Failed to read a configuration file.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Failed to write a configuration file.
    #[error("Failed to write config {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HprError {
    /// Whether this error reports misuse of a graph mutation.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::LexicalEndpoint { .. }
                | Self::StoreLocked
                | Self::DuplicateName { .. }
                | Self::UnknownSourcePrefix { .. }
                | Self::NodeNotFound(_)
        )
    }
}

/// Convenience result type for plausible reasoning operations.
pub type HprResult<T> = Result<T, HprError>;
