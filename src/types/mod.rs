//! All data types for the plausible reasoning library.

pub mod certainty;
pub mod concept;
pub mod error;
pub mod vocabulary;

pub use certainty::CertaintyVector;
pub use concept::{ConceptType, ConditionalType, LexicalType, NodeId, Pos, SourceType};
pub use error::{HprError, HprResult};
pub use vocabulary::CoreVocabulary;

/// The "unspecified" value of every certainty dimension.
pub const DEFAULT_CERTAINTY: f32 = 0.99;

/// Marks a word sense: `bank#n2`.
pub const SENSE_MARKER: char = '#';

/// Marks a synset name.
pub const SYNSET_MARKER: char = '§';

/// Separates a single-character source prefix from the name: `f˸water`.
pub const SOURCE_MARKER: char = '˸';

/// Encodes an embedded line break in dumps.
pub const LINE_BREAK_MARKER: char = '¶';

/// Returns the current UTC time formatted for dump headers.
pub fn now_stamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
