//! Identity and classification types for concepts and statements.

use serde::{Deserialize, Serialize};

/// Arena index of a node inside one knowledge store.
///
/// Indices are never reused within a store, so a stale id simply resolves to
/// nothing after its node is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lexical role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexicalType {
    /// A word sense, named `lemma#<pos><n>`.
    Sense,
    /// A synset, named with a `§`.
    Synset,
    /// Anything else.
    Any,
}

/// Conceptual role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConceptType {
    Statement,
    Event,
    Frame,
    Example,
    Gloss,
    Other,
}

impl ConceptType {
    /// Return a human-readable name for this concept type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Statement => "statement",
            Self::Event => "event",
            Self::Frame => "frame",
            Self::Example => "example",
            Self::Gloss => "gloss",
            Self::Other => "other",
        }
    }
}

/// The resource a piece of knowledge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    Core,
    WordNet,
    FarsNet,
    Quran,
    TafsirNemoone,
    Estelahname,
    FarhangQuran,
    Tebyan,
    Tts,
    Unknown,
}

impl SourceType {
    /// The single-character name prefix used in dumps, if the source has one.
    pub fn prefix(&self) -> Option<char> {
        match self {
            Self::FarsNet => Some('f'),
            Self::WordNet => Some('w'),
            Self::Estelahname => Some('e'),
            Self::Quran => Some('q'),
            Self::TafsirNemoone => Some('n'),
            Self::FarhangQuran => Some('h'),
            Self::Tebyan => Some('t'),
            Self::Tts => Some('s'),
            Self::Core | Self::Unknown => None,
        }
    }

    /// Map a name prefix character back to its source.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'f' => Some(Self::FarsNet),
            'w' => Some(Self::WordNet),
            'e' => Some(Self::Estelahname),
            'q' => Some(Self::Quran),
            'n' => Some(Self::TafsirNemoone),
            'h' => Some(Self::FarhangQuran),
            't' => Some(Self::Tebyan),
            's' => Some(Self::Tts),
            _ => None,
        }
    }

    /// Return a human-readable name for this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::WordNet => "wordnet",
            Self::FarsNet => "farsnet",
            Self::Quran => "quran",
            Self::TafsirNemoone => "tafsir_nemoone",
            Self::Estelahname => "estelahname",
            Self::FarhangQuran => "farhang_quran",
            Self::Tebyan => "tebyan",
            Self::Tts => "tts",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Part of speech of a sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pos {
    Noun,
    Verb,
    Adjective,
    SatelliteAdjective,
    Adverb,
    Any,
    /// Other categories such as conjunctions or prepositions.
    Unknown,
}

impl Pos {
    /// The tag character used in sense names (`bank#n2`).
    pub fn tag(&self) -> Option<char> {
        match self {
            Self::Noun => Some('n'),
            Self::Verb => Some('v'),
            Self::Adjective => Some('a'),
            Self::SatelliteAdjective => Some('s'),
            Self::Adverb => Some('r'),
            Self::Any | Self::Unknown => None,
        }
    }

    /// Parse a tag character; `u` and unrecognised characters mean any.
    pub fn from_tag(c: char) -> Self {
        match c {
            'n' => Self::Noun,
            'v' => Self::Verb,
            'a' => Self::Adjective,
            's' => Self::SatelliteAdjective,
            'r' => Self::Adverb,
            _ => Self::Any,
        }
    }

    /// The part of speech encoded after the `#` of a sense name.
    pub fn from_sense_name(name: &str) -> Self {
        match name.find('#') {
            Some(i) => name[i + 1..].chars().next().map_or(Self::Any, Self::from_tag),
            None => Self::Any,
        }
    }

    /// Return a human-readable name for this part of speech.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::SatelliteAdjective => "satellite_adjective",
            Self::Adverb => "adverb",
            Self::Any => "any",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a part of speech from a tag character or a full name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "n" | "noun" => Some(Self::Noun),
            "v" | "verb" => Some(Self::Verb),
            "a" | "adjective" => Some(Self::Adjective),
            "s" | "satellite_adjective" => Some(Self::SatelliteAdjective),
            "r" | "adverb" => Some(Self::Adverb),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Role of a statement in implication rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionalType {
    /// A plain fact.
    NotConditional,
    /// `IF X => ...`
    Antecedent,
    /// `IF ... => X`
    Consequent,
    /// Chained rules where X is both.
    Both,
}

impl ConditionalType {
    /// Join an incoming role into the current one.
    ///
    /// Antecedent and consequent combine to both; a plain statement takes
    /// any incoming role; an established role is only widened.
    pub fn merge(self, incoming: Self) -> Self {
        match (self, incoming) {
            (Self::Antecedent, Self::Consequent) | (Self::Consequent, Self::Antecedent) => {
                Self::Both
            }
            (Self::NotConditional, new) => new,
            (_, Self::Both) => Self::Both,
            (current, _) => current,
        }
    }

    /// Whether the statement is the left side of an implication.
    pub fn is_antecedent(self) -> bool {
        matches!(self, Self::Antecedent | Self::Both)
    }

    /// Whether the statement is the right side of an implication.
    pub fn is_consequent(self) -> bool {
        matches!(self, Self::Consequent | Self::Both)
    }

    /// Return a human-readable name for this role.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotConditional => "not_conditional",
            Self::Antecedent => "antecedent",
            Self::Consequent => "consequent",
            Self::Both => "antecedent_and_consequent",
        }
    }
}
