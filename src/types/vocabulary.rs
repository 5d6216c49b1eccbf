//! The core vocabulary: fixed relation and value nodes every store carries.

use super::concept::NodeId;

macro_rules! core_vocabulary {
    ($($field:ident => $name:literal,)*) => {
        /// Handles to the core nodes bootstrapped by every knowledge store.
        ///
        /// The reasoner compares these by identity; they are created once per
        /// store and never renamed or deleted.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct CoreVocabulary {
            $(pub $field: NodeId,)*
        }

        impl CoreVocabulary {
            /// Names of all core nodes, in bootstrap order.
            pub const NAMES: &'static [&'static str] = &[$($name,)*];

            /// Build the vocabulary by allocating each core node in order.
            pub fn bootstrap<E>(
                mut allocate: impl FnMut(&'static str) -> Result<NodeId, E>,
            ) -> Result<Self, E> {
                Ok(Self {
                    $($field: allocate($name)?,)*
                })
            }

            /// Every core node paired with its name.
            pub fn all(&self) -> Vec<(&'static str, NodeId)> {
                vec![$(($name, self.$field),)*]
            }
        }
    };
}

core_vocabulary! {
    isa => "ISA",
    has_type => "HASTYPE",
    part_of => "PARTOF",
    has_part => "HASPART",
    instance => "INSTANCE",
    sim => "SIM",
    dis => "DIS",
    dep => "DEP",
    dep_positive => "DEP+",
    dep_negative => "DEP-",
    imp => "IMP",
    lex => "LEX",
    syn => "SYN",
    gloss => "GLOSS",
    example => "EXAMPLE",
    causes => "CAUSES",
    is => "IS",
    attribute => "ATTRIBUTE",
    reference => "REF",
    equivalency => "EQUIVALENCY",
    property => "PROPERTY",
    advantage => "ADVANTAGE",
    alias => "ALIAS",
    yes => "YES",
    no => "NO",
    high => "HIGH",
    low => "LOW",
    cx => "CX",
    cx_time => "CX:TIME",
    cx_location => "CX:LOCATION",
    cx_domain => "CX:DOMAIN",
    past => "PAST",
    present => "PRESENT",
    future => "FUTURE",
    compare => "COMPARE",
    similarity => "SIMILARITY",
    difference => "DIFFERENCE",
    inverse => "INVERSE",
    knowledge_dump => "KNOWLEDGE_DUMP",
    any => "ANY",
    related => "RELATED",
    not_mapped => "NOT_MAPPED",
    not_found => "NOT_FOUND",
    template => "TEMPLATE",
    href => "HREF",
}

impl CoreVocabulary {
    /// Relations that always exist in both directions.
    pub fn is_symmetric(&self, relation: NodeId) -> bool {
        relation == self.sim || relation == self.dis || relation == self.inverse
    }

    /// The dependency relations (unmarked, positive, negative).
    pub fn dependencies(&self) -> [NodeId; 3] {
        [self.dep, self.dep_positive, self.dep_negative]
    }

    /// Whether a node is one of the core vocabulary nodes.
    pub fn contains(&self, node: NodeId) -> bool {
        self.all().iter().any(|(_, id)| *id == node)
    }
}
