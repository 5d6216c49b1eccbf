//! Graph vertices: plain concepts and statements (relation instances).

use crate::types::{
    CertaintyVector, ConceptType, ConditionalType, LexicalType, NodeId, Pos, SourceType,
};

use super::edge_chain::EdgeChain;

/// The relation-instance part of a statement node: `Descriptor(Argument)={Referent}`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementData {
    /// The relation type (descriptor).
    pub relation_type: NodeId,
    /// Source end of the relation.
    pub argument: NodeId,
    /// Target end of the relation.
    pub referent: NodeId,
    /// Confidence of this relation instance.
    pub certainty: CertaintyVector,
    /// Role in implication rules.
    pub conditional: ConditionalType,
}

/// What kind of vertex a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A concept or relation type.
    Concept,
    /// A relation instance that is itself addressable as a node.
    Statement(StatementData),
}

/// A vertex of the knowledge graph.
#[derive(Debug, Clone)]
pub struct ConceptNode {
    pub(crate) name: String,
    pub(crate) id: u64,
    pub(crate) kind: NodeKind,
    pub(crate) lexical_type: LexicalType,
    pub(crate) concept_type: ConceptType,
    pub(crate) pos: Pos,
    pub(crate) source: SourceType,
    pub(crate) dynamic: bool,
    pub(crate) descriptive: bool,
    /// Number of statements created with this node as relation type.
    pub(crate) instance_count: u32,
    pub(crate) out_edges: EdgeChain,
    pub(crate) in_edges: EdgeChain,
}

impl ConceptNode {
    /// Create a bare concept.
    pub(crate) fn new(name: String, id: u64) -> Self {
        Self {
            name,
            id,
            kind: NodeKind::Concept,
            lexical_type: LexicalType::Any,
            concept_type: ConceptType::Other,
            pos: Pos::Unknown,
            source: SourceType::Unknown,
            dynamic: false,
            descriptive: false,
            instance_count: 0,
            out_edges: EdgeChain::new(),
            in_edges: EdgeChain::new(),
        }
    }

    /// Create a statement node.
    pub(crate) fn statement(name: String, id: u64, data: StatementData) -> Self {
        Self {
            kind: NodeKind::Statement(data),
            concept_type: ConceptType::Statement,
            ..Self::new(name, id)
        }
    }

    /// The node's name (without source prefix or quotes).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sequential store id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether this is a concept or a statement.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The statement part, if this node is a relation instance.
    pub fn as_statement(&self) -> Option<&StatementData> {
        match &self.kind {
            NodeKind::Statement(data) => Some(data),
            NodeKind::Concept => None,
        }
    }

    pub(crate) fn as_statement_mut(&mut self) -> Option<&mut StatementData> {
        match &mut self.kind {
            NodeKind::Statement(data) => Some(data),
            NodeKind::Concept => None,
        }
    }

    /// Whether this node is a relation instance.
    pub fn is_statement(&self) -> bool {
        matches!(self.kind, NodeKind::Statement(_))
    }

    pub fn lexical_type(&self) -> LexicalType {
        self.lexical_type
    }

    pub fn concept_type(&self) -> ConceptType {
        self.concept_type
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn source(&self) -> SourceType {
        self.source
    }

    /// Whether the node will be removed by the next dynamic purge.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Whether the node is a free-text (quoted) node.
    pub fn is_descriptive(&self) -> bool {
        self.descriptive
    }

    /// Outgoing edges, most recent first.
    pub fn out_edges(&self) -> &EdgeChain {
        &self.out_edges
    }

    /// Incoming edges, most recent first.
    pub fn in_edges(&self) -> &EdgeChain {
        &self.in_edges
    }

    pub fn out_degree(&self) -> usize {
        self.out_edges.len()
    }

    pub fn in_degree(&self) -> usize {
        self.in_edges.len()
    }

    /// Whether the node is a word sense (its name carries `#`).
    pub fn is_sense(&self) -> bool {
        self.lexical_type == LexicalType::Sense
    }
}
