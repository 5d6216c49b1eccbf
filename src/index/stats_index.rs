//! Statistics index: which nodes appear as descriptor, argument or referent.

use std::collections::{HashMap, HashSet};

use crate::graph::StatementData;
use crate::types::NodeId;

/// Tracks the roles nodes play in statements, plus statements per relation type.
pub struct StatsIndex {
    descriptors: HashSet<NodeId>,
    arguments: HashSet<NodeId>,
    referents: HashSet<NodeId>,
    instances: HashMap<NodeId, Vec<NodeId>>,
}

impl StatsIndex {
    /// Create a new, empty index.
    pub fn new() -> Self {
        Self {
            descriptors: HashSet::new(),
            arguments: HashSet::new(),
            referents: HashSet::new(),
            instances: HashMap::new(),
        }
    }

    /// Record a newly created statement.
    pub fn add_statement(&mut self, statement: NodeId, data: &StatementData) {
        self.descriptors.insert(data.relation_type);
        self.arguments.insert(data.argument);
        self.referents.insert(data.referent);
        self.instances
            .entry(data.relation_type)
            .or_default()
            .push(statement);
    }

    /// Forget a statement's instance entry.
    ///
    /// Role sets are left alone; call [`StatsIndex::rebuild`] after bulk removal.
    pub fn remove_statement(&mut self, statement: NodeId, relation_type: NodeId) {
        if let Some(list) = self.instances.get_mut(&relation_type) {
            list.retain(|s| *s != statement);
        }
    }

    /// Rebuild the entire index from the surviving statements.
    pub fn rebuild<'a>(&mut self, statements: impl Iterator<Item = (NodeId, &'a StatementData)>) {
        self.clear();
        for (id, data) in statements {
            self.add_statement(id, data);
        }
    }

    /// Statements whose relation type is `relation`, oldest first.
    pub fn instances_of(&self, relation: NodeId) -> &[NodeId] {
        self.instances
            .get(&relation)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `node` has ever been used as a relation type.
    pub fn is_descriptor(&self, node: NodeId) -> bool {
        self.descriptors.contains(&node)
    }

    /// All relation types in use.
    pub fn descriptors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descriptors.iter().copied()
    }

    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }

    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    pub fn referent_count(&self) -> usize {
        self.referents.len()
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.descriptors.clear();
        self.arguments.clear();
        self.referents.clear();
        self.instances.clear();
    }

    /// Number of statements indexed.
    pub fn len(&self) -> usize {
        self.instances.values().map(|v| v.len()).sum()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StatsIndex {
    fn default() -> Self {
        Self::new()
    }
}
