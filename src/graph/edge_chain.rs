//! Per-node edge collections keyed by relation type.

use std::collections::HashMap;

use crate::types::NodeId;

/// One entry of an edge chain: the statement and what it connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink {
    /// The statement node carrying the relation instance.
    pub statement: NodeId,
    /// The relation type of the statement.
    pub relation: NodeId,
    /// The node on the other end (referent for out-edges, argument for in-edges).
    pub other: NodeId,
}

/// Ordered edges of one direction, with a per-relation index.
///
/// Iteration is most-recent-first, matching the order in which edges were
/// prepended to the chain.
#[derive(Debug, Clone, Default)]
pub struct EdgeChain {
    links: Vec<ChainLink>,
    by_relation: HashMap<NodeId, Vec<ChainLink>>,
}

impl EdgeChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link in front of the chain.
    pub fn push(&mut self, link: ChainLink) {
        self.links.push(link);
        self.by_relation.entry(link.relation).or_default().push(link);
    }

    /// Unlink a statement. Returns whether it was present.
    pub fn remove(&mut self, statement: NodeId) -> bool {
        let Some(pos) = self.links.iter().position(|l| l.statement == statement) else {
            return false;
        };
        let link = self.links.remove(pos);
        if let Some(list) = self.by_relation.get_mut(&link.relation) {
            list.retain(|l| l.statement != statement);
            if list.is_empty() {
                self.by_relation.remove(&link.relation);
            }
        }
        true
    }

    /// The most recent statement of `relation` whose other end is `other`.
    pub fn find(&self, relation: NodeId, other: NodeId) -> Option<NodeId> {
        self.by_relation
            .get(&relation)?
            .iter()
            .rev()
            .find(|l| l.other == other)
            .map(|l| l.statement)
    }

    /// All links, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &ChainLink> + '_ {
        self.links.iter().rev()
    }

    /// Links of a single relation type, most recent first.
    pub fn with_relation(&self, relation: NodeId) -> impl Iterator<Item = &ChainLink> + '_ {
        self.by_relation
            .get(&relation)
            .into_iter()
            .flat_map(|v| v.iter().rev())
    }

    /// Whether any link has the given relation type.
    pub fn has_relation(&self, relation: NodeId) -> bool {
        self.by_relation.contains_key(&relation)
    }

    /// Number of links (the degree in this direction).
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the chain has no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Drop every link.
    pub fn clear(&mut self) {
        self.links.clear();
        self.by_relation.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(statement: usize, relation: usize, other: usize) -> ChainLink {
        ChainLink {
            statement: NodeId(statement),
            relation: NodeId(relation),
            other: NodeId(other),
        }
    }

    #[test]
    fn test_iteration_is_most_recent_first() {
        let mut chain = EdgeChain::new();
        chain.push(link(10, 1, 5));
        chain.push(link(11, 2, 6));
        chain.push(link(12, 1, 7));

        let order: Vec<usize> = chain.iter().map(|l| l.statement.0).collect();
        assert_eq!(order, vec![12, 11, 10]);

        let isa: Vec<usize> = chain.with_relation(NodeId(1)).map(|l| l.statement.0).collect();
        assert_eq!(isa, vec![12, 10]);
    }

    #[test]
    fn test_find_and_remove() {
        let mut chain = EdgeChain::new();
        chain.push(link(10, 1, 5));
        chain.push(link(11, 1, 6));

        assert_eq!(chain.find(NodeId(1), NodeId(6)), Some(NodeId(11)));
        assert_eq!(chain.find(NodeId(2), NodeId(6)), None);

        assert!(chain.remove(NodeId(11)));
        assert!(!chain.remove(NodeId(11)));
        assert_eq!(chain.find(NodeId(1), NodeId(6)), None);
        assert_eq!(chain.len(), 1);

        chain.remove(NodeId(10));
        assert!(chain.is_empty());
        assert!(!chain.has_relation(NodeId(1)));
    }
}
