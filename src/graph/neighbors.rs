//! Edge-chain lookups that produce neighbor records for the reasoner.

use crate::types::{CertaintyVector, ConditionalType, NodeId, SourceType};

use super::edge_chain::ChainLink;
use super::KnowledgeStore;

/// A node reached over one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// The node on the other end.
    pub node: NodeId,
    /// The statement that was followed.
    pub statement: NodeId,
    /// Copy of the statement's certainty.
    pub certainty: CertaintyVector,
    pub source: SourceType,
    /// Context values attached to the statement, when requested.
    pub contexts: Vec<Neighbor>,
}

/// Which end of the statements to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Out,
    In,
}

impl KnowledgeStore {
    /// Referents of `relation(node)={?}` among plain facts.
    pub fn targets(&self, node: NodeId, relation: NodeId) -> Vec<Neighbor> {
        self.targets_of(node, relation, ConditionalType::NotConditional, &[])
    }

    /// Arguments of `relation(?)={node}` among plain facts.
    pub fn sources(&self, node: NodeId, relation: NodeId) -> Vec<Neighbor> {
        self.sources_of(node, relation, ConditionalType::NotConditional, &[])
    }

    /// Referents of `relation(node)={?}`, most recent first.
    ///
    /// `relation` may be the ANY wildcard. Only statements with the given
    /// conditional role match. For every context relation in `contexts` the
    /// values attached to the matching statement are collected.
    pub fn targets_of(
        &self,
        node: NodeId,
        relation: NodeId,
        conditional: ConditionalType,
        contexts: &[NodeId],
    ) -> Vec<Neighbor> {
        self.neighbors(node, relation, conditional, contexts, Side::Out)
    }

    /// Arguments of `relation(?)={node}`, most recent first.
    pub fn sources_of(
        &self,
        node: NodeId,
        relation: NodeId,
        conditional: ConditionalType,
        contexts: &[NodeId],
    ) -> Vec<Neighbor> {
        self.neighbors(node, relation, conditional, contexts, Side::In)
    }

    /// The first referent of `relation(node)={?}`.
    pub fn first_target(&self, node: NodeId, relation: NodeId) -> Option<NodeId> {
        let n = self.get(node)?;
        n.out_edges
            .with_relation(relation)
            .find(|l| self.is_plain(l.statement))
            .map(|l| l.other)
    }

    fn is_plain(&self, statement: NodeId) -> bool {
        self.statement(statement)
            .map(|d| d.conditional == ConditionalType::NotConditional)
            .unwrap_or(false)
    }

    fn neighbors(
        &self,
        node: NodeId,
        relation: NodeId,
        conditional: ConditionalType,
        contexts: &[NodeId],
        side: Side,
    ) -> Vec<Neighbor> {
        let Some(n) = self.get(node) else {
            return Vec::new();
        };
        let chain = match side {
            Side::Out => &n.out_edges,
            Side::In => &n.in_edges,
        };
        let links: Box<dyn Iterator<Item = &ChainLink> + '_> = if relation == self.vocab().any {
            Box::new(chain.iter())
        } else {
            Box::new(chain.with_relation(relation))
        };

        let mut out = Vec::new();
        for link in links {
            let Some(statement) = self.get(link.statement) else {
                continue;
            };
            let Some(data) = statement.as_statement() else {
                continue;
            };
            if data.conditional != conditional {
                continue;
            }

            let mut found = Vec::new();
            for cx in contexts {
                found.extend(self.targets_of(
                    link.statement,
                    *cx,
                    ConditionalType::NotConditional,
                    &[],
                ));
            }

            out.push(Neighbor {
                node: link.other,
                statement: link.statement,
                certainty: data.certainty,
                source: statement.source(),
                contexts: found,
            });
        }
        out
    }
}
