//! Hierarchy walks over ISA statements.

use std::collections::{HashSet, VecDeque};

use crate::types::NodeId;

use super::KnowledgeStore;

impl KnowledgeStore {
    /// Whether `ancestor` is reachable from `node` over ISA.
    ///
    /// The ANY wildcard is everyone's ancestor.
    pub fn has_ancestor(&self, node: NodeId, ancestor: NodeId) -> bool {
        if ancestor == self.vocab().any {
            return true;
        }
        let isa = self.vocab().isa;
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            for parent in self.targets(current, isa) {
                if parent.node == ancestor {
                    return true;
                }
                stack.push(parent.node);
            }
        }
        false
    }

    /// Whether `parent` is a direct ISA parent of `node`.
    pub fn has_direct_parent(&self, node: NodeId, parent: NodeId) -> bool {
        self.targets(node, self.vocab().isa)
            .iter()
            .any(|p| p.node == parent)
    }

    /// `node` and everything below it in the ISA hierarchy.
    pub fn descendants(&self, node: NodeId) -> HashSet<NodeId> {
        let isa = self.vocab().isa;
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut queue: VecDeque<NodeId> = VecDeque::from([node]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            for child in self.sources(current, isa) {
                queue.push_back(child.node);
            }
        }
        seen
    }

    /// Descendants of `node` that have no ISA children of their own.
    pub fn leaf_descendants(&self, node: NodeId) -> HashSet<NodeId> {
        let isa = self.vocab().isa;
        self.descendants(node)
            .into_iter()
            .filter(|d| self.sources(*d, isa).is_empty())
            .collect()
    }

    /// All ISA ancestors within `max_depth` levels, nearest first.
    ///
    /// A node reachable along several paths is listed once per path.
    pub fn find_all_parents(&self, node: NodeId, max_depth: u32) -> Vec<NodeId> {
        if max_depth == 0 {
            return Vec::new();
        }
        let mut out = Vec::new();
        for parent in self.targets(node, self.vocab().isa) {
            out.push(parent.node);
            out.extend(self.find_all_parents(parent.node, max_depth - 1));
        }
        out
    }

    /// Depth of a node in the ISA (or INSTANCE) hierarchy, following the first parent.
    ///
    /// Roots have depth 1.
    pub fn depth_in_isa(&self, node: NodeId) -> u32 {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut current = node;
        let mut depth = 1;
        while visited.insert(current) {
            let parent = self
                .first_target(current, self.vocab().isa)
                .or_else(|| self.first_target(current, self.vocab().instance));
            match parent {
                Some(p) => {
                    current = p;
                    depth += 1;
                }
                None => break,
            }
        }
        depth
    }

    /// The nearest ISA ancestor of `b` (or `b` itself) that is also an ancestor of `a`.
    pub fn common_parent(&self, a: NodeId, b: NodeId, max_depth: u32) -> Option<NodeId> {
        let a_parents: HashSet<NodeId> = self.find_all_parents(a, max_depth).into_iter().collect();
        let isa = self.vocab().isa;
        let mut level = vec![b];
        let mut seen: HashSet<NodeId> = HashSet::new();
        for _ in 0..=max_depth {
            if let Some(hit) = level.iter().find(|n| a_parents.contains(*n)) {
                return Some(*hit);
            }
            let mut next = Vec::new();
            for n in level {
                if seen.insert(n) {
                    next.extend(self.targets(n, isa).into_iter().map(|p| p.node));
                }
            }
            if next.is_empty() {
                break;
            }
            level = next;
        }
        None
    }

    /// The synset of a sense (its first SYN referent).
    pub fn synset_of(&self, sense: NodeId) -> Option<NodeId> {
        self.first_target(sense, self.vocab().syn)
    }

    /// The first antonym (DIS referent) of a node.
    pub fn antonym_of(&self, node: NodeId) -> Option<NodeId> {
        self.first_target(node, self.vocab().dis)
    }

    /// Whether a node carries a REF statement.
    pub fn has_reference(&self, node: NodeId) -> bool {
        self.first_target(node, self.vocab().reference).is_some()
    }
}
