//! Word-sense lookups: senses of a lemma, synsets, synonyms and antonyms.

use std::collections::HashSet;

use crate::graph::{names, Neighbor};
use crate::types::{LexicalType, NodeId, Pos, SENSE_MARKER};

use super::reasoner::Reasoner;

const ALL_POS: [Pos; 5] = [
    Pos::Noun,
    Pos::Adjective,
    Pos::SatelliteAdjective,
    Pos::Adverb,
    Pos::Verb,
];

impl<'a> Reasoner<'a> {
    /// Senses `lemma#<pos>1`, `lemma#<pos>2`, ... present in the store.
    ///
    /// `Pos::Any` collects nouns, adjectives, satellite adjectives, adverbs
    /// and verbs in that order.
    pub fn senses_from_lemma(&mut self, lemma: &str, pos: Pos) -> Vec<NodeId> {
        if pos == Pos::Any {
            return ALL_POS
                .iter()
                .flat_map(|p| self.senses_from_lemma(lemma, *p))
                .collect();
        }
        let Some(tag) = pos.tag() else {
            return Vec::new();
        };
        let head = format!("{lemma}{SENSE_MARKER}{tag}");
        if let Some(cached) = self.sense_cache.get(&head) {
            return cached.clone();
        }

        let mut senses = Vec::new();
        let mut i = 1;
        while let Some(sense) = self.store.find_concept(&format!("{head}{i}")) {
            senses.push(sense);
            i += 1;
        }
        if !senses.is_empty() {
            self.sense_cache.insert(head, senses.clone());
        }
        senses
    }

    /// Synsets of every sense of a lemma.
    pub fn synsets_from_lemma(&mut self, lemma: &str, pos: Pos) -> Vec<Neighbor> {
        let syn = self.store.vocab().syn;
        self.senses_from_lemma(lemma, pos)
            .into_iter()
            .flat_map(|sense| self.store.targets(sense, syn))
            .collect()
    }

    /// Other senses sharing the first synset of `sense` (the sense itself included).
    pub fn sibling_lexs(&self, sense: NodeId) -> Vec<Neighbor> {
        let syn = self.store.vocab().syn;
        match self.store.targets(sense, syn).first() {
            Some(synset) => self.store.sources(synset.node, syn),
            None => Vec::new(),
        }
    }

    fn sibling_lexs_plus_synset(&self, sense: NodeId) -> Vec<Neighbor> {
        let syn = self.store.vocab().syn;
        let synsets = self.store.targets(sense, syn);
        let Some(synset) = synsets.into_iter().next() else {
            return Vec::new();
        };
        let mut out = self.store.sources(synset.node, syn);
        out.push(synset);
        out
    }

    /// Synonyms of a node: synset siblings and SIM neighbors, followed transitively over SIM.
    pub fn find_synonyms(&self, node: NodeId) -> Vec<Neighbor> {
        let mut seen = HashSet::new();
        self.collect_synonyms(node, &mut seen)
    }

    fn collect_synonyms(&self, node: NodeId, seen: &mut HashSet<NodeId>) -> Vec<Neighbor> {
        let mut out = Vec::new();
        if seen.contains(&node) {
            return out;
        }
        let sim = self.store.vocab().sim;
        let mut candidates = self.sibling_lexs_plus_synset(node);
        candidates.extend(self.store.targets(node, sim));

        for candidate in candidates {
            if !seen.insert(candidate.node) {
                continue;
            }
            let next = self.store.targets(candidate.node, sim);
            out.push(candidate);
            for similar in next {
                out.extend(self.collect_synonyms(similar.node, seen));
            }
        }
        out
    }

    /// Synonym groups, one per sense of the lemma that has any.
    pub fn synonyms_of_lemma(&mut self, lemma: &str, pos: Pos) -> Vec<Vec<Neighbor>> {
        self.senses_from_lemma(lemma, pos)
            .into_iter()
            .map(|sense| self.find_synonyms(sense))
            .filter(|group| !group.is_empty())
            .collect()
    }

    /// Synonyms of all senses of a lemma, synsets dropped and one entry per lemma.
    pub fn synonyms_merged(&mut self, lemma: &str, pos: Pos) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for group in self.synonyms_of_lemma(lemma, pos) {
            for synonym in group {
                let Some(node) = self.store.get(synonym.node) else {
                    continue;
                };
                if node.lexical_type() == LexicalType::Synset {
                    continue;
                }
                let bare = names::lemma_of(node.name()).unwrap_or(node.name());
                if seen.insert(bare.to_string()) {
                    out.push(synonym.node);
                }
            }
        }
        out
    }

    /// Antonym groups of a lemma: DIS neighbors of each sense's synonyms, expanded by synonymy.
    pub fn find_antonyms(&mut self, lemma: &str, pos: Pos) -> Vec<Vec<Neighbor>> {
        let dis = self.store.vocab().dis;
        let mut groups = Vec::new();
        for sense in self.senses_from_lemma(lemma, pos) {
            let mut opposites: Vec<NodeId> = Vec::new();
            for synonym in self.find_synonyms(sense) {
                for antonym in self.store.targets(synonym.node, dis) {
                    if !opposites.contains(&antonym.node) {
                        opposites.push(antonym.node);
                    }
                }
            }

            let mut expanded: Vec<Neighbor> = Vec::new();
            for opposite in opposites {
                for synonym in self.find_synonyms(opposite) {
                    if !expanded.iter().any(|e| e.node == synonym.node) {
                        expanded.push(synonym);
                    }
                }
            }
            if !expanded.is_empty() {
                groups.push(expanded);
            }
        }
        groups
    }
}
