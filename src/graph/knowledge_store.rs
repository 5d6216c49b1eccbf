//! The knowledge store: owns every concept and statement of one graph.

use std::collections::HashMap;
use std::convert::Infallible;

use serde::Serialize;

use crate::index::StatsIndex;
use crate::types::{
    CertaintyVector, ConceptType, ConditionalType, CoreVocabulary, HprError, HprResult,
    LexicalType, NodeId, Pos, SourceType,
};

use super::edge_chain::ChainLink;
use super::names::{self, lookup_key};
use super::node::{ConceptNode, StatementData};

/// Whether new nodes are permanent or slated for the next purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMode {
    /// New nodes are permanent.
    #[default]
    Static,
    /// New nodes are flagged dynamic and removed by [`KnowledgeStore::purge_dynamic`].
    Dynamic,
}

/// How a raw concept name is turned into a stored name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameHandling {
    /// Read sense, synset, source and quote markers from the name.
    Extract,
    /// Replace reserved markers so the text is taken literally.
    Sanitize,
}

/// String matching modes for [`KnowledgeStore::concept_from_substr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// The whole name, or the lemma of a sense, equals the snippet.
    Exact,
    /// The name contains the snippet.
    Substring,
    /// The name starts with the snippet.
    Prefix,
    /// Like substring, but synsets are searched too.
    SubNumber,
    /// The snippet occurs delimited by non-alphanumeric characters.
    WholeWord,
}

/// Summary counts of a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Named nodes, statements included.
    pub total_concepts: usize,
    /// Distinct relation types in use.
    pub descriptor_types: usize,
    /// Relation instances.
    pub relations: usize,
    pub unique_arguments: usize,
    pub unique_referents: usize,
    pub loaded_kbs: Vec<String>,
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total concepts: {}", self.total_concepts)?;
        writeln!(f, "Descriptor types: {}", self.descriptor_types)?;
        writeln!(f, "Relations: {}", self.relations)?;
        writeln!(f, "Unique arguments: {}", self.unique_arguments)?;
        write!(f, "Unique referents: {}", self.unique_referents)
    }
}

/// In-memory semantic graph of concepts and relation instances.
///
/// Nodes live in an arena addressed by [`NodeId`]. Statements are nodes too,
/// so they can be the argument or referent of other statements (contexts,
/// references, implication rules).
pub struct KnowledgeStore {
    /// Arena of nodes; deleted slots are `None`.
    nodes: Vec<Option<ConceptNode>>,
    /// Normalized lowercase name -> node.
    names: HashMap<String, NodeId>,
    /// Store id -> node.
    ids: HashMap<u64, NodeId>,
    vocab: CoreVocabulary,
    next_id: u64,
    /// Per relation type: last instance number handed out.
    next_instance: HashMap<NodeId, u32>,
    locked: bool,
    mode: StoreMode,
    override_source: bool,
    ignore_bidirectional_on_import: bool,
    loaded_kbs: Vec<String>,
    pub(crate) stats: StatsIndex,
}

impl KnowledgeStore {
    /// Create a store holding only the core vocabulary.
    pub fn new() -> Self {
        let mut nodes: Vec<Option<ConceptNode>> = Vec::new();
        let vocab = CoreVocabulary::bootstrap::<Infallible>(|name| {
            let id = NodeId(nodes.len());
            let mut node = ConceptNode::new(name.to_string(), nodes.len() as u64 + 1);
            node.source = SourceType::Core;
            nodes.push(Some(node));
            Ok(id)
        });
        let vocab = match vocab {
            Ok(v) => v,
            Err(never) => match never {},
        };

        let mut names = HashMap::new();
        let mut ids = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            if let Some(node) = node {
                names.insert(lookup_key(&node.name), NodeId(i));
                ids.insert(node.id, NodeId(i));
            }
        }

        Self {
            next_id: nodes.len() as u64 + 1,
            nodes,
            names,
            ids,
            vocab,
            next_instance: HashMap::new(),
            locked: false,
            mode: StoreMode::Static,
            override_source: false,
            ignore_bidirectional_on_import: false,
            loaded_kbs: Vec::new(),
            stats: StatsIndex::new(),
        }
    }

    /// The core vocabulary of this store.
    pub fn vocab(&self) -> &CoreVocabulary {
        &self.vocab
    }

    /// Get a node by arena index.
    pub fn get(&self, id: NodeId) -> Option<&ConceptNode> {
        self.nodes.get(id.0).and_then(|n| n.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut ConceptNode> {
        self.nodes.get_mut(id.0).and_then(|n| n.as_mut())
    }

    /// Get a node, failing if it does not exist.
    pub fn node(&self, id: NodeId) -> HprResult<&ConceptNode> {
        self.get(id)
            .ok_or_else(|| HprError::NodeNotFound(id.to_string()))
    }

    fn node_mut(&mut self, id: NodeId) -> HprResult<&mut ConceptNode> {
        self.get_mut(id)
            .ok_or_else(|| HprError::NodeNotFound(id.to_string()))
    }

    /// The name of a node, or `?` for a missing one.
    pub fn name(&self, id: NodeId) -> &str {
        self.get(id).map(|n| n.name.as_str()).unwrap_or("?")
    }

    /// The statement data of a node, if it is a statement.
    pub fn statement(&self, id: NodeId) -> Option<&StatementData> {
        self.get(id).and_then(|n| n.as_statement())
    }

    /// Number of live nodes (concepts and statements).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the store holds only its core vocabulary.
    pub fn is_empty(&self) -> bool {
        self.len() == self.vocab.all().len()
    }

    /// Iterate over live nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ConceptNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), n)))
    }

    /// Iterate over live statements.
    pub fn statements(&self) -> impl Iterator<Item = (NodeId, &StatementData)> + '_ {
        self.iter()
            .filter_map(|(id, n)| n.as_statement().map(|s| (id, s)))
    }

    // ==================== Settings ====================

    /// Forbid every mutation until [`KnowledgeStore::unlock`].
    pub fn lock(&mut self) {
        log::debug!("knowledge store locked");
        self.locked = true;
    }

    /// Allow mutations again.
    pub fn unlock(&mut self) {
        log::debug!("knowledge store unlocked");
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn check_lock(&self) -> HprResult<()> {
        if self.locked {
            Err(HprError::StoreLocked)
        } else {
            Ok(())
        }
    }

    pub fn set_mode(&mut self, mode: StoreMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> StoreMode {
        self.mode
    }

    /// When set, re-adding an existing concept with a known source overwrites its source.
    pub fn set_override_source(&mut self, enabled: bool) {
        self.override_source = enabled;
    }

    /// When set, import skips the second half of mirrored statement pairs.
    pub fn set_ignore_bidirectional_on_import(&mut self, enabled: bool) {
        self.ignore_bidirectional_on_import = enabled;
    }

    pub fn ignore_bidirectional_on_import(&self) -> bool {
        self.ignore_bidirectional_on_import
    }

    /// Record the name of a loaded knowledge base.
    pub fn add_loaded_kb(&mut self, name: impl Into<String>) -> HprResult<()> {
        self.check_lock()?;
        self.loaded_kbs.push(name.into());
        Ok(())
    }

    pub fn loaded_kbs(&self) -> &[String] {
        &self.loaded_kbs
    }

    // ==================== Concepts ====================

    /// Add a concept, or return the existing one with the same normalized name.
    ///
    /// Markers in the name are interpreted: `#` makes a sense, `§` a synset,
    /// `x˸` sets the source and surrounding quotes make a descriptive node.
    pub fn add_concept(&mut self, name: &str, source: SourceType) -> HprResult<NodeId> {
        self.add_concept_with(name, source, NameHandling::Extract)
    }

    /// Add a concept whose name is taken literally after sanitizing.
    pub fn add_concept_sanitized(&mut self, name: &str, source: SourceType) -> HprResult<NodeId> {
        self.add_concept_with(name, source, NameHandling::Sanitize)
    }

    /// Add a concept with an explicit name handling policy.
    pub fn add_concept_with(
        &mut self,
        name: &str,
        source: SourceType,
        handling: NameHandling,
    ) -> HprResult<NodeId> {
        self.check_lock()?;
        if name.is_empty() {
            return Err(HprError::EmptyName);
        }

        let search_name = match handling {
            NameHandling::Extract => names::prospective_name(name)?,
            NameHandling::Sanitize => names::sanitize(name),
        };
        if search_name.is_empty() {
            return Err(HprError::EmptyName);
        }

        let existing = names::without_tashdid(&search_name)
            .and_then(|plain| self.names.get(&lookup_key(&plain)).copied())
            .or_else(|| self.names.get(&search_name.to_lowercase()).copied());
        if let Some(existing) = existing {
            if self.override_source && source != SourceType::Unknown {
                self.node_mut(existing)?.source = source;
            }
            return Ok(existing);
        }

        let mut node = match handling {
            NameHandling::Extract => {
                let extracted = names::extract_properties(name)?;
                let mut node = ConceptNode::new(extracted.name, self.next_id);
                node.lexical_type = extracted.lexical_type;
                node.pos = extracted.pos;
                node.descriptive = extracted.descriptive;
                if let Some(s) = extracted.source {
                    node.source = s;
                }
                node
            }
            NameHandling::Sanitize => ConceptNode::new(search_name, self.next_id),
        };
        if source != SourceType::Unknown {
            node.source = source;
        }
        if self.mode == StoreMode::Dynamic {
            node.dynamic = true;
        }

        Ok(self.insert(node))
    }

    fn insert(&mut self, node: ConceptNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.names.insert(lookup_key(&node.name), id);
        self.ids.insert(node.id, id);
        self.next_id += 1;
        self.nodes.push(Some(node));
        id
    }

    /// Find a concept by name.
    ///
    /// A name with tashdid tries its tashdid-free form first, then the exact
    /// lowercase name, then the normalized form.
    pub fn find_concept(&self, name: &str) -> Option<NodeId> {
        names::without_tashdid(name)
            .and_then(|plain| self.names.get(&lookup_key(&plain)))
            .or_else(|| self.names.get(&name.to_lowercase()))
            .or_else(|| self.names.get(&lookup_key(name)))
            .copied()
    }

    /// Find a node by its store id.
    pub fn find_by_id(&self, id: u64) -> Option<NodeId> {
        self.ids.get(&id).copied()
    }

    /// Whether a node carries a LEX relation (a lexical-only node).
    pub fn is_lexical(&self, id: NodeId) -> bool {
        self.get(id)
            .map(|n| n.out_edges.has_relation(self.vocab.lex))
            .unwrap_or(false)
    }

    /// Rename a concept.
    pub fn rename_concept(&mut self, id: NodeId, new_name: &str) -> HprResult<()> {
        self.check_lock()?;
        if new_name.is_empty() {
            return Err(HprError::EmptyName);
        }
        if self.find_concept(new_name).is_some() {
            return Err(HprError::DuplicateName {
                name: new_name.to_string(),
            });
        }
        let extracted = names::extract_properties(new_name)?;
        let old_key = lookup_key(&self.node(id)?.name);

        let node = self.node_mut(id)?;
        node.name = extracted.name;
        node.lexical_type = extracted.lexical_type;
        node.pos = extracted.pos;
        node.descriptive = extracted.descriptive;
        let new_key = lookup_key(&node.name);

        self.names.remove(&old_key);
        self.names.insert(new_key, id);
        Ok(())
    }

    /// The next unused sense number of a head word, e.g. 3 when `bank#n1` and `bank#n2` exist.
    pub fn next_sense_number(&self, head_word: &str, pos: Pos) -> u32 {
        let tag = pos.tag().map(String::from).unwrap_or_default();
        let head = names::sanitize(head_word);
        let mut i = 1;
        while self.find_concept(&format!("{}#{}{}", head, tag, i)).is_some() {
            i += 1;
        }
        i
    }

    /// Concepts whose name matches a snippet, sorted by name.
    ///
    /// Senses are reported through their synset when they have one.
    pub fn concept_from_substr(
        &self,
        snippet: &str,
        pos: Pos,
        match_type: MatchType,
        lexical_type: LexicalType,
    ) -> Vec<NodeId> {
        let snippet = snippet.to_lowercase();
        let mut found: HashMap<String, NodeId> = HashMap::new();

        for (id, node) in self.iter() {
            if matches!(
                node.concept_type,
                ConceptType::Statement | ConceptType::Gloss | ConceptType::Example
            ) {
                continue;
            }
            if node.lexical_type == LexicalType::Synset
                && !matches!(match_type, MatchType::Exact | MatchType::SubNumber)
            {
                continue;
            }
            if lexical_type != LexicalType::Any && node.lexical_type != lexical_type {
                continue;
            }
            if pos != Pos::Any && pos != node.pos {
                continue;
            }

            let name = node.name.to_lowercase();
            if name.len() < snippet.len() {
                continue;
            }
            let word = names::lemma_of(&name).unwrap_or(&name);
            let hit = match match_type {
                MatchType::Substring | MatchType::SubNumber => name.contains(&snippet),
                MatchType::Prefix => name.starts_with(&snippet),
                MatchType::Exact => word == snippet || name == snippet,
                MatchType::WholeWord => contains_whole_word(&name, &snippet),
            };
            if !hit {
                continue;
            }

            let reported = if node.lexical_type == LexicalType::Sense {
                node.out_edges
                    .with_relation(self.vocab.syn)
                    .next()
                    .map(|l| l.other)
                    .unwrap_or(id)
            } else {
                id
            };
            found.entry(self.name(reported).to_string()).or_insert(id);
        }

        let mut out: Vec<(String, NodeId)> = found.into_iter().collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out.into_iter().map(|(_, id)| id).collect()
    }

    // ==================== Relations ====================

    /// Add a relation instance `relation(argument)={referent}`.
    ///
    /// Re-adding an existing triple updates its certainty, conditional role and
    /// source in place (mirror included for symmetric or bidirectional
    /// relations). Symmetric relations and bidirectional requests also create
    /// the mirror statement.
    #[allow(clippy::too_many_arguments)]
    pub fn add_relation(
        &mut self,
        argument: NodeId,
        referent: NodeId,
        relation: NodeId,
        certainty: CertaintyVector,
        bidirectional: bool,
        conditional: ConditionalType,
        source: SourceType,
    ) -> HprResult<NodeId> {
        self.check_lock()?;
        for endpoint in [argument, referent, relation] {
            let node = self.node(endpoint)?;
            if self.is_lexical(endpoint) {
                return Err(HprError::LexicalEndpoint {
                    name: node.name.clone(),
                });
            }
        }

        let mirrored = bidirectional || self.vocab.is_symmetric(relation);

        if let Some(existing) = self.node(argument)?.out_edges.find(relation, referent) {
            self.update_statement(existing, certainty, conditional, source);
            if mirrored {
                if let Some(mirror) = self.node(referent)?.out_edges.find(relation, argument) {
                    self.update_statement(mirror, certainty, conditional, source);
                } else {
                    self.add_relation(
                        referent,
                        argument,
                        relation,
                        certainty,
                        false,
                        conditional,
                        source,
                    )?;
                }
            }
            return Ok(existing);
        }

        let instance = {
            let counter = self.next_instance.entry(relation).or_insert(0);
            *counter += 1;
            *counter
        };
        let statement_name = format!("*{} ({})", self.name(relation), instance);

        let data = StatementData {
            relation_type: relation,
            argument,
            referent,
            certainty,
            conditional,
        };
        let mut node = ConceptNode::statement(statement_name, self.next_id, data.clone());
        node.source = source;
        node.dynamic = self.mode == StoreMode::Dynamic;
        let statement = self.insert(node);

        self.node_mut(argument)?.out_edges.push(ChainLink {
            statement,
            relation,
            other: referent,
        });
        self.node_mut(referent)?.in_edges.push(ChainLink {
            statement,
            relation,
            other: argument,
        });
        self.node_mut(relation)?.instance_count += 1;

        let (gloss, example) = (self.vocab.gloss, self.vocab.example);
        let referent_node = self.node_mut(referent)?;
        if referent_node.concept_type == ConceptType::Other {
            if relation == gloss {
                referent_node.concept_type = ConceptType::Gloss;
            } else if relation == example {
                referent_node.concept_type = ConceptType::Example;
            }
        }

        self.stats.add_statement(statement, &data);

        if mirrored {
            self.add_relation(
                referent,
                argument,
                relation,
                certainty,
                false,
                conditional,
                source,
            )?;
        }

        Ok(statement)
    }

    /// Add a plain, one-directional fact with unknown source.
    pub fn relate(
        &mut self,
        argument: NodeId,
        relation: NodeId,
        referent: NodeId,
        certainty: CertaintyVector,
    ) -> HprResult<NodeId> {
        self.add_relation(
            argument,
            referent,
            relation,
            certainty,
            false,
            ConditionalType::NotConditional,
            SourceType::Unknown,
        )
    }

    fn update_statement(
        &mut self,
        statement: NodeId,
        certainty: CertaintyVector,
        conditional: ConditionalType,
        source: SourceType,
    ) {
        if let Some(node) = self.get_mut(statement) {
            node.source = source;
            if let Some(data) = node.as_statement_mut() {
                data.certainty = certainty;
                data.conditional = data.conditional.merge(conditional);
            }
        }
    }

    /// Add `relation(argument)={referent}` by names, creating the concepts as needed.
    pub fn add_triple(
        &mut self,
        argument: &str,
        relation: &str,
        referent: &str,
        certainty: CertaintyVector,
    ) -> HprResult<NodeId> {
        self.add_triple_with(
            argument,
            relation,
            referent,
            certainty,
            false,
            ConditionalType::NotConditional,
        )
    }

    /// Name-level [`KnowledgeStore::add_relation`]; the source comes from the relation's prefix.
    pub fn add_triple_with(
        &mut self,
        argument: &str,
        relation: &str,
        referent: &str,
        certainty: CertaintyVector,
        bidirectional: bool,
        conditional: ConditionalType,
    ) -> HprResult<NodeId> {
        let arg = self.add_concept(argument, SourceType::Unknown)?;
        let refr = self.add_concept(referent, SourceType::Unknown)?;
        let rel = self.add_concept(relation, SourceType::Unknown)?;
        let source = names::split_source_prefix(relation)?
            .0
            .unwrap_or(SourceType::Unknown);
        self.add_relation(
            arg,
            refr,
            rel,
            certainty,
            bidirectional,
            conditional,
            source,
        )
    }

    /// Attach a context (time, location, domain) to a statement.
    pub fn add_context(
        &mut self,
        statement: NodeId,
        cx_relation: NodeId,
        value: NodeId,
        certainty: CertaintyVector,
    ) -> HprResult<NodeId> {
        self.relate(statement, cx_relation, value, certainty)
    }

    /// Add the rule `IF antecedent THEN consequent`.
    ///
    /// Triples are `(argument, relation, referent)` names. Returns the IMP
    /// statement linking the two.
    pub fn add_implication(
        &mut self,
        antecedent: (&str, &str, &str),
        consequent: (&str, &str, &str),
        certainty: CertaintyVector,
    ) -> HprResult<NodeId> {
        let ante = self.add_triple_with(
            antecedent.0,
            antecedent.1,
            antecedent.2,
            CertaintyVector::new(),
            false,
            ConditionalType::Antecedent,
        )?;
        let cons = self.add_triple_with(
            consequent.0,
            consequent.1,
            consequent.2,
            CertaintyVector::new(),
            false,
            ConditionalType::Consequent,
        )?;
        let imp = self.vocab.imp;
        self.relate(ante, imp, cons, certainty)
    }

    /// All live statements whose relation type is `relation`, oldest first.
    pub fn find_relation_instances(&self, relation: NodeId) -> Vec<NodeId> {
        self.stats.instances_of(relation).to_vec()
    }

    /// Statements of a relation type whose conditional role passes `filter`.
    pub fn statements_of(
        &self,
        relation: NodeId,
        filter: impl Fn(ConditionalType) -> bool,
    ) -> Vec<NodeId> {
        self.stats
            .instances_of(relation)
            .iter()
            .copied()
            .filter(|s| {
                self.statement(*s)
                    .map(|d| filter(d.conditional))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Relation types in use.
    pub fn descriptors(&self) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self.stats.descriptors().collect();
        out.sort();
        out
    }

    /// `relation(argument)={referent}` text of a statement.
    pub fn statement_text(&self, statement: NodeId) -> String {
        match self.statement(statement) {
            Some(d) => format!(
                "{}({})={{{}}}",
                self.name(d.relation_type),
                self.name(d.argument),
                self.name(d.referent)
            ),
            None => self.name(statement).to_string(),
        }
    }

    // ==================== Removal ====================

    /// Delete a node and every statement attached to it.
    ///
    /// Returns the number of statements removed.
    pub fn delete_concept(&mut self, id: NodeId) -> HprResult<usize> {
        self.check_lock()?;
        self.node(id)?;
        if self.vocab.contains(id) {
            return Err(HprError::InvariantViolation(format!(
                "core concept '{}' can't be deleted",
                self.name(id)
            )));
        }
        let removed = self.remove_node(id);
        let statements = self.statements().map(|(s, d)| (s, d.clone())).collect::<Vec<_>>();
        self.stats.rebuild(statements.iter().map(|(s, d)| (*s, d)));
        Ok(removed)
    }

    /// Remove a node, its attached statements, and statements about those.
    fn remove_node(&mut self, id: NodeId) -> usize {
        let Some(node) = self.nodes.get_mut(id.0).and_then(|n| n.take()) else {
            return 0;
        };
        self.names.remove(&lookup_key(&node.name));
        self.ids.remove(&node.id);

        let mut removed = 0;
        if let Some(data) = node.as_statement() {
            removed += 1;
            if let Some(arg) = self.get_mut(data.argument) {
                arg.out_edges.remove(id);
            }
            if let Some(refr) = self.get_mut(data.referent) {
                refr.in_edges.remove(id);
            }
            if let Some(rel) = self.get_mut(data.relation_type) {
                rel.instance_count = rel.instance_count.saturating_sub(1);
            }
            self.stats.remove_statement(id, data.relation_type);
        }

        let mut attached: Vec<NodeId> = node
            .out_edges
            .iter()
            .chain(node.in_edges.iter())
            .map(|l| l.statement)
            .collect();
        // Statements typed by this node are not in its chains.
        if node.instance_count > 0 {
            attached.extend_from_slice(self.stats.instances_of(id));
        }
        for statement in attached {
            removed += self.remove_node(statement);
        }
        removed
    }

    /// Remove every dynamic node and statement, then rebuild the statistics.
    ///
    /// Returns the number of nodes removed.
    pub fn purge_dynamic(&mut self) -> HprResult<usize> {
        self.check_lock()?;
        let dynamic: Vec<NodeId> = self
            .iter()
            .filter(|(_, n)| n.dynamic)
            .map(|(id, _)| id)
            .collect();

        let before = self.len();
        for id in dynamic {
            self.remove_node(id);
        }
        let deleted = before - self.len();

        let statements = self.statements().map(|(s, d)| (s, d.clone())).collect::<Vec<_>>();
        self.stats.rebuild(statements.iter().map(|(s, d)| (*s, d)));
        log::debug!("purged {} dynamic nodes", deleted);
        Ok(deleted)
    }

    // ==================== Statistics ====================

    /// Summary counts of the store.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            total_concepts: self.len(),
            descriptor_types: self.stats.descriptor_count(),
            relations: self.stats.len(),
            unique_arguments: self.stats.argument_count(),
            unique_referents: self.stats.referent_count(),
            loaded_kbs: self.loaded_kbs.clone(),
        }
    }
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_whole_word(name: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    name.match_indices(word).any(|(start, _)| {
        let before = name[..start].chars().next_back();
        let after = name[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
