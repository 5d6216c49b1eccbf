//! Phase 1 tests: knowledge store, names and hierarchy walks.

use plausible_reasoning::graph::{KnowledgeStore, MatchType, StoreMode};
use plausible_reasoning::types::{
    CertaintyVector, ConditionalType, HprError, LexicalType, Pos, SourceType,
};

// ==================== Helper ====================

fn cv(certainty: f32) -> CertaintyVector {
    CertaintyVector::with_certainty(certainty)
}

fn store_with(triples: &[(&str, &str, &str)]) -> KnowledgeStore {
    let mut store = KnowledgeStore::new();
    for (a, r, b) in triples {
        store.add_triple(a, r, b, cv(0.9)).unwrap();
    }
    store
}

// ==================== Concepts ====================

#[test]
fn test_core_vocabulary_bootstrapped() {
    let store = KnowledgeStore::new();
    let v = store.vocab();
    assert_eq!(store.find_concept("ISA"), Some(v.isa));
    assert_eq!(store.find_concept("yes"), Some(v.yes));
    assert_eq!(store.find_concept("CX:TIME"), Some(v.cx_time));
    assert!(store.is_empty());
    assert_eq!(store.get(v.isa).unwrap().source(), SourceType::Core);
}

#[test]
fn test_add_concept_dedup_case_insensitive() {
    let mut store = KnowledgeStore::new();
    let a = store.add_concept("Apple", SourceType::Unknown).unwrap();
    let b = store.add_concept("apple", SourceType::Unknown).unwrap();
    let c = store.add_concept("  APPLE ", SourceType::Unknown).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(store.name(a), "Apple");
}

#[test]
fn test_add_concept_empty_name() {
    let mut store = KnowledgeStore::new();
    let err = store.add_concept("", SourceType::Unknown).unwrap_err();
    assert!(matches!(err, HprError::EmptyName));
    assert!(err.is_structural());
}

#[test]
fn test_sense_properties_extracted() {
    let mut store = KnowledgeStore::new();
    let sense = store.add_concept("bank#n2", SourceType::Unknown).unwrap();
    let node = store.get(sense).unwrap();
    assert_eq!(node.lexical_type(), LexicalType::Sense);
    assert_eq!(node.pos(), Pos::Noun);
    assert!(node.is_sense());

    let synset = store.add_concept("§bank", SourceType::Unknown).unwrap();
    assert_eq!(store.get(synset).unwrap().lexical_type(), LexicalType::Synset);
}

#[test]
fn test_source_prefix() {
    let mut store = KnowledgeStore::new();
    let water = store.add_concept("w˸water", SourceType::Unknown).unwrap();
    assert_eq!(store.name(water), "water");
    assert_eq!(store.get(water).unwrap().source(), SourceType::WordNet);

    let err = store.add_concept("z˸water", SourceType::Unknown).unwrap_err();
    assert!(matches!(err, HprError::UnknownSourcePrefix { prefix: 'z' }));
}

#[test]
fn test_descriptive_name() {
    let mut store = KnowledgeStore::new();
    let node = store
        .add_concept("\"a long description\"", SourceType::Unknown)
        .unwrap();
    assert!(store.get(node).unwrap().is_descriptive());
    assert_eq!(store.name(node), "a long description");
}

#[test]
fn test_sanitized_concept_keeps_markers_literal() {
    let mut store = KnowledgeStore::new();
    let node = store
        .add_concept_sanitized("odd#name\twith tab", SourceType::Unknown)
        .unwrap();
    assert_eq!(store.name(node), "odd_name with tab");
    assert_eq!(store.get(node).unwrap().lexical_type(), LexicalType::Any);
}

#[test]
fn test_tashdid_free_form_looked_up_first() {
    let mut store = KnowledgeStore::new();
    let marked = store
        .add_concept("\u{0645}\u{0651}\u{0631}", SourceType::Unknown)
        .unwrap();
    let plain = store
        .add_concept("\u{0645}\u{0631}", SourceType::Unknown)
        .unwrap();
    assert_ne!(marked, plain);

    // Both adding and finding prefer the tashdid-free concept.
    assert_eq!(
        store.add_concept("\u{0645}\u{0651}\u{0631}", SourceType::Unknown).unwrap(),
        plain
    );
    assert_eq!(store.find_concept("\u{0645}\u{0651}\u{0631}"), Some(plain));
}

#[test]
fn test_tab_in_name_becomes_space() {
    let mut store = KnowledgeStore::new();
    let node = store.add_concept("new\tyork", SourceType::Unknown).unwrap();
    assert_eq!(store.name(node), "new york");
    assert_eq!(store.find_concept("new\tyork"), Some(node));
}

#[test]
fn test_rename_concept() {
    let mut store = store_with(&[("cat", "ISA", "mammal")]);
    let cat = store.find_concept("cat").unwrap();
    store.rename_concept(cat, "feline").unwrap();
    assert_eq!(store.find_concept("feline"), Some(cat));
    assert!(store.find_concept("cat").is_none());

    let err = store.rename_concept(cat, "mammal").unwrap_err();
    assert!(matches!(err, HprError::DuplicateName { .. }));
}

#[test]
fn test_next_sense_number() {
    let mut store = KnowledgeStore::new();
    store.add_concept("bank#n1", SourceType::Unknown).unwrap();
    store.add_concept("bank#n2", SourceType::Unknown).unwrap();
    assert_eq!(store.next_sense_number("bank", Pos::Noun), 3);
    assert_eq!(store.next_sense_number("bank", Pos::Verb), 1);
}

#[test]
fn test_concept_from_substr() {
    let store = store_with(&[
        ("sea water", "ISA", "liquid"),
        ("watermelon", "ISA", "fruit"),
    ]);
    let find = |m: MatchType| store.concept_from_substr("water", Pos::Any, m, LexicalType::Any);
    assert_eq!(find(MatchType::Substring).len(), 2);
    assert_eq!(
        find(MatchType::WholeWord),
        vec![store.find_concept("sea water").unwrap()]
    );
    assert_eq!(
        find(MatchType::Prefix),
        vec![store.find_concept("watermelon").unwrap()]
    );
}

// ==================== Relations ====================

#[test]
fn test_add_triple_creates_statement() {
    let store = store_with(&[("apple", "color", "red")]);
    let apple = store.find_concept("apple").unwrap();
    let color = store.find_concept("color").unwrap();
    let red = store.find_concept("red").unwrap();

    let targets = store.targets(apple, color);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].node, red);

    let data = store.statement(targets[0].statement).unwrap();
    assert_eq!(data.argument, apple);
    assert_eq!(data.referent, red);
    assert_eq!(data.relation_type, color);
    assert_eq!(store.statement_text(targets[0].statement), "color(apple)={red}");

    let sources = store.sources(red, color);
    assert_eq!(sources[0].node, apple);
}

#[test]
fn test_readd_updates_certainty() {
    let mut store = KnowledgeStore::new();
    let first = store.add_triple("apple", "color", "red", cv(0.5)).unwrap();
    let second = store.add_triple("apple", "color", "red", cv(0.8)).unwrap();
    assert_eq!(first, second);
    assert_eq!(store.statement(first).unwrap().certainty.certainty, 0.8);
    assert_eq!(store.statistics().relations, 1);
}

#[test]
fn test_bidirectional_readd_creates_mirror() {
    let mut store = KnowledgeStore::new();
    let a = store.add_concept("cat", SourceType::Unknown).unwrap();
    let b = store.add_concept("dog", SourceType::Unknown).unwrap();
    let near = store.add_concept("near", SourceType::Unknown).unwrap();
    let plain = ConditionalType::NotConditional;

    store
        .add_relation(a, b, near, cv(0.5), false, plain, SourceType::Unknown)
        .unwrap();
    assert!(store.targets(b, near).is_empty());

    store
        .add_relation(a, b, near, cv(0.7), true, plain, SourceType::Unknown)
        .unwrap();
    let mirror = store.targets(b, near);
    assert_eq!(mirror.len(), 1);
    assert_eq!(mirror[0].node, a);
    assert!((mirror[0].certainty.certainty - 0.7).abs() < 1e-6);
    assert_eq!(store.statistics().relations, 2);
}

#[test]
fn test_symmetric_relation_mirrored() {
    let store = store_with(&[("happy", "SIM", "glad")]);
    let v = store.vocab();
    let happy = store.find_concept("happy").unwrap();
    let glad = store.find_concept("glad").unwrap();
    assert_eq!(store.targets(glad, v.sim)[0].node, happy);
    assert_eq!(store.targets(happy, v.sim)[0].node, glad);
    assert_eq!(store.statistics().relations, 2);
}

#[test]
fn test_targets_most_recent_first() {
    let store = store_with(&[
        ("apple", "color", "red"),
        ("apple", "color", "green"),
        ("apple", "color", "yellow"),
    ]);
    let apple = store.find_concept("apple").unwrap();
    let color = store.find_concept("color").unwrap();
    let names: Vec<&str> = store
        .targets(apple, color)
        .iter()
        .map(|n| store.name(n.node))
        .collect();
    assert_eq!(names, vec!["yellow", "green", "red"]);
}

#[test]
fn test_any_relation_wildcard() {
    let store = store_with(&[("apple", "color", "red"), ("apple", "taste", "sweet")]);
    let apple = store.find_concept("apple").unwrap();
    assert_eq!(store.targets(apple, store.vocab().any).len(), 2);
}

#[test]
fn test_context_attached_to_statement() {
    let mut store = KnowledgeStore::new();
    let statement = store.add_triple("snow", "color", "white", cv(0.9)).unwrap();
    let winter = store.add_concept("winter", SourceType::Unknown).unwrap();
    let cx_time = store.vocab().cx_time;
    store.add_context(statement, cx_time, winter, cv(0.8)).unwrap();

    let snow = store.find_concept("snow").unwrap();
    let color = store.find_concept("color").unwrap();
    let found = store.targets_of(snow, color, ConditionalType::NotConditional, &[cx_time]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].contexts.len(), 1);
    assert_eq!(found[0].contexts[0].node, winter);
}

#[test]
fn test_implication_statements() {
    let mut store = KnowledgeStore::new();
    let rule = store
        .add_implication(("ANY", "ISA", "bird"), ("ANY", "fly", "yes"), cv(0.9))
        .unwrap();
    let data = store.statement(rule).unwrap().clone();
    assert_eq!(data.relation_type, store.vocab().imp);
    assert_eq!(
        store.statement(data.argument).unwrap().conditional,
        ConditionalType::Antecedent
    );
    assert_eq!(
        store.statement(data.referent).unwrap().conditional,
        ConditionalType::Consequent
    );

    let fly = store.find_concept("fly").unwrap();
    let consequents = store.statements_of(fly, |c| c.is_consequent());
    assert_eq!(consequents, vec![data.referent]);

    // Rule halves are not plain facts.
    let any = store.vocab().any;
    assert!(store.targets(any, store.vocab().isa).is_empty());
}

#[test]
fn test_lexical_endpoint_rejected() {
    let mut store = store_with(&[("bank", "LEX", "bank#n1")]);
    let err = store
        .add_triple("bank", "ISA", "institution", cv(0.9))
        .unwrap_err();
    assert!(matches!(err, HprError::LexicalEndpoint { .. }));
}

// ==================== Removal ====================

#[test]
fn test_delete_concept_cascades() {
    let mut store = store_with(&[
        ("apple", "color", "red"),
        ("cherry", "color", "red"),
        ("apple", "ISA", "fruit"),
    ]);
    let apple = store.find_concept("apple").unwrap();
    let statement = store.targets(apple, store.vocab().isa)[0].statement;
    let autumn = store.add_concept("autumn", SourceType::Unknown).unwrap();
    let cx_time = store.vocab().cx_time;
    store.add_context(statement, cx_time, autumn, cv(0.5)).unwrap();

    let removed = store.delete_concept(apple).unwrap();
    assert_eq!(removed, 3);
    assert!(store.find_concept("apple").is_none());
    assert!(store.get(statement).is_none());

    let red = store.find_concept("red").unwrap();
    let color = store.find_concept("color").unwrap();
    assert_eq!(store.sources(red, color).len(), 1);
    assert_eq!(store.statistics().relations, 1);
}

#[test]
fn test_delete_relation_type_removes_its_statements() {
    let mut store = store_with(&[
        ("apple", "color", "red"),
        ("pear", "color", "green"),
        ("apple", "taste", "sweet"),
    ]);
    let apple = store.find_concept("apple").unwrap();
    let color = store.find_concept("color").unwrap();
    let statement = store.targets(apple, color)[0].statement;
    let autumn = store.add_concept("autumn", SourceType::Unknown).unwrap();
    let cx_time = store.vocab().cx_time;
    store.add_context(statement, cx_time, autumn, cv(0.5)).unwrap();

    // Two color statements plus the context on one of them.
    assert_eq!(store.delete_concept(color).unwrap(), 3);
    assert!(store.find_concept("color").is_none());
    assert!(store.get(statement).is_none());
    assert_eq!(store.targets(apple, store.vocab().any).len(), 1);

    let stats = store.statistics();
    assert_eq!(stats.relations, 1);
    assert_eq!(stats.descriptor_types, 1);

    let mut out = Vec::new();
    plausible_reasoning::format::DumpWriter::new()
        .without_header()
        .write_to(&store, &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("apple\ttaste\tsweet"));
    assert!(!text.contains('?'));
}

#[test]
fn test_delete_core_concept_refused() {
    let mut store = KnowledgeStore::new();
    let isa = store.vocab().isa;
    let err = store.delete_concept(isa).unwrap_err();
    assert!(matches!(err, HprError::InvariantViolation(_)));
}

#[test]
fn test_purge_dynamic() {
    let mut store = store_with(&[("apple", "color", "red")]);
    store.set_mode(StoreMode::Dynamic);
    store.add_triple("apple", "taste", "sweet", cv(0.7)).unwrap();
    store.set_mode(StoreMode::Static);

    let before = store.statistics().relations;
    assert_eq!(before, 2);
    let removed = store.purge_dynamic().unwrap();
    assert!(removed >= 3);
    assert_eq!(store.statistics().relations, 1);
    assert!(store.find_concept("sweet").is_none());
    assert!(store.find_concept("red").is_some());
}

#[test]
fn test_lock_blocks_mutation() {
    let mut store = store_with(&[("apple", "color", "red")]);
    store.lock();
    assert!(store.is_locked());
    let err = store.add_triple("pear", "color", "green", cv(0.9)).unwrap_err();
    assert!(matches!(err, HprError::StoreLocked));
    let apple = store.find_concept("apple").unwrap();
    assert!(matches!(store.delete_concept(apple), Err(HprError::StoreLocked)));

    store.unlock();
    store.add_triple("pear", "color", "green", cv(0.9)).unwrap();
    assert_eq!(store.statistics().relations, 2);
}

// ==================== Statistics ====================

#[test]
fn test_statistics() {
    let store = store_with(&[
        ("apple", "color", "red"),
        ("cherry", "color", "red"),
        ("apple", "taste", "sweet"),
    ]);
    let stats = store.statistics();
    assert_eq!(stats.relations, 3);
    assert_eq!(stats.descriptor_types, 2);
    assert!(stats.total_concepts > store.vocab().all().len());
    let text = stats.to_string();
    assert!(text.contains("Relations: 3"));
}

#[test]
fn test_concept_dump() {
    let store = store_with(&[("apple", "color", "red"), ("apple", "ISA", "fruit")]);
    let apple = store.find_concept("apple").unwrap();
    let dump = store.concept_dump(apple, 10);
    assert!(dump.contains("Node: apple"));
    assert!(dump.contains("In/Out degree: 0/2"));
}

// ==================== Hierarchy ====================

#[test]
fn test_has_ancestor_with_cycle() {
    let store = store_with(&[("a", "ISA", "b"), ("b", "ISA", "a"), ("b", "ISA", "c")]);
    let a = store.find_concept("a").unwrap();
    let c = store.find_concept("c").unwrap();
    let missing = store.find_concept("ISA").unwrap();
    assert!(store.has_ancestor(a, c));
    assert!(!store.has_ancestor(a, missing));
    assert!(store.has_ancestor(a, store.vocab().any));
}

#[test]
fn test_descendants_and_leaves() {
    let store = store_with(&[
        ("sparrow", "ISA", "bird"),
        ("robin", "ISA", "bird"),
        ("bird", "ISA", "animal"),
    ]);
    let animal = store.find_concept("animal").unwrap();
    let sparrow = store.find_concept("sparrow").unwrap();
    assert_eq!(store.descendants(animal).len(), 4);
    let leaves = store.leaf_descendants(animal);
    assert_eq!(leaves.len(), 2);
    assert!(leaves.contains(&sparrow));
}

#[test]
fn test_common_parent() {
    let store = store_with(&[
        ("cat", "ISA", "mammal"),
        ("dog", "ISA", "mammal"),
        ("mammal", "ISA", "animal"),
        ("trout", "ISA", "fish"),
        ("fish", "ISA", "animal"),
    ]);
    let id = |n: &str| store.find_concept(n).unwrap();
    assert_eq!(store.common_parent(id("cat"), id("dog"), 5), Some(id("mammal")));
    assert_eq!(store.common_parent(id("cat"), id("trout"), 5), Some(id("animal")));
    assert_eq!(store.common_parent(id("cat"), id("mammal"), 5), Some(id("mammal")));
    assert_eq!(store.common_parent(id("cat"), id("trout"), 1), None);
}

#[test]
fn test_find_all_parents_depth_bounded() {
    let store = store_with(&[("a", "ISA", "b"), ("b", "ISA", "c"), ("c", "ISA", "d")]);
    let a = store.find_concept("a").unwrap();
    assert_eq!(store.find_all_parents(a, 1).len(), 1);
    assert_eq!(store.find_all_parents(a, 3).len(), 3);
    assert_eq!(store.depth_in_isa(a), 4);
}

#[test]
fn test_antonym_and_synset() {
    let store = store_with(&[("hot#a1", "DIS", "cold#a1"), ("hot#a1", "SYN", "§hot")]);
    let hot = store.find_concept("hot#a1").unwrap();
    let cold = store.find_concept("cold#a1").unwrap();
    assert_eq!(store.antonym_of(hot), Some(cold));
    assert_eq!(store.antonym_of(cold), Some(hot));
    assert_eq!(store.synset_of(hot), store.find_concept("§hot"));
}
