//! Criterion benchmarks for the knowledge store and the reasoner.

use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;

use plausible_reasoning::engine::{Inference, Question, Reasoner, ReasonerConfig};
use plausible_reasoning::format::{DumpReader, DumpWriter};
use plausible_reasoning::graph::KnowledgeStore;
use plausible_reasoning::types::CertaintyVector;

const COLORS: [&str; 5] = ["red", "green", "blue", "yellow", "brown"];

/// Build a random ISA forest with a few attributes per concept.
fn make_store(concept_count: usize) -> KnowledgeStore {
    let mut rng = rand::thread_rng();
    let mut store = KnowledgeStore::new();

    for i in 1..concept_count {
        // Parents always have a lower index, so the hierarchy is acyclic.
        let parent = rng.gen_range(0..i);
        let _ = store.add_triple(
            &format!("c{}", i),
            "ISA",
            &format!("c{}", parent),
            CertaintyVector::with_certainty(rng.gen_range(0.5..1.0)).dominance(1.0),
        );
        if rng.gen_bool(0.2) {
            let color = COLORS[rng.gen_range(0..COLORS.len())];
            let _ = store.add_triple(
                &format!("c{}", i),
                "color",
                color,
                CertaintyVector::with_certainty(rng.gen_range(0.1..1.0)),
            );
        }
        if rng.gen_bool(0.05) {
            let similar = rng.gen_range(0..concept_count);
            if similar != i {
                let _ = store.add_triple(
                    &format!("c{}", i),
                    "SIM",
                    &format!("c{}", similar),
                    CertaintyVector::with_certainty(0.8).similarity(0.6),
                );
            }
        }
    }
    store
}

fn bench_build_store(c: &mut Criterion) {
    c.bench_function("build_store_10k", |b| b.iter(|| make_store(10_000)));
}

fn bench_readd_triple(c: &mut Criterion) {
    let mut store = make_store(10_000);

    c.bench_function("readd_triple_10k", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let i = rng.gen_range(1..10_000);
            let _ = store.add_triple(
                &format!("c{}", i),
                "color",
                "red",
                CertaintyVector::with_certainty(0.5),
            );
        })
    });
}

fn bench_export(c: &mut Criterion) {
    let store = make_store(10_000);

    c.bench_function("export_10k", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            let _ = DumpWriter::new().write_to(&store, &mut out);
            out
        })
    });
}

fn bench_import(c: &mut Criterion) {
    let store = make_store(10_000);
    let mut dump = Vec::new();
    DumpWriter::new().write_to(&store, &mut dump).unwrap();

    c.bench_function("import_10k", |b| {
        b.iter(|| {
            let mut loaded = KnowledgeStore::new();
            let _ = DumpReader::new().read_from(&mut loaded, Cursor::new(&dump), "bench");
            loaded
        })
    });
}

fn bench_recall_agen(c: &mut Criterion) {
    let store = make_store(10_000);
    let color = store.find_concept("color").unwrap();
    let config = ReasonerConfig::only(&[Inference::Agen]);

    c.bench_function("recall_agen_10k", |b| {
        let mut rng = rand::thread_rng();
        let mut reasoner = Reasoner::with_config(&store, config.clone());
        b.iter(|| {
            let arg = store.find_concept(&format!("c{}", rng.gen_range(1..10_000)));
            let _ = reasoner.answer(&Question::ask(color, arg, None));
        })
    });
}

fn bench_recall_default(c: &mut Criterion) {
    let store = make_store(2_000);
    let color = store.find_concept("color").unwrap();

    c.bench_function("recall_default_ops_2k", |b| {
        let mut rng = rand::thread_rng();
        let mut reasoner = Reasoner::new(&store);
        reasoner.set_max_depth(4);
        b.iter(|| {
            let arg = store.find_concept(&format!("c{}", rng.gen_range(1..2_000)));
            let _ = reasoner.answer(&Question::ask(color, arg, None));
        })
    });
}

fn bench_common_parent(c: &mut Criterion) {
    let store = make_store(10_000);

    c.bench_function("common_parent_10k", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let a = store.find_concept(&format!("c{}", rng.gen_range(1..10_000)));
            let x = store.find_concept(&format!("c{}", rng.gen_range(1..10_000)));
            if let (Some(a), Some(x)) = (a, x) {
                let _ = store.common_parent(a, x, 10);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_build_store,
    bench_readd_triple,
    bench_export,
    bench_import,
    bench_recall_agen,
    bench_recall_default,
    bench_common_parent,
);
criterion_main!(benches);
