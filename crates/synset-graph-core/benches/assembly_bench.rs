//! Criterion benchmark for the lower-triangular assembly loop.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use synset_graph_core::{
    assemble, sample_concepts, Concept, InMemoryTaxonomy, MetricKind, MetricScorer,
    ProgressEstimator,
};

/// Balanced binary hypernym tree with `levels` levels.
fn synthetic_taxonomy(levels: u32) -> InMemoryTaxonomy {
    let mut entries: Vec<(Concept, Vec<Concept>)> = vec![(Concept::from("n0"), vec![])];
    let count = 2usize.pow(levels) - 1;
    for i in 1..count {
        let parent = (i - 1) / 2;
        entries.push((
            Concept::new(format!("n{}", i)),
            vec![Concept::new(format!("n{}", parent))],
        ));
    }
    InMemoryTaxonomy::from_entries(entries).unwrap()
}

fn bench_assembly(c: &mut Criterion) {
    let tax = synthetic_taxonomy(9); // 511 concepts
    let mut group = c.benchmark_group("assemble");

    for &n in &[50usize, 100, 200] {
        let sample = sample_concepts(tax.concepts(), n, 42).unwrap();
        for metric in [MetricKind::Path, MetricKind::Wup] {
            group.bench_with_input(
                BenchmarkId::new(metric.short_name(), n),
                &sample,
                |b, sample| {
                    b.iter(|| {
                        let scorer = MetricScorer::new(metric, &tax, None).unwrap();
                        let mut estimator = ProgressEstimator::new(sample.len(), 0.05);
                        black_box(assemble(sample, &scorer, &mut estimator).unwrap())
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_assembly);
criterion_main!(benches);
