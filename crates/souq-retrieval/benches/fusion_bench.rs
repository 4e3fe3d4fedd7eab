use criterion::{criterion_group, criterion_main, Criterion};
use souq_core::models::Candidate;
use souq_retrieval::search::fusion::fuse;
use souq_retrieval::search::similarity::{cosine, l2_normalize};

const DIM: usize = 1024;

fn vector(seed: usize) -> Vec<f32> {
    (0..DIM)
        .map(|i| (((seed * 31 + i * 17) % 97) as f32 / 97.0) - 0.5)
        .collect()
}

fn pool(size: usize) -> Vec<Candidate> {
    (0..size)
        .map(|i| Candidate {
            id: format!("p{i}"),
            lexical_score: (i % 11) as f64,
            vector: Some(vector(i)),
            ..Default::default()
        })
        .collect()
}

fn bench_cosine(c: &mut Criterion) {
    let a = vector(1);
    let b = vector(2);
    c.bench_function("cosine_1024", |bench| bench.iter(|| cosine(&a, &b)));
}

fn bench_fuse_default_pool(c: &mut Criterion) {
    // k = 25 with the default pool multiplier of 5.
    let query = l2_normalize(vector(7));
    let candidates = pool(125);
    c.bench_function("fuse_pool_125", |bench| {
        bench.iter(|| fuse(candidates.clone(), &query, 0.5, 5.0))
    });
}

fn bench_fuse_store_pool(c: &mut Criterion) {
    // Store-scoped hybrid: fused pool of 200, lexical pool of 1000.
    let query = l2_normalize(vector(7));
    let candidates = pool(1000);
    c.bench_function("fuse_pool_1000", |bench| {
        bench.iter(|| fuse(candidates.clone(), &query, 0.5, 5.0))
    });
}

criterion_group!(
    benches,
    bench_cosine,
    bench_fuse_default_pool,
    bench_fuse_store_pool
);
criterion_main!(benches);
