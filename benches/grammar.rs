use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mrcfg::{build_grammar, Csa, StabberKind};

const KINDS: [(StabberKind, &str); 3] = [
    (StabberKind::Optimal, "OPTIMAL"),
    (StabberKind::Online, "ONLINE"),
    (StabberKind::Fast, "FAST"),
];

/// Generate repetitive text data
fn generate_repetitive_text(size: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog ";
    pattern
        .iter()
        .cycle()
        .take(size)
        .copied()
        .collect()
}

/// Generate source code-like data
fn generate_source_code(size: usize) -> Vec<u8> {
    let patterns: [&[u8]; 7] = [
        b"fn main() {\n",
        b"    let x = 42;\n",
        b"    println!(\"Hello, world!\");\n",
        b"    if x > 0 {\n",
        b"        return x;\n",
        b"    }\n",
        b"}\n",
    ];

    let mut result = Vec::new();
    let mut i = 0;
    while result.len() < size {
        result.extend_from_slice(patterns[i % patterns.len()]);
        i += 1;
    }
    result.truncate(size);
    result
}

/// Generate low-repetition data (simulating base64)
fn generate_low_repetition(size: usize) -> Vec<u8> {
    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut result = Vec::with_capacity(size);
    let mut seed = 12345u64;

    for _ in 0..size {
        // Simple LCG random
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        result.push(chars[(seed % chars.len() as u64) as usize]);
    }
    result
}

fn bench_group(c: &mut Criterion, name: &str, generate: fn(usize) -> Vec<u8>, sizes: &[usize]) {
    let mut group = c.benchmark_group(name);

    for &size in sizes {
        let csa = Csa::new(generate(size));

        for (kind, label) in KINDS {
            group.bench_with_input(BenchmarkId::new(label, size), &csa, |b, csa| {
                b.iter(|| black_box(build_grammar(black_box(csa), kind)));
            });
        }
    }

    group.finish();
}

fn bench_grammar_repetitive(c: &mut Criterion) {
    bench_group(c, "repetitive_text", generate_repetitive_text, &[1_000, 10_000]);
}

fn bench_grammar_source_code(c: &mut Criterion) {
    bench_group(c, "source_code", generate_source_code, &[1_000, 10_000]);
}

fn bench_grammar_low_repetition(c: &mut Criterion) {
    bench_group(c, "low_repetition", generate_low_repetition, &[1_000, 10_000]);
}

fn bench_csa_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("csa_construction");

    for size in [10_000usize, 100_000] {
        let data = generate_source_code(size);
        group.bench_with_input(BenchmarkId::new("Csa", size), &data, |b, data| {
            b.iter(|| black_box(Csa::new(black_box(data.clone()))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_grammar_repetitive,
    bench_grammar_source_code,
    bench_grammar_low_repetition,
    bench_csa_construction
);
criterion_main!(benches);
