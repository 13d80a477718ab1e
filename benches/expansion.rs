//! Benchmarks for token resolution and expansion.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use quicktag::abbrev::expand;
use quicktag::span::resolve_token;

fn bench_expand_simple(c: &mut Criterion) {
    c.bench_function("expand_simple", |b| {
        b.iter(|| expand(black_box("div#main")).unwrap())
    });
}

fn bench_expand_deep(c: &mut Criterion) {
    let token = (0..64).map(|i| format!("div.l{i}")).collect::<Vec<_>>().join("/");
    c.bench_function("expand_deep", |b| {
        b.iter(|| expand(black_box(&token)).unwrap())
    });
}

fn bench_resolve_long_line(c: &mut Criterion) {
    let doc = format!("{} ul.list/li", "word ".repeat(2000));
    let cursor = doc.len();
    c.bench_function("resolve_long_line", |b| {
        b.iter(|| resolve_token(black_box(doc.as_str()), cursor).unwrap())
    });
}

criterion_group!(benches, bench_expand_simple, bench_expand_deep, bench_resolve_long_line);
criterion_main!(benches);
