//! Catalog parsing and lookup throughput
//!
//! Big karaoke catalogs run to tens of thousands of songs; loading has to
//! stay well under the folder poll interval.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use karaokebox::catalog::parse;
use std::path::Path;

fn catalog(songs: usize) -> String {
    let mut out = String::with_capacity(songs * 80);
    for id in 1..=songs {
        out.push_str(&format!(
            "[{id}]\nArquivo= {id:05}.mp4\nArtista= Artist {a}\nMusica= Song number {id}\n***\n",
            a = id % 300
        ));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_parse");
    for size in [1_000usize, 20_000] {
        let content = catalog(size);
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| black_box(parse(black_box(&content), Path::new("/karaoke"))))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let songs = parse(&catalog(20_000), Path::new("/karaoke"));
    c.bench_function("catalog_lookup_last", |b| {
        b.iter(|| black_box(songs.iter().find(|s| s.id == black_box(19_999))))
    });
}

criterion_group!(benches, bench_parse, bench_lookup);
criterion_main!(benches);
