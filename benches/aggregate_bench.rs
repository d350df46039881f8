// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Aggregation benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mapcompare::aggregate::{VoteAggregate, WeightAggregate};
use mapcompare::matrix::{ConnectivityMatrix, Link};

/// `maps` overlapping ring-shaped maps of `nodes` keys each
fn ring_maps(maps: usize, nodes: usize) -> Vec<ConnectivityMatrix> {
    (0..maps)
        .map(|m| {
            let links: Vec<Link> = (0..nodes)
                .map(|i| {
                    let from = format!("n{}", i + m);
                    let to = format!("n{}", (i + 1) % nodes + m);
                    Link::new(from, to)
                })
                .collect();
            ConnectivityMatrix::from_links(None, &links, false).expect("ring map")
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for nodes in [16, 64, 256] {
        let maps = ring_maps(8, nodes);
        group.bench_with_input(BenchmarkId::new("weight", nodes), &maps, |b, maps| {
            b.iter(|| WeightAggregate::create(black_box(maps)));
        });
        group.bench_with_input(BenchmarkId::new("vote", nodes), &maps, |b, maps| {
            b.iter(|| VoteAggregate::new(black_box(maps)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
