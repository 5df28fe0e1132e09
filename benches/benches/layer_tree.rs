// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `lona_layer` document decoding, encoding, and direction rewrites.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lona_layer::{DecodeContext, FlexDirection, LayerId, LayerTree, LayerType, SizingRule};
use lona_params::ParameterStore;
use serde_json::{Value, json};

/// A document `depth` levels deep with `fanout` children per view.
fn document(depth: u32, fanout: u32) -> Value {
    fn layer(name: String, depth: u32, fanout: u32) -> Value {
        if depth == 0 {
            return json!({
                "id": name,
                "type": "Lona:Text",
                "params": { "text": "Label", "font": "body", "marginTop": 0 }
            });
        }
        let children: Vec<_> = (0..fanout)
            .map(|i| layer(format!("{name}.{i}"), depth - 1, fanout))
            .collect();
        let direction = if depth % 2 == 0 { "row" } else { "column" };
        json!({
            "id": name,
            "type": "Lona:View",
            "params": {
                "flexDirection": direction,
                "paddingTop": 8,
                "backgroundColor": "#eee",
                "flex": 1
            },
            "children": children
        })
    }
    layer("root".into(), depth, fanout)
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    for &(depth, fanout) in &[(3_u32, 4_u32), (4, 6)] {
        let record = document(depth, fanout);
        let label = format!("d{depth}_f{fanout}");

        group.bench_with_input(BenchmarkId::new("decode", &label), &record, |b, record| {
            b.iter_batched(
                LayerTree::new,
                |mut tree| {
                    let id = tree
                        .decode_layer(black_box(record), &DecodeContext::default())
                        .unwrap();
                    black_box((tree, id))
                },
                BatchSize::SmallInput,
            );
        });

        let mut tree = LayerTree::new();
        let root = tree
            .decode_layer(&record, &DecodeContext::default())
            .unwrap();
        group.bench_with_input(BenchmarkId::new("encode", &label), &root, |b, &root| {
            b.iter(|| black_box(tree.encode_layer(black_box(root)).unwrap()));
        });
    }
    group.finish();
}

fn container_with_children(count: usize) -> (LayerTree, LayerId) {
    let mut tree = LayerTree::new();
    let parent = tree.create_layer("parent", LayerType::VIEW, ParameterStore::new());
    for i in 0..count {
        let child = tree.create_layer(format!("child {i}"), LayerType::VIEW, ParameterStore::new());
        tree.append_child(parent, child).unwrap();
        let rules = SizingRule::ALL;
        tree.set_width_sizing_rule(child, rules[i % 3]).unwrap();
        tree.set_height_sizing_rule(child, rules[(i / 3) % 3]).unwrap();
    }
    (tree, parent)
}

fn bench_direction(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_flex_direction");
    for &count in &[8_usize, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || container_with_children(count),
                |(mut tree, parent)| {
                    tree.set_flex_direction(parent, FlexDirection::Row).unwrap();
                    black_box(tree)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec, bench_direction);
criterion_main!(benches);
