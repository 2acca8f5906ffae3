//! Extraction benchmarks
//!
//! Synthetic syntax trees of growing size are run through each stage:
//! 1. Tree building only
//! 2. Building plus frequency collection and aggregation
//! 3. Tabular export of a built tree
//!
//! Run with: cargo bench --bench extraction

use astfeat::engine::FrequencyCollector;
use astfeat::{to_csv_string, Extractor, FeatureSet, Tree, TreeBuilder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

// ============================================================================
// Input generation
// ============================================================================

/// `statements` copies of `var vN = unescape("%7N") + N;`
fn synthetic(statements: usize) -> (String, Value) {
    let mut source = String::new();
    let mut body = Vec::with_capacity(statements);

    for i in 0..statements {
        let start = source.len();
        let line = format!("var v{i} = unescape(\"%7{i}\") + {i};\n");
        let end = start + line.len() - 1;
        source.push_str(&line);

        body.push(json!({
            "type": "VariableDeclaration", "start": start, "end": end, "kind": "var",
            "declarations": [{
                "type": "VariableDeclarator", "start": start + 4, "end": end - 1,
                "id": {"type": "Identifier", "start": start + 4, "end": start + 6, "name": format!("v{i}")},
                "init": {
                    "type": "BinaryExpression", "start": start + 9, "end": end - 1, "operator": "+",
                    "left": {
                        "type": "CallExpression", "start": start + 9, "end": start + 24,
                        "callee": {"type": "Identifier", "start": start + 9, "end": start + 17, "name": "unescape"},
                        "arguments": [{"type": "Literal", "start": start + 18, "end": start + 23,
                                       "value": format!("%7{i}"), "raw": format!("\"%7{i}\"")}]
                    },
                    "right": {"type": "Literal", "start": end - 2, "end": end - 1, "value": i, "raw": i.to_string()}
                }
            }]
        }));
    }

    let ast = json!({"type": "Program", "start": 0, "end": source.len(), "body": body});
    (source, ast)
}

const SIZES: [usize; 3] = [10, 100, 1000];

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for size in SIZES {
        let (_, ast) = synthetic(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("tree", size), &ast, |b, ast| {
            b.iter(|| Tree::build(black_box(ast)))
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let extractor = Extractor::default();
    for size in SIZES {
        let (source, ast) = synthetic(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("pipeline", size), &size, |b, _| {
            b.iter(|| extractor.extract(black_box(&source), black_box(&ast)))
        });
        group.bench_with_input(BenchmarkId::new("aggregate", size), &size, |b, _| {
            b.iter(|| {
                let mut collector = FrequencyCollector::new();
                let _ = TreeBuilder::new(&mut collector).build(black_box(&ast));
                FeatureSet::aggregate(collector.into_tables(), black_box(&source))
            })
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    for size in SIZES {
        let (_, ast) = synthetic(size);
        let Ok(tree) = Tree::build(&ast) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("csv", size), &tree, |b, tree| {
            b.iter(|| to_csv_string(black_box(tree), "bench.js"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_extract, bench_export);
criterion_main!(benches);
