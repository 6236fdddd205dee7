//! Benchmarks for loading and joining dbt artifacts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dbt_extractor::dbt::{Catalog, CompiledSqlIndex, Manifest};
use dbt_extractor::{DbtExtractor, ExtractorConfig};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

const SCHEMAS: [&str; 4] = ["public", "finance", "marketing", "staging"];

fn synthetic_project(models: usize, columns: usize) -> (Value, Value) {
    let mut manifest_nodes = Map::new();
    let mut catalog_nodes = Map::new();

    for i in 0..models {
        let id = format!("model.bench.model_{}", i);
        let schema = SCHEMAS[i % SCHEMAS.len()];

        let mut manifest_columns = Map::new();
        let mut catalog_columns = Map::new();
        for c in 0..columns {
            let name = format!("col_{}", c);
            manifest_columns.insert(
                name.clone(),
                json!({"name": name, "description": "Benchmark\\ column"}),
            );
            catalog_columns.insert(
                name.to_uppercase(),
                json!({"type": "TEXT", "index": c + 1}),
            );
        }

        let owner = if i % 3 == 0 { json!(format!("team_{}", i % 5)) } else { Value::Null };

        manifest_nodes.insert(
            id.clone(),
            json!({
                "resource_type": "model",
                "schema": schema,
                "alias": format!("model_{}", i),
                "database": "ANALYTICS",
                "description": "Benchmark\\ model",
                "raw_sql": "select 1",
                "columns": manifest_columns,
                "config": {"owner": owner},
                "original_file_path": format!("models/model_{}.sql", i)
            }),
        );
        catalog_nodes.insert(
            id,
            json!({"metadata": {"type": "BASE TABLE"}, "columns": catalog_columns}),
        );
    }

    (json!({ "nodes": manifest_nodes }), json!({ "nodes": catalog_nodes }))
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");

    for models in [100, 1_000, 5_000].iter() {
        let (manifest, catalog) = synthetic_project(*models, 20);
        let manifest: Manifest = serde_json::from_value(manifest).unwrap();
        let catalog: Catalog = serde_json::from_value(catalog).unwrap();
        let compiled = CompiledSqlIndex::default();

        group.throughput(Throughput::Elements(*models as u64));
        group.bench_with_input(BenchmarkId::from_parameter(models), models, |b, _| {
            b.iter(|| {
                DbtExtractor::from_parts(
                    ExtractorConfig::default(),
                    black_box(&manifest),
                    black_box(&catalog),
                    &compiled,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_load_from_disk(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let (manifest, catalog) = synthetic_project(1_000, 20);
    let manifest_path = temp.path().join("manifest.json");
    let catalog_path = temp.path().join("catalog.json");
    std::fs::write(&manifest_path, manifest.to_string()).unwrap();
    std::fs::write(&catalog_path, catalog.to_string()).unwrap();

    let compiled_dir = temp.path().join("compiled");
    std::fs::create_dir(&compiled_dir).unwrap();
    for i in 0..1_000 {
        let schema = SCHEMAS[i % SCHEMAS.len()];
        std::fs::write(
            compiled_dir.join(format!("{}_model_{}.sql", schema, i)),
            "select * from raw.events",
        )
        .unwrap();
    }

    let config = ExtractorConfig::default()
        .with_manifest(manifest_path)
        .with_catalog(catalog_path)
        .with_compiled_location(compiled_dir);

    c.bench_function("load_from_disk_1000_models", |b| {
        b.iter(|| DbtExtractor::new(black_box(config.clone())).unwrap().count())
    });
}

criterion_group!(benches, bench_join, bench_load_from_disk);
criterion_main!(benches);
