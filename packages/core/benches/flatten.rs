//! Performance benchmarks for the taxonomy view pipeline
//!
//! Run with: `cargo bench -p nursery-core`
//!
//! These benchmarks measure the paths re-run on every keystroke or refresh:
//! - Filtering plus flattening a large tree (species-level search)
//! - Flattening a fully expanded tree
//! - Building a forest from flat records and refreshing a service

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nursery_core::backend::InMemoryBackend;
use nursery_core::models::{CategoryRecord, FilterLevel, FilterState};
use nursery_core::services::TaxonomyService;
use nursery_core::tree::{build_forest, CategoryTree};
use nursery_core::view::{visible_rows, ExpansionState, Visibility};
use std::sync::Arc;
use tokio::runtime::Runtime;

const CATEGORIES: usize = 20;
const SUB_CATEGORIES: usize = 20;
const SPECIES: usize = 25;

/// Generate a three-level taxonomy with CATEGORIES * SUB_CATEGORIES * SPECIES leaves
fn generate_records() -> Vec<CategoryRecord> {
    let mut records = Vec::new();

    for c in 0..CATEGORIES {
        let category_id = format!("c{}", c);
        records.push(CategoryRecord::new(
            category_id.clone(),
            format!("Category {}", c),
            None,
        ));

        for s in 0..SUB_CATEGORIES {
            let sub_id = format!("c{}-s{}", c, s);
            records.push(CategoryRecord::new(
                sub_id.clone(),
                format!("Sub-category {} {}", c, s),
                Some(category_id.clone()),
            ));

            for p in 0..SPECIES {
                records.push(CategoryRecord::new(
                    format!("c{}-s{}-p{}", c, s, p),
                    format!("Species {} {} {}", c, s, p),
                    Some(sub_id.clone()),
                ));
            }
        }
    }

    records
}

fn generate_tree() -> CategoryTree {
    let forest = build_forest(&generate_records()).unwrap();
    CategoryTree::from_forest(forest).unwrap()
}

/// Benchmark a species-level search over the whole tree
fn bench_filtered_rows(c: &mut Criterion) {
    let tree = generate_tree();
    let filter = FilterState::only(FilterLevel::Species, "species 7 1");

    c.bench_function("filtered_rows_species", |b| {
        b.iter(|| {
            let visibility = Visibility::compute(&tree, &filter);
            let mut expansion = ExpansionState::new();
            expansion.sync(&tree, &visibility);
            black_box(visible_rows(&tree, &filter, &expansion))
        });
    });
}

/// Benchmark flattening with every category open
fn bench_expanded_rows(c: &mut Criterion) {
    let tree = generate_tree();
    let filter = FilterState::default();
    let mut expansion = ExpansionState::new();
    expansion.expand_all(&tree);

    c.bench_function("expanded_rows_all", |b| {
        b.iter(|| black_box(visible_rows(&tree, &filter, &expansion)));
    });
}

/// Benchmark snapshot construction from flat records
fn bench_refresh(c: &mut Criterion) {
    let records = generate_records();

    let mut group = c.benchmark_group("refresh");
    group.sample_size(20);

    group.bench_function("build_forest", |b| {
        b.iter(|| black_box(build_forest(&records).unwrap()));
    });

    let rt = Runtime::new().unwrap();
    let backend = InMemoryBackend::with_records(records.clone());

    group.bench_function("service_refresh", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut service = TaxonomyService::new(Arc::new(backend.clone()));
                black_box(service.refresh().await.unwrap())
            })
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_filtered_rows,
    bench_expanded_rows,
    bench_refresh
);
criterion_main!(benches);
