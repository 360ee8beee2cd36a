//! Criterion microbenches for coco2roboflow.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - COCO document parsing (from_coco_str, from_coco_slice)
//! - Category reconciliation and id rewriting (CategoryMapping)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use coco2roboflow::coco::{from_coco_slice, from_coco_str, to_coco_string, CocoDocument};
use coco2roboflow::reconcile::CategoryMapping;
use coco2roboflow::split::Split;

/// Build a synthetic split document with `images` images, 3 annotations per
/// image and `classes` categories whose ids start at `id_offset`.
fn synthetic_document(images: usize, classes: u64, id_offset: u64) -> String {
    let mut image_entries = Vec::with_capacity(images);
    let mut annotation_entries = Vec::with_capacity(images * 3);
    for i in 0..images {
        image_entries.push(format!(
            r#"{{"id": {i}, "file_name": "raw/img_{i:05}.jpg", "width": 640, "height": 480}}"#
        ));
        for k in 0..3u64 {
            let ann_id = i as u64 * 3 + k;
            let category_id = id_offset + (ann_id % classes);
            annotation_entries.push(format!(
                r#"{{"id": {ann_id}, "image_id": {i}, "category_id": {category_id}, "bbox": [10.0, 20.0, 30.5, 40.25], "area": 1228.5, "iscrowd": 0}}"#
            ));
        }
    }
    let category_entries: Vec<String> = (0..classes)
        .map(|c| {
            format!(
                r#"{{"id": {}, "name": "class_{c}", "supercategory": "thing"}}"#,
                id_offset + c
            )
        })
        .collect();

    format!(
        r#"{{"images": [{}], "annotations": [{}], "categories": [{}]}}"#,
        image_entries.join(","),
        annotation_entries.join(","),
        category_entries.join(",")
    )
}

/// Benchmark COCO document parsing from string.
fn bench_coco_parse_str(c: &mut Criterion) {
    let json = synthetic_document(500, 20, 1);
    let mut group = c.benchmark_group("coco_parse");
    group.throughput(Throughput::Bytes(json.len() as u64));

    group.bench_function("from_coco_str", |b| {
        b.iter(|| {
            let doc = from_coco_str(black_box(&json)).unwrap();
            black_box(doc)
        })
    });

    group.finish();
}

/// Benchmark COCO document parsing from byte slice.
fn bench_coco_parse_slice(c: &mut Criterion) {
    let json = synthetic_document(500, 20, 1);
    let bytes = json.as_bytes();
    let mut group = c.benchmark_group("coco_parse");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("from_coco_slice", |b| {
        b.iter(|| {
            let doc = from_coco_slice(black_box(bytes)).unwrap();
            black_box(doc)
        })
    });

    group.finish();
}

/// Benchmark writing a document back to pretty JSON.
fn bench_coco_write(c: &mut Criterion) {
    let doc = from_coco_str(&synthetic_document(500, 20, 1)).expect("parse fixture");
    let mut group = c.benchmark_group("coco_write");
    group.throughput(Throughput::Elements(doc.annotations.len() as u64));

    group.bench_function("to_coco_string", |b| {
        b.iter(|| {
            let json = to_coco_string(black_box(&doc)).unwrap();
            black_box(json)
        })
    });

    group.finish();
}

/// Benchmark building the global mapping and rewriting one split with it.
///
/// Train and val use overlapping names under shifted ids.
fn bench_reconcile(c: &mut Criterion) {
    let train = from_coco_str(&synthetic_document(500, 40, 1)).expect("parse train");
    let val = from_coco_str(&synthetic_document(100, 40, 100)).expect("parse val");
    let tables = vec![
        (Split::Train, train.categories.clone()),
        (Split::Val, val.categories.clone()),
    ];

    let mut group = c.benchmark_group("reconcile");

    group.bench_function("build", |b| {
        b.iter(|| {
            let mapping = CategoryMapping::build(black_box(&tables)).unwrap();
            black_box(mapping)
        })
    });

    let mapping = CategoryMapping::build(&tables).expect("build mapping");
    group.throughput(Throughput::Elements(train.annotations.len() as u64));
    group.bench_function("apply", |b| {
        b.iter(|| {
            let mut doc: CocoDocument = train.clone();
            mapping.apply(Split::Train, &mut doc).unwrap();
            black_box(doc)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_coco_parse_str,
    bench_coco_parse_slice,
    bench_coco_write,
    bench_reconcile,
);
criterion_main!(benches);
