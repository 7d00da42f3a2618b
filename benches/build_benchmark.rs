//! Benchmarks for document building and package assembly.
//!
//! Run with: cargo bench
//!
//! These benchmarks cover label resolution, part rendering, and archive
//! writing at various document sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docxforge::{
    fixtures, Document, DocumentBuilder, DocxWriter, Level, NumberFormat, Paragraph,
    WriteOptions,
};

/// Creates a document with the given number of plain paragraphs.
fn create_test_document(paragraph_count: usize) -> Document {
    let mut builder = DocumentBuilder::new();
    for i in 0..paragraph_count {
        builder.paragraph(Paragraph::with_text(format!(
            "This is paragraph {} with some test content for benchmarking purposes.",
            i
        )));
    }
    builder.finish()
}

fn outline_levels() -> Vec<Level> {
    vec![
        Level::numbered(0, NumberFormat::UpperRoman, "%1."),
        Level::numbered(1, NumberFormat::UpperLetter, "%1.%2"),
        Level::numbered(2, NumberFormat::Decimal, "%1.%2.%3"),
        Level::numbered(3, NumberFormat::LowerLetter, "%4)"),
    ]
}

/// Benchmark list item resolution while building.
fn bench_list_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_building");

    for item_count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*item_count as u64));
        group.bench_with_input(
            BenchmarkId::new("items", item_count),
            item_count,
            |b, &count| {
                b.iter(|| {
                    let mut builder = DocumentBuilder::new();
                    let list = builder.define_list(outline_levels()).unwrap();
                    for i in 0..count {
                        let level = (i % 4) as u8;
                        let _ = builder.list_item(list, level, Paragraph::with_text("item"));
                    }
                    black_box(builder.finish())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark package assembly at various sizes.
fn bench_package_writing(c: &mut Criterion) {
    let mut group = c.benchmark_group("package_writing");

    for para_count in [10, 100, 500, 1000].iter() {
        let document = create_test_document(*para_count);

        group.bench_with_input(
            BenchmarkId::new("paragraphs", para_count),
            &document,
            |b, doc| {
                b.iter(|| {
                    let _ = DocxWriter::new(black_box(doc)).to_bytes(&WriteOptions::default());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the built-in fixtures end to end.
fn bench_fixtures(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixtures");

    for fixture in fixtures::catalog() {
        group.bench_function(fixture.name, |b| {
            b.iter(|| {
                let doc = fixture.build().unwrap();
                let _ = DocxWriter::new(black_box(&doc)).to_bytes(&WriteOptions::default());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_list_building,
    bench_package_writing,
    bench_fixtures,
);
criterion_main!(benches);
