//! Benchmarks for amboss-extract extraction and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic article pages of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use amboss_extract::{extract, render, OutputFormat};

/// Creates a synthetic article page with the given number of sections.
fn create_test_article(section_count: usize) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><head><title>Benchmark article - AMBOSS</title></head><body>",
    );

    for i in 0..section_count {
        html.push_str(&format!(
            r#"<section data-e2e-test-id="section-with-header">
<div data-e2e-test-id="particle-header"><h3>Section heading {i}</h3></div>
<div data-e2e-test-id="section-content-is-hidden"><div class="baseStyles">
<p>Paragraph {i} with <strong>emphasis</strong> and a citation [{i}].</p>
<ul><li>First finding</li><li>Second finding<ul><li>Detail {i}</li></ul></li></ul>
<table><thead><tr><th>Drug</th><th>Dose</th></tr></thead>
<tbody><tr><td>Drug {i}</td><td>1 g<br>twice daily</td></tr></tbody></table>
<div class="box box-yellow"><h4>Caution</h4><p>Monitor renal function.</p></div>
<span class="thumbnail__image"><img src="/media/{i}.jpg" alt="Figure {i}"></span>
</div></div>
</section>"#,
            i = i
        ));
    }

    html.push_str("</body></html>");
    html
}

/// Benchmark extraction at various article sizes.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for section_count in [1, 10, 50].iter() {
        let html = create_test_article(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| extract(black_box(&html), "benchmark.html").unwrap());
        });
    }

    group.finish();
}

/// Benchmark rendering an extracted article to each format.
fn bench_rendering(c: &mut Criterion) {
    let doc = extract(&create_test_article(10), "benchmark.html").unwrap();
    let mut group = c.benchmark_group("rendering");

    for format in OutputFormat::ALL {
        group.bench_function(format.name(), |b| {
            b.iter(|| render(black_box(&doc), format).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_rendering);
criterion_main!(benches);
