//! Layout benchmarks.

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use greeter_theme_layout::{emit, resolve, wrap, DrawList, MonospaceMeasure, ResolveOptions, RuntimeContext};
use greeter_theme_parser::{parse, ParseOptions};

const CIRCLES_DOC: &str = include_str!("../../greeter-theme-parser/tests/fixtures/circles/circles.xml");

const PARAGRAPH: &str = "Your password has expired. Please contact the <b>system administrator</b> \
    or choose a new password of at least <i>eight characters</i> that you have not used before.";

fn wrap_paragraph(c: &mut Criterion) {
    let oracle = MonospaceMeasure::default();
    c.bench_function("wrap_paragraph", |b| {
        b.iter(|| wrap(black_box(PARAGRAPH), true, Some(240), Some("Sans 10"), &oracle))
    });
}

fn resolve_circles(c: &mut Criterion) {
    let options = ParseOptions {
        read_image_sizes: false,
        ..ParseOptions::default()
    };
    let tree = parse(CIRCLES_DOC, Path::new("."), &options).unwrap();
    let oracle = MonospaceMeasure::default();
    let runtime = RuntimeContext::default();
    let resolve_options = ResolveOptions::default();
    c.bench_function("resolve_circles", |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            resolve(&mut tree, black_box(1024), black_box(768), &oracle, &runtime, &resolve_options);
            let mut list = DrawList::default();
            emit(&tree, &oracle, &resolve_options, &mut list);
            list
        })
    });
}

criterion_group!(benches, wrap_paragraph, resolve_circles);
criterion_main!(benches);
