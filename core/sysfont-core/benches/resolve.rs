//! Criterion benchmarks for catalog construction and name resolution

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sysfont_core::alias::ALIAS_GROUPS;
use sysfont_core::discovery::{parse_fc_list, RawFontEntry};
use sysfont_core::system::FontCatalog;

const STYLES: [&str; 4] = ["Regular", "Bold", "Italic", "Bold Italic"];

fn fc_list_output(families: usize) -> String {
    let mut out = String::new();
    for i in 0..families {
        for style in STYLES {
            out.push_str(&format!(
                "/usr/share/fonts/family{i}/Family{i}-{}.ttf: Family {i}:style={style}\n",
                style.replace(' ', "")
            ));
        }
    }
    out.push_str("/usr/share/fonts/dejavu/DejaVuSans.ttf: DejaVu Sans:style=Book\n");
    out
}

fn sample_entries() -> Vec<RawFontEntry> {
    parse_fc_list(&fc_list_output(500))
}

fn bench_catalog_build(c: &mut Criterion) {
    let text = fc_list_output(500);
    let entries = sample_entries();

    c.bench_function("parse_fc_list 2k lines", |b| {
        b.iter(|| parse_fc_list(black_box(&text)))
    });

    c.bench_function("FontCatalog::build 2k entries", |b| {
        b.iter(|| FontCatalog::build(black_box(&entries), ALIAS_GROUPS))
    });
}

fn bench_resolution(c: &mut Criterion) {
    let catalog = FontCatalog::build(&sample_entries(), ALIAS_GROUPS);
    let matcher = catalog.matcher();

    c.bench_function("resolution exact family", |b| {
        b.iter(|| matcher.resolution(black_box(&["Family 250"]), 12.0, true, true))
    });

    c.bench_function("resolution via alias", |b| {
        b.iter(|| matcher.resolution(black_box(&["Missing, sans"]), 12.0, true, false))
    });

    c.bench_function("resolution default font", |b| {
        b.iter(|| matcher.resolution(black_box(&["nothing", "here"]), 12.0, false, false))
    });
}

criterion_group!(benches, bench_catalog_build, bench_resolution);
criterion_main!(benches);
