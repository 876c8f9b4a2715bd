use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};

use diagram_poster::rendering::layout::{PosterLayout, Size};
use diagram_poster::{rendering, Cell, Quad, TitleFont};

// Run with:
//    cargo bench --bench compose_bench

fn bench_layout(c: &mut Criterion) {
    let sizes = Quad {
        top_left: Size::new(1200, 900),
        top_right: Size::new(800, 1100),
        bottom_left: Size::new(1400, 700),
        bottom_right: Size::new(600, 650),
    };
    c.bench_function("poster_layout", |b| {
        b.iter(|| PosterLayout::compute(criterion::black_box(&sizes), 40, 60).unwrap())
    });
}

fn bench_compose(c: &mut Criterion) {
    let cells = Quad::from_fn(|pos| {
        Cell::new(
            format!("{} diagram", pos.label()),
            RgbImage::from_pixel(640, 480, Rgb([120, 160, 200])),
        )
    });
    let font = TitleFont::builtin(30.0);

    c.bench_function("compose_builtin_font", |b| {
        b.iter(|| rendering::compose(&cells, 40, 60, 2, &font).unwrap())
    });
}

criterion_group!(benches, bench_layout, bench_compose);
criterion_main!(benches);
