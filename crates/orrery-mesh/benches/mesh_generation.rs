use criterion::{Criterion, black_box, criterion_group, criterion_main};
use orrery_mesh::{generate_sphere, generate_starfield};

fn bench_sphere_40x40(c: &mut Criterion) {
    c.bench_function("sphere_40x40", |bencher| {
        bencher.iter(|| generate_sphere(black_box(1.0), black_box(40), black_box(40)))
    });
}

fn bench_sphere_256x256(c: &mut Criterion) {
    c.bench_function("sphere_256x256", |bencher| {
        bencher.iter(|| generate_sphere(black_box(1.0), black_box(256), black_box(256)))
    });
}

fn bench_starfield_1000(c: &mut Criterion) {
    c.bench_function("starfield_1000", |bencher| {
        bencher.iter(|| generate_starfield(black_box(1000), black_box(30.0), Some(42)))
    });
}

criterion_group!(
    benches,
    bench_sphere_40x40,
    bench_sphere_256x256,
    bench_starfield_1000
);
criterion_main!(benches);
