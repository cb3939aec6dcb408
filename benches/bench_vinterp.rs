use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array, Array1, Array3, Axis};
use rand::{distr::Uniform, rngs::StdRng, Rng, SeedableRng};

use ndarray_stratify::{Extrapolation, Interpolation, VInterpBuilder};

/// uniform samples in `[low, high]`
fn samples(size: usize, (low, high): (f64, f64), seed: u64) -> Array1<f64> {
    let uniform = Uniform::new_inclusive(low, high).unwrap();
    Array::from_iter(StdRng::seed_from_u64(seed).sample_iter(uniform).take(size))
}

/// strictly rising levels spread over `[low, high]`
fn rising_column(n_levels: usize, (low, high): (f64, f64), seed: u64) -> Array1<f64> {
    let steps = samples(n_levels, (0.5, 1.5), seed);
    let scale = (high - low) / steps.sum();
    let mut z = low;
    steps.mapv(|step| {
        z += step * scale;
        z
    })
}

/// rising coordinate of shape `(levels, ny, nx)`, shifted per column
fn levels(n_levels: usize, ny: usize, nx: usize) -> Array3<f64> {
    let base = rising_column(n_levels, (0.0, 1000.0), 42);
    let shift = samples(ny * nx, (0.0, 5.0), 7);
    Array3::from_shape_fn((n_levels, ny, nx), |(k, j, i)| base[k] + shift[j * nx + i])
}

fn bench_vinterp_column(c: &mut Criterion) {
    let z_src = rising_column(200, (0.0, 1000.0), 42);
    let fz_src = samples(z_src.len(), (0.0, 1.0), 3);
    let targets = rising_column(100, (0.0, 1000.0), 123);

    let mut group = c.benchmark_group("single column");
    for interpolation in [Interpolation::Linear, Interpolation::Nearest] {
        let interp = VInterpBuilder::new(z_src.view(), fz_src.view())
            .rising(true)
            .interpolation(interpolation)
            .extrapolation(Extrapolation::Linear)
            .build()
            .unwrap();
        group.bench_function(BenchmarkId::from_parameter(format!("{interpolation:?}")), |b| {
            b.iter(|| interp.interp(&targets).unwrap())
        });
    }
    group.finish();
}

fn bench_vinterp_grid(c: &mut Criterion) {
    let z_src = levels(40, 90, 180);
    let fz_src = z_src.mapv(|z| z.sqrt()).insert_axis(Axis(0));
    let targets = Array::linspace(100.0, 900.0, 10);

    c.bench_function("40 levels 90x180 grid `build`", |b| {
        b.iter(|| {
            VInterpBuilder::new(z_src.view(), fz_src.view())
                .axis(1)
                .build()
                .unwrap()
        })
    });

    let interp = VInterpBuilder::new(z_src.view(), fz_src.view())
        .axis(1)
        .build()
        .unwrap();
    c.bench_function("40 levels 90x180 grid `interp` shared targets", |b| {
        b.iter(|| interp.interp(&targets).unwrap())
    });

    let columnwise = Array3::from_shape_fn((10, 90, 180), |(k, j, i)| {
        targets[k] + z_src[[0, j, i]]
    });
    c.bench_function("40 levels 90x180 grid `interp` columnwise targets", |b| {
        b.iter(|| interp.interp(&columnwise).unwrap())
    });
}

criterion_group!(benches, bench_vinterp_column, bench_vinterp_grid);
criterion_main!(benches);
