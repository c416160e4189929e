use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kornia_se3::{SE3BatchF32, SE3BatchF64, SE3F32, SE3F64};
use rand::Rng;

fn random_tangents(n: usize) -> (Vec<[f64; 3]>, Vec<[f64; 3]>) {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| {
            (
                [rng.random(), rng.random(), rng.random()],
                [rng.random(), rng.random(), rng.random()],
            )
        })
        .unzip()
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("se3_batch");

    for data_size in [100, 1000, 10000].iter() {
        let (upsilon, omega) = random_tangents(*data_size);
        let batch = SE3BatchF64::exp_batch(&upsilon, &omega).expect("valid tangents");
        let single = SE3BatchF64::from(SE3F64::from_random());

        let upsilon32 = upsilon.iter().map(|v| v.map(|x| x as f32)).collect::<Vec<_>>();
        let omega32 = omega.iter().map(|v| v.map(|x| x as f32)).collect::<Vec<_>>();
        let batch32 = SE3BatchF32::exp_batch(&upsilon32, &omega32).expect("valid tangents");
        let single32 = SE3BatchF32::from(SE3F32::from_random());

        group.bench_with_input(
            BenchmarkId::new("compose_f64", data_size),
            &(&single, &batch),
            |b, (a, x)| b.iter(|| std::hint::black_box(a.compose(x))),
        );

        group.bench_with_input(
            BenchmarkId::new("compose_f32", data_size),
            &(&single32, &batch32),
            |b, (a, x)| b.iter(|| std::hint::black_box(a.compose(x))),
        );

        group.bench_with_input(BenchmarkId::new("inverse", data_size), &batch, |b, x| {
            b.iter(|| std::hint::black_box(x.inverse()))
        });

        group.bench_with_input(BenchmarkId::new("log", data_size), &batch, |b, x| {
            b.iter(|| std::hint::black_box(x.log()))
        });

        group.bench_with_input(
            BenchmarkId::new("exp", data_size),
            &(&upsilon, &omega),
            |b, (u, w)| b.iter(|| std::hint::black_box(SE3BatchF64::exp_batch(u, w))),
        );

        group.bench_with_input(
            BenchmarkId::new("from_matrices", data_size),
            &batch.to_matrix(),
            |b, m| b.iter(|| std::hint::black_box(SE3BatchF64::from_matrices(m))),
        );
    }

    group.finish();
}

fn bench_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("se3_mean");

    for data_size in [10, 100, 1000].iter() {
        let center = SE3F64::from_random();
        let (upsilon, omega) = random_tangents(*data_size);
        let elements = upsilon
            .iter()
            .zip(omega.iter())
            .map(|(u, w)| {
                let tangent = [u[0], u[1], u[2], w[0], w[1], w[2]].map(|x| 0.1 * (x - 0.5));
                center * SE3F64::exp(&tangent)
            })
            .collect::<Vec<_>>();
        let batch = SE3BatchF64::from_elements(elements).expect("non-empty batch");

        group.bench_with_input(BenchmarkId::new("mean", data_size), &batch, |b, x| {
            b.iter(|| std::hint::black_box(x.mean()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch, bench_mean);
criterion_main!(benches);
