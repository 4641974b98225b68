//! Blocked GEMM benchmarks: naive reference vs scalar and lane kernels.
//!
//! Reports throughput as 2*m*n*k flops per iteration.

use blocked_gemm::matrix::init::random_init;
use blocked_gemm::{
    BlockSizes, Fixed, GemmConfig, KernelKind, MatMut, MatRef, matmul_naive, matmul_parallel,
    matmul_with,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SIZES: &[usize] = &[64, 128, 256, 512];

fn random_col_major(rows: usize, cols: usize, seed: u64) -> Vec<f64> {
    let mut data = vec![0.0; rows * cols];
    random_init(
        &mut MatMut::col_major(&mut data, rows, cols),
        &mut StdRng::seed_from_u64(seed),
        100,
    );
    data
}

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("gemm_f64");

    for &size in SIZES {
        let a = random_col_major(size, size, 1);
        let b = random_col_major(size, size, 2);
        group.throughput(Throughput::Elements((2 * size * size * size) as u64));

        if size <= 256 {
            group.bench_with_input(BenchmarkId::new("naive", size), &size, |bench, &n| {
                let mut out = vec![0.0; n * n];
                bench.iter(|| {
                    matmul_naive(
                        MatRef::col_major(black_box(&a), n, n),
                        MatRef::col_major(black_box(&b), n, n),
                        &mut MatMut::col_major(&mut out, n, n),
                    )
                });
            });
        }

        for (name, kernel) in [("scalar", KernelKind::Scalar), ("lanes", KernelKind::Lanes)] {
            let config = GemmConfig::new(BlockSizes::default(), kernel);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |bench, &n| {
                let mut out = vec![0.0; n * n];
                bench.iter(|| {
                    matmul_with(&config, n, n, n, black_box(&a), n, black_box(&b), n, &mut out, n)
                        .unwrap()
                });
            });
        }

        group.bench_with_input(BenchmarkId::new("parallel_4", size), &size, |bench, &n| {
            let mut out = vec![0.0; n * n];
            bench.iter(|| {
                matmul_parallel(n, n, n, black_box(&a), n, black_box(&b), n, &mut out, n, 4)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_fixed_point(c: &mut Criterion) {
    let size = 256;
    let a: Vec<Fixed> = (0..size * size).map(|i| Fixed::from_raw((i % 97) as i32)).collect();
    let b: Vec<Fixed> = (0..size * size).map(|i| Fixed::from_raw((i % 89) as i32)).collect();

    let mut group = c.benchmark_group("gemm_fixed");
    group.throughput(Throughput::Elements((2 * size * size * size) as u64));
    group.bench_function("lanes_256", |bench| {
        let config = GemmConfig::default();
        let mut out = vec![Fixed::ZERO; size * size];
        bench.iter(|| {
            matmul_with(&config, size, size, size, black_box(&a), size, black_box(&b), size, &mut out, size)
                .unwrap()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_kernels, bench_fixed_point);
criterion_main!(benches);
