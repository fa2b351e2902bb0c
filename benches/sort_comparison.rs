//! Array sort against the standard library, per backend and width

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::distributions::{Distribution, Standard};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vecsort::{sort_block, sort_with, Backend, I32x16, RegisterWidth, SortConfig, SortElement};

const SIZES: [usize; 5] = [256, 1024, 4096, 65536, 1 << 20];

fn generate_data<T>(size: usize) -> Vec<T>
where
    Standard: Distribution<T>,
{
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..size).map(|_| rng.gen()).collect()
}

/// Configurations runnable on this machine
fn configs() -> Vec<(String, SortConfig)> {
    let mut configs = vec![
        (
            "portable_narrow".to_string(),
            SortConfig::for_backend(Backend::Portable).with_width(RegisterWidth::Narrow),
        ),
        (
            "portable_wide".to_string(),
            SortConfig::for_backend(Backend::Portable),
        ),
    ];
    if Backend::Avx2.is_available() {
        configs.push(("avx2".to_string(), SortConfig::for_backend(Backend::Avx2)));
    }
    if Backend::Avx512.is_available() {
        configs.push(("avx512".to_string(), SortConfig::for_backend(Backend::Avx512)));
    }
    configs
}

fn bench_element<T>(c: &mut Criterion, name: &str)
where
    T: SortElement,
    Standard: Distribution<T>,
{
    let mut group = c.benchmark_group(format!("sort_{}", name));

    for &size in &SIZES {
        let data: Vec<T> = generate_data(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("std_unstable", size), &data, |b, data| {
            b.iter(|| {
                let mut v = data.clone();
                v.sort_unstable_by(SortElement::total_order);
                black_box(v);
            });
        });

        for (label, config) in configs() {
            group.bench_with_input(BenchmarkId::new(label, size), &data, |b, data| {
                b.iter(|| {
                    let mut v = data.clone();
                    sort_with(&mut v, &config).unwrap();
                    black_box(v);
                });
            });
        }
    }

    group.finish();
}

fn bench_i32(c: &mut Criterion) {
    bench_element::<i32>(c, "i32");
}

fn bench_i64(c: &mut Criterion) {
    bench_element::<i64>(c, "i64");
}

fn bench_f32(c: &mut Criterion) {
    bench_element::<f32>(c, "f32");
}

fn bench_f64(c: &mut Criterion) {
    bench_element::<f64>(c, "f64");
}

fn bench_block(c: &mut Criterion) {
    let data = vecsort::aligned_copy(&generate_data::<i32>(256));
    c.bench_function("sort_block_i32x16", |b| {
        b.iter(|| {
            let mut block = data.clone();
            sort_block::<I32x16>(&mut block).unwrap();
            black_box(block);
        });
    });
}

criterion_group!(benches, bench_i32, bench_i64, bench_f32, bench_f64, bench_block);
criterion_main!(benches);
