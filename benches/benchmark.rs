use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use intset::{Backend, Set};

const N: usize = 10_000;

fn filled(backend: Backend, values: &[i32]) -> Set {
    let mut set = Set::new(backend, values.len());
    set.extend(values.iter().copied());
    set
}

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen_range(0..(4 * N) as i32)).collect();
    let others: Vec<i32> = (1..=N).map(|_| rng.gen_range(0..(4 * N) as i32)).collect();

    for (backend, name) in [(Backend::Tree, "tree"), (Backend::Array, "array")] {
        c.bench_function(&format!("{name}_insert"), |b| {
            b.iter(|| filled(backend, &values))
        });

        let set = filled(backend, &values);
        let other = filled(backend, &others);

        c.bench_function(&format!("{name}_contains"), |b| {
            b.iter(|| {
                for value in &others {
                    black_box(set.contains(*value));
                }
            })
        });

        c.bench_function(&format!("{name}_iter"), |b| {
            b.iter(|| {
                for key in &set {
                    black_box(key);
                }
            })
        });

        c.bench_function(&format!("{name}_union"), |b| {
            b.iter(|| black_box(set.union(&other)))
        });

        c.bench_function(&format!("{name}_intersection"), |b| {
            b.iter(|| black_box(set.intersection(&other)))
        });

        c.bench_function(&format!("{name}_remove"), |b| {
            b.iter(|| {
                let mut set = set.clone();
                for value in &values {
                    set.remove(*value);
                }
                set
            })
        });
    }
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
