use criterion::{black_box, criterion_group, criterion_main, Criterion};
use myrmex_core::EntityId;
use myrmex_data::storage::{Component, DenseChunk, DenseMetadata};

#[derive(Debug, Clone, Copy, Default)]
struct Position(u32);
impl Component for Position {}

fn bench_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Chunk Storage");

    group.bench_function("Growing Add (10k increasing ids)", |b| {
        b.iter(|| {
            let mut chunk = DenseChunk::<Position>::with_initial_capacity(0)
                .expect("empty construction allocates nothing");
            let mut metadata = DenseMetadata;
            for i in 0..10_000u32 {
                *chunk
                    .add(EntityId::from_raw(i), &mut metadata)
                    .expect("growth must succeed") = Position(i);
            }
            black_box(chunk.capacity());
        });
    });

    // Steady-state writes: capacity covers every id up front, so each add
    // resolves to an in-place overwrite.
    let mut reserved = DenseChunk::<Position>::with_initial_capacity(10_000)
        .expect("allocation must succeed");
    let mut reserved_metadata = DenseMetadata;
    group.bench_function("Pre-reserved Add (10k overwrites)", |b| {
        b.iter(|| {
            for i in 0..10_000u32 {
                *reserved
                    .add(EntityId::from_raw(i), &mut reserved_metadata)
                    .expect("within capacity") = Position(i);
            }
        });
    });

    let mut chunk = DenseChunk::<Position>::with_initial_capacity(10_000)
        .expect("allocation must succeed");
    let mut metadata = DenseMetadata;
    for i in 0..10_000u32 {
        *chunk
            .add(EntityId::from_raw(i), &mut metadata)
            .expect("within capacity") = Position(i);
    }

    group.bench_function("Checked Get (10k reads)", |b| {
        b.iter(|| {
            let mut sum = 0u32;
            for i in 0..10_000u32 {
                let value = chunk
                    .get(EntityId::from_raw(i), &metadata)
                    .expect("within capacity");
                sum = sum.wrapping_add(value.0);
            }
            black_box(sum);
        });
    });

    group.bench_function("Unchecked Get (10k reads, bounds proven)", |b| {
        b.iter(|| {
            let mut sum = 0u32;
            for i in 0..10_000u32 {
                // SAFETY: every id below 10_000 is within the capacity
                // established at construction above.
                let value = unsafe { chunk.get_unchecked(EntityId::from_raw(i)) };
                sum = sum.wrapping_add(value.0);
            }
            black_box(sum);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_chunks);
criterion_main!(benches);
