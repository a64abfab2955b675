use criterion::{black_box, criterion_group, criterion_main, Criterion};
use myrmex_core::{EntityId, EntityRange, Workload};
use myrmex_data::storage::{Component, ComponentSlot, DenseChunk};
use myrmex_dispatch::{
    ParallelStrategy, SequentialStrategy, ThresholdParams, DEFAULT_ENTITY_THRESHOLD,
};

#[derive(Debug, Clone, Copy, Default)]
struct Charge(u64);
impl Component for Charge {}

fn bench_dispatch(c: &mut Criterion) {
    // Setup: a slot covering 4096 ids, read-only during the passes.
    let chunk =
        DenseChunk::<Charge>::with_initial_capacity(4_096).expect("allocation must succeed");
    let mut slot = ComponentSlot::new(chunk);
    for raw in 0..4_096u32 {
        *slot.add(EntityId::from_raw(raw)).expect("within capacity") = Charge(u64::from(raw));
    }

    let params = ThresholdParams::new(
        DEFAULT_ENTITY_THRESHOLD,
        ParallelStrategy::new(),
        SequentialStrategy::new(),
    );
    let composer = params.composer();

    let op = |id: EntityId| {
        black_box(slot.get(id).expect("within capacity"));
    };

    let mut group = c.benchmark_group("Threshold Dispatch");

    group.bench_function("At threshold (64 entities, in-line)", |b| {
        let workload = Workload::new(EntityRange::from_count(64), &op);
        b.iter(|| {
            composer
                .execute(black_box(64), &workload)
                .expect("pass must succeed");
        });
    });

    group.bench_function("Above threshold (4096 entities, fan-out)", |b| {
        let workload = Workload::new(EntityRange::from_count(4_096), &op);
        b.iter(|| {
            composer
                .execute(black_box(4_096), &workload)
                .expect("pass must succeed");
        });
    });

    // The same large pass forced in-line, for comparison with the fan-out
    // numbers when sizing a threshold.
    let inline_params = ThresholdParams::new(
        usize::MAX,
        ParallelStrategy::new(),
        SequentialStrategy::new(),
    );
    let inline = inline_params.composer();
    group.bench_function("Above threshold (4096 entities, forced in-line)", |b| {
        let workload = Workload::new(EntityRange::from_count(4_096), &op);
        b.iter(|| {
            inline
                .execute(black_box(4_096), &workload)
                .expect("pass must succeed");
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
