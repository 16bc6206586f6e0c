use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use forager_core::*;
use rand::prelude::*;
use std::hint::black_box;

fn board_generation(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("built-in catalog");
    let mut group = c.benchmark_group("board_gen");

    for slots in [4u8, 6, 8, 10] {
        let mut rng = SmallRng::seed_from_u64(u64::from(slots));
        let selection =
            select_recipe_and_decoys(&catalog, slots, &mut rng).expect("selection");
        let placed: Vec<FoodId> = selection.placed().collect();
        let foods = catalog.resolve(&placed).expect("known foods");

        group.bench_with_input(BenchmarkId::from_parameter(slots), &foods, |b, foods| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                ScanBoardGenerator::new(seed, DEFAULT_MAX_ATTEMPTS)
                    .generate(BoardConfig::default(), black_box(foods))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, board_generation);
criterion_main!(benches);
