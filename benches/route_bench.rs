use criterion::{criterion_group, criterion_main, Criterion};
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use store_route::{plan_route, stores, PathingGrid, ProcessedItem, StoreLayout};

fn full_list(layout: &StoreLayout) -> Vec<ProcessedItem> {
    layout
        .sections
        .iter()
        .map(|s| ProcessedItem::new(&s.name, &s.category))
        .collect()
}

fn catalog_bench(c: &mut Criterion) {
    for store in stores().expect("built-in catalog parses") {
        let items = full_list(&store.layout);
        c.bench_function(format!("{}, full list", store.id).as_str(), |b| {
            b.iter(|| black_box(plan_route(&items, &store.layout)))
        });
    }
}

fn random_pairs(layout: &StoreLayout, grid: &PathingGrid, number: usize) -> Vec<(Point, Point)> {
    let mut rng = StdRng::seed_from_u64(0);
    let mut random_cell = || loop {
        let p = Point::new(
            rng.gen_range(0..layout.width as i32),
            rng.gen_range(0..layout.height as i32),
        );
        if grid.can_move_to(p) {
            return p;
        }
    };
    (0..number).map(|_| (random_cell(), random_cell())).collect()
}

fn segment_bench(c: &mut Criterion) {
    let store = stores()
        .expect("built-in catalog parses")
        .into_iter()
        .find(|s| s.id == "walmart-supercenter-xl")
        .expect("catalog contains the XL store");
    let grid = PathingGrid::from_layout(&store.layout);
    let pairs = random_pairs(&store.layout, &grid, 100);
    c.bench_function("walmart-supercenter-xl, 100 segments", |b| {
        b.iter(|| {
            for (start, end) in &pairs {
                black_box(grid.get_path_single_goal(*start, *end));
            }
        })
    });
}

criterion_group!(benches, catalog_bench, segment_bench);
criterion_main!(benches);
