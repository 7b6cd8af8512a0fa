/// Fuzzes the pathfinder on many random store grids: a path must be found exactly when a
/// breadth-first flood fill says the goal is reachable, it must be as short as the flood fill
/// distance, and routes through random targets must stay connected and wall-free.
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::VecDeque;
use store_route::{find_shortest_path, plan_route, ProcessedItem, Section, StoreLayout};

fn random_layout(w: usize, h: usize, rng: &mut StdRng) -> StoreLayout {
    let entrance = Point::new(0, 0);
    let exit = Point::new(w as i32 - 1, h as i32 - 1);
    let mut layout = StoreLayout::new(w, h, entrance, exit);
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            let p = Point::new(x, y);
            if p != entrance && p != exit && rng.gen_bool(0.3) {
                layout.walls.push(p);
            }
        }
    }
    layout
}

/// Number of steps from start to goal, if any, by flood fill.
fn bfs_distance(layout: &StoreLayout, start: Point, goal: Point) -> Option<usize> {
    let mut dist = vec![usize::MAX; layout.width * layout.height];
    let ix = |p: &Point| p.y as usize * layout.width + p.x as usize;
    let mut queue = VecDeque::new();
    dist[ix(&start)] = 0;
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        if p == goal {
            return Some(dist[ix(&p)]);
        }
        for n in [
            Point::new(p.x + 1, p.y),
            Point::new(p.x - 1, p.y),
            Point::new(p.x, p.y + 1),
            Point::new(p.x, p.y - 1),
        ] {
            if layout.in_bounds(&n) && !layout.is_wall(&n) && dist[ix(&n)] == usize::MAX {
                dist[ix(&n)] = dist[ix(&p)] + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn visualize_layout(layout: &StoreLayout, path: &[Point]) {
    for y in 0..layout.height as i32 {
        for x in 0..layout.width as i32 {
            let p = Point::new(x, y);
            if p == layout.entrance {
                print!("S");
            } else if p == layout.exit {
                print!("G");
            } else if layout.is_wall(&p) {
                print!("#");
            } else if path.contains(&p) {
                print!("*");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

fn assert_walkable(layout: &StoreLayout, path: &[Point]) {
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
    }
    assert!(path.iter().all(|p| layout.in_bounds(p) && !layout.is_wall(p)));
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let layout = random_layout(N, N, &mut rng);
        let path = find_shortest_path(layout.entrance, layout.exit, &layout);
        let expected = bfs_distance(&layout, layout.entrance, layout.exit);
        // Show the grid if the result disagrees with the flood fill
        if path.is_empty() != expected.is_none() {
            visualize_layout(&layout, &path);
        }
        match expected {
            Some(steps) => {
                assert_eq!(path.len(), steps + 1);
                assert_eq!(path.first(), Some(&layout.entrance));
                assert_eq!(path.last(), Some(&layout.exit));
                assert_walkable(&layout, &path);
            }
            None => assert!(path.is_empty()),
        }
    }
}

#[test]
fn fuzz_determinism() {
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let layout = random_layout(12, 8, &mut rng);
        let first = find_shortest_path(layout.entrance, layout.exit, &layout);
        let second = find_shortest_path(layout.entrance, layout.exit, &layout);
        assert_eq!(first, second);
    }
}

#[test]
fn fuzz_routes() {
    const N: usize = 12;
    const N_GRIDS: usize = 500;
    let categories = ["produce", "dairy", "meat", "bakery", "frozen"];
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..N_GRIDS {
        let mut layout = random_layout(N, N, &mut rng);
        for category in categories {
            let x = rng.gen_range(0..N as i32 - 1);
            let y = rng.gen_range(0..N as i32 - 1);
            layout
                .sections
                .push(Section::new(category, category, category, [x, y, x + 1, y + 1]));
        }
        let items: Vec<ProcessedItem> = categories
            .iter()
            .map(|c| ProcessedItem::new(&format!("{c} item"), c))
            .collect();
        let route = plan_route(&items, &layout);
        if route.path.is_empty() {
            assert!(route.instructions.is_empty());
            let exit_unreachable = bfs_distance(&layout, layout.entrance, layout.exit).is_none();
            let all_skipped = route.unreachable.len() == categories.len();
            assert!(exit_unreachable || all_skipped);
            continue;
        }
        assert_walkable(&layout, &route.path);
        assert_eq!(route.path.first(), Some(&layout.entrance));
        assert_eq!(route.path.last(), Some(&layout.exit));
        for section in &layout.sections {
            let reached = route.path.contains(&section.center());
            let skipped = route.unreachable.contains(&section.category);
            assert!(reached || skipped);
        }
        assert_eq!(
            route.instructions.first().map(|i| i.instruction.as_str()),
            Some("Start at the entrance.")
        );
        assert_eq!(
            route.instructions.last().map(|i| i.instruction.as_str()),
            Some("Proceed to checkout.")
        );
        assert!(route.instructions.iter().enumerate().all(|(i, ins)| ins.id == i));
    }
}
