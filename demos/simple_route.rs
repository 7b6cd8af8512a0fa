use grid_util::point::Point;
use store_route::{plan_route, ProcessedItem, Section, StoreLayout};

// In this example a route is planned through a small store with two aisles
// ..........
// .PP#DD#MM.
// .PP#DD#MM.
// .PP#DD#MM.
// ..........
// S........E
// P, D and M mark the produce, dairy and meat sections
// S marks the entrance
// E marks the exit
fn main() {
    let mut layout = StoreLayout::new(10, 6, Point::new(0, 5), Point::new(9, 5));
    layout.sections = vec![
        Section::new("produce", "Produce", "produce", [1, 1, 2, 3]),
        Section::new("dairy", "Dairy", "dairy", [4, 1, 5, 3]),
        Section::new("meat", "Meat", "meat", [7, 1, 8, 3]),
    ];
    for y in 1..=3 {
        layout.walls.push(Point::new(3, y));
        layout.walls.push(Point::new(6, y));
    }
    let items = vec![
        ProcessedItem::new("milk", "Dairy"),
        ProcessedItem::new("apples", "produce"),
        ProcessedItem::new("steak", "meat"),
    ];
    let route = plan_route(&items, &layout);
    if route.path.is_empty() {
        println!("No route could be planned.");
        return;
    }
    println!("A route of {} cells has been found:", route.path.len());
    for instruction in &route.instructions {
        println!("{:>2}. {}", instruction.id, instruction.instruction);
    }
}
