use store_route::{find_store, plan_route, CatalogError, ProcessedItem};

// Plans a route through one of the built-in stores. The store id can be passed as the first
// argument, e.g. `cargo run --example catalog_walkthrough -- target`.
fn main() -> Result<(), CatalogError> {
    let id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "walmart-supercenter".to_owned());
    let store = find_store(&id)?;
    println!("{} - {}", store.name, store.description);

    let items = vec![
        ProcessedItem::new("bananas", "produce"),
        ProcessedItem::new("sourdough", "bakery"),
        ProcessedItem::new("eggs", "dairy"),
        ProcessedItem::new("milk", "Dairy"),
        ProcessedItem::new("ice cream", "frozen"),
        ProcessedItem::new("batteries", "electronics"),
    ];
    let route = plan_route(&items, &store.layout);
    for category in &route.unreachable {
        println!("Could not reach the {} section", category);
    }
    for instruction in &route.instructions {
        match instruction.location {
            Some(p) => println!("{:>2}. {} ({})", instruction.id, instruction.instruction, p),
            None => println!("{:>2}. {}", instruction.id, instruction.instruction),
        }
    }
    Ok(())
}
