//! # store_route
//!
//! Walking routes through a store laid out on a grid. Shortest paths between cells are found
//! with [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) on a 4-connected grid using the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic, with
//! precomputed
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists. The sections holding the items of a
//! shopping list are visited in greedy nearest-next order between the entrance and the exit, and
//! the resulting path is turned into turn-by-turn directions.
//!
//! Absence is signalled with empty results rather than errors: an empty path means there is
//! nothing to route or no route exists, and such a path yields no directions.
mod astar;
pub mod catalog;
pub mod items;
pub mod layout;
pub mod navigation;
pub mod pathing_grid;
pub mod route;

pub use catalog::{find_store, stores, CatalogError, Store};
pub use items::{CategoryIndex, ProcessedItem};
pub use layout::{Landmark, LayoutError, Section, StoreLayout};
pub use navigation::{generate_navigation_instructions, NavigationInstruction, Turn};
pub use pathing_grid::{find_shortest_path, PathingGrid};
pub use route::{find_optimal_route, plan_path, stitch_segments, RoutePlan, Target};

use grid_util::point::Point;
use log::debug;
use serde::Serialize;

/// Cost of one step between neighbouring cells.
pub const STEP_COST: i32 = 1;
pub const N_SMALLVEC_SIZE: usize = 4;

pub const START_INSTRUCTION: &str = "Start at the entrance.";
pub const CHECKOUT_INSTRUCTION: &str = "Proceed to checkout.";

/// A planned walk together with the directions for following it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Route {
    #[serde(with = "layout::cells")]
    pub path: Vec<Point>,
    pub instructions: Vec<NavigationInstruction>,
    /// Categories whose section could not be reached and are missing from the walk.
    pub unreachable: Vec<String>,
}

/// Plans the path for `items` and generates its directions.
pub fn plan_route(items: &[ProcessedItem], layout: &StoreLayout) -> Route {
    let RoutePlan { path, unreachable } = plan_path(items, layout);
    let instructions = generate_navigation_instructions(&path, layout, items);
    debug!(
        "Route with {} cells and {} instructions",
        path.len(),
        instructions.len()
    );
    Route {
        path,
        instructions,
        unreachable,
    }
}
