use crate::astar::astar;
use crate::layout::StoreLayout;
use crate::{N_SMALLVEC_SIZE, STEP_COST};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [PathingGrid] keeps the walls of a store in a [BoolGrid] (`true` is a wall) together with a
/// [UnionFind] of its connected components, so that queries between disconnected cells are
/// answered without searching. Movement is 4-directional with a cost of [STEP_COST] per step.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid {
            grid: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl PathingGrid {
    /// A fully walkable grid.
    pub fn new(width: usize, height: usize) -> PathingGrid {
        PathingGrid {
            grid: BoolGrid::new(width, height, false),
            components: UnionFind::new(width * height),
            components_dirty: true,
        }
    }

    /// Builds the grid for a layout and generates its components. Walls outside the grid are
    /// ignored.
    pub fn from_layout(layout: &StoreLayout) -> PathingGrid {
        let mut pathing_grid = PathingGrid::new(layout.width, layout.height);
        for wall in &layout.walls {
            if pathing_grid.in_bounds(wall) {
                pathing_grid.grid.set_point(*wall, true);
            }
        }
        pathing_grid.generate_components();
        pathing_grid
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }
    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// The 4-neighbourhood in the fixed order right, left, down, up.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        SmallVec::from_buf([
            Point::new(point.x + 1, point.y),
            Point::new(point.x - 1, point.y),
            Point::new(point.x, point.y + 1),
            Point::new(point.x, point.y - 1),
        ])
    }
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        self.neighborhood_points(pos)
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .map(|p| (p, STEP_COST))
            .collect()
    }
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(&pos) && !self.grid.get_point(pos)
    }
    pub fn in_bounds(&self, point: &Point) -> bool {
        self.grid.point_in_bounds(*point)
    }
    pub fn is_wall(&self, point: &Point) -> bool {
        self.in_bounds(point) && self.grid.get_point(*point)
    }

    /// Marks a cell as wall or walkable. Opening a cell joins it to the components of its
    /// neighbours; closing one flags the components as dirty since a component may split.
    pub fn set_wall(&mut self, point: Point, blocked: bool) {
        if !self.in_bounds(&point) {
            return;
        }
        if blocked {
            if !self.grid.get_point(point) {
                self.components_dirty = true;
            }
        } else {
            let p_ix = self.grid.get_ix_point(&point);
            for n in self.neighborhood_points(&point) {
                if self.can_move_to(n) {
                    self.components.union(p_ix, self.grid.get_ix_point(&n));
                }
            }
        }
        self.grid.set_point(point, blocked);
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.grid.get_ix_point(point))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            let start_ix = self.grid.get_ix_point(start);
            let goal_ix = self.grid.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                let point = Point::new(x, y);
                if !self.can_move_to(point) {
                    continue;
                }
                let parent_ix = self.grid.get_ix_point(&point);
                for p in [Point::new(x, y + 1), Point::new(x + 1, y)] {
                    if self.can_move_to(p) {
                        let ix = self.grid.get_ix_point(&p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Manhattan distance, the exact cost of a straight run on an open 4-grid.
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        p1.manhattan_distance(p2) * STEP_COST
    }

    /// Computes a shortest path from start to goal, both included, using A* with the
    /// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
    /// Returns [None] if either end is a wall or outside the grid, or if no path exists.
    pub fn get_path_single_goal(&self, start: Point, goal: Point) -> Option<Vec<Point>> {
        if !self.can_move_to(start) || !self.can_move_to(goal) {
            info!("{} or {} is not a walkable cell", start, goal);
            return None;
        }
        // Stale components may separate cells that are connected, only trust fresh ones.
        if !self.components_dirty && self.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return None;
        }
        astar(
            &start,
            |node| self.neighborhood_points_and_cost(node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        )
        .map(|(v, _c)| v)
    }
}

/// Shortest 4-directional path between two cells of a layout. Empty when there is none.
pub fn find_shortest_path(start: Point, end: Point, layout: &StoreLayout) -> Vec<Point> {
    PathingGrid::from_layout(layout)
        .get_path_single_goal(start, end)
        .unwrap_or_default()
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.grid.height as i32 {
            let row = (0..self.grid.width as i32)
                .map(|x| if self.grid.get(x as usize, y as usize) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
