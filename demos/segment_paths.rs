use grid_util::point::Point;
use store_route::{stitch_segments, PathingGrid, StoreLayout};

/// This example shows how a route is assembled from shortest paths between consecutive
/// waypoints. A path is found on a 5x5 grid with shape
/// S....
/// .#...
/// .#.W.
/// .#...
/// ....E
/// where
/// - S marks the start
/// - W marks an intermediate waypoint
/// - E marks the end
fn main() {
    let mut layout = StoreLayout::new(5, 5, Point::new(0, 0), Point::new(4, 4));
    layout.walls = vec![Point::new(1, 1), Point::new(1, 2), Point::new(1, 3)];
    let pathing_grid = PathingGrid::from_layout(&layout);
    println!("{}", pathing_grid);

    let waypoint = Point::new(3, 2);
    let segments: Vec<Vec<Point>> = [(layout.entrance, waypoint), (waypoint, layout.exit)]
        .into_iter()
        .filter_map(|(start, end)| pathing_grid.get_path_single_goal(start, end))
        .collect();
    for (i, segment) in segments.iter().enumerate() {
        println!("Segment {}: {:?}", i, segment);
    }
    println!("Stitched path: {:?}", stitch_segments(segments));
}
