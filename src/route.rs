use crate::items::{CategoryIndex, ProcessedItem};
use crate::layout::{cells, StoreLayout};
use crate::pathing_grid::PathingGrid;
use grid_util::point::Point;
use log::{debug, warn};
use serde::Serialize;

/// A cell the route must visit on behalf of one item category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub category: String,
    pub point: Point,
}

/// The stitched walk through a store, plus the categories whose target could not be reached
/// and were left out of it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RoutePlan {
    #[serde(with = "cells")]
    pub path: Vec<Point>,
    pub unreachable: Vec<String>,
}

/// Greedy nearest-next ordering. From `start`, repeatedly moves to the remaining target with the
/// smallest Manhattan distance to the current position. The remaining targets are stably
/// re-sorted every round, so ties go to whichever comes first in the current order.
pub fn order_targets(start: Point, mut remaining: Vec<Target>) -> Vec<Target> {
    let mut visit_order = Vec::with_capacity(remaining.len());
    let mut current = start;
    while !remaining.is_empty() {
        remaining.sort_by_key(|t| current.manhattan_distance(&t.point));
        let next = remaining.remove(0);
        current = next.point;
        visit_order.push(next);
    }
    visit_order
}

/// Appends a segment to a path. Every segment after the first starts on the cell the previous
/// one ended on, so that cell is dropped.
pub fn append_segment(path: &mut Vec<Point>, segment: Vec<Point>) {
    let skip = if path.is_empty() { 0 } else { 1 };
    path.extend(segment.into_iter().skip(skip));
}

/// Concatenates consecutive segments into one path with each join cell kept once.
pub fn stitch_segments<I>(segments: I) -> Vec<Point>
where
    I: IntoIterator<Item = Vec<Point>>,
{
    let mut path = Vec::new();
    for segment in segments {
        append_segment(&mut path, segment);
    }
    path
}

/// Plans the walk from entrance to exit that visits one target per item category.
///
/// A target that cannot be reached from the previous stop is skipped and reported in
/// [RoutePlan::unreachable]; the walk continues from the previous stop. If the exit cannot be
/// reached the whole path is dropped. Without any reachable target the path is empty.
pub fn plan_path(items: &[ProcessedItem], layout: &StoreLayout) -> RoutePlan {
    let index = CategoryIndex::new(layout);
    let targets = index.targets(items);
    if targets.is_empty() {
        debug!("No item category maps to a section, nothing to route");
        return RoutePlan::default();
    }

    let grid = PathingGrid::from_layout(layout);
    let mut plan = RoutePlan::default();
    let mut current = layout.entrance;
    for target in order_targets(layout.entrance, targets) {
        match grid.get_path_single_goal(current, target.point) {
            Some(segment) => {
                append_segment(&mut plan.path, segment);
                current = target.point;
            }
            None => {
                warn!(
                    "Skipping {} at {}: not reachable from {}",
                    target.category, target.point, current
                );
                plan.unreachable.push(target.category);
            }
        }
    }
    if plan.path.is_empty() {
        warn!("None of the {} targets is reachable, nothing to route", plan.unreachable.len());
        return plan;
    }
    match grid.get_path_single_goal(current, layout.exit) {
        Some(segment) => append_segment(&mut plan.path, segment),
        None => {
            warn!("Exit {} is not reachable from {}, dropping route", layout.exit, current);
            plan.path.clear();
        }
    }
    debug!(
        "Planned route of {} cells, {} unreachable categories",
        plan.path.len(),
        plan.unreachable.len()
    );
    plan
}

/// The path part of [plan_path]: entrance to exit through every reachable target, or empty.
pub fn find_optimal_route(items: &[ProcessedItem], layout: &StoreLayout) -> Vec<Point> {
    plan_path(items, layout).path
}
