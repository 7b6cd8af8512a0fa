use crate::astar::FxIndexMap;
use crate::items::{CategoryIndex, ProcessedItem};
use crate::layout::{opt_cell, StoreLayout};
use crate::{CHECKOUT_INSTRUCTION, START_INSTRUCTION};
use core::fmt;
use grid_util::point::Point;
use serde::{Deserialize, Serialize};

/// A direction change along the path, seen by someone walking it on a grid whose y axis points
/// down (rows grow towards the front of the store).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
    Around,
}

impl Turn {
    /// Classifies the change from the `incoming` step to the `outgoing` step by the sign of
    /// their cross product. [None] when the walk continues straight.
    pub fn classify(incoming: (i32, i32), outgoing: (i32, i32)) -> Option<Turn> {
        if incoming == outgoing {
            return None;
        }
        let (dx1, dy1) = incoming;
        let (dx2, dy2) = outgoing;
        let cross = dx1 * dy2 - dy1 * dx2;
        if cross > 0 {
            Some(Turn::Right)
        } else if cross < 0 {
            Some(Turn::Left)
        } else if dx1 == -dx2 && dy1 == -dy2 {
            Some(Turn::Around)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Turn::Left => "Turn left",
            Turn::Right => "Turn right",
            Turn::Around => "Turn around",
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationInstruction {
    pub id: usize,
    pub instruction: String,
    #[serde(with = "opt_cell")]
    pub location: Option<Point>,
}

fn step(from: &Point, to: &Point) -> (i32, i32) {
    (to.x - from.x, to.y - from.y)
}

#[derive(Default)]
struct InstructionLog {
    instructions: Vec<NavigationInstruction>,
}

impl InstructionLog {
    fn push(&mut self, instruction: String, location: Point) {
        let id = self.instructions.len();
        self.instructions.push(NavigationInstruction {
            id,
            instruction,
            location: Some(location),
        });
    }
}

/// Turns a path into directions: a start instruction at the entrance, a pickup wherever the
/// path first reaches the center of a section holding listed items, a turn wherever the
/// direction of travel changes, and a checkout instruction at the exit. Paths of fewer than two
/// cells produce no directions at all.
pub fn generate_navigation_instructions(
    path: &[Point],
    layout: &StoreLayout,
    items: &[ProcessedItem],
) -> Vec<NavigationInstruction> {
    if path.len() < 2 {
        return Vec::new();
    }
    let index = CategoryIndex::new(layout);

    // Item names per target cell, consumed as the walk reaches them.
    let mut pickups: FxIndexMap<Point, Vec<&str>> = FxIndexMap::default();
    for item in items {
        if let Some(point) = index.target_point(&item.category) {
            pickups
                .entry(point)
                .or_default()
                .push(item.interpreted_item.as_str());
        }
    }

    let mut log = InstructionLog::default();
    log.push(START_INSTRUCTION.to_owned(), layout.entrance);

    for i in 1..path.len() {
        let prev = &path[i - 1];
        let curr = &path[i];

        if let Some(names) = pickups.swap_remove(curr) {
            let section_name = index.section_at(curr).map_or("area", |s| s.name.as_str());
            log.push(
                format!("Pick up {} in the {}.", names.join(", "), section_name),
                *curr,
            );
        }

        let Some(next) = path.get(i + 1) else {
            continue;
        };
        if let Some(turn) = Turn::classify(step(prev, curr), step(curr, next)) {
            log.push(format!("{} and continue.", turn), *curr);
        }
    }

    log.push(CHECKOUT_INSTRUCTION.to_owned(), layout.exit);
    log.instructions
}
