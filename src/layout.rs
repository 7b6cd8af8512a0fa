use grid_util::point::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures when reading a [StoreLayout] from its external JSON form or when its geometry
/// does not fit its own grid.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("could not parse store layout: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("store grid must have a positive size, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("{what} at {cell} lies outside the {width}x{height} grid")]
    OutOfBounds {
        what: String,
        cell: Point,
        width: usize,
        height: usize,
    },
    #[error("section {id} has inverted bounds {coordinates:?}")]
    InvertedSection { id: String, coordinates: [i32; 4] },
}

/// Serializes a [Point] as a two element `[x, y]` array.
pub(crate) mod cell {
    use grid_util::point::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(point: &Point, serializer: S) -> Result<S::Ok, S::Error> {
        [point.x, point.y].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point, D::Error> {
        let [x, y] = <[i32; 2]>::deserialize(deserializer)?;
        Ok(Point::new(x, y))
    }
}

/// Serializes a list of [Point]s as a list of `[x, y]` arrays.
pub(crate) mod cells {
    use grid_util::point::Point;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(points.len()))?;
        for p in points {
            seq.serialize_element(&[p.x, p.y])?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        let raw = Vec::<[i32; 2]>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|[x, y]| Point::new(x, y)).collect())
    }
}

/// Serializes an optional [Point] as `[x, y]` or `null`.
pub(crate) mod opt_cell {
    use grid_util::point::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(point: &Option<Point>, serializer: S) -> Result<S::Ok, S::Error> {
        point.map(|p| [p.x, p.y]).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Point>, D::Error> {
        let raw = Option::<[i32; 2]>::deserialize(deserializer)?;
        Ok(raw.map(|[x, y]| Point::new(x, y)))
    }
}

/// A named rectangular region of the store, tagged with the category of goods it holds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Inclusive bounds `[x1, y1, x2, y2]`.
    pub coordinates: [i32; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aisle: Option<u32>,
}

impl Section {
    pub fn new(id: &str, name: &str, category: &str, coordinates: [i32; 4]) -> Section {
        Section {
            id: id.to_owned(),
            name: name.to_owned(),
            category: category.to_owned(),
            coordinates,
            aisle: None,
        }
    }

    /// The cell a route visits for this section: the floored midpoint of the bounds on each axis.
    pub fn center(&self) -> Point {
        let [x1, y1, x2, y2] = self.coordinates;
        Point::new((x1 + x2).div_euclid(2), (y1 + y2).div_euclid(2))
    }

    pub fn contains(&self, cell: &Point) -> bool {
        let [x1, y1, x2, y2] = self.coordinates;
        (x1..=x2).contains(&cell.x) && (y1..=y2).contains(&cell.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    #[serde(with = "cell")]
    pub coordinates: Point,
}

/// Static description of a store floor. Any cell not listed in `walls` is walkable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreLayout {
    pub width: usize,
    pub height: usize,
    #[serde(with = "cell")]
    pub entrance: Point,
    #[serde(with = "cell")]
    pub exit: Point,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
    #[serde(default, with = "cells")]
    pub walls: Vec<Point>,
}

impl StoreLayout {
    /// An empty `width` x `height` store without sections or walls.
    pub fn new(width: usize, height: usize, entrance: Point, exit: Point) -> StoreLayout {
        StoreLayout {
            width,
            height,
            entrance,
            exit,
            sections: Vec::new(),
            landmarks: Vec::new(),
            walls: Vec::new(),
        }
    }

    /// Parses a layout from its JSON form and checks its geometry with [validate](Self::validate).
    pub fn from_json(json: &str) -> Result<StoreLayout, LayoutError> {
        let layout: StoreLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn in_bounds(&self, cell: &Point) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    pub fn is_wall(&self, cell: &Point) -> bool {
        self.walls.contains(cell)
    }

    /// Checks that every cell the layout mentions lies on the grid. A walled entrance or exit
    /// is accepted here; the pathfinder refuses to route from or to it.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        let out_of_bounds = |what: String, cell: Point| LayoutError::OutOfBounds {
            what,
            cell,
            width: self.width,
            height: self.height,
        };
        if !self.in_bounds(&self.entrance) {
            return Err(out_of_bounds("entrance".to_owned(), self.entrance));
        }
        if !self.in_bounds(&self.exit) {
            return Err(out_of_bounds("exit".to_owned(), self.exit));
        }
        if let Some(wall) = self.walls.iter().find(|w| !self.in_bounds(w)) {
            return Err(out_of_bounds("wall".to_owned(), *wall));
        }
        for landmark in &self.landmarks {
            if !self.in_bounds(&landmark.coordinates) {
                return Err(out_of_bounds(
                    format!("landmark {}", landmark.id),
                    landmark.coordinates,
                ));
            }
        }
        for section in &self.sections {
            let [x1, y1, x2, y2] = section.coordinates;
            if x1 > x2 || y1 > y2 {
                return Err(LayoutError::InvertedSection {
                    id: section.id.clone(),
                    coordinates: section.coordinates,
                });
            }
            for corner in [Point::new(x1, y1), Point::new(x2, y2)] {
                if !self.in_bounds(&corner) {
                    return Err(out_of_bounds(format!("section {}", section.id), corner));
                }
            }
        }
        Ok(())
    }
}
