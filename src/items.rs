use crate::astar::FxIndexMap;
use crate::layout::{Section, StoreLayout};
use crate::route::Target;
use fxhash::FxHashMap;
use grid_util::point::Point;
use serde::{Deserialize, Serialize};

/// One shopping-list entry after recognition. Only `category` and `interpreted_item` matter to
/// routing; the other fields are carried so full recognition payloads deserialize.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedItem {
    #[serde(default)]
    pub original_text: String,
    pub interpreted_item: String,
    pub category: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub found_in_database: bool,
    #[serde(default)]
    pub database_alternatives: Vec<String>,
}

impl ProcessedItem {
    pub fn new(interpreted_item: &str, category: &str) -> ProcessedItem {
        ProcessedItem {
            original_text: interpreted_item.to_owned(),
            interpreted_item: interpreted_item.to_owned(),
            category: category.to_owned(),
            confidence: 1.0,
            ..Default::default()
        }
    }
}

/// Categories match case-insensitively.
pub fn normalize_category(category: &str) -> String {
    category.to_lowercase()
}

/// Category and center lookups over the sections of a layout, built once per route request.
/// When several sections share a category or a center, the first one declared wins.
#[derive(Clone, Debug)]
pub struct CategoryIndex<'a> {
    sections: &'a [Section],
    by_category: FxHashMap<String, usize>,
    by_center: FxHashMap<Point, usize>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(layout: &'a StoreLayout) -> CategoryIndex<'a> {
        let mut by_category = FxHashMap::default();
        let mut by_center = FxHashMap::default();
        for (ix, section) in layout.sections.iter().enumerate() {
            by_category
                .entry(normalize_category(&section.category))
                .or_insert(ix);
            by_center.entry(section.center()).or_insert(ix);
        }
        CategoryIndex {
            sections: &layout.sections,
            by_category,
            by_center,
        }
    }

    pub fn section(&self, category: &str) -> Option<&'a Section> {
        self.by_category
            .get(&normalize_category(category))
            .map(|&ix| &self.sections[ix])
    }

    /// The cell a route visits for `category`, if any section carries it.
    pub fn target_point(&self, category: &str) -> Option<Point> {
        self.section(category).map(Section::center)
    }

    /// The first section whose center is `cell`.
    pub fn section_at(&self, cell: &Point) -> Option<&'a Section> {
        self.by_center.get(cell).map(|&ix| &self.sections[ix])
    }

    /// One target per distinct category among `items`, in order of first appearance.
    /// Categories without a section are dropped.
    pub fn targets(&self, items: &[ProcessedItem]) -> Vec<Target> {
        let mut categories: FxIndexMap<String, ()> = FxIndexMap::default();
        for item in items {
            categories.insert(normalize_category(&item.category), ());
        }
        categories
            .into_keys()
            .filter_map(|category| {
                self.target_point(&category)
                    .map(|point| Target { category, point })
            })
            .collect()
    }
}
