use crate::layout::{LayoutError, StoreLayout};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CATALOG_JSON: &str = include_str!("../data/stores.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not parse store catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("store {id} has an invalid layout: {source}")]
    InvalidLayout {
        id: String,
        #[source]
        source: LayoutError,
    },
    #[error("no store with id {0}")]
    UnknownStore(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub description: String,
    pub layout: StoreLayout,
}

/// Parses a list of stores and validates every layout.
pub fn parse_catalog(json: &str) -> Result<Vec<Store>, CatalogError> {
    let stores: Vec<Store> = serde_json::from_str(json)?;
    for store in &stores {
        store
            .layout
            .validate()
            .map_err(|source| CatalogError::InvalidLayout {
                id: store.id.clone(),
                source,
            })?;
    }
    Ok(stores)
}

/// The built-in store layouts.
pub fn stores() -> Result<Vec<Store>, CatalogError> {
    parse_catalog(CATALOG_JSON)
}

pub fn find_store(id: &str) -> Result<Store, CatalogError> {
    stores()?
        .into_iter()
        .find(|store| store.id == id)
        .ok_or_else(|| CatalogError::UnknownStore(id.to_owned()))
}
