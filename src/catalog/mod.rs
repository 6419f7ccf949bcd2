//! Read-only places and festivals catalog consulted by the itinerary generator.

pub mod loader;

use async_trait::async_trait;
use std::collections::HashSet;

use crate::{
    error::Result,
    types::{CatalogFestival, CatalogPlace, PlaceKind},
};

pub use loader::{load_dataset, load_festivals, load_places, LoadSummary, FESTIVAL_FOLDER};

/// Catalog queries used as grounding context for generation.
///
/// An empty result is a valid answer, not an error.
#[async_trait]
pub trait Catalog: Send + Sync + std::fmt::Debug {
    /// Places of `kind` whose region contains `region`, case-insensitively.
    async fn find_places(
        &self,
        region: &str,
        kind: PlaceKind,
        limit: usize,
    ) -> Result<Vec<CatalogPlace>>;

    /// Active festivals in `region` starting in `month` (1-12).
    async fn find_festivals(
        &self,
        region: &str,
        month: u32,
        limit: usize,
    ) -> Result<Vec<CatalogFestival>>;
}

/// Catalog held in memory, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    places: Vec<CatalogPlace>,
    festivals: Vec<CatalogFestival>,
    place_ids: HashSet<String>,
    festival_ids: HashSet<String>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place; returns false when its content id is already present.
    pub fn insert_place(&mut self, place: CatalogPlace) -> bool {
        if !self.place_ids.insert(place.content_id.clone()) {
            return false;
        }
        self.places.push(place);
        true
    }

    /// Add a festival; returns false when its content id is already present.
    pub fn insert_festival(&mut self, festival: CatalogFestival) -> bool {
        if !self.festival_ids.insert(festival.content_id.clone()) {
            return false;
        }
        self.festivals.push(festival);
        true
    }

    pub fn has_place(&self, content_id: &str) -> bool {
        self.place_ids.contains(content_id)
    }

    pub fn has_festival(&self, content_id: &str) -> bool {
        self.festival_ids.contains(content_id)
    }

    pub fn clear(&mut self) {
        self.places.clear();
        self.festivals.clear();
        self.place_ids.clear();
        self.festival_ids.clear();
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    pub fn festival_count(&self) -> usize {
        self.festivals.len()
    }
}

fn region_matches(candidate: &str, query: &str) -> bool {
    candidate.to_lowercase().contains(&query.to_lowercase())
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn find_places(
        &self,
        region: &str,
        kind: PlaceKind,
        limit: usize,
    ) -> Result<Vec<CatalogPlace>> {
        Ok(self
            .places
            .iter()
            .filter(|place| place.place_type == kind && region_matches(&place.region, region))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_festivals(
        &self,
        region: &str,
        month: u32,
        limit: usize,
    ) -> Result<Vec<CatalogFestival>> {
        Ok(self
            .festivals
            .iter()
            .filter(|festival| {
                festival.is_active
                    && festival.start_month == Some(month)
                    && region_matches(&festival.region, region)
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
