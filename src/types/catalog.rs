use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of catalog place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    Tourist,
    Festival,
    Restaurant,
    Cafe,
    Accommodation,
}

impl PlaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceKind::Tourist => "tourist",
            PlaceKind::Festival => "festival",
            PlaceKind::Restaurant => "restaurant",
            PlaceKind::Cafe => "cafe",
            PlaceKind::Accommodation => "accommodation",
        }
    }

    /// Kind of the places stored under a tourism dataset folder.
    pub fn from_dataset_folder(folder: &str) -> Option<PlaceKind> {
        match folder {
            "관광지" | "레포츠" | "문화시설" | "쇼핑" => Some(PlaceKind::Tourist),
            "숙박" => Some(PlaceKind::Accommodation),
            "음식점" => Some(PlaceKind::Restaurant),
            "축제공연행사" => Some(PlaceKind::Festival),
            _ => None,
        }
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPlace {
    /// Identifier assigned by the upstream tourism dataset
    pub content_id: String,
    pub title: String,
    pub place_type: PlaceKind,
    /// Finer category such as "사찰" or "한식"
    #[serde(default)]
    pub category: String,
    pub address: String,
    pub region: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFestival {
    pub content_id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub address: String,
    pub region: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image_url: String,
    /// `YYYYMMDD`, empty when unknown
    #[serde(default)]
    pub event_start_date: String,
    #[serde(default)]
    pub event_end_date: String,
    #[serde(default)]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub end_month: Option<u32>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl CatalogFestival {
    /// Month encoded in a `YYYYMMDD` date, if it holds a valid one.
    pub fn month_of(date: &str) -> Option<u32> {
        date.get(4..6)
            .and_then(|month| month.parse::<u32>().ok())
            .filter(|month| (1..=12).contains(month))
    }

    pub fn period(&self) -> String {
        if self.event_start_date.is_empty() {
            "날짜 미정".to_string()
        } else {
            format!("{} ~ {}", self.event_start_date, self.event_end_date)
        }
    }
}

/// Region of a catalog address: its first whitespace-separated token.
pub fn region_of_address(address: &str) -> String {
    address
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn festival_month_comes_from_compact_date() {
        assert_eq!(CatalogFestival::month_of("20250412"), Some(4));
        assert_eq!(CatalogFestival::month_of("202513"), None);
        assert_eq!(CatalogFestival::month_of("2025"), None);
        assert_eq!(CatalogFestival::month_of(""), None);
    }

    #[test]
    fn region_is_first_address_token() {
        assert_eq!(region_of_address("부산광역시 해운대구 우동"), "부산광역시");
        assert_eq!(region_of_address("   "), "");
    }

    #[test]
    fn dataset_folders_map_to_kinds() {
        assert_eq!(PlaceKind::from_dataset_folder("레포츠"), Some(PlaceKind::Tourist));
        assert_eq!(PlaceKind::from_dataset_folder("숙박"), Some(PlaceKind::Accommodation));
        assert_eq!(PlaceKind::from_dataset_folder("기타"), None);
    }
}
