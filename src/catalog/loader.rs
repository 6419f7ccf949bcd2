//! Seeds an [`InMemoryCatalog`] from a tourism dataset directory.
//!
//! The directory holds one folder per dataset section (`관광지`, `숙박`,
//! `음식점`, ...). Every `*.json` file inside is an array of items and its file
//! stem becomes the category of the items it contains.

use serde::Deserialize;
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info, warn};

use super::InMemoryCatalog;
use crate::{
    error::{PlannerError, Result},
    types::{catalog::region_of_address, CatalogFestival, CatalogPlace, PlaceKind},
};

/// Folder whose items are also loaded as festival records.
pub const FESTIVAL_FOLDER: &str = "축제공연행사";

const PLACE_FOLDERS: [&str; 7] = [
    "관광지",
    "레포츠",
    "문화시설",
    "쇼핑",
    "숙박",
    "음식점",
    FESTIVAL_FOLDER,
];

/// Counts produced by a dataset load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub created: usize,
    /// Items whose content id was already present
    pub skipped: usize,
    /// Files that could not be read or parsed
    pub failed_files: usize,
}

impl LoadSummary {
    fn absorb(&mut self, other: LoadSummary) {
        self.created += other.created;
        self.skipped += other.skipped;
        self.failed_files += other.failed_files;
    }
}

#[derive(Debug, Deserialize)]
struct DatasetItem {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    title: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    latitude: Value,
    #[serde(default)]
    longitude: Value,
    #[serde(default)]
    image: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    eventstartdate: String,
    #[serde(default)]
    eventenddate: String,
}

impl DatasetItem {
    fn content_id(&self) -> String {
        match &self.id {
            Value::String(id) => id.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Load places and festivals, optionally clearing the catalog first.
pub fn load_dataset(
    catalog: &mut InMemoryCatalog,
    root: &Path,
    clear: bool,
) -> Result<LoadSummary> {
    if clear {
        info!("clearing catalog before load");
        catalog.clear();
    }

    let mut summary = load_places(catalog, root)?;
    summary.absorb(load_festivals(catalog, root)?);
    Ok(summary)
}

/// Load every place folder under `root`.
pub fn load_places(catalog: &mut InMemoryCatalog, root: &Path) -> Result<LoadSummary> {
    ensure_dir(root)?;
    let mut summary = LoadSummary::default();

    for folder in PLACE_FOLDERS {
        let Some(kind) = PlaceKind::from_dataset_folder(folder) else {
            continue;
        };
        let folder_path = root.join(folder);
        if !folder_path.is_dir() {
            warn!(folder, "dataset folder not found");
            continue;
        }

        info!(folder, %kind, "loading places");
        for_each_file(&folder_path, &mut summary, |category, item, summary| {
            let content_id = item.content_id();
            if catalog.has_place(&content_id) {
                summary.skipped += 1;
                return;
            }
            catalog.insert_place(CatalogPlace {
                content_id,
                title: item.title,
                place_type: kind,
                category: category.to_string(),
                region: region_of_address(&item.address),
                address: item.address,
                latitude: coordinate(&item.latitude),
                longitude: coordinate(&item.longitude),
                image_url: item.image,
                tel: item.phone,
            });
            summary.created += 1;
        })?;
    }

    info!(
        created = summary.created,
        skipped = summary.skipped,
        "places loaded"
    );
    Ok(summary)
}

/// Load festival records from the festival folder under `root`.
pub fn load_festivals(catalog: &mut InMemoryCatalog, root: &Path) -> Result<LoadSummary> {
    ensure_dir(root)?;
    let folder_path = root.join(FESTIVAL_FOLDER);
    let mut summary = LoadSummary::default();

    if !folder_path.is_dir() {
        warn!(folder = FESTIVAL_FOLDER, "festival folder not found");
        return Ok(summary);
    }

    for_each_file(&folder_path, &mut summary, |category, item, summary| {
        let content_id = item.content_id();
        if catalog.has_festival(&content_id) {
            summary.skipped += 1;
            return;
        }
        catalog.insert_festival(CatalogFestival {
            content_id,
            title: item.title,
            category: category.to_string(),
            region: region_of_address(&item.address),
            address: item.address,
            phone: item.phone,
            latitude: coordinate(&item.latitude),
            longitude: coordinate(&item.longitude),
            image_url: item.image,
            start_month: CatalogFestival::month_of(&item.eventstartdate),
            end_month: CatalogFestival::month_of(&item.eventenddate),
            event_start_date: item.eventstartdate,
            event_end_date: item.eventenddate,
            is_active: true,
        });
        summary.created += 1;
    })?;

    info!(
        created = summary.created,
        skipped = summary.skipped,
        "festivals loaded"
    );
    Ok(summary)
}

fn ensure_dir(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(PlannerError::Catalog(format!(
            "dataset directory not found: {}",
            root.display()
        )))
    }
}

/// Feed every item of every `*.json` file in `folder` to `visit`, in file name order.
///
/// Unreadable or malformed files are counted and skipped.
fn for_each_file<F>(folder: &Path, summary: &mut LoadSummary, mut visit: F) -> Result<()>
where
    F: FnMut(&str, DatasetItem, &mut LoadSummary),
{
    let mut files: Vec<PathBuf> = fs::read_dir(folder)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    for path in files {
        let category = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();

        let items = match read_items(&path) {
            Ok(items) => items,
            Err(err) => {
                error!(file = %path.display(), "skipping dataset file: {}", err);
                summary.failed_files += 1;
                continue;
            }
        };

        for item in items {
            visit(&category, item, summary);
        }
    }

    Ok(())
}

fn read_items(path: &Path) -> Result<Vec<DatasetItem>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
