use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Fuel weight in kg per US gallon.
const FUEL_KG_PER_GALLON: f64 = 2.68735;

/// Performance figures for one aircraft model, as shipped in the
/// aircraft reference dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AircraftSpecs {
    pub max_pax: u32,
    pub max_cargo: u32,
    pub fuel_capacity: f64,
    pub speed: f64,
    #[serde(rename = "GPH")]
    pub gph: f64,
    pub fuel_type: u32,
    pub max_kg: u32,
}

/// Per-field overrides a pilot can apply on top of the dataset specs
/// (e.g. a derated engine or a ferry tank).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecOverrides {
    pub max_pax: Option<u32>,
    pub max_cargo: Option<u32>,
    pub fuel_capacity: Option<f64>,
    pub speed: Option<f64>,
    #[serde(rename = "GPH")]
    pub gph: Option<f64>,
    pub fuel_type: Option<u32>,
    pub max_kg: Option<u32>,
}

/// The aircraft reference dataset: model name to specs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AircraftDb {
    pub models: HashMap<String, AircraftSpecs>,
}

impl AircraftDb {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read aircraft dataset")?;
        serde_json::from_str(&content).context("Failed to parse aircraft dataset")
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).context("Failed to parse aircraft dataset")
    }
}

/// An aircraft resolved against the dataset, with overrides applied.
/// Unknown models resolve to all-zero specs.
#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    pub model: String,
    pub max_pax: u32,
    pub max_cargo: u32,
    pub fuel_capacity: f64,
    pub speed: f64,
    pub gph: f64,
    pub fuel_type: u32,
    pub max_kg: u32,
    /// Maximum length of a single leg, in nm, on full tanks.
    pub range_nm: f64,
}

impl Aircraft {
    pub fn new(model: &str, overrides: &SpecOverrides, db: &AircraftDb) -> Self {
        let base = db.models.get(model).cloned().unwrap_or_default();
        let fuel_capacity = overrides.fuel_capacity.unwrap_or(base.fuel_capacity);
        let speed = overrides.speed.unwrap_or(base.speed);
        let gph = overrides.gph.unwrap_or(base.gph);
        Self {
            model: model.to_string(),
            max_pax: overrides.max_pax.unwrap_or(base.max_pax),
            max_cargo: overrides.max_cargo.unwrap_or(base.max_cargo),
            fuel_capacity,
            speed,
            gph,
            fuel_type: overrides.fuel_type.unwrap_or(base.fuel_type),
            max_kg: overrides.max_kg.unwrap_or(base.max_kg),
            range_nm: (fuel_capacity / gph * speed).round(),
        }
    }

    pub fn from_db(model: &str, db: &AircraftDb) -> Self {
        Self::new(model, &SpecOverrides::default(), db)
    }

    pub fn nm_per_gal(&self) -> f64 {
        self.speed / self.gph
    }

    /// Payload capacity in kg with tanks filled to the given ratio.
    pub fn precise_max_kg(&self, tank_ratio: f64) -> f64 {
        let fuel_kg = tank_ratio * FUEL_KG_PER_GALLON * self.fuel_capacity;
        self.max_kg as f64 - fuel_kg
    }

    /// Payload capacity in kg when carrying just enough fuel for the
    /// given distance.
    pub fn max_kg_from_distance(&self, distance_nm: f64) -> f64 {
        let fuel_kg = (distance_nm / self.speed) * self.gph * FUEL_KG_PER_GALLON;
        self.max_kg as f64 - fuel_kg
    }
}
