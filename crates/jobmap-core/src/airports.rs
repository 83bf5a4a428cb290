use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::EngineError;
use jobmap_geo::area::Area;

/// Runway surface, decoded from the numeric code used by the airport
/// dataset. Unknown codes fall back to `Water`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Surface {
    Asphalt,
    Concrete,
    Dirt,
    Grass,
    Gravel,
    Helipad,
    Snow,
    Water,
}

impl Surface {
    pub const ALL: [Surface; 8] = [
        Surface::Asphalt,
        Surface::Concrete,
        Surface::Dirt,
        Surface::Grass,
        Surface::Gravel,
        Surface::Helipad,
        Surface::Snow,
        Surface::Water,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Surface::Asphalt => "Asphalt",
            Surface::Concrete => "Concrete",
            Surface::Dirt => "Dirt",
            Surface::Grass => "Grass",
            Surface::Gravel => "Gravel",
            Surface::Helipad => "Helipad",
            Surface::Snow => "Snow",
            Surface::Water => "Water",
        }
    }
}

impl From<u8> for Surface {
    fn from(code: u8) -> Self {
        match code {
            1 => Surface::Asphalt,
            2 => Surface::Concrete,
            3 => Surface::Dirt,
            4 => Surface::Grass,
            5 => Surface::Gravel,
            6 => Surface::Helipad,
            7 => Surface::Snow,
            _ => Surface::Water,
        }
    }
}

impl From<Surface> for u8 {
    fn from(surface: Surface) -> u8 {
        match surface {
            Surface::Asphalt => 1,
            Surface::Concrete => 2,
            Surface::Dirt => 3,
            Surface::Grass => 4,
            Surface::Gravel => 5,
            Surface::Helipad => 6,
            Surface::Snow => 7,
            Surface::Water => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Simulator {
    Msfs,
    Xplane,
    #[default]
    Fsx,
}

impl Simulator {
    pub fn name(self) -> &'static str {
        match self {
            Simulator::Msfs => "MSFS",
            Simulator::Xplane => "X-Plane 11.55",
            Simulator::Fsx => "FSX",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirportKind {
    Civil,
    Military,
    Water,
}

/// Per-simulator coverage slots. A `null` first slot means the airport is
/// missing from that simulator at its real-world location; any further
/// slots are alternative landing coordinates.
pub type SimSlots = Vec<Option<[f64; 2]>>;

/// One entry of the external airport reference dataset, keyed by ICAO.
/// Read-only for the duration of a filtering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub lat: f64,
    pub lon: f64,
    pub size: u32,
    pub runway: u32,
    pub surface: Surface,
    #[serde(default)]
    pub ils: bool,
    #[serde(rename = "type")]
    pub kind: AirportKind,
    #[serde(default)]
    pub msfs: SimSlots,
    #[serde(default)]
    pub xplane: SimSlots,
    #[serde(default)]
    pub fsx: SimSlots,
}

impl AirportRecord {
    pub fn sim_slots(&self, sim: Simulator) -> &[Option<[f64; 2]>] {
        match sim {
            Simulator::Msfs => &self.msfs,
            Simulator::Xplane => &self.xplane,
            Simulator::Fsx => &self.fsx,
        }
    }
}

/// The airport reference dataset: ICAO code to record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirportDb {
    pub airports: HashMap<String, AirportRecord>,
}

impl AirportDb {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read airport dataset")?;
        serde_json::from_str(&content).context("Failed to parse airport dataset")
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).context("Failed to parse airport dataset")
    }

    pub fn get(&self, icao: &str) -> Option<&AirportRecord> {
        self.airports.get(icao)
    }

    /// Resolves an ICAO code, failing fast on codes absent from the
    /// dataset: a catalogue referencing one is an input-contract
    /// violation, never silently absorbed.
    pub fn lookup(&self, icao: &str) -> Result<&AirportRecord, EngineError> {
        self.airports
            .get(icao)
            .ok_or_else(|| EngineError::UnknownIcao(icao.to_string()))
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

/// Airport eligibility criteria. An airport failing any active criterion
/// is hidden from the leg filter.
#[derive(Debug, Clone)]
pub struct AirportFilters {
    /// Inclusive [min, max] airport size bounds.
    pub size: [u32; 2],
    /// Inclusive [min, max] runway length bounds, in feet.
    pub runway: [u32; 2],
    /// Allowed runway surfaces.
    pub surface: Vec<Surface>,
    /// Only airports present in the selected simulator.
    pub only_sim: bool,
    /// With `only_sim`: accept airports that at least have an alternative
    /// landing location in the simulator.
    pub only_sim_alternative: bool,
    /// Only bush-mission capable airports (size 5000+).
    pub only_bm: bool,
    /// Only airports with an instrument approach.
    pub only_ils: bool,
    pub exclude_military: bool,
    /// Restrict to airports inside this map area.
    pub area: Option<Area>,
}

impl Default for AirportFilters {
    fn default() -> Self {
        Self {
            size: [0, u32::MAX],
            runway: [0, u32::MAX],
            surface: Surface::ALL.to_vec(),
            only_sim: false,
            only_sim_alternative: false,
            only_bm: false,
            only_ils: false,
            exclude_military: false,
            area: None,
        }
    }
}

impl AirportFilters {
    pub fn hides(&self, airport: &AirportRecord, sim: Simulator) -> bool {
        if airport.size < self.size[0] || airport.size > self.size[1] {
            return true;
        }
        if airport.runway < self.runway[0] || airport.runway > self.runway[1] {
            return true;
        }
        if !self.surface.contains(&airport.surface) {
            return true;
        }
        if self.only_sim {
            let slots = airport.sim_slots(sim);
            // First slot null = not in this simulator; alternatives live
            // in the slots after it.
            let missing = slots.first().is_some_and(|slot| slot.is_none());
            if missing && (!self.only_sim_alternative || slots.len() < 2) {
                return true;
            }
        }
        if self.only_bm && airport.size < 5000 {
            return true;
        }
        if self.only_ils && !airport.ils {
            return true;
        }
        if self.exclude_military && airport.kind == AirportKind::Military {
            return true;
        }
        if let Some(area) = &self.area {
            if !area.contains(airport.lat, airport.lon) {
                return true;
            }
        }
        false
    }
}

/// `isHidden` over optional criteria: with no filters configured, nothing
/// is hidden.
pub fn is_hidden(airport: &AirportRecord, filters: Option<&AirportFilters>, sim: Simulator) -> bool {
    filters.is_some_and(|f| f.hides(airport, sim))
}
