// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airports::{AirportFilters, Simulator};
use crate::legs::JobType;

/// Allowed cargo categories. A job is a passenger job when `pax > 0`,
/// a weight job otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CargoCategories {
    pub passengers: bool,
    pub kg: bool,
}

impl Default for CargoCategories {
    fn default() -> Self {
        Self {
            passengers: true,
            kg: true,
        }
    }
}

/// Directional constraints relative to an anchor airport (the planned
/// origin or destination of the pilot's route).
#[derive(Debug, Clone, Default)]
pub struct AnchorFilter {
    pub icao: String,
    /// Minimum ratio of anchor-to-far-end over anchor-to-near-end
    /// distance: keeps only legs that make progress away from (or
    /// towards) the anchor.
    pub dist_coef: Option<f64>,
    /// Maximum distance between the anchor and the leg's near end, in
    /// statute miles.
    pub max_dist: Option<f64>,
    /// Maximum deviation between the leg bearing and the bearing out of
    /// the anchor, in degrees.
    pub angle: Option<f64>,
}

impl AnchorFilter {
    pub fn new(icao: &str) -> Self {
        Self {
            icao: icao.to_string(),
            ..Default::default()
        }
    }
}

/// Absolute heading constraint on the leg itself.
#[derive(Debug, Clone, Copy)]
pub struct DirectionFilter {
    pub heading: f64,
    pub angle: f64,
}

/// The full filter configuration for one `clean_legs` pass. Every
/// dimension is optional; a `None` (or vacuous default) disables it
/// rather than erroring.
#[derive(Debug, Clone, Default)]
pub struct LegFilter {
    pub airport: Option<AirportFilters>,
    pub sim: Simulator,
    pub job_type: JobType,
    pub cargo: CargoCategories,
    pub from: Option<AnchorFilter>,
    pub to: Option<AnchorFilter>,
    pub direction: Option<DirectionFilter>,
    /// Leg distance bounds, statute miles.
    pub min_dist: Option<f64>,
    pub max_dist: Option<f64>,
    pub min_job_pay: Option<u32>,
    pub min_leg_pay: Option<u32>,
    /// Per-job and per-leg capacity bounds. Lower bounds apply per-job
    /// only for non-Trip-Only types; Trip-Only jobs are combined by the
    /// optimizer instead.
    pub min_pax: Option<u32>,
    pub max_pax: Option<u32>,
    pub min_kg: Option<u32>,
    pub max_kg: Option<u32>,
    /// Keep only the top N% of legs by pay density.
    pub percent_pay: Option<u8>,
}
