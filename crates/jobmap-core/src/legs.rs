use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::airports::{is_hidden, AirportDb, AirportRecord};
use crate::filters::{AnchorFilter, LegFilter};
use crate::EngineError;
use jobmap_geo::{bearing_diff, distance_m, distance_sm, rhumb_bearing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    #[serde(rename = "Trip-Only")]
    TripOnly,
    #[serde(rename = "VIP")]
    Vip,
    #[serde(rename = "All-In")]
    AllIn,
}

/// A single cargo or passenger booking. `pax` and `kg` are mutually
/// exclusive in practice: a passenger job carries no weight and vice
/// versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoJob {
    pub pax: u32,
    pub kg: u32,
    pub pay: u32,
}

/// One directed airport-pair leg of the raw catalogue: its rhumb-line
/// bearing, its distance in statute miles, and the candidate jobs per
/// type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegJobs {
    pub direction: f64,
    pub distance: f64,
    #[serde(flatten)]
    pub jobs: HashMap<JobType, Vec<CargoJob>>,
}

impl LegJobs {
    pub fn has_type(&self, job_type: JobType) -> bool {
        self.jobs.contains_key(&job_type)
    }

    /// Jobs of the given type; absent types read as empty.
    pub fn of_type(&self, job_type: JobType) -> &[CargoJob] {
        self.jobs.get(&job_type).map_or(&[], Vec::as_slice)
    }
}

/// The raw catalogue: leg key (`"FROM-TO"`) to candidate jobs.
pub type JobCatalogue = HashMap<String, LegJobs>;

/// Totals over the pilot's assigned jobs on a leg. `kg` counts only
/// weight jobs; a job carrying passengers contributes nothing to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlightTotals {
    pub pax: u32,
    pub kg: u32,
    pub pay: u32,
}

/// A leg that survived the filter pass, with its aggregate totals and the
/// surviving job list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredLeg {
    /// Summed kg over `filtered_jobs`.
    pub amount: u32,
    /// Summed pay over `filtered_jobs`.
    pub pay: u32,
    pub direction: f64,
    pub distance: f64,
    pub filtered_jobs: Vec<CargoJob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlightTotals>,
}

fn split_leg_key(key: &str) -> Result<(&str, &str), EngineError> {
    key.split_once('-')
        .filter(|(fr, to)| !fr.is_empty() && !to.is_empty())
        .ok_or_else(|| EngineError::BadLegKey(key.to_string()))
}

/// An anchor filter with its airport resolved, so the per-leg pass does
/// not repeat the lookup.
struct Anchor<'a> {
    filter: &'a AnchorFilter,
    lat: f64,
    lon: f64,
}

fn resolve_anchor<'a>(
    filter: Option<&'a AnchorFilter>,
    airports: &AirportDb,
) -> Result<Option<Anchor<'a>>, EngineError> {
    match filter {
        Some(f) => {
            let record = airports.lookup(&f.icao)?;
            Ok(Some(Anchor {
                filter: f,
                lat: record.lat,
                lon: record.lon,
            }))
        }
        None => Ok(None),
    }
}

/// Filters and aggregates a job catalogue: airport eligibility, distance
/// bounds, directional constraints, per-job capacity and pay predicates,
/// per-leg aggregate thresholds, and finally the pay-density percentile
/// prune. Returns the surviving legs and the maximum aggregate kg seen
/// across them.
pub fn clean_legs(
    catalogue: &JobCatalogue,
    airports: &AirportDb,
    filter: &LegFilter,
) -> Result<(HashMap<String, FilteredLeg>, u32), EngineError> {
    let from_anchor = resolve_anchor(filter.from.as_ref(), airports)?;
    let to_anchor = resolve_anchor(filter.to.as_ref(), airports)?;

    // Each leg filters independently of every other leg; only the
    // percentile prune below needs the whole pass to have completed.
    let kept: Vec<(String, FilteredLeg)> = catalogue
        .par_iter()
        .map(|(key, leg)| {
            filter_leg(
                key,
                leg,
                airports,
                filter,
                from_anchor.as_ref(),
                to_anchor.as_ref(),
            )
            .map(|opt| opt.map(|filtered| (key.clone(), filtered)))
        })
        .collect::<Result<Vec<_>, EngineError>>()?
        .into_iter()
        .flatten()
        .collect();

    let mut max = 0;
    let mut legs = HashMap::with_capacity(kept.len());
    for (key, leg) in kept {
        max = max.max(leg.amount);
        legs.insert(key, leg);
    }

    if let Some(percent) = filter.percent_pay {
        prune_by_pay_density(&mut legs, percent);
    }

    debug!(
        "Leg filter kept {}/{} legs — max_amount_kg={}",
        legs.len(),
        catalogue.len(),
        max
    );
    if legs.is_empty() && !catalogue.is_empty() {
        warn!("Leg filter removed every leg — loosen the filter settings");
    }

    Ok((legs, max))
}

fn filter_leg(
    key: &str,
    leg: &LegJobs,
    airports: &AirportDb,
    filter: &LegFilter,
    from_anchor: Option<&Anchor>,
    to_anchor: Option<&Anchor>,
) -> Result<Option<FilteredLeg>, EngineError> {
    let (fr_icao, to_icao) = split_leg_key(key)?;
    let fr = airports.lookup(fr_icao)?;
    let to = airports.lookup(to_icao)?;

    if is_hidden(fr, filter.airport.as_ref(), filter.sim)
        || is_hidden(to, filter.airport.as_ref(), filter.sim)
    {
        return Ok(None);
    }

    if filter.min_dist.is_some_and(|d| leg.distance < d) {
        return Ok(None);
    }
    if filter.max_dist.is_some_and(|d| leg.distance > d) {
        return Ok(None);
    }

    if !leg.has_type(filter.job_type) {
        return Ok(None);
    }

    if let Some(anchor) = from_anchor {
        if anchor_rejects(anchor, fr, to, fr_icao, true) {
            return Ok(None);
        }
    }
    if let Some(anchor) = to_anchor {
        if anchor_rejects(anchor, fr, to, to_icao, false) {
            return Ok(None);
        }
    }
    if let Some(direction) = &filter.direction {
        if bearing_diff(leg.direction, direction.heading) > direction.angle {
            return Ok(None);
        }
    }

    let mut amount_pax = 0u32;
    let mut amount_kg = 0u32;
    let mut pay = 0u32;
    let mut filtered_jobs = Vec::new();

    for job in leg.of_type(filter.job_type) {
        if !filter.cargo.passengers && job.pax > 0 {
            continue;
        }
        if !filter.cargo.kg && job.pax == 0 {
            continue;
        }
        if filter.min_job_pay.is_some_and(|min| job.pay < min) {
            continue;
        }
        if filter.max_pax.is_some_and(|max| job.pax > max) {
            continue;
        }
        if filter.max_kg.is_some_and(|max| job.kg > max) {
            continue;
        }
        // Trip-Only jobs are combined by the optimizer; lower bounds only
        // make sense per-job for the other types.
        if filter.job_type != JobType::TripOnly {
            if filter.min_pax.is_some_and(|min| job.pax < min) {
                continue;
            }
            if filter.min_kg.is_some_and(|min| job.kg < min) {
                continue;
            }
        }
        amount_pax += job.pax;
        amount_kg += job.kg;
        pay += job.pay;
        filtered_jobs.push(*job);
    }

    if filtered_jobs.is_empty() {
        return Ok(None);
    }

    if filter.min_leg_pay.is_some_and(|min| pay < min) {
        return Ok(None);
    }
    if filter.min_pax.is_some_and(|min| amount_pax < min) {
        return Ok(None);
    }
    if filter.min_kg.is_some_and(|min| amount_kg < min) {
        return Ok(None);
    }

    Ok(Some(FilteredLeg {
        amount: amount_kg,
        pay,
        direction: leg.direction,
        distance: leg.distance,
        filtered_jobs,
        flight: None,
    }))
}

/// Directional predicates relative to an anchor airport. For a `from`
/// anchor the near end is the leg origin and the far end its
/// destination; for a `to` anchor the roles swap.
fn anchor_rejects(
    anchor: &Anchor,
    fr: &AirportRecord,
    to: &AirportRecord,
    near_icao: &str,
    is_from: bool,
) -> bool {
    let (near, far) = if is_from { (fr, to) } else { (to, fr) };

    if let Some(coef) = anchor.filter.dist_coef {
        let to_far = distance_m(anchor.lat, anchor.lon, far.lat, far.lon);
        let to_near = distance_m(anchor.lat, anchor.lon, near.lat, near.lon);
        // A leg departing the anchor itself divides by zero here; the
        // resulting inf/NaN never compares below the coefficient, so the
        // leg is kept.
        if to_far / to_near < coef {
            return true;
        }
    }
    if let Some(max_dist) = anchor.filter.max_dist {
        if distance_sm(anchor.lat, anchor.lon, near.lat, near.lon) > max_dist {
            return true;
        }
    }
    if let Some(angle) = anchor.filter.angle {
        if anchor.filter.icao != near_icao {
            let leg_bearing = rhumb_bearing(fr.lat, fr.lon, to.lat, to.lon);
            let anchor_bearing = if is_from {
                rhumb_bearing(anchor.lat, anchor.lon, near.lat, near.lon)
            } else {
                rhumb_bearing(near.lat, near.lon, anchor.lat, anchor.lon)
            };
            if bearing_diff(leg_bearing, anchor_bearing) > angle {
                return true;
            }
        }
    }
    false
}

fn pay_density(leg: &FilteredLeg) -> f64 {
    leg.pay as f64 / leg.amount as f64 / leg.distance
}

/// Drops every leg whose pay-per-kg-per-mile falls below the ratio at the
/// configured percentile. Legs with a zero amount or distance yield a NaN
/// ratio and are deliberately retained: they carry no priceable payload
/// to rank.
fn prune_by_pay_density(legs: &mut HashMap<String, FilteredLeg>, percent: u8) {
    if legs.is_empty() || percent == 0 {
        return;
    }

    let mut ratios: Vec<f64> = legs.values().map(pay_density).collect();
    ratios.sort_by(f64::total_cmp);

    let index = (ratios.len() as f64 * (1.0 - f64::from(percent) / 100.0)).floor() as i64 - 1;
    let index = index.clamp(0, ratios.len() as i64 - 1) as usize;
    let min_pay = ratios[index];

    let before = legs.len();
    legs.retain(|_, leg| {
        let ratio = pay_density(leg);
        if ratio.is_nan() || min_pay.is_nan() {
            return true;
        }
        ratio >= min_pay
    });
    debug!(
        "Pay-density prune removed {} legs below {:.6}",
        before - legs.len(),
        min_pay
    );
}

/// `clean_legs` over the general catalogue, with the pilot's assigned
/// jobs folded in: every assigned leg surviving the same filters gets a
/// `flight` sub-total, and legs existing only in the assigned set are
/// inserted with zeroed sale totals. The returned maximum comes from the
/// general pass alone.
pub fn clean_legs_with_flight(
    catalogue: &JobCatalogue,
    flight: &JobCatalogue,
    airports: &AirportDb,
    filter: &LegFilter,
) -> Result<(HashMap<String, FilteredLeg>, u32), EngineError> {
    let (mut legs, max) = clean_legs(catalogue, airports, filter)?;
    let (assigned, _) = clean_legs(flight, airports, filter)?;

    for (key, leg) in assigned {
        let totals = FlightTotals {
            pax: leg.filtered_jobs.iter().map(|j| j.pax).sum(),
            kg: leg
                .filtered_jobs
                .iter()
                .filter(|j| j.pax == 0)
                .map(|j| j.kg)
                .sum(),
            pay: leg.filtered_jobs.iter().map(|j| j.pay).sum(),
        };
        // The assigned jobs are not for sale: a leg only present in the
        // assigned set exposes no priceable jobs.
        let entry = legs.entry(key).or_insert(FilteredLeg {
            amount: 0,
            pay: 0,
            direction: leg.direction,
            distance: leg.distance,
            filtered_jobs: Vec::new(),
            flight: None,
        });
        entry.flight = Some(totals);
    }

    Ok((legs, max))
}
