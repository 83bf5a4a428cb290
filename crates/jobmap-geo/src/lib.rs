// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod area;
pub mod coords;

/// Mean earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per statute mile.
const METERS_PER_SM: f64 = 1_609.344;

/// Great-circle (haversine) distance between two coordinates, in meters.
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

pub fn meters_to_sm(meters: f64) -> f64 {
    meters / METERS_PER_SM
}

/// Great-circle distance in statute miles, the unit leg distances are
/// expressed in throughout the job catalogue.
pub fn distance_sm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    meters_to_sm(distance_m(lat1, lon1, lat2, lon2))
}

/// Rhumb-line (constant heading) bearing from the first coordinate to the
/// second, in degrees normalized to `[0, 360)`.
pub fn rhumb_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_psi = ((std::f64::consts::FRAC_PI_4 + phi2 / 2.0).tan()
        / (std::f64::consts::FRAC_PI_4 + phi1 / 2.0).tan())
    .ln();

    let mut d_lon = (lon2 - lon1).to_radians();
    // Take the shorter way around the antimeridian
    if d_lon.abs() > std::f64::consts::PI {
        d_lon = if d_lon > 0.0 {
            d_lon - 2.0 * std::f64::consts::PI
        } else {
            d_lon + 2.0 * std::f64::consts::PI
        };
    }

    d_lon.atan2(d_psi).to_degrees().rem_euclid(360.0)
}

/// Angular difference between two bearings, folded into `[0, 180]`.
/// Symmetric in its arguments: `bearing_diff(a, b) == bearing_diff(b, a)`.
pub fn bearing_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    180.0 - (d - 180.0).abs()
}
