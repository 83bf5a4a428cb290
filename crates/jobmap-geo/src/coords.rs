// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use regex::Regex;
use std::sync::OnceLock;

static COORD_RE: OnceLock<Regex> = OnceLock::new();

/// Parses a free-form GPS coordinate string into `(lat, lon)`.
/// Accepts `"47.6N 122.3W"`, `"47.6, -122.3"`, `"47.6 -122.3"` and the
/// like; returns `None` when the string is not a coordinate pair.
pub fn parse_coords(input: &str) -> Option<(f64, f64)> {
    let re = COORD_RE.get_or_init(|| {
        Regex::new(r"^((-|\+)?\d+(\.\d+)?)([nNsS]|,|\s),?\s*((-|\+)?\d+(\.\d+)?)([eEwW])?$")
            .expect("coordinate regex is valid")
    });

    let caps = re.captures(input.trim())?;
    let mut lat: f64 = caps[1].parse().ok()?;
    if matches!(caps.get(4).map(|m| m.as_str()), Some("S") | Some("s")) {
        lat = -lat;
    }
    let mut lon: f64 = caps[5].parse().ok()?;
    if matches!(caps.get(8).map(|m| m.as_str()), Some("W") | Some("w")) {
        lon = -lon;
    }
    Some((lat, lon))
}

/// Renders a coordinate pair as a text GPS string, e.g. `"47.6N 122.3W"`.
pub fn format_coords(lat: f64, lon: f64) -> String {
    format!(
        "{}{} {}{}",
        lat.abs(),
        if lat >= 0.0 { 'N' } else { 'S' },
        lon.abs(),
        if lon >= 0.0 { 'E' } else { 'W' }
    )
}

/// Offset to bring `num` within ±180° of `center`: either 0, 360 or -360.
pub fn wrap(num: f64, center: f64) -> f64 {
    if num < center - 180.0 {
        return 360.0;
    }
    if num >= center + 180.0 {
        return -360.0;
    }
    0.0
}

/// `num` shifted into the ±180° window around `center`.
pub fn wrap_nb(num: f64, center: f64) -> f64 {
    num + wrap(num, center)
}
