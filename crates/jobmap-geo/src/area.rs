// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use geo::{Contains, LineString, Point, Polygon};

/// A geographic bounding area built from `[lat, lon]` vertices, as drawn
/// on the map by the user.
#[derive(Debug, Clone)]
pub struct Area {
    polygon: Polygon<f64>,
}

impl Area {
    pub fn new(vertices: &[[f64; 2]]) -> Self {
        let ring: Vec<(f64, f64)> = vertices.iter().map(|v| (v[1], v[0])).collect();
        Self {
            polygon: Polygon::new(LineString::from(ring), vec![]),
        }
    }

    /// Containment test at the native longitude and at ±360°, so that
    /// polygons drawn across the antimeridian still match airports on
    /// either side of it. Heuristic, not an exact geodesic polygon test.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        [lon, lon - 360.0, lon + 360.0]
            .iter()
            .any(|&l| self.polygon.contains(&Point::new(l, lat)))
    }
}
