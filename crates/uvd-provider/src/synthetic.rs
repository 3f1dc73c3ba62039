//! Synthetic UV dose provider.
//!
//! Generates a latitude-and-season dependent cosine pattern that
//! roughly mimics the real-world vitamin-D UV dose distribution, so
//! the service can run without the climatology archive.

use std::f64::consts::PI;

use tracing::warn;

use crate::GridProvider;

/// Peak dose at the equator around the summer solstice (J/m²/day).
const PEAK_DOSE_J: f64 = 12_000.0;

const LAT_STEP: f32 = 0.25;
const LON_STEP: f32 = 0.25;

/// Cosine-model dose generator on a 0.25° global grid.
pub struct SyntheticProvider {
    lats: Vec<f32>,
    lons: Vec<f32>,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticProvider {
    pub fn new() -> Self {
        warn!("Using synthetic data provider, served values are not real measurements");
        let lats = axis(-89.875, 90.0, LAT_STEP);
        let lons = axis(-179.875, 180.0, LON_STEP);
        Self { lats, lons }
    }

    /// Dose depends only on latitude and month. Peaks in northern
    /// hemisphere summer (month 7) north of the equator and in month 1
    /// south of it.
    fn dose_at(&self, month: u8, lat: f64) -> f32 {
        let lat_factor = lat.to_radians().cos();
        let season_angle = 2.0 * PI * f64::from(month - 1) / 12.0;
        let hemisphere_sign = if lat >= 0.0 { 1.0 } else { -1.0 };
        let season_factor = 0.5 + 0.5 * (season_angle - PI).cos() * hemisphere_sign;
        let dose = PEAK_DOSE_J * lat_factor * season_factor;
        dose.max(0.0) as f32
    }
}

impl GridProvider for SyntheticProvider {
    fn sample_at(&self, month: u8, lat: f64, _lon: f64) -> f32 {
        self.dose_at(month, lat)
    }

    fn sample_grid(&self, month: u8, lats: &[f64], lons: &[f64]) -> Vec<f32> {
        let mut out = Vec::with_capacity(lats.len() * lons.len());
        for &lat in lats {
            let row_value = self.dose_at(month, lat);
            out.extend(std::iter::repeat(row_value).take(lons.len()));
        }
        out
    }

    fn latitude_axis(&self) -> &[f32] {
        &self.lats
    }

    fn longitude_axis(&self) -> &[f32] {
        &self.lons
    }
}

fn axis(start: f32, end: f32, step: f32) -> Vec<f32> {
    let mut values = Vec::new();
    let mut v = start;
    while v < end {
        values.push(v);
        v += step;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_cover_globe() {
        let p = SyntheticProvider::new();
        assert_eq!(p.latitude_axis().len(), 720);
        assert_eq!(p.longitude_axis().len(), 1440);
        assert!((p.latitude_axis()[0] + 89.875).abs() < 1e-4);
        assert!((p.longitude_axis()[0] + 179.875).abs() < 1e-4);
    }

    #[test]
    fn test_dose_never_negative() {
        let p = SyntheticProvider::new();
        for month in 1..=12u8 {
            for lat in [-89.0, -45.0, 0.0, 45.0, 89.0] {
                assert!(p.sample_at(month, lat, 0.0) >= 0.0);
            }
        }
    }

    #[test]
    fn test_northern_summer_beats_winter() {
        let p = SyntheticProvider::new();
        let july = p.sample_at(7, 50.0, 0.0);
        let january = p.sample_at(1, 50.0, 0.0);
        assert!(july > january);
    }

    #[test]
    fn test_southern_hemisphere_is_phase_shifted() {
        let p = SyntheticProvider::new();
        let january = p.sample_at(1, -35.0, 0.0);
        let july = p.sample_at(7, -35.0, 0.0);
        assert!(january > july);
    }

    #[test]
    fn test_grid_matches_point_lookup() {
        let p = SyntheticProvider::new();
        let lats = [60.0, 0.0, -60.0];
        let lons = [-120.0, 0.0, 120.0];
        let grid = p.sample_grid(6, &lats, &lons);
        assert_eq!(grid.len(), 9);
        for (i, &lat) in lats.iter().enumerate() {
            for (j, &lon) in lons.iter().enumerate() {
                assert_eq!(grid[i * 3 + j], p.sample_at(6, lat, lon));
            }
        }
    }

    #[test]
    fn test_longitude_invariant() {
        let p = SyntheticProvider::new();
        assert_eq!(p.sample_at(3, 40.0, -170.0), p.sample_at(3, 40.0, 10.0));
    }
}
