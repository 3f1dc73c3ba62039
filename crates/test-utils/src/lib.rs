//! Shared test utilities for the sundose workspace.
//!
//! Temp cache directories, deterministic grid providers, and float
//! assertion helpers used by the tile and API tests.

use tempfile::TempDir;
use uvd_provider::GridProvider;

/// Create a temp directory to use as a tile cache root. The directory
/// is removed when the returned guard drops.
pub fn temp_cache_dir() -> TempDir {
    tempfile::tempdir().expect("create temp cache dir")
}

/// Provider returning one fixed value everywhere (NaN included), on a
/// coarse 1° global grid.
pub struct UniformProvider {
    value: f32,
    lats: Vec<f32>,
    lons: Vec<f32>,
}

impl UniformProvider {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            lats: (0..180).map(|i| 89.5 - i as f32).collect(),
            lons: (0..360).map(|i| -179.5 + i as f32).collect(),
        }
    }
}

impl GridProvider for UniformProvider {
    fn sample_at(&self, _month: u8, _lat: f64, _lon: f64) -> f32 {
        self.value
    }

    fn sample_grid(&self, _month: u8, lats: &[f64], lons: &[f64]) -> Vec<f32> {
        vec![self.value; lats.len() * lons.len()]
    }

    fn latitude_axis(&self) -> &[f32] {
        &self.lats
    }

    fn longitude_axis(&self) -> &[f32] {
        &self.lons
    }
}

/// Provider that reports no data north of a cutoff latitude; exercises
/// the sentinel path on realistic tile shapes.
pub struct PartialCoverageProvider {
    value: f32,
    nodata_above_lat: f64,
    lats: Vec<f32>,
    lons: Vec<f32>,
}

impl PartialCoverageProvider {
    pub fn new(value: f32, nodata_above_lat: f64) -> Self {
        Self {
            value,
            nodata_above_lat,
            lats: (0..180).map(|i| 89.5 - i as f32).collect(),
            lons: (0..360).map(|i| -179.5 + i as f32).collect(),
        }
    }
}

impl GridProvider for PartialCoverageProvider {
    fn sample_at(&self, _month: u8, lat: f64, _lon: f64) -> f32 {
        if lat > self.nodata_above_lat {
            f32::NAN
        } else {
            self.value
        }
    }

    fn sample_grid(&self, month: u8, lats: &[f64], lons: &[f64]) -> Vec<f32> {
        let mut out = Vec::with_capacity(lats.len() * lons.len());
        for &lat in lats {
            let v = self.sample_at(month, lat, 0.0);
            out.extend(std::iter::repeat(v).take(lons.len()));
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

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }
}
