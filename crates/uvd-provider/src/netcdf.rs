//! NetCDF-backed climatology provider.
//!
//! Reads a preprocessed monthly archive with a `(month, latitude,
//! longitude)` variable and loads it fully into memory at startup, so
//! per-request sampling never touches libnetcdf.

use std::path::Path;
use std::sync::Once;

use tracing::info;

use crate::error::{ProviderError, ProviderResult};
use crate::sampling::{nearest_index, nearest_indices};
use crate::GridProvider;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose diagnostics to stderr even when
/// errors are handled gracefully by the Rust code. Call once early,
/// before any NetCDF operation; safe to call repeatedly.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and null handlers are a
        // documented way to disable error output.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Monthly climatology grid loaded from a NetCDF archive.
#[derive(Debug)]
pub struct NetcdfProvider {
    /// `(12, nlat, nlon)` values, fill values already mapped to NaN
    /// and unit scaling applied.
    values: Vec<f32>,
    lats: Vec<f32>,
    lons: Vec<f32>,
}

impl NetcdfProvider {
    /// Open an archive and load `var_name` plus its coordinate axes.
    ///
    /// `unit_scale` converts archive units to serving units (the UV
    /// archive stores kJ/m²/day; pass 1000.0 to serve J/m²/day).
    pub fn open(path: &Path, var_name: &str, unit_scale: f32) -> ProviderResult<Self> {
        silence_hdf5_errors();

        if !path.exists() {
            return Err(ProviderError::NotFound(path.display().to_string()));
        }

        info!(path = %path.display(), variable = var_name, "Loading climatology archive");

        let file = netcdf::open(path)
            .map_err(|e| ProviderError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;

        let var = file
            .variable(var_name)
            .ok_or_else(|| ProviderError::MissingData(format!("{} variable", var_name)))?;

        let dims = var.dimensions();
        if dims.len() != 3 {
            return Err(ProviderError::InvalidFormat(format!(
                "{} has {} dimensions, expected (month, latitude, longitude)",
                var_name,
                dims.len()
            )));
        }
        let months = dims[0].len();
        let nlat = dims[1].len();
        let nlon = dims[2].len();
        if months != 12 {
            return Err(ProviderError::InvalidFormat(format!(
                "{} has {} months, expected 12",
                var_name, months
            )));
        }

        let raw: Vec<f32> = var
            .get_values(..)
            .map_err(|e| ProviderError::InvalidFormat(format!("Failed to read {}: {}", var_name, e)))?;

        let fill_value = get_f32_attr(&var, "_FillValue");
        let values: Vec<f32> = raw
            .iter()
            .map(|&v| {
                if v.is_nan() || fill_value.is_some_and(|f| v == f) {
                    f32::NAN
                } else {
                    v * unit_scale
                }
            })
            .collect();

        let lats = read_axis(&file, "latitude", nlat)?;
        let lons = read_axis(&file, "longitude", nlon)?;

        info!(
            months = months,
            lats = nlat,
            lons = nlon,
            "Climatology archive loaded"
        );

        Ok(Self { values, lats, lons })
    }

    #[inline]
    fn value(&self, month: u8, lat_idx: usize, lon_idx: usize) -> f32 {
        let m = (month - 1) as usize;
        self.values[(m * self.lats.len() + lat_idx) * self.lons.len() + lon_idx]
    }
}

impl GridProvider for NetcdfProvider {
    fn sample_at(&self, month: u8, lat: f64, lon: f64) -> f32 {
        debug_assert!((1..=12).contains(&month));
        let i = nearest_index(&self.lats, lat);
        let j = nearest_index(&self.lons, lon);
        self.value(month, i, j)
    }

    fn sample_grid(&self, month: u8, lats: &[f64], lons: &[f64]) -> Vec<f32> {
        debug_assert!((1..=12).contains(&month));
        let lat_idx = nearest_indices(&self.lats, lats);
        let lon_idx = nearest_indices(&self.lons, lons);

        let mut out = Vec::with_capacity(lats.len() * lons.len());
        for &i in &lat_idx {
            for &j in &lon_idx {
                out.push(self.value(month, i, j));
            }
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

fn read_axis(file: &netcdf::File, name: &str, expected_len: usize) -> ProviderResult<Vec<f32>> {
    let var = file
        .variable(name)
        .ok_or_else(|| ProviderError::MissingData(format!("{} variable", name)))?;
    let axis: Vec<f32> = var
        .get_values(..)
        .map_err(|e| ProviderError::InvalidFormat(format!("Failed to read {}: {}", name, e)))?;
    if axis.len() != expected_len {
        return Err(ProviderError::InvalidFormat(format!(
            "{} axis length {} does not match grid dimension {}",
            name,
            axis.len(),
            expected_len
        )));
    }
    Ok(axis)
}

fn get_f32_attr(var: &netcdf::Variable, name: &str) -> Option<f32> {
    let attr = var.attribute(name)?;
    match attr.value().ok()? {
        netcdf::AttributeValue::Float(v) => Some(v),
        netcdf::AttributeValue::Double(v) => Some(v as f32),
        netcdf::AttributeValue::Floats(v) => v.first().copied(),
        netcdf::AttributeValue::Doubles(v) => v.first().map(|&d| d as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_archive_is_not_found() {
        let err = NetcdfProvider::open(
            Path::new("/nonexistent/uvd_world_monthly.nc"),
            "uvd_clear_mean",
            1000.0,
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }
}
