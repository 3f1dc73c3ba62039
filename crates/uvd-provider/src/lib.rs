//! Gridded climatology data providers.
//!
//! A [`GridProvider`] serves monthly mean values (UV dose in J/m²/day,
//! temperature in °C) on a fixed latitude/longitude grid via
//! nearest-neighbor lookup. Two implementations exist: one backed by a
//! preprocessed NetCDF archive and a synthetic generator for
//! environments without the archive. Consumers hold providers as
//! `Arc<dyn GridProvider>` and must not care which one is wired in.

pub mod error;
mod netcdf;
mod sampling;
mod synthetic;

pub use crate::netcdf::NetcdfProvider;
pub use error::{ProviderError, ProviderResult};
pub use synthetic::SyntheticProvider;

/// Monthly gridded data source.
///
/// All lookups are nearest-neighbor. Cells without an underlying value
/// are reported as NaN, never as an error.
pub trait GridProvider: Send + Sync {
    /// Single-point lookup for `month` (1-12). NaN when no data.
    fn sample_at(&self, month: u8, lat: f64, lon: f64) -> f32;

    /// Batch lookup over the Cartesian product of the given coordinate
    /// arrays. Returns a row-major `lats.len() × lons.len()` grid.
    fn sample_grid(&self, month: u8, lats: &[f64], lons: &[f64]) -> Vec<f32>;

    /// The provider's native latitude coordinate array.
    fn latitude_axis(&self) -> &[f32];

    /// The provider's native longitude coordinate array.
    fn longitude_axis(&self) -> &[f32];
}
