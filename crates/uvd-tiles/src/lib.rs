//! Tile generation and caching for gridded climatology data.
//!
//! The pipeline for one tile: [`mercator`] computes the per-pixel
//! sample coordinates, a [`uvd_provider::GridProvider`] samples the
//! climatology grid, [`codec`] quantizes and serializes the raster,
//! and [`cache::TileCache`] persists the bytes under a versioned path.
//! [`compress::TransferCompressor`] optionally gzips cached tiles for
//! transport.

pub mod cache;
pub mod codec;
pub mod compress;
pub mod mercator;
mod png;
pub mod quant;

pub use cache::{TileCache, TileKey};
pub use codec::TileFormat;
pub use compress::TransferCompressor;
pub use quant::{QuantSpec, MAX_CODE, NO_DATA};
