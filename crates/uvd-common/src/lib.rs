//! Shared types for the sundose services.
//!
//! Tile addressing, dataset encoding constants, and the common error
//! taxonomy used across the provider, tile, and API crates.

pub mod config;
pub mod error;
pub mod tile;

pub use config::{DatasetConfig, DOSE_MAX, MODEL_VERSION, TILE_SIZE};
pub use error::{UvdError, UvdResult};
pub use tile::{TileAddress, MAX_ZOOM};
