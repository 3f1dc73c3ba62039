//! HTTP request handlers.

mod common;
mod estimate;
mod meta;
mod tiles;

pub use common::json_error;
pub use estimate::estimate_handler;
pub use meta::{health_handler, methodology_handler};
pub use tiles::tile_handler;
