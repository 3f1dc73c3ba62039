//! Dataset and encoding configuration constants.

use serde::Serialize;

/// Version segment baked into every cache path. Bumping it is the only
/// supported cache-invalidation mechanism: old entries are simply left
/// behind under the previous version directory.
pub const MODEL_VERSION: &str = "1.0.0";

/// Square tile edge length in pixels.
pub const TILE_SIZE: usize = 256;

/// Theoretical maximum daily erythemal dose (J/m²/day). Values above
/// this saturate at the top of the quantized range.
pub const DOSE_MAX: f64 = 20_000.0;

/// Per-dataset encoding parameters.
///
/// `scale`/`offset` define the fixed-point quantization:
/// `code = round((value + offset) * scale)`, clamped to the valid
/// 16-bit code range. Values outside the configured physical range
/// saturate; they never wrap.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DatasetConfig {
    /// Namespace segment in cache paths and tile URLs.
    pub namespace: &'static str,
    /// Integer steps per physical unit.
    pub scale: f64,
    /// Physical offset added before scaling.
    pub offset: f64,
}

impl DatasetConfig {
    /// UV dose in J/m²/day. 0–20 000 maps to 0–60 000 codes at a
    /// precision of 1/3 unit.
    pub const fn uv() -> Self {
        Self {
            namespace: "uv",
            scale: 3.0,
            offset: 0.0,
        }
    }

    /// Temperature in °C. −50…+60 maps to 0–11 000 codes at 0.01 °C
    /// precision.
    pub const fn temperature() -> Self {
        Self {
            namespace: "temperature",
            scale: 100.0,
            offset: 50.0,
        }
    }
}
