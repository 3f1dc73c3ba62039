//! Fixed-point quantization of physical grids.
//!
//! Each f32 value becomes a 16-bit code via a linear scale/offset;
//! `65535` is reserved as the no-data sentinel, so valid codes are
//! `0..=65534`. Out-of-range values saturate at the clamp bounds
//! rather than wrap.

use uvd_common::DatasetConfig;

/// Reserved sentinel code for missing data.
pub const NO_DATA: u16 = u16::MAX;

/// Largest valid (non-sentinel) code.
pub const MAX_CODE: u16 = u16::MAX - 1;

/// Linear quantization parameters for one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantSpec {
    /// Integer steps per physical unit.
    pub scale: f64,
    /// Physical offset added before scaling.
    pub offset: f64,
}

impl QuantSpec {
    pub fn new(scale: f64, offset: f64) -> Self {
        debug_assert!(scale > 0.0);
        Self { scale, offset }
    }

    /// Quantize one value. NaN maps to the sentinel; everything else
    /// clamps into the valid code range.
    pub fn encode_value(&self, value: f32) -> u16 {
        if value.is_nan() {
            return NO_DATA;
        }
        let code = ((f64::from(value) + self.offset) * self.scale).round();
        code.clamp(0.0, f64::from(MAX_CODE)) as u16
    }

    /// Exact inverse of [`encode_value`](Self::encode_value); the
    /// sentinel maps back to NaN. Used for verification and tests.
    pub fn decode_value(&self, code: u16) -> f32 {
        if code == NO_DATA {
            return f32::NAN;
        }
        (f64::from(code) / self.scale - self.offset) as f32
    }

    /// Quantize a full grid, row-major.
    pub fn encode_grid(&self, grid: &[f32]) -> Vec<u16> {
        grid.iter().map(|&v| self.encode_value(v)).collect()
    }
}

impl From<&DatasetConfig> for QuantSpec {
    fn from(cfg: &DatasetConfig) -> Self {
        Self::new(cfg.scale, cfg.offset)
    }
}

/// Serialize a raster as little-endian u16 bytes, the canonical wire
/// and cache format.
pub fn raster_to_le_bytes(raster: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(raster.len() * 2);
    for &code in raster {
        bytes.extend_from_slice(&code.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dose_spec() -> QuantSpec {
        QuantSpec::new(3.0, 0.0)
    }

    fn temp_spec() -> QuantSpec {
        QuantSpec::new(100.0, 50.0)
    }

    #[test]
    fn test_roundtrip_within_half_step() {
        let spec = dose_spec();
        for v in [0.0f32, 1.0, 100.0, 5000.0, 12_000.0, 20_000.0] {
            let recovered = spec.decode_value(spec.encode_value(v));
            assert!(
                (recovered - v).abs() <= 0.5 / 3.0 + 1e-3,
                "value {} recovered as {}",
                v,
                recovered
            );
        }
    }

    #[test]
    fn test_roundtrip_5000_within_017() {
        let spec = dose_spec();
        let recovered = spec.decode_value(spec.encode_value(5000.0));
        assert!((recovered - 5000.0).abs() < 0.17);
    }

    #[test]
    fn test_temperature_roundtrip() {
        let spec = temp_spec();
        for v in [-50.0f32, -17.23, 0.0, 21.87, 60.0] {
            let recovered = spec.decode_value(spec.encode_value(v));
            assert!((recovered - v).abs() <= 0.005 + 1e-4);
        }
    }

    #[test]
    fn test_nan_maps_to_sentinel_and_back() {
        let spec = dose_spec();
        assert_eq!(spec.encode_value(f32::NAN), NO_DATA);
        assert!(spec.decode_value(NO_DATA).is_nan());
    }

    #[test]
    fn test_only_nan_produces_sentinel() {
        let spec = dose_spec();
        // the value whose code would naturally be 65535 clamps to 65534
        let near_top = (65535.0f64 / 3.0) as f32;
        assert_eq!(spec.encode_value(near_top), MAX_CODE);
    }

    #[test]
    fn test_clamping_above_range() {
        let spec = dose_spec();
        assert_eq!(spec.encode_value(200_000.0), MAX_CODE);
    }

    #[test]
    fn test_clamping_below_range() {
        assert_eq!(dose_spec().encode_value(-123.0), 0);
        // -80 °C is below the configured temperature range
        assert_eq!(temp_spec().encode_value(-80.0), 0);
    }

    #[test]
    fn test_grid_encoding_preserves_layout() {
        let spec = dose_spec();
        let grid = [0.0f32, f32::NAN, 3000.0, 20_000.0];
        let raster = spec.encode_grid(&grid);
        assert_eq!(raster, vec![0, NO_DATA, 9000, 60_000]);
    }

    #[test]
    fn test_le_byte_serialization() {
        let bytes = raster_to_le_bytes(&[0x1234, NO_DATA]);
        assert_eq!(bytes, vec![0x34, 0x12, 0xFF, 0xFF]);
    }
}
