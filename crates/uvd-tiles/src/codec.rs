//! Tile output formats.
//!
//! Canonical form: raw little-endian u16 raster with the `65535`
//! no-data sentinel. Legacy form: the same scaled integer packed into
//! the R/G/B channels of an RGBA PNG, alpha 255 for valid pixels and
//! 0 for no-data. Both are selected through [`TileFormat`]; the
//! cache/serving logic is format-agnostic.

use uvd_common::{UvdError, UvdResult};

use crate::png::create_png;
use crate::quant::{raster_to_le_bytes, QuantSpec};

/// Serialized tile representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileFormat {
    /// Little-endian u16 raster with sentinel, `tile_size²` elements.
    RawU16,
    /// 24-bit channel-packed RGBA PNG with the alpha validity flag.
    LegacyPng,
}

impl TileFormat {
    /// File extension used in cache paths and tile URLs.
    pub fn extension(&self) -> &'static str {
        match self {
            TileFormat::RawU16 => "bin",
            TileFormat::LegacyPng => "png",
        }
    }

    /// MIME type for HTTP responses.
    pub fn content_type(&self) -> &'static str {
        match self {
            TileFormat::RawU16 => "application/octet-stream",
            TileFormat::LegacyPng => "image/png",
        }
    }

    /// Parse a URL/file extension.
    pub fn from_extension(ext: &str) -> UvdResult<Self> {
        match ext {
            "bin" => Ok(TileFormat::RawU16),
            "png" => Ok(TileFormat::LegacyPng),
            other => Err(UvdError::UnsupportedFormat(format!(
                "'{}' (expected 'bin' or 'png')",
                other
            ))),
        }
    }

    /// Quantize and serialize a physical grid.
    pub fn encode(&self, grid: &[f32], width: usize, height: usize, spec: &QuantSpec) -> UvdResult<Vec<u8>> {
        debug_assert_eq!(grid.len(), width * height);
        match self {
            TileFormat::RawU16 => Ok(raster_to_le_bytes(&spec.encode_grid(grid))),
            TileFormat::LegacyPng => {
                let rgba = pack_rgba(grid, spec);
                create_png(&rgba, width, height).map_err(UvdError::InternalError)
            }
        }
    }
}

/// Pack `round(value * scale)` into 24 bits across R/G/B, alpha as the
/// validity flag. The offset is not applied in the legacy format; it
/// predates offset-carrying datasets.
fn pack_rgba(grid: &[f32], spec: &QuantSpec) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(grid.len() * 4);
    for &v in grid {
        if v.is_nan() {
            rgba.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            let code = (f64::from(v) * spec.scale)
                .round()
                .clamp(0.0, f64::from(0x00FF_FFFFu32)) as u32;
            rgba.push(((code >> 16) & 0xFF) as u8);
            rgba.push(((code >> 8) & 0xFF) as u8);
            rgba.push((code & 0xFF) as u8);
            rgba.push(255);
        }
    }
    rgba
}

/// Reverse of [`pack_rgba`], for tests.
#[cfg(test)]
fn unpack_rgba(rgba: &[u8], spec: &QuantSpec) -> Vec<f32> {
    rgba.chunks_exact(4)
        .map(|px| {
            if px[3] == 0 {
                f32::NAN
            } else {
                let code = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
                (f64::from(code) / spec.scale) as f32
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quant::NO_DATA;

    #[test]
    fn test_extension_roundtrip() {
        assert_eq!(TileFormat::from_extension("bin").unwrap(), TileFormat::RawU16);
        assert_eq!(TileFormat::from_extension("png").unwrap(), TileFormat::LegacyPng);
        assert!(TileFormat::from_extension("webp").is_err());
    }

    #[test]
    fn test_raw_u16_encoding() {
        let spec = QuantSpec::new(3.0, 0.0);
        let grid = [0.0f32, f32::NAN, 5000.0];
        let bytes = TileFormat::RawU16.encode(&grid, 3, 1, &spec).unwrap();
        assert_eq!(bytes.len(), 6);
        assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), 0);
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), NO_DATA);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 15000);
    }

    #[test]
    fn test_rgba_packing_roundtrip() {
        let spec = QuantSpec::new(100.0, 0.0);
        let grid = [0.0f32, 1.0, 100.0, 5000.0, 12_000.0, 20_000.0];
        let rgba = pack_rgba(&grid, &spec);
        let recovered = unpack_rgba(&rgba, &spec);
        for (orig, rec) in grid.iter().zip(&recovered) {
            assert!((orig - rec).abs() <= 1.0 / 100.0);
        }
    }

    #[test]
    fn test_rgba_nan_is_transparent() {
        let spec = QuantSpec::new(100.0, 0.0);
        let rgba = pack_rgba(&[f32::NAN, 500.0], &spec);
        assert_eq!(rgba[3], 0);
        assert_eq!(rgba[7], 255);
        let recovered = unpack_rgba(&rgba, &spec);
        assert!(recovered[0].is_nan());
        assert!((recovered[1] - 500.0).abs() <= 0.01);
    }

    #[test]
    fn test_rgba_zero_pixel() {
        let spec = QuantSpec::new(100.0, 0.0);
        let rgba = pack_rgba(&[0.0], &spec);
        assert_eq!(&rgba, &[0, 0, 0, 255]);
    }

    #[test]
    fn test_rgba_large_value_clips_to_24_bits() {
        let spec = QuantSpec::new(100.0, 0.0);
        let rgba = pack_rgba(&[200_000.0], &spec);
        let recovered = unpack_rgba(&rgba, &spec);
        assert!(recovered[0] <= (0x00FF_FFFF as f32) / 100.0);
    }

    #[test]
    fn test_legacy_png_is_valid_png() {
        let spec = QuantSpec::new(3.0, 0.0);
        let grid = vec![1234.5f32; 16];
        let bytes = TileFormat::LegacyPng.encode(&grid, 4, 4, &spec).unwrap();
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
