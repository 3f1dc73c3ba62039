//! Tile addressing for the Web Mercator tiling scheme.

use serde::{Deserialize, Serialize};

use crate::error::{UvdError, UvdResult};

/// Maximum supported zoom level.
pub const MAX_ZOOM: u32 = 10;

/// A validated tile address (z/x/y plus climatology month).
///
/// Construction via [`TileAddress::new`] is the single validation
/// point: once a value exists, `x` and `y` are known to be inside the
/// `2^z` grid and `month` is 1–12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileAddress {
    /// Zoom level.
    pub z: u32,
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Climatology month, 1 = January.
    pub month: u8,
}

impl TileAddress {
    /// Validate and build a tile address.
    pub fn new(z: u32, x: u32, y: u32, month: u8) -> UvdResult<Self> {
        if z > MAX_ZOOM {
            return Err(UvdError::TileOutOfRange(format!(
                "zoom {} out of range (0-{})",
                z, MAX_ZOOM
            )));
        }
        let max_index = 1u32 << z;
        if x >= max_index || y >= max_index {
            return Err(UvdError::TileOutOfRange(format!(
                "tile {}/{}/{} out of range (max index {})",
                z,
                x,
                y,
                max_index - 1
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(UvdError::InvalidParameter {
                param: "month".to_string(),
                message: format!("{} is not a month (1-12)", month),
            });
        }
        Ok(Self { z, x, y, month })
    }

    /// Number of tiles along each axis at this zoom level.
    pub fn matrix_size(&self) -> u32 {
        1u32 << self.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(TileAddress::new(0, 0, 0, 1).is_ok());
        assert!(TileAddress::new(10, 1023, 1023, 12).is_ok());
        assert!(TileAddress::new(3, 7, 0, 6).is_ok());
    }

    #[test]
    fn test_zoom_out_of_range() {
        let err = TileAddress::new(11, 0, 0, 1).unwrap_err();
        assert_eq!(err.code(), "TileOutOfRange");
    }

    #[test]
    fn test_column_at_matrix_edge_rejected() {
        // column == 2^z is the first invalid index
        let err = TileAddress::new(3, 8, 0, 1).unwrap_err();
        assert_eq!(err.code(), "TileOutOfRange");
        let err = TileAddress::new(0, 0, 1, 1).unwrap_err();
        assert_eq!(err.code(), "TileOutOfRange");
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            TileAddress::new(0, 0, 0, 0).unwrap_err().code(),
            "InvalidParameter"
        );
        assert_eq!(
            TileAddress::new(0, 0, 0, 13).unwrap_err().code(),
            "InvalidParameter"
        );
    }

    #[test]
    fn test_matrix_size() {
        let addr = TileAddress::new(4, 3, 3, 2).unwrap();
        assert_eq!(addr.matrix_size(), 16);
    }
}
