//! Nearest-neighbor index lookup on 1-D coordinate axes.

/// Find the index of the axis value nearest to `target`.
///
/// The axis must be monotonic but may run in either direction
/// (climatology archives store latitude both north-first and
/// south-first). Ties resolve toward the lower index.
pub fn nearest_index(axis: &[f32], target: f64) -> usize {
    debug_assert!(axis.len() >= 2);

    let ascending = axis[0] < axis[axis.len() - 1];
    let idx = if ascending {
        axis.partition_point(|&v| (v as f64) < target)
    } else {
        axis.partition_point(|&v| (v as f64) > target)
    };

    if idx == 0 {
        return 0;
    }
    if idx >= axis.len() {
        return axis.len() - 1;
    }
    let below = (axis[idx - 1] as f64 - target).abs();
    let at = (axis[idx] as f64 - target).abs();
    if below <= at {
        idx - 1
    } else {
        idx
    }
}

/// Map every target coordinate to its nearest axis index.
pub fn nearest_indices(axis: &[f32], targets: &[f64]) -> Vec<usize> {
    targets.iter().map(|&t| nearest_index(axis, t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_axis() {
        let axis = [-179.875f32, -179.625, -179.375, -179.125];
        assert_eq!(nearest_index(&axis, -179.9), 0);
        assert_eq!(nearest_index(&axis, -179.6), 1);
        assert_eq!(nearest_index(&axis, -179.0), 3);
    }

    #[test]
    fn test_descending_axis() {
        // north-first latitude axis
        let axis = [89.875f32, 89.625, 89.375, 89.125];
        assert_eq!(nearest_index(&axis, 90.0), 0);
        assert_eq!(nearest_index(&axis, 89.6), 1);
        assert_eq!(nearest_index(&axis, 0.0), 3);
    }

    #[test]
    fn test_exact_match() {
        let axis = [0.0f32, 1.0, 2.0, 3.0];
        assert_eq!(nearest_index(&axis, 2.0), 2);
    }

    #[test]
    fn test_out_of_range_clamps_to_edges() {
        let axis = [0.0f32, 1.0, 2.0];
        assert_eq!(nearest_index(&axis, -5.0), 0);
        assert_eq!(nearest_index(&axis, 10.0), 2);
    }

    #[test]
    fn test_nearest_indices_batch() {
        let axis = [0.0f32, 1.0, 2.0, 3.0];
        let idx = nearest_indices(&axis, &[0.4, 1.6, 2.9]);
        assert_eq!(idx, vec![0, 2, 3]);
    }
}
