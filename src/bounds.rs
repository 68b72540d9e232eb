use crate::grid::{Coordinate, Dimensions};

/// Interior box where growth is allowed.
///
/// Per axis the box spans `[floor(0.1 * size), floor(0.9 * size))`, keeping the
/// deposit off the outer shell of the survey volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsPolicy {
    pub lower: Coordinate,
    pub upper: Coordinate,
}

impl BoundsPolicy {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            lower: Coordinate::new(lower_bound(dims.x), lower_bound(dims.y), lower_bound(dims.z)),
            upper: Coordinate::new(upper_bound(dims.x), upper_bound(dims.y), upper_bound(dims.z)),
        }
    }

    /// Half-open test on every axis; the cell at `upper` itself is excluded
    pub fn is_growable(&self, coord: Coordinate) -> bool {
        (self.lower.x..self.upper.x).contains(&coord.x)
            && (self.lower.y..self.upper.y).contains(&coord.y)
            && (self.lower.z..self.upper.z).contains(&coord.z)
    }

    /// Number of growable cells
    pub fn volume(&self) -> usize {
        self.upper.x.saturating_sub(self.lower.x)
            * self.upper.y.saturating_sub(self.lower.y)
            * self.upper.z.saturating_sub(self.lower.z)
    }
}

fn lower_bound(size: usize) -> usize {
    (size as f64 * 0.1) as usize
}

fn upper_bound(size: usize) -> usize {
    (size as f64 * 0.9) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_for_round_sizes() {
        let b = BoundsPolicy::new(Dimensions::new(10, 20, 100));
        assert_eq!(b.lower, Coordinate::new(1, 2, 10));
        assert_eq!(b.upper, Coordinate::new(9, 18, 90));
        assert_eq!(b.volume(), 8 * 16 * 80);
    }

    #[test]
    fn test_bounds_truncate() {
        let b = BoundsPolicy::new(Dimensions::new(2, 3, 4));
        assert_eq!(b.lower, Coordinate::new(0, 0, 0));
        assert_eq!(b.upper, Coordinate::new(1, 2, 3));
    }

    #[test]
    fn test_upper_bound_is_exclusive() {
        let b = BoundsPolicy::new(Dimensions::new(10, 10, 10));
        assert!(b.is_growable(Coordinate::new(1, 1, 1)));
        assert!(b.is_growable(Coordinate::new(8, 8, 8)));
        assert!(!b.is_growable(Coordinate::new(9, 8, 8)));
        assert!(!b.is_growable(Coordinate::new(8, 9, 8)));
        assert!(!b.is_growable(Coordinate::new(8, 8, 9)));
        assert!(!b.is_growable(Coordinate::new(0, 5, 5)));
    }

    #[test]
    fn test_single_cell_axis_has_no_growable_cells() {
        let b = BoundsPolicy::new(Dimensions::new(1, 10, 10));
        assert_eq!(b.upper.x, 0);
        assert_eq!(b.volume(), 0);
        assert!(!b.is_growable(Coordinate::new(0, 5, 5)));
    }
}
