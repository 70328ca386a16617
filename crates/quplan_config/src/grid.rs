//! Quantized frequency grids
//!
//! Gantree: L2_Config → FrequencyGrid

use quplan_core::{FreqHz, QuplanError, QuplanResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of points a grid may enumerate
pub const MAX_GRID_POINTS: usize = 100_000;

/// Inclusive grid `min, min + step, ..., ≤ max` in hertz
/// Gantree: FrequencyGrid // 주파수 그리드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyGrid {
    /// First grid point
    pub min: FreqHz,
    /// Upper bound, included when it lies on the grid
    pub max: FreqHz,
    /// Spacing between points
    pub step: FreqHz,
}

impl FrequencyGrid {
    /// Create a grid
    pub const fn new(min: FreqHz, max: FreqHz, step: FreqHz) -> Self {
        Self { min, max, step }
    }

    /// Grid symmetric around zero
    pub const fn symmetric(half_span: FreqHz, step: FreqHz) -> Self {
        Self::new(-half_span, half_span, step)
    }

    /// Reject grids that enumerate nothing, overflow `i64`, or exceed
    /// [`MAX_GRID_POINTS`]
    pub fn validate(&self) -> QuplanResult<()> {
        match self.point_count() {
            Some(n) if n <= MAX_GRID_POINTS => Ok(()),
            _ => Err(QuplanError::InvalidGrid {
                min: self.min,
                max: self.max,
                step: self.step,
            }),
        }
    }

    /// Number of grid points, `0` for a grid that does not validate
    pub fn len(&self) -> usize {
        self.point_count()
            .filter(|n| *n <= MAX_GRID_POINTS)
            .unwrap_or(0)
    }

    fn point_count(&self) -> Option<usize> {
        if self.step <= 0 || self.min > self.max {
            return None;
        }
        let span = self.max.checked_sub(self.min)?;
        usize::try_from(span / self.step).ok()?.checked_add(1)
    }

    /// Check if the grid has no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate grid points in ascending order
    ///
    /// Every point lies in `min..=max`, so the offsets cannot overflow.
    pub fn iter(&self) -> impl Iterator<Item = FreqHz> {
        let Self { min, step, .. } = *self;
        (0..self.len()).map(move |i| min + i as FreqHz * step)
    }

    /// Check if a frequency lies on the grid
    pub fn contains(&self, freq: FreqHz) -> bool {
        !self.is_empty()
            && (self.min..=self.max).contains(&freq)
            && freq
                .checked_sub(self.min)
                .map_or(false, |offset| offset % self.step == 0)
    }
}

impl fmt::Display for FrequencyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] step {}", self.min, self.max, self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_ends() {
        let grid = FrequencyGrid::new(8_000_000_000, 11_000_000_000, 500_000_000);
        let points: Vec<_> = grid.iter().collect();
        assert_eq!(points.len(), 7);
        assert_eq!(points.first(), Some(&8_000_000_000));
        assert_eq!(points.last(), Some(&11_000_000_000));
    }

    #[test]
    fn test_symmetric_fnco_grid() {
        let grid = FrequencyGrid::symmetric(234_375_000, 23_437_500);
        assert_eq!(grid.len(), 21);
        assert!(grid.contains(-93_750_000));
        assert!(!grid.contains(-93_750_001));
        assert!(!grid.contains(257_812_500));
    }

    #[test]
    fn test_off_grid_max_is_excluded() {
        let grid = FrequencyGrid::new(0, 10, 3);
        assert_eq!(grid.iter().collect::<Vec<_>>(), vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_empty_grids() {
        assert!(FrequencyGrid::new(10, 0, 1).is_empty());
        assert!(FrequencyGrid::new(0, 10, 0).is_empty());
        assert!(FrequencyGrid::new(0, 10, -1).validate().is_err());
        assert!(FrequencyGrid::new(5, 5, 1).validate().is_ok());
        assert_eq!(FrequencyGrid::new(5, 5, 1).len(), 1);
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        let grid = FrequencyGrid::new(i64::MIN / 2 - 10, i64::MAX / 2 + 10, 1);
        assert!(matches!(grid.validate(), Err(QuplanError::InvalidGrid { .. })));
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.iter().count(), 0);
        assert!(!grid.contains(0));

        let full = FrequencyGrid::new(i64::MIN, i64::MAX, i64::MAX);
        assert!(full.validate().is_err());
        assert_eq!(full.len(), 0);
    }

    #[test]
    fn test_point_ceiling() {
        let fine = FrequencyGrid::new(8_000_000_000, 11_000_000_000, 1);
        assert!(fine.validate().is_err());
        assert_eq!(fine.iter().count(), 0);

        let at_limit = FrequencyGrid::new(0, (MAX_GRID_POINTS as i64 - 1) * 10, 10);
        assert_eq!(at_limit.len(), MAX_GRID_POINTS);
        assert!(at_limit.validate().is_ok());
        assert!(FrequencyGrid::new(0, MAX_GRID_POINTS as i64 * 10, 10).validate().is_err());
    }
}
