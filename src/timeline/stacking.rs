//! Row assignment for bars that share an employee lane.
//!
//! Bars are placed greedily in the order they were fetched, without sorting by start date.
//! The result is deterministic for a given order but can use more rows than an optimal
//! interval colouring would.

use super::position::BarGeometry;

/// Incremental greedy stacker. Each row remembers every interval placed in it.
#[derive(Debug, Default)]
pub struct OverlapStacker {
    rows: Vec<Vec<BarGeometry>>,
}

impl OverlapStacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `bar` into the lowest row where it overlaps nothing and return that row.
    pub fn place(&mut self, bar: BarGeometry) -> usize {
        let row = self
            .rows
            .iter()
            .position(|occupied| occupied.iter().all(|o| !o.overlaps(&bar)))
            .unwrap_or(self.rows.len());
        if row == self.rows.len() {
            self.rows.push(Vec::new());
        }
        self.rows[row].push(bar);
        row
    }

    /// Rows in use; at least 1 so an empty lane still renders.
    pub fn row_count(&self) -> usize {
        self.rows.len().max(1)
    }
}

/// Row per input bar plus the lane's row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stacking {
    pub rows: Vec<usize>,
    pub max_rows: usize,
}

pub fn stack(bars: &[BarGeometry]) -> Stacking {
    let mut stacker = OverlapStacker::new();
    let rows = bars.iter().map(|bar| stacker.place(*bar)).collect();
    Stacking {
        rows,
        max_rows: stacker.row_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(left: f32, width: f32) -> BarGeometry {
        BarGeometry { left, width }
    }

    #[test]
    fn overlapping_bars_take_successive_rows() {
        // Mon–Wed and Tue–Thu of one week at 40px per day
        let result = stack(&[bar(0.0, 120.0), bar(40.0, 120.0)]);
        assert_eq!(result.rows, vec![0, 1]);
        assert_eq!(result.max_rows, 2);
    }

    #[test]
    fn touching_bars_share_a_row() {
        let result = stack(&[bar(0.0, 40.0), bar(40.0, 40.0)]);
        assert_eq!(result.rows, vec![0, 0]);
        assert_eq!(result.max_rows, 1);
    }

    #[test]
    fn lowest_free_row_is_reused() {
        let result = stack(&[
            bar(0.0, 100.0),
            bar(50.0, 100.0),
            bar(120.0, 50.0),
            bar(60.0, 10.0),
        ]);
        assert_eq!(result.rows, vec![0, 1, 0, 2]);
    }

    #[test]
    fn fetch_order_is_preserved_even_when_it_costs_rows() {
        // Sorted by start these fit in two rows; in fetch order they need three.
        let fetched = [bar(0.0, 20.0), bar(60.0, 20.0), bar(50.0, 20.0), bar(10.0, 45.0)];
        let result = stack(&fetched);
        assert_eq!(result.rows, vec![0, 0, 1, 2]);
        assert_eq!(result.max_rows, 3);

        let sorted = [bar(0.0, 20.0), bar(10.0, 45.0), bar(50.0, 20.0), bar(60.0, 20.0)];
        assert_eq!(stack(&sorted).max_rows, 2);
    }

    #[test]
    fn same_row_bars_are_disjoint() {
        let bars: Vec<BarGeometry> = (0..40)
            .map(|i| bar(((i * 37) % 300) as f32, (20 + (i * 13) % 90) as f32))
            .collect();
        let result = stack(&bars);
        for (i, a) in bars.iter().enumerate() {
            for (j, b) in bars.iter().enumerate().skip(i + 1) {
                if result.rows[i] == result.rows[j] {
                    assert!(!(a.left < b.right() && b.left < a.right()), "{i} and {j} collide");
                }
            }
        }
        assert_eq!(result.max_rows, result.rows.iter().max().unwrap() + 1);
    }

    #[test]
    fn empty_lane_has_one_row() {
        assert_eq!(stack(&[]).max_rows, 1);
    }
}
