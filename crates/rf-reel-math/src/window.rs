//! Reel window: the visible symbol grid for one spin
//!
//! A window is built from a reel group and one stop per reel. The stop is
//! the strip index shown in the top row; each row below shows the next
//! strip entry, wrapping past the end of the strip:
//!
//! ```text
//! stops [1, 14, 23], strips of length 7, height 3
//!
//!        reel 0   reel 1   reel 2
//! row 0  [ 1]     [ 0]     [ 2]
//! row 1  [ 2]     [ 1]     [ 3]
//! row 2  [ 3]     [ 2]     [ 4]      (strip indices)
//! ```
//!
//! Windows are built fresh for every spin and never mutated afterwards.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::payline::Payline;
use crate::symbols::{ReelGroup, Symbol, SymbolId};

/// A (reel, row) cell in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolPosition {
    pub reel_index: usize,
    pub offset: usize,
}

impl SymbolPosition {
    /// Create a new position
    pub fn new(reel_index: usize, offset: usize) -> Self {
        Self { reel_index, offset }
    }
}

/// The visible grid plus an index of where each symbol landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelWindow {
    /// `grid[reel][offset]`
    grid: Vec<Vec<Symbol>>,
    /// Symbol → cells, in first-appearance order (reel-major)
    positions: IndexMap<Symbol, Vec<SymbolPosition>>,
}

impl ReelWindow {
    /// Build the window for `stops`, one per reel.
    ///
    /// Stops may be any value; each is reduced modulo its strip length.
    pub fn build(reel_group: &ReelGroup, stops: &[usize]) -> Result<Self, ConfigError> {
        if stops.len() != reel_group.reel_count() {
            return Err(ConfigError::StopCountMismatch {
                expected: reel_group.reel_count(),
                actual: stops.len(),
            });
        }
        reel_group.validate()?;

        let mut grid = Vec::with_capacity(reel_group.reel_count());
        let mut positions: IndexMap<Symbol, Vec<SymbolPosition>> = IndexMap::new();

        for (reel_index, (reel, &stop)) in reel_group.reels.iter().zip(stops).enumerate() {
            let strip_len = reel.strip.len();
            let start = stop % strip_len;
            let mut column = Vec::with_capacity(reel.height);

            for offset in 0..reel.height {
                let strip_index = (start + offset) % strip_len;
                let symbol = reel.strip.symbols[strip_index].clone();
                positions
                    .entry(symbol.clone())
                    .or_default()
                    .push(SymbolPosition::new(reel_index, offset));
                column.push(symbol);
            }
            grid.push(column);
        }

        log::debug!(
            "[ReelWindow] built {} reels from stops {:?}, {} distinct symbols",
            grid.len(),
            stops,
            positions.len()
        );

        Ok(Self { grid, positions })
    }

    /// The grid, `grid[reel][offset]`
    pub fn grid(&self) -> &[Vec<Symbol>] {
        &self.grid
    }

    /// Number of reels
    pub fn reel_count(&self) -> usize {
        self.grid.len()
    }

    /// Visible height of each reel
    pub fn heights(&self) -> Vec<usize> {
        self.grid.iter().map(Vec::len).collect()
    }

    /// Symbol at a cell
    pub fn symbol_at(&self, reel_index: usize, offset: usize) -> Option<&Symbol> {
        self.grid.get(reel_index)?.get(offset)
    }

    /// Every cell showing `symbol`, reel-major order
    pub fn positions_of(&self, symbol: &Symbol) -> &[SymbolPosition] {
        self.positions.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of cells showing `symbol`
    pub fn count(&self, symbol: &Symbol) -> usize {
        self.positions_of(symbol).len()
    }

    /// The full position index
    pub fn positions(&self) -> &IndexMap<Symbol, Vec<SymbolPosition>> {
        &self.positions
    }

    /// Symbols on a payline, in coordinate order.
    ///
    /// A coordinate outside the grid means the payline group does not fit
    /// the reel group; it is reported, never clamped.
    pub fn extract_payline(&self, payline: &Payline) -> Result<Vec<&Symbol>, ConfigError> {
        payline
            .coords
            .iter()
            .map(|coord| {
                self.symbol_at(coord.reel_index, coord.offset).ok_or(
                    ConfigError::CoordinateOutOfBounds {
                        reel: coord.reel_index,
                        offset: coord.offset,
                    },
                )
            })
            .collect()
    }

    /// Grid as symbol ids
    pub fn to_ids(&self) -> Vec<Vec<SymbolId>> {
        grid_ids(&self.grid)
    }

    /// Take the grid, dropping the index
    pub fn into_grid(self) -> Vec<Vec<Symbol>> {
        self.grid
    }
}

/// A symbol grid as ids, `ids[reel][offset]`
pub fn grid_ids(grid: &[Vec<Symbol>]) -> Vec<Vec<SymbolId>> {
    grid.iter()
        .map(|column| column.iter().map(|s| s.id).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{Reel, ReelStrip};

    fn strip(ids: &[u32]) -> ReelStrip {
        ids.iter().map(|&id| Symbol::new(id, format!("S{id}"))).collect()
    }

    #[test]
    fn test_wraparound() {
        let group = ReelGroup::new(vec![Reel::new(2, strip(&[0, 1, 2, 3, 4]))]);
        let window = ReelWindow::build(&group, &[4]).unwrap();
        assert_eq!(window.to_ids(), vec![vec![4, 0]]);
    }

    #[test]
    fn test_height_exceeds_strip() {
        let group = ReelGroup::new(vec![Reel::new(5, strip(&[7, 8]))]);
        let window = ReelWindow::build(&group, &[1]).unwrap();
        assert_eq!(window.to_ids(), vec![vec![8, 7, 8, 7, 8]]);
        assert_eq!(window.count(&Symbol::new(8, "")), 3);
    }

    #[test]
    fn test_build_errors() {
        let group = ReelGroup::new(vec![
            Reel::new(3, strip(&[0, 1, 2])),
            Reel::new(3, strip(&[0, 1, 2])),
        ]);
        assert!(matches!(
            ReelWindow::build(&group, &[0]),
            Err(ConfigError::StopCountMismatch { expected: 2, actual: 1 })
        ));

        let empty = ReelGroup::new(vec![Reel::new(3, strip(&[]))]);
        assert!(matches!(
            ReelWindow::build(&empty, &[0]),
            Err(ConfigError::EmptyStrip { reel: 0 })
        ));

        let flat = ReelGroup::new(vec![Reel::new(0, strip(&[1]))]);
        assert!(matches!(
            ReelWindow::build(&flat, &[0]),
            Err(ConfigError::InvalidHeight { reel: 0, height: 0 })
        ));
    }

    #[test]
    fn test_huge_stop_does_not_overflow() {
        let group = ReelGroup::new(vec![Reel::new(3, strip(&[0, 1, 2, 3, 4, 5, 6]))]);
        let window = ReelWindow::build(&group, &[usize::MAX]).unwrap();
        let start = (usize::MAX % 7) as u32;
        assert_eq!(window.to_ids()[0][0], start);
    }

    #[test]
    fn test_extract_out_of_bounds() {
        let group = ReelGroup::new(vec![Reel::new(2, strip(&[0, 1, 2]))]);
        let window = ReelWindow::build(&group, &[0]).unwrap();
        let line = Payline::from_rows(&[2]);
        assert!(matches!(
            window.extract_payline(&line),
            Err(ConfigError::CoordinateOutOfBounds { reel: 0, offset: 2 })
        ));
        let past_last_reel = Payline::from_rows(&[0, 0]);
        assert!(window.extract_payline(&past_last_reel).is_err());
    }
}
