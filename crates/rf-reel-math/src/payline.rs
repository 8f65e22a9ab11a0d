//! Payline definitions

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One (reel, row) cell on a payline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaylineCoord {
    pub reel_index: usize,
    pub offset: usize,
}

impl PaylineCoord {
    /// Create a new coordinate
    pub fn new(reel_index: usize, offset: usize) -> Self {
        Self { reel_index, offset }
    }
}

impl From<(usize, usize)> for PaylineCoord {
    fn from((reel_index, offset): (usize, usize)) -> Self {
        Self::new(reel_index, offset)
    }
}

/// An ordered path of cells checked for a win, leftmost reel first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    pub coords: Vec<PaylineCoord>,
}

impl Payline {
    /// Create a payline from coordinates, visited in order
    pub fn new(coords: Vec<PaylineCoord>) -> Self {
        Self { coords }
    }

    /// Create a line from one row per reel (e.g., `[0, 1, 2, 1, 0]` for a "V")
    pub fn from_rows(rows: &[usize]) -> Self {
        Self {
            coords: rows
                .iter()
                .enumerate()
                .map(|(reel, &row)| PaylineCoord::new(reel, row))
                .collect(),
        }
    }

    /// Create a straight line (same row across all reels)
    pub fn straight(row: usize, reel_count: usize) -> Self {
        Self::from_rows(&vec![row; reel_count])
    }

    /// Builder: append a coordinate
    pub fn with_coord(mut self, reel_index: usize, offset: usize) -> Self {
        self.coords.push(PaylineCoord::new(reel_index, offset));
        self
    }

    /// Number of coordinates
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Check every coordinate fits a window with the given per-reel heights
    pub fn check_bounds(&self, heights: &[usize]) -> Result<(), ConfigError> {
        for coord in &self.coords {
            let in_bounds = heights
                .get(coord.reel_index)
                .is_some_and(|&height| coord.offset < height);
            if !in_bounds {
                return Err(ConfigError::CoordinateOutOfBounds {
                    reel: coord.reel_index,
                    offset: coord.offset,
                });
            }
        }
        Ok(())
    }
}

/// Ordered paylines; position in the group is the payline number in results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaylineGroup {
    pub paylines: Vec<Payline>,
}

impl PaylineGroup {
    /// Create a new payline group
    pub fn new(paylines: Vec<Payline>) -> Self {
        Self { paylines }
    }

    /// One straight line per row, top row first
    pub fn straight_lines(rows: usize, reel_count: usize) -> Self {
        Self::new((0..rows).map(|row| Payline::straight(row, reel_count)).collect())
    }

    /// Build from row patterns, one pattern per payline
    pub fn from_row_patterns(patterns: &[&[usize]]) -> Self {
        Self::new(patterns.iter().map(|rows| Payline::from_rows(rows)).collect())
    }

    /// Builder: append a payline
    pub fn with_payline(mut self, payline: Payline) -> Self {
        self.paylines.push(payline);
        self
    }

    /// Number of paylines
    pub fn len(&self) -> usize {
        self.paylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paylines.is_empty()
    }

    /// Iterate paylines in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Payline> {
        self.paylines.iter()
    }

    /// Check every payline against the given per-reel heights
    pub fn check_bounds(&self, heights: &[usize]) -> Result<(), ConfigError> {
        self.paylines
            .iter()
            .try_for_each(|line| line.check_bounds(heights))
    }
}

impl<'a> IntoIterator for &'a PaylineGroup {
    type Item = &'a Payline;
    type IntoIter = std::slice::Iter<'a, Payline>;

    fn into_iter(self) -> Self::IntoIter {
        self.paylines.iter()
    }
}
