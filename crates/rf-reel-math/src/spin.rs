//! Spin orchestration: stops → window → wins

use serde::{Deserialize, Serialize};

use crate::error::MathResult;
use crate::evaluator::{EvaluationResult, ScatterWinRecord, WinRecord};
use crate::paytable::{Paytable, ReelSet};
use crate::rng::{StopProvider, draw_stops};
use crate::symbols::{Symbol, SymbolId};
use crate::window::{ReelWindow, grid_ids};

/// Complete outcome of one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Reel set the spin used
    pub reel_set: ReelSet,
    /// Stops as drawn, before modulo reduction
    pub stops: Vec<usize>,
    /// Final grid (reels × rows)
    pub grid: Vec<Vec<Symbol>>,
    /// Line wins
    pub line_wins: Vec<WinRecord>,
    /// Scatter wins
    pub scatter_wins: Vec<ScatterWinRecord>,
    /// Total payout in credits
    pub total_payout: f64,
}

impl SpinOutcome {
    fn new(reel_set: ReelSet, stops: Vec<usize>, window: ReelWindow, eval: EvaluationResult) -> Self {
        Self {
            reel_set,
            stops,
            grid: window.into_grid(),
            line_wins: eval.line_wins,
            scatter_wins: eval.scatter_wins,
            total_payout: eval.total_payout,
        }
    }

    /// Check if this is a winning spin
    pub fn is_win(&self) -> bool {
        !self.line_wins.is_empty() || !self.scatter_wins.is_empty()
    }

    /// Grid as symbol ids
    pub fn grid_ids(&self) -> Vec<Vec<SymbolId>> {
        grid_ids(&self.grid)
    }
}

/// Spin once: draw one stop per reel from `provider`, then evaluate
pub fn spin(
    paytable: &Paytable,
    reel_set: ReelSet,
    provider: &mut impl StopProvider,
) -> MathResult<SpinOutcome> {
    let stops = draw_stops(paytable.reels(reel_set), provider);
    replay(paytable, reel_set, &stops)
}

/// Rebuild the outcome for recorded stops
pub fn replay(paytable: &Paytable, reel_set: ReelSet, stops: &[usize]) -> MathResult<SpinOutcome> {
    let window = ReelWindow::build(paytable.reels(reel_set), stops)?;
    let eval = paytable.evaluator().evaluate(&window)?;
    Ok(SpinOutcome::new(reel_set, stops.to_vec(), window, eval))
}
