//! Win evaluation: payline runs and scatter counts

use serde::{Deserialize, Serialize};

use crate::comparer::SymbolComparer;
use crate::error::{EvaluationError, MathResult};
use crate::paycombo::PayComboGroup;
use crate::payline::PaylineGroup;
use crate::symbols::Symbol;
use crate::window::{ReelWindow, SymbolPosition};

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRecord {
    /// Payline index within its group
    pub payline_index: usize,
    /// Anchor symbol of the run
    pub symbol: Symbol,
    /// Length of the leftmost run
    pub matched_count: usize,
    /// Count of the pay combo that paid (<= matched_count)
    pub combo_count: usize,
    /// Payout in credits
    pub payout: f64,
    /// Cells of the run (reel, row)
    pub positions: Vec<SymbolPosition>,
    /// Cells in the run that were filled by a wild
    pub wild_positions: Vec<SymbolPosition>,
}

/// A scatter win
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterWinRecord {
    /// Scatter symbol
    pub symbol: Symbol,
    /// Occurrences anywhere in the window
    pub count: usize,
    /// Count of the pay combo that paid (<= count)
    pub combo_count: usize,
    /// Payout in credits
    pub payout: f64,
    /// Cells showing the scatter
    pub positions: Vec<SymbolPosition>,
}

/// Result of evaluating a window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Line wins, in payline order
    pub line_wins: Vec<WinRecord>,
    /// Scatter wins, in scatter symbol order
    pub scatter_wins: Vec<ScatterWinRecord>,
    /// Sum of all payouts
    pub total_payout: f64,
}

impl EvaluationResult {
    fn new(line_wins: Vec<WinRecord>, scatter_wins: Vec<ScatterWinRecord>) -> Self {
        let line_total: f64 = line_wins.iter().map(|w| w.payout).sum();
        let scatter_total: f64 = scatter_wins.iter().map(|w| w.payout).sum();
        Self {
            line_wins,
            scatter_wins,
            total_payout: line_total + scatter_total,
        }
    }

    /// Check if this is a winning spin
    pub fn is_win(&self) -> bool {
        !self.line_wins.is_empty() || !self.scatter_wins.is_empty()
    }

    /// Get win count
    pub fn win_count(&self) -> usize {
        self.line_wins.len() + self.scatter_wins.len()
    }
}

/// Leftmost run on a payline: `(anchor index, run length)`.
///
/// The anchor is the first non-wild symbol, or the first symbol when the
/// whole line is wild. The run extends from reel 0 while each symbol
/// matches the anchor under `comparer`.
pub fn leftmost_run(symbols: &[&Symbol], comparer: &dyn SymbolComparer) -> Option<(usize, usize)> {
    let anchor_index = symbols
        .iter()
        .position(|s| !comparer.is_wild(s))
        .unwrap_or(0);
    let anchor = symbols.get(anchor_index)?;
    let run = symbols
        .iter()
        .take_while(|s| comparer.matches(anchor, s))
        .count();
    Some((anchor_index, run))
}

/// Evaluate every payline of `paylines` against `combos`.
///
/// Only leftmost-aligned contiguous runs pay, and each payline produces at
/// most one record.
pub fn evaluate_paylines(
    window: &ReelWindow,
    paylines: &PaylineGroup,
    combos: &PayComboGroup,
) -> MathResult<Vec<WinRecord>> {
    let comparer = combos.comparer();
    let mut wins = Vec::new();

    for (payline_index, payline) in paylines.iter().enumerate() {
        let symbols = window.extract_payline(payline)?;
        let (anchor_index, run) = leftmost_run(&symbols, comparer)
            .ok_or(EvaluationError::EmptyPayline {
                payline: payline_index,
            })?;
        let anchor = symbols[anchor_index];

        let Some(combo) = combos.lookup(anchor, run) else {
            log::trace!(
                "[Evaluator] line {} anchor {} run {}: no pay",
                payline_index,
                anchor,
                run
            );
            continue;
        };

        let mut positions = Vec::with_capacity(run);
        let mut wild_positions = Vec::new();
        for (coord, symbol) in payline.coords.iter().zip(&symbols).take(run) {
            let position = SymbolPosition::new(coord.reel_index, coord.offset);
            if comparer.is_wild(symbol) && !comparer.equals(symbol, anchor) {
                wild_positions.push(position);
            }
            positions.push(position);
        }

        log::trace!(
            "[Evaluator] line {} anchor {} run {} pays {} ({}oak)",
            payline_index,
            anchor,
            run,
            combo.payout,
            combo.count
        );

        wins.push(WinRecord {
            payline_index,
            symbol: anchor.clone(),
            matched_count: run,
            combo_count: combo.count,
            payout: combo.payout,
            positions,
            wild_positions,
        });
    }

    Ok(wins)
}

/// Evaluate scatter pays: each symbol keyed in `scatter_combos` is counted
/// across the whole window, ignoring paylines.
///
/// A cell counts toward a scatter when the group's comparer gives it the
/// same key, so every symbol grouped under one key pays together.
pub fn evaluate_scatters(window: &ReelWindow, scatter_combos: &PayComboGroup) -> Vec<ScatterWinRecord> {
    let comparer = scatter_combos.comparer();
    scatter_combos
        .symbols()
        .filter_map(|symbol| {
            let key = comparer.key(symbol);
            let mut positions: Vec<SymbolPosition> = window
                .positions()
                .iter()
                .filter(|(shown, _)| comparer.key(shown) == key)
                .flat_map(|(_, cells)| cells.iter().copied())
                .collect();
            positions.sort_unstable();

            let combo = scatter_combos.lookup(symbol, positions.len())?;
            Some(ScatterWinRecord {
                symbol: symbol.clone(),
                count: positions.len(),
                combo_count: combo.count,
                payout: combo.payout,
                positions,
            })
        })
        .collect()
}

/// Evaluates windows against one paytable's paylines and combo groups
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    paylines: &'a PaylineGroup,
    combos: &'a PayComboGroup,
    scatter_combos: &'a PayComboGroup,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over one paytable's groups
    pub fn new(
        paylines: &'a PaylineGroup,
        combos: &'a PayComboGroup,
        scatter_combos: &'a PayComboGroup,
    ) -> Self {
        Self {
            paylines,
            combos,
            scatter_combos,
        }
    }

    /// Evaluate line and scatter wins
    pub fn evaluate(&self, window: &ReelWindow) -> MathResult<EvaluationResult> {
        let line_wins = evaluate_paylines(window, self.paylines, self.combos)?;
        let scatter_wins = evaluate_scatters(window, self.scatter_combos);
        let result = EvaluationResult::new(line_wins, scatter_wins);

        log::debug!(
            "[Evaluator] {} line wins, {} scatter wins, total {}",
            result.line_wins.len(),
            result.scatter_wins.len(),
            result.total_payout
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::{ById, WildComparer};
    use crate::error::{ConfigError, MathError};
    use crate::payline::Payline;
    use crate::symbols::{Reel, ReelGroup, ReelStrip};
    use std::sync::Arc;

    const WILD: u32 = 9;
    const SCATTER: u32 = 12;

    fn sym(id: u32) -> Symbol {
        let name = match id {
            WILD => "WILD".to_string(),
            SCATTER => "SCATTER".to_string(),
            _ => format!("S{id}"),
        };
        Symbol::new(id, name)
    }

    /// One-row window showing exactly `ids`
    fn row_window(ids: &[u32]) -> ReelWindow {
        let reels = ids
            .iter()
            .map(|&id| Reel::new(1, ReelStrip::new(vec![sym(id)])))
            .collect();
        ReelWindow::build(&ReelGroup::new(reels), &vec![0; ids.len()]).unwrap()
    }

    fn wild_combos() -> PayComboGroup {
        let mut group = PayComboGroup::new(Arc::new(WildComparer::new([WILD]).excluding([SCATTER])));
        group.add(crate::PayCombo::new(sym(1), 3, 20.0)).unwrap();
        group.add(crate::PayCombo::new(sym(1), 5, 200.0)).unwrap();
        group.add(crate::PayCombo::new(sym(WILD), 3, 50.0)).unwrap();
        group
    }

    fn top_line(reels: usize) -> PaylineGroup {
        PaylineGroup::straight_lines(1, reels)
    }

    #[test]
    fn test_leftmost_run() {
        let ids = [sym(WILD), sym(1), sym(WILD), sym(2), sym(1)];
        let refs: Vec<&Symbol> = ids.iter().collect();
        let cmp = WildComparer::new([WILD]);
        assert_eq!(leftmost_run(&refs, &cmp), Some((1, 3)));
        assert_eq!(leftmost_run(&refs, &ById), Some((0, 1)));
        assert_eq!(leftmost_run(&[], &ById), None);
    }

    #[test]
    fn test_wild_extends_run() {
        let window = row_window(&[1, WILD, 1, WILD, 3]);
        let wins = evaluate_paylines(&window, &top_line(5), &wild_combos()).unwrap();
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].symbol.id, 1);
        assert_eq!(wins[0].matched_count, 4);
        assert_eq!(wins[0].combo_count, 3);
        assert_eq!(wins[0].payout, 20.0);
        assert_eq!(
            wins[0].wild_positions,
            vec![SymbolPosition::new(1, 0), SymbolPosition::new(3, 0)]
        );
    }

    #[test]
    fn test_leading_wilds_take_anchor() {
        let window = row_window(&[WILD, WILD, 1, 1, 1]);
        let wins = evaluate_paylines(&window, &top_line(5), &wild_combos()).unwrap();
        assert_eq!(wins[0].symbol.id, 1);
        assert_eq!(wins[0].payout, 200.0);
    }

    #[test]
    fn test_all_wild_line() {
        let window = row_window(&[WILD, WILD, WILD]);
        let wins = evaluate_paylines(&window, &top_line(3), &wild_combos()).unwrap();
        assert_eq!(wins[0].symbol.id, WILD);
        assert_eq!(wins[0].payout, 50.0);
        assert!(wins[0].wild_positions.is_empty());
    }

    #[test]
    fn test_wild_does_not_substitute_excluded() {
        let mut combos = wild_combos();
        combos.add(crate::PayCombo::new(sym(SCATTER), 2, 5.0)).unwrap();
        let window = row_window(&[WILD, SCATTER, SCATTER]);
        let wins = evaluate_paylines(&window, &top_line(3), &combos).unwrap();
        assert!(wins.is_empty());
    }

    #[test]
    fn test_non_contiguous_does_not_pay() {
        let window = row_window(&[1, 2, 1, 1, 1]);
        let wins = evaluate_paylines(&window, &top_line(5), &wild_combos()).unwrap();
        assert!(wins.is_empty());
    }

    #[test]
    fn test_empty_payline_is_error() {
        let window = row_window(&[1, 1, 1]);
        let lines = PaylineGroup::new(vec![Payline::default()]);
        let result = evaluate_paylines(&window, &lines, &wild_combos());
        assert!(matches!(
            result,
            Err(MathError::Evaluation(EvaluationError::EmptyPayline { payline: 0 }))
        ));
    }

    #[test]
    fn test_out_of_bounds_payline_is_error() {
        let window = row_window(&[1, 1, 1]);
        let lines = PaylineGroup::new(vec![Payline::straight(1, 3)]);
        let result = evaluate_paylines(&window, &lines, &wild_combos());
        assert!(matches!(
            result,
            Err(MathError::Config(ConfigError::CoordinateOutOfBounds { reel: 0, offset: 1 }))
        ));
    }

    #[test]
    fn test_scatter_counts_whole_window() {
        let window = row_window(&[SCATTER, 1, SCATTER, 2, SCATTER]);
        let scatters = PayComboGroup::by_id()
            .with_combo(sym(SCATTER), 3, 5.0)
            .unwrap()
            .with_combo(sym(SCATTER), 4, 20.0)
            .unwrap();
        let wins = evaluate_scatters(&window, &scatters);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].count, 3);
        assert_eq!(wins[0].payout, 5.0);
        assert_eq!(wins[0].positions.len(), 3);

        let none = evaluate_scatters(&row_window(&[SCATTER, 1, 1]), &scatters);
        assert!(none.is_empty());
    }

    /// Groups a second scatter id under the main scatter's key
    #[derive(Debug)]
    struct ScatterFamily;

    impl SymbolComparer for ScatterFamily {
        fn key(&self, symbol: &Symbol) -> crate::SymbolId {
            if symbol.id == SCATTER + 1 { SCATTER } else { symbol.id }
        }
    }

    #[test]
    fn test_scatter_count_uses_comparer_key() {
        let window = row_window(&[SCATTER, SCATTER + 1, SCATTER]);
        let mut scatters = PayComboGroup::new(Arc::new(ScatterFamily));
        scatters.add(crate::PayCombo::new(sym(SCATTER), 3, 5.0)).unwrap();

        let wins = evaluate_scatters(&window, &scatters);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].count, 3);
        assert_eq!(wins[0].payout, 5.0);
        assert_eq!(
            wins[0].positions,
            vec![
                SymbolPosition::new(0, 0),
                SymbolPosition::new(1, 0),
                SymbolPosition::new(2, 0)
            ]
        );

        let by_id = PayComboGroup::by_id().with_combo(sym(SCATTER), 3, 5.0).unwrap();
        assert!(evaluate_scatters(&window, &by_id).is_empty());
    }

    #[test]
    fn test_wilds_before_excluded_symbol_do_not_pay() {
        let mut combos = wild_combos();
        combos.add(crate::PayCombo::new(sym(WILD), 4, 150.0)).unwrap();
        let window = row_window(&[WILD, WILD, WILD, WILD, SCATTER]);
        let wins = evaluate_paylines(&window, &top_line(5), &combos).unwrap();
        assert!(wins.is_empty());
    }

    #[test]
    fn test_evaluator_totals() {
        let window = row_window(&[1, 1, 1, SCATTER, SCATTER]);
        let lines = top_line(5);
        let combos = wild_combos();
        let scatters = PayComboGroup::by_id().with_combo(sym(SCATTER), 2, 2.0).unwrap();
        let result = Evaluator::new(&lines, &combos, &scatters)
            .evaluate(&window)
            .unwrap();
        assert!(result.is_win());
        assert_eq!(result.win_count(), 2);
        assert_eq!(result.total_payout, 22.0);
    }
}
