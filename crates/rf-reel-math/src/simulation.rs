//! Batch spin simulation
//!
//! Spin `i` draws its stops from stream `i` of a seeded ChaCha generator,
//! so a report depends only on (paytable, reel set, seed, spins) and not on
//! thread count or scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::MathResult;
use crate::paytable::{Paytable, ReelSet};
use crate::rng::RngStops;
use crate::spin::spin;

/// Aggregate statistics over a batch of spins
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub spins: u64,
    /// Spins with at least one win
    pub hits: u64,
    /// Spins with at least one scatter win
    pub scatter_hits: u64,
    pub line_payout: f64,
    pub scatter_payout: f64,
    /// One credit per payline per spin
    pub coin_in: f64,
    pub max_spin_payout: f64,
}

impl SimulationReport {
    /// Total payout
    pub fn total_payout(&self) -> f64 {
        self.line_payout + self.scatter_payout
    }

    /// Return to player as a fraction of coin-in
    pub fn rtp(&self) -> f64 {
        if self.coin_in > 0.0 {
            self.total_payout() / self.coin_in
        } else {
            0.0
        }
    }

    /// Fraction of spins that won
    pub fn hit_rate(&self) -> f64 {
        if self.spins > 0 {
            self.hits as f64 / self.spins as f64
        } else {
            0.0
        }
    }
}

/// Per-spin summary kept for in-order aggregation
struct SpinTally {
    line: f64,
    scatter: f64,
    hit: bool,
    scatter_hit: bool,
}

/// Run `spins` seeded spins in parallel and aggregate them in spin order
pub fn simulate(
    paytable: &Paytable,
    reel_set: ReelSet,
    seed: u64,
    spins: u64,
) -> MathResult<SimulationReport> {
    let tallies = (0..spins)
        .into_par_iter()
        .map(|index| -> MathResult<SpinTally> {
            let outcome = spin(paytable, reel_set, &mut RngStops::seeded_stream(seed, index))?;
            Ok(SpinTally {
                line: outcome.line_wins.iter().map(|w| w.payout).sum(),
                scatter: outcome.scatter_wins.iter().map(|w| w.payout).sum(),
                hit: outcome.is_win(),
                scatter_hit: !outcome.scatter_wins.is_empty(),
            })
        })
        .collect::<MathResult<Vec<_>>>()?;

    let mut report = SimulationReport {
        seed,
        spins,
        coin_in: spins as f64 * paytable.paylines().len() as f64,
        ..Default::default()
    };
    for tally in &tallies {
        report.line_payout += tally.line;
        report.scatter_payout += tally.scatter;
        report.hits += u64::from(tally.hit);
        report.scatter_hits += u64::from(tally.scatter_hit);
        report.max_spin_payout = report.max_spin_payout.max(tally.line + tally.scatter);
    }

    log::info!(
        "[Simulation] {} spins (seed {}): rtp {:.4}, hit rate {:.4}",
        spins,
        seed,
        report.rtp(),
        report.hit_rate()
    );

    Ok(report)
}
