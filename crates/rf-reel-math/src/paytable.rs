//! Paytable: the complete, immutable math configuration of a game

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::evaluator::Evaluator;
use crate::paycombo::PayComboGroup;
use crate::payline::PaylineGroup;
use crate::symbols::ReelGroup;

/// Which reel group a spin uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReelSet {
    #[default]
    Base,
    FreeGames,
}

/// Complete paytable.
///
/// Built once through [`PaytableBuilder`] and read-only afterwards. A
/// configuration change means building a new paytable and swapping it in
/// through a [`PaytableHandle`].
#[derive(Debug, Clone)]
pub struct Paytable {
    base_reels: ReelGroup,
    free_games_reels: ReelGroup,
    paylines: PaylineGroup,
    pay_combos: PayComboGroup,
    scatter_combos: PayComboGroup,
    /// Trigger configuration for the bonus layer (opaque here)
    triggers: serde_json::Value,
    /// Pick table configuration for the bonus layer (opaque here)
    pick_tables: serde_json::Value,
}

impl Paytable {
    /// Start building a paytable
    pub fn builder() -> PaytableBuilder {
        PaytableBuilder::new()
    }

    /// Reel group for a reel set
    pub fn reels(&self, set: ReelSet) -> &ReelGroup {
        match set {
            ReelSet::Base => &self.base_reels,
            ReelSet::FreeGames => &self.free_games_reels,
        }
    }

    /// Base game reels
    pub fn base_reels(&self) -> &ReelGroup {
        &self.base_reels
    }

    /// Free games reels (the base reels when none were configured)
    pub fn free_games_reels(&self) -> &ReelGroup {
        &self.free_games_reels
    }

    /// Get paylines
    pub fn paylines(&self) -> &PaylineGroup {
        &self.paylines
    }

    /// Line pay combos
    pub fn pay_combos(&self) -> &PayComboGroup {
        &self.pay_combos
    }

    /// Scatter pay combos
    pub fn scatter_combos(&self) -> &PayComboGroup {
        &self.scatter_combos
    }

    /// Feature trigger configuration, passed through unchanged
    pub fn triggers(&self) -> &serde_json::Value {
        &self.triggers
    }

    /// Pick table configuration, passed through unchanged
    pub fn pick_tables(&self) -> &serde_json::Value {
        &self.pick_tables
    }

    /// Evaluator over this paytable's paylines and combo groups
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.paylines, &self.pay_combos, &self.scatter_combos)
    }
}

/// Builder for [`Paytable`]
#[derive(Debug, Clone, Default)]
pub struct PaytableBuilder {
    base_reels: Option<ReelGroup>,
    free_games_reels: Option<ReelGroup>,
    paylines: PaylineGroup,
    pay_combos: PayComboGroup,
    scatter_combos: PayComboGroup,
    triggers: serde_json::Value,
    pick_tables: serde_json::Value,
}

impl PaytableBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base game reels
    pub fn base_reels(mut self, reels: ReelGroup) -> Self {
        self.base_reels = Some(reels);
        self
    }

    /// Free games reels; defaults to the base reels when unset
    pub fn free_games_reels(mut self, reels: ReelGroup) -> Self {
        self.free_games_reels = Some(reels);
        self
    }

    /// Set paylines
    pub fn paylines(mut self, paylines: PaylineGroup) -> Self {
        self.paylines = paylines;
        self
    }

    /// Set line pay combos
    pub fn pay_combos(mut self, combos: PayComboGroup) -> Self {
        self.pay_combos = combos;
        self
    }

    /// Set scatter pay combos
    pub fn scatter_combos(mut self, combos: PayComboGroup) -> Self {
        self.scatter_combos = combos;
        self
    }

    /// Set trigger configuration
    pub fn triggers(mut self, triggers: serde_json::Value) -> Self {
        self.triggers = triggers;
        self
    }

    /// Set pick table configuration
    pub fn pick_tables(mut self, pick_tables: serde_json::Value) -> Self {
        self.pick_tables = pick_tables;
        self
    }

    /// Validate and freeze.
    ///
    /// Checks both reel groups and that every payline fits each of them.
    pub fn build(self) -> Result<Paytable, ConfigError> {
        let base_reels = self.base_reels.ok_or(ConfigError::MissingField("base_reels"))?;
        let free_games_reels = self.free_games_reels.unwrap_or_else(|| base_reels.clone());

        for reels in [&base_reels, &free_games_reels] {
            reels.validate()?;
            self.paylines.check_bounds(&reels.heights())?;
        }

        Ok(Paytable {
            base_reels,
            free_games_reels,
            paylines: self.paylines,
            pay_combos: self.pay_combos,
            scatter_combos: self.scatter_combos,
            triggers: self.triggers,
            pick_tables: self.pick_tables,
        })
    }
}

/// Shared, swappable paytable.
///
/// Each spin takes a [`snapshot`](Self::snapshot) and evaluates against
/// it; [`replace`](Self::replace) installs a new paytable without
/// disturbing spins already holding the old one.
#[derive(Debug)]
pub struct PaytableHandle {
    current: RwLock<Arc<Paytable>>,
}

impl PaytableHandle {
    /// Create a handle serving `paytable`
    pub fn new(paytable: Paytable) -> Self {
        Self {
            current: RwLock::new(Arc::new(paytable)),
        }
    }

    /// The paytable in effect right now
    pub fn snapshot(&self) -> Arc<Paytable> {
        Arc::clone(&self.current.read())
    }

    /// Swap in a new paytable, returning the previous one
    pub fn replace(&self, paytable: Paytable) -> Arc<Paytable> {
        let previous = std::mem::replace(&mut *self.current.write(), Arc::new(paytable));
        log::info!("[Paytable] configuration replaced");
        previous
    }
}
