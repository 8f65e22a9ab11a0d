//! Pay combos: (symbol, matched count) → payout

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::comparer::{ById, SymbolComparer};
use crate::error::ConfigError;
use crate::symbols::{Symbol, SymbolId};

/// A single pay entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayCombo {
    /// Paying symbol
    pub symbol: Symbol,
    /// Matched count (>= 1)
    pub count: usize,
    /// Payout in credits
    pub payout: f64,
}

impl PayCombo {
    /// Create a new pay combo
    pub fn new(symbol: Symbol, count: usize, payout: f64) -> Self {
        Self {
            symbol,
            count,
            payout,
        }
    }
}

/// Pay combos keyed by (symbol, count) under a comparer.
///
/// The comparer that keys this group is the one payline matching uses,
/// so a lookup never disagrees with the run that produced it.
#[derive(Debug, Clone)]
pub struct PayComboGroup {
    comparer: Arc<dyn SymbolComparer>,
    /// comparer key → count → combo
    combos: BTreeMap<SymbolId, BTreeMap<usize, PayCombo>>,
}

impl PayComboGroup {
    /// Create an empty group using `comparer` for keys and matching
    pub fn new(comparer: Arc<dyn SymbolComparer>) -> Self {
        Self {
            comparer,
            combos: BTreeMap::new(),
        }
    }

    /// Create an empty group comparing by symbol id
    pub fn by_id() -> Self {
        Self::new(Arc::new(ById))
    }

    /// The comparer this group is keyed by
    pub fn comparer(&self) -> &dyn SymbolComparer {
        self.comparer.as_ref()
    }

    /// Shared handle to the comparer
    pub fn comparer_arc(&self) -> Arc<dyn SymbolComparer> {
        Arc::clone(&self.comparer)
    }

    /// Add a combo. Duplicate (symbol, count) keys are rejected.
    pub fn add(&mut self, combo: PayCombo) -> Result<(), ConfigError> {
        if combo.count == 0 {
            return Err(ConfigError::InvalidCount(combo.symbol.id));
        }
        if !combo.payout.is_finite() || combo.payout < 0.0 {
            return Err(ConfigError::InvalidPayout {
                symbol: combo.symbol.id,
                payout: combo.payout,
            });
        }

        let key = self.comparer.key(&combo.symbol);
        let by_count = self.combos.entry(key).or_default();
        if by_count.contains_key(&combo.count) {
            return Err(ConfigError::DuplicatePayCombo {
                symbol: key,
                count: combo.count,
            });
        }
        by_count.insert(combo.count, combo);
        Ok(())
    }

    /// Builder form of [`add`](Self::add)
    pub fn with_combo(mut self, symbol: Symbol, count: usize, payout: f64) -> Result<Self, ConfigError> {
        self.add(PayCombo::new(symbol, count, payout))?;
        Ok(self)
    }

    /// Exact (symbol, count) entry
    pub fn get(&self, symbol: &Symbol, count: usize) -> Option<&PayCombo> {
        self.combos
            .get(&self.comparer.key(symbol))
            .and_then(|by_count| by_count.get(&count))
    }

    /// Highest paying threshold for `symbol` whose count does not exceed
    /// `matched`. Entries with a zero payout never qualify.
    pub fn lookup(&self, symbol: &Symbol, matched: usize) -> Option<&PayCombo> {
        self.combos
            .get(&self.comparer.key(symbol))?
            .range(..=matched)
            .rev()
            .map(|(_, combo)| combo)
            .find(|combo| combo.payout > 0.0)
    }

    /// One representative symbol per key, in key order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.combos
            .values()
            .filter_map(|by_count| by_count.values().next())
            .map(|combo| &combo.symbol)
    }

    /// All combos, ordered by key then count
    pub fn iter(&self) -> impl Iterator<Item = &PayCombo> {
        self.combos.values().flat_map(|by_count| by_count.values())
    }

    /// Number of combos
    pub fn len(&self) -> usize {
        self.combos.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }
}

impl Default for PayComboGroup {
    fn default() -> Self {
        Self::by_id()
    }
}
