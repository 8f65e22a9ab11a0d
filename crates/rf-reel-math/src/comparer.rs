//! Symbol equality used for pay combo keys and run matching
//!
//! Plain lookups compare symbols by id. Run matching additionally lets wild
//! symbols stand in for the anchor symbol of a payline. Both notions live on
//! the same [`SymbolComparer`] so a pay combo group and the matcher that
//! queries it always agree.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbols::{Symbol, SymbolId};

/// Pluggable symbol equality
pub trait SymbolComparer: fmt::Debug + Send + Sync {
    /// Key a symbol is grouped under in pay combo tables
    fn key(&self, symbol: &Symbol) -> SymbolId {
        symbol.id
    }

    /// Plain equality under this comparer
    fn equals(&self, a: &Symbol, b: &Symbol) -> bool {
        self.key(a) == self.key(b)
    }

    /// Is `symbol` a wild under this comparer?
    fn is_wild(&self, _symbol: &Symbol) -> bool {
        false
    }

    /// Can `wild` stand in for `target` during run matching?
    fn substitutes(&self, wild: &Symbol, _target: &Symbol) -> bool {
        self.is_wild(wild)
    }

    /// Does `candidate` continue a run anchored on `anchor`?
    fn matches(&self, anchor: &Symbol, candidate: &Symbol) -> bool {
        self.equals(anchor, candidate) || self.substitutes(candidate, anchor)
    }
}

/// Equality by symbol id, no wilds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ById;

impl SymbolComparer for ById {}

/// Id equality plus wild substitution.
///
/// Every symbol in `wilds` substitutes for any symbol not listed in
/// `excluded` (usually scatters and bonus symbols).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildComparer {
    /// Wild symbol IDs
    pub wilds: BTreeSet<SymbolId>,
    /// Symbol IDs wilds never replace
    #[serde(default)]
    pub excluded: BTreeSet<SymbolId>,
}

impl WildComparer {
    /// Create a comparer with the given wild symbols
    pub fn new(wilds: impl IntoIterator<Item = SymbolId>) -> Self {
        Self {
            wilds: wilds.into_iter().collect(),
            excluded: BTreeSet::new(),
        }
    }

    /// Builder: symbols the wilds may not replace
    pub fn excluding(mut self, ids: impl IntoIterator<Item = SymbolId>) -> Self {
        self.excluded.extend(ids);
        self
    }
}

impl SymbolComparer for WildComparer {
    fn is_wild(&self, symbol: &Symbol) -> bool {
        self.wilds.contains(&symbol.id)
    }

    fn substitutes(&self, wild: &Symbol, target: &Symbol) -> bool {
        self.is_wild(wild) && !self.excluded.contains(&target.id)
    }
}
