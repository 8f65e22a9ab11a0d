//! Symbol definitions, reel strips and reel groups

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Symbol identifier
pub type SymbolId = u32;

/// A reel symbol.
///
/// Equality and hashing use `id` only; `name` is descriptive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    /// Unique symbol ID
    pub id: SymbolId,
    /// Symbol name (e.g., "AA", "WILD", "SCATTER")
    pub name: String,
}

impl Symbol {
    /// Create a symbol
    pub fn new(id: SymbolId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

/// A cyclic reel strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelStrip {
    /// Symbols in strip order
    pub symbols: Vec<Symbol>,
}

impl ReelStrip {
    /// Create a new reel strip
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Get symbol at position (wraps around)
    pub fn symbol_at(&self, position: usize) -> Option<&Symbol> {
        if self.symbols.is_empty() {
            return None;
        }
        self.symbols.get(position % self.symbols.len())
    }

    /// Get total strip length
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<Symbol> for ReelStrip {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A reel: a strip plus the number of visible rows.
///
/// `height` may exceed the strip length; the visible rows then wrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reel {
    /// Visible rows
    pub height: usize,
    /// Symbol strip
    pub strip: ReelStrip,
}

impl Reel {
    /// Create a new reel showing `height` rows of `strip`
    pub fn new(height: usize, strip: ReelStrip) -> Self {
        Self { height, strip }
    }

    /// Check this reel's invariants, reporting failures against `reel_index`
    pub fn validate(&self, reel_index: usize) -> Result<(), ConfigError> {
        if self.height == 0 {
            return Err(ConfigError::InvalidHeight {
                reel: reel_index,
                height: self.height,
            });
        }
        if self.strip.is_empty() {
            return Err(ConfigError::EmptyStrip { reel: reel_index });
        }
        Ok(())
    }
}

/// Ordered reels, one per physical reel position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelGroup {
    pub reels: Vec<Reel>,
}

impl ReelGroup {
    /// Create a new reel group
    pub fn new(reels: Vec<Reel>) -> Self {
        Self { reels }
    }

    /// Builder: append a reel
    pub fn with_reel(mut self, reel: Reel) -> Self {
        self.reels.push(reel);
        self
    }

    /// Number of reels
    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    /// Visible height of each reel, in reel order
    pub fn heights(&self) -> Vec<usize> {
        self.reels.iter().map(|r| r.height).collect()
    }

    /// Check every reel and that at least one exists
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reels.is_empty() {
            return Err(ConfigError::EmptyReelGroup);
        }
        for (index, reel) in self.reels.iter().enumerate() {
            reel.validate(index)?;
        }
        Ok(())
    }
}
