//! Paytable documents: load a paytable from JSON or YAML
//!
//! ```rust,ignore
//! let loader = PaytableLoader::new();
//! let paytable = loader.from_path("games/classic.yaml")?;
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::comparer::{ById, SymbolComparer, WildComparer};
use crate::error::ConfigError;
use crate::paycombo::{PayCombo, PayComboGroup};
use crate::payline::{Payline, PaylineCoord, PaylineGroup};
use crate::paytable::Paytable;
use crate::symbols::{Reel, ReelGroup, ReelStrip, Symbol, SymbolId};

/// On-disk paytable schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaytableDocument {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Symbol definitions
    pub symbols: Vec<Symbol>,
    /// Base game reels
    pub base_reels: Vec<ReelDef>,
    /// Free games reels (base reels when absent)
    #[serde(default)]
    pub free_games_reels: Option<Vec<ReelDef>>,
    /// Paylines as `[reel, offset]` pairs
    #[serde(default)]
    pub paylines: Vec<Vec<(usize, usize)>>,
    /// Line pays
    #[serde(default)]
    pub pay_combos: Vec<ComboDef>,
    /// Scatter pays
    #[serde(default)]
    pub scatter_combos: Vec<ComboDef>,
    /// Wild substitution rules
    #[serde(default)]
    pub wilds: Option<WildsDef>,
    /// Bonus trigger configuration, passed through untouched
    #[serde(default)]
    pub triggers: serde_json::Value,
    /// Pick table configuration, passed through untouched
    #[serde(default)]
    pub pick_tables: serde_json::Value,
}

/// A reel in a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelDef {
    pub height: usize,
    /// Symbol IDs in strip order
    pub strip: Vec<SymbolId>,
}

/// A pay combo in a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboDef {
    pub symbol: SymbolId,
    pub count: usize,
    pub payout: f64,
}

/// Wild rules in a document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WildsDef {
    /// Wild symbol IDs
    pub symbols: Vec<SymbolId>,
    /// Symbol IDs wilds never replace
    #[serde(default)]
    pub excluded: Vec<SymbolId>,
}

/// Document size limits
#[derive(Debug, Clone)]
pub struct LoadLimits {
    pub max_symbols: usize,
    pub max_reels: usize,
    pub max_height: usize,
    pub max_strip_length: usize,
    pub max_paylines: usize,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_symbols: 100,
            max_reels: 10,
            max_height: 10,
            max_strip_length: 1_000,
            max_paylines: 100,
        }
    }
}

/// Paytable loader
#[derive(Debug, Clone, Default)]
pub struct PaytableLoader {
    /// Validation limits
    pub limits: LoadLimits,
}

impl PaytableLoader {
    /// Create a loader with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create loader with custom limits
    pub fn with_limits(limits: LoadLimits) -> Self {
        Self { limits }
    }

    /// Parse a JSON document
    pub fn from_json_str(&self, json: &str) -> Result<Paytable, ConfigError> {
        let doc: PaytableDocument =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        self.load(doc)
    }

    /// Parse a YAML document
    pub fn from_yaml_str(&self, yaml: &str) -> Result<Paytable, ConfigError> {
        let doc: PaytableDocument =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        self.load(doc)
    }

    /// Read a document from disk; `.yaml`/`.yml` are YAML, anything else JSON
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Paytable, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        log::debug!("[PaytableLoader] reading {}", path.display());
        if is_yaml {
            self.from_yaml_str(&text)
        } else {
            self.from_json_str(&text)
        }
    }

    /// Validate a document and build its paytable
    pub fn load(&self, doc: PaytableDocument) -> Result<Paytable, ConfigError> {
        self.validate(&doc)?;

        let symbols = SymbolTable::new(&doc.symbols);

        let base_reels = symbols.reel_group(&doc.base_reels)?;
        let mut builder = Paytable::builder().base_reels(base_reels);
        if let Some(free) = &doc.free_games_reels {
            builder = builder.free_games_reels(symbols.reel_group(free)?);
        }

        let comparer: Arc<dyn SymbolComparer> = match &doc.wilds {
            Some(wilds) => {
                for &id in wilds.symbols.iter().chain(&wilds.excluded) {
                    symbols.get(id)?;
                }
                Arc::new(
                    WildComparer::new(wilds.symbols.iter().copied())
                        .excluding(wilds.excluded.iter().copied()),
                )
            }
            None => Arc::new(ById),
        };

        let pay_combos = symbols.combo_group(&doc.pay_combos, comparer)?;
        let scatter_combos = symbols.combo_group(&doc.scatter_combos, Arc::new(ById))?;

        let paylines = PaylineGroup::new(
            doc.paylines
                .iter()
                .map(|coords| Payline::new(coords.iter().copied().map(PaylineCoord::from).collect()))
                .collect(),
        );

        let paytable = builder
            .paylines(paylines)
            .pay_combos(pay_combos)
            .scatter_combos(scatter_combos)
            .triggers(doc.triggers)
            .pick_tables(doc.pick_tables)
            .build()?;

        log::info!(
            "[PaytableLoader] loaded '{}': {} reels, {} paylines, {} pay combos, {} scatter combos",
            doc.name.as_deref().unwrap_or("unnamed"),
            paytable.base_reels().reel_count(),
            paytable.paylines().len(),
            paytable.pay_combos().len(),
            paytable.scatter_combos().len()
        );

        Ok(paytable)
    }

    /// Check document sizes against the limits
    pub fn validate(&self, doc: &PaytableDocument) -> Result<(), ConfigError> {
        let limits = &self.limits;

        if doc.symbols.len() > limits.max_symbols {
            return Err(ConfigError::Limit(format!(
                "Too many symbols: {} > {}",
                doc.symbols.len(),
                limits.max_symbols
            )));
        }

        if doc.paylines.len() > limits.max_paylines {
            return Err(ConfigError::Limit(format!(
                "Too many paylines: {} > {}",
                doc.paylines.len(),
                limits.max_paylines
            )));
        }

        let reel_sets = std::iter::once(&doc.base_reels).chain(doc.free_games_reels.as_ref());
        for reels in reel_sets {
            if reels.len() > limits.max_reels {
                return Err(ConfigError::Limit(format!(
                    "Too many reels: {} > {}",
                    reels.len(),
                    limits.max_reels
                )));
            }
            for (index, reel) in reels.iter().enumerate() {
                if reel.height > limits.max_height {
                    return Err(ConfigError::Limit(format!(
                        "Reel {} too tall: {} > {}",
                        index, reel.height, limits.max_height
                    )));
                }
                if reel.strip.len() > limits.max_strip_length {
                    return Err(ConfigError::Limit(format!(
                        "Reel {} strip too long: {} > {}",
                        index,
                        reel.strip.len(),
                        limits.max_strip_length
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Symbol lookup by id while converting a document
struct SymbolTable<'a> {
    by_id: HashMap<SymbolId, &'a Symbol>,
}

impl<'a> SymbolTable<'a> {
    fn new(symbols: &'a [Symbol]) -> Self {
        Self {
            by_id: symbols.iter().map(|s| (s.id, s)).collect(),
        }
    }

    fn get(&self, id: SymbolId) -> Result<&'a Symbol, ConfigError> {
        self.by_id
            .get(&id)
            .copied()
            .ok_or(ConfigError::UnknownSymbol(id))
    }

    fn reel_group(&self, reels: &[ReelDef]) -> Result<ReelGroup, ConfigError> {
        reels
            .iter()
            .map(|reel| {
                let strip = reel
                    .strip
                    .iter()
                    .map(|&id| self.get(id).cloned())
                    .collect::<Result<ReelStrip, _>>()?;
                Ok(Reel::new(reel.height, strip))
            })
            .collect::<Result<Vec<_>, ConfigError>>()
            .map(ReelGroup::new)
    }

    fn combo_group(
        &self,
        combos: &[ComboDef],
        comparer: Arc<dyn SymbolComparer>,
    ) -> Result<PayComboGroup, ConfigError> {
        let mut group = PayComboGroup::new(comparer);
        for combo in combos {
            let symbol = self.get(combo.symbol)?.clone();
            group.add(PayCombo::new(symbol, combo.count, combo.payout))?;
        }
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::ReelSet;

    const JSON: &str = r#"{
        "name": "Three Line Classic",
        "symbols": [
            {"id": 0, "name": "AA"},
            {"id": 1, "name": "BB"},
            {"id": 9, "name": "WILD"},
            {"id": 12, "name": "SCATTER"}
        ],
        "base_reels": [
            {"height": 3, "strip": [0, 1, 9, 12, 0]},
            {"height": 3, "strip": [1, 0, 9, 12]},
            {"height": 3, "strip": [0, 12, 1, 9]}
        ],
        "paylines": [
            [[0, 0], [1, 0], [2, 0]],
            [[0, 1], [1, 1], [2, 1]]
        ],
        "pay_combos": [
            {"symbol": 0, "count": 3, "payout": 100},
            {"symbol": 1, "count": 3, "payout": 50}
        ],
        "scatter_combos": [
            {"symbol": 12, "count": 3, "payout": 5}
        ],
        "wilds": {"symbols": [9], "excluded": [12]},
        "triggers": [{"symbol": 12, "count": 3, "feature": "free_games"}]
    }"#;

    #[test]
    fn test_load_json() {
        let paytable = PaytableLoader::new().from_json_str(JSON).unwrap();
        assert_eq!(paytable.base_reels().reel_count(), 3);
        assert_eq!(paytable.reels(ReelSet::FreeGames).reel_count(), 3);
        assert_eq!(paytable.paylines().len(), 2);
        assert_eq!(paytable.pay_combos().len(), 2);
        assert!(paytable.pay_combos().comparer().is_wild(&Symbol::new(9, "WILD")));
        assert!(paytable.triggers().is_array());
        assert!(paytable.pick_tables().is_null());
    }

    #[test]
    fn test_document_reemits_as_yaml() {
        let doc: PaytableDocument = serde_json::from_str(JSON).unwrap();
        let yaml = serde_yml::to_string(&doc).unwrap();
        let from_yaml = PaytableLoader::new().from_yaml_str(&yaml).unwrap();
        let from_json = PaytableLoader::new().from_json_str(JSON).unwrap();
        assert_eq!(from_yaml.base_reels(), from_json.base_reels());
        assert_eq!(from_yaml.paylines(), from_json.paylines());
        assert_eq!(
            from_yaml.pay_combos().iter().collect::<Vec<_>>(),
            from_json.pay_combos().iter().collect::<Vec<_>>()
        );
        assert_eq!(from_yaml.triggers(), from_json.triggers());
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r#"
symbols:
  - { id: 0, name: AA }
  - { id: 1, name: BB }
base_reels:
  - { height: 1, strip: [0, 1] }
  - { height: 1, strip: [0, 1] }
paylines:
  - [[0, 0], [1, 0]]
pay_combos:
  - { symbol: 0, count: 2, payout: 10 }
"#;
        let paytable = PaytableLoader::new().from_yaml_str(yaml).unwrap();
        assert_eq!(paytable.paylines().len(), 1);
        assert!(!paytable.pay_combos().comparer().is_wild(&Symbol::new(0, "AA")));
    }

    #[test]
    fn test_unknown_symbol() {
        let json = JSON.replace("[0, 12, 1, 9]", "[0, 12, 1, 42]");
        assert!(matches!(
            PaytableLoader::new().from_json_str(&json),
            Err(ConfigError::UnknownSymbol(42))
        ));
    }

    #[test]
    fn test_limits() {
        let loader = PaytableLoader::with_limits(LoadLimits {
            max_reels: 2,
            ..Default::default()
        });
        assert!(matches!(loader.from_json_str(JSON), Err(ConfigError::Limit(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            PaytableLoader::new().from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_payline_bounds_checked_on_load() {
        let json = JSON.replace("[[0, 1], [1, 1], [2, 1]]", "[[0, 1], [1, 3], [2, 1]]");
        assert!(matches!(
            PaytableLoader::new().from_json_str(&json),
            Err(ConfigError::CoordinateOutOfBounds { reel: 1, offset: 3 })
        ));
    }
}
