//! Symbol definitions and the symbol table

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::SymbolConfig;
use crate::error::{ConfigError, ConfigResult};

/// Effect a bonus symbol has on a winning round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BonusImpact {
    /// No effect ("miss")
    None,
    /// Multiply the reward by this factor
    MultiplyReward(f64),
    /// Add this flat amount to the reward
    ExtraBonus(f64),
}

impl BonusImpact {
    /// Apply the effect to a running reward
    pub fn apply(self, reward: f64) -> f64 {
        match self {
            BonusImpact::None => reward,
            BonusImpact::MultiplyReward(factor) => reward * factor,
            BonusImpact::ExtraBonus(extra) => reward + extra,
        }
    }
}

/// Symbol classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SymbolKind {
    /// Regular paying symbol, counted by win combinations
    Standard,
    /// Placed once per grid, modifies the final reward
    Bonus(BonusImpact),
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol identifier (e.g., "A", "10x", "MISS")
    pub name: String,
    /// Multiplier applied to the bet for standard symbols
    pub reward_multiplier: f64,
    /// Symbol type
    pub kind: SymbolKind,
}

impl Symbol {
    /// Create a standard symbol
    pub fn standard(name: impl Into<String>, reward_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            reward_multiplier,
            kind: SymbolKind::Standard,
        }
    }

    /// Create a bonus symbol
    pub fn bonus(name: impl Into<String>, impact: BonusImpact) -> Self {
        let reward_multiplier = match impact {
            BonusImpact::MultiplyReward(factor) => factor,
            _ => 0.0,
        };
        Self {
            name: name.into(),
            reward_multiplier,
            kind: SymbolKind::Bonus(impact),
        }
    }

    /// Build a symbol from its rules-document entry
    pub fn from_config(name: &str, config: &SymbolConfig) -> ConfigResult<Self> {
        match config.symbol_type.as_str() {
            "standard" => Ok(Self::standard(name, config.reward_multiplier)),
            "bonus" => Ok(Self::bonus(name, parse_impact(name, config)?)),
            other => Err(ConfigError::UnknownSymbolType {
                symbol: name.to_string(),
                kind: other.to_string(),
            }),
        }
    }

    pub fn is_standard(&self) -> bool {
        self.kind == SymbolKind::Standard
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self.kind, SymbolKind::Bonus(_))
    }

    /// Bonus effect, if this is a bonus symbol
    pub fn impact(&self) -> Option<BonusImpact> {
        match self.kind {
            SymbolKind::Bonus(impact) => Some(impact),
            SymbolKind::Standard => None,
        }
    }
}

fn parse_impact(name: &str, config: &SymbolConfig) -> ConfigResult<BonusImpact> {
    match config.impact.as_deref() {
        Some("multiply_reward") => Ok(BonusImpact::MultiplyReward(config.reward_multiplier)),
        Some("extra_bonus") => config
            .extra
            .map(BonusImpact::ExtraBonus)
            .ok_or_else(|| ConfigError::MissingExtra(name.to_string())),
        Some("miss") | None => Ok(BonusImpact::None),
        Some(other) => {
            log::warn!("Bonus symbol '{}' has unknown impact '{}', treating it as a miss", name, other);
            Ok(BonusImpact::None)
        }
    }
}

/// Index of a symbol within its [`SymbolTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub usize);

/// Symbol table in declared order
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from the rules document
    pub fn from_config(config: &IndexMap<String, SymbolConfig>) -> ConfigResult<Self> {
        let mut table = Self::new();
        for (name, entry) in config {
            table.insert(Symbol::from_config(name, entry)?);
        }
        Ok(table)
    }

    /// Add a symbol, replacing any existing one with the same name
    pub fn insert(&mut self, symbol: Symbol) -> SymbolId {
        let (index, _) = self.symbols.insert_full(symbol.name.clone(), symbol);
        SymbolId(index)
    }

    /// Look up a symbol ID by name
    pub fn id_of(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get_index_of(name).map(SymbolId)
    }

    /// Get a symbol by ID
    ///
    /// IDs are only handed out by this table, so a miss means the ID came
    /// from a different table.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get_index(id.0).map(|(_, symbol)| symbol)
    }

    /// Get a symbol by name
    pub fn by_name(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Symbol name for an ID (empty string for a foreign ID)
    pub fn name(&self, id: SymbolId) -> &str {
        self.get(id).map(|s| s.name.as_str()).unwrap_or("")
    }

    pub fn is_standard(&self, id: SymbolId) -> bool {
        self.get(id).is_some_and(Symbol::is_standard)
    }

    pub fn is_bonus(&self, id: SymbolId) -> bool {
        self.get(id).is_some_and(Symbol::is_bonus)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over all symbols with their IDs
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .values()
            .enumerate()
            .map(|(index, symbol)| (SymbolId(index), symbol))
    }
}
