//! Rules document: raw game configuration as loaded from disk
//!
//! These types mirror the JSON/YAML rules document one-to-one and carry no
//! validation of their own. [`crate::rules::RulesModel::prepare`] turns a
//! `GameConfig` into the checked, immutable model used during play.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = GameConfig::load("demos/config.json")?;
//! let rules = RulesModel::prepare(&config)?;
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;

/// Complete rules document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of grid columns
    pub columns: i64,
    /// Number of grid rows
    pub rows: i64,
    /// Symbol table, keyed by symbol identifier
    pub symbols: IndexMap<String, SymbolConfig>,
    /// Cell and bonus probability tables
    pub probabilities: ProbabilityConfig,
    /// Win combinations, keyed by combination identifier
    #[serde(default)]
    pub win_combinations: IndexMap<String, WinCombinationConfig>,
}

/// Symbol entry in the rules document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolConfig {
    #[serde(default)]
    pub reward_multiplier: f64,
    /// "standard" or "bonus"
    #[serde(rename = "type")]
    pub symbol_type: String,
    /// Bonus effect: "multiply_reward", "extra_bonus", "miss"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    /// Flat amount added by an "extra_bonus" symbol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<f64>,
}

/// Probability tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityConfig {
    /// One weight table per standard cell
    pub standard_symbols: Vec<CellProbabilityConfig>,
    /// Weight table for the single bonus cell
    pub bonus_symbols: BonusProbabilityConfig,
}

/// Weight table for a single grid cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellProbabilityConfig {
    pub column: i64,
    pub row: i64,
    /// symbol -> weight, in declared order
    pub symbols: IndexMap<String, i64>,
}

/// Weight table for bonus symbols
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusProbabilityConfig {
    pub symbols: IndexMap<String, i64>,
}

/// Win combination entry in the rules document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinCombinationConfig {
    pub reward_multiplier: f64,
    /// "same_symbols" or "linear_symbols"
    pub when: String,
    /// Required occurrences (same_symbols only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    pub group: String,
    /// Cell lists in "row:column" form (linear_symbols only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_areas: Option<Vec<Vec<String>>>,
}

impl GameConfig {
    /// Parse a JSON rules document
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a YAML rules document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Load a rules document from disk
    ///
    /// `.yaml` / `.yml` files are parsed as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        log::debug!("Loading rules document {} ({})", path.display(), if is_yaml { "yaml" } else { "json" });

        if is_yaml {
            Self::from_yaml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
    }
}
