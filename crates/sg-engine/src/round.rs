//! Round Orchestrator and round result

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::evaluator::{AppliedCombinations, evaluate};
use crate::matrix::{Grid, generate_grid};
use crate::reward::{calculate_reward, find_bonus_symbol};
use crate::rng::RandomSource;
use crate::rules::RulesModel;

/// Outcome of a single round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    /// Symbol names, one `Vec` per row
    pub matrix: Vec<Vec<String>>,
    /// Final reward
    pub reward: f64,
    /// symbol -> combination identifiers; absent when nothing won
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_winning_combinations: Option<IndexMap<String, Vec<String>>>,
    /// Bonus symbol present on the grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_bonus_symbol: Option<String>,
}

impl RoundResult {
    /// Assemble the result from a finished round
    pub fn new(rules: &RulesModel, grid: &Grid, reward: f64, applied: &AppliedCombinations) -> Self {
        let symbols = rules.symbols();

        let names: IndexMap<String, Vec<String>> = applied
            .iter()
            .filter(|(_, combinations)| !combinations.is_empty())
            .map(|(symbol, combinations)| (symbols.name(symbol).to_string(), combinations.names()))
            .collect();

        Self {
            matrix: grid.to_names(symbols),
            reward,
            applied_winning_combinations: (!names.is_empty()).then_some(names),
            applied_bonus_symbol: find_bonus_symbol(rules, grid).map(|id| symbols.name(id).to_string()),
        }
    }

    /// Check if this round paid anything
    pub fn is_win(&self) -> bool {
        self.reward > 0.0
    }

    /// Serialize to pretty JSON
    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to single-line JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Play one round: generate, evaluate, calculate, assemble
///
/// Stateless; `rules` can be shared by any number of rounds as long as each
/// brings its own random source.
///
/// # Errors
///
/// None in practice: every configuration error is raised by
/// [`RulesModel::prepare`], so a round over prepared rules always returns
/// `Ok`.
pub fn play_round<R: RandomSource + ?Sized>(
    rules: &RulesModel,
    betting_amount: u64,
    rng: &mut R,
) -> ConfigResult<RoundResult> {
    let grid = generate_grid(rules, rng);
    Ok(evaluate_round(rules, &grid, betting_amount))
}

/// Evaluate an already generated grid
pub fn evaluate_round(rules: &RulesModel, grid: &Grid, betting_amount: u64) -> RoundResult {
    let applied = evaluate(rules, grid);
    let reward = calculate_reward(rules, grid, betting_amount, &applied);

    log::debug!(
        "Round settled: bet {}, base {}, reward {}, {} winning symbols",
        betting_amount,
        reward.base,
        reward.total,
        applied.len()
    );

    RoundResult::new(rules, grid, reward.total, &applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::rng::ScriptedSource;
    use serde_json::json;

    fn rules() -> RulesModel {
        let json = r#"{
            "columns": 2,
            "rows": 2,
            "symbols": {
                "A": { "reward_multiplier": 5, "type": "standard" },
                "B": { "reward_multiplier": 3, "type": "standard" },
                "10x": { "reward_multiplier": 10, "type": "bonus", "impact": "multiply_reward" },
                "MISS": { "type": "bonus", "impact": "miss" }
            },
            "probabilities": {
                "standard_symbols": [
                    { "column": 0, "row": 0, "symbols": { "A": 1, "B": 1 } },
                    { "column": 1, "row": 0, "symbols": { "A": 1, "B": 1 } },
                    { "column": 0, "row": 1, "symbols": { "A": 1, "B": 1 } },
                    { "column": 1, "row": 1, "symbols": { "A": 1, "B": 1 } }
                ],
                "bonus_symbols": { "symbols": { "10x": 1, "MISS": 1 } }
            },
            "win_combinations": {
                "same_symbol_3_times": { "reward_multiplier": 1, "when": "same_symbols", "count": 3, "group": "same_symbols" }
            }
        }"#;
        RulesModel::prepare(&GameConfig::from_json_str(json).unwrap()).unwrap()
    }

    #[test]
    fn test_winning_round() {
        let rules = rules();
        // A A / A B, bonus 10x at (1, 1): A x3 -> 10 × 5 × 1 × 10
        let mut rng = ScriptedSource::new([0, 0, 0, 1, 1, 1, 0]);
        let result = play_round(&rules, 10, &mut rng).unwrap();

        assert_eq!(result.matrix, vec![vec!["A", "A"], vec!["A", "10x"]]);
        assert_eq!(result.reward, 500.0);
        assert!(result.is_win());

        let applied = result.applied_winning_combinations.as_ref().unwrap();
        assert_eq!(applied["A"], vec!["same_symbol_3_times"]);
        assert_eq!(result.applied_bonus_symbol.as_deref(), Some("10x"));
    }

    #[test]
    fn test_losing_round_omits_combinations() {
        let rules = rules();
        // A B / B A, MISS at (0, 0)
        let mut rng = ScriptedSource::new([0, 1, 1, 0, 0, 0, 1]);
        let result = play_round(&rules, 10, &mut rng).unwrap();

        assert_eq!(result.reward, 0.0);
        assert!(result.applied_winning_combinations.is_none());

        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "matrix": [["MISS", "B"], ["B", "A"]],
                "reward": 0.0,
                "appliedBonusSymbol": "MISS"
            })
        );
    }

    #[test]
    fn test_result_json_round_trip() {
        let rules = rules();
        let mut rng = ScriptedSource::new([0, 0, 0, 1, 1, 1, 0]);
        let result = play_round(&rules, 10, &mut rng).unwrap();

        let parsed: RoundResult = serde_json::from_str(&result.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, result);
    }
}
