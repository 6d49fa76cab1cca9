//! Win Evaluator: matches a grid against the win combinations
//!
//! Two passes feed one accumulator:
//! - same-symbol: count each standard symbol, record its best qualifying tier
//! - linear: record a combination when one of its areas holds a single
//!   standard symbol
//!
//! A symbol never collects two combinations from the same group; the first
//! one recorded wins.

use indexmap::IndexMap;

use crate::matrix::Grid;
use crate::rules::{RulesModel, WinCombination};
use crate::symbols::SymbolId;

/// Combinations applied to one symbol, at most one per group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolCombinations<'a> {
    combinations: Vec<&'a WinCombination>,
}

impl<'a> SymbolCombinations<'a> {
    /// Record a combination unless one from the same group is already held
    ///
    /// Returns `true` if the combination was recorded.
    pub fn insert(&mut self, combination: &'a WinCombination) -> bool {
        if self.combinations.iter().any(|c| c.group == combination.group) {
            return false;
        }
        self.combinations.push(combination);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a WinCombination> + '_ {
        self.combinations.iter().copied()
    }

    /// Product of all combination multipliers (1.0 when empty)
    pub fn multiplier(&self) -> f64 {
        self.combinations.iter().map(|c| c.reward_multiplier).product()
    }

    /// Combination identifiers in insertion order
    pub fn names(&self) -> Vec<String> {
        self.combinations.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

/// Combinations applied per symbol for one round
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedCombinations<'a> {
    by_symbol: IndexMap<SymbolId, SymbolCombinations<'a>>,
}

impl<'a> AppliedCombinations<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `combination` for `symbol` under the first-per-group rule
    pub fn insert(&mut self, symbol: SymbolId, combination: &'a WinCombination) -> bool {
        self.by_symbol.entry(symbol).or_default().insert(combination)
    }

    pub fn get(&self, symbol: SymbolId) -> Option<&SymbolCombinations<'a>> {
        self.by_symbol.get(&symbol)
    }

    /// Symbols with their combinations, in the order they first won
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &SymbolCombinations<'a>)> {
        self.by_symbol.iter().map(|(&symbol, combinations)| (symbol, combinations))
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }
}

/// Evaluate a completed grid
pub fn evaluate<'a>(rules: &'a RulesModel, grid: &Grid) -> AppliedCombinations<'a> {
    let mut applied = AppliedCombinations::new();
    apply_same_symbol_combinations(rules, grid, &mut applied);
    apply_linear_combinations(rules, grid, &mut applied);
    applied
}

fn apply_same_symbol_combinations<'a>(rules: &'a RulesModel, grid: &Grid, applied: &mut AppliedCombinations<'a>) {
    let symbols = rules.symbols();
    let mut counts = vec![0usize; symbols.len()];

    for symbol in grid.symbols() {
        if symbols.is_standard(symbol) {
            if let Some(count) = counts.get_mut(symbol.0) {
                *count += 1;
            }
        }
    }

    for (index, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        if let Some(combination) = rules.best_same_symbol_combination(count) {
            let symbol = SymbolId(index);
            log::debug!(
                "Symbol '{}' x{} matches '{}'",
                symbols.name(symbol),
                count,
                combination.name
            );
            applied.insert(symbol, combination);
        }
    }
}

fn apply_linear_combinations<'a>(rules: &'a RulesModel, grid: &Grid, applied: &mut AppliedCombinations<'a>) {
    let symbols = rules.symbols();

    for combination in rules.linear_combinations() {
        for area in combination.covered_areas() {
            let mut cells = area.iter().map(|&cell| grid.get(cell));
            let Some(Some(first)) = cells.next() else {
                continue;
            };
            if !cells.all(|symbol| symbol == Some(first)) || !symbols.is_standard(first) {
                continue;
            }

            if applied.insert(first, combination) {
                log::debug!("Symbol '{}' matches '{}'", symbols.name(first), combination.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, WinCombinationConfig};

    fn config() -> GameConfig {
        let json = r#"{
            "columns": 3,
            "rows": 3,
            "symbols": {
                "A": { "reward_multiplier": 5, "type": "standard" },
                "B": { "reward_multiplier": 3, "type": "standard" },
                "C": { "reward_multiplier": 2.5, "type": "standard" },
                "10x": { "reward_multiplier": 10, "type": "bonus", "impact": "multiply_reward" }
            },
            "probabilities": {
                "standard_symbols": [
                    { "column": 0, "row": 0, "symbols": { "A": 1 } },
                    { "column": 1, "row": 0, "symbols": { "A": 1 } },
                    { "column": 2, "row": 0, "symbols": { "A": 1 } },
                    { "column": 0, "row": 1, "symbols": { "A": 1 } },
                    { "column": 1, "row": 1, "symbols": { "A": 1 } },
                    { "column": 2, "row": 1, "symbols": { "A": 1 } },
                    { "column": 0, "row": 2, "symbols": { "A": 1 } },
                    { "column": 1, "row": 2, "symbols": { "A": 1 } },
                    { "column": 2, "row": 2, "symbols": { "A": 1 } }
                ],
                "bonus_symbols": { "symbols": { "10x": 1 } }
            },
            "win_combinations": {
                "same_symbol_3_times": { "reward_multiplier": 1, "when": "same_symbols", "count": 3, "group": "same_symbols" },
                "same_symbol_4_times": { "reward_multiplier": 1.5, "when": "same_symbols", "count": 4, "group": "same_symbols" },
                "same_symbols_horizontally": {
                    "reward_multiplier": 2, "when": "linear_symbols", "group": "horizontally_linear_symbols",
                    "covered_areas": [["0:0", "0:1", "0:2"], ["1:0", "1:1", "1:2"], ["2:0", "2:1", "2:2"]]
                },
                "same_symbols_vertically": {
                    "reward_multiplier": 2, "when": "linear_symbols", "group": "vertically_linear_symbols",
                    "covered_areas": [["0:0", "1:0", "2:0"], ["0:1", "1:1", "2:1"], ["0:2", "1:2", "2:2"]]
                },
                "same_symbols_diagonally_left_to_right": {
                    "reward_multiplier": 5, "when": "linear_symbols", "group": "ltr_diagonally_linear_symbols",
                    "covered_areas": [["0:0", "1:1", "2:2"]]
                }
            }
        }"#;
        GameConfig::from_json_str(json).unwrap()
    }

    fn rules() -> RulesModel {
        RulesModel::prepare(&config()).unwrap()
    }

    fn grid(rules: &RulesModel, names: [[&str; 3]; 3]) -> Grid {
        let rows = names
            .iter()
            .map(|row| row.iter().map(|name| rules.symbols().id_of(name).unwrap()).collect())
            .collect();
        Grid::from_rows(rows).unwrap()
    }

    fn names_for(applied: &AppliedCombinations, rules: &RulesModel, symbol: &str) -> Vec<String> {
        let id = rules.symbols().id_of(symbol).unwrap();
        applied.get(id).map(SymbolCombinations::names).unwrap_or_default()
    }

    #[test]
    fn test_same_symbol_picks_highest_tier() {
        let rules = rules();
        let grid = grid(&rules, [["A", "B", "C"], ["A", "C", "B"], ["B", "A", "A"]]);
        let applied = evaluate(&rules, &grid);

        assert_eq!(names_for(&applied, &rules, "A"), vec!["same_symbol_4_times"]);
        assert_eq!(names_for(&applied, &rules, "B"), vec!["same_symbol_3_times"]);
        assert!(names_for(&applied, &rules, "C").is_empty());
        assert_eq!(applied.len(), 2);
    }

    #[test]
    fn test_linear_group_counted_once() {
        let rules = rules();
        // Two full rows of B: the horizontal group applies once
        let grid = grid(&rules, [["B", "B", "B"], ["A", "C", "10x"], ["B", "B", "B"]]);
        let applied = evaluate(&rules, &grid);

        assert_eq!(
            names_for(&applied, &rules, "B"),
            vec!["same_symbol_4_times", "same_symbols_horizontally"]
        );
    }

    #[test]
    fn test_multiple_groups_stack() {
        let rules = rules();
        let grid = grid(&rules, [["A", "A", "A"], ["A", "A", "B"], ["A", "C", "A"]]);
        let applied = evaluate(&rules, &grid);

        assert_eq!(
            names_for(&applied, &rules, "A"),
            vec![
                "same_symbol_4_times",
                "same_symbols_horizontally",
                "same_symbols_vertically",
                "same_symbols_diagonally_left_to_right",
            ]
        );
        let a = rules.symbols().id_of("A").unwrap();
        assert_eq!(applied.get(a).unwrap().multiplier(), 1.5 * 2.0 * 2.0 * 5.0);
    }

    #[test]
    fn test_linear_combination_shares_same_symbol_group() {
        let mut config = config();
        config.win_combinations.insert(
            "same_symbols_top_row".to_string(),
            WinCombinationConfig {
                reward_multiplier: 10.0,
                when: "linear_symbols".to_string(),
                count: None,
                group: "same_symbols".to_string(),
                covered_areas: Some(vec![vec!["0:0".into(), "0:1".into(), "0:2".into()]]),
            },
        );
        let rules = RulesModel::prepare(&config).unwrap();

        // A already holds a same_symbols tier, so the top row line is dropped
        let grid = grid(&rules, [["A", "A", "A"], ["B", "C", "B"], ["C", "B", "10x"]]);
        let applied = evaluate(&rules, &grid);

        assert_eq!(
            names_for(&applied, &rules, "A"),
            vec!["same_symbol_3_times", "same_symbols_horizontally"]
        );
        let a = rules.symbols().id_of("A").unwrap();
        assert_eq!(applied.get(a).unwrap().multiplier(), 2.0);
    }

    #[test]
    fn test_bonus_symbols_never_win() {
        let rules = rules();
        let ten_x = rules.symbols().id_of("10x").unwrap();
        let grid = Grid::filled(3, 3, ten_x);
        let applied = evaluate(&rules, &grid);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_no_match() {
        let rules = rules();
        let grid = grid(&rules, [["A", "B", "C"], ["C", "A", "B"], ["B", "C", "10x"]]);
        let applied = evaluate(&rules, &grid);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_first_per_group_wins() {
        let rules = rules();
        let horizontal = &rules.linear_combinations()[0];
        let vertical = &rules.linear_combinations()[1];
        let symbol = SymbolId(0);

        let mut combinations = SymbolCombinations::default();
        assert_eq!(combinations.multiplier(), 1.0);
        assert!(combinations.insert(horizontal));
        assert!(!combinations.insert(horizontal));
        assert!(combinations.insert(vertical));
        assert_eq!(combinations.len(), 2);

        let mut applied = AppliedCombinations::new();
        assert!(applied.insert(symbol, horizontal));
        assert!(!applied.insert(symbol, horizontal));
        assert_eq!(applied.get(symbol).unwrap().len(), 1);
    }
}
