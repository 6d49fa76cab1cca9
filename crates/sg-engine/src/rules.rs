//! Rules Model: validated, immutable view of a rules document
//!
//! Built once per loaded configuration by [`RulesModel::prepare`] and then
//! shared read-only by every round played against it:
//! - symbol table with typed bonus impacts
//! - one weight table per grid cell plus the bonus weight table
//! - win combinations partitioned by trigger, same-symbol tiers sorted by count

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{CellProbabilityConfig, GameConfig, WinCombinationConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::rng::WeightTable;
use crate::symbols::{SymbolId, SymbolTable};

/// Grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub column: usize,
}

impl CellCoord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// How a win combination is triggered
#[derive(Debug, Clone, PartialEq)]
pub enum WinTrigger {
    /// At least `count` occurrences of one standard symbol anywhere on the grid
    SameSymbols { count: usize },
    /// Every cell of a covered area holds the same standard symbol
    LinearSymbols { covered_areas: Vec<Vec<CellCoord>> },
}

/// A prepared win combination
#[derive(Debug, Clone, PartialEq)]
pub struct WinCombination {
    /// Combination identifier (e.g., "same_symbol_5_times")
    pub name: String,
    pub reward_multiplier: f64,
    /// Combinations sharing a group never stack for one symbol
    pub group: String,
    pub trigger: WinTrigger,
}

impl WinCombination {
    /// Required count for same-symbol combinations
    pub fn required_count(&self) -> Option<usize> {
        match self.trigger {
            WinTrigger::SameSymbols { count } => Some(count),
            WinTrigger::LinearSymbols { .. } => None,
        }
    }

    /// Covered areas for linear combinations (empty otherwise)
    pub fn covered_areas(&self) -> &[Vec<CellCoord>] {
        match &self.trigger {
            WinTrigger::LinearSymbols { covered_areas } => covered_areas,
            WinTrigger::SameSymbols { .. } => &[],
        }
    }

    fn from_config(name: &str, config: &WinCombinationConfig, rows: usize, columns: usize) -> ConfigResult<Self> {
        let trigger = match config.when.as_str() {
            "same_symbols" => {
                let count = config.count.ok_or_else(|| ConfigError::MissingField {
                    combination: name.to_string(),
                    field: "count",
                })?;
                if count < 1 {
                    return Err(ConfigError::InvalidCount {
                        combination: name.to_string(),
                        count,
                    });
                }
                WinTrigger::SameSymbols { count: count as usize }
            }
            "linear_symbols" => {
                let areas = config.covered_areas.as_ref().ok_or_else(|| ConfigError::MissingField {
                    combination: name.to_string(),
                    field: "covered_areas",
                })?;
                let covered_areas = areas
                    .iter()
                    .map(|area| parse_area(name, area, rows, columns))
                    .collect::<ConfigResult<Vec<_>>>()?;
                WinTrigger::LinearSymbols { covered_areas }
            }
            other => {
                return Err(ConfigError::UnknownTrigger {
                    combination: name.to_string(),
                    trigger: other.to_string(),
                });
            }
        };

        Ok(Self {
            name: name.to_string(),
            reward_multiplier: config.reward_multiplier,
            group: config.group.clone(),
            trigger,
        })
    }
}

fn parse_area(combination: &str, area: &[String], rows: usize, columns: usize) -> ConfigResult<Vec<CellCoord>> {
    if area.is_empty() {
        return Err(ConfigError::EmptyArea {
            combination: combination.to_string(),
        });
    }
    area.iter()
        .map(|cell| parse_cell(combination, cell, rows, columns))
        .collect()
}

/// Parse a "row:column" cell reference
fn parse_cell(combination: &str, cell: &str, rows: usize, columns: usize) -> ConfigResult<CellCoord> {
    let malformed = || ConfigError::MalformedCell {
        combination: combination.to_string(),
        cell: cell.to_string(),
    };

    let (row, column) = cell.split_once(':').ok_or_else(malformed)?;
    let row: i64 = row.trim().parse().map_err(|_| malformed())?;
    let column: i64 = column.trim().parse().map_err(|_| malformed())?;

    checked_coord(row, column, rows, columns)
}

fn checked_coord(row: i64, column: i64, rows: usize, columns: usize) -> ConfigResult<CellCoord> {
    let in_bounds = |value: i64, limit: usize| value >= 0 && (value as u64) < limit as u64;
    if !in_bounds(row, rows) || !in_bounds(column, columns) {
        return Err(ConfigError::CellOutOfBounds {
            row,
            column,
            rows,
            columns,
        });
    }
    Ok(CellCoord::new(row as usize, column as usize))
}

/// Weight table bound to one grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellProbability {
    pub cell: CellCoord,
    pub weights: WeightTable,
}

/// Prepared rules for playing rounds
#[derive(Debug, Clone)]
pub struct RulesModel {
    rows: usize,
    columns: usize,
    symbols: SymbolTable,
    cell_probabilities: Vec<CellProbability>,
    bonus_weights: WeightTable,
    same_symbol_combinations: Vec<WinCombination>,
    linear_combinations: Vec<WinCombination>,
}

impl RulesModel {
    /// Validate a rules document and build the model
    pub fn prepare(config: &GameConfig) -> ConfigResult<Self> {
        let invalid = || ConfigError::InvalidDimensions {
            rows: config.rows,
            columns: config.columns,
        };
        if config.rows <= 0 || config.columns <= 0 {
            return Err(invalid());
        }
        let rows = usize::try_from(config.rows).map_err(|_| invalid())?;
        let columns = usize::try_from(config.columns).map_err(|_| invalid())?;

        let symbols = SymbolTable::from_config(&config.symbols)?;

        let cell_probabilities = prepare_cells(config, &symbols, rows, columns)?;
        let bonus_weights = weight_table(
            "bonus symbols",
            &config.probabilities.bonus_symbols.symbols,
            &symbols,
            SymbolClass::Bonus,
        )?;

        let mut same_symbol_combinations = Vec::new();
        let mut linear_combinations = Vec::new();
        for (name, entry) in &config.win_combinations {
            let combination = WinCombination::from_config(name, entry, rows, columns)?;
            match combination.trigger {
                WinTrigger::SameSymbols { .. } => same_symbol_combinations.push(combination),
                WinTrigger::LinearSymbols { .. } => linear_combinations.push(combination),
            }
        }
        // Stable: equal counts keep declared order
        same_symbol_combinations.sort_by_key(|c| c.required_count().unwrap_or(0));

        log::info!(
            "Prepared {}x{} rules: {} symbols, {} same-symbol and {} linear combinations",
            rows,
            columns,
            symbols.len(),
            same_symbol_combinations.len(),
            linear_combinations.len()
        );

        Ok(Self {
            rows,
            columns,
            symbols,
            cell_probabilities,
            bonus_weights,
            same_symbol_combinations,
            linear_combinations,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Per-cell weight tables in declared order
    pub fn cell_probabilities(&self) -> &[CellProbability] {
        &self.cell_probabilities
    }

    pub fn bonus_weights(&self) -> &WeightTable {
        &self.bonus_weights
    }

    /// Same-symbol combinations, ascending by required count
    pub fn same_symbol_combinations(&self) -> &[WinCombination] {
        &self.same_symbol_combinations
    }

    pub fn linear_combinations(&self) -> &[WinCombination] {
        &self.linear_combinations
    }

    /// Highest same-symbol tier satisfied by `count` occurrences
    ///
    /// Among tiers with equal counts the last declared one wins.
    pub fn best_same_symbol_combination(&self, count: usize) -> Option<&WinCombination> {
        let satisfied = self
            .same_symbol_combinations
            .partition_point(|c| c.required_count().is_some_and(|required| required <= count));
        satisfied
            .checked_sub(1)
            .and_then(|index| self.same_symbol_combinations.get(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolClass {
    Standard,
    Bonus,
}

impl SymbolClass {
    fn label(self) -> &'static str {
        match self {
            SymbolClass::Standard => "standard",
            SymbolClass::Bonus => "bonus",
        }
    }

    fn admits(self, symbols: &SymbolTable, id: SymbolId) -> bool {
        match self {
            SymbolClass::Standard => symbols.is_standard(id),
            SymbolClass::Bonus => symbols.is_bonus(id),
        }
    }
}

fn prepare_cells(
    config: &GameConfig,
    symbols: &SymbolTable,
    rows: usize,
    columns: usize,
) -> ConfigResult<Vec<CellProbability>> {
    let entries = &config.probabilities.standard_symbols;

    // A table too short to cover every cell is rejected before anything is
    // sized from the grid dimensions
    if rows.checked_mul(columns).is_none_or(|cells| entries.len() < cells) {
        let (row, column) = first_uncovered(entries, rows, columns);
        return Err(ConfigError::MissingCell { row, column });
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut cells = Vec::with_capacity(entries.len());

    for entry in entries {
        let cell = checked_coord(entry.row, entry.column, rows, columns)?;
        if !seen.insert(cell) {
            return Err(ConfigError::DuplicateCell {
                row: cell.row,
                column: cell.column,
            });
        }

        let context = format!("cell ({}, {})", cell.row, cell.column);
        let weights = weight_table(&context, &entry.symbols, symbols, SymbolClass::Standard)?;
        cells.push(CellProbability { cell, weights });
    }

    for row in 0..rows {
        for column in 0..columns {
            if !seen.contains(&CellCoord::new(row, column)) {
                return Err(ConfigError::MissingCell { row, column });
            }
        }
    }

    Ok(cells)
}

/// First cell in row-major order that no entry names
///
/// Only called when the table is shorter than the grid, so the scan stops
/// within `entries.len() + 1` cells.
fn first_uncovered(entries: &[CellProbabilityConfig], rows: usize, columns: usize) -> (usize, usize) {
    let covered: HashSet<(i64, i64)> = entries.iter().map(|entry| (entry.row, entry.column)).collect();

    (0..rows)
        .flat_map(|row| (0..columns).map(move |column| (row, column)))
        .find(|&(row, column)| !covered.contains(&(row as i64, column as i64)))
        .unwrap_or((0, 0))
}

fn weight_table(
    context: &str,
    weights: &IndexMap<String, i64>,
    symbols: &SymbolTable,
    class: SymbolClass,
) -> ConfigResult<WeightTable> {
    let mut entries = Vec::with_capacity(weights.len());

    for (name, &weight) in weights {
        let id = symbols.id_of(name).ok_or_else(|| ConfigError::UnknownSymbol {
            symbol: name.clone(),
            context: context.to_string(),
        })?;
        if !class.admits(symbols, id) {
            return Err(ConfigError::WrongSymbolType {
                symbol: name.clone(),
                context: context.to_string(),
                expected: class.label(),
            });
        }
        if weight <= 0 {
            return Err(ConfigError::NonPositiveWeight {
                symbol: name.clone(),
                context: context.to_string(),
                weight,
            });
        }
        let weight = u32::try_from(weight).map_err(|_| ConfigError::WeightOverflow(context.to_string()))?;
        entries.push((id, weight));
    }

    WeightTable::new(context, entries, symbols)
}
