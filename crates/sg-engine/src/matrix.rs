//! Matrix Generator: fills the grid for one round

use crate::rng::RandomSource;
use crate::rules::{CellCoord, RulesModel};
use crate::symbols::{SymbolId, SymbolTable};

/// Rows × columns arrangement of symbols, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<SymbolId>,
}

impl Grid {
    /// Grid with every cell set to `fill`
    pub fn filled(rows: usize, columns: usize, fill: SymbolId) -> Self {
        Self {
            rows,
            columns,
            cells: vec![fill; rows * columns],
        }
    }

    /// Build a grid from rows of symbol IDs
    ///
    /// Returns `None` when the rows are empty or ragged.
    pub fn from_rows(rows: Vec<Vec<SymbolId>>) -> Option<Self> {
        let columns = rows.first()?.len();
        if columns == 0 || rows.iter().any(|row| row.len() != columns) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            columns,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, cell: CellCoord) -> Option<SymbolId> {
        if cell.row >= self.rows || cell.column >= self.columns {
            return None;
        }
        self.cells.get(cell.row * self.columns + cell.column).copied()
    }

    pub fn set(&mut self, cell: CellCoord, symbol: SymbolId) {
        if cell.row < self.rows && cell.column < self.columns {
            self.cells[cell.row * self.columns + cell.column] = symbol;
        }
    }

    /// All symbols in row-major order
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.cells.iter().copied()
    }

    /// Iterate rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[SymbolId]> {
        self.cells.chunks(self.columns.max(1))
    }

    /// Symbol names, one `Vec` per row
    pub fn to_names(&self, symbols: &SymbolTable) -> Vec<Vec<String>> {
        self.iter_rows()
            .map(|row| row.iter().map(|&id| symbols.name(id).to_string()).collect())
            .collect()
    }
}

/// Generate the grid for one round
///
/// Every cell is drawn from its own weight table in declared order, then one
/// uniformly chosen cell is overwritten with a symbol from the bonus table.
/// The bonus cell may replace any standard symbol, so each grid carries
/// exactly one bonus symbol.
pub fn generate_grid<R: RandomSource + ?Sized>(rules: &RulesModel, rng: &mut R) -> Grid {
    let mut grid = Grid::filled(rules.rows(), rules.columns(), SymbolId(0));

    for probability in rules.cell_probabilities() {
        grid.set(probability.cell, probability.weights.draw(rng));
    }

    let bonus_cell = CellCoord::new(
        rng.next_below(rules.rows() as u32) as usize,
        rng.next_below(rules.columns() as u32) as usize,
    );
    let bonus = rules.bonus_weights().draw(rng);
    grid.set(bonus_cell, bonus);

    log::debug!(
        "Placed bonus symbol '{}' at ({}, {})",
        rules.symbols().name(bonus),
        bonus_cell.row,
        bonus_cell.column
    );

    grid
}
