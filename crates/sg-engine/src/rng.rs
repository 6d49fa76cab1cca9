//! Random sources and weighted symbol sampling

use std::collections::VecDeque;

use rand::Rng;

use crate::error::{ConfigError, ConfigResult};
use crate::symbols::{SymbolId, SymbolTable};

/// Source of uniform random integers
///
/// Every `rand::Rng` is a `RandomSource`; tests can use [`ScriptedSource`]
/// to replay exact draws.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` is always positive.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }
}

/// Replays a fixed sequence of draws
///
/// Each draw is reduced modulo the requested bound. Once the script runs
/// out every further draw is 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<u32>,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Draws not yet consumed
    #[cfg(test)]
    pub(crate) fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.draws.pop_front().unwrap_or(0) % bound.max(1)
    }
}

/// Weighted symbol table
///
/// Entries keep their declared order; a draw walks them accumulating
/// weights, so the chosen symbol is a pure function of the single random
/// draw. Always non-empty with a positive total.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    entries: Vec<(SymbolId, u32)>,
    total: u32,
}

impl WeightTable {
    /// Build a table, rejecting empty tables, zero weights and totals that
    /// overflow `u32`
    pub fn new(
        context: impl Into<String>,
        entries: Vec<(SymbolId, u32)>,
        symbols: &SymbolTable,
    ) -> ConfigResult<Self> {
        let context = context.into();

        if entries.is_empty() {
            return Err(ConfigError::EmptyWeights(context));
        }

        let mut total = 0u32;
        for &(symbol, weight) in &entries {
            if weight == 0 {
                return Err(ConfigError::NonPositiveWeight {
                    symbol: symbols.name(symbol).to_string(),
                    context,
                    weight: 0,
                });
            }
            total = total
                .checked_add(weight)
                .ok_or_else(|| ConfigError::WeightOverflow(context.clone()))?;
        }

        Ok(Self { entries, total })
    }

    /// Sum of all weights
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Draw one symbol
    pub fn draw<R: RandomSource + ?Sized>(&self, rng: &mut R) -> SymbolId {
        let target = rng.next_below(self.total);
        let mut cumulative = 0u32;

        for &(symbol, weight) in &self.entries {
            cumulative += weight;
            if target < cumulative {
                return symbol;
            }
        }

        // Only reachable when a source ignores its bound
        self.entries[self.entries.len() - 1].0
    }
}
