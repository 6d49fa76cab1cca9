//! Reward Calculator

use serde::{Deserialize, Serialize};

use crate::evaluator::AppliedCombinations;
use crate::matrix::Grid;
use crate::rules::RulesModel;
use crate::symbols::{BonusImpact, SymbolId};

/// Reward for one round, before and after the bonus effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Sum of all symbol rewards
    pub base: f64,
    /// Bonus effect that changed the reward, if any
    pub bonus_impact: Option<BonusImpact>,
    /// Final reward
    pub total: f64,
}

/// First bonus symbol on the grid
pub fn find_bonus_symbol(rules: &RulesModel, grid: &Grid) -> Option<SymbolId> {
    grid.symbols().find(|&symbol| rules.symbols().is_bonus(symbol))
}

/// Sum of `bet × symbol multiplier × Π combination multipliers` over all
/// winning symbols
pub fn base_reward(rules: &RulesModel, betting_amount: u64, applied: &AppliedCombinations) -> f64 {
    let bet = betting_amount as f64;

    applied
        .iter()
        .filter(|(_, combinations)| !combinations.is_empty())
        .map(|(symbol, combinations)| {
            let symbol_multiplier = rules
                .symbols()
                .get(symbol)
                .map(|s| s.reward_multiplier)
                .unwrap_or(0.0);
            bet * symbol_multiplier * combinations.multiplier()
        })
        .sum()
}

/// Compute the final reward
///
/// The bonus effect only applies to a winning round: with a zero base
/// reward the bonus symbol is ignored.
pub fn calculate_reward(
    rules: &RulesModel,
    grid: &Grid,
    betting_amount: u64,
    applied: &AppliedCombinations,
) -> RewardBreakdown {
    let base = base_reward(rules, betting_amount, applied);

    if base <= 0.0 {
        return RewardBreakdown {
            base,
            bonus_impact: None,
            total: base,
        };
    }

    let impact = find_bonus_symbol(rules, grid)
        .and_then(|id| rules.symbols().get(id))
        .and_then(|symbol| symbol.impact())
        .filter(|impact| *impact != BonusImpact::None);

    let total = impact.map_or(base, |impact| impact.apply(base));
    if let Some(impact) = impact {
        log::debug!("Bonus {:?} takes reward {} -> {}", impact, base, total);
    }

    RewardBreakdown {
        base,
        bonus_impact: impact,
        total,
    }
}
