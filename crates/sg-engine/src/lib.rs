//! # sg-engine: Scratch Card Game Engine
//!
//! Simulates a single round of a scratch card game: fills a grid with
//! weighted random symbols, matches it against the win combinations and
//! computes the reward for a bet.
//!
//! ## Architecture
//!
//! ```text
//! GameConfig (JSON / YAML rules document)
//!     │
//!     v
//! RulesModel::prepare ── validated, immutable, shared by every round
//!     │
//!     v
//! play_round(rules, bet, rng)
//!     ├── generate_grid     (weighted cell draws + one bonus cell)
//!     ├── evaluate          (same-symbol tiers, linear areas, first per group)
//!     └── calculate_reward  (bet × symbol × Π combinations, then bonus)
//!           │
//!           v
//!     RoundResult
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = GameConfig::load("demos/config.json")?;
//! let rules = RulesModel::prepare(&config)?;
//! let result = play_round(&rules, 100, &mut rand::rng())?;
//! println!("{}", result.to_json_pretty()?);
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod matrix;
pub mod reward;
pub mod rng;
pub mod round;
pub mod rules;
pub mod symbols;

pub use config::*;
pub use error::*;
pub use evaluator::*;
pub use matrix::*;
pub use reward::*;
pub use rng::*;
pub use round::*;
pub use rules::*;
pub use symbols::*;
