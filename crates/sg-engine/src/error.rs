//! Error types for the scratch game engine

use thiserror::Error;

/// Configuration error
///
/// The only error kind the engine raises. Rules preparation and round play
/// are deterministic, so a failure recurs identically until the rules
/// document is fixed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Invalid grid dimensions: {rows} rows x {columns} columns")]
    InvalidDimensions { rows: i64, columns: i64 },

    #[error("Unknown type '{kind}' for symbol '{symbol}'")]
    UnknownSymbolType { symbol: String, kind: String },

    #[error("Bonus symbol '{0}' has impact extra_bonus but no extra value")]
    MissingExtra(String),

    #[error("Unknown symbol '{symbol}' in {context}")]
    UnknownSymbol { symbol: String, context: String },

    #[error("Symbol '{symbol}' in {context} must be a {expected} symbol")]
    WrongSymbolType {
        symbol: String,
        context: String,
        expected: &'static str,
    },

    #[error("Weight table for {0} is empty")]
    EmptyWeights(String),

    #[error("Weight {weight} for symbol '{symbol}' in {context} must be positive")]
    NonPositiveWeight {
        symbol: String,
        context: String,
        weight: i64,
    },

    #[error("Total weight of {0} does not fit in 32 bits")]
    WeightOverflow(String),

    #[error("Cell ({row}, {column}) lies outside the {rows}x{columns} grid")]
    CellOutOfBounds {
        row: i64,
        column: i64,
        rows: usize,
        columns: usize,
    },

    #[error("Cell ({row}, {column}) has more than one probability entry")]
    DuplicateCell { row: usize, column: usize },

    #[error("Cell ({row}, {column}) has no probability entry")]
    MissingCell { row: usize, column: usize },

    #[error("Unknown trigger '{trigger}' for combination '{combination}'")]
    UnknownTrigger { combination: String, trigger: String },

    #[error("Combination '{combination}' is missing required field '{field}'")]
    MissingField {
        combination: String,
        field: &'static str,
    },

    #[error("Combination '{combination}' has invalid count {count}")]
    InvalidCount { combination: String, count: i64 },

    #[error("Combination '{combination}' has an empty covered area")]
    EmptyArea { combination: String },

    #[error("Combination '{combination}' has malformed cell '{cell}' (expected \"row:column\")")]
    MalformedCell { combination: String, cell: String },
}

/// Result type alias
pub type ConfigResult<T> = Result<T, ConfigError>;
