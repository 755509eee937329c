use thiserror::Error;

/// A parameter set that cannot drive a run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("maxSteps must be positive")]
    NonPositiveMaxSteps,

    #[error("numEpisodes must be positive")]
    NonPositiveEpisodes,

    #[error("{name} out of range: {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("minExplorationRate {min} exceeds explorationRate {start}")]
    MinExplorationAboveStart { min: f64, start: f64 },
}

/// A learner snapshot that cannot be imported.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("snapshot holds {found} tables, expected {expected}")]
    TableCount { expected: usize, found: usize },

    #[error("table {agent} row {key:?} has {found} values, expected {expected}")]
    RowWidth {
        agent: usize,
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("snapshot parameters rejected: {0}")]
    Config(#[from] ConfigError),
}
