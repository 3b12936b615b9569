//! Error types for Verdantia operations.
//!
//! Every failure here is a setup or configuration failure. Nothing inside a
//! running tick produces one of these; a round that fails to reach the goal
//! is an expected outcome, not an error.

use thiserror::Error;

/// Result type for Verdantia operations.
pub type Result<T> = std::result::Result<T, VerdantiaError>;

/// Errors that can occur while setting up or configuring a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerdantiaError {
    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Graph-related errors.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Value outside its permitted closed range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
    /// Value that is not acceptable for another reason.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Graph-related errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Fewer than two locations were supplied.
    #[error("At least 2 locations are required, got {0}")]
    TooFewLocations(usize),
    /// Two locations share an identifier.
    #[error("Duplicate location: {0}")]
    DuplicateLocation(String),
    /// Referenced location does not exist.
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    /// Start and goal are the same location.
    #[error("Start and goal must differ: {0}")]
    StartIsGoal(String),
    /// Directed edge does not exist.
    #[error("Edge not found: {0} -> {1}")]
    EdgeNotFound(String, String),
    /// Sparse target cannot keep the goal connected.
    #[error("Sparse graph needs at least {required} connections, requested {requested}")]
    InsufficientEdges { requested: usize, required: usize },
    /// Goal has no incoming edge.
    #[error("Goal location is unreachable: {0}")]
    GoalUnreachable(String),
}

// Convenience constructors
impl VerdantiaError {
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        VerdantiaError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        VerdantiaError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn location_not_found(id: impl Into<String>) -> Self {
        VerdantiaError::Graph(GraphError::LocationNotFound(id.into()))
    }

    pub fn edge_not_found(from: impl Into<String>, to: impl Into<String>) -> Self {
        VerdantiaError::Graph(GraphError::EdgeNotFound(from.into(), to.into()))
    }

    /// Whether this is a configuration (as opposed to graph) error.
    pub fn is_config(&self) -> bool {
        matches!(self, VerdantiaError::Config(_))
    }
}
