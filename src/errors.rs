use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Structural or type problem in an input record
    #[error("Malformed input at line {line}, field '{field}': {reason}")]
    MalformedInput {
        line: usize,
        field: String,
        reason: String,
    },

    /// Value parsed fine but breaks a model invariant (negative rate, non-increasing timeouts)
    #[error("Invariant violated at line {line}, field '{field}': {reason}")]
    InvariantViolation {
        line: usize,
        field: String,
        reason: String,
    },

    /// Tree shape that cannot be evaluated (zero depth, branching < 2, overflow)
    #[error("Degenerate tree shape (depth={depth}, branching={branching_factor}): {reason}")]
    DegenerateShape {
        depth: u32,
        branching_factor: u64,
        reason: String,
    },

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV processing
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn malformed(line: usize, field: &str, reason: impl Into<String>) -> Self {
        AppError::MalformedInput {
            line,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invariant(line: usize, field: &str, reason: impl Into<String>) -> Self {
        AppError::InvariantViolation {
            line,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn degenerate(depth: u32, branching_factor: u64, reason: impl Into<String>) -> Self {
        AppError::DegenerateShape {
            depth,
            branching_factor,
            reason: reason.into(),
        }
    }

    /// Errors that belong to a single scenario row and may be skipped under the
    /// partial-success policy. I/O and CSV transport errors never qualify.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            AppError::MalformedInput { .. }
                | AppError::InvariantViolation { .. }
                | AppError::DegenerateShape { .. }
        )
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
