use thiserror::Error;

/// Errors surfaced by the ranking engine.
///
/// Everything except `Crawl` and `Computation` describes a malformed
/// request, rejected before any fetching or ranking starts.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No URLs provided")]
    EmptyInput,

    #[error("Adjacency matrix must be {expected}x{expected}: {detail}")]
    ShapeMismatch { expected: usize, detail: String },

    #[error("Invalid matrix entry at [{row}][{col}]: {value}")]
    InvalidValue { row: usize, col: usize, value: f64 },

    #[error("Parameter out of range: {0}")]
    ParameterRange(String),

    #[error("Crawl failed: {0}")]
    Crawl(String),

    #[error("Computation failed: {0}")]
    Computation(String),
}

impl EngineError {
    /// Stable machine-readable tag for each error class.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::EmptyInput => "empty_input",
            EngineError::ShapeMismatch { .. } => "shape_mismatch",
            EngineError::InvalidValue { .. } => "invalid_value",
            EngineError::ParameterRange(_) => "parameter_range",
            EngineError::Crawl(_) => "crawl_failed",
            EngineError::Computation(_) => "computation_failed",
        }
    }

    /// True when the request itself was bad, as opposed to the engine
    /// failing while serving it.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, EngineError::Crawl(_) | EngineError::Computation(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
