//! Domain error types.

/// Batch-aborting errors from CSV / manual row parsing.
///
/// Malformed numerics and wrong column counts short-circuit the whole
/// parse. Rule violations (zero quantity, bad dates) do not belong
/// here; they are accumulated per row by the validator instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: invalid {field} value '{value}'")]
    InvalidNumber {
        row: usize,
        field: String,
        value: String,
    },

    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },
}

/// Top-level error type for stockfolio.
#[derive(Debug, thiserror::Error)]
pub enum StockfolioError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("portfolio validation failed:\n{}", errors.join("\n"))]
    Validation { errors: Vec<String> },

    #[error("persistence error: {reason}")]
    Persistence { reason: String },

    #[error("market data error: {reason}")]
    Fetch { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockfolioError> for std::process::ExitCode {
    fn from(err: &StockfolioError) -> Self {
        let code: u8 = match err {
            StockfolioError::Io(_) => 1,
            StockfolioError::ConfigParse { .. } | StockfolioError::ConfigMissing { .. } => 2,
            StockfolioError::Parse(_) => 3,
            StockfolioError::Validation { .. } => 4,
            StockfolioError::Persistence { .. } => 5,
            StockfolioError::Fetch { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
