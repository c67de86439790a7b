use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("Analysis Error: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Failed to parse value {value_name} on row {row}.")]
    ParseError { value_name: String, row: usize },
    #[error("Invalid year range {start}-{end}. Years must satisfy {min} <= start < end <= {max}.")]
    InvalidYearRange {
        start: i32,
        end: i32,
        min: i32,
        max: i32,
    },
    #[error("Config Error: {0}")]
    ConfigError(String),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse date: {0}")]
    ParseDateError(#[from] chrono::ParseError),
    #[error("CSV Error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Serde YAML Error: {0}")]
    SerdeYamlError(#[from] serde_yaml::Error),
    #[error("Serde JSON Error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

/// Failures of the return calculator. None of these are recovered from
/// inside the calculator; callers decide how to present them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Period {period} has no observations.")]
    EmptyPeriod { period: String },
    #[error("Return for {context} is undefined because the first price is zero.")]
    UndefinedReturn { context: String },
    #[error("Insufficient data: got {got} observations, at least {required} required.")]
    InsufficientData { got: usize, required: usize },
    #[error("No periods fall within {start} to {end}.")]
    EmptyRange { start: String, end: String },
    #[error("No observations between {start} and {end}.")]
    EmptyWindow { start: NaiveDate, end: NaiveDate },
}
