use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdRowsError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown report: {0}")]
    UnknownReport(String),

    #[error("Could not detect the report type of {0}; pass --report")]
    UndetectedReport(String),

    #[error("File is a {found}, not a {requested}")]
    ReportMismatch {
        requested: &'static str,
        found: &'static str,
    },

    #[error("No header row found in {0}")]
    MissingHeader(String),

    #[error("Unknown column '{column}' for {report}")]
    UnknownColumn { report: &'static str, column: String },

    #[error("Invalid value '{value}': expected {expected}")]
    InvalidValue { value: String, expected: &'static str },

    #[error("Line {line}, column '{column}': {source}")]
    Cell {
        line: u64,
        column: String,
        #[source]
        source: Box<AdRowsError>,
    },

    #[error("Line {line}: {source}")]
    Line {
        line: u64,
        #[source]
        source: Box<AdRowsError>,
    },

    #[error("Row has no account id")]
    MissingAccountId,

    #[error("Invalid date range: {0}")]
    DateRange(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl AdRowsError {
    pub(crate) fn invalid(value: &str, expected: &'static str) -> Self {
        Self::InvalidValue {
            value: value.to_string(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdRowsError>;
