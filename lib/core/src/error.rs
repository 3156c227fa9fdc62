use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load catalog: {0}")]
    DataLoad(String),

    #[error("Invalid value for {field}: '{value}' (expected one of {expected})")]
    InvalidCategory {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Feature '{0}' has zero variance across the catalog")]
    DegenerateFeature(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Row not found: {0}")]
    UnknownRow(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a load error that points at a line and column of the catalog file
    pub fn data_load_at(line: u64, column: &str, message: impl std::fmt::Display) -> Self {
        Error::DataLoad(format!("line {}, column '{}': {}", line, column, message))
    }

    /// Whether the error rejects a single request rather than the whole process
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCategory { .. }
                | Error::InvalidArgument(_)
                | Error::InvalidDimension { .. }
                | Error::UnknownRow(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_load_at_message() {
        let err = Error::data_load_at(4, "Risk Level", "unknown value");
        assert_eq!(
            err.to_string(),
            "Failed to load catalog: line 4, column 'Risk Level': unknown value"
        );
    }

    #[test]
    fn test_request_error_classification() {
        assert!(Error::InvalidArgument("k".to_string()).is_request_error());
        assert!(Error::UnknownRow(3).is_request_error());
        assert!(!Error::DataLoad("missing".to_string()).is_request_error());
        assert!(!Error::DegenerateFeature("Dividend Yield".to_string()).is_request_error());
    }
}
