//! Error types for the Delivery Ranking Engine.
//!
//! The scoring engine itself never fails: degenerate numeric inputs are normalised.
//! These errors come from the collaborators around it (configuration, spreadsheet
//! ingestion and the shift store).

use thiserror::Error;

/// The main error type for the Delivery Ranking Engine.
///
/// # Example
///
/// ```
/// use delivery_ranking::error::EngineError;
///
/// let error = EngineError::MissingColumn {
///     column: "pessoa_entregadora".to_string(),
/// };
/// assert_eq!(error.to_string(), "Required column missing: pessoa_entregadora");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A spreadsheet was missing one of the required columns.
    #[error("Required column missing: {column}")]
    MissingColumn {
        /// The canonical name of the missing column.
        column: String,
    },

    /// A spreadsheet row held a value that could not be coerced.
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord {
        /// The 1-based data row (header excluded).
        row: usize,
        /// A description of what made the row invalid.
        message: String,
    },

    /// The CSV reader failed before a row could be mapped.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The shift store rejected an operation.
    #[error("Store operation '{operation}' failed: {message}")]
    Store {
        /// The store operation that failed.
        operation: String,
        /// A description of the failure.
        message: String,
    },

    /// A batch insert failed during upload; the remaining steps were skipped.
    #[error("Upload aborted at batch {batch}: {message}")]
    UploadBatchFailed {
        /// The 1-based number of the failing batch.
        batch: usize,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/service.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/service.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_record_displays_row_and_message() {
        let error = EngineError::InvalidRecord {
            row: 7,
            message: "negative delivery count".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid record at row 7: negative delivery count"
        );
    }

    #[test]
    fn test_store_error_displays_operation() {
        let error = EngineError::Store {
            operation: "insert_shifts".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Store operation 'insert_shifts' failed: connection reset"
        );
    }

    #[test]
    fn test_upload_batch_failed_displays_batch() {
        let error = EngineError::UploadBatchFailed {
            batch: 2,
            message: "timeout".to_string(),
        };
        assert_eq!(error.to_string(), "Upload aborted at batch 2: timeout");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_column() -> EngineResult<()> {
            Err(EngineError::MissingColumn {
                column: "data_do_periodo".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_column()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
