use std::path::PathBuf;

use thiserror::Error;

use crate::tracking::TrackingError;

/// Convenient result alias for the cyno map library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for dataset location")]
    ProjectDirsUnavailable,

    /// Raised when the dataset does not carry the expected map tables.
    #[error(
        "unsupported dataset schema; expected mapSolarSystems/mapSolarSystemJumps tables with region, security and coordinate columns"
    )]
    UnsupportedSchema,

    /// Raised when a jump range is not a positive, finite number of light-years.
    #[error("invalid jump range '{value}': expected a positive number of light-years")]
    InvalidJumpRange { value: String },

    /// Raised when a credential pair is incomplete or malformed.
    #[error("invalid tracking credentials: {reason}")]
    InvalidCredentials { reason: String },

    /// Fatal failure reported by the character-tracking capability.
    #[error(transparent)]
    Tracking(#[from] TrackingError),

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client construction errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Whether the error came from the reference dataset rather than the caller or tracker.
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            Error::DatasetNotFound { .. }
                | Error::UnsupportedSchema
                | Error::Sqlite(_)
                | Error::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_errors_convert_transparently() {
        let err: Error = TrackingError::Unauthorized { status: 403 }.into();
        assert!(matches!(err, Error::Tracking(_)));
        assert!(err.to_string().contains("403"));
        assert!(!err.is_data_access());
    }

    #[test]
    fn schema_errors_are_data_access() {
        assert!(Error::UnsupportedSchema.is_data_access());
        assert!(!Error::InvalidJumpRange {
            value: "abc".to_string()
        }
        .is_data_access());
    }
}
