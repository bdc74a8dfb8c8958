//! Error types for `countrystat`.
//!
//! Queries separate two outcomes: an expected miss (unknown country, no
//! matching year) is `Ok(None)`, while everything in this enum aborts the
//! current operation. Error codes follow the pattern `CSTAT-XXX`.

use thiserror::Error;

/// Result type alias for `countrystat` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading datasets or answering queries.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error (CSTAT-001).
    #[error("[CSTAT-001] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (CSTAT-002).
    #[error("[CSTAT-002] Configuration error: {0}")]
    Config(String),

    /// A data row does not have as many fields as the header (CSTAT-003).
    #[error("[CSTAT-003] Malformed row at line {line}: expected {expected} fields, got {actual}")]
    FieldCountMismatch {
        /// 1-based line number in the source.
        line: usize,
        /// Field count of the header row.
        expected: usize,
        /// Field count of the offending row.
        actual: usize,
    },

    /// A query needs a dataset that was never loaded (CSTAT-004).
    #[error("[CSTAT-004] {0} DB does not exist")]
    DatasetUnavailable(&'static str),

    /// Country has no GDP records at all (CSTAT-005).
    #[error("[CSTAT-005] {0} does not exist in GDP DB")]
    CountryNotFound(String),

    /// Invalid query argument (CSTAT-006).
    #[error("[CSTAT-006] Invalid argument: {0}")]
    InvalidArgument(String),

    /// Growth baseline year has no GDP/population match (CSTAT-007).
    #[error("[CSTAT-007] No GDP per capita for '{country}' in {year}")]
    PeriodUnavailable {
        /// Country name as queried.
        country: String,
        /// Baseline year that could not be matched.
        year: i32,
    },
}

impl Error {
    /// Returns the error code (e.g., "CSTAT-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CSTAT-001",
            Self::Config(_) => "CSTAT-002",
            Self::FieldCountMismatch { .. } => "CSTAT-003",
            Self::DatasetUnavailable(_) => "CSTAT-004",
            Self::CountryNotFound(_) => "CSTAT-005",
            Self::InvalidArgument(_) => "CSTAT-006",
            Self::PeriodUnavailable { .. } => "CSTAT-007",
        }
    }

    /// Returns true if the error comes from input data rather than from
    /// misuse of the API.
    ///
    /// Missing datasets and invalid arguments are caller bugs; fixing the
    /// input files will not make them go away.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::DatasetUnavailable(_) | Self::InvalidArgument(_)
        )
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
