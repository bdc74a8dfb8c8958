//! # `countrystat` Core
//!
//! In-memory GDP and population indexes over World Bank CSV exports, with
//! per-capita queries joining the two.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use countrystat_core::CountriesInspector;
//!
//! let inspector = CountriesInspector::new("data/gdp.csv", "data/population.csv")?;
//!
//! let latest = inspector.latest_country_gdp("Euro area")?;
//! let per_capita = inspector.gdp_per_capita("Euro area")?;
//! let growth = inspector.gdp_per_capita_growth("East Asia & Pacific", 10)?;
//! # Ok::<(), countrystat_core::Error>(())
//! ```
//!
//! ## Datasets
//!
//! | Dataset | Key | Slot |
//! |---------|-----|------|
//! | GDP | country name | bucket of years, most recent first |
//! | Population | country name + year | single record |
//!
//! Queries return `Ok(None)` for expected misses and `Err` for everything
//! that should stop the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod hashing;
pub mod index;
pub mod inspector;
pub mod loader;
pub mod record;

pub use config::{ConfigError, DatasetConfig, InspectorConfig, LoggingConfig};
pub use diagnostics::{CollectingDiagnostics, Diagnostics, TracingDiagnostics};
pub use error::{Error, Result};
pub use hashing::hash_key;
pub use index::{IndexStats, KeySpec, RecordIndex, Slot};
pub use inspector::{CountriesInspector, PerCapita};
pub use loader::{split_line, RecordLoader};
pub use record::Record;
