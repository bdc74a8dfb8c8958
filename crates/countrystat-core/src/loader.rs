//! Record Loader: delimited text to [`RecordIndex`].
//!
//! The format is the World Bank CSV export: a header row, then one row per
//! country and year. Only the first field may be quoted (`"Bahamas, The"`);
//! no other escaping is understood.

use std::path::Path;
use std::sync::Arc;

use crate::config::DatasetConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{Error, Result};
use crate::hashing::hash_key;
use crate::index::{KeySpec, RecordIndex};
use crate::record::Record;

/// Splits one line into fields.
///
/// A quote at the very start of the line opens the first field, which runs
/// to the next quote and may contain the delimiter. Quotes are stripped and
/// anything between the closing quote and the next delimiter is dropped. An
/// unterminated quote makes the rest of the line the only field.
#[must_use]
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let Some(quoted) = line.strip_prefix('"') else {
        return line.split(delimiter).map(str::to_string).collect();
    };
    let Some(end) = quoted.find('"') else {
        return vec![quoted.to_string()];
    };

    let mut fields: Vec<String> = quoted[end + 1..]
        .split(delimiter)
        .map(str::to_string)
        .collect();
    if let Some(first) = fields.first_mut() {
        *first = quoted[..end].to_string();
    }
    fields
}

/// Builds indexes from delimited sources.
pub struct RecordLoader {
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new(Arc::new(TracingDiagnostics))
    }
}

impl RecordLoader {
    /// Creates a loader reporting warnings to `diagnostics`.
    #[must_use]
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { diagnostics }
    }

    /// Loads the dataset at `dataset.path`.
    ///
    /// Returns `Ok(None)` (after a warning) when the path is missing, is not
    /// a regular file, or lacks the configured extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldCountMismatch`] for a row whose width differs
    /// from the header, [`Error::Config`] when a key position is outside the
    /// header, and [`Error::Io`] if an existing file cannot be read.
    pub fn load(&self, dataset: &DatasetConfig) -> Result<Option<RecordIndex>> {
        let path = dataset.path.as_path();
        if let Some(reason) = unavailable_reason(path, &dataset.extension) {
            self.diagnostics.warn(&format!(
                "Filepath '{}' doesn't exist or wrong file extension: {reason}",
                path.display()
            ));
            return Ok(None);
        }

        let source = std::fs::read_to_string(path)?;
        let index = self.load_str(&source, dataset)?;
        tracing::debug!(
            path = %path.display(),
            keys = index.len(),
            records = index.record_count(),
            "Dataset loaded"
        );
        Ok(Some(index))
    }

    /// Parses in-memory text with the layout of `dataset`; `dataset.path` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Same parse errors as [`RecordLoader::load`].
    pub fn load_str(&self, source: &str, dataset: &DatasetConfig) -> Result<RecordIndex> {
        let spec = KeySpec::new(dataset.key_fields.clone());
        let mut index = RecordIndex::new(spec.clone());
        let mut header: Option<Vec<String>> = None;

        // Trailing blank lines end the file; blank lines before that are rows.
        for (idx, raw) in source.trim_end().lines().enumerate() {
            let line = raw.trim_end();
            let values = split_line(line, dataset.delimiter);

            let Some(names) = header.as_ref() else {
                check_key_fields(&spec, values.len())?;
                header = Some(values);
                continue;
            };

            if values.len() != names.len() {
                return Err(Error::FieldCountMismatch {
                    line: idx + 1,
                    expected: names.len(),
                    actual: values.len(),
                });
            }

            let parts: Vec<&str> = spec.fields().iter().map(|&i| values[i].as_str()).collect();
            let key = hash_key(&parts);
            index.insert(key, Record::from_row(names, values));
        }

        if !spec.is_composite() {
            index.sort_buckets_by_year(&dataset.year_field);
        }
        Ok(index)
    }
}

fn unavailable_reason(path: &Path, extension: &str) -> Option<&'static str> {
    if !path.exists() {
        return Some("path does not exist");
    }
    if !path.is_file() {
        return Some("not a regular file");
    }
    if path.extension().and_then(|e| e.to_str()) != Some(extension) {
        return Some("unexpected extension");
    }
    None
}

fn check_key_fields(spec: &KeySpec, width: usize) -> Result<()> {
    if spec.fields().is_empty() {
        return Err(Error::Config("at least one key field is required".to_string()));
    }
    match spec.max_field() {
        Some(max) if max >= width => Err(Error::Config(format!(
            "key field {max} is out of range for a header with {width} fields"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
