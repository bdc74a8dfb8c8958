//! Query Engine over the GDP and population indexes.
//!
//! GDP is indexed by country name (one bucket of years per country, most
//! recent first); population is indexed by country name + year. Per-capita
//! queries walk a country's GDP years and probe population with the
//! reconstructed composite key.
//!
//! All queries take `&self` and leave the indexes untouched. The only
//! consuming operation, [`CountriesInspector::take_latest_country_gdp`],
//! needs `&mut self`.

use std::path::PathBuf;

use crate::config::{DatasetConfig, InspectorConfig};
use crate::error::{Error, Result};
use crate::hashing::hash_key;
use crate::index::{sort_by_year_desc, RecordIndex, Slot};
use crate::loader::RecordLoader;
use crate::record::Record;

/// GDP per capita at a given year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerCapita {
    /// Year both datasets matched at.
    pub year: i32,
    /// GDP divided by population.
    pub value: f64,
}

/// Answers GDP queries over two independently loaded datasets.
#[derive(Debug, Clone)]
pub struct CountriesInspector {
    gdp: Option<RecordIndex>,
    population: Option<RecordIndex>,
    gdp_layout: DatasetConfig,
    population_layout: DatasetConfig,
}

impl CountriesInspector {
    /// Loads both datasets with the default World Bank layout.
    ///
    /// A missing or invalid file leaves that dataset absent; it does not
    /// prevent construction.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is malformed.
    pub fn new(gdp_path: impl Into<PathBuf>, population_path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_config(&InspectorConfig::for_paths(gdp_path, population_path))
    }

    /// Loads both datasets described by `config`, logging through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a file is malformed.
    pub fn from_config(config: &InspectorConfig) -> Result<Self> {
        Self::with_loader(&RecordLoader::default(), config)
    }

    /// Loads both datasets with an explicit loader.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a file is malformed.
    pub fn with_loader(loader: &RecordLoader, config: &InspectorConfig) -> Result<Self> {
        config.validate()?;
        let gdp = loader.load(&config.gdp)?;
        let population = loader.load(&config.population)?;
        tracing::debug!(
            gdp = gdp.is_some(),
            population = population.is_some(),
            "Inspector ready"
        );
        Ok(Self::from_indexes(config, gdp, population))
    }

    /// Wraps already built indexes.
    #[must_use]
    pub fn from_indexes(
        config: &InspectorConfig,
        gdp: Option<RecordIndex>,
        population: Option<RecordIndex>,
    ) -> Self {
        Self {
            gdp,
            population,
            gdp_layout: config.gdp.clone(),
            population_layout: config.population.clone(),
        }
    }

    /// True if the GDP dataset loaded.
    #[must_use]
    pub fn has_gdp(&self) -> bool {
        self.gdp.is_some()
    }

    /// True if the population dataset loaded.
    #[must_use]
    pub fn has_population(&self) -> bool {
        self.population.is_some()
    }

    /// The GDP index, if loaded.
    #[must_use]
    pub fn gdp_index(&self) -> Option<&RecordIndex> {
        self.gdp.as_ref()
    }

    /// The population index, if loaded.
    #[must_use]
    pub fn population_index(&self) -> Option<&RecordIndex> {
        self.population.as_ref()
    }

    /// GDP of the most recent year on record.
    ///
    /// `Ok(None)` when the country is unknown or its value is not numeric.
    ///
    /// # Errors
    ///
    /// [`Error::DatasetUnavailable`] when the GDP dataset did not load.
    pub fn latest_country_gdp(&self, name: &str) -> Result<Option<f64>> {
        let gdp = self.gdp_db()?;
        let latest = gdp
            .bucket(&hash_key(&[name]))
            .and_then(<[Record]>::first)
            .and_then(|record| record.number(&self.gdp_layout.value_field));
        Ok(latest)
    }

    /// Removes and returns the most recent GDP record's value.
    ///
    /// Each call yields the next older year until the country runs out.
    ///
    /// # Errors
    ///
    /// [`Error::DatasetUnavailable`] when the GDP dataset did not load.
    pub fn take_latest_country_gdp(&mut self, name: &str) -> Result<Option<f64>> {
        let year_field = self.gdp_layout.year_field.clone();
        let value_field = self.gdp_layout.value_field.clone();
        let gdp = self.gdp.as_mut().ok_or(Error::DatasetUnavailable("GDP"))?;
        let Some(records) = gdp.bucket_mut(&hash_key(&[name])) else {
            return Ok(None);
        };
        if records.is_empty() {
            return Ok(None);
        }
        sort_by_year_desc(records, &year_field);
        let record = records.remove(0);
        Ok(record.number(&value_field))
    }

    /// GDP per capita at the most recent year both datasets cover.
    ///
    /// # Errors
    ///
    /// See [`CountriesInspector::gdp_per_capita_detail`].
    pub fn gdp_per_capita(&self, name: &str) -> Result<Option<f64>> {
        Ok(self.gdp_per_capita_detail(name)?.map(|p| p.value))
    }

    /// Like [`CountriesInspector::gdp_per_capita`], also reporting the year.
    ///
    /// Years with a zero or missing GDP value, no population record, or a
    /// zero population are skipped. `Ok(None)` when no year qualifies.
    ///
    /// # Errors
    ///
    /// [`Error::DatasetUnavailable`] when either dataset did not load,
    /// [`Error::CountryNotFound`] when the country has no GDP records.
    pub fn gdp_per_capita_detail(&self, name: &str) -> Result<Option<PerCapita>> {
        let records = self.country_records(name)?;
        self.search_per_capita(name, records, None)
    }

    /// GDP per capita at exactly `year`.
    ///
    /// # Errors
    ///
    /// Same as [`CountriesInspector::gdp_per_capita_detail`].
    pub fn gdp_per_capita_at(&self, name: &str, year: i32) -> Result<Option<f64>> {
        let records = self.country_records(name)?;
        Ok(self.search_per_capita(name, records, Some(year))?.map(|p| p.value))
    }

    /// Change in GDP per capita between the most recent covered year and
    /// `years_amount` years earlier (`latest - earlier`).
    ///
    /// `Ok(None)` when the country has no covered year at all.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] unless `years_amount` is positive,
    /// [`Error::PeriodUnavailable`] when the earlier year is not covered, plus
    /// the errors of [`CountriesInspector::gdp_per_capita_detail`].
    pub fn gdp_per_capita_growth(&self, name: &str, years_amount: i64) -> Result<Option<f64>> {
        if years_amount <= 0 {
            return Err(Error::InvalidArgument(
                "years_amount must be positive integer".to_string(),
            ));
        }
        let years = i32::try_from(years_amount).map_err(|_| {
            Error::InvalidArgument(format!("years_amount {years_amount} is out of range"))
        })?;
        self.per_capita_change(name, years)
    }

    /// Sorted names of every country in the GDP dataset.
    ///
    /// # Errors
    ///
    /// [`Error::DatasetUnavailable`] when the GDP dataset did not load.
    pub fn countries(&self) -> Result<Vec<String>> {
        let gdp = self.gdp_db()?;
        let name_position = gdp.spec().fields().first().copied().unwrap_or(0);
        let mut names: Vec<String> = gdp
            .slots()
            .filter_map(|(_, slot)| match slot {
                Slot::Bucket(records) => records.first(),
                Slot::Single(record) => Some(record),
            })
            .filter_map(|record| record.value_at(name_position))
            .map(str::to_string)
            .collect();
        names.sort_unstable();
        names.dedup();
        Ok(names)
    }

    /// `(year, value)` pairs of a country's GDP, most recent first.
    ///
    /// Rows without a numeric year or value are left out.
    ///
    /// # Errors
    ///
    /// [`Error::DatasetUnavailable`] when the GDP dataset did not load.
    pub fn gdp_series(&self, name: &str) -> Result<Option<Vec<(i32, f64)>>> {
        let gdp = self.gdp_db()?;
        let layout = &self.gdp_layout;
        Ok(gdp.bucket(&hash_key(&[name])).map(|records| {
            records
                .iter()
                .filter_map(|r| Some((r.year(&layout.year_field)?, r.number(&layout.value_field)?)))
                .collect()
        }))
    }

    /// Latest per capita minus per capita `years_amount` years before it.
    /// Zero returns the latest per capita unchanged.
    fn per_capita_change(&self, name: &str, years_amount: i32) -> Result<Option<f64>> {
        let records = self.country_records(name)?;
        let Some(latest) = self.search_per_capita(name, records, None)? else {
            return Ok(None);
        };
        if years_amount == 0 {
            return Ok(Some(latest.value));
        }

        let baseline_year = latest.year.checked_sub(years_amount).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "no year {years_amount} years before {}",
                latest.year
            ))
        })?;
        let baseline = self
            .search_per_capita(name, records, Some(baseline_year))?
            .ok_or_else(|| Error::PeriodUnavailable {
                country: name.to_string(),
                year: baseline_year,
            })?;
        Ok(Some(latest.value - baseline.value))
    }

    /// First record (in bucket order) with a usable GDP value and a matching
    /// non-zero population, optionally restricted to one year.
    fn search_per_capita(
        &self,
        name: &str,
        records: &[Record],
        only_year: Option<i32>,
    ) -> Result<Option<PerCapita>> {
        let population = self.population_db()?;
        for gdp in records {
            let Some(year) = gdp.year(&self.gdp_layout.year_field) else {
                continue;
            };
            if only_year.is_some_and(|wanted| wanted != year) {
                continue;
            }
            let year_text = year.to_string();
            let Some(people) = population.single(&hash_key(&[name, year_text.as_str()])) else {
                continue;
            };
            let gdp_value = gdp.number(&self.gdp_layout.value_field);
            let head_count = people.number(&self.population_layout.value_field);
            match (gdp_value, head_count) {
                (Some(value), Some(count)) if value != 0.0 && count != 0.0 => {
                    return Ok(Some(PerCapita {
                        year,
                        value: value / count,
                    }));
                }
                _ => continue,
            }
        }
        Ok(None)
    }

    fn country_records(&self, name: &str) -> Result<&[Record]> {
        self.gdp_db()?
            .bucket(&hash_key(&[name]))
            .ok_or_else(|| Error::CountryNotFound(name.to_string()))
    }

    fn gdp_db(&self) -> Result<&RecordIndex> {
        self.gdp.as_ref().ok_or(Error::DatasetUnavailable("GDP"))
    }

    fn population_db(&self) -> Result<&RecordIndex> {
        self.population
            .as_ref()
            .ok_or(Error::DatasetUnavailable("Population"))
    }
}

#[cfg(test)]
#[path = "inspector_tests.rs"]
mod tests;
