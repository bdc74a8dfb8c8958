//! Integration tests against World Bank shaped fixtures.
//!
//! Expected values are computed by hand from `tests/fixtures/*.csv`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use countrystat_core::{
    CollectingDiagnostics, CountriesInspector, Error, InspectorConfig, RecordLoader,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn inspector() -> CountriesInspector {
    CountriesInspector::new(fixture("gdp.csv"), fixture("population.csv")).expect("fixtures load")
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_both_datasets_load() {
    let inspector = inspector();

    assert!(inspector.has_gdp());
    assert!(inspector.has_population());
    assert_eq!(inspector.gdp_index().unwrap().record_count(), 17);
    assert_eq!(inspector.population_index().unwrap().len(), 13);
}

#[test]
fn test_not_a_valid_filepath() {
    let inspector =
        CountriesInspector::new("does not exist file.ASD", fixture("population.csv")).unwrap();

    assert!(!inspector.has_gdp());
    assert!(inspector.has_population());
}

#[test]
fn test_not_a_valid_extension() {
    let inspector = CountriesInspector::new(fixture("gdp.csv"), "population.jpg").unwrap();

    assert!(inspector.has_gdp());
    assert!(!inspector.has_population());
}

#[test]
fn test_unavailable_datasets_are_reported_to_diagnostics() {
    let sink = Arc::new(CollectingDiagnostics::new());
    let loader = RecordLoader::new(sink.clone());
    let config = InspectorConfig::for_paths("missing.csv", "population.jpg");

    let inspector = CountriesInspector::with_loader(&loader, &config).unwrap();

    assert!(!inspector.has_gdp());
    assert!(!inspector.has_population());
    assert_eq!(sink.messages().len(), 2);
}

#[test]
fn test_malformed_dataset_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let gdp = dir.path().join("gdp.csv");
    std::fs::write(&gdp, "Country Name,Country Code,Year,Value\nChad,TCD,2016\n").unwrap();

    let err = CountriesInspector::new(&gdp, fixture("population.csv")).unwrap_err();

    assert!(matches!(err, Error::FieldCountMismatch { line: 2, .. }));
}

#[test]
fn test_invalid_config_fails_construction() {
    let mut config = InspectorConfig::for_paths(fixture("gdp.csv"), fixture("population.csv"));
    config.gdp.key_fields.clear();

    let err = CountriesInspector::from_config(&config).unwrap_err();

    assert_eq!(err.code(), "CSTAT-002");
}

// =============================================================================
// latest_country_gdp
// =============================================================================

#[test]
fn test_retrieve_none_for_unknown_country_gdp() {
    let value = inspector()
        .latest_country_gdp("Any country name that doesn't exist")
        .unwrap();

    assert!(value.is_none());
}

#[test]
fn test_failed_retrieve_gdp_for_country_without_gdp_db() {
    let inspector =
        CountriesInspector::new("does not exist file.ASD", fixture("population.csv")).unwrap();

    let err = inspector
        .latest_country_gdp("Caribbean small states")
        .unwrap_err();

    assert!(err.to_string().contains("GDP DB does not exist"));
}

#[test]
fn test_success_retrieve_valid_gdp_for_country() {
    let value = inspector()
        .latest_country_gdp("Caribbean small states")
        .unwrap();

    assert_eq!(value, Some(66_707_362_091.378));
}

#[test]
fn test_quoted_country_name_is_queryable() {
    let value = inspector().latest_country_gdp("Bahamas, The").unwrap();

    assert_eq!(value, Some(12_162_100_000.0));
}

#[test]
fn test_take_latest_walks_back_through_years() {
    let mut inspector = inspector();

    let first = inspector
        .take_latest_country_gdp("Caribbean small states")
        .unwrap();
    let second = inspector
        .take_latest_country_gdp("Caribbean small states")
        .unwrap();

    assert_eq!(first, Some(66_707_362_091.378));
    assert_eq!(second, Some(65_881_234_009.7));
    assert_eq!(
        inspector.latest_country_gdp("Caribbean small states").unwrap(),
        Some(64_985_431_234.12)
    );
}

#[test]
fn test_latest_country_gdp_time_execution() {
    let inspector = inspector();

    let start = Instant::now();
    inspector
        .latest_country_gdp("Caribbean small states")
        .unwrap();

    assert!(start.elapsed() < Duration::from_millis(10));
}

// =============================================================================
// Per capita
// =============================================================================

#[test]
fn test_success_gdp_per_capita() {
    let inspector = inspector();

    let value = inspector
        .gdp_per_capita("Central Europe and the Baltics")
        .unwrap();
    assert_eq!(value, Some(1_312_157_690_492.89_f64 / 102_974_082_f64));

    let value = inspector.gdp_per_capita("Euro area").unwrap();
    assert_eq!(value, Some(11_934_055_071_906_f64 / 340_894_606_f64));
}

#[test]
fn test_gdp_per_capita_skips_unusable_years() {
    let inspector = inspector();

    // 2017 population is zero
    let tuvalu = inspector.gdp_per_capita_detail("Tuvalu").unwrap().unwrap();
    assert_eq!(tuvalu.year, 2016);
    assert_eq!(tuvalu.value, 36_644_939.7_f64 / 11_097_f64);

    // 2017 GDP is zero
    let nauru = inspector.gdp_per_capita_detail("Nauru").unwrap().unwrap();
    assert_eq!(nauru.year, 2016);
    assert_eq!(nauru.value, 114_000_000.5_f64 / 13_049_f64);
}

#[test]
fn test_gdp_per_capita_without_population_match() {
    assert_eq!(inspector().gdp_per_capita("Atlantis").unwrap(), None);
}

#[test]
fn test_gdp_per_capita_unknown_country() {
    let err = inspector().gdp_per_capita("Utopia").unwrap_err();

    assert!(err.to_string().contains("Utopia does not exist in GDP DB"));
}

#[test]
fn test_success_gdp_per_capita_growth() {
    let value = inspector()
        .gdp_per_capita_growth("East Asia & Pacific", 10)
        .unwrap();

    assert_eq!(
        value,
        Some(
            22_480_427_869_996.2_f64 / 2_296_786_207_f64
                - 10_939_731_186_788.5_f64 / 2_145_245_494_f64
        )
    );
}

#[test]
fn test_gdp_per_capita_growth_matches_point_queries() {
    let inspector = inspector();

    let growth = inspector
        .gdp_per_capita_growth("East Asia & Pacific", 5)
        .unwrap()
        .unwrap();
    let latest = inspector
        .gdp_per_capita_at("East Asia & Pacific", 2017)
        .unwrap()
        .unwrap();
    let earlier = inspector
        .gdp_per_capita_at("East Asia & Pacific", 2012)
        .unwrap()
        .unwrap();

    assert_eq!(growth, latest - earlier);
}

#[test]
fn test_gdp_per_capita_growth_negative_years() {
    let err = inspector()
        .gdp_per_capita_growth("East Asia & Pacific", -1)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_gdp_per_capita_growth_baseline_missing() {
    let err = inspector().gdp_per_capita_growth("Tuvalu", 5).unwrap_err();

    assert!(matches!(
        err,
        Error::PeriodUnavailable { year: 2011, .. }
    ));
}
