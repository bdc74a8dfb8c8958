//! countrystat CLI
//!
//! Point queries over World Bank GDP and population CSV exports.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use countrystat_core::{CountriesInspector, InspectorConfig};

mod output;

#[derive(Parser)]
#[command(name = "countrystat")]
#[command(version)]
#[command(about = "countrystat: GDP and GDP per capita from World Bank CSV exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (defaults to ./countrystat.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// GDP CSV file (overrides configuration)
    #[arg(long, value_name = "FILE", global = true)]
    gdp: Option<PathBuf>,

    /// Population CSV file (overrides configuration)
    #[arg(long, value_name = "FILE", global = true)]
    population: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// GDP of the most recent year on record
    LatestGdp {
        /// Country name as written in the dataset
        country: String,
    },

    /// GDP per capita at the most recent year both datasets cover
    PerCapita {
        /// Country name as written in the dataset
        country: String,
    },

    /// Change in GDP per capita over a number of years
    Growth {
        /// Country name as written in the dataset
        country: String,

        /// Period length in years (must be positive)
        #[arg(short, long, allow_negative_numbers = true)]
        years: i64,
    },

    /// Every GDP year on record for a country
    Series {
        /// Country name as written in the dataset
        country: String,
    },

    /// List countries in the GDP dataset
    Countries,

    /// Show what was loaded
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.logging.level.parse().unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!(gdp = %config.gdp.path.display(), population = %config.population.path.display(), "Loading datasets");
    let inspector = CountriesInspector::from_config(&config).context("Failed to load datasets")?;

    match cli.command {
        Commands::LatestGdp { country } => {
            match inspector.latest_country_gdp(&country)? {
                Some(value) => println!("Latest GDP for '{country}': {value}"),
                None => output::print_no_data(&country),
            }
        }
        Commands::PerCapita { country } => match inspector.gdp_per_capita_detail(&country)? {
            Some(per_capita) => println!(
                "GDP per capita for '{country}' ({}): {}",
                per_capita.year, per_capita.value
            ),
            None => output::print_no_data(&country),
        },
        Commands::Growth { country, years } => {
            match inspector.gdp_per_capita_growth(&country, years)? {
                Some(growth) => {
                    println!("GDP per capita growth for '{country}' over {years} years: {growth}");
                }
                None => output::print_no_data(&country),
            }
        }
        Commands::Series { country } => match inspector.gdp_series(&country)? {
            Some(series) => output::print_series(&country, &series),
            None => output::print_no_data(&country),
        },
        Commands::Countries => {
            for name in inspector.countries()? {
                println!("{name}");
            }
        }
        Commands::Stats => output::print_stats(&inspector, &config),
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<InspectorConfig> {
    let mut config = match &cli.config {
        Some(path) => InspectorConfig::load_from_path(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?,
        None => InspectorConfig::load().context("Failed to read configuration")?,
    };

    if let Some(gdp) = &cli.gdp {
        config.gdp.path.clone_from(gdp);
    }
    if let Some(population) = &cli.population {
        config.population.path.clone_from(population);
    }

    config.validate()?;
    Ok(config)
}
