//! Human-readable output for CLI results.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use countrystat_core::{CountriesInspector, DatasetConfig, InspectorConfig, RecordIndex};

pub fn print_no_data(country: &str) {
    println!("No data for '{country}'");
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let header: Vec<Cell> = header.iter().map(|c| Cell::new(c).fg(Color::Cyan)).collect();
    table.set_header(header);
    table
}

pub fn print_series(country: &str, series: &[(i32, f64)]) {
    let mut table = new_table(&["Year", "GDP"]);
    for (year, value) in series {
        table.add_row(vec![Cell::new(year), Cell::new(value)]);
    }
    println!("GDP series for '{country}'");
    println!("{table}");
}

pub fn print_stats(inspector: &CountriesInspector, config: &InspectorConfig) {
    let mut table = new_table(&["Dataset", "Path", "Status", "Keys", "Records"]);
    table.add_row(stats_row("GDP", &config.gdp, inspector.gdp_index()));
    table.add_row(stats_row(
        "Population",
        &config.population,
        inspector.population_index(),
    ));
    println!("{table}");
}

fn stats_row(name: &str, dataset: &DatasetConfig, index: Option<&RecordIndex>) -> Vec<Cell> {
    let path = Cell::new(dataset.path.display());
    match index {
        Some(index) => {
            let stats = index.stats();
            vec![
                Cell::new(name),
                path,
                Cell::new("loaded").fg(Color::Green),
                Cell::new(stats.keys),
                Cell::new(stats.records),
            ]
        }
        None => vec![
            Cell::new(name),
            path,
            Cell::new("unavailable").fg(Color::Red),
            Cell::new("-"),
            Cell::new("-"),
        ],
    }
}
