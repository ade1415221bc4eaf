use std::path::Path;
use std::process::ExitCode;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_simulation_report;
use crate::services::cost_simulation::{run_simulation, run_simulation_with_rng};
use crate::services::dataset_builder::build_dataset;
use crate::services::grouped_summary::{GroupSummary, grouped_summary};
use crate::services::savings_chart::write_savings_chart_png;
use crate::services::simulation_types::{SimulationParameters, SimulationResult};
use crate::services::table_reader::read_table_from_path;

#[derive(Serialize)]
struct SimulationOutput<'a> {
    source: &'a str,
    parameters: &'a SimulationParameters,
    grouped_summary: &'a [GroupSummary],
    results: &'a [SimulationResult],
}

pub fn simulate_command(cmd: Commands) -> ExitCode {
    let Commands::Simulate {
        input,
        output,
        break_even_volume,
        target_time,
        demand_multiplier,
        seed,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let params = match SimulationParameters::new(break_even_volume, target_time, demand_multiplier) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Invalid simulation parameters: {e}");
            return ExitCode::FAILURE;
        }
    };

    let table = match read_table_from_path(Path::new(&input)) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Failed to read orders: {e}");
            return ExitCode::FAILURE;
        }
    };

    let dataset = match build_dataset(&table) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Failed to build dataset: {e}");
            return ExitCode::FAILURE;
        }
    };

    let simulation = match seed {
        Some(seed) => run_simulation_with_rng(&dataset, &params, StdRng::seed_from_u64(seed)),
        None => run_simulation(&dataset, &params),
    };
    let results = match simulation {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Failed to simulate orders: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(orders = results.len(), seed, "offline simulation completed");

    let groups = grouped_summary(&results);
    let yaml = match serde_yaml::to_string(&SimulationOutput {
        source: &input,
        parameters: &params,
        grouped_summary: &groups,
        results: &results,
    }) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize simulation output: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&output, yaml) {
        eprintln!("Failed to write simulation output: {e}");
        return ExitCode::FAILURE;
    }

    let chart_path = format!("{output}.png");
    let chart_written = match write_savings_chart_png(&chart_path, &results) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Failed to write savings chart: {e}");
            false
        }
    };

    println!(
        "{}",
        format_simulation_report(&input, &params, dataset.total_records(), &groups)
    );
    println!("Simulation result for {} orders written to {output}", results.len());
    if chart_written {
        println!("Savings chart written to {chart_path}");
    }
    ExitCode::SUCCESS
}
