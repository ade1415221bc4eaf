use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::domain::dataset::Dataset;
use crate::domain::order::OrderRecord;
use crate::services::cost_sampler::{CostSampler, RngCostSampler};
use crate::services::row_normalizer::parse_number;
use crate::services::session_state::SessionState;
use crate::services::simulation_types::{SimulationParameters, SimulationResult};
use crate::services::stats::round_to;

const COST_PER_UNIT: f64 = 3.2;
const B2C_COST_MULTIPLIER: f64 = 1.3;
const B2B_RDC_REDUCTION: f64 = 0.20;
const DEFAULT_RDC_REDUCTION: f64 = 0.15;
const B2C_THRESHOLD_FACTOR: f64 = 1.2;
const RECOMMENDATION_MIN_SAVINGS_PERCENT: f64 = 8.0;

#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    #[error("dataset contains no orders")]
    EmptyInput,
    #[error("invalid simulation parameters: {0}")]
    Validation(String),
}

/// Runs the cost model over `dataset` with a fresh thread-local generator.
pub fn run_simulation(
    dataset: &Dataset,
    params: &SimulationParameters,
) -> Result<Vec<SimulationResult>, SimulationError> {
    let mut sampler = RngCostSampler::new(rand::thread_rng());
    run_simulation_with_sampler(dataset, params, &mut sampler)
}

pub fn run_simulation_with_rng<R: Rng>(
    dataset: &Dataset,
    params: &SimulationParameters,
    rng: R,
) -> Result<Vec<SimulationResult>, SimulationError> {
    let mut sampler = RngCostSampler::new(rng);
    run_simulation_with_sampler(dataset, params, &mut sampler)
}

pub fn run_simulation_with_sampler<S: CostSampler + ?Sized>(
    dataset: &Dataset,
    params: &SimulationParameters,
    sampler: &mut S,
) -> Result<Vec<SimulationResult>, SimulationError> {
    params.validate()?;
    if dataset.is_empty() {
        return Err(SimulationError::EmptyInput);
    }

    Ok(dataset
        .orders()
        .iter()
        .map(|order| simulate_order(order, params, sampler))
        .collect())
}

/// Runs the simulation and, only when it succeeds, replaces the published
/// results of `state` with the new collection.
pub fn simulate_and_publish<S: CostSampler + ?Sized>(
    state: &SessionState,
    dataset: &Dataset,
    params: &SimulationParameters,
    sampler: &mut S,
) -> Result<Arc<Vec<SimulationResult>>, SimulationError> {
    let results = run_simulation_with_sampler(dataset, params, sampler)?;
    let recommended = results.iter().filter(|result| result.recommended).count();
    info!(
        orders = results.len(),
        recommended,
        demand_multiplier = params.demand_multiplier,
        "simulation completed"
    );
    Ok(state.publish_results(results))
}

pub fn simulate_order<S: CostSampler + ?Sized>(
    order: &OrderRecord,
    params: &SimulationParameters,
    sampler: &mut S,
) -> SimulationResult {
    let is_b2c = order.order_type == "B2C";
    let volume = (order.volume * params.demand_multiplier) as i64;

    let cost_multiplier = if is_b2c { B2C_COST_MULTIPLIER } else { 1.0 };
    let mw_cost = volume as f64 * COST_PER_UNIT * cost_multiplier
        + order.base_cost
        + sampler.warehouse_surcharge();

    let cost_reduction = if order.order_type == "B2B" {
        B2B_RDC_REDUCTION
    } else {
        DEFAULT_RDC_REDUCTION
    };
    let rdc_cost = mw_cost * (1.0 - cost_reduction) + sampler.rdc_adjustment();

    let mw_cost = mw_cost as i64;
    let rdc_cost = rdc_cost as i64;
    let savings_amount = mw_cost - rdc_cost;
    let savings_percent = savings_percent(mw_cost, savings_amount);

    let threshold = volume_threshold(params.break_even_volume, is_b2c);
    let recommended =
        volume as f64 >= threshold && savings_percent > RECOMMENDATION_MIN_SAVINGS_PERCENT;

    SimulationResult {
        order_id: order.order_id.clone(),
        city: order.city.clone(),
        order_type: order.order_type.to_uppercase(),
        volume,
        original_volume: order.volume as i64,
        mw_cost,
        rdc_cost,
        savings_amount,
        savings_percent,
        recommended,
        break_even_volume_threshold: threshold,
        transit_time: order.extra("transit_time").and_then(parse_number),
    }
}

pub fn savings_percent(mw_cost: i64, savings_amount: i64) -> f64 {
    if mw_cost == 0 {
        return 0.0;
    }
    round_to(100.0 * savings_amount as f64 / mw_cost as f64, 1)
}

pub fn volume_threshold(break_even_volume: u32, is_b2c: bool) -> f64 {
    let break_even_volume = f64::from(break_even_volume);
    if is_b2c {
        break_even_volume * B2C_THRESHOLD_FACTOR
    } else {
        break_even_volume
    }
}
