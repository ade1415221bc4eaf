use serde::Serialize;

use crate::services::cost_simulation::SimulationError;

pub const DEFAULT_BREAK_EVEN_VOLUME: u32 = 1000;
pub const DEFAULT_TARGET_TIME: u32 = 24;
pub const DEFAULT_DEMAND_MULTIPLIER: f64 = 1.0;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub break_even_volume: u32,
    /// Accepted and reported, not used by the cost model.
    pub target_time: u32,
    pub demand_multiplier: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            break_even_volume: DEFAULT_BREAK_EVEN_VOLUME,
            target_time: DEFAULT_TARGET_TIME,
            demand_multiplier: DEFAULT_DEMAND_MULTIPLIER,
        }
    }
}

impl SimulationParameters {
    pub fn new(
        break_even_volume: u32,
        target_time: u32,
        demand_multiplier: f64,
    ) -> Result<Self, SimulationError> {
        let params = Self {
            break_even_volume,
            target_time,
            demand_multiplier,
        };
        params.validate()?;
        Ok(params)
    }

    /// Builds parameters from untyped form values.
    pub fn parse(
        break_even_volume: &str,
        target_time: &str,
        demand_multiplier: &str,
    ) -> Result<Self, SimulationError> {
        let break_even_volume = parse_positive_integer("breakEvenVolume", break_even_volume)?;
        let target_time = parse_positive_integer("targetTime", target_time)?;
        let demand_multiplier = demand_multiplier.trim().parse::<f64>().map_err(|_| {
            SimulationError::Validation(format!(
                "demandMultiplier must be a number, got {demand_multiplier:?}"
            ))
        })?;
        Self::new(break_even_volume, target_time, demand_multiplier)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.break_even_volume == 0 {
            return Err(SimulationError::Validation(
                "breakEvenVolume must be greater than zero".to_string(),
            ));
        }
        if self.target_time == 0 {
            return Err(SimulationError::Validation(
                "targetTime must be greater than zero".to_string(),
            ));
        }
        if !self.demand_multiplier.is_finite() || self.demand_multiplier <= 0.0 {
            return Err(SimulationError::Validation(
                "demandMultiplier must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_positive_integer(name: &str, value: &str) -> Result<u32, SimulationError> {
    value.trim().parse::<u32>().map_err(|_| {
        SimulationError::Validation(format!("{name} must be a positive integer, got {value:?}"))
    })
}

/// Main-warehouse versus RDC outcome for one order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub order_id: String,
    pub city: String,
    pub order_type: String,
    pub volume: i64,
    pub original_volume: i64,
    pub mw_cost: i64,
    pub rdc_cost: i64,
    pub savings_amount: i64,
    pub savings_percent: f64,
    pub recommended: bool,
    pub break_even_volume_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_time: Option<f64>,
}
