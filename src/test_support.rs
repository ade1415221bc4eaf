use std::collections::BTreeMap;

use crate::domain::order::OrderRecord;
use crate::domain::raw_table::{RawRow, RawTable};
use crate::services::cost_sampler::CostSampler;
use crate::services::simulation_types::SimulationResult;

// A CostSampler that always returns the same surcharge and adjustment
pub struct FixedCostSampler {
    surcharge: f64,
    adjustment: f64,
}

impl FixedCostSampler {
    pub fn new(surcharge: f64, adjustment: f64) -> Self {
        Self {
            surcharge,
            adjustment,
        }
    }
}

impl CostSampler for FixedCostSampler {
    fn warehouse_surcharge(&mut self) -> f64 {
        self.surcharge
    }

    fn rdc_adjustment(&mut self) -> f64 {
        self.adjustment
    }
}

pub fn raw_row(cells: &[(&str, &str)]) -> RawRow {
    cells
        .iter()
        .map(|(column, value)| (column.to_string(), Some(value.to_string())))
        .collect()
}

// Empty strings become missing cells
pub fn table_from(columns: &[&str], rows: &[&[&str]]) -> RawTable {
    let mut table = RawTable::new(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        table.push_cells(
            row.iter()
                .map(|cell| if cell.is_empty() { None } else { Some(*cell) }),
        );
    }
    table
}

pub fn build_order(
    order_id: &str,
    city: &str,
    volume: f64,
    order_type: &str,
    base_cost: f64,
) -> OrderRecord {
    OrderRecord {
        order_id: order_id.to_string(),
        city: city.to_string(),
        volume,
        order_type: order_type.to_string(),
        base_cost,
        extras: BTreeMap::new(),
    }
}

pub fn build_result(city: &str, order_type: &str, recommended: bool) -> SimulationResult {
    let (mw_cost, rdc_cost) = if recommended { (4000, 3200) } else { (4000, 3800) };
    SimulationResult {
        order_id: "ORD_0001".to_string(),
        city: city.to_string(),
        order_type: order_type.to_string(),
        volume: 1000,
        original_volume: 1000,
        mw_cost,
        rdc_cost,
        savings_amount: mw_cost - rdc_cost,
        savings_percent: if recommended { 20.0 } else { 5.0 },
        recommended,
        break_even_volume_threshold: 1000.0,
        transit_time: None,
    }
}
