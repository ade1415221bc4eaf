use serde::Serialize;

/// Dashboard-level counters. Placeholder figures that do not depend on any
/// uploaded data.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AggregateMetrics {
    pub total_simulations: u32,
    pub avg_cost_savings: f64,
    pub avg_time_savings: f64,
    pub active_rdcs: u32,
    pub cities_covered: u32,
}

pub const AGGREGATE_METRICS: AggregateMetrics = AggregateMetrics {
    total_simulations: 150,
    avg_cost_savings: 23.5,
    avg_time_savings: 15.2,
    active_rdcs: 8,
    cities_covered: 45,
};

pub fn aggregate_metrics() -> AggregateMetrics {
    AGGREGATE_METRICS
}
