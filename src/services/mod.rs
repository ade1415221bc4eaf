pub mod aggregate_metrics;
pub mod blueprint;
pub mod blueprint_types;
pub mod city_demand;
pub mod column_rules;
pub mod config;
pub mod cost_sampler;
pub mod cost_simulation;
pub mod dataset_builder;
pub mod grouped_summary;
pub mod insights;
pub mod order_details;
pub mod row_normalizer;
pub mod savings_chart;
pub mod session_state;
pub mod simulation_types;
pub mod stats;
pub mod table_reader;
