pub mod dataset;
pub mod order;
pub mod raw_table;
