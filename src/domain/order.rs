use std::collections::BTreeMap;

use serde::Serialize;

pub const DEFAULT_VOLUME: f64 = 10000.0;
pub const DEFAULT_ORDER_TYPE: &str = "B2B";
pub const DEFAULT_BASE_COST: f64 = 0.0;

/// A single logistics order after its spreadsheet row has been normalized.
///
/// The five core fields are always populated. Columns that did not map onto a
/// core field are kept in `extras` under their sanitized header name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub city: String,
    pub volume: f64,
    pub order_type: String,
    pub base_cost: f64,
    #[serde(flatten)]
    pub extras: BTreeMap<String, String>,
}

impl OrderRecord {
    pub fn fallback_city(row_index: usize) -> String {
        format!("City_{row_index}")
    }

    pub fn fallback_order_id(row_index: usize) -> String {
        format!("ORD_{row_index:04}")
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}
