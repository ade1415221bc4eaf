use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::dataset::Dataset;
use crate::domain::order::OrderRecord;
use crate::domain::raw_table::RawTable;
use crate::services::row_normalizer::normalize_row;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DatasetError {
    #[error("uploaded table contains no rows")]
    EmptyInput,
}

/// Normalizes every row of `table`, in order, into a new [`Dataset`].
///
/// Rows are numbered from 1 for fallback identifiers. An `order_id` that was
/// already used by an earlier row gets a `-2`, `-3`, ... suffix so identifiers
/// stay unique within the dataset.
pub fn build_dataset(table: &RawTable) -> Result<Dataset, DatasetError> {
    if table.is_empty() {
        return Err(DatasetError::EmptyInput);
    }

    let mut seen_ids = HashSet::with_capacity(table.len());
    let mut renamed = 0usize;
    let mut orders = Vec::with_capacity(table.len());
    for (index, row) in table.rows.iter().enumerate() {
        let mut order = normalize_row(&table.columns, row, index + 1);
        if !seen_ids.insert(order.order_id.clone()) {
            order.order_id = unique_order_id(&order, &mut seen_ids);
            renamed += 1;
        }
        orders.push(order);
    }

    if renamed > 0 {
        warn!(renamed, "duplicate order ids were suffixed");
    }
    debug!(
        rows = orders.len(),
        columns = table.columns.len(),
        "dataset built"
    );
    Ok(Dataset::new(orders, table.columns.clone()))
}

fn unique_order_id(order: &OrderRecord, seen_ids: &mut HashSet<String>) -> String {
    let mut suffix = 2usize;
    loop {
        let candidate = format!("{}-{suffix}", order.order_id);
        if seen_ids.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}
