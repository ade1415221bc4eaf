use std::collections::BTreeMap;

use crate::domain::order::{DEFAULT_BASE_COST, DEFAULT_ORDER_TYPE, DEFAULT_VOLUME, OrderRecord};
use crate::domain::raw_table::RawRow;
use crate::services::column_rules::{TargetField, classify_column, sanitize_key};

/// Turns one raw row into an [`OrderRecord`].
///
/// Columns are visited in header order, so when two headers map onto the same
/// field the later one wins. Empty cells are skipped, unparseable numbers
/// become `0`, and fields that are still missing afterwards fall back to
/// defaults derived from the 1-based `row_index`.
pub fn normalize_row(columns: &[String], row: &RawRow, row_index: usize) -> OrderRecord {
    let mut city = None;
    let mut volume = None;
    let mut order_type = None;
    let mut base_cost = None;
    let mut order_id = None;
    let mut extras = BTreeMap::new();

    for column in columns {
        let Some(value) = cell_value(row, column) else {
            continue;
        };

        match classify_column(column) {
            Some(TargetField::City) => city = Some(value.to_string()),
            Some(TargetField::Volume) => volume = Some(parse_number_or_zero(value)),
            Some(TargetField::OrderType) => order_type = Some(value.to_uppercase()),
            Some(TargetField::BaseCost) => base_cost = Some(parse_number_or_zero(value)),
            Some(TargetField::OrderId) => order_id = Some(value.to_string()),
            None => {
                extras.insert(sanitize_key(column), value.to_string());
            }
        }
    }

    OrderRecord {
        order_id: order_id.unwrap_or_else(|| OrderRecord::fallback_order_id(row_index)),
        city: city.unwrap_or_else(|| OrderRecord::fallback_city(row_index)),
        volume: volume.unwrap_or(DEFAULT_VOLUME),
        order_type: order_type.unwrap_or_else(|| DEFAULT_ORDER_TYPE.to_string()),
        base_cost: base_cost.unwrap_or(DEFAULT_BASE_COST),
        extras,
    }
}

fn cell_value<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    let value = row.get(column)?.as_deref()?.trim();
    if value.is_empty() { None } else { Some(value) }
}

/// Lenient numeric parse for spreadsheet cells: thousands separators are
/// stripped, anything else that is not a finite number yields `None`.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn parse_number_or_zero(value: &str) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::raw_row;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn normalizes_a_minimal_row() {
        let columns = columns(&["City", "Volume", "Type"]);
        let row = raw_row(&[("City", "Pune"), ("Volume", "500"), ("Type", "b2b")]);

        let order = normalize_row(&columns, &row, 1);

        assert_eq!(order.city, "Pune");
        assert_eq!(order.volume, 500.0);
        assert_eq!(order.order_type, "B2B");
        assert_eq!(order.base_cost, 0.0);
        assert_eq!(order.order_id, "ORD_0001");
        assert!(order.extras.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let columns = columns(&["Notes"]);
        let row = raw_row(&[("Notes", "fragile")]);

        let order = normalize_row(&columns, &row, 7);

        assert_eq!(order.city, "City_7");
        assert_eq!(order.volume, 10000.0);
        assert_eq!(order.order_type, "B2B");
        assert_eq!(order.base_cost, 0.0);
        assert_eq!(order.order_id, "ORD_0007");
        assert_eq!(order.extra("notes"), Some("fragile"));
    }

    #[test]
    fn unparseable_numbers_become_zero_not_defaults() {
        let columns = columns(&["Demand", "Unit Price"]);
        let row = raw_row(&[("Demand", "lots"), ("Unit Price", "n/a")]);

        let order = normalize_row(&columns, &row, 1);

        assert_eq!(order.volume, 0.0);
        assert_eq!(order.base_cost, 0.0);
    }

    #[test]
    fn empty_cells_are_skipped() {
        let columns = columns(&["City", "Volume", "Remarks"]);
        let mut row = raw_row(&[("City", "   ")]);
        row.insert("Volume".to_string(), None);
        row.insert("Remarks".to_string(), Some(String::new()));

        let order = normalize_row(&columns, &row, 3);

        assert_eq!(order.city, "City_3");
        assert_eq!(order.volume, 10000.0);
        assert!(order.extras.is_empty());
    }

    #[test]
    fn values_are_trimmed_and_extras_use_sanitized_keys() {
        let columns = columns(&["Order ID", " Delivery Location ", "Transit Time", "Cost"]);
        let row = raw_row(&[
            ("Order ID", "  A-17 "),
            (" Delivery Location ", " Mumbai "),
            ("Transit Time", " 12 "),
            ("Cost", "1,250.5"),
        ]);

        let order = normalize_row(&columns, &row, 1);

        assert_eq!(order.order_id, "A-17");
        assert_eq!(order.city, "Mumbai");
        assert_eq!(order.base_cost, 1250.5);
        assert_eq!(order.extra("transit_time"), Some("12"));
    }

    #[test]
    fn later_columns_overwrite_earlier_ones_for_the_same_field() {
        let columns = columns(&["Order Type", "Customer Type"]);
        let row = raw_row(&[("Order Type", "b2b"), ("Customer Type", "b2c")]);

        let order = normalize_row(&columns, &row, 1);

        assert_eq!(order.order_type, "B2C");
    }

    #[test]
    fn parse_number_rejects_non_finite_values() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" 1e3 "), Some(1000.0));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(""), None);
    }
}
