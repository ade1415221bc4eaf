use std::collections::HashMap;

/// One decoded row: original column name to raw cell text, `None` for empty cells.
pub type RawRow = HashMap<String, Option<String>>;

/// A decoded spreadsheet before any normalization happens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row given positionally; cells beyond the header are dropped and
    /// missing trailing cells are treated as empty.
    pub fn push_cells<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut row = RawRow::with_capacity(self.columns.len());
        let mut cells = cells.into_iter();
        for column in &self.columns {
            let value = cells.next().flatten().map(Into::into);
            row.insert(column.clone(), value);
        }
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_cells_aligns_cells_with_columns() {
        let mut table = RawTable::new(vec!["City".to_string(), "Volume".to_string()]);
        table.push_cells([Some("Pune"), Some("500"), Some("ignored")]);
        table.push_cells([Some("Delhi")]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("Volume").cloned().flatten(), Some("500".into()));
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].get("Volume").cloned().flatten(), None);
    }

    #[test]
    fn new_table_is_empty() {
        let table = RawTable::new(vec!["City".to_string()]);
        assert!(table.is_empty());
    }
}
