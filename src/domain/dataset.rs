use crate::domain::order::OrderRecord;

/// The normalized orders of one upload. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    orders: Vec<OrderRecord>,
    columns: Vec<String>,
}

impl Dataset {
    pub(crate) fn new(orders: Vec<OrderRecord>, columns: Vec<String>) -> Self {
        Self { orders, columns }
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn total_records(&self) -> usize {
        self.orders.len()
    }

    /// Column headers as they appeared in the source file.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
