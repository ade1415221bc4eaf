use std::collections::HashMap;

use serde::Serialize;

use crate::domain::dataset::Dataset;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CityDemand {
    pub city: String,
    pub demand: f64,
    pub total_orders: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CityDemandSummary {
    pub city_summary: Vec<CityDemand>,
    pub total_orders: usize,
    pub total_cities: usize,
}

/// Raw order volume per city, largest demand first. Cities with equal demand
/// keep the order in which they first appear in the dataset.
pub fn city_demand(dataset: &Dataset) -> CityDemandSummary {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut cities: Vec<CityDemand> = Vec::new();

    for order in dataset.orders() {
        let slot = *index.entry(order.city.as_str()).or_insert_with(|| {
            cities.push(CityDemand {
                city: order.city.clone(),
                demand: 0.0,
                total_orders: 0,
            });
            cities.len() - 1
        });
        cities[slot].demand += order.volume;
        cities[slot].total_orders += 1;
    }

    cities.sort_by(|a, b| b.demand.total_cmp(&a.demand));

    CityDemandSummary {
        total_orders: dataset.total_records(),
        total_cities: cities.len(),
        city_summary: cities,
    }
}
