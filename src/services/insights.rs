use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::services::simulation_types::SimulationResult;
use crate::services::stats::{mean, percentage, round_to};

pub const DEFAULT_TRANSIT_TIME: f64 = 15.0;
pub const DEFAULT_MIN_VOLUME: f64 = 0.0;
pub const DEFAULT_SAVINGS_THRESHOLD: f64 = -100.0;
const NOT_AVAILABLE: &str = "N/A";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InsightsError {
    #[error("no simulation data available, run a simulation first")]
    NoData,
}

/// Half-open savings ranges `[lower, upper)` used for the histogram.
pub const SAVINGS_BUCKETS: [(&str, f64, f64); 7] = [
    ("<0%", f64::NEG_INFINITY, 0.0),
    ("0-5%", 0.0, 5.0),
    ("5-10%", 5.0, 10.0),
    ("10-15%", 10.0, 15.0),
    ("15-20%", 15.0, 20.0),
    ("20-30%", 20.0, 30.0),
    ("30%+", 30.0, f64::INFINITY),
];

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsFilter {
    pub cities: Option<HashSet<String>>,
    pub order_types: Option<HashSet<String>>,
    pub min_volume: f64,
    pub savings_threshold: f64,
}

impl Default for InsightsFilter {
    fn default() -> Self {
        Self {
            cities: None,
            order_types: None,
            min_volume: DEFAULT_MIN_VOLUME,
            savings_threshold: DEFAULT_SAVINGS_THRESHOLD,
        }
    }
}

impl InsightsFilter {
    /// Builds a filter from comma separated lists as sent by the dashboard.
    /// Blank lists disable the corresponding filter.
    pub fn from_lists(
        cities: Option<&str>,
        order_types: Option<&str>,
        min_volume: Option<f64>,
        savings_threshold: Option<f64>,
    ) -> Self {
        Self {
            cities: parse_list(cities),
            order_types: parse_list(order_types),
            min_volume: min_volume.unwrap_or(DEFAULT_MIN_VOLUME),
            savings_threshold: savings_threshold.unwrap_or(DEFAULT_SAVINGS_THRESHOLD),
        }
    }

    pub fn accepts(&self, result: &SimulationResult) -> bool {
        self.cities
            .as_ref()
            .is_none_or(|cities| cities.contains(&result.city))
            && self
                .order_types
                .as_ref()
                .is_none_or(|types| types.contains(&result.order_type))
            && result.volume as f64 >= self.min_volume
            && result.savings_percent >= self.savings_threshold
    }
}

fn parse_list(raw: Option<&str>) -> Option<HashSet<String>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.split(',').map(|item| item.trim().to_string()).collect())
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightsSummary {
    pub total_orders: usize,
    pub total_cities: usize,
    pub recommended_count: usize,
    pub recommended_percent: f64,
    /// Display text, e.g. `"14.7%"`.
    pub avg_savings: String,
    pub highest_saving_city: String,
    pub lowest_saving_city: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    pub bucket: &'static str,
    pub count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostTimePoint {
    pub city: String,
    pub time: f64,
    pub mw_cost: i64,
    pub rdc_cost: i64,
    pub volume: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VolumeSavingsPoint {
    pub city: String,
    pub volume: i64,
    pub savings: f64,
    pub recommended: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecommendationShare {
    pub name: &'static str,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsightsCharts {
    pub cost_vs_time: Vec<CostTimePoint>,
    pub savings_histogram: Vec<HistogramBucket>,
    pub volume_vs_savings: Vec<VolumeSavingsPoint>,
    pub recommendation_split: Vec<RecommendationShare>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRow {
    pub city: String,
    pub order_type: String,
    pub volume: i64,
    pub mw_cost: i64,
    pub rdc_cost: i64,
    pub savings: f64,
    pub transit_time: f64,
    pub recommended: bool,
    pub break_even_achieved: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub summary: InsightsSummary,
    pub charts: InsightsCharts,
    pub table_data: Vec<InsightsRow>,
}

/// Filters the results and derives the dashboard summary, charts and table.
///
/// # Errors
/// - [`InsightsError::NoData`] when `results` is empty. Filters that match
///   nothing produce an empty report instead.
pub fn build_insights(
    results: &[SimulationResult],
    filter: &InsightsFilter,
) -> Result<InsightsReport, InsightsError> {
    if results.is_empty() {
        return Err(InsightsError::NoData);
    }

    let filtered: Vec<&SimulationResult> = results.iter().filter(|r| filter.accepts(r)).collect();

    Ok(InsightsReport {
        summary: summarize(&filtered),
        charts: charts(&filtered),
        table_data: filtered.iter().map(|r| table_row(r)).collect(),
    })
}

fn summarize(filtered: &[&SimulationResult]) -> InsightsSummary {
    let total_cities = filtered
        .iter()
        .map(|r| r.city.as_str())
        .collect::<HashSet<_>>()
        .len();
    let recommended_count = filtered.iter().filter(|r| r.recommended).count();
    let (highest, lowest) = savings_extremes(filtered);

    InsightsSummary {
        total_orders: filtered.len(),
        total_cities,
        recommended_count,
        recommended_percent: round_to(percentage(recommended_count, filtered.len()), 1),
        avg_savings: format!(
            "{:.1}%",
            round_to(mean(filtered.iter().map(|r| r.savings_percent)), 1)
        ),
        highest_saving_city: highest.unwrap_or(NOT_AVAILABLE).to_string(),
        lowest_saving_city: lowest.unwrap_or(NOT_AVAILABLE).to_string(),
    }
}

/// Cities holding the first maximum and first minimum savings percentage.
fn savings_extremes<'a>(filtered: &[&'a SimulationResult]) -> (Option<&'a str>, Option<&'a str>) {
    let mut highest: Option<&SimulationResult> = None;
    let mut lowest: Option<&SimulationResult> = None;
    for &result in filtered {
        if highest.is_none_or(|best| result.savings_percent > best.savings_percent) {
            highest = Some(result);
        }
        if lowest.is_none_or(|worst| result.savings_percent < worst.savings_percent) {
            lowest = Some(result);
        }
    }
    (
        highest.map(|r| r.city.as_str()),
        lowest.map(|r| r.city.as_str()),
    )
}

pub fn savings_histogram<I>(savings: I) -> Vec<HistogramBucket>
where
    I: IntoIterator<Item = f64>,
{
    let mut counts = [0usize; SAVINGS_BUCKETS.len()];
    for value in savings {
        if let Some(slot) = SAVINGS_BUCKETS
            .iter()
            .position(|(_, lower, upper)| value >= *lower && value < *upper)
        {
            counts[slot] += 1;
        }
    }

    SAVINGS_BUCKETS
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|((label, _, _), count)| HistogramBucket {
            bucket: *label,
            count,
        })
        .collect()
}

fn charts(filtered: &[&SimulationResult]) -> InsightsCharts {
    if filtered.is_empty() {
        return InsightsCharts::default();
    }

    let recommended = filtered.iter().filter(|r| r.recommended).count();
    let not_recommended = filtered.len() - recommended;

    InsightsCharts {
        cost_vs_time: filtered
            .iter()
            .map(|r| CostTimePoint {
                city: r.city.clone(),
                time: transit_time(r),
                mw_cost: r.mw_cost,
                rdc_cost: r.rdc_cost,
                volume: r.volume,
            })
            .collect(),
        savings_histogram: savings_histogram(filtered.iter().map(|r| r.savings_percent)),
        volume_vs_savings: filtered
            .iter()
            .map(|r| VolumeSavingsPoint {
                city: r.city.clone(),
                volume: r.volume,
                savings: r.savings_percent,
                recommended: r.recommended,
            })
            .collect(),
        recommendation_split: vec![
            RecommendationShare {
                name: "Recommended",
                count: recommended,
                percentage: round_to(percentage(recommended, filtered.len()), 1),
            },
            RecommendationShare {
                name: "Not Recommended",
                count: not_recommended,
                percentage: round_to(percentage(not_recommended, filtered.len()), 1),
            },
        ],
    }
}

fn table_row(result: &SimulationResult) -> InsightsRow {
    InsightsRow {
        city: result.city.clone(),
        order_type: result.order_type.clone(),
        volume: result.volume,
        mw_cost: result.mw_cost,
        rdc_cost: result.rdc_cost,
        savings: result.savings_percent,
        transit_time: transit_time(result),
        recommended: result.recommended,
        break_even_achieved: result.savings_percent > 10.0 && result.volume > 200,
    }
}

fn transit_time(result: &SimulationResult) -> f64 {
    result.transit_time.unwrap_or(DEFAULT_TRANSIT_TIME)
}
