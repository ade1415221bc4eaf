use std::collections::HashMap;

use serde::Serialize;

use crate::services::simulation_types::SimulationResult;
use crate::services::stats::{mean, percentage, round_to};

const VERDICT_MIN_RECOMMENDATION_PERCENT: f64 = 60.0;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub city: String,
    pub order_type: String,
    pub total_orders: usize,
    pub avg_volume: i64,
    pub avg_mw_cost: i64,
    pub avg_rdc_cost: i64,
    pub avg_savings_percent: f64,
    pub recommendation_percent: f64,
    pub recommended_count: usize,
    pub summary_verdict: bool,
}

/// One row per distinct `(city, order_type)` pair, in order of first appearance.
pub fn grouped_summary(results: &[SimulationResult]) -> Vec<GroupSummary> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<Vec<&SimulationResult>> = Vec::new();

    for result in results {
        let key = (result.city.as_str(), result.order_type.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(result);
    }

    groups.iter().map(|members| summarize_group(members)).collect()
}

fn summarize_group(members: &[&SimulationResult]) -> GroupSummary {
    let total_orders = members.len();
    let recommended_count = members.iter().filter(|r| r.recommended).count();
    let recommendation_percent = percentage(recommended_count, total_orders);

    GroupSummary {
        city: members[0].city.clone(),
        order_type: members[0].order_type.clone(),
        total_orders,
        avg_volume: mean(members.iter().map(|r| r.volume as f64)).round_ties_even() as i64,
        avg_mw_cost: mean(members.iter().map(|r| r.mw_cost as f64)).round_ties_even() as i64,
        avg_rdc_cost: mean(members.iter().map(|r| r.rdc_cost as f64)).round_ties_even() as i64,
        avg_savings_percent: round_to(mean(members.iter().map(|r| r.savings_percent)), 1),
        recommendation_percent: round_to(recommendation_percent, 1),
        recommended_count,
        summary_verdict: recommendation_percent > VERDICT_MIN_RECOMMENDATION_PERCENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_result;

    #[test]
    fn empty_results_give_empty_summary() {
        assert!(grouped_summary(&[]).is_empty());
    }

    #[test]
    fn half_recommended_group_has_negative_verdict() {
        let results = vec![
            build_result("Delhi", "B2B", true),
            build_result("Delhi", "B2B", false),
        ];

        let summary = grouped_summary(&results);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].city, "Delhi");
        assert_eq!(summary[0].order_type, "B2B");
        assert_eq!(summary[0].total_orders, 2);
        assert_eq!(summary[0].recommended_count, 1);
        assert_eq!(summary[0].recommendation_percent, 50.0);
        assert!(!summary[0].summary_verdict);
    }

    #[test]
    fn groups_by_city_and_order_type_with_rounded_means() {
        let mut a = build_result("Pune", "B2B", true);
        a.volume = 100;
        a.mw_cost = 1000;
        a.rdc_cost = 801;
        a.savings_percent = 19.9;
        let mut b = build_result("Pune", "B2B", true);
        b.volume = 101;
        b.mw_cost = 2001;
        b.rdc_cost = 1600;
        b.savings_percent = 20.04;
        let mut c = build_result("Pune", "B2B", true);
        c.volume = 102;
        c.mw_cost = 3000;
        c.rdc_cost = 2400;
        c.savings_percent = 20.0;
        let d = build_result("Pune", "B2C", false);
        let e = build_result("Agra", "B2B", true);

        let summary = grouped_summary(&[a, d, b, e, c]);

        let keys: Vec<(&str, &str)> = summary
            .iter()
            .map(|g| (g.city.as_str(), g.order_type.as_str()))
            .collect();
        assert_eq!(keys, vec![("Pune", "B2B"), ("Pune", "B2C"), ("Agra", "B2B")]);

        let pune_b2b = &summary[0];
        assert_eq!(pune_b2b.total_orders, 3);
        assert_eq!(pune_b2b.avg_volume, 101);
        assert_eq!(pune_b2b.avg_mw_cost, 2000);
        assert_eq!(pune_b2b.avg_rdc_cost, 1600);
        assert_eq!(pune_b2b.avg_savings_percent, 20.0);
        assert_eq!(pune_b2b.recommendation_percent, 100.0);
        assert!(pune_b2b.summary_verdict);
    }

    #[test]
    fn verdict_uses_the_unrounded_percentage() {
        // 2 of 3 recommended => 66.7%
        let results = vec![
            build_result("Goa", "B2C", true),
            build_result("Goa", "B2C", true),
            build_result("Goa", "B2C", false),
        ];

        let summary = grouped_summary(&results);

        assert_eq!(summary[0].recommendation_percent, 66.7);
        assert!(summary[0].summary_verdict);
    }

    #[test]
    fn integer_averages_round_ties_to_even() {
        let mut low = build_result("Pune", "B2B", true);
        low.volume = 100;
        let mut high = build_result("Pune", "B2B", true);
        high.volume = 101;
        high.mw_cost = 4001;

        let summary = grouped_summary(&[low, high]);

        assert_eq!(summary[0].avg_volume, 100);
        assert_eq!(summary[0].avg_mw_cost, 4000);
    }

    #[test]
    fn summarizing_twice_is_idempotent() {
        let results = vec![
            build_result("Delhi", "B2B", true),
            build_result("Pune", "B2C", false),
            build_result("Delhi", "B2B", false),
        ];
        assert_eq!(grouped_summary(&results), grouped_summary(&results));
    }
}
