use crate::services::simulation_types::SimulationResult;

/// Results whose city and order type equal the query, ignoring case, each
/// relabelled with a display id such as `PUN-B2B-001`.
///
/// The returned entries are copies; the published results are not touched.
pub fn order_details(
    results: &[SimulationResult],
    city: &str,
    order_type: &str,
) -> Vec<SimulationResult> {
    let city = city.to_lowercase();
    let order_type = order_type.to_lowercase();

    results
        .iter()
        .filter(|r| r.city.to_lowercase() == city && r.order_type.to_lowercase() == order_type)
        .enumerate()
        .map(|(index, result)| {
            let mut detail = result.clone();
            detail.order_id = display_id(&result.city, &result.order_type, index + 1);
            detail
        })
        .collect()
}

fn display_id(city: &str, order_type: &str, position: usize) -> String {
    let prefix: String = city.chars().take(3).collect::<String>().to_uppercase();
    format!("{prefix}-{order_type}-{position:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session_state::SessionState;
    use crate::test_support::build_result;

    #[test]
    fn filters_case_insensitively_and_assigns_display_ids() {
        let results = vec![
            build_result("Pune", "B2B", true),
            build_result("Delhi", "B2B", true),
            build_result("pune", "B2B", false),
            build_result("Pune", "B2C", true),
            build_result("Puneville", "B2B", true),
        ];

        let details = order_details(&results, "PUNE", "b2b");

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].order_id, "PUN-B2B-001");
        assert_eq!(details[1].order_id, "PUN-B2B-002");
        assert!(details[0].recommended);
        assert!(!details[1].recommended);
    }

    #[test]
    fn empty_or_unmatched_results_give_empty_details() {
        assert!(order_details(&[], "Pune", "B2B").is_empty());

        let results = vec![build_result("Delhi", "B2B", true)];
        assert!(order_details(&results, "Pune", "B2B").is_empty());
    }

    #[test]
    fn short_city_names_use_the_whole_name() {
        let results = vec![build_result("Ur", "B2C", true)];
        let details = order_details(&results, "ur", "B2C");
        assert_eq!(details[0].order_id, "UR-B2C-001");
    }

    #[test]
    fn published_results_keep_their_order_ids() {
        let state = SessionState::new();
        let mut result = build_result("Pune", "B2B", true);
        result.order_id = "A-17".to_string();
        state.publish_results(vec![result]);

        let details = order_details(&state.latest_results(), "Pune", "B2B");

        assert_eq!(details[0].order_id, "PUN-B2B-001");
        assert_eq!(state.latest_results()[0].order_id, "A-17");
    }
}
