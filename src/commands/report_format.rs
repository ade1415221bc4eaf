use crate::services::grouped_summary::GroupSummary;
use crate::services::simulation_types::SimulationParameters;

pub fn format_simulation_report(
    source: &str,
    params: &SimulationParameters,
    total_orders: usize,
    groups: &[GroupSummary],
) -> String {
    let recommended: usize = groups.iter().map(|g| g.recommended_count).sum();

    let mut lines = Vec::new();
    lines.push("RDC Simulation Report".to_string());
    lines.push(format!("Data source: {source}"));
    lines.push(format!("Break-even volume: {}", params.break_even_volume));
    lines.push(format!("Target time: {}h", params.target_time));
    lines.push(format!("Demand multiplier: {:.2}", params.demand_multiplier));
    lines.push(format!("Orders: {total_orders}"));
    lines.push(format!("Recommended for RDC: {recommended}"));
    lines.push(String::new());
    lines.push("City | Type | Orders | Avg MW | Avg RDC | Avg savings | Recommended | Verdict".to_string());
    lines.push("-----|------|--------|--------|---------|-------------|-------------|--------".to_string());
    for group in groups {
        lines.push(format_group_row(group));
    }

    lines.join("\n")
}

fn format_group_row(group: &GroupSummary) -> String {
    format!(
        "{city} | {order_type} | {orders} | {mw} | {rdc} | {savings:.1}% | {percent:.1}% | {verdict}",
        city = group.city,
        order_type = group.order_type,
        orders = group.total_orders,
        mw = group.avg_mw_cost,
        rdc = group.avg_rdc_cost,
        savings = group.avg_savings_percent,
        percent = group.recommendation_percent,
        verdict = if group.summary_verdict { "RDC" } else { "MW" },
    )
}
