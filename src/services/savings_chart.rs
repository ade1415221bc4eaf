use plotters::prelude::*;
use thiserror::Error;

use crate::services::insights::SAVINGS_BUCKETS;
use crate::services::simulation_types::SimulationResult;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to render savings chart: {0}")]
    Render(String),
}

/// Renders the savings distribution of `results` as a bar chart PNG.
/// Nothing is written for an empty result set.
pub fn write_savings_chart_png(
    output_path: &str,
    results: &[SimulationResult],
) -> Result<(), ChartError> {
    if results.is_empty() {
        return Ok(());
    }
    render_savings_chart(output_path, &bucket_counts(results))
}

fn bucket_counts(results: &[SimulationResult]) -> Vec<(usize, usize, usize)> {
    SAVINGS_BUCKETS
        .iter()
        .enumerate()
        .map(|(index, (_, lower, upper))| {
            let in_bucket = |r: &&SimulationResult| {
                r.savings_percent >= *lower && r.savings_percent < *upper
            };
            let recommended = results.iter().filter(in_bucket).filter(|r| r.recommended).count();
            let total = results.iter().filter(in_bucket).count();
            (index, recommended, total - recommended)
        })
        .collect()
}

fn render_savings_chart(
    output_path: &str,
    counts: &[(usize, usize, usize)],
) -> Result<(), ChartError> {
    let max_count = counts
        .iter()
        .map(|(_, recommended, other)| recommended + other)
        .max()
        .unwrap_or(1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Savings Distribution", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..SAVINGS_BUCKETS.len(), 0..(max_count + 1))
        .map_err(|e| ChartError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(SAVINGS_BUCKETS.len())
        .x_desc("RDC savings")
        .y_desc("Orders")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|index| {
            SAVINGS_BUCKETS
                .get(*index)
                .map(|(label, _, _)| label.to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let recommended_style = ShapeStyle::from(&RGBColor(34, 160, 90)).filled();
    let other_style = ShapeStyle::from(&RGBColor(30, 122, 204)).filled();
    chart
        .draw_series(counts.iter().map(|(index, recommended, _)| {
            Rectangle::new([(*index, 0), (*index + 1, *recommended)], recommended_style)
        }))
        .map_err(|e| ChartError::Render(e.to_string()))?
        .label("Recommended")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], recommended_style));
    chart
        .draw_series(counts.iter().map(|(index, recommended, other)| {
            Rectangle::new(
                [(*index, *recommended), (*index + 1, recommended + other)],
                other_style,
            )
        }))
        .map_err(|e| ChartError::Render(e.to_string()))?
        .label("Not recommended")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], other_style));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_result;

    #[test]
    fn counts_split_each_bucket_by_recommendation() {
        let mut results = vec![
            build_result("Pune", "B2B", true),
            build_result("Pune", "B2B", false),
            build_result("Pune", "B2B", false),
        ];
        results[0].savings_percent = 22.0;
        results[1].savings_percent = 24.0;
        results[2].savings_percent = -1.0;

        let counts = bucket_counts(&results);

        assert_eq!(counts.len(), SAVINGS_BUCKETS.len());
        assert_eq!(counts[0], (0, 0, 1));
        assert_eq!(counts[5], (5, 1, 1));
        let total: usize = counts.iter().map(|(_, r, o)| r + o).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn empty_results_write_nothing() {
        let path = std::env::temp_dir().join("fulfillsmart-empty-chart.png");
        let _ = std::fs::remove_file(&path);

        write_savings_chart_png(path.to_str().unwrap(), &[]).unwrap();

        assert!(!path.exists());
    }
}
