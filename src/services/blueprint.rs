use chrono::{DateTime, Local};
use rand::Rng;
use tracing::debug;

use crate::services::blueprint_types::{
    BlueprintMetrics, BlueprintReport, BlueprintRequest, Bottleneck, BottleneckRisk, Optimization,
    OptimizationReport, Priority, Recommendation, Workflow, WorkflowStep, Workforce, Zone,
    ZoneAnalysis, ZoneCatalog, ZoneType, ZoneTypeInfo,
};
use crate::services::stats::{mean, round_to};

const HOURLY_WAGE: f64 = 25.0;
const ORDERS_PER_WORKER_HOUR: f64 = 8.0;
const TRAINING_HOURS_PER_WORKER: f64 = 2.5;
const EMPTY_FLOOR_EFFICIENCY: f64 = 75.0;
const LOW_EFFICIENCY: f64 = 70.0;
const LONG_STEP_MINUTES: f64 = 30.0;

/// Runs the floor-plan heuristics with a fresh thread-local generator.
pub fn simulate_blueprint(request: &BlueprintRequest) -> BlueprintReport {
    simulate_blueprint_with_rng(request, &mut rand::thread_rng())
}

pub fn simulate_blueprint_with_rng<R: Rng>(
    request: &BlueprintRequest,
    rng: &mut R,
) -> BlueprintReport {
    let zone_analysis: Vec<ZoneAnalysis> = request
        .zones
        .iter()
        .map(|zone| analyze_zone(zone, &request.workforce, rng))
        .collect();
    let workflow = analyze_workflow(request, rng);
    let metrics = floor_metrics(request, &zone_analysis, rng);
    let recommendations = recommendations(request, &zone_analysis);

    debug!(
        zones = request.zones.len(),
        workers = request.workforce.total(),
        efficiency = metrics.overall_efficiency,
        "blueprint simulated"
    );

    BlueprintReport {
        metrics,
        zone_analysis,
        workflow,
        recommendations,
    }
}

fn jitter<R: Rng>(rng: &mut R, center: f64, spread: f64) -> f64 {
    center + rng.gen_range(-spread..=spread)
}

/// Classified from the unrounded efficiency.
fn bottleneck_risk(efficiency: f64) -> BottleneckRisk {
    if efficiency < 60.0 {
        BottleneckRisk::High
    } else if efficiency < 75.0 {
        BottleneckRisk::Medium
    } else {
        BottleneckRisk::Low
    }
}

fn analyze_zone<R: Rng>(zone: &Zone, workforce: &Workforce, rng: &mut R) -> ZoneAnalysis {
    let kind = zone.kind();
    let utilization = jitter(rng, 60.0, 15.0).clamp(45.0, 95.0);
    let efficiency = jitter(rng, base_efficiency(kind), 10.0).clamp(50.0, 95.0);

    let bottleneck_risk = bottleneck_risk(efficiency);

    ZoneAnalysis {
        id: zone.id.clone(),
        label: zone.label.clone(),
        utilization: round_to(utilization, 1),
        efficiency: round_to(efficiency, 1),
        capacity: (zone.area() * capacity_per_area(kind)) as u64,
        bottleneck_risk,
        cost_impact: round_to(zone_workers(kind, workforce) * HOURLY_WAGE, 2),
    }
}

fn base_efficiency(kind: ZoneType) -> f64 {
    match kind {
        ZoneType::Storage => 75.0,
        ZoneType::Receiving => 85.0,
        ZoneType::Packing => 80.0,
        ZoneType::Shipping => 82.0,
        ZoneType::QualityControl => 70.0,
        ZoneType::Office => 90.0,
        ZoneType::Other => 75.0,
    }
}

fn capacity_per_area(kind: ZoneType) -> f64 {
    match kind {
        ZoneType::Storage => 15.0,
        ZoneType::Receiving => 8.0,
        ZoneType::Packing => 12.0,
        ZoneType::Shipping => 10.0,
        ZoneType::QualityControl => 5.0,
        ZoneType::Office => 2.0,
        ZoneType::Other => 10.0,
    }
}

fn zone_workers(kind: ZoneType, workforce: &Workforce) -> f64 {
    match kind {
        ZoneType::Storage => workforce.pickers as f64 * 0.6,
        ZoneType::Receiving => workforce.pickers as f64 * 0.2,
        ZoneType::Packing => workforce.packers as f64,
        ZoneType::Shipping => workforce.packers as f64 * 0.3,
        ZoneType::QualityControl => workforce.quality_control as f64,
        ZoneType::Office => workforce.supervisors as f64,
        ZoneType::Other => 2.0,
    }
}

// (zone required, step name, duration center/spread, efficiency center/spread)
const WORKFLOW_STEPS: [(ZoneType, &str, f64, f64, f64, f64); 6] = [
    (ZoneType::Receiving, "Receiving", 15.0, 3.0, 85.0, 10.0),
    (ZoneType::QualityControl, "Quality Control", 8.0, 2.0, 78.0, 8.0),
    (ZoneType::Storage, "Storage/Put-away", 20.0, 5.0, 82.0, 12.0),
    (ZoneType::Storage, "Picking", 35.0, 8.0, 75.0, 15.0),
    (ZoneType::Packing, "Packing", 12.0, 3.0, 88.0, 8.0),
    (ZoneType::Shipping, "Shipping", 10.0, 2.0, 90.0, 5.0),
];

fn analyze_workflow<R: Rng>(request: &BlueprintRequest, rng: &mut R) -> Workflow {
    let steps: Vec<WorkflowStep> = WORKFLOW_STEPS
        .iter()
        .filter(|(kind, ..)| request.has_zone(*kind))
        .map(|&(_, name, duration, duration_spread, efficiency, efficiency_spread)| {
            WorkflowStep {
                name,
                duration: round_to(jitter(rng, duration, duration_spread), 1),
                efficiency: round_to(jitter(rng, efficiency, efficiency_spread), 1),
            }
        })
        .collect();

    let mut bottlenecks = Vec::new();
    for step in &steps {
        if step.efficiency < LOW_EFFICIENCY {
            bottlenecks.push(Bottleneck {
                step: step.name,
                issue: format!("Low efficiency ({:.1}%) may cause delays", step.efficiency),
            });
        }
        if step.duration > LONG_STEP_MINUTES {
            bottlenecks.push(Bottleneck {
                step: step.name,
                issue: format!("Long duration ({:.1} min) creates bottleneck", step.duration),
            });
        }
    }

    Workflow {
        total_time: round_to(steps.iter().map(|s| s.duration).sum(), 1),
        average_efficiency: round_to(mean(steps.iter().map(|s| s.efficiency)), 1),
        steps,
        bottlenecks,
    }
}

/// Share of the warehouse floor covered by zones, in percent.
fn space_utilization(request: &BlueprintRequest) -> f64 {
    let warehouse_area = request.warehouse.area();
    if warehouse_area > 0.0 {
        request.used_area() / warehouse_area * 100.0
    } else {
        0.0
    }
}

fn floor_metrics<R: Rng>(
    request: &BlueprintRequest,
    zone_analysis: &[ZoneAnalysis],
    rng: &mut R,
) -> BlueprintMetrics {
    let workers = request.workforce.total() as f64;
    let used_area = request.used_area();
    let overall_efficiency = if used_area > 0.0 {
        request
            .zones
            .iter()
            .zip(zone_analysis)
            .map(|(zone, analysis)| analysis.efficiency * zone.area())
            .sum::<f64>()
            / used_area
    } else {
        EMPTY_FLOOR_EFFICIENCY
    };

    BlueprintMetrics {
        overall_efficiency: round_to(overall_efficiency, 1),
        throughput: (workers * ORDERS_PER_WORKER_HOUR * overall_efficiency / 100.0) as u64,
        labor_cost: round_to(workers * HOURLY_WAGE, 2),
        space_utilization: round_to(space_utilization(request), 1),
        staff_utilization: round_to(jitter(rng, 85.0, 10.0), 1),
        productivity_index: round_to(overall_efficiency * 1.2, 1),
        training_hours: (workers * TRAINING_HOURS_PER_WORKER).round_ties_even() as u64,
    }
}

fn recommendations(request: &BlueprintRequest, zone_analysis: &[ZoneAnalysis]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let low_efficiency: Vec<&str> = zone_analysis
        .iter()
        .filter(|z| z.efficiency < LOW_EFFICIENCY)
        .map(|z| z.label.as_str())
        .collect();
    if !low_efficiency.is_empty() {
        recommendations.push(Recommendation {
            title: "Optimize Low-Efficiency Zones",
            description: format!(
                "Zones {} are operating below 70% efficiency. Consider reorganizing layout, \
                 adding automation, or increasing staffing.",
                low_efficiency.join(", ")
            ),
            priority: Priority::High,
            impact: "15-25% efficiency improvement",
            savings: "$2,500-5,000/month",
        });
    }

    let workers = request.workforce.total();
    if (request.workforce.pickers as f64) < workers as f64 * 0.4 {
        recommendations.push(Recommendation {
            title: "Increase Picking Staff",
            description: "Current picking staff ratio is below optimal. Consider hiring \
                          additional pickers to improve throughput."
                .to_string(),
            priority: Priority::Medium,
            impact: "10-15% throughput increase",
            savings: "$1,800-3,200/month",
        });
    }

    let space_utilization = space_utilization(request);
    if space_utilization < 60.0 {
        recommendations.push(Recommendation {
            title: "Optimize Space Utilization",
            description: format!(
                "Only {space_utilization:.1}% of warehouse space is being used for operational \
                 zones. Consider expanding zones or adding new functional areas."
            ),
            priority: Priority::Medium,
            impact: "20-30% capacity increase",
            savings: "$3,000-6,000/month",
        });
    }

    if !request.has_zone(ZoneType::QualityControl) && request.zones.len() > 2 {
        recommendations.push(Recommendation {
            title: "Add Quality Control Zone",
            description: "No dedicated quality control area detected. Adding QC zone can \
                          reduce returns and improve customer satisfaction."
                .to_string(),
            priority: Priority::Low,
            impact: "5-10% quality improvement",
            savings: "$1,200-2,500/month",
        });
    }

    let automated = request.zones.iter().any(|zone| {
        zone.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains("automated"))
    });
    if workers > 20 && !automated {
        recommendations.push(Recommendation {
            title: "Consider Automation Solutions",
            description: "With your current workforce size, automated guided vehicles (AGVs) \
                          or conveyor systems could improve efficiency and reduce labor costs."
                .to_string(),
            priority: Priority::Medium,
            impact: "25-40% efficiency improvement",
            savings: "$8,000-15,000/month",
        });
    }

    recommendations
}

pub fn optimize_blueprint(request: &BlueprintRequest) -> OptimizationReport {
    optimize_blueprint_at(request, Local::now())
}

pub fn optimize_blueprint_at(
    request: &BlueprintRequest,
    generated_at: DateTime<Local>,
) -> OptimizationReport {
    let mut optimizations = Vec::new();

    if space_utilization(request) < 60.0 {
        optimizations.push(Optimization {
            kind: "space",
            title: "Expand Storage Zones",
            description: "Increase storage zone sizes to better utilize available space",
            impact: "25% capacity increase",
            confidence: 0.85,
        });
    }

    let storage_zones = request
        .zones
        .iter()
        .filter(|zone| zone.kind() == ZoneType::Storage)
        .count();
    if storage_zones > 1 {
        optimizations.push(Optimization {
            kind: "layout",
            title: "Consolidate Storage Areas",
            description: "Combine smaller storage zones for improved efficiency",
            impact: "15% picking efficiency increase",
            confidence: 0.78,
        });
    }

    if request.has_zone(ZoneType::Receiving) && request.has_zone(ZoneType::Shipping) {
        optimizations.push(Optimization {
            kind: "workflow",
            title: "Optimize Flow Path",
            description: "Reorganize zones to create efficient receiving-to-shipping workflow",
            impact: "20% processing time reduction",
            confidence: 0.92,
        });
    }

    OptimizationReport {
        optimizations,
        generated_at: generated_at.to_rfc3339(),
        total_potential_improvement: "25-45%",
    }
}

pub fn zone_catalog() -> ZoneCatalog {
    ZoneCatalog(
        ZoneType::KNOWN
            .iter()
            .map(|&kind| (kind, zone_type_info(kind)))
            .collect(),
    )
}

fn zone_type_info(kind: ZoneType) -> ZoneTypeInfo {
    match kind {
        ZoneType::Storage => ZoneTypeInfo {
            label: "Storage",
            description: "Main inventory storage area with racking systems",
            default_width: 150,
            default_height: 120,
            bg_color: "bg-blue-100",
            border_color: "border-blue-300",
            min_workers: 3,
            optimal_workers: 8,
        },
        ZoneType::Receiving => ZoneTypeInfo {
            label: "Receiving",
            description: "Inbound shipment processing and inspection area",
            default_width: 100,
            default_height: 80,
            bg_color: "bg-green-100",
            border_color: "border-green-300",
            min_workers: 2,
            optimal_workers: 4,
        },
        ZoneType::Packing => ZoneTypeInfo {
            label: "Packing",
            description: "Order fulfillment and packaging stations",
            default_width: 120,
            default_height: 90,
            bg_color: "bg-purple-100",
            border_color: "border-purple-300",
            min_workers: 2,
            optimal_workers: 6,
        },
        ZoneType::Shipping => ZoneTypeInfo {
            label: "Shipping",
            description: "Outbound processing and loading dock area",
            default_width: 100,
            default_height: 70,
            bg_color: "bg-orange-100",
            border_color: "border-orange-300",
            min_workers: 1,
            optimal_workers: 3,
        },
        ZoneType::QualityControl => ZoneTypeInfo {
            label: "Quality Control",
            description: "Product inspection and quality assurance area",
            default_width: 80,
            default_height: 60,
            bg_color: "bg-yellow-100",
            border_color: "border-yellow-300",
            min_workers: 1,
            optimal_workers: 3,
        },
        ZoneType::Office | ZoneType::Other => ZoneTypeInfo {
            label: "Office",
            description: "Administrative and management workspace",
            default_width: 80,
            default_height: 50,
            bg_color: "bg-gray-100",
            border_color: "border-gray-300",
            min_workers: 1,
            optimal_workers: 2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::blueprint_types::Warehouse;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn zone(id: &str, kind: &str, width: u32, height: u32) -> Zone {
        Zone {
            id: id.to_string(),
            zone_type: kind.to_string(),
            label: format!("{kind} {id}"),
            description: None,
            width,
            height,
            x: 0,
            y: 0,
        }
    }

    fn request(zones: Vec<Zone>) -> BlueprintRequest {
        BlueprintRequest {
            warehouse: Warehouse {
                name: "Test".to_string(),
                width: 100,
                height: 100,
            },
            zones,
            workforce: Workforce::default(),
        }
    }

    #[test]
    fn zone_analysis_stays_within_bounds() {
        let request = request(vec![
            zone("1", "Storage", 40, 50),
            zone("2", "Receiving", 10, 10),
            zone("3", "Packing", 10, 10),
            zone("4", "Shipping", 10, 10),
            zone("5", "QualityControl", 10, 10),
            zone("6", "Office", 10, 10),
            zone("7", "Cafeteria", 10, 10),
        ]);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let report = simulate_blueprint_with_rng(&request, &mut rng);
            for analysis in &report.zone_analysis {
                assert!((45.0..=95.0).contains(&analysis.utilization));
                assert!((50.0..=95.0).contains(&analysis.efficiency));
                // efficiency is reported at one decimal, so near a threshold either side is valid
                let possible = [
                    bottleneck_risk(analysis.efficiency - 0.05),
                    bottleneck_risk(analysis.efficiency + 0.05),
                ];
                assert!(
                    possible.contains(&analysis.bottleneck_risk),
                    "{:?} at efficiency {}",
                    analysis.bottleneck_risk,
                    analysis.efficiency
                );
            }
            assert!((75.0..=95.0).contains(&report.metrics.staff_utilization));
        }
    }

    #[test]
    fn risk_thresholds_use_the_unrounded_efficiency() {
        assert_eq!(bottleneck_risk(59.99), BottleneckRisk::High);
        assert_eq!(bottleneck_risk(60.0), BottleneckRisk::Medium);
        assert_eq!(bottleneck_risk(74.96), BottleneckRisk::Medium);
        assert_eq!(bottleneck_risk(75.0), BottleneckRisk::Low);
    }

    #[test]
    fn capacity_and_cost_follow_zone_type() {
        let request = request(vec![
            zone("s", "Storage", 40, 50),
            zone("r", "Receiving", 10, 10),
            zone("q", "QualityControl", 10, 10),
            zone("x", "Cafeteria", 10, 10),
        ]);

        let report = simulate_blueprint_with_rng(&request, &mut StdRng::seed_from_u64(1));

        let capacity: Vec<u64> = report.zone_analysis.iter().map(|z| z.capacity).collect();
        assert_eq!(capacity, vec![30_000, 800, 500, 1000]);
        // pickers 10, quality control 3
        let cost: Vec<f64> = report.zone_analysis.iter().map(|z| z.cost_impact).collect();
        assert_eq!(cost, vec![150.0, 50.0, 75.0, 50.0]);
    }

    #[test]
    fn metrics_use_workforce_and_floor_area() {
        let request = request(vec![zone("s", "Storage", 50, 50), zone("p", "Packing", 50, 50)]);

        let metrics = simulate_blueprint_with_rng(&request, &mut StdRng::seed_from_u64(5)).metrics;

        // 21 workers, 52.5 training hours round to even
        assert_eq!(metrics.labor_cost, 525.0);
        assert_eq!(metrics.training_hours, 52);
        assert_eq!(metrics.space_utilization, 50.0);
    }

    #[test]
    fn overall_efficiency_drives_throughput() {
        let request = request(vec![zone("s", "Storage", 1, 1)]);

        let report = simulate_blueprint_with_rng(&request, &mut StdRng::seed_from_u64(8));
        let efficiency = report.zone_analysis[0].efficiency;

        assert_eq!(report.metrics.overall_efficiency, efficiency);
        assert_eq!(report.metrics.throughput, (21.0 * 8.0 * efficiency / 100.0) as u64);
        assert_eq!(report.metrics.productivity_index, round_to(efficiency * 1.2, 1));
    }

    #[test]
    fn empty_floor_uses_neutral_efficiency() {
        let mut empty = request(Vec::new());
        empty.warehouse.width = 0;

        let report = simulate_blueprint_with_rng(&empty, &mut StdRng::seed_from_u64(9));

        assert_eq!(report.metrics.overall_efficiency, 75.0);
        assert_eq!(report.metrics.productivity_index, 90.0);
        assert_eq!(report.metrics.space_utilization, 0.0);
        assert!(report.workflow.steps.is_empty());
        assert_eq!(report.workflow.total_time, 0.0);
        assert_eq!(report.workflow.average_efficiency, 0.0);
    }

    #[test]
    fn workflow_steps_follow_present_zones() {
        let request = request(vec![
            zone("s", "Storage", 10, 10),
            zone("h", "Shipping", 10, 10),
            zone("x", "Cafeteria", 10, 10),
        ]);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let workflow = simulate_blueprint_with_rng(&request, &mut rng).workflow;
            let names: Vec<&str> = workflow.steps.iter().map(|s| s.name).collect();
            assert_eq!(names, vec!["Storage/Put-away", "Picking", "Shipping"]);

            let picking = &workflow.steps[1];
            assert!((27.0..=43.0).contains(&picking.duration));
            let expected_bottlenecks = workflow
                .steps
                .iter()
                .map(|s| usize::from(s.efficiency < 70.0) + usize::from(s.duration > 30.0))
                .sum::<usize>();
            assert_eq!(workflow.bottlenecks.len(), expected_bottlenecks);
        }
    }

    #[test]
    fn recommendations_flag_staffing_space_and_missing_qc() {
        let mut request = request(vec![
            zone("a", "Storage", 10, 10),
            zone("b", "Packing", 10, 10),
            zone("c", "Shipping", 10, 10),
        ]);
        request.workforce = Workforce {
            pickers: 2,
            packers: 10,
            quality_control: 5,
            supervisors: 5,
        };

        let report = simulate_blueprint_with_rng(&request, &mut StdRng::seed_from_u64(2));
        let titles: Vec<&str> = report
            .recommendations
            .iter()
            .map(|r| r.title)
            .filter(|t| *t != "Optimize Low-Efficiency Zones")
            .collect();

        assert_eq!(
            titles,
            vec![
                "Increase Picking Staff",
                "Optimize Space Utilization",
                "Add Quality Control Zone",
                "Consider Automation Solutions",
            ]
        );
    }

    #[test]
    fn automated_zones_suppress_the_automation_hint() {
        let mut automated = zone("a", "Storage", 100, 100);
        automated.description = Some("Fully AUTOMATED racking".to_string());
        let mut request = request(vec![automated]);
        request.workforce.pickers = 30;

        let report = simulate_blueprint_with_rng(&request, &mut StdRng::seed_from_u64(4));

        assert!(
            report
                .recommendations
                .iter()
                .all(|r| r.title != "Consider Automation Solutions")
        );
    }

    #[test]
    fn optimize_suggests_space_layout_and_flow() {
        let request = request(vec![
            zone("s1", "Storage", 10, 10),
            zone("s2", "Storage", 10, 10),
            zone("r", "Receiving", 10, 10),
            zone("h", "Shipping", 10, 10),
        ]);
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();

        let report = optimize_blueprint_at(&request, now);

        let kinds: Vec<(&str, f64)> = report
            .optimizations
            .iter()
            .map(|o| (o.kind, o.confidence))
            .collect();
        assert_eq!(kinds, vec![("space", 0.85), ("layout", 0.78), ("workflow", 0.92)]);
        assert_eq!(report.generated_at, now.to_rfc3339());
        assert_eq!(report.total_potential_improvement, "25-45%");
    }

    #[test]
    fn well_used_floor_needs_no_optimization() {
        let request = request(vec![zone("s", "Storage", 100, 80)]);
        let report = optimize_blueprint(&request);
        assert!(report.optimizations.is_empty());
    }

    #[test]
    fn catalog_lists_the_six_zone_types_in_order() {
        let json = serde_json::to_string(&zone_catalog()).unwrap();
        let positions: Vec<usize> = ZoneType::KNOWN
            .iter()
            .map(|kind| json.find(&format!("\"{}\":", kind.name())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["QualityControl"]["label"], "Quality Control");
        assert_eq!(value["Storage"]["defaultWidth"], 150);
        assert_eq!(value["Shipping"]["bgColor"], "bg-orange-100");
        assert_eq!(value["Office"]["borderColor"], "border-gray-300");
        assert_eq!(value["Packing"]["optimalWorkers"], 6);
    }
}
