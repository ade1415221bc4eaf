use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneType {
    Storage,
    Receiving,
    Packing,
    Shipping,
    QualityControl,
    Office,
    Other,
}

impl ZoneType {
    pub const KNOWN: [ZoneType; 6] = [
        ZoneType::Storage,
        ZoneType::Receiving,
        ZoneType::Packing,
        ZoneType::Shipping,
        ZoneType::QualityControl,
        ZoneType::Office,
    ];

    /// Unknown names map to [`ZoneType::Other`]; matching is exact.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Storage" => ZoneType::Storage,
            "Receiving" => ZoneType::Receiving,
            "Packing" => ZoneType::Packing,
            "Shipping" => ZoneType::Shipping,
            "QualityControl" => ZoneType::QualityControl,
            "Office" => ZoneType::Office,
            _ => ZoneType::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZoneType::Storage => "Storage",
            ZoneType::Receiving => "Receiving",
            ZoneType::Packing => "Packing",
            ZoneType::Shipping => "Shipping",
            ZoneType::QualityControl => "QualityControl",
            ZoneType::Office => "Office",
            ZoneType::Other => "Other",
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Warehouse {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Default for Warehouse {
    fn default() -> Self {
        Self {
            name: "My Warehouse".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

impl Warehouse {
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: String,
    #[serde(rename = "type")]
    pub zone_type: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Zone {
    pub fn kind(&self) -> ZoneType {
        ZoneType::from_name(&self.zone_type)
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Workforce {
    pub pickers: u32,
    pub packers: u32,
    pub quality_control: u32,
    pub supervisors: u32,
}

impl Default for Workforce {
    fn default() -> Self {
        Self {
            pickers: 10,
            packers: 6,
            quality_control: 3,
            supervisors: 2,
        }
    }
}

impl Workforce {
    pub fn total(&self) -> u32 {
        self.pickers + self.packers + self.quality_control + self.supervisors
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BlueprintRequest {
    #[serde(default)]
    pub warehouse: Warehouse,
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub workforce: Workforce,
}

impl BlueprintRequest {
    pub fn used_area(&self) -> f64 {
        self.zones.iter().map(Zone::area).sum()
    }

    pub fn has_zone(&self, kind: ZoneType) -> bool {
        self.zones.iter().any(|zone| zone.kind() == kind)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottleneckRisk {
    High,
    Medium,
    Low,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneAnalysis {
    pub id: String,
    pub label: String,
    pub utilization: f64,
    pub efficiency: f64,
    pub capacity: u64,
    pub bottleneck_risk: BottleneckRisk,
    pub cost_impact: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WorkflowStep {
    pub name: &'static str,
    pub duration: f64,
    pub efficiency: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Bottleneck {
    pub step: &'static str,
    pub issue: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub total_time: f64,
    pub average_efficiency: f64,
    pub steps: Vec<WorkflowStep>,
    pub bottlenecks: Vec<Bottleneck>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintMetrics {
    pub overall_efficiency: f64,
    pub throughput: u64,
    pub labor_cost: f64,
    pub space_utilization: f64,
    pub staff_utilization: f64,
    pub productivity_index: f64,
    pub training_hours: u64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: String,
    pub priority: Priority,
    pub impact: &'static str,
    pub savings: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintReport {
    pub metrics: BlueprintMetrics,
    pub zone_analysis: Vec<ZoneAnalysis>,
    pub workflow: Workflow,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Optimization {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
    pub confidence: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OptimizationReport {
    pub optimizations: Vec<Optimization>,
    pub generated_at: String,
    pub total_potential_improvement: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTypeInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub default_width: u32,
    pub default_height: u32,
    pub bg_color: &'static str,
    pub border_color: &'static str,
    pub min_workers: u32,
    pub optimal_workers: u32,
}

/// Zone type name to its dashboard defaults, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCatalog(pub Vec<(ZoneType, ZoneTypeInfo)>);

impl Serialize for ZoneCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (kind, info) in &self.0 {
            map.serialize_entry(kind.name(), info)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_zone_names_are_other() {
        assert_eq!(ZoneType::from_name("Storage"), ZoneType::Storage);
        assert_eq!(ZoneType::from_name("QualityControl"), ZoneType::QualityControl);
        assert_eq!(ZoneType::from_name("storage"), ZoneType::Other);
        assert_eq!(ZoneType::from_name("Cafeteria"), ZoneType::Other);
    }

    #[test]
    fn request_fills_missing_sections_with_defaults() {
        let request: BlueprintRequest = serde_json::from_str(
            r#"{"zones":[{"id":"z1","type":"Storage","label":"A","width":10,"height":20,"x":0,"y":0}]}"#,
        )
        .unwrap();

        assert_eq!(request.warehouse, Warehouse::default());
        assert_eq!(request.workforce.total(), 21);
        assert_eq!(request.zones[0].description, None);
        assert_eq!(request.used_area(), 200.0);
        assert!(request.has_zone(ZoneType::Storage));
        assert!(!request.has_zone(ZoneType::Office));
    }

    #[test]
    fn workforce_reads_camel_case_fields() {
        let workforce: Workforce =
            serde_json::from_str(r#"{"pickers":4,"qualityControl":7}"#).unwrap();
        assert_eq!(workforce.pickers, 4);
        assert_eq!(workforce.packers, 6);
        assert_eq!(workforce.quality_control, 7);
    }
}
