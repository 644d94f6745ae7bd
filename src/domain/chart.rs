// Chart payload domain models
use super::section::ChartKind;
use serde::Serialize;
use serde_json::Value;

/// A label/value series ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            values: Vec::new(),
        }
    }
}

/// A live chart bound to a canvas. Owned exclusively by the chart registry
/// entry for its canvas id.
#[derive(Debug, Clone, Serialize)]
pub struct ChartHandle {
    pub canvas_id: String,
    pub kind: ChartKind,
    pub data: ChartSeries,
    pub options: Value,
}

/// Palette used across dashboard charts.
pub const PRIMARY_COLORS: [&str; 12] = [
    "#1a365d", "#2d5282", "#3b6eb6", "#598ade", "#84abeb", "#adc8f5",
    "#6b32a8", "#8a41d8", "#a463f3", "#bc86f8", "#d1a9fc", "#e5ccfe",
];

/// Status slice colors, in Paid/Pending/Overdue order.
pub const STATUS_COLORS: [&str; 3] = ["#2E7D32", "#e65100", "#c62828"];
