// Section domain model
use serde::{Deserialize, Serialize};

/// One top-level navigable panel of the application. Registered at startup,
/// content loaded lazily on first navigation, hidden rather than destroyed.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub disabled: bool,
    pub chart_slots: Vec<ChartSlot>,
}

/// Association between a canvas placeholder in a section's fragment and the
/// chart that should render there.
#[derive(Debug, Clone)]
pub struct ChartSlot {
    pub canvas_id: String,
    pub kind: ChartKind,
    pub source: ChartSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
    Pie,
}

/// Which derived dataset feeds a chart slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartSource {
    MonthlyRevenue,
    EntityTotals,
    StatusCounts,
}
