// Chart registry - At most one live chart per canvas id
use crate::domain::chart::{ChartHandle, ChartSeries};
use crate::domain::section::ChartKind;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Single owner of all live chart instances. Every create/destroy goes
/// through here; nothing else mutates a chart.
pub struct ChartRegistry {
    charts: Mutex<HashMap<String, ChartHandle>>,
    engine_available: bool,
}

impl ChartRegistry {
    pub fn new(engine_available: bool) -> Self {
        Self {
            charts: Mutex::new(HashMap::new()),
            engine_available,
        }
    }

    /// Create a chart bound to `canvas_id`, destroying any existing chart on
    /// that canvas first. Returns `None` (never errors) when the canvas is
    /// absent from the active fragment or the charting engine is unavailable.
    pub fn create(
        &self,
        canvas_id: &str,
        kind: ChartKind,
        data: ChartSeries,
        options: Value,
        fragment_html: &str,
    ) -> Option<ChartHandle> {
        if !self.engine_available {
            tracing::warn!("charting engine unavailable, skipping '{}'", canvas_id);
            return None;
        }
        if !Self::has_canvas(fragment_html, canvas_id) {
            tracing::error!("canvas '{}' not found in active fragment", canvas_id);
            return None;
        }

        self.destroy(canvas_id);

        let handle = ChartHandle {
            canvas_id: canvas_id.to_string(),
            kind,
            data,
            options: Self::merge_options(options),
        };

        tracing::debug!("created {:?} chart on canvas '{}'", kind, canvas_id);
        self.charts
            .lock()
            .ok()?
            .insert(canvas_id.to_string(), handle.clone());
        Some(handle)
    }

    /// Release the chart for a canvas id. No-op if absent.
    pub fn destroy(&self, canvas_id: &str) -> bool {
        let Ok(mut charts) = self.charts.lock() else {
            return false;
        };
        if charts.remove(canvas_id).is_some() {
            tracing::debug!("destroyed chart on canvas '{}'", canvas_id);
            true
        } else {
            false
        }
    }

    /// Release every chart. Individual failures are logged and skipped.
    pub fn destroy_all(&self) {
        match self.charts.lock() {
            Ok(mut charts) => {
                tracing::debug!("destroying all {} charts", charts.len());
                charts.clear();
            }
            Err(e) => tracing::error!("chart registry lock poisoned: {}", e),
        }
    }

    pub fn get(&self, canvas_id: &str) -> Option<ChartHandle> {
        self.charts.lock().ok()?.get(canvas_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.charts.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A canvas "exists" when the fragment declares an element with its id.
    pub fn has_canvas(fragment_html: &str, canvas_id: &str) -> bool {
        fragment_html.contains(&format!("id=\"{}\"", canvas_id))
            || fragment_html.contains(&format!("id='{}'", canvas_id))
    }

    /// Shallow-merge caller options over the fixed defaults; caller values
    /// win per top-level key.
    fn merge_options(overrides: Value) -> Value {
        let mut merged = json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "bottom" } }
        });

        if let (Some(base), Some(extra)) = (merged.as_object_mut(), overrides.as_object()) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}
