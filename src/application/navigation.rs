// Navigation controller - Section state machine and chart lifecycle
use crate::application::chart_registry::ChartRegistry;
use crate::application::content_fetcher::{extract_inline_scripts, ContentFetcher, FetchError};
use crate::application::dashboard_service::DashboardService;
use crate::application::resource_tracker::ResourceTracker;
use crate::domain::chart::ChartHandle;
use crate::domain::section::Section;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};

/// Lifecycle signals emitted once per transition, in order: `Leaving` for
/// the section being left, then `Shown` for the section made visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionEvent {
    Leaving(String),
    Shown(String),
}

#[derive(Debug, Error)]
pub enum NavError {
    #[error("unknown section '{0}'")]
    UnknownSection(String),
    #[error("section '{0}' is currently unavailable")]
    SectionDisabled(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("navigation to '{0}' was superseded by a newer transition")]
    Superseded(String),
}

/// What one completed transition hands to the client.
#[derive(Debug, Serialize)]
pub struct NavigationOutcome {
    pub section_id: String,
    pub html: String,
    /// Inline script bodies, to be re-created as fresh executable nodes.
    pub scripts: Vec<String>,
    pub charts: Vec<ChartHandle>,
    pub from_cache: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub id: String,
    pub title: String,
    pub disabled: bool,
    pub charts: usize,
}

/// Owns the one-visible-section invariant. Transitions fire only on explicit
/// `navigate` calls; there are no automatic transitions.
pub struct NavigationController {
    sections: Vec<Section>,
    visible: Mutex<Option<String>>,
    epoch: AtomicU64,
    events: broadcast::Sender<SectionEvent>,
    fetcher: Arc<ContentFetcher>,
    registry: Arc<ChartRegistry>,
    dashboard: Arc<DashboardService>,
    resources: Arc<ResourceTracker>,
    refresh_period: Option<Duration>,
}

impl NavigationController {
    pub fn new(
        sections: Vec<Section>,
        fetcher: Arc<ContentFetcher>,
        registry: Arc<ChartRegistry>,
        dashboard: Arc<DashboardService>,
        resources: Arc<ResourceTracker>,
        refresh_secs: u64,
    ) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            sections,
            visible: Mutex::new(None),
            epoch: AtomicU64::new(0),
            events,
            fetcher,
            registry,
            dashboard,
            resources,
            refresh_period: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SectionEvent> {
        self.events.subscribe()
    }

    pub fn sections(&self) -> Vec<SectionSummary> {
        self.sections
            .iter()
            .map(|s| SectionSummary {
                id: s.id.clone(),
                title: s.title.clone(),
                disabled: s.disabled,
                charts: s.chart_slots.len(),
            })
            .collect()
    }

    pub async fn current(&self) -> Option<String> {
        self.visible.lock().await.clone()
    }

    /// Transition to `target`: leaving signal, release the old section's
    /// resources and charts, hide, ensure content (cache hit when already
    /// loaded), show, shown signal, rebuild the target's chart slots.
    /// A transition that is overtaken while its fetch is in flight is
    /// discarded rather than shown.
    pub async fn navigate(&self, target: &str) -> Result<NavigationOutcome, NavError> {
        let section = self
            .sections
            .iter()
            .find(|s| s.id == target)
            .ok_or_else(|| NavError::UnknownSection(target.to_string()))?;
        if section.disabled {
            return Err(NavError::SectionDisabled(target.to_string()));
        }

        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let from_cache = self.fetcher.is_cached(target).await;

        let previous = {
            let mut visible = self.visible.lock().await;
            let previous = visible.take();
            if let Some(prev_id) = &previous {
                let _ = self.events.send(SectionEvent::Leaving(prev_id.clone()));
                self.resources.release(prev_id);
            }
            previous
        };

        let html = match self.fetcher.load(target).await {
            Ok(html) => html,
            Err(e) => {
                // The previous section stays active. Subscribers already saw
                // its leaving signal, so announce that it is shown again, and
                // restart its refresh task from the cached fragment.
                if let Some(prev_id) = &previous {
                    *self.visible.lock().await = Some(prev_id.clone());
                    let _ = self.events.send(SectionEvent::Shown(prev_id.clone()));
                    if let Some(prev) = self.sections.iter().find(|s| s.id == *prev_id) {
                        if let Ok(prev_html) = self.fetcher.load(prev_id).await {
                            self.spawn_refresh(prev, &prev_html);
                        }
                    }
                }
                return Err(NavError::Fetch(e));
            }
        };

        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!("discarding stale navigation to '{}'", target);
            // This transition's departing section will never be restored.
            // Drop its charts unless a newer transition has already made it
            // visible again.
            if let Some(prev_id) = &previous {
                let still_visible =
                    self.visible.lock().await.as_deref() == Some(prev_id.as_str());
                if !still_visible {
                    if let Some(prev) = self.sections.iter().find(|s| s.id == *prev_id) {
                        for slot in &prev.chart_slots {
                            self.registry.destroy(&slot.canvas_id);
                        }
                    }
                }
            }
            return Err(NavError::Superseded(target.to_string()));
        }

        // The old section's charts are released only once the new section is
        // definitely going to show; a failed fetch leaves them intact.
        if let Some(prev_id) = &previous {
            if let Some(prev) = self.sections.iter().find(|s| s.id == *prev_id) {
                for slot in &prev.chart_slots {
                    self.registry.destroy(&slot.canvas_id);
                }
            }
        }

        *self.visible.lock().await = Some(target.to_string());
        let _ = self.events.send(SectionEvent::Shown(target.to_string()));

        let charts = rebuild_charts(&self.registry, &self.dashboard, section, &html);
        self.spawn_refresh(section, &html);

        Ok(NavigationOutcome {
            section_id: target.to_string(),
            scripts: extract_inline_scripts(&html),
            html,
            charts,
            from_cache,
        })
    }

    /// Drop a section's cached fragment so the next navigation refetches it.
    pub async fn invalidate(&self, section_id: &str) {
        self.fetcher.clear(section_id).await;
    }

    /// Drop every cached fragment.
    pub async fn invalidate_all(&self) {
        self.fetcher.clear_all().await;
    }

    /// Periodic chart rebuild while a chart-owning section stays visible.
    /// Tracked per section and aborted on leave.
    fn spawn_refresh(&self, section: &Section, html: &str) {
        let Some(period) = self.refresh_period else {
            return;
        };
        if section.chart_slots.is_empty() {
            return;
        }

        let registry = self.registry.clone();
        let dashboard = self.dashboard.clone();
        let section = section.clone();
        let section_id = section.id.clone();
        let html = html.to_string();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                rebuild_charts(&registry, &dashboard, &section, &html);
            }
        });
        self.resources.track(&section_id, task.abort_handle());
    }
}

fn rebuild_charts(
    registry: &ChartRegistry,
    dashboard: &DashboardService,
    section: &Section,
    html: &str,
) -> Vec<ChartHandle> {
    let mut charts = Vec::new();
    for slot in &section.chart_slots {
        registry.destroy(&slot.canvas_id);
        let (data, options) = dashboard.build_chart(slot);
        match registry.create(&slot.canvas_id, slot.kind, data, options, html) {
            Some(handle) => charts.push(handle),
            None => {
                // Logged by the registry; a failed slot never fails the section.
            }
        }
    }
    charts
}
