use crate::domain::section::{ChartKind, ChartSource, Section};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub content: ContentSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentSettings {
    /// Ordered candidate base locations for section fragments.
    pub base_locations: Vec<String>,
    /// Directory the server itself serves fragments from.
    pub fragment_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_engine_available")]
    pub engine_available: bool,
    /// Chart auto-refresh period while a section is visible; 0 disables it.
    #[serde(default)]
    pub refresh_secs: u64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            engine_available: true,
            refresh_secs: 0,
        }
    }
}

fn default_engine_available() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct SectionsConfig {
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SectionConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub charts: Vec<ChartSlotConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSlotConfig {
    pub canvas: String,
    pub kind: ChartKind,
    pub source: ChartSource,
}

impl SectionConfig {
    pub fn into_section(self) -> Section {
        Section {
            id: self.id,
            title: self.title,
            disabled: self.disabled,
            chart_slots: self
                .charts
                .into_iter()
                .map(|c| crate::domain::section::ChartSlot {
                    canvas_id: c.canvas,
                    kind: c.kind,
                    source: c.source,
                })
                .collect(),
        }
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_sections_config() -> anyhow::Result<SectionsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/sections"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
