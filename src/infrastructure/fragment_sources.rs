// Fragment source implementations - HTTP and local disk
use crate::application::fragment_source::FragmentSource;
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;

/// Fetches fragments over HTTP. Non-success statuses are misses, not errors.
pub struct HttpFragmentSource {
    client: reqwest::Client,
}

impl HttpFragmentSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFragmentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, location: &str) -> anyhow::Result<Option<String>> {
        let response = self
            .client
            .get(location)
            .send()
            .await
            .with_context(|| format!("request to {} failed", location))?;

        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }
}

/// Reads fragments from local directories. The cache-busting query suffix is
/// meaningless for files and is stripped.
pub struct DiskFragmentSource;

#[async_trait]
impl FragmentSource for DiskFragmentSource {
    async fn fetch(&self, location: &str) -> anyhow::Result<Option<String>> {
        let path: PathBuf = location.split('?').next().unwrap_or(location).into();
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed reading {}", path.display())),
        }
    }
}

/// Pick the transport from the shape of the configured base locations.
pub fn source_for(base_locations: &[String]) -> std::sync::Arc<dyn FragmentSource> {
    let remote = base_locations.iter().any(|b| b.starts_with("http"));
    if remote {
        std::sync::Arc::new(HttpFragmentSource::new())
    } else {
        std::sync::Arc::new(DiskFragmentSource)
    }
}
