// Transport trait for section fragment retrieval
use async_trait::async_trait;

#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Retrieve one candidate location. `Ok(None)` means the location
    /// responded but had nothing usable (non-success status, missing file);
    /// `Err` means the transport itself failed.
    async fn fetch(&self, location: &str) -> anyhow::Result<Option<String>>;
}
