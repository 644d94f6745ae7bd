// Content fetcher - Cached retrieval of section fragments
use crate::application::fragment_source::FragmentSource;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
#[error("failed to load section '{section_id}', tried: {}", .attempted.join(", "))]
pub struct FetchError {
    pub section_id: String,
    pub attempted: Vec<String>,
}

/// Loads section fragments from an ordered list of candidate base locations,
/// caching the first non-empty success per section id. Repeated loads for the
/// same id return the cached text until the cache is cleared for that id.
pub struct ContentFetcher {
    source: Arc<dyn FragmentSource>,
    base_locations: Vec<String>,
    cache: Mutex<HashMap<String, String>>,
}

impl ContentFetcher {
    pub fn new(source: Arc<dyn FragmentSource>, base_locations: Vec<String>) -> Self {
        Self {
            source,
            base_locations,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn load(&self, section_id: &str) -> Result<String, FetchError> {
        if let Some(content) = self.cache.lock().await.get(section_id) {
            return Ok(content.clone());
        }

        let mut attempted = Vec::new();

        // First pass with a cache-busting query, second pass plain.
        let bust = chrono::Utc::now().timestamp_millis();
        for cache_bust in [Some(bust), None] {
            for base in &self.base_locations {
                let url = Self::fragment_url(base, section_id, cache_bust);
                attempted.push(url.clone());

                match self.source.fetch(&url).await {
                    Ok(Some(content)) => {
                        if content.trim().is_empty() {
                            tracing::warn!("section '{}' at {} is empty", section_id, url);
                            continue;
                        }
                        tracing::debug!("loaded section '{}' from {}", section_id, url);
                        self.cache
                            .lock()
                            .await
                            .insert(section_id.to_string(), content.clone());
                        return Ok(content);
                    }
                    Ok(None) => {
                        tracing::debug!("section '{}' not found at {}", section_id, url);
                    }
                    Err(e) => {
                        tracing::warn!("fetch failed for {}: {}", url, e);
                    }
                }
            }
        }

        Err(FetchError {
            section_id: section_id.to_string(),
            attempted,
        })
    }

    pub async fn is_cached(&self, section_id: &str) -> bool {
        self.cache.lock().await.contains_key(section_id)
    }

    /// Drop the cached fragment for one section.
    pub async fn clear(&self, section_id: &str) {
        self.cache.lock().await.remove(section_id);
    }

    pub async fn clear_all(&self) {
        self.cache.lock().await.clear();
    }

    fn fragment_url(base: &str, section_id: &str, cache_bust: Option<i64>) -> String {
        let encoded = urlencoding::encode(section_id);
        match cache_bust {
            Some(v) => format!("{}/{}.html?v={}", base.trim_end_matches('/'), encoded, v),
            None => format!("{}/{}.html", base.trim_end_matches('/'), encoded),
        }
    }
}

/// Pull the bodies of inline `<script>` tags out of a fragment so the client
/// can re-create them as fresh executable nodes instead of inert markup.
pub fn extract_inline_scripts(html: &str) -> Vec<String> {
    let lower = html.to_ascii_lowercase();
    let mut scripts = Vec::new();
    let mut pos = 0;

    while let Some(open) = lower[pos..].find("<script") {
        let open = pos + open;
        let Some(tag_end) = lower[open..].find('>') else {
            break;
        };
        let body_start = open + tag_end + 1;
        let Some(close) = lower[body_start..].find("</script>") else {
            break;
        };
        let body = &html[body_start..body_start + close];
        if !body.trim().is_empty() {
            scripts.push(body.to_string());
        }
        pos = body_start + close + "</script>".len();
    }

    scripts
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        // location substring -> content served
        fragments: Vec<(String, String)>,
        requests: AtomicUsize,
    }

    impl StubSource {
        fn new(fragments: Vec<(&str, &str)>) -> Self {
            Self {
                fragments: fragments
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                requests: AtomicUsize::new(0),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FragmentSource for StubSource {
        async fn fetch(&self, location: &str) -> anyhow::Result<Option<String>> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            let path = location.split('?').next().unwrap_or(location);
            Ok(self
                .fragments
                .iter()
                .find(|(k, _)| path == *k)
                .map(|(_, v)| v.clone()))
        }
    }

    #[tokio::test]
    async fn test_second_load_hits_cache() {
        let source = Arc::new(StubSource::new(vec![(
            "components/dashboard.html",
            "<div>dash</div>",
        )]));
        let fetcher = ContentFetcher::new(source.clone(), vec!["components".to_string()]);

        let first = fetcher.load("dashboard").await.unwrap();
        let requests_after_first = source.request_count();
        let second = fetcher.load("dashboard").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.request_count(), requests_after_first);
    }

    #[tokio::test]
    async fn test_falls_back_to_second_base_path() {
        let source = Arc::new(StubSource::new(vec![(
            "html/components/profile.html",
            "<div>profile</div>",
        )]));
        let fetcher = ContentFetcher::new(
            source,
            vec!["components".to_string(), "html/components".to_string()],
        );

        let content = fetcher.load("profile").await.unwrap();
        assert_eq!(content, "<div>profile</div>");
    }

    #[tokio::test]
    async fn test_empty_fragment_is_a_miss() {
        let source = Arc::new(StubSource::new(vec![
            ("components/notices.html", "   \n"),
            ("html/components/notices.html", "<p>ok</p>"),
        ]));
        let fetcher = ContentFetcher::new(
            source,
            vec!["components".to_string(), "html/components".to_string()],
        );

        assert_eq!(fetcher.load("notices").await.unwrap(), "<p>ok</p>");
    }

    #[tokio::test]
    async fn test_error_names_section_and_attempts() {
        let source = Arc::new(StubSource::new(vec![]));
        let fetcher = ContentFetcher::new(
            source,
            vec!["components".to_string(), "html/components".to_string()],
        );

        let err = fetcher.load("missing").await.unwrap_err();
        assert_eq!(err.section_id, "missing");
        // Two bases, each tried with and without cache busting.
        assert_eq!(err.attempted.len(), 4);
        assert!(err.attempted[0].contains("components/missing.html?v="));
        assert!(err.attempted[3].ends_with("html/components/missing.html"));
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let source = Arc::new(StubSource::new(vec![(
            "components/dashboard.html",
            "<div>dash</div>",
        )]));
        let fetcher = ContentFetcher::new(source.clone(), vec!["components".to_string()]);

        fetcher.load("dashboard").await.unwrap();
        let before = source.request_count();
        fetcher.clear("dashboard").await;
        fetcher.load("dashboard").await.unwrap();
        assert!(source.request_count() > before);
    }

    #[test]
    fn test_extract_inline_scripts() {
        let html = r#"<div id="x"></div><script>initSection();</script><script src="a.js"></script><script> </script>"#;
        let scripts = extract_inline_scripts(html);
        assert_eq!(scripts, vec!["initSection();".to_string()]);
    }
}
