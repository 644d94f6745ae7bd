// Per-section background task tracking
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::task::AbortHandle;

/// Tracks tasks spawned while a section is active so they can be aborted
/// when that section is left. Keyed by section id.
pub struct ResourceTracker {
    tasks: Mutex<HashMap<String, Vec<AbortHandle>>>,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
        }
    }

    pub fn track(&self, section_id: &str, handle: AbortHandle) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.entry(section_id.to_string()).or_default().push(handle);
        }
    }

    /// Abort everything tracked for a section. Returns how many tasks were
    /// released.
    pub fn release(&self, section_id: &str) -> usize {
        let Ok(mut tasks) = self.tasks.lock() else {
            return 0;
        };
        let handles = tasks.remove(section_id).unwrap_or_default();
        let count = handles.len();
        for handle in handles {
            handle.abort();
        }
        if count > 0 {
            tracing::debug!("released {} tracked task(s) for section '{}'", count, section_id);
        }
        count
    }

    pub fn release_all(&self) {
        let sections: Vec<String> = match self.tasks.lock() {
            Ok(tasks) => tasks.keys().cloned().collect(),
            Err(_) => return,
        };
        for section in sections {
            self.release(&section);
        }
    }

    pub fn active(&self, section_id: &str) -> usize {
        self.tasks
            .lock()
            .map(|t| t.get(section_id).map(|v| v.len()).unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Default for ResourceTracker {
    fn default() -> Self {
        Self::new()
    }
}
