use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::highlight::Rendering;

/// Statistics for one ingest -> analyze -> render run
/// WHY: written to `--stats-out` so runs can be compared without parsing logs
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Input source (file path or "stdin")
    pub source: String,
    /// Characters in the analyzed text
    pub chars_analyzed: u64,
    /// Pages decoded, absent for pasted text
    pub pages: Option<u64>,
    pub annotations: u64,
    pub annotations_skipped: u64,
    pub matches_found: u64,
    pub segments: u64,
    pub ingest_time_ms: u64,
    pub analysis_time_ms: u64,
    pub render_time_ms: u64,
}

impl RunStats {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Copy the counters of a finished render pass
    pub fn record_rendering(&mut self, rendering: &Rendering<'_>) {
        self.annotations = rendering.annotations_total as u64;
        self.annotations_skipped = rendering.annotations_skipped as u64;
        self.matches_found = rendering.matches_found as u64;
        self.segments = rendering.segments_merged as u64;
    }

    /// Write as pretty JSON
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
