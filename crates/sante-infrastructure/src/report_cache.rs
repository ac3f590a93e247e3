//! Cache of daily reports that could not be submitted.
//!
//! Each pending report is one JSON file under `pending/`, named by a fresh
//! uuid. The submission pipeline stores a report here when the post fails
//! and drains the directory on the next successful flush.

use std::fs;
use std::path::PathBuf;

use sante_core::error::Result;
use sante_core::report::DailyMetricsReport;

use crate::atomic_file::write_atomic;
use crate::paths::SantePaths;

/// A report waiting for submission, with its cache handle.
#[derive(Debug)]
pub struct PendingReport {
    pub id: String,
    pub report: DailyMetricsReport,
}

/// Directory-of-files cache for unsent reports.
pub struct DirReportCache {
    dir: PathBuf,
}

impl DirReportCache {
    /// Opens the cache at the default pending directory.
    pub fn new() -> Result<Self> {
        let dir = SantePaths::pending_dir()
            .map_err(|err| sante_core::SanteError::io(err.to_string()))?;
        Ok(Self::with_dir(dir))
    }

    /// Opens the cache at a custom directory (tests).
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Stores a report and returns its cache id.
    pub fn store(&self, report: &DailyMetricsReport) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let path = self.dir.join(format!("{}.json", id));
        let content = serde_json::to_vec_pretty(report)?;
        write_atomic(&path, &content)?;
        tracing::debug!(%id, "cached unsent daily report");
        Ok(id)
    }

    /// Lists every pending report. Unreadable files are skipped with a
    /// warning rather than failing the whole listing.
    pub fn list(&self) -> Result<Vec<PendingReport>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut pending = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match fs::read_to_string(&path)
                .map_err(sante_core::SanteError::from)
                .and_then(|content| Ok(serde_json::from_str(&content)?))
            {
                Ok(report) => pending.push(PendingReport {
                    id: id.to_string(),
                    report,
                }),
                Err(err) => {
                    tracing::warn!(?path, %err, "skipping unreadable pending report");
                }
            }
        }

        // oldest first, by capture timestamp
        pending.sort_by_key(|entry| entry.report.timestamp());
        Ok(pending)
    }

    /// Removes a report once it was submitted (or abandoned).
    pub fn remove(&self, id: &str) -> Result<()> {
        let path = self.dir.join(format!("{}.json", id));
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
