//! Persistence port for modified plans and progression history.
//!
//! The engine never writes anything itself. Callers hand its output to a
//! [`PlanStore`]; [`JsonFileStore`] is the file-backed implementation:
//!
//! ```text
//! <root>/plans/<plan_id>.json   one plan per file, replaced atomically
//! <root>/progression.jsonl      append-only progression log
//! ```
//!
//! Writers take exclusive `fs2` locks, readers take shared locks. Corrupt
//! plan files and log lines are logged and skipped rather than failing.

use crate::{Error, ProgressionAdjustment, Result, WorkoutPlan};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Where a batch of adjustments came from
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentSource {
    UserRequest,
    Wearable,
}

/// One persisted batch of progression adjustments
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressionEntry {
    pub id: Uuid,
    pub plan_id: String,
    pub created_at: DateTime<Utc>,
    pub source: AdjustmentSource,
    pub adjustments: Vec<ProgressionAdjustment>,
}

impl ProgressionEntry {
    pub fn new(
        plan_id: impl Into<String>,
        source: AdjustmentSource,
        adjustments: Vec<ProgressionAdjustment>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            plan_id: plan_id.into(),
            created_at: Utc::now(),
            source,
            adjustments,
        }
    }
}

/// Storage collaborator the service writes through
pub trait PlanStore {
    fn update_workout_plan(&mut self, id: &str, plan: &WorkoutPlan) -> Result<()>;
    fn add_progression_plan(&mut self, entry: &ProgressionEntry) -> Result<()>;
}

/// JSON file store with file locking
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`; directories are created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn plans_dir(&self) -> PathBuf {
        self.root.join("plans")
    }

    pub fn progression_log_path(&self) -> PathBuf {
        self.root.join("progression.jsonl")
    }

    /// Path of a plan file; ids that could escape the plans directory are rejected
    pub fn plan_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !id.starts_with('.');
        if !valid {
            return Err(Error::Store(format!("Invalid plan id: {:?}", id)));
        }
        Ok(self.plans_dir().join(format!("{}.json", id)))
    }

    /// Load a stored plan
    ///
    /// Returns `None` if the plan was never stored. A corrupt file is logged
    /// and also reported as `None`.
    pub fn load_workout_plan(&self, id: &str) -> Result<Option<WorkoutPlan>> {
        let path = self.plan_path(id)?;
        if !path.exists() {
            tracing::debug!("No stored plan at {:?}", path);
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        match serde_json::from_str::<WorkoutPlan>(&contents) {
            Ok(plan) => Ok(Some(plan)),
            Err(e) => {
                tracing::warn!("Failed to parse stored plan {:?}: {}. Ignoring it.", path, e);
                Ok(None)
            }
        }
    }

    /// Read every entry of the progression log, skipping corrupt lines
    pub fn read_progression_log(&self) -> Result<Vec<ProgressionEntry>> {
        let path = self.progression_log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let reader = BufReader::new(&file);
        let mut entries = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ProgressionEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse progression entry at line {}: {}",
                        line_num + 1,
                        e
                    );
                }
            }
        }

        file.unlock()?;
        tracing::debug!("Read {} progression entries", entries.len());
        Ok(entries)
    }
}

impl PlanStore for JsonFileStore {
    /// Write to a temp file in the plans directory, sync, then rename over the old plan
    fn update_workout_plan(&mut self, id: &str, plan: &WorkoutPlan) -> Result<()> {
        let path = self.plan_path(id)?;
        let dir = self.plans_dir();
        std::fs::create_dir_all(&dir)?;

        let temp = NamedTempFile::new_in(&dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, plan)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::info!("Stored plan {} at {:?}", id, path);
        Ok(())
    }

    fn add_progression_plan(&mut self, entry: &ProgressionEntry) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.progression_log_path())?;
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!(
            "Appended progression entry {} ({} adjustments)",
            entry.id,
            entry.adjustments.len()
        );
        Ok(())
    }
}
