//! Snapshot management for golden tests

use crate::{GoldenError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A test snapshot containing an expected export artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name of the test
    pub name: String,

    /// Test metadata
    pub metadata: SnapshotMetadata,

    /// The expected artifact, as a JSON value
    pub content: Value,
}

/// Metadata about a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Version of the snapshot format
    pub version: String,

    /// When the snapshot was created
    pub created_at: String,

    /// When the snapshot was last updated
    pub updated_at: String,

    /// Description of what this tests
    pub description: Option<String>,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Manages reading and writing snapshots
pub struct SnapshotManager {
    snapshot_dir: PathBuf,
}

impl SnapshotManager {
    /// Create a new snapshot manager
    pub fn new(snapshot_dir: impl AsRef<Path>) -> Self {
        Self {
            snapshot_dir: snapshot_dir.as_ref().to_path_buf(),
        }
    }

    /// Load a snapshot from disk
    pub fn load(&self, name: &str) -> Result<Snapshot> {
        let path = self.snapshot_path(name);

        if !path.exists() {
            return Err(GoldenError::CorpusError(format!(
                "Snapshot '{}' not found at {:?}",
                name, path
            )));
        }

        let content = fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        Ok(snapshot)
    }

    /// Save a snapshot to disk
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let path = self.snapshot_path(&snapshot.name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Pretty-print the JSON for readability
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, content)?;

        Ok(())
    }

    /// Update an existing snapshot
    pub fn update(&self, name: &str, new_content: Value) -> Result<()> {
        let mut snapshot = self.load(name)?;

        snapshot.content = new_content;
        snapshot.metadata.updated_at = Utc::now().to_rfc3339();

        self.save(&snapshot)
    }

    /// Create a new snapshot
    pub fn create(
        &self,
        name: &str,
        content: Value,
        description: Option<String>,
    ) -> Result<Snapshot> {
        let now = Utc::now().to_rfc3339();

        let snapshot = Snapshot {
            name: name.to_string(),
            metadata: SnapshotMetadata {
                version: "1.0.0".to_string(),
                created_at: now.clone(),
                updated_at: now,
                description,
                tags: Vec::new(),
            },
            content,
        };

        self.save(&snapshot)?;
        Ok(snapshot)
    }

    /// Check if a snapshot exists
    pub fn exists(&self, name: &str) -> bool {
        self.snapshot_path(name).exists()
    }

    /// List all snapshots
    pub fn list(&self) -> Result<Vec<String>> {
        let mut snapshots = Vec::new();

        if !self.snapshot_dir.exists() {
            return Ok(snapshots);
        }

        for entry in fs::read_dir(&self.snapshot_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    snapshots.push(stem.to_string());
                }
            }
        }

        snapshots.sort();
        Ok(snapshots)
    }

    /// Delete a snapshot
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.snapshot_path(name);

        if path.exists() {
            fs::remove_file(path)?;
        }

        Ok(())
    }

    /// Get the path for a snapshot
    fn snapshot_path(&self, name: &str) -> PathBuf {
        let filename = if name.ends_with(".json") {
            name.to_string()
        } else {
            format!("{}.json", name)
        };

        self.snapshot_dir.join(filename)
    }

    /// Create a backup of a snapshot before updating
    pub fn backup(&self, name: &str) -> Result<()> {
        let source = self.snapshot_path(name);

        if !source.exists() {
            return Ok(());
        }

        let backup_name = format!("{}.backup.{}", name, Utc::now().timestamp());
        let backup_path = self.snapshot_path(&backup_name);

        fs::copy(source, backup_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_snapshot_manager_create_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SnapshotManager::new(temp_dir.path());

        let content = json!({
            "type": "doxport.schema.Module",
            "dri": "root",
            "name": "demo",
            "children": [],
            "docs": {}
        });

        let snapshot = manager
            .create("test", content.clone(), Some("Test snapshot".to_string()))
            .unwrap();

        assert_eq!(snapshot.name, "test");
        assert_eq!(snapshot.content, content);

        let loaded = manager.load("test").unwrap();
        assert_eq!(loaded.name, "test");
        assert_eq!(loaded.content, content);
    }

    #[test]
    fn test_update_preserves_created_at() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SnapshotManager::new(temp_dir.path());

        manager.create("test", json!({"v": 1}), None).unwrap();
        let before = manager.load("test").unwrap();

        manager.update("test", json!({"v": 2})).unwrap();
        let after = manager.load("test").unwrap();

        assert_eq!(after.metadata.created_at, before.metadata.created_at);
        assert_eq!(after.content, json!({"v": 2}));
    }
}
