//! YAML file store for the roster and rotation schedule
//!
//! Reads the two documents from disk and replaces the rotation document with
//! an atomic write-to-temp-then-rename, so a crash mid-write leaves the old
//! schedule in place.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{RotationError, RotationResult};
use crate::traits::RotationStore;
use shared::{CommandId, RotationConfig, RotationFile, RotationMembersFile, command_debug};

/// Store backed by two YAML files
pub struct YamlRotationStore {
    rotation_file: PathBuf,
    members_file: PathBuf,
}

impl YamlRotationStore {
    pub fn new(rotation_file: impl Into<PathBuf>, members_file: impl Into<PathBuf>) -> Self {
        Self {
            rotation_file: rotation_file.into(),
            members_file: members_file.into(),
        }
    }

    pub fn from_config(config: &RotationConfig) -> Self {
        Self::new(config.rotation_file.clone(), config.members_file.clone())
    }

    /// Sibling temp file used while replacing the rotation document
    fn temp_path(&self) -> PathBuf {
        self.rotation_file.with_extension("tmp")
    }

    async fn read(path: &Path) -> RotationResult<String> {
        fs::read_to_string(path)
            .await
            .map_err(|e| RotationError::persistence("read", path.display().to_string(), e))
    }

    async fn write_temp(path: &Path, content: &str) -> std::io::Result<()> {
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await
    }
}

#[async_trait]
impl RotationStore for YamlRotationStore {
    async fn load_members(&self) -> RotationResult<RotationMembersFile> {
        let content = Self::read(&self.members_file).await?;
        Ok(RotationMembersFile::from_yaml_str(&content)?)
    }

    async fn load_rotations(&self) -> RotationResult<RotationFile> {
        let content = Self::read(&self.rotation_file).await?;
        Ok(RotationFile::from_yaml_str(&content)?)
    }

    async fn save_rotations(&self, rotations: &RotationFile) -> RotationResult<()> {
        let target = self.rotation_file.display().to_string();
        // Serialize before touching the disk so a failure leaves nothing behind
        let content = rotations
            .to_yaml_str()
            .map_err(|e| RotationError::persistence("serialize", target.clone(), e))?;

        let temp = self.temp_path();
        if let Err(e) = Self::write_temp(&temp, &content).await {
            let _ = fs::remove_file(&temp).await;
            return Err(RotationError::persistence("write", temp.display().to_string(), e));
        }

        if let Err(e) = fs::rename(&temp, &self.rotation_file).await {
            let _ = fs::remove_file(&temp).await;
            return Err(RotationError::persistence("rename", target, e));
        }

        command_debug!(
            CommandId::current(),
            "💾 Wrote {} rotations to {}",
            rotations.rotations.len(),
            target
        );
        Ok(())
    }

    fn rotations_location(&self) -> String {
        self.rotation_file.display().to_string()
    }
}
