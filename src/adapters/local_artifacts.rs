use crate::domain::ports::ArtifactStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem-backed artifact storage rooted at a single directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// concurrent reader never observes a partially written artifact.
#[derive(Debug, Clone)]
pub struct LocalArtifacts {
    base_path: PathBuf,
}

impl LocalArtifacts {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifacts {
    async fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;

        let final_path = self.base_path.join(name);
        let tmp_path = self.base_path.join(format!(".{}.tmp", name));
        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, &final_path).await?;
        Ok(())
    }

    async fn read_file(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.base_path.join(name)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
