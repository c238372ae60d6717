use async_trait::async_trait;
use ferrous_zone_application::ports::ZoneFileStore;
use ferrous_zone_domain::{DomainError, FileOwnership};
use std::io::{ErrorKind, SeekFrom};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, warn};

use super::accounts::{resolve_group, resolve_user};

/// Bytes read from the end of a file to find its last line.
const TAIL_WINDOW: u64 = 4096;

/// Zone files in a local directory, normally the name server's own.
pub struct LocalZoneFileStore {
    directory: PathBuf,
}

impl LocalZoneFileStore {
    pub fn new(directory: &str) -> Result<Self, DomainError> {
        let directory = PathBuf::from(directory);
        if !directory.is_dir() {
            return Err(DomainError::ConfigError(format!(
                "Zone file directory {} does not exist",
                directory.display()
            )));
        }
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_of(&self, file_name: &str) -> Result<PathBuf, DomainError> {
        if file_name.is_empty() || file_name.contains('/') || file_name == ".." {
            return Err(DomainError::FilesystemError(format!(
                "Invalid zone file name: {}",
                file_name
            )));
        }
        Ok(self.directory.join(file_name))
    }

    async fn write_staged(
        &self,
        staged: &Path,
        contents: &str,
        ownership: &FileOwnership,
    ) -> Result<(), DomainError> {
        let uid = resolve_user(&ownership.owner).ok_or_else(|| {
            DomainError::FilesystemError(format!("Unknown user {}", ownership.owner))
        })?;
        let gid = resolve_group(&ownership.group).ok_or_else(|| {
            DomainError::FilesystemError(format!("Unknown group {}", ownership.group))
        })?;

        fs::write(staged, contents).await.map_err(|e| {
            DomainError::FilesystemError(format!("Failed to write {}: {}", staged.display(), e))
        })?;

        std::os::unix::fs::chown(staged, Some(uid), Some(gid)).map_err(|e| {
            DomainError::FilesystemError(format!("Failed to chown {}: {}", staged.display(), e))
        })?;

        fs::set_permissions(
            staged,
            std::fs::Permissions::from_mode(ownership.mode.bits()),
        )
        .await
        .map_err(|e| {
            DomainError::FilesystemError(format!("Failed to chmod {}: {}", staged.display(), e))
        })
    }
}

#[async_trait]
impl ZoneFileStore for LocalZoneFileStore {
    async fn write_zone_file(
        &self,
        file_name: &str,
        contents: &str,
        ownership: &FileOwnership,
    ) -> Result<(), DomainError> {
        let path = self.path_of(file_name)?;
        let staged = self.directory.join(format!(".{}.tmp", file_name));

        if let Err(e) = self.write_staged(&staged, contents, ownership).await {
            if let Err(cleanup) = fs::remove_file(&staged).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(path = %staged.display(), error = %cleanup, "Failed to remove staged zone file");
                }
            }
            return Err(e);
        }

        fs::rename(&staged, &path).await.map_err(|e| {
            DomainError::FilesystemError(format!("Failed to place {}: {}", path.display(), e))
        })?;

        debug!(
            path = %path.display(),
            owner = %ownership.owner,
            group = %ownership.group,
            mode = %ownership.mode,
            "Zone file written"
        );
        Ok(())
    }

    async fn remove_zone_file(&self, file_name: &str) -> Result<(), DomainError> {
        let path = self.path_of(file_name)?;
        fs::remove_file(&path).await.map_err(|e| {
            DomainError::FilesystemError(format!("Failed to remove {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Zone file removed");
        Ok(())
    }

    async fn discard_file(&self, file_name: &str) -> Result<(), DomainError> {
        let path = self.path_of(file_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Discarded file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::FilesystemError(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn read_file(&self, file_name: &str) -> Result<String, DomainError> {
        let path = self.path_of(file_name)?;
        fs::read_to_string(&path).await.map_err(|e| {
            DomainError::FilesystemError(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    async fn last_line(&self, file_name: &str) -> Result<Option<String>, DomainError> {
        let path = self.path_of(file_name)?;
        let mut file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::FilesystemError(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let read_error = |e: std::io::Error| {
            DomainError::FilesystemError(format!("Failed to read {}: {}", path.display(), e))
        };
        let len = file.metadata().await.map_err(read_error)?.len();
        file.seek(SeekFrom::Start(len.saturating_sub(TAIL_WINDOW)))
            .await
            .map_err(read_error)?;

        let mut tail = Vec::new();
        file.read_to_end(&mut tail).await.map_err(read_error)?;

        Ok(String::from_utf8_lossy(&tail)
            .lines()
            .last()
            .map(|line| line.trim_end().to_string()))
    }
}
