use async_trait::async_trait;
use ferrous_zone_domain::{DomainError, FileOwnership};

/// The directory holding zone files and the name server's dump file.
/// File names are relative to that directory.
#[async_trait]
pub trait ZoneFileStore: Send + Sync {
    /// Writes the complete file and applies ownership and mode. A file that
    /// could not be fully written, chowned or chmodded is not left behind.
    async fn write_zone_file(
        &self,
        file_name: &str,
        contents: &str,
        ownership: &FileOwnership,
    ) -> Result<(), DomainError>;

    async fn remove_zone_file(&self, file_name: &str) -> Result<(), DomainError>;

    /// Removes the file if present. A missing file is not an error.
    async fn discard_file(&self, file_name: &str) -> Result<(), DomainError>;

    async fn read_file(&self, file_name: &str) -> Result<String, DomainError>;

    /// Last line of the file, or `None` when it is missing or empty.
    async fn last_line(&self, file_name: &str) -> Result<Option<String>, DomainError>;
}
