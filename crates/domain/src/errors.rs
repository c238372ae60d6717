use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Zone rejected by policy: {0}")]
    PolicyRejection(String),

    #[error("Filesystem error: {0}")]
    FilesystemError(String),

    #[error("Control channel error: {0}")]
    ControlProtocolError(String),

    #[error("Catalog update failed: {0}")]
    CatalogSyncError(String),

    #[error("Dynamic update rejected: {0}")]
    UpdateRejected(String),

    #[error("Zone dump did not complete after {attempts} checks")]
    PollTimeout { attempts: u32 },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Lookup tool is not available")]
    LookupUnavailable,
}
