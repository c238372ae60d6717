//! Ferrous Zone Domain Layer
pub mod answer;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod host_record;
pub mod outcome;
pub mod record_type;
pub mod zone_dump;
pub mod zone_file;
pub mod zone_policy;

pub use answer::AnswerRecord;
pub use catalog::{member_hash, CatalogEntry, UpdateAction};
pub use config::{Config, ConfigError, FlatConfig};
pub use errors::DomainError;
pub use host_record::HostTransaction;
pub use outcome::OperationOutcome;
pub use record_type::RecordType;
pub use zone_file::{FileMode, FileOwnership, ServerIdentity};
pub use zone_policy::ZonePolicy;
