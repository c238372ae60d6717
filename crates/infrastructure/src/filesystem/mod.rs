mod accounts;
mod zone_file_store;

pub use accounts::{resolve_group, resolve_user};
pub use zone_file_store::LocalZoneFileStore;
