mod external_tool;
mod zone_file_store;

pub use external_tool::{ExternalTool, ToolOutput};
pub use zone_file_store::ZoneFileStore;
