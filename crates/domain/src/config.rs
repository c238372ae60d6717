pub mod control;
pub mod errors;
pub mod flat;
pub mod logging;
pub mod root;
pub mod tools;
pub mod zones;

pub use control::ControlChannelConfig;
pub use errors::ConfigError;
pub use flat::{ConfigValue, FlatConfig};
pub use logging::LoggingConfig;
pub use root::Config;
pub use tools::ToolsConfig;
pub use zones::ZonesConfig;
