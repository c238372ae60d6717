use super::flat::FlatConfig;

/// Locations of the dynamic-update and lookup executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsConfig {
    pub nsupdate: String,
    pub dig: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            nsupdate: "/usr/bin/nsupdate".to_string(),
            dig: "/usr/bin/dig".to_string(),
        }
    }
}

impl ToolsConfig {
    pub fn from_flat(flat: &FlatConfig) -> Self {
        let defaults = Self::default();
        Self {
            nsupdate: flat
                .non_empty_text("nsupdate")
                .map_or(defaults.nsupdate, str::to_string),
            dig: flat.non_empty_text("dig").map_or(defaults.dig, str::to_string),
        }
    }
}
