use super::flat::FlatConfig;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,

    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn from_flat(flat: &FlatConfig) -> Self {
        Self {
            level: flat
                .non_empty_text("level")
                .map_or_else(default_log_level, str::to_string),
            format: flat
                .non_empty_text("log_format")
                .map_or_else(default_log_format, str::to_lowercase),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}
