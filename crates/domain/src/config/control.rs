use super::errors::ConfigError;
use super::flat::{FlatConfig, DEFAULT_KEYFILE, DEFAULT_SERVER};

/// How to reach the name server's control channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlChannelConfig {
    /// rndc executable
    pub path: String,
    pub keyfile: String,
    pub server: String,
    pub port: u16,
}

impl Default for ControlChannelConfig {
    fn default() -> Self {
        Self {
            path: "/usr/sbin/rndc".to_string(),
            keyfile: DEFAULT_KEYFILE.to_string(),
            server: DEFAULT_SERVER.to_string(),
            port: 953,
        }
    }
}

impl ControlChannelConfig {
    pub fn from_flat(flat: &FlatConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = match flat.non_empty_text("port") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                ConfigError::Validation(format!("Control channel port is not valid: {}", raw))
            })?,
            None => defaults.port,
        };
        if port == 0 {
            return Err(ConfigError::Validation(
                "Control channel port cannot be 0".to_string(),
            ));
        }

        Ok(Self {
            path: flat.non_empty_text("path").map_or(defaults.path, str::to_string),
            keyfile: flat
                .non_empty_text("keyfile")
                .map_or(defaults.keyfile, str::to_string),
            server: flat
                .non_empty_text("server")
                .map_or(defaults.server, str::to_string),
            port,
        })
    }
}
