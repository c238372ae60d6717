use super::control::ControlChannelConfig;
use super::errors::ConfigError;
use super::flat::FlatConfig;
use super::logging::LoggingConfig;
use super::tools::ToolsConfig;
use super::zones::ZonesConfig;
use std::path::Path;

const LOCAL_CONFIG_PATH: &str = "ferrous-zone.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-zone/config.toml";

#[derive(Debug, Clone)]
pub struct Config {
    pub control: ControlChannelConfig,
    pub tools: ToolsConfig,
    pub zones: ZonesConfig,
    pub logging: LoggingConfig,
    /// Run as a persistent service rather than a one-shot command.
    pub service_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            control: ControlChannelConfig::default(),
            tools: ToolsConfig::default(),
            zones: ZonesConfig::default(),
            logging: LoggingConfig::default(),
            service_mode: false,
        }
    }
}

impl Config {
    /// Loads `path`, or the first default location that exists, or the
    /// built-in defaults when no file is found.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let flat = match path {
            Some(path) => Self::read_flat(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::read_flat(&found)?,
                None => {
                    let mut flat = FlatConfig::new();
                    flat.ensure_defaults();
                    flat
                }
            },
        };

        Self::from_flat(&flat)
    }

    /// Reads a TOML file and collapses it into a flat mapping with the
    /// control-channel defaults filled in.
    pub fn read_flat(path: &str) -> Result<FlatConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        let mut flat = FlatConfig::from_toml_str(&contents)?;
        flat.ensure_defaults();
        Ok(flat)
    }

    pub fn from_flat(flat: &FlatConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            control: ControlChannelConfig::from_flat(flat)?,
            tools: ToolsConfig::from_flat(flat),
            zones: ZonesConfig::from_flat(flat)?,
            logging: LoggingConfig::from_flat(flat),
            service_mode: flat.flag("https").unwrap_or(false),
        })
    }

    pub fn get_config_path() -> Option<String> {
        if Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}
