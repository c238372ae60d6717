use super::errors::ConfigError;
use std::collections::BTreeMap;

pub const DEFAULT_SERVER: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "953";
pub const DEFAULT_KEYFILE: &str = "/etc/bind/rndc.key";

/// A single configuration value after flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl ConfigValue {
    /// Converts a scalar or array TOML value. Nested tables are not values.
    fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::String(s) if s.contains('|') => Some(ConfigValue::List(split_pipes(s))),
            toml::Value::String(s) => Some(ConfigValue::Text(s.clone())),
            toml::Value::Integer(i) => Some(ConfigValue::Text(i.to_string())),
            toml::Value::Float(f) => Some(ConfigValue::Text(f.to_string())),
            toml::Value::Boolean(b) => Some(ConfigValue::Flag(*b)),
            toml::Value::Datetime(d) => Some(ConfigValue::Text(d.to_string())),
            toml::Value::Array(items) => Some(ConfigValue::List(
                items
                    .iter()
                    .filter_map(|item| match item {
                        toml::Value::String(s) => Some(s.clone()),
                        toml::Value::Table(_) | toml::Value::Array(_) => None,
                        other => Some(other.to_string()),
                    })
                    .filter(|s| !s.is_empty())
                    .collect(),
            )),
            toml::Value::Table(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_list(&self) -> Vec<String> {
        match self {
            ConfigValue::Text(s) if s.is_empty() => Vec::new(),
            ConfigValue::Text(s) => vec![s.clone()],
            ConfigValue::List(items) => items.clone(),
            ConfigValue::Flag(_) => Vec::new(),
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ConfigValue::Flag(b) => Some(*b),
            ConfigValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "1" | "yes" | "true" | "on" => Some(true),
                "0" | "no" | "false" | "off" => Some(false),
                _ => None,
            },
            ConfigValue::List(_) => None,
        }
    }
}

fn split_pipes(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration with its sections collapsed into a single key space.
///
/// Keys are lowercased. When two sections define the same key, the section
/// that sorts last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatConfig {
    entries: BTreeMap<String, ConfigValue>,
}

impl FlatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self::from_table(&table))
    }

    pub fn from_table(table: &toml::Table) -> Self {
        let mut flat = Self::new();

        for (key, value) in table {
            if let Some(v) = ConfigValue::from_toml(value) {
                flat.insert(key, v);
            }
        }

        for value in table.values() {
            if let toml::Value::Table(section) = value {
                for (key, value) in section {
                    if let Some(v) = ConfigValue::from_toml(value) {
                        flat.insert(key, v);
                    }
                }
            }
        }

        flat
    }

    pub fn insert(&mut self, key: &str, value: ConfigValue) {
        self.entries.insert(key.to_lowercase(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_text)
    }

    /// Non-empty text value, if any.
    pub fn non_empty_text(&self, key: &str) -> Option<&str> {
        self.text(key).map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key).map(ConfigValue::to_list).unwrap_or_default()
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_flag)
    }

    /// Fills in the control-channel address and key file when absent.
    pub fn ensure_defaults(&mut self) {
        for (key, value) in [
            ("server", DEFAULT_SERVER),
            ("port", DEFAULT_PORT),
            ("keyfile", DEFAULT_KEYFILE),
        ] {
            if !self.contains_key(key) {
                self.insert(key, ConfigValue::Text(value.to_string()));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
