use super::errors::ConfigError;
use super::flat::FlatConfig;
use crate::zone_file::{FileMode, FileOwnership, ServerIdentity};
use crate::zone_policy::ZonePolicy;

/// Everything needed to create, register and catalog a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonesConfig {
    pub identity: ServerIdentity,
    pub policy: ZonePolicy,
    /// Directory zone files and the dump file live in.
    pub directory: String,
    pub ownership: FileOwnership,
    /// Catalog zone to keep in sync; `None` disables catalog updates.
    pub catalog: Option<String>,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            identity: ServerIdentity::default(),
            policy: ZonePolicy::default(),
            directory: "/etc/bind".to_string(),
            ownership: FileOwnership::default(),
            catalog: None,
        }
    }
}

impl ZonesConfig {
    pub fn from_flat(flat: &FlatConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let identity_defaults = defaults.identity;
        let ownership_defaults = defaults.ownership;

        let serial = match flat.non_empty_text("serial") {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                ConfigError::Validation(format!("Zone serial is not a valid number: {}", raw))
            })?,
            None => identity_defaults.serial,
        };

        let identity = ServerIdentity {
            primary_ns: text_or(flat, "dns1", identity_defaults.primary_ns),
            secondary_ns: text_or(flat, "dns2", identity_defaults.secondary_ns),
            soa_contact: text_or(flat, "owner", identity_defaults.soa_contact),
            serial,
            view: flat.non_empty_text("view").map(str::to_string),
            zone_options: flat.list("options"),
        };

        let ownership = FileOwnership {
            owner: text_or(flat, "nameown", ownership_defaults.owner),
            group: text_or(flat, "namegrp", ownership_defaults.group),
            mode: flat
                .non_empty_text("nameper")
                .map(FileMode::from_config)
                .unwrap_or_default(),
        };

        Ok(Self {
            identity,
            policy: ZonePolicy::new(flat.list("protect"), flat.list("require")),
            directory: text_or(flat, "namedir", defaults.directory),
            ownership,
            catalog: flat.non_empty_text("catalog").map(str::to_string),
        })
    }
}

fn text_or(flat: &FlatConfig, key: &str, default: String) -> String {
    flat.non_empty_text(key).map_or(default, str::to_string)
}
