use std::fmt;

pub const DEFAULT_FILE_MODE: u32 = 0o644;
pub const ZONE_FILE_SUFFIX: &str = ".db";

/// Name-server identity written into every new zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub primary_ns: String,
    pub secondary_ns: String,
    pub soa_contact: String,
    pub serial: u32,
    pub view: Option<String>,
    /// Extra statements appended to the `addzone` definition.
    pub zone_options: Vec<String>,
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            primary_ns: "ns1.example.com".to_string(),
            secondary_ns: "ns2.example.com".to_string(),
            soa_contact: "hostmaster.example.com".to_string(),
            serial: 1,
            view: None,
            zone_options: Vec::new(),
        }
    }
}

/// File name of the zone file for `zone`, relative to the zone directory.
pub fn zone_file_name(zone: &str) -> String {
    format!("{}{}", zone, ZONE_FILE_SUFFIX)
}

/// Renders the skeleton zone file for a freshly created zone.
///
/// ```text
/// $ORIGIN team1.example.com.
/// $TTL 1h
/// team1.example.com. IN SOA ns1.example.com. hostmaster.example.com. ( 1 1d 2h 4w 1h )
/// team1.example.com. IN NS ns1.example.com.
/// team1.example.com. IN NS ns2.example.com.
/// ```
pub fn render_zone_skeleton(zone: &str, identity: &ServerIdentity) -> String {
    format!(
        "$ORIGIN {zone}.\n\
         $TTL 1h\n\
         {zone}. IN SOA {ns1}. {contact}. ( {serial} 1d 2h 4w 1h )\n\
         {zone}. IN NS {ns1}.\n\
         {zone}. IN NS {ns2}.\n",
        zone = zone,
        ns1 = identity.primary_ns,
        ns2 = identity.secondary_ns,
        contact = identity.soa_contact,
        serial = identity.serial,
    )
}

/// Renders the `addzone` argument list for `zone` stored in `file_name`.
pub fn render_addzone_args(zone: &str, file_name: &str, identity: &ServerIdentity) -> Vec<String> {
    let mut args = vec!["addzone".to_string(), zone.to_string()];
    if let Some(view) = &identity.view {
        args.push("IN".to_string());
        args.push(view.clone());
    }

    let mut definition = format!("{{ type master; file \"{}\"; ", file_name);
    for option in &identity.zone_options {
        definition.push_str(option);
        definition.push(' ');
    }
    definition.push_str("};");
    args.push(definition);
    args
}

/// Permission bits applied to zone files.
///
/// An unparsable configured value falls back to `0644`; the rejected text is
/// kept in `fallback_from` so callers can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMode {
    bits: u32,
    fallback_from: Option<String>,
}

impl FileMode {
    pub fn new(bits: u32) -> Self {
        Self {
            bits: bits & 0o7777,
            fallback_from: None,
        }
    }

    pub fn parse_octal(raw: &str) -> Option<u32> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0o")
            .or_else(|| trimmed.strip_prefix("0O"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return None;
        }
        u32::from_str_radix(digits, 8)
            .ok()
            .filter(|bits| *bits <= 0o7777)
    }

    pub fn from_config(raw: &str) -> Self {
        match Self::parse_octal(raw) {
            Some(bits) => Self::new(bits),
            None => Self {
                bits: DEFAULT_FILE_MODE,
                fallback_from: Some(raw.to_string()),
            },
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn fallback_from(&self) -> Option<&str> {
        self.fallback_from.as_deref()
    }
}

impl Default for FileMode {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_MODE)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.bits)
    }
}

/// Owner, group and mode every zone file is written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOwnership {
    pub owner: String,
    pub group: String,
    pub mode: FileMode,
}

impl Default for FileOwnership {
    fn default() -> Self {
        Self {
            owner: "bind".to_string(),
            group: "bind".to_string(),
            mode: FileMode::default(),
        }
    }
}
