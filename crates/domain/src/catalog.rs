use sha1::{Digest, Sha1};
use std::fmt;

/// TTL of the PTR record that binds a member zone into a catalog zone.
pub const CATALOG_RECORD_TTL: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    Add,
    Delete,
}

impl UpdateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateAction::Add => "add",
            UpdateAction::Delete => "delete",
        }
    }
}

impl fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical wire-format encoding of `name`: each label prefixed with its
/// length byte, terminated by the empty root label.
///
/// Labels are used byte-for-byte; no case folding is applied. A label longer
/// than 255 bytes has its length truncated to the low byte.
pub fn wire_format(name: &str) -> Vec<u8> {
    let mut fqdn = name.to_string();
    if !fqdn.ends_with('.') {
        fqdn.push('.');
    }

    let mut wire = Vec::with_capacity(fqdn.len() + 1);
    for label in fqdn.split('.') {
        wire.push(label.len() as u8);
        wire.extend_from_slice(label.as_bytes());
    }
    wire
}

/// SHA-1 of the wire-format name as lowercase hex. This is the label BIND
/// expects under `zones.<catalog>` for a member zone.
pub fn member_hash(name: &str) -> String {
    let digest = Sha1::digest(wire_format(name));
    format!("{:x}", digest)
}

/// One member-zone record in a catalog zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub catalog_zone: String,
    pub hashed_label: String,
    pub member_zone: String,
}

impl CatalogEntry {
    pub fn new(catalog_zone: &str, member_zone: &str) -> Self {
        Self {
            catalog_zone: catalog_zone.to_string(),
            hashed_label: member_hash(member_zone),
            member_zone: member_zone.to_string(),
        }
    }

    pub fn owner_name(&self) -> String {
        format!("{}.zones.{}", self.hashed_label, self.catalog_zone)
    }

    /// Renders the nsupdate transaction that adds or removes this entry.
    pub fn render_update(&self, action: UpdateAction) -> String {
        format!(
            "zone {catalog}\nupdate {action} {owner} {ttl} IN PTR {member}.\nsend\n",
            catalog = self.catalog_zone,
            action = action,
            owner = self.owner_name(),
            ttl = CATALOG_RECORD_TTL,
            member = self.member_zone,
        )
    }
}
