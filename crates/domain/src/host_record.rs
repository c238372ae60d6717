use crate::catalog::UpdateAction;
use crate::record_type::RecordType;
use std::net::IpAddr;

/// TTL used for host A/AAAA and PTR records.
pub const HOST_RECORD_TTL: u32 = 86400;

/// Reverse-mapping owner name for `ip`, without the trailing dot.
pub fn reverse_pointer(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            format!(
                "{}.{}.{}.{}.in-addr.arpa",
                octets[3], octets[2], octets[1], octets[0]
            )
        }
        IpAddr::V6(ipv6) => {
            let mut nibbles = Vec::with_capacity(32);
            for byte in ipv6.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
            }
            format!("{}.ip6.arpa", nibbles.join("."))
        }
    }
}

pub fn absolute_name(name: &str) -> String {
    format!("{}.", name.trim_end_matches('.'))
}

/// A dynamic update against host records, split by the zone it touches.
///
/// Forward and reverse records live in different zones, so each half is
/// committed with its own `send`, and callers that need to know which half
/// landed submit them separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostTransaction {
    forward: Vec<String>,
    reverse: Vec<String>,
}

impl HostTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&mut self, action: UpdateAction, fqdn: &str, ip: &IpAddr) -> &mut Self {
        self.forward.push(format!(
            "update {} {} {} {} {}",
            action,
            absolute_name(fqdn),
            HOST_RECORD_TTL,
            RecordType::for_address(ip),
            ip
        ));
        self
    }

    /// Removes every record of `record_type` at `fqdn`.
    pub fn delete_rrset(&mut self, fqdn: &str, record_type: RecordType) -> &mut Self {
        self.forward.push(format!(
            "update delete {} {}",
            absolute_name(fqdn),
            record_type
        ));
        self
    }

    pub fn pointer(&mut self, action: UpdateAction, ip: &IpAddr, fqdn: &str) -> &mut Self {
        self.reverse.push(format!(
            "update {} {}. {} PTR {}",
            action,
            reverse_pointer(ip),
            HOST_RECORD_TTL,
            absolute_name(fqdn)
        ));
        self
    }

    pub fn delete_pointers(&mut self, ip: &IpAddr) -> &mut Self {
        self.reverse
            .push(format!("update delete {}. PTR", reverse_pointer(ip)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.reverse.is_empty()
    }

    /// Address and alias statements, or `None` when there are none.
    pub fn forward_script(&self) -> Option<String> {
        render_block(&self.forward)
    }

    /// PTR statements, or `None` when there are none.
    pub fn reverse_script(&self) -> Option<String> {
        render_block(&self.reverse)
    }

    pub fn render(&self) -> String {
        [self.forward_script(), self.reverse_script()]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn render_block(statements: &[String]) -> Option<String> {
    if statements.is_empty() {
        return None;
    }
    let mut script = String::new();
    for statement in statements {
        script.push_str(statement);
        script.push('\n');
    }
    script.push_str("send\n");
    Some(script)
}
