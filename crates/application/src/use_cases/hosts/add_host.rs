use ferrous_zone_domain::host_record::reverse_pointer;
use ferrous_zone_domain::{
    AnswerRecord, DomainError, HostTransaction, OperationOutcome, RecordType, UpdateAction,
};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::services::{DnsQueryHelper, DynamicUpdateClient};

/// Adds the A/AAAA and PTR records for a host.
///
/// Existing address or CNAME records for the name, or a PTR for the address,
/// block the add unless `force` is set. Forcing deletes them along with the
/// other half of each replaced pair: the PTR of an old address, and the
/// address record of a host the PTR used to name.
pub struct AddHostUseCase {
    lookup: Arc<DnsQueryHelper>,
    updater: Arc<DynamicUpdateClient>,
}

impl AddHostUseCase {
    pub fn new(lookup: Arc<DnsQueryHelper>, updater: Arc<DynamicUpdateClient>) -> Self {
        Self { lookup, updater }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, fqdn: &str, address: &str, force: bool) -> OperationOutcome {
        let ip = match address.parse::<IpAddr>() {
            Ok(ip) => ip,
            Err(_) => {
                return OperationOutcome::Failed(
                    DomainError::InvalidIpAddress(address.to_string()).to_string(),
                )
            }
        };
        if let Err(e) = validate_host_name(fqdn) {
            return OperationOutcome::Failed(e.to_string());
        }

        let forward_type = RecordType::for_address(&ip);
        let (Some(forward), Some(aliases), Some(pointers)) = (
            self.lookup.lookup(fqdn, forward_type).await,
            self.lookup.lookup(fqdn, RecordType::CNAME).await,
            self.lookup.lookup_pointers(&ip).await,
        ) else {
            return OperationOutcome::Failed(format!(
                "Unable to check existing records for {} / {}",
                fqdn, ip
            ));
        };

        let conflicts: Vec<&AnswerRecord> =
            forward.iter().chain(&aliases).chain(&pointers).collect();
        if !conflicts.is_empty() && !force {
            return OperationOutcome::Failed(format!(
                "Existing records found: {}. Use force to replace them.",
                describe(&conflicts)
            ));
        }

        let mut transaction = HostTransaction::new();
        if !forward.is_empty() {
            transaction.delete_rrset(fqdn, forward_type);
        }
        if !aliases.is_empty() {
            transaction.delete_rrset(fqdn, RecordType::CNAME);
        }
        if !pointers.is_empty() {
            transaction.delete_pointers(&ip);
        }
        transaction
            .address(UpdateAction::Add, fqdn, &ip)
            .pointer(UpdateAction::Add, &ip, fqdn);

        if let Err(failure) = send_halves(&self.updater, &transaction).await {
            warn!(
                fqdn = %fqdn,
                ip = %ip,
                forward_committed = failure.forward_committed,
                error = %failure.error,
                "Host add failed"
            );
            let error = update_error(failure.error);
            return OperationOutcome::Failed(if failure.forward_committed {
                format!("{} forward record added, reverse record failed: {}", fqdn, error)
            } else {
                format!("Adding {} failed: {}", fqdn, error)
            });
        }
        info!(fqdn = %fqdn, ip = %ip, replaced = conflicts.len(), "Host added");

        let mut message = format!("{} added with address {}", fqdn, ip);
        if !conflicts.is_empty() {
            message.push_str(&format!(", replacing {}", describe(&conflicts)));
        }

        let mut left_behind = Vec::new();
        for (record, cleanup) in orphaned_counterparts(fqdn, &ip, &forward, &pointers) {
            if let Err(e) = self.updater.send_update(&cleanup.render()).await {
                warn!(record = %record, error = %e, "Stale record left behind");
                left_behind.push(record);
            }
        }
        if left_behind.is_empty() {
            OperationOutcome::Succeeded(message)
        } else {
            OperationOutcome::Degraded(format!(
                "{}, unable to remove stale {}",
                message,
                left_behind.join(", ")
            ))
        }
    }
}

/// The other half of each pair being replaced: the PTR of every old address
/// of `fqdn`, and the address record of every other host `ip` pointed to.
/// Each goes out as its own update since it may sit in yet another zone.
fn orphaned_counterparts(
    fqdn: &str,
    ip: &IpAddr,
    forward: &[AnswerRecord],
    pointers: &[AnswerRecord],
) -> Vec<(String, HostTransaction)> {
    let mut orphans = Vec::new();
    for record in forward {
        let Ok(old) = record.data.parse::<IpAddr>() else {
            continue;
        };
        if old == *ip {
            continue;
        }
        let mut cleanup = HostTransaction::new();
        cleanup.pointer(UpdateAction::Delete, &old, fqdn);
        orphans.push((
            format!("{} PTR {}", reverse_pointer(&old), fqdn.trim_end_matches('.')),
            cleanup,
        ));
    }
    for pointer in pointers {
        if same_name(&pointer.data, fqdn) {
            continue;
        }
        let mut cleanup = HostTransaction::new();
        cleanup.address(UpdateAction::Delete, &pointer.data, ip);
        orphans.push((
            format!("{} {} {}", pointer.data, RecordType::for_address(ip), ip),
            cleanup,
        ));
    }
    orphans
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim_end_matches('.')
        .eq_ignore_ascii_case(b.trim_end_matches('.'))
}

/// Where a two-part host update stopped.
pub(super) struct PartialUpdate {
    pub forward_committed: bool,
    pub error: DomainError,
}

/// Sends the forward half, then the reverse half, each as its own update.
pub(super) async fn send_halves(
    updater: &DynamicUpdateClient,
    transaction: &HostTransaction,
) -> Result<(), PartialUpdate> {
    let mut forward_committed = false;
    if let Some(script) = transaction.forward_script() {
        updater
            .send_update(&script)
            .await
            .map_err(|error| PartialUpdate {
                forward_committed,
                error,
            })?;
        forward_committed = true;
    }
    if let Some(script) = transaction.reverse_script() {
        updater
            .send_update(&script)
            .await
            .map_err(|error| PartialUpdate {
                forward_committed,
                error,
            })?;
    }
    Ok(())
}

pub(super) fn validate_host_name(fqdn: &str) -> Result<(), DomainError> {
    let name = fqdn.trim_end_matches('.');
    if name.is_empty()
        || name.parse::<IpAddr>().is_ok()
        || name.chars().any(|c| c.is_whitespace())
        || name.split('.').any(str::is_empty)
    {
        return Err(DomainError::InvalidDomainName(fqdn.to_string()));
    }
    Ok(())
}

pub(super) fn describe(records: &[&AnswerRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{} {} {}", r.name, r.record_type, r.data))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(super) fn update_error(e: DomainError) -> String {
    match e {
        DomainError::UpdateRejected(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}
