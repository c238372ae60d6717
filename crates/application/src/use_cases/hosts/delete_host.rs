use ferrous_zone_domain::{
    AnswerRecord, HostTransaction, OperationOutcome, RecordType, UpdateAction,
};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::add_host::{describe, send_halves, update_error, validate_host_name};
use crate::services::{DnsQueryHelper, DynamicUpdateClient};

/// Removes a host's address and PTR records, starting from either its name
/// or one of its addresses.
pub struct DeleteHostUseCase {
    lookup: Arc<DnsQueryHelper>,
    updater: Arc<DynamicUpdateClient>,
}

impl DeleteHostUseCase {
    pub fn new(lookup: Arc<DnsQueryHelper>, updater: Arc<DynamicUpdateClient>) -> Self {
        Self { lookup, updater }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, name_or_address: &str) -> OperationOutcome {
        let (transaction, removed) = match name_or_address.parse::<IpAddr>() {
            Ok(ip) => match self.by_address(&ip).await {
                Some(found) => found,
                None => return unable_to_check(name_or_address),
            },
            Err(_) => {
                if let Err(e) = validate_host_name(name_or_address) {
                    return OperationOutcome::Failed(e.to_string());
                }
                match self.by_name(name_or_address).await {
                    Some(found) => found,
                    None => return unable_to_check(name_or_address),
                }
            }
        };

        if transaction.is_empty() {
            return OperationOutcome::Failed(format!("No records found for {}", name_or_address));
        }

        let removed_refs: Vec<&AnswerRecord> = removed.iter().collect();
        match send_halves(&self.updater, &transaction).await {
            Ok(()) => {
                info!(target_host = %name_or_address, records = removed.len(), "Host removed");
                OperationOutcome::Succeeded(format!("Removed {}", describe(&removed_refs)))
            }
            Err(failure) => {
                warn!(
                    target_host = %name_or_address,
                    forward_committed = failure.forward_committed,
                    error = %failure.error,
                    "Host delete failed"
                );
                let error = update_error(failure.error);
                OperationOutcome::Failed(if failure.forward_committed {
                    format!(
                        "{} forward records removed, reverse records failed: {}",
                        name_or_address, error
                    )
                } else {
                    format!("Deleting {} failed: {}", name_or_address, error)
                })
            }
        }
    }

    async fn by_address(&self, ip: &IpAddr) -> Option<(HostTransaction, Vec<AnswerRecord>)> {
        let pointers = self.lookup.lookup_pointers(ip).await?;
        let mut transaction = HostTransaction::new();
        if pointers.is_empty() {
            return Some((transaction, pointers));
        }

        transaction.delete_pointers(ip);
        for pointer in &pointers {
            transaction.address(UpdateAction::Delete, &pointer.data, ip);
        }
        Some((transaction, pointers))
    }

    async fn by_name(&self, fqdn: &str) -> Option<(HostTransaction, Vec<AnswerRecord>)> {
        let mut addresses = self.lookup.lookup(fqdn, RecordType::A).await?;
        addresses.extend(self.lookup.lookup(fqdn, RecordType::AAAA).await?);

        let mut transaction = HostTransaction::new();
        for record in &addresses {
            let Ok(ip) = record.data.parse::<IpAddr>() else {
                continue;
            };
            transaction
                .address(UpdateAction::Delete, fqdn, &ip)
                .pointer(UpdateAction::Delete, &ip, fqdn);
        }
        Some((transaction, addresses))
    }
}

fn unable_to_check(target: &str) -> OperationOutcome {
    OperationOutcome::Failed(format!("Unable to look up records for {}", target))
}
