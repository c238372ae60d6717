use ferrous_zone_domain::answer::answer_lines;
use ferrous_zone_domain::host_record::reverse_pointer;
use ferrous_zone_domain::{AnswerRecord, RecordType};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::ports::ExternalTool;

/// Read-only lookups against the local resolver through dig.
///
/// Every method returns `None` when the lookup itself failed, and an empty
/// list when it succeeded without answers.
pub struct DnsQueryHelper {
    dig: Arc<dyn ExternalTool>,
}

impl DnsQueryHelper {
    pub fn new(dig: Arc<dyn ExternalTool>) -> Self {
        Self { dig }
    }

    async fn answers(&self, mut args: Vec<String>) -> Option<Vec<String>> {
        args.push("+noall".to_string());
        args.push("+answer".to_string());

        let output = match self.dig.run(&args, None).await {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "Lookup tool could not be run");
                return None;
            }
        };

        if !output.success {
            debug!(stderr = %output.stderr, "Lookup failed");
            return None;
        }

        let lines = answer_lines(&output.stdout);
        debug!(answers = lines.len(), "Lookup answered");
        Some(lines)
    }

    /// Answer lines for a name, or for the PTR of an address.
    #[instrument(skip(self))]
    pub async fn find_record(&self, name_or_address: &str) -> Option<Vec<String>> {
        match name_or_address.parse::<IpAddr>() {
            Ok(ip) => {
                self.answers(vec![reverse_pointer(&ip), RecordType::PTR.to_string()])
                    .await
            }
            Err(_) => self.answers(vec![name_or_address.to_string()]).await,
        }
    }

    /// Parsed records of `record_type` owned by `name` itself. Chased
    /// answers (the target of a CNAME) are left out.
    #[instrument(skip(self))]
    pub async fn lookup(&self, name: &str, record_type: RecordType) -> Option<Vec<AnswerRecord>> {
        let owner = name.trim_end_matches('.');
        let lines = self
            .answers(vec![owner.to_string(), record_type.to_string()])
            .await?;

        Some(
            lines
                .iter()
                .filter_map(|line| AnswerRecord::parse(line))
                .filter(|record| record.is(record_type))
                .filter(|record| record.name.eq_ignore_ascii_case(owner))
                .collect(),
        )
    }

    /// PTR records for `ip`.
    pub async fn lookup_pointers(&self, ip: &IpAddr) -> Option<Vec<AnswerRecord>> {
        self.lookup(&reverse_pointer(ip), RecordType::PTR).await
    }

    /// Transfers `zone` and keeps the lines containing `search`.
    #[instrument(skip(self))]
    pub async fn search_domain(&self, zone: &str, search: &str) -> Option<Vec<String>> {
        let records = self
            .answers(vec!["axfr".to_string(), zone.to_string()])
            .await?;
        Some(
            records
                .into_iter()
                .filter(|record| record.contains(search))
                .collect(),
        )
    }
}
