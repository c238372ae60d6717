use ferrous_zone_domain::config::ZonesConfig;
use ferrous_zone_domain::zone_dump::{parse_zone_names, DUMP_COMPLETE_MARKER, DUMP_FILE_NAME};
use ferrous_zone_domain::zone_file::{render_addzone_args, render_zone_skeleton, zone_file_name};
use ferrous_zone_domain::{
    DomainError, FileOwnership, OperationOutcome, ServerIdentity, ZonePolicy,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::bounded_poll::{BoundedPoll, PollState};
use super::dynamic_update_client::DynamicUpdateClient;
use crate::ports::{ExternalTool, ToolOutput, ZoneFileStore};

pub const INVALID_ZONE_MESSAGE: &str = "Not a valid zone name. Check configuration.";
pub const ZONE_FILE_MESSAGE: &str =
    "Unable to place zone file in named directory. Check permissions.";

struct CatalogSync {
    zone: String,
    client: Arc<DynamicUpdateClient>,
}

/// Creates and removes zones on a running name server.
///
/// Adding a zone writes its file, registers it over the control channel and,
/// when a catalog zone is configured, publishes it in the catalog. Removing
/// runs the same steps in reverse. Each step that fails stops the sequence;
/// steps already done are not rolled back, and the returned message says
/// which ones completed.
pub struct ZoneControlClient {
    rndc: Arc<dyn ExternalTool>,
    files: Arc<dyn ZoneFileStore>,
    catalog: Option<CatalogSync>,
    identity: ServerIdentity,
    policy: ZonePolicy,
    ownership: FileOwnership,
    poll_interval: Duration,
}

impl ZoneControlClient {
    /// Builds a client without contacting the name server. Prefer
    /// [`ZoneControlClient::create`], which checks the control channel first.
    pub fn new(
        config: &ZonesConfig,
        rndc: Arc<dyn ExternalTool>,
        files: Arc<dyn ZoneFileStore>,
        updater: Option<Arc<DynamicUpdateClient>>,
    ) -> Result<Self, DomainError> {
        let catalog = match (&config.catalog, updater) {
            (Some(zone), Some(client)) => Some(CatalogSync {
                zone: zone.clone(),
                client,
            }),
            (Some(zone), None) => {
                return Err(DomainError::ConfigError(format!(
                    "Catalog zone {} configured without a dynamic update client",
                    zone
                )));
            }
            (None, _) => None,
        };

        Ok(Self {
            rndc,
            files,
            catalog,
            identity: config.identity.clone(),
            policy: config.policy.clone(),
            ownership: config.ownership.clone(),
            poll_interval: BoundedPoll::DEFAULT_INTERVAL,
        })
    }

    /// Builds a client and fails unless `rndc status` succeeds.
    pub async fn create(
        config: &ZonesConfig,
        rndc: Arc<dyn ExternalTool>,
        files: Arc<dyn ZoneFileStore>,
        updater: Option<Arc<DynamicUpdateClient>>,
    ) -> Result<Self, DomainError> {
        let client = Self::new(config, rndc, files, updater)?;
        if client.is_reachable().await {
            Ok(client)
        } else {
            Err(DomainError::ConfigError(
                "Cannot communicate with BIND using rndc".to_string(),
            ))
        }
    }

    /// Interval between dump completion checks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn catalog_zone(&self) -> Option<&str> {
        self.catalog.as_ref().map(|c| c.zone.as_str())
    }

    async fn call(&self, args: &[&str]) -> Result<ToolOutput, DomainError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.call_owned(&args).await
    }

    async fn call_owned(&self, args: &[String]) -> Result<ToolOutput, DomainError> {
        debug!(args = ?args, "Calling rndc");
        self.rndc.run(args, None).await
    }

    /// `rndc status` succeeded.
    pub async fn is_reachable(&self) -> bool {
        match self.call(&["status"]).await {
            Ok(output) => output.success,
            Err(e) => {
                warn!(error = %e, "rndc could not be run");
                false
            }
        }
    }

    /// Full `rndc status` report, or the error text when it failed.
    pub async fn status(&self) -> String {
        match self.call(&["status"]).await {
            Ok(output) => output.into_text(),
            Err(e) => e.to_string(),
        }
    }

    #[instrument(skip(self))]
    pub async fn zone_status(&self, zone: &str) -> String {
        match self.call(&["zonestatus", zone]).await {
            Ok(output) => output.into_text(),
            Err(e) => e.to_string(),
        }
    }

    /// Protected zones are never managed; every other zone must end with
    /// one of the required suffixes.
    pub fn check_zone(&self, zone: &str) -> Result<(), DomainError> {
        if self.policy.is_protected(zone) {
            return Err(DomainError::PolicyRejection(format!("{} is protected", zone)));
        }
        match self.policy.matching_suffix(zone) {
            Some(suffix) => {
                debug!(zone = %zone, suffix = %suffix, "Zone meets requirements");
                Ok(())
            }
            None => Err(DomainError::PolicyRejection(format!(
                "{} does not end with any required suffix",
                zone
            ))),
        }
    }

    pub fn zone_is_valid(&self, zone: &str) -> bool {
        match self.check_zone(zone) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Ignoring zone");
                false
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn add(&self, zone: &str) -> OperationOutcome {
        if !self.zone_is_valid(zone) {
            return OperationOutcome::Failed(INVALID_ZONE_MESSAGE.to_string());
        }

        let file_name = zone_file_name(zone);
        let contents = render_zone_skeleton(zone, &self.identity);
        if let Err(e) = self
            .files
            .write_zone_file(&file_name, &contents, &self.ownership)
            .await
        {
            error!(zone = %zone, error = %e, "Failed to write zone file");
            return OperationOutcome::Failed(ZONE_FILE_MESSAGE.to_string());
        }

        let args = render_addzone_args(zone, &file_name, &self.identity);
        let output = match self.call_owned(&args).await {
            Ok(output) => output,
            Err(e) => return OperationOutcome::Failed(e.to_string()),
        };
        if !output.success {
            debug!(zone = %zone, stderr = %output.stderr, "Zone add failed");
            return OperationOutcome::Failed(output.diagnostic().to_string());
        }
        info!(zone = %zone, "Zone added");

        let Some(catalog) = &self.catalog else {
            return OperationOutcome::Succeeded(output.stdout);
        };

        match catalog.client.add_zone(&catalog.zone, zone).await {
            Ok(()) => {
                info!(zone = %zone, catalog = %catalog.zone, "Zone added to catalog");
                OperationOutcome::Succeeded(format!(
                    "{} zone and catalog file added successfully",
                    zone
                ))
            }
            Err(e) => {
                error!(zone = %zone, catalog = %catalog.zone, error = %e, "Catalog add failed");
                OperationOutcome::Failed(format!(
                    "{} zone added but catalog add failed: {}",
                    zone,
                    error_text(e)
                ))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, zone: &str) -> OperationOutcome {
        if !self.zone_is_valid(zone) {
            return OperationOutcome::Failed(INVALID_ZONE_MESSAGE.to_string());
        }

        let output = match self.call(&["delzone", zone]).await {
            Ok(output) => output,
            Err(e) => return OperationOutcome::Failed(e.to_string()),
        };
        if !output.success {
            debug!(zone = %zone, stderr = %output.stderr, "Zone delete failed");
            return OperationOutcome::Failed(output.diagnostic().to_string());
        }
        info!(zone = %zone, "Zone removed");

        let Some(catalog) = &self.catalog else {
            return OperationOutcome::Succeeded(output.stdout);
        };

        if let Err(e) = catalog.client.delete_zone(&catalog.zone, zone).await {
            error!(zone = %zone, catalog = %catalog.zone, error = %e, "Catalog delete failed");
            return OperationOutcome::Failed(format!(
                "{} removed but catalog delete failed: {}",
                zone,
                error_text(e)
            ));
        }

        match self.files.remove_zone_file(&zone_file_name(zone)).await {
            Ok(()) => OperationOutcome::Succeeded(format!(
                "{} and catalog entry removed successfully",
                zone
            )),
            Err(e) => {
                warn!(zone = %zone, error = %e, "Zone file left behind");
                OperationOutcome::Degraded(format!(
                    "{} and catalog entry removed, unable to delete zone file",
                    zone
                ))
            }
        }
    }

    /// Zones loaded by the name server that this tool may manage.
    ///
    /// Clears any earlier dump, asks the server for a new one and waits for
    /// it to finish. An empty list means no eligible zones; an error means
    /// the list could not be obtained.
    #[instrument(skip(self))]
    pub async fn list_zones(&self) -> Result<Vec<String>, DomainError> {
        self.files.discard_file(DUMP_FILE_NAME).await?;

        let output = self.call(&["dumpdb", "-zones"]).await?;
        if !output.success {
            debug!(stderr = %output.stderr, "Unable to create dump file");
            return Err(DomainError::ControlProtocolError(
                output.diagnostic().to_string(),
            ));
        }

        let mut poll = BoundedPoll::new(self.poll_interval, BoundedPoll::DEFAULT_MAX_ATTEMPTS);
        let files = Arc::clone(&self.files);
        let state = poll
            .wait_until(move || {
                let files = Arc::clone(&files);
                async move { dump_is_ready(files.as_ref()).await }
            })
            .await;
        if state != PollState::Ready {
            debug!(attempts = poll.attempts(), "Dump file never completed");
            return Err(DomainError::PollTimeout {
                attempts: poll.attempts(),
            });
        }

        let contents = self.files.read_file(DUMP_FILE_NAME).await?;
        let zones: Vec<String> = parse_zone_names(&contents)
            .into_iter()
            .filter(|zone| self.zone_is_valid(zone))
            .collect();

        debug!(zones = ?zones, "Found zones");
        Ok(zones)
    }
}

async fn dump_is_ready(files: &dyn ZoneFileStore) -> bool {
    match files.last_line(DUMP_FILE_NAME).await {
        Ok(Some(line)) => line.trim_end() == DUMP_COMPLETE_MARKER,
        Ok(None) => false,
        Err(e) => {
            debug!(error = %e, "Dump file not readable yet");
            false
        }
    }
}

/// The text a failed step reported, without the error kind prefix.
fn error_text(e: DomainError) -> String {
    match e {
        DomainError::CatalogSyncError(text) | DomainError::UpdateRejected(text) => text,
        other => other.to_string(),
    }
}
