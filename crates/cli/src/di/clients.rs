use ferrous_zone_application::ports::ExternalTool;
use ferrous_zone_application::services::{DnsQueryHelper, DynamicUpdateClient, ZoneControlClient};
use ferrous_zone_domain::Config;
use ferrous_zone_infrastructure::filesystem::LocalZoneFileStore;
use ferrous_zone_infrastructure::process::ProcessToolRunner;
use std::sync::Arc;
use tracing::{debug, info};

/// nsupdate signed with the control-channel key. A missing dig only disables
/// raw queries.
pub fn dynamic_update_client(config: &Config) -> anyhow::Result<DynamicUpdateClient> {
    let updater: Arc<dyn ExternalTool> = Arc::new(ProcessToolRunner::nsupdate(
        &config.tools.nsupdate,
        Some(&config.control.keyfile),
    )?);

    let lookup: Option<Arc<dyn ExternalTool>> = match ProcessToolRunner::dig(&config.tools.dig) {
        Ok(dig) => Some(Arc::new(dig)),
        Err(e) => {
            debug!(error = %e, "Lookup tool unavailable, queries disabled");
            None
        }
    };

    Ok(DynamicUpdateClient::new(updater, lookup))
}

pub fn dns_query_helper(config: &Config) -> anyhow::Result<DnsQueryHelper> {
    let dig = ProcessToolRunner::dig(&config.tools.dig)?;
    Ok(DnsQueryHelper::new(Arc::new(dig)))
}

/// Builds the zone client and checks that rndc can reach the server.
pub async fn zone_control_client(config: &Config) -> anyhow::Result<ZoneControlClient> {
    let rndc = Arc::new(ProcessToolRunner::rndc(&config.control)?);
    let files = Arc::new(LocalZoneFileStore::new(&config.zones.directory)?);

    let updater = match &config.zones.catalog {
        Some(catalog) => {
            info!(catalog = %catalog, "Catalog zone synchronisation enabled");
            Some(Arc::new(dynamic_update_client(config)?))
        }
        None => None,
    };

    let client = ZoneControlClient::create(&config.zones, rndc, files, updater).await?;
    Ok(client)
}
