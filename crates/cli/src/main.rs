use clap::{ArgGroup, Parser};
use ferrous_zone_application::use_cases::{AddHostUseCase, DeleteHostUseCase};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, warn};

mod bootstrap;
mod commands;
mod di;

use commands::ZoneChange;

#[derive(Parser)]
#[command(name = "ferrous-zone")]
#[command(version)]
#[command(about = "Ferrous Zone - manage BIND zones over rndc and nsupdate")]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args([
            "status", "hostquery", "hostadd", "hostdelete", "hostlist",
            "zoneadd", "zonedelete", "zonelist", "zonesearch", "zonestatus",
        ])
))]
struct Cli {
    /// Enable verbose messages
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Show status of DNS server
    #[arg(long)]
    status: bool,

    /// Query DNS for specified record
    #[arg(long, value_name = "FQDN|IP")]
    hostquery: Option<String>,

    /// Add A and PTR record
    #[arg(long, num_args = 2, value_names = ["FQDN", "IP"])]
    hostadd: Option<Vec<String>>,

    /// Replace existing records when adding a host
    #[arg(long, requires = "hostadd")]
    force: bool,

    /// Delete A and PTR (provide either)
    #[arg(long, value_name = "FQDN|IP")]
    hostdelete: Option<String>,

    /// List all records for specified zone
    #[arg(long, value_name = "ZONE")]
    hostlist: Option<String>,

    /// Add specified zone
    #[arg(long, value_name = "ZONE")]
    zoneadd: Option<String>,

    /// Delete specified zone
    #[arg(long, value_name = "ZONE")]
    zonedelete: Option<String>,

    /// List all zones
    #[arg(long)]
    zonelist: bool,

    /// Wildcard searching of zone records
    #[arg(long, num_args = 2, value_names = ["ZONE", "SEARCH"])]
    zonesearch: Option<Vec<String>>,

    /// Show status of specified zone
    #[arg(long, value_name = "ZONE")]
    zonestatus: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref())?;
    bootstrap::init_logging(&config.logging, cli.verbose);

    debug!(config = ?config, "Configuration loaded");
    if let Some(raw) = config.zones.ownership.mode.fallback_from() {
        warn!(
            nameper = %raw,
            mode = %config.zones.ownership.mode,
            "Zone file permissions are not valid octal, using default"
        );
    }
    if config.service_mode {
        warn!("Service mode is configured but this build only runs single commands");
    }

    if let Some(host) = &cli.hostquery {
        let lookup = di::dns_query_helper(&config)?;
        return Ok(commands::host_query(&lookup, host).await);
    }
    if let Some(zone) = &cli.hostlist {
        let lookup = di::dns_query_helper(&config)?;
        return Ok(commands::host_list(&lookup, zone).await);
    }
    if let Some([zone, search]) = cli.zonesearch.as_deref() {
        let lookup = di::dns_query_helper(&config)?;
        return Ok(commands::zone_search(&lookup, zone, search).await);
    }
    if let Some([fqdn, ip]) = cli.hostadd.as_deref() {
        let use_case = AddHostUseCase::new(
            Arc::new(di::dns_query_helper(&config)?),
            Arc::new(di::dynamic_update_client(&config)?),
        );
        return Ok(commands::host_add(&use_case, fqdn, ip, cli.force).await);
    }
    if let Some(target) = &cli.hostdelete {
        let use_case = DeleteHostUseCase::new(
            Arc::new(di::dns_query_helper(&config)?),
            Arc::new(di::dynamic_update_client(&config)?),
        );
        return Ok(commands::host_delete(&use_case, target).await);
    }

    let client = di::zone_control_client(&config).await?;

    let code = if cli.status {
        commands::status(&client).await
    } else if let Some(zone) = &cli.zonestatus {
        commands::zone_status(&client, zone).await
    } else if cli.zonelist {
        commands::zone_list(&client).await
    } else if let Some(zone) = &cli.zoneadd {
        commands::zone_modify(&client, zone, ZoneChange::Add).await
    } else if let Some(zone) = &cli.zonedelete {
        commands::zone_modify(&client, zone, ZoneChange::Delete).await
    } else {
        ExitCode::FAILURE
    };

    Ok(code)
}
