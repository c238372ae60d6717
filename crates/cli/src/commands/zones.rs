use ferrous_zone_application::services::ZoneControlClient;
use ferrous_zone_domain::OperationOutcome;
use std::process::ExitCode;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneChange {
    Add,
    Delete,
}

impl ZoneChange {
    fn label(&self) -> &'static str {
        match self {
            ZoneChange::Add => "Add",
            ZoneChange::Delete => "Deletion",
        }
    }
}

pub async fn status(client: &ZoneControlClient) -> ExitCode {
    println!("{}", client.status().await);
    ExitCode::SUCCESS
}

pub async fn zone_status(client: &ZoneControlClient, zone: &str) -> ExitCode {
    println!("{}", client.zone_status(zone).await);
    ExitCode::SUCCESS
}

pub async fn zone_list(client: &ZoneControlClient) -> ExitCode {
    match client.list_zones().await {
        Ok(zones) => {
            for zone in zones {
                println!("{}", zone);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = %e, "Zone list unavailable");
            println!("Unable to get list of zones. Run debug for more info.");
            ExitCode::FAILURE
        }
    }
}

pub async fn zone_modify(client: &ZoneControlClient, zone: &str, change: ZoneChange) -> ExitCode {
    let outcome = match change {
        ZoneChange::Add => client.add(zone).await,
        ZoneChange::Delete => client.delete(zone).await,
    };

    if outcome.is_success() {
        println!("{} of zone {} succeeded", change.label(), zone);
        if let OperationOutcome::Degraded(note) = &outcome {
            println!("{}", note);
        }
        debug!(message = %outcome.message(), "Zone change result");
        ExitCode::SUCCESS
    } else {
        println!("{} of zone {} failed: {}", change.label(), zone, outcome.message());
        ExitCode::FAILURE
    }
}
