use ferrous_zone_application::services::DnsQueryHelper;
use ferrous_zone_application::use_cases::{AddHostUseCase, DeleteHostUseCase};
use ferrous_zone_domain::OperationOutcome;
use std::process::ExitCode;

fn print_lines(lines: Option<Vec<String>>, empty_message: &str) -> ExitCode {
    match lines {
        Some(lines) if lines.is_empty() => {
            println!("{}", empty_message);
            ExitCode::SUCCESS
        }
        Some(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        None => {
            println!("Lookup failed. Run debug for more info.");
            ExitCode::FAILURE
        }
    }
}

fn print_outcome(outcome: OperationOutcome) -> ExitCode {
    println!("{}", outcome.message());
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub async fn host_query(lookup: &DnsQueryHelper, host: &str) -> ExitCode {
    print_lines(
        lookup.find_record(host).await,
        &format!("No records found for {}", host),
    )
}

pub async fn host_list(lookup: &DnsQueryHelper, zone: &str) -> ExitCode {
    print_lines(
        lookup.search_domain(zone, "").await,
        &format!("No records in {}", zone),
    )
}

pub async fn zone_search(lookup: &DnsQueryHelper, zone: &str, search: &str) -> ExitCode {
    print_lines(
        lookup.search_domain(zone, search).await,
        &format!("No records in {} match {}", zone, search),
    )
}

pub async fn host_add(use_case: &AddHostUseCase, fqdn: &str, ip: &str, force: bool) -> ExitCode {
    print_outcome(use_case.execute(fqdn, ip, force).await)
}

pub async fn host_delete(use_case: &DeleteHostUseCase, target: &str) -> ExitCode {
    print_outcome(use_case.execute(target).await)
}
