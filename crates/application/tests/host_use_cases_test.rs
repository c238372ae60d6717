use ferrous_zone_application::ports::ToolOutput;
use ferrous_zone_application::services::{DnsQueryHelper, DynamicUpdateClient};
use ferrous_zone_application::use_cases::{AddHostUseCase, DeleteHostUseCase};
use ferrous_zone_domain::OperationOutcome;
use std::sync::Arc;

mod helpers;
use helpers::{FakeResolver, ScriptedTool};

const WEB_A: &str = "web.example.com.\t86400\tIN\tA\t192.0.2.10";
const WEB_PTR: &str = "10.2.0.192.in-addr.arpa.\t86400\tIN\tPTR\tweb.example.com.";

struct Harness {
    dig: Arc<FakeResolver>,
    nsupdate: Arc<ScriptedTool>,
}

impl Harness {
    fn new(dig: FakeResolver, nsupdate: ScriptedTool) -> Self {
        Self {
            dig: Arc::new(dig),
            nsupdate: Arc::new(nsupdate),
        }
    }

    fn clients(&self) -> (Arc<DnsQueryHelper>, Arc<DynamicUpdateClient>) {
        (
            Arc::new(DnsQueryHelper::new(self.dig.clone())),
            Arc::new(DynamicUpdateClient::new(self.nsupdate.clone(), None)),
        )
    }

    fn add(&self) -> AddHostUseCase {
        let (lookup, updater) = self.clients();
        AddHostUseCase::new(lookup, updater)
    }

    fn delete(&self) -> DeleteHostUseCase {
        let (lookup, updater) = self.clients();
        DeleteHostUseCase::new(lookup, updater)
    }
}

/// nsupdate that accepts forward updates and refuses any touching a PTR.
fn refusing_reverse() -> ScriptedTool {
    ScriptedTool::new(|_, input| match input {
        Some(script) if script.contains(" PTR") => {
            Ok(ToolOutput::failed("update failed: REFUSED\n"))
        }
        _ => Ok(ToolOutput::ok("")),
    })
}

fn existing_host() -> FakeResolver {
    let dig = FakeResolver::new();
    dig.answer("web.example.com", "A", WEB_A)
        .answer("10.2.0.192.in-addr.arpa", "PTR", WEB_PTR);
    dig
}

// ============================================================================
// Tests: Add Host Use Case
// ============================================================================

#[tokio::test]
async fn test_add_new_host() {
    let h = Harness::new(FakeResolver::new(), ScriptedTool::succeeding());

    let outcome = h.add().execute("web.example.com", "192.0.2.10", false).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.message(), "web.example.com added with address 192.0.2.10");
    assert_eq!(
        h.nsupdate.inputs(),
        vec![
            "update add web.example.com. 86400 A 192.0.2.10\nsend\n",
            "update add 10.2.0.192.in-addr.arpa. 86400 PTR web.example.com.\nsend\n",
        ]
    );
}

#[tokio::test]
async fn test_add_ipv6_host() {
    let h = Harness::new(FakeResolver::new(), ScriptedTool::succeeding());

    let outcome = h.add().execute("v6.example.com", "2001:db8::1", false).await;

    assert!(outcome.is_success());
    let scripts = h.nsupdate.inputs();
    assert_eq!(scripts[0], "update add v6.example.com. 86400 AAAA 2001:db8::1\nsend\n");
    assert!(scripts[1].contains("ip6.arpa. 86400 PTR v6.example.com.\n"));
    assert!(h
        .dig
        .calls()
        .iter()
        .any(|args| args[..2] == ["v6.example.com", "AAAA"]));
}

#[tokio::test]
async fn test_add_refuses_existing_records_without_force() {
    let h = Harness::new(existing_host(), ScriptedTool::succeeding());

    let outcome = h.add().execute("web.example.com", "192.0.2.10", false).await;

    assert!(!outcome.is_success());
    assert!(outcome.message().starts_with("Existing records found: "));
    assert!(outcome.message().contains("web.example.com A 192.0.2.10"));
    assert!(outcome.message().contains("10.2.0.192.in-addr.arpa PTR web.example.com"));
    assert!(h.nsupdate.calls().is_empty());
}

#[tokio::test]
async fn test_add_with_force_replaces_records() {
    let h = Harness::new(existing_host(), ScriptedTool::succeeding());

    let outcome = h.add().execute("web.example.com", "192.0.2.10", true).await;

    assert!(outcome.is_success());
    assert!(outcome.message().contains("replacing"));
    assert_eq!(
        h.nsupdate.inputs(),
        vec![
            "update delete web.example.com. A\n\
             update add web.example.com. 86400 A 192.0.2.10\n\
             send\n",
            "update delete 10.2.0.192.in-addr.arpa. PTR\n\
             update add 10.2.0.192.in-addr.arpa. 86400 PTR web.example.com.\n\
             send\n",
        ]
    );
}

#[tokio::test]
async fn test_force_move_removes_pointer_of_old_address() {
    let dig = FakeResolver::new();
    dig.answer(
        "web.example.com",
        "A",
        "web.example.com.\t86400\tIN\tA\t192.0.2.5",
    )
    .answer(
        "5.2.0.192.in-addr.arpa",
        "PTR",
        "5.2.0.192.in-addr.arpa.\t86400\tIN\tPTR\tweb.example.com.",
    );
    let h = Harness::new(dig, ScriptedTool::succeeding());

    let outcome = h.add().execute("web.example.com", "192.0.2.10", true).await;

    assert!(matches!(outcome, OperationOutcome::Succeeded(_)));
    assert_eq!(
        h.nsupdate.inputs(),
        vec![
            "update delete web.example.com. A\n\
             update add web.example.com. 86400 A 192.0.2.10\n\
             send\n",
            "update add 10.2.0.192.in-addr.arpa. 86400 PTR web.example.com.\nsend\n",
            "update delete 5.2.0.192.in-addr.arpa. 86400 PTR web.example.com.\nsend\n",
        ]
    );
}

#[tokio::test]
async fn test_force_takeover_removes_previous_owner_address() {
    let dig = FakeResolver::new();
    dig.answer(
        "10.2.0.192.in-addr.arpa",
        "PTR",
        "10.2.0.192.in-addr.arpa.\t86400\tIN\tPTR\tother.example.com.",
    );
    let h = Harness::new(dig, ScriptedTool::succeeding());

    let outcome = h.add().execute("web.example.com", "192.0.2.10", true).await;

    assert!(matches!(outcome, OperationOutcome::Succeeded(_)));
    assert_eq!(
        h.nsupdate.inputs(),
        vec![
            "update add web.example.com. 86400 A 192.0.2.10\nsend\n",
            "update delete 10.2.0.192.in-addr.arpa. PTR\n\
             update add 10.2.0.192.in-addr.arpa. 86400 PTR web.example.com.\n\
             send\n",
            "update delete other.example.com. 86400 A 192.0.2.10\nsend\n",
        ]
    );
}

#[tokio::test]
async fn test_force_reports_stale_record_it_could_not_remove() {
    let dig = FakeResolver::new();
    dig.answer(
        "10.2.0.192.in-addr.arpa",
        "PTR",
        "10.2.0.192.in-addr.arpa.\t86400\tIN\tPTR\tother.example.com.",
    );
    let nsupdate = ScriptedTool::new(|_, input| match input {
        Some(script) if script.starts_with("update delete other.example.com.") => {
            Ok(ToolOutput::failed("update failed: NOTAUTH\n"))
        }
        _ => Ok(ToolOutput::ok("")),
    });
    let h = Harness::new(dig, nsupdate);

    let outcome = h.add().execute("web.example.com", "192.0.2.10", true).await;

    assert!(matches!(outcome, OperationOutcome::Degraded(_)));
    assert!(outcome
        .message()
        .ends_with("unable to remove stale other.example.com A 192.0.2.10"));
}

#[tokio::test]
async fn test_add_reports_committed_forward_record_when_reverse_fails() {
    let h = Harness::new(FakeResolver::new(), refusing_reverse());

    let outcome = h.add().execute("web.example.com", "192.0.2.10", false).await;

    assert_eq!(
        outcome,
        OperationOutcome::Failed(
            "web.example.com forward record added, reverse record failed: update failed: REFUSED"
                .to_string()
        )
    );
    assert_eq!(h.nsupdate.calls().len(), 2);
}

#[tokio::test]
async fn test_add_with_force_removes_alias() {
    let dig = FakeResolver::new();
    dig.answer(
        "web.example.com",
        "CNAME",
        "web.example.com.\t3600\tIN\tCNAME\tlb.example.com.",
    );
    let h = Harness::new(dig, ScriptedTool::succeeding());

    let outcome = h.add().execute("web.example.com", "192.0.2.10", true).await;

    assert!(outcome.is_success());
    assert!(h.nsupdate.inputs()[0].starts_with("update delete web.example.com. CNAME\n"));
}

#[tokio::test]
async fn test_add_invalid_address() {
    let h = Harness::new(FakeResolver::new(), ScriptedTool::succeeding());

    let outcome = h.add().execute("web.example.com", "192.0.2.300", false).await;

    assert_eq!(outcome.message(), "Invalid IP address: 192.0.2.300");
    assert!(h.dig.calls().is_empty());
}

#[tokio::test]
async fn test_add_invalid_name() {
    let h = Harness::new(FakeResolver::new(), ScriptedTool::succeeding());

    for name in ["", "web..example.com", "web example.com", "192.0.2.1"] {
        let outcome = h.add().execute(name, "192.0.2.10", false).await;
        assert!(!outcome.is_success(), "name {:?}", name);
        assert!(outcome.message().starts_with("Invalid domain name"));
    }
    assert!(h.nsupdate.calls().is_empty());
}

#[tokio::test]
async fn test_add_when_lookup_fails() {
    let h = Harness::new(FakeResolver::broken(), ScriptedTool::succeeding());

    let outcome = h.add().execute("web.example.com", "192.0.2.10", false).await;

    assert_eq!(
        outcome.message(),
        "Unable to check existing records for web.example.com / 192.0.2.10"
    );
    assert!(h.nsupdate.calls().is_empty());
}

#[tokio::test]
async fn test_add_rejected_by_server() {
    let h = Harness::new(
        FakeResolver::new(),
        ScriptedTool::failing("update failed: REFUSED\n"),
    );

    let outcome = h.add().execute("web.example.com", "192.0.2.10", false).await;

    assert!(!outcome.is_success());
    assert_eq!(
        outcome.message(),
        "Adding web.example.com failed: update failed: REFUSED"
    );
    assert_eq!(h.nsupdate.calls().len(), 1);
}

// ============================================================================
// Tests: Delete Host Use Case
// ============================================================================

#[tokio::test]
async fn test_delete_by_name() {
    let h = Harness::new(existing_host(), ScriptedTool::succeeding());

    let outcome = h.delete().execute("web.example.com").await;

    assert!(outcome.is_success());
    assert_eq!(outcome.message(), "Removed web.example.com A 192.0.2.10");
    assert_eq!(
        h.nsupdate.inputs(),
        vec![
            "update delete web.example.com. 86400 A 192.0.2.10\nsend\n",
            "update delete 10.2.0.192.in-addr.arpa. 86400 PTR web.example.com.\nsend\n",
        ]
    );
}

#[tokio::test]
async fn test_delete_by_address() {
    let h = Harness::new(existing_host(), ScriptedTool::succeeding());

    let outcome = h.delete().execute("192.0.2.10").await;

    assert!(outcome.is_success());
    assert_eq!(
        outcome.message(),
        "Removed 10.2.0.192.in-addr.arpa PTR web.example.com"
    );
    assert_eq!(
        h.nsupdate.inputs(),
        vec![
            "update delete web.example.com. 86400 A 192.0.2.10\nsend\n",
            "update delete 10.2.0.192.in-addr.arpa. PTR\nsend\n",
        ]
    );
}

#[tokio::test]
async fn test_delete_unknown_host() {
    let h = Harness::new(FakeResolver::new(), ScriptedTool::succeeding());

    let outcome = h.delete().execute("nobody.example.com").await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.message(), "No records found for nobody.example.com");
    assert!(h.nsupdate.calls().is_empty());
}

#[tokio::test]
async fn test_delete_when_lookup_fails() {
    let h = Harness::new(FakeResolver::broken(), ScriptedTool::succeeding());

    let outcome = h.delete().execute("192.0.2.10").await;

    assert_eq!(outcome.message(), "Unable to look up records for 192.0.2.10");
}

#[tokio::test]
async fn test_delete_rejected_by_server() {
    let h = Harness::new(existing_host(), ScriptedTool::failing("update failed: NOTZONE"));

    let outcome = h.delete().execute("web.example.com").await;

    assert!(!outcome.is_success());
    assert_eq!(
        outcome.message(),
        "Deleting web.example.com failed: update failed: NOTZONE"
    );
}

#[tokio::test]
async fn test_delete_reports_committed_forward_removal_when_reverse_fails() {
    let h = Harness::new(existing_host(), refusing_reverse());

    let outcome = h.delete().execute("web.example.com").await;

    assert_eq!(
        outcome,
        OperationOutcome::Failed(
            "web.example.com forward records removed, reverse records failed: update failed: REFUSED"
                .to_string()
        )
    );
}
