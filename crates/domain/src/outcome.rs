use std::fmt;

/// Result of a lifecycle operation as reported to the operator.
///
/// `Degraded` counts as success: the requested change is in place, but a
/// housekeeping step such as removing a zone file or a stale host record did
/// not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Succeeded(String),
    Degraded(String),
    Failed(String),
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, OperationOutcome::Failed(_))
    }

    pub fn message(&self) -> &str {
        match self {
            OperationOutcome::Succeeded(m)
            | OperationOutcome::Degraded(m)
            | OperationOutcome::Failed(m) => m,
        }
    }

    pub fn into_pair(self) -> (bool, String) {
        let success = self.is_success();
        match self {
            OperationOutcome::Succeeded(m)
            | OperationOutcome::Degraded(m)
            | OperationOutcome::Failed(m) => (success, m),
        }
    }
}

impl fmt::Display for OperationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
