use async_trait::async_trait;
use ferrous_zone_domain::DomainError;

/// What an external command reported back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// The process exited with status 0.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Trailing segment of stderr after the last colon, right-trimmed.
    ///
    /// `rndc: 'addzone' failed: already exists` yields ` already exists`.
    pub fn diagnostic(&self) -> &str {
        let start = self.stderr.rfind(':').map_or(0, |i| i + 1);
        self.stderr[start..].trim_end()
    }

    /// stdout on success, stderr otherwise.
    pub fn into_text(self) -> String {
        if self.success {
            self.stdout
        } else {
            self.stderr
        }
    }
}

/// An executable invoked with arguments and optional standard input.
///
/// Implementations fix the program and any leading arguments (key file,
/// server address); callers pass only the command-specific part.
#[async_trait]
pub trait ExternalTool: Send + Sync {
    /// Runs the tool to completion. `Err` means the process could not be
    /// started or its streams could not be read; a non-zero exit is an
    /// `Ok` with `success == false`.
    async fn run(&self, args: &[String], input: Option<&str>) -> Result<ToolOutput, DomainError>;
}
