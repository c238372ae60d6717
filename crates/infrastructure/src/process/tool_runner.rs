use async_trait::async_trait;
use ferrous_zone_application::ports::{ExternalTool, ToolOutput};
use ferrous_zone_domain::config::ControlChannelConfig;
use ferrous_zone_domain::DomainError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Local resolver every lookup is sent to.
const LOOKUP_SERVER: &str = "@127.0.0.1";

/// Runs an executable with a fixed set of leading arguments.
#[derive(Debug, Clone)]
pub struct ProcessToolRunner {
    program: PathBuf,
    base_args: Vec<String>,
}

impl ProcessToolRunner {
    pub fn new(program: &str, base_args: Vec<String>) -> Result<Self, DomainError> {
        if !is_regular_file(program) {
            return Err(DomainError::ConfigError(format!(
                "Invalid path to executable: {}",
                program
            )));
        }
        Ok(Self {
            program: PathBuf::from(program),
            base_args,
        })
    }

    /// rndc bound to a key file, server and port.
    pub fn rndc(config: &ControlChannelConfig) -> Result<Self, DomainError> {
        if !is_regular_file(&config.keyfile) {
            return Err(DomainError::ConfigError(format!(
                "Key file {} not found or invalid",
                config.keyfile
            )));
        }
        Self::new(
            &config.path,
            vec![
                "-k".to_string(),
                config.keyfile.clone(),
                "-s".to_string(),
                config.server.clone(),
                "-p".to_string(),
                config.port.to_string(),
            ],
        )
        .map_err(|_| DomainError::ConfigError(format!("Invalid path to rndc: {}", config.path)))
    }

    /// nsupdate over TCP in local mode, optionally signed with `keyfile`.
    pub fn nsupdate(path: &str, keyfile: Option<&str>) -> Result<Self, DomainError> {
        let mut base_args = vec!["-v".to_string(), "-l".to_string()];
        if let Some(key) = keyfile {
            base_args.push("-k".to_string());
            base_args.push(key.to_string());
        }
        Self::new(path, base_args)
            .map_err(|_| DomainError::ConfigError(format!("Invalid path {}", path)))
    }

    /// dig pointed at the local resolver.
    pub fn dig(path: &str) -> Result<Self, DomainError> {
        Self::new(path, vec![LOOKUP_SERVER.to_string()])
            .map_err(|_| DomainError::ConfigError("Invalid path to dig".to_string()))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn base_args(&self) -> &[String] {
        &self.base_args
    }
}

#[async_trait]
impl ExternalTool for ProcessToolRunner {
    async fn run(&self, args: &[String], input: Option<&str>) -> Result<ToolOutput, DomainError> {
        debug!(
            program = %self.program.display(),
            args = ?self.base_args.iter().chain(args).collect::<Vec<_>>(),
            "Running external tool"
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.base_args)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| {
            DomainError::IoError(format!("Failed to start {}: {}", self.program.display(), e))
        })?;

        if let (Some(text), Some(mut stdin)) = (input, child.stdin.take()) {
            stdin.write_all(text.as_bytes()).await.map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to write to {}: {}",
                    self.program.display(),
                    e
                ))
            })?;
        }

        let output = child.wait_with_output().await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed to read output of {}: {}",
                self.program.display(),
                e
            ))
        })?;

        debug!(status = %output.status, "External tool finished");
        Ok(ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn is_regular_file(path: &str) -> bool {
    Path::new(path).is_file()
}
