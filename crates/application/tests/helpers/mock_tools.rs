#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_zone_application::ports::{ExternalTool, ToolOutput, ZoneFileStore};
use ferrous_zone_domain::zone_dump::DUMP_FILE_NAME;
use ferrous_zone_domain::{DomainError, FileOwnership};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub args: Vec<String>,
    pub input: Option<String>,
}

type Responder = dyn Fn(&[String], Option<&str>) -> Result<ToolOutput, DomainError> + Send + Sync;

/// Tool whose replies come from a closure. Every call is recorded.
pub struct ScriptedTool {
    responder: Box<Responder>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTool {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[String], Option<&str>) -> Result<ToolOutput, DomainError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(|_, _| Ok(ToolOutput::ok("")))
    }

    pub fn failing(stderr: &str) -> Self {
        let stderr = stderr.to_string();
        Self::new(move |_, _| Ok(ToolOutput::failed(stderr.clone())))
    }

    pub fn unavailable() -> Self {
        Self::new(|_, _| Err(DomainError::IoError("Failed to start tool".to_string())))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.calls().into_iter().filter_map(|c| c.input).collect()
    }
}

#[async_trait]
impl ExternalTool for ScriptedTool {
    async fn run(&self, args: &[String], input: Option<&str>) -> Result<ToolOutput, DomainError> {
        self.calls.lock().unwrap().push(RecordedCall {
            args: args.to_vec(),
            input: input.map(str::to_string),
        });
        (self.responder)(args, input)
    }
}

/// dig stand-in answering from a table of `(name, type)` to answer lines.
pub struct FakeResolver {
    answers: Mutex<HashMap<(String, String), Vec<String>>>,
    calls: Mutex<Vec<Vec<String>>>,
    broken: bool,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            broken: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::new()
        }
    }

    pub fn answer(&self, name: &str, record_type: &str, line: &str) -> &Self {
        self.answers
            .lock()
            .unwrap()
            .entry((name.to_string(), record_type.to_string()))
            .or_default()
            .push(line.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExternalTool for FakeResolver {
    async fn run(&self, args: &[String], _input: Option<&str>) -> Result<ToolOutput, DomainError> {
        self.calls.lock().unwrap().push(args.to_vec());
        if self.broken {
            return Ok(ToolOutput::failed(";; connection timed out; no servers could be reached"));
        }

        let (name, record_type) = match args {
            [first, second, ..] if first == "axfr" => (second.clone(), "AXFR".to_string()),
            [name, second, ..] if !second.starts_with('+') => (name.clone(), second.clone()),
            [name, ..] => (name.clone(), "A".to_string()),
            [] => return Ok(ToolOutput::failed("dig: no name given")),
        };

        let mut stdout = String::from("; <<>> DiG 9.18 <<>> fake\n;; global options: +cmd\n");
        if let Some(lines) = self.answers.lock().unwrap().get(&(name, record_type)) {
            for line in lines {
                stdout.push_str(line);
                stdout.push('\n');
            }
        }
        Ok(ToolOutput::ok(stdout))
    }
}

/// Zone directory kept in memory.
#[derive(Default)]
pub struct MemoryZoneFileStore {
    files: Mutex<HashMap<String, String>>,
    ownership: Mutex<HashMap<String, FileOwnership>>,
    fail_writes: Mutex<bool>,
    fail_removes: Mutex<bool>,
}

impl MemoryZoneFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub fn fail_removes(&self) {
        *self.fail_removes.lock().unwrap() = true;
    }

    pub fn put(&self, file_name: &str, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(file_name.to_string(), contents.to_string());
    }

    pub fn contents(&self, file_name: &str) -> Option<String> {
        self.files.lock().unwrap().get(file_name).cloned()
    }

    pub fn ownership_of(&self, file_name: &str) -> Option<FileOwnership> {
        self.ownership.lock().unwrap().get(file_name).cloned()
    }

    pub fn exists(&self, file_name: &str) -> bool {
        self.files.lock().unwrap().contains_key(file_name)
    }
}

#[async_trait]
impl ZoneFileStore for MemoryZoneFileStore {
    async fn write_zone_file(
        &self,
        file_name: &str,
        contents: &str,
        ownership: &FileOwnership,
    ) -> Result<(), DomainError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(DomainError::FilesystemError(format!(
                "Failed to chown {}: Operation not permitted",
                file_name
            )));
        }
        self.put(file_name, contents);
        self.ownership
            .lock()
            .unwrap()
            .insert(file_name.to_string(), ownership.clone());
        Ok(())
    }

    async fn remove_zone_file(&self, file_name: &str) -> Result<(), DomainError> {
        if *self.fail_removes.lock().unwrap() {
            return Err(DomainError::FilesystemError(format!(
                "Failed to remove {}: Permission denied",
                file_name
            )));
        }
        match self.files.lock().unwrap().remove(file_name) {
            Some(_) => Ok(()),
            None => Err(DomainError::FilesystemError(format!(
                "Failed to remove {}: No such file or directory",
                file_name
            ))),
        }
    }

    async fn discard_file(&self, file_name: &str) -> Result<(), DomainError> {
        if *self.fail_removes.lock().unwrap() {
            return Err(DomainError::FilesystemError(format!(
                "Failed to remove {}: Permission denied",
                file_name
            )));
        }
        self.files.lock().unwrap().remove(file_name);
        Ok(())
    }

    async fn read_file(&self, file_name: &str) -> Result<String, DomainError> {
        self.contents(file_name).ok_or_else(|| {
            DomainError::FilesystemError(format!("Failed to read {}", file_name))
        })
    }

    async fn last_line(&self, file_name: &str) -> Result<Option<String>, DomainError> {
        Ok(self
            .contents(file_name)
            .and_then(|c| c.lines().last().map(str::to_string)))
    }
}

/// rndc stand-in that keeps a set of loaded zones and writes zone dumps
/// into a [`MemoryZoneFileStore`].
pub struct FakeNameServer {
    zones: Mutex<BTreeSet<String>>,
    files: Arc<MemoryZoneFileStore>,
    calls: Mutex<Vec<Vec<String>>>,
    reachable: Mutex<bool>,
    dump_completes: Mutex<bool>,
    writes_dumps: Mutex<bool>,
}

impl FakeNameServer {
    pub fn new(files: Arc<MemoryZoneFileStore>) -> Self {
        Self {
            zones: Mutex::new(BTreeSet::new()),
            files,
            calls: Mutex::new(Vec::new()),
            reachable: Mutex::new(true),
            dump_completes: Mutex::new(true),
            writes_dumps: Mutex::new(true),
        }
    }

    pub fn with_zones(self, zones: &[&str]) -> Self {
        self.zones
            .lock()
            .unwrap()
            .extend(zones.iter().map(|z| z.to_string()));
        self
    }

    pub fn unreachable(&self) {
        *self.reachable.lock().unwrap() = false;
    }

    pub fn stall_dumps(&self) {
        *self.dump_completes.lock().unwrap() = false;
    }

    /// `dumpdb` reports success without writing anything.
    pub fn skip_dumps(&self) {
        *self.writes_dumps.lock().unwrap() = false;
    }

    pub fn zones(&self) -> Vec<String> {
        self.zones.lock().unwrap().iter().cloned().collect()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|args| args.first().cloned())
            .collect()
    }

    fn dump(&self) -> String {
        let mut dump = String::from(";\n; Start view _default\n;\n");
        for zone in self.zones.lock().unwrap().iter() {
            dump.push_str(&format!(";\n; Zone dump of '{}/IN'\n;\n", zone));
            dump.push_str(&format!("{}.\t3600\tIN SOA\tns1.example.com. hostmaster.example.com. 1 86400 7200 2419200 3600\n", zone));
        }
        dump.push_str(";\n; Zone dump of 'version.bind/CH'\n;\n");
        if *self.dump_completes.lock().unwrap() {
            dump.push_str("; Dump complete\n");
        }
        dump
    }
}

#[async_trait]
impl ExternalTool for FakeNameServer {
    async fn run(&self, args: &[String], _input: Option<&str>) -> Result<ToolOutput, DomainError> {
        self.calls.lock().unwrap().push(args.to_vec());
        if !*self.reachable.lock().unwrap() {
            return Ok(ToolOutput::failed(
                "rndc: connect failed: 127.0.0.1#953: connection refused",
            ));
        }

        let command = args.first().map(String::as_str).unwrap_or_default();
        let zone = args.get(1).cloned().unwrap_or_default();
        match command {
            "status" => Ok(ToolOutput::ok(format!(
                "version: BIND 9.18.18\nnumber of zones: {}\nserver is up and running\n",
                self.zones.lock().unwrap().len()
            ))),
            "zonestatus" => {
                if self.zones.lock().unwrap().contains(&zone) {
                    Ok(ToolOutput::ok(format!("name: {}\ntype: primary\n", zone)))
                } else {
                    Ok(ToolOutput::failed("rndc: 'zonestatus' failed: not found\nno matching zone found"))
                }
            }
            "addzone" => {
                if self.zones.lock().unwrap().insert(zone) {
                    Ok(ToolOutput::ok(""))
                } else {
                    Ok(ToolOutput::failed("rndc: 'addzone' failed: already exists"))
                }
            }
            "delzone" => {
                if self.zones.lock().unwrap().remove(&zone) {
                    Ok(ToolOutput::ok(format!(
                        "zone '{}' was deleted.\nrequested deletion of zone files\n",
                        zone
                    )))
                } else {
                    Ok(ToolOutput::failed("rndc: 'delzone' failed: not found"))
                }
            }
            "dumpdb" => {
                if *self.writes_dumps.lock().unwrap() {
                    self.files.put(DUMP_FILE_NAME, &self.dump());
                }
                Ok(ToolOutput::ok(""))
            }
            other => Ok(ToolOutput::failed(format!(
                "rndc: '{}' failed: unknown command",
                other
            ))),
        }
    }
}
