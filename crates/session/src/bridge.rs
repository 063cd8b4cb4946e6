//! Bridge-backed vendor session
//!
//! The vendor component only exists as a platform-native in-process object,
//! so production runs host it inside a small bridge executable and talk to
//! it over a line-JSON protocol on stdin/stdout: one command object per
//! line in, one response object per line out. Record payloads travel
//! base64-encoded because they are raw Shift-JIS bytes.
//!
//! Transport failures (bridge gone, malformed response, timeout) surface as
//! the sentinel code [`BRIDGE_TRANSPORT_ERROR`], which the manager treats as
//! fatal; supervising layers restart the worker process instead.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use umalink_parsers::Feed;

use crate::vendor::{OpenReply, ReadReply, RtOpenReply, VendorSession};

/// Sentinel code for bridge transport failures; outside the vendor's
/// documented range, classified fatal
pub const BRIDGE_TRANSPORT_ERROR: i32 = -9_000;

/// Bridge process configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Path to the bridge executable
    pub executable: PathBuf,
    /// Which vendor component the bridge should load
    pub feed: Feed,
    /// Per-command reply timeout
    pub command_timeout: Duration,
}

impl BridgeConfig {
    pub fn new(executable: impl Into<PathBuf>, feed: Feed) -> Self {
        Self {
            executable: executable.into(),
            feed,
            command_timeout: Duration::from_secs(60),
        }
    }
}

/// Response line from the bridge
#[derive(Debug, Default, Deserialize)]
struct Reply {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: i32,
    #[serde(default)]
    readcount: i32,
    #[serde(default)]
    downloadcount: i32,
    #[serde(default)]
    lastfiletimestamp: String,
    #[serde(default)]
    data: String,
    #[serde(default)]
    filename: String,
}

/// One vendor session hosted in a bridge subprocess
pub struct BridgeSession {
    config: BridgeConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<BufReader<ChildStdout>>,
}

impl BridgeSession {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            child: None,
            stdin: None,
            stdout: None,
        }
    }

    /// Spawn the bridge and wait for its ready line
    async fn ensure_started(&mut self) -> Result<(), String> {
        if self.child.is_some() {
            return Ok(());
        }

        let mut child = Command::new(&self.config.executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("failed to spawn bridge: {}", e))?;

        let stdin = child.stdin.take().ok_or("bridge stdin unavailable")?;
        let stdout = child.stdout.take().ok_or("bridge stdout unavailable")?;
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stdout = Some(BufReader::new(stdout));

        let ready = self.read_reply().await?;
        match ready.status.as_deref() {
            Some("ready") => {
                tracing::info!(executable = %self.config.executable.display(), "bridge ready");
                Ok(())
            }
            other => Err(format!("bridge did not report ready: {:?}", other)),
        }
    }

    async fn read_reply(&mut self) -> Result<Reply, String> {
        let stdout = self.stdout.as_mut().ok_or("bridge not running")?;
        let mut line = String::new();
        let read = tokio::time::timeout(self.config.command_timeout, stdout.read_line(&mut line))
            .await
            .map_err(|_| "bridge reply timeout".to_string())?
            .map_err(|e| format!("bridge read failed: {}", e))?;
        if read == 0 {
            return Err("bridge terminated unexpectedly".to_string());
        }
        serde_json::from_str(line.trim())
            .map_err(|e| format!("invalid bridge reply {:?}: {}", line.trim(), e))
    }

    async fn command(&mut self, command: serde_json::Value) -> Result<Reply, String> {
        let stdin = self.stdin.as_mut().ok_or("bridge not running")?;
        let mut line = command.to_string();
        line.push('\n');
        stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|e| format!("bridge write failed: {}", e))?;
        self.read_reply().await
    }

    fn feed_tag(&self) -> &'static str {
        match self.config.feed {
            Feed::Central => "central",
            Feed::Regional => "regional",
        }
    }

    /// Terminate the bridge process
    pub async fn shutdown(&mut self) {
        if self.stdin.is_some() {
            let _ = self.command(json!({"cmd": "quit"})).await;
        }
        if let Some(mut child) = self.child.take() {
            let _ = child.kill().await;
        }
        self.stdin = None;
        self.stdout = None;
    }
}

#[async_trait]
impl VendorSession for BridgeSession {
    async fn initialise(&mut self, service_key: &str) -> i32 {
        if let Err(e) = self.ensure_started().await {
            tracing::error!(error = %e, "bridge start failed");
            return BRIDGE_TRANSPORT_ERROR;
        }
        match self
            .command(json!({"cmd": "init", "type": self.feed_tag(), "key": service_key}))
            .await
        {
            Ok(reply) => reply.code,
            Err(e) => {
                tracing::error!(error = %e, "bridge init failed");
                BRIDGE_TRANSPORT_ERROR
            }
        }
    }

    async fn open(&mut self, data_spec: &str, from_time: &str, option: i32) -> OpenReply {
        match self
            .command(json!({
                "cmd": "open",
                "dataspec": data_spec,
                "fromtime": from_time,
                "option": option,
            }))
            .await
        {
            Ok(reply) => OpenReply {
                code: reply.code,
                read_count: reply.readcount,
                download_count: reply.downloadcount,
                last_file_ts: reply.lastfiletimestamp,
            },
            Err(e) => {
                tracing::error!(error = %e, "bridge open failed");
                OpenReply {
                    code: BRIDGE_TRANSPORT_ERROR,
                    ..OpenReply::default()
                }
            }
        }
    }

    async fn real_time_open(&mut self, data_spec: &str, key: &str) -> RtOpenReply {
        match self
            .command(json!({"cmd": "rtopen", "dataspec": data_spec, "key": key}))
            .await
        {
            Ok(reply) => RtOpenReply {
                code: reply.code,
                read_count: reply.readcount,
            },
            Err(e) => {
                tracing::error!(error = %e, "bridge rtopen failed");
                RtOpenReply {
                    code: BRIDGE_TRANSPORT_ERROR,
                    read_count: 0,
                }
            }
        }
    }

    async fn status(&mut self) -> i32 {
        match self.command(json!({"cmd": "status"})).await {
            Ok(reply) => reply.code,
            Err(e) => {
                tracing::error!(error = %e, "bridge status failed");
                BRIDGE_TRANSPORT_ERROR
            }
        }
    }

    async fn read_record(&mut self, buffer_size: usize) -> ReadReply {
        match self
            .command(json!({"cmd": "read", "size": buffer_size}))
            .await
        {
            Ok(reply) => {
                let data = if reply.code > 0 && !reply.data.is_empty() {
                    match BASE64.decode(reply.data.as_bytes()) {
                        Ok(bytes) => Some(Bytes::from(bytes)),
                        Err(e) => {
                            tracing::error!(error = %e, "bridge sent undecodable record");
                            return ReadReply {
                                code: BRIDGE_TRANSPORT_ERROR,
                                data: None,
                                file_name: reply.filename,
                            };
                        }
                    }
                } else {
                    None
                };
                ReadReply {
                    code: reply.code,
                    data,
                    file_name: reply.filename,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "bridge read failed");
                ReadReply {
                    code: BRIDGE_TRANSPORT_ERROR,
                    data: None,
                    file_name: String::new(),
                }
            }
        }
    }

    async fn skip(&mut self) {
        let _ = self.command(json!({"cmd": "skip"})).await;
    }

    async fn file_delete(&mut self, file_name: &str) -> i32 {
        match self
            .command(json!({"cmd": "filedelete", "filename": file_name}))
            .await
        {
            Ok(reply) => reply.code,
            Err(_) => BRIDGE_TRANSPORT_ERROR,
        }
    }

    async fn close(&mut self) -> i32 {
        match self.command(json!({"cmd": "close"})).await {
            Ok(reply) => reply.code,
            Err(_) => BRIDGE_TRANSPORT_ERROR,
        }
    }
}
