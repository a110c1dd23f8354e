//! Per-server session state shared by the tools.
//!
//! Transforms are pure; the only state that outlives a call lives here, each
//! piece in its own container:
//! - [`OutputStore`]: last successful output per tool, for export
//! - [`UuidHistory`]: bounded, newest-first UUID history
//! - [`AutoGenerator`]: the cancellable periodic UUID task
//! - [`RequestPhase`]: the API tester's single in-flight request state

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::definitions::uuid::{AutoGenerator, UuidGenerator, UuidHistory};
use crate::core::config::Config;

/// Everything a tool route needs: configuration plus session state.
pub struct ToolContext {
    config: Arc<Config>,
    session: Arc<ToolSession>,
}

impl ToolContext {
    /// Create a context with a fresh session.
    pub fn new(config: Arc<Config>) -> Self {
        let session = Arc::new(ToolSession::new(&config));
        Self { config, session }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<ToolSession> {
        &self.session
    }
}

/// State of the API tester's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestPhase {
    Idle,
    Sending,
    Success,
    Error,
}

/// A tool output kept for export.
#[derive(Debug, Clone, Serialize)]
pub struct StoredOutput {
    pub tool: String,
    pub file_name: String,
    pub extension: String,
    pub content: String,
    pub recorded_at: DateTime<Utc>,
}

/// Last successful output of every tool.
#[derive(Debug, Default)]
pub struct OutputStore {
    outputs: RwLock<HashMap<String, StoredOutput>>,
}

impl OutputStore {
    pub async fn record(&self, tool: &str, file_name: &str, extension: &str, content: &str) {
        let entry = StoredOutput {
            tool: tool.to_string(),
            file_name: file_name.to_string(),
            extension: extension.to_string(),
            content: content.to_string(),
            recorded_at: Utc::now(),
        };
        self.outputs.write().await.insert(tool.to_string(), entry);
    }

    pub async fn get(&self, tool: &str) -> Option<StoredOutput> {
        self.outputs.read().await.get(tool).cloned()
    }

    /// Names of the tools that currently have an output, sorted.
    pub async fn tools(&self) -> Vec<String> {
        let mut names: Vec<_> = self.outputs.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Session state container.
pub struct ToolSession {
    outputs: OutputStore,
    uuid_history: Arc<UuidHistory>,
    uuid_generator: UuidGenerator,
    auto_generator: AutoGenerator,
    api_phase: RwLock<RequestPhase>,
    http_client: reqwest::Client,
}

impl ToolSession {
    pub fn new(config: &Config) -> Self {
        Self {
            outputs: OutputStore::default(),
            uuid_history: Arc::new(UuidHistory::new()),
            uuid_generator: UuidGenerator::new(),
            auto_generator: AutoGenerator::new(config.tools.uuid_auto_interval()),
            api_phase: RwLock::new(RequestPhase::Idle),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn outputs(&self) -> &OutputStore {
        &self.outputs
    }

    pub fn uuid_history(&self) -> &Arc<UuidHistory> {
        &self.uuid_history
    }

    pub fn uuid_generator(&self) -> &UuidGenerator {
        &self.uuid_generator
    }

    pub fn auto_generator(&self) -> &AutoGenerator {
        &self.auto_generator
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub async fn api_phase(&self) -> RequestPhase {
        *self.api_phase.read().await
    }

    pub async fn set_api_phase(&self, phase: RequestPhase) {
        *self.api_phase.write().await = phase;
    }

    /// Snapshot used by the session-state resource.
    pub async fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "uuid_history_size": self.uuid_history.len().await,
            "auto_generate": self.auto_generator.status(),
            "api_request_phase": self.api_phase().await,
            "stored_outputs": self.outputs.tools().await,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_output_store_keeps_latest() {
        let store = OutputStore::default();
        store.record("hash_generate", "hash", "txt", "aaa").await;
        store.record("hash_generate", "hash", "txt", "bbb").await;
        store.record("json_format", "beautified", "json", "{}").await;

        assert_eq!(store.get("hash_generate").await.unwrap().content, "bbb");
        assert_eq!(store.tools().await, vec!["hash_generate", "json_format"]);
        assert!(store.get("url_codec").await.is_none());
    }

    #[tokio::test]
    async fn test_api_phase_defaults_to_idle() {
        let session = ToolSession::new(&Config::default());
        assert_eq!(session.api_phase().await, RequestPhase::Idle);

        session.set_api_phase(RequestPhase::Sending).await;
        assert_eq!(session.api_phase().await, RequestPhase::Sending);
    }

    #[tokio::test]
    async fn test_snapshot_shape() {
        let session = ToolSession::new(&Config::default());
        let snapshot = session.snapshot().await;

        assert_eq!(snapshot["uuid_history_size"], 0);
        assert_eq!(snapshot["api_request_phase"], "idle");
        assert_eq!(snapshot["auto_generate"]["running"], false);
    }
}
