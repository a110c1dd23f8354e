//! Periodic UUID generation.
//!
//! One background task per session at most. Starting while running with the
//! same version and stopping while stopped change nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::generator::UuidGenerator;
use super::history::{UuidHistory, UuidVersion};

struct Running {
    version: UuidVersion,
    started_at: DateTime<Utc>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Running {
    fn shutdown(self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

/// Observable state of the auto-generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoStatus {
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<UuidVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    pub interval_ms: u64,
}

/// What a start/stop request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoTransition {
    Started,
    Switched,
    Stopped,
    Unchanged,
}

/// Cancellable periodic generator feeding a [`UuidHistory`].
pub struct AutoGenerator {
    interval: Duration,
    state: Mutex<Option<Running>>,
}

impl AutoGenerator {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Running>> {
        // The guarded data stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start generating `version` UUIDs every interval.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        &self,
        version: UuidVersion,
        generator: UuidGenerator,
        history: Arc<UuidHistory>,
    ) -> AutoTransition {
        let mut state = self.lock();
        let transition = match state.take() {
            Some(running) if running.version == version => {
                *state = Some(running);
                return AutoTransition::Unchanged;
            }
            Some(running) => {
                running.shutdown();
                AutoTransition::Switched
            }
            None => AutoTransition::Started,
        };

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            self.interval,
            version,
            generator,
            history,
            cancel.clone(),
        ));
        *state = Some(Running {
            version,
            started_at: Utc::now(),
            cancel,
            handle,
        });
        info!(%version, interval_ms = self.interval.as_millis() as u64, "UUID auto-generation started");
        transition
    }

    /// Stop the task if one is running.
    pub fn stop(&self) -> AutoTransition {
        match self.lock().take() {
            Some(running) => {
                running.shutdown();
                info!("UUID auto-generation stopped");
                AutoTransition::Stopped
            }
            None => AutoTransition::Unchanged,
        }
    }

    pub fn status(&self) -> AutoStatus {
        let state = self.lock();
        AutoStatus {
            running: state.is_some(),
            version: state.as_ref().map(|r| r.version),
            started_at: state.as_ref().map(|r| r.started_at),
            interval_ms: self.interval.as_millis() as u64,
        }
    }
}

impl Drop for AutoGenerator {
    fn drop(&mut self) {
        let running = match self.state.get_mut() {
            Ok(state) => state.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(running) = running {
            running.shutdown();
        }
    }
}

async fn run(
    period: Duration,
    version: UuidVersion,
    generator: UuidGenerator,
    history: Arc<UuidHistory>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                history.record_batch(generator.batch(version, 1)).await;
                debug!(%version, "Auto-generated UUID");
            }
        }
    }
}
