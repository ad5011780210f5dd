//! Per-call-kind deadlines.
//!
//! # Design Decisions
//! - Durations are configuration; absolute deadlines are computed when a
//!   call starts, so every call gets a fresh budget
//! - The deadline bounds the whole call locally and is also sent to the
//!   peer as the gRPC timeout

use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::TimeoutConfig;
use crate::gateway::types::{GatewayError, GatewayResult};

/// The four kinds of gateway call, each with its own timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Evaluate,
    Endorse,
    Submit,
    CommitStatus,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallKind::Evaluate => "evaluate",
            CallKind::Endorse => "endorse",
            CallKind::Submit => "submit",
            CallKind::CommitStatus => "commit status",
        };
        f.write_str(name)
    }
}

/// Timeout durations per call kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTimeouts {
    pub evaluate: Duration,
    pub endorse: Duration,
    pub submit: Duration,
    pub commit_status: Duration,
}

impl CallTimeouts {
    pub fn from_config(config: &TimeoutConfig) -> Self {
        Self {
            evaluate: Duration::from_secs(config.evaluate_secs),
            endorse: Duration::from_secs(config.endorse_secs),
            submit: Duration::from_secs(config.submit_secs),
            commit_status: Duration::from_secs(config.commit_status_secs),
        }
    }

    pub fn duration(&self, kind: CallKind) -> Duration {
        match kind {
            CallKind::Evaluate => self.evaluate,
            CallKind::Endorse => self.endorse,
            CallKind::Submit => self.submit,
            CallKind::CommitStatus => self.commit_status,
        }
    }

    /// Options for a call of `kind` starting now.
    pub fn options(&self, kind: CallKind) -> CallOptions {
        CallOptions::new(kind, self.duration(kind))
    }
}

impl Default for CallTimeouts {
    fn default() -> Self {
        Self::from_config(&TimeoutConfig::default())
    }
}

/// Options for a single call: its kind and absolute deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    pub kind: CallKind,
    pub deadline: Instant,
}

impl CallOptions {
    /// Deadline `timeout` from now.
    pub fn new(kind: CallKind, timeout: Duration) -> Self {
        Self {
            kind,
            deadline: Instant::now() + timeout,
        }
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Run `call`, failing with [`GatewayError::Timeout`] at the deadline.
    pub async fn run<F, T>(&self, call: F) -> GatewayResult<T>
    where
        F: Future<Output = GatewayResult<T>>,
    {
        tokio::time::timeout_at(self.deadline, call)
            .await
            .map_err(|_| GatewayError::Timeout(self.kind))?
    }
}
