//! # Teardown Notifications
//!
//! Every actor death produces exactly one [`TeardownNotice`]. The manager logs
//! it and hands it to each registered [`TeardownObserver`].

use super::address::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// Why an actor went away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownReason {
    /// The actor returned a terminate effect from its own handler
    SelfTerminated,
    /// Cancelled by the embedder or by another actor
    Cancelled,
    /// The owning manager shut down
    ManagerShutdown,
}

impl fmt::Display for TeardownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfTerminated => write!(f, "self_terminated"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::ManagerShutdown => write!(f, "manager_shutdown"),
        }
    }
}

/// The "going away" event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownNotice {
    pub address: Address,
    pub actor: String,
    pub reason: TeardownReason,
    pub torn_down_at: DateTime<Utc>,
}

impl TeardownNotice {
    pub fn new(address: Address, actor: impl Into<String>, reason: TeardownReason) -> Self {
        Self {
            address,
            actor: actor.into(),
            reason,
            torn_down_at: Utc::now(),
        }
    }
}

impl fmt::Display for TeardownNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} is going away ({})",
            self.actor, self.address, self.reason
        )
    }
}

/// Embedder-supplied sink for teardown notices
///
/// Observers run synchronously inside the manager, so they must not call back
/// into it; doing so fails with an encapsulation violation.
pub trait TeardownObserver: Send + Sync {
    fn on_teardown(&self, notice: &TeardownNotice);
}

impl<F> TeardownObserver for F
where
    F: Fn(&TeardownNotice) + Send + Sync,
{
    fn on_teardown(&self, notice: &TeardownNotice) {
        self(notice)
    }
}

/// Forwards notices into a tokio channel for async consumers
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<TeardownNotice>,
}

impl ChannelObserver {
    /// Create an observer together with the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TeardownNotice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl TeardownObserver for ChannelObserver {
    fn on_teardown(&self, notice: &TeardownNotice) {
        // A dropped receiver just means nobody is listening any more
        if self.sender.send(notice.clone()).is_err() {
            tracing::debug!(address = %notice.address, "Teardown receiver closed, notice discarded");
        }
    }
}
