//! Channel-backed notification-list gateway
//!
//! The actual watch list lives with the chat connection, outside this
//! engine. This gateway forwards add/remove commands over an unbounded
//! channel to whatever owns that connection; the consumer is expected to be
//! idempotent (adding a present name or removing an absent one is a no-op).

use async_trait::async_trait;
use tokio::sync::mpsc;

use alliance_core::traits::{NotifyError, NotifyList};

/// One command for the notification-list consumer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyCommand {
    Add { name: String, tag: String },
    Remove { name: String, tag: String },
}

impl NotifyCommand {
    /// The player name this command is about
    pub fn name(&self) -> &str {
        match self {
            Self::Add { name, .. } | Self::Remove { name, .. } => name,
        }
    }
}

/// NotifyList implementation forwarding commands over a channel
#[derive(Clone)]
pub struct ChannelNotifyList {
    tx: mpsc::UnboundedSender<NotifyCommand>,
}

impl ChannelNotifyList {
    /// Create the gateway plus the receiving end for the consumer
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotifyCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NotifyList for ChannelNotifyList {
    async fn add(&self, name: &str, tag: &str) -> Result<(), NotifyError> {
        self.tx
            .send(NotifyCommand::Add {
                name: name.to_string(),
                tag: tag.to_string(),
            })
            .map_err(|_| NotifyError::Closed)
    }

    async fn remove(&self, name: &str, tag: &str) -> Result<(), NotifyError> {
        self.tx
            .send(NotifyCommand::Remove {
                name: name.to_string(),
                tag: tag.to_string(),
            })
            .map_err(|_| NotifyError::Closed)
    }
}
