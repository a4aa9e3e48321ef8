//! A dispatcher that logs deliveries instead of sending them.
//!
//! This serves as a basic implementation to validate notifier wiring and
//! can be used for debugging purposes; it talks to no transport.

use crate::core::{Dispatcher, Recipient};
use crate::notification::ErrorOccurred;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Logs every delivery through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDispatcher;

#[async_trait]
impl Dispatcher for LogDispatcher {
    async fn deliver(&self, recipient: &Recipient, notification: &ErrorOccurred) -> Result<()> {
        info!(
            channel = %recipient.channel,
            destination = %recipient.destination,
            messages = notification.messages().len(),
            "error notification delivered to log"
        );
        Ok(())
    }
}
