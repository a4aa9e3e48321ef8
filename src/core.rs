//! Core domain types and service traits for errnotify
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern how a routable error, the route resolver, and the external
//! delivery subsystem interact.

use crate::notification::ErrorOccurred;
use crate::routes::Destinations;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Routes keyed by channel alias, as declared in configuration or by an
/// error variant. Each channel maps to one destination or a list of them.
pub type RouteMap = BTreeMap<String, Destinations>;

/// Per-channel notification content, keyed by channel alias. Payloads are
/// arbitrary JSON values and are passed through to the transport unmodified.
pub type MessageMap = BTreeMap<String, Value>;

/// Custom transport bindings keyed by channel alias. The value is an opaque
/// implementation identifier meaningful to the delivery subsystem.
pub type ChannelBindings = BTreeMap<String, String>;

/// A single delivery target: one channel implementation identifier paired
/// with one destination. A fresh `Recipient` is constructed for every
/// delivery call issued during a notify invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// The channel implementation that should handle the delivery. Either a
    /// channel alias or, when the error binds one, a custom implementation
    /// identifier.
    pub channel: String,
    /// An opaque address meaningful to the channel's transport (email
    /// address, webhook URL, chat channel name, ...).
    pub destination: String,
}

impl Recipient {
    /// Creates a recipient scoped to a single (channel, destination) pair.
    pub fn new(channel: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            destination: destination.into(),
        }
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// Capability set for errors that want to notify their occurrence.
///
/// Every method has a default empty implementation, so a concrete error
/// only overrides what it cares about. An error that overrides nothing
/// resolves to no routes and is never delivered anywhere, which is a valid
/// configuration rather than a failure.
pub trait Notifiable: std::error::Error + Send + Sync {
    /// Routes this specific error wants to notify, in addition to (or,
    /// when [`overrides_default_routes`](Self::overrides_default_routes)
    /// returns true, instead of) the process-wide defaults.
    fn custom_routes(&self) -> RouteMap {
        RouteMap::new()
    }

    /// Whether [`custom_routes`](Self::custom_routes) entirely replaces the
    /// process-wide default routes for this error.
    fn overrides_default_routes(&self) -> bool {
        false
    }

    /// The content to deliver, keyed by channel alias.
    ///
    /// Message keys are independent of route keys: a routed channel without
    /// a message is the delivery subsystem's concern, and a message for a
    /// channel that is never routed is simply dead content.
    fn messages(&self) -> MessageMap {
        MessageMap::new()
    }

    /// Overrides which transport implementation handles a channel alias.
    fn custom_channels(&self) -> ChannelBindings {
        ChannelBindings::new()
    }
}

/// The consumed interface of the external notification delivery subsystem.
///
/// Queueing, sending, retrying and transport wire formats are entirely the
/// implementer's domain; this crate only issues one `deliver` call per
/// resolved (channel, destination) pair. The contract is "call was issued",
/// not "delivery completed".
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Delivers a notification to a single recipient.
    ///
    /// # Returns
    /// * `Ok(())` if the subsystem accepted the delivery
    /// * `Err` for whatever failure the subsystem defines; the error is
    ///   logged and surfaced by the notifier, never swallowed
    async fn deliver(&self, recipient: &Recipient, notification: &ErrorOccurred) -> Result<()>;
}
