//! The notification object handed to the delivery subsystem.
//!
//! This module defines [`ErrorOccurred`], the facade wrapping everything a
//! transport needs to know about a notifiable error: the message registered
//! for each channel and the custom channel bindings. Lookups that used to be
//! reflective `to<Channel>` accessor calls in dynamic notification systems
//! are explicit here, with a typed error distinguishing "no message for this
//! channel" from "this is not a channel accessor at all".

pub mod log_dispatcher;

use crate::core::{ChannelBindings, MessageMap, Notifiable};
use crate::routes::ResolvedRoutes;
use serde_json::Value;
use thiserror::Error;

pub use log_dispatcher::LogDispatcher;

/// Accessor names for channel messages start with this prefix, followed by
/// the capitalized channel alias (`toMail`, `toSlack`, ...).
const ACCESSOR_PREFIX: &str = "to";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The accessor matched the naming convention, but the channel has no
    /// registered message. Carries the canonicalized channel alias.
    #[error("the channel [{0}] does not have any message to notify")]
    MessageNotFound(String),

    /// The requested accessor does not match the `to<Channel>` naming
    /// convention at all; the caller invoked something that is not a
    /// channel-message accessor.
    #[error("[{0}] is not a channel message accessor")]
    UnknownAccessor(String),
}

/// A notification that an error occurred, ready for delivery.
///
/// Constructed once per notify invocation; captures the error's per-channel
/// messages and custom channel bindings with their aliases canonicalized to
/// lower-case, so lookups are case-insensitive regardless of how the error
/// spelled them.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorOccurred {
    messages: MessageMap,
    custom_channels: ChannelBindings,
}

impl ErrorOccurred {
    /// Wraps a notifiable error, capturing its messages and bindings.
    pub fn new(error: &dyn Notifiable) -> Self {
        let messages = error
            .messages()
            .into_iter()
            .map(|(alias, message)| (alias.to_lowercase(), message))
            .collect();
        // Binding keys are aliases and follow the same canonicalization;
        // binding values are opaque implementation identifiers, kept as-is.
        let custom_channels = error
            .custom_channels()
            .into_iter()
            .map(|(alias, implementation)| (alias.to_lowercase(), implementation))
            .collect();

        Self {
            messages,
            custom_channels,
        }
    }

    /// Looks up the message registered for a channel alias.
    ///
    /// The lookup is case-insensitive; the payload is returned unmodified.
    ///
    /// # Errors
    /// [`NotifyError::MessageNotFound`] when the channel has no registered
    /// message.
    pub fn message_for(&self, alias: &str) -> Result<&Value, NotifyError> {
        let alias = alias.to_lowercase();
        self.messages
            .get(&alias)
            .ok_or(NotifyError::MessageNotFound(alias))
    }

    /// Resolves a `to<Channel>` style accessor name to the channel's
    /// registered message.
    ///
    /// `toMail` looks up the message for `mail`. Everything after the `to`
    /// prefix is taken verbatim as the alias and lower-cased.
    ///
    /// # Errors
    /// [`NotifyError::UnknownAccessor`] when the name does not match the
    /// accessor convention; [`NotifyError::MessageNotFound`] when it does
    /// but the channel has no registered message.
    pub fn dispatch(&self, accessor: &str) -> Result<&Value, NotifyError> {
        let alias = accessor
            .strip_prefix(ACCESSOR_PREFIX)
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| NotifyError::UnknownAccessor(accessor.to_string()))?;
        self.message_for(alias)
    }

    /// The channel implementation that should handle deliveries for an
    /// alias: the custom binding if the error declared one, otherwise the
    /// alias itself (the transport registered under that alias by
    /// convention).
    pub fn channel_for<'a>(&'a self, alias: &'a str) -> &'a str {
        match self.custom_channels.get(&alias.to_lowercase()) {
            Some(implementation) => implementation.as_str(),
            None => alias,
        }
    }

    /// The delivery channels for a resolved route set, in the set's
    /// insertion order, with custom bindings applied.
    pub fn channels(&self, resolved: &ResolvedRoutes) -> Vec<String> {
        resolved
            .channels()
            .map(|alias| self.channel_for(alias).to_string())
            .collect()
    }

    /// The captured per-channel messages, keyed by canonical alias.
    pub fn messages(&self) -> &MessageMap {
        &self.messages
    }

    /// The captured custom channel bindings, keyed by canonical alias.
    pub fn custom_channels(&self) -> &ChannelBindings {
        &self.custom_channels
    }
}
