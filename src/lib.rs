//! errnotify - notification routing declared by the errors themselves
//!
//! This library lets an application error declare, at the point it is
//! raised, which notification channels should hear about it, with what
//! message per channel, and through which transport implementation.
//! Delivery itself (queueing, sending, retrying) belongs to an external
//! subsystem reached through the [`Dispatcher`] trait; this crate only
//! decides *where* and *what* to send.

pub mod config;
pub mod core;
pub mod notification;
pub mod notifier;
pub mod routes;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-export the crate surface for convenience.
pub use self::config::Config;
pub use self::core::{ChannelBindings, Dispatcher, MessageMap, Notifiable, Recipient, RouteMap};
pub use self::notification::{ErrorOccurred, LogDispatcher, NotifyError};
pub use self::notifier::ErrorNotifier;
pub use self::routes::{Destinations, ResolvedRoutes};
