//! Notify/report orchestration for routable errors.
//!
//! The notifier owns the process-wide default routes and the handle to the
//! external delivery subsystem. It resolves where an error wants to be
//! notified, wraps the error's messages into one notification object, and
//! issues one delivery call per resolved (channel, destination) pair.

use crate::config::Config;
use crate::core::{Dispatcher, Notifiable, Recipient, RouteMap};
use crate::notification::ErrorOccurred;
use crate::routes::ResolvedRoutes;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Dispatches notifiable errors to their resolved routes.
///
/// Constructed once at startup and shared for the lifetime of the process;
/// the default routes are immutable after construction, so a notify call
/// reads a stable configuration. Reconfiguring means building a new
/// notifier.
pub struct ErrorNotifier {
    default_routes: RouteMap,
    dispatcher: Arc<dyn Dispatcher>,
}

impl ErrorNotifier {
    /// Creates a notifier with explicit default routes.
    pub fn new(default_routes: RouteMap, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            default_routes,
            dispatcher,
        }
    }

    /// Creates a notifier from loaded configuration.
    pub fn from_config(config: &Config, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self::new(config.default_routes.clone(), dispatcher)
    }

    /// The process-wide default routes this notifier was built with.
    pub fn default_routes(&self) -> &RouteMap {
        &self.default_routes
    }

    /// Hook for the exception-reporting pipeline: report an error by
    /// notifying it. Registration with the pipeline is the caller's
    /// responsibility.
    pub async fn report(&self, error: &dyn Notifiable) -> Result<()> {
        self.notify(error).await
    }

    /// Notifies an error on every route it resolves to.
    ///
    /// Resolves the final route set from the default routes and the error's
    /// own declarations, then issues one delivery call per (channel,
    /// destination) pair, with the channel implementation swapped for the
    /// error's custom binding where one exists. Every delivery is attempted
    /// exactly once regardless of earlier failures; each failure is logged,
    /// and the first one is returned after the loop so the collaborator's
    /// error is never swallowed.
    #[instrument(skip_all)]
    pub async fn notify(&self, error: &dyn Notifiable) -> Result<()> {
        let resolved = ResolvedRoutes::resolve(
            &self.default_routes,
            &error.custom_routes(),
            error.overrides_default_routes(),
        );
        debug!(
            channels = resolved.len(),
            deliveries = resolved.destination_count(),
            "resolved notification routes"
        );

        let notification = ErrorOccurred::new(error);
        let mut first_failure = None;

        for (alias, destinations) in resolved.iter() {
            let channel = notification.channel_for(alias);
            for destination in destinations {
                let recipient = Recipient::new(channel, destination.as_str());
                if let Err(failure) = self.dispatcher.deliver(&recipient, &notification).await {
                    error!(
                        channel = %recipient.channel,
                        destination = %recipient.destination,
                        error = %failure,
                        "failed to deliver error notification"
                    );
                    if first_failure.is_none() {
                        first_failure = Some(failure);
                    }
                }
            }
        }

        match first_failure {
            None => Ok(()),
            Some(failure) => Err(failure),
        }
    }
}
