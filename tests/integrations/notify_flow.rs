//! End-to-end scenarios: from a raised error to the delivery calls issued.

use anyhow::Result;
use errnotify::test_utils::RecordingDispatcher;
use errnotify::{Destinations, ErrorNotifier, ErrorOccurred, Notifiable, Recipient, RouteMap};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::{default_routes, DeployFailed, DeployFailedExclusive, QuietFailure};

#[tokio::test]
async fn test_merged_routes_notify_default_and_custom_destinations() -> Result<()> {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let notifier = ErrorNotifier::new(default_routes(), dispatcher.clone());

    notifier.notify(&DeployFailed).await?;

    assert_eq!(dispatcher.delivery_count(), 4);
    // The slack alias is bound to the custom "baz" implementation.
    assert_eq!(
        dispatcher.recipients(),
        vec![
            Recipient::new("mail", "default1"),
            Recipient::new("mail", "custom1"),
            Recipient::new("baz", "default2"),
            Recipient::new("baz", "custom2"),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_override_flag_replaces_the_default_routes() -> Result<()> {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let notifier = ErrorNotifier::new(default_routes(), dispatcher.clone());

    notifier.notify(&DeployFailedExclusive).await?;

    assert_eq!(
        dispatcher.recipients(),
        vec![
            Recipient::new("mail", "custom1"),
            Recipient::new("baz", "custom2"),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_undeclared_error_with_no_defaults_notifies_nowhere() -> Result<()> {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let notifier = ErrorNotifier::new(RouteMap::new(), dispatcher.clone());

    notifier.notify(&QuietFailure).await?;

    assert_eq!(dispatcher.delivery_count(), 0);
    let notification = ErrorOccurred::new(&QuietFailure);
    assert!(notification.messages().is_empty());
    assert!(notification.custom_channels().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_delivered_notification_answers_per_channel_message_lookups() -> Result<()> {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let notifier = ErrorNotifier::new(default_routes(), dispatcher.clone());

    notifier.notify(&DeployFailed).await?;

    let delivery = dispatcher
        .deliveries()
        .into_iter()
        .next()
        .expect("at least one delivery was issued");
    let notification = delivery.notification;

    assert_eq!(notification.message_for("mail").unwrap(), &json!("foo"));
    assert_eq!(notification.message_for("slack").unwrap(), &json!("bar"));

    let err = notification.message_for("unknown").unwrap_err();
    assert_eq!(
        err.to_string(),
        "the channel [unknown] does not have any message to notify"
    );
    Ok(())
}

#[tokio::test]
async fn test_refused_delivery_does_not_suppress_the_remaining_calls() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new("errnotify=debug"))
        .init();

    let dispatcher = Arc::new(RecordingDispatcher::new());
    dispatcher.fail_destination("default1");
    let notifier = ErrorNotifier::new(default_routes(), dispatcher.clone());

    let result = notifier.notify(&DeployFailed).await;

    assert!(result.is_err());
    assert_eq!(dispatcher.delivery_count(), 4);
    Ok(())
}

#[tokio::test]
async fn test_report_runs_the_same_flow_as_notify() -> Result<()> {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let notifier = ErrorNotifier::new(default_routes(), dispatcher.clone());

    notifier.report(&DeployFailed).await?;

    assert_eq!(dispatcher.delivery_count(), 4);
    Ok(())
}

#[tokio::test]
async fn test_destinations_shared_between_defaults_and_custom_notify_once() -> Result<()> {
    #[derive(Debug, Error)]
    #[error("repeats the default route")]
    struct RepeatedRoute;

    impl Notifiable for RepeatedRoute {
        fn custom_routes(&self) -> RouteMap {
            RouteMap::from([("mail".to_string(), Destinations::from("default1"))])
        }
    }

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let notifier = ErrorNotifier::new(
        RouteMap::from([("mail".to_string(), Destinations::from("default1"))]),
        dispatcher.clone(),
    );

    notifier.notify(&RepeatedRoute).await?;

    assert_eq!(
        dispatcher.recipients(),
        vec![Recipient::new("mail", "default1")]
    );
    Ok(())
}
