//! Test support: a dispatcher that records every delivery it receives.
//!
//! Available behind the `test-utils` feature so integration tests (and
//! downstream crates' tests) can assert on exactly which delivery calls a
//! notify invocation issued.

use crate::core::{Dispatcher, Recipient};
use crate::notification::ErrorOccurred;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// One recorded delivery attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub recipient: Recipient,
    pub notification: ErrorOccurred,
}

/// Fake delivery subsystem that records every `deliver` call.
///
/// Destinations registered via [`fail_destination`](Self::fail_destination)
/// make the corresponding calls fail after being recorded, so tests can
/// check that one refused delivery does not suppress the others.
#[derive(Default)]
pub struct RecordingDispatcher {
    deliveries: Mutex<Vec<Delivery>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every delivery to this destination fail.
    pub fn fail_destination(&self, destination: &str) {
        self.failing.lock().unwrap().insert(destination.to_string());
    }

    /// All recorded deliveries, in the order they were issued.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    /// The recipients of all recorded deliveries, in order.
    pub fn recipients(&self) -> Vec<Recipient> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .map(|delivery| delivery.recipient.clone())
            .collect()
    }

    /// Number of delivery calls issued so far.
    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn deliver(&self, recipient: &Recipient, notification: &ErrorOccurred) -> Result<()> {
        // Record first: the call was issued even if this fake then refuses it.
        self.deliveries.lock().unwrap().push(Delivery {
            recipient: recipient.clone(),
            notification: notification.clone(),
        });
        if self.failing.lock().unwrap().contains(&recipient.destination) {
            bail!("recording dispatcher refused [{}]", recipient.destination);
        }
        Ok(())
    }
}
