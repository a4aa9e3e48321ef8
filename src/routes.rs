//! Route resolution for notifiable errors.
//!
//! This module computes the final set of (channel, destinations) pairs a
//! single notify invocation should deliver to, by merging the process-wide
//! default routes with the routes an error declares for itself.

use crate::core::RouteMap;
use serde::{Deserialize, Serialize};

/// One destination or a list of them, as a route is written in
/// configuration (`mail = "ops@example.com"` or `slack = ["#a", "#b"]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Destinations {
    /// A single scalar destination.
    One(String),
    /// An ordered list of destinations.
    Many(Vec<String>),
}

impl Destinations {
    /// Views the destinations as a slice, coercing a scalar to a
    /// single-element list.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Destinations::One(destination) => std::slice::from_ref(destination),
            Destinations::Many(destinations) => destinations,
        }
    }
}

impl From<&str> for Destinations {
    fn from(destination: &str) -> Self {
        Destinations::One(destination.to_string())
    }
}

impl From<String> for Destinations {
    fn from(destination: String) -> Self {
        Destinations::One(destination)
    }
}

impl From<Vec<String>> for Destinations {
    fn from(destinations: Vec<String>) -> Self {
        Destinations::Many(destinations)
    }
}

impl From<Vec<&str>> for Destinations {
    fn from(destinations: Vec<&str>) -> Self {
        Destinations::Many(destinations.into_iter().map(str::to_string).collect())
    }
}

/// The resolved route set of a single notify invocation: channel aliases in
/// insertion order, each with a de-duplicated, non-empty destination list.
///
/// Ephemeral by design; it is computed per call and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRoutes(Vec<(String, Vec<String>)>);

impl ResolvedRoutes {
    /// Resolves the routes to notify for one error.
    ///
    /// With `overrides_defaults` set, the candidate routes are exactly
    /// `custom` and `defaults` is ignored entirely. Otherwise the two maps
    /// are merged recursively: for each channel present in either map, the
    /// default destination(s) come first, followed by the custom
    /// destination(s), in declaration order. Destinations are then
    /// de-duplicated per channel preserving first occurrence, and channels
    /// left without any destination are omitted.
    ///
    /// Resolution is a pure function of its inputs; no routes at all is a
    /// valid outcome meaning "do not notify anywhere".
    pub fn resolve(defaults: &RouteMap, custom: &RouteMap, overrides_defaults: bool) -> Self {
        let mut resolved = Vec::new();

        if overrides_defaults {
            for (channel, destinations) in custom {
                push_merged(&mut resolved, channel, &[], destinations.as_slice());
            }
            return Self(resolved);
        }

        for (channel, destinations) in defaults {
            let custom_destinations = custom
                .get(channel)
                .map(Destinations::as_slice)
                .unwrap_or_default();
            push_merged(
                &mut resolved,
                channel,
                destinations.as_slice(),
                custom_destinations,
            );
        }
        for (channel, destinations) in custom {
            if !defaults.contains_key(channel) {
                push_merged(&mut resolved, channel, &[], destinations.as_slice());
            }
        }

        Self(resolved)
    }

    /// The destinations resolved for a channel, if any.
    pub fn get(&self, channel: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(alias, _)| alias == channel)
            .map(|(_, destinations)| destinations.as_slice())
    }

    /// Iterates the resolved (channel, destinations) pairs in insertion
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(channel, destinations)| (channel.as_str(), destinations.as_slice()))
    }

    /// Iterates the resolved channel aliases in insertion order.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(channel, _)| channel.as_str())
    }

    /// Number of resolved channels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no channel resolved to any destination.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of delivery calls this route set implies, i.e. the sum
    /// of destinations across all channels.
    pub fn destination_count(&self) -> usize {
        self.0
            .iter()
            .map(|(_, destinations)| destinations.len())
            .sum()
    }
}

/// Appends one channel with its merged destination list, defaults first.
/// Channels whose merged list ends up empty are omitted.
fn push_merged(
    resolved: &mut Vec<(String, Vec<String>)>,
    channel: &str,
    defaults: &[String],
    custom: &[String],
) {
    let mut merged: Vec<String> = Vec::with_capacity(defaults.len() + custom.len());
    for destination in defaults.iter().chain(custom) {
        // De-duplication must preserve first-occurrence order.
        if !merged.iter().any(|seen| seen == destination) {
            merged.push(destination.clone());
        }
    }
    if !merged.is_empty() {
        resolved.push((channel.to_string(), merged));
    }
}
