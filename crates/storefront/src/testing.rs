//! Test utilities for the storefront crate
//!
//! Recording implementations of the coordinator's sinks, a counting
//! transport, and a canned fetcher for the offline cache.

use crate::error::SubmissionError;
use crate::offline::Fetcher;
use crate::services::submission::{AnalyticsSink, FeedbackSink, SubmissionState, Transport, UiEvent};
use crate::services::types::SubmissionPayload;
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Feedback sink that keeps every emitted event in order.
#[derive(Default)]
pub struct RecordingFeedback {
    events: Mutex<Vec<(String, UiEvent)>>,
}

impl RecordingFeedback {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Events emitted for one form
    pub fn events_for(&self, form_id: &str) -> Vec<UiEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == form_id)
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Only the state transitions, in order
    pub fn states(&self) -> Vec<SubmissionState> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::StateChanged(state) => Some(state),
                _ => None,
            })
            .collect()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn emit(&self, form_id: &str, event: UiEvent) {
        self.events
            .lock()
            .unwrap()
            .push((form_id.to_string(), event));
    }
}

/// Analytics sink that keeps event names
#[derive(Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<String>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: &str) {
        self.events.lock().unwrap().push(event.to_string());
    }
}

/// Transport that counts calls and resolves after a fixed delay.
pub struct CountingTransport {
    delay: Duration,
    delivered: bool,
    calls: AtomicUsize,
    payloads: Mutex<Vec<SubmissionPayload>>,
}

impl CountingTransport {
    pub fn delivering(delay: Duration) -> Self {
        Self {
            delay,
            delivered: true,
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
        }
    }

    /// Resolves `false` after the delay
    pub fn rejecting(delay: Duration) -> Self {
        Self {
            delivered: false,
            ..Self::delivering(delay)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn payloads(&self) -> Vec<SubmissionPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for CountingTransport {
    async fn send(&self, payload: &SubmissionPayload) -> Result<bool, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.clone());
        tokio::time::sleep(self.delay).await;
        Ok(self.delivered)
    }
}

/// Fetcher serving canned bodies; unknown URLs fail like a 404.
#[derive(Default)]
pub struct StaticFetcher {
    bodies: BTreeMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{} not found", url))
    }
}
