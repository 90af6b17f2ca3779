//! Submission coordination.
//!
//! Each submit attempt walks `Idle -> Validating -> (Invalid | Submitting)
//! -> (Succeeded | Failed) -> Idle`. The disabled submit control is the only
//! guard against duplicate submissions: a submit while one is in flight is
//! ignored. Transport failures never escape `submit`; they become a failure
//! notification and the control is always restored.

use super::templates::ResponseTemplates;
use super::types::*;
use super::validator::{validate, validate_all};
use crate::error::{SubmissionError, ValidationError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Phase of the current submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Invalid => "invalid",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Rendered state of a form's submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

/// Everything the UI layer is asked to render
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    StateChanged(SubmissionState),
    ControlChanged(SubmitControl),
    FieldValidated {
        field: String,
        result: ValidationResult,
    },
    FieldErrors(Vec<ValidationError>),
    Notify(Notification),
    ShowModal(SuccessModal),
    FormReset,
}

/// UI layer that renders coordinator feedback
pub trait FeedbackSink: Send + Sync {
    fn emit(&self, form_id: &str, event: UiEvent);
}

/// Discards every event
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn emit(&self, _form_id: &str, _event: UiEvent) {}
}

/// Receives named conversion events
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &str);
}

/// Drops every conversion event
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _event: &str) {}
}

/// Writes conversion events to the log
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: &str) {
        tracing::info!(event, "conversion tracked");
    }
}

/// Delivery boundary for submissions.
///
/// `Ok(true)` means delivered, `Ok(false)` means the remote side declined.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &SubmissionPayload) -> Result<bool, SubmissionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulatedOutcome {
    Deliver,
    Reject,
    Error,
}

/// Local stand-in for the network: waits, logs, and resolves
pub struct SimulatedTransport {
    delay: Duration,
    contact_email: String,
    outcome: SimulatedOutcome,
}

impl SimulatedTransport {
    /// Transport with the latency configured for `form`.
    ///
    /// Contact forms also pay the email hand-off delay.
    pub fn for_form(form: &FormDefinition, config: &SiteConfig) -> Self {
        let delay = match form.purpose {
            FormPurpose::Enquiry => form.submit_delay,
            FormPurpose::Contact => form.submit_delay + config.submission.transport_delay(),
        };
        Self {
            delay,
            contact_email: config.contact_email.clone(),
            outcome: SimulatedOutcome::Deliver,
        }
    }

    /// Resolves `false` after the delay
    pub fn failing(mut self) -> Self {
        self.outcome = SimulatedOutcome::Reject;
        self
    }

    /// Returns a transport error after the delay
    pub fn erroring(mut self) -> Self {
        self.outcome = SimulatedOutcome::Error;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait::async_trait]
impl Transport for SimulatedTransport {
    async fn send(&self, payload: &SubmissionPayload) -> Result<bool, SubmissionError> {
        tokio::time::sleep(self.delay).await;

        match self.outcome {
            SimulatedOutcome::Deliver => {
                let subject = match payload.purpose {
                    FormPurpose::Contact => format!(
                        "Website Contact: {}",
                        payload.get("subject").unwrap_or_default()
                    ),
                    FormPurpose::Enquiry => format!(
                        "Website Enquiry: {}",
                        payload.kind.unwrap_or(EnquiryKind::General)
                    ),
                };
                tracing::info!(
                    to = %self.contact_email,
                    from = payload.get("email").unwrap_or_default(),
                    subject = %subject,
                    reference = %payload.reference,
                    "email would be sent"
                );
                Ok(true)
            }
            SimulatedOutcome::Reject => Ok(false),
            SimulatedOutcome::Error => Err(SubmissionError::Transport(
                "simulated network failure".to_string(),
            )),
        }
    }
}

/// Result of one submit action
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// A submission was already in flight
    Ignored,
    /// At least one field failed; nothing was sent
    Invalid(Vec<ValidationError>),
    Succeeded {
        payload: SubmissionPayload,
        modal: SuccessModal,
    },
    Failed {
        error: SubmissionError,
        notification: Notification,
    },
}

struct FormState {
    state: SubmissionState,
    control: SubmitControl,
    values: FormValues,
    started: bool,
}

/// Drives validation, simulated delivery and UI feedback for one form instance
pub struct SubmissionCoordinator {
    form: FormDefinition,
    config: Arc<SiteConfig>,
    templates: ResponseTemplates,
    transport: Arc<dyn Transport>,
    feedback: Arc<dyn FeedbackSink>,
    analytics: Arc<dyn AnalyticsSink>,
    inner: Mutex<FormState>,
}

impl SubmissionCoordinator {
    pub fn new(
        form: FormDefinition,
        config: Arc<SiteConfig>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let control = SubmitControl {
            label: form.idle_label.clone(),
            disabled: false,
        };
        Self {
            templates: ResponseTemplates::new(&config),
            form,
            config,
            transport,
            feedback: Arc::new(NullFeedback),
            analytics: Arc::new(TracingAnalytics),
            inner: Mutex::new(FormState {
                state: SubmissionState::Idle,
                control,
                values: FormValues::new(),
                started: false,
            }),
        }
    }

    pub fn with_feedback(mut self, feedback: Arc<dyn FeedbackSink>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state
    }

    pub fn control(&self) -> SubmitControl {
        self.lock().control.clone()
    }

    pub fn values(&self) -> FormValues {
        self.lock().values.clone()
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.lock().values.get(name).cloned()
    }

    /// Record user input for a field. The first input marks the form as started.
    pub fn set_value(&self, name: &str, value: impl Into<String>) {
        let first_input = {
            let mut inner = self.lock();
            inner.values.insert(name.to_string(), value.into());
            !std::mem::replace(&mut inner.started, true)
        };

        if first_input {
            tracing::info!(form = %self.form.id, "form started");
            self.analytics
                .track(&format!("form_started:{}", self.form.id));
        }
    }

    /// Validate a single field as it currently stands (on blur).
    ///
    /// Returns `None` when the form has no such field.
    pub fn validate_field(&self, name: &str) -> Option<ValidationResult> {
        let spec = self.form.field(name)?;
        let raw = self.value(name).unwrap_or_default();
        let result = validate(spec, &raw);
        self.emit(UiEvent::FieldValidated {
            field: name.to_string(),
            result: result.clone(),
        });
        Some(result)
    }

    /// Pre-select the enquiry type and message from link parameters.
    ///
    /// `product` picks the category from the configured catalog; `type`
    /// then overrides the selection.
    pub fn prefill(&self, params: &BTreeMap<String, String>) {
        if self.form.purpose != FormPurpose::Enquiry {
            return;
        }

        if let Some(product) = params.get("product") {
            let products = &self.config.products;
            if products.coffee.iter().any(|p| p == product) {
                self.set_value(ENQUIRY_TYPE_FIELD, "coffee");
            } else if products.sculptures.iter().any(|p| p == product) {
                self.set_value(ENQUIRY_TYPE_FIELD, "artwork");
            }
            self.set_value(
                "message",
                format!(
                    "I'm interested in the {}. Please send me more information.",
                    product
                ),
            );
        }

        if let Some(kind) = params.get("type") {
            self.set_value(ENQUIRY_TYPE_FIELD, kind.clone());
        }
    }

    /// Run one submit action to completion
    pub async fn submit(&self) -> SubmitOutcome {
        let values = {
            let mut inner = self.lock();
            if inner.control.disabled || inner.state != SubmissionState::Idle {
                tracing::debug!(form = %self.form.id, state = %inner.state, "submit ignored");
                return SubmitOutcome::Ignored;
            }
            inner.state = SubmissionState::Validating;
            inner.values.clone()
        };
        self.announce(SubmissionState::Validating);

        let failures = validate_all(&self.form.fields, &values);
        if !failures.is_empty() {
            tracing::info!(form = %self.form.id, failures = failures.len(), "submission blocked");
            self.transition(SubmissionState::Invalid);
            self.emit(UiEvent::FieldErrors(failures.clone()));
            self.emit(UiEvent::Notify(self.templates.invalid()));
            self.transition(SubmissionState::Idle);
            return SubmitOutcome::Invalid(failures);
        }

        let restore = self.begin_submitting();
        let payload = SubmissionPayload::new(&self.form, values);

        let delivered = self.transport.send(&payload).await;
        let outcome = match delivered {
            Ok(true) => self.succeed(payload),
            Ok(false) => self.fail(SubmissionError::Rejected),
            Err(error) => self.fail(error),
        };

        drop(restore);
        outcome
    }

    fn begin_submitting(&self) -> ControlRestore<'_> {
        let control = {
            let mut inner = self.lock();
            inner.state = SubmissionState::Submitting;
            inner.control = SubmitControl {
                label: self.form.busy_label.clone(),
                disabled: true,
            };
            inner.control.clone()
        };
        self.announce(SubmissionState::Submitting);
        self.emit(UiEvent::ControlChanged(control));
        ControlRestore { coordinator: self }
    }

    fn succeed(&self, payload: SubmissionPayload) -> SubmitOutcome {
        self.transition(SubmissionState::Succeeded);

        let modal = self.templates.success(&payload);
        self.emit(UiEvent::ShowModal(modal.clone()));

        {
            let mut inner = self.lock();
            inner.values.clear();
        }
        self.emit(UiEvent::FormReset);
        self.analytics.track(&self.form.conversion_event);

        tracing::info!(
            form = %self.form.id,
            reference = %payload.reference,
            "submission delivered"
        );
        SubmitOutcome::Succeeded { payload, modal }
    }

    fn fail(&self, error: SubmissionError) -> SubmitOutcome {
        tracing::warn!(form = %self.form.id, error = %error, "submission failed");
        self.transition(SubmissionState::Failed);

        let notification = self.templates.failure(self.form.purpose);
        self.emit(UiEvent::Notify(notification.clone()));
        SubmitOutcome::Failed {
            error,
            notification,
        }
    }

    fn restore_control(&self) {
        let control = {
            let mut inner = self.lock();
            inner.control = SubmitControl {
                label: self.form.idle_label.clone(),
                disabled: false,
            };
            inner.state = SubmissionState::Idle;
            inner.control.clone()
        };
        self.emit(UiEvent::ControlChanged(control));
        self.announce(SubmissionState::Idle);
    }

    fn transition(&self, state: SubmissionState) {
        self.lock().state = state;
        self.announce(state);
    }

    fn announce(&self, state: SubmissionState) {
        tracing::debug!(form = %self.form.id, state = %state, "submission state changed");
        self.emit(UiEvent::StateChanged(state));
    }

    fn emit(&self, event: UiEvent) {
        self.feedback.emit(&self.form.id, event);
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Re-enables the submit control when the in-flight section ends, however it ends
struct ControlRestore<'a> {
    coordinator: &'a SubmissionCoordinator,
}

impl Drop for ControlRestore<'_> {
    fn drop(&mut self) {
        self.coordinator.restore_control();
    }
}
