use crate::error::{RelayError, SubmitError};
use crate::store::ProjectStore;
use crate::validation::parse_optional_webhook_url;
use crate::webhook::{WebhookClient, WebhookDelivery};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use shared_types::{AnswerSet, NewProject, ProjectId, UserIdentity, UserProfile, WebhookPayload};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, warn};

/// Lifecycle of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    StoreFailed,
    StoreSucceeded,
    WebhookSkipped,
    WebhookSucceeded,
    WebhookFailed,
    Done,
}

impl SubmissionState {
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Submitting)
                | (StoreFailed, Submitting)
                | (Submitting, StoreFailed)
                | (Submitting, StoreSucceeded)
                | (StoreSucceeded, WebhookSkipped)
                | (StoreSucceeded, WebhookSucceeded)
                | (StoreSucceeded, WebhookFailed)
                | (WebhookSkipped, Done)
                | (WebhookSucceeded, Done)
                | (WebhookFailed, Done)
        )
    }

    /// True between the start of phase 1 and `Done`
    pub fn is_submitting(self) -> bool {
        use SubmissionState::*;
        matches!(
            self,
            Submitting | StoreSucceeded | WebhookSkipped | WebhookSucceeded | WebhookFailed
        )
    }
}

/// Everything one submit call needs
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub identity: Option<UserIdentity>,
    pub profile: Option<UserProfile>,
    pub answers: AnswerSet,
    pub webhook_url: Option<String>,
}

/// Result of the optional relay phase
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    Skipped,
    Delivered(WebhookDelivery),
    Failed(RelayError),
}

/// Result of a submission that passed pre-flight checks
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Phase 1 failed; the user stays on the form
    StoreFailed { message: String },
    /// Phase 1 succeeded; the relay result never blocks the results view
    Stored {
        store_id: ProjectId,
        answers: AnswerSet,
        webhook: WebhookOutcome,
    },
}

/// Flat view of an outcome for display and JSON output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeSummary {
    pub phase: &'static str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<ProjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_result: Option<serde_json::Value>,
}

impl SubmitOutcome {
    /// "store", "webhook" or "none"
    pub fn phase(&self) -> &'static str {
        match self {
            SubmitOutcome::StoreFailed { .. } => "store",
            SubmitOutcome::Stored {
                webhook: WebhookOutcome::Skipped,
                ..
            } => "none",
            SubmitOutcome::Stored { .. } => "webhook",
        }
    }

    /// Store succeeded and, when attempted, the relay too
    pub fn success(&self) -> bool {
        matches!(
            self,
            SubmitOutcome::Stored {
                webhook: WebhookOutcome::Skipped | WebhookOutcome::Delivered(_),
                ..
            }
        )
    }

    pub fn proceeds_to_results(&self) -> bool {
        matches!(self, SubmitOutcome::Stored { .. })
    }

    pub fn store_id(&self) -> Option<&ProjectId> {
        match self {
            SubmitOutcome::Stored { store_id, .. } => Some(store_id),
            SubmitOutcome::StoreFailed { .. } => None,
        }
    }

    pub fn webhook(&self) -> Option<&WebhookOutcome> {
        match self {
            SubmitOutcome::Stored { webhook, .. } => Some(webhook),
            SubmitOutcome::StoreFailed { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SubmitOutcome::StoreFailed { message } => Some(message),
            SubmitOutcome::Stored {
                webhook: WebhookOutcome::Failed(err),
                ..
            } => Some(&err.error_text),
            SubmitOutcome::Stored { .. } => None,
        }
    }

    pub fn summary(&self) -> OutcomeSummary {
        let webhook_result = match self.webhook() {
            Some(WebhookOutcome::Delivered(delivery)) => serde_json::to_value(delivery).ok(),
            Some(WebhookOutcome::Failed(err)) => serde_json::to_value(err).ok(),
            _ => None,
        };

        OutcomeSummary {
            phase: self.phase(),
            success: self.success(),
            message: self.message().map(str::to_string),
            store_id: self.store_id().cloned(),
            webhook_result,
        }
    }
}

/// Two-phase submission: durable store write, then optional webhook relay
pub struct SubmissionCoordinator {
    store: Arc<dyn ProjectStore>,
    webhook: WebhookClient,
    state: Mutex<SubmissionState>,
}

impl SubmissionCoordinator {
    pub fn new(store: Arc<dyn ProjectStore>, webhook: WebhookClient) -> Self {
        Self {
            store,
            webhook,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.lock_state()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().is_submitting()
    }

    /// Back to `Idle` so a fresh questionnaire can be submitted
    pub fn reset(&self) {
        *self.lock_state() = SubmissionState::Idle;
    }

    pub async fn submit(&self, request: SubmitRequest) -> Result<SubmitOutcome, SubmitError> {
        let identity = request
            .identity
            .filter(UserIdentity::is_authenticated)
            .ok_or(SubmitError::Authentication)?;
        let webhook_url = parse_optional_webhook_url(request.webhook_url.as_deref())?;

        self.begin()?;
        debug!(
            user_id = %identity.id,
            backend = self.store.backend_name(),
            answers = request.answers.len(),
            "Submitting project requirements"
        );

        let row = NewProject::submitted(identity.id.clone(), request.answers.clone());
        let store_id = match self.store.insert_project(row).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Failed to store project requirements");
                self.transition(SubmissionState::StoreFailed);
                return Ok(SubmitOutcome::StoreFailed {
                    message: e.message(),
                });
            }
        };
        self.transition(SubmissionState::StoreSucceeded);
        debug!(store_id = %store_id, "Project requirements stored");

        let webhook = match webhook_url {
            None => {
                self.transition(SubmissionState::WebhookSkipped);
                WebhookOutcome::Skipped
            }
            Some(url) => {
                let payload = WebhookPayload {
                    user_id: identity.id.clone(),
                    user_email: identity.email.clone(),
                    user_full_name: request
                        .profile
                        .as_ref()
                        .and_then(UserProfile::display_name)
                        .unwrap_or(WebhookPayload::MISSING_FULL_NAME)
                        .to_string(),
                    submission_timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                    project_requirements: request.answers.clone(),
                    supabase_project_id: Some(store_id.clone()),
                };

                match self.webhook.send(&url, &payload).await {
                    Ok(delivery) => {
                        debug!(status = delivery.status, "Webhook relay succeeded");
                        self.transition(SubmissionState::WebhookSucceeded);
                        WebhookOutcome::Delivered(delivery)
                    }
                    Err(e) => {
                        warn!(
                            status = ?e.status,
                            error = %e.error_text,
                            "Webhook relay failed; submission is still stored"
                        );
                        self.transition(SubmissionState::WebhookFailed);
                        WebhookOutcome::Failed(e)
                    }
                }
            }
        };

        self.transition(SubmissionState::Done);
        Ok(SubmitOutcome::Stored {
            store_id,
            answers: request.answers,
            webhook,
        })
    }

    fn begin(&self) -> Result<(), SubmitError> {
        let mut state = self.lock_state();
        match *state {
            SubmissionState::Idle | SubmissionState::StoreFailed => {
                *state = SubmissionState::Submitting;
                Ok(())
            }
            SubmissionState::Done => Err(SubmitError::AlreadySubmitted),
            _ => Err(SubmitError::InProgress),
        }
    }

    fn transition(&self, next: SubmissionState) {
        let mut state = self.lock_state();
        if state.can_transition_to(next) {
            *state = next;
        } else {
            warn!(from = ?*state, to = ?next, "Ignoring illegal submission state transition");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
