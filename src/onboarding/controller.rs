//! OnboardingController — single source of truth for wizard progress and
//! collected data, published to observers on every write.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::FlowConfig;

use super::model::UserProfileDraft;
use super::state::{OnboardingState, StepTransition, TransitionKind};

/// Owns the onboarding state and fans it out to observers.
///
/// State lives in a single-slot [`watch`] channel: every mutation replaces
/// the whole snapshot under the channel lock, so concurrent writers are
/// serialized and observers always see a fully-formed [`OnboardingState`].
/// Late subscribers get the latest value first. The rendering layer holds
/// an `Arc` to the controller, reads published state, and calls the
/// operations below in response to user input; none of them can fail.
pub struct OnboardingController {
    session_id: Uuid,
    tx: watch::Sender<OnboardingState>,
    transitions: Mutex<Vec<StepTransition>>,
    history_cap: usize,
}

impl OnboardingController {
    /// Create a controller with default configuration.
    pub fn new() -> Arc<Self> {
        Self::with_config(&FlowConfig::default())
    }

    /// Create a controller for a fresh onboarding session.
    pub fn with_config(config: &FlowConfig) -> Arc<Self> {
        let session_id = Uuid::new_v4();
        let (tx, _rx) = watch::channel(OnboardingState::default());

        info!(session_id = %session_id, "Onboarding session started");

        Arc::new(Self {
            session_id,
            tx,
            transitions: Mutex::new(Vec::new()),
            history_cap: config.transition_history_cap,
        })
    }

    /// Identifier of this onboarding session.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Observe state changes. The receiver holds the latest value and is
    /// notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<OnboardingState> {
        self.tx.subscribe()
    }

    /// Stream form of [`subscribe`](Self::subscribe): yields the current
    /// state immediately, then every subsequent publish.
    pub fn updates(&self) -> WatchStream<OnboardingState> {
        WatchStream::new(self.subscribe())
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> OnboardingState {
        self.tx.borrow().clone()
    }

    /// Move to the next step. No precondition; callers are expected to
    /// check [`is_current_step_valid`](Self::is_current_step_valid) first.
    pub fn advance_step(&self) {
        let (from, to) = self.shift_step(TransitionKind::Advance);
        debug!(session_id = %self.session_id, from, to, "Advanced step");
    }

    /// Move to the previous step. Like advancing, never refused.
    pub fn retreat_step(&self) {
        let (from, to) = self.shift_step(TransitionKind::Retreat);
        debug!(session_id = %self.session_id, from, to, "Retreated step");
    }

    /// Merge the basic-info fields into the draft and publish.
    pub fn set_basic_info(
        &self,
        name: impl Into<String>,
        age: i32,
        risk_tolerance: impl Into<String>,
        report_complexity: impl Into<String>,
    ) {
        let name = name.into();
        let risk_tolerance = risk_tolerance.into();
        let report_complexity = report_complexity.into();

        self.publish(|state| {
            let user_data = state.user_data.clone().with_basic_info(
                name,
                age,
                risk_tolerance,
                report_complexity,
            );
            OnboardingState { user_data, ..state.clone() }
        });

        debug!(session_id = %self.session_id, "Basic info updated");
    }

    /// Merge the interest tags and report days into the draft and publish.
    pub fn set_interests_and_days(&self, interests: Vec<String>, report_days: Vec<i32>) {
        self.publish(|state| {
            let user_data = state
                .user_data
                .clone()
                .with_interests_and_days(interests, report_days);
            OnboardingState { user_data, ..state.clone() }
        });

        debug!(session_id = %self.session_id, "Interests and report days updated");
    }

    /// Whether the current step's data is complete enough to move on.
    pub fn is_current_step_valid(&self) -> bool {
        self.tx.borrow().is_current_step_valid()
    }

    /// Whether the wizard has moved past the last defined step.
    pub fn is_complete(&self) -> bool {
        self.tx.borrow().is_complete()
    }

    /// Aggregate status report for consumers that render it (REST, logs).
    pub fn status(&self) -> OnboardingStatus {
        let state = self.snapshot();
        OnboardingStatus {
            session_id: self.session_id,
            complete: state.is_complete(),
            step_valid: state.is_current_step_valid(),
            current_step: state.current_step,
            user_data: state.user_data,
        }
    }

    /// Snapshot of the recorded step transitions, oldest first.
    pub fn transitions(&self) -> Vec<StepTransition> {
        self.transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply a whole-state replacement under the channel lock and notify
    /// all observers.
    fn publish(&self, f: impl FnOnce(&OnboardingState) -> OnboardingState) {
        self.tx.send_modify(|state| *state = f(state));
    }

    fn shift_step(&self, kind: TransitionKind) -> (i32, i32) {
        let mut from = 0;
        let mut to = 0;
        self.publish(|state| {
            from = state.current_step;
            let next = match kind {
                TransitionKind::Advance => state.clone().advanced(),
                TransitionKind::Retreat => state.clone().retreated(),
            };
            to = next.current_step;
            next
        });
        self.record_transition(kind, from, to);
        (from, to)
    }

    fn record_transition(&self, kind: TransitionKind, from: i32, to: i32) {
        let mut transitions = self
            .transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        transitions.push(StepTransition {
            kind,
            from,
            to,
            at: chrono::Utc::now(),
        });

        // Cap transition history to prevent unbounded memory growth
        if transitions.len() > self.history_cap {
            let drain_count = transitions.len() - self.history_cap;
            transitions.drain(..drain_count);
        }
    }
}

/// Point-in-time status of an onboarding session.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStatus {
    pub session_id: Uuid,
    pub complete: bool,
    pub step_valid: bool,
    pub current_step: i32,
    pub user_data: UserProfileDraft,
}
