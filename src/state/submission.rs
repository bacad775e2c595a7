//! Submission lifecycle for one registration attempt

use crate::transport::{RegistrationReceipt, TransportError};
use std::sync::{Arc, Weak};
use uuid::Uuid;

/// Shown when the backend gives no usable reason for a failure
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit registration. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    /// The confirmation screen is showing
    Succeeded(RegistrationReceipt),
    /// Inline error banner; the form stays editable
    Failed(String),
}

/// Reported while an attempt's tickets have all been dropped
static IDLE: SubmissionState = SubmissionState::Idle;

/// Result of a submit request that passed its preconditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was in flight or the confirmation is showing
    Ignored,
    Succeeded(RegistrationReceipt),
    Failed(String),
}

/// Identifies one dispatched submission.
///
/// The attempt stays in flight only while a ticket for it is alive. Hand it
/// back through `complete`/`abandon`; dropping every copy releases the
/// attempt the next time the tracker is queried.
#[derive(Debug, Clone)]
#[must_use = "a dispatched submission must be completed or abandoned"]
pub struct SubmissionTicket {
    attempt: Uuid,
    alive: Arc<()>,
}

impl PartialEq for SubmissionTicket {
    fn eq(&self, other: &Self) -> bool {
        self.attempt == other.attempt
    }
}

impl Eq for SubmissionTicket {}

impl SubmissionTicket {
    pub fn attempt(&self) -> Uuid {
        self.attempt
    }
}

#[derive(Debug, Clone)]
struct Attempt {
    id: Uuid,
    alive: Weak<()>,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionTracker {
    state: SubmissionState,
    in_flight: Option<Attempt>,
}

impl SubmissionTracker {
    pub fn state(&self) -> &SubmissionState {
        if self.is_orphaned() {
            return &IDLE;
        }
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting && !self.is_orphaned()
    }

    /// The confirmation screen is showing; only `reset` leaves it
    pub fn is_confirmed(&self) -> bool {
        matches!(self.state, SubmissionState::Succeeded(_))
    }

    /// In flight, but every ticket was dropped without a result
    fn is_orphaned(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|a| a.alive.strong_count() == 0)
    }

    /// Enter `Submitting`.
    ///
    /// Returns `None` while a submission is in flight or after one succeeded.
    pub fn begin(&mut self) -> Option<SubmissionTicket> {
        if self.is_orphaned() {
            if let Some(lost) = self.in_flight.take() {
                tracing::warn!(attempt = %lost.id, "submission dropped without a result");
            }
            self.state = SubmissionState::Idle;
        }
        if self.is_submitting() || self.is_confirmed() {
            return None;
        }
        let attempt = Uuid::new_v4();
        let alive = Arc::new(());
        self.in_flight = Some(Attempt {
            id: attempt,
            alive: Arc::downgrade(&alive),
        });
        self.state = SubmissionState::Submitting;
        Some(SubmissionTicket { attempt, alive })
    }

    fn holds(&self, ticket: &SubmissionTicket) -> bool {
        self.in_flight.as_ref().is_some_and(|a| a.id == ticket.attempt)
    }

    /// Apply the transport result for `ticket`.
    ///
    /// Returns `None` when the ticket no longer matches the in-flight attempt,
    /// e.g. because the form was reset in the meantime.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<RegistrationReceipt, TransportError>,
    ) -> Option<SubmitOutcome> {
        if !self.holds(&ticket) {
            tracing::debug!(attempt = %ticket.attempt, "discarding result of stale submission");
            return None;
        }
        self.in_flight = None;

        let outcome = match result {
            Ok(receipt) => {
                tracing::info!(
                    attempt = %ticket.attempt,
                    id = %receipt.id,
                    status = %receipt.status,
                    "registration submitted"
                );
                self.state = SubmissionState::Succeeded(receipt.clone());
                SubmitOutcome::Succeeded(receipt)
            }
            Err(e) => {
                tracing::warn!(attempt = %ticket.attempt, "registration failed: {e}");
                let reason = e
                    .user_message()
                    .unwrap_or(GENERIC_FAILURE_MESSAGE)
                    .to_string();
                self.state = SubmissionState::Failed(reason.clone());
                SubmitOutcome::Failed(reason)
            }
        };
        Some(outcome)
    }

    /// Drop an unfinished attempt, returning to `Idle`
    pub fn abandon(&mut self, ticket: SubmissionTicket) {
        if self.holds(&ticket) {
            tracing::debug!(attempt = %ticket.attempt, "submission abandoned before completion");
            self.in_flight = None;
            self.state = SubmissionState::Idle;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Keeps `Submitting` scoped to one await: if the guard is dropped before
/// [`InFlight::complete`] runs, the attempt is abandoned.
pub struct InFlight<'a> {
    tracker: &'a mut SubmissionTracker,
    ticket: Option<SubmissionTicket>,
}

impl<'a> InFlight<'a> {
    pub fn new(tracker: &'a mut SubmissionTracker, ticket: SubmissionTicket) -> Self {
        Self {
            tracker,
            ticket: Some(ticket),
        }
    }

    pub fn complete(
        mut self,
        result: Result<RegistrationReceipt, TransportError>,
    ) -> SubmitOutcome {
        match self.ticket.take() {
            Some(ticket) => self
                .tracker
                .complete(ticket, result)
                .unwrap_or(SubmitOutcome::Ignored),
            None => SubmitOutcome::Ignored,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.tracker.abandon(ticket);
        }
    }
}
