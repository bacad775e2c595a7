//! Registration form controller
//!
//! Owns the field store, both verification gates, the ID card preview and
//! the submission lifecycle for one registration attempt. The presentation
//! shell forwards raw events through [`RegistrationController::handle_event`]
//! and renders the read-only [`RegistrationView`].
//!
//! All mutation happens on `&mut self`, one event at a time. The two slow
//! operations (preview rendering, network submission) are handed back to the
//! shell as an [`Effect`] so editing can continue while they run.

use crate::error::{Precondition, RegistrationError, RegistrationResult};
use crate::state::{
    validate_id_card, Channel, Field, IdCardFile, InFlight, PreviewJob, PreviewState,
    PreviewTracker, RegistrationForm, RenderedPreview, SubmissionState, SubmissionTicket,
    SubmissionTracker, SubmitOutcome, VerificationGate,
};
use crate::transport::{RegistrationPayload, RegistrationReceipt, RegistrationTransport, TransportError};

/// Raw user events emitted by the presentation shell
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    FieldChanged { field: Field, value: String },
    ChallengeRequested(Channel),
    CodeEdited(Channel, String),
    CodeSubmitted(Channel),
    FileSelected(IdCardFile),
    FileRemoved,
    SubmitClicked,
    ResetClicked,
}

/// Async work the shell must start after an event
#[derive(Debug)]
pub enum Effect {
    None,
    /// Run [`PreviewJob::render`] and pass the result to `apply_preview`
    RenderPreview(PreviewJob),
    /// Send the payload and pass the result to `complete_submission`
    Dispatch(PendingSubmission),
}

/// A submission that passed every precondition and is now in flight.
///
/// The shell sends the payload and hands the ticket back on every exit
/// path: `complete_submission` with the transport result, or
/// `abandon_submission` when the send never happens. If the ticket is
/// dropped instead, the controller stops reporting `Submitting` and the next
/// submit starts a fresh attempt.
#[derive(Debug)]
#[must_use = "the dispatch must be sent, or its ticket abandoned"]
pub struct PendingSubmission {
    ticket: SubmissionTicket,
    payload: RegistrationPayload,
}

impl PendingSubmission {
    pub fn ticket(&self) -> SubmissionTicket {
        self.ticket.clone()
    }

    pub fn payload(&self) -> &RegistrationPayload {
        &self.payload
    }

    pub fn into_parts(self) -> (SubmissionTicket, RegistrationPayload) {
        (self.ticket, self.payload)
    }
}

/// Read-only snapshot for rendering
#[derive(Debug, Clone, Copy)]
pub struct RegistrationView<'a> {
    pub form: &'a RegistrationForm,
    pub email_gate: &'a VerificationGate,
    pub phone_gate: &'a VerificationGate,
    pub preview: &'a PreviewState,
    pub submission: &'a SubmissionState,
}

#[derive(Debug, Clone)]
pub struct RegistrationController {
    form: RegistrationForm,
    email_gate: VerificationGate,
    phone_gate: VerificationGate,
    preview: PreviewTracker,
    submission: SubmissionTracker,
}

impl RegistrationController {
    pub fn new() -> Self {
        Self {
            form: RegistrationForm::new(),
            email_gate: VerificationGate::new(Channel::CollegeEmail),
            phone_gate: VerificationGate::new(Channel::Phone),
            preview: PreviewTracker::default(),
            submission: SubmissionTracker::default(),
        }
    }

    pub fn view(&self) -> RegistrationView<'_> {
        RegistrationView {
            form: &self.form,
            email_gate: &self.email_gate,
            phone_gate: &self.phone_gate,
            preview: self.preview.state(),
            submission: self.submission.state(),
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn gate(&self, channel: Channel) -> &VerificationGate {
        match channel {
            Channel::CollegeEmail => &self.email_gate,
            Channel::Phone => &self.phone_gate,
        }
    }

    fn gate_mut(&mut self, channel: Channel) -> &mut VerificationGate {
        match channel {
            Channel::CollegeEmail => &mut self.email_gate,
            Channel::Phone => &mut self.phone_gate,
        }
    }

    pub fn preview(&self) -> &PreviewState {
        self.preview.state()
    }

    pub fn submission(&self) -> &SubmissionState {
        self.submission.state()
    }

    /// The submit control should be disabled
    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting()
    }

    /// The field's input control should be disabled
    pub fn is_field_locked(&self, field: Field) -> bool {
        field
            .channel()
            .is_some_and(|channel| self.gate(channel).is_locked())
    }

    // ========== Field store ==========

    /// Replace one field's value.
    ///
    /// Verified fields are locked. Changing a field whose challenge is still
    /// pending withdraws that challenge.
    pub fn set_field(&mut self, field: Field, value: &str) -> RegistrationResult<()> {
        if self.is_field_locked(field) {
            return Err(RegistrationError::FieldLocked(field));
        }
        let changed = self.form.value(field) != value;
        self.form.set(field, value)?;
        tracing::debug!(%field, "field updated");

        if let Some(channel) = field.channel() {
            if changed {
                self.gate_mut(channel).withdraw_challenge();
            }
        }
        Ok(())
    }

    // ========== Verification gates ==========

    pub fn request_challenge(&mut self, channel: Channel) -> RegistrationResult<()> {
        let value = self.form.value(channel.field()).to_string();
        self.gate_mut(channel).request_challenge(&value)
    }

    pub fn set_code(&mut self, channel: Channel, raw: &str) {
        self.gate_mut(channel).set_code(raw);
    }

    pub fn submit_code(&mut self, channel: Channel, candidate: &str) -> RegistrationResult<()> {
        self.gate_mut(channel).submit_code(candidate)
    }

    pub fn verify_entered_code(&mut self, channel: Channel) -> RegistrationResult<()> {
        self.gate_mut(channel).verify_entered_code()
    }

    // ========== ID card ==========

    /// Validate and attach an ID card, replacing any previous one.
    ///
    /// The returned job renders the preview; its failure never affects the
    /// attachment.
    pub fn attach_id_card(&mut self, file: IdCardFile) -> RegistrationResult<PreviewJob> {
        if let Err(e) = validate_id_card(&file) {
            tracing::warn!(file = %file.file_name(), "ID card rejected: {e}");
            return Err(e);
        }
        tracing::info!(
            file = %file.file_name(),
            media_type = %file.media_type(),
            size = file.size(),
            "ID card attached"
        );
        self.form.id_card = Some(file.clone());
        Ok(self.preview.begin(file))
    }

    pub fn detach_id_card(&mut self) {
        if self.form.id_card.take().is_some() {
            tracing::info!("ID card removed");
        }
        self.preview.clear();
    }

    /// Apply a finished preview render; stale renders are ignored
    pub fn apply_preview(&mut self, rendered: RenderedPreview) -> bool {
        self.preview.apply(rendered)
    }

    // ========== Submission ==========

    /// Check everything a submit needs, in the order the user is told about it
    pub fn check_preconditions(&self) -> RegistrationResult<()> {
        let unmet = if !self.email_gate.is_verified() {
            Some(Precondition::CollegeEmailVerified)
        } else if !self.phone_gate.is_verified() {
            Some(Precondition::PhoneVerified)
        } else if self.form.id_card.is_none() {
            Some(Precondition::IdCardAttached)
        } else {
            self.form.first_missing().map(Precondition::FieldFilled)
        };

        match unmet {
            Some(precondition) => Err(RegistrationError::PreconditionNotMet(precondition)),
            None => Ok(()),
        }
    }

    /// Start a submission.
    ///
    /// Returns `Ok(None)` when one is already in flight or the confirmation
    /// screen is showing. On success the controller is `Submitting` and the
    /// caller owns the dispatch.
    pub fn prepare_submission(&mut self) -> RegistrationResult<Option<PendingSubmission>> {
        if self.submission.is_submitting() {
            tracing::debug!("submit ignored, submission already in flight");
            return Ok(None);
        }
        if self.submission.is_confirmed() {
            tracing::debug!("submit ignored, registration already accepted");
            return Ok(None);
        }
        self.check_preconditions()?;

        let Some(id_card) = self.form.id_card.clone() else {
            return Err(RegistrationError::PreconditionNotMet(
                Precondition::IdCardAttached,
            ));
        };
        let payload = RegistrationPayload::new(
            &self.form,
            id_card,
            self.email_gate.is_verified(),
            self.phone_gate.is_verified(),
        );
        let Some(ticket) = self.submission.begin() else {
            return Ok(None);
        };
        tracing::info!(attempt = %ticket.attempt(), "dispatching registration");
        Ok(Some(PendingSubmission { ticket, payload }))
    }

    /// Apply the transport result of a dispatched submission
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<RegistrationReceipt, TransportError>,
    ) -> Option<SubmitOutcome> {
        self.submission.complete(ticket, result)
    }

    /// Give up on a dispatched submission that will never produce a result
    pub fn abandon_submission(&mut self, ticket: SubmissionTicket) {
        self.submission.abandon(ticket);
    }

    /// Run the whole pipeline against `transport`.
    ///
    /// Precondition failures are returned as errors and never reach the
    /// transport. Transport failures become [`SubmitOutcome::Failed`] and
    /// leave the form and gates untouched.
    pub async fn submit<T>(&mut self, transport: &T) -> RegistrationResult<SubmitOutcome>
    where
        T: RegistrationTransport + ?Sized,
    {
        let Some(pending) = self.prepare_submission()? else {
            return Ok(SubmitOutcome::Ignored);
        };
        let (ticket, payload) = pending.into_parts();

        let in_flight = InFlight::new(&mut self.submission, ticket);
        let result = transport.submit_registration(payload).await;
        Ok(in_flight.complete(result))
    }

    /// "Submit another": discard everything and start over
    pub fn reset(&mut self) {
        self.form = RegistrationForm::new();
        self.email_gate.reset();
        self.phone_gate.reset();
        self.preview.clear();
        self.submission.reset();
        tracing::info!("registration form reset");
    }

    // ========== Events ==========

    pub fn handle_event(&mut self, event: ControllerEvent) -> RegistrationResult<Effect> {
        match event {
            ControllerEvent::FieldChanged { field, value } => self.set_field(field, &value)?,
            ControllerEvent::ChallengeRequested(channel) => self.request_challenge(channel)?,
            ControllerEvent::CodeEdited(channel, raw) => self.set_code(channel, &raw),
            ControllerEvent::CodeSubmitted(channel) => self.verify_entered_code(channel)?,
            ControllerEvent::FileSelected(file) => {
                return self.attach_id_card(file).map(Effect::RenderPreview);
            }
            ControllerEvent::FileRemoved => self.detach_id_card(),
            ControllerEvent::SubmitClicked => {
                return Ok(self
                    .prepare_submission()?
                    .map_or(Effect::None, Effect::Dispatch));
            }
            ControllerEvent::ResetClicked => self.reset(),
        }
        Ok(Effect::None)
    }
}

impl Default for RegistrationController {
    fn default() -> Self {
        Self::new()
    }
}
