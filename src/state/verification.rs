//! OTP verification gates for the college email and phone channels
//!
//! Each gate walks `Unchallenged -> Challenged -> Verified`. A failed code
//! check keeps the gate `Challenged` so the submitter can retry. `Verified`
//! is terminal until the form is reset, and the guarded field is locked.
//!
//! No code is delivered or checked against a server here: any well-formed
//! 4-digit code satisfies an issued challenge.

use crate::error::{RegistrationError, RegistrationResult};
use crate::state::Field;
use regex::Regex;
use std::sync::LazyLock;

/// Length of a one-time code
pub const CODE_LENGTH: usize = 4;

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("code pattern is valid"));

/// A channel whose ownership must be proven before submitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    CollegeEmail,
    Phone,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::CollegeEmail, Channel::Phone];

    /// The form field this channel guards
    pub fn field(&self) -> Field {
        match self {
            Self::CollegeEmail => Field::CollegeEmail,
            Self::Phone => Field::Phone,
        }
    }

    pub(crate) fn empty_field_noun(&self) -> &'static str {
        match self {
            Self::CollegeEmail => "college email",
            Self::Phone => "phone number",
        }
    }

    /// Confirmation shown once a challenge has been issued
    pub fn challenge_sent_message(&self) -> &'static str {
        match self {
            Self::CollegeEmail => "OTP sent to your college email!",
            Self::Phone => "OTP sent to your phone!",
        }
    }

    /// Confirmation shown once the channel is verified
    pub fn verified_message(&self) -> &'static str {
        match self {
            Self::CollegeEmail => "College email verified successfully!",
            Self::Phone => "Phone number verified successfully!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateStatus {
    #[default]
    Unchallenged,
    Challenged,
    Verified,
}

/// Verification state for one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationGate {
    channel: Channel,
    status: GateStatus,
    code: String,
}

impl VerificationGate {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            status: GateStatus::Unchallenged,
            code: String::new(),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn status(&self) -> GateStatus {
        self.status
    }

    /// Code typed so far
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_verified(&self) -> bool {
        self.status == GateStatus::Verified
    }

    /// A challenge was issued for this channel, whether or not it has been answered
    pub fn challenge_issued(&self) -> bool {
        matches!(self.status, GateStatus::Challenged | GateStatus::Verified)
    }

    /// The code entry control should be shown
    pub fn is_challenge_pending(&self) -> bool {
        self.status == GateStatus::Challenged
    }

    /// The "send OTP" action should be offered
    pub fn can_request_challenge(&self) -> bool {
        self.status == GateStatus::Unchallenged
    }

    /// The guarded field no longer accepts edits
    pub fn is_locked(&self) -> bool {
        self.is_verified()
    }

    /// Success banner for the current status, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self.status {
            GateStatus::Unchallenged => None,
            GateStatus::Challenged => Some(self.channel.challenge_sent_message()),
            GateStatus::Verified => Some(self.channel.verified_message()),
        }
    }

    /// Issue a challenge for the current value of the guarded field.
    ///
    /// Re-requesting while challenged re-issues and clears the typed code.
    /// Requesting after verification is a no-op.
    pub fn request_challenge(&mut self, field_value: &str) -> RegistrationResult<()> {
        if self.is_verified() {
            tracing::debug!(channel = ?self.channel, "challenge requested on verified channel, ignoring");
            return Ok(());
        }
        if field_value.is_empty() {
            return Err(RegistrationError::EmptyField(self.channel));
        }
        self.status = GateStatus::Challenged;
        self.code.clear();
        tracing::info!(channel = ?self.channel, "verification challenge issued");
        Ok(())
    }

    /// Update the typed code, keeping only digits and at most four of them
    pub fn set_code(&mut self, raw: &str) {
        if !self.is_challenge_pending() {
            return;
        }
        self.code = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(CODE_LENGTH)
            .collect();
        tracing::debug!(channel = ?self.channel, len = self.code.len(), "code edited");
    }

    /// Answer the pending challenge with `candidate`
    pub fn submit_code(&mut self, candidate: &str) -> RegistrationResult<()> {
        if !self.is_challenge_pending() {
            return Err(RegistrationError::ChallengeNotIssued(self.channel));
        }
        if !CODE_PATTERN.is_match(candidate) {
            tracing::debug!(channel = ?self.channel, "rejected malformed code");
            return Err(RegistrationError::InvalidCode(self.channel));
        }
        self.status = GateStatus::Verified;
        self.code.clear();
        tracing::info!(channel = ?self.channel, "channel verified");
        Ok(())
    }

    /// Answer the pending challenge with the code typed so far
    pub fn verify_entered_code(&mut self) -> RegistrationResult<()> {
        let candidate = self.code.clone();
        self.submit_code(&candidate)
    }

    /// Drop a pending challenge because the guarded value changed
    pub fn withdraw_challenge(&mut self) {
        if self.is_challenge_pending() {
            self.status = GateStatus::Unchallenged;
            self.code.clear();
            tracing::debug!(channel = ?self.channel, "challenge withdrawn after edit");
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.channel);
    }
}
