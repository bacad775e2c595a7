//! Validation errors raised by the registration controller
//!
//! Every variant is handled locally: it blocks the triggering action and its
//! `Display` output is the inline message shown next to the control.
//! Backend failures are modelled separately by [`crate::transport::TransportError`].

use crate::state::{Channel, Field};
use thiserror::Error;

/// A submit precondition that was not satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    CollegeEmailVerified,
    PhoneVerified,
    IdCardAttached,
    FieldFilled(Field),
}

impl Precondition {
    /// Inline message shown when the precondition blocks a submit
    pub fn message(&self) -> String {
        match self {
            Self::CollegeEmailVerified => "Please verify your college email".to_string(),
            Self::PhoneVerified => "Please verify your phone number".to_string(),
            Self::IdCardAttached => "Please upload your NIAT College ID Card".to_string(),
            Self::FieldFilled(field) => format!("Please fill in: {}", field.label()),
        }
    }
}

impl std::fmt::Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Please enter your {}", .0.empty_field_noun())]
    EmptyField(Channel),

    #[error("Please enter a valid 4-digit OTP")]
    InvalidCode(Channel),

    #[error("Request an OTP for your {} first", .0.empty_field_noun())]
    ChallengeNotIssued(Channel),

    #[error("{} is verified and can no longer be changed", .0.label())]
    FieldLocked(Field),

    #[error("'{value}' is not a valid choice for {}", .field.label())]
    InvalidChoice { field: Field, value: String },

    #[error("File size must be less than 5MB ({size} bytes, limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Please upload an image file (got '{0}')")]
    UnsupportedType(String),

    #[error("{0}")]
    PreconditionNotMet(Precondition),
}

pub type RegistrationResult<T> = std::result::Result<T, RegistrationError>;
