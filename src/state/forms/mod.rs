//! Form domain layer
//!
//! The field store for one registration attempt: typed text inputs,
//! fixed-option selects and the attached ID card.

mod choices;
mod field;
mod registration_form;

pub use choices::{Branch, CurrentStatus, GraduationYear, PartnerCollege, SelectOption};
pub use field::{Field, FormField};
pub use registration_form::RegistrationForm;

#[cfg(test)]
pub(crate) use registration_form::tests::filled_form;
