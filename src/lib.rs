//! Senior registration - form controller for mentor sign-up
//!
//! Collects a senior mentor registration, gates it behind college email and
//! phone verification, validates the ID card image and submits everything
//! to the registration backend as multipart form data.
//!
//! ```no_run
//! use senior_registration::{
//!     config::TransportConfig, Channel, Field, HttpTransport, IdCardFile,
//!     RegistrationController,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let transport = HttpTransport::from_config(&TransportConfig::load()?)?;
//! let mut controller = RegistrationController::new();
//! controller.set_field(Field::CollegeEmail, "jane@college.edu")?;
//! controller.request_challenge(Channel::CollegeEmail)?;
//! controller.submit_code(Channel::CollegeEmail, "1234")?;
//! controller.attach_id_card(IdCardFile::from_path("id.png").await?)?;
//! let outcome = controller.submit(&transport).await;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod state;
pub mod transport;

pub use controller::{ControllerEvent, Effect, PendingSubmission, RegistrationController, RegistrationView};
pub use error::{Precondition, RegistrationError, RegistrationResult};
pub use state::{
    Channel, Field, GateStatus, IdCardFile, PreviewState, RegistrationForm, SubmissionState,
    SubmitOutcome, VerificationGate,
};
pub use transport::{
    HttpTransport, RegistrationPayload, RegistrationReceipt, RegistrationTransport, TransportError,
};
