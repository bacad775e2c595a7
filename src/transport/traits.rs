//! Trait abstraction for the registration backend to enable mocking in tests

use super::{RegistrationPayload, RegistrationReceipt, TransportError};
use async_trait::async_trait;

/// Service boundary that persists a registration
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationTransport: Send + Sync {
    /// Send one registration; called at most once per submit
    async fn submit_registration(
        &self,
        payload: RegistrationPayload,
    ) -> Result<RegistrationReceipt, TransportError>;
}
