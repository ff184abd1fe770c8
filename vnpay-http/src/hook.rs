//! Business-effect callback for authoritative notifications.
//!
//! Crediting a wallet, activating a membership, dispatching an email —
//! whatever a verified payment should trigger lives behind [`PaymentHook`].
//! The IPN handler invokes the hook at most once per transaction reference;
//! a hook failure releases the claim and converts into a retryable
//! acknowledgment, so the processor redelivers and the effect is retried
//! without ever double-applying.

use async_trait::async_trait;
use vnpay::CallbackResult;

/// Boxed error returned by hook implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The business effect applied once per verified, newly delivered IPN.
///
/// The hook receives failed outcomes too — the notification is
/// authoritative for the attempt's terminal state, not only for successes.
/// Implementations decide what each outcome triggers.
#[async_trait]
pub trait PaymentHook: Send + Sync {
    /// Applies the effect for a verified callback.
    ///
    /// # Errors
    ///
    /// Any error marks the delivery as not processed; the claim is
    /// released and the processor's retry will invoke the hook again.
    async fn on_payment(&self, result: &CallbackResult) -> Result<(), BoxError>;
}

/// A hook that does nothing; useful for tests and for deployments where
/// recording the terminal state in the store is the whole effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

#[async_trait]
impl PaymentHook for NoopHook {
    async fn on_payment(&self, _result: &CallbackResult) -> Result<(), BoxError> {
        Ok(())
    }
}
