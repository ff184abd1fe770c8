//! Default business-effect hook for the standalone server.
//!
//! The standalone deployment has no wallet or membership system of its
//! own; recording the terminal state in the store is the effect, and this
//! hook adds a structured audit line per settled reference. Embedders
//! replace it with their own [`PaymentHook`] implementation.

use async_trait::async_trait;
use vnpay::CallbackResult;
use vnpay_http::PaymentHook;
use vnpay_http::hook::BoxError;

/// Logs each settled payment attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditHook;

#[async_trait]
impl PaymentHook for AuditHook {
    async fn on_payment(&self, result: &CallbackResult) -> Result<(), BoxError> {
        let amount = result.amount.map(|a| a.to_string());
        tracing::info!(
            txn_ref = %result.txn_ref,
            code = %result.response_code,
            outcome = %result.outcome,
            amount = amount.as_deref(),
            transaction_no = result.transaction_no.as_deref(),
            bank_code = result.bank_code.as_deref(),
            "Payment settled"
        );
        Ok(())
    }
}
