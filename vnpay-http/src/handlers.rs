//! Axum handlers for the gateway's callback surface.
//!
//! Three routes share one [`AppState`]:
//!
//! - `GET /payment/return` — browser-facing result page; verified, but not
//!   authoritative for any balance
//! - `GET|POST /payment/ipn` — authoritative server-to-server notification;
//!   idempotent, always acknowledged
//! - `GET /payment/status/{txn_ref}` — informational lifecycle query

use std::fmt;
use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use vnpay::params::fields;
use vnpay::{CallbackResult, Error, GatewayConfig, ParameterSet, interpret_callback};

use crate::ack::IpnAck;
use crate::error::HttpError;
use crate::hook::PaymentHook;
use crate::store::{Claim, PaymentStatus, TransactionStore};

/// Shared state for the callback routes.
#[derive(Clone)]
pub struct AppState {
    /// Terminal credentials and endpoints.
    pub config: GatewayConfig,
    /// Idempotency and status persistence.
    pub store: Arc<dyn TransactionStore>,
    /// Business effect applied once per settled reference.
    pub hook: Arc<dyn PaymentHook>,
}

impl AppState {
    /// Bundles config, store, and hook into the router state.
    #[must_use]
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn TransactionStore>,
        hook: Arc<dyn PaymentHook>,
    ) -> Self {
        Self {
            config,
            store,
            hook,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &"<dyn TransactionStore>")
            .field("hook", &"<dyn PaymentHook>")
            .finish()
    }
}

/// Decodes a raw query string into a parameter set.
///
/// The processor sends the same parameter set on GET redirects and POST
/// notifications, always in the query component.
fn parse_query(query: Option<&str>) -> ParameterSet {
    query
        .map(|q| {
            ParameterSet::from_pairs(
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned())),
            )
        })
        .unwrap_or_default()
}

/// Body of the status query response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// The queried transaction reference.
    pub order_reference: String,
    /// Current lifecycle tag.
    pub status: PaymentStatus,
}

/// `GET /payment/return` — browser-facing payment result.
///
/// Verifies the redirect's parameter set and renders a minimal result view.
/// Rejected callbacks answer 400; this route never credits anything, the
/// IPN is authoritative.
///
/// # Errors
///
/// Returns [`HttpError::Rejected`] when the signature is missing or wrong,
/// or the verified set is malformed.
pub async fn payment_return(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, HttpError> {
    let params = parse_query(query.as_deref());
    let result = interpret_callback(&params, &state.config)?;

    tracing::info!(
        txn_ref = %result.txn_ref,
        code = %result.response_code,
        outcome = %result.outcome,
        "Return-URL callback verified"
    );
    Ok(Html(render_return_view(&result)))
}

/// Minimal HTML reflecting the attempt's outcome to the customer.
fn render_return_view(result: &CallbackResult) -> String {
    let headline = if result.outcome.is_success() {
        "Payment successful"
    } else {
        "Payment failed"
    };
    let amount = result
        .amount
        .map(|a| format!("<p>Amount: {a}</p>"))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html><html><body><h1>{headline}</h1>\
         <p>Order: {}</p><p>Result: {}</p>{amount}</body></html>",
        result.txn_ref, result.outcome,
    )
}

/// `GET|POST /payment/ipn` — authoritative payment notification.
///
/// Always answers HTTP 200 with an [`IpnAck`]; outcomes are distinguished
/// by the body's code because the processor's retry loop keys off the body.
pub async fn payment_ipn(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<IpnAck> {
    let params = parse_query(query.as_deref());
    Json(process_ipn(&state, &params).await)
}

/// The IPN decision ladder: verify, claim, apply, record.
async fn process_ipn(state: &AppState, params: &ParameterSet) -> IpnAck {
    let result = match interpret_callback(params, &state.config) {
        Ok(result) => result,
        Err(err @ (Error::MissingSignature | Error::InvalidSignature)) => {
            tracing::warn!(
                txn_ref = params.get(fields::TXN_REF).unwrap_or("<none>"),
                error = %err,
                "Rejected IPN with bad signature"
            );
            return IpnAck::invalid_signature();
        }
        Err(err) => {
            // Signed but uninterpretable. The retry will carry the same
            // payload, but a definitive answer must still go out.
            tracing::error!(error = %err, "Failed to interpret verified IPN");
            return IpnAck::internal_error();
        }
    };

    let claim = match state.store.claim(&result.txn_ref).await {
        Ok(claim) => claim,
        Err(err) => {
            tracing::error!(txn_ref = %result.txn_ref, error = %err, "Claim failed");
            return IpnAck::internal_error();
        }
    };

    match claim {
        Claim::Completed(ack) => {
            tracing::info!(txn_ref = %result.txn_ref, "Replaying acknowledgment for processed IPN");
            ack
        }
        Claim::InFlight => {
            tracing::warn!(txn_ref = %result.txn_ref, "Concurrent IPN delivery still in flight");
            IpnAck::in_flight()
        }
        Claim::Acquired => apply_and_record(state, &result).await,
    }
}

/// Runs the business effect for a freshly claimed reference and records
/// the terminal state.
async fn apply_and_record(state: &AppState, result: &CallbackResult) -> IpnAck {
    if let Err(err) = state.hook.on_payment(result).await {
        tracing::error!(
            txn_ref = %result.txn_ref,
            error = %err,
            "Business effect failed; releasing claim for retry"
        );
        if let Err(err) = state.store.release(&result.txn_ref).await {
            tracing::error!(txn_ref = %result.txn_ref, error = %err, "Release failed");
        }
        return IpnAck::internal_error();
    }

    let status = if result.outcome.is_success() {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Failed
    };
    let ack = IpnAck::ok();
    if let Err(err) = state
        .store
        .complete(&result.txn_ref, status, ack.clone())
        .await
    {
        // The effect is applied; acknowledge success anyway so the
        // processor does not redeliver into a second application.
        tracing::error!(txn_ref = %result.txn_ref, error = %err, "Recording terminal state failed");
    }

    tracing::info!(
        txn_ref = %result.txn_ref,
        code = %result.response_code,
        outcome = %result.outcome,
        status = ?status,
        "IPN processed"
    );
    ack
}

/// `GET /payment/status/{txn_ref}` — informational lifecycle query.
///
/// # Errors
///
/// Returns [`HttpError::UnknownOrder`] when no delivery has been recorded
/// for the reference.
pub async fn payment_status(
    State(state): State<AppState>,
    Path(txn_ref): Path<String>,
) -> Result<Json<StatusResponse>, HttpError> {
    let status = state
        .store
        .status(&txn_ref)
        .await?
        .ok_or_else(|| HttpError::UnknownOrder(txn_ref.clone()))?;
    Ok(Json(StatusResponse {
        order_reference: txn_ref,
        status,
    }))
}

/// Creates an [`axum::Router`] with the full callback surface.
///
/// Routes:
/// - `GET /payment/return` — browser result page
/// - `GET|POST /payment/ipn` — payment notification
/// - `GET /payment/status/{txn_ref}` — lifecycle query
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/payment/return", get(payment_return))
        .route("/payment/ipn", get(payment_ipn).post(payment_ipn))
        .route("/payment/status/{txn_ref}", get(payment_status))
        .with_state(state)
}
