//! HTTP error mapping for the non-IPN endpoints.
//!
//! The IPN path never returns one of these: it always answers HTTP 200
//! with an acknowledgment body, because an error status would stall the
//! processor's retry loop. The return-URL and status endpoints use normal
//! HTTP semantics.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::store::StoreError;

/// Errors surfaced as HTTP responses by the return-URL and status routes.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The callback failed verification or interpretation; the whole
    /// parameter set is rejected.
    #[error("callback rejected: {0}")]
    Rejected(#[from] vnpay::Error),

    /// No delivery has been recorded for the queried reference.
    #[error("no payment recorded for reference '{0}'")]
    UnknownOrder(String),

    /// The idempotency store could not be reached.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::UnknownOrder(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
