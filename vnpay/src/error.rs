//! Error taxonomy for request building and callback verification.

/// Errors produced by the core gateway operations.
///
/// Signature failures are terminal for the callback that carried them: the
/// whole parameter set is rejected, no field of it is trusted. Unknown
/// response codes are deliberately *not* an error; they resolve to
/// [`Outcome::UnknownError`](crate::response_code::Outcome::UnknownError)
/// so a new processor-side code degrades instead of crashing the handler.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A required field is missing or malformed when building an outbound
    /// request. Surfaced to the caller, never sent to the processor.
    #[error("invalid payment request: {0}")]
    InvalidRequest(String),

    /// Merchant code or shared secret is absent. Fatal at startup or first
    /// use; request building must not proceed.
    #[error("gateway configuration error: {0}")]
    Configuration(String),

    /// The inbound callback carries no secure hash field.
    #[error("callback is missing the secure hash")]
    MissingSignature,

    /// The secure hash does not match the parameter set. The callback is
    /// forged or was altered in transit.
    #[error("callback secure hash does not verify")]
    InvalidSignature,

    /// The amount field of a verified callback is not a valid minor-unit
    /// integer.
    #[error("malformed amount field: {0:?}")]
    MalformedAmount(String),
}
