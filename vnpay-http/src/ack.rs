//! The fixed IPN acknowledgment vocabulary.
//!
//! The processor keys its retry loop off the acknowledgment *body*, not the
//! HTTP status: every IPN response goes out with HTTP 200 and a two-field
//! JSON object. `"00"` stops the retries; `"97"` rejects a forged call
//! without inviting a retry; `"99"` asks the processor to deliver the same
//! notification again later.

use serde::{Deserialize, Serialize};

/// Synchronous acknowledgment returned for every IPN delivery.
///
/// Serializes exactly as the processor expects:
///
/// ```json
/// {"RspCode": "00", "Message": "Confirm Success"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpnAck {
    /// Two-character acknowledgment code.
    #[serde(rename = "RspCode")]
    pub rsp_code: String,
    /// Short human-readable message.
    #[serde(rename = "Message")]
    pub message: String,
}

impl IpnAck {
    fn new(rsp_code: &str, message: &str) -> Self {
        Self {
            rsp_code: rsp_code.to_owned(),
            message: message.to_owned(),
        }
    }

    /// The notification was received and recorded; the processor stops
    /// retrying. Sent for failed payment outcomes too — it acknowledges
    /// delivery, not payment success.
    #[must_use]
    pub fn ok() -> Self {
        Self::new("00", "Confirm Success")
    }

    /// The secure hash was missing or did not verify. Non-retryable: a
    /// forged call must not be treated as "try again".
    #[must_use]
    pub fn invalid_signature() -> Self {
        Self::new("97", "Invalid Checksum")
    }

    /// Something failed on the merchant side while applying the business
    /// effect. Retryable: the processor redelivers the same notification.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new("99", "Unknown error")
    }

    /// The same reference is being processed by a concurrent delivery.
    /// Retryable; the racing delivery's outcome is replayed on retry.
    #[must_use]
    pub fn in_flight() -> Self {
        Self::new("99", "Order is being processed")
    }

    /// Returns `true` for the terminal success acknowledgment.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.rsp_code == "00"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_is_two_fixed_fields() {
        let json = serde_json::to_value(IpnAck::ok()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"RspCode": "00", "Message": "Confirm Success"})
        );
    }

    #[test]
    fn test_vocabulary_codes() {
        assert!(IpnAck::ok().is_ok());
        assert_eq!(IpnAck::invalid_signature().rsp_code, "97");
        assert_eq!(IpnAck::internal_error().rsp_code, "99");
        assert_eq!(IpnAck::in_flight().rsp_code, "99");
        assert!(!IpnAck::invalid_signature().is_ok());
    }
}
