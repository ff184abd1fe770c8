//! Response-code to outcome mapping.
//!
//! The processor classifies every payment attempt with a two-character
//! `vnp_ResponseCode`. The table here collapses those codes into the
//! semantic outcomes the rest of the system acts on. The mapping is total:
//! codes this crate has never seen resolve to [`Outcome::UnknownError`]
//! rather than failing, so a new processor-side code degrades to an opaque
//! failure the caller can still present.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic result of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Payment completed successfully.
    Success,
    /// The amount did not match or was not accepted.
    InvalidAmount,
    /// The order details were rejected by the processor.
    InvalidOrderInfo,
    /// The order category was rejected by the processor.
    InvalidOrderType,
    /// The customer cancelled on the hosted payment page.
    UserCancelled,
    /// The account balance could not cover the payment.
    InsufficientBalance,
    /// A per-day or per-transaction limit was exceeded.
    LimitExceeded,
    /// The issuing bank was unavailable or under maintenance.
    BankUnavailable,
    /// Card or authentication details were wrong or blocked.
    InvalidPaymentInfo,
    /// Any code the table does not recognize.
    UnknownError,
}

impl Outcome {
    /// Maps a processor response code to its outcome.
    ///
    /// Never fails; unrecognized codes yield [`Outcome::UnknownError`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "00" => Self::Success,
            "01" => Self::InvalidOrderInfo,
            "02" => Self::InvalidOrderType,
            "04" => Self::InvalidAmount,
            // Irregular or failed authentication paths at the issuer.
            "07" | "09" | "10" | "12" | "13" | "79" => Self::InvalidPaymentInfo,
            // Payment window expired without the customer completing it.
            "11" | "24" => Self::UserCancelled,
            "51" => Self::InsufficientBalance,
            "65" => Self::LimitExceeded,
            "75" => Self::BankUnavailable,
            _ => Self::UnknownError,
        }
    }

    /// Returns `true` only for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Success => "payment successful",
            Self::InvalidAmount => "invalid amount",
            Self::InvalidOrderInfo => "invalid order information",
            Self::InvalidOrderType => "invalid order type",
            Self::UserCancelled => "cancelled by customer",
            Self::InsufficientBalance => "insufficient balance",
            Self::LimitExceeded => "transaction limit exceeded",
            Self::BankUnavailable => "bank unavailable",
            Self::InvalidPaymentInfo => "invalid payment information",
            Self::UnknownError => "unknown error",
        };
        f.write_str(text)
    }
}
