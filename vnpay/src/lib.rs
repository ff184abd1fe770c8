#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the VNPAY hosted-checkout gateway protocol.
//!
//! This crate provides the foundational types used to integrate with the
//! VNPAY hosted payment page: building signed redirect URLs, verifying the
//! secure hash on inbound callbacks, and interpreting the processor's
//! response-code taxonomy. It is transport-agnostic, with the HTTP callback
//! surface provided by the `vnpay-http` crate.
//!
//! # Overview
//!
//! The gateway flow is redirect-based. The merchant assembles a parameter
//! set for a payment attempt, signs its canonical serialization with
//! HMAC-SHA-512 under a shared secret, and redirects the customer's browser
//! to the processor's payment page. The processor later reports the result
//! twice: once through the customer's browser (return URL) and once through
//! a server-to-server notification (IPN). Both carry the same signed
//! parameter set and must be verified before any field is trusted.
//!
//! # Modules
//!
//! - [`params`] - Wire-level parameter sets and the processor's field names
//! - [`canonical`] - Deterministic serialization of a parameter set for signing
//! - [`signature`] - HMAC-SHA-512 secure hash computation and verification
//! - [`config`] - Merchant credentials and gateway endpoints
//! - [`request`] - Signed payment-request (redirect URL) construction
//! - [`callback`] - Shared verification pipeline for inbound callbacks
//! - [`response_code`] - Response-code to outcome mapping
//! - [`timestamp`] - The processor's fixed 14-digit timestamp format
//! - [`error`] - Error taxonomy for request building and verification

pub mod callback;
pub mod canonical;
pub mod config;
pub mod error;
pub mod params;
pub mod request;
pub mod response_code;
pub mod signature;
pub mod timestamp;

pub use callback::{CallbackResult, interpret_callback};
pub use canonical::canonicalize;
pub use config::GatewayConfig;
pub use error::Error;
pub use params::ParameterSet;
pub use request::{PaymentOrder, PaymentRequest, build_payment_url};
pub use response_code::Outcome;
pub use signature::{sign, verify};
pub use timestamp::CreateDate;
