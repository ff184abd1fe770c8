#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP callback surface for the VNPAY gateway.
//!
//! The processor reports each payment attempt twice: a browser redirect to
//! the merchant's return URL, and a server-to-server IPN that is retried
//! until acknowledged. This crate provides the axum handlers for both,
//! together with the idempotency layer that keeps the IPN's business effect
//! at most-once per transaction reference.
//!
//! # Modules
//!
//! - [`ack`] - The fixed `{RspCode, Message}` IPN acknowledgment vocabulary
//! - [`store`] - Idempotency store abstraction and in-memory implementation
//! - [`hook`] - Business-effect callback applied once per settled payment
//! - [`handlers`] - Return-URL, IPN, and status-query handlers plus routing
//! - [`error`] - HTTP error mapping for the non-IPN endpoints

pub mod ack;
pub mod error;
pub mod handlers;
pub mod hook;
pub mod store;

pub use ack::IpnAck;
pub use error::HttpError;
pub use handlers::{AppState, router};
pub use hook::{NoopHook, PaymentHook};
pub use store::{Claim, MemoryStore, PaymentStatus, StoreError, TransactionStore};
