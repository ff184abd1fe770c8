#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Library surface of the merchant callback server.
//!
//! The binary in `main.rs` wires these pieces together; they are exposed
//! as a library so deployments can embed the same configuration loading
//! and hook into their own servers.

pub mod config;
pub mod hook;
