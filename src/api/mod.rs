//! HTTP API
//!
//! Router, handlers and error responses of the relay.

pub mod endpoints;
pub mod error;
