//! API data models
//!
//! This module contains the JSON bodies exchanged with relay clients.

pub mod vapi;
