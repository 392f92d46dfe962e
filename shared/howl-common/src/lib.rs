//! Howl Common Library
//!
//! Wire types for the platform's webhook interaction API, shared by the
//! framework and by consumers building payloads.

pub mod types;

pub use types::*;
