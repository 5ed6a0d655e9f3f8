//! FFI bridge crate for Flutter integration.
//!
//! # Responsibility
//! - Host the use-case functions FRB exposes to the Dart screens.

pub mod api;
mod config;
