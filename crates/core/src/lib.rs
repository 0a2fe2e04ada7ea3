//! Lead Intake Core - Shared domain types.
//!
//! This crate provides the types used across all lead intake components:
//! - `server` - HTTP endpoint that records leads and notifies staff
//! - `cli` - Command-line tools for the `leads` table
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Lead records, type-safe IDs and notification addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
