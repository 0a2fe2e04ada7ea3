//! Core types for lead intake.
//!
//! This module provides type-safe wrappers for the lead domain.

pub mod email;
pub mod id;
pub mod lead;

pub use email::{Email, EmailError, Recipients};
pub use id::*;
pub use lead::{Lead, NewLead};
