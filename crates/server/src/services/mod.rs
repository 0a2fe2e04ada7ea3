//! Business logic services.
//!
//! # Services
//!
//! - `intake` - Lead submission: persist, then notify
//! - `notify` - Staff notification email (Brevo API or SMTP)

pub mod intake;
pub mod notify;

pub use intake::{LeadIntake, SubmitOutcome};
pub use notify::{Notification, Notifier, NotifyError};
