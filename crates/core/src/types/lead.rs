//! Lead records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::LeadId;

/// A contact-form submission that has not been stored yet.
///
/// Every field is optional and carried verbatim: no trimming, format or
/// length checks. `name`, `email` and `phone` are required by the `leads`
/// table's NOT NULL constraints, so a missing value surfaces as a store error
/// on insert rather than as a validation error here. Present values must be
/// JSON strings; numbers or booleans are rejected instead of coerced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLead {
    /// Contact name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email, unvalidated.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone, unvalidated.
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-form message.
    #[serde(default)]
    pub message: Option<String>,
    /// What the enquiry is about (e.g. "Custom Tour").
    #[serde(default, rename = "enquiryFor")]
    pub enquiry_for: Option<String>,
}

/// A lead as persisted in the `leads` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    #[serde(rename = "enquiryFor")]
    pub enquiry_for: Option<String>,
    pub created_at: DateTime<Utc>,
}
