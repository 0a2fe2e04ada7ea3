//! Notification addresses.
//!
//! These types cover the operator-configured sender and recipients of lead
//! notifications. Addresses submitted through the contact form are stored as
//! plain strings and never pass through [`Email::parse`].

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`] or [`Recipients`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// A recipient list contained no addresses.
    #[error("at least one recipient is required")]
    NoRecipients,
}

/// An email address.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - Must contain an @ symbol
/// - Local part (before @) must not be empty
/// - Domain part (after @) must not be empty
///
/// ## Examples
///
/// ```
/// use lead_intake_core::Email;
///
/// assert!(Email::parse("sales@example.com").is_ok());
/// assert!(Email::parse("no-at-symbol").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 254 characters
    /// - Does not contain an @ symbol
    /// - Has an empty local part or domain
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let at_pos = s.find('@').ok_or(EmailError::MissingAtSymbol)?;

        if at_pos == 0 {
            return Err(EmailError::EmptyLocalPart);
        }

        if at_pos == s.len() - 1 {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-empty list of notification recipients.
///
/// Parsed from a comma-separated string such as
/// `"sales@example.com, owner@example.com"`. Blank entries are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipients(Vec<Email>);

impl Recipients {
    /// Parse a comma-separated recipient list.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::NoRecipients`] if no addresses are present, or the
    /// parse error of the first malformed address.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let addresses = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Email::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(addresses)
    }

    /// Build a recipient list from already-parsed addresses.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::NoRecipients`] if `addresses` is empty.
    pub fn new(addresses: Vec<Email>) -> Result<Self, EmailError> {
        if addresses.is_empty() {
            return Err(EmailError::NoRecipients);
        }
        Ok(Self(addresses))
    }

    /// Iterate over the recipient addresses.
    pub fn iter(&self) -> std::slice::Iter<'_, Email> {
        self.0.iter()
    }

    /// Number of recipients (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Recipients {
    type Item = &'a Email;
    type IntoIter = std::slice::Iter<'a, Email>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Recipients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(Email::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}
