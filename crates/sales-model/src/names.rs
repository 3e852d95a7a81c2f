//! Customer names.
//!
//! Customers are identified by their "First Last" string both at build time
//! and at query time. Two customers sharing a full name collapse onto the
//! same key.

use std::fmt;

/// A full name split on its first space.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomerName {
    pub first: String,
    pub last: String,
}

impl CustomerName {
    /// Splits `"Jane van Doe"` into `("Jane", "van Doe")`.
    ///
    /// Returns `None` when the trimmed name has no space.
    pub fn split(full: &str) -> Option<Self> {
        let (first, last) = full.trim().split_once(' ')?;
        Some(Self {
            first: first.trim().to_string(),
            last: last.trim().to_string(),
        })
    }

    /// The lookup key: first and last joined by one space.
    pub fn key(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}
