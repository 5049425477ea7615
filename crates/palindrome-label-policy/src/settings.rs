use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palindrome::is_palindrome;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("{field} is not a palindrome, it could not be used as allowed palindrome")]
pub(crate) struct AllowedPalindromeError {
    pub field: String,
}

/// Policy settings: the label keys that are palindromes but are explicitly
/// tolerated. The list may be empty or omitted from the settings document.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Settings {
    pub allowed_palindromes: Vec<String>,
}

impl Settings {
    /// Ensures every entry of the allow-list is itself a palindrome. Stops at
    /// the first entry that is not.
    pub(crate) fn validate(&self) -> Result<(), AllowedPalindromeError> {
        for entry in &self.allowed_palindromes {
            if !is_palindrome(entry) {
                return Err(AllowedPalindromeError {
                    field: entry.clone(),
                });
            }
        }
        Ok(())
    }

    /// Exact membership test against the allow-list. The match is
    /// case-sensitive on purpose: allowed entries are trusted literally,
    /// while the palindrome check itself ignores case.
    pub(crate) fn is_an_allowed_palindrome(&self, candidate: &str) -> bool {
        self.allowed_palindromes
            .iter()
            .any(|allowed| allowed == candidate)
    }
}
