// src/domain.rs
//! Domain types: the identifier shape rule and the records that flow out of the core

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::consts::DEFAULT_IDENTIFIER_LENGTH;
use crate::error::{CoreError, Result};

/// Shape rule for the identifier class: fixed length, ASCII digits only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierRule {
    pub length: usize,
}

impl Default for IdentifierRule {
    fn default() -> Self {
        Self {
            length: DEFAULT_IDENTIFIER_LENGTH,
        }
    }
}

impl IdentifierRule {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.validation.identifier_length)
    }

    pub fn validate<'a>(&self, candidate: &'a str) -> Result<&'a str> {
        let len = candidate.chars().count();
        if len != self.length {
            return Err(CoreError::DomainValidation {
                field: "identifier",
                reason: format!("must be exactly {} characters, got {len}", self.length),
            });
        }
        if !candidate.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::DomainValidation {
                field: "identifier",
                reason: "must contain only ASCII digits".into(),
            });
        }
        Ok(candidate)
    }
}

/// A persisted row as the store hands it back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub id: i64,
    pub storage_envelope: String,
    pub index_token: String,
    pub created_at: DateTime<Utc>,
}

/// Acknowledgement of a successful submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitReceipt {
    pub id: i64,
}

/// One decrypted search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileMatch {
    pub id: i64,
    pub identifier: String,
}

/// A matching row whose envelope could not be opened
#[derive(Debug)]
pub struct UnreadableRecord {
    pub id: i64,
    pub error: CoreError,
}

/// Search output: decrypted hits in id order plus rows that failed to decrypt
#[derive(Debug, Default)]
pub struct SearchResults {
    pub matches: Vec<ProfileMatch>,
    pub unreadable: Vec<UnreadableRecord>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.unreadable.is_empty()
    }

    /// Fail closed: the first unreadable row becomes the error.
    pub fn into_strict(self) -> Result<Vec<ProfileMatch>> {
        match self.unreadable.into_iter().next() {
            Some(failed) => Err(failed.error),
            None => Ok(self.matches),
        }
    }
}
