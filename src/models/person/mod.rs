//! Person Module
//!
//! The phonebook's single entity and the request shapes that lead to it.

pub mod validators;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceError;

/// Storage-assigned identifier. Canonical hyphenated UUID on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for PersonId {
    type Err = ServiceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.len() != uuid::fmt::Hyphenated::LENGTH {
            return Err(ServiceError::malformed_id(raw));
        }
        Uuid::try_parse(raw)
            .map(PersonId)
            .map_err(|_| ServiceError::malformed_id(raw))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub id: PersonId,
    pub content: String,
    pub number: String,
}

impl PersonRecord {
    pub fn from_draft(id: PersonId, draft: PersonDraft) -> Self {
        PersonRecord {
            id,
            content: draft.content,
            number: draft.number,
        }
    }
}

/// Raw mutation body. Unknown keys are ignored; `null` counts as absent.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PersonInput {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

/// Field selection of a request body, not yet checked against the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    pub content: String,
    pub number: Option<String>,
}

/// A field-validated person waiting for an id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub content: String,
    pub number: String,
}
