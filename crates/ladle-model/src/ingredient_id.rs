//! Composite ingredient identifiers.
//!
//! A basic ingredient id carries three dot-separated segments,
//! `<kind>.<owner>.<stamp>` (e.g. `bi.u7.9a1`):
//!
//! - `kind` — ingredient-type code
//! - `owner` — code of the owning recipe/user
//! - `stamp` — lowercase base-36 of the mint time in milliseconds
//!
//! Encoding and decoding are deterministic and side-effect-free. Decoding
//! fails unless the id splits into exactly three recognizable segments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("malformed ingredient id '{0}': expected <kind>.<owner>.<stamp>")]
    Malformed(String),
    #[error("ingredient id segment '{0}' must be non-empty lowercase alphanumeric")]
    BadSegment(String),
}

/// A decoded composite ingredient id. Serializes as its text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IngredientId {
    kind: String,
    owner: String,
    stamp: String,
}

impl IngredientId {
    pub fn new(kind: &str, owner: &str, stamp: &str) -> Result<Self, IdError> {
        for segment in [kind, owner, stamp] {
            if !valid_segment(segment) {
                return Err(IdError::BadSegment(segment.to_string()));
            }
        }
        Ok(Self {
            kind: kind.to_string(),
            owner: owner.to_string(),
            stamp: stamp.to_string(),
        })
    }

    /// Encode a fresh id whose stamp derives from `at`.
    pub fn mint(kind: &str, owner: &str, at: DateTime<Utc>) -> Result<Self, IdError> {
        let millis = at.timestamp_millis().max(0) as u64;
        Self::new(kind, owner, &base36(millis))
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.kind, self.owner, self.stamp)
    }
}

impl FromStr for IngredientId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        let [kind, owner, stamp] = segments[..] else {
            return Err(IdError::Malformed(s.to_string()));
        };
        Self::new(kind, owner, stamp)
    }
}

impl TryFrom<String> for IngredientId {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IngredientId> for String {
    fn from(id: IngredientId) -> Self {
        id.to_string()
    }
}

fn valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}
