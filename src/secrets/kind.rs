//! Backend identification and capability flags.
//!
//! Read-only backends answer mutations with a silent `Ok(())`. Callers that need
//! to know whether a write or delete actually took effect check
//! [`StoreCapabilities`] before relying on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of secret store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StoreKind {
    /// Static JSON snapshot loaded into memory
    Json,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
        }
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown secret store kind: {}", s)),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operations a backend meaningfully implements.
///
/// A `false` flag means the matching [`Store`](super::Store) method is a no-op
/// for that backend: `write`/`delete` return `Ok(())` without effect and
/// `history` returns an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreCapabilities {
    /// `read` honours the requested version
    pub versioning: bool,
    /// `history` returns recorded change events
    pub history: bool,
    /// `write` persists values
    pub write: bool,
    /// `delete` removes secrets
    pub delete: bool,
}

impl StoreCapabilities {
    /// Capabilities of a backend that only serves reads.
    pub const fn read_only() -> Self {
        Self { versioning: false, history: false, write: false, delete: false }
    }

    /// True if neither `write` nor `delete` has any effect.
    pub fn is_read_only(&self) -> bool {
        !self.write && !self.delete
    }
}
