//! Records the server keeps: dogs and post timestamps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DogKind {
    Terrier,
    Bulldog,
    Dalmatian,
}

impl DogKind {
    pub const ALL: [DogKind; 3] = [DogKind::Terrier, DogKind::Bulldog, DogKind::Dalmatian];

    pub fn as_str(&self) -> &'static str {
        match self {
            DogKind::Terrier => "terrier",
            DogKind::Bulldog => "bulldog",
            DogKind::Dalmatian => "dalmatian",
        }
    }
}

impl fmt::Display for DogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Oops! No dog breed {0} in database.")]
pub struct UnknownDogKind(pub String);

/// Exact, case-sensitive match on the lowercase name.
impl FromStr for DogKind {
    type Err = UnknownDogKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DogKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownDogKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Dog {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub pk: i64,
    pub kind: DogKind,
}

impl Dog {
    pub fn new(name: impl Into<String>, pk: i64, kind: DogKind) -> Self {
        Self {
            name: name.into(),
            pk,
            kind,
        }
    }
}

/// One post-log entry. `timestamp` is seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub id: i64,
    pub timestamp: i64,
}
