//! Ordered participant list
//!
//! The order members are configured in is the only tie-break used when
//! planning settlements, so this is a sequence, not a set.

use serde::{Deserialize, Serialize};

use crate::error::{KakeiboError, KakeiboResult};

/// A fixed, ordered, non-empty list of distinct participant names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParticipantSet {
    members: Vec<String>,
}

impl ParticipantSet {
    /// Build a participant set, rejecting empty, blank or duplicate names
    pub fn new<I, S>(members: I) -> KakeiboResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: Vec<String> = Vec::new();
        for member in members {
            let name = member.into().trim().to_string();
            if name.is_empty() {
                return Err(KakeiboError::Config(
                    "participant names cannot be blank".into(),
                ));
            }
            if seen.contains(&name) {
                return Err(KakeiboError::Config(format!(
                    "participant '{}' is listed more than once",
                    name
                )));
            }
            seen.push(name);
        }

        if seen.is_empty() {
            return Err(KakeiboError::Config(
                "at least one participant must be configured".into(),
            ));
        }

        Ok(Self { members: seen })
    }

    /// Number of participants (never zero)
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check membership
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Iterate in configured order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    /// Names in configured order
    pub fn as_slice(&self) -> &[String] {
        &self.members
    }
}

impl<'de> Deserialize<'de> for ParticipantSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let members = Vec::<String>::deserialize(deserializer)?;
        ParticipantSet::new(members).map_err(serde::de::Error::custom)
    }
}
