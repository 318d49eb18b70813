//! Identifier types used throughout Procura.
//!
//! Ids are namespaced by entity type: `<entity-type>-<unix-millis>-<suffix>`.
//! The random suffix keeps ids distinct when several are generated within
//! the same millisecond.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the random suffix appended to every generated id.
pub const SUFFIX_LEN: usize = 9;

/// Unique identifier for an entity within its entity-type collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a fresh id for the given entity type at the current time.
    #[must_use]
    pub fn generate(entity_type: &str) -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self::with_millis(entity_type, millis)
    }

    /// Generates an id with an explicit millisecond component.
    #[must_use]
    pub fn with_millis(entity_type: &str, millis: i64) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("{entity_type}-{millis}-{}", &random[..SUFFIX_LEN]))
    }

    /// Parses an id, checking that it has the `<type>-<millis>-<suffix>` shape.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let mut parts = s.rsplitn(3, '-');
        let suffix = parts.next().unwrap_or_default();
        let millis = parts.next().unwrap_or_default();
        let entity_type = parts.next().unwrap_or_default();

        if entity_type.is_empty() || suffix.is_empty() {
            return Err(Error::InvalidId(s.to_string()));
        }
        if millis.is_empty() || !millis.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the entity-type namespace this id was generated for.
    #[must_use]
    pub fn entity_type(&self) -> &str {
        self.0
            .rsplitn(3, '-')
            .nth(2)
            .unwrap_or(self.0.as_str())
    }

    /// Returns the millisecond component, if the id is well formed.
    #[must_use]
    pub fn millis(&self) -> Option<i64> {
        self.0.rsplitn(3, '-').nth(1).and_then(|m| m.parse().ok())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
