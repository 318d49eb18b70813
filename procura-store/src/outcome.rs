use procura_model::Entity;

use crate::error::{StoreError, StoreResult};

/// Result of [`crate::EntityStore::import`].
///
/// Import never propagates an error: a payload that cannot be decoded creates
/// nothing and comes back as `Failed`, so callers that only care about the
/// created entities can use [`ImportOutcome::entities`] unconditionally.
#[derive(Debug)]
pub enum ImportOutcome<T> {
    Imported(Vec<Entity<T>>),
    Failed(StoreError),
}

impl<T> ImportOutcome<T> {
    /// Newly created entities; empty on failure.
    pub fn entities(&self) -> &[Entity<T>] {
        match self {
            Self::Imported(entities) => entities,
            Self::Failed(_) => &[],
        }
    }

    pub fn into_entities(self) -> Vec<Entity<T>> {
        match self {
            Self::Imported(entities) => entities,
            Self::Failed(_) => Vec::new(),
        }
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Imported(_) => None,
            Self::Failed(e) => Some(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Imported(_))
    }

    pub fn len(&self) -> usize {
        self.entities().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities().is_empty()
    }

    pub fn into_result(self) -> StoreResult<Vec<Entity<T>>> {
        match self {
            Self::Imported(entities) => Ok(entities),
            Self::Failed(e) => Err(e),
        }
    }
}
