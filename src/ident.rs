//! Identifier types for the seshat engine.
//!
//! Entities and relations are opaque integers assigned by whatever produced
//! the triple files (a dataset's `entity2id`/`relation2id` mapping). They
//! carry no attributes beyond identity, so they are plain `u64` newtypes.
//! Raw input arrives as signed text; [`EntityId::from_raw`] and
//! [`RelationId::from_raw`] reject negative values.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Identifier of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Validate a raw signed identifier as read from a triple file.
    pub fn from_raw(raw: i64) -> Result<Self, GraphError> {
        u64::try_from(raw)
            .map(EntityId)
            .map_err(|_| GraphError::InvalidIdentifier { raw })
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RelationId(pub u64);

impl RelationId {
    /// Validate a raw signed identifier as read from a triple or rule file.
    pub fn from_raw(raw: i64) -> Result<Self, GraphError> {
        u64::try_from(raw)
            .map(RelationId)
            .map_err(|_| GraphError::InvalidIdentifier { raw })
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_raw_rejected() {
        assert!(EntityId::from_raw(-1).is_err());
        assert!(RelationId::from_raw(-7).is_err());
    }

    #[test]
    fn non_negative_raw_accepted() {
        assert_eq!(EntityId::from_raw(0).unwrap().get(), 0);
        assert_eq!(EntityId::from_raw(42).unwrap().get(), 42);
        assert_eq!(RelationId::from_raw(3).unwrap().get(), 3);
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(EntityId(5).to_string(), "5");
        assert_eq!(RelationId(11).to_string(), "11");
    }
}
