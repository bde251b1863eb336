//! Knowledge graph data: triples, the by-predicate dict, and per-rule stores.
//!
//! Triples are grouped by predicate into a [`TripleDict`] once at load time.
//! Each rule evaluation then projects the dict down to the relations it
//! references ([`view`]) and builds a throwaway read-only [`index::TripleStore`]
//! from the projection. Build, read, discard; nothing here persists.

pub mod degree;
pub mod index;
pub mod view;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::ident::{EntityId, RelationId};

/// A (subject, predicate, object) triple in the knowledge graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// The subject of the triple.
    pub subject: EntityId,
    /// The predicate (relation) of the triple.
    pub predicate: RelationId,
    /// The object of the triple.
    pub object: EntityId,
}

impl Triple {
    /// Create a triple from already-validated identifiers.
    pub fn new(subject: EntityId, predicate: RelationId, object: EntityId) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Validate a raw triple as read from a file.
    ///
    /// Rejects negative identifiers with [`GraphError::InvalidTriple`].
    pub fn from_raw(subject: i64, predicate: i64, object: i64) -> Result<Self, GraphError> {
        if subject < 0 || predicate < 0 || object < 0 {
            return Err(GraphError::InvalidTriple {
                subject,
                predicate,
                object,
            });
        }
        Ok(Self {
            subject: EntityId(subject as u64),
            predicate: RelationId(predicate as u64),
            object: EntityId(object as u64),
        })
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

/// All loaded triples, grouped by predicate.
///
/// This is the shape rule views are drawn from: a rule touches a handful of
/// relations, so its view is a few dict lookups instead of a scan.
#[derive(Debug, Clone, Default)]
pub struct TripleDict {
    by_predicate: HashMap<RelationId, Vec<Triple>>,
    len: usize,
}

impl TripleDict {
    /// Create an empty dict.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a triple sequence by predicate.
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut dict = Self::new();
        dict.extend(triples);
        dict
    }

    /// Add triples to the dict.
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) {
        for triple in triples {
            self.by_predicate
                .entry(triple.predicate)
                .or_default()
                .push(triple);
            self.len += 1;
        }
    }

    /// Triples of one relation. Empty slice when the relation is unknown.
    pub fn triples_for(&self, relation: RelationId) -> &[Triple] {
        self.by_predicate
            .get(&relation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All relations present.
    pub fn relations(&self) -> impl Iterator<Item = RelationId> + '_ {
        self.by_predicate.keys().copied()
    }

    /// Total triple count, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the dict holds no triples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: u64, p: u64, o: u64) -> Triple {
        Triple::new(EntityId(s), RelationId(p), EntityId(o))
    }

    #[test]
    fn from_raw_rejects_negatives() {
        assert!(Triple::from_raw(-1, 0, 2).is_err());
        assert!(Triple::from_raw(1, -2, 2).is_err());
        assert!(Triple::from_raw(1, 0, -3).is_err());
        assert_eq!(Triple::from_raw(1, 0, 2).unwrap(), t(1, 0, 2));
    }

    #[test]
    fn dict_groups_by_predicate() {
        let dict = TripleDict::from_triples([t(1, 0, 2), t(1, 0, 3), t(4, 1, 5)]);
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.triples_for(RelationId(0)).len(), 2);
        assert_eq!(dict.triples_for(RelationId(1)).len(), 1);
        assert!(dict.triples_for(RelationId(9)).is_empty());
    }

    #[test]
    fn empty_dict() {
        let dict = TripleDict::new();
        assert!(dict.is_empty());
        assert_eq!(dict.relations().count(), 0);
    }
}
