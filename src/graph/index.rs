//! In-memory triple store with per-relation directional indices.
//!
//! Built once per rule evaluation from a filtered triple view, read-only
//! thereafter. Each relation gets a forward (subject → objects) and backward
//! (object → subjects) adjacency; duplicate triples collapse under set
//! semantics.

use std::collections::{HashMap, HashSet};

use crate::error::GraphError;
use crate::ident::{EntityId, RelationId};

use super::Triple;

/// Forward and backward adjacency for one relation.
#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    forward: HashMap<EntityId, HashSet<EntityId>>,
    backward: HashMap<EntityId, HashSet<EntityId>>,
    pair_count: usize,
}

impl RelationIndex {
    fn insert(&mut self, subject: EntityId, object: EntityId) {
        if self.forward.entry(subject).or_default().insert(object) {
            self.pair_count += 1;
        }
        self.backward.entry(object).or_default().insert(subject);
    }

    /// Objects reachable from `subject` under this relation.
    pub fn objects_of(&self, subject: EntityId) -> Option<&HashSet<EntityId>> {
        self.forward.get(&subject)
    }

    /// Subjects reaching `object` under this relation.
    pub fn subjects_of(&self, object: EntityId) -> Option<&HashSet<EntityId>> {
        self.backward.get(&object)
    }

    /// Distinct (subject, object) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (EntityId, EntityId)> + '_ {
        self.forward
            .iter()
            .flat_map(|(s, objs)| objs.iter().map(move |o| (*s, *o)))
    }

    /// Number of distinct pairs.
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }
}

/// Read-only triple store: relation indices plus the entity universe.
#[derive(Debug, Clone, Default)]
pub struct TripleStore {
    relations: HashMap<RelationId, RelationIndex>,
    entities: HashSet<EntityId>,
}

impl TripleStore {
    /// Index a triple sequence.
    pub fn build(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut store = Self::default();
        for triple in triples {
            store
                .relations
                .entry(triple.predicate)
                .or_default()
                .insert(triple.subject, triple.object);
            store.entities.insert(triple.subject);
            store.entities.insert(triple.object);
        }
        store
    }

    /// Validate and index raw (subject, predicate, object) rows.
    ///
    /// Rejects the whole build on the first malformed identifier; the store
    /// never silently skips bad input.
    pub fn build_raw(
        raw: impl IntoIterator<Item = (i64, i64, i64)>,
    ) -> Result<Self, GraphError> {
        let triples = raw
            .into_iter()
            .map(|(s, p, o)| Triple::from_raw(s, p, o))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::build(triples))
    }

    /// Count of distinct entities across all indexed relations.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Whether the given relation has any indexed triples.
    pub fn has_relation(&self, relation: RelationId) -> bool {
        self.relations.contains_key(&relation)
    }

    /// The index for one relation, if present.
    pub fn relation(&self, relation: RelationId) -> Option<&RelationIndex> {
        self.relations.get(&relation)
    }

    /// `|forward[relation][e]|`, 0 when absent.
    pub fn out_degree(&self, entity: EntityId, relation: RelationId) -> usize {
        self.relations
            .get(&relation)
            .and_then(|idx| idx.objects_of(entity))
            .map_or(0, HashSet::len)
    }

    /// `|backward[relation][e]|`, 0 when absent.
    pub fn in_degree(&self, entity: EntityId, relation: RelationId) -> usize {
        self.relations
            .get(&relation)
            .and_then(|idx| idx.subjects_of(entity))
            .map_or(0, HashSet::len)
    }

    /// Total distinct triples.
    pub fn triple_count(&self) -> usize {
        self.relations.values().map(RelationIndex::pair_count).sum()
    }

    /// All entities in the universe.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: u64, p: u64, o: u64) -> Triple {
        Triple::new(EntityId(s), RelationId(p), EntityId(o))
    }

    #[test]
    fn build_and_query() {
        let store = TripleStore::build([t(1, 0, 2), t(1, 0, 3), t(4, 0, 5)]);

        assert_eq!(store.entity_count(), 5);
        assert_eq!(store.triple_count(), 3);
        assert!(store.has_relation(RelationId(0)));
        assert!(!store.has_relation(RelationId(1)));

        let idx = store.relation(RelationId(0)).unwrap();
        let objs = idx.objects_of(EntityId(1)).unwrap();
        assert_eq!(objs.len(), 2);
        let subs = idx.subjects_of(EntityId(5)).unwrap();
        assert!(subs.contains(&EntityId(4)));
    }

    #[test]
    fn duplicate_triples_collapse() {
        let store = TripleStore::build([t(1, 0, 2), t(1, 0, 2), t(1, 0, 2)]);
        assert_eq!(store.triple_count(), 1);
        assert_eq!(store.out_degree(EntityId(1), RelationId(0)), 1);
    }

    #[test]
    fn degrees_default_to_zero() {
        let store = TripleStore::build([t(1, 0, 2)]);
        assert_eq!(store.out_degree(EntityId(2), RelationId(0)), 0);
        assert_eq!(store.out_degree(EntityId(9), RelationId(0)), 0);
        assert_eq!(store.in_degree(EntityId(1), RelationId(0)), 0);
        assert_eq!(store.in_degree(EntityId(2), RelationId(7)), 0);
    }

    #[test]
    fn entity_universe_spans_relations() {
        let store = TripleStore::build([t(1, 0, 2), t(3, 1, 4)]);
        assert_eq!(store.entity_count(), 4);
        let mut entities: Vec<_> = store.entities().map(EntityId::get).collect();
        entities.sort_unstable();
        assert_eq!(entities, vec![1, 2, 3, 4]);
    }

    #[test]
    fn build_raw_rejects_malformed() {
        let err = TripleStore::build_raw([(1, 0, 2), (-4, 0, 5)]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidTriple { subject: -4, .. }));

        let store = TripleStore::build_raw([(1, 0, 2), (4, 0, 5)]).unwrap();
        assert_eq!(store.triple_count(), 2);
    }

    #[test]
    fn pairs_iterates_distinct() {
        let store = TripleStore::build([t(1, 0, 2), t(1, 0, 2), t(2, 0, 3)]);
        let pairs: HashSet<_> = store.relation(RelationId(0)).unwrap().pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&(EntityId(1), EntityId(2))));
    }
}
