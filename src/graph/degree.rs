//! Precomputed entity degrees for one relation.
//!
//! The degree-threshold PCA strategy asks, per candidate entity, how many
//! facts of the head relation it already participates in. Computing that
//! table once per relation and sharing it read-only across rule evaluations
//! avoids re-querying the head relation for every candidate.

use std::collections::HashMap;

use crate::ident::{EntityId, RelationId};

use super::Triple;

/// Out- and in-degree per entity under a single relation, duplicates collapsed.
#[derive(Debug, Clone, Default)]
pub struct DegreeTable {
    degrees: HashMap<EntityId, (usize, usize)>,
}

impl DegreeTable {
    /// Build from the triples of one relation.
    ///
    /// Triples of other relations are ignored so a full-view slice can be
    /// passed directly.
    pub fn build(relation: RelationId, triples: &[Triple]) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut degrees: HashMap<EntityId, (usize, usize)> = HashMap::new();
        for triple in triples {
            if triple.predicate != relation || !seen.insert((triple.subject, triple.object)) {
                continue;
            }
            degrees.entry(triple.subject).or_default().0 += 1;
            degrees.entry(triple.object).or_default().1 += 1;
        }
        Self { degrees }
    }

    /// Out-degree (facts with the entity as subject), 0 when unseen.
    pub fn out_degree(&self, entity: EntityId) -> usize {
        self.degrees.get(&entity).map_or(0, |d| d.0)
    }

    /// In-degree (facts with the entity as object), 0 when unseen.
    pub fn in_degree(&self, entity: EntityId) -> usize {
        self.degrees.get(&entity).map_or(0, |d| d.1)
    }

    /// Whether the entity has any fact under the relation.
    pub fn contains(&self, entity: EntityId) -> bool {
        self.degrees.contains_key(&entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: u64, p: u64, o: u64) -> Triple {
        Triple::new(EntityId(s), RelationId(p), EntityId(o))
    }

    #[test]
    fn degrees_count_distinct_facts() {
        let triples = vec![t(1, 0, 2), t(1, 0, 3), t(1, 0, 3), t(2, 0, 3)];
        let table = DegreeTable::build(RelationId(0), &triples);

        assert_eq!(table.out_degree(EntityId(1)), 2);
        assert_eq!(table.in_degree(EntityId(3)), 2);
        assert_eq!(table.out_degree(EntityId(2)), 1);
        assert_eq!(table.in_degree(EntityId(2)), 1);
        assert_eq!(table.out_degree(EntityId(9)), 0);
    }

    #[test]
    fn other_relations_ignored() {
        let triples = vec![t(1, 0, 2), t(1, 5, 4)];
        let table = DegreeTable::build(RelationId(0), &triples);
        assert_eq!(table.out_degree(EntityId(1)), 1);
        assert!(!table.contains(EntityId(4)));
    }
}
