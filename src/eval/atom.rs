//! Single-atom evaluation.

use crate::graph::index::TripleStore;
use crate::rule::{Atom, Var};

use super::Bindings;

/// Evaluate one atom against the store, keying the result by `key`.
///
/// Each (subject, object) pair of the atom's relation is assigned to the
/// variables `a`/`b` per the atom's orientation, then grouped by whichever
/// variable the caller designates. A relation absent from the store yields
/// an empty relation. Never mutates the store.
pub fn evaluate_atom(atom: &Atom, key: Var, store: &TripleStore) -> Bindings {
    let mut bindings = Bindings::new();
    let Some(index) = store.relation(atom.relation) else {
        return bindings;
    };
    for (subject, object) in index.pairs() {
        let (a, b) = match atom.subject {
            Var::A => (subject, object),
            Var::B => (object, subject),
        };
        match key {
            Var::A => bindings.insert(a, b),
            Var::B => bindings.insert(b, a),
        }
    }
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Triple;
    use crate::ident::{EntityId, RelationId};

    fn store() -> TripleStore {
        TripleStore::build([
            Triple::new(EntityId(1), RelationId(0), EntityId(2)),
            Triple::new(EntityId(1), RelationId(0), EntityId(3)),
            Triple::new(EntityId(4), RelationId(0), EntityId(5)),
        ])
    }

    #[test]
    fn forward_atom_keyed_by_a() {
        let bindings = evaluate_atom(&Atom::forward(RelationId(0)), Var::A, &store());
        assert_eq!(bindings.pair_count(), 3);
        assert_eq!(bindings.get(EntityId(1)).unwrap().len(), 2);
        assert!(bindings.contains_pair(EntityId(4), EntityId(5)));
    }

    #[test]
    fn forward_atom_keyed_by_b() {
        let bindings = evaluate_atom(&Atom::forward(RelationId(0)), Var::B, &store());
        // b is the object side, so keys are the objects.
        assert!(bindings.contains_pair(EntityId(2), EntityId(1)));
        assert!(bindings.contains_pair(EntityId(5), EntityId(4)));
        assert_eq!(bindings.key_count(), 3);
    }

    #[test]
    fn inverse_atom_swaps_variable_assignment() {
        // rel(b,a): subject binds to b, so keying by a groups by object.
        let bindings = evaluate_atom(&Atom::inverse(RelationId(0)), Var::A, &store());
        assert!(bindings.contains_pair(EntityId(2), EntityId(1)));
        assert!(bindings.contains_pair(EntityId(3), EntityId(1)));
        assert!(bindings.contains_pair(EntityId(5), EntityId(4)));
    }

    #[test]
    fn missing_relation_is_empty() {
        let bindings = evaluate_atom(&Atom::forward(RelationId(42)), Var::A, &store());
        assert!(bindings.is_empty());
    }
}
