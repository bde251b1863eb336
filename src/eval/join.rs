//! Conjunctive body evaluation.

use crate::graph::index::TripleStore;
use crate::rule::{Atom, Var};

use super::{evaluate_atom, Bindings};

/// Evaluate a body conjunction, keyed by the functional variable.
///
/// Every atom shares the same pair of variables, so the conjunction is a
/// structural join: each atom's bindings are keyed identically and an
/// `(a,b)` pair survives only if every atom produced it. The single-atom
/// case degenerates to that atom's bindings.
pub fn evaluate_body(body: &[Atom], key: Var, store: &TripleStore) -> Bindings {
    let mut atoms = body.iter();
    let Some(first) = atoms.next() else {
        return Bindings::new();
    };
    let mut acc = evaluate_atom(first, key, store);
    for atom in atoms {
        if acc.is_empty() {
            break;
        }
        acc = acc.intersect(&evaluate_atom(atom, key, store));
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Triple;
    use crate::ident::{EntityId, RelationId};

    fn t(s: u64, p: u64, o: u64) -> Triple {
        Triple::new(EntityId(s), RelationId(p), EntityId(o))
    }

    #[test]
    fn single_atom_body_is_a_copy() {
        let store = TripleStore::build([t(1, 0, 2), t(1, 0, 3)]);
        let body = [Atom::forward(RelationId(0))];
        let bindings = evaluate_body(&body, Var::A, &store);
        assert_eq!(
            bindings,
            evaluate_atom(&Atom::forward(RelationId(0)), Var::A, &store)
        );
    }

    #[test]
    fn two_atom_body_intersects_pairs() {
        // p holds (1,2) and (1,3); q holds (1,3) and (4,5).
        // Only (1,3) satisfies p(a,b) & q(a,b).
        let store = TripleStore::build([t(1, 0, 2), t(1, 0, 3), t(1, 1, 3), t(4, 1, 5)]);
        let body = [Atom::forward(RelationId(0)), Atom::forward(RelationId(1))];
        let bindings = evaluate_body(&body, Var::A, &store);
        assert_eq!(bindings.pair_count(), 1);
        assert!(bindings.contains_pair(EntityId(1), EntityId(3)));
    }

    #[test]
    fn mixed_orientation_join() {
        // p(a,b) & q(b,a): q's subject is the b side.
        // p holds (1,2); q holds (2,1) -> pair (a=1, b=2) satisfies both.
        let store = TripleStore::build([t(1, 0, 2), t(2, 1, 1), t(3, 1, 1)]);
        let body = [Atom::forward(RelationId(0)), Atom::inverse(RelationId(1))];
        let bindings = evaluate_body(&body, Var::A, &store);
        assert_eq!(bindings.pair_count(), 1);
        assert!(bindings.contains_pair(EntityId(1), EntityId(2)));
    }

    #[test]
    fn missing_relation_empties_the_join() {
        let store = TripleStore::build([t(1, 0, 2)]);
        let body = [Atom::forward(RelationId(0)), Atom::forward(RelationId(9))];
        let bindings = evaluate_body(&body, Var::A, &store);
        assert!(bindings.is_empty());
    }

    #[test]
    fn empty_body_is_empty() {
        let store = TripleStore::build([t(1, 0, 2)]);
        assert!(evaluate_body(&[], Var::A, &store).is_empty());
    }
}
