//! Per-rule projection of the triple dict.
//!
//! A rule only ever touches the relations named by its atoms, so each
//! evaluation works against a view holding exactly those triples. Views are
//! independent of one another, which is what makes batch evaluation
//! embarrassingly parallel.

use std::collections::HashSet;

use crate::rule::Rule;

use super::{Triple, TripleDict};

/// Deduplicated union of the triples of every relation the rule references.
///
/// A relation absent from the dict contributes nothing; the downstream
/// evaluators treat the missing relation as an empty binding relation rather
/// than an error.
pub fn view_for_rule(dict: &TripleDict, rule: &Rule) -> Vec<Triple> {
    let mut seen: HashSet<Triple> = HashSet::new();
    let mut out = Vec::new();
    for relation in rule.relations() {
        for triple in dict.triples_for(relation) {
            if seen.insert(*triple) {
                out.push(*triple);
            }
        }
    }
    out
}
