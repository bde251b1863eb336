//! Support, head coverage, and PCA confidence for one rule.

use tracing::trace;

use crate::graph::degree::DegreeTable;
use crate::graph::index::TripleStore;
use crate::rule::{Rule, Var};

use super::{evaluate_atom, evaluate_body, Bindings, Metrics, PcaStrategy};

/// Computes metrics for rules against one read-only store.
///
/// The store is expected to be the rule's filtered view; building one per
/// rule keeps evaluations independent and lock-free.
pub struct MetricsCalculator<'a> {
    store: &'a TripleStore,
}

impl<'a> MetricsCalculator<'a> {
    pub fn new(store: &'a TripleStore) -> Self {
        Self { store }
    }

    /// Compute support, head coverage, and PCA confidence.
    ///
    /// `degrees` feeds the degree-threshold strategy; when `None` the head
    /// relation's degrees are read from the store itself, which is
    /// equivalent for a view that contains the head relation.
    pub fn compute(
        &self,
        rule: &Rule,
        strategy: PcaStrategy,
        degrees: Option<&DegreeTable>,
    ) -> Metrics {
        let body = evaluate_body(&rule.body, rule.functional_var, self.store);
        let head = evaluate_atom(&rule.head, rule.functional_var, self.store);

        let total_heads = head.pair_count() as u64;
        let support = Self::overlap(&head, &body);
        let pca_denominator = match strategy {
            PcaStrategy::Enumerative => Self::enumerative_denominator(&head, &body),
            PcaStrategy::DegreeThreshold => self.degree_denominator(rule, degrees),
        };

        trace!(
            rule = %rule.id(),
            support,
            total_heads,
            pca_denominator,
            "computed rule metrics"
        );

        Metrics::from_counts(support, total_heads, pca_denominator)
    }

    /// Asymmetry test: how often the body holds where the head does not.
    ///
    /// Support is the anti-join of body pairs against head pairs; the head
    /// universe is every ordered entity pair lacking a head fact; the PCA
    /// denominator uses the degree-threshold machinery.
    pub fn compute_asymmetry(&self, rule: &Rule, degrees: Option<&DegreeTable>) -> Metrics {
        let body = evaluate_body(&rule.body, rule.functional_var, self.store);
        let head = evaluate_atom(&rule.head, rule.functional_var, self.store);

        let body_pairs = body.pair_count() as u64;
        let support = body_pairs - Self::overlap(&head, &body);

        let entity_count = self.store.entity_count() as u64;
        let total_heads = entity_count * entity_count - head.pair_count() as u64;

        let pca_denominator = self.degree_denominator(rule, degrees);

        Metrics::from_counts(support, total_heads, pca_denominator)
    }

    /// Distinct pairs present in both relations.
    fn overlap(head: &Bindings, body: &Bindings) -> u64 {
        let mut count = 0u64;
        for (key, head_values) in head.iter() {
            if let Some(body_values) = body.get(key) {
                count += head_values.intersection(body_values).count() as u64;
            }
        }
        count
    }

    /// Exact PCA denominator: for every functional value with a known head
    /// fact, the body's predictions for that value are the candidate
    /// universe.
    fn enumerative_denominator(head: &Bindings, body: &Bindings) -> u64 {
        head.iter()
            .filter_map(|(key, _)| body.get(key))
            .map(|values| values.len() as u64)
            .sum()
    }

    /// Approximate PCA denominator: one count per distinct pair of the first
    /// body atom whose functional value is not yet linked to every other
    /// entity under the head relation.
    fn degree_denominator(&self, rule: &Rule, degrees: Option<&DegreeTable>) -> u64 {
        let Some(first) = rule.body.first() else {
            return 0;
        };
        let candidates = evaluate_atom(first, rule.functional_var, self.store);
        let entity_count = self.store.entity_count();
        let head_rel = rule.head.relation;

        let mut denominator = 0u64;
        for (value, others) in candidates.iter() {
            let degree = match (rule.functional_var, degrees) {
                (Var::A, Some(table)) => table.out_degree(value),
                (Var::B, Some(table)) => table.in_degree(value),
                (Var::A, None) => self.store.out_degree(value, head_rel),
                (Var::B, None) => self.store.in_degree(value, head_rel),
            };
            if entity_count > degree {
                denominator += others.len() as u64;
            }
        }
        denominator
    }
}
