//! Parallel batch evaluation of a rule set.
//!
//! Each rule's evaluation is self-contained: project the dict to the rule's
//! relations, build a throwaway store, compute metrics. Nothing is shared
//! mutably between rules, so the batch runs across the rayon pool. The only
//! shared structure is the per-relation degree cache, which is computed once
//! and read-only afterwards.

use std::sync::Arc;

use dashmap::DashMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::graph::degree::DegreeTable;
use crate::graph::index::TripleStore;
use crate::graph::view::view_for_rule;
use crate::graph::TripleDict;
use crate::ident::RelationId;
use crate::rule::{Atom, Rule, Var};

use super::{Metrics, MetricsCalculator, PcaStrategy};

/// Configuration for batch evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalConfig {
    /// PCA denominator strategy applied to every rule.
    pub strategy: PcaStrategy,
}

/// Measured metrics for one rule, alongside the miner's claimed values.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    /// Printable rule identifier.
    pub id: String,
    /// Head coverage claimed in the rule file.
    pub claimed_hc: f64,
    /// PCA confidence claimed in the rule file.
    pub claimed_pca: f64,
    /// Metrics measured by this engine.
    pub metrics: Metrics,
}

/// Evaluates many rules against one triple dict.
pub struct BatchEvaluator<'a> {
    dict: &'a TripleDict,
    config: EvalConfig,
    degree_cache: DashMap<RelationId, Arc<DegreeTable>>,
}

impl<'a> BatchEvaluator<'a> {
    pub fn new(dict: &'a TripleDict, config: EvalConfig) -> Self {
        Self {
            dict,
            config,
            degree_cache: DashMap::new(),
        }
    }

    /// Degree table for one relation, computed on first use and shared.
    fn degrees_for(&self, relation: RelationId) -> Arc<DegreeTable> {
        self.degree_cache
            .entry(relation)
            .or_insert_with(|| {
                Arc::new(DegreeTable::build(relation, self.dict.triples_for(relation)))
            })
            .clone()
    }

    /// Evaluate one rule against its own view of the dict.
    pub fn evaluate_rule(&self, rule: &Rule) -> RuleOutcome {
        if self.dict.triples_for(rule.head.relation).is_empty() {
            warn!(rule = %rule.id(), "head relation has no triples; metrics will be NaN");
        }

        let view = view_for_rule(self.dict, rule);
        let store = TripleStore::build(view);
        let calc = MetricsCalculator::new(&store);

        let metrics = match self.config.strategy {
            PcaStrategy::Enumerative => calc.compute(rule, PcaStrategy::Enumerative, None),
            PcaStrategy::DegreeThreshold => {
                let degrees = self.degrees_for(rule.head.relation);
                calc.compute(rule, PcaStrategy::DegreeThreshold, Some(&degrees))
            }
        };

        debug!(
            rule = %rule.id(),
            support = metrics.support,
            hc = metrics.head_coverage,
            pca = metrics.pca_confidence,
            "evaluated rule"
        );

        RuleOutcome {
            id: rule.id(),
            claimed_hc: rule.head_coverage,
            claimed_pca: rule.pca_confidence,
            metrics,
        }
    }

    /// Evaluate all rules across the rayon pool, preserving input order.
    pub fn evaluate_all(&self, rules: &[Rule]) -> Vec<RuleOutcome> {
        info!(
            rules = rules.len(),
            triples = self.dict.len(),
            strategy = %self.config.strategy,
            "starting batch evaluation"
        );
        let outcomes: Vec<RuleOutcome> =
            rules.par_iter().map(|rule| self.evaluate_rule(rule)).collect();
        info!(rules = outcomes.len(), "batch evaluation finished");
        outcomes
    }

    /// Inverse test for one relation: `rel(a,b) <= rel(b,a)` under the
    /// anti-join. High support means the relation is largely asymmetric.
    pub fn evaluate_asymmetry(&self, relation: RelationId, functional_var: Var) -> Metrics {
        let rule = Rule {
            head: Atom::forward(relation),
            body: vec![Atom::inverse(relation)],
            functional_var,
            head_coverage: 0.0,
            pca_confidence: 0.0,
        };

        let view = view_for_rule(self.dict, &rule);
        let store = TripleStore::build(view);
        let calc = MetricsCalculator::new(&store);
        let degrees = self.degrees_for(relation);
        calc.compute_asymmetry(&rule, Some(&degrees))
    }

    /// Asymmetry metrics for every relation in the dict, in parallel.
    pub fn evaluate_all_asymmetries(&self, functional_var: Var) -> Vec<(RelationId, Metrics)> {
        let mut relations: Vec<RelationId> = self.dict.relations().collect();
        relations.sort_unstable();
        relations
            .into_par_iter()
            .map(|rel| (rel, self.evaluate_asymmetry(rel, functional_var)))
            .collect()
    }
}
