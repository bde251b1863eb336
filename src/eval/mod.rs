//! Rule-quality evaluation: bindings, metrics, and the PCA strategies.
//!
//! The evaluators are pure projections of a read-only [`TripleStore`]:
//! an atom yields a [`Bindings`] relation, a body conjunction intersects
//! its atoms' bindings, and the metrics calculator turns body and head
//! bindings into support, head coverage, and PCA confidence.
//!
//! [`TripleStore`]: crate::graph::index::TripleStore

pub mod atom;
pub mod batch;
pub mod join;
pub mod metrics;

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::Serialize;

use crate::ident::EntityId;

pub use atom::evaluate_atom;
pub use batch::{BatchEvaluator, EvalConfig, RuleOutcome};
pub use join::evaluate_body;
pub use metrics::MetricsCalculator;

/// A binding relation: functional-variable value → set of non-functional values.
///
/// The canonical intermediate form produced by both body and head
/// evaluation. Set semantics throughout, so re-evaluation never
/// double-counts a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    map: HashMap<EntityId, HashSet<EntityId>>,
}

impl Bindings {
    /// Create an empty binding relation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one (key, value) pair.
    pub fn insert(&mut self, key: EntityId, value: EntityId) {
        self.map.entry(key).or_default().insert(value);
    }

    /// The value set bound to a key.
    pub fn get(&self, key: EntityId) -> Option<&HashSet<EntityId>> {
        self.map.get(&key)
    }

    /// Whether the exact pair is present.
    pub fn contains_pair(&self, key: EntityId, value: EntityId) -> bool {
        self.map.get(&key).is_some_and(|vs| vs.contains(&value))
    }

    /// Iterate keys with their value sets.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &HashSet<EntityId>)> {
        self.map.iter().map(|(k, vs)| (*k, vs))
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.map.len()
    }

    /// Number of distinct pairs.
    pub fn pair_count(&self) -> usize {
        self.map.values().map(HashSet::len).sum()
    }

    /// Whether no pair is bound.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Structural join: keys present in both sides, value sets intersected.
    ///
    /// Keys whose intersection comes up empty are dropped.
    pub fn intersect(&self, other: &Bindings) -> Bindings {
        let mut out = Bindings::new();
        let (small, large) = if self.map.len() <= other.map.len() {
            (self, other)
        } else {
            (other, self)
        };
        for (key, values) in &small.map {
            if let Some(other_values) = large.map.get(key) {
                let common: HashSet<EntityId> =
                    values.intersection(other_values).copied().collect();
                if !common.is_empty() {
                    out.map.insert(*key, common);
                }
            }
        }
        out
    }
}

/// How the PCA denominator is estimated.
///
/// The two strategies are different estimators of the same quantity and are
/// not guaranteed to agree; which one a deployment treats as canonical is a
/// configuration choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PcaStrategy {
    /// Sum of body-binding cardinalities over functional values that have at
    /// least one known head fact.
    #[default]
    Enumerative,
    /// Count body pairs whose functional value still has "room" under the
    /// head relation: `entity_count - degree > 0`. Needs a degree table but
    /// avoids re-querying the head relation per candidate.
    DegreeThreshold,
}

impl std::fmt::Display for PcaStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PcaStrategy::Enumerative => write!(f, "enumerative"),
            PcaStrategy::DegreeThreshold => write!(f, "degree-threshold"),
        }
    }
}

impl FromStr for PcaStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enumerative" | "exact" => Ok(PcaStrategy::Enumerative),
            "degree-threshold" | "degree" => Ok(PcaStrategy::DegreeThreshold),
            other => Err(format!(
                "unknown PCA strategy `{other}` (expected `enumerative` or `degree-threshold`)"
            )),
        }
    }
}

/// Measured quality metrics for one rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Distinct pairs satisfying both body and head.
    pub support: u64,
    /// Distinct pairs satisfying the head atom alone.
    pub total_heads: u64,
    /// Estimated candidate-pair count under the Partial Completeness Assumption.
    pub pca_denominator: u64,
    /// `support / total_heads`; NaN when there are no head facts.
    pub head_coverage: f64,
    /// `support / pca_denominator`; NaN when the denominator is zero.
    pub pca_confidence: f64,
}

impl Metrics {
    /// Derive the ratios from the three counts, mapping zero denominators to
    /// NaN rather than an error.
    pub fn from_counts(support: u64, total_heads: u64, pca_denominator: u64) -> Self {
        let ratio = |num: u64, den: u64| {
            if den == 0 {
                f64::NAN
            } else {
                num as f64 / den as f64
            }
        };
        Self {
            support,
            total_heads,
            pca_denominator,
            head_coverage: ratio(support, total_heads),
            pca_confidence: ratio(support, pca_denominator),
        }
    }
}
