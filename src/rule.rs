//! Rule and atom types.
//!
//! A rule is a conjunction of binary body atoms implying a single head atom,
//! all over the same two variables `a` and `b`. The functional variable is
//! the side treated as uniquely determined under the Partial Completeness
//! Assumption; it orients both the binding relations and the PCA estimate.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::ident::RelationId;

/// One of the two rule variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Var {
    A,
    B,
}

impl Var {
    /// The other variable of the pair.
    pub fn other(self) -> Var {
        match self {
            Var::A => Var::B,
            Var::B => Var::A,
        }
    }

    /// Parse from the single-character form used in rule files.
    pub fn from_char(c: char) -> Option<Var> {
        match c {
            'a' => Some(Var::A),
            'b' => Some(Var::B),
            _ => None,
        }
    }
}

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Var::A => write!(f, "a"),
            Var::B => write!(f, "b"),
        }
    }
}

/// A binary-relation pattern over the variables `a` and `b`.
///
/// Orientation matters: `p(a,b)` and `p(b,a)` match the same triples but
/// assign subject and object to opposite variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    /// The relation this atom matches.
    pub relation: RelationId,
    /// Variable bound to the triple subject.
    pub subject: Var,
    /// Variable bound to the triple object.
    pub object: Var,
}

impl Atom {
    /// Create an atom, rejecting reflexive patterns like `p(a,a)`.
    pub fn new(relation: RelationId, subject: Var, object: Var) -> Result<Self, RuleError> {
        if subject == object {
            return Err(RuleError::RepeatedVariable {
                var: if subject == Var::A { 'a' } else { 'b' },
            });
        }
        Ok(Self {
            relation,
            subject,
            object,
        })
    }

    /// `rel(a,b)`: subject bound to `a`.
    pub fn forward(relation: RelationId) -> Self {
        Self {
            relation,
            subject: Var::A,
            object: Var::B,
        }
    }

    /// `rel(b,a)`: subject bound to `b`.
    pub fn inverse(relation: RelationId) -> Self {
        Self {
            relation,
            subject: Var::B,
            object: Var::A,
        }
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({},{})", self.relation, self.subject, self.object)
    }
}

/// A mined rule `head <= body1 & body2 & …` with the miner's claimed metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// The head atom.
    pub head: Atom,
    /// The body conjunction, in file order.
    pub body: Vec<Atom>,
    /// The variable treated as determined for PCA estimation.
    pub functional_var: Var,
    /// Head coverage claimed by the miner; re-measured by this engine.
    pub head_coverage: f64,
    /// PCA confidence claimed by the miner; re-measured by this engine.
    pub pca_confidence: f64,
}

impl Rule {
    /// Create a rule with unit claimed metrics.
    pub fn new(head: Atom, body: Vec<Atom>, functional_var: Var) -> Result<Self, RuleError> {
        if body.is_empty() {
            return Err(RuleError::EmptyBody);
        }
        Ok(Self {
            head,
            body,
            functional_var,
            head_coverage: 0.0,
            pca_confidence: 0.0,
        })
    }

    /// Attach the metrics claimed in the rule file.
    pub fn with_claimed(mut self, head_coverage: f64, pca_confidence: f64) -> Self {
        self.head_coverage = head_coverage;
        self.pca_confidence = pca_confidence;
        self
    }

    /// Printable identifier used in output records: `body => head`.
    pub fn id(&self) -> String {
        let body = self
            .body
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" & ");
        format!("{} => {}", body, self.head)
    }

    /// All relations the rule references (body first, then head, deduplicated).
    pub fn relations(&self) -> Vec<RelationId> {
        let mut rels: Vec<RelationId> = Vec::with_capacity(self.body.len() + 1);
        for atom in self.body.iter().chain(std::iter::once(&self.head)) {
            if !rels.contains(&atom.relation) {
                rels.push(atom.relation);
            }
        }
        rels
    }
}

/// Keep only rules whose claimed metrics meet the given thresholds.
///
/// A `None` threshold does not constrain. Rules must satisfy every threshold
/// that is present.
pub fn filter_rules(rules: Vec<Rule>, min_hc: Option<f64>, min_pca: Option<f64>) -> Vec<Rule> {
    rules
        .into_iter()
        .filter(|r| min_hc.is_none_or(|hc| r.head_coverage >= hc))
        .filter(|r| min_pca.is_none_or(|pca| r.pca_confidence >= pca))
        .collect()
}
