//! Rule file parser.
//!
//! One rule per line:
//!
//! ```text
//! 0(a,b) & 1(b,a) => 2(a,b) \t 0.83 \t 0.65 \t a
//! ```
//!
//! The first field is the rule text (body atoms joined by ` & `, then
//! ` => `, then the head atom), followed by the miner's claimed head
//! coverage and PCA confidence, and the functional variable. Extra columns
//! are ignored so files with trailing miner metadata still load.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use crate::error::{IoError, RuleError, SeshatResult};
use crate::ident::RelationId;
use crate::rule::{Atom, Rule, Var};

fn atom_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\(([ab]),([ab])\)$").expect("atom regex"))
}

fn parse_atom(text: &str) -> Result<Atom, RuleError> {
    let caps = atom_re()
        .captures(text.trim())
        .ok_or_else(|| RuleError::Parse { text: text.into() })?;
    let relation: u64 = caps[1].parse().map_err(|_| RuleError::Parse {
        text: text.into(),
    })?;
    let subject = Var::from_char(caps[2].chars().next().expect("regex group"))
        .expect("regex restricts to a|b");
    let object = Var::from_char(caps[3].chars().next().expect("regex group"))
        .expect("regex restricts to a|b");
    Atom::new(RelationId(relation), subject, object)
}

/// Parse one rule line into a [`Rule`].
pub fn parse_rule_line(line: &str) -> Result<Rule, RuleError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 4 {
        return Err(RuleError::Parse { text: line.into() });
    }

    let (body_text, head_text) = fields[0]
        .split_once("=>")
        .ok_or_else(|| RuleError::Parse {
            text: fields[0].into(),
        })?;

    let body = body_text
        .split('&')
        .map(parse_atom)
        .collect::<Result<Vec<_>, _>>()?;
    let head = parse_atom(head_text)?;

    let claimed_hc: f64 = fields[1].trim().parse().map_err(|_| RuleError::Parse {
        text: line.into(),
    })?;
    let claimed_pca: f64 = fields[2].trim().parse().map_err(|_| RuleError::Parse {
        text: line.into(),
    })?;

    let fv_field = fields[3].trim();
    let functional_var = fv_field
        .chars()
        .next()
        .and_then(Var::from_char)
        .filter(|_| fv_field.len() == 1)
        .ok_or_else(|| RuleError::Parse { text: line.into() })?;

    Ok(Rule::new(head, body, functional_var)?.with_claimed(claimed_hc, claimed_pca))
}

/// Load a rule file, reporting the offending line on parse failure.
pub fn load_rules(path: &Path) -> SeshatResult<Vec<Rule>> {
    let content = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rules = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let rule = parse_rule_line(line).map_err(|e| IoError::MalformedLine {
            path: path.to_path_buf(),
            line: idx + 1,
            message: e.to_string(),
        })?;
        rules.push(rule);
    }
    info!(path = %path.display(), count = rules.len(), "loaded rules");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_single_atom_rule() {
        let rule = parse_rule_line("0(a,b) => 1(a,b)\t0.83\t0.65\ta").unwrap();
        assert_eq!(rule.body.len(), 1);
        assert_eq!(rule.head.relation, RelationId(1));
        assert_eq!(rule.functional_var, Var::A);
        assert!((rule.head_coverage - 0.83).abs() < f64::EPSILON);
        assert!((rule.pca_confidence - 0.65).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_conjunction_with_inverse_atom() {
        let rule = parse_rule_line("0(a,b) & 1(b,a) => 2(a,b)\t0.5\t0.5\tb").unwrap();
        assert_eq!(rule.body.len(), 2);
        assert_eq!(rule.body[1].subject, Var::B);
        assert_eq!(rule.functional_var, Var::B);
        // The printable id matches the input rule text.
        assert_eq!(rule.id(), "0(a,b) & 1(b,a) => 2(a,b)");
    }

    #[test]
    fn extra_columns_ignored() {
        let rule = parse_rule_line("0(a,b) => 1(a,b)\t0.83\t0.65\ta\t0.99\textra").unwrap();
        assert_eq!(rule.head.relation, RelationId(1));
    }

    #[test]
    fn malformed_lines_rejected() {
        assert!(parse_rule_line("0(a,b) => 1(a,b)").is_err()); // too few fields
        assert!(parse_rule_line("0(a,b) 1(a,b)\t0.5\t0.5\ta").is_err()); // no arrow
        assert!(parse_rule_line("0(a,a) => 1(a,b)\t0.5\t0.5\ta").is_err()); // reflexive
        assert!(parse_rule_line("0(a,c) => 1(a,b)\t0.5\t0.5\ta").is_err()); // bad var
        assert!(parse_rule_line("0(a,b) => 1(a,b)\tx\t0.5\ta").is_err()); // bad hc
        assert!(parse_rule_line("0(a,b) => 1(a,b)\t0.5\t0.5\tq").is_err()); // bad fv
    }

    #[test]
    fn load_rules_reports_line_number() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0(a,b) => 1(a,b)\t0.5\t0.5\ta\nbroken line\n")
            .unwrap();
        let err = load_rules(file.path()).unwrap_err();
        assert!(err.to_string().contains(":2:"));
    }

    #[test]
    fn load_rules_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\n0(a,b) => 1(a,b)\t0.5\t0.5\ta\n\n").unwrap();
        let rules = load_rules(file.path()).unwrap();
        assert_eq!(rules.len(), 1);
    }
}
