//! File formats: triple loaders, the rule-file parser, and result records.
//!
//! All formats are plain delimited text. Loaders validate identifiers as
//! they parse, so a malformed line surfaces with its path and line number
//! instead of poisoning the engine downstream.

pub mod records;
pub mod rules;
pub mod triples;

pub use records::{record_line, write_records};
pub use rules::{load_rules, parse_rule_line};
pub use triples::{load_indexed_split, load_materialization};
