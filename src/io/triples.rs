//! Triple file loaders.
//!
//! Two layouts occur in the wild:
//!
//! - **Materialization files**: one `subject \t predicate \t object` row per
//!   line, no header.
//! - **Indexed splits** (`train2id.txt` and friends): a count header line,
//!   then `subject object predicate` rows, space- or tab-separated.
//!
//! Both feed the same [`Triple`] stream; blank lines are skipped.

use std::path::Path;

use tracing::info;

use crate::error::{IoError, SeshatResult};
use crate::graph::Triple;

fn read_to_string(path: &Path) -> SeshatResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        IoError::Read {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn malformed(path: &Path, line: usize, message: impl Into<String>) -> IoError {
    IoError::MalformedLine {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

fn parse_field(path: &Path, line_no: usize, field: &str) -> SeshatResult<i64> {
    field
        .parse::<i64>()
        .map_err(|_| malformed(path, line_no, format!("not an integer: `{field}`")).into())
}

/// Load a materialization file: `s \t p \t o` per line.
pub fn load_materialization(path: &Path) -> SeshatResult<Vec<Triple>> {
    let content = read_to_string(path)?;
    let mut triples = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            return Err(malformed(path, line_no, "expected 3 tab-separated fields").into());
        }
        let s = parse_field(path, line_no, fields[0])?;
        let p = parse_field(path, line_no, fields[1])?;
        let o = parse_field(path, line_no, fields[2])?;
        let triple = Triple::from_raw(s, p, o)
            .map_err(|e| malformed(path, line_no, e.to_string()))?;
        triples.push(triple);
    }
    info!(path = %path.display(), count = triples.len(), "loaded materialization triples");
    Ok(triples)
}

/// Load an indexed split file: count header, then `s o p` rows.
pub fn load_indexed_split(path: &Path) -> SeshatResult<Vec<Triple>> {
    let content = read_to_string(path)?;
    let mut triples = Vec::new();
    for (idx, line) in content.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Tab-separated with a whitespace fallback, as the exporters disagree.
        let mut fields: Vec<&str> = line.split('\t').collect();
        if fields.len() == 1 {
            fields = line.split_whitespace().collect();
        }
        if fields.len() != 3 {
            return Err(malformed(path, line_no, "expected 3 fields (s o p)").into());
        }
        let s = parse_field(path, line_no, fields[0])?;
        let o = parse_field(path, line_no, fields[1])?;
        let p = parse_field(path, line_no, fields[2])?;
        let triple = Triple::from_raw(s, p, o)
            .map_err(|e| malformed(path, line_no, e.to_string()))?;
        triples.push(triple);
    }
    info!(path = %path.display(), count = triples.len(), "loaded indexed split triples");
    Ok(triples)
}
