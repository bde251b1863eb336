//! Result records: one tab-separated line per evaluated rule.
//!
//! `ruleId \t claimedHC \t claimedPCA \t measuredHC \t measuredPCA`
//!
//! Undefined metrics (zero denominators) print as `NaN`, which is what
//! downstream analysis scripts expect.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{IoError, SeshatResult};
use crate::eval::RuleOutcome;

/// Render one outcome as a record line, without trailing newline.
pub fn record_line(outcome: &RuleOutcome) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        outcome.id,
        outcome.claimed_hc,
        outcome.claimed_pca,
        outcome.metrics.head_coverage,
        outcome.metrics.pca_confidence
    )
}

/// Write all outcomes to a record file.
pub fn write_records(path: &Path, outcomes: &[RuleOutcome]) -> SeshatResult<()> {
    let write_err = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(write_err)?;
    let mut out = std::io::BufWriter::new(file);
    for outcome in outcomes {
        writeln!(out, "{}", record_line(outcome)).map_err(write_err)?;
    }
    out.flush().map_err(write_err)?;

    info!(path = %path.display(), records = outcomes.len(), "wrote result records");
    Ok(())
}
