//! Rich diagnostic error types for the seshat engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes and help text so users of the CLI know
//! which input file or rule is at fault.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the seshat engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum SeshatError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("invalid identifier: {raw}")]
    #[diagnostic(
        code(seshat::graph::invalid_identifier),
        help(
            "Entity and relation identifiers must be non-negative integers. \
             A negative value usually means the id-mapping step produced a \
             placeholder; re-run the dataset export."
        )
    )]
    InvalidIdentifier { raw: i64 },

    #[error("invalid triple: ({subject}, {predicate}, {object})")]
    #[diagnostic(
        code(seshat::graph::invalid_triple),
        help(
            "Every field of a triple must be a non-negative integer identifier. \
             The store rejects malformed triples at build time rather than \
             silently skipping them."
        )
    )]
    InvalidTriple {
        subject: i64,
        predicate: i64,
        object: i64,
    },
}

// ---------------------------------------------------------------------------
// Rule errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RuleError {
    #[error("atom binds variable {var} to both subject and object")]
    #[diagnostic(
        code(seshat::rule::repeated_variable),
        help(
            "A binary atom must bind exactly the two variables a and b, one \
             per slot. Reflexive atoms like p(a,a) are not supported."
        )
    )]
    RepeatedVariable { var: char },

    #[error("rule has an empty body")]
    #[diagnostic(
        code(seshat::rule::empty_body),
        help("A rule needs at least one body atom; a bare head is not a rule.")
    )]
    EmptyBody,

    #[error("cannot parse rule: {text}")]
    #[diagnostic(
        code(seshat::rule::parse),
        help(
            "Expected `body => head` with atoms written as `rel(x,y)` where \
             rel is a non-negative integer and x, y are the variables a and b, \
             body atoms joined by ` & `."
        )
    )]
    Parse { text: String },
}

// ---------------------------------------------------------------------------
// I/O errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum IoError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(
        code(seshat::io::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(
        code(seshat::io::write),
        help("Check the output directory exists and has write permission.")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    #[diagnostic(
        code(seshat::io::malformed_line),
        help(
            "Triple files carry one tab-separated triple per line; indexed \
             split files start with a count line followed by `s o p` rows. \
             Fix or remove the offending line."
        )
    )]
    MalformedLine {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Convenience alias for functions returning seshat results.
pub type SeshatResult<T> = std::result::Result<T, SeshatError>;
