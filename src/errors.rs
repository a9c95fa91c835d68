//! Parse-error type for the karyotype grammar.
//!
//! Syntactic failures are fatal for a validation call: the parser stops at
//! the first token it cannot assign to the grammar and no partial AST is
//! surfaced. Semantic rule violations are not errors in this sense; they are
//! collected as plain messages by the rule engine.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// What went wrong, with `Display` as the single source of message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Karyotype string is empty")]
    EmptyInput,

    #[error("Missing comma separator between chromosome count and sex chromosomes")]
    MissingComma,

    #[error("Invalid chromosome count: '{0}' is not a number")]
    InvalidChromosomeCount(String),

    #[error("Invalid sex chromosomes: '{0}' must contain only X, Y, or U")]
    InvalidSexChromosomes(String),

    /// An abnormality whose opening token matched a known form but whose
    /// interior does not fit that form's required breakpoint shape.
    #[error("Malformed {form} '{token}': expected {expected}")]
    MalformedAbnormality {
        form: &'static str,
        token: String,
        expected: &'static str,
    },
}

/// Fatal parse failure, carrying the full input for diagnostic rendering.
#[derive(Debug, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic(code(iscn::parse))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("unparseable here")]
    pub span: SourceSpan,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, input: &str, span: std::ops::Range<usize>) -> Self {
        Self {
            kind,
            src: NamedSource::new("karyotype", input.to_string()),
            span: span.into(),
        }
    }
}
