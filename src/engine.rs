//! Validation pipeline: parse, then run the rule catalog.
//!
//! The default catalog is built once per process and shared read-only across
//! calls; neither the parser nor the engine mutates shared state, so
//! concurrent validation from multiple threads needs no locking.

use once_cell::sync::Lazy;

use crate::ast::{KaryotypeAST, ValidationResult};
use crate::syntax;
use crate::validation::RuleEngine;

static CATALOG: Lazy<RuleEngine> = Lazy::new(RuleEngine::with_default_catalog);

/// Validate an ISCN karyotype string.
///
/// A parse failure yields a single-error result with `parsed = None`; once
/// parsing succeeds, every registered rule runs and all violations are
/// returned together with the AST.
pub fn validate_karyotype(karyotype: &str) -> ValidationResult {
    match syntax::parse(karyotype) {
        Ok(ast) => CATALOG.validate(&ast),
        Err(error) => ValidationResult {
            valid: false,
            errors: vec![error.to_string()],
            parsed: None,
        },
    }
}

/// Run the default catalog over an already-parsed AST.
pub fn validate_ast(ast: &KaryotypeAST) -> ValidationResult {
    CATALOG.validate(ast)
}

/// Boolean convenience for callers that need no error detail.
pub fn is_valid_karyotype(karyotype: &str) -> bool {
    validate_karyotype(karyotype).valid
}
