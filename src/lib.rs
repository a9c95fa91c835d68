//! Parser and semantic validation engine for ISCN human karyotype notation.
//!
//! The pipeline is a two-stage compiler front end: [`syntax::parse`] turns a
//! raw notation string into a [`KaryotypeAST`] (or fails with a fatal
//! [`ParseError`]), and the [`validation::RuleEngine`] runs an ordered
//! catalog of semantic rules over the AST, collecting every violation into a
//! [`ValidationResult`].
//!
//! ```
//! use iscn::validate_karyotype;
//!
//! let result = validate_karyotype("46,XX,del(5)(q13q33)");
//! assert!(result.valid);
//!
//! let result = validate_karyotype("46,Y");
//! assert!(!result.valid);
//! assert!(result.errors[0].contains("at least one X"));
//! ```

pub mod ast;
pub mod cli;
pub mod engine;
pub mod errors;
pub mod syntax;
pub mod validation;

pub use ast::{
    Abnormality, AbnormalityKind, Arm, Breakpoint, CellLine, ChromosomeCount, Inheritance,
    KaryotypeAST, Modifiers, ValidationResult,
};
pub use engine::{is_valid_karyotype, validate_ast, validate_karyotype};
pub use errors::{ParseError, ParseErrorKind};
pub use syntax::parse;
pub use validation::{AbnormalityRule, ChromosomeRule, RuleEngine};
