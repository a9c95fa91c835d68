//! Semantic validation: rule traits, the rule engine, and the shipped
//! catalogs.
//!
//! The engine knows nothing about rule semantics. Each rule is a pure,
//! self-contained predicate identified by a stable id, a category tag, and a
//! description; those identity strings exist for observability, never for
//! flow control.

pub mod abnormality;
pub mod chromosome;

pub use abnormality::abnormality_rules;
pub use chromosome::chromosome_rules;

use crate::ast::{Abnormality, KaryotypeAST, ValidationResult};

/// A rule evaluated once per karyotype, against the whole AST.
pub trait ChromosomeRule: Send + Sync {
    fn id(&self) -> &'static str;
    fn category(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Returns one human-readable message per violation, empty when the
    /// rule is satisfied.
    fn evaluate(&self, ast: &KaryotypeAST) -> Vec<String>;
}

/// A rule evaluated once per abnormality instance.
///
/// Implementations are scoped to a single [`AbnormalityKind`] tag and must
/// be a no-op on every other tag.
///
/// [`AbnormalityKind`]: crate::ast::AbnormalityKind
pub trait AbnormalityRule: Send + Sync {
    fn id(&self) -> &'static str;
    fn category(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn evaluate(&self, ast: &KaryotypeAST, abnormality: &Abnormality) -> Vec<String>;
}

/// Applies two ordered rule catalogs to a parsed karyotype, exhaustively.
#[derive(Default)]
pub struct RuleEngine {
    chromosome_rules: Vec<Box<dyn ChromosomeRule>>,
    abnormality_rules: Vec<Box<dyn AbnormalityRule>>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine loaded with the full shipped catalog.
    pub fn with_default_catalog() -> Self {
        let mut engine = Self::new();
        engine.add_rules(chromosome_rules());
        engine.add_abnormality_rules(abnormality_rules());
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ChromosomeRule>) {
        self.chromosome_rules.push(rule);
    }

    pub fn add_rules(&mut self, rules: Vec<Box<dyn ChromosomeRule>>) {
        self.chromosome_rules.extend(rules);
    }

    pub fn add_abnormality_rule(&mut self, rule: Box<dyn AbnormalityRule>) {
        self.abnormality_rules.push(rule);
    }

    pub fn add_abnormality_rules(&mut self, rules: Vec<Box<dyn AbnormalityRule>>) {
        self.abnormality_rules.extend(rules);
    }

    /// Runs every registered rule: AST-level rules in catalog order, then
    /// every abnormality-level rule against each abnormality in AST order.
    /// No short-circuiting: all violations are collected.
    pub fn validate(&self, ast: &KaryotypeAST) -> ValidationResult {
        let mut errors: Vec<String> = Vec::new();

        for rule in &self.chromosome_rules {
            errors.extend(rule.evaluate(ast));
        }
        for abnormality in &ast.abnormalities {
            for rule in &self.abnormality_rules {
                errors.extend(rule.evaluate(ast, abnormality));
            }
        }

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            parsed: Some(ast.clone()),
        }
    }
}
