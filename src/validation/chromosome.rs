//! AST-level rules: chromosome count, sex chromosomes, and their coherence.

use crate::ast::{ChromosomeCount, KaryotypeAST};

use super::ChromosomeRule;

/// The undisclosed-sex marker, exempt from the X-presence and coherence
/// checks.
const UNDISCLOSED: &str = "U";

/// Count must be numeric or range notation such as `45~48`.
pub struct ChromosomeCountNumeric;

impl ChromosomeRule for ChromosomeCountNumeric {
    fn id(&self) -> &'static str {
        "CHR_COUNT_NUMERIC"
    }

    fn category(&self) -> &'static str {
        "chromosome_count"
    }

    fn description(&self) -> &'static str {
        "Chromosome count must be numeric or valid range notation"
    }

    fn evaluate(&self, ast: &KaryotypeAST) -> Vec<String> {
        match &ast.chromosome_count {
            ChromosomeCount::Count(_) => Vec::new(),
            ChromosomeCount::Range(text) if text.contains('~') => Vec::new(),
            ChromosomeCount::Range(text) => {
                vec![format!("Chromosome count '{}' is not numeric", text)]
            }
        }
    }
}

/// Numeric counts lie in [23, 92]; ranges are exempt.
pub struct ChromosomeCountBounds;

impl ChromosomeRule for ChromosomeCountBounds {
    fn id(&self) -> &'static str {
        "CHR_COUNT_RANGE"
    }

    fn category(&self) -> &'static str {
        "chromosome_count"
    }

    fn description(&self) -> &'static str {
        "Chromosome count must be between 23 and 92"
    }

    fn evaluate(&self, ast: &KaryotypeAST) -> Vec<String> {
        match ast.chromosome_count.as_number() {
            Some(count) if !(23..=92).contains(&count) => vec![format!(
                "Chromosome count {} is outside valid range (must be between 23 and 92)",
                count
            )],
            _ => Vec::new(),
        }
    }
}

/// Sex-chromosome string must contain at least one X unless it is exactly
/// the undisclosed marker.
pub struct SexChromosomesContainX;

impl ChromosomeRule for SexChromosomesContainX {
    fn id(&self) -> &'static str {
        "SEX_CHR_VALID"
    }

    fn category(&self) -> &'static str {
        "sex_chromosomes"
    }

    fn description(&self) -> &'static str {
        "Sex chromosomes must contain at least one X"
    }

    fn evaluate(&self, ast: &KaryotypeAST) -> Vec<String> {
        let sex = &ast.sex_chromosomes;
        if sex == UNDISCLOSED || sex.contains('X') {
            return Vec::new();
        }
        vec![format!(
            "Sex chromosomes '{}' must contain at least one X chromosome",
            sex
        )]
    }
}

/// With no listed abnormalities, the count and the sex-chromosome length
/// must agree as `count == 44 + len(sex)`: the autosomal complement is fixed
/// at 44, the remainder is sex chromosomes. Ranges and the undisclosed
/// marker are exempt.
pub struct SexChromosomeCoherence;

impl ChromosomeRule for SexChromosomeCoherence {
    fn id(&self) -> &'static str {
        "SEX_CHR_COHERENCE"
    }

    fn category(&self) -> &'static str {
        "coherence"
    }

    fn description(&self) -> &'static str {
        "Chromosome count must be coherent with sex chromosome count"
    }

    fn evaluate(&self, ast: &KaryotypeAST) -> Vec<String> {
        if !ast.abnormalities.is_empty() || ast.sex_chromosomes == UNDISCLOSED {
            return Vec::new();
        }
        let count = match ast.chromosome_count.as_number() {
            Some(count) => count,
            None => return Vec::new(),
        };
        let found = ast.sex_chromosomes.chars().count();
        let expected = i64::from(count) - 44;
        if found as i64 == expected {
            return Vec::new();
        }
        vec![format!(
            "Chromosome count {} requires {} sex chromosome{}, but found {} ('{}')",
            count,
            expected,
            if expected == 1 { "" } else { "s" },
            found,
            ast.sex_chromosomes
        )]
    }
}

/// The shipped AST-level catalog, in evaluation order.
pub fn chromosome_rules() -> Vec<Box<dyn ChromosomeRule>> {
    vec![
        Box::new(ChromosomeCountNumeric),
        Box::new(ChromosomeCountBounds),
        Box::new(SexChromosomesContainX),
        Box::new(SexChromosomeCoherence),
    ]
}
