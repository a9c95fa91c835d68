//! Abnormality-level rules.
//!
//! Every rule is scoped to exactly one abnormality kind and is a no-op on
//! all others. Rows of the arity table that share a constraint are expressed
//! as one parameterized rule type registered once per kind, so the catalog
//! stays an explicit ordered list.

use crate::ast::{Abnormality, AbnormalityKind, KaryotypeAST};

use super::AbnormalityRule;

fn is_valid_chromosome(id: &str) -> bool {
    if id == "X" || id == "Y" {
        return true;
    }
    !id.starts_with('0') && id.parse::<u8>().map_or(false, |n| (1..=22).contains(&n))
}

/// Numerical gains/losses must reference an existing chromosome.
pub struct NumericalChromosomeValid;

impl AbnormalityRule for NumericalChromosomeValid {
    fn id(&self) -> &'static str {
        "ABN_NUM_CHR_VALID"
    }

    fn category(&self) -> &'static str {
        "abnormality"
    }

    fn description(&self) -> &'static str {
        "Numerical abnormality chromosome must be 1-22, X, or Y"
    }

    fn evaluate(&self, _ast: &KaryotypeAST, abnormality: &Abnormality) -> Vec<String> {
        if !abnormality.kind.is_numerical() {
            return Vec::new();
        }
        if is_valid_chromosome(&abnormality.chromosome) {
            return Vec::new();
        }
        vec![format!(
            "Invalid chromosome '{}' in {}. Must be 1-22, X, or Y",
            abnormality.chromosome, abnormality.raw
        )]
    }
}

/// Breakpoints of structural abnormalities stay on the p or q arm.
pub struct BreakpointArmValid;

impl AbnormalityRule for BreakpointArmValid {
    fn id(&self) -> &'static str {
        "ABN_BP_ARM_VALID"
    }

    fn category(&self) -> &'static str {
        "abnormality"
    }

    fn description(&self) -> &'static str {
        "Breakpoint arm must be 'p' or 'q'"
    }

    fn evaluate(&self, _ast: &KaryotypeAST, abnormality: &Abnormality) -> Vec<String> {
        if abnormality.kind.is_numerical() || abnormality.kind == AbnormalityKind::Unknown {
            return Vec::new();
        }
        abnormality
            .breakpoints
            .iter()
            .filter(|bp| !bp.arm.is_proper())
            .map(|bp| {
                format!(
                    "Invalid breakpoint arm '{}' in {}. Must be 'p' or 'q'",
                    bp.arm, abnormality.raw
                )
            })
            .collect()
    }
}

/// Fixed breakpoint arity for one abnormality kind.
pub struct RequiredBreakpointCount {
    kind: AbnormalityKind,
    id: &'static str,
    description: &'static str,
    noun: &'static str,
    allowed: &'static [usize],
    /// Spelled-out arity for the message ("one", "two", "at most one", ...).
    expected: &'static str,
}

impl AbnormalityRule for RequiredBreakpointCount {
    fn id(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> &'static str {
        "abnormality"
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn evaluate(&self, _ast: &KaryotypeAST, abnormality: &Abnormality) -> Vec<String> {
        if abnormality.kind != self.kind {
            return Vec::new();
        }
        let found = abnormality.breakpoints.len();
        if self.allowed.contains(&found) {
            return Vec::new();
        }
        let plural = if self.expected.ends_with("one") { "" } else { "s" };
        vec![format!(
            "{} requires {} breakpoint{}, found {} in {}",
            self.noun, self.expected, plural, found, abnormality.raw
        )]
    }
}

/// Segmented events (`t`, `dic`, ...): one breakpoint per chromosome id in
/// the `;`-joined chromosome field.
pub struct SegmentedBreakpointCount {
    kind: AbnormalityKind,
    id: &'static str,
    description: &'static str,
    noun: &'static str,
}

impl AbnormalityRule for SegmentedBreakpointCount {
    fn id(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> &'static str {
        "abnormality"
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn evaluate(&self, _ast: &KaryotypeAST, abnormality: &Abnormality) -> Vec<String> {
        if abnormality.kind != self.kind {
            return Vec::new();
        }
        let chromosomes = abnormality.chromosome.split(';').count();
        let breakpoints = abnormality.breakpoints.len();
        if chromosomes == breakpoints {
            return Vec::new();
        }
        vec![format!(
            "{} has {} chromosomes but {} breakpoints in {}",
            self.noun, chromosomes, breakpoints, abnormality.raw
        )]
    }
}

/// Segment-shaped events (`del`, `dup`, `trp`, `qdp`): bounded breakpoint
/// arity, and a two-breakpoint span must stay on a single arm.
pub struct SameArmSpan {
    kind: AbnormalityKind,
    id: &'static str,
    description: &'static str,
    noun: &'static str,
    allowed: &'static [usize],
    expected: &'static str,
    /// Subject of the same-arm message ("Interstitial deletion", ...).
    span_subject: &'static str,
}

impl AbnormalityRule for SameArmSpan {
    fn id(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> &'static str {
        "abnormality"
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn evaluate(&self, _ast: &KaryotypeAST, abnormality: &Abnormality) -> Vec<String> {
        if abnormality.kind != self.kind {
            return Vec::new();
        }
        let found = abnormality.breakpoints.len();
        if !self.allowed.contains(&found) {
            return vec![format!(
                "{} requires {} breakpoints, found {} in {}",
                self.noun, self.expected, found, abnormality.raw
            )];
        }
        if found == 2 {
            let first = abnormality.breakpoints[0].arm;
            let second = abnormality.breakpoints[1].arm;
            if first != second {
                return vec![format!(
                    "{} breakpoints must be on same arm, found {} and {} in {}",
                    self.span_subject, first, second, abnormality.raw
                )];
            }
        }
        Vec::new()
    }
}

/// Ring chromosomes close through the centromere: exactly two breakpoints,
/// one per arm.
pub struct RingBreakpoints;

impl AbnormalityRule for RingBreakpoints {
    fn id(&self) -> &'static str {
        "ABN_RING_BP"
    }

    fn category(&self) -> &'static str {
        "abnormality"
    }

    fn description(&self) -> &'static str {
        "Ring chromosome must have 2 breakpoints on different arms"
    }

    fn evaluate(&self, _ast: &KaryotypeAST, abnormality: &Abnormality) -> Vec<String> {
        if abnormality.kind != AbnormalityKind::Ring {
            return Vec::new();
        }
        let found = abnormality.breakpoints.len();
        if found != 2 {
            return vec![format!(
                "Ring chromosome requires two breakpoints, found {} in {}",
                found, abnormality.raw
            )];
        }
        let first = abnormality.breakpoints[0].arm;
        let second = abnormality.breakpoints[1].arm;
        if first == second {
            return vec![format!(
                "Ring chromosome breakpoints must be on different arms, found {} and {} in {}",
                first, second, abnormality.raw
            )];
        }
        Vec::new()
    }
}

/// The shipped abnormality-level catalog, in evaluation order.
pub fn abnormality_rules() -> Vec<Box<dyn AbnormalityRule>> {
    use AbnormalityKind::*;

    vec![
        Box::new(NumericalChromosomeValid),
        Box::new(BreakpointArmValid),
        Box::new(RequiredBreakpointCount {
            kind: Inversion,
            id: "ABN_INV_TWO_BP",
            description: "Inversion must have exactly two breakpoints",
            noun: "Inversion",
            allowed: &[2],
            expected: "two",
        }),
        Box::new(SegmentedBreakpointCount {
            kind: Translocation,
            id: "ABN_TRANS_BP_COUNT",
            description: "Translocation breakpoint count must match chromosome count",
            noun: "Translocation",
        }),
        Box::new(SameArmSpan {
            kind: Deletion,
            id: "ABN_DEL_BP",
            description: "Deletion must have 1-2 breakpoints, interstitial requires same arm",
            noun: "Deletion",
            allowed: &[1, 2],
            expected: "one or two",
            span_subject: "Interstitial deletion",
        }),
        Box::new(SameArmSpan {
            kind: Duplication,
            id: "ABN_DUP_BP",
            description: "Duplication must have 1-2 breakpoints, interstitial requires same arm",
            noun: "Duplication",
            allowed: &[1, 2],
            expected: "one or two",
            span_subject: "Duplication",
        }),
        Box::new(RingBreakpoints),
        Box::new(RequiredBreakpointCount {
            kind: Isochromosome,
            id: "ABN_ISO_BP",
            description: "Isochromosome must have exactly 1 breakpoint",
            noun: "Isochromosome",
            allowed: &[1],
            expected: "one",
        }),
        Box::new(SameArmSpan {
            kind: Triplication,
            id: "ABN_TRP_BP",
            description: "Triplication must have 2 breakpoints on same arm",
            noun: "Triplication",
            allowed: &[2],
            expected: "two",
            span_subject: "Triplication",
        }),
        Box::new(SameArmSpan {
            kind: Quadruplication,
            id: "ABN_QDP_BP",
            description: "Quadruplication must have 2 breakpoints on same arm",
            noun: "Quadruplication",
            allowed: &[2],
            expected: "two",
            span_subject: "Quadruplication",
        }),
        Box::new(SegmentedBreakpointCount {
            kind: Dicentric,
            id: "ABN_DIC_BP_COUNT",
            description: "Dicentric breakpoint count must match chromosome count",
            noun: "Dicentric",
        }),
        Box::new(SegmentedBreakpointCount {
            kind: Robertsonian,
            id: "ABN_ROB_BP_COUNT",
            description: "Robertsonian translocation breakpoint count must match chromosome count",
            noun: "Robertsonian translocation",
        }),
        Box::new(SegmentedBreakpointCount {
            kind: PseudoDicentric,
            id: "ABN_PSU_DIC_BP_COUNT",
            description: "Pseudodicentric breakpoint count must match chromosome count",
            noun: "Pseudodicentric",
        }),
        Box::new(SegmentedBreakpointCount {
            kind: TelomericAssociation,
            id: "ABN_TAS_BP_COUNT",
            description: "Telomeric association breakpoint count must match chromosome count",
            noun: "Telomeric association",
        }),
        Box::new(RequiredBreakpointCount {
            kind: Isodicentric,
            id: "ABN_IDIC_BP",
            description: "Isodicentric must have exactly 1 breakpoint",
            noun: "Isodicentric",
            allowed: &[1],
            expected: "one",
        }),
        Box::new(RequiredBreakpointCount {
            kind: AdditionalMaterial,
            id: "ABN_ADD_BP",
            description: "Additional material must have exactly 1 breakpoint",
            noun: "Additional material",
            allowed: &[1],
            expected: "one",
        }),
        Box::new(RequiredBreakpointCount {
            kind: FragileSite,
            id: "ABN_FRA_BP",
            description: "Fragile site must have exactly 1 breakpoint",
            noun: "Fragile site",
            allowed: &[1],
            expected: "one",
        }),
        Box::new(RequiredBreakpointCount {
            kind: Fission,
            id: "ABN_FIS_BP",
            description: "Fission must have exactly 1 breakpoint",
            noun: "Fission",
            allowed: &[1],
            expected: "one",
        }),
        Box::new(RequiredBreakpointCount {
            kind: Neocentromere,
            id: "ABN_NEO_BP",
            description: "Neocentromere must have exactly 1 breakpoint",
            noun: "Neocentromere",
            allowed: &[1],
            expected: "one",
        }),
        Box::new(RequiredBreakpointCount {
            kind: Insertion,
            id: "ABN_INS_BP",
            description: "Insertion must have exactly 3 breakpoints",
            noun: "Insertion",
            allowed: &[3],
            expected: "three",
        }),
        Box::new(RequiredBreakpointCount {
            kind: DoubleMinutes,
            id: "ABN_DMIN_BP",
            description: "Double minutes carry no breakpoints",
            noun: "Double minutes",
            allowed: &[0],
            expected: "no",
        }),
        Box::new(RequiredBreakpointCount {
            kind: Marker,
            id: "ABN_MAR_BP",
            description: "Marker chromosomes carry no breakpoints",
            noun: "Marker chromosome",
            allowed: &[0],
            expected: "no",
        }),
        Box::new(RequiredBreakpointCount {
            kind: Incomplete,
            id: "ABN_INC_BP",
            description: "Incomplete karyotype marker carries no breakpoints",
            noun: "Incomplete karyotype",
            allowed: &[0],
            expected: "no",
        }),
        Box::new(RequiredBreakpointCount {
            kind: Hsr,
            id: "ABN_HSR_BP",
            description: "Homogeneously staining region has at most 1 breakpoint",
            noun: "Homogeneously staining region",
            allowed: &[0, 1],
            expected: "at most one",
        }),
        Box::new(RequiredBreakpointCount {
            kind: AcentricFragment,
            id: "ABN_ACE_BP",
            description: "Acentric fragment must have 1-2 breakpoints",
            noun: "Acentric fragment",
            allowed: &[1, 2],
            expected: "one or two",
        }),
    ]
}
