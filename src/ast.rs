//! Data model for parsed ISCN karyotypes.
//!
//! Every type here is a plain immutable value: the parser constructs them
//! once and neither the rule engine nor the catalog mutates them. The serde
//! derives define the wire shape consumed by downstream wrappers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chromosome arm of a breakpoint.
///
/// The parser only produces `P` and `Q`; `Cen` and `Ter` appear in extended
/// notation and can be constructed through the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arm {
    P,
    Q,
    Cen,
    Ter,
}

impl Arm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arm::P => "p",
            Arm::Q => "q",
            Arm::Cen => "cen",
            Arm::Ter => "ter",
        }
    }

    /// True for the two proper arms, the only values structural rules accept.
    pub fn is_proper(&self) -> bool {
        matches!(self, Arm::P | Arm::Q)
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chromosomal location such as `p11.2` or `q34`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub arm: Arm,
    pub region: Option<u32>,
    pub band: Option<u32>,
    /// Digits after the `.` separator, kept verbatim: `p11.02` and `p11.2`
    /// designate different sub-bands, so the leading zero must survive.
    pub subband: Option<String>,
    pub uncertain: bool,
}

/// The closed set of abnormality type tags.
///
/// The parser emits the subset it recognizes plus `Unknown`; the remaining
/// tags are targets of the rule catalog and can be built by callers. Keeping
/// this a closed enum lets the catalog match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbnormalityKind {
    #[serde(rename = "+")]
    Gain,
    #[serde(rename = "-")]
    Loss,
    #[serde(rename = "del")]
    Deletion,
    #[serde(rename = "dup")]
    Duplication,
    #[serde(rename = "inv")]
    Inversion,
    #[serde(rename = "t")]
    Translocation,
    #[serde(rename = "i")]
    Isochromosome,
    #[serde(rename = "r")]
    Ring,
    #[serde(rename = "+mar")]
    Marker,
    #[serde(rename = "der")]
    Derivative,
    #[serde(rename = "dmin")]
    DoubleMinutes,
    #[serde(rename = "hsr")]
    Hsr,
    #[serde(rename = "ins")]
    Insertion,
    #[serde(rename = "add")]
    AdditionalMaterial,
    #[serde(rename = "trp")]
    Triplication,
    #[serde(rename = "qdp")]
    Quadruplication,
    #[serde(rename = "dic")]
    Dicentric,
    #[serde(rename = "rob")]
    Robertsonian,
    #[serde(rename = "psu dic")]
    PseudoDicentric,
    #[serde(rename = "tas")]
    TelomericAssociation,
    #[serde(rename = "idic")]
    Isodicentric,
    #[serde(rename = "fra")]
    FragileSite,
    #[serde(rename = "fis")]
    Fission,
    #[serde(rename = "neo")]
    Neocentromere,
    #[serde(rename = "inc")]
    Incomplete,
    #[serde(rename = "ace")]
    AcentricFragment,
    #[serde(rename = "unknown")]
    Unknown,
}

impl AbnormalityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbnormalityKind::Gain => "+",
            AbnormalityKind::Loss => "-",
            AbnormalityKind::Deletion => "del",
            AbnormalityKind::Duplication => "dup",
            AbnormalityKind::Inversion => "inv",
            AbnormalityKind::Translocation => "t",
            AbnormalityKind::Isochromosome => "i",
            AbnormalityKind::Ring => "r",
            AbnormalityKind::Marker => "+mar",
            AbnormalityKind::Derivative => "der",
            AbnormalityKind::DoubleMinutes => "dmin",
            AbnormalityKind::Hsr => "hsr",
            AbnormalityKind::Insertion => "ins",
            AbnormalityKind::AdditionalMaterial => "add",
            AbnormalityKind::Triplication => "trp",
            AbnormalityKind::Quadruplication => "qdp",
            AbnormalityKind::Dicentric => "dic",
            AbnormalityKind::Robertsonian => "rob",
            AbnormalityKind::PseudoDicentric => "psu dic",
            AbnormalityKind::TelomericAssociation => "tas",
            AbnormalityKind::Isodicentric => "idic",
            AbnormalityKind::FragileSite => "fra",
            AbnormalityKind::Fission => "fis",
            AbnormalityKind::Neocentromere => "neo",
            AbnormalityKind::Incomplete => "inc",
            AbnormalityKind::AcentricFragment => "ace",
            AbnormalityKind::Unknown => "unknown",
        }
    }

    /// Numerical gain/loss, as opposed to structural rearrangement.
    pub fn is_numerical(&self) -> bool {
        matches!(self, AbnormalityKind::Gain | AbnormalityKind::Loss)
    }
}

impl fmt::Display for AbnormalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inheritance marker suffixed to an abnormality token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inheritance {
    #[serde(rename = "mat")]
    Maternal,
    #[serde(rename = "pat")]
    Paternal,
    #[serde(rename = "dn")]
    DeNovo,
}

impl Inheritance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Inheritance::Maternal => "mat",
            Inheritance::Paternal => "pat",
            Inheritance::DeNovo => "dn",
        }
    }
}

impl fmt::Display for Inheritance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural or numerical deviation from the expected complement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abnormality {
    #[serde(rename = "type")]
    pub kind: AbnormalityKind,
    /// Single chromosome id, or a `;`-joined list for multi-chromosome
    /// events such as `t(9;22)`.
    pub chromosome: String,
    pub breakpoints: Vec<Breakpoint>,
    pub inheritance: Option<Inheritance>,
    pub uncertain: bool,
    /// Marker-chromosome multiplicity (`+2mar`).
    pub copy_count: Option<u32>,
    /// The exact original token, uncertainty marker included. Error messages
    /// quote this, and it carries the undecomposed remainder of forms the
    /// model does not fully represent (derivative rest notation).
    pub raw: String,
}

/// Karyotype-wide flags. Declared for forward compatibility; the current
/// parser never populates them and `KaryotypeAST::modifiers` stays `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub mosaic: bool,
    pub chimera: bool,
    pub constitutional: bool,
    pub incomplete: bool,
}

/// Chromosome count field: a number, or a literal range such as `45~48`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChromosomeCount {
    Count(u32),
    Range(String),
}

impl ChromosomeCount {
    pub fn as_number(&self) -> Option<u32> {
        match self {
            ChromosomeCount::Count(n) => Some(*n),
            ChromosomeCount::Range(_) => None,
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, ChromosomeCount::Range(_))
    }
}

impl fmt::Display for ChromosomeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromosomeCount::Count(n) => write!(f, "{}", n),
            ChromosomeCount::Range(r) => f.write_str(r),
        }
    }
}

/// One line of a mosaic or chimeric karyotype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLine {
    pub chromosome_count: ChromosomeCount,
    pub sex_chromosomes: String,
    pub abnormalities: Vec<Abnormality>,
    /// Cell count from the `[n]` suffix, `0` when unspecified.
    pub count: u32,
    /// Reserved for chimera donor lines.
    pub is_donor: bool,
}

/// Abstract syntax tree for a parsed karyotype.
///
/// For mosaic input the top-level fields mirror the first cell line so
/// callers that do not care about mosaicism can ignore `cell_lines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KaryotypeAST {
    pub chromosome_count: ChromosomeCount,
    /// String over the alphabet `{X, Y, U}`, order and repetition preserved.
    pub sex_chromosomes: String,
    pub abnormalities: Vec<Abnormality>,
    /// `None` for non-mosaic input.
    pub cell_lines: Option<Vec<CellLine>>,
    pub modifiers: Option<Modifiers>,
}

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    /// `None` exactly when parsing failed; the single error then describes
    /// the syntactic problem.
    pub parsed: Option<KaryotypeAST>,
}
