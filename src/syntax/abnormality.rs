//! Abnormality token dispatch.
//!
//! Each recognized form has its own sub-parser; the table below fixes the
//! order they are tried in. First match wins, and the order is load-bearing
//! where prefixes overlap: `ins(` must be tried before `i(`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Abnormality, AbnormalityKind, Arm, Breakpoint, Inheritance};
use crate::errors::{ParseError, ParseErrorKind};

use super::breakpoint::{parse_breakpoint, parse_breakpoint_run};

/// What a sub-parser concluded about a token.
enum Outcome {
    /// The token does not belong to this form; try the next one.
    NoMatch,
    /// Fully recognized.
    Parsed(Recognized),
    /// The form's opening token matched but the interior does not fit its
    /// required shape. The token cannot belong to any later form, so this
    /// is a fatal parse failure.
    Malformed {
        form: &'static str,
        expected: &'static str,
    },
}

struct Recognized {
    kind: AbnormalityKind,
    chromosome: String,
    breakpoints: Vec<Breakpoint>,
    copy_count: Option<u32>,
}

impl Recognized {
    fn new(kind: AbnormalityKind, chromosome: impl Into<String>) -> Self {
        Self {
            kind,
            chromosome: chromosome.into(),
            breakpoints: Vec::new(),
            copy_count: None,
        }
    }

    fn with_breakpoints(mut self, breakpoints: Vec<Breakpoint>) -> Self {
        self.breakpoints = breakpoints;
        self
    }
}

/// The ordered (matcher, builder) table.
const SUB_PARSERS: &[fn(&str) -> Outcome] = &[
    numerical,
    deletion,
    additional_material,
    duplication,
    inversion,
    translocation,
    insertion,
    isochromosome,
    ring,
    marker,
    derivative,
    double_minutes,
    hsr,
];

lazy_static! {
    static ref NUMERICAL: Regex = Regex::new(r"^([+-])(\d{1,2}|[XY])$").unwrap();
    static ref DELETION: Regex = Regex::new(r"^del\((\d{1,2}|[XY])\)\(([^()]*)\)$").unwrap();
    static ref ADDITIONAL: Regex = Regex::new(r"^add\((\d{1,2}|[XY])\)\(([^()]*)\)$").unwrap();
    static ref DUPLICATION: Regex = Regex::new(r"^dup\((\d{1,2}|[XY])\)\(([^()]*)\)$").unwrap();
    static ref INVERSION: Regex = Regex::new(r"^inv\((\d{1,2}|[XY])\)\(([^()]*)\)$").unwrap();
    static ref TRANSLOCATION: Regex = Regex::new(r"^t\(([^()]*)\)\(([^()]*)\)$").unwrap();
    static ref INSERTION: Regex = Regex::new(r"^ins\(([^()]*)\)\(([^()]*)\)$").unwrap();
    static ref ISO_SHORT: Regex = Regex::new(r"^i\((\d{1,2}|[XY])([pq])\)$").unwrap();
    static ref ISO_LONG: Regex = Regex::new(r"^i\((\d{1,2}|[XY])\)\(([^()]*)\)$").unwrap();
    static ref RING_BARE: Regex = Regex::new(r"^r\((\d{1,2}|[XY])\)$").unwrap();
    static ref RING_BANDED: Regex = Regex::new(r"^r\((\d{1,2}|[XY])\)\(([^()]*)\)$").unwrap();
    static ref MARKER: Regex = Regex::new(r"^\+(\d+)?mar(\d+)?$").unwrap();
    static ref DERIVATIVE: Regex = Regex::new(r"^der\((\d{1,2}|[XY])\)(.*)$").unwrap();
    static ref HSR_SITE: Regex = Regex::new(r"^hsr\((\d{1,2}|[XY])\)\(([^()]*)\)$").unwrap();
    static ref CHROMOSOME_ID: Regex = Regex::new(r"^(\d{1,2}|[XY])$").unwrap();
}

/// Parses one comma-separated abnormality token at byte offset `at` of the
/// original input (used for error spans).
pub(super) fn parse_token(input: &str, token: &str, at: usize) -> Result<Abnormality, ParseError> {
    let raw = token.to_string();
    let (uncertain, rest) = match token.strip_prefix('?') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let (inheritance, body) = strip_inheritance(rest);

    for sub_parser in SUB_PARSERS {
        match sub_parser(body) {
            Outcome::NoMatch => continue,
            Outcome::Parsed(hit) => {
                return Ok(Abnormality {
                    kind: hit.kind,
                    chromosome: hit.chromosome,
                    breakpoints: hit.breakpoints,
                    inheritance,
                    uncertain,
                    copy_count: hit.copy_count,
                    raw,
                })
            }
            Outcome::Malformed { form, expected } => {
                return Err(ParseError::new(
                    ParseErrorKind::MalformedAbnormality {
                        form,
                        token: raw,
                        expected,
                    },
                    input,
                    at..at + token.len(),
                ))
            }
        }
    }

    // Unrecognized notation is tolerated structurally; the rule catalog may
    // flag it later, or not at all.
    Ok(Abnormality {
        kind: AbnormalityKind::Unknown,
        chromosome: String::new(),
        breakpoints: Vec::new(),
        inheritance,
        uncertain,
        copy_count: None,
        raw,
    })
}

/// Trailing inheritance suffix, checked in fixed order: `mat`, `pat`, `dn`.
fn strip_inheritance(token: &str) -> (Option<Inheritance>, &str) {
    for (suffix, marker) in [
        ("mat", Inheritance::Maternal),
        ("pat", Inheritance::Paternal),
        ("dn", Inheritance::DeNovo),
    ] {
        if let Some(body) = token.strip_suffix(suffix) {
            return (Some(marker), body);
        }
    }
    (None, token)
}

fn numerical(token: &str) -> Outcome {
    match NUMERICAL.captures(token) {
        Some(caps) => {
            let kind = if &caps[1] == "+" {
                AbnormalityKind::Gain
            } else {
                AbnormalityKind::Loss
            };
            Outcome::Parsed(Recognized::new(kind, &caps[2]))
        }
        None => Outcome::NoMatch,
    }
}

/// Shared shape of `del`/`add`/`dup`: `<form>(<chromosome>)(<breakpoints>)`
/// where the interior is a run of one to three consecutive breakpoints.
fn banded(
    token: &str,
    prefix: &str,
    pattern: &Regex,
    form: &'static str,
    kind: AbnormalityKind,
) -> Outcome {
    if !token.starts_with(prefix) {
        return Outcome::NoMatch;
    }
    let caps = match pattern.captures(token) {
        Some(caps) => caps,
        None => {
            return Outcome::Malformed {
                form,
                expected: "(<chromosome>)(<breakpoints>)",
            }
        }
    };
    match parse_breakpoint_run(&caps[2]) {
        Some(breakpoints) => {
            Outcome::Parsed(Recognized::new(kind, &caps[1]).with_breakpoints(breakpoints))
        }
        None => Outcome::Malformed {
            form,
            expected: "a run of one to three breakpoints",
        },
    }
}

fn deletion(token: &str) -> Outcome {
    banded(token, "del(", &DELETION, "deletion", AbnormalityKind::Deletion)
}

fn additional_material(token: &str) -> Outcome {
    banded(
        token,
        "add(",
        &ADDITIONAL,
        "additional material",
        AbnormalityKind::AdditionalMaterial,
    )
}

fn duplication(token: &str) -> Outcome {
    banded(
        token,
        "dup(",
        &DUPLICATION,
        "duplication",
        AbnormalityKind::Duplication,
    )
}

/// Inversions must resolve to exactly two breakpoints at parse time.
fn inversion(token: &str) -> Outcome {
    if !token.starts_with("inv(") {
        return Outcome::NoMatch;
    }
    let caps = match INVERSION.captures(token) {
        Some(caps) => caps,
        None => {
            return Outcome::Malformed {
                form: "inversion",
                expected: "(<chromosome>)(<breakpoint><breakpoint>)",
            }
        }
    };
    match parse_breakpoint_run(&caps[2]) {
        Some(breakpoints) if breakpoints.len() == 2 => Outcome::Parsed(
            Recognized::new(AbnormalityKind::Inversion, &caps[1]).with_breakpoints(breakpoints),
        ),
        _ => Outcome::Malformed {
            form: "inversion",
            expected: "exactly two breakpoints",
        },
    }
}

fn translocation(token: &str) -> Outcome {
    if !token.starts_with("t(") {
        return Outcome::NoMatch;
    }
    let caps = match TRANSLOCATION.captures(token) {
        Some(caps) => caps,
        None => {
            return Outcome::Malformed {
                form: "translocation",
                expected: "(<chromosome>;<chromosome>)(<breakpoint>;<breakpoint>)",
            }
        }
    };
    let chromosomes: Vec<&str> = caps[1].split(';').collect();
    if chromosomes.len() < 2 || !chromosomes.iter().all(|c| CHROMOSOME_ID.is_match(c)) {
        return Outcome::Malformed {
            form: "translocation",
            expected: "two or more ';'-separated chromosomes",
        };
    }
    let mut breakpoints = Vec::new();
    for segment in caps[2].split(';') {
        match parse_breakpoint(segment) {
            Some(bp) => breakpoints.push(bp),
            None => {
                return Outcome::Malformed {
                    form: "translocation",
                    expected: "';'-separated breakpoints",
                }
            }
        }
    }
    // Breakpoint count may still disagree with the chromosome count; that is
    // a semantic violation, left to the rule catalog.
    Outcome::Parsed(
        Recognized::new(AbnormalityKind::Translocation, &caps[1]).with_breakpoints(breakpoints),
    )
}

fn insertion(token: &str) -> Outcome {
    if !token.starts_with("ins(") {
        return Outcome::NoMatch;
    }
    let caps = match INSERTION.captures(token) {
        Some(caps) => caps,
        None => {
            return Outcome::Malformed {
                form: "insertion",
                expected: "(<chromosomes>)(<breakpoints>)",
            }
        }
    };
    let chromosome = caps[1].to_string();
    let bands = &caps[2];

    let breakpoints = if chromosome.contains(';') {
        // Interchromosomal: receptor breakpoint, then the donor segment,
        // which itself decomposes into one or two breakpoints.
        let chromosomes: Vec<&str> = chromosome.split(';').collect();
        if chromosomes.len() != 2 || !chromosomes.iter().all(|c| CHROMOSOME_ID.is_match(c)) {
            return Outcome::Malformed {
                form: "insertion",
                expected: "exactly two ';'-separated chromosomes",
            };
        }
        let segments: Vec<&str> = bands.split(';').collect();
        if segments.len() != 2 {
            return Outcome::Malformed {
                form: "insertion",
                expected: "a receptor breakpoint and a donor segment",
            };
        }
        let receptor = match parse_breakpoint(segments[0]) {
            Some(bp) => bp,
            None => {
                return Outcome::Malformed {
                    form: "insertion",
                    expected: "a receptor breakpoint before the ';'",
                }
            }
        };
        match parse_breakpoint_run(segments[1]) {
            Some(donor) if donor.len() <= 2 => {
                let mut all = vec![receptor];
                all.extend(donor);
                all
            }
            _ => {
                return Outcome::Malformed {
                    form: "insertion",
                    expected: "one or two donor breakpoints after the ';'",
                }
            }
        }
    } else {
        if !CHROMOSOME_ID.is_match(&chromosome) {
            return Outcome::Malformed {
                form: "insertion",
                expected: "a chromosome identifier",
            };
        }
        match parse_breakpoint_run(bands) {
            Some(breakpoints) => breakpoints,
            None => {
                return Outcome::Malformed {
                    form: "insertion",
                    expected: "a run of up to three breakpoints",
                }
            }
        }
    };

    Outcome::Parsed(
        Recognized::new(AbnormalityKind::Insertion, chromosome).with_breakpoints(breakpoints),
    )
}

fn isochromosome(token: &str) -> Outcome {
    if !token.starts_with("i(") {
        return Outcome::NoMatch;
    }
    if let Some(caps) = ISO_SHORT.captures(token) {
        let arm = if &caps[2] == "p" { Arm::P } else { Arm::Q };
        let breakpoint = Breakpoint {
            arm,
            region: None,
            band: None,
            subband: None,
            uncertain: false,
        };
        return Outcome::Parsed(
            Recognized::new(AbnormalityKind::Isochromosome, &caps[1])
                .with_breakpoints(vec![breakpoint]),
        );
    }
    if let Some(caps) = ISO_LONG.captures(token) {
        if let Some(bp) = parse_breakpoint(&caps[2]) {
            return Outcome::Parsed(
                Recognized::new(AbnormalityKind::Isochromosome, &caps[1])
                    .with_breakpoints(vec![bp]),
            );
        }
    }
    Outcome::Malformed {
        form: "isochromosome",
        expected: "i(<chromosome><arm>) or i(<chromosome>)(<breakpoint>)",
    }
}

fn ring(token: &str) -> Outcome {
    if !token.starts_with("r(") {
        return Outcome::NoMatch;
    }
    if let Some(caps) = RING_BARE.captures(token) {
        return Outcome::Parsed(Recognized::new(AbnormalityKind::Ring, &caps[1]));
    }
    if let Some(caps) = RING_BANDED.captures(token) {
        if let Some(breakpoints) = parse_breakpoint_run(&caps[2]) {
            return Outcome::Parsed(
                Recognized::new(AbnormalityKind::Ring, &caps[1]).with_breakpoints(breakpoints),
            );
        }
    }
    Outcome::Malformed {
        form: "ring",
        expected: "r(<chromosome>) or r(<chromosome>)(<breakpoints>)",
    }
}

fn marker(token: &str) -> Outcome {
    match MARKER.captures(token) {
        Some(caps) => {
            let copy_count = caps.get(1).and_then(|m| m.as_str().parse().ok());
            let chromosome = match caps.get(2) {
                Some(number) => format!("mar{}", number.as_str()),
                None => "mar".to_string(),
            };
            let mut hit = Recognized::new(AbnormalityKind::Marker, chromosome);
            hit.copy_count = copy_count;
            Outcome::Parsed(hit)
        }
        None => Outcome::NoMatch,
    }
}

/// Derivative chromosomes are only partially decomposed: the chromosome id
/// is extracted and the trailing rearrangement notation survives verbatim in
/// `raw`. A `der` token that does not fit falls through to `unknown`.
fn derivative(token: &str) -> Outcome {
    match DERIVATIVE.captures(token) {
        Some(caps) => Outcome::Parsed(Recognized::new(AbnormalityKind::Derivative, &caps[1])),
        None => Outcome::NoMatch,
    }
}

fn double_minutes(token: &str) -> Outcome {
    if token == "dmin" {
        Outcome::Parsed(Recognized::new(AbnormalityKind::DoubleMinutes, ""))
    } else {
        Outcome::NoMatch
    }
}

fn hsr(token: &str) -> Outcome {
    if token == "hsr" {
        return Outcome::Parsed(Recognized::new(AbnormalityKind::Hsr, ""));
    }
    if !token.starts_with("hsr(") {
        return Outcome::NoMatch;
    }
    if let Some(caps) = HSR_SITE.captures(token) {
        if let Some(bp) = parse_breakpoint(&caps[2]) {
            return Outcome::Parsed(
                Recognized::new(AbnormalityKind::Hsr, &caps[1]).with_breakpoints(vec![bp]),
            );
        }
    }
    Outcome::Malformed {
        form: "hsr",
        expected: "hsr or hsr(<chromosome>)(<breakpoint>)",
    }
}
