//! Breakpoint grammar: `(arm)(digits)(.(digits))?` with arm `p` or `q`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Arm, Breakpoint};

lazy_static! {
    static ref BREAKPOINT: Regex = Regex::new(r"^([pq])(\d+)(?:\.(\d+))?$").unwrap();
    static ref BREAKPOINT_RUN: Regex = Regex::new(r"^(?:[pq]\d+(?:\.\d+)?){1,3}$").unwrap();
    static ref BREAKPOINT_GROUP: Regex = Regex::new(r"[pq]\d+(?:\.\d+)?").unwrap();
}

pub(super) fn parse_breakpoint(s: &str) -> Option<Breakpoint> {
    let caps = BREAKPOINT.captures(s)?;
    let arm = if &caps[1] == "p" { Arm::P } else { Arm::Q };
    let (region, band) = split_region_band(&caps[2])?;
    Some(Breakpoint {
        arm,
        region: Some(region),
        band: Some(band),
        subband: caps.get(3).map(|m| m.as_str().to_string()),
        uncertain: false,
    })
}

/// Splits up to three back-to-back breakpoint groups (`q13q33`) into their
/// constituent breakpoints. The full string must be covered by the groups.
pub(super) fn parse_breakpoint_run(s: &str) -> Option<Vec<Breakpoint>> {
    if !BREAKPOINT_RUN.is_match(s) {
        return None;
    }
    BREAKPOINT_GROUP
        .find_iter(s)
        .map(|group| parse_breakpoint(group.as_str()))
        .collect()
}

/// A digit run of length >= 2 splits as first digit = region, remainder =
/// band (`q133` -> region 1, band 33); a single digit is the region with
/// band 0.
fn split_region_band(digits: &str) -> Option<(u32, u32)> {
    if digits.len() >= 2 {
        Some((digits[..1].parse().ok()?, digits[1..].parse().ok()?))
    } else {
        Some((digits.parse().ok()?, 0))
    }
}
