//! Karyotype notation parser.
//!
//! Converts raw ISCN text into a [`KaryotypeAST`]. Purely syntactic: no
//! semantic checks happen here beyond what the grammar itself encodes, and
//! no partial AST is ever returned on failure.

mod abnormality;
mod breakpoint;

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Abnormality, CellLine, ChromosomeCount, KaryotypeAST};
use crate::errors::{ParseError, ParseErrorKind};

lazy_static! {
    static ref SEX_CHROMOSOMES: Regex = Regex::new(r"^[XYU]+$").unwrap();
    static ref CELL_COUNT: Regex = Regex::new(r"\[(\d+)\]\s*$").unwrap();
}

/// Parse an ISCN karyotype string into an AST.
pub fn parse(text: &str) -> Result<KaryotypeAST, ParseError> {
    let body = text.trim();
    if body.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyInput,
            text,
            0..text.len(),
        ));
    }
    let base = text.len() - text.trim_start().len();

    // A `/` marks a mosaic: each segment is a cell line with an optional
    // bracketed cell count, and the top level mirrors the first line.
    if body.contains('/') {
        let mut cell_lines = Vec::new();
        for (offset, segment) in split_with_offsets(body, base, '/') {
            cell_lines.push(parse_cell_line(text, segment, offset)?);
        }
        let first = &cell_lines[0];
        return Ok(KaryotypeAST {
            chromosome_count: first.chromosome_count.clone(),
            sex_chromosomes: first.sex_chromosomes.clone(),
            abnormalities: first.abnormalities.clone(),
            cell_lines: Some(cell_lines),
            modifiers: None,
        });
    }

    let (chromosome_count, sex_chromosomes, abnormalities) = parse_fields(text, body, base)?;
    Ok(KaryotypeAST {
        chromosome_count,
        sex_chromosomes,
        abnormalities,
        cell_lines: None,
        modifiers: None,
    })
}

fn parse_cell_line(input: &str, segment: &str, offset: usize) -> Result<CellLine, ParseError> {
    let (body, count) = match CELL_COUNT.captures(segment) {
        Some(caps) => {
            let suffix = caps.get(0).unwrap();
            (&segment[..suffix.start()], caps[1].parse().unwrap_or(0))
        }
        None => (segment, 0),
    };
    let (chromosome_count, sex_chromosomes, abnormalities) = parse_fields(input, body, offset)?;
    Ok(CellLine {
        chromosome_count,
        sex_chromosomes,
        abnormalities,
        count,
        is_donor: false,
    })
}

/// Comma-separated positional fields: count, sex chromosomes, then zero or
/// more abnormality tokens. Empty tokens between commas are skipped.
fn parse_fields(
    input: &str,
    body: &str,
    base: usize,
) -> Result<(ChromosomeCount, String, Vec<Abnormality>), ParseError> {
    if !body.contains(',') {
        return Err(ParseError::new(
            ParseErrorKind::MissingComma,
            input,
            base..base + body.len(),
        ));
    }
    let fields = split_with_offsets(body, base, ',');

    let (count_at, count_text) = trimmed(fields[0]);
    let chromosome_count = parse_chromosome_count(input, count_text, count_at)?;

    let (sex_at, sex_text) = trimmed(fields[1]);
    let sex_chromosomes = parse_sex_chromosomes(input, sex_text, sex_at)?;

    let mut abnormalities = Vec::new();
    for &field in &fields[2..] {
        let (token_at, token) = trimmed(field);
        if token.is_empty() {
            continue;
        }
        abnormalities.push(abnormality::parse_token(input, token, token_at)?);
    }

    Ok((chromosome_count, sex_chromosomes, abnormalities))
}

/// Range notation (`45~48`) is kept as the literal string; anything else
/// must be all digits.
fn parse_chromosome_count(
    input: &str,
    text: &str,
    at: usize,
) -> Result<ChromosomeCount, ParseError> {
    if text.contains('~') {
        return Ok(ChromosomeCount::Range(text.to_string()));
    }
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(count) = text.parse::<u32>() {
            return Ok(ChromosomeCount::Count(count));
        }
    }
    Err(ParseError::new(
        ParseErrorKind::InvalidChromosomeCount(text.to_string()),
        input,
        at..at + text.len(),
    ))
}

fn parse_sex_chromosomes(input: &str, text: &str, at: usize) -> Result<String, ParseError> {
    if SEX_CHROMOSOMES.is_match(text) {
        Ok(text.to_string())
    } else {
        Err(ParseError::new(
            ParseErrorKind::InvalidSexChromosomes(text.to_string()),
            input,
            at..at + text.len(),
        ))
    }
}

/// Splits on `sep`, pairing each piece with its byte offset in the original
/// input so errors can point at the offending field.
fn split_with_offsets(s: &str, base: usize, sep: char) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut pos = 0;
    for piece in s.split(sep) {
        out.push((base + pos, piece));
        pos += piece.len() + sep.len_utf8();
    }
    out
}

fn trimmed((offset, field): (usize, &str)) -> (usize, &str) {
    let start = offset + (field.len() - field.trim_start().len());
    (start, field.trim())
}
