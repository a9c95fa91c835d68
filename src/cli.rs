//! Command-line wrapper around the validation pipeline.
//!
//! Reads a karyotype from the argument or from standard input, prints the
//! JSON result to stdout, and exits 0 for a valid karyotype, 1 for an
//! invalid one, 2 when no input was provided.

use std::io::Read;

use clap::Parser;
use serde_json::json;

use crate::ast::ValidationResult;
use crate::engine::{validate_ast, validate_karyotype};
use crate::syntax;

#[derive(Debug, Parser)]
#[command(
    name = "validate_karyotype",
    version,
    about = "Validate ISCN karyotype notation strings."
)]
pub struct Cli {
    /// Karyotype string; read from standard input when omitted.
    pub karyotype: Option<String>,

    /// Emit single-line JSON instead of pretty-printed output.
    #[arg(long)]
    pub compact: bool,

    /// Render parse failures as a diagnostic report on stderr in addition
    /// to the JSON result.
    #[arg(long)]
    pub diagnose: bool,
}

/// Runs the CLI and returns the process exit code.
pub fn run(cli: &Cli) -> i32 {
    let karyotype = match &cli.karyotype {
        Some(arg) => arg.clone(),
        None => {
            let mut buffer = String::new();
            if std::io::stdin().read_to_string(&mut buffer).is_err() {
                buffer.clear();
            }
            buffer.trim().to_string()
        }
    };

    if karyotype.is_empty() {
        let result = json!({
            "valid": false,
            "errors": ["No karyotype provided"],
            "parsed": null,
        });
        print_json(&result, cli.compact);
        return 2;
    }

    let result = if cli.diagnose {
        match syntax::parse(&karyotype) {
            Ok(ast) => validate_ast(&ast),
            Err(error) => {
                let message = error.to_string();
                eprintln!("{:?}", miette::Report::new(error));
                ValidationResult {
                    valid: false,
                    errors: vec![message],
                    parsed: None,
                }
            }
        }
    } else {
        validate_karyotype(&karyotype)
    };

    match serde_json::to_value(&result) {
        Ok(value) => print_json(&value, cli.compact),
        Err(error) => {
            eprintln!("error: failed to serialize result: {}", error);
            return 2;
        }
    }
    if result.valid {
        0
    } else {
        1
    }
}

fn print_json(value: &serde_json::Value, compact: bool) {
    if compact {
        println!("{}", value);
    } else {
        println!("{:#}", value);
    }
}
