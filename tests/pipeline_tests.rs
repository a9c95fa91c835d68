// tests/pipeline_tests.rs
//
// End-to-end behavior of validate_karyotype: parse failures short-circuit
// with parsed = None, semantic violations are all collected alongside the
// AST, and the whole thing is a pure function of its input.

use iscn::ast::{AbnormalityKind, Arm, ChromosomeCount};
use iscn::{is_valid_karyotype, validate_karyotype};

// ---
// Valid karyotypes
// ---

#[test]
fn accepts_common_karyotypes() {
    for text in [
        "46,XX",
        "46,XY",
        "45,X",
        "47,XXX",
        "47,XX,+21",
        "46,XX,del(5)(q13)",
        "46,XX,del(5)(q13q33)",
        "46,XX,t(9;22)(q34;q11.2)",
        "46,XX,inv(9)(p12q13)",
        "46,XX,i(17)(q10)",
        "46,XY,r(1)(p36q42)",
        "47,XX,+mar",
        "46,XX,der(22)t(9;22)(q34;q11.2)",
        "46,XY,hsr(1)(p22)",
        "46,XX,ins(2)(p13q21q31)",
    ] {
        let result = validate_karyotype(text);
        assert!(result.valid, "{text}: {:?}", result.errors);
        assert!(result.parsed.is_some());
    }
}

#[test]
fn normal_female_scenario() {
    let result = validate_karyotype("46,XX");
    assert!(result.valid);
    let ast = result.parsed.unwrap();
    assert_eq!(ast.chromosome_count, ChromosomeCount::Count(46));
    assert_eq!(ast.sex_chromosomes, "XX");
    assert!(ast.abnormalities.is_empty());
}

#[test]
fn trisomy_21_scenario() {
    let result = validate_karyotype("47,XX,+21");
    assert!(result.valid);
    let abn = &result.parsed.unwrap().abnormalities[0];
    assert_eq!(abn.kind, AbnormalityKind::Gain);
    assert_eq!(abn.chromosome, "21");
}

#[test]
fn interstitial_deletion_scenario() {
    let result = validate_karyotype("46,XX,del(5)(q13q33)");
    assert!(result.valid);
    let ast = result.parsed.unwrap();
    let abn = &ast.abnormalities[0];
    assert_eq!(abn.kind, AbnormalityKind::Deletion);
    assert_eq!(abn.chromosome, "5");
    assert_eq!(abn.breakpoints.len(), 2);
    assert_eq!(abn.breakpoints[0].arm, Arm::Q);
    assert_eq!(abn.breakpoints[1].arm, Arm::Q);
    assert_eq!(abn.breakpoints[1].region, Some(3));
    assert_eq!(abn.breakpoints[1].band, Some(3));
}

#[test]
fn mosaic_scenario() {
    let result = validate_karyotype("47,XX,+21[10]/46,XX[20]");
    assert!(result.valid, "{:?}", result.errors);
    let ast = result.parsed.unwrap();
    let lines = ast.cell_lines.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].count, 10);
    assert_eq!(lines[1].count, 20);
    assert!(lines[1].abnormalities.is_empty());
}

// ---
// Parse failures: parsed is None, single error
// ---

#[test]
fn empty_input_reports_empty() {
    let result = validate_karyotype("");
    assert!(!result.valid);
    assert!(result.parsed.is_none());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("empty"));
}

#[test]
fn strings_without_comma_report_missing_separator() {
    for text in ["46XX", "46", "karyotype", "47 XY +21"] {
        let result = validate_karyotype(text);
        assert!(!result.valid, "{text}");
        assert!(result.parsed.is_none(), "{text}");
        assert_eq!(result.errors.len(), 1, "{text}");
        assert!(result.errors[0].to_lowercase().contains("comma"), "{text}");
    }
}

#[test]
fn malformed_abnormality_interiors_are_fatal() {
    for text in [
        "46,XX,del(5)(q)",
        "46,XX,del(5)(13q)",
        "46,XX,del(5)q13",
        "46,XX,inv(3)(q21)",
        "46,XX,t(9)(q34)",
        "46,XX,i(17)",
    ] {
        let result = validate_karyotype(text);
        assert!(!result.valid, "{text}");
        assert!(result.parsed.is_none(), "{text}");
        assert_eq!(result.errors.len(), 1, "{text}");
    }
}

// ---
// Semantic violations: parsed is Some, all violations collected
// ---

#[test]
fn y_only_sex_chromosomes_mention_x() {
    let result = validate_karyotype("46,Y");
    assert!(!result.valid);
    assert!(result.parsed.is_some());
    assert!(result.errors.iter().any(|e| e.contains("at least one X")));
}

#[test]
fn undisclosed_sex_never_trips_the_x_rule() {
    for text in ["46,U", "45,U", "47,U"] {
        let result = validate_karyotype(text);
        assert!(
            !result.errors.iter().any(|e| e.contains("at least one X")),
            "{text}: {:?}",
            result.errors
        );
    }
}

#[test]
fn incoherent_count_is_rejected() {
    // 46,X with no abnormalities cannot account for 46 chromosomes.
    let result = validate_karyotype("46,X");
    assert!(!result.valid);
    assert!(result.errors[0].contains("46"));
}

#[test]
fn out_of_range_count_is_rejected() {
    let result = validate_karyotype("99,XX");
    assert!(!result.valid);
    assert!(result.errors.iter().any(|e| e.contains("between 23 and 92")));
}

#[test]
fn bare_ring_violates_the_ring_rule() {
    let result = validate_karyotype("46,XX,r(1)");
    assert!(!result.valid);
    assert!(result.parsed.is_some());
    assert!(result.errors[0].contains("Ring chromosome"));
}

#[test]
fn cross_arm_deletion_is_rejected() {
    let result = validate_karyotype("46,XX,del(5)(p13q33)");
    assert!(!result.valid);
    assert!(result.errors[0].contains("same arm"));
}

#[test]
fn invalid_numerical_chromosome_is_rejected() {
    let result = validate_karyotype("47,XX,+23");
    assert!(!result.valid);
    assert!(result.errors[0].contains("Must be 1-22, X, or Y"));
}

#[test]
fn all_violations_are_collected_together() {
    // Bad count bounds + cross-arm deletion + bad gain, in catalog order.
    let result = validate_karyotype("95,XX,del(5)(p13q33),+23");
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 3);
    assert!(result.errors[0].contains("between 23 and 92"));
    assert!(result.errors[1].contains("same arm"));
    assert!(result.errors[2].contains("Must be 1-22, X, or Y"));
}

// ---
// Structural tolerance
// ---

#[test]
fn unknown_tokens_are_tolerated() {
    let result = validate_karyotype("46,XX,somethingodd");
    assert!(result.valid, "{:?}", result.errors);
    let ast = result.parsed.unwrap();
    assert_eq!(ast.abnormalities[0].kind, AbnormalityKind::Unknown);
    assert_eq!(ast.abnormalities[0].raw, "somethingodd");
}

// ---
// Properties
// ---

#[test]
fn validation_is_idempotent() {
    for text in ["46,XX", "46,Y", "46,XX,del(5)(q13q33)", "", "47,XX,+21[10]/46,XX[20]"] {
        assert_eq!(validate_karyotype(text), validate_karyotype(text), "{text}");
    }
}

#[test]
fn translocation_breakpoints_always_match_chromosomes_when_valid() {
    for text in [
        "46,XX,t(9;22)(q34;q11.2)",
        "46,XY,t(1;3;5)(p32;q21;q31)",
        "46,X,t(X;18)(p11.2;q21)",
    ] {
        let result = validate_karyotype(text);
        assert!(result.valid, "{text}");
        let ast = result.parsed.unwrap();
        let abn = &ast.abnormalities[0];
        assert_eq!(
            abn.chromosome.split(';').count(),
            abn.breakpoints.len(),
            "{text}"
        );
    }
}

#[test]
fn two_breakpoint_del_dup_valid_iff_same_arm() {
    for (text, expect_valid) in [
        ("46,XX,del(5)(q13q33)", true),
        ("46,XX,del(5)(p13q33)", false),
        ("46,XX,dup(1)(p31p22)", true),
        ("46,XX,dup(1)(p31q22)", false),
    ] {
        let result = validate_karyotype(text);
        assert_eq!(result.valid, expect_valid, "{text}: {:?}", result.errors);
        let ast = result.parsed.unwrap();
        let bps = &ast.abnormalities[0].breakpoints;
        assert_eq!(bps.len(), 2, "{text}");
        assert_eq!(bps[0].arm == bps[1].arm, expect_valid, "{text}");
    }
}

#[test]
fn is_valid_matches_the_detailed_result() {
    for text in ["46,XX", "46,Y", "", "46,XX,del(5)(q)", "47,XX,+21"] {
        assert_eq!(is_valid_karyotype(text), validate_karyotype(text).valid, "{text}");
    }
}

// ---
// Wire shape
// ---

#[test]
fn result_serializes_to_the_documented_shape() {
    let value = serde_json::to_value(validate_karyotype("47,XX,+21")).unwrap();
    assert_eq!(value["valid"], serde_json::json!(true));
    assert_eq!(value["errors"], serde_json::json!([]));
    assert_eq!(value["parsed"]["chromosome_count"], serde_json::json!(47));
    assert_eq!(value["parsed"]["sex_chromosomes"], serde_json::json!("XX"));
    let abn = &value["parsed"]["abnormalities"][0];
    assert_eq!(abn["type"], serde_json::json!("+"));
    assert_eq!(abn["chromosome"], serde_json::json!("21"));
    assert_eq!(abn["inheritance"], serde_json::Value::Null);
    assert_eq!(abn["copy_count"], serde_json::Value::Null);
    assert_eq!(value["parsed"]["cell_lines"], serde_json::Value::Null);
    assert_eq!(value["parsed"]["modifiers"], serde_json::Value::Null);
}

#[test]
fn parse_failure_serializes_with_null_parsed() {
    let value = serde_json::to_value(validate_karyotype("46XX")).unwrap();
    assert_eq!(value["valid"], serde_json::json!(false));
    assert_eq!(value["parsed"], serde_json::Value::Null);
}

#[test]
fn range_count_serializes_as_string() {
    let value = serde_json::to_value(validate_karyotype("45~48,XX")).unwrap();
    assert_eq!(value["parsed"]["chromosome_count"], serde_json::json!("45~48"));
}

#[test]
fn breakpoints_serialize_with_arm_and_subband() {
    let value = serde_json::to_value(validate_karyotype("46,XY,del(7)(p11.2)")).unwrap();
    let bp = &value["parsed"]["abnormalities"][0]["breakpoints"][0];
    assert_eq!(bp["arm"], serde_json::json!("p"));
    assert_eq!(bp["region"], serde_json::json!(1));
    assert_eq!(bp["band"], serde_json::json!(1));
    assert_eq!(bp["subband"], serde_json::json!("2"));
    assert_eq!(bp["uncertain"], serde_json::json!(false));
}
