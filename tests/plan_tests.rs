//! Plan Tests
//!
//! Tests for action parsing and plan compilation.

use divi::plan::{parse_text, Action, LogicalPlan};
use divi::{Bucket, DiviError};

// =============================================================================
// Action Parser Tests
// =============================================================================

#[test]
fn test_parse_single_line() {
    let actions = parse_text("GET key");

    assert_eq!(
        actions,
        vec![Action {
            op: "GET".to_string(),
            args: vec!["key".to_string()],
            line: 1,
        }]
    );
}

#[test]
fn test_parse_preserves_line_order() {
    let actions = parse_text("GET key\nPUT key value\nGET key");

    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0].op, "GET");
    assert_eq!(actions[1].op, "PUT");
    assert_eq!(actions[1].args, vec!["key", "value"]);
    assert_eq!(actions[2].op, "GET");
    assert_eq!(actions[2].line, 3);
}

#[test]
fn test_parse_no_trailing_newline_yields_final_line() {
    let actions = parse_text("INC a\nINC b");

    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1].op, "INC");
    assert_eq!(actions[1].args, vec!["b"]);
}

#[test]
fn test_parse_line_without_space_has_no_args() {
    let actions = parse_text("GET");

    assert_eq!(actions[0].op, "GET");
    assert!(actions[0].args.is_empty());
}

#[test]
fn test_parse_empty_line_yields_empty_action() {
    let actions = parse_text("GET key\n\nGET key");

    assert_eq!(actions.len(), 3);
    assert_eq!(actions[1].op, "");
    assert!(actions[1].args.is_empty());
    assert_eq!(actions[1].line, 2);
}

#[test]
fn test_parse_does_not_validate() {
    // Unknown ops and wrong arities pass through the parser untouched.
    let actions = parse_text("FOO a b c\nPUT onlykey");

    assert_eq!(actions[0].op, "FOO");
    assert_eq!(actions[0].args, vec!["a", "b", "c"]);
    assert_eq!(actions[1].args, vec!["onlykey"]);
}

#[test]
fn test_action_display() {
    let actions = parse_text("GET key\nPUT key value\nGET key");
    let rendered = actions
        .iter()
        .map(Action::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    assert_eq!(
        rendered,
        "op:GET args:[key]\nop:PUT args:[key, value]\nop:GET args:[key]"
    );
}

// =============================================================================
// Plan Compiler Tests
// =============================================================================

#[test]
fn test_compile_well_formed_plan() {
    let plan = LogicalPlan::from_text("GET key\nPUT key value\nGET key").unwrap();

    assert_eq!(plan.len(), 3);
    assert_eq!(plan.explain(), "GET:key\nPUT:key,value\nGET:key");
}

#[test]
fn test_compile_counter_plan() {
    let plan = LogicalPlan::from_text("COUNT key\nINC key\nINC key").unwrap();

    assert_eq!(plan.explain(), "COUNT:key\nINC:key\nINC:key");
}

#[test]
fn test_compile_unknown_op_names_token_and_line() {
    let err = LogicalPlan::from_text("GET key\nFOO key").unwrap_err();

    match err {
        DiviError::UnknownOp { op, line } => {
            assert_eq!(op, "FOO");
            assert_eq!(line, 2);
        }
        other => panic!("Expected UnknownOp, got {:?}", other),
    }
}

#[test]
fn test_compile_is_case_sensitive() {
    let err = LogicalPlan::from_text("get key").unwrap_err();

    assert!(matches!(err, DiviError::UnknownOp { .. }));
}

#[test]
fn test_compile_put_arity_too_few() {
    let err = LogicalPlan::from_text("PUT onlykey").unwrap_err();

    match err {
        DiviError::Arity {
            op,
            expected,
            actual,
            line,
        } => {
            assert_eq!(op, "PUT");
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
            assert_eq!(line, 1);
        }
        other => panic!("Expected Arity, got {:?}", other),
    }
}

#[test]
fn test_compile_get_arity_too_many() {
    let err = LogicalPlan::from_text("GET key extra").unwrap_err();

    match err {
        DiviError::Arity {
            op,
            expected,
            actual,
            ..
        } => {
            assert_eq!(op, "GET");
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        other => panic!("Expected Arity, got {:?}", other),
    }
}

#[test]
fn test_compile_rejects_empty_line() {
    let err = LogicalPlan::from_text("GET key\n\nGET key").unwrap_err();

    match err {
        DiviError::MalformedLine { line } => assert_eq!(line, 2),
        other => panic!("Expected MalformedLine, got {:?}", other),
    }
}

#[test]
fn test_compile_rejects_trailing_newline() {
    // The body is passed to the parser unmodified, so a trailing newline
    // is a final empty line.
    let err = LogicalPlan::from_text("GET key\n").unwrap_err();

    assert!(matches!(err, DiviError::MalformedLine { line: 2 }));
}

#[test]
fn test_compile_failure_leaves_store_untouched() {
    let bucket = Bucket::new();

    // Both a vocabulary failure and an arity failure: no plan exists, so
    // nothing ever executes.
    assert!(LogicalPlan::from_text("PUT key value\nFOO key").is_err());
    assert!(LogicalPlan::from_text("PUT onlykey").is_err());

    assert_eq!(bucket.dump(), "");
}
