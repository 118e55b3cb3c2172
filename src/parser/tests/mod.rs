//! parser module tests
//!
//! Extracted from mod.rs for better code organization.

use super::*;
use pretty_assertions::assert_eq;

fn loc(line: usize, column: usize) -> SourceLocation {
    SourceLocation::new(line, column)
}

fn first_function(program: &Program) -> &FunctionDef {
    match &program.definitions[0] {
        Definition::Function(f) => f,
        other => panic!("expected a function, got {other:?}"),
    }
}

fn single_statement(source: &str) -> Stmt {
    let program = parse(source).unwrap();
    let func = first_function(&program);
    assert_eq!(func.body.stmts.len(), 1);
    func.body.stmts[0].clone()
}

#[test]
fn test_parse_empty_program() {
    let program = parse("  \n\t").unwrap();
    assert!(program.definitions.is_empty());
}

#[test]
fn test_parse_global_variable() {
    let program = parse("counter = 0;").unwrap();
    assert_eq!(
        program.definitions,
        vec![Definition::Global(GlobalDef {
            name: "counter".to_string(),
            value: Expr::Passthrough(vec![RawPart::Text("0".to_string())]),
            loc: loc(1, 1),
        })]
    );
}

#[test]
fn test_parse_function_def() {
    let code = r#"
main(argc, argv) {
    return 0;
}
"#;
    let program = parse(code).unwrap();
    let func = first_function(&program);
    assert_eq!(func.name, "main");
    let names: Vec<_> = func.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["argc", "argv"]);
    assert_eq!(func.body.stmts.len(), 1);
    assert_eq!(func.loc, loc(2, 1));
}

#[test]
fn test_parse_function_without_params() {
    let program = parse("f() { }").unwrap();
    let func = first_function(&program);
    assert!(func.params.is_empty());
    assert!(func.body.stmts.is_empty());
}

#[test]
fn test_parse_skips_tokens_before_body() {
    let program = parse("f(a) junk { return a; }").unwrap();
    assert_eq!(first_function(&program).body.stmts.len(), 1);
}

#[test]
fn test_parse_program_order() {
    let program = parse("a = 1; f() { } b = 2;").unwrap();
    assert_eq!(program.top_level_names(), vec!["a", "f", "b"]);
}

#[test]
fn test_parse_auto_bare_list() {
    let stmt = single_statement("f() { auto x, y; }");
    assert_eq!(
        stmt,
        Stmt::Auto(vec![
            Declarator {
                name: "x".to_string(),
                init: None,
                loc: loc(1, 12),
            },
            Declarator {
                name: "y".to_string(),
                init: None,
                loc: loc(1, 15),
            },
        ])
    );
}

#[test]
fn test_parse_auto_initializer_ends_list() {
    let Stmt::Auto(decls) = single_statement("f() { auto a, b = 5; }") else {
        panic!("expected auto statement");
    };
    assert_eq!(decls.len(), 2);
    assert!(decls[0].init.is_none());
    assert_eq!(
        decls[1].init,
        Some(Expr::Passthrough(vec![RawPart::Text("5".to_string())]))
    );
}

#[test]
fn test_parse_auto_initializer_keeps_commas() {
    let Stmt::Auto(decls) = single_statement("f() { auto a = 1, 2; }") else {
        panic!("expected auto statement");
    };
    assert_eq!(decls.len(), 1);
    assert_eq!(
        decls[0].init,
        Some(Expr::Passthrough(vec![
            RawPart::Text("1".to_string()),
            RawPart::Text(",".to_string()),
            RawPart::Text("2".to_string()),
        ]))
    );
}

#[test]
fn test_identifier_starting_with_keyword() {
    let stmt = single_statement("f(automatic) { automatic = 1; }");
    assert!(matches!(stmt, Stmt::Expr(Expr::Assign { ref target, .. }) if target == "automatic"));
}

#[test]
fn test_parse_chained_assignment() {
    let stmt = single_statement("f(a, b) { a = b = 5; }");
    let Stmt::Expr(Expr::Assign { target, value, .. }) = stmt else {
        panic!("expected assignment");
    };
    assert_eq!(target, "a");
    match *value {
        Expr::Assign { target, value, .. } => {
            assert_eq!(target, "b");
            assert_eq!(
                *value,
                Expr::Passthrough(vec![RawPart::Text("5".to_string())])
            );
        }
        other => panic!("expected nested assignment, got {other:?}"),
    }
}

#[test]
fn test_parse_call_with_nested_call_argument() {
    let stmt = single_statement("f(a, b) { f(a, f(b, a)); }");
    let Stmt::Expr(Expr::Call(call)) = stmt else {
        panic!("expected call");
    };
    assert_eq!(call.callee, "f");
    assert_eq!(call.args.len(), 2);
    assert!(matches!(&call.args[1], Expr::Call(inner) if inner.args.len() == 2));
}

#[test]
fn test_parse_string_with_comma_argument() {
    let stmt = single_statement(r#"f() { puts("a, b"); }"#);
    let Stmt::Expr(Expr::Call(call)) = stmt else {
        panic!("expected call");
    };
    assert_eq!(call.args, vec![Expr::Str("a, b".to_string())]);
}

#[test]
fn test_parse_passthrough_with_call() {
    let stmt = single_statement("f(x) { x = f(x) + 1; }");
    let Stmt::Expr(Expr::Assign { value, .. }) = stmt else {
        panic!("expected assignment");
    };
    let Expr::Passthrough(parts) = *value else {
        panic!("expected passthrough");
    };
    assert_eq!(parts.len(), 3);
    assert!(matches!(&parts[0], RawPart::Call(c) if c.callee == "f"));
    assert_eq!(parts[1], RawPart::Text("+".to_string()));
}

#[test]
fn test_parse_return_forms() {
    let program = parse("f(x) { return; return x; }").unwrap();
    let stmts = &first_function(&program).body.stmts;
    assert!(matches!(stmts[0], Stmt::Return { value: None, .. }));
    assert!(matches!(stmts[1], Stmt::Return { value: Some(_), .. }));
}

#[test]
fn test_parse_nested_blocks_and_empty_statements() {
    let program = parse("f() { { ; { } } ; }").unwrap();
    let stmts = &first_function(&program).body.stmts;
    assert_eq!(stmts.len(), 2);
    let Stmt::Block(inner) = &stmts[0] else {
        panic!("expected nested block");
    };
    assert_eq!(inner.stmts.len(), 2);
    assert_eq!(inner.stmts[0], Stmt::Empty);
    assert!(matches!(inner.stmts[1], Stmt::Block(_)));
    assert_eq!(stmts[1], Stmt::Empty);
}

// --- error cases ---

#[test]
fn test_unterminated_string_error() {
    let err = parse("f() { puts(\"oops); }").unwrap_err();
    assert!(matches!(err, BlaestError::UnterminatedString { .. }));
}

#[test]
fn test_unterminated_call_error() {
    let err = parse("f(a) { f(a; }").unwrap_err();
    match err {
        BlaestError::UnterminatedCall { callee, loc: at } => {
            assert_eq!(callee, "f");
            assert_eq!(at, loc(1, 8));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_truncated_block() {
    let err = parse("f() { auto x;").unwrap_err();
    assert!(matches!(err, BlaestError::TruncatedInput { construct: "block", .. }));
}

#[test]
fn test_truncated_parameter_list() {
    let err = parse("f(a, b").unwrap_err();
    assert!(matches!(
        err,
        BlaestError::TruncatedInput {
            construct: "parameter list",
            ..
        }
    ));
}

#[test]
fn test_truncated_function_body() {
    let err = parse("f(a)").unwrap_err();
    assert!(matches!(
        err,
        BlaestError::TruncatedInput {
            construct: "function body",
            ..
        }
    ));
}

#[test]
fn test_truncated_auto() {
    let err = parse("f() { auto x, y").unwrap_err();
    assert!(matches!(
        err,
        BlaestError::TruncatedInput {
            construct: "auto declaration",
            ..
        }
    ));
}

#[test]
fn test_truncated_global() {
    let err = parse("x = 5").unwrap_err();
    assert!(matches!(
        err,
        BlaestError::TruncatedInput {
            construct: "global variable value",
            ..
        }
    ));
    let err = parse("x").unwrap_err();
    assert!(matches!(
        err,
        BlaestError::TruncatedInput {
            construct: "global definition",
            ..
        }
    ));
}

#[test]
fn test_invalid_assign_target() {
    let err = parse("f(a) { a + 1 = 2; }").unwrap_err();
    match err {
        BlaestError::InvalidAssignTarget { target, .. } => assert_eq!(target, "a + 1"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_assignment_value() {
    let err = parse("f(a) { a = ; }").unwrap_err();
    assert!(matches!(err, BlaestError::UnexpectedToken { .. }));
}

#[test]
fn test_bad_parameter() {
    let err = parse("f(a b) { }").unwrap_err();
    match err {
        BlaestError::UnexpectedToken { found, .. } => assert_eq!(found, "'a b'"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unexpected_top_level_token() {
    let err = parse("; f() { }").unwrap_err();
    assert!(matches!(err, BlaestError::UnexpectedToken { .. }));
}

#[test]
fn test_brace_inside_statement() {
    let err = parse("f(a) { a = 1 }").unwrap_err();
    match err {
        BlaestError::UnexpectedToken { found, expected, .. } => {
            assert_eq!(found, "'}'");
            assert_eq!(expected, "';'");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// --- comments and character constants ---

#[test]
fn test_comment_inside_expression_is_kept() {
    let stmt = single_statement("f(a) { a = 1 /* 2 */; }");
    match stmt {
        Stmt::Expr(Expr::Assign { target, value, .. }) => {
            assert_eq!(target, "a");
            assert_eq!(
                *value,
                Expr::Passthrough(vec![
                    RawPart::Text("1".to_string()),
                    RawPart::Comment("/* 2 */".to_string()),
                ])
            );
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn test_comment_at_end_of_block() {
    let program = parse("f(a) { a = a + 1; /* bump the counter */ }").unwrap();
    let func = first_function(&program);
    assert_eq!(func.body.stmts.len(), 2);
    assert_eq!(
        func.body.stmts[1],
        Stmt::Comment("/* bump the counter */".to_string())
    );
}

#[test]
fn test_comments_between_statements_and_definitions() {
    let source = "// header\nx = 1;\n/* before */ f(a /* first */, b) /* gap */ {\n  auto c /* none */, d;\n  // note\n  return;\n}\n";
    let program = parse(source).unwrap();
    assert_eq!(program.top_level_names(), vec!["x", "f"]);
    let func = match &program.definitions[1] {
        Definition::Function(f) => f,
        other => panic!("expected a function, got {other:?}"),
    };
    let names: Vec<_> = func.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(func.body.stmts.len(), 3);
    assert!(matches!(&func.body.stmts[0], Stmt::Auto(decls) if decls.len() == 2));
    assert_eq!(func.body.stmts[1], Stmt::Comment("/* note */".to_string()));
}

#[test]
fn test_comment_only_return_has_no_value() {
    let stmt = single_statement("f() { return /* nothing */; }");
    assert!(matches!(stmt, Stmt::Return { value: None, .. }));
}

#[test]
fn test_comment_only_call_has_no_arguments() {
    let stmt = single_statement("f() { f(/* later */); }");
    match stmt {
        Stmt::Expr(Expr::Call(call)) => assert!(call.args.is_empty()),
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn test_char_literal_comma_does_not_split() {
    let stmt = single_statement("f(c) { f(',', ' '); }");
    match stmt {
        Stmt::Expr(Expr::Call(call)) => assert_eq!(
            call.args,
            vec![
                Expr::Passthrough(vec![RawPart::Text("','".to_string())]),
                Expr::Passthrough(vec![RawPart::Text("' '".to_string())]),
            ]
        ),
        other => panic!("unexpected statement: {other:?}"),
    }
}
