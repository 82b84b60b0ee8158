// Integration tests for the cipp parser

use cipp::parser::ast::*;
use cipp::parser::lexer::Lexer;
use cipp::parser::stream::TokenStream;
use cipp::{parse_source, ParseError, Parser};

fn stmt(source: &str) -> Stmt {
    let mut parser = Parser::new(source).expect("Parser creation failed");
    let stmt = parser.parse_statement().expect("Parsing failed");
    assert!(parser.is_at_end(), "unconsumed input after {:?}", source);
    stmt
}

fn expr(source: &str) -> Expr {
    let mut parser = Parser::new(source).expect("Parser creation failed");
    let expr = parser.parse_expression().expect("Parsing failed");
    assert!(parser.is_at_end(), "unconsumed input after {:?}", source);
    expr
}

fn int(value: i64) -> Expr {
    Expr::ConstInt(value)
}

fn add(expr: Expr) -> Term<AddOp> {
    Term::new(AddOp::Add, expr)
}

fn sub(expr: Expr) -> Term<AddOp> {
    Term::new(AddOp::Sub, expr)
}

fn mul(expr: Expr) -> Term<MulOp> {
    Term::new(MulOp::Mul, expr)
}

#[test]
fn test_empty_program() {
    let program = parse_source("").expect("Parsing failed");
    assert!(program.functions.is_empty());

    let program = parse_source("  // nothing here\n /* at all */ ").expect("Parsing failed");
    assert_eq!(program, Program::new());
}

#[test]
fn test_single_statement_block_collapses() {
    assert_eq!(stmt("{ return 1; }"), stmt("return 1;"));
    assert_eq!(stmt("{ return 1; }"), Stmt::Return(int(1)));
}

#[test]
fn test_block_keeps_source_order() {
    assert_eq!(
        stmt("{ a = 1; b = 2; return a; }"),
        Stmt::Block(vec![
            Stmt::Assignment {
                target: "a".to_string(),
                value: int(1),
            },
            Stmt::Assignment {
                target: "b".to_string(),
                value: int(2),
            },
            Stmt::Return(Expr::Variable("a".to_string())),
        ])
    );
}

#[test]
fn test_add_sub_collapsing() {
    assert_eq!(expr("1"), int(1));
    assert_eq!(expr("1+2"), Expr::AddSub(vec![add(int(1)), add(int(2))]));
}

#[test]
fn test_left_associativity_is_flat() {
    assert_eq!(
        expr("1-2-3"),
        Expr::AddSub(vec![add(int(1)), sub(int(2)), sub(int(3))])
    );
}

#[test]
fn test_comparisons_do_not_chain() {
    let err = Parser::new("return 1<2<3;")
        .unwrap()
        .parse_statement()
        .unwrap_err();
    assert_eq!(err.message, "expected token ';', found token '<'");

    let mut parser = Parser::new("1<2<3").unwrap();
    assert!(matches!(
        parser.parse_expression().unwrap(),
        Expr::Comparison { op: CmpOp::Lt, .. }
    ));
    assert_eq!(parser.remaining(), 2);
}

#[test]
fn test_mul_binds_tighter_than_add() {
    assert_eq!(
        expr("1+2*3"),
        Expr::AddSub(vec![
            add(int(1)),
            add(Expr::MulDiv(vec![mul(int(2)), mul(int(3))])),
        ])
    );
}

#[test]
fn test_if_else_disambiguation() {
    assert_eq!(
        stmt("if (1) return 1; else return 2;"),
        Stmt::IfElse {
            condition: int(1),
            then_branch: Box::new(Stmt::Return(int(1))),
            else_branch: Box::new(Stmt::Return(int(2))),
        }
    );
    assert_eq!(
        stmt("if (1) return 1;"),
        Stmt::If {
            condition: int(1),
            then_branch: Box::new(Stmt::Return(int(1))),
        }
    );
}

#[test]
fn test_array_vs_scalar_assignment() {
    assert_eq!(
        stmt("a[1] = 2;"),
        Stmt::ArrayAssignment {
            target: "a".to_string(),
            index: int(1),
            value: int(2),
        }
    );
    assert_eq!(
        stmt("a = 2;"),
        Stmt::Assignment {
            target: "a".to_string(),
            value: int(2),
        }
    );
}

#[test]
fn test_while_loop() {
    assert_eq!(
        stmt("while (i < 10) i = i + 1;"),
        Stmt::While {
            condition: Expr::Comparison {
                op: CmpOp::Lt,
                left: Box::new(Expr::Variable("i".to_string())),
                right: Box::new(int(10)),
            },
            body: Box::new(Stmt::Assignment {
                target: "i".to_string(),
                value: Expr::AddSub(vec![add(Expr::Variable("i".to_string())), add(int(1))]),
            }),
        }
    );
}

#[test]
fn test_unterminated_block_fails() {
    let err = parse_source("def @f() {").unwrap_err();
    assert!(matches!(err, ParseError::Syntax(_)), "{:?}", err);

    let err = parse_source("def int @f() {").unwrap_err();
    match err {
        ParseError::Syntax(err) => assert_eq!(
            err.message,
            "unknown statement type: expected statement, but the token stream is exhausted"
        ),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_program_with_several_functions() {
    let program = parse_source(
        r#"
        def int @square(int x) return x * x;

        def int @main() {
            let int y = @square(3);
            return y;
        }
    "#,
    )
    .expect("Parsing failed");

    let names: Vec<&str> = program.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["square", "main"]);
    assert_eq!(program.functions[0].arguments.len(), 1);
    assert!(matches!(program.functions[1].body, Stmt::Block(ref stmts) if stmts.len() == 2));
}

#[test]
fn test_parse_stops_before_non_def() {
    let mut parser = Parser::new("def int @f() return 1; x = 2;").unwrap();
    let program = parser.parse_program().expect("Parsing failed");

    assert_eq!(program.functions.len(), 1);
    assert_eq!(parser.remaining(), 4);
}

#[test]
fn test_error_location() {
    let err = parse_source("def int @f() {\n    return 1\n}").unwrap_err();
    assert_eq!(err.location(), SourceLocation::new(3, 1));
    assert_eq!(
        err.to_string(),
        "Syntax error at line 3, column 1: expected token ';', found token '}'"
    );
}

#[test]
fn test_parser_from_token_stream() {
    let tokens = Lexer::new("@f(1, 2) >= 3").tokenize().unwrap();
    let mut parser = Parser::from_stream(TokenStream::new(tokens));

    match parser.parse_expression().unwrap() {
        Expr::Comparison { op, left, .. } => {
            assert_eq!(op, CmpOp::Ge);
            assert_eq!(
                *left,
                Expr::FunctionCall {
                    name: "f".to_string(),
                    arguments: vec![int(1), int(2)],
                }
            );
        }
        other => panic!("Expected comparison, got {:?}", other),
    }
}

#[test]
fn test_keywords_are_contextual() {
    // `else` cannot start a statement, so it reads as an assignment target
    assert_eq!(
        stmt("else = 1;"),
        Stmt::Assignment {
            target: "else".to_string(),
            value: int(1),
        }
    );
    assert_eq!(expr("while"), Expr::Variable("while".to_string()));
}

#[test]
fn test_deep_parentheses_fail_cleanly() {
    let source = format!(
        "def int @f() return {}1{};",
        "(".repeat(10_000),
        ")".repeat(10_000)
    );
    match parse_source(&source) {
        Err(ParseError::Syntax(err)) => assert!(err.message.starts_with("nesting too deep")),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_deep_statement_chain_fails_cleanly() {
    let source = format!("def int @f() {}return 1;", "while (x) ".repeat(10_000));
    match parse_source(&source) {
        Err(ParseError::Syntax(err)) => assert!(err.message.starts_with("nesting too deep")),
        other => panic!("Expected syntax error, got {:?}", other),
    }

    let source = format!("def int @f() {}x = 1;{}", "{".repeat(10_000), "}".repeat(10_000));
    assert!(matches!(parse_source(&source), Err(ParseError::Syntax(_))));
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let source = format!(
        "def int @f() {}return {}1{};",
        "while (x) ".repeat(50),
        "(".repeat(100),
        ")".repeat(100)
    );
    let program = parse_source(&source).expect("Parsing failed");
    assert!(matches!(program.functions[0].body, Stmt::While { .. }));
}

#[test]
fn test_exhausted_stream_reports_end_of_input() {
    let tokens = Lexer::new("return 1  ").tokenize().unwrap();
    let err = Parser::from_stream(TokenStream::new(tokens))
        .parse_statement()
        .unwrap_err();

    assert_eq!(err.message, "expected token ';', but the token stream is exhausted");
    assert_eq!(err.location, SourceLocation::new(1, 11));
}
