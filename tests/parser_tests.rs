// Integration tests for the Vixie parser

use vixie::parser::ast::{Expression, SourceLocation, VariableType};
use vixie::parser::error::ParseError;
use vixie::parser::lexer::{Lexer, TokenKind};
use vixie::parser::operator::{ArithmeticOperator, BooleanOperator, Operator};
use vixie::parser::parse::{parse, Parser};
use vixie::parser::pretty::pretty_print;
use std::fs;

fn number(expr: &Expression) -> f64 {
    match expr {
        Expression::Number(n, _) => *n,
        other => panic!("Expected number, got {:?}", other),
    }
}

#[test]
fn test_demo_shader() {
    let source = fs::read_to_string("demos/basic.vx").expect("Failed to read demo shader");

    let program = parse(&source).expect("Parsing failed");

    let kinds: Vec<&str> = program.expressions.iter().map(|e| e.kind_name()).collect();
    assert_eq!(kinds, ["Infix", "Infix", "If", "Infix", "While"]);

    match &program.expressions[2] {
        Expression::If {
            conditions,
            blocks,
            else_block,
            location,
        } => {
            assert_eq!(*location, SourceLocation::new(3, 0));
            assert_eq!(conditions.len(), 2);
            assert_eq!(blocks.len(), 2);
            assert_eq!(else_block.as_ref().map(Vec::len), Some(1));
        }
        other => panic!("Expected if statement, got {:?}", other),
    }

    match &program.expressions[3] {
        Expression::Infix {
            operator, left, ..
        } => {
            assert_eq!(*operator, Operator::CompoundAssign(ArithmeticOperator::Multiply));
            assert!(matches!(
                **left,
                Expression::Infix {
                    operator: Operator::IndexAccess,
                    ..
                }
            ));
        }
        other => panic!("Expected compound assignment, got {:?}", other),
    }
}

#[test]
fn test_parsing_is_repeatable() {
    let source = fs::read_to_string("demos/basic.vx").expect("Failed to read demo shader");

    let first = parse(&source).expect("Parsing failed");
    let second = parse(&source).expect("Parsing failed");

    assert_eq!(first, second);
    assert_eq!(pretty_print(&first), pretty_print(&second));
}

#[test]
fn test_parser_over_pre_lexed_tokens() {
    let source = "var int n = 1 + 2 * 3";
    let tokens = Lexer::new(source).tokenize().expect("Lexing failed");

    let from_tokens = Parser::from_tokens(tokens).parse_program().unwrap();
    let from_source = Parser::new(source).parse_program().unwrap();

    assert_eq!(from_tokens, from_source);
}

#[test]
fn test_function_call_statement() {
    let program = parse("foo(1, 2);").unwrap();

    match &program.expressions[..] {
        [Expression::FunctionCall {
            name, arguments, ..
        }] => {
            assert_eq!(name, "foo");
            let values: Vec<f64> = arguments.iter().map(number).collect();
            assert_eq!(values, [1.0, 2.0]);
        }
        other => panic!("Expected one function call, got {:?}", other),
    }
}

#[test]
fn test_precedence_and_grouping() {
    let program = parse("1 + 2 * 3").unwrap();

    match &program.expressions[0] {
        Expression::Infix {
            operator,
            left,
            right,
            ..
        } => {
            assert_eq!(*operator, Operator::Arithmetic(ArithmeticOperator::Add));
            assert_eq!(number(left), 1.0);
            match &**right {
                Expression::Infix {
                    operator,
                    left,
                    right,
                    ..
                } => {
                    assert_eq!(*operator, Operator::Arithmetic(ArithmeticOperator::Multiply));
                    assert_eq!(number(left), 2.0);
                    assert_eq!(number(right), 3.0);
                }
                other => panic!("Expected multiplication, got {:?}", other),
            }
        }
        other => panic!("Expected addition, got {:?}", other),
    }
}

#[test]
fn test_logical_operators_bind_looser_than_comparison() {
    let program = parse("a() < 1 || b() == 2 && !c()").unwrap();

    match &program.expressions[0] {
        Expression::Infix {
            operator, right, ..
        } => {
            assert_eq!(*operator, Operator::Boolean(BooleanOperator::Or));
            assert!(matches!(
                **right,
                Expression::Infix {
                    operator: Operator::Boolean(BooleanOperator::And),
                    ..
                }
            ));
        }
        other => panic!("Expected logical or, got {:?}", other),
    }
}

#[test]
fn test_declaration_types() {
    let program = parse("var mat4x4 m; var float2 v").unwrap();

    let types: Vec<VariableType> = program
        .expressions
        .iter()
        .map(|e| match e {
            Expression::Variable { var_type, .. } => *var_type,
            other => panic!("Expected variable, got {:?}", other),
        })
        .collect();
    assert_eq!(types, [VariableType::Matrix4x4, VariableType::Float2]);
}

#[test]
fn test_errors_carry_locations() {
    let cases: [(&str, ParseError); 5] = [
        (
            "foo(1)\n  + * 2",
            ParseError::InvalidPrefixOperator {
                operator: Operator::Arithmetic(ArithmeticOperator::Multiply),
                location: SourceLocation::new(1, 4),
            },
        ),
        (
            "var float3",
            ParseError::UnexpectedEof {
                location: SourceLocation::new(0, 4),
            },
        ),
        (
            "var bool b",
            ParseError::UnsupportedType {
                found: TokenKind::Literal("bool".to_string()),
                location: SourceLocation::new(0, 4),
            },
        ),
        (
            "f(1) ~ 2",
            ParseError::InvalidInfixOperator {
                operator: Operator::Arithmetic(ArithmeticOperator::BitNot),
                location: SourceLocation::new(0, 5),
            },
        ),
        (
            "a <<= 1",
            ParseError::InvalidOperatorString {
                operator: "<<=".to_string(),
                location: SourceLocation::new(0, 2),
            },
        ),
    ];

    for (source, expected) in cases {
        assert_eq!(parse(source).unwrap_err(), expected, "source: {:?}", source);
    }
}

#[test]
fn test_error_display() {
    let err = parse("while (true) {\n  f(1,)\n}").unwrap_err();

    assert_eq!(
        err.to_string(),
        "Parse error at line 2, column 7: unexpected token ')'"
    );
}
