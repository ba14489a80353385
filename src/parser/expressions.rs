//! Expression parsing implementation
//!
//! This module holds the precedence-climbing core of the parser. Every
//! construct, statements included, enters through
//! [`Parser::try_parse_expression`], which dispatches on the first token:
//!
//! - `}`: the `Void` sentinel, left in the stream for the enclosing block
//! - identifier: a function call
//! - `ret`, `if`, `while`: statements (see `statements`)
//! - anything else: an operand (literal, prefix operator, `( )`, `var`, `@`)
//!
//! After the primary, `.name` and `[index]` postfix sugar is folded into
//! access infix nodes. Operands and calls then continue with infix operators
//! while the next operator binds tighter than the current bound.
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::consumer::Lookahead;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::operator::{Operator, Precedence};
use crate::parser::parse::{ParseError, Parser};

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, ParseError>>,
{
    /// Parse the next expression whose infix operators bind tighter than
    /// `min`.
    ///
    /// Leading `;` separators are skipped. Returns `Ok(None)` once the token
    /// stream is exhausted.
    pub fn try_parse_expression(
        &mut self,
        min: Precedence,
    ) -> Result<Option<Expression>, ParseError> {
        self.skip_separators();

        let Some(token) = self.peek_token()? else {
            return Ok(None);
        };
        let location = token.location;

        let (expression, continues) = match token.kind {
            TokenKind::RightBrace => return Ok(Some(Expression::Void(location))),
            TokenKind::Literal(_) => (self.parse_function_call()?, true),
            TokenKind::Return => (self.parse_return()?, false),
            TokenKind::If => (self.parse_if()?, false),
            TokenKind::While => (self.parse_while()?, false),
            _ => (self.parse_operand(token)?, true),
        };

        let expression = self.parse_access_operators(expression, location)?;

        if continues {
            self.parse_infix_continuation(expression, min, location)
                .map(Some)
        } else {
            Ok(Some(expression))
        }
    }

    /// Parse a primary in operand position
    fn parse_operand(&mut self, token: Token) -> Result<Expression, ParseError> {
        let location = token.location;

        match token.kind {
            TokenKind::Var => self.parse_variable(),
            TokenKind::At => self.parse_pipeline_variable(),
            TokenKind::LeftParen => self.parse_sub_expression(),
            TokenKind::Number(value) => Ok(self
                .tokens
                .consume_and_then(|_, _| Expression::Number(value, location))),
            TokenKind::True => Ok(self
                .tokens
                .consume_and_then(|_, _| Expression::True(location))),
            TokenKind::False => Ok(self
                .tokens
                .consume_and_then(|_, _| Expression::False(location))),
            ref kind if kind.is_operator() => self.parse_prefix(),
            kind => Err(ParseError::UnexpectedToken {
                token: kind,
                location,
            }),
        }
    }

    /// Parse a prefix operator and its operand
    fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
        let token = self.next_token()?;
        let operator = match Operator::from_token(&token.kind) {
            Some(operator) => operator,
            None => {
                return Err(ParseError::UnexpectedToken {
                    token: token.kind,
                    location: token.location,
                })
            }
        };

        if !operator.is_prefix() {
            return Err(ParseError::InvalidPrefixOperator {
                operator,
                location: token.location,
            });
        }

        let operand = self.force_parse_expression(operator.prefix_precedence())?;

        Ok(Expression::Prefix {
            operator,
            operand: Box::new(operand),
            location: token.location,
        })
    }

    /// Parse `( expr )`
    fn parse_sub_expression(&mut self) -> Result<Expression, ParseError> {
        let open = self.expect_token(&TokenKind::LeftParen)?;
        let inner = self.force_parse_expression(Precedence::Lowest)?;
        self.expect_token(&TokenKind::RightParen)?;

        Ok(Expression::SubExpression(Box::new(inner), open.location))
    }

    /// Parse `name(arg, ...)`
    fn parse_function_call(&mut self) -> Result<Expression, ParseError> {
        let (name, location) = self.expect_identifier()?;

        if self.peek_token()?.is_none() {
            return Err(ParseError::ExpectedParameterList { location });
        }
        self.expect_token(&TokenKind::LeftParen)?;

        let mut arguments = Vec::new();
        let mut need_comma = false;

        loop {
            let Some(token) = self.peek_token()? else {
                return Err(ParseError::UnexpectedEof {
                    location: self.last_location(),
                });
            };

            match token.kind {
                // `f()` or after a complete argument; `f(a,)` is rejected
                TokenKind::RightParen if need_comma || arguments.is_empty() => {
                    self.skip_token();
                    break;
                }
                TokenKind::Comma if need_comma => {
                    self.skip_token();
                    need_comma = false;
                }
                TokenKind::Comma | TokenKind::RightParen => {
                    return Err(ParseError::UnexpectedToken {
                        token: token.kind,
                        location: token.location,
                    });
                }
                _ if !need_comma => {
                    arguments.push(self.force_parse_expression(Precedence::Lowest)?);
                    need_comma = true;
                }
                kind => {
                    return Err(ParseError::UnexpectedToken {
                        token: kind,
                        location: token.location,
                    });
                }
            }
        }

        Ok(Expression::FunctionCall {
            name,
            arguments,
            location,
        })
    }

    /// Fold `.name` and `[index]` suffixes into access infix nodes
    fn parse_access_operators(
        &mut self,
        mut expression: Expression,
        location: SourceLocation,
    ) -> Result<Expression, ParseError> {
        loop {
            if expression.is_void() {
                return Ok(expression);
            }

            let (operator, right) = if self.check(&TokenKind::Dot)? {
                self.skip_token();
                let (member, member_location) = self.expect_identifier()?;
                (Operator::MemberAccess, Expression::String(member, member_location))
            } else if self.check(&TokenKind::LeftBracket)? {
                self.skip_token();
                let index = self.force_parse_expression(Precedence::Lowest)?;
                self.expect_token(&TokenKind::RightBracket)?;
                (Operator::IndexAccess, index)
            } else {
                return Ok(expression);
            };

            expression = Expression::Infix {
                operator,
                left: Box::new(expression),
                right: Box::new(right),
                location,
            };
        }
    }

    /// Extend `left` with infix operators that bind tighter than `min`
    fn parse_infix_continuation(
        &mut self,
        mut left: Expression,
        min: Precedence,
        location: SourceLocation,
    ) -> Result<Expression, ParseError> {
        while let Some(token) = self.peek_token()? {
            let operator = match token.kind {
                TokenKind::Comma
                | TokenKind::RightBrace
                | TokenKind::RightParen
                | TokenKind::Semicolon
                | TokenKind::RightBracket
                | TokenKind::Dot => break,
                ref kind => match Operator::from_token(kind) {
                    Some(operator) => operator,
                    None => {
                        return Err(ParseError::UnexpectedToken {
                            token: token.kind,
                            location: token.location,
                        })
                    }
                },
            };

            if !operator.is_infix() {
                return Err(ParseError::InvalidInfixOperator {
                    operator,
                    location: token.location,
                });
            }

            if min >= operator.precedence() {
                break;
            }

            self.skip_token();
            let right = self.force_parse_expression(operator.precedence())?;

            left = Expression::Infix {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::operator::{ArithmeticOperator, BooleanOperator, Operator};
    use crate::parser::parse::{parse, ParseError};

    fn parse_single(source: &str) -> Expression {
        let mut program = parse(source).unwrap();
        assert_eq!(program.expressions.len(), 1, "source: {}", source);
        program.expressions.remove(0)
    }

    fn add() -> Operator {
        Operator::Arithmetic(ArithmeticOperator::Add)
    }

    #[test]
    fn test_precedence_climbing() {
        let expr = parse_single("1 + 2 * 3");

        match expr {
            Expression::Infix {
                operator,
                left,
                right,
                ..
            } => {
                assert_eq!(operator, add());
                assert!(matches!(*left, Expression::Number(n, _) if n == 1.0));
                assert!(matches!(
                    *right,
                    Expression::Infix {
                        operator: Operator::Arithmetic(ArithmeticOperator::Multiply),
                        ..
                    }
                ));
            }
            _ => panic!("Expected infix expression"),
        }
    }

    #[test]
    fn test_left_associative() {
        let expr = parse_single("1 - 2 - 3");

        match expr {
            Expression::Infix { left, right, .. } => {
                assert!(matches!(*left, Expression::Infix { .. }));
                assert!(matches!(*right, Expression::Number(n, _) if n == 3.0));
            }
            _ => panic!("Expected infix expression"),
        }
    }

    #[test]
    fn test_unary_minus_binds_tighter() {
        let expr = parse_single("-1 * 2");

        match expr {
            Expression::Infix {
                operator, left, ..
            } => {
                assert_eq!(operator, Operator::Arithmetic(ArithmeticOperator::Multiply));
                assert!(matches!(*left, Expression::Prefix { .. }));
            }
            _ => panic!("Expected infix expression"),
        }
    }

    #[test]
    fn test_sub_expression() {
        let expr = parse_single("(1 + 2) * 3");

        match expr {
            Expression::Infix { left, .. } => {
                assert!(matches!(*left, Expression::SubExpression(..)));
            }
            _ => panic!("Expected infix expression"),
        }
    }

    #[test]
    fn test_function_call_arguments() {
        let expr = parse_single("foo(1, 2);");

        match expr {
            Expression::FunctionCall {
                name, arguments, ..
            } => {
                assert_eq!(name, "foo");
                assert_eq!(arguments.len(), 2);
            }
            _ => panic!("Expected function call"),
        }

        assert!(matches!(
            parse_single("bar()"),
            Expression::FunctionCall { ref arguments, .. } if arguments.is_empty()
        ));
    }

    #[test]
    fn test_function_call_continues_with_infix() {
        let expr = parse_single("sin(1) * 2");

        match expr {
            Expression::Infix { operator, left, .. } => {
                assert_eq!(operator, Operator::Arithmetic(ArithmeticOperator::Multiply));
                assert!(matches!(*left, Expression::FunctionCall { .. }));
            }
            _ => panic!("Expected infix expression"),
        }
    }

    #[test]
    fn test_bad_argument_lists() {
        assert!(matches!(
            parse("foo(1,)").unwrap_err(),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse("foo(1,,2)").unwrap_err(),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse("foo(1 2)").unwrap_err(),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse("foo(1").unwrap_err(),
            ParseError::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_missing_parameter_list() {
        assert_eq!(
            parse("  foo").unwrap_err(),
            ParseError::ExpectedParameterList {
                location: SourceLocation::new(0, 2),
            }
        );
        assert!(matches!(
            parse("foo 1").unwrap_err(),
            ParseError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_access_chain() {
        let expr = parse_single("@uniform foo.bar[0]");

        match expr {
            Expression::Infix {
                operator: Operator::IndexAccess,
                left,
                right,
                location,
            } => {
                assert_eq!(location, SourceLocation::new(0, 0));
                assert!(matches!(*right, Expression::Number(n, _) if n == 0.0));
                match *left {
                    Expression::Infix {
                        operator: Operator::MemberAccess,
                        left,
                        right,
                        ..
                    } => {
                        assert!(matches!(*left, Expression::Uniform(ref n, _) if n == "foo"));
                        assert!(matches!(*right, Expression::String(ref n, _) if n == "bar"));
                    }
                    _ => panic!("Expected member access"),
                }
            }
            _ => panic!("Expected index access"),
        }
    }

    #[test]
    fn test_fixity_errors() {
        assert!(matches!(
            parse("1 ! 2").unwrap_err(),
            ParseError::InvalidInfixOperator {
                operator: Operator::Boolean(BooleanOperator::Not),
                ..
            }
        ));
        assert_eq!(
            parse("* 2").unwrap_err(),
            ParseError::InvalidPrefixOperator {
                operator: Operator::Arithmetic(ArithmeticOperator::Multiply),
                location: SourceLocation::new(0, 0),
            }
        );
    }

    #[test]
    fn test_unexpected_token_after_operand() {
        assert_eq!(
            parse("1 2").unwrap_err(),
            ParseError::UnexpectedToken {
                token: crate::parser::lexer::TokenKind::Number(2.0),
                location: SourceLocation::new(0, 2),
            }
        );
    }

    #[test]
    fn test_missing_operand() {
        assert!(matches!(
            parse("1 +").unwrap_err(),
            ParseError::ExpectedExpression { .. }
        ));
    }
}
