//! Statement parsing implementation
//!
//! This module handles the statement forms of Vixie:
//!
//! - Return: `ret expr`
//! - Conditionals: `if (c) { ... } elif (c) { ... } else { ... }`
//! - Loops: `while (c) { ... }`
//! - Blocks: `{ ... }`
//!
//! # Grammar
//!
//! ```text
//! return_stmt ::= "ret" expr
//! if_stmt     ::= "if" "(" expr ")" block
//!                 ("elif" "(" expr ")" block)*
//!                 ("else" block)?
//! while_stmt  ::= "while" "(" expr ")" block
//! block       ::= "{" expr* "}"
//! ```
//!
//! Statements are expressions too: they are reached from
//! [`Parser::try_parse_expression`] and never continue with infix operators.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::operator::Precedence;
use crate::parser::parse::{ParseError, Parser};

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, ParseError>>,
{
    /// Parse `ret expr`; separators after `ret` are skipped like anywhere else
    pub(crate) fn parse_return(&mut self) -> Result<Expression, ParseError> {
        let keyword = self.expect_token(&TokenKind::Return)?;
        let value = self.force_parse_expression(Precedence::Lowest)?;

        Ok(Expression::Return(Box::new(value), keyword.location))
    }

    /// Parse an `if` chain with any number of `elif` arms and an optional
    /// `else`
    pub(crate) fn parse_if(&mut self) -> Result<Expression, ParseError> {
        let keyword = self.expect_token(&TokenKind::If)?;

        let mut conditions = vec![self.parse_condition()?];
        let mut blocks = vec![self.parse_block()?];
        let mut else_block = None;

        while let Some(token) = self.peek_token()? {
            match token.kind {
                TokenKind::Elif => {
                    self.skip_token();
                    conditions.push(self.parse_condition()?);
                    blocks.push(self.parse_block()?);
                }
                TokenKind::Else => {
                    self.skip_token();
                    else_block = Some(self.parse_block()?);
                    break;
                }
                _ => break,
            }
        }

        Ok(Expression::If {
            conditions,
            blocks,
            else_block,
            location: keyword.location,
        })
    }

    /// Parse `while (c) { ... }`
    pub(crate) fn parse_while(&mut self) -> Result<Expression, ParseError> {
        let keyword = self.expect_token(&TokenKind::While)?;
        let condition = self.parse_condition()?;
        let block = self.parse_block()?;

        Ok(Expression::While {
            condition: Box::new(condition),
            block,
            location: keyword.location,
        })
    }

    /// Parse a parenthesised condition
    fn parse_condition(&mut self) -> Result<Expression, ParseError> {
        self.expect_token(&TokenKind::LeftParen)?;
        let condition = self.force_parse_expression(Precedence::Lowest)?;
        self.expect_token(&TokenKind::RightParen)?;

        Ok(condition)
    }

    /// Parse a braced block, consuming the closing `}`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.expect_token(&TokenKind::LeftBrace)?;

        let mut expressions = Vec::new();

        loop {
            if self.peek_token()?.is_none() {
                return Err(ParseError::UnexpectedEof {
                    location: self.last_location(),
                });
            }

            let expression = self.force_parse_expression(Precedence::Lowest)?;

            if expression.is_void() {
                self.skip_token();
                return Ok(expressions);
            }

            expressions.push(expression);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{parse, ParseError};

    fn parse_single(source: &str) -> Expression {
        let mut program = parse(source).unwrap();
        assert_eq!(program.expressions.len(), 1, "source: {}", source);
        program.expressions.remove(0)
    }

    #[test]
    fn test_if_else() {
        let expr = parse_single("if (true) { ret 1; } else { ret 2; }");

        match expr {
            Expression::If {
                conditions,
                blocks,
                else_block,
                ..
            } => {
                assert!(matches!(&conditions[..], [Expression::True(_)]));
                assert_eq!(blocks.len(), 1);
                assert!(matches!(
                    &blocks[0][..],
                    [Expression::Return(value, _)] if matches!(**value, Expression::Number(n, _) if n == 1.0)
                ));
                let else_block = else_block.expect("else block");
                assert!(matches!(
                    &else_block[..],
                    [Expression::Return(value, _)] if matches!(**value, Expression::Number(n, _) if n == 2.0)
                ));
            }
            _ => panic!("Expected if statement"),
        }
    }

    #[test]
    fn test_elif_chain() {
        let expr = parse_single("if (a()) { } elif (b()) { f(); } elif (c()) { }");

        match expr {
            Expression::If {
                conditions,
                blocks,
                else_block,
                ..
            } => {
                assert_eq!(conditions.len(), 3);
                assert_eq!(blocks.len(), 3);
                assert_eq!(blocks[1].len(), 1);
                assert!(blocks[0].is_empty());
                assert!(else_block.is_none());
            }
            _ => panic!("Expected if statement"),
        }
    }

    #[test]
    fn test_if_is_not_extended_by_infix() {
        let program = parse("if (true) { } f()").unwrap();
        assert_eq!(program.expressions.len(), 2);
    }

    #[test]
    fn test_while() {
        let expr = parse_single("while (i() < 10) { step(); step(); }");

        match expr {
            Expression::While {
                condition, block, ..
            } => {
                assert!(matches!(*condition, Expression::Infix { .. }));
                assert_eq!(block.len(), 2);
            }
            _ => panic!("Expected while statement"),
        }
    }

    #[test]
    fn test_return_skips_separators() {
        let expr = parse_single("ret; f()");
        assert!(matches!(
            expr,
            Expression::Return(ref value, _)
                if matches!(**value, Expression::FunctionCall { ref name, .. } if name == "f")
        ));
    }

    #[test]
    fn test_bare_return_in_block() {
        let expr = parse_single("while (true) { ret }");
        match expr {
            Expression::While { block, .. } => {
                assert!(matches!(&block[..], [Expression::Return(value, _)] if value.is_void()));
            }
            _ => panic!("Expected while statement"),
        }
    }

    #[test]
    fn test_unterminated_block() {
        assert_eq!(
            parse("while (true) { f();").unwrap_err(),
            ParseError::ExpectedExpression {
                location: SourceLocation::new(0, 18),
            }
        );
        assert!(matches!(
            parse("if (true) {").unwrap_err(),
            ParseError::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_condition_requires_parentheses() {
        assert_eq!(
            parse("while true { }").unwrap_err(),
            ParseError::UnexpectedToken {
                token: TokenKind::True,
                location: SourceLocation::new(0, 6),
            }
        );
    }
}
