//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, its token-level helpers and the
//! program entry point.
//!
//! # Parser Architecture
//!
//! The parser is a single precedence-climbing procedure,
//! [`Parser::try_parse_expression`], that handles both statement-level and
//! operand-level constructs. Its pieces are split across files using
//! `impl Parser` blocks:
//! - This module: Parser struct, token helpers and [`Parser::parse_program`]
//! - `expressions`: primary dispatch, prefix/infix operators, access sugar,
//!   function calls
//! - `statements`: `ret`, `if`/`elif`/`else`, `while` and blocks
//! - `declarations`: `var` declarations and `@` pipeline variables
//!
//! Tokens are pulled lazily through a single-item [`Consumer`], so parsing
//! never looks more than one token ahead. Lexer errors surface the moment the
//! offending token is peeked.

use crate::parser::ast::*;
use crate::parser::consumer::{Consumer, Lookahead};
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::parser::operator::Precedence;
use std::mem;

pub use crate::parser::error::ParseError;

/// Token source for a parser built from already-produced tokens
pub type TokenStream =
    std::iter::Map<std::vec::IntoIter<Token>, fn(Token) -> Result<Token, ParseError>>;

/// Pratt parser for Vixie
pub struct Parser<I>
where
    I: Iterator<Item = Result<Token, ParseError>>,
{
    pub(crate) tokens: Consumer<I>,
}

impl<'src> Parser<Lexer<'src>> {
    /// Create a parser that lexes `source` on demand
    pub fn new(source: &'src str) -> Self {
        Self::with_token_source(Lexer::new(source))
    }
}

impl Parser<TokenStream> {
    /// Create a parser over tokens produced elsewhere
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let lift: fn(Token) -> Result<Token, ParseError> = Ok;
        Self::with_token_source(tokens.into_iter().map(lift))
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, ParseError>>,
{
    pub fn with_token_source(tokens: I) -> Self {
        Self {
            tokens: Consumer::new(tokens),
        }
    }

    /// Parse the entire program: every top-level expression until the
    /// tokens run out.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while let Some(expression) = self.try_parse_expression(Precedence::Lowest)? {
            // A `}` with no block to close
            if let Expression::Void(location) = expression {
                return Err(ParseError::UnexpectedToken {
                    token: TokenKind::RightBrace,
                    location,
                });
            }

            log::debug!(
                "parsed top-level {} at {}:{}",
                expression.kind_name(),
                expression.location().line,
                expression.location().column
            );
            program.expressions.push(expression);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    /// Location of the last consumed token, or the origin if nothing has
    /// been consumed yet
    pub(crate) fn last_location(&self) -> SourceLocation {
        match self.tokens.last_consumed() {
            Some(Ok(token)) => token.location,
            _ => SourceLocation::default(),
        }
    }

    pub(crate) fn peek_token(&mut self) -> Result<Option<Token>, ParseError> {
        match self.tokens.try_peek() {
            None => Ok(None),
            Some(Ok(token)) => Ok(Some(token.clone())),
            Some(Err(err)) => Err(err.clone()),
        }
    }

    /// Consume the next token; running out of tokens is an error
    pub(crate) fn next_token(&mut self) -> Result<Token, ParseError> {
        match self.tokens.try_consume() {
            Some(token) => token,
            None => Err(ParseError::UnexpectedEof {
                location: self.last_location(),
            }),
        }
    }

    /// Discard a token that has already been peeked
    pub(crate) fn skip_token(&mut self) {
        self.tokens.skip_one();
    }

    /// Skip any run of `;` separators
    pub(crate) fn skip_separators(&mut self) {
        self.tokens
            .skip_while(|token| matches!(token, Ok(Token { kind: TokenKind::Semicolon, .. })));
    }

    pub(crate) fn check(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        Ok(self
            .peek_token()?
            .is_some_and(|token| mem::discriminant(&token.kind) == mem::discriminant(kind)))
    }

    /// Consume the next token, requiring it to be of the same kind as
    /// `expected`
    pub(crate) fn expect_token(&mut self, expected: &TokenKind) -> Result<Token, ParseError> {
        let token = self.next_token()?;

        if mem::discriminant(&token.kind) == mem::discriminant(expected) {
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken {
                token: token.kind,
                location: token.location,
            })
        }
    }

    /// Consume an identifier token and return its text
    pub(crate) fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        let token = self.next_token()?;

        match token.kind {
            TokenKind::Literal(name) => Ok((name, token.location)),
            kind => Err(ParseError::UnexpectedToken {
                token: kind,
                location: token.location,
            }),
        }
    }

    /// Parse an expression that must be present
    pub(crate) fn force_parse_expression(
        &mut self,
        precedence: Precedence,
    ) -> Result<Expression, ParseError> {
        match self.try_parse_expression(precedence)? {
            Some(expression) => Ok(expression),
            None => Err(ParseError::ExpectedExpression {
                location: self.last_location(),
            }),
        }
    }
}

/// Parse a complete source text
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::operator::{ArithmeticOperator, Operator};

    #[test]
    fn test_parse_empty_program() {
        assert!(parse("").unwrap().expressions.is_empty());
        assert!(parse("  \n ;;; ").unwrap().expressions.is_empty());
    }

    #[test]
    fn test_parse_several_statements() {
        let program = parse("foo(); bar(1);\nbaz(2)").unwrap();

        let names: Vec<&str> = program
            .expressions
            .iter()
            .map(|e| match e {
                Expression::FunctionCall { name, .. } => name.as_str(),
                _ => panic!("Expected function call"),
            })
            .collect();
        assert_eq!(names, ["foo", "bar", "baz"]);
    }

    #[test]
    fn test_stray_closing_brace() {
        let err = parse("foo(); }").unwrap_err();

        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                token: TokenKind::RightBrace,
                location: SourceLocation::new(0, 7),
            }
        );
    }

    #[test]
    fn test_lexer_error_reaches_parser() {
        let err = parse("foo(1 $)").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedSymbol { symbol: '$', .. }));
    }

    #[test]
    fn test_from_tokens() {
        let at = SourceLocation::default();
        let tokens = vec![
            Token::new(TokenKind::Number(1.0), at),
            Token::new(TokenKind::Arithmetic(ArithmeticOperator::Add), at),
            Token::new(TokenKind::Number(2.0), at),
        ];

        let program = Parser::from_tokens(tokens).parse_program().unwrap();

        assert!(matches!(
            &program.expressions[..],
            [Expression::Infix {
                operator: Operator::Arithmetic(ArithmeticOperator::Add),
                ..
            }]
        ));
    }

    #[test]
    fn test_missing_expression_uses_last_location() {
        let err = parse("ret").unwrap_err();

        assert_eq!(
            err,
            ParseError::ExpectedExpression {
                location: SourceLocation::new(0, 0),
            }
        );
    }
}
