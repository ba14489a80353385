//! Syntax error types shared by the lexer and the parser
//!
//! Every failure is fatal: the first error aborts lexing or parsing and is
//! returned to the caller together with the [`SourceLocation`] where it was
//! detected. When no better location is known (for example at end of input)
//! the location of the last consumed token is used.

use crate::parser::ast::SourceLocation;
use crate::parser::lexer::TokenKind;
use crate::parser::operator::Operator;
use std::fmt;

/// Lexer and parser errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character that cannot start any token
    UnexpectedSymbol {
        symbol: char,
        location: SourceLocation,
    },

    /// A run of operator characters that is not a known operator
    InvalidOperatorString {
        operator: String,
        location: SourceLocation,
    },

    /// A token was required but the input ended
    UnexpectedEof { location: SourceLocation },

    /// A token that is not valid at this point of the grammar
    UnexpectedToken {
        token: TokenKind,
        location: SourceLocation,
    },

    /// An expression was required but the input ended
    ExpectedExpression { location: SourceLocation },

    /// A function name was not followed by an argument list
    ExpectedParameterList { location: SourceLocation },

    /// An operator that cannot be used in prefix position
    InvalidPrefixOperator {
        operator: Operator,
        location: SourceLocation,
    },

    /// An operator that cannot be used in infix position
    InvalidInfixOperator {
        operator: Operator,
        location: SourceLocation,
    },

    /// `var` followed by something that is not a supported type
    UnsupportedType {
        found: TokenKind,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedSymbol { location, .. }
            | ParseError::InvalidOperatorString { location, .. }
            | ParseError::UnexpectedEof { location }
            | ParseError::UnexpectedToken { location, .. }
            | ParseError::ExpectedExpression { location }
            | ParseError::ExpectedParameterList { location }
            | ParseError::InvalidPrefixOperator { location, .. }
            | ParseError::InvalidInfixOperator { location, .. }
            | ParseError::UnsupportedType { location, .. } => *location,
        }
    }

    /// Human-readable description without the location prefix
    pub fn description(&self) -> String {
        match self {
            ParseError::UnexpectedSymbol { symbol, .. } => {
                format!("unexpected symbol '{}'", symbol.escape_default())
            }
            ParseError::InvalidOperatorString { operator, .. } => {
                format!("\"{}\" is not a valid operator", operator)
            }
            ParseError::UnexpectedEof { .. } => "unexpected end of input".to_string(),
            ParseError::UnexpectedToken { token, .. } => format!("unexpected token {}", token),
            ParseError::ExpectedExpression { .. } => "an expression was expected".to_string(),
            ParseError::ExpectedParameterList { .. } => "expected parameter list".to_string(),
            ParseError::InvalidPrefixOperator { operator, .. } => {
                format!("{} is not a valid prefix operator", operator)
            }
            ParseError::InvalidInfixOperator { operator, .. } => {
                format!("{} is not a valid infix operator", operator)
            }
            ParseError::UnsupportedType { found, .. } => {
                format!("unsupported or invalid variable type: {}", found)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            location.line + 1,
            location.column + 1,
            self.description()
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        let err = ParseError::UnexpectedSymbol {
            symbol: '$',
            location: SourceLocation::new(0, 4),
        };

        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 5: unexpected symbol '$'"
        );
    }

    #[test]
    fn test_location_accessor() {
        let err = ParseError::UnexpectedToken {
            token: TokenKind::Comma,
            location: SourceLocation::new(3, 1),
        };

        assert_eq!(err.location(), SourceLocation::new(3, 1));
        assert_eq!(err.description(), "unexpected token ','");
    }
}
