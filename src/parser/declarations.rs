//! Declaration parsing implementation
//!
//! This module handles the two ways a named value is introduced:
//!
//! - Typed variables: `var float4 colour`
//! - Pipeline variables: `@uniform name`, `@input name`, `@varying name`
//!
//! # Grammar
//!
//! ```text
//! variable   ::= "var" type identifier
//! type       ::= "int" | "mat4x4" | "float" | "float2" | "float3" | "float4"
//! pipeline   ::= "@" ("uniform" | "input" | "varying") identifier
//! ```
//!
//! Both are operands, so `var float x = 1.0` parses as an assignment whose
//! left side is the declaration.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

fn variable_type(kind: &TokenKind) -> Option<VariableType> {
    match kind {
        TokenKind::TypeInt => Some(VariableType::Int),
        TokenKind::TypeMatrix4x4 => Some(VariableType::Matrix4x4),
        TokenKind::TypeFloat => Some(VariableType::Float),
        TokenKind::TypeFloat2 => Some(VariableType::Float2),
        TokenKind::TypeFloat3 => Some(VariableType::Float3),
        TokenKind::TypeFloat4 => Some(VariableType::Float4),
        _ => None,
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, ParseError>>,
{
    /// Parse `var <type> <name>`
    pub(crate) fn parse_variable(&mut self) -> Result<Expression, ParseError> {
        let keyword = self.expect_token(&TokenKind::Var)?;

        let type_token = self.next_token()?;
        let Some(var_type) = variable_type(&type_token.kind) else {
            return Err(ParseError::UnsupportedType {
                found: type_token.kind,
                location: type_token.location,
            });
        };

        let (name, _) = self.expect_identifier()?;

        Ok(Expression::Variable {
            var_type,
            name,
            location: keyword.location,
        })
    }

    /// Parse `@<qualifier> <name>`
    pub(crate) fn parse_pipeline_variable(&mut self) -> Result<Expression, ParseError> {
        let at = self.expect_token(&TokenKind::At)?;
        let qualifier = self.next_token()?;
        let (name, _) = self.expect_identifier()?;

        match qualifier.kind {
            TokenKind::Uniform => Ok(Expression::Uniform(name, at.location)),
            TokenKind::Input => Ok(Expression::VertexInput(name, at.location)),
            TokenKind::Varying => Ok(Expression::Varying(name, at.location)),
            kind => Err(ParseError::UnexpectedToken {
                token: kind,
                location: qualifier.location,
            }),
        }
    }
}
