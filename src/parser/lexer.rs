//! Lexer (tokenizer) for Vixie source code
//!
//! Converts raw source text into [`Token`]s on demand. The lexer is an
//! [`Iterator`] over `Result<Token, ParseError>`: the parser pulls one token
//! at a time, and the first error ends the stream.
//!
//! Character classes:
//! - punctuation `: , # [ ] ( ) { } ; @ .` always forms a single-character
//!   token, even where the character is also an operator character
//! - operator characters are scanned greedily and the whole run is resolved
//!   at once, so `+=` and `&&` never split
//! - identifiers may contain any code point from U+00A1 upwards

use crate::parser::ast::SourceLocation;
use crate::parser::consumer::{Lookahead, TextConsumer};
use crate::parser::error::ParseError;
use crate::parser::operator::{ArithmeticOperator, BooleanOperator};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    /// Identifier or any other word that is not a keyword
    Literal(String),

    // Keywords
    True,
    False,
    Return, // ret
    If,
    Elif,
    Else,
    While,
    Function,
    Var,
    Input,
    Uniform,
    Varying,
    VxPosition, // vx_Position
    VxColor,    // vx_Color

    // Type keywords
    TypeInt,
    TypeVoid,
    TypeMatrix4x4,
    TypeFloat,
    TypeFloat2,
    TypeFloat3,
    TypeFloat4,

    // Operators
    Arithmetic(ArithmeticOperator),
    Boolean(BooleanOperator),
    Assign,                             // =
    CompoundAssign(ArithmeticOperator), // +=, -=, ...

    // Punctuation
    Colon,        // :
    Comma,        // ,
    Hashtag,      // #
    LeftBracket,  // [
    RightBracket, // ]
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    Semicolon,    // ;
    Dot,          // .
    At,           // @
}

impl TokenKind {
    /// Whether the parser treats this token as an operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Arithmetic(_)
                | TokenKind::Boolean(_)
                | TokenKind::Assign
                | TokenKind::CompoundAssign(_)
        )
    }

    /// Whether this is a reserved word
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::True
                | TokenKind::False
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Function
                | TokenKind::Var
                | TokenKind::Input
                | TokenKind::Uniform
                | TokenKind::Varying
                | TokenKind::VxPosition
                | TokenKind::VxColor
        ) || self.is_type_keyword()
    }

    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::TypeInt
                | TokenKind::TypeVoid
                | TokenKind::TypeMatrix4x4
                | TokenKind::TypeFloat
                | TokenKind::TypeFloat2
                | TokenKind::TypeFloat3
                | TokenKind::TypeFloat4
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Literal(s) => write!(f, "identifier '{}'", s),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::Return => write!(f, "'ret'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Elif => write!(f, "'elif'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::Function => write!(f, "'function'"),
            TokenKind::Var => write!(f, "'var'"),
            TokenKind::Input => write!(f, "'input'"),
            TokenKind::Uniform => write!(f, "'uniform'"),
            TokenKind::Varying => write!(f, "'varying'"),
            TokenKind::VxPosition => write!(f, "'vx_Position'"),
            TokenKind::VxColor => write!(f, "'vx_Color'"),
            TokenKind::TypeInt => write!(f, "'int'"),
            TokenKind::TypeVoid => write!(f, "'void'"),
            TokenKind::TypeMatrix4x4 => write!(f, "'mat4x4'"),
            TokenKind::TypeFloat => write!(f, "'float'"),
            TokenKind::TypeFloat2 => write!(f, "'float2'"),
            TokenKind::TypeFloat3 => write!(f, "'float3'"),
            TokenKind::TypeFloat4 => write!(f, "'float4'"),
            TokenKind::Arithmetic(op) => write!(f, "'{}'", op.symbol()),
            TokenKind::Boolean(op) => write!(f, "'{}'", op.symbol()),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::CompoundAssign(op) => write!(f, "'{}='", op.symbol()),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Hashtag => write!(f, "'#'"),
            TokenKind::LeftBracket => write!(f, "'['"),
            TokenKind::RightBracket => write!(f, "']'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::LeftBrace => write!(f, "'{{'"),
            TokenKind::RightBrace => write!(f, "'}}'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::At => write!(f, "'@'"),
        }
    }
}

/// A token together with the location of its first character
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}",
            self.location.line + 1,
            self.location.column + 1,
            self.kind
        )
    }
}

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();

    KEYWORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("ret", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("function", TokenKind::Function);
        map.insert("var", TokenKind::Var);
        map.insert("input", TokenKind::Input);
        map.insert("uniform", TokenKind::Uniform);
        map.insert("varying", TokenKind::Varying);
        map.insert("vx_Position", TokenKind::VxPosition);
        map.insert("vx_Color", TokenKind::VxColor);
        map.insert("int", TokenKind::TypeInt);
        map.insert("void", TokenKind::TypeVoid);
        map.insert("mat4x4", TokenKind::TypeMatrix4x4);
        map.insert("float", TokenKind::TypeFloat);
        map.insert("float2", TokenKind::TypeFloat2);
        map.insert("float3", TokenKind::TypeFloat3);
        map.insert("float4", TokenKind::TypeFloat4);
        map
    })
}

fn punctuation(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        ':' => TokenKind::Colon,
        ',' => TokenKind::Comma,
        '#' => TokenKind::Hashtag,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '{' => TokenKind::LeftBrace,
        '}' => TokenKind::RightBrace,
        ';' => TokenKind::Semicolon,
        '.' => TokenKind::Dot,
        '@' => TokenKind::At,
        _ => return None,
    };
    Some(kind)
}

pub fn is_operator_char(ch: char) -> bool {
    matches!(
        ch,
        '+' | '-' | '/' | '*' | '!' | '&' | '|' | '~' | '^' | '.' | '=' | '>' | '<' | ':'
    )
}

pub fn is_literal_char(ch: char) -> bool {
    ch != '$' && (ch.is_ascii_alphanumeric() || ch == '_' || u32::from(ch) >= 161)
}

/// Map a complete run of operator characters to its token
fn resolve_operator(op: &str) -> Option<TokenKind> {
    let kind = match op {
        "=" => TokenKind::Assign,
        "==" => TokenKind::Boolean(BooleanOperator::Eq),
        "!=" => TokenKind::Boolean(BooleanOperator::NotEq),
        ">" => TokenKind::Boolean(BooleanOperator::Gt),
        "<" => TokenKind::Boolean(BooleanOperator::Lt),
        ">=" => TokenKind::Boolean(BooleanOperator::GtEq),
        "<=" => TokenKind::Boolean(BooleanOperator::LtEq),
        "&&" => TokenKind::Boolean(BooleanOperator::And),
        "||" => TokenKind::Boolean(BooleanOperator::Or),
        "!" => TokenKind::Boolean(BooleanOperator::Not),
        _ => {
            let mut chars = op.chars();
            let first = chars.next()?;
            let length = op.chars().count();

            if length > 1 && op.ends_with('=') {
                TokenKind::CompoundAssign(ArithmeticOperator::from_char(first)?)
            } else if length == 1 {
                TokenKind::Arithmetic(ArithmeticOperator::from_char(first)?)
            } else {
                return None;
            }
        }
    };
    Some(kind)
}

/// Lexer for Vixie source code
pub struct Lexer<'src> {
    text: TextConsumer<'src>,
    failed: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'src str) -> Self {
        Self {
            text: TextConsumer::new(source),
            failed: false,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        self.collect()
    }

    /// Produce the next token, or `None` once the input is exhausted.
    pub fn try_next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.text.skip_while(|c| c.is_whitespace());

        let location = self.text.location();
        let Some(&ch) = self.text.try_peek() else {
            return Ok(None);
        };

        let kind = if let Some(kind) = punctuation(ch) {
            self.text.skip_one();
            kind
        } else if is_operator_char(ch) {
            self.operator(location)?
        } else if ch.is_ascii_digit() {
            self.number_literal()?
        } else if is_literal_char(ch) {
            self.identifier_or_keyword()
        } else {
            return Err(ParseError::UnexpectedSymbol {
                symbol: ch,
                location,
            });
        };

        log::trace!("lexed {} at {}:{}", kind, location.line, location.column);
        Ok(Some(Token::new(kind, location)))
    }

    /// Collect a maximal run of characters accepted by `accept`
    fn take_run(&mut self, accept: fn(char) -> bool) -> String {
        let mut run = String::new();
        while let Some(&ch) = self.text.try_peek() {
            if !accept(ch) {
                break;
            }
            run.push(ch);
            self.text.skip_one();
        }
        run
    }

    fn operator(&mut self, location: SourceLocation) -> Result<TokenKind, ParseError> {
        let op = self.take_run(is_operator_char);

        match resolve_operator(&op) {
            Some(kind) => Ok(kind),
            None => Err(ParseError::InvalidOperatorString {
                operator: op,
                location,
            }),
        }
    }

    /// Parse a numeric literal: digits with at most one decimal point
    fn number_literal(&mut self) -> Result<TokenKind, ParseError> {
        let mut value = 0.0_f64;
        let mut fraction_digits = 0_i32;
        let mut is_fractional = false;

        while let Some(&ch) = self.text.try_peek() {
            if let Some(digit) = ch.to_digit(10) {
                value = value * 10.0 + f64::from(digit);
                if is_fractional {
                    fraction_digits += 1;
                }
                self.text.skip_one();
            } else if ch == '.' {
                if is_fractional {
                    return Err(ParseError::UnexpectedSymbol {
                        symbol: '.',
                        location: self.text.location(),
                    });
                }
                is_fractional = true;
                self.text.skip_one();
            } else {
                break;
            }
        }

        Ok(TokenKind::Number(value / 10.0_f64.powi(fraction_digits)))
    }

    fn identifier_or_keyword(&mut self) -> TokenKind {
        let word = self.take_run(is_literal_char);

        match keywords().get(word.as_str()) {
            Some(keyword) => keyword.clone(),
            None => TokenKind::Literal(word),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.try_next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
