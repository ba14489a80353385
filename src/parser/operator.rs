//! Operator metadata: precedence levels and fixity
//!
//! Operators come from two places. The lexer produces arithmetic, boolean and
//! assignment operator tokens, which [`Operator::from_token`] lifts into the
//! AST operator set. Member access (`a.b`) and index access (`a[i]`) are never
//! lexed as operators; the parser builds them from postfix sugar and gives them
//! the tightest binding so access chains bind before anything else.

use crate::parser::lexer::TokenKind;
use std::fmt;
use std::ops::BitOr;

/// Binding strength, from loosest to tightest.
///
/// `Lowest` sits below every real operator and is the starting bound for a
/// full expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Lowest,
    Assignment,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Prefix,
    Access,
}

/// Positions an operator may appear in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fixity(u8);

impl Fixity {
    pub const PREFIX: Fixity = Fixity(0b01);
    pub const INFIX: Fixity = Fixity(0b10);

    pub fn contains(self, other: Fixity) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Fixity {
    type Output = Fixity;

    fn bitor(self, rhs: Fixity) -> Fixity {
        Fixity(self.0 | rhs.0)
    }
}

/// Single-character arithmetic and bitwise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    BitAnd,   // &
    BitOr,    // |
    BitXor,   // ^
    BitNot,   // ~
}

impl ArithmeticOperator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(ArithmeticOperator::Add),
            '-' => Some(ArithmeticOperator::Subtract),
            '*' => Some(ArithmeticOperator::Multiply),
            '/' => Some(ArithmeticOperator::Divide),
            '&' => Some(ArithmeticOperator::BitAnd),
            '|' => Some(ArithmeticOperator::BitOr),
            '^' => Some(ArithmeticOperator::BitXor),
            '~' => Some(ArithmeticOperator::BitNot),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Subtract => "-",
            ArithmeticOperator::Multiply => "*",
            ArithmeticOperator::Divide => "/",
            ArithmeticOperator::BitAnd => "&",
            ArithmeticOperator::BitOr => "|",
            ArithmeticOperator::BitXor => "^",
            ArithmeticOperator::BitNot => "~",
        }
    }
}

/// Comparison and logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    Eq,     // ==
    NotEq,  // !=
    Lt,     // <
    Gt,     // >
    LtEq,   // <=
    GtEq,   // >=
    And,    // &&
    Or,     // ||
    Not,    // !
}

impl BooleanOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BooleanOperator::Eq => "==",
            BooleanOperator::NotEq => "!=",
            BooleanOperator::Lt => "<",
            BooleanOperator::Gt => ">",
            BooleanOperator::LtEq => "<=",
            BooleanOperator::GtEq => ">=",
            BooleanOperator::And => "&&",
            BooleanOperator::Or => "||",
            BooleanOperator::Not => "!",
        }
    }
}

/// Operators as they appear in the AST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Arithmetic(ArithmeticOperator),
    Boolean(BooleanOperator),
    Assign,
    /// `<op>=`
    CompoundAssign(ArithmeticOperator),
    /// `a.b`
    MemberAccess,
    /// `a[i]`
    IndexAccess,
}

/// Entry of the operator table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub precedence: Precedence,
    pub fixity: Fixity,
}

impl OperatorInfo {
    const fn new(precedence: Precedence, fixity: Fixity) -> Self {
        Self { precedence, fixity }
    }
}

impl Operator {
    /// Lift an operator token into an AST operator.
    ///
    /// Returns `None` for tokens that are not operators.
    pub fn from_token(kind: &TokenKind) -> Option<Operator> {
        match kind {
            TokenKind::Arithmetic(op) => Some(Operator::Arithmetic(*op)),
            TokenKind::Boolean(op) => Some(Operator::Boolean(*op)),
            TokenKind::Assign => Some(Operator::Assign),
            TokenKind::CompoundAssign(op) => Some(Operator::CompoundAssign(*op)),
            _ => None,
        }
    }

    pub fn info(self) -> OperatorInfo {
        use ArithmeticOperator as A;
        use BooleanOperator as B;
        use Precedence as P;

        let infix = Fixity::INFIX;
        let prefix = Fixity::PREFIX;

        match self {
            Operator::Arithmetic(A::Add) => OperatorInfo::new(P::Additive, infix),
            Operator::Arithmetic(A::Subtract) => OperatorInfo::new(P::Additive, prefix | infix),
            Operator::Arithmetic(A::Multiply | A::Divide) => {
                OperatorInfo::new(P::Multiplicative, infix)
            }
            Operator::Arithmetic(A::BitAnd) => OperatorInfo::new(P::BitAnd, infix),
            Operator::Arithmetic(A::BitOr) => OperatorInfo::new(P::BitOr, infix),
            Operator::Arithmetic(A::BitXor) => OperatorInfo::new(P::BitXor, infix),
            Operator::Arithmetic(A::BitNot) => OperatorInfo::new(P::Prefix, prefix),
            Operator::Boolean(B::Not) => OperatorInfo::new(P::Prefix, prefix),
            Operator::Boolean(B::Eq | B::NotEq) => OperatorInfo::new(P::Equality, infix),
            Operator::Boolean(B::Lt | B::Gt | B::LtEq | B::GtEq) => {
                OperatorInfo::new(P::Relational, infix)
            }
            Operator::Boolean(B::And) => OperatorInfo::new(P::LogicalAnd, infix),
            Operator::Boolean(B::Or) => OperatorInfo::new(P::LogicalOr, infix),
            Operator::Assign | Operator::CompoundAssign(_) => {
                OperatorInfo::new(P::Assignment, infix)
            }
            Operator::MemberAccess | Operator::IndexAccess => OperatorInfo::new(P::Access, infix),
        }
    }

    pub fn precedence(self) -> Precedence {
        self.info().precedence
    }

    pub fn is_prefix(self) -> bool {
        self.info().fixity.contains(Fixity::PREFIX)
    }

    pub fn is_infix(self) -> bool {
        self.info().fixity.contains(Fixity::INFIX)
    }

    /// Bound used for the operand of a prefix operator
    pub fn prefix_precedence(self) -> Precedence {
        Precedence::Prefix
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Arithmetic(op) => write!(f, "'{}'", op.symbol()),
            Operator::Boolean(op) => write!(f, "'{}'", op.symbol()),
            Operator::Assign => write!(f, "'='"),
            Operator::CompoundAssign(op) => write!(f, "'{}='", op.symbol()),
            Operator::MemberAccess => write!(f, "member access"),
            Operator::IndexAccess => write!(f, "index access"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        let sub = Operator::Arithmetic(ArithmeticOperator::Subtract);
        let mul = Operator::Arithmetic(ArithmeticOperator::Multiply);
        let lt = Operator::Boolean(BooleanOperator::Lt);
        let eq = Operator::Boolean(BooleanOperator::Eq);
        let and = Operator::Boolean(BooleanOperator::And);
        let or = Operator::Boolean(BooleanOperator::Or);

        assert!(Operator::MemberAccess.precedence() > sub.prefix_precedence());
        assert!(Operator::IndexAccess.precedence() > Precedence::Prefix);
        assert!(sub.prefix_precedence() > mul.precedence());
        assert!(mul.precedence() > sub.precedence());
        assert!(sub.precedence() > lt.precedence());
        assert!(lt.precedence() > eq.precedence());
        assert!(eq.precedence() > and.precedence());
        assert!(and.precedence() > or.precedence());
        assert!(or.precedence() > Operator::Assign.precedence());
        assert!(Operator::Assign.precedence() > Precedence::Lowest);
        assert_eq!(
            Operator::CompoundAssign(ArithmeticOperator::Add).precedence(),
            Operator::Assign.precedence()
        );
    }

    #[test]
    fn test_fixity() {
        let not = Operator::Boolean(BooleanOperator::Not);
        let minus = Operator::Arithmetic(ArithmeticOperator::Subtract);
        let plus = Operator::Arithmetic(ArithmeticOperator::Add);

        assert!(not.is_prefix() && !not.is_infix());
        assert!(minus.is_prefix() && minus.is_infix());
        assert!(!plus.is_prefix() && plus.is_infix());
        assert!(!Operator::Assign.is_prefix());
        assert!(!Operator::MemberAccess.is_prefix());
        assert!(Operator::IndexAccess.is_infix());
    }

    #[test]
    fn test_from_token() {
        assert_eq!(
            Operator::from_token(&TokenKind::Assign),
            Some(Operator::Assign)
        );
        assert_eq!(Operator::from_token(&TokenKind::Dot), None);
        assert_eq!(Operator::from_token(&TokenKind::Number(1.0)), None);
    }
}
