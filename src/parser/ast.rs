// AST (Abstract Syntax Tree) definitions for the Vixie shading language

use crate::parser::operator::Operator;

/// Source location information for error reporting
///
/// Both counters are zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Types accepted after `var`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    Int,
    Matrix4x4,
    Float,
    Float2,
    Float3,
    Float4,
}

impl VariableType {
    pub fn keyword(self) -> &'static str {
        match self {
            VariableType::Int => "int",
            VariableType::Matrix4x4 => "mat4x4",
            VariableType::Float => "float",
            VariableType::Float2 => "float2",
            VariableType::Float3 => "float3",
            VariableType::Float4 => "float4",
        }
    }
}

/// AST nodes
///
/// Every node records the location of the first token it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Literals
    Number(f64, SourceLocation),
    True(SourceLocation),
    False(SourceLocation),
    /// Member name on the right-hand side of a member access
    String(String, SourceLocation),

    // Declarations
    Variable {
        var_type: VariableType,
        name: String,
        location: SourceLocation,
    },

    // Pipeline-qualified values
    Uniform(String, SourceLocation),
    VertexInput(String, SourceLocation),
    Varying(String, SourceLocation),

    // Operators
    Infix {
        operator: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
        location: SourceLocation,
    },
    Prefix {
        operator: Operator,
        operand: Box<Expression>,
        location: SourceLocation,
    },
    SubExpression(Box<Expression>, SourceLocation),
    FunctionCall {
        name: String,
        arguments: Vec<Expression>,
        location: SourceLocation,
    },

    // Statements
    Return(Box<Expression>, SourceLocation),
    If {
        conditions: Vec<Expression>,
        blocks: Vec<Vec<Expression>>,
        else_block: Option<Vec<Expression>>,
        location: SourceLocation,
    },
    While {
        condition: Box<Expression>,
        block: Vec<Expression>,
        location: SourceLocation,
    },

    /// Placeholder produced when the parser peeks a `}`; never part of a
    /// finished block.
    Void(SourceLocation),
}

impl Expression {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::Number(_, loc)
            | Expression::True(loc)
            | Expression::False(loc)
            | Expression::String(_, loc)
            | Expression::Uniform(_, loc)
            | Expression::VertexInput(_, loc)
            | Expression::Varying(_, loc)
            | Expression::SubExpression(_, loc)
            | Expression::Return(_, loc)
            | Expression::Void(loc) => *loc,
            Expression::Variable { location, .. }
            | Expression::Infix { location, .. }
            | Expression::Prefix { location, .. }
            | Expression::FunctionCall { location, .. }
            | Expression::If { location, .. }
            | Expression::While { location, .. } => *location,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Expression::Void(_))
    }

    /// Short node name used by the tree printer
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Number(..) => "Number",
            Expression::True(_) => "True",
            Expression::False(_) => "False",
            Expression::String(..) => "String",
            Expression::Variable { .. } => "Variable",
            Expression::Uniform(..) => "Uniform",
            Expression::VertexInput(..) => "VertexInput",
            Expression::Varying(..) => "Varying",
            Expression::Infix { .. } => "Infix",
            Expression::Prefix { .. } => "Prefix",
            Expression::SubExpression(..) => "SubExpression",
            Expression::FunctionCall { .. } => "FunctionCall",
            Expression::Return(..) => "Return",
            Expression::If { .. } => "If",
            Expression::While { .. } => "While",
            Expression::Void(_) => "Void",
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub expressions: Vec<Expression>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
