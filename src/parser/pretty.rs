//! AST pretty printer: renders a parsed program as an indented tree.
//!
//! Example output for `var float x = 1.0 + 2.0`:
//! ```text
//! Program
//! └── Infix '='
//!     ├── Variable float x
//!     └── Infix '+'
//!         ├── Number 1
//!         └── Number 2
//! ```

use crate::parser::ast::*;

/// Pretty-prints an AST to a string.
pub struct PrettyPrinter {
    output: String,
    /// One entry per open level: whether that level's node was the last child
    open: Vec<bool>,
    show_locations: bool,
}

impl PrettyPrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            open: Vec::new(),
            show_locations: false,
        }
    }

    /// Append the 1-based `@line:column` of every node
    pub fn with_locations(mut self) -> Self {
        self.show_locations = true;
        self
    }

    pub fn print_program(&mut self, program: &Program) -> &str {
        self.line("Program");
        self.print_children(&program.expressions);
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }

    fn print_children(&mut self, expressions: &[Expression]) {
        for (i, expression) in expressions.iter().enumerate() {
            self.print_expression(expression, i + 1 == expressions.len());
        }
    }

    fn print_expression(&mut self, expression: &Expression, is_last: bool) {
        self.prefix(is_last);
        let label = self.label(expression);
        self.line(&label);

        self.open.push(is_last);
        match expression {
            Expression::Infix { left, right, .. } => {
                self.print_expression(left, false);
                self.print_expression(right, true);
            }
            Expression::Prefix { operand, .. } => self.print_expression(operand, true),
            Expression::SubExpression(inner, _) | Expression::Return(inner, _) => {
                self.print_expression(inner, true)
            }
            Expression::FunctionCall { arguments, .. } => self.print_children(arguments),
            Expression::If {
                conditions,
                blocks,
                else_block,
                ..
            } => {
                let arms = conditions.len();
                for (i, (condition, block)) in conditions.iter().zip(blocks).enumerate() {
                    let last_arm = i + 1 == arms && else_block.is_none();
                    self.group("Condition", std::slice::from_ref(condition), false);
                    self.group("Then", block, last_arm);
                }
                if let Some(block) = else_block {
                    self.group("Else", block, true);
                }
            }
            Expression::While {
                condition, block, ..
            } => {
                self.group("Condition", std::slice::from_ref(condition.as_ref()), false);
                self.group("Block", block, true);
            }
            _ => {}
        }
        self.open.pop();
    }

    fn group(&mut self, name: &str, expressions: &[Expression], is_last: bool) {
        self.prefix(is_last);
        if expressions.is_empty() {
            self.line(&format!("{}: (empty)", name));
            return;
        }

        self.line(name);
        self.open.push(is_last);
        self.print_children(expressions);
        self.open.pop();
    }

    fn label(&self, expression: &Expression) -> String {
        let kind = expression.kind_name();
        let mut label = match expression {
            Expression::Number(value, _) => format!("{} {}", kind, value),
            Expression::String(text, _)
            | Expression::Uniform(text, _)
            | Expression::VertexInput(text, _)
            | Expression::Varying(text, _) => format!("{} \"{}\"", kind, text),
            Expression::Variable { var_type, name, .. } => {
                format!("{} {} {}", kind, var_type.keyword(), name)
            }
            Expression::Infix { operator, .. } | Expression::Prefix { operator, .. } => {
                format!("{} {}", kind, operator)
            }
            Expression::FunctionCall {
                name, arguments, ..
            } if arguments.is_empty() => format!("{} \"{}\" (no arguments)", kind, name),
            Expression::FunctionCall { name, .. } => format!("{} \"{}\"", kind, name),
            _ => kind.to_string(),
        };

        if self.show_locations {
            let location = expression.location();
            label.push_str(&format!(" @{}:{}", location.line + 1, location.column + 1));
        }
        label
    }

    fn line(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn prefix(&mut self, is_last: bool) {
        for &ancestor_last in &self.open {
            if ancestor_last {
                self.output.push_str("    ");
            } else {
                self.output.push_str("│   ");
            }
        }
        if is_last {
            self.output.push_str("└── ");
        } else {
            self.output.push_str("├── ");
        }
    }
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to pretty-print a program.
pub fn pretty_print(program: &Program) -> String {
    let mut printer = PrettyPrinter::new();
    printer.print_program(program);
    printer.into_string()
}
