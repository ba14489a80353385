//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the shader being
//! inspected with basic syntax highlighting.
//!
//! # Features
//!
//! - Syntax highlighting for Vixie keywords, types, pipeline qualifiers,
//!   numbers and function calls
//! - Highlight of the line holding the selected token
//! - The line of a parse error drawn on a red background
//! - Line numbering
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character splitter to apply syntax
//! highlighting styles, so lines after a lexer error still get colour.

use crate::parser::lexer::is_literal_char;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for Vixie code
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();
    let mut after_at = false;

    for c in line.chars() {
        if is_literal_char(c) {
            current_word.push(c);
            continue;
        }

        if !current_word.is_empty() {
            let style = word_style(&current_word, c == '(', after_at);
            spans.push(Span::styled(std::mem::take(&mut current_word), style));
            after_at = false;
        }

        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
            '@' => Style::default().fg(DEFAULT_THEME.pipeline),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        if c == '@' {
            after_at = true;
        }

        spans.push(Span::styled(c.to_string(), style));
    }

    if !current_word.is_empty() {
        let style = word_style(&current_word, false, after_at);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn word_style(word: &str, is_function: bool, after_at: bool) -> Style {
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        return Style::default().fg(DEFAULT_THEME.number);
    }

    match word {
        "int" | "void" | "mat4x4" | "float" | "float2" | "float3" | "float4" => {
            Style::default().fg(DEFAULT_THEME.type_name) // Types
        }
        "uniform" | "input" | "varying" if after_at => Style::default()
            .fg(DEFAULT_THEME.pipeline)
            .add_modifier(Modifier::BOLD),
        "ret" | "if" | "elif" | "else" | "while" | "function" | "var" | "uniform" | "input"
        | "varying" => {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD) // Keywords
        }
        "true" | "false" | "vx_Position" | "vx_Color" => Style::default().fg(DEFAULT_THEME.number), // Constants
        _ => {
            if is_function {
                Style::default().fg(DEFAULT_THEME.function)
            } else {
                Style::default().fg(DEFAULT_THEME.fg) // Names
            }
        }
    }
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
///
/// `current_line` and `error_line` are zero-based.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: Option<usize>,
    error_line: Option<usize>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    // Calculate visible range
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Get the target row, centred on first render and clamped to the visible area
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if let Some(current) = current_line.filter(|&line| line < total_lines) {
        scroll_state.offset = current.saturating_sub(target_row);

        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let is_current = current_line == Some(idx);
            let is_error = error_line == Some(idx);
            let line_num_str = format!("{:4} ", idx + 1);

            let (num_style, content_base_style) = if is_error {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                    Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White) // White text on red for visibility
                        .add_modifier(Modifier::BOLD),
                )
            } else if is_current {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default().bg(DEFAULT_THEME.current_line_bg),
                )
            } else {
                (Style::default().fg(DEFAULT_THEME.comment), Style::default())
            };

            let mut content_line = highlight_source_code(line);

            if is_error {
                for span in &mut content_line.spans {
                    span.style = content_base_style;
                }
            } else if is_current {
                for span in &mut content_line.spans {
                    span.style = span.style.patch(content_base_style);
                }
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
