//! AST pane rendering

use crate::parser::error::ParseError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the parsed tree, or the parse error when parsing failed
pub fn render_ast_pane(
    frame: &mut Frame,
    area: Rect,
    tree_lines: &[String],
    error: Option<&ParseError>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    if let Some(err) = error {
        let location = err.location();
        let lines = vec![
            Line::from(Span::styled(
                "Parse failed",
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "line {}, column {}",
                location.line + 1,
                location.column + 1
            )),
            Line::from(Span::styled(
                err.description(),
                Style::default().fg(DEFAULT_THEME.error),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = (*scroll).min(tree_lines.len().saturating_sub(1));

    let lines: Vec<Line> = tree_lines
        .iter()
        .skip(*scroll)
        .take(visible_height)
        .map(|row| {
            // Split "├── Label @l:c" into guides, label and location
            let label_start = row
                .find(|c: char| !matches!(c, ' ' | '│' | '├' | '└' | '─'))
                .unwrap_or(row.len());
            let (guides, rest) = row.split_at(label_start);
            let (label, location) = match rest.rfind(" @") {
                Some(at) => rest.split_at(at),
                None => (rest, ""),
            };

            Line::from(vec![
                Span::styled(guides.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(label.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(location.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
