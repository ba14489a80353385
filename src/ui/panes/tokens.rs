//! Token stream pane
//!
//! Lists every token the lexer produced with its 1-based position. The
//! selected token is highlighted and kept in view.

use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn kind_style(kind: &TokenKind) -> Style {
    let color = match kind {
        TokenKind::Number(_) | TokenKind::True | TokenKind::False => DEFAULT_THEME.number,
        TokenKind::Literal(_) => DEFAULT_THEME.fg,
        TokenKind::Uniform | TokenKind::Input | TokenKind::Varying | TokenKind::At => {
            DEFAULT_THEME.pipeline
        }
        kind if kind.is_type_keyword() => DEFAULT_THEME.type_name,
        kind if kind.is_keyword() => DEFAULT_THEME.keyword,
        kind if kind.is_operator() => DEFAULT_THEME.secondary,
        _ => DEFAULT_THEME.primary,
    };
    Style::default().fg(color)
}

/// Render the token list
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = super::follow_selection(*scroll, selected, visible_height);

    let lines: Vec<Line> = tokens
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, token)| {
            let position = format!(
                "{:>4}:{:<3} ",
                token.location.line + 1,
                token.location.column + 1
            );
            let mut line = Line::from(vec![
                Span::styled(position, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(token.kind.to_string(), kind_style(&token.kind)),
            ]);

            if idx == selected {
                line = line.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                );
            }
            line
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
