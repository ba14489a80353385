//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting, the line of the
//!   selected token and the line of a parse error
//! - [`tokens`]: The token stream with the selected token highlighted
//! - [`ast`]: The parsed tree, or the parse error when there is none
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a primary `render_*_pane()` function.

pub mod ast;
pub mod source;
pub mod status;
pub mod tokens;

// Re-export render functions for convenience
pub use ast::render_ast_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by every pane
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp `offset` so `selected` stays inside a window of `height` rows
pub(crate) fn follow_selection(offset: usize, selected: usize, height: usize) -> usize {
    if selected < offset {
        selected
    } else if selected >= offset + height {
        selected + 1 - height
    } else {
        offset
    }
}
