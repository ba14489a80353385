//! Main TUI application state and logic

use crate::parser::ast::Program;
use crate::parser::error::ParseError;
use crate::parser::lexer::{Lexer, Token};
use crate::parser::parse::parse;
use crate::parser::pretty::PrettyPrinter;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
    backend::Backend,
};
use std::io;
use std::time::Duration;

use super::panes::SourceScrollState;

const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Ast,
}

impl FocusedPane {
    /// Move focus to the next pane (left to right: source -> tokens -> ast)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Ast,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Ast => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code being inspected
    pub source_code: String,

    /// Tokens lexed before the first lexer error, if any
    pub tokens: Vec<Token>,

    /// Result of parsing the whole source
    pub outcome: Result<Program, ParseError>,

    /// Rendered AST, one entry per tree row
    pub tree_lines: Vec<String>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `tokens` of the highlighted token
    pub selected_token: usize,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub token_scroll: usize,
    pub ast_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Lex and parse `source_code` and build the viewer state
    pub fn new(source_code: String) -> Self {
        let tokens: Vec<Token> = Lexer::new(&source_code).map_while(Result::ok).collect();
        let outcome = parse(&source_code);

        let (tree_lines, status_message) = match &outcome {
            Ok(program) => {
                let mut printer = PrettyPrinter::new().with_locations();
                let lines: Vec<String> =
                    printer.print_program(program).lines().map(String::from).collect();
                let message = format!(
                    "Parsed {} top-level expression(s) from {} token(s)",
                    program.expressions.len(),
                    tokens.len()
                );
                (lines, message)
            }
            Err(err) => (Vec::new(), err.to_string()),
        };

        App {
            source_code,
            tokens,
            outcome,
            tree_lines,
            focused_pane: FocusedPane::Source,
            selected_token: 0,
            source_scroll: SourceScrollState {
                offset: 0,
                target_line_row: None, // Will be set to center on first render
            },
            token_scroll: 0,
            ast_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.outcome.as_ref().err()
    }

    /// Zero-based line the source pane should keep in view
    pub fn current_line(&self) -> Option<usize> {
        match self.tokens.get(self.selected_token) {
            Some(token) => Some(token.location.line),
            None => self.error().map(|err| err.location().line),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 3 panes side by side, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(20),
                Constraint::Percentage(35),
            ])
            .split(pane_area);

        let error_line = self.error().map(|err| err.location().line);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            self.current_line(),
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            columns[1],
            &self.tokens,
            self.selected_token,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        super::panes::render_ast_pane(
            frame,
            columns[2],
            &self.tree_lines,
            self.outcome.as_ref().err(),
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.tokens.len(),
            self.error(),
        );
    }

    /// Handle keyboard events
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.move_up(1),
            KeyCode::Down => self.move_down(1),
            KeyCode::PageUp => self.move_up(PAGE),
            KeyCode::PageDown => self.move_down(PAGE),
            KeyCode::Home if self.focused_pane == FocusedPane::Tokens => {
                self.select_token(0);
            }
            KeyCode::End if self.focused_pane == FocusedPane::Tokens => {
                self.select_token(self.tokens.len().saturating_sub(1));
            }
            _ => {}
        }
    }

    fn move_up(&mut self, steps: usize) {
        match self.focused_pane {
            FocusedPane::Source => {
                // Scrolling up makes the current line move down visually
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(row.saturating_add(steps));
                }
            }
            FocusedPane::Tokens => self.select_token(self.selected_token.saturating_sub(steps)),
            FocusedPane::Ast => {
                self.ast_scroll = self.ast_scroll.saturating_sub(steps);
            }
        }
    }

    fn move_down(&mut self, steps: usize) {
        match self.focused_pane {
            FocusedPane::Source => {
                // Scrolling down makes the current line move up visually
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(row.saturating_sub(steps));
                }
            }
            FocusedPane::Tokens => self.select_token(self.selected_token.saturating_add(steps)),
            FocusedPane::Ast => {
                let max = self.tree_lines.len().saturating_sub(1);
                self.ast_scroll = self.ast_scroll.saturating_add(steps).min(max);
            }
        }
    }

    fn select_token(&mut self, index: usize) {
        if self.tokens.is_empty() {
            return;
        }

        self.selected_token = index.min(self.tokens.len() - 1);
        self.status_message = format!(
            "Token {}/{}: {}",
            self.selected_token + 1,
            self.tokens.len(),
            self.tokens[self.selected_token]
        );
    }
}
