//! Main TUI application state and logic

use crate::parser::lexer::Lexer;
use crate::parser::{parse_source, ParseError};
use crate::ui::panes::{
    highlight_source_code, render_source_pane, render_status_bar, render_tree_pane,
    SourceRenderData, SourceScrollState, StatusRenderData, TreeScrollState,
};
use crate::ui::tree::{AstTree, NodePath};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    text::Line,
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    pub file_name: String,

    /// Highlighted source, computed once
    pub source_lines: Vec<Line<'static>>,

    /// Parse failure, if any; the tree then shows the error instead
    pub error: Option<ParseError>,

    pub tree: AstTree,

    /// Index of the selected row among the visible tree rows
    pub selected: usize,

    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub tree_scroll: TreeScrollState,

    pub should_quit: bool,

    pub status_message: String,
}

impl App {
    /// Lex and parse `source_code` and build the explorer state for it
    pub fn new(file_name: impl Into<String>, source_code: &str) -> Self {
        let (tokens, lex_error) = Lexer::new(source_code).tokenize_partial();
        let source_lines =
            highlight_source_code(source_code, &tokens, lex_error.map(|err| err.location));

        let (tree, error) = match parse_source(source_code) {
            Ok(program) => (AstTree::from_program(&program), None),
            Err(err) => (AstTree::from_error(&err), Some(err)),
        };

        let (status_message, center_on) = match &error {
            Some(err) => (err.to_string(), Some(err.location().line)),
            None => ("Parsed successfully".to_string(), None),
        };

        App {
            file_name: file_name.into(),
            source_lines,
            error,
            tree,
            selected: 0,
            focused_pane: FocusedPane::Tree,
            source_scroll: SourceScrollState {
                offset: 0,
                center_on,
            },
            tree_scroll: TreeScrollState { offset: 0 },
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source (left) | Tree (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        render_source_pane(
            frame,
            columns[0],
            SourceRenderData {
                file_name: &self.file_name,
                lines: &self.source_lines,
                error_line: self.error.as_ref().map(|err| err.location().line),
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_tree_pane(
            frame,
            columns[1],
            &self.tree,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                node_count: self.tree.node_count(),
                has_error: self.error.is_some(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll.offset = self.source_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Tree => {
                    self.selected = self.selected.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Clamped against the pane height on the next render
                    self.source_scroll.offset = self.source_scroll.offset.saturating_add(1);
                }
                FocusedPane::Tree => {
                    let last = self.tree.rows().len().saturating_sub(1);
                    self.selected = (self.selected + 1).min(last);
                }
            },
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(path) = self.selected_path() {
                    self.tree.toggle(&path);
                }
            }
            KeyCode::Left => self.collapse_or_ascend(),
            KeyCode::Right => self.expand_or_descend(),
            KeyCode::Char('c') => {
                let path = self.selected_path().unwrap_or_default();
                self.tree.collapse_all();
                self.select_path(&path);
                self.status_message = "Collapsed all functions".to_string();
            }
            KeyCode::Char('e') => {
                let path = self.selected_path().unwrap_or_default();
                self.tree.expand_all();
                self.select_path(&path);
                self.status_message = "Expanded all nodes".to_string();
            }
            _ => {}
        }
    }

    fn selected_path(&self) -> Option<NodePath> {
        self.tree.rows().get(self.selected).map(|row| row.path.clone())
    }

    /// Select the row for `path`, or its nearest visible ancestor
    fn select_path(&mut self, path: &[usize]) {
        let rows = self.tree.rows();
        for len in (0..=path.len()).rev() {
            if let Some(idx) = rows.iter().position(|row| row.path == path[..len]) {
                self.selected = idx;
                return;
            }
        }
        self.selected = 0;
    }

    fn collapse_or_ascend(&mut self) {
        let Some(path) = self.selected_path() else {
            return;
        };
        if self.tree.is_collapsed(&path) || !self.tree.collapse(&path) {
            if let Some((_, parent)) = path.split_last() {
                self.select_path(parent);
            }
        }
    }

    fn expand_or_descend(&mut self) {
        let Some(path) = self.selected_path() else {
            return;
        };
        if !self.tree.expand(&path) {
            let has_children = self
                .tree
                .node_at(&path)
                .is_some_and(|node| !node.children.is_empty());
            if has_children {
                self.selected += 1;
            }
        }
    }
}
