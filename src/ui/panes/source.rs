//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the program
//! being explored with token-based highlighting and the parse error line.
//!
//! # Features
//!
//! - Highlighting driven by the real lexer output, comments included
//! - Error line highlighting when the program failed to parse
//! - Scroll state management for navigating large files
//! - Line numbering
//!
//! Highlighting is computed once per file with [`highlight_source_code`];
//! rendering only slices and decorates the cached lines.

use crate::parser::ast::SourceLocation;
use crate::parser::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const KEYWORDS: [&str; 6] = ["def", "return", "let", "while", "if", "else"];

/// Style for every token, keyed by where the token starts
fn token_styles(tokens: &[Token]) -> Vec<(SourceLocation, Style)> {
    let mut styles = Vec::with_capacity(tokens.len());
    let mut previous: Option<&Token> = None;

    for token in tokens {
        let style = match token {
            Token::Ident(name, _) if KEYWORDS.contains(&name.as_str()) => Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD),
            Token::Ident(..) => match previous {
                Some(Token::Symbol('@', _)) => Style::default().fg(DEFAULT_THEME.function),
                Some(Token::Ident(kw, _)) if kw == "def" || kw == "let" => {
                    Style::default().fg(DEFAULT_THEME.type_name)
                }
                _ => Style::default().fg(DEFAULT_THEME.fg),
            },
            Token::Int(..) => Style::default().fg(DEFAULT_THEME.number),
            Token::Symbol(c, _) if "(){}[]".contains(*c) => {
                Style::default().fg(DEFAULT_THEME.primary)
            }
            Token::Symbol('@', _) => Style::default().fg(DEFAULT_THEME.function),
            Token::Symbol(..) => Style::default().fg(DEFAULT_THEME.fg),
            Token::Comment(..) => Style::default().fg(DEFAULT_THEME.comment),
            Token::Whitespace(..) => Style::default(),
        };
        styles.push((token.location(), style));

        if !token.is_trivia() {
            previous = Some(token);
        }
    }

    styles
}

/// Split the source into styled lines.
///
/// Tokens cover the input without gaps, so each character takes the style of
/// the last token that starts at or before it. When lexing stopped early,
/// `unlexed_from` marks where the tokens end and the rest of the file is
/// drawn in the error colour.
pub fn highlight_source_code(
    source: &str,
    tokens: &[Token],
    unlexed_from: Option<SourceLocation>,
) -> Vec<Line<'static>> {
    let mut starts = token_styles(tokens);
    if let Some(location) = unlexed_from {
        starts.push((location, Style::default().fg(DEFAULT_THEME.error)));
    }
    let mut next = 0;
    let mut style = Style::default().fg(DEFAULT_THEME.fg);
    let mut lines = Vec::new();

    for (line_idx, line) in source.split('\n').enumerate() {
        let line_no = line_idx + 1;
        let mut spans = Vec::new();
        let mut current = String::new();

        for (col_idx, ch) in line.chars().enumerate() {
            let here = (line_no, col_idx + 1);
            while next < starts.len() && (starts[next].0.line, starts[next].0.column) <= here {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), style));
                }
                style = starts[next].1;
                next += 1;
            }
            if ch != '\r' {
                current.push(ch);
            }
        }

        if !current.is_empty() {
            spans.push(Span::styled(current, style));
        }
        lines.push(Line::from(spans));
    }

    if source.ends_with('\n') {
        lines.pop();
    }
    lines
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    /// Line to bring to the middle of the pane on the next render
    pub center_on: Option<usize>,
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub file_name: &'a str,
    pub lines: &'a [Line<'static>],
    pub error_line: Option<usize>,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", data.file_name))
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_lines = data.lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if let Some(line) = scroll_state.center_on.take() {
        scroll_state.offset = line.saturating_sub(1).saturating_sub(visible_height / 2);
    }

    // Clamp scroll offset to valid range
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = data
        .lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_error = data.error_line == Some(line_num);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            if is_error {
                // White text on red for visibility
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(ratatui::style::Color::White)
                    .add_modifier(Modifier::BOLD);
                spans.extend(
                    line.spans
                        .iter()
                        .map(|span| Span::styled(span.content.clone(), error_style)),
                );
            } else {
                spans.extend(line.spans.iter().cloned());
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_lines_keep_text() {
        let source = "def int @f()\n    /* two\n lines */ return 1;\n";
        let tokens = Lexer::new(source).tokenize().unwrap();
        let lines = highlight_source_code(source, &tokens, None);

        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[0]), "def int @f()");
        assert_eq!(text(&lines[2]), " lines */ return 1;");
    }

    #[test]
    fn test_comment_style_spans_lines() {
        let source = "/* a\nb */ x";
        let tokens = Lexer::new(source).tokenize().unwrap();
        let lines = highlight_source_code(source, &tokens, None);

        let comment = Style::default().fg(DEFAULT_THEME.comment);
        assert_eq!(lines[1].spans[0].content, "b */");
        assert_eq!(lines[1].spans[0].style, comment);
        assert_eq!(lines[1].spans.last().unwrap().content, "x");
    }

    #[test]
    fn test_highlighting_survives_lex_error() {
        let source = "let int x = 1 % 2;\nreturn x;";
        let (tokens, err) = Lexer::new(source).tokenize_partial();
        let lines = highlight_source_code(source, &tokens, err.map(|e| e.location));

        let spans = &lines[0].spans;
        assert_eq!(spans[0].content, "let");
        assert_eq!(spans[0].style.fg, Some(DEFAULT_THEME.keyword));

        let tail = spans.last().unwrap();
        assert_eq!(tail.content, "% 2;");
        assert_eq!(tail.style.fg, Some(DEFAULT_THEME.error));
        assert_eq!(lines[1].spans[0].style.fg, Some(DEFAULT_THEME.error));
    }

    #[test]
    fn test_keywords_and_calls() {
        let source = "return @max(a, 1);";
        let tokens = Lexer::new(source).tokenize().unwrap();
        let lines = highlight_source_code(source, &tokens, None);

        let spans = &lines[0].spans;
        assert_eq!(spans[0].content, "return");
        assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[3].content, "max");
        assert_eq!(spans[3].style.fg, Some(DEFAULT_THEME.function));
    }
}
