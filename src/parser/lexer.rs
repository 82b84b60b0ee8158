//! Lexer (tokenizer) for cipp source code
//!
//! Converts raw source text into a flat [`Token`] sequence. Unlike the parser's
//! view of the input, this sequence keeps comments and whitespace as trivia
//! tokens so that tools such as the source pane can highlight them; the
//! [`TokenStream`](super::stream::TokenStream) drops them before parsing.
//!
//! Keywords are not recognised here. `def`, `return`, `let`, `while`, `if` and
//! `else` come out as ordinary identifiers and are checked contextually by the
//! parser.

use super::ast::SourceLocation;
use super::stream::TokenStream;
use std::fmt;
use thiserror::Error;

/// Single-character symbols understood by the grammar.
pub const SYMBOLS: &str = "(){}[],=+-*/@;<>!";

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that syntax errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String, SourceLocation),
    Int(i64, SourceLocation),
    Symbol(char, SourceLocation),

    // Trivia, never seen by the parser
    Comment(String, SourceLocation),
    Whitespace(String, SourceLocation),
}

impl Token {
    /// Returns the source location where this token starts.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Ident(_, loc)
            | Token::Int(_, loc)
            | Token::Symbol(_, loc)
            | Token::Comment(_, loc)
            | Token::Whitespace(_, loc) => *loc,
        }
    }

    /// Location just past the last character of this token.
    ///
    /// Integer literals are measured by their value, so leading zeros are
    /// not counted.
    pub fn end_location(&self) -> SourceLocation {
        let start = self.location();
        let text = match self {
            Token::Ident(text, _) | Token::Comment(text, _) | Token::Whitespace(text, _) => text,
            Token::Int(value, _) => {
                return SourceLocation::new(start.line, start.column + value.to_string().len())
            }
            Token::Symbol(_, _) => return SourceLocation::new(start.line, start.column + 1),
        };

        text.chars().fold(start, |loc, ch| {
            if ch == '\n' {
                SourceLocation::new(loc.line + 1, 1)
            } else {
                SourceLocation::new(loc.line, loc.column + 1)
            }
        })
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Comment(..) | Token::Whitespace(..))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name, _) => write!(f, "identifier '{}'", name),
            Token::Int(value, _) => write!(f, "integer {}", value),
            Token::Symbol(c, _) => write!(f, "token '{}'", c),
            Token::Comment(_, _) => write!(f, "comment"),
            Token::Whitespace(_, _) => write!(f, "whitespace"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at line {}, column {}: {message}", location.line, location.column)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for cipp source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, trivia included
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        match self.tokenize_partial() {
            (tokens, None) => Ok(tokens),
            (_, Some(err)) => Err(err),
        }
    }

    /// Tokenize up to the first error, keeping every token before it
    pub fn tokenize_partial(&mut self) -> (Vec<Token>, Option<LexError>) {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            match self.next_token() {
                Ok(token) => tokens.push(token),
                Err(err) => return (tokens, Some(err)),
            }
        }

        (tokens, None)
    }

    /// Tokenize the entire input into a parser-ready stream
    pub fn tokenize_stream(&mut self) -> Result<TokenStream, LexError> {
        let tokens = self.tokenize()?;
        Ok(TokenStream::new(tokens).with_end(self.current_location()))
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            c if c.is_whitespace() => Ok(self.whitespace(c, loc)),

            '/' if self.peek() == Some('/') => Ok(self.line_comment(loc)),
            '/' if self.peek() == Some('*') => self.block_comment(loc),

            '0'..='9' => self.number_literal(ch, loc),

            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier(ch, loc)),

            c if SYMBOLS.contains(c) => Ok(Token::Symbol(c, loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    fn whitespace(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut text = String::from(first);
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            text.push(ch);
            self.advance();
        }
        Token::Whitespace(text, loc)
    }

    /// Single-line comment (// ...), the newline is left as whitespace
    fn line_comment(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::from("/");
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }
        Token::Comment(text, loc)
    }

    /// Multi-line comment (/* ... */)
    fn block_comment(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::from("/");
        text.push('*');
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                text.push_str("*/");
                return Ok(Token::Comment(text, loc));
            }
            if let Some(ch) = self.advance() {
                text.push(ch);
            }
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: loc,
        })
    }

    /// Parse integer literal
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::from(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = num_str.parse::<i64>().map_err(|_| LexError {
            message: format!("Integer literal out of range: {}", num_str),
            location: loc,
        })?;

        Ok(Token::Int(value, loc))
    }

    /// Identifiers, keywords included
    fn identifier(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::from(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Ident(ident, loc)
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn significant(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .filter(|t| !t.is_trivia())
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = significant("def int @main() { return 0; }");

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "def"));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "int"));
        assert!(matches!(tokens[2], Token::Symbol('@', _)));
        assert!(matches!(tokens[3], Token::Ident(ref s, _) if s == "main"));
        assert!(matches!(tokens[4], Token::Symbol('(', _)));
        assert!(matches!(tokens[5], Token::Symbol(')', _)));
        assert!(matches!(tokens[6], Token::Symbol('{', _)));
        assert!(matches!(tokens[7], Token::Ident(ref s, _) if s == "return"));
        assert!(matches!(tokens[8], Token::Int(0, _)));
        assert!(matches!(tokens[9], Token::Symbol(';', _)));
        assert!(matches!(tokens[10], Token::Symbol('}', _)));
        assert_eq!(tokens.len(), 11);
    }

    #[test]
    fn test_comparison_is_two_symbols() {
        let tokens = significant("a <= b == c");

        assert!(matches!(tokens[1], Token::Symbol('<', _)));
        assert!(matches!(tokens[2], Token::Symbol('=', _)));
        assert!(matches!(tokens[4], Token::Symbol('=', _)));
        assert!(matches!(tokens[5], Token::Symbol('=', _)));
    }

    #[test]
    fn test_comments_are_trivia() {
        let tokens = Lexer::new("x // line\n/* block\ncomment */ y")
            .tokenize()
            .unwrap();

        assert!(matches!(tokens[2], Token::Comment(ref s, _) if s == "// line"));
        assert!(matches!(tokens[4], Token::Comment(ref s, _) if s == "/* block\ncomment */"));
        assert!(matches!(tokens[6], Token::Ident(ref s, _) if s == "y"));
        assert_eq!(tokens[6].location(), SourceLocation::new(3, 12));

        let tokens = significant("x // line\n/* block\ncomment */ y");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_slash_is_still_a_symbol() {
        let tokens = significant("a / b");
        assert!(matches!(tokens[1], Token::Symbol('/', _)));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("x /* never closed").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated block comment");
        assert_eq!(err.location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("a % b").tokenize().unwrap_err();
        assert!(err.message.contains("'%'"));
    }

    #[test]
    fn test_partial_tokens_before_error() {
        let (tokens, err) = Lexer::new("x = 1 % 2;").tokenize_partial();

        assert_eq!(tokens.len(), 6);
        assert!(matches!(tokens[4], Token::Int(1, _)));
        assert_eq!(err.unwrap().location, SourceLocation::new(1, 7));

        let (tokens, err) = Lexer::new("x;").tokenize_partial();
        assert_eq!(tokens.len(), 2);
        assert!(err.is_none());
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = Lexer::new("99999999999999999999").tokenize().unwrap_err();
        assert!(err.message.starts_with("Integer literal out of range"));
    }

    #[test]
    fn test_token_end_location() {
        let tokens = Lexer::new("abc 42\n/* a\nbc */;").tokenize().unwrap();

        assert_eq!(tokens[0].end_location(), SourceLocation::new(1, 4));
        assert_eq!(tokens[2].end_location(), SourceLocation::new(1, 7));
        assert_eq!(tokens[3].end_location(), SourceLocation::new(2, 1));
        assert_eq!(tokens[4].end_location(), SourceLocation::new(3, 6));
        assert_eq!(tokens[5].end_location(), SourceLocation::new(3, 7));
    }

    #[test]
    fn test_stream_end_location() {
        let stream = Lexer::new("x\n  ").tokenize_stream().unwrap();
        assert_eq!(stream.end_location(), SourceLocation::new(2, 3));
        assert_eq!(stream.remaining(), 1);
    }
}
