//! Forward-only cursor over the significant tokens of a source file

use super::ast::SourceLocation;
use super::lexer::Token;

/// Token cursor handed to the parser.
///
/// Trivia (comments and whitespace) is dropped on construction, so `peek`
/// always sees the next token that matters to the grammar.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    end: SourceLocation,
}

impl TokenStream {
    /// The end of input is taken to be just past the last token, trivia
    /// included; use [`with_end`](Self::with_end) when the exact end is known.
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(Token::end_location)
            .unwrap_or(SourceLocation::new(1, 1));
        let tokens: Vec<Token> = tokens.into_iter().filter(|t| !t.is_trivia()).collect();
        Self {
            tokens,
            position: 0,
            end,
        }
    }

    /// Sets the location reported once the stream is exhausted
    pub fn with_end(mut self, end: SourceLocation) -> Self {
        self.end = end;
        self
    }

    /// Number of tokens not yet consumed
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Look at the next token without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Consume and return the next token
    pub fn take(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    /// Location of the next token, or of the end of input
    pub fn location(&self) -> SourceLocation {
        self.peek().map(Token::location).unwrap_or(self.end)
    }

    pub fn end_location(&self) -> SourceLocation {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(column: usize) -> SourceLocation {
        SourceLocation::new(1, column)
    }

    #[test]
    fn test_trivia_is_dropped() {
        let stream = TokenStream::new(vec![
            Token::Whitespace(" ".to_string(), loc(1)),
            Token::Ident("x".to_string(), loc(2)),
            Token::Comment("// c".to_string(), loc(4)),
        ]);

        assert_eq!(stream.remaining(), 1);
        assert_eq!(stream.peek(), Some(&Token::Ident("x".to_string(), loc(2))));
    }

    #[test]
    fn test_end_is_past_the_last_token() {
        let mut stream = TokenStream::new(vec![
            Token::Ident("ab".to_string(), loc(1)),
            Token::Whitespace(" ".to_string(), loc(3)),
            Token::Symbol(';', loc(4)),
        ]);
        assert_eq!(stream.end_location(), loc(5));

        stream.take();
        stream.take();
        assert_eq!(stream.location(), loc(5));

        let stream = TokenStream::new(vec![
            Token::Int(7, loc(1)),
            Token::Comment("// x\n".to_string(), loc(2)),
        ]);
        assert_eq!(stream.end_location(), SourceLocation::new(2, 1));
        assert_eq!(TokenStream::new(vec![]).end_location(), loc(1));
    }

    #[test]
    fn test_take_advances_until_exhausted() {
        let mut stream = TokenStream::new(vec![
            Token::Int(1, loc(1)),
            Token::Symbol('+', loc(2)),
        ])
        .with_end(loc(3));

        assert_eq!(stream.take(), Some(Token::Int(1, loc(1))));
        assert_eq!(stream.remaining(), 1);
        assert_eq!(stream.location(), loc(2));
        assert_eq!(stream.take(), Some(Token::Symbol('+', loc(2))));
        assert!(stream.is_empty());
        assert_eq!(stream.take(), None);
        assert_eq!(stream.peek(), None);
        assert_eq!(stream.location(), loc(3));
    }
}
