// Keybot - A key-binding script compiler targeting the BASIC Stamp 2p
// Copyright (C) 2026  Keybot contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Lexer module for the Keybot compiler.
//!
//! Tokenization is total: unknown lexemes become `Invalid` tokens
//! instead of errors, so the parser can report them with grammar
//! context. The stream always terminates with a single `End` token
//! whose offset is the input length.

mod tokens;

pub use tokens::{KeyId, Move, Token, TokenKind};

/// The lexer state for tokenizing source code.
pub struct Lexer<'source> {
    /// The source text being tokenized.
    source: &'source str,
    /// Current byte position in the source.
    position: usize,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Check if we've reached the end of the source.
    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Peek at the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Advance to the next character and return it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consume ASCII whitespace (space, tab, CR, LF).
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' || c == '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read a maximal run of ASCII alphanumerics.
    fn read_word(&mut self) -> &'source str {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.advance();
        }
        &self.source[start..self.position]
    }

    /// Tokenize the whole input.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }

            let start = self.position;
            let c = match self.peek() {
                Some(c) => c,
                None => break,
            };

            match c {
                '=' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Equals, "=", start));
                }
                '>' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Greater, ">", start));
                }
                c if c.is_ascii_alphanumeric() => {
                    let word = self.read_word();
                    tokens.push(Token::new(TokenKind::classify_word(word), word, start));
                }
                c => {
                    // Stray character with no place in the grammar.
                    self.advance();
                    tokens.push(Token::new(TokenKind::Invalid, c.to_string(), start));
                }
            }
        }

        tokens.push(Token::new(TokenKind::End, "", self.source.len()));
        tokens
    }
}

/// Tokenize source text into a token sequence.
///
/// Total and deterministic: this never fails, and the last token is
/// always the `End` marker.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
