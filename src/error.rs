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

//! Error types for the Keybot compiler.
//!
//! Every diagnostic carries the nonterminal context it was raised in,
//! a human-readable message, and (where a token is involved) the
//! offending lexeme with its byte offset baked into the message text.
//! Message rendering is centralized here so exact diagnostic strings
//! stay testable.

use std::ops::Range;
use thiserror::Error;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// The grammar context a diagnostic was raised in.
///
/// The tag is part of the rendered message (`[Program Error] ...`) and
/// names the nonterminal being parsed when the violation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    /// An unrecognized lexeme that never reaches the grammar.
    Lexical,
    /// Whole-program shape: EXEC/HALT bracketing and trailing input.
    Program,
    /// Statement list structure (the `>` separators).
    Statement,
    /// A single `key ... = ...` binding.
    Assignment,
    /// The `key <key_id>` clause.
    Key,
    /// The key identifier terminal.
    KeyId,
    /// The movement mnemonic terminal.
    Movement,
}

impl ErrorContext {
    /// Get the tag used in rendered diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            ErrorContext::Lexical => "Lexical",
            ErrorContext::Program => "Program",
            ErrorContext::Statement => "Statement",
            ErrorContext::Assignment => "Assignment",
            ErrorContext::Key => "Key",
            ErrorContext::KeyId => "Key ID",
            ErrorContext::Movement => "Movement",
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A compiler diagnostic.
///
/// The `message` already contains the offending lexeme and offset for
/// token-level errors, so `Display` output is the full diagnostic text.
#[derive(Debug, Error)]
#[error("[{context} Error] {message}")]
pub struct CompileError {
    /// The grammar context the error was raised in.
    pub context: ErrorContext,
    /// The full message, including token context where applicable.
    pub message: String,
    /// The source span of the offending token(s), if any.
    pub span: Option<Span>,
    /// Optional secondary suggestion (e.g. where a missing `>` goes).
    pub hint: Option<String>,
}

impl CompileError {
    /// Create an error with no token context.
    pub fn new(context: ErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
            span: None,
            hint: None,
        }
    }

    /// Create an error pointing at a single lexeme.
    pub fn at(
        context: ErrorContext,
        message: impl Into<String>,
        lexeme: &str,
        offset: usize,
    ) -> Self {
        Self {
            context,
            message: format!("{} ['{}' @ index {}]", message.into(), lexeme, offset),
            span: Some(Span::new(offset, offset + lexeme.len())),
            hint: None,
        }
    }

    /// Create an error pointing at a joined run of lexemes.
    ///
    /// The lexemes render space-separated and the reported index is the
    /// offset of the first one.
    pub fn at_all(
        context: ErrorContext,
        message: impl Into<String>,
        joined: &str,
        first_offset: usize,
        span: Span,
    ) -> Self {
        Self {
            context,
            message: format!(
                "{} ['{}' @ index {}]",
                message.into(),
                joined,
                first_offset
            ),
            span: Some(span),
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        let line_start = last_newline;
        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[line_start..line_end].to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Format an error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();
    output.push_str(&format!("error: {}\n", error));

    if let Some(span) = &error.span {
        let loc = SourceLocation::from_offset(source, span.start);
        output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

        let line_num_width = loc.line.to_string().len();
        output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
        output.push_str(&format!(
            "{:>width$} | {}\n",
            loc.line,
            loc.line_content,
            width = line_num_width
        ));

        let underline_start = loc.column - 1;
        let underline_len = span
            .len()
            .max(1)
            .min(loc.line_content.len().saturating_sub(underline_start).max(1));
        output.push_str(&format!(
            "{:>width$} | {:>start$}{}\n",
            "",
            "",
            "^".repeat(underline_len),
            width = line_num_width,
            start = underline_start
        ));
    }

    if let Some(hint) = &error.hint {
        output.push_str(&format!("  = hint: {}\n", hint));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_creation() {
        let span = Span::new(10, 20);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_merge() {
        let span1 = Span::new(5, 10);
        let span2 = Span::new(15, 20);
        let merged = span1.merge(&span2);
        assert_eq!(merged.start, 5);
        assert_eq!(merged.end, 20);
    }

    #[test]
    fn test_context_tags() {
        assert_eq!(ErrorContext::Program.tag(), "Program");
        assert_eq!(ErrorContext::Assignment.tag(), "Assignment");
        assert_eq!(ErrorContext::KeyId.tag(), "Key ID");
    }

    #[test]
    fn test_plain_error_display() {
        let error = CompileError::new(
            ErrorContext::Program,
            "The program input must start with EXEC",
        );
        assert_eq!(
            error.to_string(),
            "[Program Error] The program input must start with EXEC"
        );
    }

    #[test]
    fn test_token_error_display() {
        let error = CompileError::at(ErrorContext::KeyId, "Invalid key id", "E", 9);
        assert_eq!(
            error.to_string(),
            "[Key ID Error] Invalid key id ['E' @ index 9]"
        );
        assert_eq!(error.span, Some(Span::new(9, 10)));
    }

    #[test]
    fn test_error_hint() {
        let error = CompileError::new(ErrorContext::Assignment, "Multiple '=' found in assignment")
            .with_hint("insert '>' before index 18");
        assert_eq!(error.hint.as_deref(), Some("insert '>' before index 18"));
    }

    #[test]
    fn test_format_error_with_span() {
        let source = "EXEC key E = DRVF > HALT";
        let error = CompileError::at(ErrorContext::KeyId, "Invalid key id", "E", 9);
        let rendered = format_error(&error, source, Some("bindings.keys"));
        assert!(rendered.contains("bindings.keys:1:10"));
        assert!(rendered.contains("EXEC key E = DRVF > HALT"));
        assert!(rendered.contains('^'));
    }

    #[test]
    fn test_format_error_without_span() {
        let error = CompileError::new(
            ErrorContext::Program,
            "The program input must end with HALT",
        );
        let rendered = format_error(&error, "EXEC key A = DRVF >", None);
        assert!(rendered.starts_with("error: [Program Error]"));
        assert!(!rendered.contains("-->"));
    }
}
