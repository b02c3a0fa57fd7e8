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

//! Parser module for the Keybot compiler.
//!
//! A single-pass recursive-descent parser over the token sequence. It
//! does three things at once:
//! - validates the program against the six-production grammar,
//!   fail-fast with position-tagged diagnostics,
//! - records every leftmost-derivation step taken,
//! - builds the parse tree and the ordered key -> movement table.
//!
//! Shape errors inside a binding are diagnosed on the token window up
//! to the next `>` (or `HALT`/end) before any token is consumed, so
//! messages name the semantic mistake (missing `=`, extra movement)
//! instead of failing on an arbitrary token. The window scan is a
//! bounded lookahead; once tokens are accepted there is no
//! backtracking.

use crate::ast::{AstNode, NodeKind};
use crate::bindings::BindingTable;
use crate::derivation::{DerivationLog, DerivationStep};
use crate::error::{CompileError, ErrorContext, Span};
use crate::lexer::{KeyId, Move, Token, TokenKind};

/// Everything a successful parse produces.
#[derive(Debug)]
pub struct ParseOutput {
    /// The parse tree.
    pub ast: AstNode,
    /// The recorded leftmost derivation.
    pub derivation: Vec<DerivationStep>,
    /// Key bindings in first-seen order.
    pub bindings: BindingTable,
}

/// The parser state.
pub struct Parser<'a> {
    /// The token sequence, terminated by an `End` token.
    tokens: &'a [Token],
    /// Current position in the token sequence.
    position: usize,
    /// Leftmost derivation log.
    derivation: DerivationLog,
    /// Key bindings collected in traversal order.
    bindings: BindingTable,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given token sequence.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            derivation: DerivationLog::new(),
            bindings: BindingTable::new(),
        }
    }

    fn current(&self) -> &Token {
        // tokenize() always appends an End marker
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    fn expect(&mut self, kind: TokenKind, context: ErrorContext) -> Result<(), CompileError> {
        if self.current().kind == kind {
            self.advance();
            Ok(())
        } else {
            let tok = self.current();
            Err(CompileError::at(
                context,
                format!("Expected '{}'", kind.name()),
                &tok.text,
                tok.offset,
            ))
        }
    }

    /// Contiguous token window from `start` up to (not including) the
    /// first token matching `stop`.
    fn window(&self, start: usize, stop: impl Fn(TokenKind) -> bool) -> &'a [Token] {
        let mut end = start;
        while end < self.tokens.len() && !stop(self.tokens[end].kind) {
            end += 1;
        }
        &self.tokens[start..end]
    }

    /// Build an error pointing at a run of tokens: lexemes joined by
    /// spaces, index of the first one.
    fn error_at_tokens(
        context: ErrorContext,
        message: impl Into<String>,
        tokens: &[Token],
    ) -> CompileError {
        let joined = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let first_offset = tokens.first().map(|t| t.offset).unwrap_or(0);
        let span = tokens
            .iter()
            .map(Token::span)
            .reduce(|a, b| a.merge(&b))
            .unwrap_or(Span::new(0, 0));
        CompileError::at_all(context, message, &joined, first_offset, span)
    }

    // ========================================
    // Pre-scans
    // ========================================

    /// Reject stray characters the lexer could not place at all.
    ///
    /// Unrecognized *words* stay in the stream: the descent reports
    /// them with grammar context (e.g. an invalid key id names the
    /// valid set) which is more useful than a flat lexical error.
    fn check_lexical(&self) -> Result<(), CompileError> {
        for tok in self.tokens {
            if tok.kind == TokenKind::Invalid
                && !tok.text.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(CompileError::at(
                    ErrorContext::Lexical,
                    "Unrecognized token",
                    &tok.text,
                    tok.offset,
                ));
            }
        }
        Ok(())
    }

    /// Validate the EXEC ... HALT bracketing before the descent.
    ///
    /// Returns the index of the HALT token.
    fn check_program_shape(&self) -> Result<usize, CompileError> {
        if !matches!(self.tokens.first().map(|t| t.kind), Some(TokenKind::Exec)) {
            return Err(CompileError::new(
                ErrorContext::Program,
                "The program input must start with EXEC",
            ));
        }

        let halt_positions: Vec<usize> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::Halt)
            .map(|(i, _)| i)
            .collect();

        match halt_positions.len() {
            0 => {
                return Err(CompileError::new(
                    ErrorContext::Program,
                    "The program input must end with HALT",
                ));
            }
            1 => {}
            _ => {
                let extra = &self.tokens[halt_positions[1]];
                return Err(CompileError::at(
                    ErrorContext::Program,
                    "Multiple HALT found (only one allowed at the end)",
                    &extra.text,
                    extra.offset,
                ));
            }
        }

        let halt = halt_positions[0];
        let trailing = &self.tokens[halt + 1..self.tokens.len() - 1];
        if !trailing.is_empty() {
            return Err(Self::error_at_tokens(
                ErrorContext::Program,
                "Extra input found after HALT",
                trailing,
            ));
        }

        if halt <= 1 {
            return Err(CompileError::new(
                ErrorContext::Program,
                "The program input contains no statements between EXEC and HALT",
            ));
        }

        Ok(halt)
    }

    /// Classify assignment-shape mistakes on the token window of one
    /// binding before consuming anything.
    fn check_assignment_window(
        &self,
        window: &[Token],
        start: usize,
    ) -> Result<(), CompileError> {
        if window.is_empty() {
            // The separator (or HALT) sits directly at `start`.
            let offending = &self.tokens[start.min(self.tokens.len() - 1)];
            return Err(CompileError::at(
                ErrorContext::Assignment,
                "Missing assignment before '>'",
                &offending.text,
                offending.offset,
            ));
        }

        let eq_positions: Vec<usize> = window
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::Equals)
            .map(|(i, _)| i)
            .collect();

        match eq_positions.len() {
            0 => Err(Self::error_at_tokens(
                ErrorContext::Assignment,
                "Expected '=' in assignment",
                window,
            )),
            1 => {
                let eq = eq_positions[0];
                if eq == 0 && window.len() == 1 {
                    let tok = &window[0];
                    Err(CompileError::at(
                        ErrorContext::Assignment,
                        "Missing key and movement for '='",
                        &tok.text,
                        tok.offset,
                    ))
                } else if eq == 0 {
                    let tok = &window[0];
                    Err(CompileError::at(
                        ErrorContext::Assignment,
                        "Missing key before '='",
                        &tok.text,
                        tok.offset,
                    ))
                } else if eq == window.len() - 1 {
                    let tok = &window[eq];
                    Err(CompileError::at(
                        ErrorContext::Assignment,
                        "Missing movement after '='",
                        &tok.text,
                        tok.offset,
                    ))
                } else if window.len() - eq - 1 > 1 {
                    Err(Self::error_at_tokens(
                        ErrorContext::Assignment,
                        "There should be only 1 movement",
                        &window[eq + 1..],
                    ))
                } else {
                    Ok(())
                }
            }
            _ => {
                // Two bindings ran together: the '>' separator most
                // likely belongs right before the next 'key' token.
                let insert_at = window[eq_positions[0] + 1..]
                    .iter()
                    .find(|t| t.kind == TokenKind::Key)
                    .map(|t| t.offset)
                    .unwrap_or(window[eq_positions[1]].offset);
                Err(Self::error_at_tokens(
                    ErrorContext::Assignment,
                    "Multiple '=' found in assignment",
                    window,
                )
                .with_hint(format!("insert '>' before index {}", insert_at)))
            }
        }
    }

    // ========================================
    // Recursive descent
    // ========================================

    /// Parse the complete program.
    pub fn parse(&mut self) -> Result<AstNode, CompileError> {
        self.check_lexical()?;
        self.check_program_shape()?;

        // <program> -> EXEC <stmt_list> HALT
        self.derivation.record("<program>");
        self.derivation.record("EXEC <stmt_list> HALT");

        let mut node = AstNode::new(NodeKind::Program);

        self.expect(TokenKind::Exec, ErrorContext::Program)?;
        node.push(AstNode::terminal("EXEC"));

        let stmt_list = self.parse_stmt_list("EXEC ", " HALT")?;
        node.push(stmt_list);

        self.expect(TokenKind::Halt, ErrorContext::Program)?;
        node.push(AstNode::terminal("HALT"));

        if !self.current().is_end() {
            let tok = self.current();
            return Err(CompileError::at(
                ErrorContext::Program,
                "Extra input found after HALT",
                &tok.text,
                tok.offset,
            ));
        }

        Ok(node)
    }

    /// `<stmt_list> -> <binding> > | <binding> > <stmt_list>`
    fn parse_stmt_list(&mut self, prefix: &str, suffix: &str) -> Result<AstNode, CompileError> {
        // Bounded lookahead past the next '>' to pick the production.
        let mut look = self.position;
        while look < self.tokens.len() && self.tokens[look].kind != TokenKind::Greater {
            look += 1;
        }
        let has_more = self
            .tokens
            .get(look + 1)
            .is_some_and(|t| t.kind == TokenKind::Key);

        if has_more {
            self.derivation
                .record_parts(prefix, "<binding> > <stmt_list>", suffix);
        } else {
            self.derivation.record_parts(prefix, "<binding> >", suffix);
        }

        let mut node = AstNode::new(NodeKind::StmtList);

        let binding_suffix = if has_more {
            format!(" > <stmt_list>{}", suffix)
        } else {
            format!(" >{}", suffix)
        };
        let binding = self.parse_binding(prefix, &binding_suffix)?;
        let binding_text = binding.text();
        node.push(binding);

        self.expect(TokenKind::Greater, ErrorContext::Statement)?;
        node.push(AstNode::terminal(">"));

        if self.current().kind == TokenKind::Key {
            let rest_prefix = format!("{}{} > ", prefix, binding_text);
            let rest = self.parse_stmt_list(&rest_prefix, suffix)?;
            node.push(rest);
        }

        Ok(node)
    }

    /// `<binding> -> <key> = <move>`
    fn parse_binding(&mut self, prefix: &str, suffix: &str) -> Result<AstNode, CompileError> {
        let start = self.position;
        let window = self.window(start, |k| {
            matches!(k, TokenKind::Greater | TokenKind::Halt | TokenKind::End)
        });
        self.check_assignment_window(window, start)?;

        self.derivation.record_parts(prefix, "<key> = <move>", suffix);

        let mut node = AstNode::new(NodeKind::Binding);

        let key_suffix = format!(" = <move>{}", suffix);
        let (key_node, key_id) = self.parse_key(prefix, &key_suffix)?;
        let key_text = key_node.text();
        node.push(key_node);

        self.expect(TokenKind::Equals, ErrorContext::Assignment)?;
        node.push(AstNode::terminal("="));

        let move_prefix = format!("{}{} = ", prefix, key_text);
        let (move_node, movement) = self.parse_move(&move_prefix, suffix)?;
        node.push(move_node);

        self.bindings.bind(key_id, movement);

        Ok(node)
    }

    /// `<key> -> key <key_id>`
    ///
    /// The recorded derivation step resolves the key id in the same
    /// step, so each binding contributes exactly one Key step and one
    /// Move step to the trace.
    fn parse_key(
        &mut self,
        prefix: &str,
        suffix: &str,
    ) -> Result<(AstNode, KeyId), CompileError> {
        if self.current().kind != TokenKind::Key {
            let tok = self.current();
            return Err(CompileError::at(
                ErrorContext::Key,
                "Expected keyword 'key'",
                &tok.text,
                tok.offset,
            ));
        }

        // 'key' plus everything up to '=' must be exactly two tokens
        let key_window = self.window(self.position, |k| {
            matches!(
                k,
                TokenKind::Equals | TokenKind::Greater | TokenKind::Halt | TokenKind::End
            )
        });
        if key_window.len() < 2 {
            return Err(Self::error_at_tokens(
                ErrorContext::Key,
                "No key value was given",
                key_window,
            ));
        }
        if key_window.len() > 2 {
            return Err(Self::error_at_tokens(
                ErrorContext::Key,
                "Too many key values given",
                key_window,
            ));
        }

        self.advance();
        let mut node = AstNode::new(NodeKind::Key);
        node.push(AstNode::terminal("key"));

        let (id_node, id) = self.parse_key_id(prefix, suffix)?;
        node.push(id_node);

        Ok((node, id))
    }

    /// `<key_id> -> A | B | C | D`
    fn parse_key_id(
        &mut self,
        prefix: &str,
        suffix: &str,
    ) -> Result<(AstNode, KeyId), CompileError> {
        let tok = self.current();
        if let TokenKind::KeyId(id) = tok.kind {
            let text = tok.text.clone();
            self.advance();
            self.derivation
                .record_parts(prefix, &format!("key {}", text), suffix);

            let mut node = AstNode::new(NodeKind::KeyId);
            node.push(AstNode::terminal(text));
            Ok((node, id))
        } else {
            Err(CompileError::at(
                ErrorContext::KeyId,
                format!("Invalid key id. Valid key ids are {}", KeyId::VALID_SET),
                &tok.text,
                tok.offset,
            ))
        }
    }

    /// `<move> -> DRVF | DRVB | TRNL | TRNR | SPNL | SPNR`
    fn parse_move(
        &mut self,
        prefix: &str,
        suffix: &str,
    ) -> Result<(AstNode, Move), CompileError> {
        let tok = self.current();
        if let TokenKind::Move(movement) = tok.kind {
            let text = tok.text.clone();
            self.advance();
            self.derivation.record_parts(prefix, &text, suffix);

            let mut node = AstNode::new(NodeKind::Move);
            node.push(AstNode::terminal(text));
            Ok((node, movement))
        } else {
            Err(CompileError::at(
                ErrorContext::Movement,
                format!("Invalid movement. Valid movements are {}", Move::VALID_SET),
                &tok.text,
                tok.offset,
            ))
        }
    }
}

/// Parse a token sequence into a parse tree, derivation trail and
/// binding table. Aborts at the first violation.
pub fn parse(tokens: &[Token]) -> Result<ParseOutput, CompileError> {
    let mut parser = Parser::new(tokens);
    let ast = parser.parse()?;
    Ok(ParseOutput {
        ast,
        derivation: parser.derivation.into_steps(),
        bindings: parser.bindings,
    })
}
