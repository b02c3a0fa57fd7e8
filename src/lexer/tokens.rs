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

//! Token definitions for the key-binding language.

use crate::error::Span;

/// A key identifier. The grammar admits exactly four keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyId {
    A,
    B,
    C,
    D,
}

impl KeyId {
    /// All key identifiers, in grammar order.
    pub const ALL: [KeyId; 4] = [KeyId::A, KeyId::B, KeyId::C, KeyId::D];

    /// The set notation used in diagnostics.
    pub const VALID_SET: &'static str = "{A, B, C, D}";

    /// Parse a lexeme into a key identifier (case-sensitive).
    pub fn from_lexeme(s: &str) -> Option<KeyId> {
        match s {
            "A" => Some(KeyId::A),
            "B" => Some(KeyId::B),
            "C" => Some(KeyId::C),
            "D" => Some(KeyId::D),
            _ => None,
        }
    }

    /// The uppercase key literal as written in source.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyId::A => "A",
            KeyId::B => "B",
            KeyId::C => "C",
            KeyId::D => "D",
        }
    }

    /// The lowercase key literal, used by the runtime dispatch lines.
    pub fn as_lower_str(&self) -> &'static str {
        match self {
            KeyId::A => "a",
            KeyId::B => "b",
            KeyId::C => "c",
            KeyId::D => "d",
        }
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A movement mnemonic. The grammar admits exactly six movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// DRVF - drive forward.
    DriveForward,
    /// DRVB - drive backward.
    DriveBackward,
    /// TRNL - turn left.
    TurnLeft,
    /// TRNR - turn right.
    TurnRight,
    /// SPNL - spin left.
    SpinLeft,
    /// SPNR - spin right.
    SpinRight,
}

impl Move {
    /// All movements, in grammar order.
    pub const ALL: [Move; 6] = [
        Move::DriveForward,
        Move::DriveBackward,
        Move::TurnLeft,
        Move::TurnRight,
        Move::SpinLeft,
        Move::SpinRight,
    ];

    /// The set notation used in diagnostics.
    pub const VALID_SET: &'static str = "{DRVF, DRVB, TRNL, TRNR, SPNL, SPNR}";

    /// Parse a lexeme into a movement (case-sensitive).
    pub fn from_lexeme(s: &str) -> Option<Move> {
        match s {
            "DRVF" => Some(Move::DriveForward),
            "DRVB" => Some(Move::DriveBackward),
            "TRNL" => Some(Move::TurnLeft),
            "TRNR" => Some(Move::TurnRight),
            "SPNL" => Some(Move::SpinLeft),
            "SPNR" => Some(Move::SpinRight),
            _ => None,
        }
    }

    /// The mnemonic as written in source.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Move::DriveForward => "DRVF",
            Move::DriveBackward => "DRVB",
            Move::TurnLeft => "TRNL",
            Move::TurnRight => "TRNR",
            Move::SpinLeft => "SPNL",
            Move::SpinRight => "SPNR",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// The category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `EXEC` - program start keyword.
    Exec,
    /// `HALT` - program end keyword.
    Halt,
    /// `key` - binding keyword.
    Key,
    /// `=` - binding assignment.
    Equals,
    /// `>` - statement separator.
    Greater,
    /// A key identifier (A-D).
    KeyId(KeyId),
    /// A movement mnemonic.
    Move(Move),
    /// An unrecognized lexeme; reported contextually by the parser.
    Invalid,
    /// End of input marker, always the last token.
    End,
}

impl TokenKind {
    /// Classify an alphanumeric word (case-sensitive).
    pub fn classify_word(word: &str) -> TokenKind {
        match word {
            "EXEC" => TokenKind::Exec,
            "HALT" => TokenKind::Halt,
            "key" => TokenKind::Key,
            _ => {
                if let Some(id) = KeyId::from_lexeme(word) {
                    TokenKind::KeyId(id)
                } else if let Some(mv) = Move::from_lexeme(word) {
                    TokenKind::Move(mv)
                } else {
                    TokenKind::Invalid
                }
            }
        }
    }

    /// Get a human-readable name for this token category.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Exec => "EXEC",
            TokenKind::Halt => "HALT",
            TokenKind::Key => "key",
            TokenKind::Equals => "=",
            TokenKind::Greater => ">",
            TokenKind::KeyId(_) => "KEY_ID (A|B|C|D)",
            TokenKind::Move(_) => "MOVE (DRVF|DRVB|TRNL|TRNR|SPNL|SPNR)",
            TokenKind::Invalid => "INVALID",
            TokenKind::End => "end of input",
        }
    }
}

/// A token produced by the lexer. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token category.
    pub kind: TokenKind,
    /// The literal text of the lexeme (empty for the end marker).
    pub text: String,
    /// Byte offset of the lexeme in the input.
    pub offset: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// The source span covered by this token.
    pub fn span(&self) -> Span {
        Span::new(self.offset, self.offset + self.text.len())
    }

    /// Whether this token is the end-of-input marker.
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_end() {
            write!(f, "{}", self.kind.name())
        } else {
            write!(f, "{}", self.text)
        }
    }
}
