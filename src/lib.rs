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

//! # Keybot
//!
//! A compiler translating key-binding scripts into PBASIC programs for
//! Boe-Bot style robots driven by a BASIC Stamp 2p.
//!
//! A script binds remote-control keys to wheel movements:
//!
//! ```text
//! EXEC key A = DRVF > key B = SPNL > HALT
//! ```
//!
//! Compilation runs lexing, recursive-descent parsing (recording the
//! leftmost derivation and building the parse tree) and PBASIC code
//! generation, aborting at the first error:
//!
//! ```
//! let result = keybot::compile("EXEC key A = DRVF > HALT").unwrap();
//! assert!(result.pbasic.contains("GOSUB Forward"));
//! assert_eq!(result.derivation.len(), 6);
//! ```

pub mod ast;
pub mod bindings;
pub mod codegen;
pub mod derivation;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use ast::{AstNode, NodeKind};
pub use bindings::BindingTable;
pub use derivation::DerivationStep;
pub use error::{format_error, CompileError, ErrorContext, Result, Span};
pub use grammar::grammar_text;
pub use lexer::{tokenize, KeyId, Move, Token, TokenKind};
pub use parser::{parse, ParseOutput};
pub use tree::render_tree;

/// Compiler version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compiler name.
pub const NAME: &str = "keybot";

/// All artifacts of one successful compilation.
#[derive(Debug)]
pub struct Compilation {
    /// The token sequence, including the end-of-input marker.
    pub tokens: Vec<Token>,
    /// The parse tree.
    pub ast: AstNode,
    /// The recorded leftmost derivation.
    pub derivation: Vec<DerivationStep>,
    /// Key bindings in first-seen order.
    pub bindings: BindingTable,
    /// The generated PBASIC program.
    pub pbasic: String,
}

impl Compilation {
    /// Render the parse tree as ASCII art.
    pub fn tree_text(&self) -> String {
        tree::render_tree(&self.ast)
    }

    /// The numbered derivation trail, one step per line.
    pub fn derivation_text(&self) -> String {
        self.derivation
            .iter()
            .map(DerivationStep::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Compile a key-binding script into a PBASIC program.
///
/// Runs the full pipeline and stops at the first error.
pub fn compile(source: &str) -> Result<Compilation> {
    let tokens = lexer::tokenize(source);
    let output = parser::parse(&tokens)?;
    let pbasic = codegen::generate(&output.bindings);

    Ok(Compilation {
        tokens,
        ast: output.ast,
        derivation: output.derivation,
        bindings: output.bindings,
        pbasic,
    })
}
