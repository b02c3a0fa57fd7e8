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

//! Parse tree definitions for the Keybot compiler.
//!
//! The tree is built by the parser and read-only afterwards. Children
//! are owned exclusively by their parent, so the structure is always a
//! tree: no sharing, no back edges. Each nonterminal node's children
//! mirror its production's right-hand side in arity and order.

/// The kind of a parse tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `<program>` - the start symbol.
    Program,
    /// `<stmt_list>` - a statement list.
    StmtList,
    /// `<binding>` - one key binding.
    Binding,
    /// `<key>` - the `key <key_id>` clause.
    Key,
    /// `<key_id>` - a key identifier.
    KeyId,
    /// `<move>` - a movement mnemonic.
    Move,
    /// A terminal leaf carrying its literal value.
    Terminal,
}

/// A node in the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    /// The node kind.
    pub kind: NodeKind,
    /// Literal value; only meaningful for terminal leaves.
    pub value: String,
    /// Ordered children (empty for terminals).
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// Create a new nonterminal node with no children yet.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            value: String::new(),
            children: Vec::new(),
        }
    }

    /// Create a terminal leaf carrying a literal value.
    pub fn terminal(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Terminal,
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Append a child node.
    pub fn push(&mut self, child: AstNode) {
        self.children.push(child);
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The display label: the angle-bracketed nonterminal name, or the
    /// literal value for terminals.
    pub fn label(&self) -> &str {
        match self.kind {
            NodeKind::Program => "<program>",
            NodeKind::StmtList => "<stmt_list>",
            NodeKind::Binding => "<binding>",
            NodeKind::Key => "<key>",
            NodeKind::KeyId => "<key_id>",
            NodeKind::Move => "<move>",
            NodeKind::Terminal => &self.value,
        }
    }

    /// Concatenated terminal text of this subtree, space-separated.
    pub fn text(&self) -> String {
        if self.is_leaf() {
            return self.value.clone();
        }
        self.children
            .iter()
            .map(AstNode::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> AstNode {
        let mut key = AstNode::new(NodeKind::Key);
        key.push(AstNode::terminal("key"));
        let mut key_id = AstNode::new(NodeKind::KeyId);
        key_id.push(AstNode::terminal("A"));
        key.push(key_id);
        key
    }

    #[test]
    fn test_terminal_leaf() {
        let node = AstNode::terminal("DRVF");
        assert!(node.is_leaf());
        assert_eq!(node.label(), "DRVF");
        assert_eq!(node.text(), "DRVF");
    }

    #[test]
    fn test_nonterminal_labels() {
        assert_eq!(AstNode::new(NodeKind::Program).label(), "<program>");
        assert_eq!(AstNode::new(NodeKind::StmtList).label(), "<stmt_list>");
        assert_eq!(AstNode::new(NodeKind::Binding).label(), "<binding>");
    }

    #[test]
    fn test_subtree_text() {
        assert_eq!(sample_key().text(), "key A");
    }

    #[test]
    fn test_children_keep_order() {
        let mut binding = AstNode::new(NodeKind::Binding);
        binding.push(sample_key());
        binding.push(AstNode::terminal("="));
        let mut mv = AstNode::new(NodeKind::Move);
        mv.push(AstNode::terminal("SPNL"));
        binding.push(mv);

        assert_eq!(binding.children.len(), 3);
        assert_eq!(binding.text(), "key A = SPNL");
    }
}
