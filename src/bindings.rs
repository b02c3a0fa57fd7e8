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

//! The ordered key -> movement binding table.
//!
//! Backed by a vector with linear upsert-by-key: rebinding a key
//! overwrites its movement but keeps the entry at its first-seen
//! position, so code generation order is stable and reproducible.
//! With at most four keys, linear scans are the right tool.

use crate::lexer::{KeyId, Move};

/// Ordered mapping from key identifiers to movements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    entries: Vec<(KeyId, Move)>,
}

impl BindingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the movement bound to a key.
    ///
    /// Last write wins per key; the entry stays at the position where
    /// the key was first bound.
    pub fn bind(&mut self, key: KeyId, movement: Move) {
        for entry in &mut self.entries {
            if entry.0 == key {
                entry.1 = movement;
                return;
            }
        }
        self.entries.push((key, movement));
    }

    /// Look up the movement bound to a key.
    pub fn get(&self, key: KeyId) -> Option<Move> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, m)| *m)
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &(KeyId, Move)> {
        self.entries.iter()
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct movements actually referenced, in first-reference
    /// order. Duplicates collapse.
    pub fn distinct_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (_, movement) in &self.entries {
            if !moves.contains(movement) {
                moves.push(*movement);
            }
        }
        moves
    }
}
