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

//! Leftmost derivation logging.
//!
//! The parser records one sentential form per grammar expansion it
//! takes. The log is append-only and step numbers start at 1, so the
//! finished log reads as a standard leftmost derivation trail.

/// One step of a leftmost derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationStep {
    /// Step number, starting at 1.
    pub number: usize,
    /// The sentential form after this expansion.
    pub sentential_form: String,
}

impl std::fmt::Display for DerivationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}  {}", self.number, self.sentential_form)
    }
}

/// Append-only log of derivation steps.
#[derive(Debug, Default)]
pub struct DerivationLog {
    steps: Vec<DerivationStep>,
}

impl DerivationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next sentential form.
    pub fn record(&mut self, sentential_form: impl Into<String>) {
        let number = self.steps.len() + 1;
        self.steps.push(DerivationStep {
            number,
            sentential_form: sentential_form.into(),
        });
    }

    /// Record a sentential form assembled from the already-resolved
    /// prefix, the newly expanded middle, and the unresolved suffix.
    pub fn record_parts(&mut self, prefix: &str, middle: &str, suffix: &str) {
        self.record(format!("{}{}{}", prefix, middle, suffix));
    }

    /// The recorded steps, in order.
    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps were recorded yet.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consume the log, yielding the steps.
    pub fn into_steps(self) -> Vec<DerivationStep> {
        self.steps
    }
}
