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

//! The fixed BNF grammar of the key-binding language.

/// The six productions of the key-binding grammar, as displayed to
/// users. Independent of any compile call.
pub const GRAMMAR_BNF: &str = "\
<program> -> EXEC <stmt_list> HALT
<stmt_list> -> <binding> > | <binding> > <stmt_list>
<binding> -> <key> = <move>
<key> -> key <key_id>
<key_id> -> A | B | C | D
<move> -> DRVF | DRVB | TRNL | TRNR | SPNL | SPNR
";

/// Get the grammar listing.
pub fn grammar_text() -> &'static str {
    GRAMMAR_BNF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_has_six_productions() {
        assert_eq!(grammar_text().lines().count(), 6);
    }

    #[test]
    fn test_grammar_start_symbol() {
        assert!(grammar_text().starts_with("<program> -> EXEC <stmt_list> HALT"));
    }

    #[test]
    fn test_grammar_lists_all_terminals() {
        let bnf = grammar_text();
        for word in ["EXEC", "HALT", "key", "A | B | C | D", "DRVF", "SPNR"] {
            assert!(bnf.contains(word), "grammar should mention {}", word);
        }
    }
}
