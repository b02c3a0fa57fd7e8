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

//! PBASIC code generation for the BASIC Stamp 2p.
//!
//! Emits a fixed program skeleton with one keypress dispatch line per
//! binding and one movement subroutine per distinct movement, both in
//! first-seen order. The output depends only on the binding table, so
//! recompiling the same program yields identical text.

mod templates;

pub use templates::routine_name;

use crate::bindings::BindingTable;
use crate::lexer::{KeyId, Move};
use templates::{routine_line, FOOTER_END, FOOTER_LOOP, HEADER};

/// One keypress test inside the main loop. Keys match case-insensitively
/// on the wire, so each line tests both cases.
fn dispatch_line(key: KeyId, movement: Move) -> String {
    format!(
        "          IF KEY = \"{}\" OR KEY = \"{}\" THEN GOSUB {}\n",
        key.as_str(),
        key.as_lower_str(),
        routine_name(movement)
    )
}

/// Generate the complete PBASIC program for a binding table.
pub fn generate(bindings: &BindingTable) -> String {
    let mut output = String::from(HEADER);

    for &(key, movement) in bindings.iter() {
        output.push_str(&dispatch_line(key, movement));
    }

    output.push_str(FOOTER_LOOP);

    for movement in bindings.distinct_moves() {
        output.push_str(routine_line(movement));
    }

    output.push_str(FOOTER_END);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(KeyId, Move)]) -> BindingTable {
        let mut bindings = BindingTable::new();
        for &(key, movement) in entries {
            bindings.bind(key, movement);
        }
        bindings
    }

    #[test]
    fn test_single_binding_program() {
        let output = generate(&table(&[(KeyId::A, Move::DriveForward)]));
        let expected = "\
'{$STAMP BS2p}
'{$PBASIC 2.5}
KEY     VAR     Byte
Main:     DO
         SERIN 3,2063,250,Timeout,[KEY]
          IF KEY = \"A\" OR KEY = \"a\" THEN GOSUB Forward
   LOOP
Timeout:  GOSUB Motor_OFF
    GOTO Main
'+++++ Movement Procedure ++++++++++++++++++++++++++++++
Forward:   HIGH  13 : LOW 12 : HIGH 15 : LOW 14 : RETURN
Motor_OFF: LOW   13 : LOW 12 : LOW  15 : LOW 14 : RETURN
'+++++++++++++++++++++++++++++++++++++++++++++++++++++++
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_dispatch_lines_follow_binding_order() {
        let output = generate(&table(&[
            (KeyId::C, Move::SpinLeft),
            (KeyId::A, Move::DriveForward),
        ]));
        let c_line = output.find("IF KEY = \"C\"").unwrap();
        let a_line = output.find("IF KEY = \"A\"").unwrap();
        assert!(c_line < a_line);
    }

    #[test]
    fn test_shared_routine_emitted_once() {
        let output = generate(&table(&[
            (KeyId::A, Move::DriveForward),
            (KeyId::B, Move::DriveForward),
        ]));
        assert_eq!(output.matches("Forward:").count(), 1);
        assert_eq!(output.matches("GOSUB Forward").count(), 2);
    }

    #[test]
    fn test_empty_table_keeps_skeleton() {
        let output = generate(&BindingTable::new());
        assert!(output.contains("Main:     DO"));
        assert!(output.contains("Motor_OFF:"));
        assert!(!output.contains("IF KEY"));
    }

    #[test]
    fn test_deterministic_output() {
        let bindings = table(&[
            (KeyId::A, Move::TurnLeft),
            (KeyId::D, Move::SpinRight),
        ]);
        assert_eq!(generate(&bindings), generate(&bindings));
    }

    #[test]
    fn test_dispatch_tests_both_cases() {
        let output = generate(&table(&[(KeyId::B, Move::TurnRight)]));
        assert!(output.contains("IF KEY = \"B\" OR KEY = \"b\" THEN GOSUB TurnRight"));
    }
}
