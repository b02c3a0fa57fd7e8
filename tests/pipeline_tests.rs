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

//! End-to-end tests for the full compile pipeline.

use keybot::{format_error, KeyId, Move, TokenKind};
use pretty_assertions::assert_eq;

#[test]
fn test_token_stream_with_offsets() {
    let result = keybot::compile("EXEC key A = DRVF > HALT").unwrap();
    let offsets: Vec<usize> = result.tokens.iter().map(|t| t.offset).collect();
    assert_eq!(offsets, vec![0, 5, 9, 11, 13, 18, 20, 24]);
    assert_eq!(result.tokens.len(), 8);
    assert_eq!(result.tokens[0].kind, TokenKind::Exec);
    assert!(result.tokens[7].is_end());
}

#[test]
fn test_derivation_step_count_grows_by_four_per_binding() {
    let sources = [
        ("EXEC key A = DRVF > HALT", 1),
        ("EXEC key A = DRVF > key B = DRVB > HALT", 2),
        ("EXEC key A = DRVF > key B = DRVB > key C = TRNL > HALT", 3),
        (
            "EXEC key A = DRVF > key B = DRVB > key C = TRNL > key D = SPNR > HALT",
            4,
        ),
    ];
    for (source, bindings) in sources {
        let result = keybot::compile(source).unwrap();
        assert_eq!(result.derivation.len(), 2 + 4 * bindings);
    }
}

#[test]
fn test_derivation_starts_and_ends_correctly() {
    let source = "EXEC key B = TRNR > HALT";
    let result = keybot::compile(source).unwrap();
    let first = &result.derivation[0];
    let last = result.derivation.last().unwrap();
    assert_eq!(first.sentential_form, "<program>");
    assert_eq!(last.sentential_form, source);
}

#[test]
fn test_full_derivation_two_bindings() {
    let result = keybot::compile("EXEC key A = DRVF > key B = SPNL > HALT").unwrap();
    let forms: Vec<&str> = result
        .derivation
        .iter()
        .map(|s| s.sentential_form.as_str())
        .collect();
    assert_eq!(
        forms,
        vec![
            "<program>",
            "EXEC <stmt_list> HALT",
            "EXEC <binding> > <stmt_list> HALT",
            "EXEC <key> = <move> > <stmt_list> HALT",
            "EXEC key A = <move> > <stmt_list> HALT",
            "EXEC key A = DRVF > <stmt_list> HALT",
            "EXEC key A = DRVF > <binding> > HALT",
            "EXEC key A = DRVF > <key> = <move> > HALT",
            "EXEC key A = DRVF > key B = <move> > HALT",
            "EXEC key A = DRVF > key B = SPNL > HALT",
        ]
    );
}

#[test]
fn test_rebinding_keeps_one_dispatch_line() {
    let result = keybot::compile("EXEC key A = DRVF > key A = SPNR > HALT").unwrap();
    assert_eq!(result.bindings.len(), 1);
    assert_eq!(result.bindings.get(KeyId::A), Some(Move::SpinRight));
    assert_eq!(result.pbasic.matches("IF KEY = \"A\"").count(), 1);
    assert!(result.pbasic.contains("GOSUB SpinRight"));
    assert!(!result.pbasic.contains("Forward:"));
}

#[test]
fn test_all_keys_all_distinct_moves() {
    let result = keybot::compile(
        "EXEC key A = DRVF > key B = DRVB > key C = TRNL > key D = TRNR > HALT",
    )
    .unwrap();
    assert_eq!(result.bindings.len(), 4);
    for routine in ["Forward:", "Backward:", "TurnLeft:", "TurnRight:"] {
        assert_eq!(result.pbasic.matches(routine).count(), 1);
    }
    // unbound movements get no subroutine
    assert!(!result.pbasic.contains("SpinLeft:"));
    assert!(!result.pbasic.contains("SpinRight:"));
}

#[test]
fn test_whitespace_variations_compile_identically() {
    let canonical = keybot::compile("EXEC key A = DRVF > HALT").unwrap();
    let padded = keybot::compile("EXEC\tkey  A =\nDRVF  >  HALT").unwrap();
    assert_eq!(canonical.pbasic, padded.pbasic);
    assert_eq!(canonical.bindings.len(), padded.bindings.len());
    // sentential forms are space-normalized, so the traces agree too
    let canonical_forms: Vec<_> = canonical
        .derivation
        .iter()
        .map(|s| &s.sentential_form)
        .collect();
    let padded_forms: Vec<_> = padded
        .derivation
        .iter()
        .map(|s| &s.sentential_form)
        .collect();
    assert_eq!(canonical_forms, padded_forms);
}

#[test]
fn test_generated_program_shape() {
    let result = keybot::compile("EXEC key C = SPNL > HALT").unwrap();
    let lines: Vec<&str> = result.pbasic.lines().collect();
    assert_eq!(lines[0], "'{$STAMP BS2p}");
    assert_eq!(lines[1], "'{$PBASIC 2.5}");
    assert!(lines.last().unwrap().starts_with("'++++"));
    let dispatch = lines
        .iter()
        .find(|l| l.contains("IF KEY"))
        .expect("dispatch line present");
    assert_eq!(
        dispatch.trim_start(),
        "IF KEY = \"C\" OR KEY = \"c\" THEN GOSUB SpinLeft"
    );
}

#[test]
fn test_tree_renders_every_production_level() {
    let result = keybot::compile("EXEC key A = DRVF > key B = DRVB > HALT").unwrap();
    let tree = result.tree_text();
    assert_eq!(tree.matches("<stmt_list>").count(), 2);
    assert_eq!(tree.matches("<binding>").count(), 2);
    assert_eq!(tree.matches("<key_id>").count(), 2);
    for line in tree.lines() {
        assert_eq!(line, line.trim_end(), "no trailing whitespace");
    }
}

#[test]
fn test_format_error_points_at_lexeme() {
    let source = "EXEC key E = DRVF > HALT";
    let err = keybot::compile(source).unwrap_err();
    let formatted = format_error(&err, source, Some("demo.kbs"));
    assert_eq!(
        formatted,
        "error: [Key ID Error] Invalid key id. Valid key ids are {A, B, C, D} ['E' @ index 9]\n\
         \x20 --> demo.kbs:1:10\n\
         \x20 |\n\
         1 | EXEC key E = DRVF > HALT\n\
         \x20 |          ^\n"
    );
}

#[test]
fn test_format_error_includes_hint() {
    let source = "EXEC key A = DRVF key B = DRVB > HALT";
    let err = keybot::compile(source).unwrap_err();
    let formatted = format_error(&err, source, None);
    assert!(formatted.starts_with("error: [Assignment Error] Multiple '=' found"));
    assert!(formatted.contains("--> <input>:1:6"));
    assert!(formatted.ends_with("  = hint: insert '>' before index 18\n"));
}

#[test]
fn test_format_error_without_span_is_single_line() {
    let source = "EXEC HALT";
    let err = keybot::compile(source).unwrap_err();
    let formatted = format_error(&err, source, None);
    assert_eq!(
        formatted,
        "error: [Program Error] The program input contains no statements between EXEC and HALT\n"
    );
}
