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

//! PBASIC text fragments for the BASIC Stamp 2p target.
//!
//! Everything here is byte-exact: the column alignment inside the
//! fragments is part of the emitted program text and must not be
//! reformatted.

use crate::lexer::Move;

/// Compiler directives, the keypress variable and the top of the main
/// receive loop. `SERIN 3,2063,250,...` reads one byte from pin 3 at
/// 2400 baud with a 250 ms timeout.
pub const HEADER: &str = "\
'{$STAMP BS2p}
'{$PBASIC 2.5}
KEY     VAR     Byte
Main:     DO
         SERIN 3,2063,250,Timeout,[KEY]
";

/// Bottom of the main loop: on timeout all motors stop, then control
/// returns to the receive loop.
pub const FOOTER_LOOP: &str = "   LOOP
Timeout:  GOSUB Motor_OFF
    GOTO Main
'+++++ Movement Procedure ++++++++++++++++++++++++++++++
";

/// The always-present all-stop subroutine and the closing banner.
pub const FOOTER_END: &str = "\
Motor_OFF: LOW   13 : LOW 12 : LOW  15 : LOW 14 : RETURN
'+++++++++++++++++++++++++++++++++++++++++++++++++++++++
";

/// PBASIC subroutine name for a movement.
pub fn routine_name(movement: Move) -> &'static str {
    match movement {
        Move::DriveForward => "Forward",
        Move::DriveBackward => "Backward",
        Move::TurnLeft => "TurnLeft",
        Move::TurnRight => "TurnRight",
        Move::SpinLeft => "SpinLeft",
        Move::SpinRight => "SpinRight",
    }
}

/// Complete subroutine line for a movement. Pins 12/13 drive the left
/// wheel, 14/15 the right; HIGH/LOW pairs set direction per wheel.
pub fn routine_line(movement: Move) -> &'static str {
    match movement {
        Move::DriveForward => "Forward:   HIGH  13 : LOW 12 : HIGH 15 : LOW 14 : RETURN\n",
        Move::DriveBackward => "Backward:  HIGH  12 : LOW 13 : HIGH 14 : LOW 15 : RETURN\n",
        Move::TurnLeft => "TurnLeft:  HIGH  13 : LOW 12 : LOW  15 : LOW 14 : RETURN\n",
        Move::TurnRight => "TurnRight: LOW   13 : LOW 12 : HIGH 15 : LOW 14 : RETURN\n",
        Move::SpinLeft => "SpinLeft:  HIGH  13 : LOW 12 : HIGH 14 : LOW 15 : RETURN\n",
        Move::SpinRight => "SpinRight: HIGH  12 : LOW 13 : HIGH 15 : LOW 14 : RETURN\n",
    }
}
