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

//! Keybot Compiler CLI
//!
//! Compiles key-binding scripts into PBASIC programs for the
//! BASIC Stamp 2p.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use keybot::error::format_error;

/// Keybot - A key-binding script compiler for the BASIC Stamp 2p
#[derive(Parser, Debug)]
#[command(name = "keybot")]
#[command(author = "Keybot contributors")]
#[command(version)]
#[command(about = "Compiles key-binding scripts into PBASIC programs")]
#[command(long_about = r#"
Keybot compiles scripts that bind remote-control keys (A-D) to robot
movements into PBASIC programs for Boe-Bot style robots driven by a
BASIC Stamp 2p.

A script looks like:
  EXEC key A = DRVF > key B = SPNL > HALT

Example usage:
  keybot drive.kbs -o drive.bsp
  keybot drive.kbs --derivation --tree
  keybot --grammar
"#)]
struct Cli {
    /// Source file to compile (.kbs)
    source_file: Option<PathBuf>,

    /// Output file for the generated PBASIC program
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the language grammar
    #[arg(long)]
    grammar: bool,

    /// Print the leftmost derivation of the program
    #[arg(long)]
    derivation: bool,

    /// Print the parse tree
    #[arg(long)]
    tree: bool,

    /// Print the generated PBASIC program to stdout
    #[arg(long)]
    code: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.grammar {
        print!("{}", keybot::grammar_text());
        if cli.source_file.is_none() {
            return ExitCode::SUCCESS;
        }
        println!();
    }

    let source_path = match &cli.source_file {
        Some(path) => path,
        None => {
            eprintln!("Error: A source file is required. Use keybot <file.kbs>");
            eprintln!("       Or use --grammar to print the language grammar.");
            return ExitCode::from(2);
        }
    };

    if cli.verbose {
        println!("Keybot Compiler v{}", keybot::VERSION);
        println!("Source: {}", source_path.display());
        println!();
    }

    let source = match std::fs::read_to_string(source_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", source_path.display(), e);
            return ExitCode::from(3);
        }
    };

    let filename = source_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<input>");

    if cli.verbose {
        println!("Compiling...");
    }

    let result = match keybot::compile(source.trim_end()) {
        Ok(result) => result,
        Err(e) => {
            eprint!("{}", format_error(&e, &source, Some(filename)));
            return ExitCode::from(1);
        }
    };

    if cli.verbose {
        println!(
            "Parsed {} token(s), {} binding(s), {} derivation step(s)",
            result.tokens.len(),
            result.bindings.len(),
            result.derivation.len()
        );
    }

    if cli.derivation {
        println!("{}", result.derivation_text());
        println!();
    }

    if cli.tree {
        println!("{}", result.tree_text());
        println!();
    }

    if let Some(output_path) = &cli.output {
        if let Err(e) = std::fs::write(output_path, &result.pbasic) {
            eprintln!("Error: Cannot write {}: {}", output_path.display(), e);
            return ExitCode::from(3);
        }
        println!("Compiled {} -> {}", filename, output_path.display());

        if cli.code {
            print!("{}", result.pbasic);
        }
    } else if cli.code || (!cli.derivation && !cli.tree && !cli.grammar) {
        // No output file and nothing else requested: the program
        // text goes to stdout.
        print!("{}", result.pbasic);
    }

    ExitCode::SUCCESS
}
