//! Command-line driver.
//!
//! Compiles a single `.ts` or `.js` file; the mode is picked from the
//! extension. Output is written next to the input with the extension
//! replaced by `.js`. Diagnostics go to stderr and nothing is written when
//! compilation fails.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use tstrip::{CodeGenerator, Diagnostics, Lexer, Parser, SemanticAnalyzer};

const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(input) = args.get(1) else {
        eprintln!("Usage: tstrip <file.ts|file.js>");
        return ExitCode::FAILURE;
    };

    let path = Path::new(input);
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error reading file: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let is_typescript = path.extension().is_some_and(|ext| ext == "ts");
    let mut diagnostics = Diagnostics::new(&source);

    banner("Starting lexical analysis...");
    let tokens = Lexer::new(&source, &mut diagnostics).tokenize();
    if diagnostics.has_errors() {
        return fail(&diagnostics);
    }

    banner("Starting syntax analysis...");
    let program = Parser::new(tokens, &mut diagnostics).parse();
    if diagnostics.has_errors() {
        return fail(&diagnostics);
    }

    banner("Starting semantic analysis...");
    SemanticAnalyzer::new(&mut diagnostics, is_typescript).analyze(&program);
    if diagnostics.has_errors() {
        return fail(&diagnostics);
    }

    banner("Starting code generation...");
    let output = CodeGenerator::new().generate(&program);

    let output_path = path.with_extension("js");
    if let Err(err) = fs::write(&output_path, output) {
        eprintln!("Error writing output file: {}", err);
        return ExitCode::FAILURE;
    }

    println!(
        "{}[tstrip] Compilation successful. Output written to {}{}",
        GREEN,
        output_path.display(),
        RESET
    );
    ExitCode::SUCCESS
}

fn banner(message: &str) {
    println!("{}[tstrip] {}{}", CYAN, message, RESET);
}

fn fail(diagnostics: &Diagnostics) -> ExitCode {
    eprintln!("{}[tstrip] Compilation failed with errors:{}", RED, RESET);
    let mut stderr = io::stderr().lock();
    let _ = diagnostics.render(&mut stderr);
    let _ = stderr.flush();
    ExitCode::FAILURE
}
