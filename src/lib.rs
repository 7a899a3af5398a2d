//! A TypeScript/JavaScript compiler that erases types and emits plain
//! JavaScript.
//!
//! Four stages run strictly in order (lexing, parsing, semantic analysis,
//! code generation), sharing one diagnostic sink. A stage that reports any
//! error stops the pipeline; later stages never see a broken input.
//!
//! # Example
//!
//! ```
//! let output = tstrip::compile("let x: number = 42;", true).unwrap();
//! assert!(output.contains("let x = 42;"));
//! ```

pub mod ast;
pub mod codegen;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod semantic;

pub use codegen::CodeGenerator;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use lexer::Lexer;
pub use parser::Parser;
pub use semantic::SemanticAnalyzer;

/// Compile source text to JavaScript.
///
/// `is_typescript` selects TypeScript mode: missing annotations become
/// diagnostics and `undefined` loses its blanket assignability. On failure
/// the collected diagnostics are returned and no output is produced.
pub fn compile(source: &str, is_typescript: bool) -> Result<String, Diagnostics> {
    let mut diagnostics = Diagnostics::new(source);

    let tokens = Lexer::new(source, &mut diagnostics).tokenize();
    if diagnostics.has_errors() {
        return Err(diagnostics);
    }

    let program = Parser::new(tokens, &mut diagnostics).parse();
    if diagnostics.has_errors() {
        return Err(diagnostics);
    }

    SemanticAnalyzer::new(&mut diagnostics, is_typescript).analyze(&program);
    if diagnostics.has_errors() {
        return Err(diagnostics);
    }

    Ok(CodeGenerator::new().generate(&program))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_ts(source: &str) -> Result<String, Diagnostics> {
        compile(source, true)
    }

    #[test]
    fn test_simple_declaration_round_trip() {
        let output = compile_ts("let x: number = 42;").unwrap();
        assert!(output.contains("let x = 42;"));
    }

    #[test]
    fn test_type_mismatch_fails_compilation() {
        let diagnostics = compile_ts("let x: number = \"hello\";").unwrap_err();
        assert_eq!(diagnostics.errors().len(), 1);
        let error = &diagnostics.errors()[0];
        assert_eq!(
            error.message,
            "Type 'string' is not assignable to type 'number'"
        );
        assert_eq!((error.line, error.column), (1, 17));
    }

    #[test]
    fn test_class_compilation() {
        let output = compile_ts(
            "class C { private n: number; constructor(n: number) { this.n = n; } \
             greet(): string { return \"hi\"; } }",
        )
        .unwrap();
        assert!(output.contains("constructor(n) {"));
        assert!(output.contains("this.n = n;"));
        assert!(output.contains("greet() {"));
        assert!(output.contains("return \"hi\";"));
        assert!(!output.contains("private"));
        assert!(!output.contains("number"));
        assert!(!output.contains("string"));
    }

    #[test]
    fn test_arity_mismatch_fails_compilation() {
        let diagnostics = compile_ts(
            "function add(a: number, b: number): number { return a + b; } add(1);",
        )
        .unwrap_err();
        assert_eq!(diagnostics.errors().len(), 1);
        assert_eq!(
            diagnostics.errors()[0].message,
            "Expected 2 arguments, but got 1"
        );
    }

    #[test]
    fn test_interface_and_implementation() {
        let output = compile_ts(
            "interface Shape { area(): number; } \
             class Circle implements Shape { area(): number { return 3.14; } }",
        )
        .unwrap();
        assert!(output.contains("// Interface Shape (not emitted in JavaScript)"));
        assert!(output.contains("class Circle {"));
        assert!(output.contains("area() {"));
        assert!(output.contains("return 3.14;"));
    }

    #[test]
    fn test_for_loop_emission() {
        let output = compile_ts("for (let i = 0; i < 5; i++) { console.log(i); }").unwrap();
        assert!(output.contains("for (let i = 0; (i < 5); i++) {"));
        assert!(output.contains("console.log(i);"));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(compile_ts("").unwrap(), "");
    }

    #[test]
    fn test_unterminated_string_fails_in_lexer() {
        let diagnostics = compile_ts("let s = \"abc").unwrap_err();
        assert_eq!(diagnostics.errors().len(), 1);
        let error = &diagnostics.errors()[0];
        assert_eq!(error.message, "Unterminated string literal");
        assert_eq!((error.line, error.column), (1, 9));
    }

    #[test]
    fn test_uninitialized_variable_mode_difference() {
        assert!(compile("let x;", true).is_err());
        assert!(compile("let x;", false).is_ok());
    }

    #[test]
    fn test_pipeline_stops_after_parse_errors() {
        // The undefined name `y` would be a semantic error, but the parser
        // already failed, so only the syntax error is reported.
        let diagnostics = compile_ts("let x = ;\ny;").unwrap_err();
        assert_eq!(diagnostics.errors().len(), 1);
        assert!(diagnostics.errors()[0].message.contains("Expected expression"));
    }

    #[test]
    fn test_emitted_output_is_free_of_type_syntax() {
        let output = compile_ts(
            "interface Point { x: number; y: number; } \
             function len(p: Point): number { return p.x * p.x + p.y * p.y; } \
             let origin: Point = { x: 0, y: 0 };",
        )
        .unwrap();
        assert!(!output.contains(": number"));
        assert!(!output.contains(": Point"));
        assert!(!output.contains("interface Point {"));
    }

    #[test]
    fn test_diagnostics_render_format() {
        let diagnostics = compile_ts("let x: number = \"hello\";").unwrap_err();
        let mut out = Vec::new();
        diagnostics.render(&mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(
            rendered,
            "Error at line 1, column 17: Type 'string' is not assignable to type 'number'\n\
             let x: number = \"hello\";\n\
             \u{20}               ^\n"
        );
    }

    #[test]
    fn test_module_round_trip() {
        let output = compile_ts(
            "import { max } from \"math\";\nexport default max;\nlet x: number = 1;",
        )
        .unwrap();
        assert!(output.contains("// Import statement: max from 'math'"));
        assert!(output.contains("// Export statement"));
        assert!(output.contains("let x = 1;"));
    }
}
