//! Blaest - bootstrap transpiler from Blaest to C
//!
//! # Overview
//! Reads a program in the small, single-typed Blaest language and emits C
//! that compiles against the `bglue.c` runtime support file.
//!
//! Pipeline: [`lexer`] → [`parser`] (AST) → [`semantic`] (declaration
//! checking) → [`emitter`] (C text).

pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod location;
pub mod options;
pub mod parser;
pub mod semantic;

pub use error::{BlaestError, Result};
pub use options::TranspileOptions;

use std::path::{Path, PathBuf};

/// Suffix appended to the input path to name the C output
pub const OUTPUT_SUFFIX: &str = ".c";

/// Parse and check Blaest source, returning the AST
pub fn analyze(source: &str, options: &TranspileOptions) -> Result<parser::Program> {
    // 1. Parse Blaest source to AST
    let program = parser::parse(source)?;

    // 2. Every referenced name must be declared first
    semantic::check(&program, options)?;

    Ok(program)
}

/// Analyze Blaest source code and return the AST or diagnostics
pub fn analyze_with_diagnostics(
    source: &str,
    file: Option<&Path>,
    options: &TranspileOptions,
) -> std::result::Result<parser::Program, diagnostics::Diagnostics> {
    analyze(source, options).map_err(|err| diagnostics::from_error(&err, file))
}

/// Transpile Blaest source code to C with the default runtime options
pub fn transpile(source: &str) -> Result<String> {
    transpile_with_options(source, &TranspileOptions::default())
}

/// Transpile Blaest source code to C
pub fn transpile_with_options(source: &str, options: &TranspileOptions) -> Result<String> {
    let program = analyze(source, options)?;

    // 3. Emit C code
    Ok(emitter::emit(&program, options))
}

/// Transpile Blaest source code to C with diagnostics
pub fn transpile_with_diagnostics(
    source: &str,
    file: Option<&Path>,
    options: &TranspileOptions,
) -> std::result::Result<String, diagnostics::Diagnostics> {
    let program = analyze_with_diagnostics(source, file, options)?;
    Ok(emitter::emit(&program, options))
}

/// Output path for an input file: the input path with `.c` appended
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// Transpile a Blaest file to a C file.
/// Nothing is written unless the whole file transpiles.
pub fn transpile_file(input: &Path, output: &Path, options: &TranspileOptions) -> Result<()> {
    let source = std::fs::read_to_string(input)?;
    log::debug!("source length: {} bytes", source.len());
    let c_code = transpile_with_options(&source, options)?;
    log::debug!("generated C code:\n{c_code}");
    std::fs::write(output, c_code)?;
    Ok(())
}
