//! Diagnostics - rendering of the error that halted a run

use crate::error::BlaestError;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticSpan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub span: DiagnosticSpan,
    pub phase: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Diagnostics {
    pub diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            let file = diag.span.file.as_deref().unwrap_or("<input>");
            out.push_str(&format!(
                "[{}] {}:{}:{} {}\n",
                diag.code, file, diag.span.line, diag.span.column, diag.message
            ));
        }
        out
    }
}

pub fn span_for_line(file: Option<&Path>, line: usize, column: usize, len: usize) -> DiagnosticSpan {
    let end_col = if len == 0 {
        column
    } else {
        column + len.saturating_sub(1)
    };
    DiagnosticSpan {
        file: file.map(|p| p.display().to_string()),
        line,
        column,
        end_line: line,
        end_column: end_col,
    }
}

pub fn error_diag(code: &str, message: String, span: DiagnosticSpan, phase: &str) -> Diagnostic {
    Diagnostic {
        code: code.to_string(),
        message,
        severity: DiagnosticSeverity::Error,
        span,
        phase: phase.to_string(),
    }
}

/// Stable diagnostic code for an error kind
pub fn error_code(err: &BlaestError) -> &'static str {
    match err {
        BlaestError::UnterminatedString { .. } => "BLS-UNTERMINATED-STRING",
        BlaestError::UnterminatedCharacter { .. } => "BLS-UNTERMINATED-CHARACTER",
        BlaestError::UnterminatedComment { .. } => "BLS-UNTERMINATED-COMMENT",
        BlaestError::UnterminatedCall { .. } => "BLS-UNTERMINATED-CALL",
        BlaestError::UndeclaredVariable { .. } => "BLS-UNDECLARED-VARIABLE",
        BlaestError::TruncatedInput { .. } => "BLS-TRUNCATED-INPUT",
        BlaestError::UnexpectedToken { .. } => "BLS-UNEXPECTED-TOKEN",
        BlaestError::InvalidAssignTarget { .. } => "BLS-INVALID-ASSIGN-TARGET",
        BlaestError::DuplicateDeclaration { .. } => "BLS-DUPLICATE-DECLARATION",
        BlaestError::MalformedUsage(_) => "BLS-USAGE",
        BlaestError::IoError(_) => "BLS-IO-ERROR",
    }
}

/// The single diagnostic for the error that halted a run
pub fn from_error(err: &BlaestError, file: Option<&Path>) -> Diagnostics {
    let (message, len, phase) = match err {
        BlaestError::UnterminatedString { .. } => ("unclosed string".to_string(), 1, "lex"),
        BlaestError::UnterminatedCharacter { .. } => {
            ("unclosed character constant".to_string(), 1, "lex")
        }
        BlaestError::UnterminatedComment { .. } => ("unclosed comment".to_string(), 2, "lex"),
        BlaestError::UnterminatedCall { callee, .. } => (
            format!("unclosed call to '{callee}'"),
            callee.len(),
            "parse",
        ),
        BlaestError::UndeclaredVariable { name, .. } => (
            format!("variable '{name}' does not exist"),
            name.len(),
            "semantic",
        ),
        BlaestError::TruncatedInput { construct, .. } => (
            format!("encountered end of input while parsing {construct}"),
            0,
            "parse",
        ),
        BlaestError::UnexpectedToken {
            found, expected, ..
        } => (format!("expected {expected}, found {found}"), 1, "parse"),
        BlaestError::InvalidAssignTarget { target, .. } => {
            (format!("cannot assign to '{target}'"), 1, "parse")
        }
        BlaestError::DuplicateDeclaration { name, .. } => (
            format!("'{name}' is already declared in this scope"),
            name.len(),
            "semantic",
        ),
        BlaestError::MalformedUsage(_) => (format!("{err}"), 0, "cli"),
        BlaestError::IoError(_) => (format!("{err}"), 0, "io"),
    };
    let (line, column) = err
        .location()
        .filter(|loc| loc.is_known())
        .map(|loc| (loc.line, loc.column))
        .unwrap_or((1, 1));
    let span = span_for_line(file, line, column, len);
    Diagnostics {
        diagnostics: vec![error_diag(error_code(err), message, span, phase)],
    }
}
