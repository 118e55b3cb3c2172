//! Emitter module - C code generation
//!
//! Output is appended in tree order, so braces and statement terminators
//! mirror the input one to one.

use crate::options::TranspileOptions;
use crate::parser::{Block, Call, Declarator, Definition, Expr, Program, RawPart, Stmt};

/// Emit C code from AST
pub fn emit(program: &Program, options: &TranspileOptions) -> String {
    let mut emitter = CEmitter::new(options);
    emitter.emit_program(program);
    emitter.finish()
}

/// C code emitter
pub struct CEmitter<'a> {
    options: &'a TranspileOptions,
    indent: usize,
    output: String,
}

impl<'a> CEmitter<'a> {
    pub fn new(options: &'a TranspileOptions) -> Self {
        Self {
            options,
            indent: 0,
            output: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    pub fn emit_program(&mut self, program: &Program) {
        let include = format!("#include \"{}\"", self.options.runtime_header);
        self.line(&include);
        for definition in &program.definitions {
            self.output.push('\n');
            self.emit_definition(definition);
        }
    }

    fn emit_definition(&mut self, definition: &Definition) {
        let options = self.options;
        let word = &options.word_type;
        match definition {
            Definition::Function(func) => {
                let params: Vec<_> = func
                    .params
                    .iter()
                    .map(|p| format!("{} {}", word, p.name))
                    .collect();
                let header = format!(
                    "{} {}({}) {{",
                    word,
                    options.mangle(&func.name),
                    params.join(", ")
                );
                self.line(&header);
                self.emit_block_body(&func.body);
            }
            Definition::Global(global) => {
                let text = format!("{} {} = {};", word, global.name, self.emit_expr(&global.value));
                self.line(&text);
            }
        }
    }

    /// Statements of an already opened block, then its closing brace
    fn emit_block_body(&mut self, block: &Block) {
        self.indent += 1;
        for stmt in &block.stmts {
            self.emit_stmt(stmt);
        }
        self.indent -= 1;
        self.line("}");
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Auto(decls) => {
                for decl in decls {
                    let text = self.emit_declarator(decl);
                    self.line(&text);
                }
            }
            Stmt::Return { value, .. } => {
                let text = match value {
                    Some(expr) => format!("return {};", self.emit_expr(expr)),
                    None => "return;".to_string(),
                };
                self.line(&text);
            }
            Stmt::Block(block) => {
                self.line("{");
                self.emit_block_body(block);
            }
            Stmt::Expr(expr) => {
                let text = format!("{};", self.emit_expr(expr));
                self.line(&text);
            }
            Stmt::Empty => self.line(";"),
            Stmt::Comment(text) => self.line(text),
        }
    }

    fn emit_declarator(&self, decl: &Declarator) -> String {
        match &decl.init {
            Some(init) => format!(
                "{} {} = {};",
                self.options.word_type,
                decl.name,
                self.emit_expr(init)
            ),
            None => format!("{} {};", self.options.word_type, decl.name),
        }
    }

    pub fn emit_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Assign { target, value, .. } => {
                format!("{} = {}", target, self.emit_expr(value))
            }
            Expr::Call(call) => self.emit_call(call),
            Expr::Str(text) => self.emit_string(text),
            Expr::Passthrough(parts) => {
                let pieces: Vec<String> = parts.iter().map(|p| self.emit_raw_part(p)).collect();
                join_fragments(&pieces)
            }
        }
    }

    fn emit_call(&self, call: &Call) -> String {
        let args: Vec<_> = call.args.iter().map(|a| self.emit_expr(a)).collect();
        format!("{}({})", self.options.mangle(&call.callee), args.join(", "))
    }

    /// String constant cast to the word type, contents untouched
    fn emit_string(&self, text: &str) -> String {
        format!("({})\"{}\"", self.options.word_type, text)
    }

    fn emit_raw_part(&self, part: &RawPart) -> String {
        match part {
            RawPart::Text(text) | RawPart::Comment(text) => text.clone(),
            RawPart::Name { name, .. } => name.clone(),
            RawPart::Str(text) => self.emit_string(text),
            RawPart::Call(call) => self.emit_call(call),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_operator_char(c: char) -> bool {
    "+-*/%<>=!&|^~?:.".contains(c)
}

/// Concatenate passthrough fragments without whitespace, except where two
/// neighbours would fuse into a different token (`a b`, `- -`, `/ /*`).
pub fn join_fragments(pieces: &[String]) -> String {
    let mut out = String::new();
    for piece in pieces {
        if let (Some(last), Some(first)) = (out.chars().last(), piece.chars().next()) {
            let fuses = (is_word_char(last) && is_word_char(first))
                || (is_operator_char(last) && is_operator_char(first));
            if fuses {
                out.push(' ');
            }
        }
        out.push_str(piece);
    }
    out
}
