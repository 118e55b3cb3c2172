//! AST definitions

use crate::location::SourceLocation;
use serde::Serialize;

/// A whole Blaest program, definitions in source order
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Program {
    pub definitions: Vec<Definition>,
}

/// Top-level constructs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Definition {
    /// `name(params) { body }`
    Function(FunctionDef),
    /// `name = value;`
    Global(GlobalDef),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalDef {
    pub name: String,
    pub value: Expr,
    pub loc: SourceLocation,
}

/// Brace-delimited statement sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub loc: SourceLocation,
}

/// One name introduced by an `auto` statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declarator {
    pub name: String,
    pub init: Option<Expr>,
    pub loc: SourceLocation,
}

/// Statement types
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// `auto a, b = value;`
    Auto(Vec<Declarator>),
    /// `return value;` or `return;`
    Return {
        value: Option<Expr>,
        loc: SourceLocation,
    },
    /// Nested `{ ... }`
    Block(Block),
    /// Expression followed by `;`
    Expr(Expr),
    /// A lone `;`
    Empty,
    /// Comment between statements, emitted on its own line
    Comment(String),
}

/// Function call `name(args...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub callee: String,
    pub args: Vec<Expr>,
    pub loc: SourceLocation,
}

/// Expression types
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// `target = value`, right-associative
    Assign {
        target: String,
        value: Box<Expr>,
        loc: SourceLocation,
    },
    Call(Call),
    /// String literal, contents verbatim
    Str(String),
    /// Text handed to the C compiler as written
    Passthrough(Vec<RawPart>),
}

/// Pieces of a passthrough expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RawPart {
    /// Numbers, operators and brackets
    Text(String),
    /// Identifier reference; must be declared
    Name { name: String, loc: SourceLocation },
    Str(String),
    Call(Call),
    /// Comment text, emitted as written and never checked
    Comment(String),
}

impl Program {
    /// Names of all top-level definitions, in order
    pub fn top_level_names(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .map(|d| match d {
                Definition::Function(f) => f.name.as_str(),
                Definition::Global(g) => g.name.as_str(),
            })
            .collect()
    }
}
