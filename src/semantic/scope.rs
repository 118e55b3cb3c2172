//! Scope management

use crate::error::{BlaestError, Result};
use crate::location::SourceLocation;

/// What introduced a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Provided by the runtime support library
    Runtime,
    Function,
    Global,
    Parameter,
    Local,
}

/// Symbol information
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub loc: SourceLocation,
}

/// One frame of names, kept in declaration order
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: Vec<Symbol>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// Stack of scopes for nested contexts.
///
/// The bottom frame is the program-wide scope. Functions and nested blocks
/// push a frame on entry and pop it on exit, which drops their names.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()], // Global scope
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len().saturating_sub(1)
    }

    pub fn push(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pop the innermost scope. The global scope is never popped.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declare a name in the innermost scope.
    /// Redeclaring in the same scope is an error; inner scopes may shadow.
    pub fn declare(&mut self, name: &str, kind: SymbolKind, loc: &SourceLocation) -> Result<()> {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.lookup(name).is_some() {
                return Err(BlaestError::DuplicateDeclaration {
                    name: name.to_string(),
                    loc: loc.clone(),
                });
            }
            scope.symbols.push(Symbol {
                name: name.to_string(),
                kind,
                loc: loc.clone(),
            });
        }
        Ok(())
    }

    /// Innermost symbol with this name
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// The program-wide scope
    pub fn global(&self) -> &Scope {
        &self.scopes[0]
    }
}
