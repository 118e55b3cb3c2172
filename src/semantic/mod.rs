//! Semantic analysis - declaration-before-use checking
//!
//! Walks the AST in source order with a [`ScopeStack`]. A name is usable
//! once it has been declared as a runtime function, function, global,
//! parameter or `auto` variable in the current scope or an enclosing one.

pub mod scope;

pub use scope::{Scope, ScopeStack, Symbol, SymbolKind};

use crate::error::{BlaestError, Result};
use crate::location::SourceLocation;
use crate::options::TranspileOptions;
use crate::parser::{Block, Call, Definition, Expr, Param, Program, RawPart, Stmt};
use log::debug;

/// Check every name reference in `program`, stopping at the first failure
pub fn check(program: &Program, options: &TranspileOptions) -> Result<()> {
    let mut checker = Checker::new(options)?;
    for definition in &program.definitions {
        checker.check_definition(definition)?;
    }
    debug!(
        "semantic check passed: {} global name(s)",
        checker.scopes.global().symbols().len()
    );
    Ok(())
}

struct Checker {
    scopes: ScopeStack,
}

impl Checker {
    fn new(options: &TranspileOptions) -> Result<Self> {
        let mut scopes = ScopeStack::new();
        for name in &options.runtime_functions {
            scopes.declare(name, SymbolKind::Runtime, &SourceLocation::unknown())?;
        }
        Ok(Self { scopes })
    }

    fn check_definition(&mut self, definition: &Definition) -> Result<()> {
        match definition {
            Definition::Function(func) => {
                // Declared before the body so functions can recurse
                self.scopes
                    .declare(&func.name, SymbolKind::Function, &func.loc)?;
                self.scopes.push();
                let result = self.check_function_body(&func.params, &func.body);
                self.scopes.pop();
                result
            }
            Definition::Global(global) => {
                self.scopes
                    .declare(&global.name, SymbolKind::Global, &global.loc)?;
                self.check_expr(&global.value)
            }
        }
    }

    /// Parameters and the body's top-level statements share one scope
    fn check_function_body(&mut self, params: &[Param], body: &Block) -> Result<()> {
        for param in params {
            self.scopes
                .declare(&param.name, SymbolKind::Parameter, &param.loc)?;
        }
        self.check_stmts(&body.stmts)
    }

    fn check_stmts(&mut self, stmts: &[Stmt]) -> Result<()> {
        stmts.iter().try_for_each(|stmt| self.check_stmt(stmt))
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Auto(decls) => {
                for decl in decls {
                    self.scopes.declare(&decl.name, SymbolKind::Local, &decl.loc)?;
                    if let Some(init) = &decl.init {
                        self.check_expr(init)?;
                    }
                }
                Ok(())
            }
            Stmt::Return { value, .. } => match value {
                Some(expr) => self.check_expr(expr),
                None => Ok(()),
            },
            Stmt::Block(block) => {
                self.scopes.push();
                let result = self.check_stmts(&block.stmts);
                self.scopes.pop();
                result
            }
            Stmt::Expr(expr) => self.check_expr(expr),
            Stmt::Empty | Stmt::Comment(_) => Ok(()),
        }
    }

    fn check_expr(&self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Assign { target, value, loc } => {
                self.require(target, loc)?;
                self.check_expr(value)
            }
            Expr::Call(call) => self.check_call(call),
            Expr::Str(_) => Ok(()),
            Expr::Passthrough(parts) => parts.iter().try_for_each(|part| match part {
                RawPart::Name { name, loc } => self.require(name, loc),
                RawPart::Call(call) => self.check_call(call),
                RawPart::Text(_) | RawPart::Str(_) | RawPart::Comment(_) => Ok(()),
            }),
        }
    }

    fn check_call(&self, call: &Call) -> Result<()> {
        self.require(&call.callee, &call.loc)?;
        call.args.iter().try_for_each(|arg| self.check_expr(arg))
    }

    fn require(&self, name: &str, loc: &SourceLocation) -> Result<()> {
        if self.scopes.is_declared(name) {
            Ok(())
        } else {
            Err(BlaestError::UndeclaredVariable {
                name: name.to_string(),
                loc: loc.clone(),
            })
        }
    }
}
