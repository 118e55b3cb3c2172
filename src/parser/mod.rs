//! Parser module - recursive-descent Blaest parser
//!
//! Pulls tokens lazily from the [`Lexer`] and builds a [`Program`]. Statement
//! and expression bodies are first collected into token slices up to their
//! terminator, then classified by [`Parser::parse_value`].

mod ast;
pub mod utils;

pub use ast::*;

use crate::error::{BlaestError, Result};
use crate::lexer::{Delimiter, Keyword, Lexer, Spanned, Token};
use crate::location::SourceLocation;
use log::{debug, trace, warn};
use utils::{find_matching_paren, find_top_level, render_tokens, split_top_level};

/// Parse Blaest source code into AST
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(source).parse_program()
}

/// Recursive-descent parser over a token stream
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    fn advance(&mut self) -> Result<Option<Spanned>> {
        self.lexer.next().transpose()
    }

    /// Next token, where end of input means `construct` was cut short
    fn expect_more(&mut self, construct: &'static str) -> Result<Spanned> {
        self.advance()?.ok_or_else(|| BlaestError::TruncatedInput {
            construct,
            loc: self.lexer.location(),
        })
    }

    /// Next token that is not a comment
    fn advance_code(&mut self) -> Result<Option<Spanned>> {
        loop {
            match self.advance()? {
                Some(tok) if tok.token.is_comment() => trace!("skipping {}", tok.token.text()),
                other => return Ok(other),
            }
        }
    }

    /// Like [`Parser::expect_more`], skipping comments
    fn expect_code(&mut self, construct: &'static str) -> Result<Spanned> {
        self.advance_code()?.ok_or_else(|| BlaestError::TruncatedInput {
            construct,
            loc: self.lexer.location(),
        })
    }

    /// Parse top-level definitions until end of input
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut definitions = Vec::new();

        while let Some(first) = self.advance_code()? {
            let name = match first.token {
                Token::Ident(name) => name,
                other => {
                    return Err(BlaestError::UnexpectedToken {
                        found: format!("'{}'", other.text()),
                        expected: "a function or global variable name",
                        loc: first.loc,
                    })
                }
            };

            let next = self.expect_code("global definition")?;
            let definition = match next.token {
                Token::Delimiter(Delimiter::LParen) => {
                    Definition::Function(self.parse_function(name, first.loc)?)
                }
                Token::Assign => Definition::Global(self.parse_global(name, first.loc)?),
                other => {
                    return Err(BlaestError::UnexpectedToken {
                        found: format!("'{}'", other.text()),
                        expected: "'(' or '='",
                        loc: next.loc,
                    })
                }
            };
            definitions.push(definition);
        }

        Ok(Program { definitions })
    }

    /// `name(params) { body }`, called after the opening parenthesis
    fn parse_function(&mut self, name: String, loc: SourceLocation) -> Result<FunctionDef> {
        let (param_tokens, close_loc) = self.collect_parenthesized("parameter list")?;
        let params = parse_params(&param_tokens, &close_loc)?;

        let mut skipped = Vec::new();
        let open = loop {
            let tok = self.expect_code("function body")?;
            if tok.token.is_delimiter(Delimiter::LBrace) {
                break tok;
            }
            skipped.push(tok);
        };
        if !skipped.is_empty() {
            warn!(
                "ignoring '{}' between the header and body of '{}'",
                render_tokens(&skipped),
                name
            );
        }

        let body = self.parse_block(open.loc)?;
        debug!(
            "parsed function '{}' ({} parameter(s), {} statement(s))",
            name,
            params.len(),
            body.stmts.len()
        );

        Ok(FunctionDef {
            name,
            params,
            body,
            loc,
        })
    }

    /// `name = value;`, called after the `=`
    fn parse_global(&mut self, name: String, loc: SourceLocation) -> Result<GlobalDef> {
        let (tokens, end) = self.collect_statement("global variable value")?;
        let value = parse_value(&tokens, &end)?;
        debug!("parsed global '{name}'");
        Ok(GlobalDef { name, value, loc })
    }

    /// Statements up to the matching `}`, called after the `{`
    fn parse_block(&mut self, loc: SourceLocation) -> Result<Block> {
        let mut stmts = Vec::new();

        loop {
            let tok = self.expect_more("block")?;
            let stmt = match tok.token {
                Token::Delimiter(Delimiter::RBrace) => break,
                Token::Delimiter(Delimiter::LBrace) => Stmt::Block(self.parse_block(tok.loc)?),
                Token::Delimiter(Delimiter::Semicolon) => Stmt::Empty,
                Token::Comment(text) => Stmt::Comment(text),
                Token::Keyword(Keyword::Auto) => Stmt::Auto(self.parse_auto()?),
                Token::Keyword(Keyword::Return) => {
                    let (tokens, end) = self.collect_statement("return statement")?;
                    let value = if tokens.iter().all(|t| t.token.is_comment()) {
                        None
                    } else {
                        Some(parse_value(&tokens, &end)?)
                    };
                    Stmt::Return {
                        value,
                        loc: tok.loc,
                    }
                }
                _ => {
                    let mut tokens = vec![tok];
                    let (rest, end) = self.collect_statement("statement")?;
                    tokens.extend(rest);
                    Stmt::Expr(parse_value(&tokens, &end)?)
                }
            };
            trace!("statement: {stmt:?}");
            stmts.push(stmt);
        }

        Ok(Block { stmts, loc })
    }

    /// `auto a, b = value;`, called after the keyword.
    /// An initializer always ends the statement.
    fn parse_auto(&mut self) -> Result<Vec<Declarator>> {
        const CONSTRUCT: &str = "auto declaration";
        let mut decls = Vec::new();

        loop {
            let tok = self.expect_code(CONSTRUCT)?;
            let name = match tok.token {
                Token::Ident(name) => name,
                other => {
                    return Err(BlaestError::UnexpectedToken {
                        found: format!("'{}'", other.text()),
                        expected: "a variable name",
                        loc: tok.loc,
                    })
                }
            };

            let next = self.expect_code(CONSTRUCT)?;
            match next.token {
                Token::Delimiter(Delimiter::Comma) => decls.push(Declarator {
                    name,
                    init: None,
                    loc: tok.loc,
                }),
                Token::Delimiter(Delimiter::Semicolon) => {
                    decls.push(Declarator {
                        name,
                        init: None,
                        loc: tok.loc,
                    });
                    break;
                }
                Token::Assign => {
                    let (tokens, end) = self.collect_statement(CONSTRUCT)?;
                    decls.push(Declarator {
                        name,
                        init: Some(parse_value(&tokens, &end)?),
                        loc: tok.loc,
                    });
                    break;
                }
                other => {
                    return Err(BlaestError::UnexpectedToken {
                        found: format!("'{}'", other.text()),
                        expected: "',', '=' or ';'",
                        loc: next.loc,
                    })
                }
            }
        }

        Ok(decls)
    }

    /// Tokens up to the next `;`, plus the location of that `;`.
    /// Comments are kept and pass through with the expression.
    fn collect_statement(
        &mut self,
        construct: &'static str,
    ) -> Result<(Vec<Spanned>, SourceLocation)> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.expect_more(construct)?;
            match tok.token {
                Token::Delimiter(Delimiter::Semicolon) => return Ok((tokens, tok.loc)),
                Token::Delimiter(Delimiter::LBrace) | Token::Delimiter(Delimiter::RBrace) => {
                    return Err(BlaestError::UnexpectedToken {
                        found: format!("'{}'", tok.token.text()),
                        expected: "';'",
                        loc: tok.loc,
                    })
                }
                _ => tokens.push(tok),
            }
        }
    }

    /// Tokens up to the `)` closing an already consumed `(`, without comments
    fn collect_parenthesized(
        &mut self,
        construct: &'static str,
    ) -> Result<(Vec<Spanned>, SourceLocation)> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            let tok = self.expect_code(construct)?;
            match tok.token {
                Token::Delimiter(Delimiter::LParen) => depth += 1,
                Token::Delimiter(Delimiter::RParen) if depth == 0 => return Ok((tokens, tok.loc)),
                Token::Delimiter(Delimiter::RParen) => depth -= 1,
                _ => {}
            }
            tokens.push(tok);
        }
    }
}

/// Parameter names of a function definition
fn parse_params(tokens: &[Spanned], close: &SourceLocation) -> Result<Vec<Param>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    split_top_level(tokens)
        .into_iter()
        .map(|piece| match piece {
            [Spanned {
                token: Token::Ident(name),
                loc,
            }] => Ok(Param {
                name: name.clone(),
                loc: loc.clone(),
            }),
            [] => Err(BlaestError::UnexpectedToken {
                found: "an empty parameter".to_string(),
                expected: "a parameter name",
                loc: close.clone(),
            }),
            [first, ..] => Err(BlaestError::UnexpectedToken {
                found: format!("'{}'", render_tokens(piece)),
                expected: "a parameter name",
                loc: first.loc.clone(),
            }),
        })
        .collect()
}

/// Classify one value-producing token run: string literal, assignment,
/// call, or passthrough text.
///
/// `end` is where the run stops; it is reported if the run holds nothing
/// but comments.
pub fn parse_value(tokens: &[Spanned], end: &SourceLocation) -> Result<Expr> {
    let Some(first) = tokens.iter().find(|t| !t.token.is_comment()) else {
        return Err(BlaestError::UnexpectedToken {
            found: "end of expression".to_string(),
            expected: "an expression",
            loc: end.clone(),
        });
    };

    if let [Spanned {
        token: Token::StringLiteral(text),
        ..
    }] = tokens
    {
        return Ok(Expr::Str(text.clone()));
    }

    if let Some(eq) = find_top_level(tokens, |t| *t == Token::Assign) {
        let lhs: Vec<&Spanned> = tokens[..eq].iter().filter(|t| !t.token.is_comment()).collect();
        let target = match lhs.as_slice() {
            [Spanned {
                token: Token::Ident(name),
                ..
            }] => name.clone(),
            _ => {
                return Err(BlaestError::InvalidAssignTarget {
                    target: render_tokens(&tokens[..eq]),
                    loc: first.loc.clone(),
                })
            }
        };
        // Recursing on the right-hand side makes `a = b = 5` right-associative
        let value = parse_value(&tokens[eq + 1..], end)?;
        return Ok(Expr::Assign {
            target,
            value: Box::new(value),
            loc: first.loc.clone(),
        });
    }

    if let [Spanned {
        token: Token::Ident(callee),
        loc,
    }, paren, ..] = tokens
    {
        if paren.token.is_delimiter(Delimiter::LParen) {
            if let Some(close) = find_matching_paren(tokens, 1) {
                if close == tokens.len() - 1 {
                    let call = parse_call(callee, loc, &tokens[2..close])?;
                    return Ok(Expr::Call(call));
                }
            }
        }
    }

    parse_passthrough(tokens).map(Expr::Passthrough)
}

/// Call-site arguments, each a full expression
fn parse_call(callee: &str, loc: &SourceLocation, inner: &[Spanned]) -> Result<Call> {
    let args = if inner.iter().all(|t| t.token.is_comment()) {
        Vec::new()
    } else {
        split_top_level(inner)
            .into_iter()
            .map(|piece| parse_value(piece, loc))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(Call {
        callee: callee.to_string(),
        args,
        loc: loc.clone(),
    })
}

fn parse_passthrough(tokens: &[Spanned]) -> Result<Vec<RawPart>> {
    let mut parts = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let tok = &tokens[i];
        match &tok.token {
            Token::Ident(name) => {
                let is_call = tokens
                    .get(i + 1)
                    .is_some_and(|next| next.token.is_delimiter(Delimiter::LParen));
                if is_call {
                    let close = find_matching_paren(tokens, i + 1).ok_or_else(|| {
                        BlaestError::UnterminatedCall {
                            callee: name.clone(),
                            loc: tok.loc.clone(),
                        }
                    })?;
                    parts.push(RawPart::Call(parse_call(
                        name,
                        &tok.loc,
                        &tokens[i + 2..close],
                    )?));
                    i = close + 1;
                    continue;
                }
                parts.push(RawPart::Name {
                    name: name.clone(),
                    loc: tok.loc.clone(),
                });
            }
            Token::StringLiteral(text) => parts.push(RawPart::Str(text.clone())),
            Token::Comment(text) => parts.push(RawPart::Comment(text.clone())),
            Token::Keyword(kw) => {
                return Err(BlaestError::UnexpectedToken {
                    found: format!("keyword '{}'", kw.as_str()),
                    expected: "an expression",
                    loc: tok.loc.clone(),
                })
            }
            other => parts.push(RawPart::Text(other.text())),
        }
        i += 1;
    }

    Ok(parts)
}

#[cfg(test)]
mod tests;
