//! Parser utility functions - depth-aware scanning over token slices

use crate::lexer::{Delimiter, Spanned, Token};

/// Nesting change caused by a token: `(`/`[` open, `)`/`]` close
fn depth_delta(token: &Token) -> i32 {
    match token {
        Token::Delimiter(Delimiter::LParen) => 1,
        Token::Delimiter(Delimiter::RParen) => -1,
        Token::Operator(op) if op == "[" => 1,
        Token::Operator(op) if op == "]" => -1,
        _ => 0,
    }
}

/// Index of the first token at nesting depth 0 that satisfies `pred`
pub fn find_top_level(tokens: &[Spanned], pred: impl Fn(&Token) -> bool) -> Option<usize> {
    let mut depth = 0i32;
    for (i, t) in tokens.iter().enumerate() {
        if depth == 0 && pred(&t.token) {
            return Some(i);
        }
        depth = (depth + depth_delta(&t.token)).max(0);
    }
    None
}

/// Index of the `)` matching the `(` at `open`
pub fn find_matching_paren(tokens: &[Spanned], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, t) in tokens.iter().enumerate().skip(open) {
        match t.token {
            Token::Delimiter(Delimiter::LParen) => depth += 1,
            Token::Delimiter(Delimiter::RParen) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas that are not nested inside parentheses or brackets.
/// String literals are single tokens, so their commas never split.
pub fn split_top_level(tokens: &[Spanned]) -> Vec<&[Spanned]> {
    let mut pieces = Vec::new();
    let mut rest = tokens;
    while let Some(comma) =
        find_top_level(rest, |t| matches!(t, Token::Delimiter(Delimiter::Comma)))
    {
        pieces.push(&rest[..comma]);
        rest = &rest[comma + 1..];
    }
    pieces.push(rest);
    pieces
}

/// Source-like rendering of a token run, used in error messages
pub fn render_tokens(tokens: &[Spanned]) -> String {
    tokens.iter().map(|t| t.token.text()).collect::<Vec<_>>().join(" ")
}
