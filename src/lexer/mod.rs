//! Lexer module - Tokenization
//!
//! [`Lexer`] is a lazy iterator over the program text. It is `Clone`, so a
//! parser can snapshot the cursor and restart scanning from any point.

mod token;

pub use token::*;

use crate::error::{BlaestError, Result};
use crate::location::SourceLocation;
use std::iter::Peekable;
use std::str::Chars;

/// Streaming tokenizer over Blaest source text
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            failed: false,
        }
    }

    /// Location of the next unread character
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn take_while(&mut self, first: char, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            text.push(c);
            self.bump();
        }
        text
    }

    /// Everything up to the closing quote, verbatim. No escape sequences.
    fn lex_string(&mut self, start: SourceLocation) -> Result<Token> {
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(Token::StringLiteral(text)),
                Some(c) => text.push(c),
                None => return Err(BlaestError::UnterminatedString { loc: start }),
            }
        }
    }

    /// Character constant up to the closing `'`. A backslash keeps the
    /// following character, so `'\''` is one literal.
    fn lex_char(&mut self, start: SourceLocation) -> Result<Token> {
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(Token::CharLiteral(text)),
                Some('\n') | None => return Err(BlaestError::UnterminatedCharacter { loc: start }),
                Some('\\') => {
                    text.push('\\');
                    match self.bump() {
                        Some(c) if c != '\n' => text.push(c),
                        _ => return Err(BlaestError::UnterminatedCharacter { loc: start }),
                    }
                }
                Some(c) => text.push(c),
            }
        }
    }

    /// `/* ... */`, called after the `/*`
    fn lex_block_comment(&mut self, start: SourceLocation) -> Result<Token> {
        let mut text = String::from("/*");
        loop {
            match self.bump() {
                Some('*') if self.chars.peek() == Some(&'/') => {
                    self.bump();
                    text.push_str("*/");
                    return Ok(Token::Comment(text));
                }
                Some(c) => text.push(c),
                None => return Err(BlaestError::UnterminatedComment { loc: start }),
            }
        }
    }

    /// `// ...` to end of line, called after the `//`. Rewritten as a block
    /// comment so it cannot swallow code emitted after it on the same line.
    fn lex_line_comment(&mut self) -> Token {
        let mut body = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            body.push(c);
            self.bump();
        }
        let body = body.trim_end().replace("*/", "* /");
        Token::Comment(format!("/*{body} */"))
    }

    fn lex_operator(&mut self, first: char) -> Token {
        if let Some(&second) = self.chars.peek() {
            let pair: String = [first, second].iter().collect();
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                self.bump();
                return Token::Operator(pair);
            }
        }
        match first {
            '=' => Token::Assign,
            _ => Token::Operator(first.to_string()),
        }
    }

    fn lex_token(&mut self) -> Option<Result<Spanned>> {
        self.skip_whitespace();
        let loc = self.location();
        let c = self.bump()?;

        let token = match c {
            '(' => Token::Delimiter(Delimiter::LParen),
            ')' => Token::Delimiter(Delimiter::RParen),
            '{' => Token::Delimiter(Delimiter::LBrace),
            '}' => Token::Delimiter(Delimiter::RBrace),
            ',' => Token::Delimiter(Delimiter::Comma),
            ';' => Token::Delimiter(Delimiter::Semicolon),
            '"' => match self.lex_string(loc.clone()) {
                Ok(token) => token,
                Err(err) => return Some(Err(err)),
            },
            '\'' => match self.lex_char(loc.clone()) {
                Ok(token) => token,
                Err(err) => return Some(Err(err)),
            },
            '/' if self.chars.peek() == Some(&'*') => {
                self.bump();
                match self.lex_block_comment(loc.clone()) {
                    Ok(token) => token,
                    Err(err) => return Some(Err(err)),
                }
            }
            '/' if self.chars.peek() == Some(&'/') => {
                self.bump();
                self.lex_line_comment()
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.take_while(c, |c| c.is_ascii_alphanumeric() || c == '_');
                match Keyword::from_word(&word) {
                    Some(kw) => Token::Keyword(kw),
                    None => Token::Ident(word),
                }
            }
            c if c.is_ascii_digit() => {
                Token::Number(self.take_while(c, |c| c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            }
            c => self.lex_operator(c),
        };

        Some(Ok(Spanned::new(token, loc)))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned>;

    fn next(&mut self) -> Option<Self::Item> {
        // A lexing error ends the stream
        if self.failed {
            return None;
        }
        let item = self.lex_token();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

/// Tokenize a whole program eagerly
pub fn tokenize(source: &str) -> Result<Vec<Spanned>> {
    Lexer::new(source).collect()
}
