//! Token definitions

use crate::location::SourceLocation;

/// Token types for the Blaest lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Numeric literal, kept as opaque text (`42`, `0x1F`, `1.5`)
    Number(String),
    /// String literal contents, without the quotes
    StringLiteral(String),
    /// Character constant contents, without the quotes (`a`, `\n`, `,`)
    CharLiteral(String),
    /// Comment, already in `/* ... */` form
    Comment(String),

    // Identifiers and keywords
    Ident(String),
    Keyword(Keyword),

    /// A bare `=`
    Assign,
    /// Any other operator or unrecognised character, as written
    Operator(String),

    // Delimiters
    Delimiter(Delimiter),
}

/// Reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Auto,
    Return,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "auto" => Some(Keyword::Auto),
            "return" => Some(Keyword::Return),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Auto => "auto",
            Keyword::Return => "return",
        }
    }
}

/// Delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::LParen => '(',
            Delimiter::RParen => ')',
            Delimiter::LBrace => '{',
            Delimiter::RBrace => '}',
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
        }
    }
}

/// Operators made of two characters; everything else is lexed one char at a time
pub const TWO_CHAR_OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "<<", ">>", "++", "--", "->", "+=", "-=", "*=", "/=",
    "%=", "&=", "|=", "^=",
];

impl Token {
    /// Source text of the token as it is written back out.
    /// String literals are rendered with their quotes.
    pub fn text(&self) -> String {
        match self {
            Token::Number(n) => n.clone(),
            Token::StringLiteral(s) => format!("\"{s}\""),
            Token::CharLiteral(c) => format!("'{c}'"),
            Token::Comment(text) => text.clone(),
            Token::Ident(name) => name.clone(),
            Token::Keyword(kw) => kw.as_str().to_string(),
            Token::Assign => "=".to_string(),
            Token::Operator(op) => op.clone(),
            Token::Delimiter(d) => d.as_char().to_string(),
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Token::Comment(_))
    }

    pub fn is_delimiter(&self, delim: Delimiter) -> bool {
        matches!(self, Token::Delimiter(d) if *d == delim)
    }
}

/// A token together with the location of its first character
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub loc: SourceLocation,
}

impl Spanned {
    pub fn new(token: Token, loc: SourceLocation) -> Self {
        Self { token, loc }
    }
}
