//! SQL Lexer - Tokenizes statement text into a sequence of tokens
//!
//! The lexer accumulates characters into a word buffer. Whitespace and the
//! punctuation characters `(`, `)`, `,` and `;` end the pending word, unless a
//! single quote has opened a string literal. Each finished word is then
//! classified: keyword, boolean, number, quoted string, and identifier last.

use std::{fmt::Display, str::Chars};

use tracing::{trace, warn};

use crate::error::Result;

/// Represents a single lexical token in the SQL input
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// SQL reserved keyword
    Keyword(Keyword),
    /// Identifier such as table name, column name or kind name
    Ident(String),
    /// Integer literal
    Integer(i64),
    /// Floating-point literal
    Float(f64),
    /// Boolean literal (`true` / `false`)
    Boolean(bool),
    /// Quoted string literal, quotes stripped
    String(String),
    /// Operators and punctuation
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Asterisk,
    Equal,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Keyword(keyword) => f.write_str(keyword.to_str()),
            Token::Ident(ident) => f.write_str(ident),
            Token::Integer(n) => write!(f, "{}", n),
            Token::Float(n) => write!(f, "{:?}", n),
            Token::Boolean(b) => write!(f, "{}", b),
            Token::String(s) => write!(f, "'{}'", s),
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Semicolon => f.write_str(";"),
            Token::Asterisk => f.write_str("*"),
            Token::Equal => f.write_str("="),
        }
    }
}

/// SQL reserved keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Create,
    Select,
    Insert,
    Delete,
    Drop,
    Into,
    From,
    Table,
    Where,
    Primary,
    Key,
}

impl Keyword {
    /// Attempts to parse a word as a keyword (case-insensitive)
    pub fn from_str(ident: &str) -> Option<Keyword> {
        Some(match ident.to_uppercase().as_ref() {
            "CREATE" => Keyword::Create,
            "SELECT" => Keyword::Select,
            "INSERT" => Keyword::Insert,
            "DELETE" => Keyword::Delete,
            "DROP" => Keyword::Drop,
            "INTO" => Keyword::Into,
            "FROM" => Keyword::From,
            "TABLE" => Keyword::Table,
            "WHERE" => Keyword::Where,
            "PRIMARY" => Keyword::Primary,
            "KEY" => Keyword::Key,
            _ => return None,
        })
    }

    /// Returns the uppercase string representation of the keyword
    pub fn to_str(&self) -> &'static str {
        match self {
            Keyword::Create => "CREATE",
            Keyword::Select => "SELECT",
            Keyword::Insert => "INSERT",
            Keyword::Delete => "DELETE",
            Keyword::Drop => "DROP",
            Keyword::Into => "INTO",
            Keyword::From => "FROM",
            Keyword::Table => "TABLE",
            Keyword::Where => "WHERE",
            Keyword::Primary => "PRIMARY",
            Keyword::Key => "KEY",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// SQL lexical analyzer (lexer/tokenizer)
pub struct Lexer<'a> {
    chars: Chars<'a>,
    word: String,
    in_string: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given SQL text
    pub fn new(sql_text: &'a str) -> Self {
        Self {
            chars: sql_text.chars(),
            word: String::new(),
            in_string: false,
            tokens: Vec::new(),
        }
    }

    /// Consumes the whole input and returns its tokens in order
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        while let Some(c) = self.chars.next() {
            if c == '\'' {
                self.in_string = !self.in_string;
                self.word.push(c);
                continue;
            }
            if self.in_string {
                self.word.push(c);
                continue;
            }
            if c.is_whitespace() {
                self.flush()?;
                continue;
            }
            match Self::punctuation(c) {
                Some(token) => {
                    self.flush()?;
                    self.tokens.push(token);
                }
                None => self.word.push(c),
            }
        }

        if self.in_string {
            // An unterminated literal is closed at end of input
            warn!(word = %self.word, "unterminated string literal closed at end of input");
            let word = std::mem::take(&mut self.word);
            let token = match word.strip_prefix('\'') {
                Some(inner) => Token::String(inner.to_string()),
                None => classify(&word)?,
            };
            self.tokens.push(token);
        } else {
            self.flush()?;
        }

        trace!(count = self.tokens.len(), "tokenized statement");
        Ok(self.tokens)
    }

    /// Classifies the pending word, if any, and appends its token
    fn flush(&mut self) -> Result<()> {
        if self.word.is_empty() {
            return Ok(());
        }
        let word = std::mem::take(&mut self.word);
        self.tokens.push(classify(&word)?);
        Ok(())
    }

    fn punctuation(c: char) -> Option<Token> {
        match c {
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            ',' => Some(Token::Comma),
            ';' => Some(Token::Semicolon),
            _ => None,
        }
    }
}

/// Tokenizes one statement's text
pub fn tokenize(sql_text: &str) -> Result<Vec<Token>> {
    Lexer::new(sql_text).tokenize()
}

/// Classifies a finished word. The order of the checks is significant.
fn classify(word: &str) -> Result<Token> {
    if let Some(token) = classify_reserved(word) {
        return Ok(token);
    }
    if let Some(token) = classify_boolean(word) {
        return Ok(token);
    }
    if let Some(token) = classify_number(word)? {
        return Ok(token);
    }
    if let Some(token) = classify_string(word) {
        return Ok(token);
    }
    Ok(Token::Ident(word.to_string()))
}

fn classify_reserved(word: &str) -> Option<Token> {
    match word {
        "*" => Some(Token::Asterisk),
        "=" => Some(Token::Equal),
        _ => Keyword::from_str(word).map(Token::Keyword),
    }
}

fn classify_boolean(word: &str) -> Option<Token> {
    match word {
        "true" => Some(Token::Boolean(true)),
        "false" => Some(Token::Boolean(false)),
        _ => None,
    }
}

/// Digits with at most one internal `.`
fn classify_number(word: &str) -> Result<Option<Token>> {
    let mut dot = None;
    for (i, c) in word.char_indices() {
        match c {
            '0'..='9' => {}
            '.' if dot.is_none() => dot = Some(i),
            _ => return Ok(None),
        }
    }
    Ok(match dot {
        None => Some(Token::Integer(word.parse()?)),
        Some(i) if i > 0 && i < word.len() - 1 => Some(Token::Float(word.parse()?)),
        Some(_) => None,
    })
}

fn classify_string(word: &str) -> Option<Token> {
    if word.len() < 2 {
        return None;
    }
    word.strip_prefix('\'')
        .and_then(|w| w.strip_suffix('\''))
        .map(|inner| Token::String(inner.to_string()))
}
