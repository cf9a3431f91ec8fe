//! Lexer: template source text to tokens
//!
//! Recognised delimiters:
//! - `{{ expr }}` produces [`Token::Variable`]
//! - `{% directive %}` produces [`Token::Block`]
//! - `{# note #}` produces [`Token::Comment`]
//!
//! Everything between delimiters is [`Token::Text`]. An opening delimiter
//! with no matching close is kept as literal text.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::Token;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{.*?\}\}|\{%.*?%\}|\{#.*?#\}").expect("tag regex is valid")
});

/// Splits template source into tokens
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Produce the full token sequence
    #[must_use]
    pub fn tokenize(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut cursor = 0;

        for m in TAG_RE.find_iter(self.source) {
            if m.start() > cursor {
                tokens.push(Token::Text(self.source[cursor..m.start()].to_string()));
            }
            tokens.push(Self::create_token(m.as_str()));
            cursor = m.end();
        }

        if cursor < self.source.len() {
            tokens.push(Token::Text(self.source[cursor..].to_string()));
        }
        tokens
    }

    fn create_token(tag: &str) -> Token {
        // Every match is at least four bytes of ASCII delimiters
        let inner = tag[2..tag.len() - 2].trim().to_string();
        match &tag[..2] {
            "{{" => Token::Variable(inner),
            "{%" => Token::Block(inner),
            _ => Token::Comment(inner),
        }
    }
}

/// Tokenize a template source
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
