//! Token types produced by the lexer

use serde::{Deserialize, Serialize};

/// Kind of token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Literal text copied to the output
    Text,
    /// Variable interpolation (`{{ name }}`)
    Variable,
    /// Block directive (`{% tag args %}`)
    Block,
    /// Comment (`{# note #}`)
    Comment,
}

impl TokenKind {
    /// Lowercase name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Variable => "variable",
            Self::Block => "block",
            Self::Comment => "comment",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single template token
///
/// Each variant carries the raw payload with its delimiters stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// Literal text
    Text(String),
    /// Variable expression
    Variable(String),
    /// Block directive; the first component is the tag name
    Block(String),
    /// Comment body
    Comment(String),
}

impl Token {
    /// Create a text token
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Create a variable token
    #[must_use]
    pub fn variable(expression: impl Into<String>) -> Self {
        Self::Variable(expression.into())
    }

    /// Create a block token
    #[must_use]
    pub fn block(directive: impl Into<String>) -> Self {
        Self::Block(directive.into())
    }

    /// Create a comment token
    #[must_use]
    pub fn comment(content: impl Into<String>) -> Self {
        Self::Comment(content.into())
    }

    /// Kind of this token
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Text(_) => TokenKind::Text,
            Self::Variable(_) => TokenKind::Variable,
            Self::Block(_) => TokenKind::Block,
            Self::Comment(_) => TokenKind::Comment,
        }
    }

    /// Raw payload
    #[must_use]
    pub fn contents(&self) -> &str {
        match self {
            Self::Text(s) | Self::Variable(s) | Self::Block(s) | Self::Comment(s) => s,
        }
    }

    /// Whether this is a block directive
    #[must_use]
    pub const fn is_block(&self) -> bool {
        matches!(self, Self::Block(_))
    }

    /// Tag name of a block directive: its first component
    ///
    /// Returns `None` for non-block tokens and for empty directives.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Block(directive) => split_components(directive).next(),
            _ => None,
        }
    }

    /// Split the payload into whitespace-delimited components
    ///
    /// Quoted runs (`"..."` or `'...'`) stay together as one component,
    /// quotes included, so `now "%Y %m"` yields `["now", "\"%Y %m\""]`.
    #[must_use]
    pub fn components(&self) -> Vec<String> {
        split_components(self.contents()).map(String::from).collect()
    }
}

/// Lazily split `contents` on whitespace outside quotes
fn split_components(contents: &str) -> impl Iterator<Item = &str> {
    let mut rest = contents;
    std::iter::from_fn(move || {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            rest = trimmed;
            return None;
        }

        let mut quote: Option<char> = None;
        let mut end = trimmed.len();
        for (i, c) in trimmed.char_indices() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {},
                None if c == '"' || c == '\'' => quote = Some(c),
                None if c.is_whitespace() => {
                    end = i;
                    break;
                },
                None => {},
            }
        }

        let (component, tail) = trimmed.split_at(end);
        rest = tail;
        Some(component)
    })
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Variable(s) => write!(f, "{{{{ {s} }}}}"),
            Self::Block(s) => write!(f, "{{% {s} %}}"),
            Self::Comment(s) => write!(f, "{{# {s} #}}"),
        }
    }
}
