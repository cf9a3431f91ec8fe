//! Token parser: turns a token stream into a node tree
//!
//! The parser is tag-agnostic. Text, variable and comment tokens are handled
//! inline; every block token is dispatched by tag name to a registered
//! [`TagParser`]. Tag parsers may call back into the parser to consume a
//! nested body:
//!
//! ```
//! use stencil::parser::{Token, TokenParser, until};
//! use stencil::node::TextNode;
//! use stencil::error::ParseError;
//!
//! let mut parser = TokenParser::new(vec![
//!     Token::block("shout"),
//!     Token::text("hi"),
//!     Token::block("endshout"),
//! ]);
//! parser.register_tag("shout", |parser, _token| {
//!     let body = parser.parse_until(until(["endshout"]))?;
//!     parser
//!         .next_token()
//!         .ok_or_else(|| ParseError::missing_end("shout", "endshout"))?;
//!     Ok(Box::new(TextNode::new(format!("{} node(s)", body.len()))))
//! });
//!
//! let nodes = parser.parse().unwrap();
//! assert_eq!(nodes.len(), 1);
//! ```

mod token;

use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

pub use token::{Token, TokenKind};

use crate::config::ParserOptions;
use crate::context::Context;
use crate::error::{ParseError, RenderError};
use crate::node::{Node, NodeList, SimpleHandler, SimpleNode, TextNode, VariableNode};
use crate::tags;

/// Callback that builds a node from a block token
///
/// Receives the parser so it can consume further tokens (a body, an end
/// tag) before returning.
pub type TagParser = Rc<dyn Fn(&mut TokenParser, &Token) -> Result<Box<dyn Node>, ParseError>>;

/// Result of a parse call
pub type ParseResult = Result<NodeList, ParseError>;

/// Build a termination predicate matching block tokens named in `tags`
///
/// Pass the result to [`TokenParser::parse_until`]. The matching token is
/// left at the front of the queue for the caller to consume.
pub fn until<I, S>(tags: I) -> impl Fn(&TokenParser, &Token) -> bool
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: HashSet<String> = tags.into_iter().map(Into::into).collect();
    move |_parser, token| token.tag_name().is_some_and(|name| names.contains(name))
}

/// Parser over a queue of tokens with a registry of tag parsers
pub struct TokenParser {
    tokens: VecDeque<Token>,
    tags: HashMap<String, TagParser>,
    options: ParserOptions,
}

impl std::fmt::Debug for TokenParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenParser")
            .field("tokens", &format!("{} remaining", self.tokens.len()))
            .field("tags", &self.tag_names())
            .field("options", &self.options)
            .finish()
    }
}

impl TokenParser {
    /// Create a parser with the built-in tags registered
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    /// Create a parser with explicit options
    #[must_use]
    pub fn with_options(tokens: impl IntoIterator<Item = Token>, options: ParserOptions) -> Self {
        let mut parser = Self {
            tokens: tokens.into_iter().collect(),
            tags: HashMap::new(),
            options,
        };
        tags::register_builtins(&mut parser);
        parser
    }

    /// Options this parser was built with
    #[must_use]
    pub const fn options(&self) -> ParserOptions {
        self.options
    }

    /// Register a tag parser, replacing any existing one for `name`
    pub fn register_tag<F>(&mut self, name: impl Into<String>, parser: F)
    where
        F: Fn(&mut Self, &Token) -> Result<Box<dyn Node>, ParseError> + 'static,
    {
        self.tags.insert(name.into(), Rc::new(parser));
    }

    /// Register a tag that takes no arguments and renders through `handler`
    ///
    /// Parsing such a tag always succeeds; handler failures surface when the
    /// node is rendered.
    pub fn register_simple_tag<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&Context) -> Result<String, RenderError> + 'static,
    {
        let handler: SimpleHandler = Rc::new(handler);
        self.register_tag(name, move |_parser, _token| {
            Ok(Box::new(SimpleNode::new(Rc::clone(&handler))))
        });
    }

    /// Whether a parser is registered for `name`
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Registered tag names, sorted
    #[must_use]
    pub fn tag_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse every remaining token
    pub fn parse(&mut self) -> ParseResult {
        self.parse_tokens(None)
    }

    /// Parse until `predicate` matches a block token
    ///
    /// The matching token is pushed back, so the next call to
    /// [`next_token`](Self::next_token) returns it. If the queue runs out
    /// first, everything parsed so far is returned; checking for a missing
    /// end tag is up to the caller.
    pub fn parse_until<P>(&mut self, predicate: P) -> ParseResult
    where
        P: Fn(&Self, &Token) -> bool,
    {
        self.parse_tokens(Some(&predicate))
    }

    fn parse_tokens(&mut self, until: Option<&dyn Fn(&Self, &Token) -> bool>) -> ParseResult {
        let mut nodes = NodeList::new();

        while let Some(token) = self.next_token() {
            match token {
                Token::Text(text) => nodes.push(Box::new(TextNode::new(text))),
                Token::Variable(expression) => nodes.push(Box::new(VariableNode::new(expression))),
                Token::Comment(_) => {},
                Token::Block(_) => {
                    if let Some(until) = until {
                        if until(self, &token) {
                            self.prepend_token(token);
                            return Ok(nodes);
                        }
                    }

                    let Some(name) = token.tag_name() else {
                        continue;
                    };

                    // Cloned out so the callback can re-register tags mid-parse
                    match self.tags.get(name).cloned() {
                        Some(callback) => {
                            log::trace!("dispatching tag `{name}`");
                            nodes.push(callback(self, &token)?);
                        },
                        None if self.options.strict_tags => {
                            return Err(ParseError::UnknownTag(name.to_string()));
                        },
                        None => log::debug!("dropping unknown tag `{name}`"),
                    }
                },
            }
        }

        Ok(nodes)
    }

    /// Remove and return the next token
    pub fn next_token(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Put a token back at the front of the queue
    pub fn prepend_token(&mut self, token: Token) {
        self.tokens.push_front(token);
    }

    /// The next token, without consuming it
    #[must_use]
    pub fn peek_token(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Number of tokens not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}
