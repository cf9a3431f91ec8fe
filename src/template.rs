//! Template facade: lex, parse and render in one place
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use stencil::context::Context;
//! use stencil::template::Template;
//!
//! let template = Template::new("{% for n in names %}{{ n }}{% if forloop.last %}.{% else %}, {% endif %}{% endfor %}").unwrap();
//! let mut ctx = Context::from_value(json!({ "names": ["a", "b"] })).unwrap();
//! assert_eq!(template.render(&mut ctx).unwrap(), "a, b.");
//! ```

use crate::config::ParserOptions;
use crate::context::Context;
use crate::error::{ParseError, RenderError};
use crate::lexer;
use crate::node::{Node, NodeList, render_nodes};
use crate::parser::TokenParser;

/// A parsed template
#[derive(Debug)]
pub struct Template {
    name: Option<String>,
    nodes: NodeList,
}

impl Template {
    /// Parse a template source with default options
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::with_options(source, ParserOptions::default())
    }

    /// Parse a template source with explicit options
    pub fn with_options(source: &str, options: ParserOptions) -> Result<Self, ParseError> {
        Self::from_parser(TokenParser::with_options(lexer::tokenize(source), options))
    }

    /// Parse whatever remains in a prepared parser
    ///
    /// Use this to register custom tags before parsing.
    pub fn from_parser(mut parser: TokenParser) -> Result<Self, ParseError> {
        let nodes = parser.parse()?;
        Ok(Self { name: None, nodes })
    }

    /// Attach a name, used in log and error output
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Template name, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Top-level nodes
    #[must_use]
    pub fn nodes(&self) -> &[Box<dyn Node>] {
        &self.nodes
    }

    /// Render against a context
    pub fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        render_nodes(&self.nodes, context)
    }
}
