//! Renderable nodes
//!
//! The parser turns tokens into a [`NodeList`]. Literal text and variable
//! interpolation are handled by the core; every other node type comes from
//! a tag parser.

use std::any::Any;
use std::rc::Rc;

use crate::context::Context;
use crate::error::RenderError;
use crate::variable::{Variable, stringify};

/// Something that can be rendered against a context
pub trait Node: std::fmt::Debug {
    /// Render to text
    fn render(&self, context: &mut Context) -> Result<String, RenderError>;

    /// Access the concrete node for inspection
    fn as_any(&self) -> &dyn Any;
}

/// Nodes in render order
pub type NodeList = Vec<Box<dyn Node>>;

/// Handler behind a simple tag
pub type SimpleHandler = Rc<dyn Fn(&Context) -> Result<String, RenderError>>;

/// Render every node in order and concatenate the output
pub fn render_nodes(nodes: &[Box<dyn Node>], context: &mut Context) -> Result<String, RenderError> {
    let mut output = String::new();
    for node in nodes {
        output.push_str(&node.render(context)?);
    }
    Ok(output)
}

/// Downcast a node to a concrete type
#[must_use]
pub fn downcast<T: Node + 'static>(node: &dyn Node) -> Option<&T> {
    node.as_any().downcast_ref::<T>()
}

/// Literal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    text: String,
}

impl TextNode {
    /// Create a text node
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The literal text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Node for TextNode {
    fn render(&self, _context: &mut Context) -> Result<String, RenderError> {
        Ok(self.text.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Variable interpolation
///
/// Unresolved variables render as the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNode {
    variable: Variable,
}

impl VariableNode {
    /// Create a node interpolating `expression`
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            variable: Variable::new(expression),
        }
    }

    /// The interpolated variable
    #[must_use]
    pub const fn variable(&self) -> &Variable {
        &self.variable
    }
}

impl Node for VariableNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        Ok(self.variable.resolve(context).map(|v| stringify(&v)).unwrap_or_default())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Node produced by a simple tag; calls its handler at render time
#[derive(Clone)]
pub struct SimpleNode {
    handler: SimpleHandler,
}

impl std::fmt::Debug for SimpleNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleNode").finish_non_exhaustive()
    }
}

impl SimpleNode {
    /// Wrap a handler
    #[must_use]
    pub fn new(handler: SimpleHandler) -> Self {
        Self { handler }
    }
}

impl Node for SimpleNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        (self.handler)(context)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
