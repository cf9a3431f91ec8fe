//! `if` and `ifnot` conditional tags

use std::any::Any;

use super::{arguments, expect_end};
use crate::context::Context;
use crate::error::{ParseError, RenderError};
use crate::node::{Node, NodeList, render_nodes};
use crate::parser::{Token, TokenParser, until};
use crate::variable::{Variable, is_truthy};

/// Renders one of two branches depending on a variable's truthiness
#[derive(Debug)]
pub struct IfNode {
    variable: Variable,
    true_nodes: NodeList,
    false_nodes: NodeList,
}

impl IfNode {
    /// Parse `{% if x %}…{% else %}…{% endif %}`
    pub fn parse(parser: &mut TokenParser, token: &Token) -> Result<Box<dyn Node>, ParseError> {
        let (variable, true_nodes, false_nodes) = Self::parse_branches(parser, token, "if")?;
        Ok(Box::new(Self {
            variable,
            true_nodes,
            false_nodes,
        }))
    }

    /// Parse `{% ifnot x %}…{% else %}…{% endif %}`, the negated form
    pub fn parse_ifnot(parser: &mut TokenParser, token: &Token) -> Result<Box<dyn Node>, ParseError> {
        let (variable, false_nodes, true_nodes) = Self::parse_branches(parser, token, "ifnot")?;
        Ok(Box::new(Self {
            variable,
            true_nodes,
            false_nodes,
        }))
    }

    fn parse_branches(
        parser: &mut TokenParser,
        token: &Token,
        tag: &str,
    ) -> Result<(Variable, NodeList, NodeList), ParseError> {
        let args = arguments(token, 1, &format!("{{% {tag} variable %}}"))?;

        let first = parser.parse_until(until(["else", "endif"]))?;
        let mut second = NodeList::new();

        if parser.peek_token().and_then(Token::tag_name) == Some("else") {
            parser.next_token();
            second = parser.parse_until(until(["endif"]))?;
        }
        expect_end(parser, tag, "endif")?;

        Ok((Variable::new(&args[0]), first, second))
    }

    /// The tested variable
    #[must_use]
    pub const fn variable(&self) -> &Variable {
        &self.variable
    }

    /// Nodes rendered when the variable is truthy
    #[must_use]
    pub fn true_nodes(&self) -> &[Box<dyn Node>] {
        &self.true_nodes
    }

    /// Nodes rendered otherwise
    #[must_use]
    pub fn false_nodes(&self) -> &[Box<dyn Node>] {
        &self.false_nodes
    }
}

impl Node for IfNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        let truthy = self.variable.resolve(context).is_some_and(|value| is_truthy(&value));
        if truthy {
            render_nodes(&self.true_nodes, context)
        } else {
            render_nodes(&self.false_nodes, context)
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
