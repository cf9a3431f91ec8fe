//! `for` loop tag

use std::any::Any;

use serde_json::{Map, Value, json};

use super::{arguments, expect_end};
use crate::context::Context;
use crate::error::{ParseError, RenderError};
use crate::node::{Node, NodeList, render_nodes};
use crate::parser::{Token, TokenParser, until};
use crate::variable::Variable;

const USAGE: &str = "{% for item in items %}";

/// Renders its body once per element of an array
///
/// Each iteration runs in a fresh scope binding the loop variable and
/// `forloop.counter`, `forloop.first`, `forloop.last`. A missing, null,
/// non-array or empty iterable renders the `empty` branch instead.
#[derive(Debug)]
pub struct ForNode {
    variable: Variable,
    loop_variable: String,
    nodes: NodeList,
    empty_nodes: NodeList,
}

impl ForNode {
    /// Parse `{% for x in xs %}`, its body, an optional `{% empty %}` branch
    /// and the closing `{% endfor %}`
    pub fn parse(parser: &mut TokenParser, token: &Token) -> Result<Box<dyn Node>, ParseError> {
        let args = arguments(token, 3, USAGE)?;
        if args[1] != "in" {
            return Err(ParseError::syntax("for", format!("expected `in`, found `{}`; usage: {USAGE}", args[1])));
        }

        let nodes = parser.parse_until(until(["endfor", "empty"]))?;
        let mut empty_nodes = NodeList::new();

        if parser.peek_token().and_then(Token::tag_name) == Some("empty") {
            parser.next_token();
            empty_nodes = parser.parse_until(until(["endfor"]))?;
        }
        expect_end(parser, "for", "endfor")?;

        Ok(Box::new(Self {
            variable: Variable::new(&args[2]),
            loop_variable: args[0].clone(),
            nodes,
            empty_nodes,
        }))
    }

    /// The iterated variable
    #[must_use]
    pub const fn variable(&self) -> &Variable {
        &self.variable
    }

    /// Name bound to each element
    #[must_use]
    pub fn loop_variable(&self) -> &str {
        &self.loop_variable
    }

    /// Loop body
    #[must_use]
    pub fn nodes(&self) -> &[Box<dyn Node>] {
        &self.nodes
    }

    /// Nodes rendered when there is nothing to iterate
    #[must_use]
    pub fn empty_nodes(&self) -> &[Box<dyn Node>] {
        &self.empty_nodes
    }
}

impl Node for ForNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        let items = match self.variable.resolve(context) {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return render_nodes(&self.empty_nodes, context),
        };

        let count = items.len();
        let mut output = String::new();
        for (index, item) in items.into_iter().enumerate() {
            let mut scope = Map::new();
            scope.insert(self.loop_variable.clone(), item);
            scope.insert(
                "forloop".to_string(),
                json!({
                    "counter": index + 1,
                    "first": index == 0,
                    "last": index + 1 == count,
                }),
            );

            context.push(scope);
            let rendered = render_nodes(&self.nodes, context);
            context.pop();
            output.push_str(&rendered?);
        }
        Ok(output)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
