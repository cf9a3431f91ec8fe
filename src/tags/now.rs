//! `now` tag: the current local date and time

use std::any::Any;
use std::fmt::Write;

use chrono::Local;

use crate::context::Context;
use crate::error::{ParseError, RenderError};
use crate::node::Node;
use crate::parser::{Token, TokenParser};
use crate::variable::{Variable, stringify};

/// Format used when `now` has no argument
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d at %H:%M";

/// Renders the current time with a `strftime` format
#[derive(Debug, Clone)]
pub struct NowNode {
    format: Variable,
}

impl NowNode {
    /// Parse `{% now %}` or `{% now format %}`
    ///
    /// The format is a quoted literal or a variable holding one.
    pub fn parse(_parser: &mut TokenParser, token: &Token) -> Result<Box<dyn Node>, ParseError> {
        let components = token.components();
        let format = match components.as_slice() {
            [_] => Variable::new(format!("\"{DEFAULT_FORMAT}\"")),
            [_, format] => Variable::new(format),
            _ => {
                return Err(ParseError::syntax(
                    "now",
                    "expected at most one argument; usage: {% now \"%Y-%m-%d\" %}",
                ));
            },
        };
        Ok(Box::new(Self { format }))
    }

    /// The format expression
    #[must_use]
    pub const fn format(&self) -> &Variable {
        &self.format
    }
}

impl Node for NowNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        let format = self
            .format
            .resolve(context)
            .map_or_else(|| DEFAULT_FORMAT.to_string(), |value| stringify(&value));

        let mut output = String::new();
        write!(output, "{}", Local::now().format(&format))
            .map_err(|_| RenderError::InvalidFormat(format.clone()))?;
        Ok(output)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
