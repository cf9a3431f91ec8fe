//! `include` tag: render another template in place

use std::any::Any;

use super::arguments;
use crate::context::Context;
use crate::error::{ParseError, RenderError};
use crate::node::Node;
use crate::parser::{Token, TokenParser};
use crate::variable::{Variable, stringify};

/// Loads and renders a template through the context's loader
///
/// The included template sees the same context as the including one. A
/// template that is already being included further up is rejected instead of
/// rendered again.
#[derive(Debug, Clone)]
pub struct IncludeNode {
    template_name: Variable,
}

impl IncludeNode {
    /// Parse `{% include "name" %}` or `{% include variable %}`
    pub fn parse(_parser: &mut TokenParser, token: &Token) -> Result<Box<dyn Node>, ParseError> {
        let args = arguments(token, 1, "{% include \"template.html\" %}")?;
        Ok(Box::new(Self {
            template_name: Variable::new(&args[0]),
        }))
    }

    /// The template name expression
    #[must_use]
    pub const fn template_name(&self) -> &Variable {
        &self.template_name
    }
}

impl Node for IncludeNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        let name = self
            .template_name
            .resolve(context)
            .map(|value| stringify(&value))
            .unwrap_or_default();

        let Some(loader) = context.loader() else {
            return Err(RenderError::MissingLoader(name));
        };

        if context.include_chain().contains(&name) {
            return Err(RenderError::RecursiveInclude {
                chain: context.include_chain().to_vec(),
                name,
            });
        }

        log::debug!("including `{name}`");
        let template = loader.load(&name).map_err(|e| RenderError::Include {
            name: name.clone(),
            source: Box::new(e),
        })?;

        context.push_include(name);
        let rendered = template.render(context);
        context.pop_include();
        rendered
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
