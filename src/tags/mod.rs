//! Built-in tags
//!
//! Every built-in is an ordinary [`TagParser`](crate::parser::TagParser):
//! the token parser knows nothing about their semantics.
//!
//! | Tag       | Form                                                   |
//! |-----------|--------------------------------------------------------|
//! | `for`     | `{% for x in xs %}…{% empty %}…{% endfor %}`           |
//! | `if`      | `{% if x %}…{% else %}…{% endif %}`                    |
//! | `ifnot`   | `{% ifnot x %}…{% else %}…{% endif %}`                 |
//! | `now`     | `{% now %}` or `{% now "%Y-%m-%d" %}`                  |
//! | `include` | `{% include "name.html" %}`                            |

mod for_node;
mod if_node;
mod include;
mod now;

pub use for_node::ForNode;
pub use if_node::IfNode;
pub use include::IncludeNode;
pub use now::{DEFAULT_FORMAT, NowNode};

use crate::error::ParseError;
use crate::parser::{Token, TokenParser};

/// Register the built-in tags on a parser
pub fn register_builtins(parser: &mut TokenParser) {
    parser.register_tag("for", ForNode::parse);
    parser.register_tag("if", IfNode::parse);
    parser.register_tag("ifnot", IfNode::parse_ifnot);
    parser.register_tag("now", NowNode::parse);
    parser.register_tag("include", IncludeNode::parse);
}

/// Consume the next token, which must be the block tag `expected`
///
/// Returns the consumed token. An empty queue or any other token is reported
/// as a missing end tag for `tag`.
pub fn expect_end(parser: &mut TokenParser, tag: &str, expected: &str) -> Result<Token, ParseError> {
    match parser.next_token() {
        Some(token) if token.tag_name() == Some(expected) => Ok(token),
        Some(token) => {
            // Leave the stray token for the enclosing scope to report
            parser.prepend_token(token);
            Err(ParseError::missing_end(tag, expected))
        },
        None => Err(ParseError::missing_end(tag, expected)),
    }
}

/// Split a block token into its tag name and arguments, checking the count
fn arguments(token: &Token, expected: usize, usage: &str) -> Result<Vec<String>, ParseError> {
    let mut components = token.components();
    let tag = if components.is_empty() {
        String::new()
    } else {
        components.remove(0)
    };

    if components.len() == expected {
        Ok(components)
    } else {
        Err(ParseError::syntax(
            tag,
            format!("expected {expected} argument(s), found {}; usage: {usage}", components.len()),
        ))
    }
}
