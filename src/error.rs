//! Error types for parsing, rendering and loading templates

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning tokens into nodes
///
/// The parse loop itself never produces these except for
/// [`ParseError::UnknownTag`] in strict mode; everything else comes from
/// tag callbacks and is propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed directive arguments
    #[error("`{tag}` tag: {message}")]
    Syntax {
        /// Tag that rejected its arguments
        tag: String,
        /// What was wrong
        message: String,
    },

    /// A block tag's closing tag was never found
    #[error("`{tag}` tag was not closed; expected `{expected}`")]
    MissingEndTag {
        /// The opening tag
        tag: String,
        /// The closing tag that was expected
        expected: String,
    },

    /// A block tag with no registered parser (strict mode only)
    #[error("unknown tag `{0}`")]
    UnknownTag(String),
}

impl ParseError {
    /// Build a syntax error for `tag`
    #[must_use]
    pub fn syntax(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Syntax {
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// Build a missing end tag error
    #[must_use]
    pub fn missing_end(tag: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::MissingEndTag {
            tag: tag.into(),
            expected: expected.into(),
        }
    }
}

/// Errors raised while rendering nodes against a context
#[derive(Debug, Error)]
pub enum RenderError {
    /// A simple tag handler failed
    #[error("{0}")]
    Handler(String),

    /// A `now` format string could not be applied
    #[error("invalid date format `{0}`")]
    InvalidFormat(String),

    /// `include` was rendered without a loader in the context
    #[error("cannot include `{0}`: no template loader in context")]
    MissingLoader(String),

    /// A template included itself, directly or through other includes
    #[error("recursive include of `{name}` (via {})", chain.join(" -> "))]
    RecursiveInclude {
        /// Template that was already being rendered
        name: String,
        /// Include names from the outermost inward
        chain: Vec<String>,
    },

    /// An included template failed to load or render
    #[error("failed to include `{name}`: {source}")]
    Include {
        /// Name of the included template
        name: String,
        /// Underlying failure
        #[source]
        source: Box<TemplateError>,
    },
}

/// Errors for the template facade and loader
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Parsing failed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Rendering failed
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// No template directory contained the requested file
    #[error("template `{name}` not found (searched {} director{})", searched.len(), if searched.len() == 1 { "y" } else { "ies" })]
    NotFound {
        /// Requested template name
        name: String,
        /// Directories that were searched
        searched: Vec<PathBuf>,
    },

    /// Template name is absolute or climbs out of the search directories
    #[error("invalid template name `{0}`: must be relative and stay inside the template directories")]
    InvalidName(String),

    /// Reading a template file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A context was built from a non-object value
    #[error("context root must be an object, found {0}")]
    InvalidContext(&'static str),
}
