//! stencil - a token-stream template parser with pluggable block tags
//!
//! Template source is lexed into [`Token`](parser::Token)s, which a
//! [`TokenParser`](parser::TokenParser) turns into a tree of renderable
//! [`Node`](node::Node)s. Block tags (`for`, `if`, `include`, and anything
//! registered at runtime) are callbacks keyed by tag name; the parser itself
//! knows nothing about their semantics.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod context;
pub mod error;
pub mod lexer;
pub mod loader;
pub mod node;
pub mod output;
pub mod parser;
pub mod tags;
pub mod template;
pub mod variable;

pub use context::Context;
pub use error::{ParseError, RenderError, TemplateError};
pub use parser::{Token, TokenParser, until};
pub use template::Template;
