//! Output formatting for human and JSON modes
//!
//! Command results can be printed either as plain text or as pretty JSON
//! for scripting.

use serde::Serialize;

use crate::parser::Token;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of rendering a template
#[derive(Debug, Serialize)]
pub struct RenderResult {
    /// Template path as given
    pub template: String,
    /// Rendered text
    pub output: String,
}

/// Tokens produced by lexing a template
#[derive(Debug, Serialize)]
pub struct TokenListing {
    /// Template path as given
    pub template: String,
    /// Tokens in source order
    pub tokens: Vec<Token>,
}

/// Tags registered on a fresh parser
#[derive(Debug, Serialize)]
pub struct TagListing {
    /// Tag names, sorted
    pub tags: Vec<String>,
}

impl RenderResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            // Rendered text is printed verbatim, no trailing newline added
            OutputMode::Human => print!("{}", self.output),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

impl TokenListing {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }

    /// One line per token: kind, then the escaped payload
    #[must_use]
    pub fn to_human(&self) -> String {
        if self.tokens.is_empty() {
            return "No tokens.\n".to_string();
        }

        self.tokens
            .iter()
            .map(|token| format!("{:<9}{:?}\n", token.kind().as_str(), token.contents()))
            .collect()
    }
}

impl TagListing {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for tag in &self.tags {
                    println!("{tag}");
                }
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
