//! Filesystem template loader
//!
//! Looks template names up in an ordered list of directories; the first
//! directory containing the file wins. Names are relative paths that must
//! stay inside the search directories.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::ParserOptions;
use crate::error::TemplateError;
use crate::template::Template;

/// Loads templates by name from a list of directories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateLoader {
    paths: Vec<PathBuf>,
    options: ParserOptions,
}

impl TemplateLoader {
    /// Create a loader searching `paths` in order
    #[must_use]
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            options: ParserOptions::default(),
        }
    }

    /// Set the parser options used for loaded templates
    #[must_use]
    pub const fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Search directories
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Find the file for a template name
    ///
    /// Names that are absolute or contain `..` never match.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        if !is_contained(name) {
            return None;
        }
        self.paths.iter().map(|dir| dir.join(name)).find(|path| path.is_file())
    }

    /// Load and parse a template by name
    pub fn load(&self, name: &str) -> Result<Template, TemplateError> {
        if !is_contained(name) {
            return Err(TemplateError::InvalidName(name.to_string()));
        }
        let path = self.find(name).ok_or_else(|| TemplateError::NotFound {
            name: name.to_string(),
            searched: self.paths.clone(),
        })?;
        log::debug!("loading template `{name}` from {}", path.display());
        self.load_path(&path).map(|template| template.named(name))
    }

    /// Load and parse a template from an explicit path
    pub fn load_path(&self, path: &Path) -> Result<Template, TemplateError> {
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Template::with_options(&source, self.options)?.named(path.display().to_string()))
    }
}

/// Whether joining `name` onto a directory stays inside it
fn is_contained(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}
