//! Render context
//!
//! A [`Context`] is a stack of variable scopes. Lookups walk from the
//! innermost scope outwards; writes go to the innermost scope. Loop tags push
//! a scope per iteration and pop it afterwards.

use std::rc::Rc;

use serde_json::{Map, Value};

use crate::error::TemplateError;
use crate::loader::TemplateLoader;

/// Variables available while rendering
#[derive(Debug, Clone)]
pub struct Context {
    scopes: Vec<Map<String, Value>>,
    loader: Option<Rc<TemplateLoader>>,
    includes: Vec<String>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create an empty context with a single root scope
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![Map::new()],
            loader: None,
            includes: Vec::new(),
        }
    }

    /// Create a context whose root scope is the given JSON object
    pub fn from_value(value: Value) -> Result<Self, TemplateError> {
        match value {
            Value::Object(map) => Ok(Self {
                scopes: vec![map],
                loader: None,
                includes: Vec::new(),
            }),
            Value::Null => Err(TemplateError::InvalidContext("null")),
            Value::Bool(_) => Err(TemplateError::InvalidContext("a boolean")),
            Value::Number(_) => Err(TemplateError::InvalidContext("a number")),
            Value::String(_) => Err(TemplateError::InvalidContext("a string")),
            Value::Array(_) => Err(TemplateError::InvalidContext("an array")),
        }
    }

    /// Attach a loader used by `include`
    #[must_use]
    pub fn with_loader(mut self, loader: TemplateLoader) -> Self {
        self.loader = Some(Rc::new(loader));
        self
    }

    /// The attached loader, if any
    #[must_use]
    pub fn loader(&self) -> Option<Rc<TemplateLoader>> {
        self.loader.clone()
    }

    /// Look up a top-level name, innermost scope first
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Bind a name in the innermost scope
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value.into());
        }
    }

    /// Push a new innermost scope
    pub fn push(&mut self, scope: Map<String, Value>) {
        self.scopes.push(scope);
    }

    /// Pop the innermost scope
    ///
    /// The root scope is never removed; popping it returns `None`.
    pub fn pop(&mut self) -> Option<Map<String, Value>> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Number of scopes, root included
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Names of the templates currently being included, outermost first
    #[must_use]
    pub fn include_chain(&self) -> &[String] {
        &self.includes
    }

    /// Record that `name` is being included
    pub fn push_include(&mut self, name: impl Into<String>) {
        self.includes.push(name.into());
    }

    /// Leave the innermost include
    pub fn pop_include(&mut self) -> Option<String> {
        self.includes.pop()
    }
}
