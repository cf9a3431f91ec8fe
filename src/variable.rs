//! Variable expressions and value helpers

use serde_json::Value;

use crate::context::Context;

/// A variable expression such as `user.name`, `items.0` or `"literal"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    expression: String,
}

impl Variable {
    /// Create a variable from its source expression
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into().trim().to_string(),
        }
    }

    /// The source expression
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The literal value if the expression is quoted
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        let e = self.expression.as_str();
        if e.len() >= 2
            && ((e.starts_with('"') && e.ends_with('"')) || (e.starts_with('\'') && e.ends_with('\'')))
        {
            Some(&e[1..e.len() - 1])
        } else {
            None
        }
    }

    /// Resolve against a context
    ///
    /// Each dotted segment after the first indexes into the previous value:
    /// object keys, array indices, or the pseudo-keys `first`, `last` (arrays)
    /// and a trailing `count` (arrays, objects, strings).
    #[must_use]
    pub fn resolve(&self, context: &Context) -> Option<Value> {
        if let Some(literal) = self.literal() {
            return Some(Value::String(literal.to_string()));
        }

        let mut segments = self.expression.split('.').peekable();
        let mut current = context.get(segments.next()?)?;

        while let Some(segment) = segments.next() {
            match lookup(current, segment) {
                Some(next) => current = next,
                None if segment == "count" && segments.peek().is_none() => return count(current),
                None => return None,
            }
        }
        Some(current.clone())
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

fn lookup<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => match segment {
            "first" => items.first(),
            "last" => items.last(),
            _ => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        },
        _ => None,
    }
}

fn count(value: &Value) -> Option<Value> {
    let len = match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::String(s) => s.chars().count(),
        _ => return None,
    };
    Some(Value::from(len))
}

/// Render a value as template output
///
/// Strings are emitted verbatim, `null` as nothing, everything else as JSON.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Template truthiness
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
