#![forbid(unsafe_code)]

//! Variable store boundary.
//!
//! The console keeps UI state in a flat string-keyed store: the current
//! path, the sort code, and the variables a selector publishes its result
//! to. Widgets read and write through [`VariableStore`]; the console owns
//! the store and tells widgets about changes.

use std::collections::HashMap;

/// Key-value store shared between widgets.
pub trait VariableStore {
    /// Read a variable. Missing variables read as the empty string.
    fn get(&self, name: &str) -> String;

    /// Write a variable.
    fn set(&mut self, name: &str, value: &str);

    /// Root of the currently selected storage device.
    fn storage_root(&self) -> String;
}

/// In-memory [`VariableStore`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    storage_root: String,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryStore {
    /// Create an empty store with the given storage root.
    #[must_use]
    pub fn new(storage_root: impl Into<String>) -> Self {
        Self {
            values: HashMap::new(),
            storage_root: storage_root.into(),
        }
    }

    /// Set a variable (builder form).
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Change the storage root.
    pub fn set_storage_root(&mut self, root: impl Into<String>) {
        self.storage_root = root.into();
    }

    /// Whether a variable has ever been written.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

impl VariableStore for MemoryStore {
    fn get(&self, name: &str) -> String {
        self.values.get(name).cloned().unwrap_or_default()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_owned(), value.to_owned());
    }

    fn storage_root(&self) -> String {
        self.storage_root.clone()
    }
}

/// A piece of a header template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Var(&'a str),
}

/// Split `template` into literal text and `%name%` references.
///
/// `%%` is a literal percent sign. An unterminated `%` is literal text.
fn tokens(template: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('%') {
        if start > 0 {
            out.push(Token::Text(&rest[..start]));
        }
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(0) => {
                out.push(Token::Text("%"));
                rest = &after[1..];
            }
            Some(end) => {
                out.push(Token::Var(&after[..end]));
                rest = &after[end + 1..];
            }
            None => {
                out.push(Token::Text(&rest[start..]));
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        out.push(Token::Text(rest));
    }
    out
}

/// Whether `template` references any variable.
///
/// Templates without references can be expanded once and cached.
#[must_use]
pub fn is_template(template: &str) -> bool {
    tokens(template)
        .iter()
        .any(|token| matches!(token, Token::Var(_)))
}

/// Replace every `%name%` in `template` with the variable's value.
#[must_use]
pub fn expand<V: VariableStore + ?Sized>(template: &str, vars: &V) -> String {
    let mut out = String::with_capacity(template.len());
    for token in tokens(template) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Var(name) => out.push_str(&vars.get(name)),
        }
    }
    out
}
