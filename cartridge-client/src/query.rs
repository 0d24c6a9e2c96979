//! Path and query-string assembly
//!
//! Values are percent-encoded with `urlencoding`. Blank and absent values are
//! dropped so optional filters never reach the server as `key=`.

use std::fmt::Display;

/// Query string builder
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter; blank values are skipped
    pub fn push(&mut self, key: &str, value: impl AsRef<str>) -> &mut Self {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Add a parameter if present; blank values are skipped
    pub fn push_opt<V: AsRef<str>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    /// Add a parameter rendered with `Display` (numbers, bools, enums)
    pub fn push_display(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.push(key, value.to_string())
    }

    /// Add `page` and `size`
    pub fn page(&mut self, page: u32, size: u32) -> &mut Self {
        self.push_display("page", page).push_display("size", size)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// Encoded query string without the leading `?`
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Append this query to `path`
    pub fn to_path(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.encode())
        }
    }
}

/// Join a base path with one percent-encoded segment
pub fn segment(base: &str, value: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), urlencoding::encode(value))
}
