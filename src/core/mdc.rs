//! Mapped diagnostic context
//!
//! This module provides:
//! - `Mdc`: ordered key-value fields rendered as a prefix on every log line
//! - `MdcGuard`: RAII guard for a scoped MDC field

use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered string fields prepended to every rendered log line.
///
/// Keys render in the order they were first inserted; overwriting a key
/// keeps its position. The rendered prefix is cached and recomputed only
/// after a mutation.
///
/// # Example
///
/// ```
/// use loki_batch_logger::Mdc;
///
/// let mut mdc = Mdc::new();
/// mdc.set("request_id", "abc");
/// mdc.set("user", "42");
/// assert_eq!(mdc.format_prefix(), "request_id=abc user=42 ");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mdc {
    fields: Vec<(String, String)>,
    cached_prefix: Option<String>,
}

impl Mdc {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            cached_prefix: None,
        }
    }

    /// Insert or overwrite a field
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.cached_prefix = None;
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Remove a field; missing keys are ignored
    pub fn delete(&mut self, key: &str) {
        self.cached_prefix = None;
        self.fields.retain(|(k, _)| k != key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove all fields
    pub fn clear(&mut self) {
        self.cached_prefix = None;
        self.fields.clear();
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in render order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render `key=value ` for every field, each pair followed by one space
    pub fn format_prefix(&mut self) -> String {
        if let Some(ref prefix) = self.cached_prefix {
            return prefix.clone();
        }

        let mut prefix = String::new();
        for (key, value) in &self.fields {
            prefix.push_str(key);
            prefix.push('=');
            prefix.push_str(value);
            prefix.push(' ');
        }
        self.cached_prefix = Some(prefix.clone());
        prefix
    }

    #[cfg(test)]
    fn is_cached(&self) -> bool {
        self.cached_prefix.is_some()
    }
}

impl<K, V> FromIterator<(K, V)> for Mdc
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mdc = Mdc::new();
        for (key, value) in iter {
            mdc.set(key, value);
        }
        mdc
    }
}

/// RAII guard for a scoped MDC field
///
/// When dropped, removes its key from the logger's MDC.
///
/// # Example
///
/// ```ignore
/// {
///     let _guard = logger.mdc_scope("request_id", "abc-123");
///     logger.info("Processing request"); // request_id=abc-123 level=info ...
/// }
/// // request_id removed here
/// ```
pub struct MdcGuard {
    mdc: Arc<Mutex<Mdc>>,
    key: String,
}

impl MdcGuard {
    pub(crate) fn new(mdc: Arc<Mutex<Mdc>>, key: String) -> Self {
        Self { mdc, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for MdcGuard {
    fn drop(&mut self) {
        self.mdc.lock().delete(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prefix() {
        let mut mdc = Mdc::new();
        assert!(mdc.is_empty());
        assert_eq!(mdc.format_prefix(), "");
    }

    #[test]
    fn test_prefix_in_insertion_order() {
        let mut mdc = Mdc::new();
        mdc.set("b", "2");
        mdc.set("a", "1");
        assert_eq!(mdc.format_prefix(), "b=2 a=1 ");
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut mdc = Mdc::new();
        mdc.set("first", "1");
        mdc.set("second", "2");
        mdc.set("first", "one");
        assert_eq!(mdc.len(), 2);
        assert_eq!(mdc.format_prefix(), "first=one second=2 ");
    }

    #[test]
    fn test_get_and_delete() {
        let mut mdc = Mdc::new();
        mdc.set("request_id", "abc");
        assert_eq!(mdc.get("request_id"), Some("abc"));
        assert_eq!(mdc.get("missing"), None);

        mdc.delete("request_id");
        mdc.delete("missing");
        assert_eq!(mdc.get("request_id"), None);
        assert_eq!(mdc.format_prefix(), "");
    }

    #[test]
    fn test_mutation_invalidates_cache() {
        let mut mdc = Mdc::new();
        mdc.set("a", "1");
        assert_eq!(mdc.format_prefix(), "a=1 ");
        assert!(mdc.is_cached());

        mdc.set("b", "2");
        assert!(!mdc.is_cached());
        assert_eq!(mdc.format_prefix(), "a=1 b=2 ");

        mdc.delete("a");
        assert!(!mdc.is_cached());
        assert_eq!(mdc.format_prefix(), "b=2 ");

        mdc.clear();
        assert!(!mdc.is_cached());
        assert_eq!(mdc.format_prefix(), "");
    }

    #[test]
    fn test_repeated_format_is_stable() {
        let mut mdc: Mdc = vec![("env", "prod"), ("region", "eu")].into_iter().collect();
        let first = mdc.format_prefix();
        let second = mdc.format_prefix();
        assert_eq!(first, second);
        assert_eq!(first, "env=prod region=eu ");
    }

    #[test]
    fn test_guard_removes_key() {
        let mdc = Arc::new(Mutex::new(Mdc::new()));
        mdc.lock().set("service", "api");
        mdc.lock().set("request_id", "r-1");
        {
            let guard = MdcGuard::new(Arc::clone(&mdc), "request_id".to_string());
            assert_eq!(guard.key(), "request_id");
            assert_eq!(mdc.lock().get("request_id"), Some("r-1"));
        }
        assert_eq!(mdc.lock().get("request_id"), None);
        assert_eq!(mdc.lock().format_prefix(), "service=api ");
    }
}
