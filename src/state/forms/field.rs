//! Field value map for the form being edited

use std::collections::HashMap;

/// Raw string values keyed by field name.
///
/// File fields hold the chosen file's display name, never its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Present and non-empty
    pub fn is_filled(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_empty())
    }

    /// Overwrite or insert the raw value
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Append a character to the value
    pub fn push_char(&mut self, name: &str, c: char) {
        self.values.entry(name.to_string()).or_default().push(c);
    }

    /// Remove the last character from the value
    pub fn pop_char(&mut self, name: &str) {
        if let Some(value) = self.values.get_mut(name) {
            value.pop();
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
