// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::error::{DataError, Result};

/// A static table keyed by three-letter region code.
///
/// Used for both code-to-flag-code and code-to-continent lookups. Keys are
/// stored uppercase and looked up in any case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    entries: HashMap<String, String>,
}

impl CodeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, code: &str, value: impl Into<String>) {
        self.entries.insert(code.trim().to_uppercase(), value.into());
    }

    /// Looks up `code` in any case.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .get(&code.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for CodeTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.insert(k.as_ref(), v);
        }
        table
    }
}

/// Parses a flat object of code keys to string values.
///
/// The text is read as JSON; a flat YAML mapping is accepted as a fallback.
/// Entries whose value is not a string are skipped with a warning.
pub fn parse_code_table(text: &str) -> Result<CodeTable> {
    let map = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(DataError::Shape("expected an object of codes".to_owned())),
        Err(json) => match serde_yaml::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            _ => return Err(json.into()),
        },
    };

    let mut table = CodeTable::new();
    for (code, value) in map {
        match value {
            Value::String(v) => table.insert(&code, v),
            other => warn!(%code, value = %other, "skipping non-string lookup entry"),
        }
    }
    Ok(table)
}
