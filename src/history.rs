use std::{fmt::Display, ops::Deref};

use serde::Serialize;

/// Append-only, insertion-ordered log of transaction records.
///
/// Only the owning account can append; callers get a read-only view through
/// [`Deref`] to `[String]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<String>,
}

impl History {
    pub(crate) fn record(&mut self, entry: impl Display) {
        self.records.push(entry.to_string());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.records
    }
}

impl Deref for History {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
