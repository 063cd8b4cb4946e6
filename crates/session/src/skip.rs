//! Skip-files bookkeeping

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// File names whose records a prior session attempt already delivered
///
/// Carried across reopen attempts (and across worker processes, hence the
/// serde derives) so a retry never re-parses data it already handed to the
/// writer. A file joins the set only when its last record has been read -
/// a file interrupted mid-read is refetched whole, which upsert semantics
/// make harmless.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkipFiles(BTreeSet<String>);

impl SkipFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `file` was fully delivered before
    pub fn contains(&self, file: &str) -> bool {
        self.0.contains(file)
    }

    /// Mark a file as fully delivered
    pub fn insert(&mut self, file: impl Into<String>) {
        let file = file.into();
        if !file.is_empty() {
            self.0.insert(file);
        }
    }

    /// Number of files recorded
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing was delivered yet
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate file names in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for SkipFiles {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().filter(|f| !f.is_empty()).collect())
    }
}
