use std::collections::BTreeSet;

use serde::Serialize;

use jobboard_core::ValueObject;

/// Distinct, non-empty locations of approved postings.
///
/// Ordered ascending (byte-wise), whichever store produced the values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocationSet(BTreeSet<String>);

impl ValueObject for LocationSet {}

impl LocationSet {
    /// Collect the bare `location` column of a distinct projection, dropping
    /// absent and empty values.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        Self(rows.into_iter().flatten().filter(|l| !l.is_empty()).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.0.contains(location)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for LocationSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
