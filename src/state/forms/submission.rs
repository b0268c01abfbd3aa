//! Submission payload

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field id to entered value, in field order.
///
/// Only [`FormState::submit`](super::FormState::submit) builds one, after
/// every field passed its rules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionResult {
    entries: Vec<(String, String)>,
}

impl SubmissionResult {
    pub(super) fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for SubmissionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
