use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

/// Committed answer for one question
///
/// Serialized untagged: a scalar answer is a bare JSON string and a list
/// answer is a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum AnswerValue {
    Scalar(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Render the answer back into editable draft text.
    /// Lists are joined with ", ".
    pub fn to_draft(&self) -> String {
        match self {
            AnswerValue::Scalar(text) => text.clone(),
            AnswerValue::List(items) => items.join(", "),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, AnswerValue::List(_))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Scalar(text) => text.is_empty(),
            AnswerValue::List(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_draft())
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Scalar(value.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        AnswerValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Committed answers keyed by question key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.0.get(key)
    }

    /// Store an answer, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: AnswerValue) -> Option<AnswerValue> {
        self.0.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    /// Draft text for a stored answer, or an empty string when none is stored
    pub fn draft_for(&self, key: &str) -> String {
        self.get(key).map(AnswerValue::to_draft).unwrap_or_default()
    }

    /// Get JSON schema for this type
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(AnswerSet);
        serde_json::to_value(&schema).unwrap_or_default()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AnswerSet {
    type Item = (String, AnswerValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
