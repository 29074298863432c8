//! In-memory model of a task's parameter descriptions.


use std::fmt;

use hashbrown::HashMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{diagnostics::Diagnostic, literal::LiteralValue};

/// Type tag of a parameter's value.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
pub enum DType {
    #[serde(rename = "str")]
    #[strum(serialize = "str")]
    Str,
    #[serde(rename = "bool")]
    #[strum(serialize = "bool")]
    Bool,
    #[serde(rename = "int")]
    #[strum(serialize = "int")]
    Int,
    #[serde(rename = "float")]
    #[strum(serialize = "float")]
    Float,
    #[serde(rename = "list")]
    #[strum(serialize = "list")]
    List,
    /// Reference to a measurement set.
    #[serde(rename = "MS")]
    #[strum(serialize = "MS")]
    MeasurementSet,
}

/// Description of a single task parameter.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    #[serde(default)]
    pub info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<LiteralValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtype: Option<DType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl ParameterDescriptor {
    /// Sets the default value, along with the type inferred from it.
    pub fn set_default(&mut self, value: LiteralValue) {
        self.dtype = Some(value.dtype());
        self.default = Some(value);
    }
}

/// Parameter descriptions of a task, keyed by parameter name, in the order that the parameters
/// were first declared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskDescription {
    entries: Vec<(String, ParameterDescriptor)>,
    index: HashMap<String, usize>,
}

impl TaskDescription {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.index.get(name).map(|&idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ParameterDescriptor> {
        self.index.get(name).map(|&idx| &mut self.entries[idx].1)
    }

    /// Returns the named entry, appending an empty one if it does not exist yet. An existing
    /// entry keeps its position.
    pub fn entry(&mut self, name: &str) -> &mut ParameterDescriptor {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries
                    .push((name.to_owned(), ParameterDescriptor::default()));
                self.index.insert(name.to_owned(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterDescriptor)> {
        self.entries.iter().map(|(name, param)| (name.as_str(), param))
    }
}

impl FromIterator<(String, ParameterDescriptor)> for TaskDescription {
    fn from_iter<T: IntoIterator<Item = (String, ParameterDescriptor)>>(iter: T) -> Self {
        let mut desc = Self::new();
        for (name, param) in iter {
            *desc.entry(&name) = param;
        }
        desc
    }
}

impl Serialize for TaskDescription {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, param) in &self.entries {
            map.serialize_entry(name, param)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TaskDescription {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TaskDescriptionVisitor)
    }
}

struct TaskDescriptionVisitor;

impl<'de> Visitor<'de> for TaskDescriptionVisitor {
    type Value = TaskDescription;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping from parameter name to parameter description")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut desc = TaskDescription::new();
        while let Some((name, param)) = access.next_entry::<String, ParameterDescriptor>()? {
            *desc.entry(&name) = param;
        }
        Ok(desc)
    }
}

/// Result of successfully parsing help text.
#[derive(Debug, Default, PartialEq)]
pub struct ParseOutcome {
    pub description: TaskDescription,
    /// Malformed lines that were skipped.
    pub diagnostics: Vec<Diagnostic>,
}
