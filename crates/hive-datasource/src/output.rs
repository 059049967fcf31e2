//! Output objects produced by operations and the caller's storage slots.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of an output object, e.g. [`OutputObjectName::COUNT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputObjectName(String);

impl OutputObjectName {
    /// Reserved name of the scalar count result.
    pub const COUNT: &'static str = "count";
    /// Reserved name of the patient list result.
    pub const PATIENT_LIST: &'static str = "patientList";

    /// Creates an output object name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The scalar count output.
    #[must_use]
    pub fn count() -> Self {
        Self::new(Self::COUNT)
    }

    /// The patient list output.
    #[must_use]
    pub fn patient_list() -> Self {
        Self::new(Self::PATIENT_LIST)
    }

    /// Name as text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OutputObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for OutputObjectName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OutputObjectName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Caller-tracked identifier of the slot an output object is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedId(String);

impl SharedId {
    /// Creates a shared identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SharedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SharedId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Named result artifact produced by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputObject {
    /// Output object name.
    pub name: OutputObjectName,
    /// Slot the caller stores this object under.
    pub shared_id: SharedId,
    /// Serialised object contents.
    pub data: Vec<u8>,
}

/// Mapping from output object name to the caller's shared identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputSharedIds(HashMap<OutputObjectName, SharedId>);

impl OutputSharedIds {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the shared identifier for `name`, returning any previous one.
    pub fn insert(
        &mut self,
        name: impl Into<OutputObjectName>,
        id: impl Into<SharedId>,
    ) -> Option<SharedId> {
        self.0.insert(name.into(), id.into())
    }

    /// Shared identifier recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SharedId> {
        self.0.get(name)
    }

    /// Builds the output object for `name`, when the caller supplied a slot
    /// for it.
    #[must_use]
    pub fn output(&self, name: &str, data: Vec<u8>) -> Option<OutputObject> {
        self.get(name).map(|shared_id| OutputObject {
            name: OutputObjectName::new(name),
            shared_id: shared_id.clone(),
            data,
        })
    }

    /// Iterates over the recorded names and identifiers.
    pub fn iter(&self) -> impl Iterator<Item = (&OutputObjectName, &SharedId)> {
        self.0.iter()
    }

    /// Number of recorded slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no slots were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N, I> FromIterator<(N, I)> for OutputSharedIds
where
    N: Into<OutputObjectName>,
    I: Into<SharedId>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, id)| (name.into(), id.into()))
                .collect(),
        )
    }
}
