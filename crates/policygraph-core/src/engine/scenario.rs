//! Scenario: one named realization of uncertain data at a stage.

use std::fmt;
use std::sync::Arc;

/// An immutable, named wrapper around an opaque data payload.
///
/// The payload is never inspected by the graph. Names only need to be unique
/// among the scenarios of a single node; they become part of the node's
/// composite labels (`"{node}_{scenario}"`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario<D> {
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_helpers::serde_arc_str"))]
    name: Arc<str>,
    data: D,
}

impl<D> Scenario<D> {
    pub fn new(name: impl Into<Arc<str>>, data: D) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn into_data(self) -> D {
        self.data
    }
}

impl<D> fmt::Display for Scenario<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
