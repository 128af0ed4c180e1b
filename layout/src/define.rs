use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::Tally;

/// Where a fact was read from: project-relative path and 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Provenance {
    pub path: String,
    pub line: usize,
}

impl Provenance {
    pub fn new(path: impl Into<String>, line: usize) -> Self {
        Provenance {
            path: path.into(),
            line,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}:{}", self.path, self.line))
    }
}

impl Serialize for Provenance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A `#define NAME 0xVALUE` found in a header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub name: String,
    /// The literal exactly as written, case and width untouched.
    pub value: String,
    pub at: Provenance,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    HardwareIo,
    MemoryConstants,
    CpuRegisters,
}

/// Definitions grouped by category, every category present even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Definitions(IndexMap<Category, Vec<Definition>>);

impl Definitions {
    pub fn new() -> Self {
        Definitions(Category::iter().map(|c| (c, vec![])).collect())
    }

    pub fn push(&mut self, category: Category, def: Definition) {
        self.0.entry(category).or_default().push(def);
    }

    pub fn get(&self, category: Category) -> &[Definition] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn hardware_io(&self) -> &[Definition] {
        self.get(Category::HardwareIo)
    }
}

impl Default for Definitions {
    fn default() -> Self {
        Self::new()
    }
}

impl Tally for Definitions {
    fn tally(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}
