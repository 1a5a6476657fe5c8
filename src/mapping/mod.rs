//! Name table translating human-readable control names into button, axis
//! and stick descriptors.
//!
//! The table is immutable once built. [`MappingTable::builtin`] carries the
//! PS4, Xbox and generic presets and is shared by every state machine that
//! does not bring its own table.

mod presets;

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::sync::{Arc, LazyLock};

/// Semantic descriptor a control name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlMapping {
    /// A pressable control reporting `0.0..=1.0`.
    Button(usize),
    /// A single analog axis reporting `-1.0..=1.0`.
    Axis(usize),
    /// A named x/y axis pair. The index is informational; the axes are found
    /// through the `<name>_x` / `<name>_y` companion entries.
    Stick(usize),
}

impl ControlMapping {
    pub fn index(&self) -> usize {
        match self {
            ControlMapping::Button(index)
            | ControlMapping::Axis(index)
            | ControlMapping::Stick(index) => *index,
        }
    }
}

impl Display for ControlMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlMapping::Button(index) => write!(f, "button_{index}"),
            ControlMapping::Axis(index) => write!(f, "axis_{index}"),
            ControlMapping::Stick(index) => write!(f, "stick_{index}"),
        }
    }
}

static BUILTIN: LazyLock<Arc<MappingTable>> = LazyLock::new(|| {
    Arc::new(MappingTable::from_entries(
        presets::PS4
            .iter()
            .chain(presets::XBOX)
            .chain(presets::GENERIC)
            .copied(),
    ))
});

/// Immutable dictionary from control name to [`ControlMapping`].
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<String, ControlMapping>,
}

impl MappingTable {
    /// The shared table with the PS4, Xbox and generic presets.
    pub fn builtin() -> Arc<MappingTable> {
        Arc::clone(&BUILTIN)
    }

    /// Build a table from `(name, mapping)` pairs. Later duplicates win.
    pub fn from_entries<I, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, ControlMapping)>,
        N: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, mapping)| (name.into(), mapping))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<ControlMapping> {
        self.entries.get(name).copied()
    }

    /// Axis indices of the `<name>_x` / `<name>_y` companions.
    ///
    /// Returns `None` unless both companions exist and are axes.
    pub fn stick_axes(&self, name: &str) -> Option<(usize, usize)> {
        let x = self.get(&format!("{name}_x"))?;
        let y = self.get(&format!("{name}_y"))?;
        match (x, y) {
            (ControlMapping::Axis(x), ControlMapping::Axis(y)) => Some((x, y)),
            _ => None,
        }
    }

    /// All known control names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ControlMapping)> + '_ {
        self.entries
            .iter()
            .map(|(name, mapping)| (name.as_str(), *mapping))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
