//! Module identities and dependency bit-sets.
//!
//! Every subsystem the registry can drive is a `ModuleId` variant. The set is
//! closed at compile time so a dependency set fits one `u64` and iteration
//! order (ascending id) is deterministic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a registrable subsystem.
///
/// Discriminants are stable and double as indices into the registry table and
/// bit positions in a [`DependencySet`]. Ascending discriminant order is the
/// canonical enumeration order used by `setup_all`/`init_all`/`exit_all`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    Memory,
    Clock,
    Config,
    Event,
    File,
    Locale,
    Resource,
    Object,
    Input,
    Display,
    Render,
    Physics,
    Audio,
    Network,
    Plugin,
    Profiler,
}

impl ModuleId {
    /// Number of module identities.
    pub const COUNT: usize = Self::ALL.len();

    /// Every identity, in canonical (ascending) order.
    pub const ALL: [ModuleId; 16] = [
        ModuleId::Memory,
        ModuleId::Clock,
        ModuleId::Config,
        ModuleId::Event,
        ModuleId::File,
        ModuleId::Locale,
        ModuleId::Resource,
        ModuleId::Object,
        ModuleId::Input,
        ModuleId::Display,
        ModuleId::Render,
        ModuleId::Physics,
        ModuleId::Audio,
        ModuleId::Network,
        ModuleId::Plugin,
        ModuleId::Profiler,
    ];

    /// Table index of this identity.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Identity for a table index, if in range.
    pub const fn from_index(index: usize) -> Option<ModuleId> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Lowercase name used in logs and serialized snapshots.
    pub const fn name(self) -> &'static str {
        match self {
            ModuleId::Memory => "memory",
            ModuleId::Clock => "clock",
            ModuleId::Config => "config",
            ModuleId::Event => "event",
            ModuleId::File => "file",
            ModuleId::Locale => "locale",
            ModuleId::Resource => "resource",
            ModuleId::Object => "object",
            ModuleId::Input => "input",
            ModuleId::Display => "display",
            ModuleId::Render => "render",
            ModuleId::Physics => "physics",
            ModuleId::Audio => "audio",
            ModuleId::Network => "network",
            ModuleId::Plugin => "plugin",
            ModuleId::Profiler => "profiler",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-width set of module identities.
///
/// One bit per [`ModuleId`]; iteration yields ids in ascending order, which
/// keeps dependency resolution deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencySet(u64);

// The id space must fit the bit width.
const _: () = assert!(ModuleId::COUNT <= DependencySet::CAPACITY);

impl DependencySet {
    /// Set with no members.
    pub const EMPTY: DependencySet = DependencySet(0);

    /// Maximum number of identities a set can hold.
    pub const CAPACITY: usize = u64::BITS as usize;

    pub fn insert(&mut self, id: ModuleId) {
        self.0 |= 1 << id.index();
    }

    pub fn remove(&mut self, id: ModuleId) {
        self.0 &= !(1 << id.index());
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.0 & (1 << id.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in ascending id order.
    pub fn iter(&self) -> DependencyIter {
        DependencyIter(self.0)
    }
}

impl IntoIterator for DependencySet {
    type Item = ModuleId;
    type IntoIter = DependencyIter;

    fn into_iter(self) -> DependencyIter {
        DependencyIter(self.0)
    }
}

impl FromIterator<ModuleId> for DependencySet {
    fn from_iter<I: IntoIterator<Item = ModuleId>>(iter: I) -> Self {
        let mut set = DependencySet::EMPTY;
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Ascending-order iterator over a [`DependencySet`].
#[derive(Debug, Clone)]
pub struct DependencyIter(u64);

impl Iterator for DependencyIter {
    type Item = ModuleId;

    fn next(&mut self) -> Option<ModuleId> {
        while self.0 != 0 {
            let index = self.0.trailing_zeros() as usize;
            self.0 &= self.0 - 1;
            if let Some(id) = ModuleId::from_index(index) {
                return Some(id);
            }
        }
        None
    }
}
