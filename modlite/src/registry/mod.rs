//! Module registry and lifecycle driver.
//!
//! ## Architecture
//!
//! The registry owns one fixed-size table of records, indexed by `ModuleId`,
//! and drives three operations over it:
//!
//! ```text
//! register / add_dependency      (populate the table)
//!          │
//!          ▼
//! setup    (each module declares its own dependencies)
//!          │
//!          ▼
//! init     (depth-first dependency resolution, transactional per
//!          │ top-level call: commit on success, rollback on failure)
//!          ▼
//! exit     (dependent-first cascade, exact reverse of init order)
//! ```
//!
//! This module holds registration, setup, and status queries; the recursive
//! init and exit drivers live in `init` and `lifecycle`.

mod init;
mod lifecycle;

pub use init::{InitReport, ModuleOutcome};

use serde::{Deserialize, Serialize};

use crate::module::record::{ModuleRecord, StatusFlags};
use crate::module::{Module, ModuleId};

/// Owns every module record and sequences their lifecycle.
///
/// Constructed empty, populated by [`register`](Registry::register) and
/// dependency declarations, driven through setup/init/exit, and torn down as
/// a unit on drop. Single-threaded by design: registration, init, and exit
/// must all happen on the thread that owns the registry.
pub struct Registry {
    records: [ModuleRecord; ModuleId::COUNT],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            records: std::array::from_fn(|_| ModuleRecord::default()),
        }
    }

    /// Register a module under its id.
    ///
    /// Stores the module's hooks and marks the id registered. Dependencies
    /// declared for the id beforehand are kept.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already registered. Double registration is a
    /// programming error, not a runtime condition.
    pub fn register(&mut self, id: ModuleId, module: Box<dyn Module>) {
        let record = self.record_mut(id);
        assert!(
            !record.is_registered(),
            "module {id} is already registered"
        );

        record.module = Some(module);
        record.status.insert(StatusFlags::REGISTERED);

        tracing::debug!(module = %id, "registered module");
    }

    /// Declare that `id` cannot initialize until `depends_on` has.
    ///
    /// May be called repeatedly, before or after registration. No cycle or
    /// self-reference check happens here; cycles are caught when `init` walks
    /// the graph. Declaring a dependency after `id` is already initialized
    /// does not re-validate the existing initialization.
    pub fn add_dependency(&mut self, id: ModuleId, depends_on: ModuleId) {
        self.record_mut(id).deps.require(depends_on);
    }

    /// Declare a dependency that is brought up when possible but whose
    /// failure does not abort `id`'s initialization.
    pub fn add_optional_dependency(&mut self, id: ModuleId, depends_on: ModuleId) {
        self.record_mut(id).deps.require_optional(depends_on);
    }

    /// Run one module's setup hook.
    ///
    /// No-op for unregistered ids. The hook receives the module's own
    /// dependency declarations; repeated calls re-run the hook, which is
    /// harmless as long as the hook itself is.
    pub fn setup(&mut self, id: ModuleId) {
        let record = self.record_mut(id);
        if let Some(module) = record.module.as_mut() {
            module.setup(&mut record.deps);
        }
    }

    /// Run every module's setup hook, in canonical order.
    pub fn setup_all(&mut self) {
        for id in ModuleId::ALL {
            self.setup(id);
        }
    }

    /// Whether `id` has been registered.
    pub fn is_registered(&self, id: ModuleId) -> bool {
        self.record(id).is_registered()
    }

    /// Whether `id` is currently initialized.
    pub fn is_initialized(&self, id: ModuleId) -> bool {
        self.record(id).is_initialized()
    }

    /// Status view of one module.
    pub fn status(&self, id: ModuleId) -> ModuleStatus {
        let record = self.record(id);
        ModuleStatus {
            id,
            registered: record.is_registered(),
            initialized: record.is_initialized(),
        }
    }

    /// Status view of every module, in canonical order.
    pub fn snapshot(&self) -> Vec<ModuleStatus> {
        ModuleId::ALL.iter().map(|id| self.status(*id)).collect()
    }

    pub(crate) fn record(&self, id: ModuleId) -> &ModuleRecord {
        &self.records[id.index()]
    }

    pub(crate) fn record_mut(&mut self, id: ModuleId) -> &mut ModuleRecord {
        &mut self.records[id.index()]
    }

    pub(crate) fn records_mut(&mut self) -> &mut [ModuleRecord; ModuleId::COUNT] {
        &mut self.records
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let initialized: Vec<ModuleId> = ModuleId::ALL
            .into_iter()
            .filter(|id| self.is_initialized(*id))
            .collect();
        f.debug_struct("Registry")
            .field("initialized", &initialized)
            .finish()
    }
}

/// Externally visible status of one module record.
///
/// The rollback bookkeeping flag is deliberately absent: it is transient
/// state of an in-progress init attempt and never observable from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub id: ModuleId,
    pub registered: bool,
    pub initialized: bool,
}
