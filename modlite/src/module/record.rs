//! Per-module bookkeeping records.

use bitflags::bitflags;

use crate::module::{Dependencies, Module};

bitflags! {
    /// Lifecycle status of one module record.
    ///
    /// `PENDING` marks a module initialized during the still-in-progress
    /// top-level init attempt; it is cleared on commit and drives rollback on
    /// failure. It is never observable once a top-level call has returned.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct StatusFlags: u32 {
        const REGISTERED  = 0x0000_0001;
        const INITIALIZED = 0x0000_0002;
        const PENDING     = 0x0001_0000;
    }
}

/// One registry slot, indexed by `ModuleId`.
///
/// An empty `module` slot means the id was never registered. Dependencies can
/// be declared before registration; `register` does not reset them.
#[derive(Default)]
pub(crate) struct ModuleRecord {
    pub(crate) module: Option<Box<dyn Module>>,
    pub(crate) deps: Dependencies,
    pub(crate) status: StatusFlags,
    /// Wall-clock time the init hook took, kept while the module stays up.
    pub(crate) init_duration_ms: Option<u128>,
}

impl ModuleRecord {
    pub(crate) fn is_registered(&self) -> bool {
        self.status.contains(StatusFlags::REGISTERED)
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.status.contains(StatusFlags::INITIALIZED)
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.status.contains(StatusFlags::PENDING)
    }
}

impl std::fmt::Debug for ModuleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRecord")
            .field("registered", &self.is_registered())
            .field("status", &self.status)
            .field("deps", &self.deps)
            .finish()
    }
}
