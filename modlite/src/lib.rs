//! Deterministic subsystem lifecycle registry.
//!
//! modlite owns a fixed table of module records, one per [`ModuleId`], and
//! sequences their lifecycle: dependency-ordered initialization, reverse
//! dependency-ordered teardown, and atomic rollback of a failed bring-up.
//!
//! ## Architecture
//!
//! ```text
//!            register / add_dependency
//!                       │
//!                       ▼
//!  ┌─────────────────────────────────────────────┐
//!  │  Registry (fixed table, one slot per id)    │
//!  │   slot = Box<dyn Module> + deps + status    │
//!  └─────────────────────────────────────────────┘
//!      │           │                    │
//!      ▼           ▼                    ▼
//!   setup(id)   init(id)             exit(id)
//!   declare     depth-first deps,    dependent-first
//!   own deps    commit or rollback   cascade
//! ```
//!
//! A top-level [`Registry::init`] is transactional: everything it newly
//! brings up is either committed together or exited again together. Bulk
//! bring-up via [`Registry::init_all`] is best-effort and reports per-module
//! outcomes.
//!
//! ## Example
//!
//! ```
//! use modlite::{Dependencies, Module, ModuleId, Registry};
//!
//! struct Clock;
//!
//! impl Module for Clock {
//!     fn setup(&mut self, deps: &mut Dependencies) {
//!         deps.require(ModuleId::Memory);
//!     }
//!     fn init(&mut self) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//!     fn exit(&mut self) {}
//! }
//!
//! struct Memory;
//!
//! impl Module for Memory {
//!     fn init(&mut self) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//!     fn exit(&mut self) {}
//! }
//!
//! let mut registry = Registry::new();
//! registry.register(ModuleId::Memory, Box::new(Memory));
//! registry.register(ModuleId::Clock, Box::new(Clock));
//! registry.setup_all();
//!
//! registry.init(ModuleId::Clock)?;
//! assert!(registry.is_initialized(ModuleId::Memory));
//!
//! registry.exit_all();
//! # Ok::<(), modlite::ModliteError>(())
//! ```
//!
//! The registry is single-threaded and synchronous: hooks run to completion
//! on the calling thread, and there is no internal locking or scheduling.

pub mod errors;
mod logging;
mod metrics;
mod module;
mod registry;

#[cfg(test)]
pub(crate) mod testutil;

pub use errors::{ModliteError, ModliteResult};
pub use logging::init_logging;
pub use metrics::{InitMetrics, ModuleInitMetrics};
pub use module::{Dependencies, DependencyIter, DependencySet, Module, ModuleId};
pub use registry::{InitReport, ModuleOutcome, ModuleStatus, Registry};
