//! Recursive, rollback-capable initialization.
//!
//! A top-level `init` call is transactional: every module brought up while
//! resolving it is marked pending, and the set is either committed (pending
//! cleared) when the call succeeds or unwound dependent-first when it fails.
//! Modules committed by earlier successful calls are never touched by a later
//! rollback.

use std::time::Instant;

use crate::errors::{ModliteError, ModliteResult};
use crate::metrics::{InitMetrics, ModuleInitMetrics};
use crate::module::record::StatusFlags;
use crate::module::{DependencySet, ModuleId};
use crate::registry::Registry;

impl Registry {
    /// Initialize `id`, bringing its dependency closure up first.
    ///
    /// Required dependencies are resolved depth-first in ascending id order;
    /// optional dependencies are attempted after them with failures
    /// tolerated. Already-initialized modules are skipped, which is also how
    /// diamond-shaped graphs converge without double-initializing a shared
    /// dependency.
    ///
    /// On failure anywhere in the resolution, every module newly brought up
    /// by this call is exited again before the error is returned; modules
    /// initialized by earlier successful calls stay up.
    ///
    /// # Errors
    ///
    /// * [`ModliteError::NotRegistered`] if `id` (or a required dependency
    ///   reached through it) was never registered.
    /// * [`ModliteError::DependencyCycle`] if the required/optional graph
    ///   loops back into the current resolution path.
    /// * [`ModliteError::InitFailed`] if an init hook fails; `module` names
    ///   the hook that failed, which is `id` itself or a transitive
    ///   dependency.
    pub fn init(&mut self, id: ModuleId) -> ModliteResult<()> {
        let mut visiting = DependencySet::EMPTY;
        let result = self.init_inner(id, &mut visiting);

        // Back at the top level: commit or unwind this attempt.
        match &result {
            Ok(()) => self.commit(),
            Err(error) => self.rollback(error),
        }

        result
    }

    /// Initialize every module in canonical order, best effort.
    ///
    /// Individual failures are logged and recorded but do not stop the scan.
    /// The report counts as successful when at least one module ended up
    /// initialized; inspect the per-module outcomes to see which subsystems
    /// are actually usable.
    pub fn init_all(&mut self) -> InitReport {
        let total_start = Instant::now();
        let mut outcomes = Vec::with_capacity(ModuleId::COUNT);

        for id in ModuleId::ALL {
            let result = self.init(id);
            if let Err(error) = &result {
                tracing::warn!(module = %id, %error, "failed to initialize module");
            }
            outcomes.push(ModuleOutcome { id, result });
        }

        let metrics = self.collect_metrics(total_start.elapsed().as_millis());
        let report = InitReport { outcomes, metrics };

        if report.initialized_count() == 0 {
            tracing::warn!("no modules initialized");
        }

        report
    }

    /// Internal init: one node of the depth-first resolution.
    ///
    /// `visiting` tracks the current resolution path only; ids are removed on
    /// unwind so a failed or optional branch cannot poison later lookups.
    fn init_inner(&mut self, id: ModuleId, visiting: &mut DependencySet) -> ModliteResult<()> {
        let record = self.record(id);
        if !record.is_registered() {
            return Err(ModliteError::NotRegistered(id));
        }
        if record.is_initialized() {
            return Ok(());
        }
        if visiting.contains(id) {
            return Err(ModliteError::DependencyCycle(id));
        }

        visiting.insert(id);
        let result = self.init_dependencies_and_hook(id, visiting);
        visiting.remove(id);

        result
    }

    fn init_dependencies_and_hook(
        &mut self,
        id: ModuleId,
        visiting: &mut DependencySet,
    ) -> ModliteResult<()> {
        let required = self.record(id).deps.required();
        for dependency in required {
            if !self.is_initialized(dependency) {
                self.init_inner(dependency, visiting)?;
            }
        }

        let optional = self.record(id).deps.optional();
        for dependency in optional {
            if !self.is_initialized(dependency)
                && let Err(error) = self.init_inner(dependency, visiting)
            {
                tracing::debug!(
                    module = %id,
                    dependency = %dependency,
                    %error,
                    "optional dependency unavailable"
                );
            }
        }

        self.run_init_hook(id)
    }

    fn run_init_hook(&mut self, id: ModuleId) -> ModliteResult<()> {
        let started = Instant::now();
        let record = self.record_mut(id);
        let Some(module) = record.module.as_mut() else {
            return Err(ModliteError::NotRegistered(id));
        };

        match module.init() {
            Ok(()) => {
                record
                    .status
                    .insert(StatusFlags::INITIALIZED | StatusFlags::PENDING);
                record.init_duration_ms = Some(started.elapsed().as_millis());
                tracing::debug!(module = %id, "module initialized");
                Ok(())
            }
            Err(source) => {
                tracing::warn!(module = %id, error = %source, "module init hook failed");
                Err(ModliteError::InitFailed { module: id, source })
            }
        }
    }

    /// Commit the attempt: newly initialized modules become immune to
    /// rollback from unrelated future failures.
    fn commit(&mut self) {
        for record in self.records_mut() {
            record.status.remove(StatusFlags::PENDING);
        }
    }

    /// Unwind the attempt: exit exactly the modules it brought up,
    /// dependent-first. Previously committed modules are left alone.
    fn rollback(&mut self, error: &ModliteError) {
        tracing::warn!(%error, "init attempt failed, rolling back");
        for id in ModuleId::ALL {
            if self.record(id).is_pending() {
                self.exit(id);
            }
        }
    }

    fn collect_metrics(&self, total_duration_ms: u128) -> InitMetrics {
        let modules = ModuleId::ALL
            .into_iter()
            .filter_map(|id| {
                self.record(id).init_duration_ms.map(|duration_ms| ModuleInitMetrics {
                    id,
                    duration_ms,
                })
            })
            .collect();

        InitMetrics {
            total_duration_ms,
            modules,
        }
    }
}

/// Result of one module's slot in a bulk init pass.
#[derive(Debug)]
pub struct ModuleOutcome {
    pub id: ModuleId,
    pub result: ModliteResult<()>,
}

/// Per-module outcomes and timing of an [`init_all`](Registry::init_all) pass.
#[derive(Debug)]
pub struct InitReport {
    pub outcomes: Vec<ModuleOutcome>,
    pub metrics: InitMetrics,
}

impl InitReport {
    /// Best-effort success: at least one module initialized.
    pub fn is_success(&self) -> bool {
        self.initialized_count() > 0
    }

    /// Number of modules whose init slot succeeded.
    pub fn initialized_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_ok())
            .count()
    }

    /// The failed slots, in canonical order.
    pub fn failures(&self) -> impl Iterator<Item = (ModuleId, &ModliteError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|error| (outcome.id, error)))
    }
}
