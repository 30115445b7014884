//! Dependent-first teardown.
//!
//! `exit` clears a module's status flags before cascading, so a malformed
//! graph cannot re-enter the same teardown; the cascade then exits every
//! initialized module that depends on it (required or optional) before the
//! module's own exit hook runs. This is the exact reverse of init ordering: a
//! module is never observed down while one of its dependents is still up.

use crate::module::ModuleId;
use crate::module::record::StatusFlags;
use crate::registry::Registry;

impl Registry {
    /// Tear `id` down, taking every initialized dependent down first.
    ///
    /// No-op when `id` is not initialized, which also makes bulk teardown and
    /// rollback idempotent.
    pub fn exit(&mut self, id: ModuleId) {
        if !self.is_initialized(id) {
            return;
        }

        // Drop the flags before cascading; bounds re-entry on malformed graphs.
        let record = self.record_mut(id);
        record
            .status
            .remove(StatusFlags::INITIALIZED | StatusFlags::PENDING);
        record.init_duration_ms = None;

        for dependent in ModuleId::ALL {
            if self.record(dependent).deps.required().contains(id) {
                self.exit(dependent);
            }
        }
        for dependent in ModuleId::ALL {
            if self.record(dependent).deps.optional().contains(id) {
                self.exit(dependent);
            }
        }

        if let Some(module) = self.record_mut(id).module.as_mut() {
            module.exit();
        }
        tracing::debug!(module = %id, "module exited");
    }

    /// Tear every module down, in canonical scan order.
    ///
    /// Safe regardless of state: `exit` is idempotent and self-cascading, so
    /// later slots in the scan are no-ops for anything already taken down.
    pub fn exit_all(&mut self) {
        for id in ModuleId::ALL {
            self.exit(id);
        }
    }
}

/// Dropping the registry tears down whatever is still initialized, in
/// dependency order, so an owned registry cannot leak running subsystems.
impl Drop for Registry {
    fn drop(&mut self) {
        self.exit_all();
    }
}

#[cfg(test)]
mod tests {
    use crate::module::ModuleId;
    use crate::registry::Registry;
    use crate::testutil::{ProbeModule, journal};

    #[test]
    fn test_exit_cascades_dependents_first() {
        let log = journal();
        let mut registry = Registry::new();
        registry.register(ModuleId::Display, Box::new(ProbeModule::new("display", &log)));
        registry.register(ModuleId::Render, Box::new(ProbeModule::new("render", &log)));
        registry.add_dependency(ModuleId::Render, ModuleId::Display);
        registry.init(ModuleId::Render).unwrap();
        log.borrow_mut().clear();

        // Exiting the dependency must take the dependent down first.
        registry.exit(ModuleId::Display);

        assert_eq!(log.borrow().as_slice(), ["exit render", "exit display"]);
        assert!(!registry.is_initialized(ModuleId::Render));
        assert!(!registry.is_initialized(ModuleId::Display));
    }

    #[test]
    fn test_exit_cascades_through_optional_dependents() {
        let log = journal();
        let mut registry = Registry::new();
        registry.register(ModuleId::Profiler, Box::new(ProbeModule::new("profiler", &log)));
        registry.register(ModuleId::Render, Box::new(ProbeModule::new("render", &log)));
        registry.add_optional_dependency(ModuleId::Render, ModuleId::Profiler);
        registry.init(ModuleId::Render).unwrap();
        log.borrow_mut().clear();

        registry.exit(ModuleId::Profiler);

        assert_eq!(log.borrow().as_slice(), ["exit render", "exit profiler"]);
    }

    #[test]
    fn test_exit_uninitialized_is_noop() {
        let log = journal();
        let mut registry = Registry::new();
        registry.register(ModuleId::Clock, Box::new(ProbeModule::new("clock", &log)));

        registry.exit(ModuleId::Clock);
        registry.exit(ModuleId::Physics);

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_exit_all_reverses_init_order() {
        let log = journal();
        let mut registry = Registry::new();
        registry.register(ModuleId::Memory, Box::new(ProbeModule::new("memory", &log)));
        registry.register(ModuleId::Clock, Box::new(ProbeModule::new("clock", &log)));
        registry.register(ModuleId::Render, Box::new(ProbeModule::new("render", &log)));
        registry.add_dependency(ModuleId::Clock, ModuleId::Memory);
        registry.add_dependency(ModuleId::Render, ModuleId::Clock);
        registry.init(ModuleId::Render).unwrap();
        log.borrow_mut().clear();

        registry.exit_all();

        // The scan hits memory first; the cascade still unwinds top-down.
        assert_eq!(
            log.borrow().as_slice(),
            ["exit render", "exit clock", "exit memory"]
        );
    }

    #[test]
    fn test_exit_all_is_idempotent() {
        let log = journal();
        let mut registry = Registry::new();
        registry.register(ModuleId::Clock, Box::new(ProbeModule::new("clock", &log)));
        registry.init(ModuleId::Clock).unwrap();

        registry.exit_all();
        registry.exit_all();

        let exits = log
            .borrow()
            .iter()
            .filter(|line| *line == "exit clock")
            .count();
        assert_eq!(exits, 1);
    }

    #[test]
    fn test_drop_tears_down_initialized_modules() {
        let log = journal();
        {
            let mut registry = Registry::new();
            registry.register(ModuleId::Memory, Box::new(ProbeModule::new("memory", &log)));
            registry.register(ModuleId::Clock, Box::new(ProbeModule::new("clock", &log)));
            registry.add_dependency(ModuleId::Clock, ModuleId::Memory);
            registry.init(ModuleId::Clock).unwrap();
        }

        let lines = log.borrow();
        assert_eq!(
            lines.as_slice(),
            ["init memory", "init clock", "exit clock", "exit memory"]
        );
    }
}
