//! Shared probe module for lifecycle tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::module::{Dependencies, Module, ModuleId};

/// Shared hook-call journal, in invocation order.
pub(crate) type Journal = Rc<RefCell<Vec<String>>>;

pub(crate) fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Module that records every hook invocation and can be told to fail init.
pub(crate) struct ProbeModule {
    name: &'static str,
    journal: Journal,
    fail_init: bool,
    required: Vec<ModuleId>,
    optional: Vec<ModuleId>,
}

impl ProbeModule {
    pub(crate) fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: Rc::clone(journal),
            fail_init: false,
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    pub(crate) fn failing(name: &'static str, journal: &Journal) -> Self {
        Self {
            fail_init: true,
            ..Self::new(name, journal)
        }
    }

    /// Dependencies the module will declare in its setup hook.
    pub(crate) fn with_required(mut self, ids: &[ModuleId]) -> Self {
        self.required.extend_from_slice(ids);
        self
    }

    pub(crate) fn with_optional(mut self, ids: &[ModuleId]) -> Self {
        self.optional.extend_from_slice(ids);
        self
    }

    fn record(&self, hook: &str) {
        self.journal.borrow_mut().push(format!("{hook} {}", self.name));
    }
}

impl Module for ProbeModule {
    fn setup(&mut self, deps: &mut Dependencies) {
        for id in &self.required {
            deps.require(*id);
        }
        for id in &self.optional {
            deps.require_optional(*id);
        }
        self.record("setup");
    }

    fn init(&mut self) -> anyhow::Result<()> {
        self.record("init");
        if self.fail_init {
            anyhow::bail!("{} refused to start", self.name);
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.record("exit");
    }
}
