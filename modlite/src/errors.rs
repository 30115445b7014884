//! Error taxonomy for lifecycle operations.

use thiserror::Error;

use crate::module::ModuleId;

/// Result alias used across the crate.
pub type ModliteResult<T> = Result<T, ModliteError>;

/// Failures surfaced by lifecycle operations.
///
/// `InitFailed::module` names the module whose init hook actually failed,
/// which may be a transitive dependency of the id the caller asked for; the
/// error is propagated unchanged through the recursive resolution so that
/// information is never lost. Rollback of the failed attempt has already
/// happened by the time the caller sees the error.
#[derive(Debug, Error)]
pub enum ModliteError {
    /// Init was requested for an id with no prior registration.
    #[error("module {0} is not registered")]
    NotRegistered(ModuleId),

    /// The dependency graph loops back through this module.
    #[error("dependency cycle detected at module {0}")]
    DependencyCycle(ModuleId),

    /// A module's init hook returned an error.
    #[error("module {module} failed to initialize")]
    InitFailed {
        module: ModuleId,
        #[source]
        source: anyhow::Error,
    },
}

impl ModliteError {
    /// The module the error is about.
    pub fn module(&self) -> ModuleId {
        match self {
            ModliteError::NotRegistered(id) => *id,
            ModliteError::DependencyCycle(id) => *id,
            ModliteError::InitFailed { module, .. } => *module,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_failed_preserves_source() {
        let error = ModliteError::InitFailed {
            module: ModuleId::Display,
            source: anyhow::anyhow!("no backend available"),
        };

        assert_eq!(error.module(), ModuleId::Display);
        assert_eq!(error.to_string(), "module display failed to initialize");
        let source = std::error::Error::source(&error).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("no backend available"));
    }
}
