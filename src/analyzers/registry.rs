//! Registry of rubric dimensions
//!
//! Registration order is significant: it is the display order of weight
//! vectors and reports.

use crate::error::{EngineError, EngineResult};
use crate::models::AnalyzerModule;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<AnalyzerModule>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module; ids must be unique
    pub fn register(&mut self, module: AnalyzerModule) -> EngineResult<()> {
        if self.contains(&module.id) {
            return Err(EngineError::DuplicateModule(module.id));
        }
        debug!(
            "Registered module {} (default weight {:.3}, enabled: {})",
            module.id, module.default_weight, module.enabled
        );
        self.modules.push(module);
        Ok(())
    }

    /// Flip the enabled flag, returning the previous value
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> EngineResult<bool> {
        let module = self
            .modules
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| EngineError::UnknownModule(id.to_string()))?;
        let previous = module.enabled;
        module.enabled = enabled;
        Ok(previous)
    }

    pub fn get(&self, id: &str) -> Option<&AnalyzerModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.get(id).is_some_and(|m| m.enabled)
    }

    /// All modules in registration order
    pub fn list(&self) -> &[AnalyzerModule] {
        &self.modules
    }

    /// Enabled modules in registration order
    pub fn enabled(&self) -> impl Iterator<Item = &AnalyzerModule> {
        self.modules.iter().filter(|m| m.enabled)
    }

    /// Display name for `id`, falling back to the id itself
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|m| m.display_name.as_str()).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry
            .register(AnalyzerModule::new("perf", "Performance", 0.6))
            .expect("register perf");
        registry
            .register(AnalyzerModule::new("doc", "Documentation", 0.4))
            .expect("register doc");
        registry
    }

    #[test]
    fn test_register_keeps_order() {
        let registry = registry();
        let ids: Vec<&str> = registry.list().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["perf", "doc"]);
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = registry();
        let err = registry
            .register(AnalyzerModule::new("perf", "Other", 0.1))
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateModule("perf".to_string()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_set_enabled() {
        let mut registry = registry();
        assert_eq!(registry.set_enabled("doc", false), Ok(true));
        assert!(!registry.is_enabled("doc"));
        assert_eq!(registry.enabled().count(), 1);
        assert_eq!(registry.set_enabled("doc", true), Ok(false));
        assert!(registry.is_enabled("doc"));
    }

    #[test]
    fn test_set_enabled_unknown() {
        let mut registry = registry();
        assert_eq!(
            registry.set_enabled("nope", false),
            Err(EngineError::UnknownModule("nope".to_string()))
        );
    }

    #[test]
    fn test_display_name_fallback() {
        let registry = registry();
        assert_eq!(registry.display_name("perf"), "Performance");
        assert_eq!(registry.display_name("ghost"), "ghost");
    }
}
