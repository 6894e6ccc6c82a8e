//! Ordered collection of readiness checks

use crate::error::{ReadinatorError, Result};
use crate::traits::{CheckCategory, RunnableCheck};
use std::collections::HashSet;

/// Ordered collection of checks for one run.
///
/// Checks execute in registration order. Ids must be unique; a duplicate
/// fails registration before any check runs.
pub struct CheckRegistry {
    checks: Vec<Box<dyn RunnableCheck>>,
    ids: HashSet<String>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Add a check, rejecting duplicate ids
    pub fn register(&mut self, check: Box<dyn RunnableCheck>) -> Result<()> {
        let id = check.definition().id.clone();
        if !self.ids.insert(id.clone()) {
            return Err(ReadinatorError::DuplicateCheckId(id));
        }
        self.checks.push(check);
        Ok(())
    }

    /// All checks in registration order
    pub fn checks(&self) -> &[Box<dyn RunnableCheck>] {
        &self.checks
    }

    pub fn filter_by_category(&self, category: CheckCategory) -> Vec<&dyn RunnableCheck> {
        self.checks
            .iter()
            .filter(|c| c.definition().category == category)
            .map(|c| c.as_ref())
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&dyn RunnableCheck> {
        self.checks
            .iter()
            .find(|c| c.definition().id == id)
            .map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckError;
    use crate::traits::{CheckDefinition, Severity};

    struct DummyCheck {
        definition: CheckDefinition,
    }

    impl DummyCheck {
        fn boxed(id: &str) -> Box<dyn RunnableCheck> {
            Box::new(Self {
                definition: CheckDefinition::new(
                    id,
                    "dummy",
                    CheckCategory::Connectivity,
                    Severity::Critical,
                ),
            })
        }
    }

    impl RunnableCheck for DummyCheck {
        fn definition(&self) -> &CheckDefinition {
            &self.definition
        }

        fn execute(&self) -> std::result::Result<String, CheckError> {
            Ok("ok".to_string())
        }
    }

    #[test]
    fn preserves_registration_order() {
        let mut registry = CheckRegistry::new();
        registry.register(DummyCheck::boxed("b")).unwrap();
        registry.register(DummyCheck::boxed("a")).unwrap();
        registry.register(DummyCheck::boxed("c")).unwrap();

        let ids: Vec<_> = registry
            .checks()
            .iter()
            .map(|c| c.definition().id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut registry = CheckRegistry::new();
        registry.register(DummyCheck::boxed("health")).unwrap();

        let err = registry.register(DummyCheck::boxed("health")).unwrap_err();
        assert!(matches!(err, ReadinatorError::DuplicateCheckId(id) if id == "health"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn finds_by_id() {
        let mut registry = CheckRegistry::new();
        registry.register(DummyCheck::boxed("health")).unwrap();

        assert!(registry.find("health").is_some());
        assert!(registry.find("missing").is_none());
    }
}
