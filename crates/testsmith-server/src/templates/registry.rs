// crates/testsmith-server/src/templates/registry.rs
// Process-wide store of prompt templates keyed by (language, framework)

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use testsmith_types::{Framework, Language, PromptTemplate, TemplateKey};
use tracing::{debug, info};

use super::builtin;
use crate::error::{Result, TestsmithError};

/// Template registry.
///
/// Read-mostly after startup. Mutation goes through [`TemplateRegistry::register`]
/// only; the map itself never leaves this type.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: RwLock<HashMap<TemplateKey, Arc<PromptTemplate>>>,
}

impl TemplateRegistry {
    /// Empty registry; every lookup resolves to the generic fallback
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in templates
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        {
            let mut map = registry.write_map();
            for (language, framework, template) in builtin::all() {
                map.insert(TemplateKey { language, framework }, Arc::new(template));
            }
            debug!(count = map.len(), "Registered built-in templates");
        }
        registry
    }

    /// Insert or replace the template for a pair.
    ///
    /// The only content check is a non-empty instruction.
    pub fn register(
        &self,
        language: Language,
        framework: Framework,
        template: PromptTemplate,
    ) -> Result<()> {
        if template.instruction.trim().is_empty() {
            return Err(TestsmithError::InvalidTemplate(format!(
                "instruction must not be empty for {}-{}",
                language, framework
            )));
        }

        let key = TemplateKey { language, framework };
        let replaced = self
            .write_map()
            .insert(key, Arc::new(template))
            .is_some();

        info!(template = %key, replaced, "Registered custom template");
        Ok(())
    }

    /// Template for a pair: the exact entry, or a synthesized generic one
    pub fn resolve(&self, language: Language, framework: Framework) -> Arc<PromptTemplate> {
        let key = TemplateKey { language, framework };
        if let Some(template) = self.read_map().get(&key) {
            return Arc::clone(template);
        }
        debug!(template = %key, "No registered template, using generic fallback");
        Arc::new(generic_template(language, framework))
    }

    /// Whether an exact entry exists for the pair
    pub fn contains(&self, language: Language, framework: Framework) -> bool {
        self.read_map()
            .contains_key(&TemplateKey { language, framework })
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<TemplateKey> {
        let mut keys: Vec<TemplateKey> = self.read_map().keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock only means a writer panicked mid-insert; the map is still usable.
    fn read_map(&self) -> std::sync::RwLockReadGuard<'_, HashMap<TemplateKey, Arc<PromptTemplate>>> {
        self.templates.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_map(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<TemplateKey, Arc<PromptTemplate>>> {
        self.templates.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Fallback template naming the language and framework
pub fn generic_template(language: Language, framework: Framework) -> PromptTemplate {
    PromptTemplate {
        instruction: format!(
            "Generate comprehensive unit tests for the following {} code using {}.",
            language, framework
        ),
        examples: None,
        requirements: vec![
            "Write comprehensive test cases".to_string(),
            "Cover normal execution paths".to_string(),
            "Test edge cases and boundary conditions".to_string(),
            "Test error scenarios where applicable".to_string(),
            "Use appropriate assertions".to_string(),
            "Follow testing best practices".to_string(),
        ],
    }
}
