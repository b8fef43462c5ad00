//! Generated module cache.
//!
//! Holds the latest [`GeneratedModule`] per category. Readers share entries
//! through `Arc`; writers replace an entry whole, so a reader never sees a
//! half-updated module.

use super::{
    category::Category,
    engine::Pipeline,
    module::GeneratedModule,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Result of regenerating a category.
#[derive(Debug, Clone)]
pub struct Refresh {
    pub module: Arc<GeneratedModule>,
    /// Whether the module source differs from the previously cached one.
    pub changed: bool,
}

#[derive(Debug)]
pub struct ContentCache {
    pipeline: Pipeline,
    modules: RwLock<FxHashMap<Category, Arc<GeneratedModule>>>,
}

impl ContentCache {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            modules: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Cached module, without generating.
    pub fn get(&self, category: Category) -> Option<Arc<GeneratedModule>> {
        self.modules.read().get(&category).cloned()
    }

    /// Cached module, generating it on first access.
    pub fn get_or_generate(&self, category: Category) -> Arc<GeneratedModule> {
        if let Some(module) = self.get(category) {
            return module;
        }

        let mut modules = self.modules.write();
        // Another thread may have generated it while we waited for the lock.
        if let Some(module) = modules.get(&category) {
            return Arc::clone(module);
        }
        let module = Arc::new(self.pipeline.generate(category));
        modules.insert(category, Arc::clone(&module));
        module
    }

    /// Drop one category. Other categories stay cached.
    ///
    /// Returns whether an entry was present.
    pub fn invalidate(&self, category: Category) -> bool {
        self.modules.write().remove(&category).is_some()
    }

    /// Regenerate one category from disk and replace its entry.
    pub fn regenerate(&self, category: Category) -> Refresh {
        let module = Arc::new(self.pipeline.generate(category));
        let previous = self.modules.write().insert(category, Arc::clone(&module));
        let changed = previous.is_none_or(|old| old.hash != module.hash);
        Refresh { module, changed }
    }

    /// Generate every category, in [`Category::ALL`] order.
    pub fn generate_all(&self) -> Vec<Arc<GeneratedModule>> {
        Category::ALL
            .into_iter()
            .map(|category| self.get_or_generate(category))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.modules.read().len()
    }
}
