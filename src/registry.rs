use std::collections::HashMap;

use crate::catalog::{builtin, Catalog, Platform};

/// Catalogs by type id, plus the modifier catalogs by modifier name.
///
/// Platform filtering happens once here, when a catalog is registered.
pub struct Registry {
    platform: Platform,
    types: HashMap<String, Catalog>,
    modifiers: HashMap<String, Catalog>,
}

impl Registry {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            types: HashMap::new(),
            modifiers: HashMap::new(),
        }
    }

    /// The built-in style vocabulary for `platform`.
    pub fn builtin(platform: Platform) -> Self {
        let mut registry = Self::new(platform);
        for catalog in builtin::types() {
            registry.register(catalog);
        }
        for catalog in builtin::modifiers() {
            registry.register_modifier(catalog);
        }
        log::debug!(
            "Loaded {} type catalogs and {} modifier catalogs for {}",
            registry.types.len(),
            registry.modifiers.len(),
            platform
        );
        registry
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Replaces any catalog already registered under the same type name.
    pub fn register(&mut self, catalog: Catalog) {
        let catalog = catalog.for_platform(self.platform);
        self.types.insert(catalog.type_name().to_string(), catalog);
    }

    pub fn register_modifier(&mut self, catalog: Catalog) {
        let catalog = catalog.for_platform(self.platform);
        self.modifiers
            .insert(catalog.type_name().to_string(), catalog);
    }

    pub fn catalog(&self, type_id: &str) -> Option<&Catalog> {
        self.types.get(type_id)
    }

    pub fn modifier(&self, name: &str) -> Option<&Catalog> {
        self.modifiers.get(name)
    }
}
