//! Name-keyed maps of constructs built during one VPC pass.
//!
//! Later steps resolve sibling references through these maps. There is no
//! dependency solver: a name is resolvable only once the step that creates
//! it has run.

use std::collections::HashMap;

use tracing::debug;

/// Constructs of one kind, keyed by configuration name.
#[derive(Debug)]
pub struct IdentifierMap<T> {
    kind: &'static str,
    entries: HashMap<String, T>,
}

impl<T> IdentifierMap<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Insert a construct. A later insert under the same name replaces the
    /// earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        if self.entries.contains_key(&name) {
            debug!("Replacing {} {} in identifier map", self.kind, name);
        }
        self.entries.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
