use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use nebula_core::name::{PredicateName, ToolName};

use crate::error::RegistryError;
use crate::predicate::Predicate;
use crate::tool::Tool;

/// Name → tool-function table. The only mechanism by which a serialized
/// graph (which stores tool *names*) rehydrates into an executable graph.
///
/// Registration is idempotent per name: re-registering an existing name
/// fails with [`RegistryError::ToolAlreadyRegistered`] rather than replacing
/// the existing callable.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<ToolName, Arc<dyn Tool>>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tool` under `name`. Fails if `name` is already registered.
    pub fn register(&mut self, name: ToolName, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        if self.tools.contains_key(&name) {
            return Err(RegistryError::ToolAlreadyRegistered(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn get(&self, name: &ToolName) -> Result<Arc<dyn Tool>, RegistryError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ToolNotFound(name.clone()))
    }

    #[must_use]
    pub fn contains(&self, name: &ToolName) -> bool {
        self.tools.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn list(&self) -> impl Iterator<Item = &ToolName> {
        self.tools.keys()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Parallel registry resolving edge condition names to predicate callables.
/// An edge with no condition name is unconditional and never consults this
/// registry.
#[derive(Default, Clone)]
pub struct PredicateRegistry {
    predicates: HashMap<PredicateName, Arc<dyn Predicate>>,
}

impl PredicateRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: PredicateName,
        predicate: Arc<dyn Predicate>,
    ) -> Result<(), RegistryError> {
        if self.predicates.contains_key(&name) {
            return Err(RegistryError::PredicateAlreadyRegistered(name));
        }
        self.predicates.insert(name, predicate);
        Ok(())
    }

    pub fn get(&self, name: &PredicateName) -> Result<Arc<dyn Predicate>, RegistryError> {
        self.predicates
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::PredicateNotFound(name.clone()))
    }

    #[must_use]
    pub fn contains(&self, name: &PredicateName) -> bool {
        self.predicates.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("predicates", &self.predicates.keys().collect::<Vec<_>>())
            .finish()
    }
}
