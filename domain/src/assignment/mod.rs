//! Model assignment: which model plays which council role.
//!
//! Roles are `generator_<k>` (1-based fan-out position), `critic`,
//! `architect` and `finalizer`. Resolution order for a role:
//!
//! 1. Per-run override keyed by persona name (generators only)
//! 2. Per-run override keyed by role key
//! 3. Process default for the role
//! 4. Process default for `generator_1`

use crate::core::error::DomainError;
use crate::core::model::ModelId;
use std::collections::BTreeMap;

/// A logical council role that needs a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelRole {
    /// Generator slot, 1-based
    Generator(usize),
    Critic,
    Architect,
    Finalizer,
}

impl ModelRole {
    /// Role for the generator at a 0-based fan-out position.
    pub fn generator_at(position: usize) -> Self {
        ModelRole::Generator(position + 1)
    }

    /// Configuration key for this role (e.g. `generator_2`).
    pub fn key(&self) -> String {
        match self {
            ModelRole::Generator(k) => format!("generator_{}", k),
            ModelRole::Critic => "critic".to_string(),
            ModelRole::Architect => "architect".to_string(),
            ModelRole::Finalizer => "finalizer".to_string(),
        }
    }
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for ModelRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critic" => Ok(ModelRole::Critic),
            "architect" => Ok(ModelRole::Architect),
            "finalizer" => Ok(ModelRole::Finalizer),
            other => other
                .strip_prefix("generator_")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .map(ModelRole::Generator)
                .ok_or_else(|| DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// Per-run model overrides keyed by persona name or role key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelOverrides {
    entries: BTreeMap<String, ModelId>,
}

impl ModelOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, model: ModelId) -> Self {
        self.entries.insert(key.into(), model);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, model: ModelId) {
        self.entries.insert(key.into(), model);
    }

    pub fn get(&self, key: &str) -> Option<&ModelId> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ModelId)> for ModelOverrides {
    fn from_iter<I: IntoIterator<Item = (String, ModelId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Process-wide default role → model mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAssignment {
    defaults: BTreeMap<ModelRole, ModelId>,
}

impl ModelAssignment {
    pub fn new(defaults: BTreeMap<ModelRole, ModelId>) -> Self {
        Self { defaults }
    }

    /// Built-in defaults (free OpenRouter models).
    pub fn builtin() -> Self {
        let generator = "nvidia/nemotron-nano-12b-v2-vl:free";
        let judge = "tngtech/deepseek-r1t-chimera:free";
        let writer = "tngtech/deepseek-r1t2-chimera:free";

        let mut defaults = BTreeMap::new();
        for k in 1..=5 {
            defaults.insert(ModelRole::Generator(k), Self::fixed(generator));
        }
        defaults.insert(ModelRole::Critic, Self::fixed(judge));
        defaults.insert(ModelRole::Architect, Self::fixed(judge));
        defaults.insert(ModelRole::Finalizer, Self::fixed(writer));
        Self { defaults }
    }

    fn fixed(id: &'static str) -> ModelId {
        ModelId::from_static(id)
    }

    /// Return a copy with `role` set to `model`.
    pub fn with(mut self, role: ModelRole, model: ModelId) -> Self {
        self.defaults.insert(role, model);
        self
    }

    pub fn get(&self, role: ModelRole) -> Option<&ModelId> {
        self.defaults.get(&role)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&ModelRole, &ModelId)> {
        self.defaults.iter()
    }

    /// Resolve the model for a non-generator role.
    pub fn resolve(&self, role: ModelRole, overrides: &ModelOverrides) -> Option<ModelId> {
        overrides
            .get(&role.key())
            .or_else(|| self.defaults.get(&role))
            .or_else(|| self.defaults.get(&ModelRole::Generator(1)))
            .cloned()
    }

    /// Resolve the model for the generator at 0-based `position` running `persona`.
    pub fn resolve_generator(
        &self,
        position: usize,
        persona: &str,
        overrides: &ModelOverrides,
    ) -> Option<ModelId> {
        overrides
            .get(persona)
            .cloned()
            .or_else(|| self.resolve(ModelRole::generator_at(position), overrides))
    }
}

impl Default for ModelAssignment {
    fn default() -> Self {
        Self::builtin()
    }
}
