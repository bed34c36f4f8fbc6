//! Council personas
//!
//! A [`Persona`] is a named role with fixed instruction text that frames
//! one generation call. The [`PersonaRegistry`] is the process-wide,
//! read-only catalogue of personas a run may select from.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A named council member (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Identifier shown to judges and used for winner matching
    pub name: String,
    /// Instruction text injected into the generator prompt
    pub instruction: String,
}

impl Persona {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
        }
    }
}

/// Ordered, immutable catalogue of personas.
///
/// Order matters: it is the order shown to users and the order used for
/// the default selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

/// Result of filtering a requested agent list against the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonaSelection {
    /// Known personas, in request order
    pub active: Vec<Persona>,
    /// Requested identifiers that are not in the registry
    pub unknown: Vec<String>,
}

impl PersonaRegistry {
    /// Build a registry, rejecting blank names, blank instructions and duplicates.
    pub fn new(personas: Vec<Persona>) -> Result<Self, DomainError> {
        for (i, persona) in personas.iter().enumerate() {
            if persona.name.trim().is_empty() {
                return Err(DomainError::InvalidPersona(format!(
                    "persona #{} has an empty name",
                    i + 1
                )));
            }
            if persona.instruction.trim().is_empty() {
                return Err(DomainError::InvalidPersona(format!(
                    "{} has an empty instruction",
                    persona.name
                )));
            }
            if personas[..i].iter().any(|p| p.name == persona.name) {
                return Err(DomainError::DuplicatePersona(persona.name.clone()));
            }
        }
        Ok(Self { personas })
    }

    /// The five built-in council members.
    pub fn builtin() -> Self {
        Self {
            personas: vec![
                Persona::new(
                    "The Academic",
                    "You are a rigorous researcher. Focus on definitions, historical context, \
                     theoretical frameworks, and first principles. Cite logical fallacies if \
                     present. Use formal, precise language. Prioritize accuracy and depth over \
                     simplicity.",
                ),
                Persona::new(
                    "The Layman",
                    "You are a regular person who values common sense. You hate jargon. You want \
                     to know: 'How does this actually affect my daily life?' or 'What is the \
                     bottom line?' Use analogies, simple metaphors, and plain English. Be \
                     skeptical of over-complication.",
                ),
                Persona::new(
                    "The Skeptic",
                    "You are a critical thinker who looks for the catch. Question the premise of \
                     the query. Look for edge cases, security risks, potential downsides, and \
                     hidden costs. Assume that if something sounds too good to be true, it \
                     probably is. Focus on risk mitigation.",
                ),
                Persona::new(
                    "The Futurist",
                    "You are a visionary focused on the long-term horizon (5-50 years). Discuss \
                     trends, exponential technologies, and second-order effects. Ignore current \
                     constraints; focus on what is *possible*. Be optimistic but acknowledge \
                     disruptive potential.",
                ),
                Persona::new(
                    "The Ethical Guardian",
                    "You are a moral philosopher and safety advocate. Focus on societal impact, \
                     bias, fairness, environmental cost, and human well-being. Ask 'Should we do \
                     this?' rather than 'Can we do this?' Prioritize safety and responsibility \
                     above efficiency.",
                ),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.personas.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Default selection when the caller names no agents: the first three.
    pub fn default_selection(&self) -> Vec<String> {
        self.personas
            .iter()
            .take(3)
            .map(|p| p.name.clone())
            .collect()
    }

    /// Filter a requested agent list, keeping request order.
    ///
    /// Repeated identifiers are kept; each occurrence becomes its own
    /// generator slot.
    pub fn select(&self, requested: &[String]) -> PersonaSelection {
        let mut selection = PersonaSelection::default();
        for name in requested {
            match self.get(name) {
                Some(persona) => selection.active.push(persona.clone()),
                None => selection.unknown.push(name.clone()),
            }
        }
        selection
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
