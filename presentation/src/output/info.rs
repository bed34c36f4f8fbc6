//! Listings for `--list-agents` and `--show-defaults`

use colored::Colorize;
use council_domain::{ModelAssignment, PersonaRegistry};
use serde_json::{Map, Value, json};

/// Personas and default models as JSON.
pub fn defaults_json(personas: &PersonaRegistry, models: &ModelAssignment) -> Value {
    let personas: Vec<Value> = personas
        .iter()
        .map(|p| json!({ "name": p.name, "instruction": p.instruction }))
        .collect();
    let models: Map<String, Value> = models
        .entries()
        .map(|(role, model)| (role.key(), Value::String(model.to_string())))
        .collect();
    json!({ "personas": personas, "models": models })
}

/// Human-readable persona list; default picks are marked.
pub fn format_agent_list(personas: &PersonaRegistry) -> String {
    let defaults = personas.default_selection();
    let mut out = format!("{}\n", "Available agents:".cyan().bold());
    for persona in personas.iter() {
        let marker = if defaults.contains(&persona.name) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        out.push_str(&format!("  {} {}\n", marker, persona.name.bold()));
    }
    out.push_str(&format!("\n{}\n", "* selected when no --agent is given".dimmed()));
    out
}
