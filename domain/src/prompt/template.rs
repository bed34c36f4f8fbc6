//! Prompt templates for the council flow
//!
//! Templates use `{name}` placeholders and `{{`/`}}` for literal braces.
//! Rendering is single-pass, so a placeholder-looking string inside a
//! substituted value (for example a query containing `{context}`) is never
//! expanded again.

/// The four prompt templates a run needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Generator,
    Critic,
    Architect,
    Finalizer,
}

impl PromptKind {
    pub const ALL: [PromptKind; 4] = [
        PromptKind::Generator,
        PromptKind::Critic,
        PromptKind::Architect,
        PromptKind::Finalizer,
    ];

    /// File name used when loading overrides from a prompt directory
    pub fn file_name(&self) -> &'static str {
        match self {
            PromptKind::Generator => "1_generator.txt",
            PromptKind::Critic => "2_critic.txt",
            PromptKind::Architect => "3_architect.txt",
            PromptKind::Finalizer => "4_finalizer.txt",
        }
    }

    /// Placeholders the template is expected to use
    pub fn placeholders(&self) -> &'static [&'static str] {
        match self {
            PromptKind::Generator => &["persona_name", "persona_instruction", "query"],
            PromptKind::Critic => &["query", "formatted_responses"],
            PromptKind::Architect => &["query", "best_response", "critiques"],
            PromptKind::Finalizer => &["query", "blueprint", "context"],
        }
    }

    fn builtin(&self) -> &'static str {
        match self {
            PromptKind::Generator => GENERATOR,
            PromptKind::Critic => CRITIC,
            PromptKind::Architect => ARCHITECT,
            PromptKind::Finalizer => FINALIZER,
        }
    }
}

const GENERATOR: &str = r#"You are {persona_name}, a member of an advisory council.

{persona_instruction}

Answer the following query from your perspective. Be substantive and specific.
Stay in character, but do not mention that you are playing a role.

Query: {query}"#;

const CRITIC: &str = r#"You are an impartial judge evaluating answers from several council members.

Original query: {query}

Responses to evaluate:

{formatted_responses}
Evaluate each response for accuracy, depth, clarity and usefulness.
Reply with a single JSON object and nothing else:
{{"winner_id": "<RESPONSE ID of the best response>",
 "rankings": ["<RESPONSE ID best>", "...", "<RESPONSE ID worst>"],
 "reasoning": "<why the winner was chosen>",
 "flaws": {{"<RESPONSE ID>": "<its most important flaw>"}},
 "scores": {{"<RESPONSE ID>": <integer 1-10>}}}}"#;

const ARCHITECT: &str = r#"You are the architect of the council's final answer.

Original query: {query}

Best draft so far:
{best_response}

Judge critiques (JSON):
{critiques}

Design the structure of the definitive answer. Reply with a single JSON object and nothing else:
{{"structure": ["<section header with instructions>", "..."],
 "tone_guidelines": "<voice and style>",
 "missing_facts_to_add": ["<fact or correction to inject>", "..."],
 "critique_integration": "<how to address the critiques>"}}"#;

const FINALIZER: &str = r#"You are the council's writer. Produce the definitive answer to the query.

Query: {query}

Follow this blueprint exactly (JSON):
{blueprint}

Use this draft as supporting material, correcting it where the blueprint says so:
{context}

Write the final answer in Markdown."#;

/// Render `template`, replacing each `{name}` whose name appears in `vars`.
///
/// `{{` and `}}` produce literal braces, so templates written for Python's
/// `str.format` render the same way. Other `{...}` sequences are copied
/// verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('{') {
            let substituted = after.find('}').and_then(|close| {
                let name = &after[..close];
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value, close))
            });
            if let Some((value, close)) = substituted {
                out.push_str(value);
                rest = &after[close + 1..];
                continue;
            }
        }

        // Lone brace
        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

/// The template set used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub generator: String,
    pub critic: String,
    pub architect: String,
    pub finalizer: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptTemplates {
    pub fn builtin() -> Self {
        Self {
            generator: GENERATOR.to_string(),
            critic: CRITIC.to_string(),
            architect: ARCHITECT.to_string(),
            finalizer: FINALIZER.to_string(),
        }
    }

    /// Built-in text for one template kind.
    pub fn builtin_text(kind: PromptKind) -> &'static str {
        kind.builtin()
    }

    pub fn get(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Generator => &self.generator,
            PromptKind::Critic => &self.critic,
            PromptKind::Architect => &self.architect,
            PromptKind::Finalizer => &self.finalizer,
        }
    }

    pub fn set(&mut self, kind: PromptKind, text: impl Into<String>) {
        let text = text.into();
        match kind {
            PromptKind::Generator => self.generator = text,
            PromptKind::Critic => self.critic = text,
            PromptKind::Architect => self.architect = text,
            PromptKind::Finalizer => self.finalizer = text,
        }
    }

    pub fn generator_prompt(&self, persona_name: &str, instruction: &str, query: &str) -> String {
        render(
            &self.generator,
            &[
                ("persona_name", persona_name),
                ("persona_instruction", instruction),
                ("query", query),
            ],
        )
    }

    pub fn critic_prompt(&self, query: &str, formatted_responses: &str) -> String {
        render(
            &self.critic,
            &[("query", query), ("formatted_responses", formatted_responses)],
        )
    }

    pub fn architect_prompt(&self, query: &str, best_response: &str, critiques: &str) -> String {
        render(
            &self.architect,
            &[
                ("query", query),
                ("best_response", best_response),
                ("critiques", critiques),
            ],
        )
    }

    pub fn finalizer_prompt(&self, query: &str, blueprint: &str, context: &str) -> String {
        render(
            &self.finalizer,
            &[("query", query), ("blueprint", blueprint), ("context", context)],
        )
    }
}
