//! Prompt template overrides read from a directory
//!
//! The directory may hold any of `1_generator.txt`, `2_critic.txt`,
//! `3_architect.txt` and `4_finalizer.txt`. Missing files keep the built-in
//! template.

use council_domain::{PromptKind, PromptTemplates};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum PromptLoadError {
    #[error("Prompt directory not found: {0}")]
    MissingDir(PathBuf),

    #[error("Failed to read prompt {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads prompt templates from a directory on disk.
#[derive(Debug, Clone)]
pub struct PromptLoader {
    dir: PathBuf,
}

impl PromptLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read every template present in the directory.
    pub fn load(&self) -> Result<PromptTemplates, PromptLoadError> {
        if !self.dir.is_dir() {
            return Err(PromptLoadError::MissingDir(self.dir.clone()));
        }

        let mut templates = PromptTemplates::builtin();
        for kind in PromptKind::ALL {
            let path = self.dir.join(kind.file_name());
            if !path.exists() {
                debug!(file = kind.file_name(), "No override, using built-in prompt");
                continue;
            }

            let text = fs::read_to_string(&path).map_err(|source| PromptLoadError::Read {
                path: path.clone(),
                source,
            })?;
            for name in missing_placeholders(kind, &text) {
                warn!(
                    file = kind.file_name(),
                    placeholder = name,
                    "Prompt override does not use placeholder"
                );
            }
            templates.set(kind, text);
        }
        Ok(templates)
    }
}

/// Placeholders `kind` expects that do not appear in `text`.
fn missing_placeholders(kind: PromptKind, text: &str) -> Vec<&'static str> {
    kind.placeholders()
        .iter()
        .copied()
        .filter(|name| !text.contains(&format!("{{{}}}", name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_is_error() {
        let loader = PromptLoader::new("/nonexistent/prompts");
        assert!(matches!(
            loader.load(),
            Err(PromptLoadError::MissingDir(_))
        ));
    }

    #[test]
    fn test_empty_dir_keeps_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let templates = PromptLoader::new(dir.path()).load().unwrap();
        assert_eq!(templates, PromptTemplates::builtin());
    }

    #[test]
    fn test_override_replaces_only_present_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("2_critic.txt"),
            "Judge these for {query}:\n{formatted_responses}",
        )
        .unwrap();

        let templates = PromptLoader::new(dir.path()).load().unwrap();
        assert_eq!(
            templates.get(PromptKind::Critic),
            "Judge these for {query}:\n{formatted_responses}"
        );
        assert_eq!(
            templates.get(PromptKind::Generator),
            PromptTemplates::builtin_text(PromptKind::Generator)
        );
    }

    #[test]
    fn test_format_style_override_renders_single_braces() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("3_architect.txt"),
            "Plan {query} from {best_response} and {critiques}.\nReply as {{\"structure\": []}}",
        )
        .unwrap();

        let templates = PromptLoader::new(dir.path()).load().unwrap();
        let prompt = templates.architect_prompt("Q", "draft", "[]");
        assert_eq!(prompt, "Plan Q from draft and [].\nReply as {\"structure\": []}");
    }

    #[test]
    fn test_missing_placeholders() {
        assert_eq!(
            missing_placeholders(PromptKind::Finalizer, "Write it. {query} {context}"),
            vec!["blueprint"]
        );
        assert!(missing_placeholders(PromptKind::Critic, "{query}{formatted_responses}").is_empty());
    }
}
