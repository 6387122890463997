/*!
 * Service-specific prompt formatting.
 */

use super::Prompt;
use super::templates::PromptTemplate;

/// Prompt dialect of a secondary service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Chat completions (OpenAI and compatible APIs)
    OpenAI,
    Ollama,
    Anthropic,
    Dummy,
    /// Anything else
    Generic,
}

impl ServiceKind {
    /// Resolve a service name; unknown names map to `Generic`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "openai" => Self::OpenAI,
            "ollama" => Self::Ollama,
            "anthropic" => Self::Anthropic,
            "dummy" => Self::Dummy,
            _ => Self::Generic,
        }
    }
}

/// Wrap a composed prompt body into the instructions/input pair a service expects.
///
/// `target_language_name` is the display name ("German"), not the tag.
pub fn format_for(kind: ServiceKind, composed: &str, target_language_name: &str) -> Prompt {
    let vars = [("target_language", target_language_name), ("body", composed)];
    let persona = PromptTemplate::fill(PromptTemplate::TRANSLATOR_PERSONA, &vars);

    match kind {
        ServiceKind::OpenAI | ServiceKind::Anthropic => Prompt::new(
            format!("{}{}", persona, PromptTemplate::CONTEXT_DIRECTIVE),
            composed,
        ),
        ServiceKind::Ollama => Prompt::new(persona, PromptTemplate::fill(PromptTemplate::WRAPPED_INPUT, &vars)),
        ServiceKind::Dummy => Prompt::new(persona, composed),
        ServiceKind::Generic => Prompt::new(
            format!("{}{}", persona, PromptTemplate::CONTEXT_DIRECTIVE),
            PromptTemplate::fill(PromptTemplate::WRAPPED_INPUT, &vars),
        ),
    }
}
