/*!
 * Prompt components.
 *
 * A prompt body is an ordered list of components, each rendering to one
 * block of text.
 */

use std::fmt;

/// One semantic part of a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptComponent {
    /// The label to translate
    TermLabel(String),
    /// Definition or note of the term
    TermDescription(String),
    /// Vocabulary or user supplied context
    GeneralContext(String),
    /// Broader-concept chain, top first
    BroaderChain(String),
    /// Text used as is
    Raw(String),
}

impl PromptComponent {
    /// Rendered text of the component
    pub fn render(&self) -> String {
        match self {
            Self::TermLabel(label) => format!("Term to translate: {}", label),
            Self::TermDescription(description) => {
                format!("Description of the term that should be translated: {}", description)
            }
            Self::GeneralContext(context) => {
                format!("General context of the term that should be translated: {}", context)
            }
            Self::BroaderChain(chain) => format!(
                "This chain represents the hierarchy of terms, starting with the highest-level term \
                 and progressing through intermediate terms to the current term which is the one \
                 that should be translated. It defines the context of the term. {}",
                chain
            ),
            Self::Raw(text) => text.clone(),
        }
    }
}

impl fmt::Display for PromptComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Join the rendered components with newlines, skipping blank ones
pub fn compose(components: &[PromptComponent]) -> String {
    components
        .iter()
        .map(PromptComponent::render)
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
