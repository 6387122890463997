/*!
 * Prompt construction for the language model services.
 *
 * This module provides:
 * - Semantic prompt components and their composition
 * - Service-specific formatting into an instructions/input pair
 * - The fixed texts used by the strategies and the arbitration reviewer
 */

use serde::Serialize;

pub mod components;
pub mod formatters;
pub mod templates;

// Re-export main types
pub use components::{PromptComponent, compose};
pub use formatters::{ServiceKind, format_for};
pub use templates::PromptTemplate;

/// A structured prompt: system-level instructions plus the user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub instructions: String,
    pub input: String,
}

impl Prompt {
    pub fn new(instructions: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            input: input.into(),
        }
    }
}
