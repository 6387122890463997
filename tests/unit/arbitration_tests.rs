/*!
 * Tests for the language model arbitration between candidates
 */

use crate::common::memory_graph::MemoryGraph;
use skos_translator::errors::ProviderError;
use skos_translator::providers::mock::MockSecondary;
use skos_translator::translation::{CandidateSet, LlmArbiter, SecondaryOutput, TermContext, TranslationDecision};
use skos_translator::vocabulary::{Concept, DEFINITION, PREF_LABEL, TermProperties};

fn properties(with_definition: bool) -> TermProperties {
    let props = TermProperties::new()
        .with(PREF_LABEL, "de", "Kraft")
        .with(PREF_LABEL, "fr", "force");
    if with_definition {
        props.with(DEFINITION, "de", "Ursache einer Beschleunigung")
    } else {
        props
    }
}

fn term_context<'a>(
    graph: &'a MemoryGraph,
    concept: &'a Concept,
    properties: &'a TermProperties,
    vocabulary_context: Option<&'a str>,
) -> TermContext<'a> {
    TermContext {
        concept,
        graph,
        labels: properties.get(PREF_LABEL).unwrap(),
        properties,
        vocabulary_context,
        user_context: None,
        target_language: "en",
    }
}

fn primary() -> CandidateSet {
    CandidateSet::new().with("de", "force").with("fr", "strength")
}

fn secondary() -> SecondaryOutput {
    SecondaryOutput::Single(Some("power".to_string()))
}

/// Test that answers outside the candidate list are retried
#[tokio::test]
async fn test_arbitration_withInventedAnswer_shouldRetryUntilCandidate() {
    let graph = MemoryGraph::new();
    let concept = Concept::new("ex:force");
    let props = properties(true);
    let term = term_context(&graph, &concept, &props, None);
    let reviewer = MockSecondary::new("openai").with_answers(&["momentum; 0.9", "'Force'; 0.8"]);

    let decision = LlmArbiter::new(3)
        .calculate(&reviewer, &term, &primary(), &secondary())
        .await
        .unwrap();

    assert_eq!(decision, TranslationDecision::new("Force", 0.8));
    assert_eq!(reviewer.call_count(), 2);
}

/// Test that exhausted attempts give no decision at all
#[tokio::test]
async fn test_arbitration_withOutOfRangeConfidence_shouldGiveNone() {
    let graph = MemoryGraph::new();
    let concept = Concept::new("ex:force");
    let props = properties(true);
    let term = term_context(&graph, &concept, &props, None);
    let reviewer = MockSecondary::new("openai").with_answers(&["force; 1.5", "force; 2"]);

    let decision = LlmArbiter::new(1)
        .calculate(&reviewer, &term, &primary(), &secondary())
        .await
        .unwrap();

    assert_eq!(decision, TranslationDecision::none());
    assert_eq!(decision.translation, None);
    assert_eq!(decision.confidence, None);
    assert_eq!(reviewer.call_count(), 2);
}

/// Test the explicit retry override
#[tokio::test]
async fn test_arbitration_withZeroRetries_shouldAskOnce() {
    let graph = MemoryGraph::new();
    let concept = Concept::new("ex:force");
    let props = properties(true);
    let term = term_context(&graph, &concept, &props, None);
    let reviewer = MockSecondary::new("openai").with_answers(&["not an answer", "force; 1"]);

    let decision = LlmArbiter::new(5)
        .calculate_with_retries(&reviewer, &term, &primary(), &secondary(), 0)
        .await
        .unwrap();

    assert!(!decision.is_usable());
    assert_eq!(reviewer.call_count(), 1);
}

/// Test that missing answers and failed requests count as attempts
#[tokio::test]
async fn test_arbitration_withMissingAnswers_shouldUseEveryAttempt() {
    let graph = MemoryGraph::new();
    let concept = Concept::new("ex:force");
    let props = properties(true);
    let term = term_context(&graph, &concept, &props, None);
    let reviewer = MockSecondary::new("openai")
        .with_result(Ok(None))
        .with_result(Err(ProviderError::ConnectionError("reset".to_string())))
        .with_answers(&["strength; 0.7"]);

    let decision = LlmArbiter::new(2)
        .calculate(&reviewer, &term, &primary(), &secondary())
        .await
        .unwrap();

    assert_eq!(decision, TranslationDecision::new("strength", 0.7));
    assert_eq!(reviewer.call_count(), 3);
}

/// Test that an exhausted quota aborts arbitration
#[tokio::test]
async fn test_arbitration_withRateLimit_shouldFail() {
    let graph = MemoryGraph::new();
    let concept = Concept::new("ex:force");
    let props = properties(true);
    let term = term_context(&graph, &concept, &props, None);
    let reviewer = MockSecondary::new("openai")
        .with_result(Err(ProviderError::RateLimitExceeded("quota".to_string())))
        .with_answers(&["force; 1"]);

    let result = LlmArbiter::new(3)
        .calculate(&reviewer, &term, &primary(), &secondary())
        .await;

    assert!(matches!(result, Err(ProviderError::RateLimitExceeded(_))));
    assert_eq!(reviewer.call_count(), 1);
}

/// Test the reviewer prompt with term descriptions
#[tokio::test]
async fn test_arbitration_prompt_shouldListLabelsCandidatesAndDescriptions() {
    let graph = MemoryGraph::new();
    let concept = Concept::new("ex:force");
    let props = properties(true);
    let term = term_context(&graph, &concept, &props, Some("Physics"));
    let reviewer = MockSecondary::new("openai").with_answers(&["force; 1"]);

    LlmArbiter::new(0)
        .calculate(&reviewer, &term, &primary(), &secondary())
        .await
        .unwrap();

    let prompt = &reviewer.prompts()[0];
    assert!(prompt.instructions.contains("best fitting translation; confidence"));
    assert!(prompt.input.starts_with("Choose the best fitting translation to English."));
    assert!(prompt.input.contains("is: \nKraft (de)\nforce (fr)\n\n"));
    assert!(prompt.input.contains("are: \nforce\nstrength\npower\n\n"));
    assert!(prompt.input.contains("Term descriptions are: \nUrsache einer Beschleunigung (de)\n\n"));
    assert!(!prompt.input.contains("Additional context"));
}

/// Test the reviewer prompt without descriptions
#[tokio::test]
async fn test_arbitration_prompt_withoutDescriptions_shouldUseContext() {
    let graph = MemoryGraph::new();
    let concept = Concept::new("ex:force");
    let props = properties(false);
    let term = term_context(&graph, &concept, &props, Some("Physics"));
    let reviewer = MockSecondary::new("openai").with_answers(&["force; 1"]);

    LlmArbiter::new(0)
        .calculate(&reviewer, &term, &primary(), &secondary())
        .await
        .unwrap();

    let prompt = &reviewer.prompts()[0];
    assert!(prompt.input.contains("Additional context is: \nPhysics\n\n"));
}
