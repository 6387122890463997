/*!
 * Tests for the secondary translation strategies
 */

use crate::common::memory_graph::MemoryGraph;
use skos_translator::errors::ProviderError;
use skos_translator::providers::mock::{DummySecondary, MockSecondary};
use skos_translator::translation::strategies::hierarchy::{NO_LABEL, broader_chain};
use skos_translator::translation::strategies::{
    BatchStrategy, HierarchyStrategy, IndividualStrategy, SecondaryOutput, SecondaryStrategy,
};
use skos_translator::translation::TermContext;
use skos_translator::vocabulary::{Concept, ConceptGraph, DEFINITION, PREF_LABEL, TermProperties};

const FORCE: &str = "ex:force";

fn physics_graph() -> MemoryGraph {
    MemoryGraph::new()
        .with_concept("ex:physics", TermProperties::new().with(PREF_LABEL, "de", "Physik"))
        .with_concept("ex:mechanics", TermProperties::new().with(PREF_LABEL, "fr", "mécanique"))
        .with_concept("ex:unnamed", TermProperties::new())
        .with_concept(
            FORCE,
            TermProperties::new()
                .with(PREF_LABEL, "de", "Kraft")
                .with(PREF_LABEL, "fr", "force")
                .with(DEFINITION, "de", "Ursache einer Beschleunigung"),
        )
        .with_broader(FORCE, "ex:unnamed")
        .with_broader("ex:unnamed", "ex:mechanics")
        .with_broader("ex:mechanics", "ex:physics")
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

fn echo_term_line(prompt: &skos_translator::translation::prompts::Prompt) -> Option<String> {
    prompt
        .input
        .lines()
        .find_map(|line| line.strip_prefix("Term to translate: "))
        .map(|label| format!("{} (en)", label))
}

/// Test the individual strategy with descriptions and general context
#[tokio::test]
async fn test_individual_shouldPreferDescriptionOverGeneralContext() {
    let graph = physics_graph();
    let concept = Concept::new(FORCE);
    let props = graph.term_properties(&concept);
    let term = term_context(&graph, &concept, &props, Some("Mechanics"));
    let secondary = MockSecondary::new("openai").with_responder(echo_term_line);

    let output = IndividualStrategy::new().translate(&term, &secondary).await.unwrap();

    assert_eq!(
        output,
        SecondaryOutput::PerLanguage(vec![
            ("de".to_string(), Some("Kraft (en)".to_string())),
            ("fr".to_string(), Some("force (en)".to_string())),
        ])
    );
    let prompts = secondary.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].input.contains("Description of the term that should be translated: Ursache einer Beschleunigung"));
    // No French description, so the German one is reused before the general context
    assert!(prompts[1].input.contains("Description of the term that should be translated: Ursache einer Beschleunigung"));
    assert!(!prompts[1].input.contains("General context"));
}

/// Test that a failed request leaves the language without a translation
#[tokio::test]
async fn test_individual_withFailingRequest_shouldRecordNone() {
    let graph = physics_graph();
    let concept = Concept::new(FORCE);
    let props = graph.term_properties(&concept);
    let term = term_context(&graph, &concept, &props, None);
    let secondary = MockSecondary::new("ollama")
        .with_result(Err(ProviderError::ConnectionError("refused".to_string())))
        .with_answers(&["\"force\"\n"]);

    let output = IndividualStrategy::new().translate(&term, &secondary).await.unwrap();

    assert_eq!(
        output,
        SecondaryOutput::PerLanguage(vec![
            ("de".to_string(), None),
            ("fr".to_string(), Some("force".to_string())),
        ])
    );
}

/// Test that an exhausted quota propagates out of the strategy
#[tokio::test]
async fn test_individual_withRateLimit_shouldFail() {
    let graph = physics_graph();
    let concept = Concept::new(FORCE);
    let props = graph.term_properties(&concept);
    let term = term_context(&graph, &concept, &props, None);
    let secondary = MockSecondary::new("openai")
        .with_result(Err(ProviderError::RateLimitExceeded("429".to_string())));

    let result = IndividualStrategy::new().translate(&term, &secondary).await;
    assert!(matches!(result, Err(ProviderError::RateLimitExceeded(_))));
    assert_eq!(secondary.call_count(), 1);
}

/// Test the single batch prompt
#[tokio::test]
async fn test_batch_shouldSendOneSectionPerLanguage() {
    let graph = physics_graph();
    let concept = Concept::new(FORCE);
    let props = graph.term_properties(&concept);
    let term = term_context(&graph, &concept, &props, None);
    let secondary = MockSecondary::new("openai").with_answers(&["force"]);

    let output = BatchStrategy::new().translate(&term, &secondary).await.unwrap();

    assert_eq!(output, SecondaryOutput::Single(Some("force".to_string())));
    let prompts = secondary.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].input.contains("Label (in German) of term to translate:\n- Kraft\nContext: Ursache einer Beschleunigung\n"));
    assert!(prompts[0].input.contains("Label (in French) of term to translate:\n- force\n"));
}

/// Test that the chain lists ancestors top-level first
#[test]
fn test_broaderChain_shouldListAncestorsTopFirst() {
    let graph = physics_graph();
    let chain = broader_chain(&graph, &Concept::new(FORCE), "de");
    assert_eq!(chain, vec!["Physik".to_string(), "mécanique".to_string(), NO_LABEL.to_string()]);
}

/// Test that cyclic hierarchies terminate
#[test]
fn test_broaderChain_withCycle_shouldStop() {
    let graph = MemoryGraph::new()
        .with_concept("ex:a", TermProperties::new().with(PREF_LABEL, "en", "a"))
        .with_concept("ex:b", TermProperties::new().with(PREF_LABEL, "en", "b"))
        .with_broader("ex:a", "ex:b")
        .with_broader("ex:b", "ex:a");

    let chain = broader_chain(&graph, &Concept::new("ex:a"), "en");
    assert_eq!(chain, vec!["b".to_string()]);
}

/// Test one hierarchy prompt per label language
#[tokio::test]
async fn test_hierarchy_perLanguage_shouldEmbedTermInChain() {
    let graph = physics_graph();
    let concept = Concept::new(FORCE);
    let props = graph.term_properties(&concept);
    let term = term_context(&graph, &concept, &props, None);
    let secondary = MockSecondary::new("openai").with_answers(&["force", "Force"]);

    let output = HierarchyStrategy::new(true).translate(&term, &secondary).await.unwrap();

    assert_eq!(
        output,
        SecondaryOutput::PerLanguage(vec![
            ("de".to_string(), Some("force".to_string())),
            ("fr".to_string(), Some("Force".to_string())),
        ])
    );
    let prompts = secondary.prompts();
    assert!(prompts[0].input.starts_with("Give me a single translation of the German term Kraft to the English language."));
    assert!(prompts[0].input.contains("Physik\nmécanique\n[No label]\nKraft"));
    assert!(prompts[1].input.contains("Physik\nmécanique\n[No label]\nforce"));
}

/// Test the combined hierarchy prompt
#[tokio::test]
async fn test_hierarchy_combined_shouldAskOnce() {
    let graph = physics_graph();
    let concept = Concept::new(FORCE);
    let props = graph.term_properties(&concept);
    let term = term_context(&graph, &concept, &props, None);
    let secondary = MockSecondary::new("openai").with_answers(&["force"]);

    let output = HierarchyStrategy::new(false).translate(&term, &secondary).await.unwrap();

    assert_eq!(output, SecondaryOutput::Single(Some("force".to_string())));
    let prompts = secondary.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].input.contains("Hierarchy (from top to bottom) for German (de):"));
    assert!(prompts[0].input.contains("Hierarchy (from top to bottom) for French (fr):"));
}

/// Test that concepts without a broader parent get the individual output
#[tokio::test]
async fn test_hierarchy_withoutBroader_shouldMatchIndividual() {
    let graph = MemoryGraph::new().with_concept(
        "ex:top",
        TermProperties::new().with(PREF_LABEL, "de", "Kraft").with(PREF_LABEL, "fr", "force"),
    );
    let concept = Concept::new("ex:top");
    let props = graph.term_properties(&concept);
    let term = term_context(&graph, &concept, &props, Some("Physics"));

    let hierarchy = HierarchyStrategy::default().translate(&term, &DummySecondary).await.unwrap();
    let individual = IndividualStrategy::new().translate(&term, &DummySecondary).await.unwrap();

    assert_eq!(hierarchy, individual);
    assert_eq!(
        hierarchy,
        SecondaryOutput::PerLanguage(vec![
            ("de".to_string(), Some("Kraft_dummy".to_string())),
            ("fr".to_string(), Some("force_dummy".to_string())),
        ])
    );
}
