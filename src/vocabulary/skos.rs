/*!
 * In-memory SKOS graph backed by oxrdf quads.
 *
 * The document is kept as a flat quad list in parse order plus a subject
 * index, so serialization writes the original statements first and the
 * added labels after them.
 */

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use oxrdf::{BlankNode, GraphName, Literal, NamedNode, Quad, Subject, Term};
use oxrdfio::{RdfFormat, RdfParser, RdfSerializer};

use super::{Concept, ConceptGraph, SKOS_NS, TERM_PROPERTIES, TermProperties};
use crate::errors::GraphError;
use crate::file_utils::FileManager;
use crate::language_utils::DEFAULT_LABEL_LANGUAGE;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const DCTERMS_DESCRIPTION: &str = "http://purl.org/dc/terms/description";
const DC_DESCRIPTION: &str = "http://purl.org/dc/elements/1.1/description";

/// A parsed vocabulary document
#[derive(Debug)]
pub struct SkosGraph {
    quads: Vec<Quad>,
    by_subject: HashMap<Subject, Vec<usize>>,
    /// Namespace prefixes declared in the input, in declaration order
    prefixes: Vec<(String, String)>,
    format: RdfFormat,
}

impl SkosGraph {
    /// Load a vocabulary file, picking the syntax from its extension
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let format = FileManager::detect_rdf_format(path)?;
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), format)
    }

    /// Parse a document from any reader
    pub fn from_reader(reader: impl Read, format: RdfFormat) -> Result<Self, GraphError> {
        let mut graph = Self {
            quads: Vec::new(),
            by_subject: HashMap::new(),
            prefixes: Vec::new(),
            format,
        };
        let mut quads = RdfParser::from_format(format).for_reader(reader);
        for quad in &mut quads {
            let quad = quad.map_err(|e| GraphError::Parse(e.to_string()))?;
            graph.insert(quad);
        }
        graph.prefixes = quads
            .prefixes()
            .map(|(name, iri)| (name.to_string(), iri.to_string()))
            .collect();
        debug!("Parsed {} statements ({:?})", graph.quads.len(), format);
        Ok(graph)
    }

    /// Parse a document held in memory
    pub fn parse_str(text: &str, format: RdfFormat) -> Result<Self, GraphError> {
        Self::from_reader(text.as_bytes(), format)
    }

    /// Syntax the document was read in
    pub fn format(&self) -> RdfFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Write the graph to a file in its original syntax
    pub fn save(&self, path: &Path) -> Result<(), GraphError> {
        let file = File::create(path)?;
        let mut writer = self.write_to(BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }

    /// Prefixes carried over from the input document
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Serialize into a writer and hand it back
    pub fn write_to<W: Write>(&self, writer: W) -> Result<W, GraphError> {
        let mut serializer = RdfSerializer::from_format(self.format);
        for (name, iri) in &self.prefixes {
            serializer = serializer
                .with_prefix(name.as_str(), iri.as_str())
                .map_err(|e| GraphError::InvalidPrefix(format!("{}: <{}> ({})", name, iri, e)))?;
        }
        let mut serializer = serializer.for_writer(writer);
        for quad in &self.quads {
            serializer.serialize_quad(quad)?;
        }
        Ok(serializer.finish()?)
    }

    fn insert(&mut self, quad: Quad) {
        self.by_subject
            .entry(quad.subject.clone())
            .or_default()
            .push(self.quads.len());
        self.quads.push(quad);
    }

    fn statements<'a>(&'a self, subject: &Subject) -> impl Iterator<Item = &'a Quad> + 'a {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .map(|&i| &self.quads[i])
    }

    fn subjects_of_type(&self, class: &str) -> Vec<Subject> {
        let mut seen = HashSet::new();
        self.quads
            .iter()
            .filter(|q| q.predicate.as_str() == RDF_TYPE)
            .filter(|q| matches!(&q.object, Term::NamedNode(n) if n.as_str() == class))
            .filter(|q| seen.insert(q.subject.clone()))
            .map(|q| q.subject.clone())
            .collect()
    }
}

fn subject_of(concept: &Concept) -> Option<Subject> {
    match concept.id().strip_prefix("_:") {
        Some(id) => BlankNode::new(id).ok().map(Subject::from),
        None => NamedNode::new(concept.id()).ok().map(Subject::from),
    }
}

fn concept_of_subject(subject: &Subject) -> Option<Concept> {
    match subject {
        Subject::NamedNode(node) => Some(Concept::new(node.as_str())),
        Subject::BlankNode(node) => Some(Concept::new(format!("_:{}", node.as_str()))),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

fn concept_of_term(term: &Term) -> Option<Concept> {
    match term {
        Term::NamedNode(node) => Some(Concept::new(node.as_str())),
        Term::BlankNode(node) => Some(Concept::new(format!("_:{}", node.as_str()))),
        _ => None,
    }
}

impl ConceptGraph for SkosGraph {
    fn concepts(&self) -> Vec<Concept> {
        self.subjects_of_type(&format!("{}Concept", SKOS_NS))
            .iter()
            .filter_map(concept_of_subject)
            .collect()
    }

    fn term_properties(&self, concept: &Concept) -> TermProperties {
        let mut props = TermProperties::new();
        let Some(subject) = subject_of(concept) else {
            return props;
        };
        for quad in self.statements(&subject) {
            let Some(local) = quad.predicate.as_str().strip_prefix(SKOS_NS) else {
                continue;
            };
            if !TERM_PROPERTIES.contains(&local) {
                continue;
            }
            if let Term::Literal(literal) = &quad.object {
                let language = literal.language().unwrap_or(DEFAULT_LABEL_LANGUAGE);
                props.push(local, language, literal.value());
            }
        }
        props
    }

    fn vocabulary_context(&self) -> Option<String> {
        let schemes = self.subjects_of_type(&format!("{}ConceptScheme", SKOS_NS));
        for predicate in [DCTERMS_DESCRIPTION, DC_DESCRIPTION] {
            let found = schemes.iter().find_map(|scheme| {
                self.statements(scheme)
                    .filter(|q| q.predicate.as_str() == predicate)
                    .find_map(|q| match &q.object {
                        Term::Literal(literal) if !literal.value().trim().is_empty() => {
                            Some(literal.value().trim().to_string())
                        }
                        _ => None,
                    })
            });
            if found.is_some() {
                return found;
            }
        }
        None
    }

    fn broader(&self, concept: &Concept) -> Option<Concept> {
        let subject = subject_of(concept)?;
        let broader = format!("{}broader", SKOS_NS);
        self.statements(&subject)
            .filter(|q| q.predicate.as_str() == broader)
            .find_map(|q| concept_of_term(&q.object))
    }

    fn add_literal(
        &mut self,
        concept: &Concept,
        property: &str,
        text: &str,
        language: &str,
    ) -> Result<(), GraphError> {
        let subject = subject_of(concept)
            .filter(|s| self.by_subject.contains_key(s))
            .ok_or_else(|| GraphError::UnknownConcept(concept.to_string()))?;
        let predicate = NamedNode::new(format!("{}{}", SKOS_NS, property))
            .map_err(|e| GraphError::InvalidLiteral(e.to_string()))?;
        let literal = Literal::new_language_tagged_literal(text, language)
            .map_err(|e| GraphError::InvalidLiteral(format!("{}@{}: {}", text, language, e)))?;

        self.insert(Quad::new(subject, predicate, literal, GraphName::DefaultGraph));
        Ok(())
    }
}
