//! Heuristic prompt classifier.
//!
//! Decides whether a free-text prompt plausibly asks for code before anything
//! is sent to the generation backend. Matching is purely lexical:
//!
//! 1. The prompt is normalized: case-folded, punctuation turned into word
//!    boundaries (`+` and `#` survive after a letter so `c++` and `c#` match).
//! 2. Positive and negative [`TermSet`]s are matched as whole words or
//!    contiguous word sequences.
//! 3. A prompt is accepted iff at least one positive term matched. Negative
//!    terms never veto a positive match; they only explain a rejection.

pub mod terms;

use std::sync::LazyLock;

use tracing::debug;

pub use terms::{ClassifierTerms, NEGATIVE_TERMS, POSITIVE_TERMS, TermSet};

/// Notice shown when a prompt is rejected
pub const REJECTION_NOTICE: &str = "This app is designed for code generation only. Please ask \
coding-related questions or describe the code you want to generate. Examples: 'Create a function \
to sort an array', 'Write a React component', 'Generate a Python class', etc.";

static DEFAULT_CLASSIFIER: LazyLock<PromptClassifier> = LazyLock::new(PromptClassifier::default);

/// Classify with the built-in term lists
pub fn classify(prompt: &str) -> bool {
    DEFAULT_CLASSIFIER.classify(prompt)
}

/// Split text into lowercase words
pub fn normalize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else if (ch == '+' || ch == '#') && !current.is_empty() {
            current.push(ch);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Detailed classification outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assessment {
    pub positive_matches: Vec<String>,
    pub negative_matches: Vec<String>,
}

impl Assessment {
    /// Positive signals dominate: any positive match accepts
    pub fn is_code_related(&self) -> bool {
        !self.positive_matches.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptClassifier {
    terms: ClassifierTerms,
}

impl PromptClassifier {
    pub fn new(terms: ClassifierTerms) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &ClassifierTerms {
        &self.terms
    }

    pub fn terms_mut(&mut self) -> &mut ClassifierTerms {
        &mut self.terms
    }

    pub fn classify(&self, prompt: &str) -> bool {
        self.assess(prompt).is_code_related()
    }

    pub fn assess(&self, prompt: &str) -> Assessment {
        let words = normalize(prompt);
        if words.is_empty() {
            return Assessment::default();
        }

        let assessment = Assessment {
            positive_matches: self.terms.positive.find_in(&words),
            negative_matches: self.terms.negative.find_in(&words),
        };

        debug!(
            positive = ?assessment.positive_matches,
            negative = ?assessment.negative_matches,
            accepted = assessment.is_code_related(),
            "classified prompt"
        );

        assessment
    }
}
