//! Signal term lists for the prompt classifier.
//!
//! The lists are plain data. Extending them never requires touching the
//! decision rule in [`super::PromptClassifier`].

use std::collections::HashSet;

use super::normalize;

/// Terms that indicate a prompt describes a coding task
pub const POSITIVE_TERMS: &[&str] = &[
    // Languages and ecosystems
    "javascript",
    "js",
    "typescript",
    "ts",
    "python",
    "java",
    "c",
    "c++",
    "cpp",
    "c#",
    "csharp",
    "go",
    "golang",
    "rust",
    "php",
    "ruby",
    "kotlin",
    "swift",
    "scala",
    "haskell",
    "perl",
    "lua",
    "dart",
    "elixir",
    "sql",
    "html",
    "css",
    "bash",
    "shell",
    "powershell",
    "react",
    "vue",
    "angular",
    "node",
    "nodejs",
    "django",
    "flask",
    "rails",
    "express",
    "jquery",
    "json",
    "yaml",
    "xml",
    "csv",
    "regex",
    // Coding verbs
    "write",
    "implement",
    "create a function",
    "refactor",
    "debug",
    "generate",
    "compile",
    "parse",
    "sort",
    "iterate",
    "optimize",
    "validate",
    "serialize",
    "deserialize",
    // Coding nouns
    "code",
    "coding",
    "program",
    "programming",
    "function",
    "method",
    "class",
    "object",
    "struct",
    "interface",
    "variable",
    "constant",
    "pointer",
    "algorithm",
    "api",
    "endpoint",
    "script",
    "parser",
    "compiler",
    "loop",
    "recursion",
    "recursive",
    "snippet",
    "syntax",
    "bug",
    "exception",
    "module",
    "library",
    "framework",
    "component",
    "database",
    "query",
    "backend",
    "frontend",
    "server",
    "http",
    "cli",
    "command line",
    "async",
    "thread",
    "callback",
    "lambda",
    "unit test",
    "test case",
    "crud",
    "calculator",
    "fibonacci",
    "factorial",
    "palindrome",
    "prime number",
    "binary search",
    // Data structures and types
    "array",
    "string",
    "integer",
    "float",
    "boolean",
    "linked list",
    "stack",
    "queue",
    "heap",
    "hash map",
    "hashmap",
    "hash table",
    "dictionary",
    "binary tree",
    "graph",
    "matrix",
    "tuple",
];

/// Terms from unrelated domains. Only ever a tie-breaker, never a veto.
pub const NEGATIVE_TERMS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "thanks",
    "thank you",
    "how are you",
    "good morning",
    "weather",
    "forecast",
    "recipe",
    "cook",
    "cooking",
    "bake",
    "restaurant",
    "movie",
    "film",
    "song",
    "music",
    "lyrics",
    "sport",
    "football",
    "soccer",
    "basketball",
    "celebrity",
    "gossip",
    "news",
    "politics",
    "election",
    "horoscope",
    "zodiac",
    "dating",
    "vacation",
    "travel",
    "hotel",
    "flight",
    "diet",
    "workout",
    "poem",
    "joke",
    "story",
    "capital of",
];

/// A set of signal terms, split into single words and multi-word phrases
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    words: HashSet<String>,
    phrases: Vec<Vec<String>>,
}

impl TermSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_terms<'a>(terms: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::new();
        for term in terms {
            set.add(term);
        }
        set
    }

    /// Add a term. It is normalized the same way prompts are, so `"Create a Function!"`
    /// and `"create a function"` are the same phrase. Terms that normalize to nothing are ignored.
    pub fn add(&mut self, term: &str) {
        let mut words = normalize(term);
        match words.len() {
            0 => {}
            1 => {
                self.words.insert(words.remove(0));
            }
            _ => {
                if !self.phrases.contains(&words) {
                    self.phrases.push(words);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect every term of this set found as a whole-word match in `words`.
    /// Matches are reported once each, in order of first appearance.
    pub fn find_in(&self, words: &[String]) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();

        for (i, word) in words.iter().enumerate() {
            if let Some(term) = self.match_word(word)
                && !found.contains(&term)
            {
                found.push(term);
            }

            for phrase in &self.phrases {
                if words[i..].starts_with(phrase) {
                    let term = phrase.join(" ");
                    if !found.contains(&term) {
                        found.push(term);
                    }
                }
            }
        }

        found
    }

    /// Single-word lookup with a plain English plural fallback (`arrays`, `classes`)
    fn match_word(&self, word: &str) -> Option<String> {
        if self.words.contains(word) {
            return Some(word.to_string());
        }
        for suffix in ["es", "s"] {
            if let Some(stem) = word.strip_suffix(suffix)
                && stem.len() > 1
                && self.words.contains(stem)
            {
                return Some(stem.to_string());
            }
        }
        None
    }
}

/// Positive and negative term sets used by the classifier
#[derive(Debug, Clone)]
pub struct ClassifierTerms {
    pub positive: TermSet,
    pub negative: TermSet,
}

impl ClassifierTerms {
    pub fn new(positive: TermSet, negative: TermSet) -> Self {
        Self { positive, negative }
    }
}

impl Default for ClassifierTerms {
    fn default() -> Self {
        Self {
            positive: TermSet::from_terms(POSITIVE_TERMS.iter().copied()),
            negative: TermSet::from_terms(NEGATIVE_TERMS.iter().copied()),
        }
    }
}
