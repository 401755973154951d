//! History filter criteria and the textual filter syntax used by the CLI.
//!
//! # Syntax
//!
//! ```text
//! filter  := term*
//! term    := lang:<tag> | fav:<yes|no> | text:<value> | <word> | "quoted words"
//! value   := word | "quoted value"
//! ```
//!
//! Bare words and quoted strings are joined with single spaces into the
//! prompt substring. Field names are case-insensitive (`lang`, `language`,
//! `fav`, `favorite`, `text`). A word containing `:` whose prefix is not a
//! known field name is treated as plain text, so `http://` can be searched.
//!
//! # Examples
//!
//! ```rust
//! # use code_copilot::history::HistoryFilter;
//! let filter = HistoryFilter::parse("lang:python fib").unwrap();
//! assert_eq!(filter.text_contains.as_deref(), Some("fib"));
//!
//! let filter = HistoryFilter::parse("fav:yes \"binary search\"").unwrap();
//! assert!(filter.favorites_only);
//! ```

use anyhow::{Result, anyhow, bail};

use crate::models::{HistoryEntry, LanguageFilter};

/// Criteria for a history query. All present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Case-insensitive substring of the prompt
    pub text_contains: Option<String>,
    pub language: LanguageFilter,
    pub favorites_only: bool,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text_contains = Some(text.into());
        self
    }

    pub fn language(mut self, language: impl Into<LanguageFilter>) -> Self {
        self.language = language.into();
        self
    }

    pub fn favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text_contains.as_deref().is_none_or(str::is_empty)
            && self.language == LanguageFilter::All
            && !self.favorites_only
    }

    /// Precompute the lowercase needle once per query
    pub fn matcher(&self) -> FilterMatcher<'_> {
        FilterMatcher {
            needle: self.text_contains.as_ref().map(|t| t.to_lowercase()),
            filter: self,
        }
    }

    /// Parse the textual filter syntax
    pub fn parse(input: &str) -> Result<Self> {
        let mut filter = Self::new();
        let mut text_parts: Vec<String> = Vec::new();
        let mut language_set = false;
        let mut favorite_set = false;

        for token in tokenize(input)? {
            match token {
                Token::Text(text) => text_parts.push(text),
                Token::Field { field: Field::Language, value } => {
                    if language_set {
                        bail!("Language filter specified more than once");
                    }
                    filter.language = LanguageFilter::from_tag(&value);
                    language_set = true;
                }
                Token::Field { field: Field::Favorite, value } => {
                    if favorite_set {
                        bail!("Favorite filter specified more than once");
                    }
                    filter.favorites_only = parse_flag(&value)?;
                    favorite_set = true;
                }
                Token::Field { field: Field::Text, value } => text_parts.push(value),
            }
        }

        if !text_parts.is_empty() {
            filter.text_contains = Some(text_parts.join(" "));
        }

        Ok(filter)
    }
}

/// A filter with its text needle already case-folded
#[derive(Debug, Clone)]
pub struct FilterMatcher<'a> {
    needle: Option<String>,
    filter: &'a HistoryFilter,
}

impl FilterMatcher<'_> {
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        let text_ok = self
            .needle
            .as_deref()
            .is_none_or(|needle| entry.prompt.to_lowercase().contains(needle));

        text_ok
            && self.filter.language.matches(&entry.language)
            && (!self.filter.favorites_only || entry.favorite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Language,
    Favorite,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Field { field: Field, value: String },
    Text(String),
}

fn parse_field(name: &str) -> Option<Field> {
    match name.to_lowercase().as_str() {
        "lang" | "language" => Some(Field::Language),
        "fav" | "favorite" => Some(Field::Favorite),
        "text" => Some(Field::Text),
        _ => None,
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => Err(anyhow!("Invalid favorite value: '{}' (expected yes or no)", value)),
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);

        if word.starts_with('"') {
            tokens.push(Token::Text(read_quoted_value(&mut chars, &word)?));
            continue;
        }

        let field = word.find(':').and_then(|pos| parse_field(&word[..pos]).map(|f| (f, pos)));
        match field {
            Some((field, colon_pos)) => {
                let mut value = word[colon_pos + 1..].to_string();
                if value.starts_with('"') {
                    value = read_quoted_value(&mut chars, &value)?;
                }
                if value.is_empty() {
                    bail!("Missing value for filter: {}", word);
                }
                tokens.push(Token::Field { field, value });
            }
            None => tokens.push(Token::Text(word)),
        }
    }

    Ok(tokens)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Read a quoted value, handling the case where the word already holds the opening quote
fn read_quoted_value(
    chars: &mut std::iter::Peekable<std::str::Chars>,
    initial: &str,
) -> Result<String> {
    let mut value = initial[1..].to_string();

    if let Some(quote_pos) = value.find('"') {
        let rest = &value[quote_pos + 1..];
        if !rest.is_empty() {
            bail!("Unexpected text after closing quote: {}", rest);
        }
        value.truncate(quote_pos);
        return Ok(value);
    }

    while let Some(ch) = chars.next() {
        if ch == '"' {
            if chars.peek().is_some_and(|next| !next.is_whitespace()) {
                bail!("Unexpected text after closing quote: {}", read_word(chars));
            }
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}
