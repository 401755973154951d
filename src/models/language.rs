use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Extension used when a tag has no known mapping
pub const FALLBACK_EXTENSION: &str = ".txt";

/// Target language for a generation request.
///
/// The ten supported languages are closed variants. Any other tag is kept
/// verbatim in [`LanguageTag::Unknown`] so persisted history round-trips
/// unchanged, but it has no file extension of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum LanguageTag {
    #[default]
    JavaScript,
    Python,
    TypeScript,
    Java,
    Cpp,
    Go,
    Rust,
    CSharp,
    Php,
    Ruby,
    Unknown(String),
}

impl LanguageTag {
    /// All supported languages, in the order they are offered for selection
    pub const SUPPORTED: [LanguageTag; 10] = [
        LanguageTag::JavaScript,
        LanguageTag::Python,
        LanguageTag::TypeScript,
        LanguageTag::Java,
        LanguageTag::Cpp,
        LanguageTag::Go,
        LanguageTag::Rust,
        LanguageTag::CSharp,
        LanguageTag::Php,
        LanguageTag::Ruby,
    ];

    /// Parse a tag case-insensitively. Never fails: unrecognized tags become `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "javascript" => Self::JavaScript,
            "python" => Self::Python,
            "typescript" => Self::TypeScript,
            "java" => Self::Java,
            "cpp" => Self::Cpp,
            "go" => Self::Go,
            "rust" => Self::Rust,
            "csharp" => Self::CSharp,
            "php" => Self::Php,
            "ruby" => Self::Ruby,
            _ => Self::Unknown(tag.to_string()),
        }
    }

    /// Canonical wire form (lowercase for known tags, verbatim for unknown ones)
    pub fn as_str(&self) -> &str {
        match self {
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::TypeScript => "typescript",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::CSharp => "csharp",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::Unknown(tag) => tag,
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::Python => "Python",
            Self::TypeScript => "TypeScript",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::CSharp => "C#",
            Self::Php => "PHP",
            Self::Ruby => "Ruby",
            Self::Unknown(tag) => tag,
        }
    }

    /// File extension (with leading dot) for generated artifacts
    pub fn extension(&self) -> &'static str {
        match self {
            Self::JavaScript => ".js",
            Self::Python => ".py",
            Self::TypeScript => ".ts",
            Self::Java => ".java",
            Self::Cpp => ".cpp",
            Self::Go => ".go",
            Self::Rust => ".rs",
            Self::CSharp => ".cs",
            Self::Php => ".php",
            Self::Ruby => ".rb",
            Self::Unknown(_) => FALLBACK_EXTENSION,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl Serialize for LanguageTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LanguageTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Language criterion of a history query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LanguageFilter {
    /// Matches every entry (`"all"` on the wire)
    #[default]
    All,
    Only(LanguageTag),
}

impl LanguageFilter {
    /// `"all"` (any case) means no language restriction
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(LanguageTag::from_tag(tag))
        }
    }

    /// Unknown tags compare trimmed and case-insensitively; stored tags keep
    /// their original spelling
    pub fn matches(&self, language: &LanguageTag) -> bool {
        match (self, language) {
            (Self::All, _) => true,
            (Self::Only(LanguageTag::Unknown(wanted)), LanguageTag::Unknown(tag)) => {
                wanted.trim().eq_ignore_ascii_case(tag.trim())
            }
            (Self::Only(wanted), _) => wanted == language,
        }
    }
}

impl FromStr for LanguageFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<LanguageTag> for LanguageFilter {
    fn from(tag: LanguageTag) -> Self {
        Self::Only(tag)
    }
}
