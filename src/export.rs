//! Saving generated code as a file named after its language

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{HistoryEntry, LanguageTag};

const EXPORT_STEM: &str = "generated-code";

/// `generated-code` plus the language's extension, e.g. `generated-code.py`
pub fn export_file_name(language: &LanguageTag) -> String {
    format!("{}{}", EXPORT_STEM, language.extension())
}

/// Write the entry's code into `dir`, creating the directory if needed.
///
/// An existing file of the same name is replaced. Returns the written path.
pub fn export_entry(entry: &HistoryEntry, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_file_name(&entry.language));
    fs::write(&path, &entry.code)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(id = %entry.id, path = %path.display(), "exported entry");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;
    use crate::models::GenerationResult;

    fn entry(language: LanguageTag, code: &str) -> HistoryEntry {
        HistoryEntry::from_result(
            GenerationResult {
                prompt: "binary search".to_string(),
                code: code.to_string(),
                requested_language: language,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_file_names() {
        assert_eq!(export_file_name(&LanguageTag::Python), "generated-code.py");
        assert_eq!(export_file_name(&LanguageTag::CSharp), "generated-code.cs");
        assert_eq!(export_file_name(&LanguageTag::from_tag("elixir")), "generated-code.txt");
    }

    #[test]
    fn test_export_writes_code() {
        let dir = TempDir::new().unwrap();
        let code = "fn main() {\n    println!(\"hi\");\n}\n";

        let path = export_entry(&entry(LanguageTag::Rust, code), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("generated-code.rs"));
        assert_eq!(fs::read_to_string(&path).unwrap(), code);
    }

    #[test]
    fn test_export_creates_missing_dir_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("code");

        export_entry(&entry(LanguageTag::Go, "package a"), &nested).unwrap();
        let path = export_entry(&entry(LanguageTag::Go, "package b"), &nested).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "package b");
    }
}
