//! Fenced diagram block extraction.
//!
//! A block opens with a fence line carrying the language tag (```` ```mermaid ````)
//! and closes at the next ```` ``` ````. Blocks are numbered from zero in
//! document order.

use std::path::Path;

use regex::Regex;

use crate::{Error, Result};

/// Extracts fenced blocks of one diagram language from text documents.
#[derive(Debug, Clone)]
pub struct DiagramTextExtractor {
    language: String,
    pattern: Regex,
}

impl DiagramTextExtractor {
    pub fn new(language: &str) -> Self {
        let pattern = Regex::new(&format!(r"(?s)```{}\r?\n(.*?)```", regex::escape(language)))
            .expect("escaped fence pattern is valid");
        Self {
            language: language.to_string(),
            pattern,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// All blocks in document order, trimmed of surrounding whitespace.
    pub fn blocks<'a>(&self, document: &'a str) -> Vec<&'a str> {
        self.pattern
            .captures_iter(document)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .collect()
    }

    /// The block at zero-based `index`.
    pub fn block<'a>(&self, document: &'a str, index: usize) -> Result<&'a str> {
        let blocks = self.blocks(document);
        blocks.get(index).copied().ok_or(Error::Extraction {
            language: self.language.clone(),
            found: blocks.len(),
            required: index + 1,
        })
    }

    /// Read `path` and return the block at `index`.
    pub fn block_from_file(&self, path: &Path, index: usize) -> Result<String> {
        if !path.exists() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }
        let document = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let block = self.block(&document, index)?;
        log::debug!(
            "Extracted {} block #{} from {} ({} bytes)",
            self.language,
            index,
            path.display(),
            block.len()
        );
        Ok(block.to_string())
    }
}

impl Default for DiagramTextExtractor {
    fn default() -> Self {
        Self::new("mermaid")
    }
}
