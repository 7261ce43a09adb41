pub mod dictionary;
pub mod document;
pub mod tokenizer;

use std::path::Path;

use thiserror::Error;

use crate::UnknownWord;
use dictionary::{Dictionary, ImportStrategy};
use document::DocumentBuffer;
use tokenizer::Tokens;

/// Errors surfaced by the engine. A word that is simply not in the
/// dictionary is not an error; lookups and scans report that as `None`.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("replacement range {start}..{end} is out of bounds for a document of {len} characters")]
    Range {
        start: usize,
        end: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, CheckError>;

/// Scans a document for words missing from a dictionary.
///
/// The checker owns its dictionary and document and keeps a scan cursor
/// between calls, so a sequence of `spell_check(true)` calls walks the
/// unknown words left to right exactly once each. Edits through
/// `replace_text` move the cursor past the corrected span.
#[derive(Debug, Default)]
pub struct SpellChecker {
    dictionary: Dictionary,
    document: DocumentBuffer,
    scan_cursor: usize,
}

impl SpellChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the dictionary from a word list with the chosen strategy.
    pub fn import_dictionary(&mut self, path: &Path, strategy: ImportStrategy) -> Result<()> {
        self.dictionary.import_file(path, strategy)
    }

    /// Write the dictionary in its tree-shape-preserving format.
    pub fn save_dictionary(&self, path: &Path) -> Result<()> {
        self.dictionary.save(path)
    }

    /// Load a document and reset the scan to its beginning.
    pub fn load_document(&mut self, path: &Path) -> Result<()> {
        self.document.load(path)?;
        self.scan_cursor = 0;
        Ok(())
    }

    pub fn save_document(&self, path: &Path) -> Result<()> {
        self.document.save(path)
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Replace the character span `[start, end)` of the document and resume
    /// scanning right after the replacement, so the corrected span is never
    /// re-flagged.
    pub fn replace_text(&mut self, start: usize, end: usize, replacement: &str) -> Result<()> {
        self.document.replace(start, end, replacement)?;
        self.scan_cursor = start + replacement.chars().count();
        Ok(())
    }

    /// Add a word to the dictionary; later scans treat it as known.
    pub fn add_word_to_dictionary(&mut self, word: &str) {
        self.dictionary.add(word);
    }

    /// Report the next word not present in the dictionary.
    ///
    /// With `continue_search` the scan resumes at the cursor; without it the
    /// cursor is reset and the whole document is scanned. The cursor ends up
    /// just past the reported word, so repeated `spell_check(true)` calls
    /// yield each unknown word once, in document order, then `None`.
    pub fn spell_check(&mut self, continue_search: bool) -> Option<UnknownWord> {
        if !continue_search {
            self.scan_cursor = 0;
        }

        let text = self.document.text();
        for token in Tokens::from_offset(text, self.scan_cursor) {
            if let Some(bounds) = self.dictionary.find(&token.text) {
                self.scan_cursor = token.offset + token.text.chars().count();
                return Some(UnknownWord {
                    word: token.text,
                    offset: token.offset,
                    predecessor: bounds.predecessor,
                    successor: bounds.successor,
                });
            }
        }

        None
    }
}
