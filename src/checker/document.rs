use std::fs;
use std::path::Path;

use crate::checker::{CheckError, Result};

/// In-memory document text with character-indexed editing.
///
/// The buffer round-trips file contents verbatim, interior whitespace and
/// line separators included. All offsets are character indices, matching
/// the tokenizer.
#[derive(Debug, Default)]
pub struct DocumentBuffer {
    text: String,
}

impl DocumentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        DocumentBuffer { text: text.into() }
    }

    /// Read the entire file verbatim into the buffer.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.text = fs::read_to_string(path)?;
        Ok(())
    }

    /// Write the buffer verbatim.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.text)?;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Splice `replacement` over the half-open character range
    /// `[start, end)`. The replacement may grow or shrink the buffer.
    /// Requires `start <= end <= length`, otherwise a range error.
    pub fn replace(&mut self, start: usize, end: usize, replacement: &str) -> Result<()> {
        let len = self.text.chars().count();
        if start > end || end > len {
            return Err(CheckError::Range { start, end, len });
        }

        let byte_start = byte_offset(&self.text, start);
        let byte_end = byte_offset(&self.text, end);
        self.text.replace_range(byte_start..byte_end, replacement);
        Ok(())
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_and_save_are_verbatim() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("doc.txt");
        let copy = dir.path().join("copy.txt");

        let content = "First line\n\n  indented line\r\nlast line, no newline";
        fs::write(&source, content).unwrap();

        let mut buffer = DocumentBuffer::new();
        buffer.load(&source).unwrap();
        assert_eq!(buffer.text(), content);

        buffer.save(&copy).unwrap();
        assert_eq!(fs::read_to_string(&copy).unwrap(), content);
    }

    #[test]
    fn replace_with_longer_text_grows_the_buffer() {
        let mut buffer = DocumentBuffer::from_text("the explosins were loud");
        buffer.replace(4, 13, "explosions").unwrap();
        assert_eq!(buffer.text(), "the explosions were loud");
    }

    #[test]
    fn replace_with_shorter_text_shrinks_the_buffer() {
        let mut buffer = DocumentBuffer::from_text("a cuosmos apart");
        buffer.replace(2, 9, "cosmos").unwrap();
        assert_eq!(buffer.text(), "a cosmos apart");
    }

    #[test]
    fn replace_of_empty_range_inserts() {
        let mut buffer = DocumentBuffer::from_text("ab");
        buffer.replace(1, 1, "-").unwrap();
        assert_eq!(buffer.text(), "a-b");

        buffer.replace(3, 3, "!").unwrap();
        assert_eq!(buffer.text(), "a-b!");
    }

    #[test]
    fn replace_rejects_inverted_span() {
        let mut buffer = DocumentBuffer::from_text("hello");
        let err = buffer.replace(3, 2, "x").unwrap_err();
        assert!(matches!(err, CheckError::Range { start: 3, end: 2, .. }));
        assert_eq!(buffer.text(), "hello");
    }

    #[test]
    fn replace_rejects_span_past_the_end() {
        let mut buffer = DocumentBuffer::from_text("hello");
        let err = buffer.replace(2, 6, "x").unwrap_err();
        assert!(matches!(err, CheckError::Range { end: 6, len: 5, .. }));
        assert_eq!(buffer.text(), "hello");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut buffer = DocumentBuffer::new();
        let err = buffer.load(Path::new("no_such_document.txt")).unwrap_err();
        assert!(matches!(err, CheckError::Io(_)));
    }
}
