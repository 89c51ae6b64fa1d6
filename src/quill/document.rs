use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::quill::{
    APP_NAME,
    find_panel::TextBuffer,
    utils::{
        atomic_write::atomic_write_file,
        encoding::{detect_encoding_and_decode, encode},
    },
};

/// A text buffer, optionally backed by a file
#[derive(Debug, Clone)]
pub struct Document {
    pub file_path: Option<PathBuf>,
    content: String,
    original_content: String,
    encoding: &'static Encoding,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty, untitled document
    pub fn new() -> Self {
        Self {
            file_path: None,
            content: String::new(),
            original_content: String::new(),
            encoding: UTF_8,
        }
    }

    /// Open a document from a file
    ///
    /// ### Arguments
    /// - `path`: The file to read
    ///
    /// ### Returns
    /// - `Ok(Document)`: The decoded document
    /// - `Err(anyhow::Error)`: If the file could not be read
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::debug!("Attempting to open file: {:?}", path);
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
        log::debug!("Successfully read file: {:?} ({} bytes)", path, bytes.len());
        let (encoding, content) = detect_encoding_and_decode(&bytes);
        Ok(Self {
            file_path: Some(path.to_path_buf()),
            original_content: content.clone(),
            content,
            encoding,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Whether the text differs from what was last opened or saved
    pub fn is_modified(&self) -> bool {
        self.content != self.original_content
    }

    /// Window title for the document
    ///
    /// ### Returns
    /// - `String`: `"Quill - <path>"`, or `"Quill"` when untitled
    pub fn title(&self) -> String {
        match &self.file_path {
            Some(path) => format!("{} - {}", APP_NAME, path.display()),
            None => APP_NAME.to_string(),
        }
    }

    /// Save the document to its file
    ///
    /// ### Returns
    /// - `Ok(())`: If the document was written
    /// - `Err(anyhow::Error)`: If the document is untitled or the write failed
    pub fn save(&mut self) -> anyhow::Result<()> {
        let path = self
            .file_path
            .clone()
            .ok_or_else(|| anyhow!("Cannot save an untitled document without a path"))?;
        self.write_to(&path)
    }

    /// Save the document to a new file and keep that file as its path
    ///
    /// ### Arguments
    /// - `path`: The destination file
    ///
    /// ### Returns
    /// - `Ok(())`: If the document was written
    /// - `Err(anyhow::Error)`: If the write failed, in which case the path is not changed
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> anyhow::Result<()> {
        let path = path.into();
        self.write_to(&path)?;
        self.file_path = Some(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> anyhow::Result<()> {
        let bytes = encode(&self.content, self.encoding);
        atomic_write_file(path, &bytes)?;
        log::info!(
            "Saved {:?} ({} bytes, {})",
            path,
            bytes.len(),
            self.encoding.name()
        );
        self.original_content = self.content.clone();
        Ok(())
    }
}

impl From<String> for Document {
    fn from(content: String) -> Self {
        Self {
            content,
            ..Self::new()
        }
    }
}

impl TextBuffer for Document {
    fn text(&self) -> String {
        self.content.clone()
    }

    fn set_text(&mut self, text: String) {
        self.content = text;
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::quill::find_panel::TextBuffer;

    #[test]
    fn test_new_document_is_untitled() {
        let document = Document::new();
        assert_eq!(document.title(), "Quill");
        assert!(!document.is_modified());
        assert!(document.content().is_empty());
    }

    #[test]
    fn test_set_text_marks_modified() {
        let mut document = Document::new();
        document.set_text("draft".to_string());
        assert!(document.is_modified());
        document.set_text(String::new());
        assert!(!document.is_modified());
    }

    #[test]
    fn test_from_string_is_modified() {
        let document = Document::from("unsaved".to_string());
        assert!(document.is_modified());
        assert_eq!(document.text(), "unsaved");
    }

    #[test]
    fn test_save_untitled_fails() {
        let mut document = Document::from("text".to_string());
        assert!(document.save().is_err());
        assert!(document.is_modified());
    }
}
