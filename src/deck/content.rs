//! The slide content table.
//!
//! An ordered list of (title, body) pairs, one per slide. The built-in
//! table is compiled in from `content/spring_boot_3.yaml`; other tables can
//! be loaded from YAML files of the same shape:
//!
//! ```yaml
//! title: Spring Boot 3          # optional, used for the document title
//! slides:
//!   - title: Introduction to Spring Boot 3
//!     body: |-
//!       Brief overview of the presentation
//!       Highlight key differences from earlier versions
//! ```

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_CONTENT: &str = include_str!("../../content/spring_boot_3.yaml");

/// One slide's worth of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,
    /// Body text; each `\n`-separated line becomes one paragraph.
    #[serde(default)]
    pub body: String,
}

impl SlideContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Ordered slide content. Iteration order is slide order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTable {
    /// Deck title for the document properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub slides: Vec<SlideContent>,
}

impl ContentTable {
    /// A table without a deck title.
    pub fn new(slides: Vec<SlideContent>) -> Self {
        Self { title: None, slides }
    }

    /// The fourteen-slide Spring Boot 3 table.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CONTENT)
    }

    /// Parse a table from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Content(format!("Invalid content table: {}", e)))
    }

    /// Read and parse a YAML content file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Content(format!("Cannot read {}: {}", path.display(), e)))?;
        let table: Self = serde_saphyr::from_str(&yaml)
            .map_err(|e| Error::Content(format!("Invalid content table {}: {}", path.display(), e)))?;
        log::debug!("Loaded {} slides from {}", table.len(), path.display());
        Ok(table)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlideContent> {
        self.slides.iter()
    }

    pub fn slides(&self) -> &[SlideContent] {
        &self.slides
    }
}

impl<'a> IntoIterator for &'a ContentTable {
    type Item = &'a SlideContent;
    type IntoIter = std::slice::Iter<'a, SlideContent>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let table = ContentTable::builtin().unwrap();

        assert_eq!(table.len(), 14);
        assert_eq!(table.title.as_deref(), Some("Spring Boot 3"));
        assert_eq!(
            table.slides()[0],
            SlideContent::new(
                "Introduction to Spring Boot 3",
                "Brief overview of the presentation\nHighlight key differences from earlier versions"
            )
        );
        assert_eq!(table.slides()[10].title, "Case Study: Real-World Application of Spring Boot 3");
        assert_eq!(table.slides()[12].title, "Q&A");
        assert_eq!(table.slides()[13].title, "Conclusion and Next Steps");
    }

    #[test]
    fn test_every_builtin_body_has_two_lines() {
        let table = ContentTable::builtin().unwrap();
        for slide in &table {
            assert_eq!(slide.body.lines().count(), 2, "{}", slide.title);
            assert!(!slide.body.ends_with('\n'));
        }
    }

    #[test]
    fn test_from_yaml_str() {
        let table = ContentTable::from_yaml_str(
            "slides:\n  - title: One\n    body: first\n  - title: Two\n",
        )
        .unwrap();

        assert_eq!(table.title, None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.slides()[1], SlideContent::new("Two", ""));
    }

    #[test]
    fn test_empty_slide_list() {
        let table = ContentTable::from_yaml_str("slides: []\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ContentTable::from_yaml_str("slides:\n  - body: missing title\n").unwrap_err();
        assert!(matches!(err, Error::Content(_)));
    }

    #[test]
    fn test_load_error_names_file_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("talk.yaml");
        std::fs::write(&path, "slides:\n  - body: missing title\n").unwrap();

        let message = ContentTable::load(&path).unwrap_err().to_string();
        assert!(message.starts_with("Content error: Invalid content table "));
        assert!(message.contains("talk.yaml"));
        assert_eq!(message.matches("Content error").count(), 1);
        assert_eq!(message.matches("Invalid content table").count(), 1);
    }

    #[test]
    fn test_control_chars_survive_yaml() {
        let table = ContentTable::from_yaml_str("slides:\n  - title: \"ctl\\x01\"\n    body: \"a\\tb\"\n").unwrap();
        assert_eq!(table.slides()[0], SlideContent::new("ctl\u{1}", "a\tb"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ContentTable::load("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, Error::Content(msg) if msg.contains("does/not/exist.yaml")));
    }
}
