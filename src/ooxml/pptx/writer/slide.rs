/// Slide types and implementation for PPTX presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::layout::SlideLayout;

use super::shape::Placeholder;

/// A mutable slide in a presentation.
///
/// Created from a slide layout; holds a copy of each of the layout's content
/// placeholders.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique identifier, 256 and up)
    pub(crate) slide_id: u32,
    /// Index of the layout this slide was created from
    pub(crate) layout_index: usize,
    /// Placeholders cloned from the layout, in layout order
    pub(crate) placeholders: Vec<Placeholder>,
}

impl MutableSlide {
    /// Create a slide from `layout`.
    ///
    /// Date, footer and slide number placeholders stay on the layout.
    pub(crate) fn from_layout(slide_id: u32, layout_index: usize, layout: &SlideLayout) -> Self {
        let placeholders = layout
            .placeholders()
            .iter()
            .filter(|spec| spec.ph_type.is_copied_to_slide())
            .zip(2u32..)
            .map(|(spec, shape_id)| Placeholder::from_spec(spec, shape_id))
            .collect();

        Self {
            slide_id,
            layout_index,
            placeholders,
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Index of the layout this slide uses.
    pub fn layout_index(&self) -> usize {
        self.layout_index
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// The title placeholder, if the layout has one.
    pub fn title_mut(&mut self) -> Option<&mut Placeholder> {
        self.placeholders.iter_mut().find(|ph| ph.is_title())
    }

    /// The title text, if the slide has a title placeholder.
    pub fn title(&self) -> Option<&str> {
        self.placeholders
            .iter()
            .find(|ph| ph.is_title())
            .map(|ph| ph.text())
    }

    /// The placeholder with index `idx`.
    pub fn placeholder_mut(&mut self, idx: u32) -> Result<&mut Placeholder> {
        self.placeholders
            .iter_mut()
            .find(|ph| ph.idx() == idx)
            .ok_or_else(|| {
                OoxmlError::PlaceholderNotFound(format!(
                    "idx {} on slide {} (layout {})",
                    idx, self.slide_id, self.layout_index
                ))
            })
    }

    /// Set the slide title.
    ///
    /// Fails when the slide's layout has no title placeholder.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        let (slide_id, layout_index) = (self.slide_id, self.layout_index);
        let placeholder = self.title_mut().ok_or_else(|| {
            OoxmlError::PlaceholderNotFound(format!(
                "title on slide {} (layout {})",
                slide_id, layout_index
            ))
        })?;
        placeholder.set_text(title);
        Ok(())
    }

    /// Generate the slide XML.
    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024 + self.placeholders.len() * 512);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        );
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        );
        xml.push_str(r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        for placeholder in &self.placeholders {
            placeholder.write_xml(&mut xml)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");

        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }

    /// Text of all non-empty placeholders, joined with newlines.
    pub fn text(&self) -> String {
        self.placeholders
            .iter()
            .map(|ph| ph.text())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::layout::{PlaceholderType, TITLE_AND_CONTENT, default_layouts};

    fn title_and_content_slide() -> MutableSlide {
        let layouts = default_layouts();
        MutableSlide::from_layout(256, TITLE_AND_CONTENT, &layouts[TITLE_AND_CONTENT])
    }

    #[test]
    fn test_placeholders_cloned_from_layout() {
        let slide = title_and_content_slide();

        let kinds: Vec<(PlaceholderType, u32)> = slide
            .placeholders()
            .iter()
            .map(|ph| (ph.ph_type(), ph.idx()))
            .collect();
        assert_eq!(kinds, [(PlaceholderType::Title, 0), (PlaceholderType::Object, 1)]);
        assert_eq!(slide.placeholders()[0].shape_id(), 2);
        assert_eq!(slide.placeholders()[1].shape_id(), 3);
    }

    #[test]
    fn test_set_title_and_body() {
        let mut slide = title_and_content_slide();
        slide.set_title("Q&A").unwrap();
        slide.placeholder_mut(1).unwrap().set_text("line one\nline two");

        assert_eq!(slide.title(), Some("Q&A"));
        assert_eq!(slide.text(), "Q&A\nline one\nline two");

        let xml = slide.to_xml().unwrap();
        assert!(xml.contains("<a:t>Q&amp;A</a:t>"));
        assert!(xml.contains("<a:t>line two</a:t>"));
    }

    #[test]
    fn test_missing_placeholder() {
        let mut slide = title_and_content_slide();
        let err = slide.placeholder_mut(7).unwrap_err();
        assert!(matches!(err, OoxmlError::PlaceholderNotFound(_)));
    }

    #[test]
    fn test_blank_layout_has_no_title() {
        let layouts = default_layouts();
        let mut slide = MutableSlide::from_layout(256, 6, &layouts[6]);

        assert!(slide.placeholders().is_empty());
        assert!(slide.title_mut().is_none());
        assert!(matches!(
            slide.set_title("nope"),
            Err(OoxmlError::PlaceholderNotFound(_))
        ));
    }

    #[test]
    fn test_empty_slide_xml() {
        let slide = title_and_content_slide();
        let xml = slide.to_xml().unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0""#));
        assert_eq!(xml.matches("<p:sp>").count(), 2);
        assert_eq!(xml.matches("<a:p/>").count(), 2);
    }
}
