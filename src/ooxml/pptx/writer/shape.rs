/// Placeholder shapes for PPTX slides.
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::layout::{PlaceholderSize, PlaceholderSpec, PlaceholderType, Rect};
use std::fmt::Write as FmtWrite;

/// Line break within a paragraph (vertical tab, as PowerPoint reports it).
pub const LINE_BREAK: char = '\u{000B}';

/// A placeholder shape on a slide, cloned from the slide's layout.
///
/// Geometry and formatting are inherited from the layout, so only the
/// placeholder reference and the text are stored.
#[derive(Debug, Clone)]
pub struct Placeholder {
    /// Shape ID, unique within the slide
    pub(crate) shape_id: u32,
    pub(crate) name: String,
    pub(crate) ph_type: PlaceholderType,
    pub(crate) idx: u32,
    pub(crate) vertical: bool,
    pub(crate) text: String,
}

impl Placeholder {
    /// Clone a layout placeholder as shape `shape_id`.
    ///
    /// Names follow PowerPoint: "Title 1", "Content Placeholder 2".
    pub(crate) fn from_spec(spec: &PlaceholderSpec, shape_id: u32) -> Self {
        Self {
            shape_id,
            name: format!("{} {}", spec.ph_type.base_name(spec.vertical), shape_id - 1),
            ph_type: spec.ph_type,
            idx: spec.idx,
            vertical: spec.vertical,
            text: String::new(),
        }
    }

    /// Replace all text in the placeholder.
    ///
    /// `\n` starts a new paragraph and `\v` inserts a line break within the
    /// current paragraph.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// The placeholder text, in the encoding accepted by [`set_text`](Self::set_text).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ph_type(&self) -> PlaceholderType {
        self.ph_type
    }

    pub fn idx(&self) -> u32 {
        self.idx
    }

    pub fn is_title(&self) -> bool {
        self.ph_type.is_title()
    }

    /// Write the `<p:sp>` element for this placeholder.
    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        let spec = PlaceholderSpec {
            ph_type: self.ph_type,
            idx: self.idx,
            vertical: self.vertical,
            size: PlaceholderSize::Full,
            geometry: None,
        };
        write_placeholder_sp(xml, self.shape_id, &self.name, &spec, None)?;
        xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
        write_paragraphs(xml, &self.text)?;
        xml.push_str("</p:txBody></p:sp>");
        Ok(())
    }
}

/// Write the opening of a placeholder `<p:sp>` up to and including `<p:spPr>`.
///
/// With no geometry the shape properties are empty and position is inherited.
/// The caller writes the text body and closes `</p:sp>`.
pub(crate) fn write_placeholder_sp(
    xml: &mut String,
    shape_id: u32,
    name: &str,
    spec: &PlaceholderSpec,
    geometry: Option<Rect>,
) -> Result<()> {
    write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/>"#,
        shape_id,
        escape_xml(name)
    )
    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>"#);

    xml.push_str("<p:ph");
    if let Some(ph_type) = spec.ph_type.ph_type() {
        write!(xml, r#" type="{}""#, ph_type).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if spec.vertical {
        xml.push_str(r#" orient="vert""#);
    }
    if let Some(sz) = spec.size.sz() {
        write!(xml, r#" sz="{}""#, sz).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if spec.idx != 0 {
        write!(xml, r#" idx="{}""#, spec.idx).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    xml.push_str("/></p:nvPr></p:nvSpPr>");

    match geometry {
        Some(rect) => write!(
            xml,
            r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm></p:spPr>"#,
            rect.x, rect.y, rect.cx, rect.cy
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?,
        None => xml.push_str("<p:spPr/>"),
    }

    Ok(())
}

/// Write `text` as DrawingML paragraphs.
///
/// Each `\n`-separated line is one `<a:p>`; `\v` within a line becomes
/// `<a:br/>`. Empty text still produces one empty paragraph, which a text
/// body requires.
pub(crate) fn write_paragraphs(xml: &mut String, text: &str) -> Result<()> {
    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            xml.push_str("<a:p/>");
            continue;
        }

        xml.push_str("<a:p>");
        for (i, run) in paragraph.split(LINE_BREAK).enumerate() {
            if i > 0 {
                xml.push_str(r#"<a:br><a:rPr lang="en-US" dirty="0"/></a:br>"#);
            }
            if !run.is_empty() {
                write!(
                    xml,
                    r#"<a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r>"#,
                    escape_xml(run)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
        }
        xml.push_str("</a:p>");
    }
    Ok(())
}
