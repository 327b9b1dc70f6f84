/// Slide parts and related types.
///
/// This module contains parts for slides and slide layouts.
use crate::common::xml::{resolve_entity, unescape_control_chars, unescape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::layout::PlaceholderType;
use crate::ooxml::pptx::writer::shape::LINE_BREAK;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A shape read from a slide: its name, placeholder reference and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideShape {
    /// Shape name from `<p:cNvPr name="...">`
    pub name: String,
    /// Placeholder type and index, for placeholder shapes
    pub placeholder: Option<(PlaceholderType, u32)>,
    /// Paragraphs joined with `\n`, line breaks as `\v`
    pub text: String,
}

/// A slide part.
///
/// Corresponds to `/ppt/slides/slideN.xml` in the package.
pub struct SlidePart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

impl<'a> SlidePart<'a> {
    /// Create a SlidePart from an OPC Part.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    /// Parse the `<p:sp>` shapes of the slide, in document order.
    pub fn shapes(&self) -> Result<Vec<SlideShape>> {
        parse_shapes(self.part.blob())
    }
}

/// A slide layout part.
///
/// Corresponds to `/ppt/slideLayouts/slideLayoutN.xml` in the package.
pub struct SlideLayoutPart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

impl<'a> SlideLayoutPart<'a> {
    /// Create a SlideLayoutPart from an OPC Part.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the layout name.
    ///
    /// Returns the name attribute from the `<p:cSld>` element.
    pub fn name(&self) -> Result<String> {
        let mut reader = Reader::from_reader(self.part.blob());
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"cSld" {
                        return attr_string(&e, b"name").map(Option::unwrap_or_default);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(String::new())
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

/// Shape being collected while walking the slide XML.
#[derive(Default)]
struct ShapeBuilder {
    name: String,
    placeholder: Option<(PlaceholderType, u32)>,
    paragraphs: Vec<String>,
    paragraph: Option<String>,
    in_text: bool,
}

impl ShapeBuilder {
    fn push_text(&mut self, text: &str) {
        if self.in_text
            && let Some(paragraph) = self.paragraph.as_mut()
        {
            paragraph.push_str(text);
        }
    }

    fn finish(self) -> SlideShape {
        SlideShape {
            name: self.name,
            placeholder: self.placeholder,
            text: unescape_control_chars(&self.paragraphs.join("\n")).into_owned(),
        }
    }
}

/// Walk slide XML collecting every `<p:sp>` with its text.
///
/// Text is read untrimmed so leading and trailing spaces survive.
fn parse_shapes(xml: &[u8]) -> Result<Vec<SlideShape>> {
    let mut reader = Reader::from_reader(xml);

    let mut shapes = Vec::new();
    let mut current: Option<ShapeBuilder> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sp" => current = Some(ShapeBuilder::default()),
                b"p" => {
                    if let Some(shape) = current.as_mut() {
                        shape.paragraph = Some(String::new());
                    }
                },
                b"t" => {
                    if let Some(shape) = current.as_mut() {
                        shape.in_text = true;
                    }
                },
                other => {
                    if let Some(shape) = current.as_mut() {
                        read_shape_element(shape, other, &e)?;
                    }
                },
            },
            Ok(Event::Empty(e)) => {
                if let Some(shape) = current.as_mut() {
                    match e.local_name().as_ref() {
                        b"p" => shape.paragraphs.push(String::new()),
                        other => read_shape_element(shape, other, &e)?,
                    }
                }
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"sp" => {
                    if let Some(shape) = current.take() {
                        shapes.push(shape.finish());
                    }
                },
                b"p" => {
                    if let Some(shape) = current.as_mut()
                        && let Some(paragraph) = shape.paragraph.take()
                    {
                        shape.paragraphs.push(paragraph);
                    }
                },
                b"t" => {
                    if let Some(shape) = current.as_mut() {
                        shape.in_text = false;
                    }
                },
                _ => {},
            },
            Ok(Event::Text(e)) => {
                if let Some(shape) = current.as_mut() {
                    let raw = std::str::from_utf8(&e).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    shape.push_text(&unescape_xml(raw));
                }
            },
            Ok(Event::CData(e)) => {
                if let Some(shape) = current.as_mut() {
                    let raw = std::str::from_utf8(&e).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    shape.push_text(raw);
                }
            },
            Ok(Event::GeneralRef(e)) => {
                if let Some(shape) = current.as_mut()
                    && shape.in_text
                {
                    let name = std::str::from_utf8(&e).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    let resolved = resolve_entity(name).ok_or_else(|| {
                        OoxmlError::Xml(format!("Unknown entity reference '&{};'", name))
                    })?;
                    shape.push_text(&resolved);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
    }

    Ok(shapes)
}

/// Handle the shape-level elements that carry data: name, placeholder, break.
fn read_shape_element(shape: &mut ShapeBuilder, local_name: &[u8], e: &BytesStart<'_>) -> Result<()> {
    match local_name {
        b"cNvPr" => {
            if let Some(name) = attr_string(e, b"name")? {
                shape.name = name;
            }
        },
        b"ph" => {
            let ph_type = attr_string(e, b"type")?
                .map(|t| PlaceholderType::from_ph_type(&t))
                .unwrap_or(PlaceholderType::Object);
            let idx = match attr_string(e, b"idx")? {
                Some(idx) => idx
                    .parse::<u32>()
                    .map_err(|err| OoxmlError::Xml(format!("Invalid placeholder idx '{}': {}", idx, err)))?,
                None => 0,
            };
            shape.placeholder = Some((ph_type, idx));
        },
        b"br" => {
            if let Some(paragraph) = shape.paragraph.as_mut() {
                paragraph.push(LINE_BREAK);
            }
        },
        _ => {},
    }
    Ok(())
}

/// Unescaped value of an unprefixed attribute.
fn attr_string(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    match e.try_get_attribute(name)? {
        Some(attr) => {
            let raw = std::str::from_utf8(&attr.value).map_err(|e| OoxmlError::Xml(e.to_string()))?;
            Ok(Some(unescape_xml(raw)))
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
<p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t>Q&amp;A &#x2013; wrap-up</a:t></a:r></a:p></p:txBody></p:sp>
<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>
<p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t> first </a:t></a:r><a:br><a:rPr/></a:br><a:r><a:t>same paragraph</a:t></a:r></a:p><a:p/><a:p><a:r><a:t>third</a:t></a:r></a:p></p:txBody></p:sp>
<p:sp><p:nvSpPr><p:cNvPr id="4" name="TextBox 3"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
<p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t>free text</a:t></a:r></a:p></p:txBody></p:sp>
</p:spTree></p:cSld></p:sld>"#;

    #[test]
    fn test_parse_shapes() {
        let shapes = parse_shapes(SLIDE.as_bytes()).unwrap();
        assert_eq!(shapes.len(), 3);

        assert_eq!(shapes[0].name, "Title 1");
        assert_eq!(shapes[0].placeholder, Some((PlaceholderType::Title, 0)));
        assert_eq!(shapes[0].text, "Q&A \u{2013} wrap-up");

        assert_eq!(shapes[1].placeholder, Some((PlaceholderType::Object, 1)));
        assert_eq!(shapes[1].text, " first \u{000B}same paragraph\n\nthird");

        assert_eq!(shapes[2].placeholder, None);
        assert_eq!(shapes[2].text, "free text");
    }

    #[test]
    fn test_shape_without_text_body() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree><p:sp><p:nvSpPr><p:cNvPr id="2" name="Picture Placeholder 1"/><p:nvPr><p:ph type="pic" idx="1"/></p:nvPr></p:nvSpPr></p:sp></p:spTree></p:cSld></p:sld>"#;
        let shapes = parse_shapes(xml.as_bytes()).unwrap();

        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].placeholder, Some((PlaceholderType::Picture, 1)));
        assert_eq!(shapes[0].text, "");
    }

    #[test]
    fn test_escaped_control_chars_are_decoded() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:txBody><a:p><a:r><a:t>ctl_x0001_</a:t></a:r></a:p><a:p><a:r><a:t>_x005F_x0041_ snake_x</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;
        let shapes = parse_shapes(xml.as_bytes()).unwrap();

        assert_eq!(shapes[0].text, "ctl\u{1}\n_x0041_ snake_x");
    }

    #[test]
    fn test_invalid_placeholder_idx() {
        let xml = r#"<p:sld xmlns:p="p"><p:sp><p:nvSpPr><p:nvPr><p:ph idx="one"/></p:nvPr></p:nvSpPr></p:sp></p:sld>"#;
        assert!(matches!(parse_shapes(xml.as_bytes()), Err(OoxmlError::Xml(_))));
    }
}
