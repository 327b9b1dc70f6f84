/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// The main presentation part.
///
/// This part contains the presentation-level properties and references to slides
/// and slide masters.
pub struct PresentationPart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    /// Create a PresentationPart from an OPC Part.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the XML bytes of the presentation.
    #[inline]
    fn xml_bytes(&self) -> &[u8] {
        self.part.blob()
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    /// Get the number of slides in the presentation.
    ///
    /// This counts the `<p:sldId>` elements in the presentation.
    pub fn slide_count(&self) -> Result<usize> {
        let mut count = 0;
        self.for_each_element(b"sldId", |_| {
            count += 1;
            Ok(())
        })?;
        Ok(count)
    }

    /// Get the slide size `(cx, cy)` in EMUs, or `None` if `<p:sldSz>` is absent.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        let mut size = None;
        self.for_each_element(b"sldSz", |e| {
            let cx = parse_emu_attr(e, b"cx")?;
            let cy = parse_emu_attr(e, b"cy")?;
            if let (Some(cx), Some(cy)) = (cx, cy) {
                size = Some((cx, cy));
            }
            Ok(())
        })?;
        Ok(size)
    }

    /// Get the relationship IDs of all slides in presentation order.
    pub fn slide_rids(&self) -> Result<Vec<String>> {
        self.rids_of(b"sldId")
    }

    fn rids_of(&self, local_name: &[u8]) -> Result<Vec<String>> {
        let mut rids = Vec::new();
        self.for_each_element(local_name, |e| {
            for attr in e.attributes().flatten() {
                // The r:id attribute, in whatever prefix the relationships namespace uses
                let key = attr.key;
                if key.prefix().is_some() && key.local_name().as_ref() == b"id" {
                    let rid = std::str::from_utf8(&attr.value)
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    rids.push(rid.to_string());
                    break;
                }
            }
            Ok(())
        })?;
        Ok(rids)
    }

    /// Call `f` for every start or empty element with the given local name.
    fn for_each_element<F>(&self, local_name: &[u8], mut f: F) -> Result<()>
    where
        F: FnMut(&BytesStart<'_>) -> Result<()>,
    {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == local_name {
                        f(&e)?;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(())
    }
}

fn parse_emu_attr(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<i64>> {
    let Some(attr) = e.try_get_attribute(name)? else {
        return Ok(None);
    };
    let value = std::str::from_utf8(&attr.value).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|e| OoxmlError::Xml(format!("Invalid slide size '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::{PackURI, XmlPart};
    use crate::ooxml::opc::constants::content_type as ct;

    fn part(xml: &str) -> XmlPart {
        XmlPart::from_xml(
            PackURI::new("/ppt/presentation.xml").unwrap(),
            ct::PML_PRESENTATION_MAIN,
            xml.to_string(),
        )
    }

    #[test]
    fn test_slide_list_and_size() {
        let xml = part(
            r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
<p:sldIdLst><p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId2"/></p:sldIdLst>
<p:sldSz cx="12192000" cy="6858000"/>
</p:presentation>"#,
        );
        let pres = PresentationPart::from_part(&xml).unwrap();

        assert_eq!(pres.slide_count().unwrap(), 2);
        assert_eq!(pres.slide_rids().unwrap(), ["rId3", "rId2"]);
        assert_eq!(pres.slide_size().unwrap(), Some((12192000, 6858000)));
    }

    #[test]
    fn test_empty_presentation() {
        let xml = part(r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#);
        let pres = PresentationPart::from_part(&xml).unwrap();

        assert_eq!(pres.slide_count().unwrap(), 0);
        assert!(pres.slide_rids().unwrap().is_empty());
        assert_eq!(pres.slide_size().unwrap(), None);
    }
}
