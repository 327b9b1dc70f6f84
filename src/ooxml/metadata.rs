/// OOXML document properties.
///
/// Core properties live in the `/docProps/core.xml` part and follow Dublin
/// Core plus the OPC extensions (revision, last modified by). Extended
/// properties (`/docProps/app.xml`) carry the producing application and the
/// slide count.
use crate::common::xml::{escape_xml, resolve_entity, unescape_control_chars, unescape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, PackURI, Part};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fmt::Write as FmtWrite;

/// Name written as the producing application.
pub const APPLICATION_NAME: &str = "slidesmith";

/// Document core properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub last_modified_by: Option<String>,
    pub revision: Option<u32>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl CoreProperties {
    /// Serialize to a `core.xml` part body.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(768);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);

        let text_elements = [
            ("dc:title", &self.title),
            ("dc:subject", &self.subject),
            ("dc:creator", &self.creator),
            ("cp:keywords", &self.keywords),
            ("dc:description", &self.description),
            ("cp:lastModifiedBy", &self.last_modified_by),
        ];
        for (tag, value) in text_elements {
            if let Some(value) = value {
                write!(xml, "<{tag}>{}</{tag}>", escape_xml(value))
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
        }

        if let Some(revision) = self.revision {
            write!(xml, "<cp:revision>{}</cp:revision>", revision)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }

        for (tag, value) in [("dcterms:created", self.created), ("dcterms:modified", self.modified)] {
            if let Some(dt) = value {
                write!(
                    xml,
                    r#"<{tag} xsi:type="dcterms:W3CDTF">{}</{tag}>"#,
                    format_datetime(&dt)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
        }

        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }
}

/// Extract core properties from a package.
///
/// Returns defaults when the package has no core properties part.
pub fn extract_core_properties(package: &OpcPackage) -> Result<CoreProperties> {
    let Some(core_part) = find_core_properties_part(package) else {
        return Ok(CoreProperties::default());
    };

    let xml_content = std::str::from_utf8(core_part.blob())
        .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in core properties: {}", e)))?;

    parse_core_properties_xml(xml_content)
}

/// Find the core properties part, by package relationship first and then
/// by content type.
fn find_core_properties_part(package: &OpcPackage) -> Option<&dyn Part> {
    if let Ok(part) = package.part_by_reltype(rt::CORE_PROPERTIES) {
        return Some(part);
    }

    package
        .iter_parts()
        .find(|part| part.content_type() == ct::OPC_CORE_PROPERTIES)
}

/// Parse core properties XML.
pub fn parse_core_properties_xml(xml: &str) -> Result<CoreProperties> {
    let mut reader = Reader::from_str(xml);

    let mut props = CoreProperties::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"dc:title" => props.title = read_text_element(&mut reader)?,
                b"dc:subject" => props.subject = read_text_element(&mut reader)?,
                b"dc:creator" => props.creator = read_text_element(&mut reader)?,
                b"cp:keywords" => props.keywords = read_text_element(&mut reader)?,
                b"dc:description" => props.description = read_text_element(&mut reader)?,
                b"cp:lastModifiedBy" => props.last_modified_by = read_text_element(&mut reader)?,
                b"cp:revision" => {
                    props.revision = read_text_element(&mut reader)?
                        .and_then(|t| t.trim().parse::<u32>().ok());
                },
                b"dcterms:created" => {
                    props.created = read_text_element(&mut reader)?
                        .and_then(|t| parse_datetime(t.trim()).ok());
                },
                b"dcterms:modified" => {
                    props.modified = read_text_element(&mut reader)?
                        .and_then(|t| parse_datetime(t.trim()).ok());
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML parsing error: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    Ok(props)
}

/// Read the text content of the element just opened, consuming its end tag.
fn read_text_element(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let raw = std::str::from_utf8(&e)
                    .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in text content: {}", e)))?;
                text.push_str(&unescape_xml(raw));
            },
            Event::GeneralRef(r) => {
                let name = std::str::from_utf8(&r)
                    .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in entity: {}", e)))?;
                match resolve_entity(name) {
                    Some(resolved) => text.push_str(&resolved),
                    None => write!(text, "&{};", name).map_err(|e| OoxmlError::Xml(e.to_string()))?,
                }
            },
            Event::Start(_) => return Ok(None),
            Event::End(_) | Event::Eof => break,
            _ => {},
        }
    }

    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(unescape_control_chars(&text).into_owned()))
    }
}

/// Format a timestamp as W3CDTF (`2024-03-01T10:20:30Z`).
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an ISO 8601 datetime string into a DateTime<Utc>.
///
/// Supports formats like:
/// - 2023-10-10T14:30:00Z
/// - 2023-10-10T14:30:00.1234567Z
/// - 2023-10-10T14:30:00
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(DateTime::from_naive_utc_and_offset(dt, Utc));
    }

    Err(OoxmlError::InvalidFormat(format!(
        "Invalid datetime format: {}",
        s
    )))
}

/// Build the extended properties (`app.xml`) part body.
pub fn app_properties_xml(slide_titles: &[&str]) -> Result<String> {
    let mut xml = String::with_capacity(1024);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
    write!(xml, "<Application>{}</Application>", APPLICATION_NAME)
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
    write!(xml, "<Slides>{}</Slides>", slide_titles.len())
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str("<Notes>0</Notes><HiddenSlides>0</HiddenSlides><MMClips>0</MMClips>");
    xml.push_str("<ScaleCrop>false</ScaleCrop>");

    if !slide_titles.is_empty() {
        xml.push_str("<HeadingPairs><vt:vector size=\"2\" baseType=\"variant\">");
        xml.push_str("<vt:variant><vt:lpstr>Slide Titles</vt:lpstr></vt:variant>");
        write!(
            xml,
            "<vt:variant><vt:i4>{}</vt:i4></vt:variant></vt:vector></HeadingPairs>",
            slide_titles.len()
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        write!(
            xml,
            r#"<TitlesOfParts><vt:vector size="{}" baseType="lpstr">"#,
            slide_titles.len()
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        for title in slide_titles {
            write!(xml, "<vt:lpstr>{}</vt:lpstr>", escape_xml(title))
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        xml.push_str("</vt:vector></TitlesOfParts>");
    }

    xml.push_str("<LinksUpToDate>false</LinksUpToDate><SharedDoc>false</SharedDoc>");
    xml.push_str("<HyperlinksChanged>false</HyperlinksChanged><AppVersion>16.0000</AppVersion>");
    xml.push_str("</Properties>");
    Ok(xml)
}

/// Partnames of the two property parts.
pub(crate) fn core_properties_uri() -> Result<PackURI> {
    PackURI::new("/docProps/core.xml").map_err(OoxmlError::Other)
}

pub(crate) fn app_properties_uri() -> Result<PackURI> {
    PackURI::new("/docProps/app.xml").map_err(OoxmlError::Other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn test_parse_datetime() {
        let dt = parse_datetime("2023-10-10T14:30:00Z").unwrap();
        assert_eq!(dt.year(), 2023);
        assert_eq!(dt.month(), 10);
        assert_eq!(dt.day(), 10);

        let dt = parse_datetime("2023-10-10T14:30:00.123456Z").unwrap();
        assert_eq!(dt.year(), 2023);

        let dt = parse_datetime("2023-10-10T14:30:00").unwrap();
        assert_eq!(dt.year(), 2023);

        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_parse_core_properties_xml() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
                   xmlns:dc="http://purl.org/dc/elements/1.1/"
                   xmlns:dcterms="http://purl.org/dc/terms/"
                   xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>Test &amp; Document</dc:title>
    <dc:creator>Test Author</dc:creator>
    <cp:lastModifiedBy>Test Modifier</cp:lastModifiedBy>
    <cp:revision>5</cp:revision>
    <dcterms:created xsi:type="dcterms:W3CDTF">2023-10-10T14:30:00Z</dcterms:created>
    <dcterms:modified xsi:type="dcterms:W3CDTF">2023-10-10T15:30:00Z</dcterms:modified>
</cp:coreProperties>"#;

        let props = parse_core_properties_xml(xml).unwrap();
        assert_eq!(props.title.as_deref(), Some("Test & Document"));
        assert_eq!(props.creator.as_deref(), Some("Test Author"));
        assert_eq!(props.last_modified_by.as_deref(), Some("Test Modifier"));
        assert_eq!(props.revision, Some(5));
        assert_eq!(props.created.unwrap().year(), 2023);
        assert!(props.modified.is_some());
        assert!(props.subject.is_none());
    }

    #[test]
    fn test_core_properties_xml_round_trip() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 10, 20, 30).unwrap();
        let props = CoreProperties {
            title: Some("Spring <Boot> 3".to_string()),
            last_modified_by: Some(APPLICATION_NAME.to_string()),
            revision: Some(1),
            created: Some(created),
            modified: Some(created),
            ..Default::default()
        };

        let xml = props.to_xml().unwrap();
        assert!(xml.contains("<dcterms:created xsi:type=\"dcterms:W3CDTF\">2024-03-01T10:20:30Z</dcterms:created>"));
        assert!(xml.contains("Spring &lt;Boot&gt; 3"));

        assert_eq!(parse_core_properties_xml(&xml).unwrap(), props);
    }

    #[test]
    fn test_control_chars_in_title() {
        let props = CoreProperties {
            title: Some("deck\u{1}\u{1F}".to_string()),
            ..Default::default()
        };

        let xml = props.to_xml().unwrap();
        assert!(xml.contains("<dc:title>deck_x0001__x001F_</dc:title>"));
        assert_eq!(parse_core_properties_xml(&xml).unwrap().title, props.title);
    }

    #[test]
    fn test_app_properties_xml() {
        let xml = app_properties_xml(&["One", "Q&A"]).unwrap();
        assert!(xml.contains("<Slides>2</Slides>"));
        assert!(xml.contains("<vt:lpstr>Q&amp;A</vt:lpstr>"));
        assert!(xml.contains("<Application>slidesmith</Application>"));

        let empty = app_properties_xml(&[]).unwrap();
        assert!(empty.contains("<Slides>0</Slides>"));
        assert!(!empty.contains("TitlesOfParts"));
    }
}
