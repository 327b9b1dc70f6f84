/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::pptx::parts::PresentationPart;
use crate::ooxml::pptx::presentation::Presentation;
use std::io::{Read, Seek};
use std::path::Path;

/// A PowerPoint (.pptx) package opened for reading.
///
/// Wraps an OPC package whose main part has been checked to be a
/// presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use slidesmith::ooxml::pptx::Package;
///
/// let pkg = Package::open("Spring_Boot_3_Presentation.pptx")?;
/// let pres = pkg.presentation()?;
/// println!("Presentation has {} slides", pres.slide_count()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .pptx package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    /// Create a .pptx package from in-memory bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(bytes)?)
    }

    /// Verify it's a PowerPoint presentation by checking the main part's content type.
    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = main_part.content_type();
        // Support both regular and macro-enabled presentations
        if content_type != ct::PML_PRESENTATION_MAIN && content_type != ct::PML_PRES_MACRO_MAIN {
            return Err(OoxmlError::InvalidContentType {
                expected: format!(
                    "{} or {}",
                    ct::PML_PRESENTATION_MAIN,
                    ct::PML_PRES_MACRO_MAIN
                ),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc })
    }

    /// Get the main presentation.
    pub fn presentation(&self) -> Result<Presentation<'_>> {
        let main_part = self
            .opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let pres_part = PresentationPart::from_part(main_part)?;
        Ok(Presentation::new(pres_part, &self.opc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;
    use crate::ooxml::opc::{PackURI, XmlPart};
    use crate::ooxml::pptx::layout::PlaceholderType;
    use crate::ooxml::pptx::writer::MutablePresentation;

    #[test]
    fn test_read_back_written_presentation() {
        let mut pres = MutablePresentation::new();
        let slide = pres.add_slide(1).unwrap();
        slide.set_title("Spring & Boot").unwrap();
        slide.placeholder_mut(1).unwrap().set_text("one\ntwo");
        pres.add_slide(0).unwrap().set_title("Cover").unwrap();
        pres.core_properties_mut().title = Some("Deck".to_string());

        let pkg = Package::from_bytes(&pres.to_bytes().unwrap()).unwrap();
        let read = pkg.presentation().unwrap();

        assert_eq!(read.slide_count().unwrap(), 2);
        assert_eq!(read.slide_size().unwrap(), Some((9144000, 6858000)));
        assert_eq!(read.core_properties().unwrap().title.as_deref(), Some("Deck"));

        let slides = read.slides().unwrap();
        assert_eq!(slides[0].title().unwrap().as_deref(), Some("Spring & Boot"));
        assert_eq!(slides[0].placeholder_text(1).unwrap().as_deref(), Some("one\ntwo"));
        assert_eq!(slides[0].layout_name().unwrap(), "Title and Content");
        assert_eq!(slides[0].text().unwrap(), "Spring & Boot\none\ntwo");

        assert_eq!(slides[1].layout_name().unwrap(), "Title Slide");
        let placeholders = slides[1].placeholders().unwrap();
        assert_eq!(placeholders[0].ph_type, PlaceholderType::CenterTitle);
        assert_eq!(placeholders[1].ph_type, PlaceholderType::SubTitle);
        assert_eq!(placeholders[1].text, "");
    }

    #[test]
    fn test_rejects_non_presentation() {
        let mut opc = OpcPackage::new();
        let uri = PackURI::new("/word/document.xml").unwrap();
        opc.add_part(Box::new(XmlPart::from_xml(
            uri.clone(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            "<w:document/>".to_string(),
        )));
        opc.relate_to(&uri, rt::OFFICE_DOCUMENT);

        let result = Package::from_bytes(&opc.to_bytes().unwrap());
        assert!(matches!(result, Err(OoxmlError::InvalidContentType { .. })));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(Package::from_bytes(b"definitely not a zip archive").is_err());
    }
}
