/// Presentation writer for PPTX.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::metadata::{self, CoreProperties};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, PackURI, Part, XmlPart};
use crate::ooxml::pptx::layout::{SlideLayout, default_layouts};
use crate::ooxml::pptx::template;
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::Path;

use super::slide::MutableSlide;

/// First slide ID; PowerPoint reserves lower values.
const FIRST_SLIDE_ID: u32 = 256;

fn pack_uri(uri: &str) -> Result<PackURI> {
    PackURI::new(uri).map_err(|e| OoxmlError::InvalidFormat(format!("Invalid partname: {}", e)))
}

/// A mutable PowerPoint presentation for writing.
///
/// Backed by the default template (one master, one theme, eleven layouts).
/// Slides are added from a layout and filled through their placeholders.
///
/// # Examples
///
/// ```
/// use slidesmith::ooxml::pptx::MutablePresentation;
///
/// let mut pres = MutablePresentation::new();
/// let slide = pres.add_slide(1)?;
/// slide.set_title("Hello")?;
/// slide.placeholder_mut(1)?.set_text("first point\nsecond point");
///
/// let bytes = pres.to_bytes()?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), slidesmith::ooxml::OoxmlError>(())
/// ```
#[derive(Debug)]
pub struct MutablePresentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<MutableSlide>,
    /// Slide layouts of the template, in layout order
    layouts: Vec<SlideLayout>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    core_properties: CoreProperties,
}

impl MutablePresentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            layouts: default_layouts(),
            slide_width: 9144000,  // 10 inches
            slide_height: 6858000, // 7.5 inches
            core_properties: CoreProperties::default(),
        }
    }

    /// Slide layouts available for new slides.
    pub fn slide_layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    /// Get a slide layout by index.
    pub fn slide_layout(&self, index: usize) -> Result<&SlideLayout> {
        self.layouts.get(index).ok_or(OoxmlError::LayoutNotFound {
            index,
            available: self.layouts.len(),
        })
    }

    /// Append a new slide created from the layout at `layout_index`.
    pub fn add_slide(&mut self, layout_index: usize) -> Result<&mut MutableSlide> {
        let slide_id = self.next_slide_id();
        let layout = self.slide_layout(layout_index)?;
        log::trace!("Adding slide {} from layout '{}'", slide_id, layout.name());

        let slide = MutableSlide::from_layout(slide_id, layout_index, layout);
        self.slides.push(slide);
        self.slides
            .last_mut()
            .ok_or_else(|| OoxmlError::Other("Slide list empty after insert".to_string()))
    }

    fn next_slide_id(&self) -> u32 {
        self.slides
            .iter()
            .map(MutableSlide::slide_id)
            .max()
            .map_or(FIRST_SLIDE_ID, |id| id + 1)
    }

    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    pub fn core_properties(&self) -> &CoreProperties {
        &self.core_properties
    }

    pub fn core_properties_mut(&mut self) -> &mut CoreProperties {
        &mut self.core_properties
    }

    /// Generate presentation.xml content.
    ///
    /// # Arguments
    /// * `master_rel_id` - Relationship ID of the slide master
    /// * `slide_rel_ids` - Relationship IDs of the slides, in slide order
    pub(crate) fn generate_presentation_xml(
        &self,
        master_rel_id: &str,
        slide_rel_ids: &[String],
    ) -> Result<String> {
        if slide_rel_ids.len() != self.slides.len() {
            return Err(OoxmlError::Xml(format!(
                "Expected {} slide relationship IDs, got {}",
                self.slides.len(),
                slide_rel_ids.len()
            )));
        }

        let mut xml = String::with_capacity(1024 + self.slides.len() * 48);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        // Write slide master ID list
        xml.push_str("<p:sldMasterIdLst>");
        write!(
            xml,
            r#"<p:sldMasterId id="{}" r:id="{}"/>"#,
            template::SLIDE_MASTER_ID,
            master_rel_id
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("</p:sldMasterIdLst>");

        // An empty deck has no sldIdLst at all
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        // Write slide size
        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        xml.push_str("<p:notesSz cx=\"6858000\" cy=\"9144000\"/>");
        xml.push_str("</p:presentation>");

        Ok(xml)
    }

    /// Build the complete OPC package for this presentation.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let mut package = OpcPackage::new();

        let pres_uri = pack_uri("/ppt/presentation.xml")?;
        let master_uri = pack_uri("/ppt/slideMasters/slideMaster1.xml")?;
        let theme_uri = pack_uri("/ppt/theme/theme1.xml")?;

        let layout_uris = (1..=self.layouts.len())
            .map(|n| pack_uri(&format!("/ppt/slideLayouts/slideLayout{}.xml", n)))
            .collect::<Result<Vec<_>>>()?;

        // Slide master: layouts first so they take rId1..rId11, then the theme
        let mut master_part = XmlPart::from_xml(master_uri.clone(), ct::PML_SLIDE_MASTER, String::new());
        let layout_rel_ids: Vec<String> = layout_uris
            .iter()
            .map(|uri| master_part.relate_to(uri, rt::SLIDE_LAYOUT))
            .collect();
        master_part.relate_to(&theme_uri, rt::THEME);
        master_part.set_xml(template::slide_master_xml(&layout_rel_ids)?);
        package.add_part(Box::new(master_part));

        for (layout, uri) in self.layouts.iter().zip(&layout_uris) {
            let mut layout_part =
                XmlPart::from_xml(uri.clone(), ct::PML_SLIDE_LAYOUT, template::slide_layout_xml(layout)?);
            layout_part.relate_to(&master_uri, rt::SLIDE_MASTER);
            package.add_part(Box::new(layout_part));
        }

        package.add_part(Box::new(XmlPart::from_xml(
            theme_uri.clone(),
            ct::OFC_THEME,
            template::default_theme_xml(),
        )));

        // Presentation part: master, slides, then the property parts
        let mut pres_part = XmlPart::from_xml(pres_uri.clone(), ct::PML_PRESENTATION_MAIN, String::new());
        let master_rel_id = pres_part.relate_to(&master_uri, rt::SLIDE_MASTER);

        let mut slide_rel_ids = Vec::with_capacity(self.slides.len());
        for (n, slide) in (1..).zip(&self.slides) {
            let slide_uri = pack_uri(&format!("/ppt/slides/slide{}.xml", n))?;
            slide_rel_ids.push(pres_part.relate_to(&slide_uri, rt::SLIDE));

            let mut slide_part = XmlPart::from_xml(slide_uri, ct::PML_SLIDE, slide.to_xml()?);
            let layout_uri = layout_uris.get(slide.layout_index()).ok_or(OoxmlError::LayoutNotFound {
                index: slide.layout_index(),
                available: layout_uris.len(),
            })?;
            slide_part.relate_to(layout_uri, rt::SLIDE_LAYOUT);
            package.add_part(Box::new(slide_part));
        }

        let property_parts = [
            ("/ppt/presProps.xml", ct::PML_PRES_PROPS, rt::PRES_PROPS, template::default_pres_props_xml()),
            ("/ppt/viewProps.xml", ct::PML_VIEW_PROPS, rt::VIEW_PROPS, template::default_view_props_xml()),
        ];
        for (uri, content_type, reltype, xml) in property_parts {
            let uri = pack_uri(uri)?;
            pres_part.relate_to(&uri, reltype);
            package.add_part(Box::new(XmlPart::from_xml(uri, content_type, xml)));
        }
        pres_part.relate_to(&theme_uri, rt::THEME);
        let table_styles_uri = pack_uri("/ppt/tableStyles.xml")?;
        pres_part.relate_to(&table_styles_uri, rt::TABLE_STYLES);
        package.add_part(Box::new(XmlPart::from_xml(
            table_styles_uri,
            ct::PML_TABLE_STYLES,
            template::default_table_styles_xml(),
        )));

        pres_part.set_xml(self.generate_presentation_xml(&master_rel_id, &slide_rel_ids)?);
        package.add_part(Box::new(pres_part));

        // Document properties
        let core_uri = metadata::core_properties_uri()?;
        let app_uri = metadata::app_properties_uri()?;
        let titles: Vec<&str> = self
            .slides
            .iter()
            .map(|slide| slide.title().unwrap_or_default())
            .collect();
        package.add_part(Box::new(XmlPart::from_xml(
            core_uri.clone(),
            ct::OPC_CORE_PROPERTIES,
            self.core_properties.to_xml()?,
        )));
        package.add_part(Box::new(XmlPart::from_xml(
            app_uri.clone(),
            ct::OFC_EXTENDED_PROPERTIES,
            metadata::app_properties_xml(&titles)?,
        )));

        package.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);
        package.relate_to(&core_uri, rt::CORE_PROPERTIES);
        package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

        Ok(package)
    }

    /// Serialize the presentation to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_package()?.to_bytes()?)
    }

    /// Write the presentation to a stream.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Save the presentation to a file, replacing any existing file.
    ///
    /// The whole package is serialized before the file is opened, so a
    /// failure while building the package leaves the path untouched.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes)?;
        log::info!(
            "Saved {} slides to {} ({} bytes)",
            self.slides.len(),
            path.display(),
            bytes.len()
        );
        Ok(())
    }
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_presentation() {
        let pres = MutablePresentation::new();
        assert_eq!(pres.slide_count(), 0);
        assert_eq!(pres.slide_width(), 9144000);
        assert_eq!(pres.slide_height(), 6858000);
        assert_eq!(pres.slide_layouts().len(), 11);
        assert_eq!(pres.slide_layout(1).unwrap().name(), "Title and Content");
    }

    #[test]
    fn test_add_slide() {
        let mut pres = MutablePresentation::new();
        pres.add_slide(1).unwrap();
        pres.add_slide(1).unwrap();

        assert_eq!(pres.slide_count(), 2);
        assert_eq!(pres.slides()[0].slide_id(), 256);
        assert_eq!(pres.slides()[1].slide_id(), 257);
    }

    #[test]
    fn test_layout_out_of_range() {
        let mut pres = MutablePresentation::new();
        let err = pres.add_slide(11).unwrap_err();

        assert!(matches!(err, OoxmlError::LayoutNotFound { index: 11, available: 11 }));
        assert_eq!(pres.slide_count(), 0);
    }

    #[test]
    fn test_slide_title() {
        let mut pres = MutablePresentation::new();
        let slide = pres.add_slide(1).unwrap();
        slide.set_title("Test Title").unwrap();
        assert_eq!(slide.title(), Some("Test Title"));
    }

    #[test]
    fn test_presentation_xml_generation() {
        let mut pres = MutablePresentation::new();
        pres.add_slide(1).unwrap().set_title("Test").unwrap();

        let xml = pres
            .generate_presentation_xml("rId1", &["rId2".to_string()])
            .unwrap();
        assert!(xml.contains(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));

        assert!(pres.generate_presentation_xml("rId1", &[]).is_err());
    }

    #[test]
    fn test_empty_presentation_has_no_slide_list() {
        let pres = MutablePresentation::new();
        let xml = pres.generate_presentation_xml("rId1", &[]).unwrap();
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_package_relationships() {
        let mut pres = MutablePresentation::new();
        pres.add_slide(1).unwrap();
        pres.add_slide(0).unwrap();

        let package = pres.to_package().unwrap();
        // presentation, master, 11 layouts, theme, 2 slides, 3 props, core, app
        assert_eq!(package.part_count(), 21);

        let pres_part = package.main_document_part().unwrap();
        assert_eq!(pres_part.content_type(), ct::PML_PRESENTATION_MAIN);
        assert_eq!(pres_part.rels().get("rId1").unwrap().reltype(), rt::SLIDE_MASTER);
        assert_eq!(pres_part.rels().get("rId2").unwrap().target_ref(), "slides/slide1.xml");
        assert_eq!(pres_part.rels().get("rId3").unwrap().target_ref(), "slides/slide2.xml");

        let slide2 = package.related_part(pres_part, "rId3").unwrap();
        assert_eq!(
            slide2.rels().get("rId1").unwrap().target_ref(),
            "../slideLayouts/slideLayout1.xml"
        );

        let master = package.related_part(pres_part, "rId1").unwrap();
        assert_eq!(master.rels().len(), 12);
        assert_eq!(master.rels().get("rId12").unwrap().reltype(), rt::THEME);
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("deck.pptx");
        std::fs::write(&path, b"stale").unwrap();

        let mut pres = MutablePresentation::new();
        pres.add_slide(1).unwrap().set_title("Saved").unwrap();
        pres.save(&path).unwrap();

        let saved = std::fs::read(&path).unwrap();
        assert!(saved.starts_with(b"PK"));
        let package = OpcPackage::open(&path).unwrap();
        assert!(package.main_document_part().is_ok());
    }

    #[test]
    fn test_write_to_stream() {
        let mut pres = MutablePresentation::new();
        pres.add_slide(1).unwrap();

        let mut buffer = Vec::new();
        pres.write_to(&mut buffer).unwrap();
        assert!(buffer.starts_with(b"PK"));
        assert!(OpcPackage::from_bytes(&buffer).is_ok());
    }
}
