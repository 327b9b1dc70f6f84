/// Slides read back from a package.
use crate::ooxml::error::Result;
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::pptx::layout::PlaceholderType;
use crate::ooxml::pptx::parts::{SlideLayoutPart, SlidePart, SlideShape};

/// A placeholder read from a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderShape {
    pub name: String,
    pub ph_type: PlaceholderType,
    pub idx: u32,
    /// Paragraphs joined with `\n`, line breaks as `\v`
    pub text: String,
}

/// A slide in a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use slidesmith::ooxml::pptx::Package;
///
/// let pkg = Package::open("Spring_Boot_3_Presentation.pptx")?;
/// let pres = pkg.presentation()?;
///
/// for slide in pres.slides()?.iter() {
///     println!("Layout: {}", slide.layout_name()?);
///     println!("Body: {}", slide.placeholder_text(1)?.unwrap_or_default());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Slide<'a> {
    /// The underlying slide part
    part: SlidePart<'a>,
    /// Reference to the OPC package (for resolving the layout)
    package: &'a OpcPackage,
}

impl<'a> Slide<'a> {
    #[inline]
    pub(crate) fn new(part: SlidePart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    /// All shapes on the slide, in document order.
    pub fn shapes(&self) -> Result<Vec<SlideShape>> {
        self.part.shapes()
    }

    /// Placeholder shapes on the slide, in document order.
    pub fn placeholders(&self) -> Result<Vec<PlaceholderShape>> {
        Ok(self
            .shapes()?
            .into_iter()
            .filter_map(|shape| {
                let (ph_type, idx) = shape.placeholder?;
                Some(PlaceholderShape {
                    name: shape.name,
                    ph_type,
                    idx,
                    text: shape.text,
                })
            })
            .collect())
    }

    /// Text of the title placeholder (`title` or `ctrTitle`), if present.
    pub fn title(&self) -> Result<Option<String>> {
        Ok(self
            .placeholders()?
            .into_iter()
            .find(|ph| ph.ph_type.is_title())
            .map(|ph| ph.text))
    }

    /// Text of the placeholder with index `idx`, if present.
    pub fn placeholder_text(&self, idx: u32) -> Result<Option<String>> {
        Ok(self
            .placeholders()?
            .into_iter()
            .find(|ph| ph.idx == idx)
            .map(|ph| ph.text))
    }

    /// Text of all shapes with text, one shape per line block.
    pub fn text(&self) -> Result<String> {
        Ok(self
            .shapes()?
            .into_iter()
            .map(|shape| shape.text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Name of the slide layout this slide uses.
    pub fn layout_name(&self) -> Result<String> {
        let rel = self.part.part().rels().part_with_reltype(rt::SLIDE_LAYOUT)?;
        let layout_part = self.package.get_part(&rel.target_partname()?)?;
        SlideLayoutPart::from_part(layout_part)?.name()
    }

    /// Get the underlying slide part.
    #[inline]
    pub fn part(&self) -> &SlidePart<'a> {
        &self.part
    }
}
