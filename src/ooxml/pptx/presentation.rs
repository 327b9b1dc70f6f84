/// Main presentation object - the high-level API for reading presentations.
use crate::ooxml::error::Result;
use crate::ooxml::metadata::{self, CoreProperties};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::pptx::parts::{PresentationPart, SlidePart};
use crate::ooxml::pptx::slide::Slide;

/// A PowerPoint presentation.
///
/// Not intended to be constructed directly. Use `Package::presentation()` to
/// access a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use slidesmith::ooxml::pptx::Package;
///
/// let pkg = Package::open("Spring_Boot_3_Presentation.pptx")?;
/// let pres = pkg.presentation()?;
///
/// if let Some((width, height)) = pres.slide_size()? {
///     println!("Slide size: {}x{} EMUs", width, height);
/// }
///
/// for slide in pres.slides()? {
///     println!("{}", slide.title()?.unwrap_or_default());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Presentation<'a> {
    /// The underlying presentation part
    part: PresentationPart<'a>,
    /// Reference to the OPC package for accessing related parts
    package: &'a OpcPackage,
}

impl<'a> Presentation<'a> {
    /// Create a new Presentation.
    ///
    /// This is typically called internally by `Package::presentation()`.
    #[inline]
    pub(crate) fn new(part: PresentationPart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    /// Get the number of slides in the presentation.
    pub fn slide_count(&self) -> Result<usize> {
        self.part.slide_count()
    }

    /// Get the slide width in EMUs (English Metric Units).
    ///
    /// Returns None if the slide size is not defined.
    /// 1 EMU = 1/914400 inch = 1/36000 mm
    pub fn slide_width(&self) -> Result<Option<i64>> {
        Ok(self.part.slide_size()?.map(|(cx, _)| cx))
    }

    /// Get the slide height in EMUs.
    ///
    /// Returns None if the slide size is not defined.
    pub fn slide_height(&self) -> Result<Option<i64>> {
        Ok(self.part.slide_size()?.map(|(_, cy)| cy))
    }

    /// Get the slide dimensions as a tuple (width, height) in EMUs.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        self.part.slide_size()
    }

    /// Get all slides in the presentation, in `sldIdLst` order.
    pub fn slides(&self) -> Result<Vec<Slide<'a>>> {
        let slide_rids = self.part.slide_rids()?;
        let mut slides = Vec::with_capacity(slide_rids.len());

        let pres_part = self.part.part();

        for rid in slide_rids {
            let related_part = self.package.related_part(pres_part, &rid)?;
            let slide_part = SlidePart::from_part(related_part)?;
            slides.push(Slide::new(slide_part, self.package));
        }

        Ok(slides)
    }

    /// Get a specific slide by index.
    pub fn slide(&self, index: usize) -> Result<Option<Slide<'a>>> {
        Ok(self.slides()?.into_iter().nth(index))
    }

    /// Document core properties, or defaults when the package has none.
    pub fn core_properties(&self) -> Result<CoreProperties> {
        metadata::extract_core_properties(self.package)
    }

    /// Get access to the underlying presentation part.
    #[inline]
    pub fn part(&self) -> &PresentationPart<'a> {
        &self.part
    }

    /// Get access to the underlying OPC package.
    #[inline]
    pub fn package(&self) -> &'a OpcPackage {
        self.package
    }
}
