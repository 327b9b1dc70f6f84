//! Slide assembly: content table entries onto slides.
use crate::common::Result;
use crate::deck::content::ContentTable;
use crate::ooxml::pptx::MutablePresentation;

/// Placeholder index of the body region on content layouts.
pub const BODY_PLACEHOLDER_IDX: u32 = 1;

/// Append one slide per table entry, in table order.
///
/// Each slide is created from `layout_index`; the entry's title goes into the
/// slide's title placeholder and its body into placeholder idx 1. The first
/// failing entry aborts assembly; slides appended before it stay on the
/// presentation.
pub fn assemble(
    table: &ContentTable,
    pres: &mut MutablePresentation,
    layout_index: usize,
) -> Result<()> {
    for (i, entry) in table.iter().enumerate() {
        let slide = pres.add_slide(layout_index)?;
        slide.set_title(&entry.title)?;
        slide.placeholder_mut(BODY_PLACEHOLDER_IDX)?.set_text(&entry.body);

        log::debug!("Slide {}: {}", i + 1, entry.title);
    }
    Ok(())
}
