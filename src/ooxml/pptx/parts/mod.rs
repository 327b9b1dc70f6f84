/// Parts for PowerPoint presentation documents.
///
/// This module contains wrapper types for the XML parts of a .pptx package
/// that the reader needs.
pub mod presentation;
pub mod slide;

pub use presentation::PresentationPart;
pub use slide::{SlideLayoutPart, SlidePart, SlideShape};
