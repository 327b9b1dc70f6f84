//! Mutable presentation writer components for PPTX.

pub mod pres;
pub mod shape;
pub mod slide;

// Re-export main types
pub use pres::MutablePresentation;
pub use shape::Placeholder;
pub use slide::MutableSlide;
