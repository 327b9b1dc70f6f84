//! PowerPoint (.pptx) presentation support.
//!
//! The writer side builds a deck from the default template:
//!
//! - [`MutablePresentation`]: slides, layouts, document properties, saving
//! - [`MutableSlide`]: a slide created from a layout
//! - [`Placeholder`]: a placeholder shape and its text
//!
//! The reader side opens a package and reads slides back:
//!
//! - [`Package`]: the overall .pptx file package
//! - [`Presentation`]: slide list, slide size, core properties
//! - [`Slide`]: titles, placeholder text, layout name
//!
//! # Example
//!
//! ```rust
//! use slidesmith::ooxml::pptx::{MutablePresentation, Package};
//!
//! let mut pres = MutablePresentation::new();
//! pres.add_slide(1)?.set_title("Hello")?;
//!
//! let package = Package::from_bytes(&pres.to_bytes()?)?;
//! let read = package.presentation()?;
//! assert_eq!(read.slides()?[0].title()?.as_deref(), Some("Hello"));
//! # Ok::<(), slidesmith::ooxml::OoxmlError>(())
//! ```

pub mod layout;
pub mod package;
pub mod parts;
pub mod presentation;
pub mod slide;
pub mod template;
pub mod writer;

pub use layout::{PlaceholderType, SlideLayout, TITLE_AND_CONTENT};
pub use package::Package;
pub use presentation::Presentation;
pub use slide::{PlaceholderShape, Slide};
pub use writer::{MutablePresentation, MutableSlide, Placeholder};
