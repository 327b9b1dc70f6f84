//! Slidesmith - builds the "Spring Boot 3" PowerPoint deck
//!
//! This library turns an ordered table of (title, body) pairs into a
//! PowerPoint (.pptx) file, one "Title and Content" slide per entry. It ships
//! its own small OOXML writer and reader.
//!
//! # Features
//!
//! - **Content tables**: built-in Spring Boot 3 table, or any YAML file of the same shape
//! - **PPTX writer**: default theme, master and the 11 standard layouts
//! - **PPTX reader**: reopen a deck and read titles, placeholder text and properties
//! - **Staged errors**: a failed run reports whether loading, assembling or saving failed
//!
//! # Example - Generating the deck
//!
//! ```no_run
//! use slidesmith::deck::{ContentTable, GenerateOptions, generate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = ContentTable::builtin()?;
//! let report = generate(&table, &GenerateOptions::default())?;
//! println!("Wrote {} slides to {}", report.slide_count, report.output.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading a deck back
//!
//! ```no_run
//! use slidesmith::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("Spring_Boot_3_Presentation.pptx")?;
//! let pres = pkg.presentation()?;
//!
//! for slide in pres.slides()? {
//!     println!("Slide: {}", slide.title()?.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

/// Shared error type and XML helpers
pub mod common;

/// Content tables, slide assembly and deck generation
pub mod deck;

/// OOXML (Office Open XML) package writer and reader
///
/// Covers the OPC container and PresentationML (.pptx).
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use deck::{ContentTable, GenerateOptions, GenerationError, OverwritePolicy, SlideContent};
pub use ooxml::pptx::{MutablePresentation, Package};
