//! Deck generation from a slide content table.
//!
//! - [`content`]: the ordered (title, body) table, built in or loaded from YAML
//! - [`assemble`]: one slide per table entry on a [`MutablePresentation`]
//! - [`generate`]: assembly plus persistence, with a staged error
//!
//! # Example
//!
//! ```rust,no_run
//! use slidesmith::deck::{ContentTable, GenerateOptions, generate};
//!
//! let table = ContentTable::builtin()?;
//! let report = generate(&table, &GenerateOptions::default())?;
//! println!("{} slides written", report.slide_count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`MutablePresentation`]: crate::ooxml::pptx::MutablePresentation

pub mod assemble;
pub mod content;
pub mod generate;

pub use assemble::{BODY_PLACEHOLDER_IDX, assemble};
pub use content::{ContentTable, SlideContent};
pub use generate::{
    DEFAULT_OUTPUT, DEFAULT_TITLE, GenerateOptions, GenerationError, GenerationReport,
    OverwritePolicy, Stage, generate, generate_from,
};
