//! Office Open XML (OOXML) format implementation.
//!
//! This module writes and reads PowerPoint (.pptx) packages.
//!
//! The implementation is based on the Open Packaging Conventions (OPC) and
//! follows the structure of the python-pptx library.
//!
//! # Architecture
//!
//! The module is organized into several layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **Shared Utilities** (`error`, `metadata`): error type and document properties
//! 3. **`pptx`**: PresentationML writer and reader
//!
//! # Example
//!
//! ```rust,no_run
//! use slidesmith::ooxml::pptx::Package;
//!
//! let pkg = Package::open("Spring_Boot_3_Presentation.pptx")?;
//! let pres = pkg.presentation()?;
//!
//! for slide in pres.slides()? {
//!     println!("{}", slide.text()?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod metadata;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export core properties
pub use metadata::CoreProperties;

// Re-export error types
pub use error::{OoxmlError, Result};
