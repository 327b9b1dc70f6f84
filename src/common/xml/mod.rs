//! XML helpers shared by the part writers.

mod escape;

pub use escape::{
    escape_control_chars, escape_xml, resolve_entity, unescape_control_chars, unescape_xml,
};
