//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! OOXML layer error types to the unified Error type.

use super::types::Error;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        Error::from_opc_error(err)
    }
}

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::Xml(s) => Error::XmlError(s),
            OoxmlError::PartNotFound(s) => Error::ComponentNotFound(s),
            OoxmlError::InvalidContentType { expected, got } => {
                Error::InvalidContentType { expected, got }
            },
            OoxmlError::InvalidRelationship(s) => Error::Other(s),
            OoxmlError::InvalidFormat(s) => Error::InvalidFormat(s),
            OoxmlError::LayoutNotFound { index, available } => {
                Error::LayoutNotFound { index, available }
            },
            OoxmlError::PlaceholderNotFound(s) => Error::PlaceholderNotFound(s),
            OoxmlError::Opc(e) => Error::from_opc_error(e),
            OoxmlError::Other(s) => Error::Other(s),
        }
    }
}

impl Error {
    pub(crate) fn from_opc_error(err: OpcError) -> Self {
        match err {
            OpcError::IoError(e) => Error::Io(e),
            OpcError::ZipError(e) => Error::ZipError(e.to_string()),
            OpcError::XmlError(s) => Error::XmlError(s),
            OpcError::PartNotFound(s) => Error::ComponentNotFound(s),
            OpcError::PackageNotFound(s) => Error::ComponentNotFound(s),
            _ => Error::Other(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_error_keeps_message() {
        let err: Error = OoxmlError::PlaceholderNotFound("idx 1 on slide 3".to_string()).into();
        assert!(matches!(err, Error::PlaceholderNotFound(ref s) if s == "idx 1 on slide 3"));
    }

    #[test]
    fn test_layout_error_keeps_bounds() {
        let err: Error = OoxmlError::LayoutNotFound {
            index: 42,
            available: 11,
        }
        .into();
        assert_eq!(err.to_string(), "Slide layout 42 not found (11 layouts available)");
    }

    #[test]
    fn test_opc_io_error_flattens() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = OoxmlError::Opc(OpcError::IoError(io)).into();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied));
    }
}
