//! Physical access to an OPC package: the ZIP container.
//!
//! The reader decompresses members on demand; the writer deflates parts into
//! an in-memory archive that is written to its destination in one call.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Physical package reader over a ZIP archive.
pub struct PhysPkgReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl PhysPkgReader<BufReader<File>> {
    /// Open an OPC package file (.pptx).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: Read + Seek> PhysPkgReader<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Decompress every file member, keyed by member name.
    pub fn read_all(&mut self) -> Result<HashMap<String, Vec<u8>>> {
        let mut members = HashMap::with_capacity(self.archive.len());

        for index in 0..self.archive.len() {
            let mut file = self.archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }

            let mut blob = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut blob)?;
            members.insert(file.name().to_string(), blob);
        }

        Ok(members)
    }
}

/// Physical package writer producing a deflated ZIP archive in memory.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    /// Write a part to the package with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        log::trace!("writing {} ({} bytes)", pack_uri, blob.len());
        self.archive.start_file(pack_uri.membername(), self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new();
        let pack_uri = PackURI::new("/ppt/presentation.xml").unwrap();
        writer.write(&pack_uri, b"<p:presentation/>").unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::new(Cursor::new(zip_data)).unwrap();
        let members = reader.read_all().unwrap();
        assert_eq!(members[pack_uri.membername()], b"<p:presentation/>");
    }

    #[test]
    fn test_missing_member() {
        let mut writer = PhysPkgWriter::new();
        writer
            .write(&PackURI::new("/[Content_Types].xml").unwrap(), b"<Types/>")
            .unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::new(Cursor::new(zip_data)).unwrap();
        let missing = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let members = reader.read_all().unwrap();
        assert_eq!(members.len(), 1);
        assert!(!members.contains_key(missing.membername()));
    }

    #[test]
    fn test_read_all() {
        let mut writer = PhysPkgWriter::new();
        writer.write(&PackURI::new("/_rels/.rels").unwrap(), b"<Relationships/>").unwrap();
        writer.write(&PackURI::new("/ppt/presentation.xml").unwrap(), b"<p/>").unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::new(Cursor::new(zip_data)).unwrap();
        let members = reader.read_all().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members["ppt/presentation.xml"], b"<p/>");
    }

    #[test]
    fn test_open_missing_file() {
        let result = PhysPkgReader::open("/nonexistent/deck.pptx");
        assert!(matches!(result, Err(OpcError::PackageNotFound(_))));
    }
}
