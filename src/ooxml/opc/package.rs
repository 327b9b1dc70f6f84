/// The in-memory OPC package.
///
/// OpcPackage holds every part by partname together with the package-level
/// relationships. It is the unit that is loaded from and saved to a `.pptx`.
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts, ordered by partname so serialization is deterministic
    parts: BTreeMap<PackURI, Box<dyn Part>>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: BTreeMap::new(),
        }
    }

    /// Open an OPC package from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let phys_reader = PhysPkgReader::open(path)?;
        Self::unmarshal(PackageReader::from_phys_reader(phys_reader)?)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let phys_reader = PhysPkgReader::new(reader)?;
        Self::unmarshal(PackageReader::from_phys_reader(phys_reader)?)
    }

    /// Load an OPC package from an in-memory archive.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Convert serialized parts and relationships into the in-memory package.
    fn unmarshal(pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();
        let (pkg_srels, sparts) = pkg_reader.into_parts();

        for srel in pkg_srels {
            let is_external = srel.is_external();
            package
                .rels
                .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
        }

        for spart in sparts {
            let mut part = PartFactory::load(spart.partname, spart.content_type, spart.blob)?;
            for srel in spart.srels {
                let is_external = srel.is_external();
                part.rels_mut()
                    .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
            }
            package.add_part(part);
        }

        Ok(package)
    }

    /// The main document part (`/ppt/presentation.xml` for a deck).
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        self.part_by_reltype(relationship_type::OFFICE_DOCUMENT)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname)
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a part by relationship type from the package level.
    pub fn part_by_reltype(&self, reltype: &str) -> Result<&dyn Part> {
        let rel = self.rels.part_with_reltype(reltype)?;
        let partname = rel.target_partname()?;
        self.get_part(&partname)
    }

    /// Follow relationship `r_id` of `source` to its target part.
    pub fn related_part(&self, source: &dyn Part, r_id: &str) -> Result<&dyn Part> {
        let rel = source
            .rels()
            .get(r_id)
            .ok_or_else(|| OpcError::RelationshipNotFound(format!("{} in {}", r_id, source.partname())))?;
        self.get_part(&rel.target_partname()?)
    }

    /// Add a part, replacing any part with the same partname.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        self.parts.insert(part.partname().clone(), part);
    }

    /// Iterate over all parts in partname order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// Get or add a package-level relationship to `partname`, returning the rId.
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        self.rels.relate_to(partname, reltype)
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
