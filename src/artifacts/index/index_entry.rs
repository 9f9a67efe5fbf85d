use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::path_key;
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Bytes of the fixed part of an entry: digest and path length
const ENTRY_FIXED_SIZE: usize = OBJECT_ID_LENGTH / 2 + 2;

/// One staged path and the blob it points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: PathBuf,
    pub oid: ObjectId,
}

impl IndexEntry {
    pub fn new(name: &Path, oid: &ObjectId) -> Self {
        IndexEntry {
            name: name.to_path_buf(),
            oid: oid.clone(),
        }
    }

    pub(crate) fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        let name = path_key(&self.name);
        let name_len = u16::try_from(name.len())
            .map_err(|_| anyhow!("Path too long for index: {}", self.name.display()))?;

        let mut bytes = Vec::with_capacity(ENTRY_FIXED_SIZE + name.len());
        self.oid.write_h40_to(&mut bytes)?;
        bytes.write_u16::<byteorder::NetworkEndian>(name_len)?;
        bytes.extend_from_slice(name.as_bytes());

        Ok(bytes)
    }

    pub(crate) fn deserialize<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<Self> {
        let fixed = reader.read(ENTRY_FIXED_SIZE)?;
        let oid = ObjectId::read_h40_from(&mut &fixed[..OBJECT_ID_LENGTH / 2])?;
        let name_len = byteorder::NetworkEndian::read_u16(&fixed[OBJECT_ID_LENGTH / 2..]);

        let name = reader.read(name_len as usize)?;
        let name = String::from_utf8(name.to_vec())
            .map_err(|_| anyhow!("Invalid path encoding in index entry"))?;

        Ok(IndexEntry {
            name: PathBuf::from(name),
            oid,
        })
    }
}
