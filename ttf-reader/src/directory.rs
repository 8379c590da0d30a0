//! The table directory at the front of every font file

use alloc::vec::Vec;

use types::{Tag, CFF_SFNT_VERSION, TRUE_SFNT_VERSION, TT_SFNT_VERSION};

use crate::{ByteSource, FontError, ReadError};

const HEADER_LEN: u64 = 12;
const TABLE_RECORD_LEN: u64 = 16;

/// One record in the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableEntry {
    pub tag: Tag,
    pub checksum: u32,
    /// Absolute offset of the table from the start of the file.
    pub offset: u32,
    pub length: u32,
}

impl TableEntry {
    /// The offset one past the last byte of the table.
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.length as u64
    }
}

/// The file header and its list of tables.
///
/// Entries are ordered by ascending offset; entries that share an offset
/// keep the order they had in the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDirectory {
    sfnt_version: u32,
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    entries: Vec<TableEntry>,
}

impl TableDirectory {
    /// Read the directory from the start of `source`.
    pub fn read(source: &mut impl ByteSource) -> Result<Self, FontError> {
        Self::read_impl(source).map_err(FontError::MalformedDirectory)
    }

    fn read_impl(source: &mut impl ByteSource) -> Result<Self, ReadError> {
        source.seek(0)?;
        if source.len() < HEADER_LEN {
            return Err(ReadError::OutOfBounds);
        }
        let sfnt_version = source.read_u32()?;
        let num_tables = source.read_u16()?;
        let search_range = source.read_u16()?;
        let entry_selector = source.read_u16()?;
        let range_shift = source.read_u16()?;
        if ![TT_SFNT_VERSION, CFF_SFNT_VERSION, TRUE_SFNT_VERSION].contains(&sfnt_version) {
            return Err(ReadError::InvalidSfnt(sfnt_version));
        }
        if source.remaining() < num_tables as u64 * TABLE_RECORD_LEN {
            return Err(ReadError::OutOfBounds);
        }

        let mut entries = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            entries.push(TableEntry {
                tag: Tag::from_u32(source.read_u32()?),
                checksum: source.read_u32()?,
                offset: source.read_u32()?,
                length: source.read_u32()?,
            });
        }
        // slice::sort_by_key is stable
        entries.sort_by_key(|entry| entry.offset);

        Ok(TableDirectory {
            sfnt_version,
            search_range,
            entry_selector,
            range_shift,
            entries,
        })
    }

    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    pub fn num_tables(&self) -> u16 {
        self.entries.len() as u16
    }

    pub fn search_range(&self) -> u16 {
        self.search_range
    }

    pub fn entry_selector(&self) -> u16 {
        self.entry_selector
    }

    pub fn range_shift(&self) -> u16 {
        self.range_shift
    }

    /// All entries, in ascending offset order.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// The entry for `tag`, if the font has one.
    pub fn entry(&self, tag: Tag) -> Option<&TableEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use ttf_test_data::{be_buffer, FontBuilder};

    use super::*;
    use crate::SliceSource;

    #[test]
    fn entries_sorted_by_offset() {
        let buf = be_buffer! {
            TT_SFNT_VERSION, 3u16, 32u16, 1u16, 16u16,
            Tag::new(b"hmtx"), 0u32, 200u32, 4u32,
            Tag::new(b"head"), 0u32, 60u32, 54u32,
            Tag::new(b"zero"), 0u32, 60u32, 0u32
        };
        let dir = TableDirectory::read(&mut SliceSource::new(&buf)).unwrap();
        let tags: Vec<_> = dir.entries().iter().map(|e| e.tag).collect();
        assert_eq!(tags, [Tag::new(b"head"), Tag::new(b"zero"), Tag::new(b"hmtx")]);
        assert_eq!(dir.num_tables(), 3);
        assert_eq!(dir.search_range(), 32);
        assert_eq!(dir.entry(Tag::new(b"hmtx")).map(|e| e.end()), Some(204));
        assert!(dir.entry(Tag::new(b"glyf")).is_none());
    }

    #[test]
    fn truncated_directory() {
        let buf = be_buffer! {
            TT_SFNT_VERSION, 2u16, 32u16, 1u16, 0u16,
            Tag::new(b"head"), 0u32, 60u32, 54u32
        };
        let err = TableDirectory::read(&mut SliceSource::new(&buf)).unwrap_err();
        assert_eq!(err, FontError::MalformedDirectory(ReadError::OutOfBounds));
        let err = TableDirectory::read(&mut SliceSource::new(&buf[..7])).unwrap_err();
        assert_eq!(err, FontError::MalformedDirectory(ReadError::OutOfBounds));
    }

    #[test]
    fn bad_sfnt_version() {
        let buf = FontBuilder::new().sfnt_version(0x0002_0000).build();
        let err = TableDirectory::read(&mut SliceSource::new(&buf)).unwrap_err();
        assert_eq!(
            err,
            FontError::MalformedDirectory(ReadError::InvalidSfnt(0x0002_0000))
        );
        let buf = FontBuilder::new().sfnt_version(CFF_SFNT_VERSION).build();
        assert!(TableDirectory::read(&mut SliceSource::new(&buf)).is_ok());
    }
}
