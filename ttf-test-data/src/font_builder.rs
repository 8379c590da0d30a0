//! A builder for complete sfnt files, used by loader tests.

use std::collections::BTreeMap;

use ttf_types::{Tag, TT_SFNT_VERSION};

const TABLE_RECORD_LEN: usize = 16;
const HEADER_LEN: usize = 12;

/// Build a font from some set of raw tables.
///
/// Tables are laid out in tag order, each padded to a four-byte boundary,
/// with a table directory in front.
#[derive(Debug, Clone, Default)]
pub struct FontBuilder {
    sfnt_version: Option<u32>,
    tables: BTreeMap<Tag, Vec<u8>>,
}

impl FontBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Override the sfnt version written to the header.
    pub fn sfnt_version(&mut self, version: u32) -> &mut Self {
        self.sfnt_version = Some(version);
        self
    }

    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Vec<u8>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    /// Assemble all the tables into a binary font file.
    pub fn build(&self) -> Vec<u8> {
        let num_tables = self.tables.len();
        let header_len = HEADER_LEN + num_tables * TABLE_RECORD_LEN;
        let search = SearchRange::compute(num_tables, TABLE_RECORD_LEN);

        let mut data = Vec::new();
        data.extend(self.sfnt_version.unwrap_or(TT_SFNT_VERSION).to_be_bytes());
        data.extend((num_tables as u16).to_be_bytes());
        data.extend(search.search_range.to_be_bytes());
        data.extend(search.entry_selector.to_be_bytes());
        data.extend(search.range_shift.to_be_bytes());

        let mut position = header_len as u32;
        for (tag, table) in &self.tables {
            data.extend(tag.to_be_bytes());
            data.extend(compute_checksum(table).to_be_bytes());
            data.extend(position.to_be_bytes());
            data.extend((table.len() as u32).to_be_bytes());
            position += round4(table.len()) as u32;
        }
        for table in self.tables.values() {
            data.extend_from_slice(table);
            let rem = round4(table.len()) - table.len();
            data.extend_from_slice(&[0u8; 4][..rem]);
        }
        data
    }
}

/// The binary search hints stored in the table directory header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchRange {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SearchRange {
    pub fn compute(n_items: usize, item_size: usize) -> Self {
        let entry_selector = (n_items.max(1) as f64).log2().floor() as usize;
        let search_range = (2.0_f64.powi(entry_selector as i32) * item_size as f64) as usize;
        let range_shift = (n_items * item_size).saturating_sub(search_range);
        SearchRange {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

fn round4(sz: usize) -> usize {
    (sz + 3) & !3
}

/// The table checksum: the wrapping sum of the table as big-endian u32s,
/// zero padded.
pub fn compute_checksum(table: &[u8]) -> u32 {
    table.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}
