//! The [BASE](https://learn.microsoft.com/en-us/typography/opentype/spec/base) (Baseline) table

use alloc::vec::Vec;

use types::{MajorMinor, Tag};

use crate::{tags, FontData, FontRead, ReadError, TopLevelTable};

/// The [BASE](https://learn.microsoft.com/en-us/typography/opentype/spec/base) (Baseline) table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Base {
    pub version: MajorMinor,
    /// Offset from the start of the table; 0 if there is no horizontal axis.
    pub horiz_axis_offset: u16,
    /// Offset from the start of the table; 0 if there is no vertical axis.
    pub vert_axis_offset: u16,
    /// Present in version 1.1 and later.
    pub item_var_store_offset: Option<u32>,
    horiz_axis: Option<Axis>,
    vert_axis: Option<Axis>,
}

impl TopLevelTable for Base {
    const TAG: Tag = tags::BASE;
}

impl FontRead for Base {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: MajorMinor = cursor.read()?;
        let horiz_axis_offset = cursor.read()?;
        let vert_axis_offset = cursor.read()?;
        let item_var_store_offset = if version >= MajorMinor::VERSION_1_1 {
            Some(cursor.read()?)
        } else {
            None
        };
        Ok(Base {
            version,
            horiz_axis_offset,
            vert_axis_offset,
            item_var_store_offset,
            horiz_axis: Axis::read_at(data, horiz_axis_offset)?,
            vert_axis: Axis::read_at(data, vert_axis_offset)?,
        })
    }
}

impl Base {
    pub fn horiz_axis(&self) -> Option<&Axis> {
        self.horiz_axis.as_ref()
    }

    pub fn vert_axis(&self) -> Option<&Axis> {
        self.vert_axis.as_ref()
    }
}

/// [Axis Table](https://learn.microsoft.com/en-us/typography/opentype/spec/base#axis-tables-horizaxis-and-vertaxis)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    /// Offset from the start of the axis table; may be 0.
    pub base_tag_list_offset: u16,
    /// Offset from the start of the axis table.
    pub base_script_list_offset: u16,
    base_tags: Vec<Tag>,
    base_scripts: Vec<Tag>,
}

impl Axis {
    /// Read the axis at `offset`, if the offset is not null.
    fn read_at(data: FontData<'_>, offset: u16) -> Result<Option<Self>, ReadError> {
        if offset == 0 {
            return Ok(None);
        }
        let data = data
            .split_off(offset as usize)
            .ok_or(ReadError::OutOfBounds)?;
        let base_tag_list_offset: u16 = data.read_at(0)?;
        let base_script_list_offset: u16 = data.read_at(2)?;
        let base_tags = match base_tag_list_offset {
            0 => Vec::new(),
            offset => read_tags(data, offset as usize, 0)?,
        };
        let base_scripts = match base_script_list_offset {
            0 => Vec::new(),
            // BaseScriptRecords carry a 16-bit offset after each tag
            offset => read_tags(data, offset as usize, 2)?,
        };
        Ok(Some(Axis {
            base_tag_list_offset,
            base_script_list_offset,
            base_tags,
            base_scripts,
        }))
    }

    /// The baseline tags, in the order referenced by baseline values.
    pub fn base_tags(&self) -> &[Tag] {
        &self.base_tags
    }

    /// The scripts with baseline data on this axis.
    pub fn base_scripts(&self) -> &[Tag] {
        &self.base_scripts
    }
}

/// Read a count followed by records that start with a tag.
fn read_tags(data: FontData<'_>, offset: usize, skip: usize) -> Result<Vec<Tag>, ReadError> {
    let mut cursor = data.cursor_at(offset);
    let count: u16 = cursor.read()?;
    let mut tags = Vec::with_capacity(count as usize);
    for _ in 0..count {
        tags.push(cursor.read()?);
        cursor.advance_by(skip);
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::be_buffer;

    #[test]
    fn horizontal_axis_tags() {
        let buf = be_buffer! {
            1u16, 0u16, 8u16, 0u16,
            // axis at 8
            4u16, 14u16,
            // tag list at 12
            2u16, Tag::new(b"ideo"), Tag::new(b"romn"),
            // script list at 22
            1u16, Tag::new(b"latn"), 0u16
        };
        let base = Base::read(FontData::new(&buf)).unwrap();
        assert_eq!(base.version, MajorMinor::VERSION_1_0);
        assert_eq!(base.horiz_axis_offset, 8);
        assert!(base.vert_axis().is_none());
        let axis = base.horiz_axis().unwrap();
        assert_eq!(axis.base_tags(), [Tag::new(b"ideo"), Tag::new(b"romn")]);
        assert_eq!(axis.base_scripts(), [Tag::new(b"latn")]);
    }

    #[test]
    fn no_axes() {
        let buf = be_buffer! { 1u16, 0u16, 0u16, 0u16 };
        let base = Base::read(FontData::new(&buf)).unwrap();
        assert!(base.horiz_axis().is_none());
        assert!(base.vert_axis().is_none());
        assert_eq!(base.item_var_store_offset, None);
    }

    #[test]
    fn axis_out_of_bounds() {
        let buf = be_buffer! { 1u16, 0u16, 0u16, 100u16 };
        assert_eq!(Base::read(FontData::new(&buf)), Err(ReadError::OutOfBounds));
    }
}
