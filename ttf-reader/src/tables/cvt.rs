//! The [cvt (Control Value Table)](https://docs.microsoft.com/en-us/typography/opentype/spec/cvt) table

use alloc::vec::Vec;

use types::{FWord, Tag};

use crate::{tags, FontData, FontRead, ReadError, TopLevelTable};

/// The [cvt](https://docs.microsoft.com/en-us/typography/opentype/spec/cvt) table
///
/// Values referenced by the hinting instructions. They are decoded, but
/// not interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cvt {
    values: Vec<FWord>,
}

impl TopLevelTable for Cvt {
    const TAG: Tag = tags::CVT;
}

impl FontRead for Cvt {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        // a trailing odd byte is ignored
        data.read_array(0, data.len() / 2)
            .map(|values| Cvt { values })
    }
}

impl Cvt {
    pub fn from_values(values: Vec<FWord>) -> Self {
        Cvt { values }
    }

    pub fn values(&self) -> &[FWord] {
        &self.values
    }

    pub fn get(&self, idx: usize) -> Option<FWord> {
        self.values.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_values() {
        let buf = ttf_test_data::be_buffer! { 10i16, -20i16, 0x7FFFi16, 1u8 };
        let cvt = Cvt::read(FontData::new(&buf)).unwrap();
        assert_eq!(cvt.len(), 3);
        assert_eq!(cvt.get(1), Some(FWord::new(-20)));
        assert_eq!(cvt.get(3), None);
        assert!(Cvt::read(FontData::new(&[])).unwrap().is_empty());
    }
}
