//! The [fpgm](https://docs.microsoft.com/en-us/typography/opentype/spec/fpgm)
//! and [prep](https://docs.microsoft.com/en-us/typography/opentype/spec/prep) tables

use alloc::vec::Vec;

use crate::{FontData, FontRead, ReadError};

/// TrueType bytecode, stored without interpretation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instructions {
    bytes: Vec<u8>,
}

impl FontRead for Instructions {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        Ok(Instructions {
            bytes: data.as_bytes().to_vec(),
        })
    }
}

impl Instructions {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_kept() {
        // PUSHB[0] 1, SVTCA[1]
        let program = Instructions::read(FontData::new(&[0xB0, 0x01, 0x01])).unwrap();
        assert_eq!(program.as_bytes(), [0xB0, 0x01, 0x01]);
        assert_eq!(program.len(), 3);
        assert!(Instructions::read(FontData::new(&[])).unwrap().is_empty());
    }
}
