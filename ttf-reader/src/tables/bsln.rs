//! The [bsln](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6bsln.html) (Baseline) table

use alloc::vec::Vec;

use types::{Fixed, GlyphId, Tag};

use crate::{tags, FontData, FontRead, ReadError, TopLevelTable};

/// The number of baseline classes.
pub const NUM_BASELINES: usize = 32;

/// The [bsln](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6bsln.html) (Baseline) table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bsln {
    pub version: Fixed,
    pub format: u16,
    /// The baseline class used for glyphs without a mapping.
    pub default_baseline: u16,
    pub parts: BslnParts,
}

/// The format dependent part of the table.
///
/// Per-glyph class lookup tables (formats 1 and 3) are not decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BslnParts {
    /// Formats 0 and 1: a distance in font units for each baseline.
    Distance { deltas: Vec<i16> },
    /// Formats 2 and 3: a control point on a standard glyph for each
    /// baseline, with 0xFFFF for undefined.
    ControlPoint {
        standard_glyph: GlyphId,
        control_points: Vec<u16>,
    },
    Unknown,
}

impl TopLevelTable for Bsln {
    const TAG: Tag = tags::BSLN;
}

impl FontRead for Bsln {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let format = cursor.read()?;
        let default_baseline = cursor.read()?;
        let parts = match format {
            0 | 1 => BslnParts::Distance {
                deltas: cursor.read_array(NUM_BASELINES)?,
            },
            2 | 3 => BslnParts::ControlPoint {
                standard_glyph: cursor.read()?,
                control_points: cursor.read_array(NUM_BASELINES)?,
            },
            _ => BslnParts::Unknown,
        };
        Ok(Bsln {
            version,
            format,
            default_baseline,
            parts,
        })
    }
}
