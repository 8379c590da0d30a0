//! Simple glyphs: contours of points

use alloc::vec::Vec;

use types::{BoundingBox, Scalar};

use crate::{Cursor, FontData, ReadError};

bitflags::bitflags! {
    /// Flags used in [SimpleGlyph]
    #[derive(Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SimpleGlyphFlags: u8 {
        /// Bit 0: If set, the point is on the curve; otherwise, it is off
        /// the curve.
        const ON_CURVE_POINT = 0x01;
        /// Bit 1: If set, the corresponding x-coordinate is 1 byte long,
        /// and the sign is determined by the
        /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag. If not set, its
        /// interpretation depends on the
        /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag: If that other flag
        /// is set, the x-coordinate is the same as the previous
        /// x-coordinate, and no element is added to the xCoordinates
        /// array. If both flags are not set, the corresponding element in
        /// the xCoordinates array is two bytes and interpreted as a signed
        /// integer.
        const X_SHORT_VECTOR = 0x02;
        /// Bit 2: If set, the corresponding y-coordinate is 1 byte long,
        /// and the sign is determined by the
        /// Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR flag.
        const Y_SHORT_VECTOR = 0x04;
        /// Bit 3: If set, the next byte (read as unsigned) specifies the
        /// number of additional times this flag byte is to be repeated in
        /// the logical flags array.
        const REPEAT_FLAG = 0x08;
        /// Bit 4: This flag has two meanings, depending on how the
        /// X_SHORT_VECTOR flag is set. If X_SHORT_VECTOR is set, this bit
        /// describes the sign of the value, with 1 equalling positive and
        /// 0 negative. If X_SHORT_VECTOR is not set and this bit is set,
        /// then the current x-coordinate is the same as the previous
        /// x-coordinate.
        const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR = 0x10;
        /// Bit 5: The same, for the y-coordinate.
        const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR = 0x20;
        /// Bit 6: If set, contours in the glyph description may overlap.
        const OVERLAP_SIMPLE = 0x40;
    }
}

impl Scalar for SimpleGlyphFlags {
    type Raw = [u8; 1];

    fn from_raw(raw: [u8; 1]) -> Self {
        Self::from_bits_truncate(u8::from_raw(raw))
    }

    fn to_raw(self) -> [u8; 1] {
        self.bits().to_raw()
    }
}

/// Point with an associated on-curve flag in a simple glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// X cooordinate.
    pub x: i32,
    /// Y cooordinate.
    pub y: i32,
    /// True if this is an on-curve point.
    pub on_curve: bool,
}

impl CurvePoint {
    /// Construct a new `CurvePoint`
    pub fn new(x: i32, y: i32, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }

    /// Convenience method to construct an on-curve point
    pub fn on_curve(x: i32, y: i32) -> Self {
        Self::new(x, y, true)
    }

    /// Convenience method to construct an off-curve point
    pub fn off_curve(x: i32, y: i32) -> Self {
        Self::new(x, y, false)
    }
}

/// The run-length expanded flag stream.
#[derive(Clone)]
pub(crate) struct FlagIter<'a> {
    cursor: Cursor<'a>,
    repeats: u8,
    current: SimpleGlyphFlags,
}

impl<'a> FlagIter<'a> {
    pub(crate) fn new(flags: &'a [u8]) -> Self {
        Self {
            cursor: FontData::new(flags).cursor(),
            repeats: 0,
            current: SimpleGlyphFlags::empty(),
        }
    }
}

impl Iterator for FlagIter<'_> {
    type Item = SimpleGlyphFlags;

    fn next(&mut self) -> Option<Self::Item> {
        if self.repeats == 0 {
            self.current = self.cursor.read().ok()?;
            if self.current.contains(SimpleGlyphFlags::REPEAT_FLAG) {
                // a missing count byte means no repeats
                self.repeats = self.cursor.read().unwrap_or(0);
            }
        } else {
            self.repeats -= 1;
        }
        Some(self.current)
    }
}

/// Decodes the points of a simple glyph from its three streams.
///
/// Each step pulls one expanded flag, then the x and y deltas that flag
/// calls for, accumulating absolute coordinates.
#[derive(Clone)]
pub struct PointIter<'a> {
    flags: FlagIter<'a>,
    x_coords: Cursor<'a>,
    y_coords: Cursor<'a>,
    remaining: usize,
    cur_x: i32,
    cur_y: i32,
}

impl<'a> PointIter<'a> {
    fn new(n_points: usize, flags: &'a [u8], x_coords: &'a [u8], y_coords: &'a [u8]) -> Self {
        Self {
            flags: FlagIter::new(flags),
            x_coords: FontData::new(x_coords).cursor(),
            y_coords: FontData::new(y_coords).cursor(),
            remaining: n_points,
            cur_x: 0,
            cur_y: 0,
        }
    }

    /// Decode the points of a glyph's data, starting at its flags.
    ///
    /// The three stream lengths are validated up front, so the iterator
    /// itself cannot run out of data.
    pub fn from_glyph_data(data: &'a [u8], n_points: usize) -> Result<Self, ReadError> {
        let lens = resolve_coords_len(data, n_points)?;
        let total_len = lens.flags + lens.x_coords + lens.y_coords;
        if data.len() < total_len {
            return Err(ReadError::OutOfBounds);
        }
        let (flags, data) = data.split_at(lens.flags);
        let (x_coords, y_coords) = data.split_at(lens.x_coords);
        Ok(PointIter::new(n_points, flags, x_coords, y_coords))
    }
}

fn coord_delta(cursor: &mut Cursor<'_>, short: bool, same_or_positive: bool) -> i32 {
    match (short, same_or_positive) {
        (true, true) => cursor.read::<u8>().unwrap_or(0) as i32,
        (true, false) => -(cursor.read::<u8>().unwrap_or(0) as i32),
        (false, false) => cursor.read::<i16>().unwrap_or(0) as i32,
        (false, true) => 0,
    }
}

impl Iterator for PointIter<'_> {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let flags = self.flags.next()?;
        self.remaining -= 1;
        let delta_x = coord_delta(
            &mut self.x_coords,
            flags.contains(SimpleGlyphFlags::X_SHORT_VECTOR),
            flags.contains(SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR),
        );
        let delta_y = coord_delta(
            &mut self.y_coords,
            flags.contains(SimpleGlyphFlags::Y_SHORT_VECTOR),
            flags.contains(SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR),
        );
        self.cur_x = self.cur_x.wrapping_add(delta_x);
        self.cur_y = self.cur_y.wrapping_add(delta_y);
        let on_curve = flags.contains(SimpleGlyphFlags::ON_CURVE_POINT);
        Some(CurvePoint::new(self.cur_x, self.cur_y, on_curve))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

struct FieldLengths {
    flags: usize,
    x_coords: usize,
    y_coords: usize,
}

/// Resolves coordinate arrays length.
///
/// The length depends on *Simple Glyph Flags*, so we have to process them all to find it.
fn resolve_coords_len(data: &[u8], points_total: usize) -> Result<FieldLengths, ReadError> {
    let mut cursor = FontData::new(data).cursor();
    let mut flags_left = points_total;
    let mut x_coords_len = 0;
    let mut y_coords_len = 0;
    while flags_left > 0 {
        let flags: SimpleGlyphFlags = cursor.read()?;

        // The number of times a glyph point repeats.
        let repeats = if flags.contains(SimpleGlyphFlags::REPEAT_FLAG) {
            let repeats: u8 = cursor.read()?;
            (repeats as usize + 1).min(flags_left)
        } else {
            1
        };

        if flags.contains(SimpleGlyphFlags::X_SHORT_VECTOR) {
            x_coords_len += repeats;
        } else if !flags.contains(SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR) {
            x_coords_len += repeats * 2;
        }
        if flags.contains(SimpleGlyphFlags::Y_SHORT_VECTOR) {
            y_coords_len += repeats;
        } else if !flags.contains(SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR) {
            y_coords_len += repeats * 2;
        }

        flags_left -= repeats;
    }

    Ok(FieldLengths {
        flags: cursor.position(),
        x_coords: x_coords_len,
        y_coords: y_coords_len,
    })
}

/// A glyph made of contours of quadratic points.
///
/// `flags`, `x_coords` and `y_coords` always have one entry per point, and
/// the number of points is one more than the last contour end point.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleGlyph {
    pub bbox: BoundingBox<i16>,
    end_points: Vec<u16>,
    instructions: Vec<u8>,
    flags: Vec<SimpleGlyphFlags>,
    x_coords: Vec<i32>,
    y_coords: Vec<i32>,
}

impl SimpleGlyph {
    /// Decode the body of a simple glyph: everything after the bounding box.
    pub(crate) fn read_body(
        cursor: &mut Cursor<'_>,
        number_of_contours: u16,
        bbox: BoundingBox<i16>,
    ) -> Result<Self, ReadError> {
        let end_points: Vec<u16> = cursor.read_array(number_of_contours as usize)?;
        let instruction_length: u16 = cursor.read()?;
        let instructions = cursor.read_bytes(instruction_length as usize)?.to_vec();
        let n_points = match end_points.last() {
            Some(last) => *last as usize + 1,
            None => 0,
        };
        let data = cursor.remaining().unwrap_or_default();
        let data = data.as_bytes();
        let flags: Vec<_> = FlagIter::new(data).take(n_points).collect();
        let (x_coords, y_coords) = PointIter::from_glyph_data(data, n_points)?
            .map(|point| (point.x, point.y))
            .unzip();
        Ok(SimpleGlyph {
            bbox,
            end_points,
            instructions,
            flags,
            x_coords,
            y_coords,
        })
    }

    /// Returns the total number of points.
    pub fn num_points(&self) -> usize {
        self.flags.len()
    }

    pub fn contour_count(&self) -> usize {
        self.end_points.len()
    }

    /// The index of the last point of each contour.
    pub fn end_points(&self) -> &[u16] {
        &self.end_points
    }

    /// The TrueType instructions for this glyph.
    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }

    /// One flag per point, after run-length expansion.
    pub fn flags(&self) -> &[SimpleGlyphFlags] {
        &self.flags
    }

    /// Absolute x coordinates, one per point.
    pub fn x_coords(&self) -> &[i32] {
        &self.x_coords
    }

    /// Absolute y coordinates, one per point.
    pub fn y_coords(&self) -> &[i32] {
        &self.y_coords
    }

    /// The point at `idx`.
    pub fn point(&self, idx: usize) -> Option<CurvePoint> {
        Some(CurvePoint::new(
            *self.x_coords.get(idx)?,
            *self.y_coords.get(idx)?,
            self.flags
                .get(idx)?
                .contains(SimpleGlyphFlags::ON_CURVE_POINT),
        ))
    }

    /// Returns an iterator over the points in the glyph.
    pub fn points(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        (0..self.num_points()).filter_map(|idx| self.point(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ttf_test_data::be_buffer;

    const ON: u8 = 0x01;
    const X_SHORT: u8 = 0x02;
    const Y_SHORT: u8 = 0x04;
    const REPEAT: u8 = 0x08;
    const X_SAME: u8 = 0x10;
    const Y_SAME: u8 = 0x20;

    #[test]
    fn repeat_flag_expands_to_count_plus_one() {
        let flags = [ON | REPEAT, 3, X_SHORT];
        let expanded: Vec<_> = FlagIter::new(&flags).map(|f| f.bits()).collect();
        assert_eq!(
            expanded,
            [ON | REPEAT, ON | REPEAT, ON | REPEAT, ON | REPEAT, X_SHORT]
        );
    }

    #[test]
    fn coordinate_deltas() {
        // each point starts from (100, 100): one long delta per axis first
        let first = 0u8;
        let cases = [
            (X_SHORT | X_SAME | Y_SHORT | Y_SAME, 105),
            (X_SHORT | Y_SHORT, 95),
            (X_SAME | Y_SAME, 100),
        ];
        for (flag, expected) in cases {
            let buf = be_buffer! { first, flag };
            let coords = match flag & X_SHORT {
                0 => be_buffer! { 100i16 },
                _ => be_buffer! { 100i16, 5u8 },
            };
            let mut data = buf.into_vec();
            data.extend_from_slice(&coords);
            data.extend_from_slice(&coords);
            let points: Vec<_> = PointIter::from_glyph_data(&data, 2).unwrap().collect();
            assert_eq!(points[0], CurvePoint::off_curve(100, 100));
            assert_eq!((points[1].x, points[1].y), (expected, expected), "{flag:#x}");
        }
        // long delta is signed
        let buf = be_buffer! { 0u8, 0u8, 100i16, -300i16, 100i16, 7i16 };
        let points: Vec<_> = PointIter::from_glyph_data(&buf, 2).unwrap().collect();
        assert_eq!(points[1], CurvePoint::off_curve(-200, 107));
    }

    #[test]
    fn restartable() {
        let buf = be_buffer! { ON | X_SHORT | X_SAME | Y_SHORT | Y_SAME | REPEAT, 1u8, 1u8, 2u8, 3u8, 4u8 };
        let iter = PointIter::from_glyph_data(&buf, 2).unwrap();
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(first, [CurvePoint::on_curve(1, 3), CurvePoint::on_curve(3, 7)]);
    }

    #[test]
    fn truncated_coordinates() {
        let buf = be_buffer! { 0u8, 0u8, 1u8 };
        assert_eq!(
            PointIter::from_glyph_data(&buf, 2).err(),
            Some(ReadError::OutOfBounds)
        );
        let buf = be_buffer! { REPEAT };
        assert_eq!(
            PointIter::from_glyph_data(&buf, 2).err(),
            Some(ReadError::OutOfBounds)
        );
    }
}
