//! Composite glyphs: transformed references to other glyphs

use alloc::vec::Vec;

use types::{BoundingBox, F2Dot14, Fixed, GlyphId, Scalar};

use super::{CurvePoint, Glyf, GlyphOutline};
use crate::{Cursor, ReadError};

bitflags::bitflags! {
    /// Flags used in [`Component`]
    #[derive(Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CompositeGlyphFlags: u16 {
        /// Bit 0: If this is set, the arguments are 16-bit (uint16 or
        /// int16); otherwise, they are bytes (uint8 or int8).
        const ARG_1_AND_2_ARE_WORDS = 0x0001;
        /// Bit 1: If this is set, the arguments are signed xy values,
        /// otherwise, they are unsigned point numbers.
        const ARGS_ARE_XY_VALUES = 0x0002;
        /// Bit 2: If set and ARGS_ARE_XY_VALUES is also set, the xy values
        /// are rounded to the nearest grid line. Ignored if
        /// ARGS_ARE_XY_VALUES is not set.
        const ROUND_XY_TO_GRID = 0x0004;
        /// Bit 3: This indicates that there is a simple scale for the
        /// component. Otherwise, scale = 1.0.
        const WE_HAVE_A_SCALE = 0x0008;
        /// Bit 5: Indicates at least one more glyph after this one.
        const MORE_COMPONENTS = 0x0020;
        /// Bit 6: The x direction will use a different scale from the y
        /// direction.
        const WE_HAVE_AN_X_AND_Y_SCALE = 0x0040;
        /// Bit 7: There is a 2 by 2 transformation that will be used to
        /// scale the component.
        const WE_HAVE_A_TWO_BY_TWO = 0x0080;
        /// Bit 8: Following the last component are instructions for the
        /// composite character.
        const WE_HAVE_INSTRUCTIONS = 0x0100;
        /// Bit 9: If set, this forces the aw and lsb (and rsb) for the
        /// composite to be equal to those from this component glyph.
        const USE_MY_METRICS = 0x0200;
        /// Bit 10: If set, the components of the compound glyph overlap.
        const OVERLAP_COMPOUND = 0x0400;
        /// Bit 11: The composite is designed to have the component offset
        /// scaled. Ignored if ARGS_ARE_XY_VALUES is not set.
        const SCALED_COMPONENT_OFFSET = 0x0800;
        /// Bit 12: The composite is designed not to have the component
        /// offset scaled. Ignored if ARGS_ARE_XY_VALUES is not set.
        const UNSCALED_COMPONENT_OFFSET = 0x1000;
    }
}

impl Scalar for CompositeGlyphFlags {
    type Raw = [u8; 2];

    fn from_raw(raw: [u8; 2]) -> Self {
        Self::from_bits_truncate(u16::from_raw(raw))
    }

    fn to_raw(self) -> [u8; 2] {
        self.bits().to_raw()
    }
}

/// Transform for a composite component.
///
/// The stored 2.14 values are widened to 16.16.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// X scale factor.
    pub xx: Fixed,
    /// YX skew factor.
    pub yx: Fixed,
    /// XY skew factor.
    pub xy: Fixed,
    /// Y scale factor.
    pub yy: Fixed,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            xx: Fixed::ONE,
            yx: Fixed::ZERO,
            xy: Fixed::ZERO,
            yy: Fixed::ONE,
        }
    }
}

impl Transform {
    /// Apply the linear part of the transform, rounding each result to the
    /// nearest integer (halves toward positive infinity).
    pub fn apply(&self, x: i32, y: i32) -> (i32, i32) {
        let round = |a: Fixed, b: Fixed| {
            let sum = x as i64 * a.to_bits() as i64 + y as i64 * b.to_bits() as i64;
            ((sum + 0x8000) >> 16) as i32
        };
        (round(self.xx, self.xy), round(self.yx, self.yy))
    }
}

/// Anchor position for a composite component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    Offset { x: i16, y: i16 },
    Point { base: u16, component: u16 },
}

impl Anchor {
    /// The translation this anchor applies. Point anchors are not
    /// resolved, and do not move the component.
    pub fn translation(&self) -> (i32, i32) {
        match self {
            Anchor::Offset { x, y } => (*x as i32, *y as i32),
            Anchor::Point { .. } => (0, 0),
        }
    }
}

/// A reference to another glyph. Part of [CompositeGlyph].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    /// Component flags.
    pub flags: CompositeGlyphFlags,
    /// Glyph identifier.
    pub glyph: GlyphId,
    /// Anchor for component placement.
    pub anchor: Anchor,
    /// Component transformation matrix.
    pub transform: Transform,
    pub(crate) layout: ComponentLayout,
}

/// Where a component's points and contours land in the composite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct ComponentLayout {
    pub first_point: u32,
    pub first_contour: u32,
    pub num_points: u32,
    pub num_contours: u32,
}

impl Component {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, ReadError> {
        let flags: CompositeGlyphFlags = cursor.read()?;
        let glyph = cursor.read::<GlyphId>()?;
        let args_are_words = flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS);
        let args_are_xy_values = flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES);
        let anchor = match (args_are_xy_values, args_are_words) {
            (true, true) => Anchor::Offset {
                x: cursor.read()?,
                y: cursor.read()?,
            },
            (true, false) => Anchor::Offset {
                x: cursor.read::<i8>()? as _,
                y: cursor.read::<i8>()? as _,
            },
            (false, true) => Anchor::Point {
                base: cursor.read()?,
                component: cursor.read()?,
            },
            (false, false) => Anchor::Point {
                base: cursor.read::<u8>()? as _,
                component: cursor.read::<u8>()? as _,
            },
        };
        let mut transform = Transform::default();
        let mut read_scale = || cursor.read::<F2Dot14>().map(F2Dot14::to_fixed);
        if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
            transform.xx = read_scale()?;
            transform.yy = transform.xx;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
            transform.xx = read_scale()?;
            transform.yy = read_scale()?;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
            transform.xx = read_scale()?;
            transform.yx = read_scale()?;
            transform.xy = read_scale()?;
            transform.yy = read_scale()?;
        }
        Ok(Component {
            flags,
            glyph,
            anchor,
            transform,
            layout: ComponentLayout::default(),
        })
    }

    /// The index, in the composite, of this component's first point.
    pub fn first_point(&self) -> u32 {
        self.layout.first_point
    }

    /// The index, in the composite, of this component's first contour.
    pub fn first_contour(&self) -> u32 {
        self.layout.first_contour
    }

    /// The number of points this component contributes.
    pub fn num_points(&self) -> u32 {
        self.layout.num_points
    }

    /// The number of contours this component contributes.
    pub fn num_contours(&self) -> u32 {
        self.layout.num_contours
    }

    fn owns_point(&self, idx: u32) -> bool {
        idx >= self.layout.first_point && idx - self.layout.first_point < self.layout.num_points
    }

    fn owns_contour(&self, idx: u32) -> bool {
        idx >= self.layout.first_contour
            && idx - self.layout.first_contour < self.layout.num_contours
    }

    /// Map a point of the referenced glyph into the composite.
    fn place(&self, point: CurvePoint) -> CurvePoint {
        let (x, y) = self.transform.apply(point.x, point.y);
        let (dx, dy) = self.anchor.translation();
        CurvePoint::new(x.wrapping_add(dx), y.wrapping_add(dy), point.on_curve)
    }
}

/// A glyph built from other glyphs.
///
/// Point and contour indices run across all components, in order. Queries
/// that need the referenced glyphs take the [`Glyf`] table that holds them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeGlyph {
    pub bbox: BoundingBox<i16>,
    components: Vec<Component>,
    instructions: Vec<u8>,
    num_points: u32,
    num_contours: u32,
}

impl CompositeGlyph {
    /// Decode the component records following the bounding box.
    pub(crate) fn read_body(
        cursor: &mut Cursor<'_>,
        bbox: BoundingBox<i16>,
    ) -> Result<Self, ReadError> {
        let mut components = Vec::new();
        loop {
            let component = Component::read(cursor)?;
            let more = component
                .flags
                .contains(CompositeGlyphFlags::MORE_COMPONENTS);
            components.push(component);
            if !more {
                break;
            }
        }
        let has_instructions = components
            .last()
            .is_some_and(|c| c.flags.contains(CompositeGlyphFlags::WE_HAVE_INSTRUCTIONS));
        let instructions = if has_instructions {
            let len = cursor.read::<u16>()? as usize;
            cursor.read_bytes(len)?.to_vec()
        } else {
            Vec::new()
        };
        Ok(CompositeGlyph {
            bbox,
            components,
            instructions,
            num_points: 0,
            num_contours: 0,
        })
    }

    /// Record where each component's points land, given the point and
    /// contour count of each referenced glyph.
    pub(crate) fn set_layout(&mut self, counts: &[(u32, u32)]) {
        let mut first_point = 0u32;
        let mut first_contour = 0u32;
        for (component, (num_points, num_contours)) in self.components.iter_mut().zip(counts) {
            component.layout = ComponentLayout {
                first_point,
                first_contour,
                num_points: *num_points,
                num_contours: *num_contours,
            };
            first_point = first_point.saturating_add(*num_points);
            first_contour = first_contour.saturating_add(*num_contours);
        }
        self.num_points = first_point;
        self.num_contours = first_contour;
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The TrueType interpreter instructions.
    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }

    /// The total number of points in every component.
    pub fn point_count(&self) -> u32 {
        self.num_points
    }

    /// The total number of contours in every component.
    pub fn contour_count(&self) -> u32 {
        self.num_contours
    }

    fn point_owner(&self, idx: u32) -> Option<&Component> {
        self.components.iter().find(|c| c.owns_point(idx))
    }

    fn contour_owner(&self, idx: u32) -> Option<&Component> {
        self.components.iter().find(|c| c.owns_contour(idx))
    }

    /// The last point index of contour `idx`.
    pub fn end_point(&self, idx: u32, glyf: &Glyf) -> Option<u32> {
        let component = self.contour_owner(idx)?;
        let sub = glyf.outline(component.glyph)?;
        let end = sub.end_point(idx - component.layout.first_contour, glyf)?;
        Some(end + component.layout.first_point)
    }

    /// The flag byte of point `idx`, from the simple glyph it comes from.
    pub fn flag(&self, idx: u32, glyf: &Glyf) -> Option<u8> {
        let component = self.point_owner(idx)?;
        let sub = glyf.outline(component.glyph)?;
        sub.flag(idx - component.layout.first_point, glyf)
    }

    /// Point `idx`, transformed into the composite's coordinates.
    pub fn point(&self, idx: u32, glyf: &Glyf) -> Option<CurvePoint> {
        let component = self.point_owner(idx)?;
        let sub = glyf.outline(component.glyph)?;
        let point = sub.point(idx - component.layout.first_point, glyf)?;
        Some(component.place(point))
    }

    pub fn x(&self, idx: u32, glyf: &Glyf) -> Option<i32> {
        self.point(idx, glyf).map(|point| point.x)
    }

    pub fn y(&self, idx: u32, glyf: &Glyf) -> Option<i32> {
        self.point(idx, glyf).map(|point| point.y)
    }

    /// Every point of every component, transformed.
    pub fn points(&self, glyf: &Glyf) -> Vec<CurvePoint> {
        let mut points = Vec::with_capacity(self.num_points as usize);
        for component in &self.components {
            if let Some(sub) = glyf.outline(component.glyph) {
                points.extend(sub.points(glyf).into_iter().map(|p| component.place(p)));
            }
        }
        points
    }

    /// The last point index of every contour.
    pub fn end_points(&self, glyf: &Glyf) -> Vec<u32> {
        let mut ends = Vec::with_capacity(self.num_contours as usize);
        for component in &self.components {
            if let Some(sub) = glyf.outline(component.glyph) {
                let first = component.layout.first_point;
                ends.extend(sub.end_points(glyf).into_iter().map(|end| end + first));
            }
        }
        ends
    }
}

impl GlyphOutline {
    /// The last point index of contour `idx`.
    pub fn end_point(&self, idx: u32, glyf: &Glyf) -> Option<u32> {
        match self {
            GlyphOutline::Simple(simple) => {
                simple.end_points().get(idx as usize).map(|end| *end as u32)
            }
            GlyphOutline::Composite(composite) => composite.end_point(idx, glyf),
        }
    }

    /// The flag byte of point `idx`.
    pub fn flag(&self, idx: u32, glyf: &Glyf) -> Option<u8> {
        match self {
            GlyphOutline::Simple(simple) => simple.flags().get(idx as usize).map(|f| f.bits()),
            GlyphOutline::Composite(composite) => composite.flag(idx, glyf),
        }
    }

    pub fn point(&self, idx: u32, glyf: &Glyf) -> Option<CurvePoint> {
        match self {
            GlyphOutline::Simple(simple) => simple.point(idx as usize),
            GlyphOutline::Composite(composite) => composite.point(idx, glyf),
        }
    }

    pub fn x(&self, idx: u32, glyf: &Glyf) -> Option<i32> {
        self.point(idx, glyf).map(|point| point.x)
    }

    pub fn y(&self, idx: u32, glyf: &Glyf) -> Option<i32> {
        self.point(idx, glyf).map(|point| point.y)
    }

    /// All points of the outline, resolving components.
    pub fn points(&self, glyf: &Glyf) -> Vec<CurvePoint> {
        match self {
            GlyphOutline::Simple(simple) => simple.points().collect(),
            GlyphOutline::Composite(composite) => composite.points(glyf),
        }
    }

    /// The last point index of every contour, resolving components.
    pub fn end_points(&self, glyf: &Glyf) -> Vec<u32> {
        match self {
            GlyphOutline::Simple(simple) => {
                simple.end_points().iter().map(|end| *end as u32).collect()
            }
            GlyphOutline::Composite(composite) => composite.end_points(glyf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontData;
    use ttf_test_data::glyf as test_data;

    fn read(buf: &[u8]) -> CompositeGlyph {
        match GlyphOutline::read(FontData::new(buf)).unwrap() {
            GlyphOutline::Composite(composite) => composite,
            other => panic!("expected composite, found {other:?}"),
        }
    }

    #[test]
    fn transform_rounding() {
        let scale = Transform {
            xx: Fixed::from_f64(2.0),
            ..Default::default()
        };
        assert_eq!(scale.apply(3, 4), (6, 4));
        let half = Transform {
            xx: Fixed::from_f64(0.5),
            yy: Fixed::from_f64(0.5),
            ..Default::default()
        };
        // halves round toward positive infinity
        assert_eq!(half.apply(3, -3), (2, -1));
        let skew = Transform {
            xy: Fixed::from_f64(0.25),
            ..Default::default()
        };
        assert_eq!(skew.apply(10, 8), (12, 8));
    }

    #[test]
    fn byte_offset_arguments() {
        let flags = test_data::ARGS_ARE_XY_VALUES;
        let composite = read(&test_data::single_component(5, flags, (-3, 7), &[]));
        let component = &composite.components()[0];
        assert_eq!(component.glyph, GlyphId::new(5));
        assert_eq!(component.anchor, Anchor::Offset { x: -3, y: 7 });
        assert_eq!(component.transform, Transform::default());
        assert!(composite.instructions().is_empty());
    }

    #[test]
    fn point_arguments() {
        let flags = test_data::ARG_1_AND_2_ARE_WORDS;
        let composite = read(&test_data::single_component(2, flags, (300, 1), &[]));
        let anchor = composite.components()[0].anchor;
        assert_eq!(
            anchor,
            Anchor::Point {
                base: 300,
                component: 1
            }
        );
        assert_eq!(anchor.translation(), (0, 0));
    }

    #[test]
    fn scale_variants() {
        let half = F2Dot14::from_f32(0.5).to_bits();
        let quarter = F2Dot14::from_f32(0.25).to_bits();
        let neg = F2Dot14::from_f32(-1.0).to_bits();
        let xy = test_data::ARGS_ARE_XY_VALUES;

        let one = read(&test_data::single_component(
            1,
            xy | test_data::WE_HAVE_A_SCALE,
            (0, 0),
            &[half],
        ));
        let t = one.components()[0].transform;
        assert_eq!((t.xx, t.yy), (Fixed::from_f64(0.5), Fixed::from_f64(0.5)));

        let two = read(&test_data::single_component(
            1,
            xy | test_data::WE_HAVE_AN_X_AND_Y_SCALE,
            (0, 0),
            &[half, neg],
        ));
        let t = two.components()[0].transform;
        assert_eq!((t.xx, t.yy), (Fixed::from_f64(0.5), Fixed::from_f64(-1.0)));
        assert_eq!(t.xy, Fixed::ZERO);

        let four = read(&test_data::single_component(
            1,
            xy | test_data::WE_HAVE_A_TWO_BY_TWO,
            (0, 0),
            &[half, quarter, neg, half],
        ));
        let t = four.components()[0].transform;
        assert_eq!(t.xx, Fixed::from_f64(0.5));
        assert_eq!(t.yx, Fixed::from_f64(0.25));
        assert_eq!(t.xy, Fixed::from_f64(-1.0));
        assert_eq!(t.yy, Fixed::from_f64(0.5));
    }

    #[test]
    fn trailing_instructions() {
        let composite = read(&test_data::two_components(1, 2, 10, -10));
        assert_eq!(composite.components().len(), 2);
        assert_eq!(
            composite.components()[1].anchor,
            Anchor::Offset { x: 10, y: -10 }
        );
        assert_eq!(composite.instructions(), [0x2C, 0x00]);
    }

    #[test]
    fn truncated_component() {
        let buf = test_data::single_component(1, test_data::WE_HAVE_A_SCALE, (0, 0), &[]);
        assert!(GlyphOutline::read(FontData::new(&buf)).is_err());
    }
}
