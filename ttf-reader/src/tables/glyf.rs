//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

mod composite;
mod simple;

use alloc::vec::Vec;

use types::{BoundingBox, GlyphId, Tag};

use crate::decycler::{Decycler, DecyclerError};
use crate::{tags, FontData, FontError, LoadOptions, ReadError, TopLevelTable};

use super::loca::Loca;

pub use composite::{Anchor, Component, CompositeGlyph, CompositeGlyphFlags, Transform};
pub use simple::{CurvePoint, PointIter, SimpleGlyph, SimpleGlyphFlags};

/// A decoded glyph outline.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GlyphOutline {
    Simple(SimpleGlyph),
    Composite(CompositeGlyph),
}

impl GlyphOutline {
    /// Decode the outline stored in `data`: the bytes of a single glyph.
    pub fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let number_of_contours: i16 = cursor.read()?;
        let bbox = BoundingBox {
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
        };
        if number_of_contours >= 0 {
            SimpleGlyph::read_body(&mut cursor, number_of_contours as u16, bbox)
                .map(GlyphOutline::Simple)
        } else {
            CompositeGlyph::read_body(&mut cursor, bbox).map(GlyphOutline::Composite)
        }
    }

    pub fn bbox(&self) -> BoundingBox<i16> {
        match self {
            GlyphOutline::Simple(simple) => simple.bbox,
            GlyphOutline::Composite(composite) => composite.bbox,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, GlyphOutline::Composite(_))
    }

    /// The total number of points, including those of components.
    pub fn point_count(&self) -> u32 {
        match self {
            GlyphOutline::Simple(simple) => simple.num_points() as u32,
            GlyphOutline::Composite(composite) => composite.point_count(),
        }
    }

    /// The total number of contours, including those of components.
    pub fn contour_count(&self) -> u32 {
        match self {
            GlyphOutline::Simple(simple) => simple.contour_count() as u32,
            GlyphOutline::Composite(composite) => composite.contour_count(),
        }
    }

    pub fn instructions(&self) -> &[u8] {
        match self {
            GlyphOutline::Simple(simple) => simple.instructions(),
            GlyphOutline::Composite(composite) => composite.instructions(),
        }
    }
}

/// The undecoded bytes of a `glyf` table.
///
/// Glyphs can only be located once `loca` is initialized; see
/// [`RawGlyf::initialize`].
#[derive(Clone, Debug)]
pub struct RawGlyf {
    data: Vec<u8>,
}

impl RawGlyf {
    pub fn new(data: Vec<u8>) -> Self {
        RawGlyf { data }
    }

    /// Decode every glyph located by `loca`, then resolve composites.
    ///
    /// This never fails as a whole. A glyph that cannot be decoded, or a
    /// composite that cannot be resolved, is left without an outline and
    /// reported in the returned list.
    pub fn initialize(
        self,
        num_glyphs: u16,
        loca: &Loca,
        options: &LoadOptions,
    ) -> (Glyf, Vec<FontError>) {
        let mut errors = Vec::new();
        if !options.decode_glyphs {
            let glyf = Glyf {
                data: self.data,
                loca: loca.clone(),
                outlines: Vec::new(),
                decoded: false,
            };
            return (glyf, errors);
        }

        let data = FontData::new(&self.data);
        let mut outlines = Vec::with_capacity(num_glyphs as usize);
        for gid in (0..num_glyphs).map(GlyphId::new) {
            match decode_glyph(data, loca, gid) {
                Ok(outline) => outlines.push(outline),
                Err(source) => {
                    log::warn!("failed to decode {gid}: {source}");
                    errors.push(FontError::GlyphDecodeFailure { glyph: gid, source });
                    outlines.push(None);
                }
            }
        }

        let (memo, layouts) = {
            let mut resolver = Resolver::new(&outlines, options.max_composite_depth);
            for gid in (0..num_glyphs).map(GlyphId::new) {
                let mut decycler = Decycler::new(options.max_composite_depth);
                if let Err(err) = resolver.resolve(gid, &mut decycler) {
                    resolver.memo[gid.to_usize()].get_or_insert(Resolution::Failed(err));
                }
            }
            (resolver.memo, resolver.layouts)
        };

        for (idx, outline) in outlines.iter_mut().enumerate() {
            let Some(GlyphOutline::Composite(composite)) = outline else {
                continue;
            };
            match (&memo[idx], &layouts[idx]) {
                (Some(Resolution::Failed(source)), _) => {
                    let glyph = GlyphId::new(idx as u16);
                    log::warn!("dropping composite {glyph}: {source}");
                    errors.push(FontError::CyclicComposite {
                        glyph,
                        source: *source,
                    });
                    *outline = None;
                }
                (_, Some(counts)) => composite.set_layout(counts),
                _ => (),
            }
        }

        let glyf = Glyf {
            data: self.data,
            loca: loca.clone(),
            outlines,
            decoded: true,
        };
        (glyf, errors)
    }
}

fn decode_glyph(
    data: FontData,
    loca: &Loca,
    gid: GlyphId,
) -> Result<Option<GlyphOutline>, ReadError> {
    let range = loca.glyph_range(gid)?;
    if range.is_empty() {
        return Ok(None);
    }
    let glyph_data = data.slice(range).ok_or(ReadError::OutOfBounds)?;
    GlyphOutline::read(glyph_data).map(Some)
}

#[derive(Clone, Copy, Debug)]
enum Resolution {
    Done(Counts),
    Failed(DecyclerError),
}

/// Point and contour totals of a glyph, and its composite nesting height.
#[derive(Clone, Copy, Debug, Default)]
struct Counts {
    points: u32,
    contours: u32,
    /// 0 for simple glyphs, otherwise one more than the tallest component.
    height: usize,
}

/// Computes composite point and contour totals, depth first.
///
/// Only outcomes that hold for every path through a glyph are memoized:
/// successful totals and cycles. A branch cut short by the decycler's
/// depth limit says nothing about the glyphs below the root, so those are
/// left unresolved and decided when visited as roots themselves.
struct Resolver<'a> {
    outlines: &'a [Option<GlyphOutline>],
    max_height: usize,
    memo: Vec<Option<Resolution>>,
    /// Per-component counts, for each resolved composite.
    layouts: Vec<Option<Vec<(u32, u32)>>>,
}

impl<'a> Resolver<'a> {
    fn new(outlines: &'a [Option<GlyphOutline>], max_height: usize) -> Self {
        Resolver {
            outlines,
            max_height,
            memo: vec![None; outlines.len()],
            layouts: vec![None; outlines.len()],
        }
    }

    fn resolve(
        &mut self,
        gid: GlyphId,
        decycler: &mut Decycler<GlyphId>,
    ) -> Result<Counts, DecyclerError> {
        let idx = gid.to_usize();
        match self.memo.get(idx).copied().flatten() {
            Some(Resolution::Done(counts)) => return Ok(counts),
            Some(Resolution::Failed(err)) => return Err(err),
            None => (),
        }
        // missing and undecodable glyphs contribute nothing
        let outlines = self.outlines;
        let result = match outlines.get(idx) {
            Some(Some(GlyphOutline::Simple(simple))) => Ok(Counts {
                points: simple.num_points() as u32,
                contours: simple.contour_count() as u32,
                height: 0,
            }),
            Some(Some(GlyphOutline::Composite(composite))) => {
                let mut cycle_guard = decycler.enter(gid)?;
                self.resolve_components(gid, composite, &mut cycle_guard)
            }
            _ => return Ok(Counts::default()),
        };
        match result {
            Ok(counts) => self.memo[idx] = Some(Resolution::Done(counts)),
            Err(DecyclerError::CycleDetected) => {
                self.memo[idx] = Some(Resolution::Failed(DecyclerError::CycleDetected))
            }
            Err(DecyclerError::DepthLimitExceeded) => (),
        }
        result
    }

    fn resolve_components(
        &mut self,
        gid: GlyphId,
        composite: &CompositeGlyph,
        decycler: &mut Decycler<GlyphId>,
    ) -> Result<Counts, DecyclerError> {
        let mut counts = Vec::with_capacity(composite.components().len());
        let mut total = Counts::default();
        for component in composite.components() {
            let component = self.resolve(component.glyph, decycler)?;
            total.points = total.points.saturating_add(component.points);
            total.contours = total.contours.saturating_add(component.contours);
            total.height = total.height.max(component.height + 1);
            counts.push((component.points, component.contours));
        }
        if total.height > self.max_height {
            return Err(DecyclerError::DepthLimitExceeded);
        }
        self.layouts[gid.to_usize()] = Some(counts);
        Ok(total)
    }
}

/// The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table
///
/// Holds the raw table bytes alongside the decoded outline of every glyph.
#[derive(Clone, Debug)]
pub struct Glyf {
    data: Vec<u8>,
    loca: Loca,
    outlines: Vec<Option<GlyphOutline>>,
    decoded: bool,
}

impl TopLevelTable for Glyf {
    const TAG: Tag = tags::GLYF;
}

impl Glyf {
    /// The outline of `gid`.
    ///
    /// `None` for glyphs with no outline (such as a space), for glyphs that
    /// could not be decoded, and for glyphs out of range.
    pub fn outline(&self, gid: GlyphId) -> Option<&GlyphOutline> {
        self.outlines.get(gid.to_usize())?.as_ref()
    }

    /// The number of glyph slots.
    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    /// `false` if outlines were not decoded at load time.
    pub fn is_decoded(&self) -> bool {
        self.decoded
    }

    pub fn iter(&self) -> impl Iterator<Item = (GlyphId, Option<&GlyphOutline>)> + '_ {
        self.outlines
            .iter()
            .enumerate()
            .map(|(idx, outline)| (GlyphId::new(idx as u16), outline.as_ref()))
    }

    /// The undecoded bytes of `gid`.
    pub fn glyph_data(&self, gid: GlyphId) -> Option<&[u8]> {
        let range = self.loca.glyph_range(gid).ok()?;
        self.data.get(range)
    }

    /// The whole table.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::loca::RawLoca;
    use ttf_test_data::{glyf as test_data, BeBuffer};

    /// Concatenate glyphs and build long loca offsets for them.
    fn build(glyphs: &[&[u8]]) -> (RawGlyf, Loca) {
        let mut data = Vec::new();
        let mut offsets = BeBuffer::new().push(0u32);
        for glyph in glyphs {
            data.extend_from_slice(glyph);
            offsets = offsets.push(data.len() as u32);
        }
        let loca = RawLoca::new(offsets.into_vec())
            .initialize(glyphs.len() as u16, false)
            .unwrap();
        (RawGlyf::new(data), loca)
    }

    fn initialize(glyphs: &[&[u8]]) -> (Glyf, Vec<FontError>) {
        let (raw, loca) = build(glyphs);
        raw.initialize(glyphs.len() as u16, &loca, &LoadOptions::default())
    }

    #[test]
    fn simple_triangle() {
        let triangle = test_data::triangle();
        let (glyf, errors) = initialize(&[&[], &triangle]);
        assert!(errors.is_empty());
        assert!(glyf.outline(GlyphId::new(0)).is_none());
        let outline = glyf.outline(GlyphId::new(1)).unwrap();
        assert_eq!(outline.point_count(), 3);
        assert_eq!(outline.contour_count(), 1);
        assert_eq!(outline.end_points(&glyf), [2]);
        assert_eq!(
            outline.points(&glyf),
            [
                CurvePoint::on_curve(0, 0),
                CurvePoint::on_curve(100, 0),
                CurvePoint::on_curve(50, 100)
            ]
        );
        assert_eq!(outline.bbox().x_max, 100);
        assert_eq!(glyf.glyph_data(GlyphId::new(1)).map(<[u8]>::len), Some(30));
        assert_eq!(glyf.iter().filter(|(_, o)| o.is_some()).count(), 1);
    }

    #[test]
    fn mixed_coordinate_encodings() {
        let glyph = test_data::mixed_encodings();
        let outline = GlyphOutline::read(FontData::new(&glyph)).unwrap();
        let GlyphOutline::Simple(simple) = &outline else {
            panic!("expected simple glyph");
        };
        assert_eq!(simple.instructions(), [0xB0, 0x01, 0x1D]);
        assert_eq!(simple.end_points(), [2, 6]);
        let points: Vec<_> = simple.points().map(|p| (p.x, p.y, p.on_curve)).collect();
        assert_eq!(
            points,
            [
                (10, 20, true),
                (15, 20, false),
                (5, 10, true),
                (5, 310, true),
                (5, 310, true),
                (5, 310, true),
                (5, 310, true),
            ]
        );
    }

    #[test]
    fn composite_offsets_and_scale() {
        let triangle = test_data::triangle();
        let scale = types::F2Dot14::from_f32(0.5).to_bits();
        let composite = test_data::single_component(
            1,
            test_data::ARGS_ARE_XY_VALUES | test_data::WE_HAVE_A_SCALE,
            (10, -5),
            &[scale],
        );
        let (glyf, errors) = initialize(&[&[], &triangle, &composite]);
        assert!(errors.is_empty());
        let outline = glyf.outline(GlyphId::new(2)).unwrap();
        assert!(outline.is_composite());
        assert_eq!(outline.point_count(), 3);
        assert_eq!(outline.contour_count(), 1);
        let points: Vec<_> = outline.points(&glyf).iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(points, [(10, -5), (60, -5), (35, 45)]);
        assert_eq!(outline.x(2, &glyf), Some(35));
        assert_eq!(outline.point(3, &glyf), None);
    }

    #[test]
    fn nested_component_indices() {
        let triangle = test_data::triangle();
        let mixed = test_data::mixed_encodings();
        let pair = test_data::two_components(1, 2, 100, 0);
        let nested = test_data::single_component(3, test_data::ARGS_ARE_XY_VALUES, (0, 1), &[]);
        let (glyf, errors) = initialize(&[&[], &triangle, &mixed, &pair, &nested]);
        assert!(errors.is_empty());

        let GlyphOutline::Composite(pair) = glyf.outline(GlyphId::new(3)).unwrap() else {
            panic!("expected composite");
        };
        let second = &pair.components()[1];
        assert_eq!(second.first_point(), 3);
        assert_eq!(second.first_contour(), 1);
        assert_eq!(second.num_points(), 7);
        assert_eq!(pair.point_count(), 10);
        assert_eq!(pair.contour_count(), 3);
        assert_eq!(pair.end_point(1, &glyf), Some(5));
        assert_eq!(pair.end_points(&glyf), [2, 5, 9]);
        assert_eq!(pair.point(3, &glyf), Some(CurvePoint::on_curve(110, 20)));
        assert_eq!(pair.flag(4, &glyf), Some(0x32));

        let nested = glyf.outline(GlyphId::new(4)).unwrap();
        assert_eq!(nested.point_count(), 10);
        assert_eq!(nested.y(9, &glyf), Some(311));
    }

    #[test]
    fn missing_component_contributes_nothing() {
        let triangle = test_data::triangle();
        let pair = test_data::two_components(1, 40, 0, 0);
        let (glyf, errors) = initialize(&[&[], &triangle, &pair]);
        assert!(errors.is_empty());
        let outline = glyf.outline(GlyphId::new(2)).unwrap();
        assert_eq!(outline.point_count(), 3);
        assert_eq!(outline.points(&glyf).len(), 3);
    }

    #[test]
    fn cyclic_composites_are_dropped() {
        let triangle = test_data::triangle();
        let flags = test_data::ARGS_ARE_XY_VALUES;
        let to_self = test_data::single_component(2, flags, (0, 0), &[]);
        let a = test_data::single_component(4, flags, (0, 0), &[]);
        let b = test_data::single_component(3, flags, (0, 0), &[]);
        let (glyf, errors) = initialize(&[&[], &triangle, &to_self, &a, &b]);
        assert!(glyf.outline(GlyphId::new(1)).is_some());
        for gid in 2..5 {
            assert!(glyf.outline(GlyphId::new(gid)).is_none());
        }
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|err| matches!(
            err,
            FontError::CyclicComposite {
                source: DecyclerError::CycleDetected,
                ..
            }
        )));
    }

    /// `count` composites from glyph 2 up, each referencing the next, with
    /// the last one referencing the triangle at glyph 1.
    fn chain(count: u16) -> Vec<Vec<u8>> {
        let last = count + 1;
        (2..=last)
            .map(|gid| {
                let next = if gid == last { 1 } else { gid + 1 };
                test_data::single_component(next, test_data::ARGS_ARE_XY_VALUES, (0, 0), &[]).into_vec()
            })
            .collect()
    }

    fn initialize_with_depth(
        glyphs: &[&[u8]],
        max_composite_depth: usize,
    ) -> (Glyf, Vec<FontError>) {
        let (raw, loca) = build(glyphs);
        let options = LoadOptions {
            max_composite_depth,
            ..Default::default()
        };
        raw.initialize(glyphs.len() as u16, &loca, &options)
    }

    #[test]
    fn depth_limit() {
        let triangle = test_data::triangle();
        // 2 -> 3 -> 4 -> 5 -> 1
        let chain = chain(4);
        let mut glyphs: Vec<&[u8]> = vec![&[], &triangle[..]];
        glyphs.extend(chain.iter().map(|glyph| &glyph[..]));
        let (glyf, errors) = initialize_with_depth(&glyphs, 3);
        assert!(glyf.outline(GlyphId::new(2)).is_none());
        for gid in 3..6 {
            let outline = glyf.outline(GlyphId::new(gid)).unwrap();
            assert_eq!(outline.point_count(), 3, "glyph {gid}");
        }
        assert_eq!(
            errors,
            [FontError::CyclicComposite {
                glyph: GlyphId::new(2),
                source: DecyclerError::DepthLimitExceeded,
            }]
        );
    }

    #[test]
    fn depth_limit_counts_from_the_glyph() {
        let triangle = test_data::triangle();
        let chain = chain(4);
        let mut glyphs: Vec<&[u8]> = vec![&[], &triangle[..]];
        glyphs.extend(chain.iter().map(|glyph| &glyph[..]));
        let (with_referrers, _) = initialize_with_depth(&glyphs, 2);
        // the same font with glyphs 2 and 3 empty
        glyphs[2] = &[];
        glyphs[3] = &[];
        let (alone, errors) = initialize_with_depth(&glyphs, 2);
        assert!(errors.is_empty());

        let points = |glyf: &Glyf, gid: u16| {
            glyf.outline(GlyphId::new(gid))
                .map(|outline| outline.point_count())
        };
        for glyf in [&with_referrers, &alone] {
            assert_eq!(points(glyf, 4), Some(3));
            assert_eq!(points(glyf, 5), Some(3));
        }
        assert_eq!(points(&with_referrers, 3), None);
    }

    #[test]
    fn depth_limit_with_deepest_glyph_last() {
        let triangle = test_data::triangle();
        let flags = test_data::ARGS_ARE_XY_VALUES;
        // 5 -> 4 -> 3 -> 2 -> 1
        let chain: Vec<_> = (2..6u16)
            .map(|gid| test_data::single_component(gid - 1, flags, (0, 0), &[]))
            .collect();
        let mut glyphs: Vec<&[u8]> = vec![&[], &triangle[..]];
        glyphs.extend(chain.iter().map(|glyph| &glyph[..]));
        let (glyf, errors) = initialize_with_depth(&glyphs, 3);
        assert!(glyf.outline(GlyphId::new(5)).is_none());
        assert!(glyf.outline(GlyphId::new(4)).is_some());
        assert_eq!(
            errors,
            [FontError::CyclicComposite {
                glyph: GlyphId::new(5),
                source: DecyclerError::DepthLimitExceeded,
            }]
        );
    }

    #[test]
    fn corrupt_glyph_is_reported() {
        let triangle = test_data::triangle();
        let (glyf, errors) = initialize(&[&triangle[..12], &triangle]);
        assert!(glyf.outline(GlyphId::new(0)).is_none());
        assert!(glyf.outline(GlyphId::new(1)).is_some());
        assert_eq!(
            errors,
            [FontError::GlyphDecodeFailure {
                glyph: GlyphId::new(0),
                source: ReadError::OutOfBounds
            }]
        );
    }

    #[test]
    fn skip_decoding() {
        let triangle = test_data::triangle();
        let (raw, loca) = build(&[&triangle]);
        let options = LoadOptions {
            decode_glyphs: false,
            ..Default::default()
        };
        let (glyf, errors) = raw.initialize(1, &loca, &options);
        assert!(errors.is_empty());
        assert!(!glyf.is_decoded());
        assert!(glyf.outline(GlyphId::new(0)).is_none());
        assert_eq!(glyf.glyph_data(GlyphId::new(0)), Some(&triangle[..]));
    }
}
