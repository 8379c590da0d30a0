//! Outlines combined with their horizontal metrics

use alloc::vec::Vec;

use types::Fixed;

use crate::tables::glyf::{Glyf, GlyphOutline};

/// A point in an [`AssembledGlyph`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub on_curve: bool,
    /// `true` for the last point of each contour.
    pub end_of_contour: bool,
    /// Set by hinting; always `false` after assembly.
    pub touched: bool,
}

impl Point {
    fn phantom(x: i32) -> Self {
        Point {
            x,
            y: 0,
            on_curve: true,
            end_of_contour: true,
            touched: false,
        }
    }
}

/// The points of a glyph, with two phantom points for its metrics appended.
///
/// The phantom points are `(0, 0)` followed by `(advance, 0)`. Each is a
/// contour of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssembledGlyph {
    points: Vec<Point>,
    contour_count: u32,
    left_side_bearing: i32,
    advance_width: i32,
}

impl AssembledGlyph {
    /// Flatten `outline`, resolving components through `glyf`.
    pub fn new(outline: &GlyphOutline, glyf: &Glyf, lsb: i16, advance: u16) -> Self {
        let curve_points = outline.points(glyf);
        let end_points = outline.end_points(glyf);
        let mut points: Vec<Point> = curve_points
            .iter()
            .map(|point| Point {
                x: point.x,
                y: point.y,
                on_curve: point.on_curve,
                end_of_contour: false,
                touched: false,
            })
            .collect();
        for end in end_points {
            if let Some(point) = points.get_mut(end as usize) {
                point.end_of_contour = true;
            }
        }
        points.push(Point::phantom(0));
        points.push(Point::phantom(advance as i32));
        AssembledGlyph {
            points,
            contour_count: outline.contour_count() + 2,
            left_side_bearing: lsb as i32,
            advance_width: advance as i32,
        }
    }

    /// All points, phantom points last.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// The number of contours, counting each phantom point as one.
    pub fn contour_count(&self) -> u32 {
        self.contour_count
    }

    pub fn advance_width(&self) -> i32 {
        self.advance_width
    }

    pub fn left_side_bearing(&self) -> i32 {
        self.left_side_bearing
    }

    /// Scale every coordinate and both metrics, rounding toward negative
    /// infinity.
    pub fn scale(&mut self, factor: Fixed) {
        for point in &mut self.points {
            point.x = factor.mul_int_floor(point.x);
            point.y = factor.mul_int_floor(point.y);
        }
        self.left_side_bearing = factor.mul_int_floor(self.left_side_bearing);
        self.advance_width = factor.mul_int_floor(self.advance_width);
    }
}
