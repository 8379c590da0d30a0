use std::ops::Mul;

/// Minimum and maximum extents of a rectangular region.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox<T> {
    /// Minimum extent in the x direction-- the left side of a region.
    pub x_min: T,
    /// Minimum extent in the y direction. In a Y-up coordinate system,
    /// which is used by fonts, this represents the bottom of a region.
    pub y_min: T,
    /// Maximum extent in the x direction-- the right side of a region.
    pub x_max: T,
    /// Maximum extend in the y direction. In a Y-up coordinate system,
    /// which is used by fonts, this represents the top of the
    /// region.
    pub y_max: T,
}

impl<T> BoundingBox<T>
where
    T: Mul<Output = T> + Copy,
{
    /// Return a `BoundingBox` scaled by a scale factor of the same type
    /// as the stored bounds.
    pub fn scale(&self, factor: T) -> Self {
        Self {
            x_min: self.x_min * factor,
            y_min: self.y_min * factor,
            x_max: self.x_max * factor,
            y_max: self.y_max * factor,
        }
    }
}

impl<T: PartialOrd + Copy> BoundingBox<T> {
    /// `true` if the point is inside or on the edge of the box.
    pub fn contains(&self, x: T, y: T) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_and_contains() {
        let bbox = BoundingBox {
            x_min: -1i32,
            y_min: 0,
            x_max: 10,
            y_max: 20,
        };
        assert!(bbox.contains(0, 20));
        assert!(!bbox.contains(11, 0));
        assert_eq!(bbox.scale(2).x_max, 20);
    }
}
