//! fixed-point numerical types

use std::ops::{Add, Neg, Sub};

// shared between Fixed and F2Dot14
macro_rules! fixed_impl {
    ($name:ident, $bits:literal, $fract_bits:literal, $ty:ty, $raw_len:literal) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[doc = concat!(stringify!($bits), "-bit signed fixed point number with ", stringify!($fract_bits), " bits of fraction." )]
        pub struct $name($ty);

        impl $name {
            /// Minimum value.
            pub const MIN: Self = Self(<$ty>::MIN);

            /// Maximum value.
            pub const MAX: Self = Self(<$ty>::MAX);

            /// This type's smallest representable value
            pub const EPSILON: Self = Self(1);

            /// Representation of 0.0.
            pub const ZERO: Self = Self(0);

            /// Representation of 1.0.
            pub const ONE: Self = Self(1 << $fract_bits);

            const INT_MASK: $ty = !0 << $fract_bits;
            const ROUND: $ty = 1 << ($fract_bits - 1);
            /// The number of fractional bits.
            pub const FRACT_BITS: u32 = $fract_bits;

            /// Creates a new fixed point value from the underlying bit representation.
            #[inline(always)]
            pub const fn from_bits(bits: $ty) -> Self {
                Self(bits)
            }

            /// Returns the underlying bit representation of the value.
            #[inline(always)]
            pub const fn to_bits(self) -> $ty {
                self.0
            }

            /// Creates a fixed point value from an integer, saturating on overflow.
            pub const fn from_i32(int: i32) -> Self {
                let shifted = (int as i64) << $fract_bits;
                if shifted > <$ty>::MAX as i64 {
                    Self::MAX
                } else if shifted < <$ty>::MIN as i64 {
                    Self::MIN
                } else {
                    Self(shifted as $ty)
                }
            }

            /// Returns the nearest integer value.
            pub fn round(self) -> Self {
                Self(self.0.wrapping_add(Self::ROUND) & Self::INT_MASK)
            }

            /// Returns the largest integer less than or equal to the number.
            pub fn floor(self) -> Self {
                Self(self.0 & Self::INT_MASK)
            }

            /// Returns the absolute value of the number.
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline(always)]
            fn add(self, other: Self) -> Self {
                Self(self.0.wrapping_add(other.0))
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline(always)]
            fn sub(self, other: Self) -> Self {
                Self(self.0.wrapping_sub(other.0))
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline(always)]
            fn neg(self) -> Self {
                Self(self.0.wrapping_neg())
            }
        }

        impl crate::raw::Scalar for $name {
            type Raw = [u8; $raw_len];

            fn from_raw(raw: Self::Raw) -> Self {
                Self(<$ty>::from_be_bytes(raw))
            }

            fn to_raw(self) -> Self::Raw {
                self.0.to_be_bytes()
            }
        }
    };
}

/// impl float conversion methods.
///
/// We convert to different float types in order to ensure we can roundtrip
/// without floating point error.
macro_rules! float_conv {
    ($name:ident, $to:ident, $from:ident, $ty:ty) => {
        impl $name {
            #[doc = concat!("Creates a fixed point value from a", stringify!($ty), ".")]
            ///
            /// This operation is lossy; the float will be rounded to the nearest
            /// representable value.
            pub fn $from(x: $ty) -> Self {
                let scaled = x * Self::ONE.0 as $ty;
                #[cfg(any(feature = "std", test))]
                return Self(scaled.round() as _);
                // rounds half away from zero, matching `round`
                #[cfg(all(not(feature = "std"), not(test)))]
                Self((scaled + if scaled < 0.0 { -0.5 } else { 0.5 }) as _)
            }

            #[doc = concat!("Returns the value as an ", stringify!($ty), ".")]
            ///
            /// This operation is lossless: all representable values can be
            /// round-tripped.
            pub fn $to(self) -> $ty {
                let int = ((self.0 & Self::INT_MASK) >> Self::FRACT_BITS) as $ty;
                let fract = (self.0 & !Self::INT_MASK) as $ty / Self::ONE.0 as $ty;
                int + fract
            }
        }

        // lossless conversion to float; reuse its formatting
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.$to().fmt(f)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.$to().fmt(f)
            }
        }
    };
}

fixed_impl!(F2Dot14, 16, 14, i16, 2);
fixed_impl!(Fixed, 32, 16, i32, 4);
float_conv!(F2Dot14, to_f32, from_f32, f32);
float_conv!(Fixed, to_f64, from_f64, f64);

impl F2Dot14 {
    /// Widen to a 16.16 value. This is lossless.
    pub const fn to_fixed(self) -> Fixed {
        Fixed((self.0 as i32) << 2)
    }
}

impl Fixed {
    /// Multiply an integer by this 16.16 factor, truncating toward negative
    /// infinity.
    pub const fn mul_int_floor(self, value: i32) -> i32 {
        ((value as i64 * self.0 as i64) >> 16) as i32
    }

    /// Multiply an integer by this 16.16 factor, rounding to the nearest
    /// integer with halves rounded toward positive infinity.
    pub const fn mul_int_round(self, value: i32) -> i32 {
        ((value as i64 * self.0 as i64 + 0x8000) >> 16) as i32
    }
}

#[cfg(test)]
mod tests {
    #![allow(overflowing_literals)] // we want to specify byte values directly
    use super::*;

    #[test]
    fn f2dot14_floats() {
        // Examples from https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types
        assert_eq!(F2Dot14(0x7fff), F2Dot14::from_f32(1.999939));
        assert_eq!(F2Dot14(0x7000), F2Dot14::from_f32(1.75));
        assert_eq!(F2Dot14(0x0001), F2Dot14::from_f32(0.0000610356));
        assert_eq!(F2Dot14(0x0000), F2Dot14::from_f32(0.0));
        assert_eq!(F2Dot14(0xffff), F2Dot14::from_f32(-0.000061));
        assert_eq!(F2Dot14(0x8000), F2Dot14::from_f32(-2.0));
    }

    #[test]
    fn roundtrip_f2dot14() {
        for i in i16::MIN..=i16::MAX {
            let val = F2Dot14(i);
            assert_eq!(val, F2Dot14::from_f32(val.to_f32()));
        }
    }

    #[test]
    fn f2dot14_to_fixed() {
        assert_eq!(F2Dot14::ONE.to_fixed(), Fixed::ONE);
        assert_eq!(F2Dot14::from_f32(-2.0).to_fixed(), Fixed::from_f64(-2.0));
        assert_eq!(F2Dot14::from_f32(0.75).to_fixed().to_f64(), 0.75);
    }

    #[test]
    fn round_fixed() {
        assert_eq!(Fixed(0x0001_7FFF).round(), Fixed(0x0001_0000));
        assert_eq!(Fixed(0x0001_8000).round(), Fixed(0x0002_0000));
        assert_eq!(Fixed::from_i32(3).floor(), Fixed(0x0003_0000));
    }

    #[test]
    fn fixed_floats() {
        assert_eq!(Fixed(0x7fff_0000), Fixed::from_f64(32767.));
        assert_eq!(Fixed(0x0001_0000), Fixed::from_f64(1.0));
        assert_eq!(Fixed(0x0002_8000), Fixed::from_f64(2.5));
        assert_eq!(Fixed::from_f64(-12.5).to_f64(), -12.5);
        assert_eq!(Fixed(0x7fff_ffff), Fixed::from_f64(32768.0));
    }

    #[test]
    fn fixed_mul_int() {
        assert_eq!(Fixed::from_f64(0.5).mul_int_floor(-3), -2);
        assert_eq!(Fixed::ONE.mul_int_floor(500), 500);
        assert_eq!(Fixed::from_f64(0.5).mul_int_round(3), 2);
        assert_eq!(Fixed::from_f64(0.5).mul_int_round(-3), -1);
        assert_eq!(Fixed::from_f64(2.0).mul_int_round(3), 6);
    }
}
