//! decoding scalars from raw big-endian bytes

/// A trait for font scalars.
///
/// Every value stored in a font file has a fixed-width big-endian encoding;
/// this trait describes how a type is read from (and written to) those bytes.
pub trait Scalar: Sized {
    /// The raw byte representation of this type.
    type Raw: Copy + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// The number of bytes occupied by the encoded value.
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self::Raw>();

    /// Create an instance of this type from raw big-endian bytes
    fn from_raw(raw: Self::Raw) -> Self;

    /// Encode this type as raw big-endian bytes
    fn to_raw(self) -> Self::Raw;

    /// Attempt to decode a value from the front of `bytes`.
    ///
    /// Returns `None` if fewer than [`Self::RAW_BYTE_LEN`] bytes are available.
    fn read(bytes: &[u8]) -> Option<Self> {
        let raw = bytes.get(..Self::RAW_BYTE_LEN)?;
        Self::Raw::try_from(raw).ok().map(Self::from_raw)
    }
}

/// An internal macro for implementing [`Scalar`] on a newtype over a scalar.
#[macro_export]
macro_rules! newtype_scalar {
    ($name:ident, $raw:ty) => {
        impl $crate::Scalar for $name {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                $crate::Scalar::to_raw(self.0)
            }

            fn from_raw(raw: $raw) -> Self {
                Self($crate::Scalar::from_raw(raw))
            }
        }
    };
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl Scalar for $ty {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            #[inline(always)]
            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);
int_scalar!(u64, [u8; 8]);
int_scalar!(i64, [u8; 8]);

impl<const N: usize> Scalar for [u8; N] {
    type Raw = [u8; N];

    fn from_raw(raw: Self::Raw) -> Self {
        raw
    }

    fn to_raw(self) -> Self::Raw {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_ints() {
        let bytes = [0xFF, 0xFE, 0x00, 0x01, 0x7F];
        assert_eq!(u16::read(&bytes), Some(0xFFFE));
        assert_eq!(i16::read(&bytes), Some(-2));
        assert_eq!(u32::read(&bytes), Some(0xFFFE_0001));
        assert_eq!(u8::read(&bytes[4..]), Some(0x7F));
        assert_eq!(u16::read(&bytes[4..]), None);
        assert_eq!(<[u8; 3]>::read(&bytes[1..]), Some([0xFE, 0x00, 0x01]));
    }

    #[test]
    fn round_trip_i8() {
        assert_eq!(i8::from_raw((-5i8).to_raw()), -5);
        assert_eq!(i8::read(&[0x80]), Some(i8::MIN));
    }
}
