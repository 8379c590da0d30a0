use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// A four-byte table identifier, such as `head` or `OS/2`.
///
/// Tags compare and sort as their packed big-endian `u32`. The bytes are
/// not validated, since damaged fonts carry tags outside the printable
/// range.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tag([u8; 4]);

impl Tag {
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    pub const fn from_u32(src: u32) -> Self {
        Tag(src.to_be_bytes())
    }

    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }
}

/// A string that cannot be parsed as a [`Tag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidTag {
    /// Tags are between one and four bytes; shorter ones are padded
    /// with spaces.
    InvalidLength(usize),
    /// A byte outside printable ASCII.
    InvalidByte { pos: usize, byte: u8 },
}

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let bytes = src.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 {
            return Err(InvalidTag::InvalidLength(bytes.len()));
        }
        let mut raw = [b' '; 4];
        for (pos, &byte) in bytes.iter().enumerate() {
            if !(0x20..=0x7E).contains(&byte) {
                return Err(InvalidTag::InvalidByte { pos, byte });
            }
            raw[pos] = byte;
        }
        Ok(Tag(raw))
    }
}

impl Display for InvalidTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTag::InvalidLength(len) => write!(f, "Invalid tag length {len}"),
            InvalidTag::InvalidByte { pos, byte } => {
                write!(f, "Invalid tag byte 0x{byte:02X} at {pos}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidTag {}

impl crate::raw::Scalar for Tag {
    type Raw = [u8; 4];

    fn to_raw(self) -> Self::Raw {
        self.0
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Tag(raw)
    }
}

impl From<Tag> for u32 {
    fn from(src: Tag) -> Self {
        src.to_u32()
    }
}

// unprintable bytes are escaped
impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            if (0x20..=0x7E).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{{0x{byte:02X}}}")?;
            }
        }
        Ok(())
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({self})")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TagVisitor;
        impl serde::de::Visitor<'_> for TagVisitor {
            type Value = Tag;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(formatter, "a tag of one to four ascii characters")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(TagVisitor)
        } else {
            <[u8; 4]>::deserialize(deserializer).map(Tag)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!("cvt".parse(), Ok(Tag::new(b"cvt ")));
        assert_eq!("OS/2".parse(), Ok(Tag::new(b"OS/2")));
        assert_eq!("".parse::<Tag>(), Err(InvalidTag::InvalidLength(0)));
        assert_eq!("glyph".parse::<Tag>(), Err(InvalidTag::InvalidLength(5)));
        assert_eq!(
            "a\tb".parse::<Tag>(),
            Err(InvalidTag::InvalidByte { pos: 1, byte: 9 })
        );
    }

    #[test]
    fn packed_form() {
        assert_eq!(Tag::new(b"head").to_u32(), 0x68656164);
        assert_eq!(Tag::from_u32(0x676c7966), Tag::new(b"glyf"));
        assert_eq!(u32::from(Tag::new(b"OS/2")), 0x4F532F32);
        assert!(Tag::new(b"GSUB") < Tag::new(b"cmap"));
    }

    #[test]
    #[cfg(feature = "std")]
    fn display() {
        let damaged = Tag::new(&[0x19, b'z', b'@', 0x7F]);
        assert_eq!(damaged.to_string(), "{0x19}z@{0x7F}");
        assert_eq!(format!("{:?}", Tag::new(b"kern")), "Tag(kern)");
    }
}
