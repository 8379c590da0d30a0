//! the [post (PostScript)](https://docs.microsoft.com/en-us/typography/opentype/spec/post#header) table

use alloc::string::String;
use alloc::vec::Vec;

use types::{FWord, Fixed, GlyphId, Tag, Version16Dot16};

use crate::{tags, Cursor, FontData, FontRead, ReadError, TopLevelTable};

const NOTDEF: &str = ".notdef";

/// [post (PostScript)](https://docs.microsoft.com/en-us/typography/opentype/spec/post#header) table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Post {
    /// 0x00010000 for version 1.0 0x00020000 for version 2.0
    /// 0x00025000 for version 2.5 (deprecated) 0x00030000 for version
    /// 3.0
    pub version: Version16Dot16,
    /// Italic angle in counter-clockwise degrees from the vertical.
    pub italic_angle: Fixed,
    pub underline_position: FWord,
    pub underline_thickness: FWord,
    /// Set to 0 if the font is proportionally spaced, non-zero if the
    /// font is not proportionally spaced (i.e. monospaced).
    pub is_fixed_pitch: u32,
    pub min_mem_type42: u32,
    pub max_mem_type42: u32,
    pub min_mem_type1: u32,
    pub max_mem_type1: u32,
    names: GlyphNames,
}

/// How glyph names are stored, by version.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum GlyphNames {
    /// Version 1.0: the standard Macintosh order.
    Standard,
    /// Version 2.0: an index per glyph, into the standard names and then
    /// into the custom strings.
    Indexed {
        glyph_name_index: Vec<u16>,
        strings: Vec<String>,
    },
    /// Version 2.5: a signed offset per glyph into the standard names.
    Offsets(Vec<i8>),
    None,
}

impl Post {
    /// The number of glyph names covered by this table
    pub fn num_names(&self) -> usize {
        match &self.names {
            GlyphNames::Standard => DEFAULT_GLYPH_NAMES.len(),
            GlyphNames::Indexed {
                glyph_name_index, ..
            } => glyph_name_index.len(),
            GlyphNames::Offsets(offsets) => offsets.len(),
            GlyphNames::None => 0,
        }
    }

    /// The custom names of a version 2.0 table, in storage order.
    pub fn custom_names(&self) -> &[String] {
        match &self.names {
            GlyphNames::Indexed { strings, .. } => strings.as_slice(),
            _ => &[],
        }
    }

    /// The PostScript name of a glyph, or ".notdef" if it has none.
    pub fn glyph_name(&self, glyph_id: GlyphId) -> &str {
        self.resolve_name(glyph_id.to_usize()).unwrap_or(NOTDEF)
    }

    fn resolve_name(&self, glyph_id: usize) -> Option<&str> {
        match &self.names {
            GlyphNames::Standard => DEFAULT_GLYPH_NAMES.get(glyph_id).copied(),
            GlyphNames::Indexed {
                glyph_name_index,
                strings,
            } => {
                let idx = *glyph_name_index.get(glyph_id)? as usize;
                if idx < DEFAULT_GLYPH_NAMES.len() {
                    return DEFAULT_GLYPH_NAMES.get(idx).copied();
                }
                strings
                    .get(idx - DEFAULT_GLYPH_NAMES.len())
                    .map(String::as_str)
            }
            GlyphNames::Offsets(offsets) => {
                let offset = *offsets.get(glyph_id)? as isize;
                let idx = usize::try_from(glyph_id as isize + offset).ok()?;
                DEFAULT_GLYPH_NAMES.get(idx).copied()
            }
            GlyphNames::None => None,
        }
    }
}

impl TopLevelTable for Post {
    const TAG: Tag = tags::POST;
}

/// Read Pascal strings until the data runs out.
fn read_pascal_strings(cursor: &mut Cursor<'_>) -> Vec<String> {
    let mut strings = Vec::new();
    while let Ok(len) = cursor.read::<u8>() {
        let Ok(bytes) = cursor.read_bytes(len as usize) else {
            log::debug!("truncated glyph name in post table");
            break;
        };
        strings.push(String::from_utf8_lossy(bytes).into_owned());
    }
    strings
}

impl FontRead for Post {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: Version16Dot16 = cursor.read()?;
        let italic_angle = cursor.read()?;
        let underline_position = cursor.read()?;
        let underline_thickness = cursor.read()?;
        let is_fixed_pitch = cursor.read()?;
        let min_mem_type42 = cursor.read()?;
        let max_mem_type42 = cursor.read()?;
        let min_mem_type1 = cursor.read()?;
        let max_mem_type1 = cursor.read()?;
        let names = match version {
            Version16Dot16::VERSION_1_0 => GlyphNames::Standard,
            Version16Dot16::VERSION_2_0 => {
                let num_glyphs: u16 = cursor.read()?;
                let glyph_name_index = cursor.read_array(num_glyphs as usize)?;
                let strings = read_pascal_strings(&mut cursor);
                GlyphNames::Indexed {
                    glyph_name_index,
                    strings,
                }
            }
            Version16Dot16::VERSION_2_5 => {
                let num_glyphs: u16 = cursor.read()?;
                GlyphNames::Offsets(cursor.read_array(num_glyphs as usize)?)
            }
            _ => GlyphNames::None,
        };
        Ok(Post {
            version,
            italic_angle,
            underline_position,
            underline_thickness,
            is_fixed_pitch,
            min_mem_type42,
            max_mem_type42,
            min_mem_type1,
            max_mem_type1,
            names,
        })
    }
}

/// The 258 glyph names defined for Macintosh TrueType fonts
#[rustfmt::skip]
pub static DEFAULT_GLYPH_NAMES: [&str; 258] = [
    ".notdef", ".null", "nonmarkingreturn", "space", "exclam", "quotedbl", "numbersign", "dollar",
    "percent", "ampersand", "quotesingle", "parenleft", "parenright", "asterisk", "plus", "comma",
    "hyphen", "period", "slash", "zero", "one", "two", "three", "four", "five", "six", "seven",
    "eight", "nine", "colon", "semicolon", "less", "equal", "greater", "question", "at", "A", "B",
    "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T", "U",
    "V", "W", "X", "Y", "Z", "bracketleft", "backslash", "bracketright", "asciicircum",
    "underscore", "grave", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n",
    "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", "braceleft", "bar", "braceright",
    "asciitilde", "Adieresis", "Aring", "Ccedilla", "Eacute", "Ntilde", "Odieresis", "Udieresis",
    "aacute", "agrave", "acircumflex", "adieresis", "atilde", "aring", "ccedilla", "eacute",
    "egrave", "ecircumflex", "edieresis", "iacute", "igrave", "icircumflex", "idieresis", "ntilde",
    "oacute", "ograve", "ocircumflex", "odieresis", "otilde", "uacute", "ugrave", "ucircumflex",
    "udieresis", "dagger", "degree", "cent", "sterling", "section", "bullet", "paragraph",
    "germandbls", "registered", "copyright", "trademark", "acute", "dieresis", "notequal", "AE",
    "Oslash", "infinity", "plusminus", "lessequal", "greaterequal", "yen", "mu", "partialdiff",
    "summation", "product", "pi", "integral", "ordfeminine", "ordmasculine", "Omega", "ae",
    "oslash", "questiondown", "exclamdown", "logicalnot", "radical", "florin", "approxequal",
    "Delta", "guillemotleft", "guillemotright", "ellipsis", "nonbreakingspace", "Agrave", "Atilde",
    "Otilde", "OE", "oe", "endash", "emdash", "quotedblleft", "quotedblright", "quoteleft",
    "quoteright", "divide", "lozenge", "ydieresis", "Ydieresis", "fraction", "currency",
    "guilsinglleft", "guilsinglright", "fi", "fl", "daggerdbl", "periodcentered", "quotesinglbase",
    "quotedblbase", "perthousand", "Acircumflex", "Ecircumflex", "Aacute", "Edieresis", "Egrave",
    "Iacute", "Icircumflex", "Idieresis", "Igrave", "Oacute", "Ocircumflex", "apple", "Ograve",
    "Uacute", "Ucircumflex", "Ugrave", "dotlessi", "circumflex", "tilde", "macron", "breve",
    "dotaccent", "ring", "cedilla", "hungarumlaut", "ogonek", "caron", "Lslash", "lslash",
    "Scaron", "scaron", "Zcaron", "zcaron", "brokenbar", "Eth", "eth", "Yacute", "yacute", "Thorn",
    "thorn", "minus", "multiply", "onesuperior", "twosuperior", "threesuperior", "onehalf",
    "onequarter", "threequarters", "franc", "Gbreve", "gbreve", "Idotaccent", "Scedilla",
    "scedilla", "Cacute", "cacute", "Ccaron", "ccaron", "dcroat",
];

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::{bebuffer::BeBuffer, post as test_data};

    fn header(version: Version16Dot16) -> BeBuffer {
        BeBuffer::new()
            .push(version)
            .push(Fixed::ZERO)
            .extend([FWord::new(-100), FWord::new(50)])
            .extend([0u32; 5])
    }

    #[test]
    fn version_2_names() {
        let table = Post::read(FontData::new(test_data::SIMPLE)).unwrap();
        assert_eq!(table.version, Version16Dot16::VERSION_2_0);
        assert_eq!(table.underline_position, FWord::new(-75));
        assert_eq!(table.underline_thickness, FWord::new(50));
        assert_eq!(table.num_names(), 10);
        assert_eq!(table.glyph_name(GlyphId::new(1)), ".notdef");
        assert_eq!(table.glyph_name(GlyphId::new(2)), "space");
        assert_eq!(table.glyph_name(GlyphId::new(3)), "exclam");
        assert_eq!(table.glyph_name(GlyphId::new(4)), "numbersign");
        assert_eq!(table.glyph_name(GlyphId::new(7)), "hello");
        assert_eq!(table.glyph_name(GlyphId::new(8)), "hi");
        assert_eq!(table.glyph_name(GlyphId::new(9)), "hola");
        assert_eq!(table.glyph_name(GlyphId::new(10)), ".notdef");
        assert_eq!(table.custom_names(), ["hello", "hi", "hola"]);
    }

    #[test]
    fn missing_custom_name() {
        // drop the last string: glyph 9 now has no name
        let data = &test_data::SIMPLE[..test_data::SIMPLE.len() - 5];
        let table = Post::read(FontData::new(data)).unwrap();
        assert_eq!(table.glyph_name(GlyphId::new(8)), "hi");
        assert_eq!(table.glyph_name(GlyphId::new(9)), ".notdef");
    }

    #[test]
    fn version_1_standard_names() {
        let buf = header(Version16Dot16::VERSION_1_0);
        let table = Post::read(FontData::new(&buf)).unwrap();
        assert_eq!(table.num_names(), 258);
        assert_eq!(table.glyph_name(GlyphId::new(36)), "A");
        assert_eq!(table.glyph_name(GlyphId::new(257)), "dcroat");
        assert_eq!(table.glyph_name(GlyphId::new(258)), ".notdef");
    }

    #[test]
    fn version_2_5_offsets() {
        let buf = header(Version16Dot16::VERSION_2_5)
            .push(3u16)
            .extend([0i8, 35, -1]);
        let table = Post::read(FontData::new(&buf)).unwrap();
        assert_eq!(table.glyph_name(GlyphId::new(0)), ".notdef");
        assert_eq!(table.glyph_name(GlyphId::new(1)), "A");
        assert_eq!(table.glyph_name(GlyphId::new(2)), ".null");
    }

    #[test]
    fn version_3_has_no_names() {
        let table = Post::read(FontData::new(test_data::VERSION_3)).unwrap();
        assert_eq!(table.version, Version16Dot16::VERSION_3_0);
        assert_eq!(table.italic_angle, Fixed::from_f64(-11.5));
        assert_eq!(table.underline_position, FWord::new(-100));
        assert_eq!(table.is_fixed_pitch, 1);
        assert_eq!(table.num_names(), 0);
        assert_eq!(table.glyph_name(GlyphId::new(3)), ".notdef");
    }
}
