//! A loaded font

use alloc::vec::Vec;

use types::{GlyphId, Tag};

use crate::tables::{
    base::Base,
    bsln::Bsln,
    cmap::Cmap,
    cvt::Cvt,
    gasp::Gasp,
    glyf::Glyf,
    gpos::Gpos,
    gsub::Gsub,
    hdmx::Hdmx,
    head::Head,
    hhea::Hhea,
    hmtx::Hmtx,
    instructions::Instructions,
    kern::Kern,
    loca::Loca,
    maxp::Maxp,
    name::{Name, NameId},
    os2::Os2,
    post::Post,
};
use crate::{
    tags, AssembledGlyph, ByteSource, FontError, FontLoader, Table, TableDirectory, TableRegistry,
};

/// A font whose tables have all been decoded.
///
/// A `Font` is immutable once loaded.
#[derive(Clone, Debug)]
pub struct Font {
    directory: TableDirectory,
    registry: TableRegistry,
    diagnostics: Vec<FontError>,
}

macro_rules! table_accessors {
    ($($(#[$attr:meta])* $name:ident, $variant:ident, $ty:ty, $tag:expr;)*) => {
        $(
            $(#[$attr])*
            pub fn $name(&self) -> Option<&$ty> {
                match self.registry.get($tag)? {
                    Table::$variant(table) => Some(table),
                    _ => None,
                }
            }
        )*
    };
}

impl Font {
    /// Load a font with the default [`LoadOptions`](crate::LoadOptions).
    ///
    /// To configure loading, use a [`FontLoader`].
    pub fn load<S: ByteSource + ?Sized>(source: &mut S) -> Result<Font, FontError> {
        FontLoader::new(source).load()
    }

    pub(crate) fn new(
        directory: TableDirectory,
        registry: TableRegistry,
        diagnostics: Vec<FontError>,
    ) -> Self {
        Font {
            directory,
            registry,
            diagnostics,
        }
    }

    /// The decoded table stored under `tag`.
    pub fn table(&self, tag: Tag) -> Option<&Table> {
        self.registry.get(tag)
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &TableDirectory {
        &self.directory
    }

    /// Every non-fatal error encountered while loading, in order.
    pub fn diagnostics(&self) -> &[FontError] {
        &self.diagnostics
    }

    table_accessors! {
        head, Head, Head, tags::HEAD;
        hhea, Hhea, Hhea, tags::HHEA;
        maxp, Maxp, Maxp, tags::MAXP;
        loca, Loca, Loca, tags::LOCA;
        glyf, Glyf, Glyf, tags::GLYF;
        hmtx, Hmtx, Hmtx, tags::HMTX;
        cmap, Cmap, Cmap, tags::CMAP;
        kern, Kern, Kern, tags::KERN;
        name, Name, Name, tags::NAME;
        os2, Os2, Os2, tags::OS_2;
        post, Post, Post, tags::POST;
        gsub, Gsub, Gsub, tags::GSUB;
        gpos, Gpos, Gpos, tags::GPOS;
        base, Base, Base, tags::BASE;
        bsln, Bsln, Bsln, tags::BSLN;
        cvt, Cvt, Cvt, tags::CVT;
        /// The font program.
        fpgm, Fpgm, Instructions, tags::FPGM;
        /// The control value program.
        prep, Prep, Instructions, tags::PREP;
        gasp, Gasp, Gasp, tags::GASP;
        hdmx, Hdmx, Hdmx, tags::HDMX;
    }

    /// The outline of glyph `index` with its metrics applied.
    ///
    /// `None` if the font has no `glyf` or `hmtx` table, or if the glyph
    /// has no outline.
    pub fn glyph(&self, index: u16) -> Option<AssembledGlyph> {
        let gid = GlyphId::new(index);
        let glyf = self.glyf()?;
        let hmtx = self.hmtx()?;
        let outline = glyf.outline(gid)?;
        Some(AssembledGlyph::new(
            outline,
            glyf,
            hmtx.left_side_bearing(gid),
            hmtx.advance_width(gid),
        ))
    }

    /// The number of glyphs, from `maxp`; 0 if there is none.
    pub fn num_glyphs(&self) -> u16 {
        self.maxp().map(|maxp| maxp.num_glyphs).unwrap_or(0)
    }

    pub fn units_per_em(&self) -> u16 {
        self.head().map(|head| head.units_per_em).unwrap_or(0)
    }

    /// The typographic ascent, from `hhea`.
    pub fn ascent(&self) -> i16 {
        self.hhea().map(|hhea| hhea.ascender.to_i16()).unwrap_or(0)
    }

    /// The typographic descent, from `hhea`. Usually negative.
    pub fn descent(&self) -> i16 {
        self.hhea().map(|hhea| hhea.descender.to_i16()).unwrap_or(0)
    }

    /// The family name (name id 1), or an empty string.
    pub fn font_family_name(&self) -> &str {
        self.name()
            .map(|name| name.record(NameId::FAMILY_NAME))
            .unwrap_or("")
    }
}
