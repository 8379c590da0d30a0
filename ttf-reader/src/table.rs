//! The closed set of decoded table kinds

use alloc::vec::Vec;

use types::Tag;

use crate::tables::{
    base::Base, bsln::Bsln, cmap::Cmap, cvt::Cvt, gasp::Gasp, glyf::Glyf, gpos::Gpos, gsub::Gsub,
    hdmx::Hdmx, head::Head, hhea::Hhea, hmtx::Hmtx, instructions::Instructions, kern::Kern,
    loca::Loca, maxp::Maxp, name::Name, os2::Os2, post::Post,
};

/// Table tags, packed big-endian.
pub mod tags {
    use types::Tag;

    pub const HEAD: Tag = Tag::new(b"head");
    pub const HHEA: Tag = Tag::new(b"hhea");
    pub const MAXP: Tag = Tag::new(b"maxp");
    pub const LOCA: Tag = Tag::new(b"loca");
    pub const GLYF: Tag = Tag::new(b"glyf");
    pub const HMTX: Tag = Tag::new(b"hmtx");
    pub const CMAP: Tag = Tag::new(b"cmap");
    pub const KERN: Tag = Tag::new(b"kern");
    pub const NAME: Tag = Tag::new(b"name");
    pub const OS_2: Tag = Tag::new(b"OS/2");
    pub const POST: Tag = Tag::new(b"post");
    pub const GSUB: Tag = Tag::new(b"GSUB");
    pub const GPOS: Tag = Tag::new(b"GPOS");
    pub const BASE: Tag = Tag::new(b"BASE");
    pub const BSLN: Tag = Tag::new(b"bsln");
    pub const CVT: Tag = Tag::new(b"cvt ");
    pub const FPGM: Tag = Tag::new(b"fpgm");
    pub const PREP: Tag = Tag::new(b"prep");
    pub const GASP: Tag = Tag::new(b"gasp");
    pub const HDMX: Tag = Tag::new(b"hdmx");

    // recognized, kept as raw bytes
    pub const DSIG: Tag = Tag::new(b"DSIG");
    pub const VDMX: Tag = Tag::new(b"VDMX");
    pub const GDEF: Tag = Tag::new(b"GDEF");
    pub const JSTF: Tag = Tag::new(b"JSTF");
    pub const LTSH: Tag = Tag::new(b"LTSH");
    pub const PCLT: Tag = Tag::new(b"PCLT");
    pub const VHEA: Tag = Tag::new(b"vhea");
    pub const VMTX: Tag = Tag::new(b"vmtx");
    pub const CFF: Tag = Tag::new(b"CFF ");
    pub const FVAR: Tag = Tag::new(b"fvar");
    pub const GVAR: Tag = Tag::new(b"gvar");
    pub const AVAR: Tag = Tag::new(b"avar");
    pub const CVAR: Tag = Tag::new(b"cvar");
    pub const EBDT: Tag = Tag::new(b"EBDT");
    pub const EBLC: Tag = Tag::new(b"EBLC");
    pub const EBSC: Tag = Tag::new(b"EBSC");

    /// Tags that are loaded without being decoded.
    pub const OPAQUE: &[Tag] = &[
        DSIG, VDMX, GDEF, JSTF, LTSH, PCLT, VHEA, VMTX, CFF, FVAR, GVAR, AVAR, CVAR, EBDT, EBLC,
        EBSC,
    ];
}

/// A decoded table.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Table {
    Head(Head),
    Hhea(Hhea),
    Maxp(Maxp),
    Loca(Loca),
    Glyf(Glyf),
    Hmtx(Hmtx),
    Cmap(Cmap),
    Kern(Kern),
    Name(Name),
    Os2(Os2),
    Post(Post),
    Gsub(Gsub),
    Gpos(Gpos),
    Base(Base),
    Bsln(Bsln),
    Cvt(Cvt),
    Fpgm(Instructions),
    Prep(Instructions),
    Gasp(Gasp),
    Hdmx(Hdmx),
    /// A table that is recognized but not decoded.
    Opaque { tag: Tag, data: Vec<u8> },
}

impl Table {
    /// The tag this table is stored under.
    pub fn tag(&self) -> Tag {
        match self {
            Table::Head(_) => tags::HEAD,
            Table::Hhea(_) => tags::HHEA,
            Table::Maxp(_) => tags::MAXP,
            Table::Loca(_) => tags::LOCA,
            Table::Glyf(_) => tags::GLYF,
            Table::Hmtx(_) => tags::HMTX,
            Table::Cmap(_) => tags::CMAP,
            Table::Kern(_) => tags::KERN,
            Table::Name(_) => tags::NAME,
            Table::Os2(_) => tags::OS_2,
            Table::Post(_) => tags::POST,
            Table::Gsub(_) => tags::GSUB,
            Table::Gpos(_) => tags::GPOS,
            Table::Base(_) => tags::BASE,
            Table::Bsln(_) => tags::BSLN,
            Table::Cvt(_) => tags::CVT,
            Table::Fpgm(_) => tags::FPGM,
            Table::Prep(_) => tags::PREP,
            Table::Gasp(_) => tags::GASP,
            Table::Hdmx(_) => tags::HDMX,
            Table::Opaque { tag, .. } => *tag,
        }
    }
}
