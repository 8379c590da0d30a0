//! Loading a font: the directory pass, then the dependent tables

use alloc::vec::Vec;

use types::Tag;

use crate::tables::{
    base::Base,
    bsln::Bsln,
    cmap::Cmap,
    cvt::Cvt,
    gasp::Gasp,
    glyf::RawGlyf,
    gpos::Gpos,
    gsub::Gsub,
    hdmx::RawHdmx,
    head::Head,
    hhea::Hhea,
    hmtx::RawHmtx,
    instructions::Instructions,
    kern::Kern,
    loca::{Loca, RawLoca},
    maxp::Maxp,
    name::Name,
    os2::Os2,
    post::Post,
};
use crate::{
    tags, ByteSource, Font, FontData, FontError, FontRead, ReadError, Table, TableDirectory,
    TableEntry, TableRegistry,
};

/// Settings that control how a font is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// The deepest chain of nested composite glyphs that is resolved.
    /// Composites nested deeper are dropped.
    pub max_composite_depth: usize,
    /// If `false`, glyph outlines are not decoded. The `glyf` table is
    /// still loaded, and the bytes of each glyph are available.
    pub decode_glyphs: bool,
    /// If `false`, non-fatal errors are logged but not kept in
    /// [`Font::diagnostics`].
    pub collect_diagnostics: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_composite_depth: 64,
            decode_glyphs: true,
            collect_diagnostics: true,
        }
    }
}

/// Decodes every table of a font from a [`ByteSource`].
///
/// Only a corrupt table directory fails the load. Every other problem
/// drops the affected table or glyph and is reported as a diagnostic.
pub struct FontLoader<'a, S: ?Sized> {
    source: &'a mut S,
    options: LoadOptions,
}

/// The result of dispatching on a table's tag.
enum Decoded {
    Table(Table),
    Loca(RawLoca),
    Hmtx(RawHmtx),
    Glyf(RawGlyf),
    Hdmx(RawHdmx),
    Unknown,
}

/// Tables that can only be resolved once others have been read.
#[derive(Default)]
struct Pending {
    loca: Option<RawLoca>,
    hmtx: Option<RawHmtx>,
    glyf: Option<RawGlyf>,
    hdmx: Option<RawHdmx>,
}

impl<'a, S: ByteSource + ?Sized> FontLoader<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self::with_options(source, LoadOptions::default())
    }

    pub fn with_options(source: &'a mut S, options: LoadOptions) -> Self {
        FontLoader { source, options }
    }

    /// Read the directory and decode every table.
    pub fn load(mut self) -> Result<Font, FontError> {
        let directory = TableDirectory::read(&mut self.source)?;
        log::debug!(
            "sfnt version 0x{:08X} with {} tables",
            directory.sfnt_version(),
            directory.num_tables()
        );
        let mut registry = TableRegistry::new();
        let mut pending = Pending::default();
        let mut diagnostics = Diagnostics::new(self.options.collect_diagnostics);

        for entry in directory.entries() {
            let tag = entry.tag;
            let bytes = match self.read_table_bytes(entry) {
                Ok(bytes) => bytes,
                Err(source) => {
                    diagnostics.push(FontError::TruncatedTable { tag, source });
                    continue;
                }
            };
            match decode_table(tag, bytes) {
                Ok(Decoded::Table(table)) => {
                    log::debug!("decoded '{tag}' ({} bytes)", entry.length);
                    check_subformats(&table, &mut diagnostics);
                    registry.put(tag, table);
                }
                Ok(Decoded::Loca(raw)) => pending.loca = Some(raw),
                Ok(Decoded::Hmtx(raw)) => pending.hmtx = Some(raw),
                Ok(Decoded::Glyf(raw)) => pending.glyf = Some(raw),
                Ok(Decoded::Hdmx(raw)) => pending.hdmx = Some(raw),
                Ok(Decoded::Unknown) => log::trace!("{}", FontError::UnknownTable(tag)),
                Err(source) => diagnostics.push(FontError::TruncatedTable { tag, source }),
            }
        }

        self.resolve_dependent(pending, &mut registry, &mut diagnostics);
        Ok(Font::new(directory, registry, diagnostics.into_vec()))
    }

    fn read_table_bytes(&mut self, entry: &TableEntry) -> Result<Vec<u8>, ReadError> {
        if entry.end() > self.source.len() {
            return Err(ReadError::OutOfBounds);
        }
        self.source.seek(entry.offset as u64)?;
        self.source.read_bytes(entry.length as usize)
    }

    /// Initialize `hmtx`, `hdmx`, `loca` and `glyf`, in that order.
    fn resolve_dependent(
        &self,
        pending: Pending,
        registry: &mut TableRegistry,
        diagnostics: &mut Diagnostics,
    ) {
        let num_glyphs = match registry.get(tags::MAXP) {
            Some(Table::Maxp(maxp)) => Some(maxp.num_glyphs),
            _ => None,
        };
        let is_short_loca = match registry.get(tags::HEAD) {
            Some(Table::Head(head)) => Some(head.is_short_loca()),
            _ => None,
        };
        let number_of_h_metrics = match registry.get(tags::HHEA) {
            Some(Table::Hhea(hhea)) => Some(hhea.number_of_h_metrics),
            _ => None,
        };

        if let Some(raw) = pending.hmtx {
            match (number_of_h_metrics, num_glyphs) {
                (Some(n_metrics), Some(num_glyphs)) => {
                    let extra = num_glyphs.saturating_sub(n_metrics);
                    match raw.initialize(n_metrics, extra) {
                        Ok(hmtx) => {
                            log::debug!("initialized 'hmtx' with {n_metrics} metrics");
                            registry.put(tags::HMTX, Table::Hmtx(hmtx));
                        }
                        Err(source) => diagnostics.push(FontError::TruncatedTable {
                            tag: tags::HMTX,
                            source,
                        }),
                    }
                }
                (None, _) => diagnostics.push(missing(tags::HMTX, tags::HHEA)),
                (_, None) => diagnostics.push(missing(tags::HMTX, tags::MAXP)),
            }
        }

        if let Some(raw) = pending.hdmx {
            match num_glyphs {
                Some(num_glyphs) => match raw.initialize(num_glyphs) {
                    Ok(hdmx) => {
                        log::debug!("initialized 'hdmx' with {} records", hdmx.num_records());
                        registry.put(tags::HDMX, Table::Hdmx(hdmx));
                    }
                    Err(source) => diagnostics.push(FontError::TruncatedTable {
                        tag: tags::HDMX,
                        source,
                    }),
                },
                None => diagnostics.push(missing(tags::HDMX, tags::MAXP)),
            }
        }

        let mut loca: Option<Loca> = None;
        if let Some(raw) = pending.loca {
            match (is_short_loca, num_glyphs) {
                (Some(is_short), Some(num_glyphs)) => match raw.initialize(num_glyphs, is_short) {
                    Ok(resolved) => {
                        log::debug!("initialized 'loca' for {num_glyphs} glyphs");
                        loca = Some(resolved);
                    }
                    Err(source) => diagnostics.push(FontError::TruncatedTable {
                        tag: tags::LOCA,
                        source,
                    }),
                },
                (None, _) => diagnostics.push(missing(tags::LOCA, tags::HEAD)),
                (_, None) => diagnostics.push(missing(tags::LOCA, tags::MAXP)),
            }
        }

        if let Some(raw) = pending.glyf {
            match (&loca, num_glyphs) {
                (Some(loca), Some(num_glyphs)) => {
                    let (glyf, errors) = raw.initialize(num_glyphs, loca, &self.options);
                    log::debug!(
                        "initialized 'glyf': {} glyphs, {} failures",
                        glyf.len(),
                        errors.len()
                    );
                    // already logged while decoding
                    diagnostics.extend_quiet(errors);
                    registry.put(tags::GLYF, Table::Glyf(glyf));
                }
                (None, _) => diagnostics.push(missing(tags::GLYF, tags::LOCA)),
                (_, None) => diagnostics.push(missing(tags::GLYF, tags::MAXP)),
            }
        }

        if let Some(loca) = loca {
            registry.put(tags::LOCA, Table::Loca(loca));
        }
    }
}

fn missing(tag: Tag, missing: Tag) -> FontError {
    FontError::MissingDependency { tag, missing }
}

/// Dispatch on the tag, decoding the table if it is self-contained.
fn decode_table(tag: Tag, bytes: Vec<u8>) -> Result<Decoded, ReadError> {
    let data = FontData::new(&bytes);
    let table = match tag {
        tags::HEAD => Table::Head(Head::read(data)?),
        tags::HHEA => Table::Hhea(Hhea::read(data)?),
        tags::MAXP => Table::Maxp(Maxp::read(data)?),
        tags::CMAP => Table::Cmap(Cmap::read(data)?),
        tags::KERN => Table::Kern(Kern::read(data)?),
        tags::NAME => Table::Name(Name::read(data)?),
        tags::OS_2 => Table::Os2(Os2::read(data)?),
        tags::POST => Table::Post(Post::read(data)?),
        tags::GSUB => Table::Gsub(Gsub::read(data)?),
        tags::GPOS => Table::Gpos(Gpos::read(data)?),
        tags::BASE => Table::Base(Base::read(data)?),
        tags::BSLN => Table::Bsln(Bsln::read(data)?),
        tags::CVT => Table::Cvt(Cvt::read(data)?),
        tags::FPGM => Table::Fpgm(Instructions::read(data)?),
        tags::PREP => Table::Prep(Instructions::read(data)?),
        tags::GASP => Table::Gasp(Gasp::read(data)?),
        tags::LOCA => return Ok(Decoded::Loca(RawLoca::new(bytes))),
        tags::HMTX => return Ok(Decoded::Hmtx(RawHmtx::new(bytes))),
        tags::GLYF => return Ok(Decoded::Glyf(RawGlyf::new(bytes))),
        tags::HDMX => return Ok(Decoded::Hdmx(RawHdmx::new(bytes))),
        tag if tags::OPAQUE.contains(&tag) => Table::Opaque { tag, data: bytes },
        _ => return Ok(Decoded::Unknown),
    };
    Ok(Decoded::Table(table))
}

/// Report subtables that were parsed but cannot be used.
fn check_subformats(table: &Table, diagnostics: &mut Diagnostics) {
    match table {
        Table::Cmap(cmap) => {
            for subtable in cmap.subtables().iter().filter(|s| !s.is_supported()) {
                diagnostics.push(FontError::UnsupportedSubformat {
                    tag: tags::CMAP,
                    format: subtable.format(),
                });
            }
        }
        Table::Kern(kern) => {
            for subtable in kern.subtables().iter().filter(|s| !s.is_supported()) {
                diagnostics.push(FontError::UnsupportedSubformat {
                    tag: tags::KERN,
                    format: subtable.format(),
                });
            }
        }
        _ => (),
    }
}

/// Non-fatal errors, in the order they occurred.
struct Diagnostics {
    errors: Vec<FontError>,
    collect: bool,
}

impl Diagnostics {
    fn new(collect: bool) -> Self {
        Diagnostics {
            errors: Vec::new(),
            collect,
        }
    }

    fn push(&mut self, error: FontError) {
        log::warn!("{error}");
        if self.collect {
            self.errors.push(error);
        }
    }

    fn extend_quiet(&mut self, errors: Vec<FontError>) {
        if self.collect {
            self.errors.extend(errors);
        }
    }

    fn into_vec(self) -> Vec<FontError> {
        self.errors
    }
}
