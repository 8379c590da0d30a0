//! Loading complete fonts built in memory.

use pretty_assertions::assert_eq;
use ttf_reader::{
    tags, types::GlyphId, DecyclerError, Font, FontError, FontLoader, LoadOptions, ReadError,
    SliceSource, TableDirectory,
};
use ttf_test_data::{
    glyf::{self, ARGS_ARE_XY_VALUES, WE_HAVE_AN_X_AND_Y_SCALE, WE_HAVE_A_SCALE},
    tables, BeBuffer, FontBuilder,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn load(bytes: &[u8]) -> Font {
    init_logging();
    Font::load(&mut SliceSource::new(bytes)).unwrap()
}

/// A font with long loca offsets and one metric per glyph.
fn font_with_glyphs(glyphs: &[&[u8]]) -> Vec<u8> {
    let num_glyphs = glyphs.len() as u16;
    let mut glyf = Vec::new();
    let mut loca = BeBuffer::new().push(0u32);
    for glyph in glyphs {
        glyf.extend_from_slice(glyph);
        loca = loca.push(glyf.len() as u32);
    }
    let metrics: Vec<(u16, i16)> = (0..num_glyphs).map(|gid| (500 + gid, 0)).collect();
    let mut builder = FontBuilder::new();
    builder
        .add_raw(tags::HEAD, tables::head(2048, 1))
        .add_raw(tags::MAXP, tables::maxp(num_glyphs))
        .add_raw(tags::HHEA, tables::hhea(1900, -500, num_glyphs))
        .add_raw(tags::HMTX, tables::hmtx(&metrics, &[]))
        .add_raw(tags::LOCA, loca)
        .add_raw(tags::GLYF, glyf);
    builder.build()
}

fn xy(font: &Font, gid: u16) -> Vec<(i32, i32)> {
    font.glyph(gid)
        .unwrap()
        .points()
        .iter()
        .map(|point| (point.x, point.y))
        .collect()
}

#[test]
fn minimal_font() {
    let font = load(&tables::minimal_font());
    assert!(font.diagnostics().is_empty());
    assert_eq!(font.num_glyphs(), 2);
    assert_eq!(font.units_per_em(), 1000);
    assert_eq!(font.ascent(), 800);
    assert_eq!(font.descent(), -200);

    // glyph 0 has an empty loca range
    assert!(font.glyph(0).is_none());

    let glyph = font.glyph(1).unwrap();
    assert_eq!(glyph.point_count(), 5);
    assert_eq!(glyph.contour_count(), 3);
    assert_eq!(glyph.advance_width(), 500);
    assert_eq!(glyph.left_side_bearing(), 10);
    assert_eq!(xy(&font, 1), [(0, 0), (100, 0), (50, 100), (0, 0), (500, 0)]);

    // glyphs past the metrics reuse the last advance
    let hmtx = font.hmtx().unwrap();
    assert_eq!(hmtx.advance_width(GlyphId::new(1)), 500);
    assert!(font.glyph(2).is_none());
}

#[test]
fn truncated_directory_is_fatal() {
    init_logging();
    let bytes = tables::minimal_font();
    let err = Font::load(&mut SliceSource::new(&bytes[..20])).unwrap_err();
    assert_eq!(err, FontError::MalformedDirectory(ReadError::OutOfBounds));
    assert!(err.is_fatal());
}

#[test]
fn truncated_table_is_dropped() {
    let mut bytes = tables::minimal_font();
    let directory = TableDirectory::read(&mut SliceSource::new(&bytes)).unwrap();
    let maxp = *directory.entry(tags::MAXP).unwrap();
    bytes.truncate(maxp.offset as usize + 2);

    let font = load(&bytes);
    assert!(font.maxp().is_none());
    assert!(font.head().is_some());
    assert!(font.hhea().is_some());
    assert_eq!(font.num_glyphs(), 0);
    assert_eq!(
        font.diagnostics(),
        [
            FontError::TruncatedTable {
                tag: tags::MAXP,
                source: ReadError::OutOfBounds,
            },
            FontError::MissingDependency {
                tag: tags::HMTX,
                missing: tags::MAXP,
            },
            FontError::MissingDependency {
                tag: tags::LOCA,
                missing: tags::MAXP,
            },
            FontError::MissingDependency {
                tag: tags::GLYF,
                missing: tags::LOCA,
            },
        ]
    );
    assert!(font.diagnostics().iter().all(|err| !err.is_fatal()));
}

#[test]
fn corrupt_table_is_dropped() {
    let mut builder = FontBuilder::new();
    builder
        .add_raw(tags::HEAD, tables::head(1000, 0))
        .add_raw(tags::MAXP, tables::maxp(1))
        .add_raw(tags::HHEA, vec![0u8; 12])
        .add_raw(tags::POST, ttf_test_data::post::SIMPLE);
    let font = load(&builder.build());
    assert!(font.hhea().is_none());
    assert_eq!(font.ascent(), 0);
    assert_eq!(font.units_per_em(), 1000);
    assert_eq!(font.post().unwrap().glyph_name(GlyphId::new(7)), "hello");
    assert_eq!(
        font.diagnostics(),
        [FontError::TruncatedTable {
            tag: tags::HHEA,
            source: ReadError::OutOfBounds,
        }]
    );
}

#[test]
fn self_referencing_composite() {
    let triangle = glyf::triangle();
    let cyclic = glyf::single_component(1, ARGS_ARE_XY_VALUES, (0, 0), &[]);
    let bytes = font_with_glyphs(&[&triangle[..], &cyclic[..], &triangle[..]]);
    let font = load(&bytes);

    assert!(font.glyph(1).is_none());
    assert_eq!(font.glyph(0).unwrap().point_count(), 5);
    let last = font.glyph(2).unwrap();
    assert_eq!(last.point_count(), 5);
    assert_eq!(last.advance_width(), 502);
    assert_eq!(
        font.diagnostics(),
        [FontError::CyclicComposite {
            glyph: GlyphId::new(1),
            source: DecyclerError::CycleDetected,
        }]
    );
}

#[test]
fn scaled_component() {
    let triangle = glyf::triangle();
    // F2Dot14 0.5
    let half = glyf::single_component(
        0,
        ARGS_ARE_XY_VALUES | WE_HAVE_A_SCALE,
        (10, 20),
        &[0x2000],
    );
    let bytes = font_with_glyphs(&[&triangle[..], &half[..]]);
    let font = load(&bytes);
    assert!(font.diagnostics().is_empty());
    assert_eq!(
        xy(&font, 1),
        [(10, 20), (60, 20), (35, 70), (0, 0), (501, 0)]
    );
}

#[test]
fn x_and_y_scaled_component() {
    // a single on-curve point at (3, 4), long coordinates
    let point = BeBuffer::new()
        .push(1i16)
        .extend([3i16, 4, 3, 4])
        .extend([0u16, 0])
        .push(0x01u8)
        .extend([3i16, 4]);
    // F2Dot14 -2.0 and 1.0
    let scaled = glyf::single_component(
        0,
        ARGS_ARE_XY_VALUES | WE_HAVE_AN_X_AND_Y_SCALE,
        (10, 0),
        &[i16::MIN, 0x4000],
    );
    let bytes = font_with_glyphs(&[&point[..], &scaled[..]]);
    let font = load(&bytes);
    assert_eq!(xy(&font, 1), [(4, 4), (0, 0), (501, 0)]);
}

#[test]
fn outlines_not_decoded() {
    init_logging();
    let bytes = tables::minimal_font();
    let options = LoadOptions {
        decode_glyphs: false,
        ..Default::default()
    };
    let font = FontLoader::with_options(&mut SliceSource::new(&bytes), options)
        .load()
        .unwrap();
    let glyf = font.glyf().unwrap();
    assert!(!glyf.is_decoded());
    assert_eq!(glyf.glyph_data(GlyphId::new(1)).map(<[u8]>::len), Some(30));
    assert!(font.glyph(1).is_none());
}
