//! Hand assembled glyph outlines.

use crate::bebuffer::BeBuffer;

// simple glyph flag bits
const ON_CURVE: u8 = 0x01;
const X_SHORT: u8 = 0x02;
const Y_SHORT: u8 = 0x04;
const REPEAT: u8 = 0x08;
const X_SAME_OR_POSITIVE: u8 = 0x10;
const Y_SAME_OR_POSITIVE: u8 = 0x20;

// composite flag bits
pub const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
pub const ARGS_ARE_XY_VALUES: u16 = 0x0002;
pub const WE_HAVE_A_SCALE: u16 = 0x0008;
pub const MORE_COMPONENTS: u16 = 0x0020;
pub const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
pub const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;
pub const WE_HAVE_INSTRUCTIONS: u16 = 0x0100;

/// A 30 byte glyph: one contour with points (0,0), (100,0), (50,100),
/// stored with long coordinates and a trailing pad byte.
pub fn triangle() -> BeBuffer {
    BeBuffer::new()
        .push(1i16) // numberOfContours
        .extend([0i16, 0, 100, 100]) // bbox
        .push(2u16) // endPtsOfContours
        .push(0u16) // instructionLength
        .extend([ON_CURVE, ON_CURVE, ON_CURVE])
        .extend([0i16, 100, -50])
        .extend([0i16, 0, 100])
        .push(0u8)
}

/// Two contours using every coordinate encoding:
///
/// contour 0: (10,20) (15,20) (5,10)
/// contour 1: (5,310) (5,310) (5,310) (5,310)
///
/// The second contour is a single flag repeated three more times.
pub fn mixed_encodings() -> BeBuffer {
    BeBuffer::new()
        .push(2i16)
        .extend([5i16, 10, 15, 310])
        .extend([2u16, 6])
        .push(3u16)
        .extend([0xB0u8, 0x01, 0x1D]) // instructions
        .extend([
            // x +10 short positive, y +20 short positive
            ON_CURVE | X_SHORT | X_SAME_OR_POSITIVE | Y_SHORT | Y_SAME_OR_POSITIVE,
            // x +5 short positive, y same
            X_SHORT | X_SAME_OR_POSITIVE | Y_SAME_OR_POSITIVE,
            // x -10 short negative, y -10 short negative
            ON_CURVE | X_SHORT | Y_SHORT,
            // x same, y long delta; repeated 3 more times
            ON_CURVE | X_SAME_OR_POSITIVE | REPEAT,
            3,
        ])
        // x: 10, 5, 10 as bytes; nothing for the same-x points
        .extend([10u8, 5, 10])
        // y: 20, (same), 10 as bytes; then four long deltas
        .extend([20u8, 10])
        .extend([300i16, 0, 0, 0])
}

/// A composite glyph with a single component referencing `glyph`.
pub fn single_component(glyph: u16, flags: u16, args: (i16, i16), scale: &[i16]) -> BeBuffer {
    let buf = BeBuffer::new()
        .push(-1i16)
        .extend([0i16, 0, 0, 0])
        .push(flags & !MORE_COMPONENTS)
        .push(glyph);
    let buf = if flags & ARG_1_AND_2_ARE_WORDS != 0 {
        buf.extend([args.0, args.1])
    } else {
        buf.extend([args.0 as i8, args.1 as i8])
    };
    buf.extend(scale.iter().copied())
}

/// A composite glyph placing `first` unchanged and `second` shifted by
/// `(dx, dy)`, with a trailing instruction block.
pub fn two_components(first: u16, second: u16, dx: i8, dy: i8) -> BeBuffer {
    BeBuffer::new()
        .push(-1i16)
        .extend([0i16, 0, 0, 0])
        .push(ARGS_ARE_XY_VALUES | MORE_COMPONENTS)
        .push(first)
        .extend([0i8, 0])
        .push(ARGS_ARE_XY_VALUES | WE_HAVE_INSTRUCTIONS)
        .push(second)
        .extend([dx, dy])
        .push(2u16)
        .extend([0x2Cu8, 0x00])
}
