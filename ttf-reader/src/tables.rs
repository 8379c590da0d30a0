//! The various font tables

pub mod base;
pub mod bsln;
pub mod cmap;
pub mod cvt;
pub mod gasp;
pub mod glyf;
pub mod gpos;
pub mod gsub;
pub mod hdmx;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod instructions;
pub mod kern;
pub mod layout;
pub mod loca;
pub mod maxp;
pub mod name;
pub mod os2;
pub mod post;
