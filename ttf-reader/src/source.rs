//! Seekable big-endian byte sources

use alloc::vec;
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::io::{Read, Seek, SeekFrom};

use crate::ReadError;

macro_rules! read_be {
    ($(#[$attr:meta])* $name:ident, $ty:ty) => {
        $(#[$attr])*
        fn $name(&mut self) -> Result<$ty, ReadError> {
            let mut raw = [0u8; std::mem::size_of::<$ty>()];
            self.read_exact_into(&mut raw)?;
            Ok(<$ty>::from_be_bytes(raw))
        }
    };
}

/// A seekable reader of big-endian binary data.
///
/// This is the only capability the decoder needs from its input: move to an
/// absolute byte offset, then read forward. Every decode step seeks before
/// it reads, so a source must not be shared by concurrent loaders.
pub trait ByteSource {
    /// Move to an absolute offset from the start of the source.
    ///
    /// Seeking past the end is not an error; the next read will fail.
    fn seek(&mut self, offset: u64) -> Result<(), ReadError>;

    /// The current absolute offset.
    fn position(&self) -> u64;

    /// The total length of the source, in bytes.
    fn len(&self) -> u64;

    /// `true` if the source contains no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of bytes between the current position and the end.
    fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.position())
    }

    /// Fill `buf` from the current position, advancing past the bytes read.
    ///
    /// Fails with [`ReadError::OutOfBounds`] if fewer than `buf.len()` bytes
    /// remain; the position is then unspecified. An empty read always
    /// succeeds, even past the end.
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), ReadError>;

    read_be!(
        /// Read an unsigned byte.
        read_u8, u8
    );
    read_be!(
        /// Read a big-endian `u16`.
        read_u16, u16
    );
    read_be!(
        /// Read a big-endian `i16`.
        read_i16, i16
    );
    read_be!(
        /// Read a big-endian `u32`.
        read_u32, u32
    );
    read_be!(
        /// Read a big-endian `i32`.
        read_i32, i32
    );
    read_be!(
        /// Read a big-endian `u64`.
        read_u64, u64
    );

    /// Read `len` bytes into a new buffer.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, ReadError> {
        if (len as u64) > self.remaining() {
            return Err(ReadError::OutOfBounds);
        }
        let mut buf = vec![0u8; len];
        self.read_exact_into(&mut buf)?;
        Ok(buf)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn seek(&mut self, offset: u64) -> Result<(), ReadError> {
        (**self).seek(offset)
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn len(&self) -> u64 {
        (**self).len()
    }

    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        (**self).read_exact_into(buf)
    }
}

/// A [`ByteSource`] over an in-memory buffer.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// The underlying bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl ByteSource for SliceSource<'_> {
    fn seek(&mut self, offset: u64) -> Result<(), ReadError> {
        self.pos = usize::try_from(offset).map_err(|_| ReadError::OutOfBounds)?;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }

    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        if buf.is_empty() {
            return Ok(());
        }
        let end = self
            .pos
            .checked_add(buf.len())
            .ok_or(ReadError::OutOfBounds)?;
        let src = self.bytes.get(self.pos..end).ok_or(ReadError::OutOfBounds)?;
        buf.copy_from_slice(src);
        self.pos = end;
        Ok(())
    }
}

/// A [`ByteSource`] adapting anything that implements [`std::io::Read`] and
/// [`std::io::Seek`], such as a [`std::fs::File`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
    pos: u64,
    len: u64,
}

#[cfg(feature = "std")]
impl<R: Read + Seek> IoSource<R> {
    /// Wrap a reader. The length is determined by seeking to the end.
    pub fn new(mut inner: R) -> Result<Self, ReadError> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, pos: 0, len })
    }

    /// Unwrap this source, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: Read + Seek> ByteSource for IoSource<R> {
    fn seek(&mut self, offset: u64) -> Result<(), ReadError> {
        self.pos = self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.pos
    }

    fn len(&self) -> u64 {
        self.len
    }

    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        if buf.is_empty() {
            return Ok(());
        }
        self.inner.read_exact(buf)?;
        self.pos += buf.len() as u64;
        Ok(())
    }
}
