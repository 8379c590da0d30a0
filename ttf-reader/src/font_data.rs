//! raw table bytes

use alloc::vec::Vec;
use std::ops::{Bound, RangeBounds};

use types::Scalar;

use crate::ReadError;

/// A reference to the raw bytes of one table (or part of one).
///
/// All reads are bounds checked against the slice, so running past the end
/// of a table is a [`ReadError::OutOfBounds`] rather than a read of whatever
/// follows it in the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    total_pos: u32,
    bytes: &'a [u8],
}

/// A cursor for reading a sequence of values from [`FontData`].
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData {
            total_pos: 0,
            bytes,
        }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The position of the start of this data relative to the data it was
    /// split from.
    pub fn total_pos(&self) -> u32 {
        self.total_pos
    }

    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData {
            bytes,
            total_pos: self.total_pos.saturating_add(pos as u32),
        })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(i) => *i,
            Bound::Excluded(i) => i.saturating_add(1),
        };

        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        let total_pos = self.total_pos.saturating_add(start as u32);
        self.bytes
            .get(bounds)
            .map(|bytes| FontData { bytes, total_pos })
    }

    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Decode `len` consecutive values starting at `offset`.
    pub fn read_array<T: Scalar>(&self, offset: usize, len: usize) -> Result<Vec<T>, ReadError> {
        let byte_len = len
            .checked_mul(T::RAW_BYTE_LEN)
            .ok_or(ReadError::InvalidArrayLen)?;
        let bytes = offset
            .checked_add(byte_len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(ReadError::OutOfBounds)?;
        bytes
            .chunks_exact(T::RAW_BYTE_LEN)
            .map(|chunk| T::read(chunk).ok_or(ReadError::OutOfBounds))
            .collect()
    }

    /// The `len` bytes starting at `offset`.
    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], ReadError> {
        offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(ReadError::OutOfBounds)
    }

    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    /// A cursor positioned at `offset`.
    pub fn cursor_at(&self, offset: usize) -> Cursor<'a> {
        Cursor {
            pos: offset,
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    pub fn advance<T: Scalar>(&mut self) {
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
    }

    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    pub fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
        temp
    }

    pub fn read_array<T: Scalar>(&mut self, len: usize) -> Result<Vec<T>, ReadError> {
        let temp = self.data.read_array(self.pos, len)?;
        self.pos += len * T::RAW_BYTE_LEN;
        Ok(temp)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let temp = self.data.read_bytes(self.pos, len)?;
        self.pos += len;
        Ok(temp)
    }

    /// The current position, relative to the start of the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The number of bytes left to read.
    pub fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// The data remaining after the current position.
    pub fn remaining(&self) -> Option<FontData<'a>> {
        self.data.split_off(self.pos)
    }
}
