// Copyright (c) 2023 Jean-Daniel Michaud
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use encoding_rs::WINDOWS_1252;

use crate::error::{DicomError, Result};

/// Random access over a DICOM file held entirely in memory.
///
/// All offsets are absolute. Every read is bounds checked so a malformed
/// length never panics, it surfaces as `DicomError::OutOfBounds`.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
  buffer: &'a [u8],
}

impl<'a> ByteCursor<'a> {
  pub fn new(buffer: &'a [u8]) -> Self {
    ByteCursor { buffer }
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn bytes(&self, length: usize, offset: usize) -> Result<&'a [u8]> {
    let end = offset.checked_add(length).filter(|end| *end <= self.buffer.len());
    match end {
      Some(end) => Ok(&self.buffer[offset..end]),
      None => Err(DicomError::OutOfBounds { offset, length, size: self.buffer.len() }),
    }
  }

  /// Little-endian unsigned integer of `length` bytes (0 to 8).
  pub fn read_unsigned(&self, length: usize, offset: usize) -> Result<u64> {
    if length > 8 {
      return Err(DicomError::InvalidLength { length });
    }
    Ok(
      self
        .bytes(length, offset)?
        .iter()
        .rev()
        .fold(0u64, |acc, byte| (acc << 8) | *byte as u64),
    )
  }

  pub fn read_u16(&self, offset: usize) -> Result<u16> {
    let bytes = self.bytes(2, offset)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
  }

  pub fn read_u32(&self, offset: usize) -> Result<u32> {
    let bytes = self.bytes(4, offset)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
  }

  /// Fixed width text. Nothing is trimmed, the caller decides what padding means.
  pub fn read_text(&self, length: usize, offset: usize) -> Result<String> {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(self.bytes(length, offset)?);
    Ok(text.into_owned())
  }
}
