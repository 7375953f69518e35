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

use std::error::Error;
use std::fmt;

use crate::transfer_syntax::get_transfer_syntax_uid_label;

pub type Result<T> = std::result::Result<T, DicomError>;

/// Everything that can stop a parse.
///
/// Only `MagicWord` and `UnsupportedTransferSyntax` come from validating the
/// file itself. The others are reported by the byte cursor when the declared
/// lengths do not fit the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DicomError {
  /// The 4 bytes following the preamble are not "DICM".
  MagicWord { found: String },
  /// The file meta group declares anything but Explicit VR Little Endian.
  UnsupportedTransferSyntax { uid: String },
  /// A read of `length` bytes at `offset` goes past the end of the buffer.
  OutOfBounds { offset: usize, length: usize, size: usize },
  /// An integer read wider than what fits in a u64.
  InvalidLength { length: usize },
  /// The element right after the magic word does not hold an integer.
  MissingMetaGroupLength,
  Io(String),
}

impl DicomError {
  pub fn is_fatal_format_error(&self) -> bool {
    matches!(
      self,
      DicomError::MagicWord { .. } | DicomError::UnsupportedTransferSyntax { .. }
    )
  }
}

impl fmt::Display for DicomError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DicomError::MagicWord { found } => {
        write!(f, "Not a DICOM file: expected \"DICM\" after the preamble, found {:?}", found)
      }
      DicomError::UnsupportedTransferSyntax { uid } => write!(
        f,
        "Unsupported Transfer Syntax UID: {} ({})",
        uid,
        get_transfer_syntax_uid_label(uid).unwrap_or("Unknown transfer syntax uid")
      ),
      DicomError::OutOfBounds { offset, length, size } => write!(
        f,
        "Trying to read out of file bound (offset: {}, length: {}, file size: {})",
        offset, length, size
      ),
      DicomError::InvalidLength { length } => {
        write!(f, "Cannot read a {} bytes wide unsigned integer", length)
      }
      DicomError::MissingMetaGroupLength => {
        write!(f, "File meta information group length is missing or not an integer")
      }
      DicomError::Io(details) => write!(f, "{}", details),
    }
  }
}

impl Error for DicomError {}

impl From<std::io::Error> for DicomError {
  fn from(err: std::io::Error) -> Self {
    DicomError::Io(format!("{}", err))
  }
}
