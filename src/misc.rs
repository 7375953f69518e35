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

use crate::dataset::{MAGIC_WORD, PREAMBLE_LENGTH};

pub fn has_dicom_header(buffer: &[u8]) -> bool {
  buffer
    .get(PREAMBLE_LENGTH..PREAMBLE_LENGTH + MAGIC_WORD.len())
    .map_or(false, |magic| magic == MAGIC_WORD.as_bytes())
}

/**
 * Check if a file is a DICOM file.
 * Only looks at the magic word, the transfer syntax is checked when parsing.
 */
pub fn is_dicom_file(file_path: &str) -> bool {
  match std::fs::read(file_path) {
    Ok(buf) => is_dicom(&buf),
    Err(_) => false,
  }
}

pub fn is_dicom(buffer: &[u8]) -> bool {
  has_dicom_header(buffer)
}
