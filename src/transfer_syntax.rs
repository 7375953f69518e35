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

// https://dicom.nema.org/medical/dicom/current/output/chtml/part05/chapter_10.html

/// The only transfer syntax the walker accepts.
pub const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";

/// Remove the single pad character UIDs carry to reach an even length.
/// NUL is the only pad recognised, a trailing space or zero-width character is kept.
pub fn strip_uid_padding(uid: &str) -> &str {
  uid.strip_suffix('\0').unwrap_or(uid)
}

pub fn is_supported(uid: &str) -> bool {
  strip_uid_padding(uid) == EXPLICIT_VR_LITTLE_ENDIAN
}

pub fn get_transfer_syntax_uid_label(transfer_syntax_uid: &str) -> Option<&'static str> {
  match strip_uid_padding(transfer_syntax_uid) {
    "1.2.840.10008.1.2" => Some("Implicit VR Little Endian: Default Transfer Syntax for DICOM"),
    "1.2.840.10008.1.2.1" => Some("Explicit VR Little Endian"),
    "1.2.840.10008.1.2.1.99" => Some("Deflated Explicit VR Little Endian"),
    "1.2.840.10008.1.2.2" => Some("Explicit VR Big Endian"),
    "1.2.840.10008.1.2.4.50" => Some("JPEG Baseline (Process 1)"),
    "1.2.840.10008.1.2.4.51" => Some("JPEG Baseline (Processes 2 & 4)"),
    "1.2.840.10008.1.2.4.57" => Some("JPEG Lossless, Nonhierarchical (Processes 14)"),
    "1.2.840.10008.1.2.4.70" => Some("JPEG Lossless, Nonhierarchical, First- Order Prediction (Processes 14 [Selection Value 1])"),
    "1.2.840.10008.1.2.4.80" => Some("JPEG-LS Lossless Image Compression"),
    "1.2.840.10008.1.2.4.81" => Some("JPEG-LS Lossy (Near- Lossless) Image Compression"),
    "1.2.840.10008.1.2.4.90" => Some("JPEG 2000 Image Compression (Lossless Only)"),
    "1.2.840.10008.1.2.4.91" => Some("JPEG 2000 Image Compression"),
    "1.2.840.10008.1.2.5" => Some("RLE Lossless"),
    _ => None,
  }
}
