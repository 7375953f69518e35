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

// Explicit VR little endian data elements.
// https://dicom.nema.org/dicom/2013/output/chtml/part05/chapter_7.html#sect_7.1.2

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::dictionary::TagDictionary;
use crate::error::Result;
use crate::reader::ByteCursor;
use crate::tag::{decode_tag, Tag};

/// VR reported for item and delimitation tags, which have none on the wire.
pub const NO_VR: &str = "N/A";

/// Value length meaning "until the matching delimiter".
pub const UNDEFINED_LENGTH: u32 = 0xFFFFFFFF;

/// These VRs have 2 reserved bytes after the VR and their length on 4 bytes.
const LONG_FORM_VRS: [&str; 5] = ["OB", "OF", "SQ", "OW", "UN"];

const MULTI_VALUE_DELIMITER: char = '\\';

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ElementValue {
  /// US, UL
  Integer(u64),
  /// OW, one entry per 16 bits word
  Samples(Vec<u16>),
  /// Everything else, split on the multi-value delimiter
  Text(Vec<String>),
}

impl ElementValue {
  pub fn as_integer(&self) -> Option<u64> {
    match self {
      ElementValue::Integer(value) => Some(*value),
      _ => None,
    }
  }

  pub fn as_samples(&self) -> Option<&[u16]> {
    match self {
      ElementValue::Samples(samples) => Some(samples),
      _ => None,
    }
  }

  pub fn as_tokens(&self) -> Option<&[String]> {
    match self {
      ElementValue::Text(tokens) => Some(tokens),
      _ => None,
    }
  }

  pub fn multiplicity(&self) -> usize {
    match self {
      ElementValue::Integer(_) => 1,
      ElementValue::Samples(samples) => samples.len(),
      ElementValue::Text(tokens) => tokens.len(),
    }
  }
}

impl fmt::Display for ElementValue {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ElementValue::Integer(value) => write!(f, "{}", value),
      ElementValue::Samples(samples) => {
        let mut result = String::with_capacity(40);
        let mut it = samples.iter().peekable();
        while let Some(n) = it.next() {
          result.push_str(&format!("{:04x}", n));
          if result.len() >= 64 {
            result.replace_range(64.., "...");
            break;
          }
          if it.peek().is_some() {
            result.push(MULTI_VALUE_DELIMITER);
          }
        }
        write!(f, "{}", result)
      }
      ElementValue::Text(tokens) => {
        write!(f, "{}", tokens.join("\\"))
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DataElement {
  pub tag: Tag,
  pub vr: String,
  // Value length, with the undefined length already folded to 0
  pub vl: u32,
  pub value: ElementValue,
  // Absolute position of the tag in the file
  pub position: usize,
  // Bytes taken by the whole element: tag, VR/VL header and value
  pub consumed: usize,
}

impl DataElement {
  /// Bytes between the tag and the value.
  /// Zero when `consumed` is too small for the tag and `vl`.
  pub fn header_width(&self) -> usize {
    self.consumed.saturating_sub(4).saturating_sub(self.vl as usize)
  }

  /// Position of the first byte after this element.
  pub fn end(&self) -> usize {
    self.position.saturating_add(self.consumed)
  }
}

pub fn is_long_form(vr: &str) -> bool {
  LONG_FORM_VRS.contains(&vr)
}

/// Decode the data element starting at `offset`.
///
/// The returned element knows how many bytes it spans, the next element
/// starts at `offset + element.consumed`. Sequences are not descended into,
/// their value is read as an opaque span.
pub fn decode_element(
  cursor: &ByteCursor,
  dictionary: &TagDictionary,
  offset: usize,
) -> Result<DataElement> {
  let tag = decode_tag(cursor, dictionary, offset)?;

  // group(u16),element(u16),[vr(str[2]),[reserved(u16)]],length(u16|u32)
  let (vr, raw_length, header_width) = if tag.is_item_delimiter() {
    (NO_VR.to_string(), cursor.read_u32(offset + 4)?, 4)
  } else {
    let vr = cursor.read_text(2, offset + 4)?;
    if is_long_form(&vr) {
      let length = cursor.read_u32(offset + 8)?;
      (vr, length, 8)
    } else {
      let length = cursor.read_u16(offset + 6)? as u32;
      (vr, length, 4)
    }
  };

  let vl = if raw_length == UNDEFINED_LENGTH { 0 } else { raw_length };
  let value_offset = offset + 4 + header_width;
  let value = decode_value(cursor, &vr, value_offset, vl as usize)?;

  let element = DataElement {
    tag,
    vr,
    vl,
    value,
    position: offset,
    consumed: 4 + header_width + vl as usize,
  };
  log::trace!(
    "{:#x}: {} {} {} vl={} consumed={}",
    offset,
    element.tag,
    element.vr,
    element.tag.name,
    element.vl,
    element.consumed
  );
  Ok(element)
}

fn decode_value(cursor: &ByteCursor, vr: &str, offset: usize, length: usize) -> Result<ElementValue> {
  Ok(match vr {
    "US" | "UL" => ElementValue::Integer(cursor.read_unsigned(length, offset)?),
    "OW" => ElementValue::Samples(
      cursor
        .bytes(length, offset)?
        .chunks_exact(2)
        .map(|word| u16::from_le_bytes([word[0], word[1]]))
        .collect(),
    ),
    _ => ElementValue::Text(
      cursor
        .read_text(length, offset)?
        .split(MULTI_VALUE_DELIMITER)
        .map(String::from)
        .collect(),
    ),
  })
}

/// Consecutive data elements between two positions.
///
/// Each step advances by exactly the consumed size of the element just
/// decoded. The first error is yielded once and ends the iteration.
pub struct Elements<'a, 'd> {
  cursor: ByteCursor<'a>,
  dictionary: &'d TagDictionary,
  position: usize,
  end: usize,
}

impl<'a, 'd> Elements<'a, 'd> {
  pub fn new(cursor: ByteCursor<'a>, dictionary: &'d TagDictionary, start: usize, end: usize) -> Self {
    Elements { cursor, dictionary, position: start, end }
  }

  /// Where the next element would be decoded from.
  pub fn position(&self) -> usize {
    self.position
  }
}

impl<'a, 'd> Iterator for Elements<'a, 'd> {
  type Item = Result<DataElement>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.position >= self.end {
      return None;
    }
    match decode_element(&self.cursor, self.dictionary, self.position) {
      Ok(element) => {
        self.position += element.consumed;
        Some(Ok(element))
      }
      Err(e) => {
        self.position = self.end;
        Some(Err(e))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dictionary::UNKNOWN_TAG_NAME;
  use crate::error::DicomError;

  fn short(group: u16, element: u16, vr: &str, value: &[u8]) -> Vec<u8> {
    let mut bytes = vec![];
    bytes.extend_from_slice(&group.to_le_bytes());
    bytes.extend_from_slice(&element.to_le_bytes());
    bytes.extend_from_slice(vr.as_bytes());
    bytes.extend_from_slice(&(value.len() as u16).to_le_bytes());
    bytes.extend_from_slice(value);
    bytes
  }

  fn long(group: u16, element: u16, vr: &str, length: u32, value: &[u8]) -> Vec<u8> {
    let mut bytes = vec![];
    bytes.extend_from_slice(&group.to_le_bytes());
    bytes.extend_from_slice(&element.to_le_bytes());
    bytes.extend_from_slice(vr.as_bytes());
    bytes.extend_from_slice(&[0, 0]);
    bytes.extend_from_slice(&length.to_le_bytes());
    bytes.extend_from_slice(value);
    bytes
  }

  fn decode(bytes: &[u8]) -> DataElement {
    decode_element(&ByteCursor::new(bytes), &TagDictionary::standard(), 0).unwrap()
  }

  #[test]
  fn unsigned_short() {
    let element = decode(&short(0x0028, 0x0010, "US", &[0x00, 0x01]));
    assert_eq!(element.tag.name, "Rows");
    assert_eq!(element.vr, "US");
    assert_eq!(element.vl, 2);
    assert_eq!(element.value, ElementValue::Integer(256));
    assert_eq!(element.header_width(), 4);
    assert_eq!(element.consumed, 10);
  }

  #[test]
  fn unsigned_long() {
    let element = decode(&short(0x0002, 0x0000, "UL", &[0xC4, 0x00, 0x00, 0x00]));
    assert_eq!(element.value.as_integer(), Some(196));
    assert_eq!(element.consumed, 12);
  }

  #[test]
  fn multi_valued_text() {
    let element = decode(&short(0x0008, 0x0008, "CS", b"A\\B\\C\0"));
    assert_eq!(
      element.value,
      ElementValue::Text(vec!["A".to_string(), "B".to_string(), "C\0".to_string()])
    );
    let element = decode(&short(0x0008, 0x0060, "CS", b"A"));
    assert_eq!(element.value, ElementValue::Text(vec!["A".to_string()]));
    assert_eq!(element.value.multiplicity(), 1);
  }

  #[test]
  fn pixel_samples() {
    let element = decode(&long(0x7FE0, 0x0010, "OW", 8, &[1, 0, 2, 0, 0, 1, 0xFF, 0xFF]));
    assert_eq!(element.value, ElementValue::Samples(vec![1, 2, 256, 0xFFFF]));
    assert_eq!(element.header_width(), 8);
    assert_eq!(element.consumed, 20);
  }

  #[test]
  fn long_form_vrs_have_an_eight_bytes_header() {
    for vr in LONG_FORM_VRS {
      let element = decode(&long(0x0009, 0x1000, vr, 2, &[0x41, 0x42]));
      assert_eq!(element.header_width(), 8, "{}", vr);
      assert_eq!(element.consumed, 14, "{}", vr);
    }
    for vr in ["UT", "DS", "LO", "US", "FD"] {
      let element = decode(&short(0x0009, 0x1000, vr, &[0, 0, 0, 0, 0, 0, 0, 0]));
      assert_eq!(element.header_width(), 4, "{}", vr);
    }
  }

  #[test]
  fn undefined_length_is_folded_to_zero() {
    let element = decode(&long(0x0008, 0x1140, "SQ", UNDEFINED_LENGTH, &[]));
    assert_eq!(element.vl, 0);
    assert_eq!(element.consumed, 12);

    let mut item = vec![];
    item.extend_from_slice(&0xFFFEu16.to_le_bytes());
    item.extend_from_slice(&0xE000u16.to_le_bytes());
    item.extend_from_slice(&UNDEFINED_LENGTH.to_le_bytes());
    let element = decode(&item);
    assert_eq!(element.vr, NO_VR);
    assert_eq!(element.vl, 0);
    assert_eq!(element.header_width(), 4);
    assert_eq!(element.consumed, 8);
  }

  #[test]
  fn sequences_with_defined_length_are_skipped_whole() {
    let nested = short(0x0008, 0x1150, "UI", b"1.2\0");
    let bytes = long(0x0008, 0x1140, "SQ", nested.len() as u32, &nested);
    let element = decode(&bytes);
    assert_eq!(element.consumed, bytes.len());
  }

  #[test]
  fn private_tags_decode_with_unknown_name() {
    let element = decode(&short(0x0029, 0x1010, "LO", b"VENDOR"));
    assert_eq!(element.tag.name, UNKNOWN_TAG_NAME);
    assert_eq!(element.value.as_tokens(), Some(&["VENDOR".to_string()][..]));
  }

  #[test]
  fn truncated_value_is_an_error() {
    let mut bytes = short(0x0010, 0x0010, "PN", b"Doe^John");
    bytes.truncate(bytes.len() - 2);
    let result = decode_element(&ByteCursor::new(&bytes), &TagDictionary::standard(), 0);
    assert!(matches!(result, Err(DicomError::OutOfBounds { .. })));
  }

  #[test]
  fn iterator_advances_by_consumed_bytes() {
    let mut bytes = short(0x0028, 0x0010, "US", &[0, 2]);
    bytes.extend(short(0x0028, 0x0011, "US", &[0, 2]));
    bytes.extend(long(0x7FE0, 0x0010, "OW", 4, &[0, 0, 0, 0]));
    let dictionary = TagDictionary::standard();
    let mut elements = Elements::new(ByteCursor::new(&bytes), &dictionary, 0, bytes.len());
    let mut expected = 0;
    while let Some(element) = elements.next() {
      let element = element.unwrap();
      assert_eq!(element.position, expected);
      expected += element.consumed;
      assert_eq!(elements.position(), expected);
    }
    assert_eq!(expected, bytes.len());
  }

  #[test]
  fn iterator_stops_after_an_error() {
    let bytes = short(0x0028, 0x0010, "US", &[0, 2]);
    let dictionary = TagDictionary::standard();
    let mut elements = Elements::new(ByteCursor::new(&bytes), &dictionary, 0, bytes.len() + 4);
    assert!(elements.next().unwrap().is_ok());
    assert!(elements.next().unwrap().is_err());
    assert!(elements.next().is_none());
  }

  #[test]
  fn display() {
    assert_eq!(ElementValue::Integer(12).to_string(), "12");
    assert_eq!(ElementValue::Text(vec!["1".into(), "2".into()]).to_string(), "1\\2");
    assert_eq!(ElementValue::Samples(vec![1, 0xABCD]).to_string(), "0001\\abcd");
    let long = ElementValue::Samples(vec![0; 100]).to_string();
    assert!(long.ends_with("..."));
  }

  #[test]
  fn hand_built_elements_do_not_underflow() {
    let element = DataElement {
      tag: Tag { group: 0x0028, element: 0x0010, name: "Rows" },
      vr: "US".to_string(),
      vl: 16,
      value: ElementValue::Integer(0),
      position: usize::MAX - 2,
      consumed: 6,
    };
    assert_eq!(element.header_width(), 0);
    assert_eq!(element.end(), usize::MAX);
  }
}
