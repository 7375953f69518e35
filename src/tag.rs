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

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::dictionary::TagDictionary;
use crate::error::Result;
use crate::reader::ByteCursor;

/// Group of the item, item delimitation and sequence delimitation tags.
pub const ITEM_GROUP: u16 = 0xFFFE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Tag {
  pub group: u16,
  pub element: u16,
  pub name: &'static str,
}

impl Tag {
  /// e.g. "0x0028"
  pub fn group_hex(&self) -> String {
    format!("0x{:04X}", self.group)
  }

  pub fn element_hex(&self) -> String {
    format!("0x{:04X}", self.element)
  }

  pub fn is_item_delimiter(&self) -> bool {
    self.group == ITEM_GROUP
  }

  pub fn is_meta(&self) -> bool {
    self.group == 0x0002
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({:04x},{:04x})", self.group, self.element)
  }
}

/// Decode the group/element pair at `offset`.
pub fn decode_tag(cursor: &ByteCursor, dictionary: &TagDictionary, offset: usize) -> Result<Tag> {
  let group = cursor.read_unsigned(1, offset)? as u16 | (cursor.read_unsigned(1, offset + 1)? as u16) << 8;
  let element =
    cursor.read_unsigned(1, offset + 2)? as u16 | (cursor.read_unsigned(1, offset + 3)? as u16) << 8;
  let name = dictionary.lookup(group, element);
  if name == crate::dictionary::UNKNOWN_TAG_NAME {
    log::trace!("no dictionary entry for ({:04x},{:04x}) at {:#x}", group, element, offset);
  }
  Ok(Tag { group, element, name })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dictionary::UNKNOWN_TAG_NAME;
  use crate::error::DicomError;

  #[test]
  fn group_and_element_are_little_endian() {
    let dictionary = TagDictionary::standard();
    let buffer = [0xAA, 0x28, 0x00, 0x10, 0x00];
    let tag = decode_tag(&ByteCursor::new(&buffer), &dictionary, 1).unwrap();
    assert_eq!(tag.group, 0x0028);
    assert_eq!(tag.element, 0x0010);
    assert_eq!(tag.name, "Rows");
    assert_eq!(tag.group_hex(), "0x0028");
    assert_eq!(tag.element_hex(), "0x0010");
    assert_eq!(tag.to_string(), "(0028,0010)");
  }

  #[test]
  fn hex_rendering_is_uppercase_and_padded() {
    let dictionary = TagDictionary::standard();
    let buffer = [0xFE, 0xFF, 0x0D, 0xE0];
    let tag = decode_tag(&ByteCursor::new(&buffer), &dictionary, 0).unwrap();
    assert_eq!(tag.group_hex(), "0xFFFE");
    assert_eq!(tag.element_hex(), "0xE00D");
    assert!(tag.is_item_delimiter());
    assert_eq!(tag.name, "ItemDelimitationItem");
  }

  #[test]
  fn unknown_tags() {
    let dictionary = TagDictionary::standard();
    let buffer = [0x28, 0x00, 0x03, 0x01];
    let tag = decode_tag(&ByteCursor::new(&buffer), &dictionary, 0).unwrap();
    assert_eq!(tag.name, UNKNOWN_TAG_NAME);
  }

  #[test]
  fn truncated_tag() {
    let dictionary = TagDictionary::standard();
    let buffer = [0x28, 0x00, 0x03];
    assert!(matches!(
      decode_tag(&ByteCursor::new(&buffer), &dictionary, 0),
      Err(DicomError::OutOfBounds { .. })
    ));
  }
}
