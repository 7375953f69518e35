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

//! Walks a whole Part-10 file.
//!
//! The walk goes through these states, any fatal error ends it:
//!
//! ```text
//! PreambleCheck -> MetaLength -> MetaElements -> MainElements -> Done
//! ```
//!
//! Besides the ordered element list, the walk keeps the few fields the image
//! reconstruction needs (dimensions, spacing, windowing, rescale and the
//! pixel samples). When a tag appears more than once the last one wins for
//! those fields, the element list keeps every occurrence.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::dictionary::TagDictionary;
use crate::element::{decode_element, DataElement, ElementValue, Elements};
use crate::error::{DicomError, Result};
use crate::reader::ByteCursor;
use crate::transfer_syntax::{is_supported, strip_uid_padding};

pub const PREAMBLE_LENGTH: usize = 128;
pub const MAGIC_WORD: &str = "DICM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
  PreambleCheck,
  MetaLength,
  MetaElements { end: usize },
  MainElements,
  Done,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ParsedDataset {
  pub elements: Vec<DataElement>,
  // Number of leading elements belonging to the file meta group
  pub meta_count: usize,
  pub transfer_syntax: Option<String>,
  pub number_of_rows: Option<u64>,
  pub number_of_columns: Option<u64>,
  pub row_spacing: Option<f64>,
  pub column_spacing: Option<f64>,
  // Windowing and rescale attributes may be multi-valued. The tokens are
  // kept as read, see the accessors for the single value case.
  pub window_center: Vec<String>,
  pub window_width: Vec<String>,
  pub rescale_slope: Vec<String>,
  pub rescale_intercept: Vec<String>,
  pub pixel_buffer: Vec<u16>,
}

impl ParsedDataset {
  /// Last element with this tag.
  pub fn get(&self, group: u16, element: u16) -> Option<&DataElement> {
    self
      .elements
      .iter()
      .rev()
      .find(|e| e.tag.group == group && e.tag.element == element)
  }

  /// Last element with this dictionary name.
  pub fn find(&self, name: &str) -> Option<&DataElement> {
    self.elements.iter().rev().find(|e| e.tag.name == name)
  }

  pub fn meta_elements(&self) -> &[DataElement] {
    &self.elements[..self.meta_count]
  }

  pub fn main_elements(&self) -> &[DataElement] {
    &self.elements[self.meta_count..]
  }

  pub fn window_center(&self) -> Option<f64> {
    first_number(&self.window_center)
  }

  pub fn window_width(&self) -> Option<f64> {
    first_number(&self.window_width)
  }

  pub fn rescale_slope(&self) -> Option<f64> {
    first_number(&self.rescale_slope)
  }

  pub fn rescale_intercept(&self) -> Option<f64> {
    first_number(&self.rescale_intercept)
  }

  fn capture(&mut self, element: &DataElement) {
    match element.tag.name {
      "Rows" => self.number_of_rows = integer_value(element).or(self.number_of_rows),
      "Columns" => self.number_of_columns = integer_value(element).or(self.number_of_columns),
      "PixelSpacing" => {
        let tokens = element.value.as_tokens().unwrap_or_default();
        match (tokens.first().and_then(|t| parse_number(t)), tokens.get(1).and_then(|t| parse_number(t))) {
          (Some(row), column) => {
            self.row_spacing = Some(row);
            if column.is_some() {
              self.column_spacing = column;
            }
          }
          _ => log::warn!("ignoring unreadable PixelSpacing {:?} at {:#x}", tokens, element.position),
        }
      }
      "WindowCenter" => self.window_center = tokens_of(element),
      "WindowWidth" => self.window_width = tokens_of(element),
      "RescaleSlope" => self.rescale_slope = tokens_of(element),
      "RescaleIntercept" => self.rescale_intercept = tokens_of(element),
      "PixelData" => match &element.value {
        ElementValue::Samples(samples) => self.pixel_buffer = samples.clone(),
        _ => log::warn!("PixelData with VR {} is not kept as pixel samples", element.vr),
      },
      _ => {}
    }
  }
}

fn parse_number(token: &str) -> Option<f64> {
  token.trim_matches(|c: char| c == '\0' || c.is_whitespace()).parse().ok()
}

fn first_number(tokens: &[String]) -> Option<f64> {
  tokens.first().and_then(|token| parse_number(token))
}

fn tokens_of(element: &DataElement) -> Vec<String> {
  match &element.value {
    ElementValue::Text(tokens) => tokens.clone(),
    other => vec![other.to_string()],
  }
}

fn integer_value(element: &DataElement) -> Option<u64> {
  let value = element.value.as_integer().or_else(|| {
    element
      .value
      .as_tokens()
      .and_then(|tokens| tokens.first())
      .and_then(|token| parse_number(token))
      .map(|n| n as u64)
  });
  if value.is_none() {
    log::warn!("{} at {:#x} is not an integer", element.tag.name, element.position);
  }
  value
}

/// Drives the cursor through one buffer. Not shared, one walker per parse.
struct DatasetWalker<'a, 'd> {
  cursor: ByteCursor<'a>,
  dictionary: &'d TagDictionary,
  position: usize,
  dataset: ParsedDataset,
}

impl<'a, 'd> DatasetWalker<'a, 'd> {
  fn new(buffer: &'a [u8], dictionary: &'d TagDictionary) -> Self {
    DatasetWalker {
      cursor: ByteCursor::new(buffer),
      dictionary,
      position: 0,
      dataset: ParsedDataset::default(),
    }
  }

  fn run(mut self) -> Result<ParsedDataset> {
    let mut state = WalkState::PreambleCheck;
    loop {
      log::debug!("{:?} at {:#x}", state, self.position);
      state = match state {
        WalkState::PreambleCheck => self.check_preamble()?,
        WalkState::MetaLength => self.read_meta_length()?,
        WalkState::MetaElements { end } => self.read_meta_elements(end)?,
        WalkState::MainElements => self.read_main_elements()?,
        WalkState::Done => break,
      };
    }
    log::debug!(
      "parsed {} elements ({} in the meta group)",
      self.dataset.elements.len(),
      self.dataset.meta_count
    );
    Ok(self.dataset)
  }

  fn check_preamble(&mut self) -> Result<WalkState> {
    let found = match self.cursor.read_text(MAGIC_WORD.len(), PREAMBLE_LENGTH) {
      Ok(found) => found,
      Err(_) => {
        let tail = self.cursor.len().min(PREAMBLE_LENGTH)..self.cursor.len();
        String::from_utf8_lossy(self.cursor.bytes(tail.len(), tail.start)?).into_owned()
      }
    };
    if found != MAGIC_WORD {
      return Err(DicomError::MagicWord { found });
    }
    self.position = PREAMBLE_LENGTH + MAGIC_WORD.len();
    Ok(WalkState::MetaLength)
  }

  fn read_meta_length(&mut self) -> Result<WalkState> {
    let element = decode_element(&self.cursor, self.dictionary, self.position)?;
    let value = element.value.as_integer().ok_or(DicomError::MissingMetaGroupLength)?;
    self.position += element.consumed;
    let end = usize::try_from(value)
      .ok()
      .and_then(|meta_length| self.position.checked_add(meta_length))
      .filter(|end| *end <= self.cursor.len())
      .ok_or(DicomError::OutOfBounds {
        offset: self.position,
        length: usize::try_from(value).unwrap_or(usize::MAX),
        size: self.cursor.len(),
      })?;
    self.dataset.elements.push(element);
    Ok(WalkState::MetaElements { end })
  }

  fn read_meta_elements(&mut self, end: usize) -> Result<WalkState> {
    let mut elements = Elements::new(self.cursor, self.dictionary, self.position, end);
    for element in elements.by_ref() {
      let element = element?;
      if element.tag.name == "TransferSyntaxUID" {
        let uid = element.value.to_string();
        if !is_supported(&uid) {
          return Err(DicomError::UnsupportedTransferSyntax { uid: strip_uid_padding(&uid).to_string() });
        }
        self.dataset.transfer_syntax = Some(strip_uid_padding(&uid).to_string());
      }
      self.dataset.elements.push(element);
    }
    self.position = elements.position();
    if self.position != end {
      log::warn!("file meta group ends at {:#x}, its length announced {:#x}", self.position, end);
    }
    if self.dataset.transfer_syntax.is_none() {
      log::warn!("no TransferSyntaxUID in the file meta group");
    }
    self.dataset.meta_count = self.dataset.elements.len();
    Ok(WalkState::MainElements)
  }

  fn read_main_elements(&mut self) -> Result<WalkState> {
    let mut elements = Elements::new(self.cursor, self.dictionary, self.position, self.cursor.len());
    for element in elements.by_ref() {
      let element = element?;
      self.dataset.capture(&element);
      self.dataset.elements.push(element);
    }
    self.position = elements.position();
    Ok(WalkState::Done)
  }
}

/// Parse a complete Part-10 file held in memory.
pub fn parse(buffer: &[u8], dictionary: &TagDictionary) -> Result<ParsedDataset> {
  DatasetWalker::new(buffer, dictionary).run()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn element(name: &'static str, vr: &str, value: ElementValue) -> DataElement {
    DataElement {
      tag: crate::tag::Tag { group: 0x0028, element: 0x0000, name },
      vr: vr.to_string(),
      vl: 0,
      value,
      position: 0,
      consumed: 8,
    }
  }

  fn text(tokens: &[&str]) -> ElementValue {
    ElementValue::Text(tokens.iter().map(|t| t.to_string()).collect())
  }

  #[test]
  fn captures_dimensions() {
    let mut dataset = ParsedDataset::default();
    dataset.capture(&element("Rows", "US", ElementValue::Integer(256)));
    dataset.capture(&element("Columns", "US", ElementValue::Integer(128)));
    assert_eq!(dataset.number_of_rows, Some(256));
    assert_eq!(dataset.number_of_columns, Some(128));
  }

  #[test]
  fn captures_spacing() {
    let mut dataset = ParsedDataset::default();
    dataset.capture(&element("PixelSpacing", "DS", text(&["0.5", "0.75 "])));
    assert_eq!(dataset.row_spacing, Some(0.5));
    assert_eq!(dataset.column_spacing, Some(0.75));
  }

  #[test]
  fn unreadable_spacing_is_ignored() {
    let mut dataset = ParsedDataset::default();
    dataset.capture(&element("PixelSpacing", "DS", text(&["abc"])));
    assert_eq!(dataset.row_spacing, None);
    assert_eq!(dataset.column_spacing, None);
  }

  #[test]
  fn multi_valued_windows_keep_every_token() {
    let mut dataset = ParsedDataset::default();
    dataset.capture(&element("WindowCenter", "DS", text(&["40", "400"])));
    dataset.capture(&element("WindowWidth", "DS", text(&["80 ", "2000"])));
    assert_eq!(dataset.window_center, vec!["40".to_string(), "400".to_string()]);
    assert_eq!(dataset.window_center(), Some(40.0));
    assert_eq!(dataset.window_width(), Some(80.0));
  }

  #[test]
  fn rescale() {
    let mut dataset = ParsedDataset::default();
    dataset.capture(&element("RescaleSlope", "DS", text(&["1\0"])));
    dataset.capture(&element("RescaleIntercept", "DS", text(&["-1024"])));
    assert_eq!(dataset.rescale_slope(), Some(1.0));
    assert_eq!(dataset.rescale_intercept(), Some(-1024.0));
  }

  #[test]
  fn last_write_wins() {
    let mut dataset = ParsedDataset::default();
    dataset.capture(&element("Rows", "US", ElementValue::Integer(256)));
    dataset.capture(&element("Rows", "US", ElementValue::Integer(512)));
    assert_eq!(dataset.number_of_rows, Some(512));
  }

  #[test]
  fn pixel_data_must_be_samples() {
    let mut dataset = ParsedDataset::default();
    dataset.capture(&element("PixelData", "OW", ElementValue::Samples(vec![1, 2, 3])));
    assert_eq!(dataset.pixel_buffer, vec![1, 2, 3]);
    dataset.capture(&element("PixelData", "OB", text(&["xyz"])));
    assert_eq!(dataset.pixel_buffer, vec![1, 2, 3]);
  }

  #[test]
  fn short_buffers_fail_the_magic_word_check() {
    let dictionary = TagDictionary::standard();
    assert!(matches!(parse(&[], &dictionary), Err(DicomError::MagicWord { .. })));
    assert!(matches!(parse(&[0; 130], &dictionary), Err(DicomError::MagicWord { .. })));
  }
}
