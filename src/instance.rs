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

use std::fs::File;
use std::io::BufReader;
use std::io::Read;

use crate::dataset::{parse, ParsedDataset, PREAMBLE_LENGTH};
use crate::dictionary::TagDictionary;
use crate::element::Elements;
use crate::error::Result;
use crate::reader::ByteCursor;

/// A DICOM file loaded in memory, not parsed yet.
#[derive(Debug)]
pub struct Instance {
  pub buffer: Vec<u8>,
}

impl Instance {
  pub fn from_buf_reader<T: Read>(mut buf_reader: BufReader<T>) -> Result<Self> {
    // Read the whole file into a buffer
    let mut buffer: Vec<u8> = vec![];
    buf_reader.read_to_end(&mut buffer)?;
    Ok(Instance::from(buffer))
  }

  pub fn from_filepath(filepath: &str) -> Result<Self> {
    let f = File::open(filepath)?;
    Instance::from_buf_reader(BufReader::new(f))
  }

  pub fn parse(&self, dictionary: &TagDictionary) -> Result<ParsedDataset> {
    parse(&self.buffer, dictionary)
  }

  /// Raw walk over every element after the magic word, without any of the
  /// preamble or transfer syntax checks.
  pub fn iter<'a>(&'a self, dictionary: &'a TagDictionary) -> Elements<'a, 'a> {
    Elements::new(ByteCursor::new(&self.buffer), dictionary, PREAMBLE_LENGTH + 4, self.buffer.len())
  }
}

impl From<Vec<u8>> for Instance {
  fn from(buffer: Vec<u8>) -> Self {
    Instance { buffer }
  }
}
