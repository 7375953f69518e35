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

//! Decoder for DICOM Part-10 files in Explicit VR Little Endian.
//!
//! ```no_run
//! use dcmwalk::{Instance, TagDictionary};
//!
//! let dictionary = TagDictionary::standard();
//! let dataset = Instance::from_filepath("image.dcm")?.parse(&dictionary)?;
//! println!("{:?}x{:?}", dataset.number_of_rows, dataset.number_of_columns);
//! # Ok::<(), dcmwalk::error::DicomError>(())
//! ```

#[cfg(feature = "tools")]
pub mod config_file;
pub mod dataset;
pub mod dictionary;
pub mod element;
pub mod error;
pub mod instance;
pub mod misc;
pub mod reader;
pub mod tag;
pub mod transfer_syntax;

pub use dataset::{parse, ParsedDataset};
pub use dictionary::{DictionaryEntry, TagDictionary, UNKNOWN_TAG_NAME};
pub use element::{decode_element, DataElement, ElementValue};
pub use error::DicomError;
pub use instance::Instance;
pub use tag::{decode_tag, Tag};
