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

//! Tag dictionary.
//!
//! A `TagDictionary` is built once and never mutated afterward. Parsing only
//! borrows it, so one dictionary (behind a reference or an `Arc`) can serve
//! any number of parses, including parses running on different threads.

use std::collections::HashMap;

/// Name reported for tags the dictionary does not know about.
pub const UNKNOWN_TAG_NAME: &str = "Unknown DICOM Tag";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryEntry {
  pub vr: &'static str,
  pub vm: &'static str,
  pub name: &'static str,
}

#[derive(Debug, Clone)]
pub struct TagDictionary {
  entries: HashMap<(u16, u16), DictionaryEntry>,
}

impl TagDictionary {
  pub fn new<I>(entries: I) -> Self
  where
    I: IntoIterator<Item = (u16, u16, DictionaryEntry)>,
  {
    TagDictionary {
      entries: entries
        .into_iter()
        .map(|(group, element, entry)| ((group, element), entry))
        .collect(),
    }
  }

  /// The attributes a Part-10 image file is expected to carry.
  pub fn standard() -> Self {
    TagDictionary::new(STANDARD_ENTRIES.iter().copied())
  }

  pub fn entry(&self, group: u16, element: u16) -> Option<&DictionaryEntry> {
    self.entries.get(&(group, element))
  }

  /// Name of the tag, `UNKNOWN_TAG_NAME` when it is not in the dictionary.
  pub fn lookup(&self, group: u16, element: u16) -> &'static str {
    self.entry(group, element).map(|entry| entry.name).unwrap_or(UNKNOWN_TAG_NAME)
  }

  pub fn vr(&self, group: u16, element: u16) -> Option<&'static str> {
    self.entry(group, element).map(|entry| entry.vr)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl Default for TagDictionary {
  fn default() -> Self {
    TagDictionary::standard()
  }
}

const fn e(vr: &'static str, vm: &'static str, name: &'static str) -> DictionaryEntry {
  DictionaryEntry { vr, vm, name }
}

// https://dicom.nema.org/medical/dicom/current/output/chtml/part06/chapter_6.html
#[rustfmt::skip]
static STANDARD_ENTRIES: &[(u16, u16, DictionaryEntry)] = &[
  // File meta information
  (0x0002, 0x0000, e("UL", "1", "FileMetaInformationGroupLength")),
  (0x0002, 0x0001, e("OB", "1", "FileMetaInformationVersion")),
  (0x0002, 0x0002, e("UI", "1", "MediaStorageSOPClassUID")),
  (0x0002, 0x0003, e("UI", "1", "MediaStorageSOPInstanceUID")),
  (0x0002, 0x0010, e("UI", "1", "TransferSyntaxUID")),
  (0x0002, 0x0012, e("UI", "1", "ImplementationClassUID")),
  (0x0002, 0x0013, e("SH", "1", "ImplementationVersionName")),
  (0x0002, 0x0016, e("AE", "1", "SourceApplicationEntityTitle")),
  (0x0002, 0x0017, e("AE", "1", "SendingApplicationEntityTitle")),
  (0x0002, 0x0018, e("AE", "1", "ReceivingApplicationEntityTitle")),
  (0x0002, 0x0100, e("UI", "1", "PrivateInformationCreatorUID")),
  (0x0002, 0x0102, e("OB", "1", "PrivateInformation")),
  // SOP common, general study, series and equipment
  (0x0008, 0x0005, e("CS", "1-n", "SpecificCharacterSet")),
  (0x0008, 0x0008, e("CS", "2-n", "ImageType")),
  (0x0008, 0x0012, e("DA", "1", "InstanceCreationDate")),
  (0x0008, 0x0013, e("TM", "1", "InstanceCreationTime")),
  (0x0008, 0x0016, e("UI", "1", "SOPClassUID")),
  (0x0008, 0x0018, e("UI", "1", "SOPInstanceUID")),
  (0x0008, 0x0020, e("DA", "1", "StudyDate")),
  (0x0008, 0x0021, e("DA", "1", "SeriesDate")),
  (0x0008, 0x0022, e("DA", "1", "AcquisitionDate")),
  (0x0008, 0x0023, e("DA", "1", "ContentDate")),
  (0x0008, 0x0030, e("TM", "1", "StudyTime")),
  (0x0008, 0x0031, e("TM", "1", "SeriesTime")),
  (0x0008, 0x0032, e("TM", "1", "AcquisitionTime")),
  (0x0008, 0x0033, e("TM", "1", "ContentTime")),
  (0x0008, 0x0050, e("SH", "1", "AccessionNumber")),
  (0x0008, 0x0060, e("CS", "1", "Modality")),
  (0x0008, 0x0064, e("CS", "1", "ConversionType")),
  (0x0008, 0x0070, e("LO", "1", "Manufacturer")),
  (0x0008, 0x0080, e("LO", "1", "InstitutionName")),
  (0x0008, 0x0090, e("PN", "1", "ReferringPhysicianName")),
  (0x0008, 0x1010, e("SH", "1", "StationName")),
  (0x0008, 0x1030, e("LO", "1", "StudyDescription")),
  (0x0008, 0x103E, e("LO", "1", "SeriesDescription")),
  (0x0008, 0x1090, e("LO", "1", "ManufacturerModelName")),
  (0x0008, 0x1140, e("SQ", "1", "ReferencedImageSequence")),
  // Patient
  (0x0010, 0x0010, e("PN", "1", "PatientName")),
  (0x0010, 0x0020, e("LO", "1", "PatientID")),
  (0x0010, 0x0030, e("DA", "1", "PatientBirthDate")),
  (0x0010, 0x0040, e("CS", "1", "PatientSex")),
  (0x0010, 0x1010, e("AS", "1", "PatientAge")),
  (0x0010, 0x1020, e("DS", "1", "PatientSize")),
  (0x0010, 0x1030, e("DS", "1", "PatientWeight")),
  // Acquisition
  (0x0018, 0x0015, e("CS", "1", "BodyPartExamined")),
  (0x0018, 0x0050, e("DS", "1", "SliceThickness")),
  (0x0018, 0x0060, e("DS", "1", "KVP")),
  (0x0018, 0x0088, e("DS", "1", "SpacingBetweenSlices")),
  (0x0018, 0x1020, e("LO", "1-n", "SoftwareVersions")),
  (0x0018, 0x1030, e("LO", "1", "ProtocolName")),
  (0x0018, 0x1150, e("IS", "1", "ExposureTime")),
  (0x0018, 0x1151, e("IS", "1", "XRayTubeCurrent")),
  (0x0018, 0x1152, e("IS", "1", "Exposure")),
  (0x0018, 0x5100, e("CS", "1", "PatientPosition")),
  // Relationship and image plane
  (0x0020, 0x000D, e("UI", "1", "StudyInstanceUID")),
  (0x0020, 0x000E, e("UI", "1", "SeriesInstanceUID")),
  (0x0020, 0x0010, e("SH", "1", "StudyID")),
  (0x0020, 0x0011, e("IS", "1", "SeriesNumber")),
  (0x0020, 0x0012, e("IS", "1", "AcquisitionNumber")),
  (0x0020, 0x0013, e("IS", "1", "InstanceNumber")),
  (0x0020, 0x0020, e("CS", "2", "PatientOrientation")),
  (0x0020, 0x0032, e("DS", "3", "ImagePositionPatient")),
  (0x0020, 0x0037, e("DS", "6", "ImageOrientationPatient")),
  (0x0020, 0x0052, e("UI", "1", "FrameOfReferenceUID")),
  (0x0020, 0x1040, e("LO", "1", "PositionReferenceIndicator")),
  (0x0020, 0x1041, e("DS", "1", "SliceLocation")),
  // Image pixel, presentation
  (0x0028, 0x0002, e("US", "1", "SamplesPerPixel")),
  (0x0028, 0x0004, e("CS", "1", "PhotometricInterpretation")),
  (0x0028, 0x0008, e("IS", "1", "NumberOfFrames")),
  (0x0028, 0x0010, e("US", "1", "Rows")),
  (0x0028, 0x0011, e("US", "1", "Columns")),
  (0x0028, 0x0030, e("DS", "2", "PixelSpacing")),
  (0x0028, 0x0100, e("US", "1", "BitsAllocated")),
  (0x0028, 0x0101, e("US", "1", "BitsStored")),
  (0x0028, 0x0102, e("US", "1", "HighBit")),
  (0x0028, 0x1050, e("DS", "1-n", "WindowCenter")),
  (0x0028, 0x1051, e("DS", "1-n", "WindowWidth")),
  (0x0028, 0x1052, e("DS", "1", "RescaleIntercept")),
  (0x0028, 0x1053, e("DS", "1", "RescaleSlope")),
  (0x0028, 0x1054, e("LO", "1", "RescaleType")),
  (0x0028, 0x1055, e("LO", "1-n", "WindowCenterWidthExplanation")),
  (0x7FE0, 0x0010, e("OW", "1", "PixelData")),
  // Sequence delimiters
  (0xFFFE, 0xE000, e("NA", "1", "Item")),
  (0xFFFE, 0xE00D, e("NA", "1", "ItemDelimitationItem")),
  (0xFFFE, 0xE0DD, e("NA", "1", "SequenceDelimitationItem")),
];

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  #[test]
  fn known_tags_resolve_to_their_keyword() {
    let dictionary = TagDictionary::standard();
    assert_eq!(dictionary.lookup(0x0002, 0x0010), "TransferSyntaxUID");
    assert_eq!(dictionary.lookup(0x0028, 0x0010), "Rows");
    assert_eq!(dictionary.lookup(0x7FE0, 0x0010), "PixelData");
    assert_eq!(dictionary.vr(0x0028, 0x0030), Some("DS"));
    assert_eq!(dictionary.entry(0x0028, 0x1050).map(|entry| entry.vm), Some("1-n"));
  }

  #[test]
  fn misses_are_named_not_failed() {
    let dictionary = TagDictionary::standard();
    assert_eq!(dictionary.lookup(0x0028, 0x0103), UNKNOWN_TAG_NAME);
    assert_eq!(dictionary.lookup(0x0029, 0x1010), UNKNOWN_TAG_NAME);
    assert!(dictionary.entry(0x0009, 0x0010).is_none());
  }

  #[test]
  fn table_has_no_duplicate_keys() {
    assert_eq!(TagDictionary::standard().len(), STANDARD_ENTRIES.len());
  }

  #[test]
  fn custom_dictionaries() {
    let dictionary = TagDictionary::new(vec![(0x0009, 0x1001, e("LO", "1", "VendorTag"))]);
    assert_eq!(dictionary.len(), 1);
    assert_eq!(dictionary.lookup(0x0009, 0x1001), "VendorTag");
    assert_eq!(dictionary.lookup(0x0028, 0x0010), UNKNOWN_TAG_NAME);
  }

  #[test]
  fn shared_across_threads() {
    let dictionary = Arc::new(TagDictionary::standard());
    let handles: Vec<_> = (0..4)
      .map(|_| {
        let dictionary = Arc::clone(&dictionary);
        std::thread::spawn(move || dictionary.lookup(0x0028, 0x0011))
      })
      .collect();
    for handle in handles {
      assert_eq!(handle.join().unwrap(), "Columns");
    }
  }
}
