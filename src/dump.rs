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
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use structopt::StructOpt;

use dcmwalk::config_file::{get_config, ToolConfig, DEFAULT_CONFIG};
use dcmwalk::element::DataElement;
use dcmwalk::misc::is_dicom_file;
use dcmwalk::{Instance, ParsedDataset, TagDictionary};

#[derive(Debug, StructOpt)]
/// A dcmdump clone based on dcmwalk
struct Opt {
  /// DICOM input file to be dumped
  filepath: String,
  /// Configuration file (defaults to $XDG_CONFIG_HOME/dcmwalk/config.yaml)
  #[structopt(short, long, parse(from_os_str))]
  config: Option<PathBuf>,
  /// More logs, repeat for even more
  #[structopt(short, long, parse(from_occurrences))]
  verbose: u8,
}

fn level_filter(config: &ToolConfig, verbose: u8) -> LevelFilter {
  let configured = config.log_level.parse().unwrap_or(LevelFilter::Warn);
  match verbose {
    0 => configured,
    1 => configured.max(LevelFilter::Info),
    2 => configured.max(LevelFilter::Debug),
    _ => LevelFilter::Trace,
  }
}

fn format_line(element: &DataElement, max_value_width: usize) -> String {
  let mut display_value = element.value.to_string();
  if display_value.len() > max_value_width {
    let mut cut = max_value_width;
    while !display_value.is_char_boundary(cut) {
      cut -= 1;
    }
    display_value.replace_range(cut.., "...");
  }
  let display_value = if display_value.is_empty() {
    "(no value available)".to_string()
  } else {
    format!("[{}]", display_value)
  };
  format!(
    "{} {: <3} {: <40} # {: >4},{: >5} {}",
    element.tag,
    element.vr,
    display_value,
    element.vl,
    element.consumed,
    element.tag.name
  )
}

fn print_derived(dataset: &ParsedDataset) {
  println!();
  println!("# Image");
  println!("Rows: {:?}", dataset.number_of_rows);
  println!("Columns: {:?}", dataset.number_of_columns);
  println!("PixelSpacing: {:?} x {:?}", dataset.row_spacing, dataset.column_spacing);
  println!("WindowCenter: {:?}", dataset.window_center);
  println!("WindowWidth: {:?}", dataset.window_width);
  println!("RescaleSlope: {:?}", dataset.rescale_slope);
  println!("RescaleIntercept: {:?}", dataset.rescale_intercept);
  println!("PixelData: {} samples", dataset.pixel_buffer.len());
}

fn main() -> Result<(), Box<dyn Error>> {
  let opt = Opt::from_args();
  let config_access = get_config(&opt.config, DEFAULT_CONFIG)?;
  let config = config_access.parse()?;

  TermLogger::init(
    level_filter(&config, opt.verbose),
    ConfigBuilder::new().build(),
    TerminalMode::Stderr,
    ColorChoice::Auto,
  )?;
  log::info!("configuration loaded from {}", config_access.provenance);

  if !is_dicom_file(&opt.filepath) {
    return Err(format!("{} is not a dicom file", opt.filepath).into());
  }

  let dictionary = TagDictionary::standard();
  let dataset = Instance::from_filepath(&opt.filepath)?.parse(&dictionary)?;

  println!();
  println!("# Dicom-File-Format");
  println!();
  println!("# Dicom-Meta-Information-Header");
  println!("# Used TransferSyntax: Little Endian Explicit");
  for element in dataset.meta_elements() {
    println!("{}", format_line(element, config.max_value_width));
  }
  println!();
  println!("# Dicom-Data-Set");
  println!("# Used TransferSyntax: Little Endian Explicit");
  for element in dataset.main_elements() {
    println!("{}", format_line(element, config.max_value_width));
  }

  if config.show_derived {
    print_derived(&dataset);
  }
  Ok(())
}
