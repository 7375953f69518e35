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

use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use structopt::StructOpt;

use dcmwalk::config_file::{get_config, DEFAULT_CONFIG};
use dcmwalk::{Instance, TagDictionary};

// Parsed elements and image fields as JSON
#[derive(Debug, StructOpt)]
#[structopt(name = "dcm2json")]
struct Opt {
  /// DICOM input file to be converted to JSON
  filepath: String,
  /// Configuration file (defaults to $XDG_CONFIG_HOME/dcmwalk/config.yaml)
  #[structopt(short, long, parse(from_os_str))]
  config: Option<PathBuf>,
  /// Leave the pixel samples out of the output
  #[structopt(long)]
  no_pixels: bool,
  /// Indent the output
  #[structopt(long)]
  pretty: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
  let opt = Opt::from_args();
  let config = get_config(&opt.config, DEFAULT_CONFIG)?.parse()?;
  TermLogger::init(
    config.log_level.parse().unwrap_or(log::LevelFilter::Warn),
    ConfigBuilder::new().build(),
    TerminalMode::Stderr,
    ColorChoice::Auto,
  )?;

  let dictionary = TagDictionary::standard();
  let result = Instance::from_filepath(&opt.filepath).and_then(|instance| instance.parse(&dictionary));

  match result {
    Ok(mut dataset) => {
      if opt.no_pixels {
        dataset.pixel_buffer.clear();
        dataset.elements.retain(|element| element.tag.name != "PixelData");
      }
      let output = if opt.pretty {
        serde_json::to_string_pretty(&dataset)?
      } else {
        serde_json::to_string(&dataset)?
      };
      println!("{}", output);
    }
    Err(e) => eprintln!("error: {}", e),
  }
  Ok(())
}
