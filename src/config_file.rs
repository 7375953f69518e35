// Copyright (c) 2025-2025 Jean-Daniel Michaud
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

use std::env;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_CONFIG: &str = "\
log_level: warn
max_value_width: 66
show_derived: true
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProvenance {
  Default,
  XdgPath(String),
  CustomPath(String),
}

impl fmt::Display for ConfigProvenance {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ConfigProvenance::Default => write!(f, "embedded default"),
      ConfigProvenance::XdgPath(path) | ConfigProvenance::CustomPath(path) => write!(f, "{}", path),
    }
  }
}

/// Settings shared by the command line tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
  /// off, error, warn, info, debug or trace
  pub log_level: String,
  /// Values longer than this are cut in listings
  pub max_value_width: usize,
  /// Print rows, columns, spacing, windowing... after the listing
  pub show_derived: bool,
}

impl Default for ToolConfig {
  fn default() -> Self {
    ToolConfig { log_level: "warn".to_string(), max_value_width: 66, show_derived: true }
  }
}

pub struct ConfigAccess {
  pub content: String,
  pub provenance: ConfigProvenance,
}

impl ConfigAccess {
  pub fn parse(&self) -> Result<ToolConfig, Box<dyn Error>> {
    Ok(serde_yaml::from_str(&self.content)?)
  }
}

fn is_file_not_empty<P: AsRef<Path>>(path: P) -> bool {
  match std::fs::metadata(path) {
    Ok(metadata) => metadata.len() > 0,
    Err(..) => false,
  }
}

// Get the config file from the command line option --config
// Otherwise get it from XDG_CONFIG_HOME
// Otherwise use the default.
pub fn get_config(
  config_path: &Option<PathBuf>,
  default_config: &str,
) -> Result<ConfigAccess, Box<dyn Error>> {
  if let Some(config_file) = config_path {
    let content = std::fs::read_to_string(config_file)
      .map_err(|e| format!("error: {e}: {}", config_file.display()))?;
    return Ok(ConfigAccess {
      content,
      provenance: ConfigProvenance::CustomPath(config_file.to_string_lossy().to_string()),
    });
  }

  let config_home = match env::var("XDG_CONFIG_HOME") {
    Ok(path) => path,
    Err(_) => env::var("HOME")? + "/.config/",
  };
  let xdg_config_file_path = config_home + "/" + env!("CARGO_PKG_NAME") + "/config.yaml";

  if is_file_not_empty(&xdg_config_file_path) {
    let content = std::fs::read_to_string(&xdg_config_file_path)
      .map_err(|e| format!("error: {e}: {}", xdg_config_file_path))?;
    Ok(ConfigAccess { content, provenance: ConfigProvenance::XdgPath(xdg_config_file_path) })
  } else {
    Ok(ConfigAccess { content: default_config.to_string(), provenance: ConfigProvenance::Default })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn embedded_default_matches_default_impl() {
    let access = ConfigAccess { content: DEFAULT_CONFIG.to_string(), provenance: ConfigProvenance::Default };
    assert_eq!(access.parse().unwrap(), ToolConfig::default());
  }

  #[test]
  fn missing_keys_take_default_values() {
    let access = ConfigAccess { content: "log_level: debug\n".to_string(), provenance: ConfigProvenance::Default };
    let config = access.parse().unwrap();
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.max_value_width, 66);
    assert!(config.show_derived);
  }

  #[test]
  fn custom_path_wins() {
    let path = std::env::temp_dir().join(format!("dcmwalk-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "max_value_width: 20\nshow_derived: false\n").unwrap();
    let access = get_config(&Some(path.clone()), DEFAULT_CONFIG).unwrap();
    assert_eq!(access.provenance, ConfigProvenance::CustomPath(path.to_string_lossy().to_string()));
    let config = access.parse().unwrap();
    assert_eq!(config.max_value_width, 20);
    assert!(!config.show_derived);
    std::fs::remove_file(&path).unwrap();
  }

  #[test]
  fn unreadable_custom_path_is_an_error() {
    let path = PathBuf::from("/this/config/does/not/exist.yaml");
    assert!(get_config(&Some(path), DEFAULT_CONFIG).is_err());
  }
}
