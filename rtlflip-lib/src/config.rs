//! Loading plugin options from a TOML file.
//!
//! ```toml
//! enabled = true
//! opt = "in"
//! ```
//!
//! Missing keys fall back to `enabled = true`, `opt = "out"`.

use crate::error::{Error, Result};
use crate::rtl_plugin::RtlOptions;
use log::debug;
use std::io;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "rtlflip.toml";

pub fn from_toml_str(content: &str) -> Result<RtlOptions> {
    Ok(toml::from_str(content)?)
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RtlOptions> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    let options = from_toml_str(&content)?;
    debug!("loaded {:?} from {}", options, path.display());
    Ok(options)
}

/// Loads `rtlflip.toml` from the current directory. Only a missing file
/// falls back to the defaults; a malformed one is an error.
pub fn load_or_default() -> Result<RtlOptions> {
    load_from_file_or_default(DEFAULT_CONFIG_FILE)
}

pub fn load_from_file_or_default<P: AsRef<Path>>(path: P) -> Result<RtlOptions> {
    match load_from_file(path) {
        Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            debug!("no config file, using defaults");
            Ok(RtlOptions::default())
        }
        loaded => loaded,
    }
}
