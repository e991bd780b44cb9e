use regex::bytes::Regex;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

use crate::cli::FilterSpec;
use crate::error::UsageError;

/// A compiled [`FilterSpec`].
#[derive(Debug, Clone)]
pub enum Matcher {
    All,
    Name(OsString),
    Regex(Regex),
}

impl Matcher {
    pub fn new(filter: &FilterSpec) -> Result<Self, UsageError> {
        match filter {
            FilterSpec::None => Ok(Matcher::All),
            FilterSpec::Name(name) => Ok(Matcher::Name(name.clone())),
            FilterSpec::Regex(pattern) => {
                let pattern = pattern.to_str().ok_or_else(|| {
                    UsageError::NonUtf8Pattern(pattern.to_string_lossy().into_owned())
                })?;
                Regex::new(pattern)
                    .map(Matcher::Regex)
                    .map_err(|source| UsageError::InvalidRegex {
                        pattern: pattern.to_string(),
                        source,
                    })
            }
        }
    }

    /// Tests a single entry name (never a full path) on its raw bytes.
    /// Regexes match anywhere in the name, not just the whole of it.
    pub fn is_match(&self, name: &OsStr) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Name(wanted) => name == wanted.as_os_str(),
            Matcher::Regex(re) => re.is_match(name.as_bytes()),
        }
    }
}
