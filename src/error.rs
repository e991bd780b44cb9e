use thiserror::Error;

pub const USAGE: &str = "Usage: myfind [--regex=pattern | --name=filename] directory [command]";

/// Anything wrong with how the tool was invoked. The user only ever sees
/// [`USAGE`] for these; the variant detail goes to the debug log.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("--regex and --name are mutually exclusive")]
    ConflictingFilters,
    #[error("no directory given")]
    MissingDirectory,
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("regex is not valid UTF-8: {0:?}")]
    NonUtf8Pattern(String),
    #[error("invalid regex {pattern:?}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
