use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// A tabular source could not be read or parsed at all.
///
/// Individual malformed rows never produce this error; they are dropped by
/// the table loader. This is reserved for whole-source failures: missing or
/// corrupt files, unsupported formats, tables without enough columns.
#[derive(Debug, Error)]
#[error("{}: {:#}", Origin(.path), .reason)]
pub struct SourceUnreadable {
    /// File the table came from, when it came from a file.
    pub path: Option<PathBuf>,
    pub reason: anyhow::Error,
}

impl SourceUnreadable {
    /// Error for an in-memory table.
    pub fn new(reason: anyhow::Error) -> Self {
        Self { path: None, reason }
    }

    /// Error for a table read from `path`.
    pub fn at(path: &Path, reason: anyhow::Error) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            reason,
        }
    }
}

struct Origin<'a>(&'a Option<PathBuf>);

impl fmt::Display for Origin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(path) => write!(f, "cannot read {}", path.display()),
            None => write!(f, "cannot read table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_file() {
        let err = SourceUnreadable::at(Path::new("data.xlsx"), anyhow::anyhow!("no sheets"));
        assert_eq!(err.to_string(), "cannot read data.xlsx: no sheets");
    }

    #[test]
    fn message_includes_context_chain() {
        let reason = anyhow::anyhow!("bad header").context("parsing CSV");
        let err = SourceUnreadable::new(reason);
        assert_eq!(err.to_string(), "cannot read table: parsing CSV: bad header");
    }
}
