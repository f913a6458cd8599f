use std::path::PathBuf;

use bstr::BString;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 at byte {offset}: {bytes:?}", path.display())]
    Encoding {
        path: PathBuf,
        offset: usize,
        bytes: BString,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: roxmltree::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Malformed input document: bad encoding or not well-formed XML.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Encoding { .. } | Self::Parse { .. })
    }

    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
