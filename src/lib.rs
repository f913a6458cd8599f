//! Turns a Glade UI definition into a C header holding the document text as a
//! `static const char` array, so the UI can be built into the binary.

use std::{ cmp::min, fs, io::Write as _, path::{Path, PathBuf} };

use bstr::{BString, ByteSlice};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub mod canon;
pub mod cli;
pub mod error;
pub mod header;
pub mod logging;

pub use cli::{Args, Config};
pub use error::{Error, Result};
pub use header::HeaderStyle;

/// `ui/main.glade` -> `ui/main.h`
pub fn header_path(input: &Path) -> PathBuf {
    input.with_extension("h")
}

pub fn read_document(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;

    String::from_utf8(data).map_err(|err| {
        let offset = err.utf8_error().valid_up_to();
        let data = err.as_bytes();
        Error::Encoding {
            path: path.to_owned(),
            offset,
            bytes: BString::from(data[offset..min(offset + 4, data.len())].as_bstr()),
        }
    })
}

pub fn canonicalize_file(path: &Path) -> Result<String> {
    let text = read_document(path)?;
    canon::canonicalize(&text).map_err(|source| Error::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Replaces `path` with `contents` in one step: either the old file (if any)
/// stays as it was or the new one is complete.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let write_error = |source| Error::Write {
        path: path.to_owned(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;

    // temp files start out private
    let permissions = match fs::metadata(path) {
        Ok(metadata) => metadata.permissions(),
        Err(_) => default_permissions(&file).map_err(write_error)?,
    };
    file.as_file().set_permissions(permissions).map_err(write_error)?;

    file.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions(_file: &NamedTempFile) -> std::io::Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt as _;
    Ok(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(file: &NamedTempFile) -> std::io::Result<fs::Permissions> {
    Ok(file.as_file().metadata()?.permissions())
}

/// Parses `config.input`, writes the header next to it and returns its path.
/// Nothing is written unless the input parses.
pub fn emit_header(config: &Config) -> Result<PathBuf> {
    let canonical = canonicalize_file(&config.input)?;
    debug!(
        input = %config.input.display(),
        chars = canonical.chars().count(),
        "canonicalized"
    );

    let header = header::render(&canonical, &config.style);
    let output = header_path(&config.input);
    write_atomically(&output, &header)?;

    info!(output = %output.display(), bytes = header.len(), "wrote header");
    Ok(output)
}
