//! Local file helpers around conversion streams.
//!
//! Every failure here is an `Error::LocalFile` naming the path and whether
//! it was being read or written. Output is staged in a temporary file next to
//! the destination and only moved into place once fully written, so a failed
//! conversion never truncates or removes an existing file.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, FileAccess, Result};

/// Open `path` for reading as conversion input.
pub fn open_source(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    File::open(path).map_err(|source| local_error(path, FileAccess::Read, source))
}

/// Create a temporary file in the directory of `destination`.
///
/// Fails with `LocalFile { access: Write }` when that directory is missing or
/// not writable. Dropping the returned file removes it.
pub fn stage_destination(destination: impl AsRef<Path>) -> Result<NamedTempFile> {
    let destination = destination.as_ref();
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir).map_err(|source| local_error(destination, FileAccess::Write, source))
}

/// Move a fully written staged file to `destination`, replacing it.
pub fn commit_destination(staged: NamedTempFile, destination: impl AsRef<Path>) -> Result<()> {
    let destination = destination.as_ref();
    staged
        .persist(destination)
        .map_err(|err| local_error(destination, FileAccess::Write, err.error))?;
    Ok(())
}

/// Refuse a `destination` that is the same file as `source`.
pub fn ensure_distinct(source: &Path, destination: &Path) -> Result<()> {
    let same = match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(source), Ok(destination)) => source == destination,
        _ => false,
    };
    if same {
        return Err(local_error(
            destination,
            FileAccess::Write,
            io::Error::new(io::ErrorKind::InvalidInput, "destination is the source file"),
        ));
    }
    Ok(())
}

/// Copy `stream` into a file at `path`, returning the bytes written.
///
/// An existing file at `path` is only replaced once the copy succeeded.
pub fn save_stream(mut stream: impl Read, path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let mut staged = stage_destination(path)?;
    let written = write_stream(&mut stream, staged.as_file_mut(), path)?;
    commit_destination(staged, path)?;
    Ok(written)
}

pub(crate) fn write_stream(
    stream: &mut impl Read,
    file: &mut File,
    path: &Path,
) -> Result<u64> {
    let written = io::copy(stream, file)
        .and_then(|written| file.flush().map(|()| written))
        .map_err(|source| local_error(path, FileAccess::Write, source))?;
    debug!("wrote {written} bytes for {}", path.display());
    Ok(written)
}

fn local_error(path: &Path, access: FileAccess, source: io::Error) -> Error {
    Error::LocalFile {
        path: path.to_path_buf(),
        access,
        source,
    }
}
