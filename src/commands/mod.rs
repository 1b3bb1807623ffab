pub mod install;
pub mod uninstall;

pub use install::{install_in, run_install};
pub use uninstall::{run_uninstall, uninstall_in};

use std::io::Write;
use std::path::Path;

use crate::error::{LatchError, Result};
use crate::jsonc::ParseError;

/// Writes through a temp file in the target directory so the real file
/// is either the old content or the new one, never a torn write.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        LatchError::message(format!("{} has no parent directory", path.display()))
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|err| LatchError::Io(err.error))?;
    Ok(())
}

pub(crate) fn report_diagnostics(path: &Path, errors: &[ParseError]) {
    for err in errors {
        eprintln!(
            "Warning: {} has a syntax problem at byte {}: {}",
            path.display(),
            err.offset,
            err.message
        );
    }
}
