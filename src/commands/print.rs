use anyhow::{Context, Result};
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Writes one path per line, byte for byte.
pub fn print_matches<P: AsRef<Path>>(out: &mut impl Write, paths: &[P]) -> Result<()> {
    for path in paths {
        out.write_all(path.as_ref().as_os_str().as_bytes())
            .context("failed to write match")?;
        out.write_all(b"\n").context("failed to write match")?;
    }
    out.flush().context("failed to flush output")?;
    Ok(())
}
