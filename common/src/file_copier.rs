use crate::error::FillError;
use crate::types::{Opts, Selection};
use camino::Utf8Path;
use std::fs;
use std::io::Write;
use std::os::unix::fs::DirBuilderExt;

/// Copies one selected file into the target directory, creating whatever directories its
/// destination needs. With opts.noop nothing is touched, but the destination is still
/// listed on `out`.
pub fn copy_selection<W: Write>(
    target: &Utf8Path,
    selection: &Selection,
    opts: &Opts,
    out: &mut W,
) -> Result<(), FillError> {
    let dest = target.join(&selection.destination);

    if !opts.noop {
        if let Some(dir) = dest.parent()
            && !dir.exists()
        {
            log::debug!("creating {}", dir);
            fs::DirBuilder::new()
                .recursive(true)
                .mode(0o700)
                .create(dir)
                .map_err(|source| FillError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        fs::copy(&selection.source, &dest).map_err(|source| FillError::Copy {
            src: selection.source.clone(),
            dest: dest.clone(),
            source,
        })?;
    }

    crate::verbose!(opts, out, "{}", selection.destination).map_err(|source| {
        FillError::Listing {
            path: selection.destination.clone(),
            source,
        }
    })
}
