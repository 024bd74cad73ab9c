use crate::error::FillError;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Works out where a file lands, relative to the target directory. `depth` is the number of
/// parent directories above the file to recreate on the target: zero flattens everything
/// into the target root.
///
pub fn destination_path(source: &Utf8Path, depth: usize) -> Result<Utf8PathBuf, FillError> {
    let file_name = source
        .file_name()
        .ok_or_else(|| FillError::NoFileName(source.to_path_buf()))?;

    let parents: Vec<&str> = source
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Utf8Component::Normal(name) => Some(name),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let skip = parents.len().saturating_sub(depth);
    let mut ret: Utf8PathBuf = parents.into_iter().skip(skip).collect();
    ret.push(file_name);
    Ok(ret)
}
