use crate::error::FillError;
use camino::Utf8Path;
use std::io;

/// Bytes available to an unprivileged user on the filesystem holding `path`.
///
#[cfg(unix)]
pub fn available_bytes(path: &Utf8Path) -> Result<u64, FillError> {
    use nix::sys::statvfs::statvfs;

    let stat = statvfs(path.as_std_path()).map_err(|errno| FillError::FreeSpace {
        path: path.to_path_buf(),
        source: io::Error::from(errno),
    })?;

    Ok(space_from_blocks(
        u64::from(stat.blocks_available()),
        u64::from(stat.fragment_size()),
    ))
}

#[cfg(not(unix))]
pub fn available_bytes(path: &Utf8Path) -> Result<u64, FillError> {
    Err(FillError::FreeSpace {
        path: path.to_path_buf(),
        source: io::Error::new(
            io::ErrorKind::Unsupported,
            "free space detection not supported on this platform",
        ),
    })
}

// Anything which doesn't fit in a u64 is more space than we could ever fill.
fn space_from_blocks(blocks: u64, block_size: u64) -> u64 {
    blocks.saturating_mul(block_size)
}
