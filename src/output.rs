use std::{
    fs,
    io::{self, Write},
    path::Path,
};

/// Writes `bytes` to `path` in full or not at all.
///
/// The data goes to a temporary file next to `path` which is renamed over
/// it once synced. If anything fails the temporary file is removed and
/// `path` keeps its previous contents. An existing file keeps its
/// permissions; a new one gets the usual umask-filtered mode.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path).ok().map(|metadata| metadata.permissions());

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut file = builder.tempfile_in(dir)?;
    file.write_all(bytes)?;
    if let Some(permissions) = existing {
        file.as_file().set_permissions(permissions)?;
    }
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
