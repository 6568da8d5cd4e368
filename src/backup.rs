// Sibling .bak files for destructive edits
use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the backup sibling for `path` (`styles.css` -> `styles.css.bak`).
pub fn backup_path(path: &Path) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_owned();
    os.push(".bak");
    PathBuf::from(os)
}

/// Copy `path` to its `.bak` sibling before an edit. An existing backup is
/// only overwritten with `force`, so the first pre-edit copy survives
/// repeated runs.
pub fn create_backup(path: &Path, force: bool) -> Result<PathBuf> {
    let bak = backup_path(path);
    if bak.exists() && !force {
        bail!(
            "backup already exists: {} (pass --force to overwrite)",
            bak.display()
        );
    }
    fs::copy(path, &bak)
        .with_context(|| format!("failed to back up {}", path.display()))?;
    debug!("Backed up {} -> {}", path.display(), bak.display());
    Ok(bak)
}

/// Put the original content back after a failed write.
pub fn restore_backup(bak: &Path, target: &Path) -> Result<()> {
    fs::copy(bak, target)
        .with_context(|| format!("failed to restore {} from {}", target.display(), bak.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_backup_is_byte_for_byte() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("styles.css");
        let content = ".a { color: #eee; }\n/* trailing */\n";
        fs::write(&file, content).unwrap();

        let bak = create_backup(&file, false).unwrap();
        assert_eq!(bak, dir.path().join("styles.css.bak"));
        assert_eq!(fs::read(&bak).unwrap(), content.as_bytes());
    }

    #[test]
    fn test_existing_backup_needs_force() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("styles.css");
        fs::write(&file, "v2").unwrap();
        fs::write(backup_path(&file), "v1").unwrap();

        assert!(create_backup(&file, false).is_err());
        assert_eq!(fs::read_to_string(backup_path(&file)).unwrap(), "v1");

        create_backup(&file, true).unwrap();
        assert_eq!(fs::read_to_string(backup_path(&file)).unwrap(), "v2");
    }

    #[test]
    fn test_restore_round_trip() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("styles.css");
        fs::write(&file, "original").unwrap();
        let bak = create_backup(&file, false).unwrap();

        fs::write(&file, "clobbered").unwrap();
        restore_backup(&bak, &file).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "original");
    }
}
