// Report output helpers
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Write a report, creating parent directories as needed.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!("Report written: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_report_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("audit.md");
        write_report(&path, "# Report\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Report\n");
    }
}
