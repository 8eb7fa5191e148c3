//! Atomic output files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Writes `contents` to `path` through `<path>.tmp` and a rename, so a
/// failed run never leaves a partial file behind.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written or renamed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, contents).with_context(|| format!("Failed to write file: {}", tmp.display()))?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("Failed to move file into place: {}", path.display()));
    }
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_owned();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("alfa-act-writer-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_and_replaces_without_leaving_tmp() {
        let dir = scratch("replace");
        let path = dir.join("nested").join("summary-automated.md");

        write_atomic(&path, b"first").expect("first write");
        write_atomic(&path, b"second").expect("second write");

        assert_eq!(fs::read_to_string(&path).expect("readable"), "second");
        assert!(!tmp_path(&path).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn tmp_sits_beside_target() {
        assert_eq!(
            tmp_path(Path::new("reports/summary-assisted.md")),
            PathBuf::from("reports/summary-assisted.md.tmp")
        );
    }
}
