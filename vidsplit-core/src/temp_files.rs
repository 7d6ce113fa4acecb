//! Temporary file management utilities.
//!
//! Working files and concat manifests are the two kinds of temporary files
//! the pipeline creates. Manifests lean on the tempfile crate's Drop-based
//! cleanup so they are removed on every non-panicking exit path; working
//! files outlive the call that created them and are owned by the media
//! session instead.

use crate::config::CoreConfig;
use crate::error::Result;
use std::path::PathBuf;
use tempfile::{Builder as TempFileBuilder, NamedTempFile};

/// Returns a fresh working-file path with a random suffix. Does not create
/// the file; the encoder writes it.
pub fn create_working_file_path(config: &CoreConfig) -> PathBuf {
    use rand::distributions::Alphanumeric;
    use rand::{Rng, thread_rng};

    let random_suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    let filename = format!("vidsplit_{random_suffix}.{}", config.container);
    config.working_dir().join(filename)
}

/// Creates a concat manifest file in `dir`. Auto-deleted when dropped.
pub fn create_manifest_file(dir: &std::path::Path) -> Result<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    let temp_file = TempFileBuilder::new()
        .prefix("concat_")
        .suffix(".txt")
        .tempfile_in(dir)?;

    Ok(temp_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_file_paths_are_unique() {
        let config = CoreConfig::default();
        let a = create_working_file_path(&config);
        let b = create_working_file_path(&config);
        assert_ne!(a, b);
        assert_eq!(a.extension().unwrap(), "mp4");
        assert!(a.starts_with(std::env::temp_dir()));
    }

    #[test]
    fn test_manifest_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let manifest = create_manifest_file(dir.path()).unwrap();
            let path = manifest.path().to_path_buf();
            assert!(path.exists());
            path
        };
        assert!(!path.exists());
    }
}
