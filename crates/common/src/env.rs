//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before any storage is opened.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the storage root exists as a directory, creating it when missing.
pub fn ensure_storage_root(root: &Path) -> anyhow::Result<()> {
    if root.is_dir() {
        return Ok(());
    }
    if root.exists() {
        warn!(root = %root.display(), "storage root exists but is not a directory");
        anyhow::bail!("storage root {} is not a directory", root.display());
    }
    std::fs::create_dir_all(root)
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", root.display()))?;
    info!(root = %root.display(), "storage root created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_root_and_accepts_existing() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("storage_root_{}", uuid::Uuid::new_v4())).join("nested");

        ensure_storage_root(&root)?;
        assert!(root.is_dir());
        ensure_storage_root(&root)?;

        let _ = std::fs::remove_dir_all(root.parent().unwrap());
        Ok(())
    }

    #[test]
    fn rejects_root_that_is_a_file() -> anyhow::Result<()> {
        let file = std::env::temp_dir().join(format!("storage_root_{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&file, b"x")?;

        assert!(ensure_storage_root(&file).is_err());

        let _ = std::fs::remove_file(&file);
        Ok(())
    }
}
