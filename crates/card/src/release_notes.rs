use std::{fs, io::ErrorKind, path::Path};

/// Shown in place of release notes that could not be read.
pub const PLACEHOLDER: &str = "No release note found.";

/// Read the release notes at `path`. Never fails: a missing, unreadable or
/// blank file yields [`PLACEHOLDER`].
pub fn load(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => {
            tracing::info!("Found release notes at {}", path.display());
            text
        }
        Ok(_) => {
            tracing::info!("Release notes at {} are empty", path.display());
            PLACEHOLDER.to_string()
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("No release notes at {}", path.display());
            PLACEHOLDER.to_string()
        }
        Err(e) => {
            tracing::warn!("Failed to read release notes {}: {e}", path.display());
            PLACEHOLDER.to_string()
        }
    }
}
