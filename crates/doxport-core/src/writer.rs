//! Artifact serialization
//!
//! Renders a projected tree to its canonical textual form and writes it to
//! disk. The write goes through a temporary file in the destination
//! directory followed by an atomic rename, so readers never observe a
//! partially written artifact.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::Documentable;

/// Render the artifact exactly as it is written to disk: pretty-printed
/// JSON with two-space indentation and a single trailing newline.
pub fn render_artifact(root: &Documentable) -> Result<String> {
    let mut body = serde_json::to_string_pretty(root).map_err(|source| Error::Json {
        message: "failed to serialize export artifact".to_string(),
        source,
    })?;
    body.push('\n');
    Ok(body)
}

/// Write the artifact for `root` to `path`, replacing any existing file
/// atomically.
pub fn write_artifact(root: &Documentable, path: &Path) -> Result<()> {
    let body = render_artifact(root)?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|source| Error::Io {
        message: format!("failed to create output directory {}", parent.display()),
        source,
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(&parent).map_err(|source| Error::Io {
        message: format!("failed to create temporary file in {}", parent.display()),
        source,
    })?;

    use std::io::Write as _;
    temp.write_all(body.as_bytes()).map_err(|source| Error::Io {
        message: format!("failed to write artifact for {}", path.display()),
        source,
    })?;

    temp.persist(path).map_err(|err| Error::Io {
        message: format!("failed to replace {}", path.display()),
        source: err.error,
    })?;

    tracing::debug!(path = %path.display(), bytes = body.len(), "wrote export artifact");
    Ok(())
}
