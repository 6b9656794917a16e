//! Per-author JSON output.
//!
//! Each author's poems are written as one compact JSON array:
//! ```text
//! output_dir/
//! ├── taras-shevchenko.json
//! ├── ivan-franko.json
//! └── ...
//! ```
//! An existing file for the same author is overwritten.

use crate::models::PoemRecord;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the JSON file for `author` inside `output_dir`.
pub fn author_file_path(output_dir: &str, author: &str) -> PathBuf {
    Path::new(output_dir).join(format!("{author}.json"))
}

/// Write `poems` to `{output_dir}/{author}.json`, creating the directory if needed.
///
/// # Returns
///
/// The path that was written.
#[instrument(level = "info", skip(poems), fields(count = poems.len()))]
pub async fn write_author_file(
    poems: &[PoemRecord],
    output_dir: &str,
    author: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string(poems)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(%output_dir, error = %e, "Failed to create output dir");
        return Err(e.into());
    }

    let path = author_file_path(output_dir, author);
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote author file");

    Ok(path)
}

/// Read an author file back as a list of records.
pub async fn read_author_file(path: &Path) -> Result<Vec<PoemRecord>, Box<dyn Error>> {
    let contents = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::testing::scratch_dir;

    #[tokio::test]
    async fn test_write_author_file_compact_array() {
        let dir = scratch_dir("json_compact");
        let poems = vec![
            PoemRecord::new("poet-x", "https://site/poet-x-a/", "a".to_string()),
            PoemRecord::new("poet-x", "https://site/poet-x-b/", "b\nc".to_string()),
        ];

        let path = write_author_file(&poems, &dir, "poet-x").await.unwrap();

        assert_eq!(path, author_file_path(&dir, "poet-x"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[{\"author\":\"poet-x\""));
        assert!(!written.contains('\n'));
        assert_eq!(read_author_file(&path).await.unwrap(), poems);
    }

    #[tokio::test]
    async fn test_write_author_file_creates_nested_dir() {
        let dir = format!("{}/nested/deeper", scratch_dir("json_nested"));

        let path = write_author_file(&[], &dir, "poet-y").await.unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_read_author_file_rejects_malformed_json() {
        let dir = scratch_dir("json_malformed");
        let path = Path::new(&dir).join("broken.json");
        std::fs::write(&path, "[{\"author\":").unwrap();

        assert!(read_author_file(&path).await.is_err());
    }
}
