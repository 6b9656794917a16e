//! Output generation for author files and the combined corpus.
//!
//! # Submodules
//!
//! - [`json`]: writes one JSON array per author
//! - [`corpus`]: merges every author file into a gzip JSON-lines corpus
//!
//! # Output Structure
//!
//! ```text
//! data/
//! ├── taras-shevchenko.json
//! ├── ivan-franko.json
//! ├── ...
//! └── ukrainian_poems.json.gz
//! ```

pub mod corpus;
pub mod json;

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    /// Fresh, empty directory under the system temp dir, unique per test name.
    pub fn scratch_dir(name: &str) -> String {
        let dir: PathBuf = std::env::temp_dir()
            .join(format!("virshi_scrape_{}_{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir.to_string_lossy().into_owned()
    }
}
