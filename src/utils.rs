//! Utility functions for the worker pool and the output directory.
//!
//! - Worker pool sizing from the machine's available parallelism
//! - File system validation for the output directory

use std::error::Error;
use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;
use tokio::fs;
use tracing::{info, instrument, warn};

/// File created and removed by [`ensure_writable_dir`].
const PROBE_FILE_NAME: &str = "..__probe_write__";

/// Number of author tasks allowed in flight at once.
///
/// Falls back to a single worker when the platform cannot report its
/// parallelism.
pub fn worker_count() -> usize {
    match thread::available_parallelism() {
        Ok(n) => n.get(),
        Err(e) => {
            warn!(error = %e, "Could not query available parallelism; using one worker");
            NonZeroUsize::MIN.get()
        }
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and immediately
/// deletes a probe file. A probe that cannot be removed is logged, since the
/// corpus step reads every file in the directory.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = Path::new(path).join(PROBE_FILE_NAME);
    fs::write(&probe_path, b"").await?;
    if let Err(e) = fs::remove_file(&probe_path).await {
        warn!(
            probe = %probe_path.display(),
            error = %e,
            "Could not remove write probe; the corpus step will fail on it"
        );
    }
    info!("Output directory is writable");
    Ok(())
}
