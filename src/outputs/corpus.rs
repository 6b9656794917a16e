//! Combined gzip JSON-lines corpus.
//!
//! After every author task has finished, all author files currently in the
//! output directory (including ones left by earlier runs) are merged into a
//! single gzip file with one JSON record per line.
//!
//! Files are visited in directory-listing order, which depends on the
//! platform and filesystem. The gzip header carries no timestamp, so two runs
//! over the same listing produce identical bytes.

use crate::models::PoemRecord;
use crate::outputs::json::read_author_file;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Regular files in `output_dir` other than the corpus itself, in listing order.
async fn author_files(output_dir: &Path, corpus_path: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut files = Vec::new();
    let mut entries = fs::read_dir(output_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() || path == corpus_path {
            continue;
        }
        files.push(path);
    }
    Ok(files)
}

/// Read every author file in `output_dir`, in listing order.
pub async fn collect_poems(
    output_dir: &str,
    output_file: &str,
) -> Result<Vec<PoemRecord>, Box<dyn Error>> {
    let dir = Path::new(output_dir);
    let corpus_path = dir.join(output_file);

    let mut poems = Vec::new();
    for path in author_files(dir, &corpus_path).await? {
        let records = read_author_file(&path).await?;
        debug!(path = %path.display(), count = records.len(), "Read author file");
        poems.extend(records);
    }
    Ok(poems)
}

/// Gzip `poems` as JSON lines, one record per line.
fn encode_json_lines(poems: &[PoemRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    for poem in poems {
        serde_json::to_writer(&mut encoder, poem)?;
        encoder.write_all(b"\n")?;
    }
    Ok(encoder.finish()?)
}

/// Write every record from the author files into `{output_dir}/{output_file}`.
///
/// # Returns
///
/// The number of records written.
///
/// # Errors
///
/// Any unreadable or malformed author file aborts the write.
#[instrument(level = "info")]
pub async fn write_poems_file(output_file: &str, output_dir: &str) -> Result<usize, Box<dyn Error>> {
    let poems = collect_poems(output_dir, output_file).await?;
    let output_path = Path::new(output_dir).join(output_file);

    let compressed = encode_json_lines(&poems)?;
    fs::write(&output_path, compressed).await?;

    info!(
        count = poems.len(),
        path = %output_path.display(),
        "Finished writing corpus"
    );
    Ok(poems.len())
}
