// artifact.rs

use chrono::Local;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes the finished article to a timestamped text file under `dir`.
///
/// File layout: a `TOPIC:` line, a `DATE:` line, a separator, a blank line,
/// then the article body.
///
/// # Returns
/// * `Ok(path)` of the created file.
/// * `Err(io::Error)` if the directory or file cannot be written.
pub fn save_artifact(dir: &Path, topic: &str, article: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("article_{}.txt", stamp));

    let mut file = File::create(&path)?;
    writeln!(file, "TOPIC: {}", topic)?;
    writeln!(file, "DATE: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file, "{}", "=".repeat(60))?;
    writeln!(file)?;
    file.write_all(article.as_bytes())?;
    Ok(path)
}
