//! JSON file saving functionality.
//!
//! This module saves `JsonTree` structures to files with atomic write
//! operations, optional backup creation, and gzip compression for `.gz`
//! targets.

use crate::config::Config;
use crate::document::parser::parse_json;
use crate::document::serializer::{ensure_finite, serialize_with_indent};
use crate::document::tree::JsonTree;
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Saves a JSON tree to a file.
///
/// The document is serialized with `config.indent_size` spaces per level and
/// a trailing newline, then re-parsed to make sure the output is valid
/// before anything touches the disk. The write is atomic: data goes to a
/// temporary file that is then renamed over the target. Paths ending in
/// `.gz` are gzip-compressed.
///
/// # Examples
///
/// ```no_run
/// use jsonquill::config::Config;
/// use jsonquill::document::tree::JsonTree;
/// use jsonquill::file::saver::save_json_file;
///
/// let tree = JsonTree::sample();
/// save_json_file("output.json", &tree, &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the document holds a NaN or infinite number
/// (`EditError::NonFiniteNumber` in the chain), or if backup creation,
/// writing the temp file, or the rename fails. Nothing is written in the
/// first case and no temp file is left behind in the others.
pub fn save_json_file<P: AsRef<Path>>(path: P, tree: &JsonTree, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let should_compress = path.to_string_lossy().ends_with(".gz");

    ensure_finite(tree).context("Document cannot be saved")?;

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let mut json_str = serialize_with_indent(tree, config.indent_size);
    json_str.push('\n');

    parse_json(&json_str)
        .context("Generated invalid JSON - this is a bug in jsonquill's serialization")?;

    write_file_atomic(path, json_str.as_bytes(), should_compress)
}

/// Writes data to a file atomically, optionally compressing with gzip.
///
/// The temp file is removed if any step fails.
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    let result = write_and_rename(path, &temp_path, data, compress);
    if result.is_err() && temp_path.exists() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_rename(path: &Path, temp_path: &Path, data: &[u8], compress: bool) -> Result<()> {
    if compress {
        let file = fs::File::create(temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}
