//! JSON file loading functionality.
//!
//! This module provides functions to load JSON documents from files or any
//! reader (such as stdin), parsing them into `JsonTree` structures that can
//! be edited by jsonquill. Gzip input is decompressed transparently.

use crate::document::parser::parse_json_bytes;
use crate::document::tree::{DocumentOrigin, JsonTree};
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a JSON file from the filesystem.
///
/// Files ending in `.gz` are decompressed first. The returned tree records
/// `path` as its origin.
///
/// # Examples
///
/// ```no_run
/// use jsonquill::file::loader::load_json_file;
///
/// let tree = load_json_file("config.json").unwrap();
/// // tree is now ready for editing
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read (missing, permissions, etc.)
/// - A `.gz` file is not valid gzip
/// - The contents are not valid UTF-8 (`EditError::Encoding` in the chain)
/// - The contents are not valid JSON (`EditError::Parse` in the chain)
pub fn load_json_file<P: AsRef<Path>>(path: P) -> Result<JsonTree> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let bytes = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read(path_ref).context("Failed to read file")?
    };

    let mut tree = parse_json_bytes(&bytes).context("Failed to parse JSON")?;
    tree.set_origin(DocumentOrigin::Loaded(path_ref.to_path_buf()));
    Ok(tree)
}

/// Reads a reader to EOF and parses the contents as JSON.
///
/// Input starting with the gzip magic bytes is decompressed first. The
/// returned tree is `Fresh`: it has no file to save back to.
pub fn load_json_from_reader<R: Read>(mut reader: R) -> Result<JsonTree> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;

    let bytes = if buffer.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(&buffer)?
    } else {
        buffer
    };

    parse_json_bytes(&bytes).context("Failed to parse JSON from input")
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = Vec::new();
    decoder
        .read_to_end(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = Vec::new();
    decoder
        .read_to_end(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
