//! Loading of merges resources from disk.
//!
//! The trained CLIP merges list ships gzip-compressed; plain text files (for
//! example an exported `merges.txt`) are accepted as well. The format is
//! detected from the gzip magic bytes, not the file extension.

use cliptok_core::{Result, TokenizerError};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;

/// Leading bytes of every gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Merges resource loader.
pub struct MergesLoader;

impl MergesLoader {
    /// Read a merges resource and return its text.
    pub fn read(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let compressed = Self::is_gzip(&bytes);
        log::debug!(
            "loading merges from {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            if compressed { "gzip" } else { "plain" }
        );

        if compressed {
            Self::decompress(&bytes, path)
        } else {
            String::from_utf8(bytes).map_err(|e| {
                TokenizerError::Load(format!("{} is not valid UTF-8: {}", path.display(), e))
            })
        }
    }

    /// Check for the gzip magic bytes.
    pub fn is_gzip(bytes: &[u8]) -> bool {
        bytes.starts_with(&GZIP_MAGIC)
    }

    fn decompress(bytes: &[u8], path: &Path) -> Result<String> {
        let mut text = String::new();
        GzDecoder::new(bytes)
            .read_to_string(&mut text)
            .map_err(|e| {
                TokenizerError::Load(format!("Failed to decompress {}: {}", path.display(), e))
            })?;
        Ok(text)
    }
}
