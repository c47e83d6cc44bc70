//! Profile image handles
//!
//! A profile image is captured once, when the user picks the file: the
//! wizard keeps the file name, size and an xxHash3 digest of the content
//! instead of a path that could disappear or change before submission.
//! Small files are hashed in full; larger ones are sampled from head,
//! middle and tail.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace};
use xxhash_rust::xxh3::xxh3_64;

/// Size of each sample chunk for large images (1MB)
const SAMPLE_SIZE: u64 = 1024 * 1024;

/// Images larger than this are hashed from samples (16MB)
const LARGE_IMAGE_THRESHOLD: u64 = 16 * 1024 * 1024;

/// A profile image that was present when it was picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImage {
    /// File name without directories
    pub file_name: String,
    /// Size in bytes
    pub size: u64,
    /// xxHash3 digest of the content, hex encoded
    pub digest: String,
}

impl ProfileImage {
    /// Open an image file and capture its handle
    pub fn open(path: &Path) -> Result<Self> {
        let unavailable = |message: String| Error::ImageUnavailable {
            path: path.to_path_buf(),
            message,
        };

        let metadata = std::fs::metadata(path).map_err(|e| unavailable(e.to_string()))?;
        if !metadata.is_file() {
            return Err(unavailable("not a regular file".to_string()));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| unavailable("path has no file name".to_string()))?;

        let size = metadata.len();
        let hash = if size > LARGE_IMAGE_THRESHOLD {
            compute_sampled_hash(path, size)?
        } else {
            compute_full_hash(path)?
        };

        debug!(file = %file_name, size, "Profile image captured");

        Ok(Self {
            file_name,
            size,
            digest: format!("{:016x}", hash),
        })
    }
}

/// Compute full file hash using xxHash3
fn compute_full_hash(path: &Path) -> Result<u64> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|e| Error::ImageUnavailable {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })?;

    let hash = xxh3_64(&buffer);
    trace!(?path, hash, "Computed full image hash");
    Ok(hash)
}

/// Compute sampled hash for large images
///
/// The file size is mixed in so that files sharing the sampled regions
/// still differ.
fn compute_sampled_hash(path: &Path, file_size: u64) -> Result<u64> {
    let mut file = File::open(path)?;
    let mut hasher_data = Vec::with_capacity((SAMPLE_SIZE * 3 + 8) as usize);
    hasher_data.extend_from_slice(&file_size.to_le_bytes());

    let mut read_sample = |offset: u64, len: u64, data: &mut Vec<u8>| -> Result<()> {
        file.seek(SeekFrom::Start(offset))?;
        let mut buffer = vec![0u8; len as usize];
        file.read_exact(&mut buffer)
            .map_err(|e| Error::ImageUnavailable {
                path: path.to_path_buf(),
                message: format!("Failed to read sample at {}: {}", offset, e),
            })?;
        data.extend_from_slice(&buffer);
        Ok(())
    };

    read_sample(0, SAMPLE_SIZE.min(file_size), &mut hasher_data)?;
    if file_size > SAMPLE_SIZE * 2 {
        read_sample((file_size - SAMPLE_SIZE) / 2, SAMPLE_SIZE, &mut hasher_data)?;
    }
    if file_size > SAMPLE_SIZE {
        read_sample(file_size - SAMPLE_SIZE, SAMPLE_SIZE, &mut hasher_data)?;
    }

    let hash = xxh3_64(&hasher_data);
    trace!(?path, file_size, hash, "Computed sampled image hash");
    Ok(hash)
}
