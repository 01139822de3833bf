use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use std::path::Path;

use super::error::ExtractError;
use super::fields::FIELD_TABLE;
use super::locator::extract;
use super::record::MetadataRecord;
use super::tree::DirectoryTree;

/// Pull the raw Exif (TIFF) block out of a JPEG's APP1 segment.
///
/// The returned bytes start at the TIFF header; the `Exif\0\0` prefix is
/// already stripped.
pub fn read_raw_block(path: &Path) -> Result<Vec<u8>, ExtractError> {
    let file_bytes =
        std::fs::read(path).map_err(|e| ExtractError::missing_file(path, e.to_string()))?;

    let jpeg = Jpeg::from_bytes(Bytes::from(file_bytes))
        .map_err(|e| ExtractError::missing_file(path, format!("not a JPEG: {e}")))?;

    match jpeg.exif() {
        Some(block) if !block.is_empty() => Ok(block.to_vec()),
        _ => Err(ExtractError::missing_file(path, "no Exif block")),
    }
}

/// Read the camera metadata of a JPEG file.
pub fn read_metadata(path: &Path) -> Result<MetadataRecord, ExtractError> {
    let block = read_raw_block(path)?;
    log::debug!("Exif block of {} bytes in {}", block.len(), path.display());

    let tree = DirectoryTree::from_raw(block)?;
    extract(&tree, &FIELD_TABLE)
}
