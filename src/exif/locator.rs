use super::error::{ExtractError, Stage};
use super::fields::FieldDescriptor;
use super::interpret::interpret;
use super::record::MetadataRecord;
use super::tree::DirectoryTree;

/// Find the first value of a descriptor's tag.
///
/// A directory path missing from the tree, or a matched entry whose value
/// cannot be decoded, is fatal. No matching entry yields the non-fatal
/// [`ExtractError::AbsentTag`].
pub fn locate(tree: &DirectoryTree, descriptor: &FieldDescriptor) -> Result<String, ExtractError> {
    let path = descriptor.path;
    let dir = tree.directory(path.as_str()).ok_or_else(|| {
        ExtractError::malformed(
            Stage::ResolvePath,
            Some(descriptor.field),
            format!("directory {path} not present"),
        )
    })?;

    let entry = dir
        .find(descriptor.tag)
        .next()
        .ok_or(ExtractError::AbsentTag {
            field: descriptor.field,
            tag: descriptor.tag,
            path,
        })?;

    entry.first_value().map_err(|e| {
        ExtractError::malformed(Stage::DecodeValue, Some(descriptor.field), e.to_string())
    })
}

/// Walk `table` against `tree` and build the record.
///
/// Absent tags and unparseable timestamps leave their field empty; any fatal
/// condition aborts and is returned as is.
pub fn extract(
    tree: &DirectoryTree,
    table: &[FieldDescriptor],
) -> Result<MetadataRecord, ExtractError> {
    let mut record = MetadataRecord::default();

    for descriptor in table {
        let outcome = locate(tree, descriptor).and_then(|raw| interpret(descriptor.field, &raw));
        match outcome {
            Ok(value) => record.set(descriptor.field, value),
            Err(e) if !e.is_fatal() => log::debug!("Skipping {}: {e}", descriptor.field),
            Err(e) => return Err(e),
        }
    }

    Ok(record)
}
