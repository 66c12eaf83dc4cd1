use std::fs::Permissions;
use std::path::Path;

use tokio::fs;

use crate::error::UpdateError;

/// Why the index file is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing was extracted from the release page.
    EmptyRemote,
    /// The release text lacks the configured search string.
    Untrusted,
    /// Nothing was extracted from the overview page.
    EmptyCurrent,
    UpToDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    Skip(SkipReason),
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Skipped(SkipReason),
    /// The current version text does not occur in the index file.
    VersionNotInFile,
    Patched,
}

pub fn decide(current: &str, remote: &str, search_string: &str) -> UpdateDecision {
    if remote.is_empty() {
        UpdateDecision::Skip(SkipReason::EmptyRemote)
    } else if !remote.contains(search_string) {
        UpdateDecision::Skip(SkipReason::Untrusted)
    } else if current.is_empty() {
        UpdateDecision::Skip(SkipReason::EmptyCurrent)
    } else if current == remote {
        UpdateDecision::Skip(SkipReason::UpToDate)
    } else {
        UpdateDecision::Update
    }
}

/// Replaces the first occurrence of `old` in `content` with `new`.
///
/// Returns `None` when `old` is empty or does not occur.
pub fn replace_first(content: &[u8], old: &[u8], new: &[u8]) -> Option<Vec<u8>> {
    if old.is_empty() {
        return None;
    }

    let position = content.windows(old.len()).position(|window| window == old)?;

    let mut updated = Vec::with_capacity(content.len() - old.len() + new.len());
    updated.extend_from_slice(&content[..position]);
    updated.extend_from_slice(new);
    updated.extend_from_slice(&content[position + old.len()..]);
    Some(updated)
}

/// Rewrites `index_file` with the remote version if it is trusted and differs
/// from the current one.
///
/// # Errors
///
/// Returns `UpdateError::FileIo` when the file cannot be inspected, read or written.
pub async fn maybe_update(
    index_file: &Path,
    current: &str,
    remote: &str,
    search_string: &str,
) -> Result<UpdateOutcome, UpdateError> {
    match decide(current, remote, search_string) {
        UpdateDecision::Update => update_current_version(index_file, current, remote).await,
        UpdateDecision::Skip(reason) => Ok(UpdateOutcome::Skipped(reason)),
    }
}

/// Replaces the first occurrence of `old_version` in the file with `new_version`,
/// keeping the file's permission bits.
pub async fn update_current_version(
    index_file: &Path,
    old_version: &str,
    new_version: &str,
) -> Result<UpdateOutcome, UpdateError> {
    let metadata = fs::metadata(index_file)
        .await
        .map_err(|e| UpdateError::file_io("stat", index_file, e))?;

    let content = fs::read(index_file)
        .await
        .map_err(|e| UpdateError::file_io("read", index_file, e))?;

    let Some(updated) = replace_first(&content, old_version.as_bytes(), new_version.as_bytes()) else {
        return Ok(UpdateOutcome::VersionNotInFile);
    };

    fs::write(index_file, updated)
        .await
        .map_err(|e| UpdateError::file_io("write", index_file, e))?;

    // Writing in place keeps the mode; chmod only when it drifted, since it needs ownership
    let original = metadata.permissions();
    let written = fs::metadata(index_file)
        .await
        .map_err(|e| UpdateError::file_io("stat", index_file, e))?
        .permissions();
    if let Some(permissions) = permissions_to_restore(original, written) {
        fs::set_permissions(index_file, permissions)
            .await
            .map_err(|e| UpdateError::file_io("set permissions on", index_file, e))?;
    }

    Ok(UpdateOutcome::Patched)
}

fn permissions_to_restore(original: Permissions, written: Permissions) -> Option<Permissions> {
    (written != original).then_some(original)
}
