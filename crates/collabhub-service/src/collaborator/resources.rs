//! The folder and file ids an operation applies to.

use std::collections::HashSet;

use uuid::Uuid;

use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_entity::grant::ResourceKind;

/// De-duplicated folder and file ids, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSet {
    folders: Vec<Uuid>,
    files: Vec<Uuid>,
}

impl ResourceSet {
    /// Build a set, dropping repeated ids.
    pub fn new(
        folders: impl IntoIterator<Item = Uuid>,
        files: impl IntoIterator<Item = Uuid>,
    ) -> Self {
        Self {
            folders: dedup(folders),
            files: dedup(files),
        }
    }

    /// Folder ids.
    pub fn folders(&self) -> &[Uuid] {
        &self.folders
    }

    /// File ids.
    pub fn files(&self) -> &[Uuid] {
        &self.files
    }

    /// Both kinds with their ids, folders first.
    pub fn by_kind(&self) -> [(ResourceKind, &[Uuid]); 2] {
        [
            (ResourceKind::Folder, self.folders.as_slice()),
            (ResourceKind::File, self.files.as_slice()),
        ]
    }

    /// True when neither folders nor files were given.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Reject an empty set.
    pub fn require_any(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::validation(
                "At least one folder or file id is required",
            ));
        }
        Ok(())
    }
}

fn dedup(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_dropped_in_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let set = ResourceSet::new([a, b, a], [b, b]);
        assert_eq!(set.folders(), &[a, b]);
        assert_eq!(set.files(), &[b]);
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let err = ResourceSet::new([], []).require_any().unwrap_err();
        assert_eq!(err.kind, collabhub_core::ErrorKind::Validation);
        assert!(ResourceSet::new([Uuid::new_v4()], []).require_any().is_ok());
    }
}
