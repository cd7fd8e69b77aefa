use crate::domain::{Library, codec};
use crate::ports::library_repository::{LibraryRepository as LibraryRepositoryTrait, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Text-file implementation of LibraryRepository
///
/// Stores the whole library as one line-oriented text file
/// (see `domain::codec` for the format).
pub struct LibraryRepository {
    path: PathBuf,
}

impl LibraryRepository {
    /// Create a repository backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LibraryRepositoryTrait for LibraryRepository {
    /// Read and decode the data file
    ///
    /// A missing file means nothing has been saved yet and yields `None`.
    async fn load(&self) -> Result<Option<(Library, codec::LoadReport)>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Data file {} does not exist yet", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Read {} bytes from {}", text.len(), self.path.display());
        Ok(Some(codec::decode(&text)))
    }

    /// Encode the library and overwrite the data file
    ///
    /// The snapshot is encoded before any I/O happens, so an encoding
    /// failure leaves the existing file untouched.
    async fn save(&self, library: &Library) -> Result<()> {
        let text = codec::encode(library)?;
        tokio::fs::write(&self.path, text).await?;

        tracing::debug!("Wrote library snapshot to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogItem, ItemId, Member, MemberId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn library() -> Library {
        let mut library = Library::new();
        library.add_item(CatalogItem::printed(
            ItemId::new("B001"),
            "The Hobbit",
            "J.R.R. Tolkien",
            2,
        ));
        library.add_member(Member::new(MemberId::new(1), "Alice"));
        library
            .borrow(
                MemberId::new(1),
                &ItemId::new("B001"),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            )
            .unwrap();
        library
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let repository = LibraryRepository::new(dir.path().join("library_data.txt"));

        assert!(repository.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let repository = LibraryRepository::new(dir.path().join("library_data.txt"));
        let original = library();

        repository.save(&original).await.unwrap();
        let (restored, report) = repository.load().await.unwrap().unwrap();

        assert!(report.is_clean());
        assert_eq!(restored, original);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let repository = LibraryRepository::new(dir.path().join("missing").join("data.txt"));

        assert!(repository.save(&library()).await.is_err());
    }

    #[tokio::test]
    async fn test_unencodable_library_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let repository = LibraryRepository::new(dir.path().join("library_data.txt"));
        repository.save(&library()).await.unwrap();
        let before = tokio::fs::read_to_string(repository.path()).await.unwrap();

        let mut broken = library();
        broken.add_member(Member::new(MemberId::new(2), "Bob, Jr."));
        assert!(repository.save(&broken).await.is_err());

        let after = tokio::fs::read_to_string(repository.path()).await.unwrap();
        assert_eq!(before, after);
    }
}
