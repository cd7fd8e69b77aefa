use crate::domain::{Library, codec};
use crate::ports::library_repository::{LibraryRepository as LibraryRepositoryTrait, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// In-memory implementation of LibraryRepository
///
/// Keeps the encoded text snapshot in memory, so it exercises the same
/// codec as the file repository. Saves can be made to fail on demand
/// for testing storage errors.
pub struct LibraryRepository {
    snapshot: Mutex<Option<String>>,
    fail_saves: Mutex<bool>,
}

impl LibraryRepository {
    pub fn new() -> Self {
        Self {
            snapshot: Mutex::new(None),
            fail_saves: Mutex::new(false),
        }
    }

    /// Start with an already persisted snapshot
    pub fn with_snapshot(text: impl Into<String>) -> Self {
        Self {
            snapshot: Mutex::new(Some(text.into())),
            fail_saves: Mutex::new(false),
        }
    }

    /// Current stored text, if anything was saved
    pub async fn snapshot(&self) -> Option<String> {
        self.snapshot.lock().await.clone()
    }

    /// Make every following save fail with an I/O error
    pub async fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().await = fail;
    }
}

impl Default for LibraryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LibraryRepositoryTrait for LibraryRepository {
    async fn load(&self) -> Result<Option<(Library, codec::LoadReport)>> {
        Ok(self
            .snapshot
            .lock()
            .await
            .as_deref()
            .map(codec::decode))
    }

    async fn save(&self, library: &Library) -> Result<()> {
        if *self.fail_saves.lock().await {
            return Err(std::io::Error::other("storage unavailable").into());
        }

        let text = codec::encode(library)?;
        *self.snapshot.lock().await = Some(text);
        Ok(())
    }
}
