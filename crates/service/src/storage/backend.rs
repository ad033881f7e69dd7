use std::{
    io,
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use tracing::debug;

/// Where a serialized document lives.
///
/// `read` returns the complete stored bytes and `write` replaces them
/// completely; there are no partial reads or appends.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    async fn read(&self) -> io::Result<Vec<u8>>;
    async fn write(&self, bytes: Vec<u8>) -> io::Result<()>;
    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// Document stored in a single file.
///
/// With `atomic` set, writes go to `<file>.tmp` first and are renamed over
/// the target, so readers never see a half-written file.
#[derive(Clone, Debug)]
pub struct FileStorage {
    file_path: PathBuf,
    atomic: bool,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), atomic: true }
    }

    /// Write straight into the target file instead of temp-and-rename.
    pub fn in_place(mut self) -> Self {
        self.atomic = false;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Create the file with `bytes` unless it already exists. Returns whether
    /// it was created.
    ///
    /// The content is staged in a private sibling and hard-linked into place,
    /// so an existing file is never replaced and the target never appears
    /// partially written.
    pub async fn create_if_absent(&self, bytes: &[u8]) -> io::Result<bool> {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        let staged = self.sibling(&format!(
            ".seed-{}-{}",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&staged, bytes).await?;
        let linked = fs::hard_link(&staged, &self.file_path).await;
        let _ = fs::remove_file(&staged).await;
        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl DocumentStorage for FileStorage {
    async fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.file_path).await
    }

    async fn write(&self, bytes: Vec<u8>) -> io::Result<()> {
        if !self.atomic {
            return fs::write(&self.file_path, bytes).await;
        }
        let tmp = self.temp_path();
        fs::write(&tmp, bytes).await?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e);
        }
        debug!(file = %self.file_path.display(), "document replaced");
        Ok(())
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}

/// Document held in memory. Starts empty, in which case `read` fails with
/// `NotFound` just like a missing file.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Option<Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { inner: Arc::new(RwLock::new(Some(bytes.into()))) }
    }

    /// Current contents, if anything has been written.
    pub async fn snapshot(&self) -> Option<Vec<u8>> {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl DocumentStorage for MemoryStorage {
    async fn read(&self) -> io::Result<Vec<u8>> {
        self.inner
            .read()
            .await
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "memory document not initialized"))
    }

    async fn write(&self, bytes: Vec<u8>) -> io::Result<()> {
        *self.inner.write().await = Some(bytes);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
