//! Host file access used to read persisted logs back

use async_trait::async_trait;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub kind: FileKind,
    pub size: u64,
}

impl FileStat {
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

#[async_trait]
pub trait HostFileSystem: Send + Sync {
    async fn stat(&self, path: &Path) -> io::Result<FileStat>;

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// File access straight through the local disk, for hosts whose log
/// directory is a plain path
#[cfg(feature = "local-fs")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[cfg(feature = "local-fs")]
#[async_trait]
impl HostFileSystem for LocalFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = tokio::fs::metadata(path).await?;
        let kind = if metadata.is_file() {
            FileKind::File
        } else if metadata.is_dir() {
            FileKind::Directory
        } else {
            FileKind::Other
        };
        Ok(FileStat {
            kind,
            size: metadata.len(),
        })
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}
