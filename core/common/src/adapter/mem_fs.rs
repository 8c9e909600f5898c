//! テスト用メモリファイルシステム
//!
//! パス -> 内容の Map で FileSystem を実装する。ストア・ロガーを
//! 実ディスクなしで動かすために usecase / adapter のテストから注入する。

use crate::error::Error;
use crate::ports::outbound::{FileMetadata, FileSystem};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// メモリ上の FileSystem 実装（テスト用）
#[derive(Debug, Clone, Default)]
pub struct MemFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MemFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期内容を持つ FS を組み立てる（テストのセットアップ用）
    pub fn with_files(entries: &[(&Path, &str)]) -> Self {
        let fs = Self::new();
        for (path, contents) in entries {
            fs.write(path, contents).expect("mem fs write");
        }
        fs
    }
}

impl FileSystem for MemFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        let files = self.files.lock().expect("mem fs lock");
        files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::io_msg(format!("Failed to read '{}': not found", path.display())))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        let mut files = self.files.lock().expect("mem fs lock");
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        let mut dirs = self.dirs.lock().expect("mem fs lock");
        let mut current = path.to_path_buf();
        loop {
            dirs.insert(current.clone());
            if !current.pop() || current.as_os_str().is_empty() {
                break;
            }
        }
        Ok(())
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata, Error> {
        let files = self.files.lock().expect("mem fs lock");
        if let Some(contents) = files.get(path) {
            return Ok(FileMetadata::new(contents.len() as u64, true, false));
        }
        let dirs = self.dirs.lock().expect("mem fs lock");
        let is_dir =
            dirs.contains(path) || files.keys().any(|p| p.ancestors().any(|a| a == path));
        if is_dir {
            return Ok(FileMetadata::new(0, false, true));
        }
        Err(Error::io_msg(format!(
            "Failed to get metadata for '{}': not found",
            path.display()
        )))
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        Ok(Box::new(MemAppendWriter {
            path: path.to_path_buf(),
            files: Arc::clone(&self.files),
            buf: Vec::new(),
        }))
    }
}

/// flush / drop 時に Map へ追記する Writer
struct MemAppendWriter {
    path: PathBuf,
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    buf: Vec<u8>,
}

impl std::io::Write for MemAppendWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let chunk = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        let mut files = self.files.lock().expect("mem fs lock");
        files.entry(self.path.clone()).or_default().push_str(&chunk);
        Ok(())
    }
}

impl Drop for MemAppendWriter {
    fn drop(&mut self) {
        use std::io::Write;
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_roundtrip() {
        let fs = MemFileSystem::new();
        let path = Path::new("/data/wardrobe/wardrobe_items.json");
        fs.write(path, "{\"items\": []}").unwrap();
        assert_eq!(fs.read_to_string(path).unwrap(), "{\"items\": []}");
    }

    #[test]
    fn test_missing_file_errors() {
        let fs = MemFileSystem::new();
        assert!(fs.read_to_string(Path::new("/nope")).is_err());
        assert!(!fs.exists(Path::new("/nope")));
    }

    #[test]
    fn test_parent_of_file_is_dir() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("/data/wardrobe/a.json"), "x").unwrap();
        assert!(fs.metadata(Path::new("/data/wardrobe")).unwrap().is_dir());
    }

    #[test]
    fn test_append_accumulates() {
        let fs = MemFileSystem::new();
        let path = Path::new("/log.jsonl");
        {
            let mut w = fs.open_append(path).unwrap();
            use std::io::Write;
            w.write_all(b"one\n").unwrap();
        }
        {
            let mut w = fs.open_append(path).unwrap();
            use std::io::Write;
            w.write_all(b"two\n").unwrap();
        }
        assert_eq!(fs.read_to_string(path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_with_files_seeds_contents() {
        let fs = MemFileSystem::with_files(&[(Path::new("/a"), "1"), (Path::new("/b"), "2")]);
        assert_eq!(fs.read_to_string(Path::new("/b")).unwrap(), "2");
    }
}
